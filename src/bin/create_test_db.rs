use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::date;

use budget_calendar::{
    initialize_db,
    transaction::{Amount, Transaction, create_transaction},
};

/// A utility for creating a test database for the REST API server of budget_calendar.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test transactions...");

    let transactions = [
        Transaction::build(Amount::new(5000.0)?, date!(2025 - 04 - 17), "Salary").is_income(true),
        Transaction::build(Amount::new(120.0)?, date!(2025 - 04 - 18), "Shopping"),
        Transaction::build(Amount::new(1450.0)?, date!(2025 - 04 - 01), "Rent"),
        Transaction::build(Amount::new(250.5)?, date!(2025 - 05 - 02), "Power bill"),
        Transaction::build(Amount::new(300.0)?, date!(2025 - 05 - 09), "Freelance work")
            .is_income(true),
    ];

    for transaction in transactions {
        create_transaction(transaction, &conn)?;
    }

    println!("Success!");

    Ok(())
}
