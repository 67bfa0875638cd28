use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use transaction_records::{ColumnValue, NewTransaction, create_transaction, initialize_db};

/// A utility for creating a test database for the transaction records server.
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
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test transactions...");

    let samples = [
        ("t1", "u1", ColumnValue::Integer(100), "DEBIT", "2024-01-01T09:30:00Z", "COMPLETED"),
        ("t2", "u1", ColumnValue::Real(42.5), "CREDIT", "2024-01-02T12:00:00Z", "PENDING"),
        ("t3", "u2", ColumnValue::Integer(250), "DEBIT", "2024-01-03T17:45:00Z", "PENDING"),
        ("t4", "u2", ColumnValue::Real(9.99), "CREDIT", "2024-01-04T08:15:00Z", "FAILED"),
    ];

    for (transaction_id, user_id, amount, transaction_type, timestamp, status) in samples {
        create_transaction(
            &NewTransaction {
                transaction_id: transaction_id.into(),
                user_id: user_id.into(),
                amount,
                transaction_type: transaction_type.into(),
                timestamp: timestamp.into(),
                status: status.into(),
            },
            &conn,
        )?;
    }

    println!("Success!");

    Ok(())
}
