//! Print the header, columns and first rows of a TFS file.
//!
//! Run with: cargo run --example inspect -- twiss.tfs [INDEX_COLUMN KEY]

use std::env;
use std::error::Error;
use tfs_frame::{read_file_with_options, ReadOptions};

const PREVIEW_ROWS: usize = 5;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: inspect <file> [INDEX_COLUMN KEY]");
        std::process::exit(2);
    };
    let index = args.next().zip(args.next());

    let mut options = ReadOptions::new();
    if let Some((column, _)) = &index {
        options = options.with_index_column(column.as_str());
    }
    let df = read_file_with_options(&path, &options)?;

    println!("{df}");
    for column in df.columns() {
        println!("{:>20} {:>4} {} values", column.name(), column.data_type(), column.len());
    }

    println!("\nFirst rows:");
    for row in 0..df.row_count().min(PREVIEW_ROWS) {
        let mut line = String::new();
        for column in df.columns() {
            line.push_str(&column.display_at(row)?);
        }
        println!("{line}");
    }

    if let Some((column, key)) = index {
        let row = df.row_of(&key)?;
        println!("\n{column} = {key} is row {row}");
    }

    Ok(())
}
