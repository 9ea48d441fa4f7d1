//! Convert between text and binary TFS files, picking codecs by extension.
//!
//! Run with: cargo run --example convert -- twiss.tfs twiss.btfs

use std::env;
use std::error::Error;
use tfs_frame::{read_file, write_file};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let [input, output] = args.as_slice() else {
        eprintln!("usage: convert <input.tfs|input.btfs> <output.tfs|output.btfs>");
        std::process::exit(2);
    };

    let df = read_file(input)?;
    write_file(&df, output)?;
    println!(
        "✓ {} -> {} ({} columns, {} rows)",
        input,
        output,
        df.column_count(),
        df.row_count()
    );

    Ok(())
}
