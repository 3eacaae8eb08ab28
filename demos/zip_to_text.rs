//! Scans a ZIP archive and prints the text of every PDF inside it, with a
//! provenance header per entry, the same output a host viewer would show.
//!
//! Usage:
//!   cargo run --example zip_to_text -- bundle.zip

use pdftextview::{ArchiveScanner, render};
use std::{env, fs, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <zip_file>", args[0]);
        process::exit(1);
    }

    let bytes = fs::read(&args[1]).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", args[1]);
        process::exit(1);
    });

    let outcomes = ArchiveScanner::scan(&bytes).unwrap_or_else(|e| {
        eprintln!("{}", e.display_line());
        process::exit(1);
    });

    let named: Vec<_> = outcomes
        .into_iter()
        .map(|(name, outcome)| (Some(name), outcome))
        .collect();

    println!("{}", render(&named));
}
