//! Minimal program that extracts the text of a single PDF file.
//!
//! Usage:
//!   cargo run --example pdf_to_text -- report.pdf

use pdftextview::{ExtractionOutcome, PdfTextExtractor};
use std::{env, fs, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <pdf_file>", args[0]);
        process::exit(1);
    }

    let bytes = fs::read(&args[1]).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", args[1]);
        process::exit(1);
    });

    match PdfTextExtractor::extract(&bytes) {
        ExtractionOutcome::Text(text) => println!("{text}"),
        ExtractionOutcome::Empty(note) => println!("({note})"),
        ExtractionOutcome::Failure(e) => {
            eprintln!("{}", e.display_line());
            process::exit(1);
        }
    }
}
