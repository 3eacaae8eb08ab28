//! CLI front-end for the pdftextview crate.
//!
//! Reads a file (a PDF, or a ZIP of PDFs), classifies it the way a host
//! would (by declared content type) and prints the extracted display text.

use pdftextview::{PdfTextViewer, ResponseViewer};
use std::{env, fs, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.contains(&"--help".to_string()) || args.contains(&"-h".to_string()) {
        print_usage(&args[0]);
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let path = &args[1];
    let declared = args.get(2).cloned();

    let content_type = declared.or_else(|| content_type_for(path));
    let Some(content_type) = content_type else {
        eprintln!("✗ Cannot infer a content type from '{path}'; pass one explicitly.");
        process::exit(2);
    };

    let body = match fs::read(path) {
        Ok(body) => body,
        Err(e) => {
            eprintln!("✗ Failed to read '{path}': {e}");
            process::exit(1);
        }
    };

    let viewer = PdfTextViewer::new();

    if !viewer.is_relevant(Some(&content_type)) {
        eprintln!("✗ Unsupported content type '{content_type}', nothing to display.");
        process::exit(2);
    }

    println!("{}", viewer.render_display_text(&body, Some(&content_type)));
}

fn print_usage(program_name: &str) {
    println!("pdftextview - PDF & ZIP-of-PDFs text viewer");
    println!();
    println!("USAGE:");
    println!("    {program_name} <file> [content_type]");
    println!();
    println!("ARGUMENTS:");
    println!("    <file>           Path to a .pdf or .zip file");
    println!("    [content_type]   Declared content type; inferred from the");
    println!("                     file extension when omitted");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show this help message");
    println!();
    println!("EXAMPLES:");
    println!("    {program_name} report.pdf");
    println!("    {program_name} bundle.zip");
    println!("    {program_name} download.bin application/pdf");
}

/// Map a file extension to the content type a server would declare for it.
fn content_type_for(path: &str) -> Option<String> {
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".pdf") {
        Some("application/pdf".to_string())
    } else if lower.ends_with(".zip") {
        Some("application/zip".to_string())
    } else {
        None
    }
}
