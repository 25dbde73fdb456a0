use std::path::Path;
use std::process;

use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: sweep-extract-pdf <file-path>");
        eprintln!();
        eprintln!("Extracts per-page text from a PDF file and outputs a JSON array of strings.");
        process::exit(1);
    }

    let path = Path::new(&args[1]);

    match sweep_extract_pdf::extract_pages(path) {
        Ok(pages) => match serde_json::to_string_pretty(&pages) {
            Ok(json) => {
                println!("{}", json);
            }
            Err(e) => {
                eprintln!("Error serializing to JSON: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Error reading {}: {:#}", path.display(), e);
            process::exit(1);
        }
    }
}
