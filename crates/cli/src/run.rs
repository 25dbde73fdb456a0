use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use tracing::info;

use sweep_common::config::SweepConfig;
use sweep_common::extract::PageExtractor;

use crate::aggregate::{self, RunSummary};
use crate::scan;

/// Scan `config.input_dir` and write the concatenated text to `config.output_file`.
///
/// A missing input directory is reported before the output file is touched.
pub fn run(config: &SweepConfig, extractor: &dyn PageExtractor) -> Result<RunSummary> {
    let shown = std::path::absolute(&config.input_dir)
        .unwrap_or_else(|_| config.input_dir.clone());
    info!("Looking for PDFs in: {}", shown.display());

    let entries = scan::find_pdfs(&config.input_dir, &config.scan)?;
    info!("Found {} PDF files.", entries.len());

    let output = &config.output_file;
    let file = File::create(output)
        .with_context(|| format!("creating {}", output.display()))?;
    let mut out = BufWriter::new(file);

    let summary = aggregate::write_all(&mut out, &entries, extractor)
        .with_context(|| format!("writing {}", output.display()))?;
    out.flush()
        .with_context(|| format!("writing {}", output.display()))?;

    info!("Extraction complete. Check {}", output.display());
    info!("{} extracted, {} failed", summary.extracted, summary.failed);
    Ok(summary)
}
