use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tracing::warn;
use walkdir::WalkDir;

use sweep_common::config::ScanConfig;
use sweep_extract_pdf::has_pdf_suffix;

/// A PDF selected for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfEntry {
    /// Bare file name, as written into the output markers.
    pub name: String,
    pub path: PathBuf,
}

/// Fail unless `dir` exists and is a directory.
pub fn ensure_input_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        bail!("Directory not found: {}", dir.display());
    }
    Ok(())
}

/// List the PDFs directly inside `dir` (no recursion).
///
/// Order is whatever the filesystem returns unless `scan.sort` is set, in
/// which case entries come back sorted by file name.
pub fn find_pdfs(dir: &Path, scan: &ScanConfig) -> Result<Vec<PdfEntry>> {
    ensure_input_dir(dir)?;

    let mut walker = WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true);
    if scan.sort {
        walker = walker.sort_by_file_name();
    }

    let mut entries = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => { warn!("walk error: {e}"); continue; }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            warn!("skipping non-UTF-8 file name: {}", entry.path().display());
            continue;
        };
        if !has_pdf_suffix(name, scan.ignore_case) {
            continue;
        }
        entries.push(PdfEntry {
            name: name.to_string(),
            path: entry.path().to_path_buf(),
        });
    }
    Ok(entries)
}
