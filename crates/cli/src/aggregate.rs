use std::io::{self, Write};

use tracing::{info_span, warn};

use sweep_common::extract::{FileOutcome, PageExtractor};

use crate::scan::PdfEntry;

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub found: usize,
    pub extracted: usize,
    pub failed: usize,
}

/// Extract every entry in order and write one marker block per file to `out`.
///
/// Extraction failures are recorded inside the file's block and never stop
/// the loop. Only errors writing to `out` are returned.
pub fn write_all<W: Write>(
    out: &mut W,
    entries: &[PdfEntry],
    extractor: &dyn PageExtractor,
) -> io::Result<RunSummary> {
    let mut summary = RunSummary { found: entries.len(), ..Default::default() };

    for entry in entries {
        write_start(out, &entry.name)?;

        // pdf-extract and lopdf log without any path; the span puts
        // `pdf{file=<name>}` in front of whatever they emit.
        let outcome = {
            let _span = info_span!("pdf", file = %entry.name).entered();
            FileOutcome::from_extractor(extractor, &entry.path)
        };

        match &outcome {
            FileOutcome::Pages(_) => summary.extracted += 1,
            FileOutcome::Failed(desc) => {
                warn!("extract {}: {desc}", entry.path.display());
                summary.failed += 1;
            }
        }

        write_body(out, &entry.name, &outcome)?;
        write_end(out, &entry.name)?;
    }

    Ok(summary)
}

fn write_start<W: Write>(out: &mut W, name: &str) -> io::Result<()> {
    write!(out, "\n--- START OF FILE: {name} ---\n")
}

fn write_end<W: Write>(out: &mut W, name: &str) -> io::Result<()> {
    writeln!(out, "--- END OF FILE: {name} ---")
}

/// Non-empty pages each followed by a newline, or a single diagnostic line.
fn write_body<W: Write>(out: &mut W, name: &str, outcome: &FileOutcome) -> io::Result<()> {
    match outcome {
        FileOutcome::Pages(pages) => {
            for page in pages.iter().filter(|p| !p.is_empty()) {
                out.write_all(page.as_bytes())?;
                out.write_all(b"\n")?;
            }
            Ok(())
        }
        FileOutcome::Failed(desc) => writeln!(out, "Error reading {name}: {desc}"),
    }
}
