use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Once;

use anyhow::{anyhow, Result};
use sweep_common::extract::PageExtractor;
use tracing::warn;

/// [`PageExtractor`] backed by `pdf-extract`.
pub struct PdfExtractor;

impl PageExtractor for PdfExtractor {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        extract_pages(path)
    }
}

/// Extract the text of every page of a PDF file, in document order.
///
/// Pages without extractable text come back as empty strings.
pub fn extract_pages(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path)?;
    extract_pages_from_bytes(&bytes, &path.display().to_string())
}

/// Extract per-page text from PDF bytes.
///
/// pdf-extract opens every page with a `"\n\n"` page break; that is stripped
/// so each element holds only the page's own text.
pub fn extract_pages_from_bytes(bytes: &[u8], name: &str) -> Result<Vec<String>> {
    let pages = catch_extract(name, || pdf_extract::extract_text_from_mem_by_pages(bytes))?;
    Ok(pages
        .into_iter()
        .map(|page| page.trim_start_matches('\n').to_string())
        .collect())
}

thread_local! {
    // Name of the file being parsed on this thread, for the panic hook.
    static EXTRACTING: RefCell<Option<String>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

/// Chain a panic hook that reports pdf-extract panics with the file name
/// through tracing instead of the bare default `thread 'main' panicked` text.
/// Panics outside an extraction go to the previous hook unchanged.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let prev = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let name = EXTRACTING.with(|e| e.borrow().clone());
            match name {
                Some(name) => warn!("pdf-extract panicked while processing {name}: {info}"),
                None => prev(info),
            }
        }));
    });
}

/// Run `f`, turning both its error and any panic into an `anyhow::Error`.
///
/// pdf-extract can panic on malformed PDFs; catching the unwind lets the run
/// continue with the next file.
fn catch_extract<E, F>(name: &str, f: F) -> Result<Vec<String>>
where
    E: std::fmt::Display,
    F: FnOnce() -> Result<Vec<String>, E>,
{
    install_panic_hook();
    EXTRACTING.with(|e| *e.borrow_mut() = Some(name.to_string()));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    EXTRACTING.with(|e| *e.borrow_mut() = None);

    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(anyhow!("{e}")),
        Err(payload) => Err(anyhow!("PDF parser panicked: {}", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "malformed document".to_string()
    }
}

/// Check whether a file name carries the `.pdf` suffix.
///
/// The match is on the literal suffix, so `.pdf` itself counts and
/// `report.pdf.bak` does not. With `ignore_case`, `REPORT.PDF` also matches.
pub fn has_pdf_suffix(name: &str, ignore_case: bool) -> bool {
    if ignore_case {
        name.to_ascii_lowercase().ends_with(".pdf")
    } else {
        name.ends_with(".pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_pdf_suffix() {
        assert!(has_pdf_suffix("a.pdf", false));
        assert!(has_pdf_suffix("budget v2.final.pdf", false));
        assert!(!has_pdf_suffix("A.PDF", false));
        assert!(!has_pdf_suffix("a.Pdf", false));
        assert!(!has_pdf_suffix("a.pdf.bak", false));
        assert!(!has_pdf_suffix("a.txt", false));
        assert!(!has_pdf_suffix("pdf", false));
    }

    #[test]
    fn test_has_pdf_suffix_ignore_case() {
        assert!(has_pdf_suffix("A.PDF", true));
        assert!(has_pdf_suffix("a.Pdf", true));
        assert!(has_pdf_suffix("a.pdf", true));
        assert!(!has_pdf_suffix("a.pdfx", true));
    }

    #[test]
    fn test_garbage_bytes_are_an_error() {
        let result = extract_pages_from_bytes(b"this is not a pdf at all", "junk.pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_truncated_header_is_an_error() {
        let result = extract_pages_from_bytes(b"%PDF-1.4\n1 0 obj\n<<", "truncated.pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PdfExtractor
            .extract_pages(&dir.path().join("gone.pdf"))
            .unwrap_err();
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }

    const HELLO_BLANK_WORLD: &[u8] = include_bytes!("../tests/fixtures/hello_blank_world.pdf");

    #[test]
    fn test_pages_have_no_leading_page_break() {
        let pages = extract_pages_from_bytes(HELLO_BLANK_WORLD, "hello_blank_world.pdf").unwrap();
        assert_eq!(pages, vec!["Hello".to_string(), String::new(), "World".to_string()]);
    }

    #[test]
    fn test_extractor_reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.pdf");
        std::fs::write(&path, HELLO_BLANK_WORLD).unwrap();
        let pages = PdfExtractor.extract_pages(&path).unwrap();
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0], "Hello");
        assert_eq!(pages[2], "World");
    }

    #[test]
    fn test_panic_becomes_error() {
        let err = catch_extract("boom.pdf", || -> Result<Vec<String>, String> {
            panic!("unexpected end of stream")
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "PDF parser panicked: unexpected end of stream");
        assert!(EXTRACTING.with(|e| e.borrow().is_none()));
    }

    #[test]
    fn test_formatted_panic_message_is_kept() {
        let offset = 512;
        let err = catch_extract("boom.pdf", || -> Result<Vec<String>, String> {
            panic!("bad xref at {offset}")
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "PDF parser panicked: bad xref at 512");
    }

    #[test]
    fn test_library_error_is_passed_through() {
        let err = catch_extract("bad.pdf", || Err::<Vec<String>, _>("Invalid file header"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid file header");
    }
}
