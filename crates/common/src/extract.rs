use std::path::Path;

/// Trait implemented by each page-text extractor.
///
/// `extract_pages` returns one string per page, in document order. A page with
/// no extractable text is an empty string, not a missing element.
pub trait PageExtractor {
    fn extract_pages(&self, path: &Path) -> anyhow::Result<Vec<String>>;
}

/// Result of extracting a single file, as consumed by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Pages(Vec<String>),
    /// Failure description: the error's `Display` chain, folded onto one line.
    Failed(String),
}

impl FileOutcome {
    /// Run `extractor` on `path`, folding any error into [`FileOutcome::Failed`].
    pub fn from_extractor(extractor: &dyn PageExtractor, path: &Path) -> Self {
        match extractor.extract_pages(path) {
            Ok(pages) => FileOutcome::Pages(pages),
            Err(e) => FileOutcome::Failed(one_line(&format!("{e:#}"))),
        }
    }
}

/// Join the lines of `s` with single spaces; spacing within a line is kept.
fn one_line(s: &str) -> String {
    s.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    struct Fixed(Result<Vec<String>, String>);

    impl PageExtractor for Fixed {
        fn extract_pages(&self, _path: &Path) -> anyhow::Result<Vec<String>> {
            match &self.0 {
                Ok(pages) => Ok(pages.clone()),
                Err(msg) => Err(anyhow!("{msg}")).context("parsing PDF"),
            }
        }
    }

    #[test]
    fn test_pages_pass_through() {
        let ex = Fixed(Ok(vec!["one".into(), String::new(), "three".into()]));
        let outcome = FileOutcome::from_extractor(&ex, Path::new("a.pdf"));
        assert_eq!(
            outcome,
            FileOutcome::Pages(vec!["one".into(), String::new(), "three".into()])
        );
    }

    #[test]
    fn test_error_chain_becomes_description() {
        let ex = Fixed(Err("invalid xref table".into()));
        let outcome = FileOutcome::from_extractor(&ex, Path::new("b.pdf"));
        assert_eq!(
            outcome,
            FileOutcome::Failed("parsing PDF: invalid xref table".into())
        );
    }

    #[test]
    fn test_multiline_error_is_folded() {
        let ex = Fixed(Err("bad object\n  at offset 12\n".into()));
        let outcome = FileOutcome::from_extractor(&ex, Path::new("c.pdf"));
        assert_eq!(
            outcome,
            FileOutcome::Failed("parsing PDF: bad object at offset 12".into())
        );
    }

    #[test]
    fn test_spacing_within_a_line_is_kept() {
        let ex = Fixed(Err("object  12 0 R:\tbad\r\n dictionary".into()));
        let outcome = FileOutcome::from_extractor(&ex, Path::new("d.pdf"));
        assert_eq!(
            outcome,
            FileOutcome::Failed("parsing PDF: object  12 0 R:\tbad dictionary".into())
        );
    }
}
