use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "pdfsweep.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Directory scanned (non-recursively) for PDF files. Must already exist.
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Text file receiving the concatenated output; truncated on every run.
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,

    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_file: default_output_file(),
            scan: ScanConfig::default(),
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Match the `.pdf` suffix ignoring ASCII case (`REPORT.PDF`).
    #[serde(default)]
    pub ignore_case: bool,

    /// Process files in file-name order instead of directory listing order.
    #[serde(default)]
    pub sort: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Regexes matched against `"<target>: <message>"`; matching events are dropped.
    #[serde(default = "default_log_ignore")]
    pub ignore: Vec<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { ignore: default_log_ignore() }
    }
}

fn default_input_dir() -> PathBuf {
    Path::new("docs").join("required_changes")
}

fn default_output_file() -> PathBuf {
    PathBuf::from("requirements_extracted.txt")
}

fn default_log_ignore() -> Vec<String> {
    vec!["pdf_extract: unknown glyph name".into()]
}

/// Parse a TOML config string, warning about (but otherwise ignoring) unknown keys.
pub fn parse_config(s: &str) -> Result<SweepConfig> {
    let (config, unknown) = parse_with_ignored(s)?;
    for key in &unknown {
        warn!("unknown config key: {key}");
    }
    Ok(config)
}

fn parse_with_ignored(s: &str) -> Result<(SweepConfig, Vec<String>)> {
    let mut unknown = Vec::new();
    let de = toml::Deserializer::new(s);
    let config: SweepConfig = serde_ignored::deserialize(de, |path| {
        unknown.push(path.to_string());
    })
    .context("parsing config")?;
    Ok((config, unknown))
}

/// Load the effective configuration.
///
/// An explicit path must exist. Without one, `pdfsweep.toml` in the working
/// directory is used when present, and the built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<SweepConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.is_file() {
                return Ok(SweepConfig::default());
            }
            fallback
        }
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("in config {}", path.display()))
}
