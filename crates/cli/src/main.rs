use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use sweep_cli::args::Args;
use sweep_common::config::load_config;
use sweep_common::logging::LogIgnoreFilter;
use sweep_extract_pdf::PdfExtractor;

fn main() -> Result<()> {
    let ignore = LogIgnoreFilter::default();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn,sweep_cli=info".into()))
        .with(tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(ignore.clone()))
        .init();

    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    args.apply(&mut config);

    if args.print_config {
        let effective = toml::to_string_pretty(&config).context("serializing config")?;
        print!("{effective}");
        return Ok(());
    }

    for (pattern, e) in ignore.apply(&config.log) {
        tracing::warn!("skipping invalid log ignore pattern {pattern:?}: {e}");
    }

    sweep_cli::run::run(&config, &PdfExtractor)?;
    Ok(())
}
