use std::sync::{Arc, RwLock};

use tracing::{field::Visit, Metadata, Subscriber};
use tracing_subscriber::layer::Context;

use crate::config::LogConfig;

/// A `tracing_subscriber` per-layer filter that drops events whose
/// `"<target>: <message>"` matches one of the `[log] ignore` patterns.
///
/// The subscriber is built before the config is read, so the filter starts
/// empty (passes everything) and clones share one pattern list: keep a clone
/// and call [`LogIgnoreFilter::apply`] once the config is loaded.
///
/// ```ignore
/// let ignore = LogIgnoreFilter::default();
/// tracing_subscriber::fmt::layer().with_filter(ignore.clone())
/// ```
#[derive(Clone, Default)]
pub struct LogIgnoreFilter {
    patterns: Arc<RwLock<Vec<regex::Regex>>>,
}

impl LogIgnoreFilter {
    /// Install the patterns from `config`, replacing any previous set.
    ///
    /// Patterns that fail to compile are skipped; the rest still apply. Returns
    /// each rejected pattern with its compile error.
    pub fn apply(&self, config: &LogConfig) -> Vec<(String, regex::Error)> {
        let mut compiled = Vec::with_capacity(config.ignore.len());
        let mut rejected = Vec::new();
        for pattern in &config.ignore {
            match regex::Regex::new(pattern) {
                Ok(re) => compiled.push(re),
                Err(e) => rejected.push((pattern.clone(), e)),
            }
        }
        *self.patterns.write().unwrap_or_else(|e| e.into_inner()) = compiled;
        rejected
    }

    fn is_ignored(&self, target: &str, message: &str) -> bool {
        let patterns = self.patterns.read().unwrap_or_else(|e| e.into_inner());
        if patterns.is_empty() {
            return false;
        }
        let candidate = format!("{target}: {message}");
        patterns.iter().any(|p| p.is_match(&candidate))
    }
}

impl<S: Subscriber> tracing_subscriber::layer::Filter<S> for LogIgnoreFilter {
    fn enabled(&self, _meta: &Metadata<'_>, _cx: &Context<'_, S>) -> bool {
        true
    }

    fn event_enabled(&self, event: &tracing::Event<'_>, _cx: &Context<'_, S>) -> bool {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        // pdf-extract and lopdf log through the `log` crate; bridged events
        // carry the fixed target "log" and the real one in "log.target".
        let target = visitor
            .log_target
            .as_deref()
            .unwrap_or_else(|| event.metadata().target());
        !self.is_ignored(target, &visitor.message)
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    log_target: Option<String>,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "log.target" => self.log_target = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{value:?}"),
            "log.target" => self.log_target = Some(format!("{value:?}")),
            _ => {}
        }
    }
}
