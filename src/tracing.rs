//! Log output for the CLI and for hosts embedding the core
//!
//! The core only emits `tracing` events: `trace!` for each bracket scan
//! decision, `debug!` for each cursor's plan and for selection movement,
//! `warn!` when an edit is rejected or a setting is clamped. [`init`] is what
//! the binary calls to see them.
//!
//! Filter the terminal output with `RUST_LOG`, for example
//! `RUST_LOG=bracket_indent::indent=trace` to follow a scan line by line.
//! A debug-level copy goes to `bracket-indent.log` in the logs directory
//! from [`crate::config_paths::logs_dir`], rotated daily.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::Selection;

const LOG_FILE: &str = "bracket-indent.log";

/// Install the global subscriber: stderr (`RUST_LOG`, default `warn`) plus
/// the rotating debug file when the logs directory can be created.
///
/// Stdout is left alone because the CLI prints the buffer there.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => Some(
            fmt::layer()
                .with_writer(tracing_appender::rolling::daily(logs_dir, LOG_FILE))
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true)
                .with_filter(EnvFilter::new("debug")),
        ),
        Err(e) => {
            eprintln!("bracket-indent: file logging disabled ({})", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Selections before or after a keypress, compared for the `cursor` log target
#[derive(Debug, Clone)]
pub struct SelectionSnapshot {
    pub primary: usize,
    pub selections: Vec<Selection>,
}

impl SelectionSnapshot {
    pub fn new(selections: &[Selection], primary: usize) -> Self {
        Self {
            primary,
            selections: selections.to_vec(),
        }
    }

    /// Human-readable summary of what moved, or `None` if nothing did
    pub fn diff(&self, other: &SelectionSnapshot) -> Option<String> {
        if self.selections.len() != other.selections.len() {
            return Some(format!(
                "selection count: {} → {}",
                self.selections.len(),
                other.selections.len()
            ));
        }

        let mut changes = Vec::new();
        for (i, (before, after)) in self.selections.iter().zip(&other.selections).enumerate() {
            if before.head != after.head {
                changes.push(format!(
                    "#{}: ({},{}) → ({},{})",
                    i, before.head.line, before.head.column, after.head.line, after.head.column
                ));
            }
            if before.is_empty() != after.is_empty() {
                let status = if after.is_empty() {
                    "cleared"
                } else {
                    "active"
                };
                changes.push(format!("#{}: selection {}", i, status));
            }
        }
        if self.primary != other.primary {
            changes.push(format!("primary: {} → {}", self.primary, other.primary));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
