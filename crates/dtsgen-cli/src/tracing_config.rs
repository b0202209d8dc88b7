//! Log subscriber setup for the `dtsgen` binary.
//!
//! Logging stays off unless `DTSGEN_LOG` or `RUST_LOG` is set. A bare level
//! in `DTSGEN_LOG` is scoped to the dtsgen crates, so `DTSGEN_LOG=debug`
//! shows filtered members and omitted nodes without dependency noise.
//! Target directives pass through unchanged:
//!
//! ```bash
//! DTSGEN_LOG=debug DTSGEN_LOG_FORMAT=tree dtsgen --package-name pkg ast/
//! DTSGEN_LOG="dtsgen_emitter::declaration_emitter=debug" dtsgen --package-name pkg ast/
//! ```
//!
//! `RUST_LOG` is used verbatim when `DTSGEN_LOG` is absent. Every format
//! writes to stderr; `--dry-run` owns stdout.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

pub const LOG_ENV: &str = "DTSGEN_LOG";
pub const LOG_FORMAT_ENV: &str = "DTSGEN_LOG_FORMAT";

/// Targets a bare `DTSGEN_LOG` level applies to.
const DTSGEN_TARGETS: [&str; 4] = ["dtsgen", "dtsgen_ast", "dtsgen_emitter", "dtsgen_cli"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One line per event.
    Text,
    /// Events nested under their `module` span via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON, one object per event.
    Json,
}

impl LogFormat {
    /// Parse a `DTSGEN_LOG_FORMAT` value; anything unknown is `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// What the subscriber should filter on and how it should print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub directives: String,
    pub format: LogFormat,
}

impl LogSettings {
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `None` when neither `DTSGEN_LOG` nor `RUST_LOG` is present.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let directives = match lookup(LOG_ENV) {
            Some(value) => scope_directives(&value),
            None => lookup("RUST_LOG")?,
        };
        let format = lookup(LOG_FORMAT_ENV)
            .map_or(LogFormat::Text, |value| LogFormat::parse(&value));
        Some(Self { directives, format })
    }

    fn install(&self) {
        let filter = EnvFilter::builder().parse_lossy(&self.directives);
        match self.format {
            LogFormat::Tree => {
                let layer = tracing_tree::HierarchicalLayer::default()
                    .with_indent_amount(2)
                    .with_indent_lines(true)
                    .with_deferred_spans(true)
                    .with_targets(true);
                Registry::default().with(filter).with(layer).init();
            }
            LogFormat::Json => {
                let layer = fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr);
                Registry::default().with(filter).with(layer).init();
            }
            LogFormat::Text => {
                let layer = fmt::layer().with_writer(std::io::stderr);
                Registry::default().with(filter).with(layer).init();
            }
        }
    }
}

/// Expand each bare level (`debug`) into one directive per dtsgen target.
pub fn scope_directives(value: &str) -> String {
    value
        .split(',')
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .flat_map(|directive| {
            if directive.parse::<LevelFilter>().is_ok() {
                DTSGEN_TARGETS
                    .iter()
                    .map(|target| format!("{target}={directive}"))
                    .collect()
            } else {
                vec![directive.to_string()]
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber if logging was requested.
pub fn init_tracing() {
    if let Some(settings) = LogSettings::from_env() {
        settings.install();
    }
}
