//! Tracing subscriber setup.

use anyhow::{Context, anyhow};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE: &str = "classbank.log";

/// Where log events go.
pub enum LogTarget {
    /// CLI commands: stderr, next to the report printed on stdout.
    Stderr,
    /// Interactive menu: append to a file so the screen stays intact.
    File(PathBuf),
}

/// Install the global subscriber. `RUST_LOG` overrides `default_filter`.
pub fn init(default_filter: &str, target: LogTarget) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("invalid log level '{}'", default_filter))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let installed = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };
    installed.map_err(|e| anyhow!("failed to install logger: {}", e))
}
