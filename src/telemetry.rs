//! Tracing subscriber setup for embedding applications and test rigs.

use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// Install a global fmt subscriber filtered by `RUST_LOG` (default `info`).
///
/// Returns `false` when a subscriber was already installed.
pub fn init_tracing(format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match format {
        LogFormat::Plain => fmt().with_env_filter(filter).with_target(true).try_init(),
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init(),
    };

    result.is_ok()
}
