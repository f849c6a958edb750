//! Logging setup on top of `tracing`.
//!
//! The core only emits `tracing` events; hosts call [`init`] once to install a
//! subscriber. JSON output keeps the one-object-per-line format downstream
//! collectors expect.

use tracing_subscriber::EnvFilter;

use super::config::AppCfg;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Returns `false` when a subscriber was already installed.
pub fn init(cfg: &AppCfg) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.log_level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if cfg.log_json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
