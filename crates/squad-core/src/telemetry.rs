//! Log output for `squadscan` and embedding services.
//!
//! Pipeline runs log their lifecycle through [`crate::obs`]; this module
//! decides where those lines go. Everything is written to stderr because the
//! CLI prints `OcrResult` JSON on stdout and the two must not interleave.
//!
//! Filtering comes from `SQUAD_LOG` when set, then `RUST_LOG`, then the
//! level passed by the caller. `SQUAD_LOG=squad_core=debug` shows every
//! per-candidate match decision without the noise of other crates.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable consulted before `RUST_LOG`.
pub const ENV_LOG: &str = "SQUAD_LOG";

/// Install the global subscriber. Later calls are no-ops.
///
/// `json` switches to newline-delimited JSON lines, one object per event,
/// so the `event = "pipeline.*"` fields can be filtered by log tooling.
pub fn init_tracing(json: bool, level: Level) {
    let filter = log_filter(level);
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if json {
        registry.with(layer.json()).try_init()
    } else {
        registry.with(layer).try_init()
    };
    // A subscriber set by the host process wins.
    installed.ok();
}

fn log_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}
