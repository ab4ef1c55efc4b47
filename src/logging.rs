//! Tracing subscriber setup.
//!
//! Library code only emits `tracing` events; hosts that want them printed
//! call [`init_tracing`] once at startup. Later calls are no-ops. Output goes
//! to stderr so stdout stays free for machine-readable results.

use crate::constants::DEFAULT_LOG_FILTER;
use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Install a fmt subscriber. `RUST_LOG` overrides `filter`; an unparsable
/// filter falls back to the crate default.
///
/// Returns true if this call installed the subscriber.
pub fn init_tracing(filter: &str) -> bool {
    let mut installed_now = false;
    INSTALLED.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(filter))
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        installed_now = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok();
    });
    installed_now
}
