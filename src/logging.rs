//! Diagnostic logging setup
//!
//! Operator-facing progress goes to stdout with `println!`; everything emitted
//! through `tracing` goes to stderr, filtered by `RELEASE_MANAGER_LOG`.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives
pub const LOG_ENV: &str = "RELEASE_MANAGER_LOG";

const DEFAULT_FILTER: &str = "warn";

static INIT_ONCE: Once = Once::new();

/// Filter from `RELEASE_MANAGER_LOG`, or `warn` when unset or invalid
fn env_filter() -> EnvFilter {
  EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the stderr subscriber; later calls are no-ops
pub fn init() {
  INIT_ONCE.call_once(|| {
    let _ = tracing_subscriber::fmt()
      .with_env_filter(env_filter())
      .with_writer(std::io::stderr)
      .with_target(false)
      .try_init();
  });
}
