//! Logging setup.
//!
//! The library only emits `tracing` events. Binaries and tests that want to
//! see them call [`init_logging`] once at startup. Set `QUIZ_LOG` to an
//! `EnvFilter` directive (for example `quiz_round=debug`) to change the
//! level; the default is `info`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive.
pub const LOG_ENV_VAR: &str = "QUIZ_LOG";

/// Install a stdout `fmt` subscriber filtered by `QUIZ_LOG`.
///
/// Returns false if a global subscriber was already installed, which makes
/// repeated calls harmless.
pub fn init_logging() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging();
        assert!(!init_logging());
        tracing::info!("logging initialized");
    }
}
