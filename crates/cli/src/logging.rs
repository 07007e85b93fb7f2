// ABOUTME: Logging initialization for the prdscribe CLI.
// ABOUTME: Installs a tracing subscriber that writes to stderr so stdout carries only results.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "warn";

/// Pick the filter directive: `--verbose` wins, then `RUST_LOG`, then warn.
fn filter_directive(verbose: bool, rust_log: Option<String>) -> String {
    if verbose {
        return "debug".to_string();
    }
    rust_log
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Initialize logging to stderr.
pub fn init_logging(verbose: bool) {
    let directive = filter_directive(verbose, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_overrides_env() {
        assert_eq!(filter_directive(true, Some("error".into())), "debug");
    }

    #[test]
    fn env_used_when_set() {
        assert_eq!(filter_directive(false, Some("info".into())), "info");
    }

    #[test]
    fn defaults_to_warn() {
        assert_eq!(filter_directive(false, None), "warn");
        assert_eq!(filter_directive(false, Some("  ".into())), "warn");
    }
}
