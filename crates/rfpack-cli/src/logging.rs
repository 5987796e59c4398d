//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing`; the operator-facing lines on
//! stdout are written separately by [`crate::output`]. The filter directive
//! is fixed and never read from the environment.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Returns the filter directive for the given verbosity.
pub fn filter_directive(verbose: bool) -> &'static str {
    if verbose { "rfpack_core=debug,rfpack=debug,warn" } else { "warn" }
}

/// Installs the global tracing subscriber.
pub fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_new(filter_directive(verbose))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives_parse() {
        assert!(EnvFilter::try_new(filter_directive(true)).is_ok());
        assert!(EnvFilter::try_new(filter_directive(false)).is_ok());
    }

    #[test]
    fn test_verbose_enables_core_debug() {
        assert!(filter_directive(true).contains("rfpack_core=debug"));
        assert_eq!(filter_directive(false), "warn");
    }
}
