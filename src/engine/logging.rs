//! Logging setup for the binaries
//!
//! Logs go to stderr so JSON output on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Default filter for a `-v` count; `RUST_LOG` overrides it
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "themereg=warn,themereg_lib=warn",
        1 => "themereg=info,themereg_lib=info",
        _ => "themereg=debug,themereg_lib=debug",
    }
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    // A second init (e.g. in tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert!(default_filter(0).contains("=warn"));
        assert!(default_filter(1).contains("=info"));
        assert!(default_filter(5).contains("=debug"));
    }
}
