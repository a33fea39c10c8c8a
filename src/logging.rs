use tracing_subscriber::{fmt, EnvFilter};

/// Install the console subscriber. `RUST_LOG` wins over `default` when it
/// holds a valid filter.
pub fn init(default: &str) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    fmt::Subscriber::builder()
        .with_env_filter(env_filter(rust_log.as_deref(), default))
        .with_target(false)
        .init();
}

fn env_filter(rust_log: Option<&str>, default: &str) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_overrides_default_level() {
        assert_eq!(env_filter(Some("warn"), "info").to_string(), "warn");
        let filter = env_filter(Some("error,roster_tools=debug"), "info").to_string();
        assert!(filter.contains("roster_tools=debug"), "{filter}");
        assert!(!filter.contains("info"), "{filter}");
    }

    #[test]
    fn test_default_without_rust_log() {
        assert_eq!(env_filter(None, "info").to_string(), "info");
    }
}
