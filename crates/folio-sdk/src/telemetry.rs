use tracing_subscriber::EnvFilter;

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`; an unparsable filter
/// falls back to `info`. Returns `false` if a global subscriber was already
/// installed, in which case nothing changes.
pub fn init_tracing(default_filter: &str) -> bool {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(from_env.as_deref(), default_filter))
        .try_init()
        .is_ok()
}

/// Pick the first of `from_env`, `default_filter`, `info` that parses.
pub(crate) fn env_filter(from_env: Option<&str>, default_filter: &str) -> EnvFilter {
    from_env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(default_filter).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_applies_without_env() {
        let filter = env_filter(None, "folio_sdk=trace");
        assert_eq!(filter.to_string().to_lowercase(), "folio_sdk=trace");
    }

    #[test]
    fn env_overrides_default_filter() {
        let filter = env_filter(Some("warn"), "folio_sdk=trace");
        assert_eq!(filter.to_string().to_lowercase(), "warn");
    }

    #[test]
    fn second_init_is_a_no_op() {
        init_tracing("debug");
        assert!(!init_tracing("folio_sdk=trace"));
    }
}
