//! Harness runtime configuration.

/// Run-mode switches for a lifecycle harness instance.
#[derive(Debug, Clone, Default)]
pub struct HarnessConfig {
    /// When true, dispatches hit the real service and the integration
    /// setup hook runs once before the first call. When false the setup
    /// hook is skipped and whatever client was wired (typically a recorded
    /// or in-memory fixture) serves the calls.
    pub run_integration_tests: bool,
}

impl HarnessConfig {
    /// Read configuration from the environment.
    ///
    /// `RUN_INTEGRATION_TESTS=1` (or `true`) enables integration mode.
    pub fn from_env() -> Self {
        let run_integration_tests = std::env::var("RUN_INTEGRATION_TESTS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Self {
            run_integration_tests,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_fixture_mode() {
        assert!(!HarnessConfig::default().run_integration_tests);
    }
}
