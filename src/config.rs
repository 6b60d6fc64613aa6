//! Expression tree configuration.

use std::env;

/// Behaviour switches for an [`ItemExpressionBuilder`](crate::ItemExpressionBuilder)
///
/// The defaults keep the permissive semantics: an update operation on a node
/// silently supersedes any update intent on its descendants.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Fail `build_update_builder` with [`Error::SupersededUpdate`](crate::Error::SupersededUpdate)
    /// when a descendant's update would be dropped because an ancestor
    /// already carries an operation.
    pub strict_updates: bool,
}

impl BuilderConfig {
    /// Create configuration from environment variables.
    ///
    /// - `DYNAMO_EXPR_STRICT_UPDATES`: `1`, `true` or `yes` enables strict updates
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            strict_updates: env_bool("DYNAMO_EXPR_STRICT_UPDATES", false),
        }
    }

    /// Enable or disable strict update checking
    #[must_use]
    pub fn with_strict_updates(mut self, strict_updates: bool) -> Self {
        self.strict_updates = strict_updates;
        self
    }
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key).map_or(default, |v| {
        matches!(v.as_str(), "1" | "true" | "yes" | "TRUE" | "YES")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_is_permissive() {
        assert!(!BuilderConfig::default().strict_updates);
    }

    #[test]
    fn test_with_strict_updates() {
        let config = BuilderConfig::default().with_strict_updates(true);
        assert!(config.strict_updates);
    }

    #[test]
    fn test_env_bool_falls_back_to_default() {
        assert!(env_bool("DYNAMO_EXPR_TEST_UNSET_VARIABLE", true));
        assert!(!env_bool("DYNAMO_EXPR_TEST_UNSET_VARIABLE", false));
    }

    #[test]
    #[serial]
    fn test_from_env_strict_updates() {
        let key = "DYNAMO_EXPR_STRICT_UPDATES";
        unsafe { env::set_var(key, "true") };
        assert!(BuilderConfig::from_env().strict_updates);

        unsafe { env::set_var(key, "no") };
        assert!(!BuilderConfig::from_env().strict_updates);

        unsafe { env::remove_var(key) };
        assert_eq!(BuilderConfig::from_env(), BuilderConfig::default());
    }
}
