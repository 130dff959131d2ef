//! Environment variable expansion for configuration strings.

use std::borrow::Cow;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Values without `${` are returned unchanged, so bare `$VAR` or `$1` stays
/// literal. `field` names the configuration key for error reporting.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env(value)
        .map(Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_value_unchanged() {
        assert_eq!(expand_env("0.0.0.0", "server.host").unwrap(), "0.0.0.0");
    }

    #[test]
    fn test_bare_dollar_left_literal() {
        assert_eq!(
            expand_env("$PULSE_TEST_UNSET_HOST_VAR", "server.host").unwrap(),
            "$PULSE_TEST_UNSET_HOST_VAR"
        );
        assert_eq!(expand_env("site$1", "root").unwrap(), "site$1");
    }

    #[test]
    fn test_default_used_when_unset() {
        let value = expand_env("${PULSE_TEST_UNSET_HOST_VAR:-localhost}", "server.host").unwrap();
        assert_eq!(value, "localhost");
    }

    #[test]
    fn test_unset_without_default_errors() {
        let err = expand_env("${PULSE_TEST_UNSET_HOST_VAR}", "server.host").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("server.host"));
        assert!(message.contains("PULSE_TEST_UNSET_HOST_VAR"));
    }
}
