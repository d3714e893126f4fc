//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// Bare `$VAR` is left alone; only the braced form is expanded. An unset
/// variable without a default is an error naming `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Expand an optional value in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(v) = value.as_deref() {
        *value = Some(expand_env(v, field)?);
    }
    Ok(())
}

struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("QUILL_TEST_PREFIX", "Block");
        }
        let result = expand_env("${QUILL_TEST_PREFIX}", "html.block_id_prefix").unwrap();
        assert_eq!(result, "Block");
        unsafe {
            std::env::remove_var("QUILL_TEST_PREFIX");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("QUILL_TEST_UNSET_SORT");
        }
        let result = expand_env("${QUILL_TEST_UNSET_SORT:-date}", "citations.sort_by").unwrap();
        assert_eq!(result, "date");
    }

    #[test]
    fn test_expand_embedded_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("QUILL_TEST_YEAR", "2021");
        }
        let result = expand_env("${QUILL_TEST_YEAR}/01/01", "citations.start_date").unwrap();
        assert_eq!(result, "2021/01/01");
        unsafe {
            std::env::remove_var("QUILL_TEST_YEAR");
        }
    }

    #[test]
    fn test_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("QUILL_TEST_MISSING");
        }
        let err = expand_env("${QUILL_TEST_MISSING}", "citations.end_date").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert_eq!(
            err.to_string(),
            "Environment variable error in citations.end_date: ${QUILL_TEST_MISSING} not set"
        );
    }

    #[test]
    fn test_bare_dollar_unchanged() {
        assert_eq!(expand_env("$HOME", "html.block_id_prefix").unwrap(), "$HOME");
        assert_eq!(expand_env("plain", "html.block_id_prefix").unwrap(), "plain");
    }

    #[test]
    fn test_expand_opt_none() {
        let mut value = None;
        expand_opt(&mut value, "citations.start_date").unwrap();
        assert_eq!(value, None);
    }
}
