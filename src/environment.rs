use std::env;
use std::str::FromStr;

use tracing::warn;

/// Retrieves an environment variable and parses it into `T`.
///
/// # Arguments
/// - `var`: The name of the environment variable.
///
/// # Returns
/// - `None` when the variable is unset or empty, or when its value does not
///   parse (a warning is logged in that case).
pub fn get_env_var_parsed<T: FromStr>(var: &str) -> Option<T> {
    let raw = env::var(var).ok()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}: cannot parse '{}'", var, raw);
            None
        }
    }
}

/// Retrieves an environment variable as a trimmed, non-empty string.
pub fn get_env_var_string(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_variable_is_none() {
        assert_eq!(
            get_env_var_parsed::<f64>("PROVENANCE_TEST_SURELY_UNSET_VAR"),
            None
        );
        assert_eq!(get_env_var_string("PROVENANCE_TEST_SURELY_UNSET_VAR"), None);
    }
}
