//! Environment variable helpers for service configuration.

/// Read an environment variable, falling back to a default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read and parse an environment variable, falling back to a default
/// when unset or unparseable.
pub fn env_or_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_default_when_unset() {
        assert_eq!(env_or("WARDEN_TEST_UNSET_VAR", "fallback"), "fallback");
        assert_eq!(env_or_parse("WARDEN_TEST_UNSET_VAR", 8080u16), 8080);
    }

    #[test]
    fn parses_value_when_set() {
        std::env::set_var("WARDEN_TEST_PORT_VAR", "9999");
        assert_eq!(env_or_parse("WARDEN_TEST_PORT_VAR", 8080u16), 9999);
        std::env::remove_var("WARDEN_TEST_PORT_VAR");
    }
}
