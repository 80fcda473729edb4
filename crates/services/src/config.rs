use std::env;
use std::time::Duration;

use tutor_core::model::DEFAULT_STUDENT_LEVEL;

pub const DEFAULT_API_URL: &str = "https://tuteur-educatif.onrender.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the tutoring API lives and how the client talks to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub student_level: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            student_level: DEFAULT_STUDENT_LEVEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Reads `TUTOR_API_URL`, `TUTOR_STUDENT_LEVEL` and `TUTOR_TIMEOUT_SECS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut config = Self::new(
            non_blank("TUTOR_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        );
        if let Some(level) = non_blank("TUTOR_STUDENT_LEVEL") {
            config.student_level = level;
        }
        if let Some(secs) = non_blank("TUTOR_TIMEOUT_SECS").and_then(|raw| raw.parse().ok()) {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ApiConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.student_level, "lycée");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("TUTOR_API_URL", "http://localhost:8000"),
            ("TUTOR_STUDENT_LEVEL", "collège"),
            ("TUTOR_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.student_level, "collège");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn blank_or_invalid_values_are_ignored() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("TUTOR_API_URL", "  "),
            ("TUTOR_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
