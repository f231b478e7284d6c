use minijinja::context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::language::Language;

/// Retry behavior baked into every generated client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryConfig {
    pub max_attempts: u32,
    /// Milliseconds before the first retry.
    pub initial_interval: u64,
    /// Ceiling for the computed backoff, in milliseconds.
    pub max_interval: u64,
    pub exponent: f64,
    /// Literal codes or `NXX` hundred-range wildcards, in match order.
    pub retry_on_status_codes: Vec<String>,
    pub retry_connection_errors: bool,
    pub respect_retry_after: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_interval: 500,
            max_interval: 60_000,
            exponent: 1.5,
            retry_on_status_codes: vec!["5XX".to_string(), "429".to_string(), "408".to_string()],
            retry_connection_errors: true,
            respect_retry_after: true,
        }
    }
}

/// Raw shape of the `x-retry-config` extension.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RetryExtension {
    max_attempts: Option<u32>,
    initial_interval: Option<u64>,
    max_interval: Option<u64>,
    exponent: Option<f64>,
    status_codes: Option<Vec<String>>,
    retry_connection_errors: Option<bool>,
    respect_retry_after: Option<bool>,
}

/// Raw shape of the `x-speakeasy-retries` extension; backoff fields are
/// nested.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SpeakeasyRetries {
    max_attempts: Option<u32>,
    status_codes: Option<Vec<String>>,
    retry_connection_errors: Option<bool>,
    backoff: SpeakeasyBackoff,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SpeakeasyBackoff {
    initial_interval: Option<u64>,
    max_interval: Option<u64>,
    exponent: Option<f64>,
}

impl RetryConfig {
    /// Extract retry settings from document-level extensions:
    /// `x-retry-config` first, the speakeasy form second, defaults last.
    /// A malformed extension block degrades to defaults.
    pub fn from_document(raw: &Value) -> RetryConfig {
        if let Some(ext) = raw.get("x-retry-config") {
            return match serde_json::from_value::<RetryExtension>(ext.clone()) {
                Ok(ext) => {
                    let defaults = RetryConfig::default();
                    RetryConfig {
                        max_attempts: ext.max_attempts.unwrap_or(defaults.max_attempts),
                        initial_interval: ext
                            .initial_interval
                            .unwrap_or(defaults.initial_interval),
                        max_interval: ext.max_interval.unwrap_or(defaults.max_interval),
                        exponent: ext.exponent.unwrap_or(defaults.exponent),
                        retry_on_status_codes: ext
                            .status_codes
                            .unwrap_or(defaults.retry_on_status_codes),
                        retry_connection_errors: ext
                            .retry_connection_errors
                            .unwrap_or(defaults.retry_connection_errors),
                        respect_retry_after: ext
                            .respect_retry_after
                            .unwrap_or(defaults.respect_retry_after),
                    }
                }
                Err(err) => {
                    log::warn!("ignoring malformed x-retry-config: {err}");
                    RetryConfig::default()
                }
            };
        }

        if let Some(ext) = raw.get("x-speakeasy-retries") {
            return match serde_json::from_value::<SpeakeasyRetries>(ext.clone()) {
                Ok(ext) => {
                    let defaults = RetryConfig::default();
                    RetryConfig {
                        max_attempts: ext.max_attempts.unwrap_or(defaults.max_attempts),
                        initial_interval: ext
                            .backoff
                            .initial_interval
                            .unwrap_or(defaults.initial_interval),
                        max_interval: ext.backoff.max_interval.unwrap_or(defaults.max_interval),
                        exponent: ext.backoff.exponent.unwrap_or(defaults.exponent),
                        retry_on_status_codes: ext
                            .status_codes
                            .unwrap_or(defaults.retry_on_status_codes),
                        retry_connection_errors: ext
                            .retry_connection_errors
                            .unwrap_or(defaults.retry_connection_errors),
                        respect_retry_after: true,
                    }
                }
                Err(err) => {
                    log::warn!("ignoring malformed x-speakeasy-retries: {err}");
                    RetryConfig::default()
                }
            };
        }

        RetryConfig::default()
    }

    /// True if a response status should be retried under this policy.
    ///
    /// A status matches a literal entry exactly, or falls in the hundred
    /// range of an `NXX` wildcard. Entries that are neither (`"5X"`,
    /// `"ABC"`) never match.
    pub fn should_retry(&self, status: u16) -> bool {
        self.retry_on_status_codes
            .iter()
            .any(|code| status_matches(code, status))
    }

    /// Backoff before retry `attempt` (0-based), in milliseconds, before
    /// jitter: `min(initial * exponent^attempt, max)`.
    pub fn backoff_interval(&self, attempt: u32) -> f64 {
        let computed = self.initial_interval as f64 * self.exponent.powi(attempt as i32);
        computed.min(self.max_interval as f64)
    }

    /// Render the retry module for a target language.
    pub fn render_code(&self, lang: Language) -> String {
        self.render_code_in("client", lang)
    }

    /// Like [`RetryConfig::render_code`], with an explicit package or
    /// namespace for targets whose module system needs one (Go, C#).
    pub fn render_code_in(&self, package: &str, lang: Language) -> String {
        let source = match lang {
            Language::Python => include_str!("../../templates/retry/python.j2"),
            Language::Javascript => include_str!("../../templates/retry/javascript.j2"),
            Language::Go => include_str!("../../templates/retry/go.j2"),
            Language::Rust => include_str!("../../templates/retry/rust.j2"),
            Language::Csharp => include_str!("../../templates/retry/csharp.j2"),
            Language::Java => include_str!("../../templates/retry/java.j2"),
            Language::Php => include_str!("../../templates/retry/php.j2"),
        };
        super::render(
            "retry",
            source,
            context! {
                package => package,
                max_attempts => self.max_attempts,
                initial_interval => self.initial_interval,
                max_interval => self.max_interval,
                exponent => self.exponent,
                retry_connection_errors => self.retry_connection_errors,
                respect_retry_after => self.respect_retry_after,
                codes_list => self
                    .retry_on_status_codes
                    .iter()
                    .map(|code| format!("\"{code}\""))
                    .collect::<Vec<_>>()
                    .join(", "),
            },
        )
    }
}

fn status_matches(code: &str, status: u16) -> bool {
    if let Some(prefix) = code.strip_suffix("XX") {
        let mut digits = prefix.chars();
        match (digits.next().and_then(|c| c.to_digit(10)), digits.next()) {
            (Some(hundreds), None) => {
                let base = hundreds as u16 * 100;
                status >= base && status < base + 100
            }
            _ => false,
        }
    } else {
        code.parse::<u16>().map_or(false, |exact| exact == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_matching() {
        let config = RetryConfig::default();
        assert!(config.should_retry(503));
        assert!(config.should_retry(500));
        assert!(config.should_retry(599));
        assert!(config.should_retry(429));
        assert!(config.should_retry(408));
        assert!(!config.should_retry(404));
        assert!(!config.should_retry(200));
    }

    #[test]
    fn test_malformed_wildcards_never_match() {
        let config = RetryConfig {
            retry_on_status_codes: vec!["5X".to_string(), "ABC".to_string(), "XXX".to_string()],
            ..RetryConfig::default()
        };
        for status in [200, 404, 500, 503, 599] {
            assert!(!config.should_retry(status));
        }
    }

    #[test]
    fn test_backoff_bounded_by_max_interval() {
        let config = RetryConfig::default();
        assert_eq!(config.backoff_interval(0), 500.0);
        for attempt in 0..64 {
            assert!(config.backoff_interval(attempt) <= config.max_interval as f64);
        }
    }
}
