use minijinja::context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::language::Language;

/// Request timeouts baked into every generated client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeoutConfig {
    /// Seconds to wait for a connection.
    pub connect_timeout: u64,
    /// Seconds to wait for response data.
    pub read_timeout: u64,
    /// Overall deadline in seconds; `None` means no cap.
    pub total_timeout: Option<u64>,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_timeout: 10,
            read_timeout: 30,
            total_timeout: None,
        }
    }
}

/// Raw shape of an `x-timeout` extension.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TimeoutExtension {
    connect: Option<u64>,
    read: Option<u64>,
    total: Option<u64>,
}

impl TimeoutConfig {
    /// Document-level `x-timeout`, or defaults. Operation-level overrides
    /// are resolved through [`crate::ir::SpecDocument::timeout_for`].
    pub fn from_document(raw: &Value) -> TimeoutConfig {
        raw.get("x-timeout")
            .map(Self::from_extension)
            .unwrap_or_default()
    }

    /// Read a single `x-timeout` mapping; malformed input degrades to
    /// defaults.
    pub fn from_extension(ext: &Value) -> TimeoutConfig {
        match serde_json::from_value::<TimeoutExtension>(ext.clone()) {
            Ok(ext) => {
                let defaults = TimeoutConfig::default();
                TimeoutConfig {
                    connect_timeout: ext.connect.unwrap_or(defaults.connect_timeout),
                    read_timeout: ext.read.unwrap_or(defaults.read_timeout),
                    total_timeout: ext.total,
                }
            }
            Err(err) => {
                log::warn!("ignoring malformed x-timeout: {err}");
                TimeoutConfig::default()
            }
        }
    }

    /// Render the timeout module for a target language.
    pub fn render_code(&self, lang: Language) -> String {
        self.render_code_in("client", lang)
    }

    /// Like [`TimeoutConfig::render_code`], with an explicit package or
    /// namespace for targets whose module system needs one (Go, C#).
    pub fn render_code_in(&self, package: &str, lang: Language) -> String {
        let source = match lang {
            Language::Python => include_str!("../../templates/timeout/python.j2"),
            Language::Javascript => include_str!("../../templates/timeout/javascript.j2"),
            Language::Go => include_str!("../../templates/timeout/go.j2"),
            Language::Rust => include_str!("../../templates/timeout/rust.j2"),
            Language::Csharp => include_str!("../../templates/timeout/csharp.j2"),
            Language::Java => include_str!("../../templates/timeout/java.j2"),
            Language::Php => include_str!("../../templates/timeout/php.j2"),
        };
        super::render(
            "timeout",
            source,
            context! {
                package => package,
                connect_timeout => self.connect_timeout,
                read_timeout => self.read_timeout,
                total_timeout => self.total_timeout,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = TimeoutConfig::default();
        assert_eq!(config.connect_timeout, 10);
        assert_eq!(config.read_timeout, 30);
        assert_eq!(config.total_timeout, None);
    }

    #[test]
    fn test_from_extension_partial() {
        let config = TimeoutConfig::from_extension(&json!({"connect": 5, "total": 120}));
        assert_eq!(config.connect_timeout, 5);
        assert_eq!(config.read_timeout, 30);
        assert_eq!(config.total_timeout, Some(120));
    }

    #[test]
    fn test_malformed_extension_degrades() {
        let config = TimeoutConfig::from_extension(&json!({"connect": "fast"}));
        assert_eq!(config, TimeoutConfig::default());
    }
}
