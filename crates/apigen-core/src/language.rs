use std::fmt;

use serde::{Deserialize, Serialize};

/// A registered target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    Go,
    Rust,
    Csharp,
    Java,
    Php,
}

impl Language {
    /// Every registered language, in listing order.
    pub const ALL: [Language; 7] = [
        Language::Python,
        Language::Javascript,
        Language::Go,
        Language::Rust,
        Language::Csharp,
        Language::Java,
        Language::Php,
    ];

    /// The id used on the generation surface (CLI flags, HTTP payloads).
    pub fn id(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Csharp => "csharp",
            Language::Java => "java",
            Language::Php => "php",
        }
    }

    /// Human-facing name for listings.
    pub fn display_name(self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Javascript => "JavaScript/TypeScript",
            Language::Go => "Go",
            Language::Rust => "Rust",
            Language::Csharp => "C#",
            Language::Java => "Java",
            Language::Php => "PHP",
        }
    }

    /// Resolve an id, case-insensitively. `None` for unregistered ids.
    pub fn from_id(id: &str) -> Option<Language> {
        let id = id.to_ascii_lowercase();
        Language::ALL.into_iter().find(|lang| lang.id() == id)
    }

    /// Comma-separated list of registered ids, for error messages.
    pub fn supported_ids() -> String {
        Language::ALL
            .iter()
            .map(|lang| lang.id())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
