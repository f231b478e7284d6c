use indexmap::IndexMap;
use serde_json::Value;

use super::operation::Operation;
use crate::policy::{RetryConfig, TimeoutConfig};

/// A security requirement: scheme name to required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// The canonical, language-agnostic representation of an API description.
///
/// Built once by [`crate::parse::parse`] and treated as immutable for the
/// lifetime of a generation request, which makes concurrent fan-out over
/// multiple backends safe without coordination.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDocument {
    pub info: Info,
    /// Never empty: a default `http://localhost` server is synthesized when
    /// the source omits servers.
    pub servers: Vec<Server>,
    pub operations: Vec<Operation>,
    pub components: Components,
    pub security: Vec<SecurityRequirement>,
    /// Document-level retry policy, from `x-retry-config`,
    /// `x-speakeasy-retries`, or defaults.
    pub retry: RetryConfig,
    /// Document-level timeout policy, from `x-timeout` or defaults.
    pub timeout: TimeoutConfig,
}

impl SpecDocument {
    /// The base URL generators bake into client constructors: the first
    /// server's url.
    pub fn base_url(&self) -> &str {
        self.servers
            .first()
            .map(|server| server.url.as_str())
            .unwrap_or("http://localhost")
    }

    /// Effective timeout for an operation: its own `x-timeout` override if
    /// present, the document-level config otherwise.
    pub fn timeout_for<'a>(&'a self, op: &'a Operation) -> &'a TimeoutConfig {
        op.timeout.as_ref().unwrap_or(&self.timeout)
    }
}

/// Descriptive API metadata, used for generated package descriptors.
#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub contact: Option<Contact>,
    pub license: Option<License>,
}

/// Contact information.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub name: Option<String>,
    pub url: Option<String>,
    pub email: Option<String>,
}

/// License information.
#[derive(Debug, Clone, PartialEq)]
pub struct License {
    pub name: Option<String>,
    pub url: Option<String>,
}

/// A server URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    pub url: String,
    pub description: Option<String>,
}

/// Reusable components, passed through opaquely. Generators only ever
/// project schema nodes down to flat type tags.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Components {
    pub schemas: IndexMap<String, Value>,
    pub security_schemes: IndexMap<String, Value>,
    pub parameters: IndexMap<String, Value>,
    pub responses: IndexMap<String, Value>,
    pub request_bodies: IndexMap<String, Value>,
}
