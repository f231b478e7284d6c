//! Validation and normalization of raw API descriptions.
//!
//! The core never parses text: the loader hands in an already-decoded
//! [`serde_json::Value`] mapping. [`validate`] reports missing mandatory
//! fields; [`parse`] assumes validity and absorbs every individually
//! missing sub-field with a documented default.

mod components;
mod operation;

use serde_json::Value;

use crate::ir::{Contact, Info, License, SecurityRequirement, Server, SpecDocument};
use crate::policy::{RetryConfig, TimeoutConfig};

pub use operation::derive_operation_id;

/// Check a decoded spec mapping for the mandatory top-level fields.
///
/// Returns one message per deficiency, in a fixed order (openapi, info,
/// paths), so a caller can fix every problem in one pass. An empty list
/// means structurally valid.
pub fn validate(raw: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    if raw.get("openapi").is_none() {
        errors.push("Missing 'openapi' field".to_string());
    }

    match raw.get("info") {
        None => errors.push("Missing 'info' field".to_string()),
        Some(info) => {
            if info.get("title").is_none() {
                errors.push("Missing 'info.title' field".to_string());
            }
        }
    }

    let paths_present = raw
        .get("paths")
        .and_then(Value::as_object)
        .is_some_and(|paths| !paths.is_empty());
    if !paths_present {
        errors.push("Missing or empty 'paths' field".to_string());
    }

    errors
}

/// Normalize a validated spec mapping into the canonical [`SpecDocument`].
pub fn parse(raw: &Value) -> SpecDocument {
    SpecDocument {
        info: parse_info(raw.get("info")),
        servers: parse_servers(raw.get("servers")),
        operations: operation::parse_operations(raw.get("paths")),
        components: components::parse_components(raw.get("components")),
        security: parse_security(raw.get("security")),
        retry: RetryConfig::from_document(raw),
        timeout: TimeoutConfig::from_document(raw),
    }
}

fn parse_info(info: Option<&Value>) -> Info {
    Info {
        title: str_field(info, "title").unwrap_or_else(|| "API Client".to_string()),
        version: str_field(info, "version").unwrap_or_else(|| "1.0.0".to_string()),
        description: str_field(info, "description"),
        contact: info.and_then(|node| node.get("contact")).map(|contact| Contact {
            name: str_field(Some(contact), "name"),
            url: str_field(Some(contact), "url"),
            email: str_field(Some(contact), "email"),
        }),
        license: info.and_then(|node| node.get("license")).map(|license| License {
            name: str_field(Some(license), "name"),
            url: str_field(Some(license), "url"),
        }),
    }
}

fn parse_servers(servers: Option<&Value>) -> Vec<Server> {
    let parsed: Vec<Server> = servers
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|server| {
                    Some(Server {
                        url: server.get("url")?.as_str()?.to_string(),
                        description: server
                            .get("description")
                            .and_then(Value::as_str)
                            .map(String::from),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    if parsed.is_empty() {
        vec![Server {
            url: "http://localhost".to_string(),
            description: Some("Default server".to_string()),
        }]
    } else {
        parsed
    }
}

pub(crate) fn parse_security(security: Option<&Value>) -> Vec<SecurityRequirement> {
    security
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_object)
                .map(|requirement| {
                    requirement
                        .iter()
                        .map(|(scheme, scopes)| {
                            let scopes = scopes
                                .as_array()
                                .map(|list| {
                                    list.iter()
                                        .filter_map(Value::as_str)
                                        .map(String::from)
                                        .collect()
                                })
                                .unwrap_or_default();
                            (scheme.clone(), scopes)
                        })
                        .collect()
                })
                .collect()
        })
        .unwrap_or_default()
}

fn str_field(node: Option<&Value>, key: &str) -> Option<String> {
    node?.get(key)?.as_str().map(String::from)
}
