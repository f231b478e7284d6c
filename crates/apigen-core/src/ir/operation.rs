use indexmap::IndexMap;
use serde_json::Value;

use super::document::SecurityRequirement;
use super::schema::SchemaType;
use crate::policy::TimeoutConfig;

/// HTTP method of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Head,
}

impl HttpMethod {
    /// Methods recognized when walking a path item, in emission order.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }

    /// The lowercase key a path item uses for this method.
    pub fn key(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
        }
    }
}

/// A single API operation: one (path, method) pair from the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Raw path template, e.g. `/pets/{id}`.
    pub path: String,
    pub method: HttpMethod,
    /// From the source, or derived from (method, path); unique within the
    /// document after deduplication.
    pub operation_id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    pub responses: Vec<Response>,
    pub security: Vec<SecurityRequirement>,
    pub tags: Vec<String>,
    /// Operation-level `x-timeout` override, if any.
    pub timeout: Option<TimeoutConfig>,
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl ParameterLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
        }
    }

    /// Parse an `in` value; unrecognized locations default to query.
    pub fn from_key(key: &str) -> ParameterLocation {
        match key {
            "path" => ParameterLocation::Path,
            "header" => ParameterLocation::Header,
            "cookie" => ParameterLocation::Cookie,
            _ => ParameterLocation::Query,
        }
    }
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub description: Option<String>,
    pub required: bool,
    /// Canonical type tag; `None` when the schema is missing or its tag is
    /// unrecognized (maps to the per-language default type).
    pub schema: Option<SchemaType>,
    pub example: Option<Value>,
}

/// A request body; content is passed through opaquely.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    pub description: Option<String>,
    pub required: bool,
    pub content: IndexMap<String, Value>,
}

/// A response, keyed by the status code string exactly as given — a literal
/// code, a wildcard like `5XX`, or `default`.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status_code: String,
    pub description: Option<String>,
    pub content: IndexMap<String, Value>,
    pub headers: IndexMap<String, Value>,
}
