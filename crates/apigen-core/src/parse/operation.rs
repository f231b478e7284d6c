use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::Value;

use crate::ir::{
    HttpMethod, Operation, Parameter, ParameterLocation, RequestBody, Response, SchemaType,
};
use crate::policy::TimeoutConfig;

/// Walk the `paths` map and produce one [`Operation`] per (path, method).
///
/// Structurally malformed entries (non-mapping path items or method bodies)
/// are skipped rather than failing; a missing `paths` node yields an empty
/// list.
pub(super) fn parse_operations(paths: Option<&Value>) -> Vec<Operation> {
    let mut operations = Vec::new();
    let Some(paths) = paths.and_then(Value::as_object) else {
        return operations;
    };

    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            log::debug!("skipping non-mapping path item at {path}");
            continue;
        };
        for method in HttpMethod::ALL {
            if let Some(op) = item.get(method.key()).and_then(Value::as_object) {
                operations.push(build_operation(path, method, op));
            }
        }
    }

    dedup_operation_ids(&mut operations);
    operations
}

fn build_operation(
    path: &str,
    method: HttpMethod,
    op: &serde_json::Map<String, Value>,
) -> Operation {
    let operation_id = op
        .get("operationId")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| derive_operation_id(method, path));

    Operation {
        path: path.to_string(),
        method,
        operation_id,
        summary: op.get("summary").and_then(Value::as_str).map(String::from),
        description: op
            .get("description")
            .and_then(Value::as_str)
            .map(String::from),
        parameters: op
            .get("parameters")
            .and_then(Value::as_array)
            .map(|params| params.iter().filter_map(parse_parameter).collect())
            .unwrap_or_default(),
        request_body: op.get("requestBody").and_then(parse_request_body),
        responses: op
            .get("responses")
            .and_then(Value::as_object)
            .map(parse_responses)
            .unwrap_or_default(),
        security: super::parse_security(op.get("security")),
        tags: op
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
        timeout: op.get("x-timeout").map(TimeoutConfig::from_extension),
    }
}

/// Derive a deterministic operation id from method and path.
///
/// Parameter segments (`{id}`) are dropped, the remaining segments are
/// joined with `_` after the lowercased method, and runs of characters
/// outside `[A-Za-z0-9_]` collapse to a single `_`. `GET /pets/{id}`
/// derives `get_pets`; a bare `/` derives `get_root`.
pub fn derive_operation_id(method: HttpMethod, path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| {
            !segment.is_empty() && !(segment.starts_with('{') && segment.ends_with('}'))
        })
        .collect();

    if segments.is_empty() {
        return format!("{}_root", method.key());
    }

    collapse_invalid(&format!("{}_{}", method.key(), segments.join("_")))
}

fn collapse_invalid(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_separator {
                out.push('_');
                pending_separator = false;
            }
            out.push(ch);
        } else {
            pending_separator = true;
        }
    }
    out
}

/// Two distinct paths can normalize to the same id; suffix later
/// occurrences (`_2`, `_3`, …) in document order so every id is unique.
fn dedup_operation_ids(operations: &mut [Operation]) {
    let mut seen: HashMap<String, u32> = HashMap::new();
    for op in operations.iter_mut() {
        let count = seen.entry(op.operation_id.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            op.operation_id = format!("{}_{}", op.operation_id, count);
        }
    }
}

fn parse_parameter(param: &Value) -> Option<Parameter> {
    Some(Parameter {
        name: param.get("name")?.as_str()?.to_string(),
        location: param
            .get("in")
            .and_then(Value::as_str)
            .map(ParameterLocation::from_key)
            .unwrap_or(ParameterLocation::Query),
        description: param
            .get("description")
            .and_then(Value::as_str)
            .map(String::from),
        required: param
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        schema: param.get("schema").and_then(SchemaType::from_schema),
        example: param.get("example").cloned(),
    })
}

fn parse_request_body(body: &Value) -> Option<RequestBody> {
    let body = body.as_object()?;
    Some(RequestBody {
        description: body
            .get("description")
            .and_then(Value::as_str)
            .map(String::from),
        required: body
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        content: body
            .get("content")
            .and_then(Value::as_object)
            .map(to_index_map)
            .unwrap_or_default(),
    })
}

fn parse_responses(responses: &serde_json::Map<String, Value>) -> Vec<Response> {
    responses
        .iter()
        .map(|(status_code, response)| Response {
            status_code: status_code.clone(),
            description: response
                .get("description")
                .and_then(Value::as_str)
                .map(String::from),
            content: response
                .get("content")
                .and_then(Value::as_object)
                .map(to_index_map)
                .unwrap_or_default(),
            headers: response
                .get("headers")
                .and_then(Value::as_object)
                .map(to_index_map)
                .unwrap_or_default(),
        })
        .collect()
}

fn to_index_map(map: &serde_json::Map<String, Value>) -> IndexMap<String, Value> {
    map.iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
