use serde_json::json;

use apigen_core::ir::{HttpMethod, ParameterLocation, SchemaType};
use apigen_core::parse::{self, derive_operation_id};

#[test]
fn validate_reports_all_missing_fields() {
    let errors = parse::validate(&json!({}));
    assert_eq!(
        errors,
        vec![
            "Missing 'openapi' field",
            "Missing 'info' field",
            "Missing or empty 'paths' field",
        ]
    );
}

#[test]
fn validate_openapi_then_info_order() {
    let errors = parse::validate(&json!({"paths": {"/ping": {"get": {}}}}));
    assert_eq!(
        errors,
        vec!["Missing 'openapi' field", "Missing 'info' field"]
    );
}

#[test]
fn validate_empty_paths_mentions_paths() {
    let errors = parse::validate(&json!({
        "openapi": "3.0.0",
        "info": {"title": "T", "version": "1.0.0"},
        "paths": {}
    }));
    assert_eq!(errors, vec!["Missing or empty 'paths' field"]);
}

#[test]
fn validate_missing_title() {
    let errors = parse::validate(&json!({
        "openapi": "3.0.0",
        "info": {"version": "1.0.0"},
        "paths": {"/ping": {"get": {}}}
    }));
    assert_eq!(errors, vec!["Missing 'info.title' field"]);
}

#[test]
fn validate_accepts_minimal_spec() {
    let errors = parse::validate(&json!({
        "openapi": "3.0.0",
        "info": {"title": "T", "version": "1.0.0"},
        "paths": {"/ping": {"get": {}}}
    }));
    assert!(errors.is_empty());
}

#[test]
fn parse_minimal_spec_end_to_end() {
    let doc = parse::parse(&json!({
        "openapi": "3.0.0",
        "info": {"title": "T", "version": "1.0.0"},
        "paths": {"/ping": {"get": {}}}
    }));

    assert_eq!(doc.info.title, "T");
    assert_eq!(doc.info.version, "1.0.0");
    assert_eq!(doc.operations.len(), 1);

    let op = &doc.operations[0];
    assert_eq!(op.method, HttpMethod::Get);
    assert_eq!(op.path, "/ping");
    assert_eq!(op.operation_id, "get_ping");

    // No servers in the source: a single default is synthesized.
    assert_eq!(doc.servers.len(), 1);
    assert_eq!(doc.base_url(), "http://localhost");
}

#[test]
fn parse_absorbs_missing_info_fields() {
    let doc = parse::parse(&json!({"paths": {"/ping": {"get": {}}}}));
    assert_eq!(doc.info.title, "API Client");
    assert_eq!(doc.info.version, "1.0.0");
    assert_eq!(doc.info.description, None);
}

#[test]
fn parse_skips_malformed_path_items() {
    let doc = parse::parse(&json!({
        "openapi": "3.0.0",
        "info": {"title": "T"},
        "paths": {
            "/ok": {"get": {}},
            "/broken": "not a mapping",
            "/also-broken": {"get": "not a mapping"}
        }
    }));
    assert_eq!(doc.operations.len(), 1);
    assert_eq!(doc.operations[0].path, "/ok");
}

#[test]
fn parse_one_operation_per_path_method_pair() {
    let doc = parse::parse(&json!({
        "paths": {
            "/pets": {
                "get": {"operationId": "listPets"},
                "post": {"operationId": "createPet"},
                "description": "not a method"
            }
        }
    }));
    assert_eq!(doc.operations.len(), 2);
    assert_eq!(doc.operations[0].operation_id, "listPets");
    assert_eq!(doc.operations[0].method, HttpMethod::Get);
    assert_eq!(doc.operations[1].operation_id, "createPet");
    assert_eq!(doc.operations[1].method, HttpMethod::Post);
}

#[test]
fn parse_parameters() {
    let doc = parse::parse(&json!({
        "paths": {
            "/pets/{id}": {
                "get": {
                    "parameters": [
                        {"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}},
                        {"name": "verbose", "in": "query", "schema": {"type": "boolean"}},
                        {"name": "weird", "in": "matrix"},
                        {"name": "untyped", "in": "query", "schema": {"type": "file"}}
                    ]
                }
            }
        }
    }));

    let params = &doc.operations[0].parameters;
    assert_eq!(params.len(), 4);

    assert_eq!(params[0].location, ParameterLocation::Path);
    assert!(params[0].required);
    assert_eq!(params[0].schema, Some(SchemaType::Integer));

    assert_eq!(params[1].location, ParameterLocation::Query);
    assert!(!params[1].required);
    assert_eq!(params[1].schema, Some(SchemaType::Boolean));

    // Unrecognized locations default to query; no schema means no tag.
    assert_eq!(params[2].location, ParameterLocation::Query);
    assert_eq!(params[2].schema, None);

    // Unrecognized type tags fall through to the per-language default.
    assert_eq!(params[3].schema, None);
}

#[test]
fn parse_responses_keep_status_keys_verbatim() {
    let doc = parse::parse(&json!({
        "paths": {
            "/pets": {
                "get": {
                    "responses": {
                        "200": {"description": "ok"},
                        "5XX": {"description": "server error"},
                        "default": {"description": "fallback"}
                    }
                }
            }
        }
    }));

    let codes: Vec<&str> = doc.operations[0]
        .responses
        .iter()
        .map(|response| response.status_code.as_str())
        .collect();
    assert!(codes.contains(&"200"));
    assert!(codes.contains(&"5XX"));
    assert!(codes.contains(&"default"));
}

#[test]
fn parse_components_pass_through() {
    let doc = parse::parse(&json!({
        "paths": {"/ping": {"get": {}}},
        "components": {
            "schemas": {"Pet": {"type": "object"}},
            "securitySchemes": {"bearer": {"type": "http", "scheme": "bearer"}}
        }
    }));
    assert_eq!(doc.components.schemas.len(), 1);
    assert!(doc.components.schemas.contains_key("Pet"));
    assert_eq!(doc.components.security_schemes.len(), 1);
}

#[test]
fn parse_security_requirements() {
    let doc = parse::parse(&json!({
        "paths": {"/ping": {"get": {}}},
        "security": [{"bearer": []}, {"oauth": ["read", "write"]}]
    }));
    assert_eq!(doc.security.len(), 2);
    assert_eq!(doc.security[1]["oauth"], vec!["read", "write"]);
}

#[test]
fn derived_ids_are_deterministic() {
    let first = derive_operation_id(HttpMethod::Get, "/pets/{id}");
    let second = derive_operation_id(HttpMethod::Get, "/pets/{id}");
    assert_eq!(first, second);
    insta::assert_snapshot!(first, @"get_pets");
}

#[test]
fn derived_id_shapes() {
    assert_eq!(derive_operation_id(HttpMethod::Get, "/pets"), "get_pets");
    assert_eq!(
        derive_operation_id(HttpMethod::Post, "/users/{id}/messages"),
        "post_users_messages"
    );
    assert_eq!(derive_operation_id(HttpMethod::Get, "/"), "get_root");
    assert_eq!(derive_operation_id(HttpMethod::Delete, "/{id}"), "delete_root");
    assert_eq!(
        derive_operation_id(HttpMethod::Get, "/pet-store/items"),
        "get_pet_store_items"
    );
}

#[test]
fn colliding_ids_get_numeric_suffixes() {
    let doc = parse::parse(&json!({
        "paths": {
            "/pets/{a}": {"get": {}},
            "/pets/{b}": {"get": {}},
            "/pets/{c}": {"get": {}}
        }
    }));
    let ids: Vec<&str> = doc
        .operations
        .iter()
        .map(|op| op.operation_id.as_str())
        .collect();
    assert_eq!(ids, vec!["get_pets", "get_pets_2", "get_pets_3"]);
}

#[test]
fn source_operation_id_wins_over_derivation() {
    let doc = parse::parse(&json!({
        "paths": {"/pets": {"get": {"operationId": "listAllPets"}}}
    }));
    assert_eq!(doc.operations[0].operation_id, "listAllPets");
}
