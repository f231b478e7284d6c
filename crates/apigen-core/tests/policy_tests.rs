use serde_json::json;

use apigen_core::Language;
use apigen_core::parse;
use apigen_core::policy::{RetryConfig, TimeoutConfig};

#[test]
fn retry_defaults() {
    let config = RetryConfig::default();
    assert_eq!(config.max_attempts, 3);
    assert_eq!(config.initial_interval, 500);
    assert_eq!(config.max_interval, 60_000);
    assert_eq!(config.exponent, 1.5);
    assert_eq!(config.retry_on_status_codes, vec!["5XX", "429", "408"]);
    assert!(config.retry_connection_errors);
    assert!(config.respect_retry_after);
}

#[test]
fn retry_config_extension_wins_over_speakeasy() {
    let doc = json!({
        "x-retry-config": {"maxAttempts": 7, "statusCodes": ["502"]},
        "x-speakeasy-retries": {"maxAttempts": 2}
    });
    let config = RetryConfig::from_document(&doc);
    assert_eq!(config.max_attempts, 7);
    assert_eq!(config.retry_on_status_codes, vec!["502"]);
    // Unspecified fields keep their defaults.
    assert_eq!(config.initial_interval, 500);
}

#[test]
fn speakeasy_backoff_fields_are_nested() {
    let doc = json!({
        "x-speakeasy-retries": {
            "strategy": "backoff",
            "maxAttempts": 5,
            "statusCodes": ["5XX"],
            "backoff": {"initialInterval": 200, "maxInterval": 10000, "exponent": 2.0}
        }
    });
    let config = RetryConfig::from_document(&doc);
    assert_eq!(config.max_attempts, 5);
    assert_eq!(config.initial_interval, 200);
    assert_eq!(config.max_interval, 10_000);
    assert_eq!(config.exponent, 2.0);
    // The speakeasy form always honors Retry-After.
    assert!(config.respect_retry_after);
}

#[test]
fn malformed_retry_extension_degrades_to_defaults() {
    let doc = json!({"x-retry-config": {"maxAttempts": "three"}});
    assert_eq!(RetryConfig::from_document(&doc), RetryConfig::default());
}

#[test]
fn retry_status_matching_with_defaults() {
    let config = RetryConfig::default();
    assert!(config.should_retry(503));
    assert!(config.should_retry(429));
    assert!(!config.should_retry(404));
}

#[test]
fn backoff_never_exceeds_max_interval() {
    let config = RetryConfig {
        initial_interval: 100,
        max_interval: 5_000,
        exponent: 2.0,
        ..RetryConfig::default()
    };
    for attempt in 0..32 {
        assert!(config.backoff_interval(attempt) <= 5_000.0);
    }
    assert_eq!(config.backoff_interval(0), 100.0);
    assert_eq!(config.backoff_interval(1), 200.0);
}

#[test]
fn document_timeout_extension() {
    let doc = parse::parse(&json!({
        "paths": {"/ping": {"get": {}}},
        "x-timeout": {"connect": 3, "read": 9, "total": 30}
    }));
    assert_eq!(doc.timeout.connect_timeout, 3);
    assert_eq!(doc.timeout.read_timeout, 9);
    assert_eq!(doc.timeout.total_timeout, Some(30));
}

#[test]
fn operation_timeout_overrides_document() {
    let doc = parse::parse(&json!({
        "paths": {
            "/slow": {"get": {"x-timeout": {"read": 120}}},
            "/fast": {"get": {}}
        },
        "x-timeout": {"read": 15}
    }));

    let fast = doc.operations.iter().find(|op| op.path == "/fast").unwrap();
    let slow = doc.operations.iter().find(|op| op.path == "/slow").unwrap();

    assert_eq!(doc.timeout_for(fast).read_timeout, 15);
    assert_eq!(doc.timeout_for(slow).read_timeout, 120);
    // Unset override fields fall back to hard defaults, not the document's.
    assert_eq!(doc.timeout_for(slow).connect_timeout, 10);
}

#[test]
fn retry_renders_for_every_language() {
    let config = RetryConfig::default();
    for lang in Language::ALL {
        let code = config.render_code(lang);
        assert!(!code.is_empty(), "empty retry code for {lang}");
        assert!(
            code.contains("5XX"),
            "retry code for {lang} should embed the status list"
        );
    }
}

#[test]
fn timeout_renders_for_every_language() {
    let config = TimeoutConfig::default();
    for lang in Language::ALL {
        let code = config.render_code(lang);
        assert!(!code.is_empty(), "empty timeout code for {lang}");
        assert!(
            code.contains("30"),
            "timeout code for {lang} should embed the read timeout"
        );
    }
}

#[test]
fn retry_config_values_flow_into_rendered_code() {
    let config = RetryConfig {
        max_attempts: 9,
        ..RetryConfig::default()
    };
    let python = config.render_code(Language::Python);
    assert!(python.contains("MAX_ATTEMPTS = 9"));
    assert!(python.contains("def with_retry"));

    let go = config.render_code_in("petstore", Language::Go);
    assert!(go.starts_with("package petstore"));
    assert!(go.contains("MaxAttempts:       9"));
}
