//! HTTP generation service: the pure pipeline behind a small axum router.
//!
//! All endpoints consume an already-decoded JSON spec; archives are built
//! in memory from the manifest and streamed back as attachments.

use std::io::{Cursor, Write as _};

use anyhow::Result;
use axum::Router;
use axum::extract::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use clap::Parser;
use serde::Deserialize;
use serde_json::{Value, json};

use apigen_core::{FileManifest, GenerateError, GenerateOptions, Language, parse};

#[derive(Parser)]
#[command(name = "apigen-server", about = "HTTP API client generation service", version)]
struct Args {
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    #[arg(long, default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let addr = format!("{}:{}", args.host, args.port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("apigen server listening on {addr}");
    axum::serve(listener, router()).await?;
    Ok(())
}

fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/languages", get(languages))
        .route("/api/validate", post(validate_spec))
        .route("/api/generate", post(generate_client))
        .route("/api/preview", post(preview_client))
        .route("/api/batch-generate", post(batch_generate))
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "apigen — multi-language API client generator",
        "version": env!("CARGO_PKG_VERSION"),
        "supported_languages": Language::ALL.iter().map(|lang| lang.id()).collect::<Vec<_>>(),
    }))
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "version": env!("CARGO_PKG_VERSION")}))
}

async fn languages() -> Json<Value> {
    let languages: Vec<Value> = Language::ALL
        .iter()
        .map(|lang| {
            json!({
                "id": lang.id(),
                "name": lang.display_name(),
            })
        })
        .collect();
    Json(json!({"languages": languages}))
}

#[derive(Deserialize)]
struct ValidateRequest {
    spec: Value,
}

async fn validate_spec(Json(req): Json<ValidateRequest>) -> Json<Value> {
    let errors = parse::validate(&req.spec);
    if !errors.is_empty() {
        return Json(json!({"valid": false, "errors": errors}));
    }

    let ir = parse::parse(&req.spec);
    Json(json!({
        "valid": true,
        "info": {
            "title": ir.info.title,
            "version": ir.info.version,
            "endpoints": ir.operations.len(),
        },
    }))
}

#[derive(Deserialize)]
struct GenerateRequest {
    spec: Value,
    language: String,
    #[serde(flatten)]
    options: GenerateOptions,
}

async fn generate_client(Json(req): Json<GenerateRequest>) -> Response {
    let errors = parse::validate(&req.spec);
    if !errors.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid API description: {}", errors.join(", ")),
        );
    }

    let ir = parse::parse(&req.spec);
    match apigen_generators::generate(&req.language, &ir, &req.options) {
        Ok(manifest) => match manifests_to_zip(&[(String::new(), &manifest)]) {
            Ok(bytes) => zip_response(
                format!(
                    "{}_{}.zip",
                    req.options.package_name,
                    req.language.to_ascii_lowercase()
                ),
                bytes,
            ),
            Err(err) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to package archive: {err}"),
            ),
        },
        Err(err @ GenerateError::UnsupportedLanguage { .. }) => {
            error_response(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

async fn preview_client(Json(req): Json<GenerateRequest>) -> Response {
    let errors = parse::validate(&req.spec);
    if !errors.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid API description: {}", errors.join(", ")),
        );
    }

    let ir = parse::parse(&req.spec);
    match apigen_generators::generate(&req.language, &ir, &req.options) {
        Ok(manifest) => {
            let files: serde_json::Map<String, Value> = manifest
                .iter()
                .map(|(path, content)| (path.to_string(), Value::String(content.to_string())))
                .collect();
            Json(json!({"language": req.language, "files": files})).into_response()
        }
        Err(err @ GenerateError::UnsupportedLanguage { .. }) => {
            error_response(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

#[derive(Deserialize)]
struct BatchRequest {
    spec: Value,
    languages: Vec<String>,
    #[serde(flatten)]
    options: GenerateOptions,
}

async fn batch_generate(Json(req): Json<BatchRequest>) -> Response {
    let errors = parse::validate(&req.spec);
    if !errors.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid API description: {}", errors.join(", ")),
        );
    }

    let ir = parse::parse(&req.spec);
    let results = apigen_generators::generate_all(&req.languages, &ir, &req.options);

    let mut succeeded = Vec::new();
    let mut failed = serde_json::Map::new();
    for (language, result) in results {
        match result {
            Ok(manifest) => succeeded.push((language, manifest)),
            Err(err) => {
                failed.insert(language, Value::String(err.to_string()));
            }
        }
    }

    if succeeded.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "no language generated successfully", "errors": failed})),
        )
            .into_response();
    }

    let entries: Vec<(String, &FileManifest)> = succeeded
        .iter()
        .map(|(language, manifest)| (language.clone(), manifest))
        .collect();
    match manifests_to_zip(&entries) {
        Ok(bytes) => zip_response(format!("{}_batch.zip", req.options.package_name), bytes),
        Err(err) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to package archive: {err}"),
        ),
    }
}

fn error_response(status: StatusCode, detail: String) -> Response {
    (status, Json(json!({"detail": detail}))).into_response()
}

fn zip_response(filename: String, bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Build an in-memory zip from (prefix, manifest) pairs; an empty prefix
/// places files at the archive root.
fn manifests_to_zip(entries: &[(String, &FileManifest)]) -> zip::result::ZipResult<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for (prefix, manifest) in entries {
        for (path, content) in manifest.iter() {
            let name = if prefix.is_empty() {
                path.to_string()
            } else {
                format!("{prefix}/{path}")
            };
            writer.start_file(name, options)?;
            writer.write_all(content.as_bytes())?;
        }
    }

    Ok(writer.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifests_to_zip_prefixes_languages() {
        let mut python = FileManifest::new();
        python.insert("client.py", "pass\n");
        let mut go = FileManifest::new();
        go.insert("client.go", "package x\n");

        let bytes = manifests_to_zip(&[
            ("python".to_string(), &python),
            ("go".to_string(), &go),
        ])
        .unwrap();
        assert_eq!(&bytes[..4], b"PK\x03\x04");

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert!(names.contains(&"python/client.py".to_string()));
        assert!(names.contains(&"go/client.go".to_string()));
    }

    #[test]
    fn test_generate_request_options_default() {
        let req: GenerateRequest = serde_json::from_value(json!({
            "spec": {"openapi": "3.0.0"},
            "language": "python"
        }))
        .unwrap();
        assert_eq!(req.options.package_name, "api_client");
        assert!(req.options.include_docs);
    }
}
