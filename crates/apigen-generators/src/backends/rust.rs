use apigen_core::ir::SpecDocument;
use apigen_core::{CodeGenerator, FileManifest, GenerateOptions, GenerationError, Language};
use minijinja::context;

use crate::render;

use super::module_name;

const CLIENT_TEMPLATE: &str = include_str!("../../templates/rust/client.rs.j2");
const CARGO_TEMPLATE: &str = include_str!("../../templates/rust/cargo.toml.j2");

/// Rust backend: a crate with a `src/` layout and a reqwest-based client.
pub struct RustGenerator;

impl CodeGenerator for RustGenerator {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn generate(
        &self,
        ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<FileManifest, GenerationError> {
        let pkg = module_name(options);

        let mut manifest = FileManifest::new();
        manifest.insert("src/client.rs", self.generate_client(ir, options)?);
        manifest.insert("src/models.rs", self.generate_models(ir, options)?);
        manifest.insert("src/retry.rs", ir.retry.render_code(Language::Rust));
        manifest.insert("src/timeout.rs", ir.timeout.render_code(Language::Rust));
        manifest.insert(
            "src/lib.rs",
            "pub mod client;\npub mod models;\npub mod retry;\npub mod timeout;\n\n\
             pub use client::Client;\n",
        );
        manifest.insert("Cargo.toml", cargo_toml(ir, &pkg)?);
        if options.include_docs {
            manifest.insert("README.md", readme(ir));
        }
        if options.include_tests {
            manifest.insert("tests/client_test.rs", test_stub(&pkg));
        }
        Ok(manifest)
    }

    fn generate_client(
        &self,
        ir: &SpecDocument,
        _options: &GenerateOptions,
    ) -> Result<String, GenerationError> {
        render::template(
            Language::Rust,
            "client.rs.j2",
            CLIENT_TEMPLATE,
            context! {
                title => ir.info.title.clone(),
                base_url => ir.base_url(),
            },
        )
    }

    fn generate_models(
        &self,
        ir: &SpecDocument,
        _options: &GenerateOptions,
    ) -> Result<String, GenerationError> {
        Ok(format!(
            "//! Data models for {}.\n\n#![allow(unused_imports)]\n\nuse serde::{{Deserialize, Serialize}};\n",
            ir.info.title
        ))
    }
}

fn cargo_toml(ir: &SpecDocument, pkg: &str) -> Result<String, GenerationError> {
    render::template(
        Language::Rust,
        "cargo.toml.j2",
        CARGO_TEMPLATE,
        context! {
            package => pkg,
            version => ir.info.version.clone(),
        },
    )
}

fn readme(ir: &SpecDocument) -> String {
    let description = ir.info.description.as_deref().unwrap_or("Rust client");
    format!(
        "# {title}\n\n{description}\n\nGenerated Rust client (API version {version}).\n\n\
         ## Usage\n\n```rust\nlet client = Client::default_client(Some(\"api-key\".into()))?;\n\
         let response = client.request(reqwest::Method::GET, \"/\").await?;\n```\n",
        title = ir.info.title,
        version = ir.info.version,
    )
}

fn test_stub(pkg: &str) -> String {
    format!(
        "use {pkg}::Client;\n\n#[test]\nfn builds_a_client() {{\n    \
         assert!(Client::new(\"http://example.com\", None).is_ok());\n}}\n"
    )
}
