use apigen_core::ir::SpecDocument;
use apigen_core::{CodeGenerator, FileManifest, GenerateOptions, GenerationError, Language};
use minijinja::context;

use crate::render;

use super::class_name;

const CLIENT_TEMPLATE: &str = include_str!("../../templates/php/client.php.j2");

/// PHP backend: a PSR-4 `src/` layout under the `ApiClient` namespace with
/// a Guzzle-based client.
pub struct PhpGenerator;

impl CodeGenerator for PhpGenerator {
    fn language(&self) -> Language {
        Language::Php
    }

    fn generate(
        &self,
        ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<FileManifest, GenerationError> {
        let mut manifest = FileManifest::new();
        manifest.insert("src/Client.php", self.generate_client(ir, options)?);
        manifest.insert("src/Models.php", self.generate_models(ir, options)?);
        manifest.insert("src/Retry.php", ir.retry.render_code(Language::Php));
        manifest.insert("src/Timeout.php", ir.timeout.render_code(Language::Php));
        manifest.insert("composer.json", composer_json(ir, options)?);
        if options.include_docs {
            manifest.insert("README.md", readme(ir, options));
        }
        if options.include_tests {
            manifest.insert("tests/ClientTest.php", test_stub(&class_name(options)));
        }
        Ok(manifest)
    }

    fn generate_client(
        &self,
        ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<String, GenerationError> {
        render::template(
            Language::Php,
            "client.php.j2",
            CLIENT_TEMPLATE,
            context! {
                title => ir.info.title.clone(),
                class_name => class_name(options),
                base_url => ir.base_url(),
            },
        )
    }

    fn generate_models(
        &self,
        _ir: &SpecDocument,
        _options: &GenerateOptions,
    ) -> Result<String, GenerationError> {
        Ok("<?php\n\nnamespace ApiClient\\Models;\n".to_string())
    }
}

fn composer_json(ir: &SpecDocument, options: &GenerateOptions) -> Result<String, GenerationError> {
    let descriptor = serde_json::json!({
        "name": format!("api/{}", options.package_name),
        "description": ir.info.description.clone().unwrap_or_default(),
        "require": {
            "php": ">=8.1",
            "guzzlehttp/guzzle": "^7.8"
        },
        "autoload": {
            "psr-4": {
                "ApiClient\\": "src/"
            }
        }
    });
    serde_json::to_string_pretty(&descriptor)
        .map(|json| format!("{json}\n"))
        .map_err(|err| GenerationError::new(Language::Php, err.to_string()))
}

fn readme(ir: &SpecDocument, options: &GenerateOptions) -> String {
    let description = ir.info.description.as_deref().unwrap_or("PHP client");
    format!(
        "# {title}\n\n{description}\n\nGenerated PHP client (API version {version}).\n\n\
         ## Usage\n\n```php\nuse ApiClient\\{class};\n\n\
         $client = new {class}(apiKey: '...');\n$response = $client->get('/');\n```\n",
        title = ir.info.title,
        version = ir.info.version,
        class = class_name(options),
    )
}

fn test_stub(class: &str) -> String {
    format!(
        "<?php\n\nrequire __DIR__ . '/../src/Client.php';\n\n\
         use ApiClient\\{class};\n\n\
         $client = new {class}();\necho \"client defaults ok\\n\";\n"
    )
}
