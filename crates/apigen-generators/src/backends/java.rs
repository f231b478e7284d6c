use apigen_core::ir::SpecDocument;
use apigen_core::{CodeGenerator, FileManifest, GenerateOptions, GenerationError, Language};
use minijinja::context;

use crate::render;

use super::class_name;

const CLIENT_TEMPLATE: &str = include_str!("../../templates/java/client.java.j2");

/// Java backend: a Maven layout under `src/main/java/com/api` with an
/// okhttp-based client.
pub struct JavaGenerator;

impl CodeGenerator for JavaGenerator {
    fn language(&self) -> Language {
        Language::Java
    }

    fn generate(
        &self,
        ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<FileManifest, GenerationError> {
        let class = class_name(options);

        let mut manifest = FileManifest::new();
        manifest.insert(
            format!("src/main/java/com/api/{class}Client.java"),
            self.generate_client(ir, options)?,
        );
        manifest.insert(
            "src/main/java/com/api/models/package-info.java",
            self.generate_models(ir, options)?,
        );
        manifest.insert(
            "src/main/java/com/api/Retry.java",
            ir.retry.render_code(Language::Java),
        );
        manifest.insert(
            "src/main/java/com/api/Timeouts.java",
            ir.timeout.render_code(Language::Java),
        );
        manifest.insert("pom.xml", pom_xml(ir, options));
        if options.include_docs {
            manifest.insert("README.md", readme(ir, &class));
        }
        if options.include_tests {
            manifest.insert(
                format!("src/test/java/com/api/{class}ClientTest.java"),
                test_stub(&class),
            );
        }
        Ok(manifest)
    }

    fn generate_client(
        &self,
        ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<String, GenerationError> {
        render::template(
            Language::Java,
            "client.java.j2",
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
        ir: &SpecDocument,
        _options: &GenerateOptions,
    ) -> Result<String, GenerationError> {
        Ok(format!(
            "/** Data models for {}. */\npackage com.api.models;\n",
            ir.info.title
        ))
    }
}

fn pom_xml(ir: &SpecDocument, options: &GenerateOptions) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <project xmlns=\"http://maven.apache.org/POM/4.0.0\">\n    \
         <modelVersion>4.0.0</modelVersion>\n    \
         <groupId>com.api</groupId>\n    \
         <artifactId>{artifact}</artifactId>\n    \
         <version>{version}</version>\n    \
         <dependencies>\n        \
         <dependency>\n            \
         <groupId>com.squareup.okhttp3</groupId>\n            \
         <artifactId>okhttp</artifactId>\n            \
         <version>4.12.0</version>\n        \
         </dependency>\n    \
         </dependencies>\n</project>\n",
        artifact = options.package_name,
        version = ir.info.version,
    )
}

fn readme(ir: &SpecDocument, class: &str) -> String {
    let description = ir.info.description.as_deref().unwrap_or("Java client");
    format!(
        "# {title}\n\n{description}\n\nGenerated Java client (API version {version}).\n\n\
         ## Usage\n\n```java\n{class}Client client = new {class}Client(\"api-key\");\n\
         Response response = client.get(\"/\");\n```\n",
        title = ir.info.title,
        version = ir.info.version,
    )
}

fn test_stub(class: &str) -> String {
    format!(
        "package com.api;\n\n/** Construction smoke test. */\npublic class {class}ClientTest {{\n    \
         public static void main(String[] args) {{\n        \
         {class}Client client = new {class}Client(\"http://example.com\", null);\n        \
         System.out.println(\"client defaults ok\");\n    }}\n}}\n"
    )
}
