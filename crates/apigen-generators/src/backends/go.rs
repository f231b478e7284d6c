use apigen_core::ir::SpecDocument;
use apigen_core::{CodeGenerator, FileManifest, GenerateOptions, GenerationError, Language};
use minijinja::context;

use crate::render;

use super::module_name;

const CLIENT_TEMPLATE: &str = include_str!("../../templates/go/client.go.j2");

/// Go backend: a single-package layout with top-level `.go` files and a
/// `go.mod` naming the module.
pub struct GoGenerator;

impl CodeGenerator for GoGenerator {
    fn language(&self) -> Language {
        Language::Go
    }

    fn generate(
        &self,
        ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<FileManifest, GenerationError> {
        let pkg = module_name(options);

        let mut manifest = FileManifest::new();
        manifest.insert("client.go", self.generate_client(ir, options)?);
        manifest.insert("models.go", self.generate_models(ir, options)?);
        manifest.insert("retry.go", ir.retry.render_code_in(&pkg, Language::Go));
        manifest.insert("timeout.go", ir.timeout.render_code_in(&pkg, Language::Go));
        manifest.insert(
            "go.mod",
            format!("module github.com/user/{pkg}\n\ngo 1.21\n"),
        );
        if options.include_docs {
            manifest.insert("README.md", readme(ir));
        }
        if options.include_tests {
            manifest.insert("client_test.go", test_stub(&pkg));
        }
        Ok(manifest)
    }

    fn generate_client(
        &self,
        ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<String, GenerationError> {
        render::template(
            Language::Go,
            "client.go.j2",
            CLIENT_TEMPLATE,
            context! {
                title => ir.info.title.clone(),
                package => module_name(options),
                base_url => ir.base_url(),
            },
        )
    }

    fn generate_models(
        &self,
        _ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<String, GenerationError> {
        Ok(format!(
            "// Package {pkg} data models.\npackage {pkg}\n",
            pkg = module_name(options)
        ))
    }
}

fn readme(ir: &SpecDocument) -> String {
    let description = ir.info.description.as_deref().unwrap_or("Go client");
    format!(
        "# {title}\n\n{description}\n\nGenerated Go client (API version {version}).\n\n\
         ## Usage\n\n```go\nclient := NewDefaultClient(\"api-key\")\n\
         resp, err := client.Request(context.Background(), \"GET\", \"/\", nil)\n```\n",
        title = ir.info.title,
        version = ir.info.version,
    )
}

fn test_stub(pkg: &str) -> String {
    format!(
        "package {pkg}\n\nimport \"testing\"\n\n\
         func TestNewClient(t *testing.T) {{\n\
         \tc := NewClient(\"http://example.com/\", \"\")\n\
         \tif c == nil {{\n\t\tt.Fatal(\"expected client\")\n\t}}\n}}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stub_declares_package() {
        assert!(test_stub("petstore").starts_with("package petstore\n"));
    }
}
