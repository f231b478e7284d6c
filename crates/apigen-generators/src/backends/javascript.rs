use apigen_core::ir::{Operation, ParameterLocation, SpecDocument, schema_fields};
use apigen_core::normalize::{sanitize, to_camel_case, to_pascal_case};
use apigen_core::typemap::map_type;
use apigen_core::{CodeGenerator, FileManifest, GenerateOptions, GenerationError, Language};
use minijinja::context;

use crate::render;

use super::class_name;

const CLIENT_TEMPLATE: &str = include_str!("../../templates/javascript/client.js.j2");
const TYPES_TEMPLATE: &str = include_str!("../../templates/javascript/types.d.ts.j2");

/// JavaScript/TypeScript backend: an axios-based client under `src/` with
/// `.d.ts` declarations for the component schemas.
pub struct JavascriptGenerator;

impl CodeGenerator for JavascriptGenerator {
    fn language(&self) -> Language {
        Language::Javascript
    }

    fn generate(
        &self,
        ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<FileManifest, GenerationError> {
        let mut manifest = FileManifest::new();
        manifest.insert("src/client.js", self.generate_client(ir, options)?);
        manifest.insert("src/types.d.ts", self.generate_models(ir, options)?);
        manifest.insert("src/retry.js", ir.retry.render_code(Language::Javascript));
        manifest.insert("src/timeout.js", ir.timeout.render_code(Language::Javascript));
        manifest.insert("package.json", package_json(ir, options)?);
        if options.include_docs {
            manifest.insert("README.md", readme(ir, options));
        }
        if options.include_tests {
            manifest.insert("src/client.test.js", test_stub(&class_name(options), ir.base_url()));
        }
        Ok(manifest)
    }

    fn generate_client(
        &self,
        ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<String, GenerationError> {
        let operations: Vec<minijinja::Value> =
            ir.operations.iter().map(operation_context).collect();
        render::template(
            Language::Javascript,
            "client.js.j2",
            CLIENT_TEMPLATE,
            context! {
                title => ir.info.title.clone(),
                class_name => class_name(options),
                base_url => ir.base_url(),
                operations => operations,
            },
        )
    }

    fn generate_models(
        &self,
        ir: &SpecDocument,
        _options: &GenerateOptions,
    ) -> Result<String, GenerationError> {
        let schemas: Vec<minijinja::Value> = ir
            .components
            .schemas
            .iter()
            .map(|(name, schema)| {
                let fields: Vec<minijinja::Value> = schema_fields(schema)
                    .iter()
                    .map(|field| {
                        context! {
                            name => property_key(&field.name),
                            type_str => map_type(field.schema, Language::Javascript),
                            required => field.required,
                        }
                    })
                    .collect();
                context! {
                    name => to_pascal_case(&sanitize(name)),
                    fields => fields,
                }
            })
            .collect();

        render::template(
            Language::Javascript,
            "types.d.ts.j2",
            TYPES_TEMPLATE,
            context! {
                title => ir.info.title.clone(),
                schemas => schemas,
            },
        )
    }
}

fn operation_context(op: &Operation) -> minijinja::Value {
    let mut args = String::new();
    let mut template_path = op.path.clone();
    let mut has_params = false;
    for param in &op.parameters {
        if param.location == ParameterLocation::Path {
            let js_name = to_camel_case(&sanitize(&param.name));
            template_path = template_path.replace(
                &format!("{{{}}}", param.name),
                &format!("${{{js_name}}}"),
            );
            args.push_str(&format!("{js_name}, "));
            has_params = true;
        }
    }

    // Literal paths stay plain strings; parameterized ones become template
    // literals.
    let path_expr = if has_params {
        format!("`{template_path}`")
    } else {
        format!("'{}'", op.path)
    };

    context! {
        name => to_camel_case(&sanitize(&op.operation_id)),
        http_method => op.method.as_str(),
        path_expr => path_expr,
        args => args,
        summary => op.summary.clone().map(escape_jsdoc),
    }
}

/// Escape `*/` sequences that would prematurely close JSDoc blocks.
fn escape_jsdoc(value: String) -> String {
    value.replace("*/", "*\\/")
}

/// Quote a property name unless it is already a valid JS identifier.
fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_' || first == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        None => false,
    };
    if valid {
        name.to_string()
    } else {
        format!("'{name}'")
    }
}

fn package_json(ir: &SpecDocument, options: &GenerateOptions) -> Result<String, GenerationError> {
    let descriptor = serde_json::json!({
        "name": options.package_name,
        "version": ir.info.version,
        "description": ir.info.description.clone().unwrap_or_default(),
        "main": "src/client.js",
        "types": "src/types.d.ts",
        "dependencies": {
            "axios": "^1.6.0"
        }
    });
    serde_json::to_string_pretty(&descriptor)
        .map(|json| format!("{json}\n"))
        .map_err(|err| GenerationError::new(Language::Javascript, err.to_string()))
}

fn readme(ir: &SpecDocument, options: &GenerateOptions) -> String {
    let description = ir
        .info
        .description
        .as_deref()
        .unwrap_or("JavaScript/TypeScript client");
    format!(
        "# {title}\n\n{description}\n\nGenerated JavaScript client (API version {version}).\n\n\
         ## Usage\n\n```js\nconst {class} = require('{pkg}');\n\n\
         const client = new {class}({{ apiKey: '...' }});\n```\n",
        title = ir.info.title,
        version = ir.info.version,
        class = class_name(options),
        pkg = options.package_name,
    )
}

fn test_stub(class: &str, base_url: &str) -> String {
    format!(
        "const assert = require('node:assert');\n\nconst {class} = require('./client');\n\n\
         const client = new {class}();\nassert.strictEqual(client.baseURL, '{base}');\n\
         console.log('client defaults ok');\n",
        base = base_url.trim_end_matches('/'),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_key_quoting() {
        assert_eq!(property_key("petId"), "petId");
        assert_eq!(property_key("_private"), "_private");
        assert_eq!(property_key("content-type"), "'content-type'");
        assert_eq!(property_key("2fa"), "'2fa'");
    }

    #[test]
    fn test_escape_jsdoc() {
        assert_eq!(escape_jsdoc("a */ b".to_string()), "a *\\/ b");
    }
}
