use apigen_core::ir::{Operation, ParameterLocation, SpecDocument, schema_fields};
use apigen_core::normalize::{sanitize, to_pascal_case, to_snake_case};
use apigen_core::typemap::map_type;
use apigen_core::{CodeGenerator, FileManifest, GenerateOptions, GenerationError, Language};
use minijinja::context;

use crate::render;

use super::{class_name, module_name};

const CLIENT_TEMPLATE: &str = include_str!("../../templates/python/client.py.j2");
const MODELS_TEMPLATE: &str = include_str!("../../templates/python/models.py.j2");

/// Python backend: a `requests`-based package directory named after the
/// package name, with one convenience method per operation.
pub struct PythonGenerator;

impl CodeGenerator for PythonGenerator {
    fn language(&self) -> Language {
        Language::Python
    }

    fn generate(
        &self,
        ir: &SpecDocument,
        options: &GenerateOptions,
    ) -> Result<FileManifest, GenerationError> {
        let pkg = module_name(options);
        let class = class_name(options);

        let mut manifest = FileManifest::new();
        manifest.insert(format!("{pkg}/client.py"), self.generate_client(ir, options)?);
        manifest.insert(format!("{pkg}/models.py"), self.generate_models(ir, options)?);
        manifest.insert(
            format!("{pkg}/_retry.py"),
            ir.retry.render_code(Language::Python),
        );
        manifest.insert(
            format!("{pkg}/_timeout.py"),
            ir.timeout.render_code(Language::Python),
        );
        manifest.insert(
            format!("{pkg}/__init__.py"),
            format!(
                "__version__ = \"{}\"\n\nfrom .client import {class}\n\n__all__ = [\"{class}\"]\n",
                ir.info.version
            ),
        );
        manifest.insert(
            "requirements.txt",
            "requests>=2.31.0\npython-dateutil>=2.8.2\n",
        );
        if options.include_docs {
            manifest.insert("README.md", readme(ir, &pkg, &class));
        }
        if options.include_tests {
            manifest.insert("tests/test_client.py", test_stub(&pkg, &class, ir.base_url()));
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
            Language::Python,
            "client.py.j2",
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
                        let base = map_type(field.schema, Language::Python);
                        context! {
                            name => to_snake_case(&sanitize(&field.name)),
                            type_str => if field.required {
                                base.to_string()
                            } else {
                                format!("Optional[{base}]")
                            },
                            required => field.required,
                        }
                    })
                    .collect();
                context! {
                    name => to_pascal_case(&sanitize(name)),
                    description => schema
                        .get("description")
                        .and_then(|d| d.as_str())
                        .map(String::from),
                    fields => fields,
                }
            })
            .collect();

        render::template(
            Language::Python,
            "models.py.j2",
            MODELS_TEMPLATE,
            context! {
                title => ir.info.title.clone(),
                schemas => schemas,
            },
        )
    }
}

/// Per-operation template context: method name, path as an f-string with
/// path parameters renamed to their python identifiers, and the typed
/// signature for those parameters.
fn operation_context(op: &Operation) -> minijinja::Value {
    let mut args = Vec::new();
    let mut path = op.path.clone();
    for param in &op.parameters {
        if param.location == ParameterLocation::Path {
            let py_name = to_snake_case(&sanitize(&param.name));
            let ty = map_type(param.schema, Language::Python);
            path = path.replace(
                &format!("{{{}}}", param.name),
                &format!("{{{py_name}}}"),
            );
            args.push(format!(", {py_name}: {ty}"));
        }
    }

    context! {
        name => to_snake_case(&sanitize(&op.operation_id)),
        http_method => op.method.as_str(),
        path => path,
        has_path_params => !args.is_empty(),
        params_signature => args.concat(),
        summary => op.summary.clone(),
    }
}

fn readme(ir: &SpecDocument, pkg: &str, class: &str) -> String {
    let description = ir.info.description.as_deref().unwrap_or("Python client");
    format!(
        "# {title}\n\n{description}\n\nGenerated Python client (API version {version}).\n\n\
         ## Usage\n\n```python\nfrom {pkg} import {class}\n\n\
         client = {class}(api_key=\"...\")\nresponse = client._request(\"GET\", \"/\")\n```\n",
        title = ir.info.title,
        version = ir.info.version,
    )
}

fn test_stub(pkg: &str, class: &str, base_url: &str) -> String {
    format!(
        "from {pkg} import {class}\n\n\n\
         def test_client_defaults():\n    \
         client = {class}()\n    \
         assert client.base_url == \"{base}\"\n    \
         assert client.api_key is None\n",
        base = base_url.trim_end_matches('/'),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options_named(name: &str) -> GenerateOptions {
        GenerateOptions {
            package_name: name.to_string(),
            ..GenerateOptions::default()
        }
    }

    #[test]
    fn test_package_dir_is_sanitized() {
        assert_eq!(module_name(&options_named("My Pet Store")), "my_pet_store");
        assert_eq!(module_name(&options_named("42!!!")), "api_client");
    }

    #[test]
    fn test_class_name_is_pascal() {
        assert_eq!(class_name(&options_named("pet_store")), "PetStore");
        insta::assert_snapshot!(class_name(&options_named("api_client")), @"ApiClient");
    }
}
