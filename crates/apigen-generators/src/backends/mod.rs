//! One backend module per target language. Each backend owns its file
//! layout and dependency descriptor; identifiers always go through the
//! core normalizer and types through the core mapping tables.

pub mod csharp;
pub mod go;
pub mod java;
pub mod javascript;
pub mod php;
pub mod python;
pub mod rust;

pub use csharp::CsharpGenerator;
pub use go::GoGenerator;
pub use java::JavaGenerator;
pub use javascript::JavascriptGenerator;
pub use php::PhpGenerator;
pub use python::PythonGenerator;
pub use rust::RustGenerator;

use apigen_core::GenerateOptions;
use apigen_core::normalize::{sanitize, to_pascal_case, to_snake_case};

/// PascalCase client class name derived from the package name.
pub(crate) fn class_name(options: &GenerateOptions) -> String {
    let name = to_pascal_case(&sanitize(&options.package_name));
    if name.is_empty() {
        "ApiClient".to_string()
    } else {
        name
    }
}

/// snake_case package/module name derived from the package name.
pub(crate) fn module_name(options: &GenerateOptions) -> String {
    let name = to_snake_case(&sanitize(&options.package_name));
    if name.is_empty() {
        "api_client".to_string()
    } else {
        name
    }
}
