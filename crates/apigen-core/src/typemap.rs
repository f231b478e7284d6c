//! Per-language type mapping tables.
//!
//! The tables are declared data rather than branching logic: one struct field
//! per canonical tag, so a missing entry is a compile error and completeness
//! is directly testable.

use crate::ir::SchemaType;
use crate::language::Language;

/// Native type names for the six canonical tags plus the unknown fallback.
#[derive(Debug, Clone, Copy)]
pub struct TypeTable {
    pub string: &'static str,
    pub integer: &'static str,
    pub number: &'static str,
    pub boolean: &'static str,
    pub array: &'static str,
    pub object: &'static str,
    /// Used when a schema is absent or its tag is unrecognized.
    pub unknown: &'static str,
}

pub const PYTHON: TypeTable = TypeTable {
    string: "str",
    integer: "int",
    number: "float",
    boolean: "bool",
    array: "List",
    object: "Dict[str, Any]",
    unknown: "Any",
};

pub const JAVASCRIPT: TypeTable = TypeTable {
    string: "string",
    integer: "number",
    number: "number",
    boolean: "boolean",
    array: "Array",
    object: "object",
    unknown: "any",
};

pub const GO: TypeTable = TypeTable {
    string: "string",
    integer: "int",
    number: "float64",
    boolean: "bool",
    array: "[]interface{}",
    object: "map[string]interface{}",
    unknown: "interface{}",
};

pub const RUST: TypeTable = TypeTable {
    string: "String",
    integer: "i64",
    number: "f64",
    boolean: "bool",
    array: "Vec<serde_json::Value>",
    object: "serde_json::Value",
    unknown: "serde_json::Value",
};

pub const CSHARP: TypeTable = TypeTable {
    string: "string",
    integer: "int",
    number: "double",
    boolean: "bool",
    array: "List<object>",
    object: "Dictionary<string, object>",
    unknown: "object",
};

pub const JAVA: TypeTable = TypeTable {
    string: "String",
    integer: "Integer",
    number: "Double",
    boolean: "Boolean",
    array: "List<Object>",
    object: "Map<String, Object>",
    unknown: "Object",
};

pub const PHP: TypeTable = TypeTable {
    string: "string",
    integer: "int",
    number: "float",
    boolean: "bool",
    array: "array",
    object: "array",
    unknown: "mixed",
};

/// The mapping table for a target language.
pub const fn table(lang: Language) -> &'static TypeTable {
    match lang {
        Language::Python => &PYTHON,
        Language::Javascript => &JAVASCRIPT,
        Language::Go => &GO,
        Language::Rust => &RUST,
        Language::Csharp => &CSHARP,
        Language::Java => &JAVA,
        Language::Php => &PHP,
    }
}

/// Total mapping from canonical tag to native type name. `None` (no schema,
/// or an unrecognized tag) maps to the language's declared unknown type.
pub fn map_type(tag: Option<SchemaType>, lang: Language) -> &'static str {
    let table = table(lang);
    match tag {
        Some(SchemaType::String) => table.string,
        Some(SchemaType::Integer) => table.integer,
        Some(SchemaType::Number) => table.number,
        Some(SchemaType::Boolean) => table.boolean,
        Some(SchemaType::Array) => table.array,
        Some(SchemaType::Object) => table.object,
        None => table.unknown,
    }
}
