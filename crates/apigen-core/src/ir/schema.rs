use serde_json::Value;

/// Canonical schema type tag. Source schema detail is reduced to this tag
/// before per-language type mapping; there is no `$ref` resolution and no
/// composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl SchemaType {
    pub const ALL: [SchemaType; 6] = [
        SchemaType::String,
        SchemaType::Integer,
        SchemaType::Number,
        SchemaType::Boolean,
        SchemaType::Array,
        SchemaType::Object,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
        }
    }

    /// Parse a raw `type` value. Unrecognized tags return `None` and fall
    /// through to the per-language default at mapping time.
    pub fn parse(tag: &str) -> Option<SchemaType> {
        match tag {
            "string" => Some(SchemaType::String),
            "integer" => Some(SchemaType::Integer),
            "number" => Some(SchemaType::Number),
            "boolean" => Some(SchemaType::Boolean),
            "array" => Some(SchemaType::Array),
            "object" => Some(SchemaType::Object),
            _ => None,
        }
    }

    /// Reduce a raw schema node to its canonical tag. A schema object with
    /// no `type` field is an object; a non-mapping node or an unrecognized
    /// tag yields `None`.
    pub fn from_schema(schema: &Value) -> Option<SchemaType> {
        let map = schema.as_object()?;
        match map.get("type") {
            None => Some(SchemaType::Object),
            Some(Value::String(tag)) => SchemaType::parse(tag),
            Some(_) => None,
        }
    }
}

/// A field projected out of an object schema's `properties`.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    pub name: String,
    pub schema: Option<SchemaType>,
    pub required: bool,
    pub description: Option<String>,
}

/// Flatten an object schema node into its fields. Required fields come
/// first (stable within each group) so backends can emit default-valued
/// fields last.
pub fn schema_fields(schema: &Value) -> Vec<SchemaField> {
    let Some(map) = schema.as_object() else {
        return Vec::new();
    };

    let required: Vec<&str> = map
        .get("required")
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut fields: Vec<SchemaField> = map
        .get("properties")
        .and_then(Value::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(name, prop)| SchemaField {
                    name: name.clone(),
                    schema: SchemaType::from_schema(prop),
                    required: required.contains(&name.as_str()),
                    description: prop
                        .get("description")
                        .and_then(Value::as_str)
                        .map(String::from),
                })
                .collect()
        })
        .unwrap_or_default();

    fields.sort_by_key(|field| !field.required);
    fields
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_schema_defaults_to_object() {
        assert_eq!(
            SchemaType::from_schema(&json!({"properties": {}})),
            Some(SchemaType::Object)
        );
    }

    #[test]
    fn test_from_schema_unrecognized_tag() {
        assert_eq!(SchemaType::from_schema(&json!({"type": "file"})), None);
        assert_eq!(SchemaType::from_schema(&json!("string")), None);
    }

    #[test]
    fn test_schema_fields_required_first() {
        let schema = json!({
            "type": "object",
            "required": ["id"],
            "properties": {
                "name": {"type": "string"},
                "id": {"type": "integer"},
            }
        });
        let fields = schema_fields(&schema);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "id");
        assert!(fields[0].required);
        assert_eq!(fields[0].schema, Some(SchemaType::Integer));
        assert_eq!(fields[1].name, "name");
        assert!(!fields[1].required);
    }
}
