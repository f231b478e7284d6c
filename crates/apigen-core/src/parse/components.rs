use indexmap::IndexMap;
use serde_json::Value;

use crate::ir::Components;

pub(super) fn parse_components(components: Option<&Value>) -> Components {
    let Some(components) = components.and_then(Value::as_object) else {
        return Components::default();
    };
    Components {
        schemas: section(components, "schemas"),
        security_schemes: section(components, "securitySchemes"),
        parameters: section(components, "parameters"),
        responses: section(components, "responses"),
        request_bodies: section(components, "requestBodies"),
    }
}

fn section(map: &serde_json::Map<String, Value>, key: &str) -> IndexMap<String, Value> {
    map.get(key)
        .and_then(Value::as_object)
        .map(|section| {
            section
                .iter()
                .map(|(name, node)| (name.clone(), node.clone()))
                .collect()
        })
        .unwrap_or_default()
}
