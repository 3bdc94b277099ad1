use serde_json::{Map, Value};

/// Keywords Gemini's `responseSchema` rejects or ignores.
const DROPPED_KEYWORDS: [&str; 6] = [
    "$schema",
    "title",
    "definitions",
    "additionalProperties",
    "format",
    "default",
];

/// Rewrites a schemars (draft-07) root schema into the OpenAPI subset accepted
/// by Gemini structured output: `$ref`s are inlined, `Option<T>` becomes `T`
/// with `nullable: true`, and unsupported keywords are dropped.
pub fn to_gemini_schema(root: &Value) -> Value {
    let empty = Map::new();
    let definitions = root
        .get("definitions")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    convert(root, definitions)
}

fn convert(schema: &Value, definitions: &Map<String, Value>) -> Value {
    let Some(map) = schema.as_object() else {
        return schema.clone();
    };

    if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
        let name = reference.rsplit('/').next().unwrap_or(reference);
        let mut resolved = definitions
            .get(name)
            .map(|def| convert(def, definitions))
            .unwrap_or_else(|| Value::Object(Map::new()));
        copy_description(map, &mut resolved);
        return resolved;
    }

    // `Option<Struct>` comes out as anyOf [ {$ref}, {type: null} ].
    if let Some(variants) = map.get("anyOf").and_then(Value::as_array) {
        let non_null: Vec<&Value> = variants.iter().filter(|v| !is_null_type(v)).collect();
        if non_null.len() == 1 {
            let mut inner = convert(non_null[0], definitions);
            if non_null.len() < variants.len() {
                set_nullable(&mut inner);
            }
            copy_description(map, &mut inner);
            return inner;
        }
    }

    // A `$ref` carrying its own metadata is wrapped as allOf [ {$ref} ].
    if let Some([single]) = map.get("allOf").and_then(Value::as_array).map(Vec::as_slice) {
        let mut inner = convert(single, definitions);
        copy_description(map, &mut inner);
        return inner;
    }

    let mut out = Map::new();
    for (key, value) in map {
        if DROPPED_KEYWORDS.contains(&key.as_str()) {
            continue;
        }
        match key.as_str() {
            "type" => match value {
                Value::Array(types) => {
                    let concrete: Vec<&Value> =
                        types.iter().filter(|t| t.as_str() != Some("null")).collect();
                    if let Some(first) = concrete.first() {
                        out.insert("type".to_string(), (*first).clone());
                    }
                    if concrete.len() < types.len() {
                        out.insert("nullable".to_string(), Value::Bool(true));
                    }
                }
                other => {
                    out.insert("type".to_string(), other.clone());
                }
            },
            "properties" => {
                let props = value
                    .as_object()
                    .map(|props| {
                        props
                            .iter()
                            .map(|(name, prop)| (name.clone(), convert(prop, definitions)))
                            .collect::<Map<String, Value>>()
                    })
                    .unwrap_or_default();
                out.insert(key.clone(), Value::Object(props));
            }
            "items" => {
                out.insert(key.clone(), convert(value, definitions));
            }
            "anyOf" | "oneOf" | "allOf" => {
                let converted = value
                    .as_array()
                    .map(|vs| vs.iter().map(|v| convert(v, definitions)).collect::<Vec<_>>())
                    .unwrap_or_default();
                out.insert(key.clone(), Value::Array(converted));
            }
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }

    Value::Object(out)
}

fn is_null_type(schema: &Value) -> bool {
    schema.get("type").and_then(Value::as_str) == Some("null")
}

fn set_nullable(schema: &mut Value) {
    if let Some(map) = schema.as_object_mut() {
        map.insert("nullable".to_string(), Value::Bool(true));
    }
}

fn copy_description(from: &Map<String, Value>, to: &mut Value) {
    if let (Some(description), Some(target)) = (from.get("description"), to.as_object_mut()) {
        target.insert("description".to_string(), description.clone());
    }
}
