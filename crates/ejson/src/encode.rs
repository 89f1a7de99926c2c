//! Encoder: EJSON values into JSON-safe `serde_json` values.
//!
//! Extension kinds become the tag shapes of the wire format; a plain
//! mapping whose encoded key set collides with a tag shape is wrapped in
//! `$escape` so encode/decode stays bijective over all plain mappings.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{Map, Number, Value as Json};

use crate::custom::TypeRegistry;
use crate::error::EjsonError;
use crate::value::Value;

/// Recursion budget for encode, decode, and clone. Owned value trees
/// cannot be cyclic, but a custom type whose `to_json_value` expands
/// into another custom value can descend forever; overrunning the
/// budget reports [`EjsonError::CircularStructure`] before the call
/// stack is exhausted.
pub(crate) const MAX_DEPTH: usize = 512;

/// Largest integer magnitude `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0; // 2^53

/// Encode `value` into a JSON-safe value.
pub fn to_json_value(registry: &TypeRegistry, value: &Value) -> Result<Json, EjsonError> {
    encode_at(registry, value, 0)
}

fn encode_at(registry: &TypeRegistry, value: &Value, depth: usize) -> Result<Json, EjsonError> {
    if depth > MAX_DEPTH {
        return Err(EjsonError::CircularStructure);
    }
    Ok(match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Number(n) => {
            if n.is_nan() {
                tag("$InfNaN", Json::from(0))
            } else if n.is_infinite() {
                tag("$InfNaN", Json::from(if *n > 0.0 { 1 } else { -1 }))
            } else {
                Json::Number(number_to_json(*n))
            }
        }
        Value::String(s) => Json::String(s.clone()),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(encode_at(registry, item, depth + 1)?);
            }
            Json::Array(out)
        }
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, val) in map {
                out.insert(key.clone(), encode_at(registry, val, depth + 1)?);
            }
            // Applied post-encoding so nested escapes compose.
            if is_reserved_shape(&out) {
                tag("$escape", Json::Object(out))
            } else {
                Json::Object(out)
            }
        }
        Value::Date(ms) => tag("$date", Json::from(*ms)),
        Value::Binary(bytes) => tag("$binary", Json::String(BASE64.encode(bytes))),
        Value::RegExp(re) => {
            let mut out = Map::with_capacity(2);
            out.insert("$regexp".to_owned(), Json::String(re.pattern.clone()));
            out.insert("$flags".to_owned(), Json::String(re.flags.clone()));
            Json::Object(out)
        }
        Value::Custom(instance) => {
            let (name, _) = registry.lookup_by_instance(instance.as_ref()).ok_or_else(|| {
                EjsonError::UnsupportedValue(format!(
                    "unregistered custom type: {}",
                    instance.type_name()
                ))
            })?;
            let inner = encode_at(registry, &instance.to_json_value(), depth + 1)?;
            let mut out = Map::with_capacity(2);
            out.insert("$type".to_owned(), Json::String(name.to_owned()));
            out.insert("$value".to_owned(), inner);
            Json::Object(out)
        }
    })
}

fn tag(key: &str, payload: Json) -> Json {
    let mut out = Map::with_capacity(1);
    out.insert(key.to_owned(), payload);
    Json::Object(out)
}

/// Render a finite `f64` the way JSON renders numbers: integral values
/// within the exactly-representable range print without a fraction.
fn number_to_json(n: f64) -> Number {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        Number::from(n as i64)
    } else {
        // Finite by construction.
        Number::from_f64(n).unwrap_or_else(|| Number::from(0))
    }
}

/// True when an encoded mapping's key set exactly matches a shape the
/// decoder would interpret as a tag. Key substrings never match; only
/// the exact sets do.
pub(crate) fn is_reserved_shape(map: &Map<String, Json>) -> bool {
    match map.len() {
        1 => {
            let key = map.keys().next().map(String::as_str);
            matches!(key, Some("$date" | "$binary" | "$InfNaN" | "$escape"))
        }
        2 => {
            (map.contains_key("$regexp") && map.contains_key("$flags"))
                || (map.contains_key("$type") && map.contains_key("$value"))
        }
        _ => false,
    }
}
