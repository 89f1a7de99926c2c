//! Decoder: JSON-safe `serde_json` values back into EJSON values.
//!
//! The structural inverse of the encoder. A tag fires only on an exact
//! reserved key set; anything else is plain data, including objects
//! whose keys merely contain a reserved word as a substring.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use indexmap::IndexMap;
use serde_json::{Map, Value as Json};

use crate::custom::TypeRegistry;
use crate::encode::MAX_DEPTH;
use crate::error::EjsonError;
use crate::value::{RegExpValue, Value};

/// Decode a JSON-safe value into an EJSON [`Value`].
pub fn from_json_value(registry: &TypeRegistry, json: &Json) -> Result<Value, EjsonError> {
    decode_at(registry, json, 0)
}

fn decode_at(registry: &TypeRegistry, json: &Json, depth: usize) -> Result<Value, EjsonError> {
    if depth > MAX_DEPTH {
        return Err(EjsonError::CircularStructure);
    }
    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => Value::Number(n.as_f64().ok_or_else(|| {
            EjsonError::InvalidArgument(format!("number out of range: {n}"))
        })?),
        Json::String(s) => Value::String(s.clone()),
        Json::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(decode_at(registry, item, depth + 1)?);
            }
            Value::Array(out)
        }
        Json::Object(map) => return decode_object(registry, map, depth),
    })
}

fn decode_object(
    registry: &TypeRegistry,
    map: &Map<String, Json>,
    depth: usize,
) -> Result<Value, EjsonError> {
    if map.len() == 1 {
        if let Some((key, payload)) = map.iter().next() {
            match key.as_str() {
                "$date" => return decode_date(payload),
                "$binary" => return decode_binary(payload),
                "$InfNaN" => return decode_inf_nan(payload),
                "$escape" => return decode_escape(registry, payload, depth),
                _ => {}
            }
        }
    } else if map.len() == 2 {
        if map.contains_key("$regexp") && map.contains_key("$flags") {
            return decode_regexp(&map["$regexp"], &map["$flags"]);
        }
        if map.contains_key("$type") && map.contains_key("$value") {
            return decode_custom(registry, &map["$type"], &map["$value"], depth);
        }
    }

    // No tag shape matched: a plain mapping with decoded values.
    let mut out = IndexMap::with_capacity(map.len());
    for (key, val) in map {
        out.insert(key.clone(), decode_at(registry, val, depth + 1)?);
    }
    Ok(Value::Object(out))
}

fn decode_date(payload: &Json) -> Result<Value, EjsonError> {
    let ms = payload
        .as_i64()
        .or_else(|| {
            // The cast saturates outside i64 range; reject instead.
            payload
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f as i64)
        })
        .ok_or_else(|| EjsonError::InvalidArgument(format!("invalid $date payload: {payload}")))?;
    Ok(Value::Date(ms))
}

fn decode_binary(payload: &Json) -> Result<Value, EjsonError> {
    let text = payload
        .as_str()
        .ok_or_else(|| EjsonError::InvalidArgument(format!("invalid $binary payload: {payload}")))?;
    let bytes = BASE64
        .decode(text)
        .map_err(|err| EjsonError::InvalidArgument(format!("invalid $binary payload: {err}")))?;
    Ok(Value::Binary(bytes))
}

fn decode_inf_nan(payload: &Json) -> Result<Value, EjsonError> {
    match payload.as_i64() {
        Some(0) => Ok(Value::Number(f64::NAN)),
        Some(1) => Ok(Value::Number(f64::INFINITY)),
        Some(-1) => Ok(Value::Number(f64::NEG_INFINITY)),
        _ => Err(EjsonError::InvalidArgument(format!(
            "invalid $InfNaN payload: {payload}"
        ))),
    }
}

fn decode_escape(
    registry: &TypeRegistry,
    payload: &Json,
    depth: usize,
) -> Result<Value, EjsonError> {
    let inner = payload
        .as_object()
        .ok_or_else(|| EjsonError::InvalidArgument(format!("invalid $escape payload: {payload}")))?;
    // Values are decoded, but the unwrapped shape itself is data.
    let mut out = IndexMap::with_capacity(inner.len());
    for (key, val) in inner {
        out.insert(key.clone(), decode_at(registry, val, depth + 1)?);
    }
    Ok(Value::Object(out))
}

fn decode_regexp(pattern: &Json, flags: &Json) -> Result<Value, EjsonError> {
    match (pattern.as_str(), flags.as_str()) {
        (Some(pattern), Some(flags)) => Ok(Value::RegExp(RegExpValue::new(pattern, flags))),
        _ => Err(EjsonError::InvalidArgument(format!(
            "invalid $regexp payload: {pattern}, {flags}"
        ))),
    }
}

fn decode_custom(
    registry: &TypeRegistry,
    name: &Json,
    payload: &Json,
    depth: usize,
) -> Result<Value, EjsonError> {
    let name = name
        .as_str()
        .ok_or_else(|| EjsonError::InvalidArgument(format!("invalid $type payload: {name}")))?;
    let adapter = registry
        .lookup_by_name(name)
        .ok_or_else(|| EjsonError::UnknownType(name.to_owned()))?;
    let inner = decode_at(registry, payload, depth + 1)?;
    Ok(Value::Custom((adapter.factory())(inner)?))
}
