//! Canonical printer: JSON-safe values to text.
//!
//! Two independent axes: key ordering (canonical sorts every mapping's
//! keys lexicographically, insertion order otherwise) and whitespace
//! (compact, or one indent unit per nesting level).

use ejson_util::insertion_sort_by;
use ejson_util::strings::escape;
use serde_json::Value as Json;

use crate::custom::TypeRegistry;
use crate::encode::to_json_value;
use crate::error::EjsonError;
use crate::value::Value;

/// Whitespace axis of [`StringifyOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Indent {
    /// Most compact form: no whitespace at all.
    #[default]
    None,
    /// `n` spaces per nesting level.
    Spaces(usize),
    /// A literal string repeated per nesting level.
    Text(String),
}

impl From<bool> for Indent {
    fn from(on: bool) -> Self {
        if on {
            Indent::Spaces(2)
        } else {
            Indent::None
        }
    }
}

impl From<usize> for Indent {
    fn from(n: usize) -> Self {
        Indent::Spaces(n)
    }
}

impl From<&str> for Indent {
    fn from(unit: &str) -> Self {
        Indent::Text(unit.to_owned())
    }
}

/// Options for [`stringify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringifyOptions {
    pub indent: Indent,
    /// Sort keys lexicographically at every nesting level. On by
    /// default, so equal values print to equal text.
    pub canonical: bool,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        Self {
            indent: Indent::None,
            canonical: true,
        }
    }
}

/// Encode `value` and print it as JSON text.
///
/// Encoding failures (unsupported values, runaway custom expansion)
/// propagate unchanged.
pub fn stringify(
    registry: &TypeRegistry,
    value: &Value,
    options: &StringifyOptions,
) -> Result<String, EjsonError> {
    let json = to_json_value(registry, value)?;
    Ok(print_json(&json, options))
}

/// Print an already JSON-safe value.
pub fn print_json(json: &Json, options: &StringifyOptions) -> String {
    match &options.indent {
        Indent::None => print_compact(json, options.canonical),
        Indent::Spaces(n) => print_indented(json, &" ".repeat(*n), 0, options.canonical),
        Indent::Text(unit) => print_indented(json, unit, 0, options.canonical),
    }
}

fn sorted_keys<'a>(map: &'a serde_json::Map<String, Json>, canonical: bool) -> Vec<&'a str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    if canonical {
        insertion_sort_by(&mut keys, |a, b| a.cmp(b));
    }
    keys
}

fn print_compact(json: &Json, canonical: bool) -> String {
    match json {
        Json::Null => "null".to_owned(),
        Json::Bool(b) => b.to_string(),
        Json::Number(n) => n.to_string(),
        Json::String(s) => format!("\"{}\"", escape(s)),
        Json::Array(items) => {
            let mut out = String::from('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&print_compact(item, canonical));
            }
            out.push(']');
            out
        }
        Json::Object(map) => {
            let mut out = String::from('{');
            for (i, key) in sorted_keys(map, canonical).iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('"');
                out.push_str(&escape(key));
                out.push_str("\":");
                out.push_str(&print_compact(&map[*key], canonical));
            }
            out.push('}');
            out
        }
    }
}

fn print_indented(json: &Json, unit: &str, depth: usize, canonical: bool) -> String {
    match json {
        Json::Array(items) if !items.is_empty() => {
            let pad = unit.repeat(depth + 1);
            let mut out = String::from("[\n");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                out.push_str(&pad);
                out.push_str(&print_indented(item, unit, depth + 1, canonical));
            }
            out.push('\n');
            out.push_str(&unit.repeat(depth));
            out.push(']');
            out
        }
        Json::Object(map) if !map.is_empty() => {
            let pad = unit.repeat(depth + 1);
            let mut out = String::from("{\n");
            for (i, key) in sorted_keys(map, canonical).iter().enumerate() {
                if i > 0 {
                    out.push_str(",\n");
                }
                out.push_str(&pad);
                out.push('"');
                out.push_str(&escape(key));
                out.push_str("\": ");
                out.push_str(&print_indented(&map[*key], unit, depth + 1, canonical));
            }
            out.push('\n');
            out.push_str(&unit.repeat(depth));
            out.push('}');
            out
        }
        // Scalars and empty containers have no inner lines to indent.
        other => print_compact(other, canonical),
    }
}
