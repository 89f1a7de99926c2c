//! The EJSON value model and the kind classifier.

use indexmap::IndexMap;

use crate::custom::{CustomType, TypeRegistry};
use crate::error::EjsonError;

/// A value handled by the codec.
///
/// Plain JSON kinds are joined by the extension kinds JSON cannot carry
/// natively: instants, byte buffers, regular expressions, the non-finite
/// numbers (via [`Value::Number`] holding `NAN`/`INFINITY`), and
/// registered custom types.
///
/// Object keys keep insertion order; `keyOrderSensitive` equality and
/// non-canonical printing depend on it.
#[derive(Debug)]
pub enum Value {
    Null,
    Bool(bool),
    /// Any `f64`, including `NaN` and the infinities.
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(IndexMap<String, Value>),
    /// Absolute instant, milliseconds since the Unix epoch.
    Date(i64),
    /// Raw byte buffer.
    Binary(Vec<u8>),
    RegExp(RegExpValue),
    /// Instance of a registered custom type.
    Custom(Box<dyn CustomType>),
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Bool(b) => Value::Bool(*b),
            Value::Number(n) => Value::Number(*n),
            Value::String(s) => Value::String(s.clone()),
            Value::Array(items) => Value::Array(items.clone()),
            Value::Object(map) => Value::Object(map.clone()),
            Value::Date(ms) => Value::Date(*ms),
            Value::Binary(bytes) => Value::Binary(bytes.clone()),
            Value::RegExp(re) => Value::RegExp(re.clone()),
            Value::Custom(c) => Value::Custom(c.clone_box()),
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&dyn CustomType> {
        match self {
            Value::Custom(c) => Some(c.as_ref()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(map: IndexMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

// ── RegExp ────────────────────────────────────────────────────────────────

/// A regular expression value: pattern text plus a JavaScript-style flag
/// string, kept verbatim so the wire form round-trips exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegExpValue {
    pub pattern: String,
    pub flags: String,
}

impl RegExpValue {
    pub fn new(pattern: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            flags: flags.into(),
        }
    }

    /// Materialize the pattern as a [`regex::Regex`].
    ///
    /// Flags `i`, `m`, `s`, and `x` translate to builder options. `g`,
    /// `u`, and `y` only affect host-side matching state, not the
    /// pattern language, and are accepted and ignored. Any other flag is
    /// an [`EjsonError::InvalidArgument`].
    pub fn compile(&self) -> Result<regex::Regex, EjsonError> {
        let mut builder = regex::RegexBuilder::new(&self.pattern);
        for flag in self.flags.chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'x' => {
                    builder.ignore_whitespace(true);
                }
                'g' | 'u' | 'y' => {}
                other => {
                    return Err(EjsonError::InvalidArgument(format!(
                        "unknown regexp flag: {other}"
                    )))
                }
            }
        }
        builder
            .build()
            .map_err(|err| EjsonError::InvalidArgument(err.to_string()))
    }
}

// ── Classifier ────────────────────────────────────────────────────────────

/// Numeric sub-kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Finite,
    NaN,
    PosInf,
    NegInf,
}

/// The classifier's verdict for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    Number(NumberKind),
    String,
    Sequence,
    Binary,
    Date,
    RegExp,
    /// Instance recognized by a registered adapter.
    Custom,
    Mapping,
}

/// Determine the kind of `value`.
///
/// A [`Value::Custom`] that no registered adapter recognizes has no
/// classifiable kind and fails with [`EjsonError::UnsupportedValue`].
pub fn classify(registry: &TypeRegistry, value: &Value) -> Result<Kind, EjsonError> {
    Ok(match value {
        Value::Null => Kind::Null,
        Value::Bool(_) => Kind::Bool,
        Value::Number(n) => Kind::Number(if n.is_nan() {
            NumberKind::NaN
        } else if *n == f64::INFINITY {
            NumberKind::PosInf
        } else if *n == f64::NEG_INFINITY {
            NumberKind::NegInf
        } else {
            NumberKind::Finite
        }),
        Value::String(_) => Kind::String,
        Value::Array(_) => Kind::Sequence,
        Value::Binary(_) => Kind::Binary,
        Value::Date(_) => Kind::Date,
        Value::RegExp(_) => Kind::RegExp,
        Value::Custom(c) => match registry.lookup_by_instance(c.as_ref()) {
            Some(_) => Kind::Custom,
            None => {
                return Err(EjsonError::UnsupportedValue(format!(
                    "unregistered custom type: {}",
                    c.type_name()
                )))
            }
        },
        Value::Object(_) => Kind::Mapping,
    })
}
