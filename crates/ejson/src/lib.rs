//! ejson — Extended JSON codec.
//!
//! A serialization layer over plain JSON that round-trips values JSON
//! cannot carry natively: instants, byte buffers, regular expressions,
//! `NaN`/`Infinity`, and registered custom types. The wire form is
//! ordinary JSON text in which extension values appear as reserved tag
//! shapes (`{"$date": ...}`, `{"$binary": ...}`, and so on); plain data
//! that happens to collide with a tag shape is protected by an
//! `$escape` wrapper, so encode/decode is bijective over all mappings.
//!
//! The [`Ejson`] front-end owns a [`TypeRegistry`] and exposes the full
//! API: encode/decode, text parse/stringify, deep equality, and deep
//! clone. Registries are explicit values, so tests and embedders can
//! keep isolated type sets.
//!
//! ```
//! use ejson::{Ejson, Value};
//!
//! let ejson = Ejson::new();
//! let value = ejson.parse(r#"{"when": {"$date": 1700000000000}}"#).unwrap();
//! assert!(matches!(value.as_object().unwrap()["when"], Value::Date(_)));
//! let text = ejson.stringify(&value, &Default::default()).unwrap();
//! assert_eq!(text, r#"{"when":{"$date":1700000000000}}"#);
//! ```

pub mod clone;
pub mod custom;
pub mod decode;
pub mod encode;
pub mod equal;
pub mod error;
pub mod stringify;
pub mod value;

pub use custom::{CustomType, TypeAdapter, TypeRegistry, RESERVED_TAGS};
pub use equal::EqualsOptions;
pub use error::EjsonError;
pub use stringify::{Indent, StringifyOptions};
pub use value::{classify, Kind, NumberKind, RegExpValue, Value};

/// The codec front-end: owns the type registry and exposes every
/// operation against it.
#[derive(Debug, Default)]
pub struct Ejson {
    registry: TypeRegistry,
}

impl Ejson {
    /// A codec with the built-in codecs only (dates, binary, regexps,
    /// non-finite numbers). Custom types are added with [`add_type`].
    ///
    /// [`add_type`]: Ejson::add_type
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Register a custom type. Registration is expected during startup,
    /// before encode/decode traffic begins.
    pub fn add_type(&mut self, name: &str, adapter: TypeAdapter) -> Result<(), EjsonError> {
        self.registry.register(name, adapter)
    }

    /// Encode a value into a JSON-safe [`serde_json::Value`].
    pub fn to_json_value(&self, value: &Value) -> Result<serde_json::Value, EjsonError> {
        encode::to_json_value(&self.registry, value)
    }

    /// Decode a JSON-safe value back into a [`Value`].
    pub fn from_json_value(&self, json: &serde_json::Value) -> Result<Value, EjsonError> {
        decode::from_json_value(&self.registry, json)
    }

    /// Parse EJSON text. Syntax errors from the underlying JSON parser
    /// and tag errors from decode propagate unchanged.
    pub fn parse(&self, text: &str) -> Result<Value, EjsonError> {
        let json: serde_json::Value = serde_json::from_str(text)?;
        self.from_json_value(&json)
    }

    /// Serialize a value to EJSON text. Canonical (sorted-key) output by
    /// default; see [`StringifyOptions`].
    pub fn stringify(&self, value: &Value, options: &StringifyOptions) -> Result<String, EjsonError> {
        stringify::stringify(&self.registry, value, options)
    }

    /// Deep structural equality; see [`EqualsOptions`].
    pub fn equals(&self, a: &Value, b: &Value, options: EqualsOptions) -> bool {
        equal::equals(&self.registry, a, b, options)
    }

    /// Registry-aware deep clone.
    pub fn clone_value(&self, value: &Value) -> Result<Value, EjsonError> {
        clone::clone_value(&self.registry, value)
    }

    /// Classify a value; see [`Kind`].
    pub fn classify(&self, value: &Value) -> Result<Kind, EjsonError> {
        value::classify(&self.registry, value)
    }

    /// True iff the classifier resolves `value` to [`Kind::Binary`].
    pub fn is_binary(&self, value: &Value) -> bool {
        matches!(self.classify(value), Ok(Kind::Binary))
    }
}

/// Allocate a zeroed byte buffer of `len` bytes, recognized by the
/// classifier as binary.
pub fn new_binary(len: usize) -> Value {
    Value::Binary(vec![0; len])
}
