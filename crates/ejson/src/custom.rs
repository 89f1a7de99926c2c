//! Custom type support: the [`CustomType`] capability trait, per-type
//! [`TypeAdapter`] records, and the [`TypeRegistry`].

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::EjsonError;
use crate::value::Value;

/// Tag keys owned by the wire format. Registering any of these as a
/// custom type name is a [`EjsonError::DuplicateType`]; the built-in
/// codecs for dates, binary, regexps, and non-finite numbers are fixed.
pub const RESERVED_TAGS: [&str; 8] = [
    "$date", "$binary", "$regexp", "$flags", "$InfNaN", "$type", "$value", "$escape",
];

/// Capability every custom EJSON value must expose.
///
/// Implementations are plain structs; `clone_box` is the host-level
/// duplicate used when a [`Value`] tree itself is cloned (the
/// registry-aware deep clone entry point additionally honors a
/// per-adapter clone hook).
pub trait CustomType: Debug + Send + Sync {
    /// The registered type name; doubles as the `$type` wire tag.
    fn type_name(&self) -> &str;

    /// Convert the instance into a [`Value`] tree. The result may still
    /// contain extension kinds (dates, nested custom values); the
    /// encoder keeps recursing into it.
    fn to_json_value(&self) -> Value;

    /// Downcasting hook for adapter predicates, equality, and clone.
    fn as_any(&self) -> &dyn Any;

    fn clone_box(&self) -> Box<dyn CustomType>;
}

/// Reconstructs an instance from its decoded `$value` payload.
pub type FactoryFn = Arc<dyn Fn(Value) -> Result<Box<dyn CustomType>, EjsonError> + Send + Sync>;

/// Tests whether a runtime value belongs to this adapter's type.
pub type RecognizeFn = Arc<dyn Fn(&dyn CustomType) -> bool + Send + Sync>;

/// Type-specific equality between two instances of the same adapter.
pub type EqualsFn = Arc<dyn Fn(&dyn CustomType, &dyn CustomType) -> bool + Send + Sync>;

/// Type-specific deep clone of one instance.
pub type CloneFn = Arc<dyn Fn(&dyn CustomType) -> Box<dyn CustomType> + Send + Sync>;

/// The registry's record for one custom type.
///
/// Only the factory is mandatory. Recognition defaults to comparing the
/// instance's [`CustomType::type_name`] against the registered name;
/// equality falls back to deep comparison of `to_json_value` outputs;
/// clone falls back to a factory round-trip.
#[derive(Clone)]
pub struct TypeAdapter {
    factory: FactoryFn,
    recognize: Option<RecognizeFn>,
    equals: Option<EqualsFn>,
    clone: Option<CloneFn>,
}

impl TypeAdapter {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(Value) -> Result<Box<dyn CustomType>, EjsonError> + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
            recognize: None,
            equals: None,
            clone: None,
        }
    }

    /// Override the recognition predicate.
    pub fn with_recognize<F>(mut self, recognize: F) -> Self
    where
        F: Fn(&dyn CustomType) -> bool + Send + Sync + 'static,
    {
        self.recognize = Some(Arc::new(recognize));
        self
    }

    /// Provide type-specific equality.
    pub fn with_equals<F>(mut self, equals: F) -> Self
    where
        F: Fn(&dyn CustomType, &dyn CustomType) -> bool + Send + Sync + 'static,
    {
        self.equals = Some(Arc::new(equals));
        self
    }

    /// Provide a type-specific clone.
    pub fn with_clone<F>(mut self, clone: F) -> Self
    where
        F: Fn(&dyn CustomType) -> Box<dyn CustomType> + Send + Sync + 'static,
    {
        self.clone = Some(Arc::new(clone));
        self
    }

    pub fn factory(&self) -> &FactoryFn {
        &self.factory
    }

    pub fn equals_fn(&self) -> Option<&EqualsFn> {
        self.equals.as_ref()
    }

    pub fn clone_fn(&self) -> Option<&CloneFn> {
        self.clone.as_ref()
    }

    fn recognizes(&self, name: &str, instance: &dyn CustomType) -> bool {
        match &self.recognize {
            Some(predicate) => predicate(instance),
            None => instance.type_name() == name,
        }
    }

    /// Two records are "the same adapter" when they share a factory.
    fn is_same(&self, other: &TypeAdapter) -> bool {
        Arc::ptr_eq(&self.factory, &other.factory)
    }
}

impl Debug for TypeAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeAdapter")
            .field("recognize", &self.recognize.is_some())
            .field("equals", &self.equals.is_some())
            .field("clone", &self.clone.is_some())
            .finish()
    }
}

/// Maps custom type names to adapters.
///
/// Insertion order is kept so `lookup_by_instance` scans adapters in
/// registration order and the first match wins. Registration happens at
/// startup; encode/decode traffic only reads.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    adapters: IndexMap<String, TypeAdapter>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `adapter`.
    ///
    /// Re-registering the identical adapter is idempotent, so re-running
    /// a module's init sequence is harmless. Binding a different adapter
    /// under a taken name, or claiming a reserved tag, is a
    /// [`EjsonError::DuplicateType`].
    pub fn register(&mut self, name: &str, adapter: TypeAdapter) -> Result<(), EjsonError> {
        if RESERVED_TAGS.contains(&name) {
            return Err(EjsonError::DuplicateType(name.to_owned()));
        }
        if let Some(existing) = self.adapters.get(name) {
            if existing.is_same(&adapter) {
                return Ok(());
            }
            return Err(EjsonError::DuplicateType(name.to_owned()));
        }
        self.adapters.insert(name.to_owned(), adapter);
        Ok(())
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<&TypeAdapter> {
        self.adapters.get(name)
    }

    /// Find the adapter whose recognition predicate matches `instance`,
    /// scanning in registration order.
    pub fn lookup_by_instance(&self, instance: &dyn CustomType) -> Option<(&str, &TypeAdapter)> {
        self.adapters
            .iter()
            .find(|(name, adapter)| adapter.recognizes(name, instance))
            .map(|(name, adapter)| (name.as_str(), adapter))
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}
