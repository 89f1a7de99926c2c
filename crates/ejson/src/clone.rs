//! Registry-aware deep clone.

use crate::custom::TypeRegistry;
use crate::encode::MAX_DEPTH;
use crate::error::EjsonError;
use crate::value::Value;

/// Deep copy of `value` with no shared mutable substructure.
///
/// Containers are rebuilt recursively. A custom value uses its
/// adapter's clone hook when one is registered; otherwise it round-trips
/// through `to_json_value` and the adapter's factory, so the copy still
/// matches the same adapter as the original.
pub fn clone_value(registry: &TypeRegistry, value: &Value) -> Result<Value, EjsonError> {
    clone_at(registry, value, 0)
}

fn clone_at(registry: &TypeRegistry, value: &Value, depth: usize) -> Result<Value, EjsonError> {
    if depth > MAX_DEPTH {
        return Err(EjsonError::CircularStructure);
    }
    Ok(match value {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Number(*n),
        Value::String(s) => Value::String(s.clone()),
        Value::Date(ms) => Value::Date(*ms),
        Value::Binary(bytes) => Value::Binary(bytes.clone()),
        Value::RegExp(re) => Value::RegExp(re.clone()),
        Value::Array(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(clone_at(registry, item, depth + 1)?);
            }
            Value::Array(out)
        }
        Value::Object(map) => {
            let mut out = indexmap::IndexMap::with_capacity(map.len());
            for (key, val) in map {
                out.insert(key.clone(), clone_at(registry, val, depth + 1)?);
            }
            Value::Object(out)
        }
        Value::Custom(instance) => {
            let (_, adapter) = registry.lookup_by_instance(instance.as_ref()).ok_or_else(|| {
                EjsonError::UnsupportedValue(format!(
                    "unregistered custom type: {}",
                    instance.type_name()
                ))
            })?;
            match adapter.clone_fn() {
                Some(clone) => Value::Custom(clone(instance.as_ref())),
                None => {
                    let copy = clone_at(registry, &instance.to_json_value(), depth + 1)?;
                    Value::Custom((adapter.factory())(copy)?)
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equal::{equals, EqualsOptions};
    use indexmap::IndexMap;

    fn assert_clone_roundtrips(value: &Value) {
        let registry = TypeRegistry::new();
        let copy = clone_value(&registry, value).unwrap();
        assert!(equals(&registry, value, &copy, EqualsOptions::default()));
    }

    #[test]
    fn clones_scalars() {
        assert_clone_roundtrips(&Value::Null);
        assert_clone_roundtrips(&Value::Number(42.0));
        assert_clone_roundtrips(&Value::from("asdf"));
        assert_clone_roundtrips(&Value::Date(123));
        assert_clone_roundtrips(&Value::Binary(vec![9, 8, 7]));
    }

    #[test]
    fn clones_containers_deeply() {
        let mut inner = IndexMap::new();
        inner.insert("foo".to_owned(), Value::Number(42.0));
        let original = Value::Array(vec![
            Value::Number(1.0),
            Value::from("fasdf"),
            Value::Object(inner),
        ]);
        assert_clone_roundtrips(&original);
    }

    #[test]
    fn clone_is_independent_of_the_original() {
        let registry = TypeRegistry::new();
        let mut map = IndexMap::new();
        map.insert(
            "arr".to_owned(),
            Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]),
        );
        let original = Value::Object(map);

        let mut copy = clone_value(&registry, &original).unwrap();
        if let Value::Object(map) = &mut copy {
            if let Some(Value::Array(items)) = map.get_mut("arr") {
                items.push(Value::Number(3.0));
            }
        }
        assert_eq!(original.as_object().unwrap()["arr"].as_array().unwrap().len(), 2);
        assert!(!equals(&registry, &original, &copy, EqualsOptions::default()));
    }
}
