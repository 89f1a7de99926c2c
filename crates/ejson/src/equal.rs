//! Deep structural equality over EJSON values.

use crate::custom::TypeRegistry;
use crate::encode::MAX_DEPTH;
use crate::value::Value;

/// Options for [`equals`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualsOptions {
    /// When set, two mappings are equal only if their keys also iterate
    /// in the same order. Off by default.
    pub key_order_sensitive: bool,
}

/// Deep equality between two values.
///
/// `NaN` equals `NaN`, the infinities equal only themselves, sequences
/// and mappings are never equal to each other, and custom values are
/// equal only when both resolve to the same registered adapter — two
/// different types whose encoded shapes coincide stay unequal.
///
/// Comparison shares the encoder's recursion budget: a custom type
/// whose `to_json_value` expands without bound compares unequal instead
/// of overflowing the stack. No encodable value is that deep.
pub fn equals(registry: &TypeRegistry, a: &Value, b: &Value, options: EqualsOptions) -> bool {
    equals_at(registry, a, b, options, 0)
}

fn equals_at(
    registry: &TypeRegistry,
    a: &Value,
    b: &Value,
    options: EqualsOptions,
    depth: usize,
) -> bool {
    if depth > MAX_DEPTH {
        return false;
    }
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => {
            if a.is_nan() && b.is_nan() {
                return true;
            }
            a == b
        }
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Date(a), Value::Date(b)) => a == b,
        (Value::Binary(a), Value::Binary(b)) => a == b,
        (Value::RegExp(a), Value::RegExp(b)) => a == b,

        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|(x, y)| equals_at(registry, x, y, options, depth + 1))
        }

        (Value::Object(a), Value::Object(b)) => {
            if a.len() != b.len() {
                return false;
            }
            if options.key_order_sensitive {
                a.iter().zip(b).all(|((ka, va), (kb, vb))| {
                    ka == kb && equals_at(registry, va, vb, options, depth + 1)
                })
            } else {
                a.iter().all(|(key, va)| match b.get(key) {
                    Some(vb) => equals_at(registry, va, vb, options, depth + 1),
                    None => false,
                })
            }
        }

        (Value::Custom(a), Value::Custom(b)) => {
            let Some((name_a, adapter)) = registry.lookup_by_instance(a.as_ref()) else {
                return false;
            };
            let Some((name_b, _)) = registry.lookup_by_instance(b.as_ref()) else {
                return false;
            };
            // Adapter identity first; shape coincidence is not equality.
            if name_a != name_b {
                return false;
            }
            match adapter.equals_fn() {
                Some(eq) => eq(a.as_ref(), b.as_ref()),
                None => equals_at(
                    registry,
                    &a.to_json_value(),
                    &b.to_json_value(),
                    options,
                    depth + 1,
                ),
            }
        }

        // Kind mismatches, including Sequence vs Mapping, are never equal.
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::RegExpValue;
    use indexmap::IndexMap;

    fn eq(a: &Value, b: &Value) -> bool {
        equals(&TypeRegistry::new(), a, b, EqualsOptions::default())
    }

    fn eq_strict(a: &Value, b: &Value) -> bool {
        equals(
            &TypeRegistry::new(),
            a,
            b,
            EqualsOptions {
                key_order_sensitive: true,
            },
        )
    }

    fn obj(pairs: &[(&str, Value)]) -> Value {
        let mut map = IndexMap::new();
        for (key, val) in pairs {
            map.insert((*key).to_owned(), val.clone());
        }
        Value::Object(map)
    }

    #[test]
    fn no_cross_kind_coercion() {
        assert!(!eq(&Value::Number(1.0), &Value::Bool(true)));
        assert!(!eq(&Value::Number(0.0), &Value::Bool(false)));
        assert!(!eq(&Value::Number(0.0), &Value::Null));
        assert!(!eq(&Value::from(""), &Value::Null));
        assert!(!eq(&Value::from("foo"), &Value::Null));
    }

    #[test]
    fn nan_equals_nan() {
        assert!(eq(&Value::Number(f64::NAN), &Value::Number(f64::NAN)));
        assert!(!eq(&Value::Number(f64::NAN), &Value::Number(0.0)));
    }

    #[test]
    fn infinities_equal_only_themselves() {
        let inf = Value::Number(f64::INFINITY);
        let neg_inf = Value::Number(f64::NEG_INFINITY);
        assert!(eq(&inf, &Value::Number(f64::INFINITY)));
        assert!(eq(&neg_inf, &Value::Number(f64::NEG_INFINITY)));
        assert!(!eq(&inf, &neg_inf));
        assert!(!eq(&inf, &Value::Number(f64::NAN)));
        assert!(!eq(&inf, &Value::Number(0.0)));
    }

    #[test]
    fn sequence_never_equals_mapping() {
        let seq = Value::Array(vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0),
            Value::Number(4.0),
        ]);
        let map = obj(&[
            ("0", Value::Number(1.0)),
            ("1", Value::Number(2.0)),
            ("2", Value::Number(3.0)),
            ("3", Value::Number(4.0)),
        ]);
        assert!(!eq(&seq, &map));
        assert!(!eq(&map, &seq));
        assert!(!eq(&obj(&[]), &Value::Array(vec![])));
        assert!(!eq(&Value::Array(vec![]), &obj(&[])));
    }

    #[test]
    fn mapping_equality_ignores_key_order_by_default() {
        let a = obj(&[("a", Value::Number(1.0)), ("b", Value::from("2"))]);
        let b = obj(&[("b", Value::from("2")), ("a", Value::Number(1.0))]);
        assert!(eq(&a, &b));
    }

    #[test]
    fn mapping_equality_checks_key_sets() {
        let a = obj(&[("a", Value::Number(1.0)), ("b", Value::Number(2.0))]);
        let b = obj(&[("a", Value::Number(1.0)), ("c", Value::Number(2.0))]);
        assert!(!eq(&a, &b));
        assert!(!eq(&obj(&[("a", obj(&[]))]), &obj(&[("a", obj(&[("b", Value::Number(2.0))]))])));
    }

    #[test]
    fn key_order_sensitive_mode() {
        let nested_a = obj(&[
            ("a", obj(&[("b", Value::Number(1.0)), ("c", Value::Number(2.0))])),
            ("d", obj(&[("e", Value::Number(3.0)), ("f", Value::Number(4.0))])),
        ]);
        let nested_reordered = obj(&[
            ("d", obj(&[("f", Value::Number(4.0)), ("e", Value::Number(3.0))])),
            ("a", obj(&[("c", Value::Number(2.0)), ("b", Value::Number(1.0))])),
        ]);
        assert!(eq(&nested_a, &nested_reordered));
        assert!(!eq_strict(&nested_a, &nested_reordered));

        // Top-level reorder alone is enough to break strict equality
        let top_reordered = obj(&[
            ("d", obj(&[("e", Value::Number(3.0)), ("f", Value::Number(4.0))])),
            ("a", obj(&[("b", Value::Number(1.0)), ("c", Value::Number(2.0))])),
        ]);
        assert!(!eq_strict(&nested_a, &top_reordered));
        assert!(eq_strict(&nested_a, &nested_a.clone()));
    }

    #[test]
    fn extension_values_compare_structurally() {
        assert!(eq(&Value::Date(5), &Value::Date(5)));
        assert!(!eq(&Value::Date(5), &Value::Date(6)));
        assert!(!eq(&Value::Date(5), &Value::Number(5.0)));
        assert!(eq(&Value::Binary(vec![1, 2]), &Value::Binary(vec![1, 2])));
        assert!(!eq(&Value::Binary(vec![1, 2]), &Value::Binary(vec![1, 3])));
        assert!(eq(
            &Value::RegExp(RegExpValue::new("a", "i")),
            &Value::RegExp(RegExpValue::new("a", "i")),
        ));
        assert!(!eq(
            &Value::RegExp(RegExpValue::new("a", "i")),
            &Value::RegExp(RegExpValue::new("a", "m")),
        ));
    }
}
