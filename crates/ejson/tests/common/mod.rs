//! Custom types shared by the integration tests.
//!
//! `Address` and `Holder` deliberately produce identical `to_json_value`
//! output so tests can check that adapter identity, not encoded shape,
//! drives equality. `Person` nests a date and another custom value.

use std::any::Any;

use ejson::{CustomType, Ejson, EjsonError, TypeAdapter, Value};
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub city: String,
    pub state: String,
}

impl CustomType for Address {
    fn type_name(&self) -> &str {
        "Address"
    }

    fn to_json_value(&self) -> Value {
        let mut map = IndexMap::new();
        map.insert("city".to_owned(), Value::from(self.city.as_str()));
        map.insert("state".to_owned(), Value::from(self.state.as_str()));
        Value::Object(map)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn CustomType> {
        Box::new(self.clone())
    }
}

fn address_from_value(value: Value) -> Result<Box<dyn CustomType>, EjsonError> {
    let map = value
        .as_object()
        .ok_or_else(|| EjsonError::InvalidArgument("Address payload must be a mapping".into()))?;
    let field = |name: &str| -> Result<String, EjsonError> {
        map.get(name)
            .and_then(|v| v.as_str())
            .map(str::to_owned)
            .ok_or_else(|| EjsonError::InvalidArgument(format!("Address missing {name}")))
    };
    Ok(Box::new(Address {
        city: field("city")?,
        state: field("state")?,
    }))
}

/// Wraps an arbitrary value; its encoded shape can coincide with
/// `Address` while remaining a different type.
#[derive(Debug, Clone)]
pub struct Holder {
    pub content: Value,
}

impl CustomType for Holder {
    fn type_name(&self) -> &str {
        "Holder"
    }

    fn to_json_value(&self) -> Value {
        self.content.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn CustomType> {
        Box::new(self.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub dob_ms: i64,
    pub address: Address,
}

impl CustomType for Person {
    fn type_name(&self) -> &str {
        "Person"
    }

    fn to_json_value(&self) -> Value {
        let mut map = IndexMap::new();
        map.insert("name".to_owned(), Value::from(self.name.as_str()));
        map.insert("dob".to_owned(), Value::Date(self.dob_ms));
        map.insert(
            "address".to_owned(),
            Value::Custom(Box::new(self.address.clone())),
        );
        Value::Object(map)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn CustomType> {
        Box::new(self.clone())
    }
}

fn person_from_value(value: Value) -> Result<Box<dyn CustomType>, EjsonError> {
    let map = value
        .as_object()
        .ok_or_else(|| EjsonError::InvalidArgument("Person payload must be a mapping".into()))?;
    let name = map
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| EjsonError::InvalidArgument("Person missing name".into()))?
        .to_owned();
    let dob_ms = match map.get("dob") {
        Some(Value::Date(ms)) => *ms,
        _ => return Err(EjsonError::InvalidArgument("Person missing dob".into())),
    };
    let address = map
        .get("address")
        .and_then(|v| v.as_custom())
        .and_then(|c| c.as_any().downcast_ref::<Address>())
        .cloned()
        .ok_or_else(|| EjsonError::InvalidArgument("Person missing address".into()))?;
    Ok(Box::new(Person {
        name,
        dob_ms,
        address,
    }))
}

/// A codec with all three test types registered.
pub fn test_codec() -> Ejson {
    let mut ejson = Ejson::new();
    ejson
        .add_type("Address", TypeAdapter::new(address_from_value))
        .unwrap();
    ejson
        .add_type(
            "Holder",
            TypeAdapter::new(|content| Ok(Box::new(Holder { content }) as Box<dyn CustomType>)),
        )
        .unwrap();
    ejson
        .add_type("Person", TypeAdapter::new(person_from_value))
        .unwrap();
    ejson
}
