//! Dynamic value tree produced by leaf parsers and accumulated by the binder.

use std::time::Duration;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use thiserror::Error;

use crate::duration::format_duration;
use crate::types::EnvType;

/// A parsed configuration value before it is converted into its Rust type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent optional value.
    Null,
    Bool(bool),
    /// Any integer; range is checked against the target type on conversion.
    Int(i128),
    Str(String),
    Float(f64),
    Duration(Duration),
    /// Key/value pairs in input order.
    Map(Vec<(Value, Value)>),
    Seq(Vec<Value>),
    /// Named fields of a composite, in declaration order.
    Composite(Fields),
}

impl Value {
    /// Short name of the variant, used in mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Str(_) => "string",
            Value::Float(_) => "float",
            Value::Duration(_) => "duration",
            Value::Map(_) => "map",
            Value::Seq(_) => "sequence",
            Value::Composite(_) => "composite",
        }
    }

    /// Unwraps the fields of a composite value.
    pub fn into_fields(self) -> Result<Fields, ValueError> {
        match self {
            Value::Composite(fields) => Ok(fields),
            other => Err(other.mismatch("composite")),
        }
    }

    pub(crate) fn mismatch(&self, expected: &'static str) -> ValueError {
        ValueError::Mismatch {
            expected,
            found: self.kind_name(),
        }
    }
}

/// Error converting a [`Value`] into a concrete type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("expected {expected} value, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("missing field `{0}`")]
    MissingField(String),
    #[error("integer {value} out of range for {ty}")]
    OutOfRange { value: i128, ty: &'static str },
    #[error("float {value} out of range for {ty}")]
    FloatOutOfRange { value: f64, ty: &'static str },
    #[error("expected {expected} elements, found {found}")]
    Length { expected: usize, found: usize },
    #[error("field `{field}`: {source}")]
    Field {
        field: String,
        #[source]
        source: Box<ValueError>,
    },
}

/// Ordered collection of named field values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(String, Value)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Removes a field and converts it into `T`.
    pub fn take<T: EnvType>(&mut self, name: &str) -> Result<T, ValueError> {
        let pos = self
            .0
            .iter()
            .position(|(n, _)| n == name)
            .ok_or_else(|| ValueError::MissingField(name.to_string()))?;
        let (_, value) = self.0.remove(pos);
        T::from_value(value).map_err(|e| ValueError::Field {
            field: name.to_string(),
            source: Box::new(e),
        })
    }
}

impl<N: Into<String>> FromIterator<(N, Value)> for Fields {
    fn from_iter<I: IntoIterator<Item = (N, Value)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => match i64::try_from(*i) {
                Ok(i) => serializer.serialize_i64(i),
                Err(_) => serializer.serialize_i128(*i),
            },
            Value::Str(s) => serializer.serialize_str(s),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Duration(d) => serializer.serialize_str(&format_duration(*d)),
            Value::Map(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (k, v) in pairs {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Seq(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Composite(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields.iter() {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}
