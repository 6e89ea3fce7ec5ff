//! Field lists of composite configuration types.

use std::borrow::Cow;

use crate::types::{EnvType, Kind, TypeDescriptor};
use crate::value::Value;

/// A single declared field of a composite type.
#[derive(Debug, Clone)]
pub struct Field {
    name: Cow<'static, str>,
    ty: TypeDescriptor,
    default: Option<Value>,
}

impl Field {
    /// Optional fields default to `None` unless given another default.
    pub fn new(name: impl Into<Cow<'static, str>>, ty: TypeDescriptor) -> Self {
        let default = (ty.kind() == Kind::Optional).then_some(Value::Null);
        Self {
            name: name.into(),
            ty,
            default,
        }
    }

    pub fn of<T: EnvType>(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, T::descriptor())
    }

    pub fn with_default<T: EnvType>(self, value: T) -> Self {
        self.with_default_value(value.to_value())
    }

    pub fn with_default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &TypeDescriptor {
        &self.ty
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Ordered fields of a composite type plus its explicit key overrides.
#[derive(Debug, Clone)]
pub struct Schema {
    name: Cow<'static, str>,
    fields: Vec<Field>,
    keys: Vec<(String, String)>,
}

impl Schema {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            keys: Vec::new(),
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Reads `field` from `key` verbatim: no prefix, no case change.
    pub fn key(mut self, field: impl Into<String>, key: impl Into<String>) -> Self {
        let field = field.into();
        let key = key.into();
        match self.keys.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = key,
            None => self.keys.push((field, key)),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn key_for(&self, field: &str) -> Option<&str> {
        self.keys
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, k)| k.as_str())
    }
}
