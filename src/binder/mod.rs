//! Recursive binding of composite types to environment values.

use tracing::{debug, trace};

use crate::classifier::{Classification, Classify, DefaultClassifier, Parser};
use crate::error::ConfigError;
use crate::schema::{Field, Schema};
use crate::source::{Env, Source};
use crate::types::{EnvConfig, Origin, TypeDescriptor};
use crate::value::{Fields, Value};

/// Loads configuration types from a [`Source`].
///
/// Holds no state between loads, so one loader can be reused.
#[derive(Debug, Clone)]
pub struct Loader<C = DefaultClassifier, S = Env> {
    prefix: String,
    classifier: C,
    source: S,
}

impl Loader {
    /// Reads the process environment with the default classifier and no prefix.
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            classifier: DefaultClassifier::default(),
            source: Env,
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Classify, S: Source> Loader<C, S> {
    /// Prefix for every key that is not overridden, joined with `_`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn classifier<C2: Classify>(self, classifier: C2) -> Loader<C2, S> {
        Loader {
            prefix: self.prefix,
            classifier,
            source: self.source,
        }
    }

    pub fn source<S2: Source>(self, source: S2) -> Loader<C, S2> {
        Loader {
            prefix: self.prefix,
            classifier: self.classifier,
            source,
        }
    }

    /// Binds `T` and returns the value tree without building `T`.
    pub fn resolve<T: EnvConfig>(&self) -> Result<Value, ConfigError> {
        let schema = T::schema();
        bind(&schema, &self.prefix, &self.classifier, &self.source, None).map(Value::Composite)
    }

    pub fn load<T: EnvConfig>(&self) -> Result<T, ConfigError> {
        let value = self.resolve::<T>()?;
        T::from_value(value).map_err(|source| ConfigError::Construct {
            ty: T::descriptor().name().to_string(),
            source,
        })
    }
}

/// Key a field is read from (leaf) or that prefixes its sub-fields (composite).
pub(crate) fn resolve_key(schema: &Schema, field: &str, prefix: &str) -> String {
    if let Some(key) = schema.key_for(field) {
        return key.to_string();
    }
    if prefix.is_empty() {
        field.to_uppercase()
    } else {
        format!("{prefix}_{field}").to_uppercase()
    }
}

/// Binds every field of `schema`.
///
/// `base` holds the fields of a default instance of this composite; its
/// values win over the schema's declared defaults.
pub(crate) fn bind(
    schema: &Schema,
    prefix: &str,
    classifier: &dyn Classify,
    source: &dyn Source,
    base: Option<&Fields>,
) -> Result<Fields, ConfigError> {
    let mut fields = Fields::new();
    for field in schema.fields() {
        let key = resolve_key(schema, field.name(), prefix);
        let default = merge_default(field, base);

        let value = match classifier.classify(field.ty())? {
            Classification::Leaf(parser) => bind_leaf(&key, field.ty(), &parser, default, source)?,
            Classification::Recurse => {
                bind_composite(&key, field.ty(), classifier, source, default)?
            }
        };
        fields.insert(field.name(), value);
    }
    Ok(fields)
}

fn merge_default(field: &Field, base: Option<&Fields>) -> Option<Value> {
    base.and_then(|base| base.get(field.name()))
        .or_else(|| field.default())
        .cloned()
}

fn bind_leaf(
    key: &str,
    ty: &TypeDescriptor,
    parser: &Parser,
    default: Option<Value>,
    source: &dyn Source,
) -> Result<Value, ConfigError> {
    let Some(raw) = source.get(key) else {
        return match default {
            Some(value) => {
                debug!(key, "using default");
                Ok(value)
            }
            None => Err(ConfigError::Missing {
                key: key.to_string(),
            }),
        };
    };

    debug!(key, "read from source");
    parser(&raw).map_err(|source| ConfigError::Cast {
        key: key.to_string(),
        raw,
        ty: ty.name().to_string(),
        source,
    })
}

fn bind_composite(
    key: &str,
    ty: &TypeDescriptor,
    classifier: &dyn Classify,
    source: &dyn Source,
    default: Option<Value>,
) -> Result<Value, ConfigError> {
    match ty.origin() {
        Origin::Composite(schema) => {
            trace!(prefix = key, ty = %ty, "binding nested composite");
            let base = match default {
                Some(Value::Composite(fields)) => Some(fields),
                _ => None,
            };
            bind(&schema(), key, classifier, source, base.as_ref()).map(Value::Composite)
        }
        Origin::Postponed => Err(ConfigError::Postponed {
            ty: ty.name().to_string(),
        }),
        _ => Err(ConfigError::UnsupportedType {
            ty: ty.name().to_string(),
        }),
    }
}
