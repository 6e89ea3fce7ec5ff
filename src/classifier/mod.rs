//! Type classification: which parser handles a declared type, if any.
//!
//! A classifier looks at a [`TypeDescriptor`] and either hands back a parser
//! from a raw string to a [`Value`], or tells the binder to recurse into the
//! type as a composite.

use std::fmt;

use tracing::trace;

use crate::boolean::parse_bool;
use crate::duration::parse_duration;
use crate::error::{CastError, ConfigError};
use crate::types::{Kind, Origin, TypeDescriptor};
use crate::value::Value;

/// Converts a raw environment string into a value.
pub type Parser = Box<dyn Fn(&str) -> Result<Value, CastError> + Send + Sync>;

/// Outcome of classifying a type.
pub enum Classification {
    /// The type is parsed directly from a single variable.
    Leaf(Parser),
    /// The type is not a leaf; bind its fields instead.
    Recurse,
}

impl fmt::Debug for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Leaf(_) => f.write_str("Leaf(..)"),
            Classification::Recurse => f.write_str("Recurse"),
        }
    }
}

/// Resolves the parser for a type.
///
/// Closures with the matching signature are classifiers too, so a custom
/// classifier can handle a few types and defer the rest to
/// [`DefaultClassifier`].
pub trait Classify {
    fn classify(&self, ty: &TypeDescriptor) -> Result<Classification, ConfigError>;
}

impl<F> Classify for F
where
    F: Fn(&TypeDescriptor) -> Result<Classification, ConfigError>,
{
    fn classify(&self, ty: &TypeDescriptor) -> Result<Classification, ConfigError> {
        self(ty)
    }
}

/// Classifier for the built-in leaf kinds.
///
/// Maps are written as `key:value,key:value`, sequences and tuples as
/// `a,b,c`. Both separators can be changed.
#[derive(Debug, Clone)]
pub struct DefaultClassifier {
    item_separator: String,
    pair_separator: String,
}

impl Default for DefaultClassifier {
    fn default() -> Self {
        Self {
            item_separator: ",".to_string(),
            pair_separator: ":".to_string(),
        }
    }
}

impl DefaultClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item_separator(mut self, separator: impl Into<String>) -> Self {
        self.item_separator = separator.into();
        self
    }

    pub fn with_pair_separator(mut self, separator: impl Into<String>) -> Self {
        self.pair_separator = separator.into();
        self
    }

    /// Parser for a container element. Missing type arguments mean `String`.
    ///
    /// An empty item of an optional element type is `None`.
    fn element(&self, ty: Option<&TypeDescriptor>) -> Result<Parser, ConfigError> {
        let Some(ty) = ty else {
            return Ok(Box::new(parse_str));
        };
        match self.classify(ty)? {
            Classification::Leaf(parser) if ty.kind() == Kind::Optional => {
                Ok(Box::new(move |s: &str| {
                    if s.is_empty() {
                        Ok(Value::Null)
                    } else {
                        parser(s)
                    }
                }))
            }
            Classification::Leaf(parser) => Ok(parser),
            Classification::Recurse => Err(ConfigError::UnsupportedType {
                ty: ty.name().to_string(),
            }),
        }
    }

    fn map_parser(&self, ty: &TypeDescriptor) -> Result<Parser, ConfigError> {
        let key = self.element(ty.arg(0))?;
        let value = self.element(ty.arg(1))?;
        let items = self.item_separator.clone();
        let pair = self.pair_separator.clone();

        Ok(Box::new(move |s: &str| {
            split_items(s, &items)
                .map(|item| {
                    let (k, v) = item.split_once(pair.as_str()).ok_or_else(|| CastError::MapItem {
                        item: item.to_string(),
                        separator: pair.clone(),
                    })?;
                    Ok::<_, CastError>((cast_item(&key, k)?, cast_item(&value, v)?))
                })
                .collect::<Result<Vec<_>, CastError>>()
                .map(Value::Map)
        }))
    }

    fn sequence_parser(&self, ty: &TypeDescriptor) -> Result<Parser, ConfigError> {
        let element = self.element(ty.arg(0))?;
        let items = self.item_separator.clone();

        Ok(Box::new(move |s: &str| {
            split_items(s, &items)
                .map(|item| cast_item(&element, item))
                .collect::<Result<Vec<_>, CastError>>()
                .map(Value::Seq)
        }))
    }

    fn tuple_parser(&self, ty: &TypeDescriptor) -> Result<Parser, ConfigError> {
        if !ty.is_fixed_tuple() {
            return self.sequence_parser(ty);
        }
        let elements = ty
            .args()
            .iter()
            .map(|arg| self.element(Some(arg)))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        let items = self.item_separator.clone();

        Ok(Box::new(move |s: &str| {
            let raw: Vec<&str> = s.split(items.as_str()).collect();
            if raw.len() != elements.len() {
                return Err(CastError::TupleLength {
                    expected: elements.len(),
                    actual: raw.len(),
                });
            }
            elements
                .iter()
                .zip(raw)
                .map(|(element, item)| cast_item(element, item))
                .collect::<Result<Vec<_>, CastError>>()
                .map(Value::Seq)
        }))
    }
}

impl Classify for DefaultClassifier {
    fn classify(&self, ty: &TypeDescriptor) -> Result<Classification, ConfigError> {
        trace!(ty = %ty, kind = ?ty.kind(), "classifying type");

        let parser: Parser = match ty.origin() {
            Origin::Postponed => {
                return Err(ConfigError::Postponed {
                    ty: ty.name().to_string(),
                });
            }
            Origin::Bool => Box::new(|s: &str| parse_bool(s).map(Value::Bool)),
            Origin::Int { min, max } => Box::new(move |s: &str| parse_int(s, min, max)),
            Origin::Str => Box::new(parse_str),
            Origin::Float { max } => Box::new(move |s: &str| parse_float(s, max)),
            Origin::Duration => Box::new(|s: &str| parse_duration(s).map(Value::Duration)),
            Origin::Map => self.map_parser(ty)?,
            Origin::Sequence => self.sequence_parser(ty)?,
            Origin::Tuple => self.tuple_parser(ty)?,
            Origin::Optional => match ty.arg(0) {
                None => Box::new(parse_str),
                Some(inner) => match self.classify(inner)? {
                    Classification::Leaf(parser) => parser,
                    Classification::Recurse => {
                        return Err(ConfigError::UnsupportedType {
                            ty: ty.name().to_string(),
                        });
                    }
                },
            },
            Origin::Composite(_) | Origin::Opaque => return Ok(Classification::Recurse),
        };
        Ok(Classification::Leaf(parser))
    }
}

fn parse_str(s: &str) -> Result<Value, CastError> {
    Ok(Value::Str(s.to_string()))
}

fn parse_int(s: &str, min: i128, max: i128) -> Result<Value, CastError> {
    let n: i128 = s.trim().parse()?;
    if n < min || n > max {
        return Err(CastError::IntRange);
    }
    Ok(Value::Int(n))
}

/// Accepts a decimal comma as well as a decimal point.
///
/// Finite input beyond `max` is rejected instead of narrowing to infinity.
fn parse_float(s: &str, max: f64) -> Result<Value, CastError> {
    let f: f64 = s.trim().replace(',', ".").parse()?;
    if f.is_finite() && f.abs() > max {
        return Err(CastError::FloatRange);
    }
    Ok(Value::Float(f))
}

/// Splits a container string into items. An empty string has no items.
fn split_items<'a>(s: &'a str, separator: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    s.split(separator).filter(move |_| !s.is_empty())
}

fn cast_item(parser: &Parser, item: &str) -> Result<Value, CastError> {
    parser(item).map_err(|e| CastError::Item {
        item: item.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests;
