//! Type descriptors: what the classifier knows about a field's declared type.

mod impls;

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

use crate::schema::Schema;
use crate::value::{Value, ValueError};

/// Generic origin of a type, with the type arguments kept separately on the
/// [`TypeDescriptor`].
#[derive(Debug, Clone, Copy)]
pub enum Origin {
    Bool,
    /// Integer with the inclusive range of the target type.
    Int { min: i128, max: i128 },
    Str,
    /// Float with the largest finite magnitude of the target type.
    Float { max: f64 },
    Duration,
    /// Arguments: key, value.
    Map,
    /// Homogeneous sequence or set. Argument: element.
    Sequence,
    /// Fixed-arity tuple. Arguments: one per position.
    Tuple,
    /// Argument: inner type.
    Optional,
    /// Named fields described by a schema.
    Composite(fn() -> Schema),
    /// A reference to a type by name that was never resolved.
    Postponed,
    /// A type that is neither a leaf nor a composite.
    Opaque,
}

/// Closed set of kinds the classifier dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Bool,
    Int,
    Str,
    Float,
    Duration,
    Map,
    Sequence,
    Optional,
    Composite,
    Postponed,
    Unsupported,
}

/// Describes a declared type: display name, origin and type arguments.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    name: Cow<'static, str>,
    origin: Origin,
    args: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<Cow<'static, str>>, origin: Origin, args: Vec<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            origin,
            args,
        }
    }

    /// Descriptor without type arguments.
    pub fn leaf(name: impl Into<Cow<'static, str>>, origin: Origin) -> Self {
        Self::new(name, origin, Vec::new())
    }

    pub fn of<T: EnvType>() -> Self {
        T::descriptor()
    }

    pub fn composite(name: impl Into<Cow<'static, str>>, schema: fn() -> Schema) -> Self {
        Self::leaf(name, Origin::Composite(schema))
    }

    /// A type known only by name, which cannot be introspected.
    pub fn postponed(name: impl Into<Cow<'static, str>>) -> Self {
        Self::leaf(name, Origin::Postponed)
    }

    pub fn opaque(name: impl Into<Cow<'static, str>>) -> Self {
        Self::leaf(name, Origin::Opaque)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn args(&self) -> &[TypeDescriptor] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> Option<&TypeDescriptor> {
        self.args.get(index)
    }

    pub fn kind(&self) -> Kind {
        match self.origin {
            Origin::Bool => Kind::Bool,
            Origin::Int { .. } => Kind::Int,
            Origin::Str => Kind::Str,
            Origin::Float { .. } => Kind::Float,
            Origin::Duration => Kind::Duration,
            Origin::Map => Kind::Map,
            Origin::Sequence | Origin::Tuple => Kind::Sequence,
            Origin::Optional => Kind::Optional,
            Origin::Composite(_) => Kind::Composite,
            Origin::Postponed => Kind::Postponed,
            Origin::Opaque => Kind::Unsupported,
        }
    }

    /// True for tuples declaring an explicit positional type per element.
    pub fn is_fixed_tuple(&self) -> bool {
        matches!(self.origin, Origin::Tuple) && !self.args.is_empty()
    }

    /// Schema of a composite type.
    pub fn schema(&self) -> Option<Schema> {
        match self.origin {
            Origin::Composite(schema) => Some(schema()),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A type that can be described, built from a [`Value`] and turned back into one.
///
/// Implemented for the supported leaf and container types; composites get an
/// implementation from [`env_config!`](crate::env_config).
pub trait EnvType: Sized {
    fn descriptor() -> TypeDescriptor;

    fn from_value(value: Value) -> Result<Self, ValueError>;

    /// Used to turn declared defaults into values the binder can merge.
    fn to_value(&self) -> Value;
}

/// A composite configuration type with named fields.
pub trait EnvConfig: EnvType {
    fn schema() -> Schema;
}
