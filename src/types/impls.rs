//! `EnvType` implementations for std leaf and container types.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};
use std::time::Duration;

use super::{EnvType, Origin, TypeDescriptor};
use crate::value::{Value, ValueError};

impl EnvType for bool {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::leaf("bool", Origin::Bool)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other.mismatch("bool")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl EnvType for String {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::leaf("String", Origin::Str)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(other.mismatch("string")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl EnvType for Duration {
    fn descriptor() -> TypeDescriptor {
        TypeDescriptor::leaf("Duration", Origin::Duration)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Duration(d) => Ok(d),
            other => Err(other.mismatch("duration")),
        }
    }

    fn to_value(&self) -> Value {
        Value::Duration(*self)
    }
}

macro_rules! impl_int {
    ($($t:ty),*) => {
        $(
            impl EnvType for $t {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::leaf(
                        stringify!($t),
                        Origin::Int {
                            min: <$t>::MIN as i128,
                            max: <$t>::MAX as i128,
                        },
                    )
                }

                fn from_value(value: Value) -> Result<Self, ValueError> {
                    match value {
                        Value::Int(i) => <$t>::try_from(i).map_err(|_| ValueError::OutOfRange {
                            value: i,
                            ty: stringify!($t),
                        }),
                        other => Err(other.mismatch("integer")),
                    }
                }

                fn to_value(&self) -> Value {
                    Value::Int(*self as i128)
                }
            }
        )*
    };
}

impl_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_float {
    ($($t:ty),*) => {
        $(
            impl EnvType for $t {
                fn descriptor() -> TypeDescriptor {
                    TypeDescriptor::leaf(
                        stringify!($t),
                        Origin::Float {
                            max: <$t>::MAX as f64,
                        },
                    )
                }

                fn from_value(value: Value) -> Result<Self, ValueError> {
                    match value {
                        Value::Float(f) if f.is_finite() && f.abs() > <$t>::MAX as f64 => {
                            Err(ValueError::FloatOutOfRange {
                                value: f,
                                ty: stringify!($t),
                            })
                        }
                        Value::Float(f) => Ok(f as $t),
                        Value::Int(i) => Ok(i as $t),
                        other => Err(other.mismatch("float")),
                    }
                }

                fn to_value(&self) -> Value {
                    Value::Float(*self as f64)
                }
            }
        )*
    };
}

impl_float!(f32, f64);

impl<T: EnvType> EnvType for Option<T> {
    fn descriptor() -> TypeDescriptor {
        let inner = T::descriptor();
        TypeDescriptor::new(format!("Option<{inner}>"), Origin::Optional, vec![inner])
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

fn sequence_descriptor<T: EnvType>(container: &str) -> TypeDescriptor {
    let element = T::descriptor();
    TypeDescriptor::new(format!("{container}<{element}>"), Origin::Sequence, vec![element])
}

fn sequence_items<T: EnvType, C: FromIterator<T>>(value: Value) -> Result<C, ValueError> {
    match value {
        Value::Seq(items) => items.into_iter().map(T::from_value).collect(),
        other => Err(other.mismatch("sequence")),
    }
}

macro_rules! impl_sequence {
    ($container:ident, $name:literal $(, $bound:path)*) => {
        impl<T: EnvType $(+ $bound)*> EnvType for $container<T> {
            fn descriptor() -> TypeDescriptor {
                sequence_descriptor::<T>($name)
            }

            fn from_value(value: Value) -> Result<Self, ValueError> {
                sequence_items(value)
            }

            fn to_value(&self) -> Value {
                Value::Seq(self.iter().map(EnvType::to_value).collect())
            }
        }
    };
}

impl_sequence!(Vec, "Vec");
impl_sequence!(VecDeque, "VecDeque");
impl_sequence!(BTreeSet, "BTreeSet", Ord);

impl<T, S> EnvType for HashSet<T, S>
where
    T: EnvType + Eq + Hash,
    S: BuildHasher + Default,
{
    fn descriptor() -> TypeDescriptor {
        sequence_descriptor::<T>("HashSet")
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        sequence_items(value)
    }

    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(EnvType::to_value).collect())
    }
}

fn map_descriptor<K: EnvType, V: EnvType>(container: &str) -> TypeDescriptor {
    let key = K::descriptor();
    let value = V::descriptor();
    TypeDescriptor::new(format!("{container}<{key}, {value}>"), Origin::Map, vec![key, value])
}

fn map_entries<K: EnvType, V: EnvType, C: FromIterator<(K, V)>>(
    value: Value,
) -> Result<C, ValueError> {
    match value {
        Value::Map(pairs) => pairs
            .into_iter()
            .map(|(k, v)| Ok::<_, ValueError>((K::from_value(k)?, V::from_value(v)?)))
            .collect(),
        other => Err(other.mismatch("map")),
    }
}

impl<K, V, S> EnvType for HashMap<K, V, S>
where
    K: EnvType + Eq + Hash,
    V: EnvType,
    S: BuildHasher + Default,
{
    fn descriptor() -> TypeDescriptor {
        map_descriptor::<K, V>("HashMap")
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        map_entries(value)
    }

    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect())
    }
}

impl<K: EnvType + Ord, V: EnvType> EnvType for BTreeMap<K, V> {
    fn descriptor() -> TypeDescriptor {
        map_descriptor::<K, V>("BTreeMap")
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        map_entries(value)
    }

    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect())
    }
}

macro_rules! impl_tuple {
    ($len:literal => $($name:ident . $idx:tt),+) => {
        impl<$($name: EnvType),+> EnvType for ($($name,)+) {
            fn descriptor() -> TypeDescriptor {
                let args = vec![$($name::descriptor()),+];
                let names: Vec<&str> = args.iter().map(TypeDescriptor::name).collect();
                TypeDescriptor::new(format!("({})", names.join(", ")), Origin::Tuple, args)
            }

            fn from_value(value: Value) -> Result<Self, ValueError> {
                let items = match value {
                    Value::Seq(items) => items,
                    other => return Err(other.mismatch("sequence")),
                };
                if items.len() != $len {
                    return Err(ValueError::Length {
                        expected: $len,
                        found: items.len(),
                    });
                }
                let mut items = items.into_iter();
                Ok(($(
                    $name::from_value(items.next().ok_or(ValueError::Length {
                        expected: $len,
                        found: $idx,
                    })?)?,
                )+))
            }

            fn to_value(&self) -> Value {
                Value::Seq(vec![$(self.$idx.to_value()),+])
            }
        }
    };
}

impl_tuple!(1 => A.0);
impl_tuple!(2 => A.0, B.1);
impl_tuple!(3 => A.0, B.1, C.2);
impl_tuple!(4 => A.0, B.1, C.2, D.3);
impl_tuple!(5 => A.0, B.1, C.2, D.3, E.4);
impl_tuple!(6 => A.0, B.1, C.2, D.3, E.4, F.5);
