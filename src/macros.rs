//! Declarative macro for configuration structs.

/// Declares a configuration struct and implements [`EnvType`](crate::EnvType)
/// and [`EnvConfig`](crate::EnvConfig) for it.
///
/// A field may carry a default after `=`. An optional trailing
/// `keys { field => "KEY" }` block reads those fields from the given keys
/// verbatim, ignoring any prefix.
///
/// ```
/// use std::collections::HashMap;
/// use std::time::Duration;
///
/// envc::env_config! {
///     #[derive(Debug, Clone, PartialEq)]
///     pub struct Database {
///         pub host: String,
///         pub port: u16 = 5432,
///         pub timeout: Duration = Duration::from_secs(5),
///     }
///     keys {
///         port => "PGPORT",
///     }
/// }
///
/// let env = HashMap::from([
///     ("DB_HOST".to_string(), "localhost".to_string()),
///     ("PGPORT".to_string(), "6432".to_string()),
/// ]);
/// let db: Database = envc::Loader::new().prefix("db").source(env).load().unwrap();
/// assert_eq!(db.host, "localhost");
/// assert_eq!(db.port, 6432);
/// assert_eq!(db.timeout, Duration::from_secs(5));
/// ```
#[macro_export]
macro_rules! env_config {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(= $default:expr)?
            ),* $(,)?
        }
        $(
            keys {
                $($key_field:ident => $key:expr),* $(,)?
            }
        )?
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::EnvType for $name {
            fn descriptor() -> $crate::TypeDescriptor {
                $crate::TypeDescriptor::composite(
                    ::std::stringify!($name),
                    <$name as $crate::EnvConfig>::schema,
                )
            }

            #[allow(unused_mut, unused_variables)]
            fn from_value(
                value: $crate::Value,
            ) -> ::std::result::Result<Self, $crate::ValueError> {
                let mut fields = value.into_fields()?;
                ::std::result::Result::Ok(Self {
                    $($field: fields.take::<$ty>(::std::stringify!($field))?,)*
                })
            }

            #[allow(unused_mut)]
            fn to_value(&self) -> $crate::Value {
                let mut fields = $crate::Fields::new();
                $(
                    fields.insert(
                        ::std::stringify!($field),
                        $crate::EnvType::to_value(&self.$field),
                    );
                )*
                $crate::Value::Composite(fields)
            }
        }

        impl $crate::EnvConfig for $name {
            fn schema() -> $crate::Schema {
                $crate::Schema::new(::std::stringify!($name))
                    $(
                        .field(
                            $crate::Field::of::<$ty>(::std::stringify!($field))
                                $(.with_default::<$ty>($default))?
                        )
                    )*
                    $($(.key(::std::stringify!($key_field), $key))*)?
            }
        }
    };
}
