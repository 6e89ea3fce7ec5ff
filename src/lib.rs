//! Loads typed configuration from environment variables.
//!
//! Each field's parser is picked from its declared type: booleans, integers,
//! strings, floats, durations, maps, sequences and tuples are parsed from a
//! single variable, nested configuration structs are bound field by field
//! under the parent field's key.
//!
//! Keys are the upper-cased field path joined with `_`: field `host` of a
//! nested `database` field is read from `DATABASE_HOST`, or from
//! `APP_DATABASE_HOST` when loading with prefix `app`.
//!
//! ```
//! use std::collections::BTreeMap;
//! use std::time::Duration;
//!
//! envc::env_config! {
//!     #[derive(Debug)]
//!     pub struct Connection {
//!         pub timeout: Duration,
//!     }
//! }
//!
//! envc::env_config! {
//!     #[derive(Debug)]
//!     pub struct Config {
//!         pub rate: f64,
//!         pub connection: Connection,
//!         pub debug: bool = false,
//!     }
//! }
//!
//! let env = BTreeMap::from([
//!     ("RATE".to_string(), "4,2".to_string()),
//!     ("CONNECTION_TIMEOUT".to_string(), "1m2s".to_string()),
//! ]);
//! let config: Config = envc::Loader::new().source(env).load().unwrap();
//! assert_eq!(config.rate, 4.2);
//! assert_eq!(config.connection.timeout, Duration::from_secs(62));
//! assert!(!config.debug);
//! ```

mod binder;
mod boolean;
mod classifier;
mod duration;
mod error;
mod macros;
mod schema;
pub mod source;
mod types;
mod value;

pub use binder::Loader;
pub use boolean::parse_bool;
pub use classifier::{Classification, Classify, DefaultClassifier, Parser};
pub use duration::{format_duration, parse_duration};
pub use error::{CastError, ConfigError, Reason};
pub use schema::{Field, Schema};
pub use source::{Env, Source};
pub use types::{EnvConfig, EnvType, Kind, Origin, TypeDescriptor};
pub use value::{Fields, Value, ValueError};

/// Loads `T` from the process environment.
pub fn load<T: EnvConfig>() -> Result<T, ConfigError> {
    Loader::new().load()
}

/// Loads `T` from the process environment with every key prefixed by `prefix`.
pub fn load_with_prefix<T: EnvConfig>(prefix: &str) -> Result<T, ConfigError> {
    Loader::new().prefix(prefix).load()
}
