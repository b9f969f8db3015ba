//! Instance config resolution for the function worker.
//!
//! The worker reads its runtime config from a YAML file
//! (`-instance-conf-path`, defaulting to a location under the home
//! directory) and/or an inline JSON document (`-instance-conf`). When both
//! are given the inline content overrides the file field by field.

mod default_path;
mod error;
mod fields;
mod loader;
mod model;
mod source;

/// Default config file location helpers.
pub use default_path::{
    DEFAULT_CONFIG_RELATIVE_PATH, default_config_path, default_config_path_for,
};
/// Public error types returned by config resolution.
pub use error::{ConfigError, DecodeError};
/// Per-format key tables.
pub use fields::{
    CONTENT_KEYS, DocumentFormat, FILE_KEYS, FieldKind, KeyMapping, SENSITIVE_FIELDS,
    field_kind, is_sensitive,
};
/// Config record.
pub use model::{InstanceConfig, MASK_VALUE};
/// Command-line config source.
pub use source::ConfigSource;
