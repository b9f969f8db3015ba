//! Instance config record handed to the function worker.

use crate::fields::{CONTENT_KEYS, is_sensitive};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;

/// Placeholder rendered in place of sensitive values.
pub const MASK_VALUE: &str = "********";

/// Flat runtime config for one function instance.
///
/// Every field defaults to its zero value. Field names here are the
/// canonical names; see [`crate::FILE_KEYS`] and [`crate::CONTENT_KEYS`] for
/// the keys each document format uses.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
    pub pulsar_service_url: String,
    pub instance_id: i64,
    pub func_id: String,
    pub func_version: String,
    pub max_buf_tuples: i64,
    pub port: i64,
    pub cluster_name: String,
    pub kill_after_idle_ms: u64,

    // function details
    pub tenant: String,
    pub namespace: String,
    pub name: String,
    pub log_topic: String,
    pub processing_guarantees: i32,
    /// Serialized secrets provider map. Masked whenever rendered.
    pub secrets_map: String,
    pub runtime: i32,
    pub auto_ack: bool,
    pub parallelism: i32,

    // source
    pub subscription_type: i32,
    pub timeout_ms: u64,
    pub subscription_name: String,
    pub cleanup_subscription: bool,
    pub source_spec_topic: String,
    pub source_schema_type: String,
    pub is_regex_pattern_subscription: bool,
    pub receiver_queue_size: i32,

    // sink
    pub sink_spec_topic: String,
    pub sink_schema_type: String,

    // resources
    pub cpu: f64,
    pub ram: i64,
    pub disk: i64,

    // retries
    pub max_message_retries: i32,
    pub dead_letter_topic: String,
}

impl InstanceConfig {
    /// Idle period after which the instance shuts itself down.
    pub fn kill_after_idle(&self) -> Duration {
        Duration::from_millis(self.kill_after_idle_ms)
    }

    /// Render the record keyed by content-format names with sensitive
    /// values replaced by [`MASK_VALUE`].
    pub fn masked(&self) -> Value {
        let fields = match serde_json::to_value(self) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => Map::new(),
            Err(err) => {
                warn!("failed to render instance config: {err}");
                Map::new()
            }
        };

        let mut masked = Map::with_capacity(fields.len());
        for (field, value) in fields {
            let key = CONTENT_KEYS
                .key_for(&field)
                .map_or_else(|| field.clone(), str::to_string);
            let value = match value {
                Value::String(text) if is_sensitive(&field) && !text.is_empty() => {
                    Value::String(MASK_VALUE.to_string())
                }
                value => value,
            };
            masked.insert(key, value);
        }
        Value::Object(masked)
    }

    /// Compact JSON form of [`InstanceConfig::masked`].
    pub fn to_masked_string(&self) -> String {
        self.masked().to_string()
    }
}

impl fmt::Debug for InstanceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceConfig {}", self.to_masked_string())
    }
}
