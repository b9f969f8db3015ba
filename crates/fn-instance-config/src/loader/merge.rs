//! Field-level overlay of decoded layers onto an existing record.

use crate::InstanceConfig;
use crate::error::DecodeError;
use serde_json::{Map, Value};

/// Overwrite the fields present in `layer`, leaving every other field as is.
///
/// The record is only replaced once the merged value decodes cleanly.
pub(super) fn overlay_record(
    record: &mut InstanceConfig,
    layer: Map<String, Value>,
) -> Result<(), DecodeError> {
    let mut merged = serde_json::to_value(&*record).map_err(DecodeError::Schema)?;
    if let Value::Object(fields) = &mut merged {
        fields.extend(layer);
    }
    *record = serde_json::from_value(merged).map_err(DecodeError::Schema)?;
    Ok(())
}
