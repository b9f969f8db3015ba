//! Decoders for the two config document formats.

use crate::error::DecodeError;
use crate::fields::{CONTENT_KEYS, FILE_KEYS, FieldKind, KeyMapping, field_kind};
use log::{debug, warn};
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use std::fmt;

/// Decode YAML file contents into a layer keyed by record field names.
///
/// Values are decoded straight from the YAML events against each field's
/// type, so errors keep their line and column. Plain scalars are accepted
/// as text for string fields, and YAML 1.1 boolean words for bool fields.
pub(super) fn decode_file(contents: &[u8]) -> Result<Map<String, Value>, DecodeError> {
    match serde_yaml::from_slice::<FileDocument>(contents)? {
        FileDocument::Mapping(fields) => Ok(fields),
        FileDocument::Empty => Ok(Map::new()),
        FileDocument::Other(found) => Err(DecodeError::NotAMapping {
            expected: "a YAML mapping",
            found,
        }),
    }
}

/// Top-level shape of a config file.
enum FileDocument {
    Mapping(Map<String, Value>),
    Empty,
    Other(&'static str),
}

impl<'de> Deserialize<'de> for FileDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FileDocumentVisitor)
    }
}

struct FileDocumentVisitor;

impl<'de> Visitor<'de> for FileDocumentVisitor {
    type Value = FileDocument;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YAML mapping")
    }

    fn visit_unit<E: de::Error>(self) -> Result<FileDocument, E> {
        Ok(FileDocument::Empty)
    }

    fn visit_none<E: de::Error>(self) -> Result<FileDocument, E> {
        Ok(FileDocument::Empty)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<FileDocument, E> {
        Ok(FileDocument::Other("a boolean"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<FileDocument, E> {
        Ok(FileDocument::Other("a number"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<FileDocument, E> {
        Ok(FileDocument::Other("a number"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<FileDocument, E> {
        Ok(FileDocument::Other("a number"))
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<FileDocument, E> {
        Ok(FileDocument::Other("a string"))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FileDocument, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(FileDocument::Other("a sequence"))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FileDocument, A::Error> {
        let mut fields = Map::new();
        while let Some(key) = map.next_key::<FileKey>()? {
            let key = match key {
                FileKey::Text(key) => key,
                FileKey::Other(found) => {
                    warn!("ignoring config file key that is not a string ({found})");
                    map.next_value::<IgnoredAny>()?;
                    continue;
                }
            };
            let Some((field, kind)) = FILE_KEYS
                .field_for(&key)
                .and_then(|field| field_kind(field).map(|kind| (field, kind)))
            else {
                debug!("ignoring unknown {} config key: {key}", FILE_KEYS.format);
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            if let Some(value) = map.next_value_seed(FieldSeed(kind))? {
                fields.insert(field.to_string(), value);
            }
        }
        Ok(FileDocument::Mapping(fields))
    }
}

/// A mapping key, which YAML allows to be any scalar.
enum FileKey {
    Text(String),
    Other(&'static str),
}

impl<'de> Deserialize<'de> for FileKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FileKeyVisitor)
    }
}

struct FileKeyVisitor;

impl<'de> Visitor<'de> for FileKeyVisitor {
    type Value = FileKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a scalar mapping key")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<FileKey, E> {
        Ok(FileKey::Text(value.to_string()))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<FileKey, E> {
        Ok(FileKey::Other("a boolean"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<FileKey, E> {
        Ok(FileKey::Other("a number"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<FileKey, E> {
        Ok(FileKey::Other("a number"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<FileKey, E> {
        Ok(FileKey::Other("a number"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<FileKey, E> {
        Ok(FileKey::Other("null"))
    }
}

/// Decodes one field value as the type the record expects. `None` for null.
struct FieldSeed(FieldKind);

impl<'de> DeserializeSeed<'de> for FieldSeed {
    type Value = Option<Value>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        let value = match self.0 {
            FieldKind::Text => Option::<String>::deserialize(deserializer)?.map(Value::from),
            FieldKind::Bool => Option::<FileBool>::deserialize(deserializer)?
                .map(|FileBool(flag)| Value::Bool(flag)),
            FieldKind::I32 => Option::<i32>::deserialize(deserializer)?.map(Value::from),
            FieldKind::I64 => Option::<i64>::deserialize(deserializer)?.map(Value::from),
            FieldKind::U64 => Option::<u64>::deserialize(deserializer)?.map(Value::from),
            FieldKind::F64 => Option::<f64>::deserialize(deserializer)?
                .and_then(Number::from_f64)
                .map(Value::Number),
        };
        Ok(value)
    }
}

/// Boolean that also accepts the YAML 1.1 words (`yes`, `off`, ...).
struct FileBool(bool);

impl<'de> Deserialize<'de> for FileBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FileBoolVisitor)
    }
}

struct FileBoolVisitor;

impl<'de> Visitor<'de> for FileBoolVisitor {
    type Value = FileBool;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<FileBool, E> {
        Ok(FileBool(value))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<FileBool, E> {
        match value {
            "y" | "Y" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" | "true" | "True" | "TRUE" => {
                Ok(FileBool(true))
            }
            "n" | "N" | "no" | "No" | "NO" | "off" | "Off" | "OFF" | "false" | "False"
            | "FALSE" => Ok(FileBool(false)),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }
}

/// Decode inline JSON content into a layer keyed by record field names.
pub(super) fn decode_content(content: &str) -> Result<Map<String, Value>, DecodeError> {
    match serde_json::from_str::<Value>(content)? {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(to_fields(map, &CONTENT_KEYS)),
        other => Err(DecodeError::NotAMapping {
            expected: "a JSON object",
            found: json_kind(&other),
        }),
    }
}

/// Rename document keys to record fields, dropping unknown keys and nulls.
///
/// Keys are visited in document order, so the last key folding onto a field
/// wins.
fn to_fields(document: Map<String, Value>, mapping: &KeyMapping) -> Map<String, Value> {
    let mut fields = Map::with_capacity(document.len());
    for (key, value) in document {
        let Some(field) = mapping.field_for(&key) else {
            debug!("ignoring unknown {} config key: {key}", mapping.format);
            continue;
        };
        if value.is_null() {
            continue;
        }
        fields.insert(field.to_string(), value);
    }
    fields
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
