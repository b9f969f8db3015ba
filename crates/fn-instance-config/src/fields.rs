//! Per-format key tables for `InstanceConfig` fields.
//!
//! The file (YAML) and content (JSON) documents each carry their own key
//! names. Both tables map a document key to the record's field name; the
//! decoder never assumes the two tables agree.

use std::fmt;

/// Which external document a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// On-disk YAML config file.
    File,
    /// Inline JSON config content.
    Content,
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::File => f.write_str("file"),
            DocumentFormat::Content => f.write_str("content"),
        }
    }
}

/// Document key to record field table for one format.
#[derive(Debug, Clone, Copy)]
pub struct KeyMapping {
    /// Format this table applies to.
    pub format: DocumentFormat,
    /// `(document key, record field)` pairs.
    entries: &'static [(&'static str, &'static str)],
    /// Fall back to ASCII case-insensitive key matching.
    fold_case: bool,
}

impl KeyMapping {
    /// Resolve a document key to the record field it populates.
    ///
    /// Exact matches win; case-folded matches are only tried for formats
    /// that allow them.
    pub fn field_for(&self, key: &str) -> Option<&'static str> {
        if let Some((_, field)) = self.entries.iter().find(|(name, _)| *name == key) {
            return Some(field);
        }
        if !self.fold_case {
            return None;
        }
        self.entries
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, field)| *field)
    }

    /// Document key used for a record field.
    pub fn key_for(&self, field: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, name)| *name == field)
            .map(|(key, _)| *key)
    }

    /// All `(document key, record field)` pairs.
    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }
}

/// Keys accepted in the YAML config file. Matching is case-sensitive.
pub const FILE_KEYS: KeyMapping = KeyMapping {
    format: DocumentFormat::File,
    fold_case: false,
    entries: &[
        ("pulsarServiceURL", "pulsar_service_url"),
        ("instanceID", "instance_id"),
        ("funcID", "func_id"),
        ("funcVersion", "func_version"),
        ("maxBufTuples", "max_buf_tuples"),
        ("port", "port"),
        ("clusterName", "cluster_name"),
        ("killAfterIdleMs", "kill_after_idle_ms"),
        ("tenant", "tenant"),
        ("nameSpace", "namespace"),
        ("name", "name"),
        ("logTopic", "log_topic"),
        ("processingGuarantees", "processing_guarantees"),
        ("secretsMap", "secrets_map"),
        ("runtime", "runtime"),
        ("autoAck", "auto_ack"),
        ("parallelism", "parallelism"),
        ("subscriptionType", "subscription_type"),
        ("timeoutMs", "timeout_ms"),
        ("subscriptionName", "subscription_name"),
        ("cleanupSubscription", "cleanup_subscription"),
        ("sourceSpecsTopic", "source_spec_topic"),
        ("sourceSchemaType", "source_schema_type"),
        ("isRegexPatternSubscription", "is_regex_pattern_subscription"),
        ("receiverQueueSize", "receiver_queue_size"),
        ("sinkSpecsTopic", "sink_spec_topic"),
        ("sinkSchemaType", "sink_schema_type"),
        ("cpu", "cpu"),
        ("ram", "ram"),
        ("disk", "disk"),
        ("maxMessageRetries", "max_message_retries"),
        ("deadLetterTopic", "dead_letter_topic"),
    ],
};

/// Keys accepted in inline JSON content. Unmatched keys retry ignoring case.
pub const CONTENT_KEYS: KeyMapping = KeyMapping {
    format: DocumentFormat::Content,
    fold_case: true,
    entries: &[
        ("pulsarServiceURL", "pulsar_service_url"),
        ("instanceID", "instance_id"),
        ("funcID", "func_id"),
        ("funcVersion", "func_version"),
        ("maxBufTuples", "max_buf_tuples"),
        ("port", "port"),
        ("clusterName", "cluster_name"),
        ("killAfterIdleMs", "kill_after_idle_ms"),
        ("tenant", "tenant"),
        ("nameSpace", "namespace"),
        ("name", "name"),
        ("logTopic", "log_topic"),
        ("processingGuarantees", "processing_guarantees"),
        ("secretsMap", "secrets_map"),
        ("runtime", "runtime"),
        ("autoAck", "auto_ack"),
        ("parallelism", "parallelism"),
        ("subscriptionType", "subscription_type"),
        ("timeoutMs", "timeout_ms"),
        ("subscriptionName", "subscription_name"),
        ("cleanupSubscription", "cleanup_subscription"),
        ("sourceSpecsTopic", "source_spec_topic"),
        ("sourceSchemaType", "source_schema_type"),
        ("isRegexPatternSubscription", "is_regex_pattern_subscription"),
        ("receiverQueueSize", "receiver_queue_size"),
        ("sinkSpecsTopic", "sink_spec_topic"),
        ("sinkSchemaType", "sink_schema_type"),
        ("cpu", "cpu"),
        ("ram", "ram"),
        ("disk", "disk"),
        ("maxMessageRetries", "max_message_retries"),
        ("deadLetterTopic", "dead_letter_topic"),
    ],
};

/// Value type a record field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Bool,
    I32,
    I64,
    U64,
    F64,
}

const FIELD_KINDS: &[(&str, FieldKind)] = &[
    ("pulsar_service_url", FieldKind::Text),
    ("instance_id", FieldKind::I64),
    ("func_id", FieldKind::Text),
    ("func_version", FieldKind::Text),
    ("max_buf_tuples", FieldKind::I64),
    ("port", FieldKind::I64),
    ("cluster_name", FieldKind::Text),
    ("kill_after_idle_ms", FieldKind::U64),
    ("tenant", FieldKind::Text),
    ("namespace", FieldKind::Text),
    ("name", FieldKind::Text),
    ("log_topic", FieldKind::Text),
    ("processing_guarantees", FieldKind::I32),
    ("secrets_map", FieldKind::Text),
    ("runtime", FieldKind::I32),
    ("auto_ack", FieldKind::Bool),
    ("parallelism", FieldKind::I32),
    ("subscription_type", FieldKind::I32),
    ("timeout_ms", FieldKind::U64),
    ("subscription_name", FieldKind::Text),
    ("cleanup_subscription", FieldKind::Bool),
    ("source_spec_topic", FieldKind::Text),
    ("source_schema_type", FieldKind::Text),
    ("is_regex_pattern_subscription", FieldKind::Bool),
    ("receiver_queue_size", FieldKind::I32),
    ("sink_spec_topic", FieldKind::Text),
    ("sink_schema_type", FieldKind::Text),
    ("cpu", FieldKind::F64),
    ("ram", FieldKind::I64),
    ("disk", FieldKind::I64),
    ("max_message_retries", FieldKind::I32),
    ("dead_letter_topic", FieldKind::Text),
];

/// Value type of a record field, by its record name.
pub fn field_kind(field: &str) -> Option<FieldKind> {
    FIELD_KINDS
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, kind)| *kind)
}

/// Record fields whose values must never be rendered for humans.
pub const SENSITIVE_FIELDS: &[&str] = &["secrets_map"];

/// Whether a record field, or a key of either document format, is sensitive.
pub fn is_sensitive(name: &str) -> bool {
    let field = FILE_KEYS
        .field_for(name)
        .or_else(|| CONTENT_KEYS.field_for(name))
        .unwrap_or(name);
    SENSITIVE_FIELDS.contains(&field)
}
