// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Exporter configuration.

use serde::{Deserialize, Serialize};

/// Encoding name of the native wire-format marshalers.
pub const DEFAULT_ENCODING: &str = "otlp_proto";

/// Default destination topic for outbound messages.
pub const DEFAULT_TOPIC: &str = "otlp_spans";

/// Configuration of an outbound producer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Encoding name selecting the outbound marshaler.
    pub encoding: String,
    /// Destination topic stamped on every outbound message.
    pub topic: String,
    /// JSON pointer (e.g. `/trace_id`) used by log producers to extract a
    /// partition key from text-encoded payloads. Payloads that are not JSON
    /// or do not contain the pointed-at field get an empty key.
    pub message_key: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            encoding: DEFAULT_ENCODING.to_string(),
            topic: DEFAULT_TOPIC.to_string(),
            message_key: None,
        }
    }
}

impl ExportConfig {
    /// Sets the encoding name.
    pub fn set_encoding(&mut self, encoding: &str) -> &mut Self {
        encoding.clone_into(&mut self.encoding);
        self
    }

    /// Sets the destination topic.
    pub fn set_topic(&mut self, topic: &str) -> &mut Self {
        topic.clone_into(&mut self.topic);
        self
    }

    /// Sets the JSON pointer used to extract per-message partition keys.
    pub fn set_message_key(&mut self, pointer: &str) -> &mut Self {
        self.message_key = Some(pointer.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_native_encoding() {
        let config = ExportConfig::default();
        assert_eq!("otlp_proto", config.encoding);
        assert_eq!("otlp_spans", config.topic);
        assert!(config.message_key.is_none());
    }

    #[test]
    fn builder_setters_chain() {
        let mut config = ExportConfig::default();
        config
            .set_encoding("flatspan_json")
            .set_topic("spans.flat")
            .set_message_key("/trace_id");
        assert_eq!("flatspan_json", config.encoding);
        assert_eq!("spans.flat", config.topic);
        assert_eq!(Some("/trace_id".to_string()), config.message_key);
    }

    #[test]
    fn deserializes_with_partial_fields() {
        let config: ExportConfig = serde_json::from_str(r#"{"topic":"spans.eu"}"#).unwrap();
        assert_eq!("otlp_proto", config.encoding);
        assert_eq!("spans.eu", config.topic);
    }
}
