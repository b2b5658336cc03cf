// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Flat-record translating marshalers.
//!
//! These encoders flatten the tree into one self-contained record per leaf
//! element: the resource attributes are inlined into every record so a
//! consumer never needs the enclosing group. Traces are emitted one message
//! per span, keyed by that span's own trace identifier; log records
//! likewise. Nested attribute values (arrays, key-value lists) are not
//! representable in the flat form and fail that element alone, leaving the
//! rest of the batch intact.

use crate::error::MarshalError;
use crate::marshal::{ExportMessage, LogsMarshaler, Marshaled, TracesMarshaler};
use bytes::Bytes;
use libotel_pdata::{Logs, SpanId, TraceId, Traces};
use libotel_protobuf::pb::common::any_value::Value;
use libotel_protobuf::pb::common::{AnyValue, KeyValue};
use libotel_protobuf::pb::trace::span::SpanKind;
use libotel_protobuf::pb::{logs, trace};
use serde::Serialize;
use std::collections::BTreeMap;

/// A primitive attribute value of the flat form.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlatValue {
    /// A string value.
    String(String),
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A double value.
    Double(f64),
}

/// One span flattened into a self-contained record.
#[derive(Debug, Default, Serialize)]
pub struct FlatSpan {
    /// Hex trace identifier.
    pub trace_id: String,
    /// Hex span identifier.
    pub span_id: String,
    /// Hex parent span identifier; absent for root spans.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parent_span_id: String,
    /// Operation name.
    pub name: String,
    /// Span kind as a lower-case word.
    pub kind: String,
    /// Start timestamp, UNIX epoch nanoseconds.
    pub start_time_unix_nano: u64,
    /// End timestamp, UNIX epoch nanoseconds.
    pub end_time_unix_nano: u64,
    /// Trace state, verbatim.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub trace_state: String,
    /// Numeric status code; 0 when unset.
    #[serde(skip_serializing_if = "is_default")]
    pub status_code: i32,
    /// Status message.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status_message: String,
    /// Resource attributes of the enclosing group, inlined.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub resource: BTreeMap<String, FlatValue>,
    /// Span attributes.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, FlatValue>,
}

/// One log record flattened into a self-contained record.
#[derive(Debug, Default, Serialize)]
pub struct FlatLogRecord {
    /// Record timestamp, UNIX epoch nanoseconds.
    pub time_unix_nano: u64,
    /// Normalized numeric severity; 0 when unspecified.
    #[serde(skip_serializing_if = "is_default")]
    pub severity_number: i32,
    /// Severity text as known at the source.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub severity_text: String,
    /// Short event identifier.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Record body, when present and primitive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<FlatValue>,
    /// Hex trace identifier; absent when the record is not correlated.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub trace_id: String,
    /// Hex span identifier; absent when the record is not correlated.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub span_id: String,
    /// Resource attributes of the enclosing group, inlined.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub resource: BTreeMap<String, FlatValue>,
    /// Record attributes.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, FlatValue>,
}

fn is_default<T: Default + PartialEq>(t: &T) -> bool {
    t == &T::default()
}

fn kind_str(kind: SpanKind) -> &'static str {
    match kind {
        SpanKind::Unspecified => "unspecified",
        SpanKind::Internal => "internal",
        SpanKind::Server => "server",
        SpanKind::Client => "client",
        SpanKind::Producer => "producer",
        SpanKind::Consumer => "consumer",
    }
}

fn flat_value(key: &str, value: &AnyValue) -> Result<FlatValue, MarshalError> {
    match &value.value {
        Some(Value::StringValue(text)) => Ok(FlatValue::String(text.clone())),
        Some(Value::BoolValue(flag)) => Ok(FlatValue::Bool(*flag)),
        Some(Value::IntValue(number)) => Ok(FlatValue::Int(*number)),
        Some(Value::DoubleValue(number)) => Ok(FlatValue::Double(*number)),
        Some(Value::ArrayValue(_)) => Err(MarshalError::Unsupported(format!(
            "attribute {key:?} holds an array"
        ))),
        Some(Value::KvlistValue(_)) => Err(MarshalError::Unsupported(format!(
            "attribute {key:?} holds a key-value list"
        ))),
        None => Err(MarshalError::Unsupported(format!(
            "attribute {key:?} holds no value"
        ))),
    }
}

fn flat_attributes(attributes: &[KeyValue]) -> Result<BTreeMap<String, FlatValue>, MarshalError> {
    let mut out = BTreeMap::new();
    for kv in attributes {
        match &kv.value {
            Some(value) => {
                out.insert(kv.key.clone(), flat_value(&kv.key, value)?);
            }
            None => {
                return Err(MarshalError::Unsupported(format!(
                    "attribute {:?} holds no value",
                    kv.key
                )))
            }
        }
    }
    Ok(out)
}

fn group_resource(
    resource: Option<&libotel_protobuf::pb::resource::Resource>,
) -> Result<BTreeMap<String, FlatValue>, MarshalError> {
    match resource {
        Some(resource) => flat_attributes(&resource.attributes),
        None => Ok(BTreeMap::new()),
    }
}

fn flatten_span(
    span: &trace::Span,
    resource: &BTreeMap<String, FlatValue>,
) -> Result<FlatSpan, MarshalError> {
    Ok(FlatSpan {
        trace_id: TraceId::from_slice(&span.trace_id).hex_string(),
        span_id: SpanId::from_slice(&span.span_id).hex_string(),
        parent_span_id: SpanId::from_slice(&span.parent_span_id).hex_string(),
        name: span.name.clone(),
        kind: kind_str(span.kind()).to_string(),
        start_time_unix_nano: span.start_time_unix_nano,
        end_time_unix_nano: span.end_time_unix_nano,
        trace_state: span.trace_state.clone(),
        status_code: span.status.as_ref().map(|status| status.code).unwrap_or(0),
        status_message: span
            .status
            .as_ref()
            .map(|status| status.message.clone())
            .unwrap_or_default(),
        resource: resource.clone(),
        attributes: flat_attributes(&span.attributes)?,
    })
}

fn flatten_log_record(
    record: &logs::LogRecord,
    resource: &BTreeMap<String, FlatValue>,
) -> Result<FlatLogRecord, MarshalError> {
    Ok(FlatLogRecord {
        time_unix_nano: record.time_unix_nano,
        severity_number: record.severity_number,
        severity_text: record.severity_text.clone(),
        name: record.name.clone(),
        body: record
            .body
            .as_ref()
            .map(|body| flat_value("body", body))
            .transpose()?,
        trace_id: TraceId::from_slice(&record.trace_id).hex_string(),
        span_id: SpanId::from_slice(&record.span_id).hex_string(),
        resource: resource.clone(),
        attributes: flat_attributes(&record.attributes)?,
    })
}

enum FlatEncoding {
    Msgpack,
    Json,
}

/// Flat-span traces marshaler: one message per leaf span, keyed by that
/// span's own trace identifier.
///
/// A resource descriptor that cannot be flattened fails every span of its
/// group; any other failure is per span.
pub struct FlatTracesMarshaler {
    encoding: FlatEncoding,
}

impl FlatTracesMarshaler {
    /// Binary flat-span marshaler (msgpack).
    pub fn msgpack() -> Self {
        FlatTracesMarshaler {
            encoding: FlatEncoding::Msgpack,
        }
    }

    /// Text flat-span marshaler (JSON).
    pub fn json() -> Self {
        FlatTracesMarshaler {
            encoding: FlatEncoding::Json,
        }
    }

    fn encode(&self, span: &FlatSpan) -> Result<Vec<u8>, MarshalError> {
        match self.encoding {
            FlatEncoding::Msgpack => rmp_serde::encode::to_vec_named(span).map_err(Into::into),
            FlatEncoding::Json => serde_json::to_vec(span).map_err(Into::into),
        }
    }
}

impl TracesMarshaler for FlatTracesMarshaler {
    fn encoding(&self) -> &'static str {
        match self.encoding {
            FlatEncoding::Msgpack => "flatspan_msgpack",
            FlatEncoding::Json => "flatspan_json",
        }
    }

    fn marshal(&self, td: &Traces<'_>, topic: &str) -> Marshaled {
        let mut out = Marshaled::default();
        for group in td.as_otlp() {
            let resource = match group_resource(group.resource.as_ref()) {
                Ok(resource) => resource,
                Err(error) => {
                    out.failures.push(error);
                    continue;
                }
            };
            for library in &group.instrumentation_library_spans {
                for span in &library.spans {
                    let encoded = flatten_span(span, &resource)
                        .and_then(|flat| self.encode(&flat).map(|bytes| (flat, bytes)));
                    match encoded {
                        Ok((flat, bytes)) => out.messages.push(ExportMessage {
                            key: Bytes::from(flat.trace_id.into_bytes()),
                            value: Bytes::from(bytes),
                            topic: topic.to_string(),
                        }),
                        Err(error) => out.failures.push(error),
                    }
                }
            }
        }
        out
    }
}

/// Flat-record logs marshaler: one JSON message per log record, keyed by
/// the record's trace identifier.
pub struct FlatLogsMarshaler;

impl LogsMarshaler for FlatLogsMarshaler {
    fn encoding(&self) -> &'static str {
        "flatlog_json"
    }

    fn marshal(&self, ld: &Logs<'_>, topic: &str) -> Marshaled {
        let mut out = Marshaled::default();
        for group in ld.as_otlp() {
            let resource = match group_resource(group.resource.as_ref()) {
                Ok(resource) => resource,
                Err(error) => {
                    out.failures.push(error);
                    continue;
                }
            };
            for library in &group.instrumentation_library_logs {
                for record in &library.log_records {
                    let encoded = flatten_log_record(record, &resource)
                        .and_then(|flat| serde_json::to_vec(&flat)
                            .map_err(MarshalError::from)
                            .map(|bytes| (flat, bytes)));
                    match encoded {
                        Ok((flat, bytes)) => out.messages.push(ExportMessage {
                            key: Bytes::from(flat.trace_id.into_bytes()),
                            value: Bytes::from(bytes),
                            topic: topic.to_string(),
                        }),
                        Err(error) => out.failures.push(error),
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libotel_protobuf::pb::common::ArrayValue;
    use libotel_protobuf::pb::trace::status::StatusCode;

    fn sample_traces() -> Traces<'static> {
        let mut td = Traces::new();
        let mut groups = td.resource_spans();
        let mut group = groups.append();
        group
            .resource()
            .attributes()
            .upsert_string("service.name", "checkout");
        let mut libraries = group.instrumentation_library_spans();
        let mut library = libraries.append();
        let mut spans = library.spans();

        let mut span = spans.append();
        span.set_trace_id(TraceId::new([0xAA; 16]));
        span.set_span_id(SpanId::new([0x01; 8]));
        span.set_name("checkout");
        span.set_kind(libotel_pdata::trace::SpanKind::Server);
        span.set_start_time_unix_nano(10);
        span.set_end_time_unix_nano(20);
        span.attributes().upsert_int("http.status_code", 200);
        span.status().set_code(libotel_pdata::trace::StatusCode::Error);
        span.status().set_message("timeout");

        let mut second = spans.append();
        second.set_trace_id(TraceId::new([0xBB; 16]));
        second.set_span_id(SpanId::new([0x02; 8]));
        second.set_name("reserve-stock");
        td
    }

    #[test]
    fn one_message_per_span_keyed_by_own_trace_id() {
        let td = sample_traces();
        let out = FlatTracesMarshaler::json().marshal(&td, "spans.flat");
        assert!(out.failures.is_empty());
        assert_eq!(2, out.messages.len());
        assert_eq!("aa".repeat(16).as_bytes(), &out.messages[0].key[..]);
        assert_eq!("bb".repeat(16).as_bytes(), &out.messages[1].key[..]);
    }

    #[test]
    fn json_record_is_self_contained() {
        let td = sample_traces();
        let out = FlatTracesMarshaler::json().marshal(&td, "spans.flat");
        let record: serde_json::Value =
            serde_json::from_slice(&out.messages[0].value).unwrap();
        assert_eq!("checkout", record["name"]);
        assert_eq!("server", record["kind"]);
        assert_eq!("checkout", record["resource"]["service.name"]);
        assert_eq!(200, record["attributes"]["http.status_code"]);
        assert_eq!(StatusCode::Error as i64, record["status_code"]);
        assert_eq!("timeout", record["status_message"]);
        assert_eq!("aa".repeat(16), record["trace_id"]);
    }

    #[test]
    fn msgpack_record_decodes_to_same_fields() {
        let td = sample_traces();
        let out = FlatTracesMarshaler::msgpack().marshal(&td, "spans.flat");
        assert_eq!(2, out.messages.len());
        let record: serde_json::Value = rmp_serde::from_slice(&out.messages[0].value).unwrap();
        assert_eq!("checkout", record["name"]);
        assert_eq!("server", record["kind"]);
        assert_eq!("checkout", record["resource"]["service.name"]);
    }

    #[test]
    fn unsupported_attribute_fails_only_that_span() {
        let mut td = sample_traces();
        // Give the first span an array attribute the flat form cannot carry.
        td.as_otlp_mut()[0].instrumentation_library_spans[0].spans[0]
            .attributes
            .push(KeyValue {
                key: "retries".to_string(),
                value: Some(AnyValue {
                    value: Some(Value::ArrayValue(ArrayValue { values: vec![] })),
                }),
            });
        let out = FlatTracesMarshaler::json().marshal(&td, "spans.flat");
        assert_eq!(1, out.messages.len());
        assert_eq!(1, out.failures.len());
        assert_eq!("bb".repeat(16).as_bytes(), &out.messages[0].key[..]);
        assert!(out.failures[0].to_string().contains("retries"));
    }

    #[test]
    fn unsupported_resource_fails_whole_group() {
        let mut td = sample_traces();
        td.as_otlp_mut()[0]
            .resource
            .get_or_insert_with(Default::default)
            .attributes
            .push(KeyValue {
                key: "bad".to_string(),
                value: None,
            });
        let out = FlatTracesMarshaler::json().marshal(&td, "spans.flat");
        assert!(out.messages.is_empty());
        assert_eq!(1, out.failures.len());
    }

    #[test]
    fn flat_logs_emit_one_message_per_record() {
        let mut ld = Logs::new();
        let mut groups = ld.resource_logs();
        let mut group = groups.append();
        group
            .resource()
            .attributes()
            .upsert_string("service.name", "checkout");
        let mut libraries = group.instrumentation_library_logs();
        let mut library = libraries.append();
        let mut records = library.log_records();
        for i in 0..3u64 {
            let mut record = records.append();
            record.set_time_unix_nano(i);
            record.body().set_string("payment failed");
            record.set_trace_id(TraceId::new([0xCC; 16]));
        }

        let out = FlatLogsMarshaler.marshal(&ld, "logs.flat");
        assert!(out.failures.is_empty());
        assert_eq!(3, out.messages.len());
        let record: serde_json::Value =
            serde_json::from_slice(&out.messages[0].value).unwrap();
        assert_eq!("payment failed", record["body"]);
        assert_eq!("cc".repeat(16), record["trace_id"]);
        assert_eq!("checkout", record["resource"]["service.name"]);
        assert_eq!("cc".repeat(16).as_bytes(), &out.messages[0].key[..]);
    }
}
