// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Native wire-format marshalers.
//!
//! The traces marshaler emits one message per top-level resource group,
//! keyed by the hex trace identifier of the group's first span so that a
//! partitioned transport keeps whole traces together. The metrics and logs
//! marshalers emit the entire batch as a single message.

use crate::config::DEFAULT_ENCODING;
use crate::marshal::{
    ExportMessage, LogsMarshaler, Marshaled, MetricsMarshaler, TracesMarshaler,
};
use bytes::Bytes;
use libotel_pdata::{Logs, Metrics, TraceId, Traces};
use libotel_protobuf::envelope;

/// Wire-format traces marshaler: one message per resource group.
pub struct OtlpTracesMarshaler;

impl TracesMarshaler for OtlpTracesMarshaler {
    fn encoding(&self) -> &'static str {
        DEFAULT_ENCODING
    }

    fn marshal(&self, td: &Traces<'_>, topic: &str) -> Marshaled {
        let groups = td.as_otlp();
        let mut messages = Vec::with_capacity(groups.len());
        for group in groups {
            let key = group
                .instrumentation_library_spans
                .first()
                .and_then(|library| library.spans.first())
                .map(|span| TraceId::from_slice(&span.trace_id))
                .filter(|id| !id.is_empty())
                .map(|id| Bytes::from(id.hex_string().into_bytes()))
                .unwrap_or_default();
            let value = envelope::encode_trace_request(std::slice::from_ref(group));
            messages.push(ExportMessage {
                key,
                value: Bytes::from(value),
                topic: topic.to_string(),
            });
        }
        Marshaled {
            messages,
            failures: Vec::new(),
        }
    }
}

/// Wire-format metrics marshaler: the whole batch in one message.
pub struct OtlpMetricsMarshaler;

impl MetricsMarshaler for OtlpMetricsMarshaler {
    fn encoding(&self) -> &'static str {
        DEFAULT_ENCODING
    }

    fn marshal(&self, md: &Metrics<'_>, topic: &str) -> Marshaled {
        Marshaled {
            messages: vec![ExportMessage {
                key: Bytes::new(),
                value: Bytes::from(md.to_wire_bytes()),
                topic: topic.to_string(),
            }],
            failures: Vec::new(),
        }
    }
}

/// Wire-format logs marshaler: the whole batch in one message.
pub struct OtlpLogsMarshaler;

impl LogsMarshaler for OtlpLogsMarshaler {
    fn encoding(&self) -> &'static str {
        DEFAULT_ENCODING
    }

    fn marshal(&self, ld: &Logs<'_>, topic: &str) -> Marshaled {
        Marshaled {
            messages: vec![ExportMessage {
                key: Bytes::new(),
                value: Bytes::from(ld.to_wire_bytes()),
                topic: topic.to_string(),
            }],
            failures: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libotel_pdata::SpanId;
    use libotel_protobuf::pb::collector::ExportTraceServiceRequest;
    use prost::Message;

    fn two_group_traces() -> Traces<'static> {
        let mut td = Traces::new();
        for trace_byte in [0x11u8, 0x22] {
            let mut groups = td.resource_spans();
            let mut group = groups.append();
            let mut libraries = group.instrumentation_library_spans();
            let mut library = libraries.append();
            let mut spans = library.spans();
            let mut span = spans.append();
            span.set_trace_id(TraceId::new([trace_byte; 16]));
            span.set_span_id(SpanId::new([1; 8]));
        }
        td
    }

    #[test]
    fn one_message_per_resource_group_keyed_by_first_trace_id() {
        let td = two_group_traces();
        let out = OtlpTracesMarshaler.marshal(&td, "spans.default");
        assert!(out.failures.is_empty());
        assert_eq!(2, out.messages.len());
        assert_eq!("11".repeat(16).as_bytes(), &out.messages[0].key[..]);
        assert_eq!("22".repeat(16).as_bytes(), &out.messages[1].key[..]);
        assert_eq!("spans.default", out.messages[0].topic);

        // Each message is a full export request holding exactly its group.
        let request = ExportTraceServiceRequest::decode(&out.messages[0].value[..]).unwrap();
        assert_eq!(1, request.resource_spans.len());
        assert_eq!(td.as_otlp()[0], request.resource_spans[0]);
    }

    #[test]
    fn group_without_spans_gets_empty_key() {
        let mut td = Traces::new();
        td.resource_spans().append();
        let out = OtlpTracesMarshaler.marshal(&td, "spans.default");
        assert_eq!(1, out.messages.len());
        assert!(out.messages[0].key.is_empty());
    }

    #[test]
    fn empty_trace_id_gets_empty_key() {
        let mut td = Traces::new();
        let mut groups = td.resource_spans();
        let mut group = groups.append();
        group
            .instrumentation_library_spans()
            .append()
            .spans()
            .append();
        let out = OtlpTracesMarshaler.marshal(&td, "spans.default");
        assert!(out.messages[0].key.is_empty());
    }

    #[test]
    fn metrics_batch_is_a_single_message() {
        let mut md = Metrics::new();
        md.resource_metrics().append();
        let out = OtlpMetricsMarshaler.marshal(&md, "metrics.default");
        assert_eq!(1, out.messages.len());
        assert_eq!(md.to_wire_bytes(), out.messages[0].value.to_vec());
    }

    #[test]
    fn logs_batch_is_a_single_message() {
        let mut ld = Logs::new();
        ld.resource_logs().append();
        let out = OtlpLogsMarshaler.marshal(&ld, "logs.default");
        assert_eq!(1, out.messages.len());
        assert_eq!(ld.to_wire_bytes(), out.messages[0].value.to_vec());
    }
}
