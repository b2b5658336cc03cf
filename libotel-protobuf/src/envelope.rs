// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Borrowed-envelope encoding.
//!
//! Every export-request envelope is a message with a single repeated field
//! (tag 1) holding the top-level groups of the signal. Its wire form is the
//! concatenation of the length-delimited field entries, so a request can be
//! serialized directly from a borrowed slice of groups without first moving
//! or cloning them into an envelope value. Decoding always goes through the
//! envelope message types in [`crate::pb::collector`].

use crate::pb::{logs, metrics, trace};
use prost::encoding::message;

/// Serializes an `ExportTraceServiceRequest` holding `resource_spans`.
pub fn encode_trace_request(resource_spans: &[trace::ResourceSpans]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(trace_request_len(resource_spans));
    for group in resource_spans {
        message::encode(1u32, group, &mut buf);
    }
    buf
}

/// Returns the serialized size of an `ExportTraceServiceRequest` holding
/// `resource_spans`.
pub fn trace_request_len(resource_spans: &[trace::ResourceSpans]) -> usize {
    resource_spans
        .iter()
        .map(|group| message::encoded_len(1u32, group))
        .sum()
}

/// Serializes an `ExportMetricsServiceRequest` holding `resource_metrics`.
pub fn encode_metrics_request(resource_metrics: &[metrics::ResourceMetrics]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(metrics_request_len(resource_metrics));
    for group in resource_metrics {
        message::encode(1u32, group, &mut buf);
    }
    buf
}

/// Returns the serialized size of an `ExportMetricsServiceRequest` holding
/// `resource_metrics`.
pub fn metrics_request_len(resource_metrics: &[metrics::ResourceMetrics]) -> usize {
    resource_metrics
        .iter()
        .map(|group| message::encoded_len(1u32, group))
        .sum()
}

/// Serializes an `ExportLogsServiceRequest` holding `resource_logs`.
pub fn encode_logs_request(resource_logs: &[logs::ResourceLogs]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(logs_request_len(resource_logs));
    for group in resource_logs {
        message::encode(1u32, group, &mut buf);
    }
    buf
}

/// Returns the serialized size of an `ExportLogsServiceRequest` holding
/// `resource_logs`.
pub fn logs_request_len(resource_logs: &[logs::ResourceLogs]) -> usize {
    resource_logs
        .iter()
        .map(|group| message::encoded_len(1u32, group))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pb::collector::ExportTraceServiceRequest;
    use crate::pb::trace::{InstrumentationLibrarySpans, ResourceSpans, Span};
    use prost::Message;

    fn sample_groups() -> Vec<ResourceSpans> {
        let span = Span {
            trace_id: vec![0xAA; 16],
            span_id: vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08],
            name: "handle-request".to_string(),
            start_time_unix_nano: 1_000,
            end_time_unix_nano: 2_000,
            ..Default::default()
        };
        vec![
            ResourceSpans {
                instrumentation_library_spans: vec![InstrumentationLibrarySpans {
                    spans: vec![span],
                    ..Default::default()
                }],
                ..Default::default()
            },
            ResourceSpans::default(),
        ]
    }

    #[test]
    fn borrowed_encode_matches_envelope_encode() {
        let groups = sample_groups();
        let via_envelope = ExportTraceServiceRequest {
            resource_spans: groups.clone(),
        }
        .encode_to_vec();
        assert_eq!(via_envelope, encode_trace_request(&groups));
        assert_eq!(via_envelope.len(), trace_request_len(&groups));
    }

    #[test]
    fn borrowed_encode_round_trips() {
        let groups = sample_groups();
        let bytes = encode_trace_request(&groups);
        let decoded = ExportTraceServiceRequest::decode(bytes.as_slice()).unwrap();
        assert_eq!(groups, decoded.resource_spans);
    }

    #[test]
    fn empty_request_is_empty_bytes() {
        assert!(encode_trace_request(&[]).is_empty());
        assert_eq!(0, trace_request_len(&[]));
    }
}
