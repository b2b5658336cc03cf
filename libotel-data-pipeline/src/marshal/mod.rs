// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Outbound marshalers.
//!
//! A marshaler translates a telemetry tree into outbound messages for a
//! partitioned transport. Implementations are selected by encoding name:
//! the native wire-format encoders live in [`otlp`], the flat-span
//! translating encoders (binary and text) in [`flat`].

pub mod flat;
pub mod otlp;

use crate::error::MarshalError;
use bytes::Bytes;
use libotel_pdata::{Logs, Metrics, Traces};
use std::collections::HashMap;

/// A single outbound message produced by a marshaler.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportMessage {
    /// Partitioning key; empty when the transport should choose.
    pub key: Bytes,
    /// Encoded payload.
    pub value: Bytes,
    /// Destination topic.
    pub topic: String,
}

/// Outcome of marshalling one batch: every message that could be produced,
/// plus the per-element failures for those that could not. Partial failure
/// does not void the batch.
#[derive(Debug, Default)]
pub struct Marshaled {
    /// Messages ready for delivery.
    pub messages: Vec<ExportMessage>,
    /// Per-element translation failures.
    pub failures: Vec<MarshalError>,
}

/// Translates trace trees into outbound messages.
pub trait TracesMarshaler {
    /// Encoding name this marshaler is registered under.
    fn encoding(&self) -> &'static str;
    /// Marshals one tree into messages destined for `topic`.
    fn marshal(&self, td: &Traces<'_>, topic: &str) -> Marshaled;
}

/// Translates metric trees into outbound messages.
pub trait MetricsMarshaler {
    /// Encoding name this marshaler is registered under.
    fn encoding(&self) -> &'static str;
    /// Marshals one tree into messages destined for `topic`.
    fn marshal(&self, md: &Metrics<'_>, topic: &str) -> Marshaled;
}

/// Translates log trees into outbound messages.
pub trait LogsMarshaler {
    /// Encoding name this marshaler is registered under.
    fn encoding(&self) -> &'static str;
    /// Marshals one tree into messages destined for `topic`.
    fn marshal(&self, ld: &Logs<'_>, topic: &str) -> Marshaled;
}

/// All known traces marshalers, keyed by encoding name.
pub fn traces_marshalers() -> HashMap<&'static str, Box<dyn TracesMarshaler + Send + Sync>> {
    let marshalers: Vec<Box<dyn TracesMarshaler + Send + Sync>> = vec![
        Box::new(otlp::OtlpTracesMarshaler),
        Box::new(flat::FlatTracesMarshaler::msgpack()),
        Box::new(flat::FlatTracesMarshaler::json()),
    ];
    marshalers
        .into_iter()
        .map(|marshaler| (marshaler.encoding(), marshaler))
        .collect()
}

/// All known metrics marshalers, keyed by encoding name.
pub fn metrics_marshalers() -> HashMap<&'static str, Box<dyn MetricsMarshaler + Send + Sync>> {
    let marshalers: Vec<Box<dyn MetricsMarshaler + Send + Sync>> =
        vec![Box::new(otlp::OtlpMetricsMarshaler)];
    marshalers
        .into_iter()
        .map(|marshaler| (marshaler.encoding(), marshaler))
        .collect()
}

/// All known logs marshalers, keyed by encoding name.
pub fn logs_marshalers() -> HashMap<&'static str, Box<dyn LogsMarshaler + Send + Sync>> {
    let marshalers: Vec<Box<dyn LogsMarshaler + Send + Sync>> = vec![
        Box::new(otlp::OtlpLogsMarshaler),
        Box::new(flat::FlatLogsMarshaler),
    ];
    marshalers
        .into_iter()
        .map(|marshaler| (marshaler.encoding(), marshaler))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registries_key_by_encoding() {
        let traces = traces_marshalers();
        assert!(traces.contains_key("otlp_proto"));
        assert!(traces.contains_key("flatspan_msgpack"));
        assert!(traces.contains_key("flatspan_json"));

        let metrics = metrics_marshalers();
        assert!(metrics.contains_key("otlp_proto"));

        let logs = logs_marshalers();
        assert!(logs.contains_key("otlp_proto"));
        assert!(logs.contains_key("flatlog_json"));
    }
}
