// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Batch producers over a pluggable transport boundary.
//!
//! A producer marshals a tree with the marshaler selected by the configured
//! encoding name and hands the resulting messages to a [`MessageSink`] as
//! one batch. Delivery is all-or-nothing at the sink: when the sink reports
//! a batch-level error, the producer conservatively accounts every item of
//! the tree as failed.

use crate::config::ExportConfig;
use crate::error::{DeliveryError, ExportError, MarshalError};
use crate::marshal::{
    self, ExportMessage, LogsMarshaler, Marshaled, MetricsMarshaler, TracesMarshaler,
};
use crate::telemetry::{PipelineMetrics, PipelineTelemetry};
use bytes::Bytes;
use libotel_pdata::{Logs, Metrics, Traces};
use std::sync::Arc;
use tracing::{debug, warn};

/// Transport capability consumed by the producers.
///
/// A sink delivers a whole batch or fails it as a unit; implementations are
/// not expected to provide per-message delivery accounting.
pub trait MessageSink {
    /// Delivers the batch, all-or-nothing.
    fn send_batch(&self, batch: Vec<ExportMessage>) -> anyhow::Result<()>;
}

struct ProducerCore<M: ?Sized> {
    topic: String,
    marshaler: Box<M>,
    metrics: Option<Arc<PipelineMetrics>>,
}

impl<M: ?Sized> ProducerCore<M> {
    fn settle<S: MessageSink>(
        &self,
        sink: &S,
        Marshaled { messages, failures }: Marshaled,
        item_count: usize,
    ) -> Result<(), ExportError> {
        let produced = messages.len();
        if produced > 0 {
            if let Err(source) = sink.send_batch(messages) {
                if let Some(metrics) = &self.metrics {
                    metrics.record_failure(item_count as u64);
                }
                return Err(DeliveryError::new(item_count, source).into());
            }
        }
        if let Some(failure) = MarshalError::combine(failures) {
            warn!(topic = %self.topic, %failure, "some batch elements were not marshalled");
            if let Some(metrics) = &self.metrics {
                metrics.record_failure((item_count.saturating_sub(produced)) as u64);
                metrics.record_push(produced as u64);
            }
            return Err(failure.into());
        }
        if let Some(metrics) = &self.metrics {
            metrics.record_push(item_count as u64);
        }
        debug!(topic = %self.topic, items = item_count, messages = produced, "pushed batch");
        Ok(())
    }
}

/// Producer for the trace signal.
pub struct TracesProducer<S> {
    sink: S,
    core: ProducerCore<dyn TracesMarshaler + Send + Sync>,
}

impl<S: MessageSink> TracesProducer<S> {
    /// Builds a producer from configuration, selecting the marshaler by the
    /// configured encoding name.
    pub fn new(config: &ExportConfig, sink: S) -> Result<Self, ExportError> {
        let marshaler = marshal::traces_marshalers()
            .remove(config.encoding.as_str())
            .ok_or_else(|| ExportError::UnrecognizedEncoding(config.encoding.clone()))?;
        Ok(TracesProducer {
            sink,
            core: ProducerCore {
                topic: config.topic.clone(),
                marshaler,
                metrics: None,
            },
        })
    }

    /// Attaches the pipeline's telemetry context; pushes then record into
    /// its counters.
    pub fn with_telemetry(mut self, telemetry: &PipelineTelemetry) -> Self {
        self.core.metrics = Some(telemetry.metrics());
        self
    }

    /// Marshals and delivers one tree.
    ///
    /// Every element that marshals is delivered even when others fail; the
    /// per-element failures are combined into the returned error. A
    /// transport failure is reported against the whole tree.
    pub fn push(&self, td: &Traces<'_>) -> Result<(), ExportError> {
        let outcome = self.core.marshaler.marshal(td, &self.core.topic);
        self.core.settle(&self.sink, outcome, td.span_count())
    }
}

/// Producer for the metric signal.
pub struct MetricsProducer<S> {
    sink: S,
    core: ProducerCore<dyn MetricsMarshaler + Send + Sync>,
}

impl<S: MessageSink> MetricsProducer<S> {
    /// Builds a producer from configuration, selecting the marshaler by the
    /// configured encoding name.
    pub fn new(config: &ExportConfig, sink: S) -> Result<Self, ExportError> {
        let marshaler = marshal::metrics_marshalers()
            .remove(config.encoding.as_str())
            .ok_or_else(|| ExportError::UnrecognizedEncoding(config.encoding.clone()))?;
        Ok(MetricsProducer {
            sink,
            core: ProducerCore {
                topic: config.topic.clone(),
                marshaler,
                metrics: None,
            },
        })
    }

    /// Attaches the pipeline's telemetry context.
    pub fn with_telemetry(mut self, telemetry: &PipelineTelemetry) -> Self {
        self.core.metrics = Some(telemetry.metrics());
        self
    }

    /// Marshals and delivers one tree; see [`TracesProducer::push`].
    pub fn push(&self, md: &Metrics<'_>) -> Result<(), ExportError> {
        let outcome = self.core.marshaler.marshal(md, &self.core.topic);
        self.core.settle(&self.sink, outcome, md.metric_count())
    }
}

/// Producer for the log signal.
pub struct LogsProducer<S> {
    sink: S,
    core: ProducerCore<dyn LogsMarshaler + Send + Sync>,
    message_key: Option<String>,
}

impl<S: MessageSink> LogsProducer<S> {
    /// Builds a producer from configuration, selecting the marshaler by the
    /// configured encoding name.
    pub fn new(config: &ExportConfig, sink: S) -> Result<Self, ExportError> {
        let marshaler = marshal::logs_marshalers()
            .remove(config.encoding.as_str())
            .ok_or_else(|| ExportError::UnrecognizedEncoding(config.encoding.clone()))?;
        Ok(LogsProducer {
            sink,
            core: ProducerCore {
                topic: config.topic.clone(),
                marshaler,
                metrics: None,
            },
            message_key: config.message_key.clone(),
        })
    }

    /// Attaches the pipeline's telemetry context.
    pub fn with_telemetry(mut self, telemetry: &PipelineTelemetry) -> Self {
        self.core.metrics = Some(telemetry.metrics());
        self
    }

    /// Marshals and delivers one tree; see [`TracesProducer::push`].
    ///
    /// When a message-key pointer is configured, each message's key is
    /// replaced by the pointed-at field of its payload. Payloads that are
    /// not JSON, or that lack the field, get an empty key.
    pub fn push(&self, ld: &Logs<'_>) -> Result<(), ExportError> {
        let mut outcome = self.core.marshaler.marshal(ld, &self.core.topic);
        if let Some(pointer) = &self.message_key {
            for message in &mut outcome.messages {
                message.key = extract_key(&message.value, pointer);
            }
        }
        self.core.settle(&self.sink, outcome, ld.log_record_count())
    }
}

fn extract_key(payload: &[u8], pointer: &str) -> Bytes {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(payload) else {
        return Bytes::new();
    };
    match value.pointer(pointer) {
        Some(serde_json::Value::String(text)) => Bytes::from(text.clone().into_bytes()),
        Some(other) => Bytes::from(other.to_string().into_bytes()),
        None => Bytes::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libotel_pdata::{SpanId, TraceId};
    use libotel_protobuf::pb::common::any_value::Value;
    use libotel_protobuf::pb::common::{AnyValue, ArrayValue, KeyValue};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        batches: Mutex<Vec<Vec<ExportMessage>>>,
        fail_with: Option<&'static str>,
    }

    impl RecordingSink {
        fn failing(reason: &'static str) -> Self {
            RecordingSink {
                batches: Mutex::new(Vec::new()),
                fail_with: Some(reason),
            }
        }

        fn sent(&self) -> Vec<Vec<ExportMessage>> {
            self.batches.lock().unwrap().clone()
        }
    }

    impl MessageSink for RecordingSink {
        fn send_batch(&self, batch: Vec<ExportMessage>) -> anyhow::Result<()> {
            if let Some(reason) = self.fail_with {
                return Err(anyhow::anyhow!(reason));
            }
            self.batches.lock().unwrap().push(batch);
            Ok(())
        }
    }

    fn sample_traces(spans: usize) -> Traces<'static> {
        let mut td = Traces::new();
        let mut groups = td.resource_spans();
        let mut group = groups.append();
        let mut libraries = group.instrumentation_library_spans();
        let mut library = libraries.append();
        let mut span_slice = library.spans();
        for i in 0..spans {
            let mut span = span_slice.append();
            span.set_trace_id(TraceId::new([0xA0 + i as u8; 16]));
            span.set_span_id(SpanId::new([i as u8 + 1; 8]));
            span.set_name("op");
        }
        td
    }

    #[test]
    fn unknown_encoding_is_rejected_at_build_time() {
        let mut config = ExportConfig::default();
        config.set_encoding("carrier-pigeon");
        let result = TracesProducer::new(&config, RecordingSink::default());
        assert!(matches!(
            result,
            Err(ExportError::UnrecognizedEncoding(name)) if name == "carrier-pigeon"
        ));
    }

    #[test]
    fn push_delivers_one_batch() {
        let producer =
            TracesProducer::new(&ExportConfig::default(), RecordingSink::default()).unwrap();
        producer.push(&sample_traces(2)).unwrap();
        let sent = producer.sink.sent();
        assert_eq!(1, sent.len());
        assert_eq!(1, sent[0].len()); // one resource group -> one message
        assert_eq!("otlp_spans", sent[0][0].topic);
    }

    #[test]
    fn transport_failure_reports_whole_tree_failed() {
        let producer =
            TracesProducer::new(&ExportConfig::default(), RecordingSink::failing("broker down"))
                .unwrap();
        let td = sample_traces(3);
        match producer.push(&td) {
            Err(ExportError::Delivery(delivery)) => {
                assert_eq!(3, delivery.count());
                assert!(delivery.to_string().contains("broker down"));
            }
            other => panic!("expected delivery error, got {other:?}"),
        }
    }

    #[test]
    fn partial_marshal_failure_still_delivers_successes() {
        let mut config = ExportConfig::default();
        config.set_encoding("flatspan_json");
        let producer = TracesProducer::new(&config, RecordingSink::default()).unwrap();

        let mut td = sample_traces(2);
        td.as_otlp_mut()[0].instrumentation_library_spans[0].spans[0]
            .attributes
            .push(KeyValue {
                key: "bad".to_string(),
                value: Some(AnyValue {
                    value: Some(Value::ArrayValue(ArrayValue { values: vec![] })),
                }),
            });

        let result = producer.push(&td);
        assert!(matches!(result, Err(ExportError::Marshal(_))));
        let sent = producer.sink.sent();
        assert_eq!(1, sent.len());
        assert_eq!(1, sent[0].len()); // the healthy span still went out
    }

    #[test]
    fn telemetry_counters_track_pushes_and_failures() {
        let telemetry =
            PipelineTelemetry::init(&crate::telemetry::TelemetryConfig::default()).unwrap();
        let producer = TracesProducer::new(&ExportConfig::default(), RecordingSink::default())
            .unwrap()
            .with_telemetry(&telemetry);
        producer.push(&sample_traces(4)).unwrap();
        assert_eq!(1, telemetry.metrics().batches_pushed());
        assert_eq!(4, telemetry.metrics().items_pushed());

        let failing = TracesProducer::new(&ExportConfig::default(), RecordingSink::failing("x"))
            .unwrap()
            .with_telemetry(&telemetry);
        let _ = failing.push(&sample_traces(2));
        assert_eq!(2, telemetry.metrics().items_failed());
    }

    #[test]
    fn metrics_producer_delivers_single_message_batches() {
        let producer =
            MetricsProducer::new(&ExportConfig::default(), RecordingSink::default()).unwrap();
        let mut md = Metrics::new();
        md.resource_metrics().append();
        producer.push(&md).unwrap();
        assert_eq!(1, producer.sink.sent().len());
    }

    #[test]
    fn logs_producer_extracts_message_key_from_json_payload() {
        let mut config = ExportConfig::default();
        config.set_encoding("flatlog_json").set_message_key("/trace_id");
        let producer = LogsProducer::new(&config, RecordingSink::default()).unwrap();

        let mut ld = Logs::new();
        let mut groups = ld.resource_logs();
        let mut group = groups.append();
        let mut libraries = group.instrumentation_library_logs();
        let mut library = libraries.append();
        let mut records = library.log_records();
        let mut record = records.append();
        record.set_trace_id(TraceId::new([0xEE; 16]));
        record.body().set_string("hello");

        producer.push(&ld).unwrap();
        let sent = producer.sink.sent();
        assert_eq!("ee".repeat(16).as_bytes(), &sent[0][0].key[..]);
    }

    #[test]
    fn message_key_on_binary_payload_yields_empty_key() {
        let mut config = ExportConfig::default();
        config.set_message_key("/trace_id"); // default otlp_proto encoding
        let producer = LogsProducer::new(&config, RecordingSink::default()).unwrap();
        let mut ld = Logs::new();
        ld.resource_logs().append();
        producer.push(&ld).unwrap();
        assert!(producer.sink.sent()[0][0].key.is_empty());
    }

    #[test]
    fn extract_key_prints_non_string_fields() {
        let payload = br#"{"severity_number": 9}"#;
        assert_eq!(&b"9"[..], &extract_key(payload, "/severity_number")[..]);
        assert!(extract_key(payload, "/missing").is_empty());
        assert!(extract_key(b"not json", "/x").is_empty());
    }
}
