// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Envelope message sent by a trace exporter. One request carries all the resource
/// span groups of a batch.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExportTraceServiceRequest {
    /// An array of ResourceSpans. For data coming from a single resource this array
    /// will typically contain one element. Intermediary nodes (such as batchers,
    /// forwarders) are allowed to merge data from multiple origins, in which case this
    /// array will contain multiple elements.
    #[prost(message, repeated, tag = "1")]
    pub resource_spans: ::prost::alloc::vec::Vec<super::trace::ResourceSpans>,
}
/// Reply to an ExportTraceServiceRequest.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ExportTraceServiceResponse {}
/// Envelope message sent by a metrics exporter. One request carries all the resource
/// metric groups of a batch.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExportMetricsServiceRequest {
    /// An array of ResourceMetrics. For data coming from a single resource this array
    /// will typically contain one element. Intermediary nodes (such as batchers,
    /// forwarders) are allowed to merge data from multiple origins, in which case this
    /// array will contain multiple elements.
    #[prost(message, repeated, tag = "1")]
    pub resource_metrics: ::prost::alloc::vec::Vec<super::metrics::ResourceMetrics>,
}
/// Reply to an ExportMetricsServiceRequest.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ExportMetricsServiceResponse {}
/// Envelope message sent by a logs exporter. One request carries all the resource log
/// groups of a batch.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExportLogsServiceRequest {
    /// An array of ResourceLogs. For data coming from a single resource this array will
    /// typically contain one element. Intermediary nodes (such as batchers, forwarders)
    /// are allowed to merge data from multiple origins, in which case this array will
    /// contain multiple elements.
    #[prost(message, repeated, tag = "1")]
    pub resource_logs: ::prost::alloc::vec::Vec<super::logs::ResourceLogs>,
}
/// Reply to an ExportLogsServiceRequest.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct ExportLogsServiceResponse {}
