// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The trace tree: `Traces` → resource groups → instrumentation-library
//! groups → spans, with slice views over every level.

use crate::attributes::Attributes;
use crate::common::{InstrumentationLibraryView, ResourceView};
use crate::ids::{SpanId, TraceId};
use crate::slice::{pdata_slice, Storage};
use libotel_protobuf::envelope;
use libotel_protobuf::pb::collector::ExportTraceServiceRequest;
use libotel_protobuf::pb::trace;
use prost::Message;

pub use libotel_protobuf::pb::trace::span::SpanKind;
pub use libotel_protobuf::pb::trace::status::{DeprecatedStatusCode, StatusCode};

/// The root value passed between pipeline stages for the trace signal.
///
/// A freshly constructed tree owns empty, non-nil storage. A tree obtained
/// through [`Traces::from_otlp`] instead borrows externally-owned storage:
/// mutations are visible to both sides, which is what the wire-codec
/// boundary relies on to avoid copies. `clone()` always produces a fully
/// independent deep copy, severing all sharing.
pub struct Traces<'a> {
    groups: Storage<'a, trace::ResourceSpans>,
}

impl Traces<'static> {
    /// Creates a new, exclusively-owned, empty trace tree.
    pub fn new() -> Self {
        Traces {
            groups: Storage::Owned(Vec::new()),
        }
    }
}

impl Default for Traces<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Traces<'a> {
    /// Wraps externally-owned wire-schema storage without copying. The
    /// storage is shared: mutations made through the returned tree are
    /// visible to the external owner and vice versa.
    pub fn from_otlp(groups: &'a mut Vec<trace::ResourceSpans>) -> Self {
        Traces {
            groups: Storage::Borrowed(groups),
        }
    }
}

impl Traces<'_> {
    /// Borrows the tree as its wire-schema groups.
    pub fn as_otlp(&self) -> &[trace::ResourceSpans] {
        self.groups.rows()
    }

    /// Mutably borrows the tree as its wire-schema groups.
    pub fn as_otlp_mut(&mut self) -> &mut Vec<trace::ResourceSpans> {
        self.groups.rows_mut()
    }

    /// A slice view over the top-level resource groups.
    pub fn resource_spans(&mut self) -> ResourceSpansSlice<'_> {
        ResourceSpansSlice::new(self.groups.rows_mut())
    }

    /// Total number of spans across every resource-group ×
    /// instrumentation-library-group pair. O(total groups).
    pub fn span_count(&self) -> usize {
        self.groups
            .rows()
            .iter()
            .map(|group| {
                group
                    .instrumentation_library_spans
                    .iter()
                    .map(|library| library.spans.len())
                    .sum::<usize>()
            })
            .sum()
    }

    /// Estimated wire footprint: the sum of each top-level group's
    /// serialized byte size, computed by the codec without encoding.
    pub fn size(&self) -> usize {
        self.groups.rows().iter().map(Message::encoded_len).sum()
    }

    /// Serializes the whole tree wrapped in the protocol's export-request
    /// envelope.
    pub fn to_wire_bytes(&self) -> Vec<u8> {
        envelope::encode_trace_request(self.groups.rows())
    }

    /// Replaces the tree's contents by parsing an export-request envelope.
    /// On a parse failure the prior contents are left untouched.
    pub fn from_wire_bytes(&mut self, data: &[u8]) -> Result<(), prost::DecodeError> {
        let request = ExportTraceServiceRequest::decode(data)?;
        *self.groups.rows_mut() = request.resource_spans;
        Ok(())
    }
}

impl Clone for Traces<'_> {
    /// Deep copy: every level of the tree is copied into newly allocated,
    /// owned storage. The result shares nothing with the original,
    /// regardless of whether the original owned or borrowed its storage.
    fn clone(&self) -> Self {
        Traces {
            groups: Storage::Owned(self.groups.rows().clone()),
        }
    }
}

pdata_slice!(
    /// A non-owning view over the top-level resource groups of a [`Traces`].
    ResourceSpansSlice,
    /// A view over one resource group, aliasing it in place.
    ResourceSpansView,
    trace::ResourceSpans
);

impl ResourceSpansView<'_> {
    /// The resource descriptor for this group, created empty if absent.
    pub fn resource(&mut self) -> ResourceView<'_> {
        ResourceView::new(self.msg.resource.get_or_insert_with(Default::default))
    }

    /// The instrumentation-library groups within this resource group.
    pub fn instrumentation_library_spans(&mut self) -> InstrumentationLibrarySpansSlice<'_> {
        InstrumentationLibrarySpansSlice::new(&mut self.msg.instrumentation_library_spans)
    }
}

pdata_slice!(
    /// A non-owning view over the instrumentation-library groups of a
    /// resource group.
    InstrumentationLibrarySpansSlice,
    /// A view over one instrumentation-library group, aliasing it in place.
    InstrumentationLibrarySpansView,
    trace::InstrumentationLibrarySpans
);

impl InstrumentationLibrarySpansView<'_> {
    /// The instrumentation-library descriptor, created empty if absent.
    pub fn instrumentation_library(&mut self) -> InstrumentationLibraryView<'_> {
        InstrumentationLibraryView::new(
            self.msg
                .instrumentation_library
                .get_or_insert_with(Default::default),
        )
    }

    /// The spans owned by this group.
    pub fn spans(&mut self) -> SpanSlice<'_> {
        SpanSlice::new(&mut self.msg.spans)
    }
}

pdata_slice!(
    /// A non-owning view over the spans of an instrumentation-library group.
    SpanSlice,
    /// A view over one span, aliasing it in place.
    SpanView,
    trace::Span
);

impl SpanView<'_> {
    /// The identifier of the trace this span belongs to.
    pub fn trace_id(&self) -> TraceId {
        TraceId::from_slice(&self.msg.trace_id)
    }

    /// Sets the trace identifier.
    pub fn set_trace_id(&mut self, id: TraceId) {
        self.msg.trace_id = id.to_bytes();
    }

    /// The identifier of this span.
    pub fn span_id(&self) -> SpanId {
        SpanId::from_slice(&self.msg.span_id)
    }

    /// Sets the span identifier.
    pub fn set_span_id(&mut self, id: SpanId) {
        self.msg.span_id = id.to_bytes();
    }

    /// The identifier of this span's parent; empty for a root span.
    pub fn parent_span_id(&self) -> SpanId {
        SpanId::from_slice(&self.msg.parent_span_id)
    }

    /// Sets the parent span identifier.
    pub fn set_parent_span_id(&mut self, id: SpanId) {
        self.msg.parent_span_id = id.to_bytes();
    }

    /// The trace state in w3c-trace-context format, stored and returned
    /// verbatim; the model performs no parsing or validation of it.
    pub fn trace_state(&self) -> &str {
        &self.msg.trace_state
    }

    /// Sets the trace state, verbatim.
    pub fn set_trace_state(&mut self, state: &str) {
        self.msg.trace_state = state.to_string();
    }

    /// The span's operation name.
    pub fn name(&self) -> &str {
        &self.msg.name
    }

    /// Sets the span's operation name.
    pub fn set_name(&mut self, name: &str) {
        self.msg.name = name.to_string();
    }

    /// The span kind.
    pub fn kind(&self) -> SpanKind {
        self.msg.kind()
    }

    /// Sets the span kind.
    pub fn set_kind(&mut self, kind: SpanKind) {
        self.msg.set_kind(kind);
    }

    /// The start timestamp, UNIX epoch nanoseconds.
    pub fn start_time_unix_nano(&self) -> u64 {
        self.msg.start_time_unix_nano
    }

    /// Sets the start timestamp, UNIX epoch nanoseconds.
    pub fn set_start_time_unix_nano(&mut self, nanos: u64) {
        self.msg.start_time_unix_nano = nanos;
    }

    /// The end timestamp, UNIX epoch nanoseconds.
    pub fn end_time_unix_nano(&self) -> u64 {
        self.msg.end_time_unix_nano
    }

    /// Sets the end timestamp, UNIX epoch nanoseconds.
    pub fn set_end_time_unix_nano(&mut self, nanos: u64) {
        self.msg.end_time_unix_nano = nanos;
    }

    /// The span's attribute set.
    pub fn attributes(&mut self) -> Attributes<'_> {
        Attributes::new(&mut self.msg.attributes)
    }

    /// Number of attributes dropped at the producer.
    pub fn dropped_attributes_count(&self) -> u32 {
        self.msg.dropped_attributes_count
    }

    /// Sets the number of attributes dropped at the producer.
    pub fn set_dropped_attributes_count(&mut self, count: u32) {
        self.msg.dropped_attributes_count = count;
    }

    /// The span's event list.
    pub fn events(&mut self) -> SpanEventSlice<'_> {
        SpanEventSlice::new(&mut self.msg.events)
    }

    /// Number of events dropped at the producer.
    pub fn dropped_events_count(&self) -> u32 {
        self.msg.dropped_events_count
    }

    /// Sets the number of events dropped at the producer.
    pub fn set_dropped_events_count(&mut self, count: u32) {
        self.msg.dropped_events_count = count;
    }

    /// The span's link list.
    pub fn links(&mut self) -> SpanLinkSlice<'_> {
        SpanLinkSlice::new(&mut self.msg.links)
    }

    /// Number of links dropped at the producer.
    pub fn dropped_links_count(&self) -> u32 {
        self.msg.dropped_links_count
    }

    /// Sets the number of links dropped at the producer.
    pub fn set_dropped_links_count(&mut self, count: u32) {
        self.msg.dropped_links_count = count;
    }

    /// The span's status, created empty (unset) if absent.
    pub fn status(&mut self) -> StatusView<'_> {
        StatusView::new(self.msg.status.get_or_insert_with(Default::default))
    }
}

/// A view over a span's status, aliasing it in place.
pub struct StatusView<'a> {
    msg: &'a mut trace::Status,
}

impl<'a> StatusView<'a> {
    pub(crate) fn new(msg: &'a mut trace::Status) -> Self {
        Self { msg }
    }

    /// The status code.
    pub fn code(&self) -> StatusCode {
        self.msg.code()
    }

    /// Sets the status code.
    ///
    /// Also writes the legacy numeric status field: `Unset` and `Ok` map to
    /// the legacy ok value, `Error` maps to the legacy unknown-error value.
    /// Receivers built against the legacy field depend on this dual-write.
    pub fn set_code(&mut self, code: StatusCode) {
        self.msg.set_code(code);
        match code {
            StatusCode::Unset | StatusCode::Ok => {
                self.msg.set_deprecated_code(DeprecatedStatusCode::Ok)
            }
            StatusCode::Error => self
                .msg
                .set_deprecated_code(DeprecatedStatusCode::UnknownError),
        }
    }

    /// The legacy numeric status code.
    pub fn deprecated_code(&self) -> DeprecatedStatusCode {
        self.msg.deprecated_code()
    }

    /// The developer-facing status message.
    pub fn message(&self) -> &str {
        &self.msg.message
    }

    /// Sets the developer-facing status message.
    pub fn set_message(&mut self, message: &str) {
        self.msg.message = message.to_string();
    }
}

pdata_slice!(
    /// A non-owning view over a span's events.
    SpanEventSlice,
    /// A view over one span event, aliasing it in place.
    SpanEventView,
    trace::span::Event
);

impl SpanEventView<'_> {
    /// The event timestamp, UNIX epoch nanoseconds.
    pub fn time_unix_nano(&self) -> u64 {
        self.msg.time_unix_nano
    }

    /// Sets the event timestamp, UNIX epoch nanoseconds.
    pub fn set_time_unix_nano(&mut self, nanos: u64) {
        self.msg.time_unix_nano = nanos;
    }

    /// The event name.
    pub fn name(&self) -> &str {
        &self.msg.name
    }

    /// Sets the event name.
    pub fn set_name(&mut self, name: &str) {
        self.msg.name = name.to_string();
    }

    /// The event's attribute set.
    pub fn attributes(&mut self) -> Attributes<'_> {
        Attributes::new(&mut self.msg.attributes)
    }

    /// Number of attributes dropped at the producer.
    pub fn dropped_attributes_count(&self) -> u32 {
        self.msg.dropped_attributes_count
    }

    /// Sets the number of attributes dropped at the producer.
    pub fn set_dropped_attributes_count(&mut self, count: u32) {
        self.msg.dropped_attributes_count = count;
    }
}

pdata_slice!(
    /// A non-owning view over a span's links.
    SpanLinkSlice,
    /// A view over one span link, aliasing it in place.
    SpanLinkView,
    trace::span::Link
);

impl SpanLinkView<'_> {
    /// The trace identifier of the linked span.
    pub fn trace_id(&self) -> TraceId {
        TraceId::from_slice(&self.msg.trace_id)
    }

    /// Sets the trace identifier of the linked span.
    pub fn set_trace_id(&mut self, id: TraceId) {
        self.msg.trace_id = id.to_bytes();
    }

    /// The identifier of the linked span.
    pub fn span_id(&self) -> SpanId {
        SpanId::from_slice(&self.msg.span_id)
    }

    /// Sets the identifier of the linked span.
    pub fn set_span_id(&mut self, id: SpanId) {
        self.msg.span_id = id.to_bytes();
    }

    /// The trace state associated with the link, verbatim.
    pub fn trace_state(&self) -> &str {
        &self.msg.trace_state
    }

    /// Sets the trace state associated with the link, verbatim.
    pub fn set_trace_state(&mut self, state: &str) {
        self.msg.trace_state = state.to_string();
    }

    /// The link's attribute set.
    pub fn attributes(&mut self) -> Attributes<'_> {
        Attributes::new(&mut self.msg.attributes)
    }

    /// Number of attributes dropped at the producer.
    pub fn dropped_attributes_count(&self) -> u32 {
        self.msg.dropped_attributes_count
    }

    /// Sets the number of attributes dropped at the producer.
    pub fn set_dropped_attributes_count(&mut self, count: u32) {
        self.msg.dropped_attributes_count = count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_traces(trace_byte: u8, spans_per_group: usize) -> Traces<'static> {
        let mut td = Traces::new();
        let mut groups = td.resource_spans();
        let mut group = groups.append();
        group.resource().attributes().upsert_string("service.name", "checkout");
        let mut libraries = group.instrumentation_library_spans();
        let mut library = libraries.append();
        library.instrumentation_library().set_name("otel-sdk");
        let mut spans = library.spans();
        for i in 0..spans_per_group {
            let mut span = spans.append();
            span.set_trace_id(TraceId::new([trace_byte; 16]));
            span.set_span_id(SpanId::new([i as u8 + 1; 8]));
            span.set_name("handle-request");
            span.set_kind(SpanKind::Server);
            span.set_start_time_unix_nano(1_000);
            span.set_end_time_unix_nano(2_000);
            span.attributes().upsert_int("http.status_code", 200);
        }
        td
    }

    #[test]
    fn new_traces_is_empty_but_initialized() {
        let mut td = Traces::new();
        assert_eq!(0, td.span_count());
        assert_eq!(0, td.resource_spans().len());
        assert!(td.to_wire_bytes().is_empty());
    }

    #[test]
    fn span_count_sums_all_groups() {
        let td = build_traces(1, 3);
        assert_eq!(3, td.span_count());
    }

    #[test]
    fn span_count_is_additive_over_concatenation() {
        let a = build_traces(1, 2);
        let b = build_traces(2, 5);
        let mut combined = Traces::new();
        combined.as_otlp_mut().extend_from_slice(a.as_otlp());
        combined.as_otlp_mut().extend_from_slice(b.as_otlp());
        assert_eq!(a.span_count() + b.span_count(), combined.span_count());
    }

    #[test]
    fn clone_is_deep_and_independent() {
        let mut original = build_traces(7, 2);
        let mut copy = original.clone();
        assert_eq!(original.span_count(), copy.span_count());
        assert_eq!(original.as_otlp(), copy.as_otlp());

        // Mutating the copy leaves the original alone, and vice versa.
        copy.resource_spans()
            .at(0)
            .instrumentation_library_spans()
            .at(0)
            .spans()
            .at(0)
            .set_name("renamed");
        assert_eq!(
            "handle-request",
            original
                .resource_spans()
                .at(0)
                .instrumentation_library_spans()
                .at(0)
                .spans()
                .at(0)
                .name()
        );

        original.resource_spans().at(0).instrumentation_library_spans().at(0).spans().append();
        assert_eq!(3, original.span_count());
        assert_eq!(2, copy.span_count());
    }

    #[test]
    fn wire_round_trip_preserves_counts_and_ids() {
        let td = build_traces(0xAB, 4);
        let bytes = td.to_wire_bytes();
        let mut back = Traces::new();
        back.from_wire_bytes(&bytes).unwrap();
        assert_eq!(td.span_count(), back.span_count());

        let ids = |t: &Traces<'_>| {
            t.as_otlp()
                .iter()
                .flat_map(|g| &g.instrumentation_library_spans)
                .flat_map(|l| &l.spans)
                .map(|s| {
                    (
                        TraceId::from_slice(&s.trace_id).hex_string(),
                        SpanId::from_slice(&s.span_id).hex_string(),
                    )
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(&td), ids(&back));
    }

    #[test]
    fn from_wire_bytes_failure_leaves_contents_untouched() {
        let mut td = build_traces(3, 1);
        // A lone 0xFF is a truncated field header, not a valid request.
        assert!(td.from_wire_bytes(&[0xFF]).is_err());
        assert_eq!(1, td.span_count());
    }

    #[test]
    fn bridged_storage_is_shared_both_ways() {
        let mut external = Vec::new();
        {
            let mut td = Traces::from_otlp(&mut external);
            let mut groups = td.resource_spans();
            let mut group = groups.append();
            group
                .instrumentation_library_spans()
                .append()
                .spans()
                .append()
                .set_name("bridged");
        }
        assert_eq!(1, external.len());
        assert_eq!("bridged", external[0].instrumentation_library_spans[0].spans[0].name);

        external[0].instrumentation_library_spans[0].spans[0].name = "renamed".to_string();
        let mut td = Traces::from_otlp(&mut external);
        assert_eq!(
            "renamed",
            td.resource_spans()
                .at(0)
                .instrumentation_library_spans()
                .at(0)
                .spans()
                .at(0)
                .name()
        );
    }

    #[test]
    fn size_matches_codec_computation() {
        let td = build_traces(9, 2);
        let expected: usize = td.as_otlp().iter().map(Message::encoded_len).sum();
        assert_eq!(expected, td.size());
        assert!(td.size() > 0);
    }

    #[test]
    fn status_setter_dual_writes_legacy_code() {
        let mut td = Traces::new();
        let mut groups = td.resource_spans();
        let mut group = groups.append();
        let mut libraries = group.instrumentation_library_spans();
        let mut library = libraries.append();
        let mut spans = library.spans();
        let mut span = spans.append();

        let mut status = span.status();
        status.set_code(StatusCode::Error);
        status.set_message("boom");
        assert_eq!(StatusCode::Error, status.code());
        assert_eq!(DeprecatedStatusCode::UnknownError, status.deprecated_code());

        status.set_code(StatusCode::Ok);
        assert_eq!(DeprecatedStatusCode::Ok, status.deprecated_code());

        status.set_code(StatusCode::Unset);
        assert_eq!(DeprecatedStatusCode::Ok, status.deprecated_code());
        assert_eq!("boom", status.message());
    }

    #[test]
    fn trace_state_is_stored_verbatim() {
        let mut td = Traces::new();
        let mut groups = td.resource_spans();
        let mut group = groups.append();
        let mut libraries = group.instrumentation_library_spans();
        let mut library = libraries.append();
        let mut spans = library.spans();
        let mut span = spans.append();
        let state = "congo=t61rcWkgMzE,rojo=00f067aa0ba902b7";
        span.set_trace_state(state);
        assert_eq!(state, span.trace_state());
    }

    #[test]
    #[should_panic]
    fn at_out_of_range_panics() {
        let mut td = Traces::new();
        let _ = td.resource_spans().at(0);
    }

    #[test]
    fn events_and_links_round_trip_through_views() {
        let mut td = Traces::new();
        let mut groups = td.resource_spans();
        let mut group = groups.append();
        let mut libraries = group.instrumentation_library_spans();
        let mut library = libraries.append();
        let mut spans = library.spans();
        let mut span = spans.append();

        let mut events = span.events();
        let mut event = events.append();
        event.set_name("exception");
        event.set_time_unix_nano(42);
        event.attributes().upsert_string("exception.type", "RuntimeError");
        assert_eq!(1, span.events().len());

        let mut links = span.links();
        let mut link = links.append();
        link.set_trace_id(TraceId::new([5; 16]));
        link.set_span_id(SpanId::new([6; 8]));
        link.set_trace_state("vendor=1");
        assert_eq!(1, span.links().len());
        assert_eq!("vendor=1", span.links().at(0).trace_state());
        assert!(span.links().at(0).trace_id().equal(&TraceId::new([5; 16])));
    }
}
