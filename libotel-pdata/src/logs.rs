// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The log tree: `Logs` → resource groups → instrumentation-library groups
//! → log records.

use crate::attributes::{Attributes, ValueView};
use crate::common::{InstrumentationLibraryView, ResourceView};
use crate::ids::{SpanId, TraceId};
use crate::slice::{pdata_slice, Storage};
use libotel_protobuf::envelope;
use libotel_protobuf::pb::collector::ExportLogsServiceRequest;
use libotel_protobuf::pb::logs;
use prost::Message;

pub use libotel_protobuf::pb::logs::SeverityNumber;

/// The root value passed between pipeline stages for the log signal.
///
/// Ownership and bridging semantics are identical to
/// [`Traces`](crate::trace::Traces).
pub struct Logs<'a> {
    groups: Storage<'a, logs::ResourceLogs>,
}

impl Logs<'static> {
    /// Creates a new, exclusively-owned, empty log tree.
    pub fn new() -> Self {
        Logs {
            groups: Storage::Owned(Vec::new()),
        }
    }
}

impl Default for Logs<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Logs<'a> {
    /// Wraps externally-owned wire-schema storage without copying; the
    /// storage stays shared with the external owner.
    pub fn from_otlp(groups: &'a mut Vec<logs::ResourceLogs>) -> Self {
        Logs {
            groups: Storage::Borrowed(groups),
        }
    }
}

impl Logs<'_> {
    /// Borrows the tree as its wire-schema groups.
    pub fn as_otlp(&self) -> &[logs::ResourceLogs] {
        self.groups.rows()
    }

    /// Mutably borrows the tree as its wire-schema groups.
    pub fn as_otlp_mut(&mut self) -> &mut Vec<logs::ResourceLogs> {
        self.groups.rows_mut()
    }

    /// A slice view over the top-level resource groups.
    pub fn resource_logs(&mut self) -> ResourceLogsSlice<'_> {
        ResourceLogsSlice::new(self.groups.rows_mut())
    }

    /// Total number of log records across every resource-group ×
    /// instrumentation-library-group pair.
    pub fn log_record_count(&self) -> usize {
        self.groups
            .rows()
            .iter()
            .map(|group| {
                group
                    .instrumentation_library_logs
                    .iter()
                    .map(|library| library.log_records.len())
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
        envelope::encode_logs_request(self.groups.rows())
    }

    /// Replaces the tree's contents by parsing an export-request envelope.
    /// On a parse failure the prior contents are left untouched.
    pub fn from_wire_bytes(&mut self, data: &[u8]) -> Result<(), prost::DecodeError> {
        let request = ExportLogsServiceRequest::decode(data)?;
        *self.groups.rows_mut() = request.resource_logs;
        Ok(())
    }
}

impl Clone for Logs<'_> {
    /// Deep copy into newly allocated, owned storage; shares nothing with
    /// the original.
    fn clone(&self) -> Self {
        Logs {
            groups: Storage::Owned(self.groups.rows().clone()),
        }
    }
}

pdata_slice!(
    /// A non-owning view over the top-level resource groups of a [`Logs`].
    ResourceLogsSlice,
    /// A view over one resource group, aliasing it in place.
    ResourceLogsView,
    logs::ResourceLogs
);

impl ResourceLogsView<'_> {
    /// The resource descriptor for this group, created empty if absent.
    pub fn resource(&mut self) -> ResourceView<'_> {
        ResourceView::new(self.msg.resource.get_or_insert_with(Default::default))
    }

    /// The instrumentation-library groups within this resource group.
    pub fn instrumentation_library_logs(&mut self) -> InstrumentationLibraryLogsSlice<'_> {
        InstrumentationLibraryLogsSlice::new(&mut self.msg.instrumentation_library_logs)
    }
}

pdata_slice!(
    /// A non-owning view over the instrumentation-library groups of a
    /// resource group.
    InstrumentationLibraryLogsSlice,
    /// A view over one instrumentation-library group, aliasing it in place.
    InstrumentationLibraryLogsView,
    logs::InstrumentationLibraryLogs
);

impl InstrumentationLibraryLogsView<'_> {
    /// The instrumentation-library descriptor, created empty if absent.
    pub fn instrumentation_library(&mut self) -> InstrumentationLibraryView<'_> {
        InstrumentationLibraryView::new(
            self.msg
                .instrumentation_library
                .get_or_insert_with(Default::default),
        )
    }

    /// The log records owned by this group.
    pub fn log_records(&mut self) -> LogRecordSlice<'_> {
        LogRecordSlice::new(&mut self.msg.log_records)
    }
}

pdata_slice!(
    /// A non-owning view over the log records of an instrumentation-library
    /// group.
    LogRecordSlice,
    /// A view over one log record, aliasing it in place.
    LogRecordView,
    logs::LogRecord
);

impl LogRecordView<'_> {
    /// The record timestamp, UNIX epoch nanoseconds; 0 means unknown.
    pub fn time_unix_nano(&self) -> u64 {
        self.msg.time_unix_nano
    }

    /// Sets the record timestamp, UNIX epoch nanoseconds.
    pub fn set_time_unix_nano(&mut self, nanos: u64) {
        self.msg.time_unix_nano = nanos;
    }

    /// The normalized severity.
    pub fn severity_number(&self) -> SeverityNumber {
        self.msg.severity_number()
    }

    /// Sets the normalized severity.
    pub fn set_severity_number(&mut self, severity: SeverityNumber) {
        self.msg.set_severity_number(severity);
    }

    /// The severity text as known at the source.
    pub fn severity_text(&self) -> &str {
        &self.msg.severity_text
    }

    /// Sets the severity text.
    pub fn set_severity_text(&mut self, text: &str) {
        self.msg.severity_text = text.to_string();
    }

    /// The short event identifier.
    pub fn name(&self) -> &str {
        &self.msg.name
    }

    /// Sets the short event identifier.
    pub fn set_name(&mut self, name: &str) {
        self.msg.name = name.to_string();
    }

    /// The record body, created empty if absent.
    pub fn body(&mut self) -> ValueView<'_> {
        ValueView::new(self.msg.body.get_or_insert_with(Default::default))
    }

    /// The record's attribute set.
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

    /// The record flags (trace flags in the 8 least significant bits).
    pub fn flags(&self) -> u32 {
        self.msg.flags
    }

    /// Sets the record flags.
    pub fn set_flags(&mut self, flags: u32) {
        self.msg.flags = flags;
    }

    /// The identifier of the trace this record belongs to, if any.
    pub fn trace_id(&self) -> TraceId {
        TraceId::from_slice(&self.msg.trace_id)
    }

    /// Sets the trace identifier.
    pub fn set_trace_id(&mut self, id: TraceId) {
        self.msg.trace_id = id.to_bytes();
    }

    /// The identifier of the span this record belongs to, if any.
    pub fn span_id(&self) -> SpanId {
        SpanId::from_slice(&self.msg.span_id)
    }

    /// Sets the span identifier.
    pub fn set_span_id(&mut self, id: SpanId) {
        self.msg.span_id = id.to_bytes();
    }
}
