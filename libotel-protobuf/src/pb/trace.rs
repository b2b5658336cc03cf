// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// A collection of InstrumentationLibrarySpans from a Resource.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceSpans {
    /// The resource for the spans in this message. If this field is not set then no
    /// resource info is known.
    #[prost(message, optional, tag = "1")]
    pub resource: ::core::option::Option<super::resource::Resource>,
    /// A list of InstrumentationLibrarySpans that originate from a resource.
    #[prost(message, repeated, tag = "2")]
    pub instrumentation_library_spans: ::prost::alloc::vec::Vec<InstrumentationLibrarySpans>,
}
/// A collection of Spans produced by an InstrumentationLibrary.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InstrumentationLibrarySpans {
    /// The instrumentation library information for the spans in this message.
    /// Semantically when InstrumentationLibrary isn't set, it is equivalent with
    /// an empty instrumentation library name (unknown).
    #[prost(message, optional, tag = "1")]
    pub instrumentation_library: ::core::option::Option<super::common::InstrumentationLibrary>,
    /// A list of Spans that originate from an instrumentation library.
    #[prost(message, repeated, tag = "2")]
    pub spans: ::prost::alloc::vec::Vec<Span>,
}
/// Span represents a single operation within a trace. Spans can be nested to form a
/// trace tree. Spans may also be linked to other spans from the same or different
/// trace and form graphs. Often, a trace contains a root span that describes the
/// end-to-end latency, and one or more subspans for its sub-operations.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Span {
    /// A unique identifier for a trace. All spans from the same trace share the same
    /// `trace_id`. The ID is a 16-byte array. An ID with all zeroes is considered invalid.
    #[prost(bytes = "vec", tag = "1")]
    pub trace_id: ::prost::alloc::vec::Vec<u8>,
    /// A unique identifier for a span within a trace, assigned when the span is created.
    /// The ID is an 8-byte array. An ID with all zeroes is considered invalid.
    #[prost(bytes = "vec", tag = "2")]
    pub span_id: ::prost::alloc::vec::Vec<u8>,
    /// trace_state conveys information about request position in multiple distributed
    /// tracing graphs. It is a trace_state in w3c-trace-context format:
    /// <https://www.w3.org/TR/trace-context/#tracestate-header>
    #[prost(string, tag = "3")]
    pub trace_state: ::prost::alloc::string::String,
    /// The `span_id` of this span's parent span. If this is a root span, then this field
    /// must be empty. The ID is an 8-byte array.
    #[prost(bytes = "vec", tag = "4")]
    pub parent_span_id: ::prost::alloc::vec::Vec<u8>,
    /// A description of the span's operation.
    #[prost(string, tag = "5")]
    pub name: ::prost::alloc::string::String,
    /// Distinguishes between spans generated in a particular context. For example, two
    /// spans with the same name may be distinguished using `CLIENT` (caller) and
    /// `SERVER` (callee) to identify queueing latency associated with the span.
    #[prost(enumeration = "span::SpanKind", tag = "6")]
    pub kind: i32,
    /// start_time_unix_nano is the start time of the span. On the client side, this is
    /// the time kept by the local machine where the span execution starts. On the server
    /// side, this is the time when the server's application handler starts running.
    /// Value is UNIX Epoch time in nanoseconds since 00:00:00 UTC on 1 January 1970.
    #[prost(fixed64, tag = "7")]
    pub start_time_unix_nano: u64,
    /// end_time_unix_nano is the end time of the span. On the client side, this is the
    /// time kept by the local machine where the span execution ends. On the server side,
    /// this is the time when the server application handler stops running.
    /// Value is UNIX Epoch time in nanoseconds since 00:00:00 UTC on 1 January 1970.
    #[prost(fixed64, tag = "8")]
    pub end_time_unix_nano: u64,
    /// attributes is a collection of key/value pairs. The value can be a string, an
    /// integer, a double or the Boolean values `true` or `false`.
    #[prost(message, repeated, tag = "9")]
    pub attributes: ::prost::alloc::vec::Vec<super::common::KeyValue>,
    /// dropped_attributes_count is the number of attributes that were discarded.
    /// Attributes can be discarded because their keys are too long or because there are
    /// too many attributes. If this value is 0, then no attributes were dropped.
    #[prost(uint32, tag = "10")]
    pub dropped_attributes_count: u32,
    /// events is a collection of Event items.
    #[prost(message, repeated, tag = "11")]
    pub events: ::prost::alloc::vec::Vec<span::Event>,
    /// dropped_events_count is the number of dropped events. If the value is 0, then no
    /// events were dropped.
    #[prost(uint32, tag = "12")]
    pub dropped_events_count: u32,
    /// links is a collection of Links, which are references from this span to a span in
    /// the same or different trace.
    #[prost(message, repeated, tag = "13")]
    pub links: ::prost::alloc::vec::Vec<span::Link>,
    /// dropped_links_count is the number of dropped links after the maximum size was
    /// enforced. If this value is 0, then no links were dropped.
    #[prost(uint32, tag = "14")]
    pub dropped_links_count: u32,
    /// An optional final status for this span. Semantically when Status isn't set, it
    /// means span's status code is unset, i.e. assume STATUS_CODE_UNSET (code = 0).
    #[prost(message, optional, tag = "15")]
    pub status: ::core::option::Option<Status>,
}
/// Nested message and enum types in `Span`.
pub mod span {
    /// Event is a time-stamped annotation of the span, consisting of user-supplied
    /// text description and key-value pairs.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Event {
        /// time_unix_nano is the time the event occurred.
        #[prost(fixed64, tag = "1")]
        pub time_unix_nano: u64,
        /// name of the event. This field is semantically required to be set to non-empty
        /// string.
        #[prost(string, tag = "2")]
        pub name: ::prost::alloc::string::String,
        /// attributes is a collection of attribute key/value pairs on the event.
        #[prost(message, repeated, tag = "3")]
        pub attributes: ::prost::alloc::vec::Vec<super::super::common::KeyValue>,
        /// dropped_attributes_count is the number of dropped attributes. If the value is
        /// 0, then no attributes were dropped.
        #[prost(uint32, tag = "4")]
        pub dropped_attributes_count: u32,
    }
    /// A pointer from the current span to another span in the same trace or in a
    /// different trace. For example, this can be used in batching operations, where a
    /// single batch handler processes multiple requests from different traces or when
    /// the handler receives a request from a different project.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Link {
        /// A unique identifier of a trace that this linked span is part of. The ID is a
        /// 16-byte array.
        #[prost(bytes = "vec", tag = "1")]
        pub trace_id: ::prost::alloc::vec::Vec<u8>,
        /// A unique identifier for the linked span. The ID is an 8-byte array.
        #[prost(bytes = "vec", tag = "2")]
        pub span_id: ::prost::alloc::vec::Vec<u8>,
        /// The trace_state associated with the link.
        #[prost(string, tag = "3")]
        pub trace_state: ::prost::alloc::string::String,
        /// attributes is a collection of attribute key/value pairs on the link.
        #[prost(message, repeated, tag = "4")]
        pub attributes: ::prost::alloc::vec::Vec<super::super::common::KeyValue>,
        /// dropped_attributes_count is the number of dropped attributes. If the value is
        /// 0, then no attributes were dropped.
        #[prost(uint32, tag = "5")]
        pub dropped_attributes_count: u32,
    }
    /// SpanKind is the type of span. Can be used to specify additional relationships
    /// between spans in addition to a parent/child relationship.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum SpanKind {
        /// Unspecified. Do NOT use as default. Implementations MAY assume SpanKind to be
        /// INTERNAL when receiving UNSPECIFIED.
        Unspecified = 0,
        /// Indicates that the span represents an internal operation within an
        /// application, as opposed to an operation happening at the boundaries.
        Internal = 1,
        /// Indicates that the span covers server-side handling of an RPC or other remote
        /// network request.
        Server = 2,
        /// Indicates that the span describes a request to some remote service.
        Client = 3,
        /// Indicates that the span describes a producer sending a message to a broker.
        /// Unlike CLIENT and SERVER, there is often no direct critical path latency
        /// relationship between producer and consumer spans.
        Producer = 4,
        /// Indicates that the span describes consumer receiving a message from a broker.
        /// Like the PRODUCER kind, there is often no direct critical path latency
        /// relationship between producer and consumer spans.
        Consumer = 5,
    }
    impl SpanKind {
        /// String value of the enum field names used in the ProtoBuf definition.
        ///
        /// The values are not transformed in any way and thus are considered stable
        /// (if the ProtoBuf definition does not change) and safe for programmatic use.
        pub fn as_str_name(&self) -> &'static str {
            match self {
                SpanKind::Unspecified => "SPAN_KIND_UNSPECIFIED",
                SpanKind::Internal => "SPAN_KIND_INTERNAL",
                SpanKind::Server => "SPAN_KIND_SERVER",
                SpanKind::Client => "SPAN_KIND_CLIENT",
                SpanKind::Producer => "SPAN_KIND_PRODUCER",
                SpanKind::Consumer => "SPAN_KIND_CONSUMER",
            }
        }
        /// Creates an enum from field names used in the ProtoBuf definition.
        pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
            match value {
                "SPAN_KIND_UNSPECIFIED" => Some(Self::Unspecified),
                "SPAN_KIND_INTERNAL" => Some(Self::Internal),
                "SPAN_KIND_SERVER" => Some(Self::Server),
                "SPAN_KIND_CLIENT" => Some(Self::Client),
                "SPAN_KIND_PRODUCER" => Some(Self::Producer),
                "SPAN_KIND_CONSUMER" => Some(Self::Consumer),
                _ => None,
            }
        }
    }
}
/// The Status type defines a logical error model that is suitable for different
/// programming environments, including REST APIs and RPC APIs.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Status {
    /// The deprecated status code. This is an optional field.
    ///
    /// This field is deprecated and is replaced by the `code` field below. See backward
    /// compatibility notes below. According to our stability guarantees this field will
    /// be removed in 12 months, on Oct 22, 2021. All usage of old senders and receivers
    /// that do not understand the `code` field MUST be phased out by then.
    #[prost(enumeration = "status::DeprecatedStatusCode", tag = "1")]
    pub deprecated_code: i32,
    /// A developer-facing human readable error message.
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
    /// The status code.
    #[prost(enumeration = "status::StatusCode", tag = "3")]
    pub code: i32,
}
/// Nested message and enum types in `Status`.
pub mod status {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum DeprecatedStatusCode {
        Ok = 0,
        Cancelled = 1,
        UnknownError = 2,
        InvalidArgument = 3,
        DeadlineExceeded = 4,
        NotFound = 5,
        AlreadyExists = 6,
        PermissionDenied = 7,
        ResourceExhausted = 8,
        FailedPrecondition = 9,
        Aborted = 10,
        OutOfRange = 11,
        Unimplemented = 12,
        InternalError = 13,
        Unavailable = 14,
        DataLoss = 15,
        Unauthenticated = 16,
    }
    impl DeprecatedStatusCode {
        /// String value of the enum field names used in the ProtoBuf definition.
        ///
        /// The values are not transformed in any way and thus are considered stable
        /// (if the ProtoBuf definition does not change) and safe for programmatic use.
        pub fn as_str_name(&self) -> &'static str {
            match self {
                DeprecatedStatusCode::Ok => "DEPRECATED_STATUS_CODE_OK",
                DeprecatedStatusCode::Cancelled => "DEPRECATED_STATUS_CODE_CANCELLED",
                DeprecatedStatusCode::UnknownError => "DEPRECATED_STATUS_CODE_UNKNOWN_ERROR",
                DeprecatedStatusCode::InvalidArgument => {
                    "DEPRECATED_STATUS_CODE_INVALID_ARGUMENT"
                }
                DeprecatedStatusCode::DeadlineExceeded => {
                    "DEPRECATED_STATUS_CODE_DEADLINE_EXCEEDED"
                }
                DeprecatedStatusCode::NotFound => "DEPRECATED_STATUS_CODE_NOT_FOUND",
                DeprecatedStatusCode::AlreadyExists => "DEPRECATED_STATUS_CODE_ALREADY_EXISTS",
                DeprecatedStatusCode::PermissionDenied => {
                    "DEPRECATED_STATUS_CODE_PERMISSION_DENIED"
                }
                DeprecatedStatusCode::ResourceExhausted => {
                    "DEPRECATED_STATUS_CODE_RESOURCE_EXHAUSTED"
                }
                DeprecatedStatusCode::FailedPrecondition => {
                    "DEPRECATED_STATUS_CODE_FAILED_PRECONDITION"
                }
                DeprecatedStatusCode::Aborted => "DEPRECATED_STATUS_CODE_ABORTED",
                DeprecatedStatusCode::OutOfRange => "DEPRECATED_STATUS_CODE_OUT_OF_RANGE",
                DeprecatedStatusCode::Unimplemented => "DEPRECATED_STATUS_CODE_UNIMPLEMENTED",
                DeprecatedStatusCode::InternalError => "DEPRECATED_STATUS_CODE_INTERNAL_ERROR",
                DeprecatedStatusCode::Unavailable => "DEPRECATED_STATUS_CODE_UNAVAILABLE",
                DeprecatedStatusCode::DataLoss => "DEPRECATED_STATUS_CODE_DATA_LOSS",
                DeprecatedStatusCode::Unauthenticated => "DEPRECATED_STATUS_CODE_UNAUTHENTICATED",
            }
        }
        /// Creates an enum from field names used in the ProtoBuf definition.
        pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
            match value {
                "DEPRECATED_STATUS_CODE_OK" => Some(Self::Ok),
                "DEPRECATED_STATUS_CODE_CANCELLED" => Some(Self::Cancelled),
                "DEPRECATED_STATUS_CODE_UNKNOWN_ERROR" => Some(Self::UnknownError),
                "DEPRECATED_STATUS_CODE_INVALID_ARGUMENT" => Some(Self::InvalidArgument),
                "DEPRECATED_STATUS_CODE_DEADLINE_EXCEEDED" => Some(Self::DeadlineExceeded),
                "DEPRECATED_STATUS_CODE_NOT_FOUND" => Some(Self::NotFound),
                "DEPRECATED_STATUS_CODE_ALREADY_EXISTS" => Some(Self::AlreadyExists),
                "DEPRECATED_STATUS_CODE_PERMISSION_DENIED" => Some(Self::PermissionDenied),
                "DEPRECATED_STATUS_CODE_RESOURCE_EXHAUSTED" => Some(Self::ResourceExhausted),
                "DEPRECATED_STATUS_CODE_FAILED_PRECONDITION" => Some(Self::FailedPrecondition),
                "DEPRECATED_STATUS_CODE_ABORTED" => Some(Self::Aborted),
                "DEPRECATED_STATUS_CODE_OUT_OF_RANGE" => Some(Self::OutOfRange),
                "DEPRECATED_STATUS_CODE_UNIMPLEMENTED" => Some(Self::Unimplemented),
                "DEPRECATED_STATUS_CODE_INTERNAL_ERROR" => Some(Self::InternalError),
                "DEPRECATED_STATUS_CODE_UNAVAILABLE" => Some(Self::Unavailable),
                "DEPRECATED_STATUS_CODE_DATA_LOSS" => Some(Self::DataLoss),
                "DEPRECATED_STATUS_CODE_UNAUTHENTICATED" => Some(Self::Unauthenticated),
                _ => None,
            }
        }
    }
    /// StatusCode mirrors the status codes defined by the tracing API specification.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum StatusCode {
        /// The default status.
        Unset = 0,
        /// The Span has been validated by an Application developer or Operator to have
        /// completed successfully.
        Ok = 1,
        /// The Span contains an error.
        Error = 2,
    }
    impl StatusCode {
        /// String value of the enum field names used in the ProtoBuf definition.
        ///
        /// The values are not transformed in any way and thus are considered stable
        /// (if the ProtoBuf definition does not change) and safe for programmatic use.
        pub fn as_str_name(&self) -> &'static str {
            match self {
                StatusCode::Unset => "STATUS_CODE_UNSET",
                StatusCode::Ok => "STATUS_CODE_OK",
                StatusCode::Error => "STATUS_CODE_ERROR",
            }
        }
        /// Creates an enum from field names used in the ProtoBuf definition.
        pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
            match value {
                "STATUS_CODE_UNSET" => Some(Self::Unset),
                "STATUS_CODE_OK" => Some(Self::Ok),
                "STATUS_CODE_ERROR" => Some(Self::Error),
                _ => None,
            }
        }
    }
}
