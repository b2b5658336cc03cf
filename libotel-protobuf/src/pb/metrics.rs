// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// A collection of InstrumentationLibraryMetrics from a Resource.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ResourceMetrics {
    /// The resource for the metrics in this message. If this field is not set then no
    /// resource info is known.
    #[prost(message, optional, tag = "1")]
    pub resource: ::core::option::Option<super::resource::Resource>,
    /// A list of metrics that originate from a resource.
    #[prost(message, repeated, tag = "2")]
    pub instrumentation_library_metrics: ::prost::alloc::vec::Vec<InstrumentationLibraryMetrics>,
}
/// A collection of Metrics produced by an InstrumentationLibrary.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InstrumentationLibraryMetrics {
    /// The instrumentation library information for the metrics in this message.
    /// Semantically when InstrumentationLibrary isn't set, it is equivalent with
    /// an empty instrumentation library name (unknown).
    #[prost(message, optional, tag = "1")]
    pub instrumentation_library: ::core::option::Option<super::common::InstrumentationLibrary>,
    /// A list of metrics that originate from an instrumentation library.
    #[prost(message, repeated, tag = "2")]
    pub metrics: ::prost::alloc::vec::Vec<Metric>,
}
/// Defines a Metric which has one or more timeseries.
///
/// The data model and relation between entities is shown in the diagram below.
///
/// - Metric is composed of metadata and data.
/// - Metadata part contains a name, description, unit.
/// - Data is one of the possible types (Gauge, Sum, Histogram, Summary).
/// - DataPoint contains timestamps, attributes, and one of the possible value type
///   fields.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Metric {
    /// name of the metric, including its DNS name prefix. It must be unique.
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    /// description of the metric, which can be used in documentation.
    #[prost(string, tag = "2")]
    pub description: ::prost::alloc::string::String,
    /// unit in which the metric value is reported. Follows the format described by
    /// <http://unitsofmeasure.org/ucum.html>.
    #[prost(string, tag = "3")]
    pub unit: ::prost::alloc::string::String,
    /// Data determines the aggregation type (if any) of the metric, what is the
    /// reported value type for the data points, as well as the relationship to the
    /// time interval over which they are reported.
    #[prost(oneof = "metric::Data", tags = "5, 7, 9, 11")]
    pub data: ::core::option::Option<metric::Data>,
}
/// Nested message and enum types in `Metric`.
pub mod metric {
    /// Data determines the aggregation type (if any) of the metric, what is the
    /// reported value type for the data points, as well as the relationship to the
    /// time interval over which they are reported.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Data {
        #[prost(message, tag = "5")]
        Gauge(super::Gauge),
        #[prost(message, tag = "7")]
        Sum(super::Sum),
        #[prost(message, tag = "9")]
        Histogram(super::Histogram),
        #[prost(message, tag = "11")]
        Summary(super::Summary),
    }
}
/// Gauge represents the type of a scalar metric that always exports the "current
/// value" for every data point. It should be used for an "unknown" aggregation.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Gauge {
    #[prost(message, repeated, tag = "1")]
    pub data_points: ::prost::alloc::vec::Vec<NumberDataPoint>,
}
/// Sum represents the type of a scalar metric that is calculated as a sum of all
/// reported measurements over a time interval.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Sum {
    #[prost(message, repeated, tag = "1")]
    pub data_points: ::prost::alloc::vec::Vec<NumberDataPoint>,
    /// aggregation_temporality describes if the aggregator reports delta changes since
    /// last report time, or cumulative changes since a fixed start time.
    #[prost(enumeration = "AggregationTemporality", tag = "2")]
    pub aggregation_temporality: i32,
    /// If "true" means that the sum is monotonic.
    #[prost(bool, tag = "3")]
    pub is_monotonic: bool,
}
/// Histogram represents the type of a metric that is calculated by aggregating as a
/// Histogram of all reported measurements over a time interval.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Histogram {
    #[prost(message, repeated, tag = "1")]
    pub data_points: ::prost::alloc::vec::Vec<HistogramDataPoint>,
    /// aggregation_temporality describes if the aggregator reports delta changes since
    /// last report time, or cumulative changes since a fixed start time.
    #[prost(enumeration = "AggregationTemporality", tag = "2")]
    pub aggregation_temporality: i32,
}
/// Summary metric data are used to convey quantile summaries, a Prometheus (see:
/// <https://prometheus.io/docs/concepts/metric_types/#summary>) data type.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Summary {
    #[prost(message, repeated, tag = "1")]
    pub data_points: ::prost::alloc::vec::Vec<SummaryDataPoint>,
}
/// NumberDataPoint is a single data point in a timeseries that describes the
/// time-varying scalar value of a metric.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NumberDataPoint {
    /// The set of key/value pairs that uniquely identify the timeseries from where this
    /// point belongs.
    #[prost(message, repeated, tag = "7")]
    pub attributes: ::prost::alloc::vec::Vec<super::common::KeyValue>,
    /// StartTimeUnixNano is optional but strongly encouraged, see the detailed comments
    /// above Metric. Value is UNIX Epoch time in nanoseconds since 00:00:00 UTC on
    /// 1 January 1970.
    #[prost(fixed64, tag = "2")]
    pub start_time_unix_nano: u64,
    /// TimeUnixNano is required, see the detailed comments above Metric. Value is UNIX
    /// Epoch time in nanoseconds since 00:00:00 UTC on 1 January 1970.
    #[prost(fixed64, tag = "3")]
    pub time_unix_nano: u64,
    /// The value itself. A point is considered invalid when one of the recognized value
    /// fields is not present inside this oneof.
    #[prost(oneof = "number_data_point::Value", tags = "4, 6")]
    pub value: ::core::option::Option<number_data_point::Value>,
}
/// Nested message and enum types in `NumberDataPoint`.
pub mod number_data_point {
    /// The value itself. A point is considered invalid when one of the recognized value
    /// fields is not present inside this oneof.
    #[derive(Clone, Copy, PartialEq, ::prost::Oneof)]
    pub enum Value {
        #[prost(double, tag = "4")]
        AsDouble(f64),
        #[prost(sfixed64, tag = "6")]
        AsInt(i64),
    }
}
/// HistogramDataPoint is a single data point in a timeseries that describes the
/// time-varying values of a Histogram. A Histogram contains summary statistics for a
/// population of values, it may optionally contain the distribution of those values
/// across a set of buckets.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HistogramDataPoint {
    /// The set of key/value pairs that uniquely identify the timeseries from where this
    /// point belongs.
    #[prost(message, repeated, tag = "9")]
    pub attributes: ::prost::alloc::vec::Vec<super::common::KeyValue>,
    /// StartTimeUnixNano is optional but strongly encouraged, see the detailed comments
    /// above Metric. Value is UNIX Epoch time in nanoseconds since 00:00:00 UTC on
    /// 1 January 1970.
    #[prost(fixed64, tag = "2")]
    pub start_time_unix_nano: u64,
    /// TimeUnixNano is required, see the detailed comments above Metric. Value is UNIX
    /// Epoch time in nanoseconds since 00:00:00 UTC on 1 January 1970.
    #[prost(fixed64, tag = "3")]
    pub time_unix_nano: u64,
    /// count is the number of values in the population. Must be non-negative. This
    /// value must be equal to the sum of the "count" fields in buckets if a histogram
    /// is provided.
    #[prost(fixed64, tag = "4")]
    pub count: u64,
    /// sum of the values in the population. If count is zero then this field must be
    /// zero.
    #[prost(double, tag = "5")]
    pub sum: f64,
    /// bucket_counts is an optional field contains the count values of histogram for
    /// each bucket.
    ///
    /// The sum of the bucket_counts must equal the value in the count field.
    ///
    /// The number of elements in bucket_counts array must be by one greater than the
    /// number of elements in explicit_bounds array.
    #[prost(fixed64, repeated, tag = "6")]
    pub bucket_counts: ::prost::alloc::vec::Vec<u64>,
    /// explicit_bounds specifies buckets with explicitly defined bounds for values.
    ///
    /// The boundaries for bucket at index i are:
    ///
    /// (-infinity, explicit_bounds\[i\]\] for i == 0
    /// (explicit_bounds\[i-1\], explicit_bounds\[i\]\] for 0 < i < size(explicit_bounds)
    /// (explicit_bounds\[i-1\], +infinity) for i == size(explicit_bounds)
    ///
    /// The values in the explicit_bounds array must be strictly increasing.
    #[prost(double, repeated, tag = "7")]
    pub explicit_bounds: ::prost::alloc::vec::Vec<f64>,
}
/// SummaryDataPoint is a single data point in a timeseries that describes the
/// time-varying values of a Summary metric.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SummaryDataPoint {
    /// The set of key/value pairs that uniquely identify the timeseries from where this
    /// point belongs.
    #[prost(message, repeated, tag = "7")]
    pub attributes: ::prost::alloc::vec::Vec<super::common::KeyValue>,
    /// StartTimeUnixNano is optional but strongly encouraged, see the detailed comments
    /// above Metric. Value is UNIX Epoch time in nanoseconds since 00:00:00 UTC on
    /// 1 January 1970.
    #[prost(fixed64, tag = "2")]
    pub start_time_unix_nano: u64,
    /// TimeUnixNano is required, see the detailed comments above Metric. Value is UNIX
    /// Epoch time in nanoseconds since 00:00:00 UTC on 1 January 1970.
    #[prost(fixed64, tag = "3")]
    pub time_unix_nano: u64,
    /// count is the number of values in the population. Must be non-negative.
    #[prost(fixed64, tag = "4")]
    pub count: u64,
    /// sum of the values in the population. If count is zero then this field must be
    /// zero.
    #[prost(double, tag = "5")]
    pub sum: f64,
    /// (Optional) list of values at different quantiles of the distribution calculated
    /// from the current snapshot. The quantiles must be strictly increasing.
    #[prost(message, repeated, tag = "6")]
    pub quantile_values: ::prost::alloc::vec::Vec<summary_data_point::ValueAtQuantile>,
}
/// Nested message and enum types in `SummaryDataPoint`.
pub mod summary_data_point {
    /// Represents the value at a given quantile of a distribution.
    ///
    /// To record Min and Max values following conventions are used:
    /// - The 1.0 quantile is equivalent to the maximum value observed.
    /// - The 0.0 quantile is equivalent to the minimum value observed.
    #[derive(Clone, Copy, PartialEq, ::prost::Message)]
    pub struct ValueAtQuantile {
        /// The quantile of a distribution. Must be in the interval \[0.0, 1.0\].
        #[prost(double, tag = "1")]
        pub quantile: f64,
        /// The value at the given quantile of a distribution.
        ///
        /// Quantile values must NOT be negative.
        #[prost(double, tag = "2")]
        pub value: f64,
    }
}
/// AggregationTemporality defines how a metric aggregator reports aggregated values.
/// It describes how those values relate to the time interval over which they are
/// aggregated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum AggregationTemporality {
    /// UNSPECIFIED is the default AggregationTemporality, it MUST not be used.
    Unspecified = 0,
    /// DELTA is an AggregationTemporality for a metric aggregator which reports changes
    /// since last report time.
    Delta = 1,
    /// CUMULATIVE is an AggregationTemporality for a metric aggregator which reports
    /// changes since a fixed start time.
    Cumulative = 2,
}
impl AggregationTemporality {
    /// String value of the enum field names used in the ProtoBuf definition.
    ///
    /// The values are not transformed in any way and thus are considered stable
    /// (if the ProtoBuf definition does not change) and safe for programmatic use.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            AggregationTemporality::Unspecified => "AGGREGATION_TEMPORALITY_UNSPECIFIED",
            AggregationTemporality::Delta => "AGGREGATION_TEMPORALITY_DELTA",
            AggregationTemporality::Cumulative => "AGGREGATION_TEMPORALITY_CUMULATIVE",
        }
    }
    /// Creates an enum from field names used in the ProtoBuf definition.
    pub fn from_str_name(value: &str) -> ::core::option::Option<Self> {
        match value {
            "AGGREGATION_TEMPORALITY_UNSPECIFIED" => Some(Self::Unspecified),
            "AGGREGATION_TEMPORALITY_DELTA" => Some(Self::Delta),
            "AGGREGATION_TEMPORALITY_CUMULATIVE" => Some(Self::Cumulative),
            _ => None,
        }
    }
}
