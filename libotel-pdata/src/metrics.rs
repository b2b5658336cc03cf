// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The metric tree: `Metrics` → resource groups → instrumentation-library
//! groups → metrics → data points.

use crate::attributes::Attributes;
use crate::common::{InstrumentationLibraryView, ResourceView};
use crate::slice::{pdata_slice, Storage};
use libotel_protobuf::envelope;
use libotel_protobuf::pb::collector::ExportMetricsServiceRequest;
use libotel_protobuf::pb::metrics;
use libotel_protobuf::pb::metrics::metric::Data;
use libotel_protobuf::pb::metrics::number_data_point::Value as PointValue;
use prost::Message;

pub use libotel_protobuf::pb::metrics::AggregationTemporality;

/// The root value passed between pipeline stages for the metric signal.
///
/// Ownership and bridging semantics are identical to
/// [`Traces`](crate::trace::Traces).
pub struct Metrics<'a> {
    groups: Storage<'a, metrics::ResourceMetrics>,
}

impl Metrics<'static> {
    /// Creates a new, exclusively-owned, empty metric tree.
    pub fn new() -> Self {
        Metrics {
            groups: Storage::Owned(Vec::new()),
        }
    }
}

impl Default for Metrics<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Metrics<'a> {
    /// Wraps externally-owned wire-schema storage without copying; the
    /// storage stays shared with the external owner.
    pub fn from_otlp(groups: &'a mut Vec<metrics::ResourceMetrics>) -> Self {
        Metrics {
            groups: Storage::Borrowed(groups),
        }
    }
}

impl Metrics<'_> {
    /// Borrows the tree as its wire-schema groups.
    pub fn as_otlp(&self) -> &[metrics::ResourceMetrics] {
        self.groups.rows()
    }

    /// Mutably borrows the tree as its wire-schema groups.
    pub fn as_otlp_mut(&mut self) -> &mut Vec<metrics::ResourceMetrics> {
        self.groups.rows_mut()
    }

    /// A slice view over the top-level resource groups.
    pub fn resource_metrics(&mut self) -> ResourceMetricsSlice<'_> {
        ResourceMetricsSlice::new(self.groups.rows_mut())
    }

    /// Total number of metrics across every resource-group ×
    /// instrumentation-library-group pair.
    pub fn metric_count(&self) -> usize {
        self.groups
            .rows()
            .iter()
            .map(|group| {
                group
                    .instrumentation_library_metrics
                    .iter()
                    .map(|library| library.metrics.len())
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
        envelope::encode_metrics_request(self.groups.rows())
    }

    /// Replaces the tree's contents by parsing an export-request envelope.
    /// On a parse failure the prior contents are left untouched.
    pub fn from_wire_bytes(&mut self, data: &[u8]) -> Result<(), prost::DecodeError> {
        let request = ExportMetricsServiceRequest::decode(data)?;
        *self.groups.rows_mut() = request.resource_metrics;
        Ok(())
    }
}

impl Clone for Metrics<'_> {
    /// Deep copy into newly allocated, owned storage; shares nothing with
    /// the original.
    fn clone(&self) -> Self {
        Metrics {
            groups: Storage::Owned(self.groups.rows().clone()),
        }
    }
}

pdata_slice!(
    /// A non-owning view over the top-level resource groups of a
    /// [`Metrics`].
    ResourceMetricsSlice,
    /// A view over one resource group, aliasing it in place.
    ResourceMetricsView,
    metrics::ResourceMetrics
);

impl ResourceMetricsView<'_> {
    /// The resource descriptor for this group, created empty if absent.
    pub fn resource(&mut self) -> ResourceView<'_> {
        ResourceView::new(self.msg.resource.get_or_insert_with(Default::default))
    }

    /// The instrumentation-library groups within this resource group.
    pub fn instrumentation_library_metrics(&mut self) -> InstrumentationLibraryMetricsSlice<'_> {
        InstrumentationLibraryMetricsSlice::new(&mut self.msg.instrumentation_library_metrics)
    }
}

pdata_slice!(
    /// A non-owning view over the instrumentation-library groups of a
    /// resource group.
    InstrumentationLibraryMetricsSlice,
    /// A view over one instrumentation-library group, aliasing it in place.
    InstrumentationLibraryMetricsView,
    metrics::InstrumentationLibraryMetrics
);

impl InstrumentationLibraryMetricsView<'_> {
    /// The instrumentation-library descriptor, created empty if absent.
    pub fn instrumentation_library(&mut self) -> InstrumentationLibraryView<'_> {
        InstrumentationLibraryView::new(
            self.msg
                .instrumentation_library
                .get_or_insert_with(Default::default),
        )
    }

    /// The metrics owned by this group.
    pub fn metrics(&mut self) -> MetricSlice<'_> {
        MetricSlice::new(&mut self.msg.metrics)
    }
}

pdata_slice!(
    /// A non-owning view over the metrics of an instrumentation-library
    /// group.
    MetricSlice,
    /// A view over one metric, aliasing it in place.
    MetricView,
    metrics::Metric
);

/// Which data shape a metric currently carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetricDataType {
    /// No data set yet.
    None,
    /// Scalar current-value points.
    Gauge,
    /// Summed points with temporality and monotonicity.
    Sum,
    /// Bucketed distribution points.
    Histogram,
    /// Quantile summary points.
    Summary,
}

impl MetricView<'_> {
    /// The metric name.
    pub fn name(&self) -> &str {
        &self.msg.name
    }

    /// Sets the metric name.
    pub fn set_name(&mut self, name: &str) {
        self.msg.name = name.to_string();
    }

    /// The metric description.
    pub fn description(&self) -> &str {
        &self.msg.description
    }

    /// Sets the metric description.
    pub fn set_description(&mut self, description: &str) {
        self.msg.description = description.to_string();
    }

    /// The metric unit.
    pub fn unit(&self) -> &str {
        &self.msg.unit
    }

    /// Sets the metric unit.
    pub fn set_unit(&mut self, unit: &str) {
        self.msg.unit = unit.to_string();
    }

    /// The data shape currently carried by the metric.
    pub fn data_type(&self) -> MetricDataType {
        match &self.msg.data {
            None => MetricDataType::None,
            Some(Data::Gauge(_)) => MetricDataType::Gauge,
            Some(Data::Sum(_)) => MetricDataType::Sum,
            Some(Data::Histogram(_)) => MetricDataType::Histogram,
            Some(Data::Summary(_)) => MetricDataType::Summary,
        }
    }

    /// The gauge data, if the metric carries a gauge.
    pub fn gauge(&mut self) -> Option<GaugeView<'_>> {
        match &mut self.msg.data {
            Some(Data::Gauge(gauge)) => Some(GaugeView { msg: gauge }),
            _ => None,
        }
    }

    /// Replaces the metric data with an empty gauge and returns its view.
    pub fn set_empty_gauge(&mut self) -> GaugeView<'_> {
        let data = self.msg.data.insert(Data::Gauge(metrics::Gauge::default()));
        let Data::Gauge(gauge) = data else {
            unreachable!()
        };
        GaugeView { msg: gauge }
    }

    /// The sum data, if the metric carries a sum.
    pub fn sum(&mut self) -> Option<SumView<'_>> {
        match &mut self.msg.data {
            Some(Data::Sum(sum)) => Some(SumView { msg: sum }),
            _ => None,
        }
    }

    /// Replaces the metric data with an empty sum and returns its view.
    pub fn set_empty_sum(&mut self) -> SumView<'_> {
        let data = self.msg.data.insert(Data::Sum(metrics::Sum::default()));
        let Data::Sum(sum) = data else { unreachable!() };
        SumView { msg: sum }
    }

    /// The histogram data, if the metric carries a histogram.
    pub fn histogram(&mut self) -> Option<HistogramView<'_>> {
        match &mut self.msg.data {
            Some(Data::Histogram(histogram)) => Some(HistogramView { msg: histogram }),
            _ => None,
        }
    }

    /// Replaces the metric data with an empty histogram and returns its
    /// view.
    pub fn set_empty_histogram(&mut self) -> HistogramView<'_> {
        let data = self
            .msg
            .data
            .insert(Data::Histogram(metrics::Histogram::default()));
        let Data::Histogram(histogram) = data else {
            unreachable!()
        };
        HistogramView { msg: histogram }
    }

    /// The summary data, if the metric carries a summary.
    pub fn summary(&mut self) -> Option<SummaryView<'_>> {
        match &mut self.msg.data {
            Some(Data::Summary(summary)) => Some(SummaryView { msg: summary }),
            _ => None,
        }
    }

    /// Replaces the metric data with an empty summary and returns its view.
    pub fn set_empty_summary(&mut self) -> SummaryView<'_> {
        let data = self
            .msg
            .data
            .insert(Data::Summary(metrics::Summary::default()));
        let Data::Summary(summary) = data else {
            unreachable!()
        };
        SummaryView { msg: summary }
    }
}

/// A view over gauge data, aliasing it in place.
pub struct GaugeView<'a> {
    msg: &'a mut metrics::Gauge,
}

impl GaugeView<'_> {
    /// The gauge's data points.
    pub fn data_points(&mut self) -> NumberDataPointSlice<'_> {
        NumberDataPointSlice::new(&mut self.msg.data_points)
    }
}

/// A view over sum data, aliasing it in place.
pub struct SumView<'a> {
    msg: &'a mut metrics::Sum,
}

impl SumView<'_> {
    /// The sum's data points.
    pub fn data_points(&mut self) -> NumberDataPointSlice<'_> {
        NumberDataPointSlice::new(&mut self.msg.data_points)
    }

    /// The aggregation temporality of the sum.
    pub fn aggregation_temporality(&self) -> AggregationTemporality {
        self.msg.aggregation_temporality()
    }

    /// Sets the aggregation temporality of the sum.
    pub fn set_aggregation_temporality(&mut self, temporality: AggregationTemporality) {
        self.msg.set_aggregation_temporality(temporality);
    }

    /// True if the sum is monotonic.
    pub fn is_monotonic(&self) -> bool {
        self.msg.is_monotonic
    }

    /// Sets whether the sum is monotonic.
    pub fn set_is_monotonic(&mut self, monotonic: bool) {
        self.msg.is_monotonic = monotonic;
    }
}

/// A view over histogram data, aliasing it in place.
pub struct HistogramView<'a> {
    msg: &'a mut metrics::Histogram,
}

impl HistogramView<'_> {
    /// The histogram's data points.
    pub fn data_points(&mut self) -> HistogramDataPointSlice<'_> {
        HistogramDataPointSlice::new(&mut self.msg.data_points)
    }

    /// The aggregation temporality of the histogram.
    pub fn aggregation_temporality(&self) -> AggregationTemporality {
        self.msg.aggregation_temporality()
    }

    /// Sets the aggregation temporality of the histogram.
    pub fn set_aggregation_temporality(&mut self, temporality: AggregationTemporality) {
        self.msg.set_aggregation_temporality(temporality);
    }
}

/// A view over summary data, aliasing it in place.
pub struct SummaryView<'a> {
    msg: &'a mut metrics::Summary,
}

impl SummaryView<'_> {
    /// The summary's data points.
    pub fn data_points(&mut self) -> SummaryDataPointSlice<'_> {
        SummaryDataPointSlice::new(&mut self.msg.data_points)
    }
}

pdata_slice!(
    /// A non-owning view over the number data points of a gauge or sum.
    NumberDataPointSlice,
    /// A view over one number data point, aliasing it in place.
    NumberDataPointView,
    metrics::NumberDataPoint
);

impl NumberDataPointView<'_> {
    /// The point's attribute set.
    pub fn attributes(&mut self) -> Attributes<'_> {
        Attributes::new(&mut self.msg.attributes)
    }

    /// The start of the aggregation interval, UNIX epoch nanoseconds.
    pub fn start_time_unix_nano(&self) -> u64 {
        self.msg.start_time_unix_nano
    }

    /// Sets the start of the aggregation interval.
    pub fn set_start_time_unix_nano(&mut self, nanos: u64) {
        self.msg.start_time_unix_nano = nanos;
    }

    /// The point's timestamp, UNIX epoch nanoseconds.
    pub fn time_unix_nano(&self) -> u64 {
        self.msg.time_unix_nano
    }

    /// Sets the point's timestamp.
    pub fn set_time_unix_nano(&mut self, nanos: u64) {
        self.msg.time_unix_nano = nanos;
    }

    /// The value, if recorded as a double.
    pub fn as_double(&self) -> Option<f64> {
        match self.msg.value {
            Some(PointValue::AsDouble(value)) => Some(value),
            _ => None,
        }
    }

    /// The value, if recorded as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self.msg.value {
            Some(PointValue::AsInt(value)) => Some(value),
            _ => None,
        }
    }

    /// Records the value as a double.
    pub fn set_double(&mut self, value: f64) {
        self.msg.value = Some(PointValue::AsDouble(value));
    }

    /// Records the value as an integer.
    pub fn set_int(&mut self, value: i64) {
        self.msg.value = Some(PointValue::AsInt(value));
    }
}

pdata_slice!(
    /// A non-owning view over the data points of a histogram.
    HistogramDataPointSlice,
    /// A view over one histogram data point, aliasing it in place.
    HistogramDataPointView,
    metrics::HistogramDataPoint
);

impl HistogramDataPointView<'_> {
    /// The point's attribute set.
    pub fn attributes(&mut self) -> Attributes<'_> {
        Attributes::new(&mut self.msg.attributes)
    }

    /// The start of the aggregation interval, UNIX epoch nanoseconds.
    pub fn start_time_unix_nano(&self) -> u64 {
        self.msg.start_time_unix_nano
    }

    /// Sets the start of the aggregation interval.
    pub fn set_start_time_unix_nano(&mut self, nanos: u64) {
        self.msg.start_time_unix_nano = nanos;
    }

    /// The point's timestamp, UNIX epoch nanoseconds.
    pub fn time_unix_nano(&self) -> u64 {
        self.msg.time_unix_nano
    }

    /// Sets the point's timestamp.
    pub fn set_time_unix_nano(&mut self, nanos: u64) {
        self.msg.time_unix_nano = nanos;
    }

    /// Number of values in the population.
    pub fn count(&self) -> u64 {
        self.msg.count
    }

    /// Sets the number of values in the population.
    pub fn set_count(&mut self, count: u64) {
        self.msg.count = count;
    }

    /// Sum of the values in the population.
    pub fn sum(&self) -> f64 {
        self.msg.sum
    }

    /// Sets the sum of the values in the population.
    pub fn set_sum(&mut self, sum: f64) {
        self.msg.sum = sum;
    }

    /// Per-bucket counts.
    pub fn bucket_counts(&self) -> &[u64] {
        &self.msg.bucket_counts
    }

    /// Replaces the per-bucket counts.
    pub fn set_bucket_counts(&mut self, counts: Vec<u64>) {
        self.msg.bucket_counts = counts;
    }

    /// Explicit bucket bounds.
    pub fn explicit_bounds(&self) -> &[f64] {
        &self.msg.explicit_bounds
    }

    /// Replaces the explicit bucket bounds.
    pub fn set_explicit_bounds(&mut self, bounds: Vec<f64>) {
        self.msg.explicit_bounds = bounds;
    }
}

pdata_slice!(
    /// A non-owning view over the data points of a summary.
    SummaryDataPointSlice,
    /// A view over one summary data point, aliasing it in place.
    SummaryDataPointView,
    metrics::SummaryDataPoint
);

impl SummaryDataPointView<'_> {
    /// The point's attribute set.
    pub fn attributes(&mut self) -> Attributes<'_> {
        Attributes::new(&mut self.msg.attributes)
    }

    /// The start of the aggregation interval, UNIX epoch nanoseconds.
    pub fn start_time_unix_nano(&self) -> u64 {
        self.msg.start_time_unix_nano
    }

    /// Sets the start of the aggregation interval.
    pub fn set_start_time_unix_nano(&mut self, nanos: u64) {
        self.msg.start_time_unix_nano = nanos;
    }

    /// The point's timestamp, UNIX epoch nanoseconds.
    pub fn time_unix_nano(&self) -> u64 {
        self.msg.time_unix_nano
    }

    /// Sets the point's timestamp.
    pub fn set_time_unix_nano(&mut self, nanos: u64) {
        self.msg.time_unix_nano = nanos;
    }

    /// Number of values in the population.
    pub fn count(&self) -> u64 {
        self.msg.count
    }

    /// Sets the number of values in the population.
    pub fn set_count(&mut self, count: u64) {
        self.msg.count = count;
    }

    /// Sum of the values in the population.
    pub fn sum(&self) -> f64 {
        self.msg.sum
    }

    /// Sets the sum of the values in the population.
    pub fn set_sum(&mut self, sum: f64) {
        self.msg.sum = sum;
    }

    /// The quantile values of the snapshot.
    pub fn quantile_values(&mut self) -> QuantileValueSlice<'_> {
        QuantileValueSlice::new(&mut self.msg.quantile_values)
    }
}

pdata_slice!(
    /// A non-owning view over the quantile values of a summary data point.
    QuantileValueSlice,
    /// A view over one quantile value, aliasing it in place.
    QuantileValueView,
    metrics::summary_data_point::ValueAtQuantile
);

impl QuantileValueView<'_> {
    /// The quantile, in `[0.0, 1.0]`.
    pub fn quantile(&self) -> f64 {
        self.msg.quantile
    }

    /// Sets the quantile.
    pub fn set_quantile(&mut self, quantile: f64) {
        self.msg.quantile = quantile;
    }

    /// The value at the quantile.
    pub fn value(&self) -> f64 {
        self.msg.value
    }

    /// Sets the value at the quantile.
    pub fn set_value(&mut self, value: f64) {
        self.msg.value = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_metrics() -> Metrics<'static> {
        let mut md = Metrics::new();
        let mut groups = md.resource_metrics();
        let mut group = groups.append();
        group.resource().attributes().upsert_string("service.name", "checkout");
        let mut libraries = group.instrumentation_library_metrics();
        let mut library = libraries.append();
        library.instrumentation_library().set_name("otel-sdk");
        let mut metrics = library.metrics();

        let mut gauge_metric = metrics.append();
        gauge_metric.set_name("queue.depth");
        gauge_metric.set_unit("1");
        let mut gauge = gauge_metric.set_empty_gauge();
        let mut points = gauge.data_points();
        let mut point = points.append();
        point.set_time_unix_nano(5_000);
        point.set_int(17);

        let mut sum_metric = metrics.append();
        sum_metric.set_name("requests.total");
        let mut sum = sum_metric.set_empty_sum();
        sum.set_aggregation_temporality(AggregationTemporality::Cumulative);
        sum.set_is_monotonic(true);
        let mut points = sum.data_points();
        let mut point = points.append();
        point.set_double(42.5);

        md
    }

    #[test]
    fn new_metrics_is_empty_but_initialized() {
        let mut md = Metrics::new();
        assert_eq!(0, md.metric_count());
        assert_eq!(0, md.resource_metrics().len());
        assert!(md.to_wire_bytes().is_empty());
    }

    #[test]
    fn metric_count_sums_all_groups() {
        assert_eq!(2, build_metrics().metric_count());
    }

    #[test]
    fn data_accessors_follow_active_shape() {
        let mut md = build_metrics();
        let mut groups = md.resource_metrics();
        let mut group = groups.at(0);
        let mut libraries = group.instrumentation_library_metrics();
        let mut library = libraries.at(0);
        let mut metrics = library.metrics();

        let mut gauge_metric = metrics.at(0);
        assert_eq!(MetricDataType::Gauge, gauge_metric.data_type());
        assert!(gauge_metric.sum().is_none());
        let mut gauge = gauge_metric.gauge().unwrap();
        assert_eq!(Some(17), gauge.data_points().at(0).as_int());
        assert_eq!(None, gauge.data_points().at(0).as_double());

        let mut sum_metric = metrics.at(1);
        assert_eq!(MetricDataType::Sum, sum_metric.data_type());
        let sum = sum_metric.sum().unwrap();
        assert!(sum.is_monotonic());
        assert_eq!(
            AggregationTemporality::Cumulative,
            sum.aggregation_temporality()
        );
    }

    #[test]
    fn clone_is_deep_and_independent() {
        let md = build_metrics();
        let mut copy = md.clone();
        assert_eq!(md.metric_count(), copy.metric_count());
        copy.resource_metrics()
            .at(0)
            .instrumentation_library_metrics()
            .at(0)
            .metrics()
            .append();
        assert_eq!(2, md.metric_count());
        assert_eq!(3, copy.metric_count());
    }

    #[test]
    fn wire_round_trip_preserves_contents() {
        let md = build_metrics();
        let bytes = md.to_wire_bytes();
        let mut back = Metrics::new();
        back.from_wire_bytes(&bytes).unwrap();
        assert_eq!(md.as_otlp(), back.as_otlp());
    }

    #[test]
    fn histogram_and_summary_views() {
        let mut md = Metrics::new();
        let mut groups = md.resource_metrics();
        let mut group = groups.append();
        let mut libraries = group.instrumentation_library_metrics();
        let mut library = libraries.append();
        let mut metrics = library.metrics();

        let mut histogram_metric = metrics.append();
        let mut histogram = histogram_metric.set_empty_histogram();
        histogram.set_aggregation_temporality(AggregationTemporality::Delta);
        let mut points = histogram.data_points();
        let mut point = points.append();
        point.set_count(3);
        point.set_sum(12.0);
        point.set_bucket_counts(vec![1, 2]);
        point.set_explicit_bounds(vec![5.0]);
        assert_eq!(&[1, 2][..], point.bucket_counts());

        let mut summary_metric = metrics.append();
        let mut summary = summary_metric.set_empty_summary();
        let mut points = summary.data_points();
        let mut point = points.append();
        point.set_count(9);
        let mut quantiles = point.quantile_values();
        let mut quantile = quantiles.append();
        quantile.set_quantile(0.99);
        quantile.set_value(250.0);
        assert_eq!(1, point.quantile_values().len());
    }

    #[test]
    fn set_empty_data_replaces_previous_shape() {
        let mut md = Metrics::new();
        let mut groups = md.resource_metrics();
        let mut group = groups.append();
        let mut libraries = group.instrumentation_library_metrics();
        let mut library = libraries.append();
        let mut metrics = library.metrics();
        let mut metric = metrics.append();
        assert_eq!(MetricDataType::None, metric.data_type());
        metric.set_empty_gauge();
        assert_eq!(MetricDataType::Gauge, metric.data_type());
        metric.set_empty_summary();
        assert_eq!(MetricDataType::Summary, metric.data_type());
        assert!(metric.gauge().is_none());
    }
}
