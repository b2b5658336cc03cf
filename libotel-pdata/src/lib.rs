// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

//! In-memory telemetry data model.
//!
//! The types here are what pipeline stages exchange: a receiver builds or
//! wraps a [`Traces`]/[`Metrics`]/[`Logs`] tree, processors mutate it in
//! place through slice views, and an exporter marshals it back to the wire.
//! The trees alias the wire-schema messages of `libotel-protobuf` directly,
//! so bridging to and from serialized bytes never copies the tree.
//!
//! A tree value must not be mutated by more than one stage at a time; the
//! handoff between stages is the synchronization boundary. A stage that
//! retains a tree after handing it downstream must keep a deep copy obtained
//! via `clone()`.

pub mod attributes;
pub mod common;
pub mod ids;
pub mod logs;
pub mod metrics;
mod slice;
pub mod trace;

pub use ids::{SpanId, TraceId, SPAN_ID_SIZE, TRACE_ID_SIZE};
pub use logs::Logs;
pub use metrics::Metrics;
pub use trace::Traces;
