// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0
#![deny(missing_docs)]

//! Exporter-side collaborators of the telemetry data model: outbound
//! marshalers selected by encoding name, batch producers over a pluggable
//! message-sink transport boundary, and the pipeline's own explicitly
//! constructed observability context.
//!
//! Nothing here performs network I/O; the [`producer::MessageSink`] trait is
//! the boundary behind which concrete transports live.

pub mod config;
pub mod error;
pub mod marshal;
pub mod producer;
pub mod telemetry;
