// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Message definitions for the OTLP wire protocol.
//!
//! The [`pb`] module holds the prost message types for the protocol packages
//! (common, resource, trace, metrics, logs) and the per-signal export-request
//! envelopes. The definitions are maintained checked-in and regenerated
//! offline when the protocol schema moves; the in-memory data model and this
//! schema must always be updated in lockstep.
//!
//! The [`envelope`] module provides encode helpers that serialize an
//! export-request envelope directly from borrowed top-level groups, so a
//! caller never has to move or copy its storage into an envelope value just
//! to produce wire bytes.

pub mod envelope;
pub mod pb;
