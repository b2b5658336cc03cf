// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Views shared by all three signal trees: the resource descriptor and the
//! instrumentation-library descriptor.

use crate::attributes::Attributes;
use libotel_protobuf::pb::common::InstrumentationLibrary;
use libotel_protobuf::pb::resource::Resource;

/// A view over the resource descriptor of a top-level group, aliasing it in
/// place.
pub struct ResourceView<'a> {
    pub(crate) msg: &'a mut Resource,
}

impl<'a> ResourceView<'a> {
    pub(crate) fn new(msg: &'a mut Resource) -> Self {
        Self { msg }
    }

    /// The attributes describing the producing process/host/service.
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

/// A view over an instrumentation-library descriptor, aliasing it in place.
pub struct InstrumentationLibraryView<'a> {
    pub(crate) msg: &'a mut InstrumentationLibrary,
}

impl<'a> InstrumentationLibraryView<'a> {
    pub(crate) fn new(msg: &'a mut InstrumentationLibrary) -> Self {
        Self { msg }
    }

    /// The library name; empty means unknown.
    pub fn name(&self) -> &str {
        &self.msg.name
    }

    /// Sets the library name.
    pub fn set_name(&mut self, name: &str) {
        self.msg.name = name.to_string();
    }

    /// The library version.
    pub fn version(&self) -> &str {
        &self.msg.version
    }

    /// Sets the library version.
    pub fn set_version(&mut self, version: &str) {
        self.msg.version = version.to_string();
    }
}
