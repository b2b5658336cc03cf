// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Attribute sets and attribute values.
//!
//! Attributes are stored on the wire as a repeated key/value field. The
//! [`Attributes`] view keeps the uniform slice contract of every repeated
//! field and adds map-style helpers on top; no semantic validation of keys
//! or values is performed.

use crate::slice::pdata_slice;
use libotel_protobuf::pb::common::any_value::Value;
use libotel_protobuf::pb::common::{AnyValue, KeyValue};

pdata_slice!(
    /// A non-owning view over an attribute set held by some tree node.
    Attributes,
    /// A view over a single attribute, aliasing it in place.
    AttributeView,
    KeyValue
);

impl Attributes<'_> {
    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&AnyValue> {
        self.elems
            .iter()
            .find(|kv| kv.key == key)
            .and_then(|kv| kv.value.as_ref())
    }

    /// Stores a string value under `key`, replacing any existing entry.
    pub fn upsert_string(&mut self, key: &str, value: &str) {
        self.upsert(key, Value::StringValue(value.to_string()));
    }

    /// Stores an integer value under `key`, replacing any existing entry.
    pub fn upsert_int(&mut self, key: &str, value: i64) {
        self.upsert(key, Value::IntValue(value));
    }

    /// Stores a double value under `key`, replacing any existing entry.
    pub fn upsert_double(&mut self, key: &str, value: f64) {
        self.upsert(key, Value::DoubleValue(value));
    }

    /// Stores a boolean value under `key`, replacing any existing entry.
    pub fn upsert_bool(&mut self, key: &str, value: bool) {
        self.upsert(key, Value::BoolValue(value));
    }

    fn upsert(&mut self, key: &str, value: Value) {
        let value = AnyValue { value: Some(value) };
        match self.elems.iter_mut().find(|kv| kv.key == key) {
            Some(kv) => kv.value = Some(value),
            None => self.elems.push(KeyValue {
                key: key.to_string(),
                value: Some(value),
            }),
        }
    }
}

impl AttributeView<'_> {
    /// The attribute key.
    pub fn key(&self) -> &str {
        &self.msg.key
    }

    /// Replaces the attribute key.
    pub fn set_key(&mut self, key: &str) {
        self.msg.key = key.to_string();
    }

    /// A view over the attribute value, created empty if absent.
    pub fn value(&mut self) -> ValueView<'_> {
        ValueView::new(self.msg.value.get_or_insert_with(AnyValue::default))
    }
}

/// A view over a single attribute value, aliasing it in place.
pub struct ValueView<'a> {
    pub(crate) value: &'a mut AnyValue,
}

impl<'a> ValueView<'a> {
    pub(crate) fn new(value: &'a mut AnyValue) -> Self {
        Self { value }
    }

    /// The string content, if the value holds a string.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value.value {
            Some(Value::StringValue(text)) => Some(text),
            _ => None,
        }
    }

    /// The integer content, if the value holds an integer.
    pub fn as_int(&self) -> Option<i64> {
        match &self.value.value {
            Some(Value::IntValue(number)) => Some(*number),
            _ => None,
        }
    }

    /// The double content, if the value holds a double.
    pub fn as_double(&self) -> Option<f64> {
        match &self.value.value {
            Some(Value::DoubleValue(number)) => Some(*number),
            _ => None,
        }
    }

    /// The boolean content, if the value holds a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match &self.value.value {
            Some(Value::BoolValue(flag)) => Some(*flag),
            _ => None,
        }
    }

    /// Replaces the value with a string.
    pub fn set_string(&mut self, text: &str) {
        self.value.value = Some(Value::StringValue(text.to_string()));
    }

    /// Replaces the value with an integer.
    pub fn set_int(&mut self, number: i64) {
        self.value.value = Some(Value::IntValue(number));
    }

    /// Replaces the value with a double.
    pub fn set_double(&mut self, number: f64) {
        self.value.value = Some(Value::DoubleValue(number));
    }

    /// Replaces the value with a boolean.
    pub fn set_bool(&mut self, flag: bool) {
        self.value.value = Some(Value::BoolValue(flag));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_inserts_then_replaces() {
        let mut backing = Vec::new();
        let mut attrs = Attributes::new(&mut backing);
        attrs.upsert_string("service.name", "checkout");
        attrs.upsert_int("retries", 2);
        assert_eq!(2, attrs.len());

        attrs.upsert_string("service.name", "payments");
        assert_eq!(2, attrs.len());
        assert_eq!(
            Some(&Value::StringValue("payments".to_string())),
            attrs.get("service.name").and_then(|v| v.value.as_ref())
        );
    }

    #[test]
    fn get_missing_key_is_none() {
        let mut backing = Vec::new();
        let attrs = Attributes::new(&mut backing);
        assert!(attrs.get("absent").is_none());
    }

    #[test]
    fn append_zero_initializes() {
        let mut backing = Vec::new();
        let mut attrs = Attributes::new(&mut backing);
        let mut kv = attrs.append();
        assert_eq!("", kv.key());
        kv.set_key("host.name");
        kv.value().set_string("web-1");
        assert_eq!(1, attrs.len());
        assert_eq!(Some("web-1"), attrs.at(0).value().as_str());
    }

    #[test]
    fn copy_to_replaces_and_resizes() {
        let mut src_backing = Vec::new();
        let mut attrs = Attributes::new(&mut src_backing);
        attrs.upsert_bool("sampled", true);

        let mut dest_backing = vec![KeyValue::default(); 4];
        let mut dest = Attributes::new(&mut dest_backing);
        attrs.copy_to(&mut dest);
        assert_eq!(1, dest.len());
        assert_eq!(Some(true), dest.at(0).value().as_bool());

        // Mutating the copy must not touch the source.
        dest.upsert_bool("sampled", false);
        assert_eq!(
            Some(&Value::BoolValue(true)),
            attrs.get("sampled").and_then(|v| v.value.as_ref())
        );
    }
}
