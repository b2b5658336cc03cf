// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Errors produced while marshalling and delivering outbound batches.

use std::error::Error;
use std::fmt::{self, Display};

/// Failure to translate one element (or a whole batch) into the outbound
/// format.
#[derive(Debug)]
pub enum MarshalError {
    /// The target format cannot represent a value attached to the element.
    Unsupported(String),
    /// msgpack encoding failed.
    Msgpack(rmp_serde::encode::Error),
    /// JSON encoding failed.
    Json(serde_json::Error),
    /// Several per-element failures combined into one reported error.
    Combined(Vec<MarshalError>),
}

impl MarshalError {
    /// Combines per-element failures into a single error. Returns `None`
    /// when the list is empty, the lone error when it has one entry, and a
    /// `Combined` wrapper otherwise.
    pub fn combine(mut errors: Vec<MarshalError>) -> Option<MarshalError> {
        match errors.len() {
            0 => None,
            1 => Some(errors.remove(0)),
            _ => Some(MarshalError::Combined(errors)),
        }
    }
}

impl Display for MarshalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarshalError::Unsupported(detail) => {
                write!(f, "value not representable in target format: {detail}")
            }
            MarshalError::Msgpack(source) => write!(f, "msgpack encoding failed: {source}"),
            MarshalError::Json(source) => write!(f, "JSON encoding failed: {source}"),
            MarshalError::Combined(errors) => {
                write!(f, "{} elements failed to marshal: ", errors.len())?;
                for (i, error) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{error}")?;
                }
                Ok(())
            }
        }
    }
}

impl Error for MarshalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MarshalError::Msgpack(source) => Some(source),
            MarshalError::Json(source) => Some(source),
            _ => None,
        }
    }
}

impl From<rmp_serde::encode::Error> for MarshalError {
    fn from(source: rmp_serde::encode::Error) -> Self {
        MarshalError::Msgpack(source)
    }
}

impl From<serde_json::Error> for MarshalError {
    fn from(source: serde_json::Error) -> Self {
        MarshalError::Json(source)
    }
}

/// Failure to deliver a batch at the transport boundary.
///
/// Delivery is all-or-nothing: not every transport can account for partial
/// delivery, so the item count conservatively reports every item of the
/// batch as failed when only a batch-level error is available.
#[derive(Debug)]
pub struct DeliveryError {
    count: usize,
    source: anyhow::Error,
}

impl DeliveryError {
    /// Wraps a batch-level transport error covering `count` items.
    pub fn new(count: usize, source: anyhow::Error) -> Self {
        Self { count, source }
    }

    /// Number of items reported failed.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to deliver {} messages due to {}",
            self.count, self.source
        )
    }
}

impl Error for DeliveryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.chain().next()
    }
}

/// Top-level error of a producer push.
#[derive(Debug)]
pub enum ExportError {
    /// No marshaler is registered under the configured encoding name.
    UnrecognizedEncoding(String),
    /// One or more elements could not be translated. Elements that did
    /// translate were still emitted; partial failure does not void the
    /// batch.
    Marshal(MarshalError),
    /// The transport rejected the batch as a whole.
    Delivery(DeliveryError),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::UnrecognizedEncoding(name) => {
                write!(f, "unrecognized encoding {name:?}")
            }
            ExportError::Marshal(source) => write!(f, "{source}"),
            ExportError::Delivery(source) => write!(f, "{source}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExportError::UnrecognizedEncoding(_) => None,
            ExportError::Marshal(source) => Some(source),
            ExportError::Delivery(source) => Some(source),
        }
    }
}

impl From<MarshalError> for ExportError {
    fn from(source: MarshalError) -> Self {
        ExportError::Marshal(source)
    }
}

impl From<DeliveryError> for ExportError {
    fn from(source: DeliveryError) -> Self {
        ExportError::Delivery(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combine_empty_is_none() {
        assert!(MarshalError::combine(Vec::new()).is_none());
    }

    #[test]
    fn combine_single_returns_it_unwrapped() {
        let combined = MarshalError::combine(vec![MarshalError::Unsupported("array".into())]);
        assert!(matches!(combined, Some(MarshalError::Unsupported(_))));
    }

    #[test]
    fn combine_many_reports_count_and_details() {
        let combined = MarshalError::combine(vec![
            MarshalError::Unsupported("array".into()),
            MarshalError::Unsupported("kvlist".into()),
        ])
        .unwrap();
        let text = combined.to_string();
        assert!(text.starts_with("2 elements failed to marshal"), "{text}");
        assert!(text.contains("array"), "{text}");
        assert!(text.contains("kvlist"), "{text}");
    }

    #[test]
    fn delivery_error_mentions_count_and_cause() {
        let error = DeliveryError::new(7, anyhow::anyhow!("broker unreachable"));
        assert_eq!(7, error.count());
        assert_eq!(
            "Failed to deliver 7 messages due to broker unreachable",
            error.to_string()
        );
    }

    #[test]
    fn export_error_displays_encoding_name() {
        let error = ExportError::UnrecognizedEncoding("zstd_spans".into());
        assert_eq!("unrecognized encoding \"zstd_spans\"", error.to_string());
    }
}
