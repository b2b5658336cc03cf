// Copyright 2021-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Trace and span identifiers.
//!
//! An identifier has two mutually exclusive representations: a fixed-size
//! array for the canonical, allocation-free case, and an arbitrary-length
//! byte sequence for identifiers produced by upstream systems that do not
//! fit the canonical size. The representation is a structural property of
//! the value; it is never ambiguous.

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of bytes in a canonical trace identifier.
pub const TRACE_ID_SIZE: usize = 16;
/// Number of bytes in a canonical span identifier.
pub const SPAN_ID_SIZE: usize = 8;

/// Identifier of a trace: 16 canonical bytes.
pub type TraceId = Id<TRACE_ID_SIZE>;
/// Identifier of a span: 8 canonical bytes.
pub type SpanId = Id<SPAN_ID_SIZE>;

/// A trace or span identifier with value semantics.
///
/// `Fixed` holds the canonical `N`-byte array; `Variable` holds an
/// arbitrary-length sequence accepted from non-conforming upstream systems.
/// An identifier is empty when the fixed array is all zero or the variable
/// sequence has length zero.
#[derive(Clone, Debug)]
pub enum Id<const N: usize> {
    /// The canonical fixed-size representation.
    Fixed([u8; N]),
    /// An arbitrary-length representation for oversized upstream identifiers.
    Variable(Vec<u8>),
}

impl<const N: usize> Default for Id<N> {
    fn default() -> Self {
        Id::Fixed([0; N])
    }
}

impl<const N: usize> Id<N> {
    /// Creates an identifier from the canonical fixed-size byte array.
    pub fn new(bytes: [u8; N]) -> Self {
        Id::Fixed(bytes)
    }

    /// Creates an identifier from a byte sequence of any length. Used for
    /// interoperability with upstream identifiers that exceed or differ from
    /// the canonical size.
    pub fn new_unbounded(bytes: Vec<u8>) -> Self {
        Id::Variable(bytes)
    }

    /// True if the identifier carries no information: an all-zero fixed
    /// array, or a zero-length variable sequence.
    pub fn is_empty(&self) -> bool {
        match self {
            Id::Fixed(bytes) => *bytes == [0; N],
            Id::Variable(bytes) => bytes.is_empty(),
        }
    }

    /// Human-readable representation of the identifier, empty when the
    /// identifier is empty.
    ///
    /// Fixed identifiers are lower-case hex encoded. Variable-length
    /// identifiers are returned as their raw bytes reinterpreted as text
    /// (lossily, for non-UTF-8 bytes), not hex encoded; consumers keying on
    /// oversized upstream identifiers depend on receiving the original
    /// bytes.
    pub fn hex_string(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        match self {
            Id::Fixed(bytes) => encode_hex(bytes),
            Id::Variable(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// Number of bytes the identifier serializes to: 0 when empty, otherwise
    /// the length of the active representation.
    pub fn size(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        match self {
            Id::Fixed(_) => N,
            Id::Variable(bytes) => bytes.len(),
        }
    }

    /// Compares two identifiers.
    ///
    /// The comparison is biased by the receiver's representation: a
    /// variable-length receiver compares variable sequences only, so a
    /// fixed-mode argument contributes an empty sequence regardless of its
    /// array contents; a fixed receiver compares fixed arrays only, so a
    /// variable-mode argument contributes the all-zero array. A fixed and a
    /// variable identifier holding the same logical bytes therefore do not
    /// compare equal. Callers needing representation-independent comparison
    /// must normalize first.
    pub fn equal(&self, other: &Self) -> bool {
        match self {
            Id::Variable(a) => match other {
                Id::Variable(b) => a == b,
                Id::Fixed(_) => a.is_empty(),
            },
            Id::Fixed(a) => match other {
                Id::Fixed(b) => a == b,
                Id::Variable(_) => *a == [0; N],
            },
        }
    }

    /// Returns the canonical fixed-size array.
    ///
    /// Calling this on a variable-length identifier is an invalid use and
    /// panics; callers must branch on the active representation first, e.g.
    /// by checking `size()`.
    #[allow(clippy::panic)]
    pub fn bytes(&self) -> [u8; N] {
        match self {
            Id::Fixed(bytes) => *bytes,
            Id::Variable(_) => panic!("identifier is in variable-length mode"),
        }
    }

    /// Binary unmarshal. Zero-length input resets to the empty fixed
    /// representation; input of exactly the canonical size becomes fixed;
    /// any other length becomes a freshly allocated variable sequence.
    pub fn from_slice(data: &[u8]) -> Self {
        if data.is_empty() {
            return Self::default();
        }
        match <[u8; N]>::try_from(data) {
            Ok(bytes) => Id::Fixed(bytes),
            Err(_) => Id::Variable(data.to_vec()),
        }
    }

    /// Binary marshal: the active representation's bytes. Empty identifiers
    /// serialize to nothing.
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.is_empty() {
            return Vec::new();
        }
        match self {
            Id::Fixed(bytes) => bytes.to_vec(),
            Id::Variable(bytes) => bytes.clone(),
        }
    }
}

impl<const N: usize> Serialize for Id<N> {
    /// JSON form: the empty quoted string when empty, otherwise the
    /// lower-case hex encoding of the active representation, quoted.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_empty() {
            return serializer.serialize_str("");
        }
        match self {
            Id::Fixed(bytes) => serializer.serialize_str(&encode_hex(bytes)),
            Id::Variable(bytes) => serializer.serialize_str(&encode_hex(bytes)),
        }
    }
}

impl<'de, const N: usize> Deserialize<'de> for Id<N> {
    /// Decodes the hex string form. A payload of exactly the canonical size
    /// becomes the fixed representation; any other size becomes variable.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        if text.is_empty() {
            return Ok(Self::default());
        }
        let bytes = decode_hex(&text).map_err(de::Error::custom)?;
        Ok(Self::from_slice(&bytes))
    }
}

/// Error parsing the hex string form of an identifier.
#[derive(Debug, PartialEq, Eq)]
pub enum IdParseError {
    /// The hex string had an odd number of digits.
    OddLength,
    /// The string contained a character outside `[0-9a-fA-F]`.
    InvalidDigit(char),
}

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdParseError::OddLength => write!(f, "hex identifier has odd length"),
            IdParseError::InvalidDigit(c) => {
                write!(f, "invalid hex digit {c:?} in identifier")
            }
        }
    }
}

impl std::error::Error for IdParseError {}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

fn encode_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
        out.push(HEX_DIGITS[(byte & 0x0f) as usize] as char);
    }
    out
}

fn decode_hex(text: &str) -> Result<Vec<u8>, IdParseError> {
    let digits = text.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(IdParseError::OddLength);
    }
    let mut out = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks_exact(2) {
        let hi = decode_digit(pair[0])?;
        let lo = decode_digit(pair[1])?;
        out.push(hi << 4 | lo);
    }
    Ok(out)
}

fn decode_digit(digit: u8) -> Result<u8, IdParseError> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(IdParseError::InvalidDigit(digit as char)),
    }
}
