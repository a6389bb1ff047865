// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Payload types and the item encoding carried under them.
//!
//! A [`PayloadType`] is a capability tag. Sources and targets agree on the tag
//! out of band; a target checks for the tag's presence before it ever looks at
//! payload content.
//!
//! ```
//! use understory_drop::payload::{DRAG_EXAMPLE_TYPE, decode_item, encode_item};
//!
//! assert_eq!(DRAG_EXAMPLE_TYPE.as_str(), "application/prs.drag-example+json");
//!
//! let wire = encode_item(2);
//! assert_eq!(wire, "2");
//! assert_eq!(decode_item(&wire), Ok(2));
//! ```

use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use core::fmt;

/// The payload type shared by [`DragSource`](crate::source::DragSource) and
/// [`DropZone`](crate::target::DropZone).
///
/// The `+json` suffix is historical: the payload is a plain decimal integer,
/// not JSON. Keep the identifier verbatim for interoperability.
pub const DRAG_EXAMPLE_TYPE: PayloadType =
    PayloadType::from_static("application/prs.drag-example+json");

/// An opaque, exactly-matched payload type identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PayloadType(Cow<'static, str>);

impl PayloadType {
    /// Creates a payload type from a static string.
    #[must_use]
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Creates a payload type from an owned string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    /// Returns the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PayloadType {
    fn default() -> Self {
        DRAG_EXAMPLE_TYPE
    }
}

impl fmt::Debug for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PayloadType").field(&self.as_str()).finish()
    }
}

impl fmt::Display for PayloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&'static str> for PayloadType {
    fn from(id: &'static str) -> Self {
        Self::from_static(id)
    }
}

impl From<String> for PayloadType {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// Error returned when a released payload is not an integer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PayloadDecodeError {
    /// No decimal digits at the start of the payload.
    #[error("payload {0:?} does not start with an integer")]
    NotANumber(String),
    /// The leading integer does not fit in an `i64`.
    #[error("payload {0:?} is out of range for an integer item")]
    OutOfRange(String),
}

/// Encodes an item for transfer: plain decimal text.
#[must_use]
pub fn encode_item(item: i64) -> String {
    item.to_string()
}

/// Decodes the leading integer of a payload.
///
/// Leading whitespace and a single `+`/`-` sign are accepted; anything after
/// the digit run is ignored, so `"12px"` decodes to `12`.
///
/// ```
/// use understory_drop::payload::{PayloadDecodeError, decode_item};
///
/// assert_eq!(decode_item("  -7"), Ok(-7));
/// assert_eq!(decode_item("12px"), Ok(12));
/// assert!(matches!(decode_item("abc"), Err(PayloadDecodeError::NotANumber(_))));
/// ```
pub fn decode_item(payload: &str) -> Result<i64, PayloadDecodeError> {
    let trimmed = payload.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits = unsigned
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return Err(PayloadDecodeError::NotANumber(payload.into()));
    }

    // Accumulate negatively so that `i64::MIN` is representable.
    let mut value: i64 = 0;
    for b in unsigned[..digits].bytes() {
        let digit = i64::from(b - b'0');
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_sub(digit))
            .ok_or_else(|| PayloadDecodeError::OutOfRange(payload.into()))?;
    }
    if negative {
        Ok(value)
    } else {
        value
            .checked_neg()
            .ok_or_else(|| PayloadDecodeError::OutOfRange(payload.into()))
    }
}
