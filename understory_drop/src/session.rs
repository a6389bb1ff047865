// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transfer object shared by every participant in one drag gesture.
//!
//! A [`DragSession`] lives from drag start until the session ends. It carries
//! the offered [`PayloadType`]s, one string payload per type, and an optional
//! [`DragPreview`]. Access is gated by [`SessionMode`]:
//!
//! - [`SessionMode::ReadWrite`] while the source's drag-start handler runs.
//! - [`SessionMode::Protected`] while the gesture is in flight: types are
//!   visible, payload content is not.
//! - [`SessionMode::ReadOnly`] while a release is being handled.
//!
//! ```
//! use understory_drop::payload::DRAG_EXAMPLE_TYPE;
//! use understory_drop::session::{DragSession, SessionId, SessionMode};
//!
//! let mut session = DragSession::new(SessionId(1));
//! session.set_payload(DRAG_EXAMPLE_TYPE, "2").unwrap();
//!
//! session.set_mode(SessionMode::Protected);
//! assert!(session.offers(&DRAG_EXAMPLE_TYPE));
//! assert_eq!(session.payload(&DRAG_EXAMPLE_TYPE), None);
//!
//! session.set_mode(SessionMode::ReadOnly);
//! assert_eq!(session.payload(&DRAG_EXAMPLE_TYPE), Some("2"));
//! ```

use alloc::string::String;
use core::fmt;

use hashbrown::HashMap;
use kurbo::Vec2;
use smallvec::SmallVec;

use crate::payload::PayloadType;

/// Identifies one drag session for diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host-supplied handle to a rendered element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// What participants may do with a [`DragSession`] right now.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum SessionMode {
    /// Drag start: payloads and the preview may be written.
    #[default]
    ReadWrite,
    /// In flight: only the offered types may be inspected.
    Protected,
    /// Release: payloads may be read but not written.
    ReadOnly,
}

/// Custom drag image: an element rendered under the pointer at `offset`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DragPreview {
    /// The element whose current rendering is used as the image.
    pub element: ElementId,
    /// Anchor of the image relative to the pointer.
    pub offset: Vec2,
}

/// Error returned by writes to a [`DragSession`] outside drag start.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    /// The session is not in [`SessionMode::ReadWrite`].
    #[error("drag session is {0:?}; payloads can only be written during drag start")]
    NotWritable(SessionMode),
}

/// The transfer object for a single drag gesture.
#[derive(Clone, Debug)]
pub struct DragSession {
    id: SessionId,
    mode: SessionMode,
    types: SmallVec<[PayloadType; 4]>,
    data: HashMap<PayloadType, String>,
    preview: Option<DragPreview>,
}

impl DragSession {
    /// Creates an empty, writable session.
    #[must_use]
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            mode: SessionMode::ReadWrite,
            types: SmallVec::new(),
            data: HashMap::new(),
            preview: None,
        }
    }

    /// Returns this session's id.
    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the current access mode.
    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// Switches the access mode. Only the host runtime should call this.
    pub fn set_mode(&mut self, mode: SessionMode) {
        self.mode = mode;
    }

    fn ensure_writable(&self) -> Result<(), TransferError> {
        match self.mode {
            SessionMode::ReadWrite => Ok(()),
            mode => Err(TransferError::NotWritable(mode)),
        }
    }

    /// Stores `value` under `ty`.
    ///
    /// Setting an already offered type replaces its value and keeps its
    /// position in [`offered_types`](Self::offered_types).
    pub fn set_payload(
        &mut self,
        ty: impl Into<PayloadType>,
        value: impl Into<String>,
    ) -> Result<(), TransferError> {
        self.ensure_writable()?;
        let ty = ty.into();
        if !self.types.contains(&ty) {
            self.types.push(ty.clone());
        }
        self.data.insert(ty, value.into());
        Ok(())
    }

    /// Removes the payload stored under `ty`, if any.
    pub fn clear_payload(&mut self, ty: &PayloadType) -> Result<(), TransferError> {
        self.ensure_writable()?;
        self.types.retain(|t| t != ty);
        self.data.remove(ty);
        Ok(())
    }

    /// Removes every payload.
    pub fn clear(&mut self) -> Result<(), TransferError> {
        self.ensure_writable()?;
        self.types.clear();
        self.data.clear();
        Ok(())
    }

    /// Returns the payload stored under `ty`.
    ///
    /// Returns `None` when `ty` was never set or while the session is
    /// [`SessionMode::Protected`].
    #[must_use]
    pub fn payload(&self, ty: &PayloadType) -> Option<&str> {
        if self.mode == SessionMode::Protected {
            return None;
        }
        self.data.get(ty).map(String::as_str)
    }

    /// Returns the offered types in the order they were first set.
    #[must_use]
    pub fn offered_types(&self) -> &[PayloadType] {
        &self.types
    }

    /// Returns `true` if `ty` is among the offered types.
    #[must_use]
    pub fn offers(&self, ty: &PayloadType) -> bool {
        self.types.contains(ty)
    }

    /// Uses `element`'s current rendering as the drag image.
    pub fn set_preview(&mut self, element: ElementId, offset: Vec2) -> Result<(), TransferError> {
        self.ensure_writable()?;
        self.preview = Some(DragPreview { element, offset });
        Ok(())
    }

    /// Returns the custom drag image, if one was set.
    #[must_use]
    pub fn preview(&self) -> Option<&DragPreview> {
        self.preview.as_ref()
    }
}
