// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag source: registers an item's payload when a drag starts.
//!
//! A source has no state machine. Its only job is to write the encoded item
//! into the [`DragSession`] from inside the drag-start handler, while the
//! session is still [`SessionMode::ReadWrite`](crate::session::SessionMode::ReadWrite).
//! If the source knows its rendered element, it also uses that element as the
//! drag image so no overlay has to follow the pointer.
//!
//! ```
//! use understory_drop::payload::DRAG_EXAMPLE_TYPE;
//! use understory_drop::session::{DragSession, ElementId, SessionId};
//! use understory_drop::source::DragSource;
//!
//! let source = DragSource::new(2).with_element(ElementId(7));
//! let mut session = DragSession::new(SessionId(1));
//! source.on_drag_start(&mut session).unwrap();
//!
//! assert_eq!(session.offered_types(), &[DRAG_EXAMPLE_TYPE]);
//! assert_eq!(session.preview().unwrap().element, ElementId(7));
//! assert_eq!(source.label(), "Drag Me: 2");
//! ```

use alloc::format;
use alloc::string::String;

use crate::config::DragSourceConfig;
use crate::payload::encode_item;
use crate::session::{DragSession, ElementId, TransferError};

/// A draggable integer item.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSource {
    item: i64,
    element: Option<ElementId>,
    config: DragSourceConfig,
}

impl DragSource {
    /// Creates a source for `item` with no known element.
    #[must_use]
    pub fn new(item: i64) -> Self {
        Self {
            item,
            element: None,
            config: DragSourceConfig::default(),
        }
    }

    /// Sets the element used as the drag image.
    #[must_use]
    pub fn with_element(mut self, element: ElementId) -> Self {
        self.element = Some(element);
        self
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: DragSourceConfig) -> Self {
        self.config = config;
        self
    }

    /// Updates the rendered element, e.g. after (re)mounting.
    pub fn set_element(&mut self, element: Option<ElementId>) {
        self.element = element;
    }

    /// Returns the carried item.
    #[must_use]
    pub fn item(&self) -> i64 {
        self.item
    }

    /// Returns the rendered element, if known.
    #[must_use]
    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    /// Returns the source's configuration.
    #[must_use]
    pub fn config(&self) -> &DragSourceConfig {
        &self.config
    }

    /// Handles drag start.
    ///
    /// Fails only if `session` is no longer writable.
    pub fn on_drag_start(&self, session: &mut DragSession) -> Result<(), TransferError> {
        session.set_payload(self.config.payload_type.clone(), encode_item(self.item))?;

        match self.element {
            Some(element) => session.set_preview(element, self.config.preview_offset)?,
            None => {
                tracing::trace!(item = self.item, "no element for drag preview; using default");
            }
        }
        tracing::debug!(session = %session.id(), item = self.item, "drag started");
        Ok(())
    }

    /// Returns the source's text.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Drag Me: {}", self.item)
    }
}
