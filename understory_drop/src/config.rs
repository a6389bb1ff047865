// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration for drag sources and drop zones.
//!
//! Both types implement [`Default`] with the well-known
//! [`DRAG_EXAMPLE_TYPE`](crate::payload::DRAG_EXAMPLE_TYPE). With the `serde`
//! feature enabled they can be loaded from any serde format; missing fields
//! fall back to their defaults.

use alloc::string::String;

use kurbo::Vec2;

use crate::payload::PayloadType;
use crate::visual::ZoneClasses;

/// Offset of the custom drag image from the pointer.
pub const DEFAULT_PREVIEW_OFFSET: Vec2 = Vec2::new(10.0, 10.0);

/// Settings for a [`DropZone`](crate::target::DropZone).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DropZoneConfig {
    /// The only payload type this zone accepts.
    pub accept: PayloadType,
    /// Class tokens for each visual state.
    pub classes: ZoneClasses,
    /// Text shown before the dropped value.
    pub label: String,
}

impl Default for DropZoneConfig {
    fn default() -> Self {
        Self {
            accept: PayloadType::default(),
            classes: ZoneClasses::default(),
            label: "Drop Here".into(),
        }
    }
}

/// Settings for a [`DragSource`](crate::source::DragSource).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DragSourceConfig {
    /// Type the item is registered under at drag start.
    pub payload_type: PayloadType,
    /// Anchor of the drag image relative to the pointer.
    pub preview_offset: Vec2,
}

impl Default for DragSourceConfig {
    fn default() -> Self {
        Self {
            payload_type: PayloadType::default(),
            preview_offset: DEFAULT_PREVIEW_OFFSET,
        }
    }
}
