// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual state of a drop zone.
//!
//! [`visual_for`] is the whole mapping. It is pure and total over
//! ([`DragState`], bounds):
//!
//! | drag state               | over  | visual                |
//! |--------------------------|-------|-----------------------|
//! | `DraggingUnrecognized`   | any   | [`Visual::Invalid`]   |
//! | `DraggingRecognized`     | false | [`Visual::Warning`]   |
//! | `DraggingRecognized`     | true  | [`Visual::Accepting`] |
//! | `Idle`                   | any   | [`Visual::Neutral`]   |

use alloc::string::String;

use crate::observer::DragState;

/// What a drop zone should look like.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Visual {
    /// No drag in progress.
    #[default]
    Neutral,
    /// A drag is in progress but carries nothing this zone understands.
    Invalid,
    /// A compatible drag is in progress elsewhere on the surface.
    Warning,
    /// A compatible drag is over this zone and may be dropped.
    Accepting,
}

/// Maps a drag state and bounds flag to a [`Visual`].
#[must_use]
pub const fn visual_for(drag: DragState, over: bool) -> Visual {
    match (drag, over) {
        (DragState::Idle, _) => Visual::Neutral,
        (DragState::DraggingUnrecognized, _) => Visual::Invalid,
        (DragState::DraggingRecognized, false) => Visual::Warning,
        (DragState::DraggingRecognized, true) => Visual::Accepting,
    }
}

/// Presentation class tokens, one per [`Visual`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ZoneClasses {
    /// Class for [`Visual::Neutral`].
    pub neutral: String,
    /// Class for [`Visual::Invalid`].
    pub invalid: String,
    /// Class for [`Visual::Warning`].
    pub warning: String,
    /// Class for [`Visual::Accepting`].
    pub accepting: String,
}

impl ZoneClasses {
    /// Returns the class token for `visual`.
    #[must_use]
    pub fn get(&self, visual: Visual) -> &str {
        match visual {
            Visual::Neutral => &self.neutral,
            Visual::Invalid => &self.invalid,
            Visual::Warning => &self.warning,
            Visual::Accepting => &self.accepting,
        }
    }
}

impl Default for ZoneClasses {
    fn default() -> Self {
        Self {
            neutral: String::new(),
            invalid: "border-red-500".into(),
            warning: "border-yellow-500".into(),
            accepting: "border-green-500".into(),
        }
    }
}
