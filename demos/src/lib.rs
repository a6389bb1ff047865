// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared setup for the drag-and-drop demos.
//!
//! [`SimpleCopy`] mounts three draggable items and one drop zone on a single
//! headless surface and renders them as a line of text.

use std::error::Error;
use std::fs;
use std::path::Path;

use tracing_subscriber::EnvFilter;
use understory_drop::config::DropZoneConfig;
use understory_drop::session::ElementId;
use understory_drop::source::DragSource;
use understory_drop::surface::{Release, Surface, SurfaceError};
use understory_drop::target::{DropZone, ZoneId};

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `debug`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    // A second install (e.g. from tests) is not an error worth reporting.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Read a [`DropZoneConfig`] from a JSON file.
pub fn load_zone_config(path: &Path) -> Result<DropZoneConfig, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Errors from scripting the [`SimpleCopy`] story.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoryError {
    /// The story has no drag source at this index.
    #[error("no drag source at index {0}")]
    NoSource(usize),
    /// The surface rejected a step of the gesture.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Three sources (items 1, 2, 3) and one drop zone.
#[derive(Debug)]
pub struct SimpleCopy {
    /// The host surface.
    pub surface: Surface,
    /// Draggable items, left to right.
    pub sources: Vec<DragSource>,
    /// The drop zone, mounted on `surface`.
    pub zone: ZoneId,
}

impl SimpleCopy {
    /// Mount the story with `config` for the drop zone.
    pub fn mount(config: DropZoneConfig) -> Self {
        let mut surface = Surface::new();
        let sources = (1..=3)
            .map(|item| DragSource::new(item).with_element(ElementId(item.unsigned_abs())))
            .collect();
        let zone = surface.mount_zone(config);
        Self {
            surface,
            sources,
            zone,
        }
    }

    /// Drag source `index` onto the zone and release it there.
    pub fn drag_onto_zone(&mut self, index: usize) -> Result<Release, StoryError> {
        let source = self.sources.get(index).ok_or(StoryError::NoSource(index))?;
        self.surface.begin_drag(source)?;
        self.surface.drag_over(self.zone)?;
        Ok(self.surface.release(self.zone)?)
    }

    /// Drag source `index`, pass over the zone, and let go elsewhere.
    pub fn drag_past_zone(&mut self, index: usize) -> Result<(), StoryError> {
        let source = self.sources.get(index).ok_or(StoryError::NoSource(index))?;
        self.surface.begin_drag(source)?;
        self.surface.drag_over(self.zone)?;
        self.surface.drag_leave(self.zone)?;
        Ok(self.surface.cancel()?)
    }

    /// The drop zone, unless it was unmounted from `surface`.
    pub fn drop_zone(&self) -> Option<&DropZone> {
        self.surface.zone(self.zone)
    }

    /// Render the story as one line of text.
    pub fn render(&self) -> String {
        let mut line = String::new();
        for source in &self.sources {
            line.push_str(&format!("[{}] ", source.label()));
        }
        let Some(zone) = self.drop_zone() else {
            return line.trim_end().to_owned();
        };
        line.push_str(&format!("[{}]", zone.label()));
        let class = zone.class_name();
        if !class.is_empty() {
            line.push_str(&format!(" ({class})"));
        }
        line
    }
}
