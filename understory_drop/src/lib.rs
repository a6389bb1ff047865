// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drop --heading-base-level=0

//! Understory Drop: headless drag-and-drop state for a single surface.
//!
//! This crate models typed drag-and-drop between draggable sources and drop
//! zones without assuming any particular UI framework. A host forwards its
//! drag events; the crate answers what each zone should look like and what
//! was dropped on it.
//!
//! - [`payload`]: Payload type tags and the integer item encoding
//! - [`session`]: The transfer object for one drag gesture
//! - [`source`]: Drag sources that register a payload at drag start
//! - [`observer`]: Surface-wide session start/end events and per-widget observers
//! - [`target`]: Drop zones combining session state with local pointer events
//! - [`visual`]: The pure mapping from zone state to visual state
//! - [`surface`]: A headless host runtime that drives whole gestures
//!
//! ## Negotiation
//!
//! Sources and zones never look at each other's payloads up front. A source
//! registers its payload under a [`PayloadType`](payload::PayloadType) at drag
//! start. While the drag is in flight, zones can only see which types are
//! offered. Payload content is readable only on release, by the zone the
//! pointer is released over, and only if that zone permitted the drop.
//!
//! ## Zone state
//!
//! Each [`DropZone`](target::DropZone) tracks two independent inputs:
//!
//! - [`DragState`](observer::DragState), written only by session start/end
//!   events, which every zone observes for itself.
//! - A bounds flag, written by the zone's own pointer handlers and reset by
//!   session end.
//!
//! [`visual_for`](visual::visual_for) maps the pair to a [`Visual`](visual::Visual).
//!
//! ## Example
//!
//! ```rust
//! use understory_drop::config::DropZoneConfig;
//! use understory_drop::source::DragSource;
//! use understory_drop::surface::Surface;
//! use understory_drop::visual::Visual;
//!
//! let mut surface = Surface::new();
//! let zone = surface.mount_zone(DropZoneConfig::default());
//! let source = DragSource::new(2);
//!
//! surface.begin_drag(&source).unwrap();
//! assert_eq!(surface.zone(zone).unwrap().visual(), Visual::Warning);
//!
//! surface.drag_over(zone).unwrap();
//! assert_eq!(surface.zone(zone).unwrap().visual(), Visual::Accepting);
//!
//! surface.release(zone).unwrap();
//! let zone = surface.zone(zone).unwrap();
//! assert_eq!(zone.visual(), Visual::Neutral);
//! assert_eq!(zone.label(), "Drop Here: 2");
//! ```
//!
//! ## Logging
//!
//! State transitions are reported through [`tracing`] at `debug` and `trace`
//! level. Install any subscriber to see them.
//!
//! ## Features
//!
//! - `std` (default): Build with the standard library
//! - `libm`: Use `libm` for Kurbo's float math without `std`
//! - `serde`: Derive `Serialize`/`Deserialize` for configuration types
//!
//! This crate is `no_std` compatible (with `alloc`) for all modules.

#![no_std]

extern crate alloc;

pub mod config;
pub mod observer;
pub mod payload;
pub mod session;
pub mod source;
pub mod surface;
pub mod target;
pub mod visual;
