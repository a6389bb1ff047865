// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop zone: combines session events with local pointer events.
//!
//! ## Usage
//!
//! 1) Mount a [`DropZone`] against the surface's [`SessionEvents`]. It starts
//!    observing session start and end immediately.
//! 2) Forward pointer-over, pointer-leave and release events for this zone's
//!    element to [`DropZone::on_pointer_over`], [`DropZone::on_pointer_leave`]
//!    and [`DropZone::on_release`].
//! 3) Render from [`DropZone::visual`] (or [`DropZone::class_name`]) and
//!    [`DropZone::label`].
//! 4) Drop the zone (or call [`DropZone::unmount`]) to unsubscribe.
//!
//! Session state ([`DragState`]) is written only by the zone's
//! [`SessionObserver`]. The zone's own handlers write the bounds flag and the
//! drop record.
//!
//! ## Minimal example
//!
//! ```
//! use understory_drop::observer::{SessionEventKind, SessionEvents};
//! use understory_drop::payload::DRAG_EXAMPLE_TYPE;
//! use understory_drop::session::{DragSession, SessionId, SessionMode};
//! use understory_drop::target::{DragEvent, DropZone, ReleaseOutcome};
//! use understory_drop::visual::Visual;
//!
//! let events = SessionEvents::new();
//! let mut zone = DropZone::mount(&events);
//!
//! let mut session = DragSession::new(SessionId(1));
//! session.set_payload(DRAG_EXAMPLE_TYPE, "2").unwrap();
//! session.set_mode(SessionMode::Protected);
//! events.dispatch(SessionEventKind::Start, &session);
//! assert_eq!(zone.visual(), Visual::Warning);
//!
//! let mut over = DragEvent::new(&session);
//! zone.on_pointer_over(&mut over);
//! assert!(over.default_prevented());
//! assert_eq!(zone.visual(), Visual::Accepting);
//!
//! session.set_mode(SessionMode::ReadOnly);
//! let mut release = DragEvent::new(&session);
//! assert_eq!(zone.on_release(&mut release), ReleaseOutcome::Accepted(2));
//!
//! events.dispatch(SessionEventKind::End, &session);
//! assert_eq!(zone.visual(), Visual::Neutral);
//! assert_eq!(zone.label(), "Drop Here: 2");
//! ```

use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::config::DropZoneConfig;
use crate::observer::{DragState, ListenerId, SessionEvents, SessionObserver};
use crate::payload::{PayloadDecodeError, decode_item};
use crate::session::DragSession;
use crate::visual::{Visual, visual_for};

/// A pointer event over one element during a drag session.
///
/// Handlers call [`prevent_default`](Self::prevent_default) to override the
/// host's default: on pointer-over the default is to refuse a drop, on
/// release it is the host's own release behavior.
#[derive(Debug)]
pub struct DragEvent<'a> {
    session: &'a DragSession,
    default_prevented: bool,
}

impl<'a> DragEvent<'a> {
    /// Wraps `session` in a fresh event.
    #[must_use]
    pub fn new(session: &'a DragSession) -> Self {
        Self {
            session,
            default_prevented: false,
        }
    }

    /// Returns the session being dragged.
    #[must_use]
    pub fn session(&self) -> &'a DragSession {
        self.session
    }

    /// Suppresses the host's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Returns `true` if a handler suppressed the default action.
    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// What [`DropZone::on_release`] did with a release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The payload decoded and replaced the drop record.
    Accepted(i64),
    /// No payload for the accepted type; nothing was done and the host's
    /// default release behavior was left in place.
    EmptyPayload,
    /// The payload did not decode; the drop record is unchanged.
    Rejected(PayloadDecodeError),
}

/// Identifies a mounted [`DropZone`] among zones sharing one [`SessionEvents`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneId(ListenerId);

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone #{}", self.0.index())
    }
}

/// A drop target that accepts one payload type.
#[derive(Debug)]
pub struct DropZone {
    config: DropZoneConfig,
    observer: SessionObserver,
    record: Option<i64>,
}

impl DropZone {
    /// Mounts a zone with the default configuration.
    #[must_use]
    pub fn mount(events: &SessionEvents) -> Self {
        Self::with_config(events, DropZoneConfig::default())
    }

    /// Mounts a zone with `config`.
    #[must_use]
    pub fn with_config(events: &SessionEvents, config: DropZoneConfig) -> Self {
        let observer = SessionObserver::attach(events, config.accept.clone());
        Self {
            config,
            observer,
            record: None,
        }
    }

    /// Unsubscribes from session events and returns the last drop record.
    pub fn unmount(self) -> Option<i64> {
        self.record
    }

    /// Returns this zone's id.
    #[must_use]
    pub fn id(&self) -> ZoneId {
        ZoneId(self.observer.id())
    }

    /// Handles the pointer moving over this zone.
    ///
    /// Permits a drop by preventing the event's default when the session
    /// offers the accepted type.
    pub fn on_pointer_over(&mut self, event: &mut DragEvent<'_>) {
        let supported = event.session().offers(&self.config.accept);
        self.set_over(supported);
        if supported {
            event.prevent_default();
        }
    }

    /// Handles the pointer leaving this zone.
    pub fn on_pointer_leave(&mut self) {
        self.set_over(false);
    }

    /// Handles a release over this zone.
    pub fn on_release(&mut self, event: &mut DragEvent<'_>) -> ReleaseOutcome {
        let payload = match event.session().payload(&self.config.accept) {
            Some(payload) if !payload.is_empty() => payload,
            // Leaves the host default in place. Whether an empty payload
            // should also suppress it is unresolved.
            _ => {
                tracing::debug!(session = %event.session().id(), "release without payload ignored");
                return ReleaseOutcome::EmptyPayload;
            }
        };

        event.prevent_default();
        self.set_over(false);
        match decode_item(payload) {
            Ok(value) => {
                tracing::debug!(session = %event.session().id(), value, "drop accepted");
                self.record = Some(value);
                ReleaseOutcome::Accepted(value)
            }
            Err(err) => {
                tracing::debug!(session = %event.session().id(), %err, "drop rejected");
                ReleaseOutcome::Rejected(err)
            }
        }
    }

    fn set_over(&self, over: bool) {
        let flags = self.observer.flags();
        if flags.is_over() != over {
            tracing::trace!(over, "drop zone bounds changed");
        }
        flags.set_over(over);
    }

    /// Returns the current session classification.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.observer.drag_state()
    }

    /// Returns `true` while the pointer is over this zone with an accepted
    /// payload type.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.observer.flags().is_over()
    }

    /// Returns the last successfully dropped value.
    #[must_use]
    pub fn drop_record(&self) -> Option<i64> {
        self.record
    }

    /// Returns the current visual state.
    #[must_use]
    pub fn visual(&self) -> Visual {
        visual_for(self.drag_state(), self.is_over())
    }

    /// Returns the configured class token for the current visual state.
    #[must_use]
    pub fn class_name(&self) -> &str {
        self.config.classes.get(self.visual())
    }

    /// Returns the zone's text, including the last dropped value if any.
    #[must_use]
    pub fn label(&self) -> String {
        match self.record {
            Some(value) => format!("{}: {value}", self.config.label),
            None => self.config.label.clone(),
        }
    }

    /// Returns the zone's configuration.
    #[must_use]
    pub fn config(&self) -> &DropZoneConfig {
        &self.config
    }
}
