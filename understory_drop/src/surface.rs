// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A headless host runtime for one visual surface.
//!
//! [`Surface`] owns the surface's [`SessionEvents`], the drop zones mounted on
//! it, and at most one active [`DragSession`]. It drives a gesture the way a
//! windowing host would:
//!
//! - [`begin_drag`](Surface::begin_drag) runs the source's drag-start handler
//!   on a writable session, protects it, and dispatches session start.
//! - [`drag_over`](Surface::drag_over) moves the pointer onto a zone. If the
//!   pointer was over a different zone, that zone gets pointer-leave first.
//! - [`drag_leave`](Surface::drag_leave) moves the pointer off a zone.
//! - [`release`](Surface::release) delivers the release to a zone only if the
//!   pointer is over that zone and its latest pointer-over permitted a drop,
//!   then ends the session.
//! - [`cancel`](Surface::cancel) ends the session without a release.
//!
//! ```
//! use understory_drop::config::DropZoneConfig;
//! use understory_drop::source::DragSource;
//! use understory_drop::surface::Surface;
//! use understory_drop::target::ReleaseOutcome;
//!
//! let mut surface = Surface::new();
//! let zone = surface.mount_zone(DropZoneConfig::default());
//!
//! surface.begin_drag(&DragSource::new(3)).unwrap();
//! assert!(surface.drag_over(zone).unwrap());
//! let release = surface.release(zone).unwrap();
//! assert_eq!(release.outcome(), Some(&ReleaseOutcome::Accepted(3)));
//! assert_eq!(surface.zone(zone).unwrap().drop_record(), Some(3));
//! ```

use alloc::vec::Vec;

use crate::config::DropZoneConfig;
use crate::observer::{SessionEventKind, SessionEvents};
use crate::session::{DragSession, SessionId, SessionMode, TransferError};
use crate::source::DragSource;
use crate::target::{DragEvent, DropZone, ReleaseOutcome, ZoneId};

/// Errors from driving a [`Surface`] out of order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// A drag session is already in progress.
    #[error("drag session {0} is already active")]
    SessionActive(SessionId),
    /// The operation needs an active drag session.
    #[error("no drag session is active")]
    NoSession,
    /// No zone with this id is mounted on the surface.
    #[error("{0} is not mounted on this surface")]
    UnknownZone(ZoneId),
    /// The drag-start handler failed to write the session.
    #[error(transparent)]
    Transfer(#[from] TransferError),
}

/// Result of [`Surface::release`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Release {
    /// The zone received the release.
    Dropped {
        /// What the zone did with it.
        outcome: ReleaseOutcome,
        /// Whether the zone suppressed the host's default release behavior.
        default_prevented: bool,
    },
    /// The zone did not hold a drop permission; the session was aborted.
    Refused,
}

impl Release {
    /// Returns the zone's outcome, if it received the release.
    #[must_use]
    pub fn outcome(&self) -> Option<&ReleaseOutcome> {
        match self {
            Self::Dropped { outcome, .. } => Some(outcome),
            Self::Refused => None,
        }
    }
}

/// The zone under the pointer and whether its latest pointer-over permitted
/// a drop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Hover {
    zone: ZoneId,
    permitted: bool,
}

/// Host runtime for a single surface.
#[derive(Debug, Default)]
pub struct Surface {
    events: SessionEvents,
    zones: Vec<DropZone>,
    active: Option<DragSession>,
    hover: Option<Hover>,
    next_session: u64,
}

impl Surface {
    /// Creates a surface with no zones and no active session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the surface's session events.
    #[must_use]
    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// Mounts a drop zone with `config` and returns its id.
    pub fn mount_zone(&mut self, config: DropZoneConfig) -> ZoneId {
        let zone = DropZone::with_config(&self.events, config);
        let id = zone.id();
        self.zones.push(zone);
        tracing::debug!(%id, "drop zone mounted");
        id
    }

    /// Unmounts zone `id`, returning it.
    ///
    /// Dropping the returned zone unsubscribes it from session events.
    pub fn unmount_zone(&mut self, id: ZoneId) -> Result<DropZone, SurfaceError> {
        let index = self.index_of(id)?;
        if self.hover.is_some_and(|h| h.zone == id) {
            self.hover = None;
        }
        tracing::debug!(%id, "drop zone unmounted");
        Ok(self.zones.remove(index))
    }

    /// Returns zone `id`, if mounted.
    #[must_use]
    pub fn zone(&self, id: ZoneId) -> Option<&DropZone> {
        self.zones.iter().find(|z| z.id() == id)
    }

    /// Returns the mounted zones in mount order.
    pub fn zones(&self) -> impl Iterator<Item = &DropZone> {
        self.zones.iter()
    }

    fn index_of(&self, id: ZoneId) -> Result<usize, SurfaceError> {
        self.zones
            .iter()
            .position(|z| z.id() == id)
            .ok_or(SurfaceError::UnknownZone(id))
    }

    /// Returns the active session, if any.
    #[must_use]
    pub fn active_session(&self) -> Option<&DragSession> {
        self.active.as_ref()
    }

    /// Returns the zone under the pointer during the active session.
    #[must_use]
    pub fn hovered_zone(&self) -> Option<ZoneId> {
        self.hover.map(|h| h.zone)
    }

    /// Starts a drag from `source`.
    pub fn begin_drag(&mut self, source: &DragSource) -> Result<SessionId, SurfaceError> {
        self.begin_drag_with(|session| source.on_drag_start(session))
    }

    /// Starts a drag whose drag-start handler is `start`.
    ///
    /// Use this for sessions from sources that are not [`DragSource`]s, such
    /// as text selections or foreign widgets.
    pub fn begin_drag_with(
        &mut self,
        start: impl FnOnce(&mut DragSession) -> Result<(), TransferError>,
    ) -> Result<SessionId, SurfaceError> {
        if let Some(active) = &self.active {
            return Err(SurfaceError::SessionActive(active.id()));
        }

        self.next_session += 1;
        let mut session = DragSession::new(SessionId(self.next_session));
        start(&mut session)?;
        session.set_mode(SessionMode::Protected);

        let id = session.id();
        tracing::debug!(session = %id, types = ?session.offered_types(), "session begins");
        self.events.dispatch(SessionEventKind::Start, &session);
        self.active = Some(session);
        self.hover = None;
        Ok(id)
    }

    /// Moves the pointer over zone `id`. Returns whether a drop is permitted.
    ///
    /// The previously hovered zone, if different, receives pointer-leave first.
    pub fn drag_over(&mut self, id: ZoneId) -> Result<bool, SurfaceError> {
        let index = self.index_of(id)?;
        let session = self.active.as_ref().ok_or(SurfaceError::NoSession)?;

        if let Some(previous) = self.hover.filter(|h| h.zone != id) {
            if let Some(zone) = self.zones.iter_mut().find(|z| z.id() == previous.zone) {
                zone.on_pointer_leave();
            }
        }

        let mut event = DragEvent::new(session);
        self.zones[index].on_pointer_over(&mut event);
        let permitted = event.default_prevented();
        self.hover = Some(Hover {
            zone: id,
            permitted,
        });
        Ok(permitted)
    }

    /// Moves the pointer off zone `id`.
    pub fn drag_leave(&mut self, id: ZoneId) -> Result<(), SurfaceError> {
        let index = self.index_of(id)?;
        if self.active.is_none() {
            return Err(SurfaceError::NoSession);
        }
        self.zones[index].on_pointer_leave();
        if self.hover.is_some_and(|h| h.zone == id) {
            self.hover = None;
        }
        Ok(())
    }

    /// Releases over zone `id` and ends the session.
    ///
    /// The zone receives the release only if it is under the pointer and its
    /// latest pointer-over permitted a drop; otherwise the result is
    /// [`Release::Refused`].
    pub fn release(&mut self, id: ZoneId) -> Result<Release, SurfaceError> {
        let index = self.index_of(id)?;
        let mut session = self.active.take().ok_or(SurfaceError::NoSession)?;

        let permitted = self.hover == Some(Hover {
            zone: id,
            permitted: true,
        });
        let release = if permitted {
            session.set_mode(SessionMode::ReadOnly);
            let mut event = DragEvent::new(&session);
            let outcome = self.zones[index].on_release(&mut event);
            Release::Dropped {
                default_prevented: event.default_prevented(),
                outcome,
            }
        } else {
            tracing::debug!(session = %session.id(), %id, "release refused; no drop permitted");
            Release::Refused
        };

        self.end(session);
        Ok(release)
    }

    /// Aborts the active session.
    pub fn cancel(&mut self) -> Result<(), SurfaceError> {
        let session = self.active.take().ok_or(SurfaceError::NoSession)?;
        tracing::debug!(session = %session.id(), "session cancelled");
        self.end(session);
        Ok(())
    }

    fn end(&mut self, mut session: DragSession) {
        session.set_mode(SessionMode::Protected);
        self.hover = None;
        self.events.dispatch(SessionEventKind::End, &session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::DragState;
    use crate::payload::DRAG_EXAMPLE_TYPE;

    fn surface_with_zone() -> (Surface, ZoneId) {
        let mut surface = Surface::new();
        let zone = surface.mount_zone(DropZoneConfig::default());
        (surface, zone)
    }

    #[test]
    fn only_one_session_at_a_time() {
        let mut surface = Surface::new();
        let first = surface.begin_drag(&DragSource::new(1)).unwrap();
        assert_eq!(
            surface.begin_drag(&DragSource::new(2)),
            Err(SurfaceError::SessionActive(first))
        );

        surface.cancel().unwrap();
        let second = surface.begin_drag(&DragSource::new(2)).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn operations_need_a_session() {
        let (mut surface, zone) = surface_with_zone();
        assert_eq!(surface.drag_over(zone), Err(SurfaceError::NoSession));
        assert_eq!(surface.drag_leave(zone), Err(SurfaceError::NoSession));
        assert_eq!(surface.release(zone), Err(SurfaceError::NoSession));
        assert_eq!(surface.cancel(), Err(SurfaceError::NoSession));
    }

    #[test]
    fn unknown_zone_is_an_error_and_keeps_session() {
        let (mut surface, zone) = surface_with_zone();
        let gone = surface.mount_zone(DropZoneConfig::default());
        drop(surface.unmount_zone(gone).unwrap());

        surface.begin_drag(&DragSource::new(1)).unwrap();
        assert_eq!(surface.drag_over(gone), Err(SurfaceError::UnknownZone(gone)));
        assert_eq!(surface.release(gone), Err(SurfaceError::UnknownZone(gone)));
        assert!(surface.active_session().is_some());
        assert!(surface.drag_over(zone).unwrap());
    }

    #[test]
    fn session_is_protected_in_flight() {
        let mut surface = Surface::new();
        surface.begin_drag(&DragSource::new(1)).unwrap();
        let session = surface.active_session().unwrap();
        assert_eq!(session.mode(), SessionMode::Protected);
        assert_eq!(session.payload(&DRAG_EXAMPLE_TYPE), None);
    }

    #[test]
    fn release_without_permission_is_refused() {
        let (mut surface, zone) = surface_with_zone();
        surface.begin_drag(&DragSource::new(1)).unwrap();

        assert_eq!(surface.release(zone), Ok(Release::Refused));
        let zone = surface.zone(zone).unwrap();
        assert_eq!(zone.drop_record(), None);
        assert_eq!(zone.drag_state(), DragState::Idle);
        assert!(surface.active_session().is_none());
    }

    #[test]
    fn leave_revokes_permission() {
        let (mut surface, zone) = surface_with_zone();
        surface.begin_drag(&DragSource::new(1)).unwrap();
        surface.drag_over(zone).unwrap();
        surface.drag_leave(zone).unwrap();
        assert_eq!(surface.hovered_zone(), None);

        assert_eq!(surface.release(zone), Ok(Release::Refused));
        assert_eq!(surface.zone(zone).unwrap().drop_record(), None);
    }

    #[test]
    fn unmounting_hovered_zone_clears_hover() {
        let (mut surface, zone) = surface_with_zone();
        surface.begin_drag(&DragSource::new(1)).unwrap();
        surface.drag_over(zone).unwrap();

        let unmounted = surface.unmount_zone(zone).unwrap();
        assert_eq!(surface.hovered_zone(), None);
        assert_eq!(unmounted.unmount(), None);
        assert_eq!(surface.events().listener_count(), 0);
    }

    #[test]
    fn failing_start_handler_leaves_no_session() {
        let mut surface = Surface::new();
        let err = surface
            .begin_drag_with(|_| Err(TransferError::NotWritable(SessionMode::Protected)))
            .unwrap_err();
        assert!(matches!(err, SurfaceError::Transfer(_)));
        assert!(surface.active_session().is_none());
    }
}
