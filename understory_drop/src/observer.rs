// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface-wide drag session events and the per-widget observer built on them.
//!
//! [`SessionEvents`] is the event source for session start and end. It is
//! shared by handle: cloning it yields another handle to the same listener
//! list. Listeners are registered with [`SessionEvents::add_listener`], which
//! returns a [`Subscription`] guard; dropping the guard removes the listener.
//!
//! [`SessionObserver`] holds one start listener and one end listener and the
//! [`DragFlags`] they write. Each widget attaches its own observer, so no
//! state is shared between widgets beyond the read-only [`DragSession`].
//!
//! ## Minimal example
//!
//! ```
//! use understory_drop::observer::{DragState, SessionEventKind, SessionEvents, SessionObserver};
//! use understory_drop::payload::DRAG_EXAMPLE_TYPE;
//! use understory_drop::session::{DragSession, SessionId};
//!
//! let events = SessionEvents::new();
//! let observer = SessionObserver::attach(&events, DRAG_EXAMPLE_TYPE);
//!
//! let mut session = DragSession::new(SessionId(1));
//! session.set_payload(DRAG_EXAMPLE_TYPE, "1").unwrap();
//!
//! events.dispatch(SessionEventKind::Start, &session);
//! assert_eq!(observer.drag_state(), DragState::DraggingRecognized);
//!
//! events.dispatch(SessionEventKind::End, &session);
//! assert_eq!(observer.drag_state(), DragState::Idle);
//!
//! drop(observer);
//! assert_eq!(events.listener_count(), 0);
//! ```

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use smallvec::SmallVec;

use crate::payload::PayloadType;
use crate::session::DragSession;

/// Which session lifecycle event a listener receives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SessionEventKind {
    /// A drag session started somewhere on the surface.
    Start,
    /// The drag session ended, by drop or by abort.
    End,
}

/// Identifies a registered listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Returns the raw id, unique within one [`SessionEvents`].
    #[must_use]
    pub const fn index(self) -> u64 {
        self.0
    }
}

type Callback = Rc<dyn Fn(&DragSession)>;

struct Listener {
    id: ListenerId,
    kind: SessionEventKind,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<Listener>,
}

impl Registry {
    fn contains(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|l| l.id == id)
    }
}

/// Event source for drag session start and end, shared across one surface.
#[derive(Clone, Default)]
pub struct SessionEvents {
    registry: Rc<RefCell<Registry>>,
}

impl SessionEvents {
    /// Creates an event source with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for `kind` events.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or cancelled.
    #[must_use = "dropping the subscription removes the listener"]
    pub fn add_listener(
        &self,
        kind: SessionEventKind,
        callback: impl Fn(&DragSession) + 'static,
    ) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push(Listener {
            id,
            kind,
            callback: Rc::new(callback),
        });
        tracing::trace!(?id, ?kind, "session listener added");
        Subscription {
            registry: Rc::downgrade(&self.registry),
            id,
        }
    }

    /// Notifies every `kind` listener, in registration order.
    ///
    /// Listeners added during dispatch are not called for this event.
    /// Listeners removed during dispatch are skipped if not yet called.
    /// Returns the number of listeners called.
    pub fn dispatch(&self, kind: SessionEventKind, session: &DragSession) -> usize {
        let snapshot: SmallVec<[(ListenerId, Callback); 8]> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| (l.id, Rc::clone(&l.callback)))
            .collect();

        let mut called = 0;
        for (id, callback) in snapshot {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            callback(session);
            called += 1;
        }
        tracing::trace!(?kind, session = %session.id(), called, "session event dispatched");
        called
    }

    /// Returns the number of registered listeners of either kind.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl fmt::Debug for SessionEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionEvents")
            .field("listeners", &self.listener_count())
            .finish_non_exhaustive()
    }
}

/// Guard for a listener registered with [`SessionEvents::add_listener`].
///
/// Dropping the guard removes the listener. If the event source is already
/// gone, dropping is a no-op.
pub struct Subscription {
    registry: Weak<RefCell<Registry>>,
    id: ListenerId,
}

impl Subscription {
    /// Returns the id of the guarded listener.
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Removes the listener now.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().listeners.retain(|l| l.id != self.id);
            tracing::trace!(id = ?self.id, "session listener removed");
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("live", &(self.registry.strong_count() > 0))
            .finish()
    }
}

/// How the current drag session relates to one widget.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum DragState {
    /// No drag session is in progress.
    #[default]
    Idle,
    /// A session is in progress without the accepted payload type.
    DraggingUnrecognized,
    /// A session is in progress and offers the accepted payload type.
    DraggingRecognized,
}

impl DragState {
    /// Returns `true` unless [`DragState::Idle`].
    #[must_use]
    pub const fn is_dragging(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Flags written by a [`SessionObserver`].
///
/// `drag` is written only by the observer's listeners. `over` is written by
/// the owning widget's pointer handlers and reset by session end.
#[derive(Debug, Default)]
pub struct DragFlags {
    drag: Cell<DragState>,
    over: Cell<bool>,
}

impl DragFlags {
    /// Returns the current drag state.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag.get()
    }

    /// Returns `true` while the pointer is over the widget with an accepted
    /// payload type.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over.get()
    }

    pub(crate) fn set_over(&self, over: bool) {
        self.over.set(over);
    }
}

/// One widget's view of surface-wide drag sessions.
///
/// Attaching registers a start listener and an end listener. Both are removed
/// when the observer is dropped.
pub struct SessionObserver {
    flags: Rc<DragFlags>,
    accept: PayloadType,
    start: Subscription,
    _end: Subscription,
}

impl SessionObserver {
    /// Subscribes to `events`, classifying sessions by whether they offer
    /// `accept`.
    #[must_use]
    pub fn attach(events: &SessionEvents, accept: PayloadType) -> Self {
        let flags = Rc::new(DragFlags::default());

        let start = {
            let flags = Rc::clone(&flags);
            let accept = accept.clone();
            events.add_listener(SessionEventKind::Start, move |session| {
                let state = if session.offers(&accept) {
                    DragState::DraggingRecognized
                } else {
                    DragState::DraggingUnrecognized
                };
                flags.drag.set(state);
                tracing::debug!(session = %session.id(), ?state, "drag session started");
            })
        };

        let end = {
            let flags = Rc::clone(&flags);
            events.add_listener(SessionEventKind::End, move |session| {
                flags.drag.set(DragState::Idle);
                flags.over.set(false);
                tracing::debug!(session = %session.id(), "drag session ended");
            })
        };

        Self {
            flags,
            accept,
            start,
            _end: end,
        }
    }

    /// Returns the id of this observer's start listener.
    ///
    /// It is unique among observers attached to the same [`SessionEvents`].
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.start.id()
    }

    /// Returns the accepted payload type.
    #[must_use]
    pub fn accept(&self) -> &PayloadType {
        &self.accept
    }

    /// Returns the flags written by this observer.
    #[must_use]
    pub fn flags(&self) -> &DragFlags {
        &self.flags
    }

    /// Returns the current drag state.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.flags.drag_state()
    }
}

impl fmt::Debug for SessionObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionObserver")
            .field("accept", &self.accept)
            .field("flags", &self.flags)
            .finish_non_exhaustive()
    }
}
