// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for whole drag gestures across sources, zones and the surface.
//!
//! These drive `Surface` the way a host would and check what each mounted
//! zone reports afterwards.

use understory_drop::config::DropZoneConfig;
use understory_drop::observer::{DragState, SessionEventKind, SessionEvents};
use understory_drop::payload::{DRAG_EXAMPLE_TYPE, PayloadDecodeError};
use understory_drop::session::{DragSession, ElementId, SessionId, SessionMode};
use understory_drop::source::DragSource;
use understory_drop::surface::{Release, Surface};
use understory_drop::target::{DragEvent, DropZone, ReleaseOutcome, ZoneId};
use understory_drop::visual::Visual;

fn mount(surface: &mut Surface) -> ZoneId {
    surface.mount_zone(DropZoneConfig::default())
}

fn zone(surface: &Surface, id: ZoneId) -> &DropZone {
    surface.zone(id).unwrap()
}

#[test]
fn dropped_item_becomes_the_record() {
    for item in [0, 1, -1, 2, 99, i64::MIN, i64::MAX] {
        let mut surface = Surface::new();
        let id = mount(&mut surface);

        surface.begin_drag(&DragSource::new(item)).unwrap();
        assert!(surface.drag_over(id).unwrap());
        assert!(zone(&surface, id).is_over());
        surface.release(id).unwrap();

        assert_eq!(zone(&surface, id).drop_record(), Some(item), "item {item}");
    }
}

#[test]
fn foreign_session_never_reaches_bounds_or_record() {
    let mut surface = Surface::new();
    let a = mount(&mut surface);
    let b = mount(&mut surface);

    // Seed a record so we can see it survive.
    surface.begin_drag(&DragSource::new(7)).unwrap();
    surface.drag_over(a).unwrap();
    surface.release(a).unwrap();

    surface
        .begin_drag_with(|session| session.set_payload("text/plain", "8"))
        .unwrap();
    assert_eq!(zone(&surface, a).drag_state(), DragState::DraggingUnrecognized);
    assert_eq!(zone(&surface, b).drag_state(), DragState::DraggingUnrecognized);
    assert_eq!(zone(&surface, a).visual(), Visual::Invalid);

    assert!(!surface.drag_over(a).unwrap());
    assert!(!surface.drag_over(b).unwrap());
    assert!(!zone(&surface, a).is_over());
    assert!(!zone(&surface, b).is_over());

    assert_eq!(surface.release(b).unwrap(), Release::Refused);
    assert_eq!(zone(&surface, a).drop_record(), Some(7));
    assert_eq!(zone(&surface, b).drop_record(), None);
}

#[test]
fn foreign_session_released_on_zone_reads_no_payload() {
    let events = SessionEvents::new();
    let mut zone = DropZone::mount(&events);

    let mut own = DragSession::new(SessionId(1));
    own.set_payload(DRAG_EXAMPLE_TYPE, "7").unwrap();
    own.set_mode(SessionMode::ReadOnly);
    zone.on_release(&mut DragEvent::new(&own));
    assert_eq!(zone.drop_record(), Some(7));

    let mut foreign = DragSession::new(SessionId(2));
    foreign.set_payload("text/plain", "8").unwrap();
    foreign.set_mode(SessionMode::Protected);
    events.dispatch(SessionEventKind::Start, &foreign);

    foreign.set_mode(SessionMode::ReadOnly);
    let mut event = DragEvent::new(&foreign);
    assert_eq!(zone.on_release(&mut event), ReleaseOutcome::EmptyPayload);
    assert!(!event.default_prevented());
    assert_eq!(zone.drop_record(), Some(7));
    assert!(!zone.is_over());
}

#[test]
fn session_end_resets_every_zone() {
    let mut surface = Surface::new();
    let over = mount(&mut surface);
    let never_touched = mount(&mut surface);
    let left = mount(&mut surface);

    surface.begin_drag(&DragSource::new(1)).unwrap();
    surface.drag_over(left).unwrap();
    surface.drag_leave(left).unwrap();
    surface.drag_over(over).unwrap();
    assert!(zone(&surface, over).is_over());

    surface.cancel().unwrap();
    for id in [over, never_touched, left] {
        let zone = zone(&surface, id);
        assert_eq!(zone.drag_state(), DragState::Idle);
        assert!(!zone.is_over());
        assert_eq!(zone.visual(), Visual::Neutral);
        assert_eq!(zone.drop_record(), None);
    }

    // Same after a completed drop.
    surface.begin_drag(&DragSource::new(2)).unwrap();
    surface.drag_over(over).unwrap();
    surface.release(over).unwrap();
    for zone in surface.zones() {
        assert_eq!(zone.drag_state(), DragState::Idle);
        assert!(!zone.is_over());
    }
}

#[test]
fn absent_and_garbage_payloads_keep_record() {
    let mut surface = Surface::new();
    let id = mount(&mut surface);

    surface.begin_drag(&DragSource::new(4)).unwrap();
    surface.drag_over(id).unwrap();
    surface.release(id).unwrap();
    assert_eq!(zone(&surface, id).drop_record(), Some(4));

    // Offered type present, but no content.
    surface
        .begin_drag_with(|session| session.set_payload(DRAG_EXAMPLE_TYPE, ""))
        .unwrap();
    surface.drag_over(id).unwrap();
    assert_eq!(
        surface.release(id).unwrap(),
        Release::Dropped {
            outcome: ReleaseOutcome::EmptyPayload,
            default_prevented: false,
        }
    );
    assert_eq!(zone(&surface, id).drop_record(), Some(4));

    surface
        .begin_drag_with(|session| session.set_payload(DRAG_EXAMPLE_TYPE, "abc"))
        .unwrap();
    surface.drag_over(id).unwrap();
    assert_eq!(
        surface.release(id).unwrap(),
        Release::Dropped {
            outcome: ReleaseOutcome::Rejected(PayloadDecodeError::NotANumber("abc".into())),
            default_prevented: true,
        }
    );
    assert_eq!(zone(&surface, id).drop_record(), Some(4));
    assert_eq!(zone(&surface, id).label(), "Drop Here: 4");
}

#[test]
fn bounds_are_per_zone() {
    let mut surface = Surface::new();
    let a = mount(&mut surface);
    let b = mount(&mut surface);

    surface.begin_drag(&DragSource::new(5)).unwrap();
    surface.drag_over(a).unwrap();

    assert!(zone(&surface, a).is_over());
    assert!(!zone(&surface, b).is_over());
    assert_eq!(zone(&surface, a).visual(), Visual::Accepting);
    assert_eq!(zone(&surface, b).visual(), Visual::Warning);

    surface.release(a).unwrap();
    assert_eq!(zone(&surface, a).drop_record(), Some(5));
    assert_eq!(zone(&surface, b).drop_record(), None);
}

#[test]
fn release_goes_only_to_the_zone_that_permitted_it() {
    let mut surface = Surface::new();
    let a = mount(&mut surface);
    let b = mount(&mut surface);

    surface.begin_drag(&DragSource::new(9)).unwrap();
    assert!(surface.drag_over(a).unwrap());

    assert_eq!(surface.release(b).unwrap(), Release::Refused);
    assert_eq!(zone(&surface, a).drop_record(), None);
    assert_eq!(zone(&surface, b).drop_record(), None);
    assert!(surface.active_session().is_none());
}

#[test]
fn moving_between_zones_leaves_the_previous_one() {
    let mut surface = Surface::new();
    let a = mount(&mut surface);
    let b = mount(&mut surface);

    surface.begin_drag(&DragSource::new(9)).unwrap();
    surface.drag_over(a).unwrap();
    assert_eq!(surface.hovered_zone(), Some(a));

    // No explicit leave: the surface sends it to `a`.
    assert!(surface.drag_over(b).unwrap());
    assert_eq!(surface.hovered_zone(), Some(b));
    assert!(!zone(&surface, a).is_over());
    assert!(zone(&surface, b).is_over());
    assert_eq!(zone(&surface, a).visual(), Visual::Warning);
    assert_eq!(zone(&surface, b).visual(), Visual::Accepting);

    // The permission moved with the pointer.
    assert_eq!(surface.release(a).unwrap(), Release::Refused);
    assert_eq!(zone(&surface, a).drop_record(), None);
    assert_eq!(zone(&surface, b).drop_record(), None);

    surface.begin_drag(&DragSource::new(9)).unwrap();
    surface.drag_over(a).unwrap();
    surface.drag_over(b).unwrap();
    assert_eq!(
        surface.release(b).unwrap().outcome(),
        Some(&ReleaseOutcome::Accepted(9))
    );
    assert_eq!(zone(&surface, a).drop_record(), None);
    assert_eq!(zone(&surface, b).drop_record(), Some(9));
}

#[test]
fn simple_copy_end_to_end() {
    let mut surface = Surface::new();
    let sources = [1, 2, 3].map(|item| DragSource::new(item).with_element(ElementId(item as u64)));
    let id = mount(&mut surface);
    assert_eq!(zone(&surface, id).label(), "Drop Here");

    let session_id = surface.begin_drag(&sources[1]).unwrap();
    let session = surface.active_session().unwrap();
    assert_eq!(session.id(), session_id);
    assert_eq!(session.offered_types(), &[DRAG_EXAMPLE_TYPE]);
    assert_eq!(session.preview().unwrap().element, ElementId(2));
    assert_eq!(zone(&surface, id).drag_state(), DragState::DraggingRecognized);
    assert_eq!(zone(&surface, id).class_name(), "border-yellow-500");

    assert!(surface.drag_over(id).unwrap());
    assert!(zone(&surface, id).is_over());
    assert_eq!(zone(&surface, id).visual(), Visual::Accepting);
    assert_eq!(zone(&surface, id).class_name(), "border-green-500");

    let release = surface.release(id).unwrap();
    assert_eq!(
        release,
        Release::Dropped {
            outcome: ReleaseOutcome::Accepted(2),
            default_prevented: true,
        }
    );

    let zone = zone(&surface, id);
    assert_eq!(zone.drop_record(), Some(2));
    assert_eq!(zone.drag_state(), DragState::Idle);
    assert!(!zone.is_over());
    assert_eq!(zone.visual(), Visual::Neutral);
    assert_eq!(zone.class_name(), "");
    assert_eq!(zone.label(), "Drop Here: 2");
}

#[test]
fn unmounted_zone_stops_listening() {
    let mut surface = Surface::new();
    let gone = mount(&mut surface);
    let kept = mount(&mut surface);
    assert_eq!(surface.events().listener_count(), 4);

    drop(surface.unmount_zone(gone).unwrap());
    assert_eq!(surface.events().listener_count(), 2);

    surface.begin_drag(&DragSource::new(1)).unwrap();
    assert_eq!(zone(&surface, kept).drag_state(), DragState::DraggingRecognized);
    surface.cancel().unwrap();
    assert_eq!(surface.unmount_zone(kept).unwrap().unmount(), None);
    assert_eq!(surface.events().listener_count(), 0);
}

#[test]
fn zone_mounted_mid_session_waits_for_next_start() {
    let mut surface = Surface::new();
    surface.begin_drag(&DragSource::new(1)).unwrap();

    let late = mount(&mut surface);
    assert_eq!(zone(&surface, late).drag_state(), DragState::Idle);

    // It can still accept the drop; only its visual lags.
    assert!(surface.drag_over(late).unwrap());
    assert_eq!(zone(&surface, late).visual(), Visual::Neutral);
    surface.release(late).unwrap();
    assert_eq!(zone(&surface, late).drop_record(), Some(1));
}
