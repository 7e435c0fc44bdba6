//! End-to-end drag scenarios against the public engine API.
//!
//! Unless noted, every scenario uses a strip of four 100-wide tabs with the
//! default 4-unit gap: midpoints at 50, 154, 258 and 362, trailing edge at 412.

use tabshift_core::{DragEvent, ItemId, Point, Rect};
use tabshift_reorder::{
    CancelReason, OrderStore, ReorderEffect, ReorderEngine, ReorderNoopReason, ReorderState,
};
use web_time::{Duration, Instant};

/// Order store that counts every move request.
#[derive(Debug)]
struct CountingStore {
    ids: Vec<ItemId>,
    moves: Vec<(usize, usize)>,
}

impl CountingStore {
    fn abcd() -> Self {
        Self {
            ids: (1..=4).map(ItemId).collect(),
            moves: Vec::new(),
        }
    }
}

impl OrderStore for CountingStore {
    fn len(&self) -> usize {
        self.ids.len()
    }

    fn id_at(&self, index: usize) -> Option<ItemId> {
        self.ids.get(index).copied()
    }

    fn move_item(&mut self, from: usize, to: usize) {
        self.moves.push((from, to));
        self.ids.move_item(from, to);
    }
}

fn setup() -> (ReorderEngine, CountingStore) {
    let mut engine = ReorderEngine::default();
    engine.geometry_mut().record_all([100.0; 4]);
    (engine, CountingStore::abcd())
}

fn at(x: f32) -> Point {
    Point::new(x, 18.0)
}

#[test]
fn drag_first_tab_past_third_midpoint() {
    let (mut engine, mut store) = setup();
    let now = Instant::now();
    engine.handle(
        &DragEvent::Start {
            index: 0,
            pointer: at(50.0),
        },
        now,
        &mut store,
    );
    // Centroid 50 + 230 = 280: past 258, short of 362.
    engine.handle(&DragEvent::Move { pointer: at(280.0) }, now, &mut store);

    assert_eq!(engine.session().map(|s| s.target_index), Some(2));
    assert_eq!(engine.offset_for(1), -104.0);
    assert_eq!(engine.offset_for(2), -104.0);
    assert_eq!(engine.offset_for(3), 0.0);
    assert_eq!(engine.offset_for(0), 230.0);
}

#[test]
fn release_on_origin_never_moves() {
    let (mut engine, mut store) = setup();
    let now = Instant::now();
    engine.handle(
        &DragEvent::Start {
            index: 1,
            pointer: at(154.0),
        },
        now,
        &mut store,
    );
    engine.handle(&DragEvent::Move { pointer: at(190.0) }, now, &mut store);
    let t = engine.handle(&DragEvent::Drop, now, &mut store);

    assert_eq!(
        t.effect,
        ReorderEffect::Canceled {
            id: Some(ItemId(2)),
            reason: CancelReason::DroppedOnOrigin,
        }
    );
    assert!(engine.session().is_none());
    assert!(store.moves.is_empty());
}

#[test]
fn drag_last_tab_left_past_second_midpoint() {
    let (mut engine, mut store) = setup();
    let now = Instant::now();
    engine.handle(
        &DragEvent::Start {
            index: 3,
            pointer: at(362.0),
        },
        now,
        &mut store,
    );
    // Centroid 362 - 222 = 140: left of 154 and 258, right of 50.
    engine.handle(&DragEvent::Over { pointer: at(140.0) }, now, &mut store);

    assert_eq!(engine.session().map(|s| s.target_index), Some(1));
    let offsets: Vec<f32> = (0..4).map(|i| engine.offset_for(i)).collect();
    assert_eq!(offsets, vec![0.0, 104.0, 104.0, -222.0]);
}

#[test]
fn sentinel_move_leaves_preview_untouched() {
    let (mut engine, mut store) = setup();
    let now = Instant::now();
    engine.handle(
        &DragEvent::Start {
            index: 0,
            pointer: at(50.0),
        },
        now,
        &mut store,
    );
    engine.handle(&DragEvent::Move { pointer: at(170.0) }, now, &mut store);
    let before_pointer = engine.session().map(|s| s.current);
    let before_frame = engine.preview(&store);

    let t = engine.handle(
        &DragEvent::Move {
            pointer: Point::new(0.0, 0.0),
        },
        now,
        &mut store,
    );

    assert_eq!(
        t.effect,
        ReorderEffect::Noop {
            reason: ReorderNoopReason::NullPointerSentinel
        }
    );
    assert_eq!(engine.session().map(|s| s.current), before_pointer);
    assert_eq!(engine.preview(&store), before_frame);
}

#[test]
fn second_drop_inside_guard_window_is_ignored() {
    let (mut engine, mut store) = setup();
    let t0 = Instant::now();
    engine.handle(
        &DragEvent::Start {
            index: 0,
            pointer: at(50.0),
        },
        t0,
        &mut store,
    );
    engine.handle(&DragEvent::Move { pointer: at(280.0) }, t0, &mut store);
    engine.handle(&DragEvent::Drop, t0, &mut store);
    assert_eq!(store.moves, vec![(0, 2)]);
    assert_eq!(store.ids, vec![ItemId(2), ItemId(3), ItemId(1), ItemId(4)]);

    let t1 = t0 + Duration::from_millis(10);
    engine.tick(t1);
    let t = engine.handle(&DragEvent::Drop, t1, &mut store);
    assert_eq!(
        t.effect,
        ReorderEffect::Noop {
            reason: ReorderNoopReason::DropInFlight
        }
    );
    assert_eq!(store.moves.len(), 1);
}

#[test]
fn settle_window_returns_to_idle() {
    let (mut engine, mut store) = setup();
    let t0 = Instant::now();
    engine.handle(
        &DragEvent::Start {
            index: 2,
            pointer: at(258.0),
        },
        t0,
        &mut store,
    );
    engine.handle(&DragEvent::Move { pointer: at(40.0) }, t0, &mut store);
    engine.handle(&DragEvent::Drop, t0, &mut store);

    let frame = engine.preview(&store);
    assert!(frame.iter().all(|p| p.offset == 0.0 && !p.animate));
    assert_eq!(engine.next_deadline(), Some(t0 + Duration::from_millis(50)));

    let fired = engine.tick(t0 + Duration::from_millis(50));
    assert_eq!(fired.len(), 2);
    assert_eq!(engine.state(), ReorderState::Idle);
    assert!(engine.preview(&store).iter().all(|p| p.animate));
}

/// Tabs 100, 100, 200 and 60 wide: tab 2 spans 208..408 (mid 308), tab 3
/// spans 412..472 (mid 442). Grabbing tab 2 near its right edge and dragging
/// 100 units right leaves the centroid at 408, short of 442, so only the
/// trailing-edge rule can pick slot 3.
fn drag_into_trailing_space(container_x: f32) -> (ReorderEffect, CountingStore) {
    let (mut engine, mut store) = setup();
    engine.geometry_mut().record_all([100.0, 100.0, 200.0, 60.0]);
    engine
        .geometry_mut()
        .set_container(Rect::new(container_x, 0.0, 640.0, 36.0));
    let now = Instant::now();
    engine.handle(
        &DragEvent::Start {
            index: 2,
            pointer: at(420.0),
        },
        now,
        &mut store,
    );
    engine.handle(&DragEvent::Move { pointer: at(520.0) }, now, &mut store);
    let effect = engine.handle(&DragEvent::Drop, now, &mut store).effect;
    (effect, store)
}

#[test]
fn trailing_space_drop_moves_to_end() {
    // Pointer 520 is 500 in the strip frame, past the 472 trailing edge.
    let (effect, store) = drag_into_trailing_space(20.0);
    assert_eq!(
        effect,
        ReorderEffect::Committed {
            id: ItemId(3),
            from: 2,
            to: 3,
        }
    );
    assert_eq!(store.moves, vec![(2, 3)]);
}

#[test]
fn pointer_short_of_trailing_edge_stays_on_origin() {
    // Same drag, but the strip starts at 60: pointer 460 < 472.
    let (effect, store) = drag_into_trailing_space(60.0);
    assert_eq!(
        effect,
        ReorderEffect::Canceled {
            id: Some(ItemId(3)),
            reason: CancelReason::DroppedOnOrigin,
        }
    );
    assert!(store.moves.is_empty());
}
