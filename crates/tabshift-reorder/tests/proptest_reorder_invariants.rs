//! Property tests for the reorder engine.
//!
//! Random event streams run against strips of random widths; after every
//! step the session indices, the preview shift span, and every store call are
//! checked.

use proptest::prelude::*;
use tabshift_core::{DragEvent, ItemId, Point};
use tabshift_reorder::{
    DragSession, OrderStore, PreviewView, ReorderEffect, ReorderEngine, resolve_target,
    sample_boundaries,
};
use web_time::{Duration, Instant};

#[derive(Debug, Default)]
struct AuditStore {
    ids: Vec<ItemId>,
    moves: Vec<(usize, usize)>,
}

impl OrderStore for AuditStore {
    fn len(&self) -> usize {
        self.ids.len()
    }

    fn id_at(&self, index: usize) -> Option<ItemId> {
        self.ids.get(index).copied()
    }

    fn move_item(&mut self, from: usize, to: usize) {
        assert_ne!(from, to, "move with equal indices");
        assert!(from < self.ids.len() && to < self.ids.len(), "move out of range");
        self.moves.push((from, to));
        self.ids.move_item(from, to);
    }
}

#[derive(Debug, Clone)]
enum Step {
    Start(usize, f32),
    Move(f32),
    Sentinel,
    Drop,
    End,
    Wait(u64),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        2 => (0usize..10, -50.0f32..900.0).prop_map(|(i, x)| Step::Start(i, x)),
        6 => (-200.0f32..1200.0).prop_map(Step::Move),
        1 => Just(Step::Sentinel),
        2 => Just(Step::Drop),
        1 => Just(Step::End),
        2 => (0u64..120).prop_map(Step::Wait),
    ]
}

fn strip_widths() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(20.0f32..180.0, 1..8)
}

fn to_event(step: &Step) -> Option<DragEvent> {
    Some(match *step {
        Step::Start(index, x) => DragEvent::Start {
            index,
            pointer: Point::new(x, 12.0),
        },
        Step::Move(x) => DragEvent::Move {
            pointer: Point::new(x, 12.0),
        },
        Step::Sentinel => DragEvent::Move {
            pointer: Point::new(0.0, 0.0),
        },
        Step::Drop => DragEvent::Drop,
        Step::End => DragEvent::End,
        Step::Wait(_) => return None,
    })
}

fn expected_shifted(d: usize, t: usize, n: usize) -> Vec<usize> {
    (0..n)
        .filter(|&i| i != d && ((d < t && d < i && i <= t) || (d > t && t <= i && i < d)))
        .collect()
}

proptest! {
    #[test]
    fn indices_stay_valid_and_moves_stay_legal(
        widths in strip_widths(),
        steps in prop::collection::vec(step(), 1..60),
    ) {
        let n = widths.len();
        let mut engine = ReorderEngine::default();
        engine.geometry_mut().record_all(widths);
        let mut store = AuditStore {
            ids: (0..n as u64).map(ItemId).collect(),
            ..AuditStore::default()
        };
        let mut now = Instant::now();

        for step in &steps {
            if let Step::Wait(ms) = step {
                now += Duration::from_millis(*ms);
                engine.tick(now);
                continue;
            }
            let Some(event) = to_event(step) else { continue };
            let before_moves = store.moves.len();
            let was_guarded = engine.is_drop_in_flight();
            let was_on_origin = engine.session().is_some_and(|s| !s.is_displaced());

            let t = engine.handle(&event, now, &mut store);

            if let Some(session) = engine.session() {
                prop_assert!(session.dragged_index < n);
                prop_assert!(session.target_index < n);
                prop_assert_eq!(session.item_count, n);
            }
            if matches!(event, DragEvent::Drop) && (was_guarded || was_on_origin) {
                prop_assert_eq!(store.moves.len(), before_moves);
            }
            let committed = matches!(t.effect, ReorderEffect::Committed { .. });
            prop_assert_eq!(store.moves.len(), before_moves + usize::from(committed));
        }
    }

    #[test]
    fn shift_span_is_contiguous_single_slot(
        n in 2usize..10,
        d_seed in any::<prop::sample::Index>(),
        t_seed in any::<prop::sample::Index>(),
        width in 10.0f32..200.0,
        delta in -500.0f32..500.0,
    ) {
        let d = d_seed.index(n);
        let t = t_seed.index(n);
        let mut session = DragSession::begin(ItemId(0), d, Point::new(300.0, 5.0), n);
        session.current = Point::new(300.0 + delta, 5.0);
        session.target_index = t;
        let view = PreviewView {
            session: Some(&session),
            settling: false,
            dragged_width: width,
            gap: 4.0,
            transition_ms: 200,
        };

        let shifted: Vec<usize> = (0..n).filter(|&i| i != d && view.offset(i) != 0.0).collect();
        prop_assert_eq!(&shifted, &expected_shifted(d, t, n));
        for &i in &shifted {
            prop_assert_eq!(view.offset(i).abs(), width + 4.0);
        }
    }

    #[test]
    fn resolved_target_is_in_range_and_repeatable(
        widths in strip_widths(),
        d_seed in any::<prop::sample::Index>(),
        delta in -1500.0f32..1500.0,
        origin in -100.0f32..100.0,
    ) {
        let n = widths.len();
        let d = d_seed.index(n);
        let boundaries = sample_boundaries(widths.iter().copied().map(Some), 4.0);
        let mut session = DragSession::begin(ItemId(1), d, Point::new(boundaries[d].mid, 0.0), n);
        session.current = Point::new(boundaries[d].mid + delta, 0.0);

        let target = resolve_target(&session, &boundaries, origin);
        prop_assert!(target.is_some_and(|t| t < n));
        prop_assert_eq!(resolve_target(&session, &boundaries, origin), target);
        if delta == 0.0 {
            prop_assert_eq!(target, Some(d));
        }
    }

    #[test]
    fn move_item_is_shift_not_swap(
        n in 1usize..12,
        from_seed in any::<prop::sample::Index>(),
        to_seed in any::<prop::sample::Index>(),
    ) {
        let from = from_seed.index(n);
        let to = to_seed.index(n);
        let original: Vec<ItemId> = (0..n as u64).map(ItemId).collect();
        let mut ids = original.clone();
        OrderStore::move_item(&mut ids, from, to);

        prop_assert_eq!(ids[to], original[from]);
        let mut rest_before = original.clone();
        rest_before.remove(from);
        let mut rest_after = ids.clone();
        rest_after.remove(to);
        prop_assert_eq!(rest_after, rest_before);
    }
}

#[test]
fn move_item_shifts_the_span_between() {
    let mut ids: Vec<ItemId> = (1..=4).map(ItemId).collect();
    OrderStore::move_item(&mut ids, 0, 2);
    assert_eq!(ids, vec![ItemId(2), ItemId(3), ItemId(1), ItemId(4)]);
}
