#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tabshift_core::{DragEvent, ItemId, Point};
use tabshift_reorder::{OrderStore, ReorderEngine};
use web_time::{Duration, Instant};

#[derive(Debug, Arbitrary)]
enum Op {
    Start { index: u8, x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Over { x: f32, y: f32 },
    Drop,
    End,
    Close { index: u8 },
    Measure { index: u8, width: f32 },
    Wait { ms: u8 },
}

#[derive(Debug, Arbitrary)]
struct Input {
    widths: Vec<f32>,
    origin: f32,
    ops: Vec<Op>,
}

struct Store {
    ids: Vec<ItemId>,
    moves: usize,
}

impl OrderStore for Store {
    fn len(&self) -> usize {
        self.ids.len()
    }

    fn id_at(&self, index: usize) -> Option<ItemId> {
        self.ids.get(index).copied()
    }

    fn move_item(&mut self, from: usize, to: usize) {
        assert!(from != to && from < self.ids.len() && to < self.ids.len());
        self.moves += 1;
        self.ids.move_item(from, to);
    }
}

fuzz_target!(|input: Input| {
    let widths: Vec<f32> = input.widths.into_iter().take(64).collect();
    let mut store = Store {
        ids: (0..widths.len() as u64).map(ItemId).collect(),
        moves: 0,
    };
    let mut engine = ReorderEngine::default();
    engine.geometry_mut().record_all(widths);
    engine.geometry_mut().set_origin(input.origin);

    let mut now = Instant::now();
    for op in input.ops.into_iter().take(1024) {
        engine.tick(now);
        let event = match op {
            Op::Start { index, x, y } => DragEvent::Start {
                index: usize::from(index),
                pointer: Point::new(x, y),
            },
            Op::Move { x, y } => DragEvent::Move {
                pointer: Point::new(x, y),
            },
            Op::Over { x, y } => DragEvent::Over {
                pointer: Point::new(x, y),
            },
            Op::Drop => DragEvent::Drop,
            Op::End => DragEvent::End,
            Op::Close { index } => {
                let index = usize::from(index);
                if index < store.ids.len() {
                    store.ids.remove(index);
                }
                DragEvent::ItemsChanged {
                    len: store.ids.len(),
                }
            }
            Op::Measure { index, width } => {
                engine.geometry_mut().record(usize::from(index), width);
                continue;
            }
            Op::Wait { ms } => {
                now += Duration::from_millis(u64::from(ms));
                continue;
            }
        };

        let before = store.moves;
        engine.handle(&event, now, &mut store);
        assert!(store.moves <= before + 1);

        if let Some(session) = engine.session() {
            assert!(session.dragged_index < store.ids.len());
            assert!(session.target_index < store.ids.len());
        }
        assert_eq!(engine.preview(&store).len(), store.ids.len());
    }
});
