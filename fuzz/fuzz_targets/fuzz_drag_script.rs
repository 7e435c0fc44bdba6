#![no_main]

use libfuzzer_sys::fuzz_target;
use tabshift_harness::{DragScript, replay};
use tabshift_reorder::ReorderConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Parsing may fail; it must not panic.
    let Ok(script) = DragScript::from_jsonl(text) else {
        return;
    };
    // Keep replays bounded.
    if script.item_count() > 256 || script.steps().len() > 4096 {
        return;
    }

    let report = replay(&script, ReorderConfig::default()).expect("default config is valid");

    for call in &report.move_calls {
        assert!(call.is_legal(), "illegal move request: {call:?}");
    }
    assert_eq!(report.commits(), report.move_calls.len());
    assert!(report.final_order.len() <= script.item_count());
});
