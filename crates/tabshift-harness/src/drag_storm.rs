#![forbid(unsafe_code)]

//! Drag storm generator for fault-injection testing.
//!
//! Produces deterministic, well-formed [`DragScript`]s that hammer the
//! reorder engine with the input real pointers produce on bad days:
//! redundant drops, `(0, 0)` placeholder moves, tabs closing mid-drag, and
//! starts landing inside a settle window.
//!
//! # Storm Patterns
//!
//! | Pattern | Description |
//! |---------|-------------|
//! | [`StormPattern::ShortDrags`] | Complete start/move/drop cycles with pauses |
//! | [`StormPattern::DropSpam`] | Every drop followed by a burst of repeats |
//! | [`StormPattern::Jitter`] | Long drags with sentinel moves mixed in |
//! | [`StormPattern::CloseDuringDrag`] | Tabs closed while a drag is open |
//! | [`StormPattern::Mixed`] | All of the above, interleaved |

use tabshift_core::Point;

use crate::script::{DEFAULT_Y, DragScript, ScriptRecord};

// ============================================================================
// Configuration
// ============================================================================

/// Shape of a generated storm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StormPattern {
    ShortDrags,
    DropSpam,
    Jitter,
    CloseDuringDrag,
    Mixed,
}

impl StormPattern {
    /// All patterns, for sweeping tests.
    pub const ALL: [Self; 5] = [
        Self::ShortDrags,
        Self::DropSpam,
        Self::Jitter,
        Self::CloseDuringDrag,
        Self::Mixed,
    ];

    /// Stable snake_case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ShortDrags => "short_drags",
            Self::DropSpam => "drop_spam",
            Self::Jitter => "jitter",
            Self::CloseDuringDrag => "close_during_drag",
            Self::Mixed => "mixed",
        }
    }
}

/// Configuration for a drag storm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragStormConfig {
    pub pattern: StormPattern,
    pub seed: u64,
    /// Tabs in the strip at the start.
    pub items: usize,
    /// Drag cycles to generate.
    pub drags: usize,
}

impl DragStormConfig {
    #[must_use]
    pub fn new(pattern: StormPattern, seed: u64) -> Self {
        Self {
            pattern,
            seed,
            items: 6,
            drags: 24,
        }
    }

    #[must_use]
    pub fn with_items(mut self, items: usize) -> Self {
        self.items = items;
        self
    }

    #[must_use]
    pub fn with_drags(mut self, drags: usize) -> Self {
        self.drags = drags;
        self
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Simple deterministic PRNG (xorshift64) for reproducible storms.
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    fn below(&mut self, max: u64) -> u64 {
        if max == 0 {
            return 0;
        }
        self.next() % max
    }

    fn chance(&mut self, percent: u64) -> bool {
        self.below(100) < percent
    }

    fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        let unit = (self.next() >> 40) as f32 / (1u64 << 24) as f32;
        lo + (hi - lo) * unit
    }
}

/// Generates storms into a script, tracking the strip length so closes and
/// starts stay plausible.
struct StormBuilder {
    rng: Rng,
    script: DragScript,
    at_ms: u64,
    len: usize,
    span: f32,
}

impl StormBuilder {
    fn new(config: &DragStormConfig) -> Self {
        let mut rng = Rng::new(config.seed);
        let widths: Vec<f32> = (0..config.items)
            .map(|_| rng.range_f32(60.0, 200.0).round())
            .collect();
        let span = widths.iter().map(|w| w + 4.0).sum::<f32>();
        let name = format!("{}_{}", config.pattern.name(), config.seed);
        Self {
            rng,
            script: DragScript::new(name, widths),
            at_ms: 0,
            len: config.items,
            span,
        }
    }

    fn advance(&mut self, max_ms: u64) -> u64 {
        self.at_ms += 1 + self.rng.below(max_ms);
        self.at_ms
    }

    fn pointer_x(&mut self) -> f32 {
        self.rng.range_f32(-40.0, self.span + 80.0)
    }

    fn start(&mut self) {
        let at_ms = self.advance(30);
        // Occasionally aim past the end of the strip.
        let index = self.rng.below(self.len as u64 + 1) as usize;
        let pointer = Point::new(self.pointer_x(), DEFAULT_Y);
        self.script.append(ScriptRecord::DragStart {
            at_ms,
            index,
            pointer,
        });
    }

    fn moves(&mut self, count: usize, sentinel_percent: u64) {
        for _ in 0..count {
            let at_ms = self.advance(16);
            let step = if self.rng.chance(sentinel_percent) {
                ScriptRecord::DragMove {
                    at_ms,
                    pointer: Point::new(0.0, 0.0),
                }
            } else {
                let pointer = Point::new(self.pointer_x(), DEFAULT_Y);
                if self.rng.chance(20) {
                    ScriptRecord::DragOver { at_ms, pointer }
                } else {
                    ScriptRecord::DragMove { at_ms, pointer }
                }
            };
            self.script.append(step);
        }
    }

    fn release(&mut self, repeats: usize) {
        let at_ms = self.advance(16);
        if self.rng.chance(15) {
            self.script.append(ScriptRecord::DragEnd { at_ms });
        } else {
            self.script.append(ScriptRecord::Drop { at_ms });
        }
        for _ in 0..repeats {
            let at_ms = self.advance(12);
            self.script.append(ScriptRecord::Drop { at_ms });
        }
    }

    fn close(&mut self) {
        if self.len <= 1 {
            return;
        }
        let at_ms = self.advance(20);
        let index = self.rng.below(self.len as u64) as usize;
        self.len -= 1;
        self.script.append(ScriptRecord::CloseItem { at_ms, index });
    }

    fn pause(&mut self, max_ms: u64) {
        let at_ms = self.advance(max_ms);
        self.script.append(ScriptRecord::Tick { at_ms });
    }

    fn cycle(&mut self, pattern: StormPattern) {
        match pattern {
            StormPattern::ShortDrags => {
                self.start();
                let n = 1 + self.rng.below(4) as usize;
                self.moves(n, 0);
                self.release(0);
                self.pause(80);
            }
            StormPattern::DropSpam => {
                self.start();
                let n = 1 + self.rng.below(3) as usize;
                self.moves(n, 0);
                let repeats = 1 + self.rng.below(5) as usize;
                self.release(repeats);
            }
            StormPattern::Jitter => {
                self.start();
                let n = 4 + self.rng.below(12) as usize;
                self.moves(n, 30);
                self.release(0);
            }
            StormPattern::CloseDuringDrag => {
                self.start();
                self.moves(2, 0);
                if self.rng.chance(50) {
                    self.close();
                }
                self.moves(1, 0);
                self.release(1);
                self.pause(60);
            }
            StormPattern::Mixed => {
                let pick = StormPattern::ALL[self.rng.below(4) as usize];
                self.cycle(pick);
            }
        }
    }
}

/// Generate a storm script.
#[must_use]
pub fn generate(config: &DragStormConfig) -> DragScript {
    let mut builder = StormBuilder::new(config);
    for _ in 0..config.drags {
        builder.cycle(config.pattern);
    }
    // Let every settle timer expire.
    builder.at_ms += 1_000;
    let at_ms = builder.at_ms;
    builder.script.append(ScriptRecord::Tick { at_ms });
    builder.script
}
