#![forbid(unsafe_code)]

//! JSONL drag scripts.
//!
//! A script is a recorded (or hand-written) sequence of drag input against a
//! strip of known widths. Each line is a JSON object tagged by `event`. The
//! first line is always a `script_header`.
//!
//! ```json
//! {"event":"script_header","schema_version":"drag-script-v1","name":"double_drop","item_widths":[100.0,100.0,100.0,100.0],"strip_origin":0.0}
//! {"event":"drag_start","at_ms":0,"index":0,"pointer":{"x":50.0,"y":18.0}}
//! {"event":"drag_move","at_ms":16,"pointer":{"x":280.0,"y":18.0}}
//! {"event":"drop","at_ms":32}
//! {"event":"drop","at_ms":40}
//! {"event":"tick","at_ms":100}
//! ```
//!
//! Timestamps are milliseconds since script start and never decrease.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tabshift_core::{DragEvent, Point};

/// Current schema version for drag script files.
pub const SCHEMA_VERSION: &str = "drag-script-v1";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A single line of a drag script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptRecord {
    /// Header record (first line).
    #[serde(rename = "script_header")]
    Header {
        schema_version: String,
        name: String,
        item_widths: Vec<f32>,
        #[serde(default)]
        strip_origin: f32,
    },
    DragStart {
        at_ms: u64,
        index: usize,
        pointer: Point,
    },
    DragMove {
        at_ms: u64,
        pointer: Point,
    },
    DragOver {
        at_ms: u64,
        pointer: Point,
    },
    Drop {
        at_ms: u64,
    },
    DragEnd {
        at_ms: u64,
    },
    /// Close (remove) the item at `index`, as a middle click would.
    CloseItem {
        at_ms: u64,
        index: usize,
    },
    /// Advance the clock without input.
    Tick {
        at_ms: u64,
    },
}

impl ScriptRecord {
    /// Timestamp, if this record is a step.
    #[must_use]
    pub fn at_ms(&self) -> Option<u64> {
        match self {
            Self::Header { .. } => None,
            Self::DragStart { at_ms, .. }
            | Self::DragMove { at_ms, .. }
            | Self::DragOver { at_ms, .. }
            | Self::Drop { at_ms }
            | Self::DragEnd { at_ms }
            | Self::CloseItem { at_ms, .. }
            | Self::Tick { at_ms } => Some(*at_ms),
        }
    }

    /// The drag event this record feeds to the engine directly.
    ///
    /// `None` for the header, ticks and item closes (the replayer turns a
    /// close into a store mutation followed by `ItemsChanged`).
    #[must_use]
    pub fn to_event(&self) -> Option<DragEvent> {
        match *self {
            Self::DragStart { index, pointer, .. } => Some(DragEvent::Start { index, pointer }),
            Self::DragMove { pointer, .. } => Some(DragEvent::Move { pointer }),
            Self::DragOver { pointer, .. } => Some(DragEvent::Over { pointer }),
            Self::Drop { .. } => Some(DragEvent::Drop),
            Self::DragEnd { .. } => Some(DragEvent::End),
            Self::Header { .. } | Self::CloseItem { .. } | Self::Tick { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

/// A parsed drag script: strip description plus ordered steps.
#[derive(Debug, Clone, PartialEq)]
pub struct DragScript {
    pub name: String,
    pub item_widths: Vec<f32>,
    /// Left edge of the strip in pointer coordinates.
    pub strip_origin: f32,
    steps: Vec<ScriptRecord>,
}

impl DragScript {
    /// Empty script over a strip with the given widths.
    pub fn new(name: impl Into<String>, item_widths: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            item_widths,
            strip_origin: 0.0,
            steps: Vec::new(),
        }
    }

    /// Set the strip origin.
    #[must_use]
    pub fn with_origin(mut self, strip_origin: f32) -> Self {
        self.strip_origin = strip_origin;
        self
    }

    /// Steps in order.
    #[must_use]
    pub fn steps(&self) -> &[ScriptRecord] {
        &self.steps
    }

    /// Number of items the strip starts with.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_widths.len()
    }

    /// Timestamp of the last step.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.steps.iter().filter_map(ScriptRecord::at_ms).max().unwrap_or(0)
    }

    /// Append a step. Headers are rejected and timestamps must not go
    /// backwards.
    pub fn push(&mut self, step: ScriptRecord) -> Result<(), ScriptError> {
        let Some(at_ms) = step.at_ms() else {
            return Err(ScriptError::Schema("header record inside script body".into()));
        };
        let last = self.duration_ms();
        if at_ms < last {
            return Err(ScriptError::Schema(format!(
                "timestamp {at_ms}ms precedes previous step at {last}ms"
            )));
        }
        self.steps.push(step);
        Ok(())
    }

    /// Append a step, clamping its timestamp forward so steps stay ordered.
    /// Headers are ignored.
    pub fn append(&mut self, step: ScriptRecord) {
        if step.at_ms().is_none() {
            return;
        }
        let floor = self.duration_ms();
        self.steps.push(clamp_at(step, floor));
    }

    // Builder helpers. Out-of-order timestamps are clamped forward.

    fn then(mut self, step: ScriptRecord) -> Self {
        self.append(step);
        self
    }

    #[must_use]
    pub fn drag_start(self, at_ms: u64, index: usize, x: f32) -> Self {
        self.then(ScriptRecord::DragStart {
            at_ms,
            index,
            pointer: Point::new(x, DEFAULT_Y),
        })
    }

    #[must_use]
    pub fn drag_move(self, at_ms: u64, x: f32) -> Self {
        self.then(ScriptRecord::DragMove {
            at_ms,
            pointer: Point::new(x, DEFAULT_Y),
        })
    }

    #[must_use]
    pub fn drag_over(self, at_ms: u64, x: f32) -> Self {
        self.then(ScriptRecord::DragOver {
            at_ms,
            pointer: Point::new(x, DEFAULT_Y),
        })
    }

    /// A move reporting the `(0, 0)` placeholder position.
    #[must_use]
    pub fn sentinel_move(self, at_ms: u64) -> Self {
        self.then(ScriptRecord::DragMove {
            at_ms,
            pointer: Point::new(0.0, 0.0),
        })
    }

    #[must_use]
    pub fn drop_at(self, at_ms: u64) -> Self {
        self.then(ScriptRecord::Drop { at_ms })
    }

    #[must_use]
    pub fn drag_end(self, at_ms: u64) -> Self {
        self.then(ScriptRecord::DragEnd { at_ms })
    }

    #[must_use]
    pub fn close_item(self, at_ms: u64, index: usize) -> Self {
        self.then(ScriptRecord::CloseItem { at_ms, index })
    }

    #[must_use]
    pub fn tick(self, at_ms: u64) -> Self {
        self.then(ScriptRecord::Tick { at_ms })
    }

    // -----------------------------------------------------------------------
    // JSONL
    // -----------------------------------------------------------------------

    /// Header record for this script.
    #[must_use]
    pub fn header(&self) -> ScriptRecord {
        ScriptRecord::Header {
            schema_version: SCHEMA_VERSION.to_string(),
            name: self.name.clone(),
            item_widths: self.item_widths.clone(),
            strip_origin: self.strip_origin,
        }
    }

    /// Encode as JSONL, header first, one record per line.
    pub fn to_jsonl(&self) -> Result<String, ScriptError> {
        let mut out = String::new();
        for (index, record) in std::iter::once(&self.header())
            .chain(self.steps.iter())
            .enumerate()
        {
            let line = serde_json::to_string(record).map_err(|source| ScriptError::Json {
                line: index + 1,
                source,
            })?;
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }

    /// Parse JSONL. Blank lines are skipped.
    pub fn from_jsonl(text: &str) -> Result<Self, ScriptError> {
        let mut script: Option<Self> = None;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let record: ScriptRecord = serde_json::from_str(line).map_err(|source| {
                ScriptError::Json {
                    line: index + 1,
                    source,
                }
            })?;

            match script.as_mut() {
                Some(script) => script.push(record).map_err(|err| match err {
                    ScriptError::Schema(msg) => {
                        ScriptError::Schema(format!("line {}: {msg}", index + 1))
                    }
                    other => other,
                })?,
                None => script = Some(Self::from_header(record, index + 1)?),
            }
        }

        script.ok_or_else(|| ScriptError::Schema("empty script".into()))
    }

    fn from_header(record: ScriptRecord, line: usize) -> Result<Self, ScriptError> {
        let ScriptRecord::Header {
            schema_version,
            name,
            item_widths,
            strip_origin,
        } = record
        else {
            return Err(ScriptError::Schema(format!(
                "line {line}: first record must be script_header"
            )));
        };
        if schema_version != SCHEMA_VERSION {
            return Err(ScriptError::Schema(format!(
                "unsupported schema version {schema_version:?}, expected {SCHEMA_VERSION:?}"
            )));
        }
        Ok(Self::new(name, item_widths).with_origin(strip_origin))
    }

    /// Read a JSONL script from disk.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(ScriptError::Io)?;
        Self::from_jsonl(&text)
    }

    /// Write this script to disk as JSONL.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), ScriptError> {
        let text = self.to_jsonl()?;
        std::fs::write(path.as_ref(), text).map_err(ScriptError::Io)
    }
}

/// Vertical pointer coordinate used by the builder helpers.
pub(crate) const DEFAULT_Y: f32 = 18.0;

fn clamp_at(mut step: ScriptRecord, floor: u64) -> ScriptRecord {
    match &mut step {
        ScriptRecord::Header { .. } => {}
        ScriptRecord::DragStart { at_ms, .. }
        | ScriptRecord::DragMove { at_ms, .. }
        | ScriptRecord::DragOver { at_ms, .. }
        | ScriptRecord::Drop { at_ms }
        | ScriptRecord::DragEnd { at_ms }
        | ScriptRecord::CloseItem { at_ms, .. }
        | ScriptRecord::Tick { at_ms } => *at_ms = (*at_ms).max(floor),
    }
    step
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors from reading, parsing or writing a drag script.
#[derive(Debug)]
pub enum ScriptError {
    Io(std::io::Error),
    /// A line failed to encode or decode. Lines are 1-based.
    Json {
        line: usize,
        source: serde_json::Error,
    },
    /// Well-formed JSON that breaks the script rules.
    Schema(String),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json { line, source } => write!(f, "JSON error on line {line}: {source}"),
            Self::Schema(msg) => write!(f, "schema error: {msg}"),
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json { source, .. } => Some(source),
            Self::Schema(_) => None,
        }
    }
}
