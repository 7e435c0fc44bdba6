#![forbid(unsafe_code)]

//! Policy-as-data configuration for the reorder engine.
//!
//! Every tunable lives in [`ReorderConfig`]. The defaults are the stock
//! constants (4-unit gap, 50ms settle windows, 200ms shift transition), so
//! `ReorderConfig::default()` reproduces the stock behavior exactly.
//!
//! # Loading
//!
//! ```toml
//! # tabshift.toml
//! gap = 4.0
//! settle_window_ms = 50
//! just_dropped_window_ms = 50
//! transition_ms = 200
//! ```
//!
//! ```rust,ignore
//! let config = ReorderConfig::from_toml_file("tabshift.toml")?;
//! let config = ReorderConfig::from_json_str(json)?;
//! ```

#[cfg(feature = "config")]
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Inter-item gap in layout units.
pub const DEFAULT_GAP: f32 = 4.0;
/// Re-entrancy guard / settle window after a commit.
pub const DEFAULT_SETTLE_WINDOW_MS: u64 = 50;
/// How long the moved item stays marked as "just dropped".
pub const DEFAULT_JUST_DROPPED_WINDOW_MS: u64 = 50;
/// Duration of the shift transition hosts play for previewed items.
pub const DEFAULT_TRANSITION_MS: u64 = 200;

/// Tunables for [`ReorderEngine`](crate::ReorderEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderConfig {
    /// Fixed spacing between adjacent items along the layout axis.
    pub gap: f32,
    /// Window after a commit during which further drops are ignored and
    /// preview transitions are suppressed.
    pub settle_window_ms: u64,
    /// Window after a commit during which the moved item snaps without a
    /// transition.
    pub just_dropped_window_ms: u64,
    /// Transition length hosts should use when animating preview offsets.
    /// The engine only reports it; it never waits on it.
    pub transition_ms: u64,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            settle_window_ms: DEFAULT_SETTLE_WINDOW_MS,
            just_dropped_window_ms: DEFAULT_JUST_DROPPED_WINDOW_MS,
            transition_ms: DEFAULT_TRANSITION_MS,
        }
    }
}

impl ReorderConfig {
    /// Settle/guard window as a duration.
    #[must_use]
    pub const fn settle_window(&self) -> Duration {
        Duration::from_millis(self.settle_window_ms)
    }

    /// Just-dropped marker window as a duration.
    #[must_use]
    pub const fn just_dropped_window(&self) -> Duration {
        Duration::from_millis(self.just_dropped_window_ms)
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ReorderConfigError> {
        let config: Self = toml::from_str(s).map_err(ReorderConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ReorderConfigError> {
        Self::from_toml_str(&read_config(path.as_ref())?)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ReorderConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ReorderConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ReorderConfigError> {
        Self::from_json_str(&read_config(path.as_ref())?)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.gap.is_finite() || self.gap < 0.0 {
            errors.push(format!("gap must be finite and >= 0, got {}", self.gap));
        }
        if self.settle_window_ms == 0 {
            errors.push("settle_window_ms must be > 0".into());
        }
        if self.just_dropped_window_ms == 0 {
            errors.push("just_dropped_window_ms must be > 0".into());
        }

        errors
    }

    /// Consume the config, returning it only if [`validate`](Self::validate)
    /// reports nothing.
    pub fn validated(self) -> Result<Self, ReorderConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ReorderConfigError::Invalid(errors))
        }
    }
}

#[cfg(feature = "config")]
fn read_config(path: &Path) -> Result<String, ReorderConfigError> {
    std::fs::read_to_string(path).map_err(|source| ReorderConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Why a [`ReorderConfig`] could not be loaded or was refused.
#[derive(Debug)]
pub enum ReorderConfigError {
    /// The config file could not be read.
    #[cfg(feature = "config")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// One message per out-of-range tunable.
    Invalid(Vec<String>),
}

impl std::fmt::Display for ReorderConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "config")]
            Self::Read { path, source } => {
                write!(f, "cannot read reorder config {}: {source}", path.display())
            }
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "reorder config is not valid TOML: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "reorder config is not valid JSON: {e}"),
            Self::Invalid(problems) => {
                write!(f, "reorder config rejected: {}", problems.join("; "))
            }
        }
    }
}

impl std::error::Error for ReorderConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "config")]
            Self::Read { source, .. } => Some(source),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_constants() {
        let config = ReorderConfig::default();
        assert_eq!(config.gap, 4.0);
        assert_eq!(config.settle_window(), Duration::from_millis(50));
        assert_eq!(config.just_dropped_window(), Duration::from_millis(50));
        assert_eq!(config.transition_ms, 200);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn validate_reports_every_problem() {
        let config = ReorderConfig {
            gap: -1.0,
            settle_window_ms: 0,
            just_dropped_window_ms: 0,
            transition_ms: 0,
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 3, "{errors:?}");
        assert!(errors[0].contains("gap"));
    }

    #[test]
    fn nan_gap_is_rejected() {
        let config = ReorderConfig {
            gap: f32::NAN,
            ..ReorderConfig::default()
        };
        let err = config.validated().unwrap_err();
        assert!(matches!(err, ReorderConfigError::Invalid(ref e) if e.len() == 1));
        assert!(err.to_string().starts_with("reorder config rejected: gap"));
    }

    #[test]
    fn zero_transition_is_allowed() {
        let config = ReorderConfig {
            transition_ms: 0,
            ..ReorderConfig::default()
        };
        assert!(config.validated().is_ok());
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_partial_fills_defaults() {
        let config = ReorderConfig::from_toml_str("gap = 8.0\n").unwrap();
        assert_eq!(config.gap, 8.0);
        assert_eq!(config.settle_window_ms, DEFAULT_SETTLE_WINDOW_MS);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_invalid_values_fail_validation() {
        let err = ReorderConfig::from_json_str(r#"{"settle_window_ms": 0}"#).unwrap_err();
        assert!(matches!(err, ReorderConfigError::Invalid(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_syntax_error_surfaces_source() {
        use std::error::Error as _;
        let err = ReorderConfig::from_toml_str("gap = [").unwrap_err();
        assert!(matches!(err, ReorderConfigError::Toml(_)));
        assert!(err.source().is_some());
    }

    #[cfg(feature = "config")]
    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tabshift.toml");
        std::fs::write(&path, "settle_window_ms = 80\ntransition_ms = 150\n").unwrap();
        let config = ReorderConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.settle_window_ms, 80);
        assert_eq!(config.transition_ms, 150);

        let missing = ReorderConfig::from_json_file(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, ReorderConfigError::Read { .. }));
        let message = missing.to_string();
        assert!(message.starts_with("cannot read reorder config"), "{message}");
        assert!(message.contains("missing.json"), "{message}");
    }
}
