//! Tuning knobs for evidence resolution
//!
//! Options travel with every call instead of living in module-level constants,
//! so the same structure can be resolved with different thresholds side by side.
//! Every field has its own serde default, so partial TOML/JSON documents work.

use crate::error::OptionsError;
use serde::{Deserialize, Serialize};

/// Minimum mutual line coverage before a whole line is highlighted
pub const DEFAULT_LINE_COVERAGE_THRESHOLD: f64 = 0.80;

/// Largest horizontal gap (inches) between words merged into one run
pub const DEFAULT_WORD_GAP_THRESHOLD: f64 = 0.3;

/// Largest center-Y distance (inches) for words to share a visual line
pub const DEFAULT_LINE_Y_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOptions {
    #[serde(default = "default_line_coverage_threshold")]
    pub line_coverage_threshold: f64,
    #[serde(default = "default_word_gap_threshold")]
    pub word_gap_threshold: f64,
    #[serde(default = "default_line_y_threshold")]
    pub line_y_threshold: f64,
    #[serde(default = "default_enabled")]
    pub enable_table_detection: bool,
    #[serde(default = "default_enabled")]
    pub enable_line_preference: bool,
}

fn default_line_coverage_threshold() -> f64 {
    DEFAULT_LINE_COVERAGE_THRESHOLD
}

fn default_word_gap_threshold() -> f64 {
    DEFAULT_WORD_GAP_THRESHOLD
}

fn default_line_y_threshold() -> f64 {
    DEFAULT_LINE_Y_THRESHOLD
}

fn default_enabled() -> bool {
    true
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            line_coverage_threshold: DEFAULT_LINE_COVERAGE_THRESHOLD,
            word_gap_threshold: DEFAULT_WORD_GAP_THRESHOLD,
            line_y_threshold: DEFAULT_LINE_Y_THRESHOLD,
            enable_table_detection: true,
            enable_line_preference: true,
        }
    }
}

impl ResolveOptions {
    pub fn with_line_coverage_threshold(mut self, threshold: f64) -> Self {
        self.line_coverage_threshold = threshold;
        self
    }

    pub fn with_word_gap_threshold(mut self, inches: f64) -> Self {
        self.word_gap_threshold = inches;
        self
    }

    pub fn with_line_y_threshold(mut self, inches: f64) -> Self {
        self.line_y_threshold = inches;
        self
    }

    pub fn with_table_detection(mut self, enabled: bool) -> Self {
        self.enable_table_detection = enabled;
        self
    }

    pub fn with_line_preference(mut self, enabled: bool) -> Self {
        self.enable_line_preference = enabled;
        self
    }

    /// Reject thresholds the engine can't interpret.
    ///
    /// Resolution itself never calls this; out-of-range values simply make a
    /// tier always or never fire. Surfaces that accept user input validate first.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let t = self.line_coverage_threshold;
        if !(0.0..=1.0).contains(&t) {
            return Err(OptionsError::CoverageThreshold(t));
        }

        for (name, value) in [
            ("wordGapThreshold", self.word_gap_threshold),
            ("lineYThreshold", self.line_y_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(OptionsError::Distance { name, value });
            }
        }

        Ok(())
    }

    /// Parse options from a TOML document, filling absent fields with defaults
    ///
    /// # Example
    ///
    /// ```
    /// use evidence_engine::ResolveOptions;
    ///
    /// let options = ResolveOptions::from_toml_str("wordGapThreshold = 0.5").unwrap();
    /// assert_eq!(options.word_gap_threshold, 0.5);
    /// assert_eq!(options.line_coverage_threshold, 0.80);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, OptionsError> {
        let options: Self = toml::from_str(s).map_err(|e| OptionsError::Parse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Parse options from JSON, filling absent fields with defaults
    pub fn from_json_str(s: &str) -> Result<Self, OptionsError> {
        let options: Self =
            serde_json::from_str(s).map_err(|e| OptionsError::Parse(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }
}
