use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionsError {
    #[error("lineCoverageThreshold must be within [0, 1], got {0}")]
    CoverageThreshold(f64),

    #[error("{name} must be a finite, non-negative distance in inches, got {value}")]
    Distance { name: &'static str, value: f64 },

    #[error("Failed to parse options: {0}")]
    Parse(String),
}
