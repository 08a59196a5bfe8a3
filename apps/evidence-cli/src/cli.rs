//! Command-line arguments

use clap::{Args, Parser, Subcommand};
use evidence_engine::ResolveOptions;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "evidence-cli")]
#[command(
    version,
    about = "Locate the page regions an extracted value was read from"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a character range to highlight boxes and print them as JSON
    Resolve(ResolveArgs),
    /// Check an OCR structure for inconsistencies
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// OCR structure JSON file
    pub ocr: PathBuf,

    /// Page number (1-based)
    #[arg(long)]
    pub page: u32,

    /// First character offset of the value
    #[arg(long)]
    pub start: usize,

    /// Character offset one past the end of the value
    #[arg(long)]
    pub end: usize,

    /// TOML file with a [resolve] table
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub line_coverage_threshold: Option<f64>,

    /// Inches
    #[arg(long)]
    pub word_gap_threshold: Option<f64>,

    /// Inches
    #[arg(long)]
    pub line_y_threshold: Option<f64>,

    /// Skip the table cell tier
    #[arg(long)]
    pub no_tables: bool,

    /// Skip the whole-line tier
    #[arg(long)]
    pub no_line_preference: bool,

    /// Also project boxes onto a canvas of this width in pixels
    #[arg(long, requires = "canvas_height")]
    pub canvas_width: Option<f64>,

    #[arg(long, requires = "canvas_width")]
    pub canvas_height: Option<f64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl ResolveArgs {
    /// Layer command-line flags over options loaded from config
    pub fn apply_overrides(&self, mut options: ResolveOptions) -> ResolveOptions {
        if let Some(threshold) = self.line_coverage_threshold {
            options = options.with_line_coverage_threshold(threshold);
        }
        if let Some(gap) = self.word_gap_threshold {
            options = options.with_word_gap_threshold(gap);
        }
        if let Some(y) = self.line_y_threshold {
            options = options.with_line_y_threshold(y);
        }
        if self.no_tables {
            options = options.with_table_detection(false);
        }
        if self.no_line_preference {
            options = options.with_line_preference(false);
        }
        options
    }

    pub fn canvas(&self) -> Option<(f64, f64)> {
        self.canvas_width.zip(self.canvas_height)
    }
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// OCR structure JSON file
    pub ocr: PathBuf,
}
