//! Error types for the deck generation pipeline.
//!
//! This module defines all error types that can occur while extracting
//! quantification records and building summary decks.

use std::path::PathBuf;

/// Result type alias for deck generation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during deck generation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No `Quantification/*.csv` results found under the data root
    #[error("No quantification results found under '{}'", .0.display())]
    NoConditions(PathBuf),

    /// A results table could not be read
    #[error("Condition '{condition}': failed to read results table: {source}")]
    CsvRead {
        /// Condition whose table failed to parse
        condition: String,
        /// Underlying CSV error
        source: csv::Error,
    },

    /// A required column is absent for the active detection variant
    #[error("Condition '{condition}': required column '{column}' is missing")]
    MissingColumn {
        /// Condition whose table is malformed
        condition: String,
        /// Name of the missing column
        column: &'static str,
    },

    /// A ROI identifier could not be coerced to an integer
    #[error("Condition '{condition}', row {row}: ROI identifier '{value}' is not an integer")]
    InvalidRoiId {
        /// Condition whose table is malformed
        condition: String,
        /// 1-based data row index
        row: usize,
        /// The offending cell value
        value: String,
    },

    /// A particle count could not be coerced to an integer
    #[error("Condition '{condition}', row {row}: particle count '{value}' is not an integer")]
    InvalidCount {
        /// Condition whose table is malformed
        condition: String,
        /// 1-based data row index
        row: usize,
        /// The offending cell value
        value: String,
    },

    /// Zero records extracted across all conditions
    #[error("No quantified cells found in any condition")]
    NoRecords,

    /// An image referenced by a placement could not be read for embedding
    #[error("Cannot embed image '{}': {reason}", .path.display())]
    MissingImage {
        /// Path of the unreadable image
        path: PathBuf,
        /// Why the read failed
        reason: String,
    },

    /// A slide failed to build, with the page located by title and subtitle
    #[error("Slide {slide} ('{condition}' / '{subtitle}'): {source}")]
    SlideBuild {
        /// 1-based slide index within the variant pass
        slide: usize,
        /// Page title (condition name)
        condition: String,
        /// Page subtitle (source image name)
        subtitle: String,
        /// Underlying error
        source: Box<Error>,
    },

    /// Archive error while unpacking input data
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Output package could not be assembled
    #[error("Failed to write deck: {0}")]
    DeckWrite(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
