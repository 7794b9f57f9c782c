//! Configuration for a deck generation run.

use crate::model::{Variant, VariantSelection};
use crate::pptx::SlideTemplate;
use std::path::{Path, PathBuf};

/// Deck generation configuration.
///
/// Carries the run-scoped paths and variant selection explicitly; the
/// pipeline has no ambient state.
#[derive(Debug, Clone)]
pub struct DeckConfig {
    /// Root of the extracted `Data` tree
    pub data_root: PathBuf,
    /// Directory the output deck(s) are written to
    pub output_dir: PathBuf,
    /// Which detection variant(s) to build decks for
    pub selection: VariantSelection,
    /// Slide dimensions and visual defaults
    pub template: SlideTemplate,
}

impl DeckConfig {
    /// Create a configuration with defaults: both variants, output next to
    /// the data root.
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        let data_root = data_root.into();
        let output_dir = data_root
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_root,
            output_dir,
            selection: VariantSelection::Both,
            template: SlideTemplate::default(),
        }
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the variant selection.
    pub fn with_selection(mut self, selection: VariantSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Set the slide template.
    pub fn with_template(mut self, template: SlideTemplate) -> Self {
        self.template = template;
        self
    }

    /// Output path for one variant's deck.
    pub fn output_path(&self, variant: Variant) -> PathBuf {
        self.output_dir.join(variant.output_file())
    }
}
