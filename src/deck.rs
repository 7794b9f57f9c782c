//! Deck orchestration: one output document per active detection variant.
//!
//! The builder runs an independent pass per variant over the same page
//! sequence (grouping is variant-agnostic), resolving each page through the
//! layout engine and handing the placements to a presentation-building
//! collaborator behind the [`SlideSink`] trait. A failed pass saves nothing;
//! a deck file only appears once every slide of its pass succeeded.

use crate::config::DeckConfig;
use crate::error::{Error, Result};
use crate::layout::{lay_out, Placement};
use crate::model::Variant;
use crate::paginate::Page;
use crate::pptx::PptxDeck;
use std::fs;
use std::path::{Path, PathBuf};

/// A presentation document under construction.
///
/// The deck builder drives this once per variant; implementations own the
/// document format.
pub trait SlideSink {
    /// Append one slide realizing the given placements.
    fn add_slide(&mut self, placements: &[Placement]) -> Result<()>;

    /// Persist the completed document at `path`.
    ///
    /// Must not leave a partial file behind on failure.
    fn save(&mut self, path: &Path) -> Result<()>;
}

/// Observer for per-slide build progress. Advisory only.
pub trait ProgressObserver {
    /// Called after each slide is appended, with 1-based progress.
    fn on_slide(&mut self, variant: Variant, done: usize, total: usize);
}

/// Progress observer that reports through the `log` crate.
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressObserver for LogProgress {
    fn on_slide(&mut self, variant: Variant, done: usize, total: usize) {
        log::info!(
            "Making {} presentation (slide {} of {})",
            variant.label(),
            done,
            total
        );
    }
}

/// Builds one deck per active variant from a shared page sequence.
#[derive(Debug)]
pub struct DeckBuilder<'a> {
    config: &'a DeckConfig,
}

impl<'a> DeckBuilder<'a> {
    /// Create a builder over the given configuration.
    pub fn new(config: &'a DeckConfig) -> Self {
        Self { config }
    }

    /// Build PPTX decks for every active variant and return the saved paths.
    pub fn build(&self, pages: &[Page]) -> Result<Vec<PathBuf>> {
        let template = self.config.template;
        self.build_with(
            pages,
            |_| Ok(PptxDeck::new(template)),
            &mut LogProgress,
        )
    }

    /// Build decks through a caller-supplied sink factory.
    ///
    /// Each active variant gets a fresh sink; pages are appended in order
    /// and the document is saved under the variant's output name. A slide
    /// failure aborts that variant's pass with the page identified.
    pub fn build_with<S, F>(
        &self,
        pages: &[Page],
        mut open_sink: F,
        observer: &mut dyn ProgressObserver,
    ) -> Result<Vec<PathBuf>>
    where
        S: SlideSink,
        F: FnMut(Variant) -> Result<S>,
    {
        fs::create_dir_all(&self.config.output_dir)?;

        let mut saved = Vec::new();
        for &variant in self.config.selection.active() {
            let mut sink = open_sink(variant)?;

            for (index, page) in pages.iter().enumerate() {
                let placements = lay_out(page, variant);
                sink.add_slide(&placements).map_err(|source| Error::SlideBuild {
                    slide: index + 1,
                    condition: page.title().to_string(),
                    subtitle: page.subtitle().to_string(),
                    source: Box::new(source),
                })?;
                observer.on_slide(variant, index + 1, pages.len());
            }

            let path = self.config.output_path(variant);
            sink.save(&path)?;
            log::info!("Saved {} deck to {}", variant.label(), path.display());
            saved.push(path);
        }
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, VariantSelection};
    use crate::paginate::paginate;
    use std::path::PathBuf;

    /// Sink that records slide placement counts and save calls.
    #[derive(Debug, Default)]
    struct RecordingSink {
        slides: Vec<usize>,
        saved_to: Option<PathBuf>,
    }

    impl SlideSink for RecordingSink {
        fn add_slide(&mut self, placements: &[Placement]) -> Result<()> {
            self.slides.push(placements.len());
            Ok(())
        }

        fn save(&mut self, path: &Path) -> Result<()> {
            self.saved_to = Some(path.to_path_buf());
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct CountingObserver {
        calls: Vec<(Variant, usize, usize)>,
    }

    impl ProgressObserver for CountingObserver {
        fn on_slide(&mut self, variant: Variant, done: usize, total: usize) {
            self.calls.push((variant, done, total));
        }
    }

    fn record(title: &str, subtitle: &str, roi_id: u32) -> Record {
        Record {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            roi_id,
            primary_image: PathBuf::from(format!("{}_2.jpg", roi_id)),
            thresholding: None,
            find_maxima: None,
        }
    }

    #[test]
    fn test_one_pass_per_active_variant() {
        let dir = tempfile::tempdir().unwrap();
        let config = DeckConfig::new(dir.path().join("Data"))
            .with_output_dir(dir.path())
            .with_selection(VariantSelection::Both);
        let pages = paginate(vec![record("A", "x", 1), record("A", "y", 1)]).unwrap();

        let mut observer = CountingObserver::default();
        let saved = DeckBuilder::new(&config)
            .build_with(&pages, |_| Ok(RecordingSink::default()), &mut observer)
            .unwrap();

        assert_eq!(saved.len(), 2);
        assert!(saved[0].ends_with("Summary_results_T.pptx"));
        assert!(saved[1].ends_with("Summary_results_FM.pptx"));
        // Two pages per pass, two passes.
        assert_eq!(observer.calls.len(), 4);
        assert_eq!(observer.calls[0], (Variant::Thresholding, 1, 2));
        assert_eq!(observer.calls[3], (Variant::FindMaxima, 2, 2));
    }

    #[test]
    fn test_slide_failure_identifies_page() {
        struct FailingSink;
        impl SlideSink for FailingSink {
            fn add_slide(&mut self, _placements: &[Placement]) -> Result<()> {
                Err(Error::MissingImage {
                    path: PathBuf::from("1_1.jpg"),
                    reason: "not found".to_string(),
                })
            }
            fn save(&mut self, _path: &Path) -> Result<()> {
                Ok(())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let config = DeckConfig::new(dir.path().join("Data"))
            .with_output_dir(dir.path())
            .with_selection(VariantSelection::ThresholdingOnly);
        let pages = paginate(vec![record("GDNF", "Row_01_05", 1)]).unwrap();

        let err = DeckBuilder::new(&config)
            .build_with(&pages, |_| Ok(FailingSink), &mut LogProgress)
            .unwrap_err();
        match err {
            Error::SlideBuild {
                slide,
                condition,
                subtitle,
                ..
            } => {
                assert_eq!(slide, 1);
                assert_eq!(condition, "GDNF");
                assert_eq!(subtitle, "Row_01_05");
            },
            other => panic!("expected SlideBuild, got {:?}", other),
        }
    }
}
