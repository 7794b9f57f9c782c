//! Data model for quantification records and detection variants.
//!
//! A run turns each experimental condition's results table into a flat,
//! ordered sequence of [`Record`]s. Every record keeps the same shape
//! regardless of which detection variants are active; an inactive variant
//! simply carries no [`Detection`].

use std::path::PathBuf;

/// A particle detection approach used during quantification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Intensity-thresholding based particle detection
    Thresholding,
    /// ImageJ "Find Maxima" based particle detection
    FindMaxima,
}

impl Variant {
    /// Human-readable variant name, as shown in progress reporting.
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Thresholding => "Thresholding",
            Variant::FindMaxima => "Find Maxima",
        }
    }

    /// Directory under `Cropped cells/` holding this variant's mask images.
    pub fn particles_dir(&self) -> &'static str {
        match self {
            Variant::Thresholding => "T_Particles",
            Variant::FindMaxima => "FM_Particles",
        }
    }

    /// Results-table column holding this variant's particle counts.
    pub fn count_column(&self) -> &'static str {
        match self {
            Variant::Thresholding => "Particle count threshold",
            Variant::FindMaxima => "Particle count maxima",
        }
    }

    /// File name of this variant's output deck.
    pub fn output_file(&self) -> &'static str {
        match self {
            Variant::Thresholding => "Summary_results_T.pptx",
            Variant::FindMaxima => "Summary_results_FM.pptx",
        }
    }
}

/// Which detection variant(s) were used to quantify the input data.
///
/// Selected once per run; every stage downstream of extraction is a pure
/// function of the same record sequence regardless of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantSelection {
    /// Both approaches were used; one deck is built per variant
    #[default]
    Both,
    /// Only intensity thresholding was used
    ThresholdingOnly,
    /// Only Find Maxima was used
    FindMaximaOnly,
}

impl VariantSelection {
    /// The variants a run must build decks for, in fixed order.
    pub fn active(&self) -> &'static [Variant] {
        match self {
            VariantSelection::Both => &[Variant::Thresholding, Variant::FindMaxima],
            VariantSelection::ThresholdingOnly => &[Variant::Thresholding],
            VariantSelection::FindMaximaOnly => &[Variant::FindMaxima],
        }
    }

    /// Whether the given variant is active under this selection.
    pub fn includes(&self, variant: Variant) -> bool {
        self.active().contains(&variant)
    }

    /// Parse a selection from its command-line spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "both" => Some(VariantSelection::Both),
            "thresholding" => Some(VariantSelection::ThresholdingOnly),
            "find-maxima" => Some(VariantSelection::FindMaximaOnly),
            _ => None,
        }
    }
}

/// One variant's detection result for a quantified cell.
///
/// The mask image reference and the particle count always travel together;
/// a record either has both for a variant or neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// Path to the particle mask crop for this cell
    pub mask_image: PathBuf,
    /// Number of particles counted in the mask
    pub particle_count: u32,
}

/// One quantified region of interest (a single cropped cell).
///
/// Created during extraction and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Owning condition's display name (slide title)
    pub title: String,
    /// Name of the parent source image (slide subtitle)
    pub subtitle: String,
    /// Integer ROI identity, compared numerically for ordering
    pub roi_id: u32,
    /// Path to the fluorescence crop for this cell
    pub primary_image: PathBuf,
    /// Thresholding detection, if that variant is active
    pub thresholding: Option<Detection>,
    /// Find Maxima detection, if that variant is active
    pub find_maxima: Option<Detection>,
}

impl Record {
    /// Get the detection result for one variant, if present.
    pub fn detection(&self, variant: Variant) -> Option<&Detection> {
        match variant {
            Variant::Thresholding => self.thresholding.as_ref(),
            Variant::FindMaxima => self.find_maxima.as_ref(),
        }
    }

    /// The label shown under the fluorescence crop (the ROI name).
    pub fn roi_label(&self) -> String {
        self.roi_id.to_string()
    }
}

/// An experimental condition discovered under the data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// Display name, the path between the data root and `Quantification/`
    pub title: String,
    /// Condition directory holding `Cropped cells/` and `Quantification/`
    pub root: PathBuf,
    /// Path to the condition's results table
    pub results_csv: PathBuf,
}

impl Condition {
    /// Create a condition rooted at `root` with the given results table.
    pub fn new(title: impl Into<String>, root: impl Into<PathBuf>, results_csv: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            root: root.into(),
            results_csv: results_csv.into(),
        }
    }

    /// Directory holding the cropped cell images for this condition.
    pub fn cropped_cells_dir(&self) -> PathBuf {
        self.root.join("Cropped cells")
    }
}

/// Derive the fluorescence crop path for a ROI.
pub(crate) fn fluorescence_image(condition: &Condition, subtitle: &str, roi_id: u32) -> PathBuf {
    condition
        .cropped_cells_dir()
        .join("Fluorescence")
        .join(subtitle)
        .join(format!("{}_2.jpg", roi_id))
}

/// Derive one variant's mask crop path for a ROI.
///
/// Substitutes the `Fluorescence` path segment with the variant's particles
/// directory and the `_2.jpg` suffix with `_1.jpg`.
pub(crate) fn mask_image(condition: &Condition, variant: Variant, subtitle: &str, roi_id: u32) -> PathBuf {
    condition
        .cropped_cells_dir()
        .join(variant.particles_dir())
        .join(subtitle)
        .join(format!("{}_1.jpg", roi_id))
}
