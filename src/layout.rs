//! Deterministic slide layout from a fixed coordinate grid.
//!
//! Maps a page of up to 20 records onto concrete placements: a title and
//! subtitle text box at fixed positions, and for each record a fluorescence
//! crop with its ROI name below plus, when the variant detected it, the
//! particle mask crop with its count below. Slots fill row-major across a
//! 5-column by 4-row grid; slot `i` sits at row `i / 5`, column `i % 5`.
//!
//! The coordinate tables are literal constants measured off the reference
//! slide design. They are lookups, not formulas; geometry for a given page
//! size is byte-identical across runs and only the content varies.

use crate::geometry::Rect;
use crate::model::Variant;
use crate::paginate::{Page, PAGE_CAPACITY};
use std::path::PathBuf;

/// Font family used for every text element on a slide.
pub const FONT_NAME: &str = "Times New Roman";

/// Title text box: top-left half of the slide header.
pub const TITLE_BOX: Rect = Rect::new(0.0, 0.0, 17.0, 1.5);

/// Subtitle text box: top-right half of the slide header.
pub const SUBTITLE_BOX: Rect = Rect::new(17.0, 0.0, 17.0, 1.5);

/// Width and height shared by every image placement, in centimeters.
pub const IMAGE_SIZE: (f32, f32) = (3.25, 3.0);

/// Width and height shared by every label placement, in centimeters.
pub const LABEL_SIZE: (f32, f32) = (3.25, 1.0);

/// Per-slot image coordinates: (primary left, primary top, secondary left,
/// secondary top), in centimeters. Indexed by slot 0..=19.
pub const IMAGE_SLOTS: [(f32, f32, f32, f32); PAGE_CAPACITY] = [
    (0.25, 2.1, 3.5, 2.1),
    (7.0, 2.1, 10.25, 2.1),
    (13.75, 2.1, 17.0, 2.1),
    (20.5, 2.1, 23.75, 2.1),
    (27.25, 2.1, 30.5, 2.1),
    (0.25, 6.4, 3.5, 6.4),
    (7.0, 6.4, 10.25, 6.4),
    (13.75, 6.4, 17.0, 6.4),
    (20.5, 6.4, 23.75, 6.4),
    (27.25, 6.4, 30.5, 6.4),
    (0.25, 10.7, 3.5, 10.7),
    (7.0, 10.7, 10.25, 10.7),
    (13.75, 10.7, 17.0, 10.7),
    (20.5, 10.7, 23.75, 10.7),
    (27.25, 10.7, 30.5, 10.7),
    (0.25, 15.0, 3.5, 15.0),
    (7.0, 15.0, 10.25, 15.0),
    (13.75, 15.0, 17.0, 15.0),
    (20.5, 15.0, 23.75, 15.0),
    (27.25, 15.0, 30.5, 15.0),
];

/// Per-slot label coordinates, directly below the image slots. Same tuple
/// order as [`IMAGE_SLOTS`].
pub const LABEL_SLOTS: [(f32, f32, f32, f32); PAGE_CAPACITY] = [
    (0.25, 5.1, 3.5, 5.1),
    (7.0, 5.1, 10.25, 5.1),
    (13.75, 5.1, 17.0, 5.1),
    (20.5, 5.1, 23.75, 5.1),
    (27.25, 5.1, 30.5, 5.1),
    (0.25, 9.4, 3.5, 9.4),
    (7.0, 9.4, 10.25, 9.4),
    (13.75, 9.4, 17.0, 9.4),
    (20.5, 9.4, 23.75, 9.4),
    (27.25, 9.4, 30.5, 9.4),
    (0.25, 13.7, 3.5, 13.7),
    (7.0, 13.7, 10.25, 13.7),
    (13.75, 13.7, 17.0, 13.7),
    (20.5, 13.7, 23.75, 13.7),
    (27.25, 13.7, 30.5, 13.7),
    (0.25, 18.0, 3.5, 18.0),
    (7.0, 18.0, 10.25, 18.0),
    (13.75, 18.0, 17.0, 18.0),
    (20.5, 18.0, 23.75, 18.0),
    (27.25, 18.0, 30.5, 18.0),
];

/// Font configuration for a text placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    /// Font size in points
    pub size_pt: f32,
    /// Bold weight
    pub bold: bool,
}

/// Slide title font: bold 32 pt.
pub const TITLE_FONT: FontSpec = FontSpec {
    size_pt: 32.0,
    bold: true,
};

/// Slide subtitle font: regular 32 pt.
pub const SUBTITLE_FONT: FontSpec = FontSpec {
    size_pt: 32.0,
    bold: false,
};

/// Image label font: regular 20 pt.
pub const LABEL_FONT: FontSpec = FontSpec {
    size_pt: 20.0,
    bold: false,
};

/// A centered text box to realize on the slide.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    /// Position and size, in centimeters
    pub bbox: Rect,
    /// Text content
    pub text: String,
    /// Font configuration
    pub font: FontSpec,
}

/// A picture to embed on the slide.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlacement {
    /// Position and size, in centimeters
    pub bbox: Rect,
    /// Path of the image file to embed
    pub path: PathBuf,
    /// Draw a thin accent-colored frame (used for particle masks)
    pub outlined: bool,
}

/// One fully resolved visual element for the deck builder to realize.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    /// A text box
    Text(TextPlacement),
    /// An embedded picture
    Image(ImagePlacement),
}

impl Placement {
    fn text(bbox: Rect, text: impl Into<String>, font: FontSpec) -> Self {
        Placement::Text(TextPlacement {
            bbox,
            text: text.into(),
            font,
        })
    }

    fn image(bbox: Rect, path: PathBuf, outlined: bool) -> Self {
        Placement::Image(ImagePlacement {
            bbox,
            path,
            outlined,
        })
    }
}

/// Resolve one page into its placements for the given detection variant.
///
/// Emission order is fixed: title, subtitle, then per slot the fluorescence
/// crop, its ROI label, and — when the record carries a detection for this
/// variant — the mask crop and its `P=<count>` label. Records without a
/// detection produce no secondary placements at all.
///
/// # Panics
///
/// Panics if the page exceeds [`PAGE_CAPACITY`]. The paginator guarantees
/// this never happens; a violation is a contract breach, not a recoverable
/// error.
pub fn lay_out(page: &Page, variant: Variant) -> Vec<Placement> {
    assert!(
        page.len() <= PAGE_CAPACITY,
        "page with {} records exceeds slide capacity {}",
        page.len(),
        PAGE_CAPACITY
    );

    let (image_w, image_h) = IMAGE_SIZE;
    let (label_w, label_h) = LABEL_SIZE;

    let mut placements = Vec::with_capacity(2 + page.len() * 4);
    placements.push(Placement::text(TITLE_BOX, page.title(), TITLE_FONT));
    placements.push(Placement::text(SUBTITLE_BOX, page.subtitle(), SUBTITLE_FONT));

    for (slot, record) in page.records().iter().enumerate() {
        let (primary_left, primary_top, secondary_left, secondary_top) = IMAGE_SLOTS[slot];
        let (primary_label_left, primary_label_top, secondary_label_left, secondary_label_top) =
            LABEL_SLOTS[slot];

        placements.push(Placement::image(
            Rect::new(primary_left, primary_top, image_w, image_h),
            record.primary_image.clone(),
            false,
        ));
        placements.push(Placement::text(
            Rect::new(primary_label_left, primary_label_top, label_w, label_h),
            record.roi_label(),
            LABEL_FONT,
        ));

        if let Some(detection) = record.detection(variant) {
            placements.push(Placement::image(
                Rect::new(secondary_left, secondary_top, image_w, image_h),
                detection.mask_image.clone(),
                true,
            ));
            placements.push(Placement::text(
                Rect::new(secondary_label_left, secondary_label_top, label_w, label_h),
                format!("P={}", detection.particle_count),
                LABEL_FONT,
            ));
        }
    }

    placements
}
