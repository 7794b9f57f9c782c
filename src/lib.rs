//! # pla_deck
//!
//! Summary PPTX deck generator for Proximity Ligation Assay (PLA)
//! quantification results.
//!
//! Takes a `Data/` tree of per-condition results tables plus paired cropped
//! cell images and builds one deterministic, paginated slide deck per
//! detection variant (Thresholding and/or Find Maxima). Each slide shows up
//! to 20 quantified cells on a fixed 5x4 grid: the fluorescence crop with
//! its ROI name below, and the particle mask crop with its count below.
//!
//! ## Pipeline
//!
//! ```text
//! Data/ tree
//!     ↓
//! [extract] conditions → ordered records, sorted by (subtitle, roi_id)
//!     ↓
//! [paginate] records → pages (capacity 20, break on title/subtitle change)
//!     ↓
//! [layout] page → placements (fixed coordinate grid, per variant)
//!     ↓
//! [deck] one pass per active variant → Summary_results_T.pptx / _FM.pptx
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use pla_deck::{extract, paginate, DeckBuilder, DeckConfig};
//!
//! # fn main() -> pla_deck::Result<()> {
//! let config = DeckConfig::new("Data").with_output_dir("out");
//! let conditions = extract::discover_conditions(&config.data_root)?;
//! let records = extract::extract_all(&conditions, config.selection)?;
//! let pages = paginate::paginate(records)?;
//! let saved = DeckBuilder::new(&config).build(&pages)?;
//! println!("wrote {} deck(s)", saved.len());
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod config;
pub mod deck;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod paginate;
pub mod pptx;

pub use config::DeckConfig;
pub use deck::{DeckBuilder, LogProgress, ProgressObserver, SlideSink};
pub use error::{Error, Result};
pub use layout::{lay_out, Placement};
pub use model::{Condition, Detection, Record, Variant, VariantSelection};
pub use paginate::{paginate, Page, PAGE_CAPACITY};
pub use pptx::{PptxDeck, SlideTemplate};
