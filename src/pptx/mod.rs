//! PPTX presentation building.
//!
//! [`PptxDeck`] is the concrete presentation-building collaborator: it
//! realizes layout placements as text boxes and embedded pictures inside an
//! Open XML package (a ZIP of XML parts plus media files). The deck is
//! assembled fully in memory and written atomically — the output file only
//! appears once the whole package has been serialized.

mod xml;

use crate::deck::SlideSink;
use crate::error::{Error, Result};
use crate::layout::{ImagePlacement, Placement};
use indexmap::IndexMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Fixed visual defaults supplied to every deck.
///
/// The core never alters the template beyond adding elements to slides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideTemplate {
    /// Slide width in centimeters
    pub width_cm: f32,
    /// Slide height in centimeters
    pub height_cm: f32,
}

impl Default for SlideTemplate {
    /// 16:9 slides, 34 cm by 19 cm.
    fn default() -> Self {
        Self {
            width_cm: 34.0,
            height_cm: 19.0,
        }
    }
}

impl SlideTemplate {
    /// Create a template with custom slide dimensions.
    pub fn new(width_cm: f32, height_cm: f32) -> Self {
        Self {
            width_cm,
            height_cm,
        }
    }
}

/// Convert centimeters to English Metric Units (1 cm = 360 000 EMU).
pub(crate) fn emu(cm: f32) -> i64 {
    (cm as f64 * 360_000.0).round() as i64
}

/// An embedded media file.
#[derive(Debug)]
struct MediaEntry {
    /// File extension used for the part name and content type
    extension: String,
    /// Raw image bytes, embedded opaquely
    bytes: Vec<u8>,
}

/// One finished slide: its XML part and the media it references, in
/// relationship order.
#[derive(Debug)]
struct SlidePart {
    xml: String,
    /// 1-based media numbers, position i maps to `rId{i + 2}`
    image_media: Vec<usize>,
}

/// A PPTX deck under construction.
#[derive(Debug)]
pub struct PptxDeck {
    template: SlideTemplate,
    slides: Vec<SlidePart>,
    /// Image path -> 1-based media number; images shared across slides are
    /// embedded once.
    media_numbers: IndexMap<PathBuf, usize>,
    media: Vec<MediaEntry>,
}

impl PptxDeck {
    /// Open a fresh deck from the template.
    pub fn new(template: SlideTemplate) -> Self {
        Self {
            template,
            slides: Vec::new(),
            media_numbers: IndexMap::new(),
            media: Vec::new(),
        }
    }

    /// Number of slides appended so far.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Register an image in the media registry, reading its bytes.
    fn register_media(&mut self, path: &Path) -> Result<usize> {
        if let Some(&number) = self.media_numbers.get(path) {
            return Ok(number);
        }
        let bytes = fs::read(path).map_err(|e| Error::MissingImage {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("jpg")
            .to_ascii_lowercase();
        self.media.push(MediaEntry { extension, bytes });
        let number = self.media.len();
        self.media_numbers.insert(path.to_path_buf(), number);
        Ok(number)
    }

    fn build_slide(&mut self, placements: &[Placement]) -> Result<SlidePart> {
        let mut shapes = String::new();
        let mut image_media: Vec<usize> = Vec::new();
        // Shape id 1 is the slide's group shape.
        let mut shape_id = 2u32;

        for placement in placements {
            match placement {
                Placement::Text(text) => {
                    shapes.push_str(&xml::text_shape(shape_id, text));
                },
                Placement::Image(image) => {
                    let rel = self.slide_image_rel(&mut image_media, image)?;
                    shapes.push_str(&xml::picture_shape(shape_id, image, rel));
                },
            }
            shape_id += 1;
        }

        Ok(SlidePart {
            xml: xml::slide(&shapes),
            image_media,
        })
    }

    /// Relationship id for an image on the slide being built. The first
    /// image relationship is `rId2` (`rId1` is the slide layout).
    fn slide_image_rel(&mut self, image_media: &mut Vec<usize>, image: &ImagePlacement) -> Result<u32> {
        let number = self.register_media(&image.path)?;
        let position = match image_media.iter().position(|&m| m == number) {
            Some(pos) => pos,
            None => {
                image_media.push(number);
                image_media.len() - 1
            },
        };
        Ok(position as u32 + 2)
    }

    /// Serialize the complete package to bytes.
    fn to_package(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        let mut part = |zip: &mut ZipWriter<std::io::Cursor<Vec<u8>>>,
                        name: &str,
                        content: &[u8]|
         -> Result<()> {
            zip.start_file(name, options)
                .map_err(|e| Error::DeckWrite(e.to_string()))?;
            zip.write_all(content)?;
            Ok(())
        };

        let extensions: Vec<&str> = self.media.iter().map(|m| m.extension.as_str()).collect();
        part(
            &mut zip,
            "[Content_Types].xml",
            xml::content_types(self.slides.len(), &extensions).as_bytes(),
        )?;
        part(&mut zip, "_rels/.rels", xml::root_rels().as_bytes())?;
        part(&mut zip, "docProps/core.xml", xml::core_props().as_bytes())?;
        part(
            &mut zip,
            "docProps/app.xml",
            xml::app_props(self.slides.len()).as_bytes(),
        )?;
        part(
            &mut zip,
            "ppt/presentation.xml",
            xml::presentation(self.template, self.slides.len()).as_bytes(),
        )?;
        part(
            &mut zip,
            "ppt/_rels/presentation.xml.rels",
            xml::presentation_rels(self.slides.len()).as_bytes(),
        )?;
        part(&mut zip, "ppt/theme/theme1.xml", xml::theme().as_bytes())?;
        part(
            &mut zip,
            "ppt/slideMasters/slideMaster1.xml",
            xml::slide_master().as_bytes(),
        )?;
        part(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            xml::slide_master_rels().as_bytes(),
        )?;
        part(
            &mut zip,
            "ppt/slideLayouts/slideLayout1.xml",
            xml::slide_layout().as_bytes(),
        )?;
        part(
            &mut zip,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            xml::slide_layout_rels().as_bytes(),
        )?;

        for (index, slide) in self.slides.iter().enumerate() {
            let number = index + 1;
            part(
                &mut zip,
                &format!("ppt/slides/slide{}.xml", number),
                slide.xml.as_bytes(),
            )?;
            let media_parts: Vec<(usize, &str)> = slide
                .image_media
                .iter()
                .map(|&m| (m, self.media[m - 1].extension.as_str()))
                .collect();
            part(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                xml::slide_rels(&media_parts).as_bytes(),
            )?;
        }

        for (index, entry) in self.media.iter().enumerate() {
            part(
                &mut zip,
                &format!("ppt/media/image{}.{}", index + 1, entry.extension),
                &entry.bytes,
            )?;
        }

        let cursor = zip.finish().map_err(|e| Error::DeckWrite(e.to_string()))?;
        Ok(cursor.into_inner())
    }
}

impl SlideSink for PptxDeck {
    fn add_slide(&mut self, placements: &[Placement]) -> Result<()> {
        let slide = self.build_slide(placements)?;
        self.slides.push(slide);
        Ok(())
    }

    /// Write the package next to `path` and rename it into place, so a
    /// failed save never leaves a misleading "complete" file.
    fn save(&mut self, path: &Path) -> Result<()> {
        let package = self.to_package()?;
        let tmp = path.with_extension("pptx.partial");
        if let Err(e) = fs::write(&tmp, &package) {
            let _ = fs::remove_file(&tmp);
            return Err(Error::Io(e));
        }
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
