//! Record extraction from per-condition results tables.
//!
//! Walks the data root for `Quantification/*.csv` tables, cleans up the
//! source-image and ROI identifier columns, derives the cropped image paths
//! for every active detection variant, and yields records sorted by
//! `(subtitle, roi_id)` with the ROI id compared numerically so that `9`
//! sorts before `10`.

use crate::error::{Error, Result};
use crate::model::{fluorescence_image, mask_image, Condition, Detection, Record, Variant, VariantSelection};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One row of a condition's results table.
#[derive(Debug, Deserialize)]
struct ResultRow {
    /// Source image the ROI was cropped from, e.g. `MAX_Row_01_05.tif`
    #[serde(rename = "Image used")]
    image_used: String,
    /// ROI file name, e.g. `14_1.roi`
    #[serde(rename = "Cell quantified")]
    cell_quantified: String,
    /// Particle count from the thresholding approach, when quantified
    #[serde(rename = "Particle count threshold", default)]
    threshold_count: Option<String>,
    /// Particle count from the Find Maxima approach, when quantified
    #[serde(rename = "Particle count maxima", default)]
    maxima_count: Option<String>,
}

/// Discover every experimental condition under the data root.
///
/// A condition is any directory containing a `Quantification` subdirectory
/// with at least one `.csv` results table. The condition title is the path
/// between the data root and the condition directory. Conditions are
/// returned sorted by title so a run is deterministic regardless of
/// filesystem enumeration order.
pub fn discover_conditions(data_root: &Path) -> Result<Vec<Condition>> {
    let mut conditions = Vec::new();
    collect_conditions(data_root, data_root, &mut conditions)?;

    if conditions.is_empty() {
        return Err(Error::NoConditions(data_root.to_path_buf()));
    }

    conditions.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.results_csv.cmp(&b.results_csv)));
    log::info!(
        "Discovered {} condition(s) under {}",
        conditions.len(),
        data_root.display()
    );
    Ok(conditions)
}

fn collect_conditions(root: &Path, dir: &Path, out: &mut Vec<Condition>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        if path.file_name().and_then(|n| n.to_str()) == Some("Quantification") {
            let cond_root = dir;
            for table in fs::read_dir(&path)? {
                let table = table?.path();
                if table.extension().and_then(|e| e.to_str()) == Some("csv") {
                    out.push(Condition::new(condition_title(root, cond_root), cond_root, table));
                }
            }
        } else {
            collect_conditions(root, &path, out)?;
        }
    }
    Ok(())
}

/// Condition display name: the path from the data root to the condition
/// directory, with `/` separators regardless of platform.
fn condition_title(root: &Path, cond_root: &Path) -> String {
    let rel = cond_root.strip_prefix(root).unwrap_or(cond_root);
    let title: Vec<&str> = rel
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect();
    if title.is_empty() {
        cond_root
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string()
    } else {
        title.join("/")
    }
}

/// Extract all records across conditions, in condition discovery order.
///
/// Fails with [`Error::NoRecords`] if every table turned out empty, which
/// would otherwise violate the paginator's non-empty precondition.
pub fn extract_all(conditions: &[Condition], selection: VariantSelection) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for condition in conditions {
        let extracted = extract_condition(condition, selection)?;
        log::info!(
            "Condition '{}': {} quantified cell(s)",
            condition.title,
            extracted.len()
        );
        records.extend(extracted);
    }
    if records.is_empty() {
        return Err(Error::NoRecords);
    }
    Ok(records)
}

/// Extract one condition's records, sorted by `(subtitle, roi_id)`.
pub fn extract_condition(condition: &Condition, selection: VariantSelection) -> Result<Vec<Record>> {
    let mut reader = csv::Reader::from_path(&condition.results_csv).map_err(|source| Error::CsvRead {
        condition: condition.title.clone(),
        source,
    })?;

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<ResultRow>().enumerate() {
        let row = row.map_err(|source| Error::CsvRead {
            condition: condition.title.clone(),
            source,
        })?;
        records.push(record_from_row(condition, selection, index + 1, &row)?);
    }

    records.sort_by(|a, b| a.subtitle.cmp(&b.subtitle).then(a.roi_id.cmp(&b.roi_id)));
    Ok(records)
}

fn record_from_row(
    condition: &Condition,
    selection: VariantSelection,
    row_index: usize,
    row: &ResultRow,
) -> Result<Record> {
    let subtitle = clean_subtitle(&row.image_used);
    let roi_id = parse_roi_id(&row.cell_quantified).ok_or_else(|| Error::InvalidRoiId {
        condition: condition.title.clone(),
        row: row_index,
        value: row.cell_quantified.clone(),
    })?;

    let mut record = Record {
        title: condition.title.clone(),
        subtitle: subtitle.clone(),
        roi_id,
        primary_image: fluorescence_image(condition, &subtitle, roi_id),
        thresholding: None,
        find_maxima: None,
    };

    for &variant in selection.active() {
        let cell = match variant {
            Variant::Thresholding => row.threshold_count.as_deref(),
            Variant::FindMaxima => row.maxima_count.as_deref(),
        };
        let cell = cell.ok_or_else(|| Error::MissingColumn {
            condition: condition.title.clone(),
            column: variant.count_column(),
        })?;
        let particle_count = parse_count(cell).ok_or_else(|| Error::InvalidCount {
            condition: condition.title.clone(),
            row: row_index,
            value: cell.to_string(),
        })?;
        let detection = Detection {
            mask_image: mask_image(condition, variant, &subtitle, roi_id),
            particle_count,
        };
        match variant {
            Variant::Thresholding => record.thresholding = Some(detection),
            Variant::FindMaxima => record.find_maxima = Some(detection),
        }
    }

    Ok(record)
}

/// Strip the `MAX_` projection prefix and `.tif` extension from a source
/// image name.
fn clean_subtitle(image_used: &str) -> String {
    let s = image_used.strip_prefix("MAX_").unwrap_or(image_used);
    s.strip_suffix(".tif").unwrap_or(s).to_string()
}

/// Coerce a ROI file name like `14_1.roi` to its integer identity.
fn parse_roi_id(cell_quantified: &str) -> Option<u32> {
    let s = cell_quantified.trim();
    let s = s.strip_suffix("_1.roi").unwrap_or(s);
    s.parse().ok()
}

/// Coerce a particle count cell to an integer.
///
/// Tables exported from spreadsheet tools sometimes carry counts as floats
/// (`12.0`), so a whole-valued float is accepted.
fn parse_count(cell: &str) -> Option<u32> {
    let s = cell.trim();
    if let Ok(n) = s.parse::<u32>() {
        return Some(n);
    }
    match s.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64 => Some(f as u32),
        _ => None,
    }
}
