//! Integration tests for condition discovery and record extraction.
//!
//! These build small `Data/` trees on disk and verify column cleanup,
//! numeric ROI ordering, image path derivation, and the extraction error
//! taxonomy.

use pla_deck::error::Error;
use pla_deck::extract::{discover_conditions, extract_all, extract_condition};
use pla_deck::model::{Variant, VariantSelection};
use std::fs;
use std::path::Path;

/// Create `<root>/<condition>/Quantification/Results.csv` with the given
/// content and return the data root.
fn write_results(data_root: &Path, condition: &str, csv: &str) {
    let dir = data_root.join(condition).join("Quantification");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("Results.csv"), csv).unwrap();
}

const FULL_TABLE: &str = "\
Image used,Cell quantified,Particle count threshold,Particle count maxima
MAX_Row_01_05.tif,10_1.roi,12,15
MAX_Row_01_05.tif,9_1.roi,3,4
MAX_Row_06_10.tif,1_1.roi,7.0,8
";

#[test]
fn discovery_sorts_conditions_by_title() {
    let dir = tempfile::tempdir().unwrap();
    let data_root = dir.path().join("Data");
    write_results(&data_root, "GDNF 15min", FULL_TABLE);
    write_results(&data_root, "Control", FULL_TABLE);

    let conditions = discover_conditions(&data_root).unwrap();
    let titles: Vec<&str> = conditions.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Control", "GDNF 15min"]);
    assert_eq!(conditions[0].root, data_root.join("Control"));
}

#[test]
fn discovery_handles_nested_condition_directories() {
    let dir = tempfile::tempdir().unwrap();
    let data_root = dir.path().join("Data");
    write_results(&data_root, "Exp1/GDNF 15min", FULL_TABLE);

    let conditions = discover_conditions(&data_root).unwrap();
    assert_eq!(conditions.len(), 1);
    assert_eq!(conditions[0].title, "Exp1/GDNF 15min");
}

#[test]
fn discovery_fails_without_quantification_tables() {
    let dir = tempfile::tempdir().unwrap();
    let data_root = dir.path().join("Data");
    fs::create_dir_all(data_root.join("Control/Cropped cells")).unwrap();

    assert!(matches!(
        discover_conditions(&data_root),
        Err(Error::NoConditions(_))
    ));
}

#[test]
fn extraction_sorts_roi_ids_numerically() {
    let dir = tempfile::tempdir().unwrap();
    let data_root = dir.path().join("Data");
    write_results(&data_root, "Control", FULL_TABLE);

    let conditions = discover_conditions(&data_root).unwrap();
    let records = extract_condition(&conditions[0], VariantSelection::Both).unwrap();

    let order: Vec<(String, u32)> = records
        .iter()
        .map(|r| (r.subtitle.clone(), r.roi_id))
        .collect();
    // "9" sorts before "10" within the cleaned subtitle.
    assert_eq!(
        order,
        vec![
            ("Row_01_05".to_string(), 9),
            ("Row_01_05".to_string(), 10),
            ("Row_06_10".to_string(), 1),
        ]
    );
}

#[test]
fn extraction_derives_image_paths() {
    let dir = tempfile::tempdir().unwrap();
    let data_root = dir.path().join("Data");
    write_results(&data_root, "Control", FULL_TABLE);

    let conditions = discover_conditions(&data_root).unwrap();
    let records = extract_condition(&conditions[0], VariantSelection::Both).unwrap();
    let first = &records[0];

    let base = data_root.join("Control").join("Cropped cells");
    assert_eq!(
        first.primary_image,
        base.join("Fluorescence/Row_01_05/9_2.jpg")
    );
    assert_eq!(
        first.detection(Variant::Thresholding).unwrap().mask_image,
        base.join("T_Particles/Row_01_05/9_1.jpg")
    );
    assert_eq!(
        first.detection(Variant::FindMaxima).unwrap().mask_image,
        base.join("FM_Particles/Row_01_05/9_1.jpg")
    );
    assert_eq!(first.detection(Variant::Thresholding).unwrap().particle_count, 3);
    assert_eq!(first.detection(Variant::FindMaxima).unwrap().particle_count, 4);
}

#[test]
fn inactive_variant_leaves_detection_absent() {
    let dir = tempfile::tempdir().unwrap();
    let data_root = dir.path().join("Data");
    write_results(&data_root, "Control", FULL_TABLE);

    let conditions = discover_conditions(&data_root).unwrap();
    let records = extract_condition(&conditions[0], VariantSelection::ThresholdingOnly).unwrap();
    for record in &records {
        assert!(record.detection(Variant::Thresholding).is_some());
        assert!(record.detection(Variant::FindMaxima).is_none());
    }
}

#[test]
fn whole_valued_float_counts_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let data_root = dir.path().join("Data");
    write_results(&data_root, "Control", FULL_TABLE);

    let conditions = discover_conditions(&data_root).unwrap();
    let records = extract_condition(&conditions[0], VariantSelection::ThresholdingOnly).unwrap();
    let row_06 = records.iter().find(|r| r.subtitle == "Row_06_10").unwrap();
    assert_eq!(row_06.detection(Variant::Thresholding).unwrap().particle_count, 7);
}

#[test]
fn bad_roi_identifier_is_a_hard_error() {
    let dir = tempfile::tempdir().unwrap();
    let data_root = dir.path().join("Data");
    write_results(
        &data_root,
        "Control",
        "Image used,Cell quantified,Particle count threshold,Particle count maxima\n\
         MAX_Row_01_05.tif,cell_a.roi,3,4\n",
    );

    let conditions = discover_conditions(&data_root).unwrap();
    let err = extract_condition(&conditions[0], VariantSelection::Both).unwrap_err();
    match err {
        Error::InvalidRoiId {
            condition,
            row,
            value,
        } => {
            assert_eq!(condition, "Control");
            assert_eq!(row, 1);
            assert_eq!(value, "cell_a.roi");
        },
        other => panic!("expected InvalidRoiId, got {:?}", other),
    }
}

#[test]
fn missing_count_column_for_active_variant_is_a_hard_error() {
    let dir = tempfile::tempdir().unwrap();
    let data_root = dir.path().join("Data");
    write_results(
        &data_root,
        "Control",
        "Image used,Cell quantified,Particle count threshold\n\
         MAX_Row_01_05.tif,1_1.roi,3\n",
    );

    let conditions = discover_conditions(&data_root).unwrap();

    // The thresholding column is there, so that pass extracts fine.
    assert!(extract_condition(&conditions[0], VariantSelection::ThresholdingOnly).is_ok());

    let err = extract_condition(&conditions[0], VariantSelection::Both).unwrap_err();
    match err {
        Error::MissingColumn { condition, column } => {
            assert_eq!(condition, "Control");
            assert_eq!(column, "Particle count maxima");
        },
        other => panic!("expected MissingColumn, got {:?}", other),
    }
}

#[test]
fn zero_records_across_all_conditions_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let data_root = dir.path().join("Data");
    write_results(
        &data_root,
        "Control",
        "Image used,Cell quantified,Particle count threshold,Particle count maxima\n",
    );

    let conditions = discover_conditions(&data_root).unwrap();
    assert!(matches!(
        extract_all(&conditions, VariantSelection::Both),
        Err(Error::NoRecords)
    ));
}

#[test]
fn records_concatenate_in_condition_order() {
    let dir = tempfile::tempdir().unwrap();
    let data_root = dir.path().join("Data");
    write_results(&data_root, "B_condition", FULL_TABLE);
    write_results(&data_root, "A_condition", FULL_TABLE);

    let conditions = discover_conditions(&data_root).unwrap();
    let records = extract_all(&conditions, VariantSelection::Both).unwrap();
    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(records.len(), 6);
    assert!(titles[..3].iter().all(|t| *t == "A_condition"));
    assert!(titles[3..].iter().all(|t| *t == "B_condition"));
}
