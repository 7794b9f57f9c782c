//! End-to-end tests: data tree in, PPTX decks out.

use pla_deck::{extract, paginate, DeckBuilder, DeckConfig, VariantSelection};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Fake JPEG payload; image bytes are embedded opaquely, never decoded.
const JPEG_STUB: &[u8] = b"\xFF\xD8\xFF\xE0stub-jpeg-payload";

/// Build a complete condition: results table plus every referenced crop.
fn build_condition(data_root: &Path, condition: &str, subtitle: &str, ids: &[u32]) {
    let root = data_root.join(condition);
    let quant = root.join("Quantification");
    fs::create_dir_all(&quant).unwrap();

    let mut csv = String::from(
        "Image used,Cell quantified,Particle count threshold,Particle count maxima\n",
    );
    for id in ids {
        csv.push_str(&format!("MAX_{}.tif,{}_1.roi,{},{}\n", subtitle, id, id + 2, id + 3));
    }
    fs::write(quant.join("Results.csv"), csv).unwrap();

    for folder in ["Fluorescence", "T_Particles", "FM_Particles"] {
        let dir = root.join("Cropped cells").join(folder).join(subtitle);
        fs::create_dir_all(&dir).unwrap();
        let suffix = if folder == "Fluorescence" { 2 } else { 1 };
        for id in ids {
            fs::write(dir.join(format!("{}_{}.jpg", id, suffix)), JPEG_STUB).unwrap();
        }
    }
}

fn read_zip_part(path: &Path, part: &str) -> String {
    let file = fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut content = String::new();
    archive
        .by_name(part)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

#[test]
fn both_variant_decks_are_built_with_equal_slide_counts() {
    let dir = tempfile::tempdir().unwrap();
    let data_root = dir.path().join("Data");
    build_condition(&data_root, "Control", "Row_01_05", &[1, 2, 3]);
    build_condition(&data_root, "GDNF 15min", "Row_06_10", &[1, 2]);

    let config = DeckConfig::new(&data_root)
        .with_output_dir(dir.path().join("out"))
        .with_selection(VariantSelection::Both);

    let conditions = extract::discover_conditions(&config.data_root).unwrap();
    let records = extract::extract_all(&conditions, config.selection).unwrap();
    let pages = paginate::paginate(records).unwrap();
    assert_eq!(pages.len(), 2);

    let saved = DeckBuilder::new(&config).build(&pages).unwrap();
    assert_eq!(saved.len(), 2);
    assert!(saved[0].ends_with("Summary_results_T.pptx"));
    assert!(saved[1].ends_with("Summary_results_FM.pptx"));

    // Grouping is variant-agnostic, so the passes agree on slide count.
    let app_t = read_zip_part(&saved[0], "docProps/app.xml");
    let app_fm = read_zip_part(&saved[1], "docProps/app.xml");
    assert!(app_t.contains("<Slides>2</Slides>"));
    assert!(app_fm.contains("<Slides>2</Slides>"));
}

#[test]
fn single_variant_selection_builds_one_deck() {
    let dir = tempfile::tempdir().unwrap();
    let data_root = dir.path().join("Data");
    build_condition(&data_root, "Control", "Row_01_05", &[1]);

    // Drop the maxima column entirely; a Find Maxima pass would fail.
    let csv = "Image used,Cell quantified,Particle count threshold\n\
               MAX_Row_01_05.tif,1_1.roi,3\n";
    fs::write(
        data_root.join("Control/Quantification/Results.csv"),
        csv,
    )
    .unwrap();

    let config = DeckConfig::new(&data_root)
        .with_output_dir(dir.path().join("out"))
        .with_selection(VariantSelection::ThresholdingOnly);

    let conditions = extract::discover_conditions(&config.data_root).unwrap();
    let records = extract::extract_all(&conditions, config.selection).unwrap();
    let pages = paginate::paginate(records).unwrap();
    let saved = DeckBuilder::new(&config).build(&pages).unwrap();

    assert_eq!(saved.len(), 1);
    assert!(saved[0].is_file());
    assert!(!dir.path().join("out/Summary_results_FM.pptx").exists());
}

#[test]
fn missing_mask_image_aborts_pass_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let data_root = dir.path().join("Data");
    build_condition(&data_root, "Control", "Row_01_05", &[1, 2]);

    // Remove one mask crop the thresholding pass needs.
    fs::remove_file(data_root.join("Control/Cropped cells/T_Particles/Row_01_05/2_1.jpg")).unwrap();

    let out_dir = dir.path().join("out");
    let config = DeckConfig::new(&data_root)
        .with_output_dir(&out_dir)
        .with_selection(VariantSelection::ThresholdingOnly);

    let conditions = extract::discover_conditions(&config.data_root).unwrap();
    let records = extract::extract_all(&conditions, config.selection).unwrap();
    let pages = paginate::paginate(records).unwrap();

    let err = DeckBuilder::new(&config).build(&pages).unwrap_err();
    let msg = format!("{}", err);
    assert!(msg.contains("Control"), "error should name the condition: {}", msg);
    assert!(msg.contains("Row_01_05"), "error should name the subtitle: {}", msg);
    assert!(msg.contains("2_1.jpg"), "error should name the missing file: {}", msg);

    // No partial or complete deck is left behind.
    assert!(!out_dir.join("Summary_results_T.pptx").exists());
    let leftovers: Vec<_> = fs::read_dir(&out_dir).unwrap().collect();
    assert!(leftovers.is_empty(), "unexpected files: {:?}", leftovers);
}
