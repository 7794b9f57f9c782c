//! Unpacking of `Data.zip` input archives.

use crate::error::{Error, Result};
use std::fs::File;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Extract a `Data.zip` archive into `dest` and return the extracted data
/// root (`dest/Data`).
///
/// The archive is expected to contain a single top-level `Data` directory,
/// the layout produced by compressing the quantification output folder.
pub fn unpack(archive_path: &Path, dest: &Path) -> Result<PathBuf> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;
    log::info!(
        "Extracting {} ({} entries) to {}",
        archive_path.display(),
        archive.len(),
        dest.display()
    );
    archive.extract(dest)?;

    let data_root = dest.join("Data");
    if !data_root.is_dir() {
        return Err(Error::NoConditions(data_root));
    }
    Ok(data_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    #[test]
    fn test_unpack_finds_data_root() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("Data.zip");

        let file = File::create(&zip_path).unwrap();
        let mut writer = ZipWriter::new(file);
        writer
            .start_file("Data/Control/Quantification/Results.csv", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"Image used,Cell quantified\n").unwrap();
        writer.finish().unwrap();

        let data_root = unpack(&zip_path, dir.path()).unwrap();
        assert_eq!(data_root, dir.path().join("Data"));
        assert!(data_root.join("Control/Quantification/Results.csv").is_file());
    }

    #[test]
    fn test_unpack_without_data_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("Other.zip");

        let file = File::create(&zip_path).unwrap();
        let mut writer = ZipWriter::new(file);
        writer
            .start_file("Other/readme.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"nothing here").unwrap();
        writer.finish().unwrap();

        assert!(matches!(
            unpack(&zip_path, dir.path()),
            Err(Error::NoConditions(_))
        ));
    }
}
