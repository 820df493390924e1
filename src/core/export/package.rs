//! Package assembly and scratch-resource ownership
//!
//! [`ScratchArea`] owns both the scratch directory the artifacts are
//! rendered into and the scratch location the archive is written to. Both
//! are temporary directories released on drop, so cleanup happens on every
//! exit path, success or failure.

use crate::domain::Result;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Scratch resources for one export run
pub struct ScratchArea {
    work: TempDir,
    out: TempDir,
}

impl ScratchArea {
    /// Acquires a fresh scratch directory pair
    pub fn new() -> Result<Self> {
        Ok(Self {
            work: TempDir::new()?,
            out: TempDir::new()?,
        })
    }

    /// Directory the artifact generators render into
    pub fn work_dir(&self) -> &Path {
        self.work.path()
    }

    /// Compresses the work directory's files into one ZIP archive
    ///
    /// Entries are added in name order so the archive layout is stable.
    /// The archive lives inside the scratch area and is removed with it;
    /// callers copy or upload it before the [`ScratchArea`] drops.
    pub fn assemble(&self) -> Result<PathBuf> {
        let archive_path = self.out.path().join("package.zip");
        let mut writer = ZipWriter::new(File::create(&archive_path)?);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut entries: Vec<PathBuf> = fs::read_dir(self.work.path())?
            .collect::<io::Result<Vec<_>>>()?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        entries.sort();

        for path in entries {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            writer.start_file(name, options)?;
            io::copy(&mut File::open(&path)?, &mut writer)?;
        }
        writer.finish()?;

        tracing::debug!(archive = %archive_path.display(), "Package assembled");
        Ok(archive_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use zip::ZipArchive;

    #[test]
    fn test_assemble_round_trips_all_files() {
        let scratch = ScratchArea::new().unwrap();
        fs::write(scratch.work_dir().join("widget-CuTop.gbr"), "G04*").unwrap();
        fs::write(scratch.work_dir().join("widget-PTH.drl"), "M48").unwrap();
        fs::write(scratch.work_dir().join("components.json"), "[]").unwrap();

        let archive_path = scratch.assemble().unwrap();
        let mut archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();

        let names: BTreeSet<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        let expected: BTreeSet<String> = [
            "widget-CuTop.gbr".to_string(),
            "widget-PTH.drl".to_string(),
            "components.json".to_string(),
        ]
        .into_iter()
        .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_assemble_preserves_contents() {
        let scratch = ScratchArea::new().unwrap();
        fs::write(scratch.work_dir().join("components.json"), r#"[{"x":1}]"#).unwrap();

        let archive_path = scratch.assemble().unwrap();
        let mut archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        let mut contents = String::new();
        io::Read::read_to_string(
            &mut archive.by_name("components.json").unwrap(),
            &mut contents,
        )
        .unwrap();
        assert_eq!(contents, r#"[{"x":1}]"#);
    }

    #[test]
    fn test_subdirectories_are_not_packaged() {
        let scratch = ScratchArea::new().unwrap();
        fs::write(scratch.work_dir().join("a.gbr"), "G04*").unwrap();
        fs::create_dir(scratch.work_dir().join("nested")).unwrap();

        let archive_path = scratch.assemble().unwrap();
        let archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_scratch_released_on_drop() {
        let scratch = ScratchArea::new().unwrap();
        fs::write(scratch.work_dir().join("a.gbr"), "G04*").unwrap();
        let work_path = scratch.work_dir().to_path_buf();
        let archive_path = scratch.assemble().unwrap();

        assert!(work_path.exists());
        assert!(archive_path.exists());
        drop(scratch);
        assert!(!work_path.exists());
        assert!(!archive_path.exists());
    }
}
