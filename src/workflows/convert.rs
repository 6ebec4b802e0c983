use std::path::{Path, PathBuf};

use log::{error, info};
use walkdir::WalkDir;

use crate::external::converter::AudioConverter;
use crate::{Result, SuiteError};

/// Lossy or oversized formats worth converting to ALAC, lowercase.
pub const CONVERTIBLE_EXTENSIONS: [&str; 3] = ["opus", "wav", "flac"];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ConversionReport {
    pub converted: usize,
    pub skipped_existing: usize,
    pub failed: usize,
}

/// Convert a file, or every convertible file under a directory, to ALAC
/// `.m4a` in `output_folder`. Existing outputs are skipped; a failed
/// conversion is logged and the walk continues.
pub fn run(
    input: &Path,
    output_folder: &Path,
    converter: &dyn AudioConverter,
) -> Result<ConversionReport> {
    if !input.exists() {
        return Err(SuiteError::Config(format!(
            "input path does not exist: {}",
            input.display()
        )));
    }

    if !output_folder.exists() {
        std::fs::create_dir_all(output_folder)?;
        info!("Created output directory: {}", output_folder.display());
    }

    let mut report = ConversionReport::default();

    if input.is_file() {
        if !is_convertible(input) {
            return Err(SuiteError::Config(format!(
                "unsupported file format: {}",
                input.display()
            )));
        }
        convert_one(input, output_folder, converter, &mut report);
        return Ok(report);
    }

    for entry in WalkDir::new(input)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_convertible(e.path()))
    {
        convert_one(entry.path(), output_folder, converter, &mut report);
    }

    Ok(report)
}

fn convert_one(
    input: &Path,
    output_folder: &Path,
    converter: &dyn AudioConverter,
    report: &mut ConversionReport,
) {
    let output = output_path(input, output_folder);
    if output.exists() {
        info!("File {} already exists, skipping", output.display());
        report.skipped_existing += 1;
        return;
    }

    match converter.convert_to_alac(input, &output) {
        Ok(()) => report.converted += 1,
        Err(e) => {
            error!("Error converting {}: {}", input.display(), e);
            report.failed += 1;
        }
    }
}

fn output_path(input: &Path, output_folder: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output_folder.join(format!("{stem}.m4a"))
}

fn is_convertible(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| CONVERTIBLE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::tempdir;

    struct FakeConverter {
        converted: RefCell<Vec<PathBuf>>,
    }

    impl FakeConverter {
        fn new() -> Self {
            Self {
                converted: RefCell::new(Vec::new()),
            }
        }
    }

    impl AudioConverter for FakeConverter {
        fn convert_to_alac(&self, input: &Path, output: &Path) -> crate::Result<()> {
            fs::write(output, b"alac").unwrap();
            self.converted.borrow_mut().push(input.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn missing_input_is_fatal() {
        let out = tempdir().unwrap();
        let converter = FakeConverter::new();
        assert!(run(Path::new("/no/such/input"), out.path(), &converter).is_err());
    }

    #[test]
    fn converts_directory_tree_and_names_outputs_by_stem() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::create_dir(src.path().join("sub")).unwrap();
        fs::write(src.path().join("a.flac"), b"x").unwrap();
        fs::write(src.path().join("sub/b.OPUS"), b"x").unwrap();
        fs::write(src.path().join("c.mp3"), b"x").unwrap();

        let converter = FakeConverter::new();
        let report = run(src.path(), out.path(), &converter).unwrap();

        assert_eq!(report.converted, 2);
        assert!(out.path().join("a.m4a").exists());
        assert!(out.path().join("b.m4a").exists());
        assert!(!out.path().join("c.m4a").exists());
    }

    #[test]
    fn existing_outputs_are_skipped() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::write(src.path().join("a.flac"), b"x").unwrap();
        fs::write(out.path().join("a.m4a"), b"already here").unwrap();

        let converter = FakeConverter::new();
        let report = run(src.path(), out.path(), &converter).unwrap();

        assert_eq!(report.skipped_existing, 1);
        assert_eq!(report.converted, 0);
        assert!(converter.converted.borrow().is_empty());
    }

    #[test]
    fn single_file_with_wrong_extension_is_rejected() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        let file = src.path().join("a.mp3");
        fs::write(&file, b"x").unwrap();

        let converter = FakeConverter::new();
        assert!(run(&file, out.path(), &converter).is_err());
    }

    #[test]
    fn single_file_is_converted() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        let file = src.path().join("a.wav");
        fs::write(&file, b"x").unwrap();

        let converter = FakeConverter::new();
        let report = run(&file, out.path(), &converter).unwrap();
        assert_eq!(report.converted, 1);
        assert!(out.path().join("a.m4a").exists());
    }
}
