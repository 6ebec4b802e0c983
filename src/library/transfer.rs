use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::{debug, info};

use crate::{Result, SuiteError};

/// How a file travels from the source tree into the destination roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransferMode {
    /// Relocate into the first destination root only.
    Move,
    /// Duplicate into every destination root; source stays put.
    Copy,
    /// Relocate into the first root, then copy that file into each
    /// subsequent root.
    Both,
}

/// Performs the filesystem side of a migration: per-file move/copy fan-out
/// across the configured destination roots, creating genre directories on
/// demand.
pub struct TransferEngine {
    roots: Vec<PathBuf>,
    mode: TransferMode,
}

impl TransferEngine {
    pub fn new(roots: Vec<PathBuf>, mode: TransferMode) -> Result<Self> {
        if roots.is_empty() {
            return Err(SuiteError::Config(
                "at least one destination root is required".to_string(),
            ));
        }
        Ok(Self { roots, mode })
    }

    pub fn mode(&self) -> TransferMode {
        self.mode
    }

    /// Move and/or copy one file into `genre_folder` under the destination
    /// roots according to the configured mode.
    pub fn transfer(&self, file: &Path, genre_folder: &str) -> Result<()> {
        let file_name = file
            .file_name()
            .ok_or_else(|| SuiteError::Metadata(format!("invalid file path: {}", file.display())))?;

        match self.mode {
            TransferMode::Move => {
                let dest = self.dest_path(&self.roots[0], genre_folder, file_name)?;
                move_file(file, &dest)?;
                info!("Moved {:?} to {}", file_name, dest.display());
            }
            TransferMode::Copy => {
                for root in &self.roots {
                    let dest = self.dest_path(root, genre_folder, file_name)?;
                    fs::copy(file, &dest)?;
                    info!("Copied {:?} to {}", file_name, dest.display());
                }
            }
            TransferMode::Both => {
                let primary = self.dest_path(&self.roots[0], genre_folder, file_name)?;
                move_file(file, &primary)?;
                info!("Moved {:?} to {}", file_name, primary.display());
                // Subsequent copies are taken from the already-moved file,
                // always from the first root, never chained.
                for root in &self.roots[1..] {
                    let dest = self.dest_path(root, genre_folder, file_name)?;
                    fs::copy(&primary, &dest)?;
                    info!("Copied {:?} to {}", file_name, dest.display());
                }
            }
        }

        Ok(())
    }

    fn dest_path(
        &self,
        root: &Path,
        genre_folder: &str,
        file_name: &std::ffi::OsStr,
    ) -> Result<PathBuf> {
        let dir = root.join(genre_folder);
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            debug!("Created directory: {}", dir.display());
        }
        Ok(dir.join(file_name))
    }
}

/// Relocate a file. `rename` cannot cross filesystems (destination roots are
/// typically separate mounts, a library drive and a USB stick), so on any
/// rename failure retry as copy then delete.
fn move_file(src: &Path, dest: &Path) -> io::Result<()> {
    match fs::rename(src, dest) {
        Ok(()) => Ok(()),
        Err(_) => copy_and_remove(src, dest),
    }
}

fn copy_and_remove(src: &Path, dest: &Path) -> io::Result<()> {
    fs::copy(src, dest)?;
    fs::remove_file(src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::write(path, b"audio").unwrap();
    }

    #[test]
    fn rejects_empty_destination_list() {
        assert!(TransferEngine::new(Vec::new(), TransferMode::Move).is_err());
    }

    #[test]
    fn move_relocates_into_first_root_only() {
        let src = tempdir().unwrap();
        let d1 = tempdir().unwrap();
        let d2 = tempdir().unwrap();
        let file = src.path().join("a.mp3");
        touch(&file);

        let engine = TransferEngine::new(
            vec![d1.path().to_path_buf(), d2.path().to_path_buf()],
            TransferMode::Move,
        )
        .unwrap();
        engine.transfer(&file, "House").unwrap();

        assert!(!file.exists());
        assert!(d1.path().join("House/a.mp3").exists());
        assert!(!d2.path().join("House/a.mp3").exists());
    }

    #[test]
    fn copy_duplicates_into_every_root_and_keeps_source() {
        let src = tempdir().unwrap();
        let d1 = tempdir().unwrap();
        let d2 = tempdir().unwrap();
        let file = src.path().join("a.mp3");
        touch(&file);

        let engine = TransferEngine::new(
            vec![d1.path().to_path_buf(), d2.path().to_path_buf()],
            TransferMode::Copy,
        )
        .unwrap();
        engine.transfer(&file, "Techno").unwrap();

        assert!(file.exists());
        assert!(d1.path().join("Techno/a.mp3").exists());
        assert!(d2.path().join("Techno/a.mp3").exists());
    }

    #[test]
    fn both_moves_then_copies_to_subsequent_roots() {
        let src = tempdir().unwrap();
        let d1 = tempdir().unwrap();
        let d2 = tempdir().unwrap();
        let file = src.path().join("a.mp3");
        touch(&file);

        let engine = TransferEngine::new(
            vec![d1.path().to_path_buf(), d2.path().to_path_buf()],
            TransferMode::Both,
        )
        .unwrap();
        engine.transfer(&file, "House").unwrap();

        assert!(!file.exists());
        assert!(d1.path().join("House/a.mp3").exists());
        assert!(d2.path().join("House/a.mp3").exists());
    }

    #[test]
    fn both_with_single_root_degenerates_to_move() {
        let src = tempdir().unwrap();
        let d1 = tempdir().unwrap();
        let file = src.path().join("a.flac");
        touch(&file);

        let engine =
            TransferEngine::new(vec![d1.path().to_path_buf()], TransferMode::Both).unwrap();
        engine.transfer(&file, "Electronic").unwrap();

        assert!(!file.exists());
        assert!(d1.path().join("Electronic/a.flac").exists());
    }

    #[test]
    fn move_fallback_copies_then_deletes_source() {
        // End state of the rename fallback matches a plain rename: source
        // gone, destination present with the same contents.
        let src = tempdir().unwrap();
        let dest_dir = tempdir().unwrap();
        let file = src.path().join("a.mp3");
        touch(&file);
        let dest = dest_dir.path().join("a.mp3");

        copy_and_remove(&file, &dest).unwrap();

        assert!(!file.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"audio");
    }

    #[test]
    fn nested_genre_folders_are_created() {
        let src = tempdir().unwrap();
        let d1 = tempdir().unwrap();
        let file = src.path().join("a.wav");
        touch(&file);

        let engine =
            TransferEngine::new(vec![d1.path().to_path_buf()], TransferMode::Move).unwrap();
        engine.transfer(&file, "House/Tech House").unwrap();

        assert!(d1.path().join("House/Tech House/a.wav").exists());
    }
}
