use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{error, warn};
use walkdir::WalkDir;

use crate::audio::tags::TagReader;
use crate::library::genres::GenreMap;
use crate::library::transfer::TransferEngine;
use crate::{Result, SuiteError};

/// Audio extensions eligible for migration, lowercase.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["mp3", "m4a", "flac", "wav", "opus"];

/// Tally key for files whose genre tag could not be read.
pub const NO_GENRE: &str = "(no genre)";

/// Per-run migration report: how many matching files carried each genre tag,
/// and how many matching files were seen in total.
#[derive(Debug, Default)]
pub struct MigrationSummary {
    pub genre_counts: BTreeMap<String, u64>,
    pub total_processed: u64,
}

/// Walks a source tree and files each track into its genre folder across the
/// destination roots.
pub struct Migrator<'a> {
    genres: &'a GenreMap,
    tags: &'a dyn TagReader,
    engine: &'a TransferEngine,
}

impl<'a> Migrator<'a> {
    pub fn new(genres: &'a GenreMap, tags: &'a dyn TagReader, engine: &'a TransferEngine) -> Self {
        Self {
            genres,
            tags,
            engine,
        }
    }

    pub fn migrate(&self, source: &Path) -> Result<MigrationSummary> {
        if !source.exists() {
            return Err(SuiteError::Config(format!(
                "source path does not exist: {}",
                source.display()
            )));
        }
        if !source.is_dir() {
            return Err(SuiteError::Config(format!(
                "source must be a directory: {}",
                source.display()
            )));
        }

        let mut summary = MigrationSummary::default();

        for file in collect_audio_files(source) {
            summary.total_processed += 1;

            let genre = self.tags.genre(&file);
            let key = genre.clone().unwrap_or_else(|| NO_GENRE.to_string());
            *summary.genre_counts.entry(key).or_insert(0) += 1;

            // The tally above records the file whether or not the transfer
            // below succeeds.
            let Some(genre) = genre else {
                warn!("No genre found for {}", file_name(&file));
                continue;
            };

            let folder = self.genres.folder_for(&genre);
            if let Err(e) = self.engine.transfer(&file, folder) {
                error!("Error transferring {}: {}", file_name(&file), e);
            }
        }

        Ok(summary)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn collect_audio_files(source: &Path) -> Vec<PathBuf> {
    WalkDir::new(source)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Error accessing entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_file() && has_supported_extension(e.path()))
        .map(|e| e.into_path())
        .collect()
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
