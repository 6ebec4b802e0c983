use std::path::Path;

use log::debug;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::{MetadataOptions, StandardTagKey};
use symphonia::core::probe::Hint;

/// Read-only view of the tags the suite cares about. Implementations fail
/// soft: an unreadable or untagged file yields `None`, never an error.
pub trait TagReader {
    fn genre(&self, path: &Path) -> Option<String>;
    fn title(&self, path: &Path) -> Option<String>;
}

/// Symphonia-backed tag reader.
pub struct SymphoniaTagReader;

impl SymphoniaTagReader {
    pub fn new() -> Self {
        Self
    }

    fn read_tag(&self, path: &Path, key: StandardTagKey) -> Option<String> {
        let file = match std::fs::File::open(path) {
            Ok(file) => file,
            Err(e) => {
                debug!("Cannot open {}: {}", path.display(), e);
                return None;
            }
        };

        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(extension);
        }

        let probed = match symphonia::default::get_probe().format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        ) {
            Ok(probed) => probed,
            Err(e) => {
                debug!("Cannot probe {}: {}", path.display(), e);
                return None;
            }
        };

        let mut format = probed.format;
        let metadata = format.metadata();
        let current = metadata.current()?;
        current
            .tags()
            .iter()
            .find(|tag| tag.std_key == Some(key))
            .map(|tag| tag.value.to_string())
    }
}

impl Default for SymphoniaTagReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TagReader for SymphoniaTagReader {
    fn genre(&self, path: &Path) -> Option<String> {
        let genre = self.read_tag(path, StandardTagKey::Genre);
        if let Some(ref g) = genre {
            debug!("Genre found for {}: {}", path.display(), g);
        }
        genre.filter(|g| !g.trim().is_empty())
    }

    fn title(&self, path: &Path) -> Option<String> {
        self.read_tag(path, StandardTagKey::TrackTitle)
            .filter(|t| !t.trim().is_empty())
    }
}
