use std::path::Path;

use lofty::config::WriteOptions;
use lofty::prelude::{ItemKey, TaggedFileExt};
use lofty::tag::TagExt;
use log::info;

use crate::utils::text::strip_artist_prefix;
use crate::{Result, SuiteError};

/// Outcome of a title-cleanup edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleCleanup {
    /// Tag rewritten; holds the new title.
    Updated(String),
    /// Title had no artist prefix to strip.
    Unchanged,
}

/// Remove the "Artist - " prefix from the embedded title tag of one file.
///
/// Tag writing goes through lofty; the symphonia reader used elsewhere is
/// read-only.
pub fn clean_title_tag(path: &Path) -> Result<TitleCleanup> {
    let mut tagged_file = lofty::read_from_path(path)
        .map_err(|e| SuiteError::Metadata(format!("{}: {}", path.display(), e)))?;

    let tag = tagged_file
        .primary_tag_mut()
        .ok_or_else(|| SuiteError::Metadata(format!("{}: no tag present", path.display())))?;

    let current = tag
        .get_string(&ItemKey::TrackTitle)
        .map(str::to_string)
        .unwrap_or_default();

    let Some(new_title) = strip_artist_prefix(&current) else {
        return Ok(TitleCleanup::Unchanged);
    };

    tag.insert_text(ItemKey::TrackTitle, new_title.clone());
    tag.save_to_path(path, WriteOptions::default())
        .map_err(|e| SuiteError::Metadata(format!("{}: {}", path.display(), e)))?;

    info!("Title updated to: {}", new_title);
    Ok(TitleCleanup::Updated(new_title))
}
