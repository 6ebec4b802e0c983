use std::path::{Path, PathBuf};

use log::{error, info};

use crate::external::downloader::{Downloader, TrackTags};
use crate::external::resolver::{ResolvedTrack, Resolver};
use crate::sheets::ledger::{append_entry, LedgerEntry};
use crate::sheets::workbook::Workbook;
use crate::utils::text::{sanitize_component, split_artist_title};
use crate::{Result, SuiteError};

/// Sheet names tried, in order, for the download list.
pub const SHEET_CANDIDATES: [&str; 4] = ["music-download-list", "toDownload", "Found", "found"];

/// Extension placeholder understood by the downloader's output template.
const EXT_PLACEHOLDER: &str = "%(ext)s";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: usize,
    pub skipped_existing: usize,
    pub failed: usize,
}

/// Walk the download-list sheet row by row: resolve metadata, derive the
/// target filename, download anything not already on disk, and record each
/// success in the past-downloads ledger. Row-level failures are logged and
/// never abort the run.
pub fn run(
    workbook_path: &Path,
    output_dir: Option<&Path>,
    resolver: &dyn Resolver,
    downloader: &dyn Downloader,
) -> Result<DownloadReport> {
    let workbook = Workbook::open(workbook_path)?;
    let sheet_name = workbook
        .first_existing_sheet(&SHEET_CANDIDATES)
        .ok_or_else(|| {
            SuiteError::Config(format!(
                "no download-list sheet found in {} (tried {})",
                workbook_path.display(),
                SHEET_CANDIDATES.join(", ")
            ))
        })?;
    let sheet = workbook.read_sheet(sheet_name)?;
    info!("Reading {} rows from sheet '{}'", sheet.len(), sheet_name);

    if let Some(dir) = output_dir {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
            info!("Created output directory: {}", dir.display());
        }
    }

    let mut report = DownloadReport::default();

    let Some(url_col) = sheet.column_index("URL") else {
        error!("Sheet '{}' has no URL column", sheet_name);
        report.failed = sheet.len();
        return Ok(report);
    };

    for row in 0..sheet.len() {
        let Some(url) = sheet.value(row, url_col) else {
            error!("Missing URL in row {}", row);
            report.failed += 1;
            continue;
        };

        let resolved = match resolver.resolve(url) {
            Ok(resolved) => resolved,
            Err(e) => {
                error!("Error resolving row {} ({}): {}", row, url, e);
                report.failed += 1;
                continue;
            }
        };

        let (artist, title) = derive_artist_title(&resolved);
        let file_name = format!("{artist} - {title}.m4a");
        let target = match output_dir {
            Some(dir) => dir.join(&file_name),
            None => PathBuf::from(&file_name),
        };

        if target.exists() {
            info!("Already downloaded, skipping: {}", target.display());
            report.skipped_existing += 1;
            continue;
        }

        let template = target.with_file_name(format!("{artist} - {title}.{EXT_PLACEHOLDER}"));
        let tags = TrackTags {
            title: Some(title.clone()),
            artist: Some(artist.clone()),
        };

        info!("Downloading row {}: {}", row, url);
        if let Err(e) = downloader.download(&template, url, Some(&tags)) {
            error!("Error downloading row {} ({}): {}", row, url, e);
            report.failed += 1;
            continue;
        }

        let entry = LedgerEntry {
            url: url.to_string(),
            title,
            uploader: resolved.uploader.clone(),
        };
        if let Err(e) = append_entry(&workbook, &entry) {
            error!("Error recording row {} in ledger: {}", row, e);
        }
        report.downloaded += 1;
    }

    Ok(report)
}

/// Pick the (artist, title) pair for the destination filename: an explicit
/// "Artist - Title" in the resolved title wins, then the structured track
/// and artist fields, then the uploader as a stand-in artist.
fn derive_artist_title(resolved: &ResolvedTrack) -> (String, String) {
    if let Some((artist, title)) = split_artist_title(&resolved.title) {
        return (sanitize_component(&artist), sanitize_component(&title));
    }

    if let (Some(track), Some(artist)) = (&resolved.track, &resolved.artist) {
        return (sanitize_component(artist), sanitize_component(track));
    }

    (
        sanitize_component(&resolved.uploader),
        sanitize_component(&resolved.title),
    )
}
