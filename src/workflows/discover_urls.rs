use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::external::resolver::Resolver;
use crate::sheets::workbook::{Sheet, Workbook};
use crate::{Result, SuiteError};

/// Column-name aliases, checked in order.
pub const ARTIST_ALIASES: [&str; 3] = ["ZARTISTNAME", "artist", "Artist"];
pub const TITLE_ALIASES: [&str; 3] = ["ZTITLE", "title", "Title"];

pub const FOUND_SHEET: &str = "Found";
pub const NOT_FOUND_SHEET: &str = "Not found";

#[derive(Debug)]
pub struct DiscoveryReport {
    pub found: usize,
    pub not_found: usize,
    pub output: PathBuf,
}

/// Search a URL for every (artist, title) row of a sheet and write the
/// partitioned results to a sibling `<workbook>_with_urls` workbook. Rows
/// missing either artist or title are left out of both output sheets.
pub fn run(
    workbook_path: &Path,
    sheet_name: &str,
    resolver: &dyn Resolver,
) -> Result<DiscoveryReport> {
    let workbook = Workbook::open(workbook_path)?;
    if !workbook.has_sheet(sheet_name) {
        return Err(SuiteError::Config(format!(
            "sheet '{}' not found in {}",
            sheet_name,
            workbook_path.display()
        )));
    }
    let sheet = workbook.read_sheet(sheet_name)?;

    let artist_col = sheet.resolve_column(&ARTIST_ALIASES).ok_or_else(|| {
        SuiteError::Config(format!(
            "no artist column found (tried {})",
            ARTIST_ALIASES.join(", ")
        ))
    })?;
    let title_col = sheet.resolve_column(&TITLE_ALIASES).ok_or_else(|| {
        SuiteError::Config(format!(
            "no title column found (tried {})",
            TITLE_ALIASES.join(", ")
        ))
    })?;

    let mut found = Sheet::new(sheet.columns.clone());
    let url_col = found.ensure_column("URL");
    let mut not_found = Sheet::new(sheet.columns.clone());

    for row in 0..sheet.len() {
        let (Some(artist), Some(title)) = (sheet.value(row, artist_col), sheet.value(row, title_col))
        else {
            continue;
        };

        info!("Searching for: {} - {}", artist, title);
        let url = match resolver.search(artist, title) {
            Ok(url) => url,
            Err(e) => {
                warn!("Search failed for {} - {}: {}", artist, title, e);
                None
            }
        };

        let cells = sheet.rows[row].clone();
        match url {
            Some(url) => {
                found.push_row(cells);
                let last = found.len() - 1;
                found.set_value(last, url_col, url);
            }
            None => not_found.push_row(cells),
        }
    }

    let output = output_path(workbook_path);
    let out_workbook = Workbook::create(&output)?;
    out_workbook.write_sheet(FOUND_SHEET, &found)?;
    out_workbook.write_sheet(NOT_FOUND_SHEET, &not_found)?;

    Ok(DiscoveryReport {
        found: found.len(),
        not_found: not_found.len(),
        output,
    })
}

fn output_path(workbook_path: &Path) -> PathBuf {
    let name = workbook_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workbook".to_string());
    workbook_path.with_file_name(format!("{name}_with_urls"))
}
