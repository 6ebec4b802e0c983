use std::path::Path;

use log::{error, info};

use crate::external::resolver::Resolver;
use crate::sheets::ledger::LEDGER_SHEET;
use crate::sheets::workbook::Workbook;
use crate::utils::text::sanitize_component;
use crate::{Result, SuiteError};

/// URL cell values treated as placeholders rather than real URLs.
const URL_PLACEHOLDER: &str = "---";

/// Re-resolve every URL in the past-downloads ledger and fill the Title and
/// Uploader columns in place. Returns the number of rows updated.
pub fn run(workbook_path: &Path, resolver: &dyn Resolver) -> Result<usize> {
    let workbook = Workbook::open(workbook_path)?;
    if !workbook.has_sheet(LEDGER_SHEET) {
        return Err(SuiteError::Config(format!(
            "sheet '{}' not found in {}",
            LEDGER_SHEET,
            workbook_path.display()
        )));
    }

    let mut sheet = workbook.read_sheet(LEDGER_SHEET)?;
    let url_col = sheet.column_index("URL").ok_or_else(|| {
        SuiteError::Config(format!("sheet '{LEDGER_SHEET}' has no URL column"))
    })?;
    let title_col = sheet.ensure_column("Title");
    let uploader_col = sheet.ensure_column("Uploader");

    let mut updated = 0;
    for row in 0..sheet.len() {
        let Some(url) = sheet.value(row, url_col).map(str::to_string) else {
            info!("Skipping empty URL at row {}", row);
            continue;
        };
        if url == URL_PLACEHOLDER {
            info!("Skipping placeholder URL at row {}", row);
            continue;
        }

        match resolver.resolve(&url) {
            Ok(resolved) => {
                let title = sanitize_component(&resolved.title);
                let uploader = sanitize_component(&resolved.uploader);
                info!("Processed row {}: {} by {}", row, title, uploader);
                sheet.set_value(row, title_col, title);
                sheet.set_value(row, uploader_col, uploader);
                updated += 1;
            }
            Err(e) => error!("Error processing row {} ({}): {}", row, url, e),
        }
    }

    workbook.write_sheet(LEDGER_SHEET, &sheet)?;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::resolver::ResolvedTrack;
    use crate::sheets::workbook::Sheet;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::tempdir;

    struct FakeResolver {
        tracks: HashMap<String, ResolvedTrack>,
    }

    impl Resolver for FakeResolver {
        fn resolve(&self, url: &str) -> crate::Result<ResolvedTrack> {
            self.tracks
                .get(url)
                .cloned()
                .ok_or_else(|| SuiteError::Resolver(format!("unknown url: {url}")))
        }

        fn search(&self, _artist: &str, _title: &str) -> crate::Result<Option<String>> {
            Ok(None)
        }
    }

    #[test]
    fn fills_title_and_uploader_columns() {
        let dir = tempdir().unwrap();
        let wb = Workbook::create(dir.path()).unwrap();
        let mut sheet = Sheet::new(vec!["URL".to_string()]);
        sheet.push_row(vec!["https://example.com/1".to_string()]);
        sheet.push_row(vec![URL_PLACEHOLDER.to_string()]);
        sheet.push_row(vec!["https://example.com/broken".to_string()]);
        wb.write_sheet(LEDGER_SHEET, &sheet).unwrap();

        let resolver = FakeResolver {
            tracks: HashMap::from([(
                "https://example.com/1".to_string(),
                ResolvedTrack {
                    title: "Track/One".to_string(),
                    uploader: "Uploader".to_string(),
                    track: None,
                    artist: None,
                },
            )]),
        };

        let updated = run(dir.path(), &resolver).unwrap();
        assert_eq!(updated, 1);

        let saved = wb.read_sheet(LEDGER_SHEET).unwrap();
        let title_col = saved.column_index("Title").unwrap();
        let uploader_col = saved.column_index("Uploader").unwrap();
        // Slash in the title is sanitized on the way in.
        assert_eq!(saved.value(0, title_col), Some("Track-One"));
        assert_eq!(saved.value(0, uploader_col), Some("Uploader"));
        assert_eq!(saved.value(1, title_col), None);
        assert_eq!(saved.value(2, title_col), None);
    }

    #[test]
    fn missing_ledger_sheet_is_fatal() {
        let dir = tempdir().unwrap();
        Workbook::create(dir.path()).unwrap();
        let resolver = FakeResolver {
            tracks: HashMap::new(),
        };
        assert!(matches!(
            run(dir.path(), &resolver),
            Err(SuiteError::Config(_))
        ));
    }
}
