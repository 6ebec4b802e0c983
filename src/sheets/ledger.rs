use crate::sheets::workbook::{Sheet, Workbook};
use crate::Result;

/// Sheet that records every completed download.
pub const LEDGER_SHEET: &str = "pastDownloads";

const LEDGER_COLUMNS: [&str; 3] = ["URL", "Title", "Uploader"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub url: String,
    pub title: String,
    pub uploader: String,
}

/// The ledger sheet, or an empty one when it does not exist yet.
pub fn read_ledger(workbook: &Workbook) -> Result<Sheet> {
    if workbook.has_sheet(LEDGER_SHEET) {
        workbook.read_sheet(LEDGER_SHEET)
    } else {
        Ok(Sheet::new(
            LEDGER_COLUMNS.iter().map(|c| c.to_string()).collect(),
        ))
    }
}

/// Append one entry. The underlying format has no incremental append, so
/// this reads the full sheet, concatenates, and rewrites it.
pub fn append_entry(workbook: &Workbook, entry: &LedgerEntry) -> Result<()> {
    let mut ledger = read_ledger(workbook)?;
    ledger.push_row(vec![
        entry.url.clone(),
        entry.title.clone(),
        entry.uploader.clone(),
    ]);
    workbook.write_sheet(LEDGER_SHEET, &ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn entry(n: usize) -> LedgerEntry {
        LedgerEntry {
            url: format!("https://example.com/{n}"),
            title: format!("Track {n}"),
            uploader: "Uploader".to_string(),
        }
    }

    #[test]
    fn missing_ledger_reads_as_empty() {
        let dir = tempdir().unwrap();
        let wb = Workbook::create(dir.path()).unwrap();
        let ledger = read_ledger(&wb).unwrap();
        assert!(ledger.is_empty());
        assert_eq!(ledger.columns, vec!["URL", "Title", "Uploader"]);
    }

    #[test]
    fn n_appends_yield_exactly_n_rows() {
        let dir = tempdir().unwrap();
        let wb = Workbook::create(dir.path()).unwrap();

        for n in 0..5 {
            append_entry(&wb, &entry(n)).unwrap();
        }

        let ledger = read_ledger(&wb).unwrap();
        assert_eq!(ledger.len(), 5);
        assert_eq!(ledger.value(0, 0), Some("https://example.com/0"));
        assert_eq!(ledger.value(4, 1), Some("Track 4"));
    }
}
