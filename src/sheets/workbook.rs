use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};

use crate::{Result, SuiteError};

/// One sheet: an ordered header row plus string cells. Missing trailing
/// cells and empty strings both read back as absent values.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Index of the first column whose name matches one of `candidates`,
    /// checked in candidate order.
    pub fn resolve_column(&self, candidates: &[&str]) -> Option<usize> {
        candidates
            .iter()
            .find_map(|name| self.column_index(name))
    }

    /// Adds a column (empty cells in existing rows) unless it already exists.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(String::new());
        }
        self.columns.len() - 1
    }

    /// Non-empty cell value at (row, column index), trimmed.
    pub fn value(&self, row: usize, col: usize) -> Option<&str> {
        let cell = self.rows.get(row)?.get(col)?.trim();
        if cell.is_empty() {
            None
        } else {
            Some(cell)
        }
    }

    pub fn set_value(&mut self, row: usize, col: usize, value: impl Into<String>) {
        if let Some(cells) = self.rows.get_mut(row) {
            while cells.len() <= col {
                cells.push(String::new());
            }
            cells[col] = value.into();
        }
    }

    pub fn push_row(&mut self, mut cells: Vec<String>) {
        cells.resize(self.columns.len(), String::new());
        self.rows.push(cells);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A workbook is a directory whose sheets are `<name>.csv` files with a
/// header row.
#[derive(Debug, Clone)]
pub struct Workbook {
    dir: PathBuf,
}

impl Workbook {
    /// Open an existing workbook directory. A missing or non-directory path
    /// is a configuration error.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(SuiteError::Config(format!(
                "workbook does not exist or is not a directory: {}",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    /// Create the workbook directory if needed and open it.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn sheet_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.csv"))
    }

    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheet_path(name).is_file()
    }

    /// First of `candidates` that exists as a sheet, in candidate order.
    pub fn first_existing_sheet<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.iter().copied().find(|name| self.has_sheet(name))
    }

    pub fn read_sheet(&self, name: &str) -> Result<Sheet> {
        let path = self.sheet_path(name);
        let mut reader = ReaderBuilder::new().flexible(true).from_path(&path)?;

        let columns = reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let mut sheet = Sheet::new(columns);

        for record in reader.records() {
            let record = record?;
            sheet.push_row(record.iter().map(str::to_string).collect());
        }

        Ok(sheet)
    }

    /// Write (replace) a sheet in full.
    pub fn write_sheet(&self, name: &str, sheet: &Sheet) -> Result<()> {
        let path = self.sheet_path(name);
        let mut writer = WriterBuilder::new().flexible(true).from_path(&path)?;

        writer.write_record(&sheet.columns)?;
        for row in &sheet.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
