//! Contract of the tabular store submissions are written to.
//!
//! The store is organised like a spreadsheet: one header row followed by
//! one row per submitted interview, addressed by its 1-based row number.

mod sheet_store;

pub use sheet_store::{FileSheet, FileSheetStore, SheetDocument};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Header name to cell value for one stored row.
pub type FieldMap = BTreeMap<String, String>;

/// Spreadsheet row number of a stored interview. Row 1 is the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowLocator(pub usize);

impl RowLocator {
    pub const FIRST_DATA_ROW: RowLocator = RowLocator(2);

    pub(crate) fn from_data_index(index: usize) -> Self {
        RowLocator(index + Self::FIRST_DATA_ROW.0)
    }

    pub(crate) fn data_index(&self) -> Option<usize> {
        self.0.checked_sub(Self::FIRST_DATA_ROW.0)
    }
}

impl fmt::Display for RowLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}", self.0)
    }
}

/// Entry point of a store: opens a handle on the survey sheet.
pub trait RecordStore {
    type Sheet: SheetHandle;

    fn connect(&self) -> Result<Self::Sheet, StoreError>;
}

/// Operations on an opened sheet. A failed call leaves the sheet as it was.
pub trait SheetHandle {
    /// Writes `headers` if the sheet has no header yet.
    fn ensure_headers(&mut self, headers: &[String]) -> Result<(), StoreError>;

    fn append(&mut self, row: &[String]) -> Result<RowLocator, StoreError>;

    fn update(&mut self, locator: RowLocator, row: &[String]) -> Result<(), StoreError>;

    fn search_rows(
        &self,
        predicate: &dyn Fn(&FieldMap) -> bool,
    ) -> Result<Vec<(RowLocator, FieldMap)>, StoreError>;

    fn rows(&self) -> Result<Vec<(RowLocator, FieldMap)>, StoreError> {
        self.search_rows(&|_| true)
    }
}

/// Pairs a header with a row; cells missing at the end read as empty.
pub fn field_map(header: &[String], row: &[String]) -> FieldMap {
    header
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.clone(), row.get(idx).cloned().unwrap_or_default()))
        .collect()
}
