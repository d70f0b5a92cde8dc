use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

use super::{field_map, FieldMap, RecordStore, RowLocator, SheetHandle};

/// On-disk shape of a sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetDocument {
    #[serde(default)]
    pub header: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

/// Sheet stored as a single JSON document in the workspace.
#[derive(Debug, Clone)]
pub struct FileSheetStore {
    path: PathBuf,
}

impl FileSheetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for FileSheetStore {
    type Sheet = FileSheet;

    fn connect(&self) -> Result<FileSheet, StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                StoreError::Connection(format!(
                    "cannot open sheet directory {}: {err}",
                    parent.display()
                ))
            })?;
        }
        let document = if self.path.exists() {
            let data = fs::read_to_string(&self.path).map_err(|err| {
                StoreError::Connection(format!(
                    "cannot read sheet {}: {err}",
                    self.path.display()
                ))
            })?;
            serde_json::from_str(&data)?
        } else {
            SheetDocument::default()
        };
        tracing::debug!(
            path = %self.path.display(),
            rows = document.rows.len(),
            "sheet opened"
        );
        Ok(FileSheet {
            path: self.path.clone(),
            document,
        })
    }
}

/// Open handle on a [`FileSheetStore`] sheet.
#[derive(Debug, Clone)]
pub struct FileSheet {
    path: PathBuf,
    document: SheetDocument,
}

impl FileSheet {
    pub fn header(&self) -> &[String] {
        &self.document.header
    }

    pub fn row_count(&self) -> usize {
        self.document.rows.len()
    }

    pub fn row(&self, locator: RowLocator) -> Option<&[String]> {
        locator
            .data_index()
            .and_then(|idx| self.document.rows.get(idx))
            .map(Vec::as_slice)
    }

    /// Persists `next` and adopts it only once the write succeeded.
    fn commit(&mut self, next: SheetDocument) -> Result<(), StoreError> {
        write_atomic(&self.path, &serde_json::to_vec_pretty(&next)?)?;
        self.document = next;
        Ok(())
    }
}

impl SheetHandle for FileSheet {
    fn ensure_headers(&mut self, headers: &[String]) -> Result<(), StoreError> {
        if self.document.header.is_empty() {
            let mut next = self.document.clone();
            next.header = headers.to_vec();
            return self.commit(next);
        }
        if self.document.header != headers {
            return Err(StoreError::Rejected(format!(
                "sheet header has {} columns that do not match the {} expected",
                self.document.header.len(),
                headers.len()
            )));
        }
        Ok(())
    }

    fn append(&mut self, row: &[String]) -> Result<RowLocator, StoreError> {
        let mut next = self.document.clone();
        next.rows.push(row.to_vec());
        let locator = RowLocator::from_data_index(next.rows.len() - 1);
        self.commit(next)?;
        Ok(locator)
    }

    fn update(&mut self, locator: RowLocator, row: &[String]) -> Result<(), StoreError> {
        let index = locator
            .data_index()
            .filter(|idx| *idx < self.document.rows.len())
            .ok_or_else(|| StoreError::Rejected(format!("{locator} does not exist")))?;
        let mut next = self.document.clone();
        next.rows[index] = row.to_vec();
        self.commit(next)
    }

    fn search_rows(
        &self,
        predicate: &dyn Fn(&FieldMap) -> bool,
    ) -> Result<Vec<(RowLocator, FieldMap)>, StoreError> {
        Ok(self
            .document
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                (
                    RowLocator::from_data_index(idx),
                    field_map(&self.document.header, row),
                )
            })
            .filter(|(_, fields)| predicate(fields))
            .collect())
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
