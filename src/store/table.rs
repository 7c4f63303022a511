//! In-memory translation table.

use std::collections::HashMap;
use std::path::Path;

use crate::codec::{
    self,
    Rows,
};
use crate::error::TranslatorError;

/// Header of locale identifiers plus one row of cells per key.
///
/// Column 0 is the source locale; its cell is the key itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    /// Header row.
    locales: Vec<String>,
    /// Keys in file order.
    keys: Vec<String>,
    /// Key → cells, as read (may be shorter than `locales`).
    entries: HashMap<String, Vec<String>>,
}

impl TranslationTable {
    /// An empty table with the given header.
    #[must_use]
    pub fn new(locales: Vec<String>) -> Self {
        Self { locales, keys: Vec::new(), entries: HashMap::new() }
    }

    /// Builds a table from decoded rows.
    ///
    /// Returns `None` when there is no usable header row. Rows with an empty
    /// key are skipped; for duplicate keys the last row wins but the first
    /// keeps its position.
    #[must_use]
    pub fn from_rows(rows: Rows) -> Option<Self> {
        let mut rows = rows.into_iter();
        let locales = rows.next()?;
        if locales.iter().all(String::is_empty) {
            return None;
        }

        let mut table = Self::new(locales);
        for row in rows {
            table.insert_row(row);
        }
        Some(table)
    }

    /// Reads a table from `path`. A missing or empty file yields `None`.
    pub fn load(path: &Path, separator: char) -> Result<Option<Self>, TranslatorError> {
        Ok(Self::from_rows(codec::read_file(path, separator)?))
    }

    /// Adds or replaces the row for its key; rows without a key are skipped.
    fn insert_row(&mut self, row: Vec<String>) {
        let Some(key) = row.first().filter(|key| !key.is_empty()).cloned() else {
            return;
        };
        if self.entries.insert(key.clone(), row).is_some() {
            tracing::debug!(key = %key, "Duplicate key in translations table, keeping the last row");
        } else {
            self.keys.push(key);
        }
    }

    #[must_use]
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// Column index of `locale`, if declared.
    #[must_use]
    pub fn locale_index(&self, locale: &str) -> Option<usize> {
        self.locales.iter().position(|l| l == locale)
    }

    /// Keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The cell for `key` in column `index`.
    ///
    /// `None` if the key is absent. A row shorter than the header yields an
    /// empty cell.
    #[must_use]
    pub fn cell(&self, key: &str, index: usize) -> Option<&str> {
        let row = self.entries.get(key)?;
        Some(row.get(index).map_or("", String::as_str))
    }

    /// The cell for `key` in the column labelled `locale`.
    #[must_use]
    pub fn cell_for_locale(&self, key: &str, locale: &str) -> Option<&str> {
        self.cell(key, self.locale_index(locale)?)
    }

    /// Key → non-empty translation for column `index`.
    ///
    /// The source column yields an empty map; its lookups pass through.
    #[must_use]
    pub fn column(&self, index: usize) -> HashMap<String, String> {
        if index == 0 {
            return HashMap::new();
        }
        self.entries
            .iter()
            .filter_map(|(key, row)| {
                let value = row.get(index).filter(|value| !value.is_empty())?;
                Some((key.clone(), value.clone()))
            })
            .collect()
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
