//! Tabular price list models.
//!
//! A [`Dataset`] is the in-memory form of the spreadsheet the price list lives
//! in: a header row plus ordered rows of cells. The core only reads the
//! product-name and base-price columns; every other cell is carried through
//! untouched so the dataset can be written back in full.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::UpdateError;

/// A single spreadsheet cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Blank cell.
    #[default]
    Empty,
    /// Numeric cell.
    Number(Decimal),
    /// Any other content.
    Text(String),
}

impl CellValue {
    /// Build a cell from raw text: blank, decimal, or text.
    ///
    /// Only text that a `Decimal` prints back unchanged becomes a number, so
    /// `as_text` returns the raw input for every cell (`007` stays text).
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return CellValue::Empty;
        }
        match Decimal::from_str(raw) {
            Ok(number) if number.to_string() == raw => CellValue::Number(number),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    /// Cell content as text ("" for blank cells).
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.clone(),
        }
    }

    /// Cell content as a decimal, if it holds one.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => Decimal::from_str(&s.trim().replace(',', "")).ok(),
            CellValue::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

/// Ordered rows of cells under a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Column labels.
    pub headers: Vec<String>,
    /// Data rows; a row may be shorter than the header.
    pub rows: Vec<Vec<CellValue>>,
}

/// One price list row as seen by the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    /// Zero-based index of the data row in the dataset.
    pub index: usize,
    /// Product display name.
    pub name: String,
    /// Previously recorded unit price (zero when blank).
    pub base_price: Decimal,
}

impl Dataset {
    /// Create an empty dataset with the given column labels.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a data row.
    pub fn push_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column label.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == label)
    }

    fn require_column(&self, label: &str) -> Result<usize, UpdateError> {
        self.column_index(label)
            .ok_or_else(|| UpdateError::MissingColumn(label.to_string()))
    }

    /// Read a cell; cells beyond a short row are blank.
    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        const BLANK: &CellValue = &CellValue::Empty;
        self.rows
            .get(row)
            .map(|cells| cells.get(column).unwrap_or(BLANK))
    }

    /// Overwrite one cell, padding a short row with blanks.
    pub fn set_cell(&mut self, row: usize, column: &str, value: CellValue) -> Result<(), UpdateError> {
        let column = self.require_column(column)?;
        let rows = self.rows.len();
        let cells = self
            .rows
            .get_mut(row)
            .ok_or(UpdateError::RowOutOfRange { row, rows })?;

        if cells.len() <= column {
            cells.resize(column + 1, CellValue::Empty);
        }
        cells[column] = value;
        Ok(())
    }

    /// First row whose `column` cell reads exactly `value`.
    pub fn find_row(&self, column: &str, value: &str) -> Result<Option<usize>, UpdateError> {
        let column = self.require_column(column)?;
        Ok((0..self.rows.len()).find(|&row| {
            self.cell(row, column)
                .is_some_and(|cell| cell.as_text() == value)
        }))
    }

    /// View every row through its product-name and base-price columns.
    pub fn catalog_rows(
        &self,
        name_column: &str,
        price_column: &str,
    ) -> Result<Vec<CatalogRow>, UpdateError> {
        let name_idx = self.require_column(name_column)?;
        let price_idx = self.require_column(price_column)?;

        Ok((0..self.rows.len())
            .map(|index| CatalogRow {
                index,
                name: self
                    .cell(index, name_idx)
                    .map(CellValue::as_text)
                    .unwrap_or_default(),
                base_price: self
                    .cell(index, price_idx)
                    .and_then(CellValue::as_decimal)
                    .unwrap_or(Decimal::ZERO),
            })
            .collect())
    }
}
