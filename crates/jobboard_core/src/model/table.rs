//! Display table projected from stored listings.
//!
//! # Responsibility
//! - Own the fixed column order and display labels.
//! - Project raw stored records onto that column set.
//!
//! # Invariants
//! - A table always carries exactly the columns in `COLUMNS`, in order.
//! - Every row has exactly one cell per column.

use crate::model::listing::JobListing;
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// One projected column: stored field name plus display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub field: &'static str,
    pub label: &'static str,
}

/// Fixed column order for display and export.
pub const COLUMNS: [Column; 8] = [
    Column {
        field: "companyName",
        label: "Company Name",
    },
    Column {
        field: "phoneNumber",
        label: "Phone Number",
    },
    Column {
        field: "location",
        label: "Location",
    },
    Column {
        field: "role",
        label: "Role of the Company",
    },
    Column {
        field: "pythonBackend",
        label: "Python Backend",
    },
    Column {
        field: "netBackend",
        label: ".Net Backend",
    },
    Column {
        field: "cyberSecurity",
        label: "Cyber Security Engineer",
    },
    Column {
        field: "aiDeveloper",
        label: "AI Product Developer",
    },
];

/// A single table cell.
///
/// An empty string and JSON `null` are the same blank cell: a spreadsheet
/// cannot hold an empty string, so both project to `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Non-empty text.
    Text(String),
    Bool(bool),
    Number(f64),
    /// Field stored as JSON `null` or as `""`.
    Empty,
}

impl Cell {
    /// Text cell; `""` becomes `Empty`.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Number(number) => number.as_f64().map_or(Self::Empty, Self::Number),
            Value::String(text) => Self::text(text.as_str()),
            // Nested values are not part of the record shape; keep them readable.
            other => Self::Text(other.to_string()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Empty => Ok(()),
        }
    }
}

/// Projection failure for one stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    /// Position of the record after null entries were dropped.
    pub index: usize,
    /// Stored field name (or `<object>` when the record is not an object).
    pub field: &'static str,
}

/// Projected, relabeled, ordered view of all listings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates a table with headers and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Projects raw stored records onto the fixed column set.
    ///
    /// Every record must be an object carrying all eight fields; extra
    /// fields are ignored and stored key order does not matter.
    pub fn from_records(records: &[Value]) -> Result<Self, MissingField> {
        let mut rows = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let object = record.as_object().ok_or(MissingField {
                index,
                field: "<object>",
            })?;
            rows.push(project_object(index, object)?);
        }
        Ok(Self { rows })
    }

    /// Builds a table from typed listings.
    pub fn from_listings(listings: &[JobListing]) -> Self {
        let rows = listings
            .iter()
            .map(|listing| {
                vec![
                    Cell::text(listing.company_name.as_str()),
                    Cell::text(listing.phone_number.as_str()),
                    Cell::text(listing.location.as_str()),
                    Cell::text(listing.role.as_str()),
                    Cell::Bool(listing.python_backend),
                    Cell::Bool(listing.net_backend),
                    Cell::Bool(listing.cyber_security),
                    Cell::Bool(listing.ai_developer),
                ]
            })
            .collect();
        Self { rows }
    }

    /// Builds a table from already projected rows.
    ///
    /// Fails with the index of the first row that does not have one cell
    /// per column.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, usize> {
        if let Some(index) = rows.iter().position(|row| row.len() != COLUMNS.len()) {
            return Err(index);
        }
        Ok(Self { rows })
    }

    /// Display labels in column order.
    pub fn headers(&self) -> [&'static str; 8] {
        COLUMNS.map(|column| column.label)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns one cell by row index and display label.
    pub fn cell(&self, row: usize, label: &str) -> Option<&Cell> {
        let column = COLUMNS.iter().position(|column| column.label == label)?;
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    /// Renders a plain-text grid for terminal output.
    pub fn render_text(&self) -> String {
        let headers = self.headers();
        let mut widths: Vec<usize> = headers.iter().map(|label| label.chars().count()).collect();
        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();
        for row in &rendered {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, headers.iter().copied(), &widths);
        let separator = widths.iter().map(|width| "-".repeat(*width));
        push_line(&mut out, separator.collect::<Vec<_>>().iter().map(String::as_str), &widths);
        for row in &rendered {
            push_line(&mut out, row.iter().map(String::as_str), &widths);
        }
        out
    }
}

fn project_object(index: usize, object: &Map<String, Value>) -> Result<Vec<Cell>, MissingField> {
    COLUMNS
        .iter()
        .map(|column| {
            object
                .get(column.field)
                .map(Cell::from_json)
                .ok_or(MissingField {
                    index,
                    field: column.field,
                })
        })
        .collect()
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}", width = *width))
        .collect::<Vec<_>>()
        .join(" | ");
    out.push_str(line.trim_end());
    out.push('\n');
}
