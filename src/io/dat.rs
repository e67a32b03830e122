//! Reader for the whitespace-delimited `.dat` contact matrices written by `contact`.
//!
//! ```text
//! # Generated with contact ...
//! # Command line: contact -c system.gro -a ...
//!           1      2      3
//!      10  0.250  0.000  1.000
//!      11  0.000  0.500  0.125
//! ```
//!
//! The header row starts with seven spaces and holds the column labels
//! (selection A). Each data row holds a row label (selection B) followed by
//! contact fractions, which are converted to percentages.
use std::path::Path;

use ndarray::Array2;
use tracing::{debug, warn};

use crate::error::{Error, Result};

const HEADER_PREFIX: &str = "       ";

#[derive(Debug, Clone, PartialEq)]
pub struct ContactMatrix {
    pub column_labels: Vec<String>,
    pub row_labels: Vec<String>,
    /// Contact percentages, shape `(rows, cols)`
    pub values: Array2<f64>,
}

impl ContactMatrix {
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_cols(&self) -> usize {
        self.values.ncols()
    }

    /// Minimum and maximum over finite values, or None if there are none.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

pub fn read_dat_file(path: &Path) -> Result<ContactMatrix> {
    let text = std::fs::read_to_string(path)?;
    debug!("Read {} bytes from {:?}", text.len(), path);
    parse_dat_str(&text)
}

pub fn parse_dat_str(text: &str) -> Result<ContactMatrix> {
    let mut header: Option<Vec<String>> = None;
    let mut row_labels = Vec::new();
    let mut values = Vec::new();
    let mut width: Option<usize> = None;

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if line.starts_with(HEADER_PREFIX) {
            header = Some(trimmed.split_whitespace().map(str::to_string).collect());
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        // trimmed is non-empty, so there is always a first token
        let label = tokens.next().unwrap_or_default();
        let start = values.len();
        for token in tokens {
            let v: f64 = token.parse().map_err(|_| Error::Parse {
                line: line_no,
                token: token.to_string(),
            })?;
            values.push(v * 100.0);
        }

        let found = values.len() - start;
        match width {
            None => width = Some(found),
            Some(expected) if expected != found => {
                return Err(Error::RaggedRow {
                    line: line_no,
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }
        row_labels.push(label.to_string());
    }

    let cols = match width {
        Some(w) if !row_labels.is_empty() && w > 0 => w,
        _ => return Err(Error::EmptyMatrix),
    };

    let column_labels = match header {
        Some(labels) if labels.len() == cols => labels,
        Some(labels) => {
            return Err(Error::HeaderMismatch {
                header: labels.len(),
                values: cols,
            });
        }
        None => {
            warn!("No header row found; numbering columns from 1");
            (1..=cols).map(|i| i.to_string()).collect()
        }
    };

    let rows = row_labels.len();
    let values = Array2::from_shape_vec((rows, cols), values).map_err(Error::processing)?;
    debug!("Parsed contact matrix: {} rows x {} columns", rows, cols);

    Ok(ContactMatrix {
        column_labels,
        row_labels,
        values,
    })
}
