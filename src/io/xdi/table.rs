use crate::xdifile::DataTable;

use super::error::FormatError;

/// Accumulates data rows in file order, checking each against the column count.
#[derive(Debug, Default)]
pub(crate) struct TableBuilder {
    ncols: usize,
    values: Vec<f64>,
}

impl TableBuilder {
    pub fn new(ncols: usize) -> Self {
        Self {
            ncols,
            values: Vec::new(),
        }
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn npts(&self) -> usize {
        if self.ncols == 0 {
            0
        } else {
            self.values.len() / self.ncols
        }
    }

    /// Split `line` on whitespace and append its values as one row
    pub fn push_row(&mut self, line_number: usize, line: &str) -> Result<(), FormatError> {
        let tokens: Vec<&str> = line.split_ascii_whitespace().collect();
        if tokens.len() != self.ncols {
            return Err(FormatError::ColumnCountMismatch {
                line: line_number,
                expected: self.ncols,
                found: tokens.len(),
            });
        }
        self.values.reserve(self.ncols);
        for (i, token) in tokens.into_iter().enumerate() {
            let value = token
                .parse::<f64>()
                .map_err(|e| FormatError::InvalidNumber {
                    line: line_number,
                    column: i + 1,
                    token: token.to_string(),
                    source: e,
                })?;
            self.values.push(value);
        }
        Ok(())
    }

    pub fn build(self) -> DataTable {
        DataTable::from_row_major(self.ncols, &self.values)
    }
}
