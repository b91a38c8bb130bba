use thiserror::Error;

/// Columns of unequal length cannot form a [`DataTable`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Column {column} has {found} values, expected {expected}")]
pub struct RaggedColumnsError {
    pub column: usize,
    pub expected: usize,
    pub found: usize,
}

/**
The numeric data block of an XDI file.

Values are held column-major, one `Vec` per column, and every column has the
same length. The table is built once and never resized.
*/
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "TableColumns"))]
pub struct DataTable {
    columns: Vec<Vec<f64>>,
    npts: usize,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TableColumns {
    columns: Vec<Vec<f64>>,
}

#[cfg(feature = "serde")]
impl TryFrom<TableColumns> for DataTable {
    type Error = RaggedColumnsError;

    fn try_from(value: TableColumns) -> Result<Self, Self::Error> {
        Self::from_columns(value.columns)
    }
}

impl DataTable {
    /// Build a table from whole columns, which must all be the same length
    pub fn from_columns(columns: Vec<Vec<f64>>) -> Result<Self, RaggedColumnsError> {
        let npts = columns.first().map(Vec::len).unwrap_or_default();
        if let Some((i, col)) = columns.iter().enumerate().find(|(_, c)| c.len() != npts) {
            return Err(RaggedColumnsError {
                column: i + 1,
                expected: npts,
                found: col.len(),
            });
        }
        Ok(Self { columns, npts })
    }

    /// Transpose `values`, read row by row, into a table of `ncols` columns.
    /// A trailing partial row is discarded.
    pub(crate) fn from_row_major(ncols: usize, values: &[f64]) -> Self {
        if ncols == 0 {
            return Self::default();
        }
        let npts = values.len() / ncols;
        let mut columns: Vec<Vec<f64>> = (0..ncols).map(|_| Vec::with_capacity(npts)).collect();
        for row in values.chunks_exact(ncols) {
            for (col, v) in columns.iter_mut().zip(row) {
                col.push(*v);
            }
        }
        Self { columns, npts }
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn npts(&self) -> usize {
        self.npts
    }

    pub fn is_empty(&self) -> bool {
        self.npts == 0
    }

    /// The column at the 0-based position `index`
    #[inline]
    pub fn column(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    pub fn columns(&self) -> impl Iterator<Item = &[f64]> {
        self.columns.iter().map(Vec::as_slice)
    }

    /// Gather the values of one row across all columns
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.npts {
            return None;
        }
        Some(self.columns.iter().map(|c| c[index]).collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        (0..self.npts).map(|i| self.columns.iter().map(|c| c[i]).collect())
    }
}
