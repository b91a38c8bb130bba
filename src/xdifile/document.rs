use std::str::FromStr;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::io::xdi::{FieldWarning, FormatError};
use crate::meta::{parse_datetime, DefinedField, Metadata};
use crate::params::ParamLike;
use crate::utils::normalize_key;

use super::columns::{ColumnSpec, StandardColumn};
use super::table::DataTable;

/// A failed query against an [`XDIFile`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Column index {index} is out of range, expected 1 to {narrays}")]
    IndexOutOfRange { index: usize, narrays: usize },
    #[error("No column is labeled {0:?}")]
    LabelNotFound(String),
    #[error("Metadata key {0:?} was not found")]
    KeyNotFound(String),
}

/**
The contents of an XDI file.

Built by [`parse`](crate::parse) or [`XDIReader`](crate::XDIReader) and read-only
afterwards. Columns are addressed either by their 1-based position or by
label:

```
let text = "# XDI/1.0 GSE/1.0
# Column.1: energy eV
# Column.2: mu
# Element.symbol: Cu
#----
10000 0.1
10010 0.2
";
let xdi = xdifile::parse_str(text).unwrap();
assert_eq!(xdi.narrays(), 2);
assert_eq!(xdi.column_by_index(1).unwrap(), &[10000.0, 10010.0]);
assert_eq!(xdi.column_by_name("mu").unwrap(), &[0.1, 0.2]);
assert_eq!(xdi.element(), "Cu");
```
*/
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct XDIFile {
    pub(crate) xdi_version: String,
    pub(crate) extra_version: String,
    pub(crate) filename: Option<String>,
    pub(crate) element: String,
    pub(crate) edge: String,
    pub(crate) dspacing: Option<f64>,
    pub(crate) comments: String,
    pub(crate) columns: Vec<ColumnSpec>,
    pub(crate) metadata: Metadata,
    pub(crate) table: DataTable,
    pub(crate) warnings: Vec<FieldWarning>,
}

impl XDIFile {
    /// The number of data columns
    #[inline]
    pub fn narrays(&self) -> usize {
        self.columns.len()
    }

    /// The number of rows, shared by every column
    #[inline]
    pub fn npts(&self) -> usize {
        self.table.npts()
    }

    /// The number of columns that have a label
    pub fn narray_labels(&self) -> usize {
        self.columns.iter().filter(|c| c.is_labeled()).count()
    }

    #[inline]
    pub fn nmetadata(&self) -> usize {
        self.metadata.len()
    }

    pub fn xdi_version(&self) -> &str {
        &self.xdi_version
    }

    pub fn extra_version(&self) -> &str {
        &self.extra_version
    }

    /// Split the extra version text into `(name, version)` pairs, e.g.
    /// `"GSE/1.0 Larch/0.9"`. A token without a `/` has an empty version.
    pub fn applications(&self) -> Vec<(&str, &str)> {
        self.extra_version
            .split_ascii_whitespace()
            .map(|token| token.split_once('/').unwrap_or((token, "")))
            .collect()
    }

    /// The name of the file this was read from, when it was opened by path
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn element(&self) -> &str {
        &self.element
    }

    pub fn edge(&self) -> &str {
        &self.edge
    }

    /// The monochromator d-spacing, or `None` if absent or unreadable
    pub fn dspacing(&self) -> Option<f64> {
        self.dspacing
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// The label and unit of the column at the 1-based position `n`
    pub fn column_spec(&self, n: usize) -> Result<&ColumnSpec, LookupError> {
        self.check_index(n)?;
        Ok(&self.columns[n - 1])
    }

    /// One label per column, empty for unlabeled columns
    pub fn array_labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    /// One unit per column, empty where no unit was given
    pub fn array_units(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.unit.as_str()).collect()
    }

    pub fn table(&self) -> &DataTable {
        &self.table
    }

    /// Iterate over the data row by row
    pub fn rows(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        self.table.rows()
    }

    fn check_index(&self, n: usize) -> Result<(), LookupError> {
        if n == 0 || n > self.narrays() {
            Err(LookupError::IndexOutOfRange {
                index: n,
                narrays: self.narrays(),
            })
        } else {
            Ok(())
        }
    }

    /// The values of the column at the 1-based position `n`
    pub fn column_by_index(&self, n: usize) -> Result<&[f64], LookupError> {
        self.check_index(n)?;
        self.table.column(n - 1).ok_or(LookupError::IndexOutOfRange {
            index: n,
            narrays: self.narrays(),
        })
    }

    /// The values of the first column labeled exactly `label`. Unlabeled
    /// columns are only reachable by index.
    pub fn column_by_name(&self, label: &str) -> Result<&[f64], LookupError> {
        self.columns
            .iter()
            .position(|c| c.is_labeled() && c.label == label)
            .and_then(|i| self.table.column(i))
            .ok_or_else(|| LookupError::LabelNotFound(label.to_string()))
    }

    /// The values of the first column whose label is the conventional name
    /// for `kind`, ignoring case
    pub fn standard_column(&self, kind: StandardColumn) -> Result<&[f64], LookupError> {
        self.columns
            .iter()
            .position(|c| c.is_labeled() && kind.matches(&c.label))
            .and_then(|i| self.table.column(i))
            .ok_or_else(|| LookupError::LabelNotFound(kind.name().to_string()))
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// All metadata keys in file order
    pub fn metadata_keys(&self) -> Vec<&str> {
        self.metadata.keys().collect()
    }

    pub fn metadata_value(&self, key: &str) -> Result<&str, LookupError> {
        self.metadata
            .get(key)
            .ok_or_else(|| LookupError::KeyNotFound(key.to_string()))
    }

    fn defined_field(&self, field: DefinedField) -> Option<&str> {
        self.metadata
            .iter()
            .find(|p| {
                DefinedField::from_normalized_key(&normalize_key(p.name()))
                    == Some(field)
            })
            .map(|p| p.value)
    }

    /// The `Scan.start_time` timestamp, if present and well-formed
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.defined_field(DefinedField::StartTime)
            .and_then(parse_datetime)
    }

    /// The `Scan.end_time` timestamp, if present and well-formed
    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.defined_field(DefinedField::EndTime)
            .and_then(parse_datetime)
    }

    /// Recoverable problems found while parsing
    pub fn warnings(&self) -> &[FieldWarning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    #[cfg(feature = "serde")]
    /// Write the file contents out in JSON format to `writer`
    pub fn to_json_writer<W: std::io::Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, self)
    }
}

impl FromStr for XDIFile {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::io::xdi::parse_str(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SIMPLE: &str = "# XDI/1.0 GSE/1.0 Larch/0.9.24
# Column.1: energy eV
# Column.2: i0
# Column.3: itrans
# Column.5: mutrans
# Scan.start_time: 2001-06-18 12:32:38
# Beamline.name: 13ID
#----
# energy i0 itrans ifluor mutrans
8000.0 1.0 0.5 0.1 0.69
8010.0 1.1 0.6 0.2 0.61
";

    fn simple() -> XDIFile {
        SIMPLE.parse().unwrap()
    }

    #[test]
    fn test_lookup_by_index() {
        let xdi = simple();
        assert_eq!(xdi.column_by_index(1).unwrap(), &[8000.0, 8010.0]);
        assert_eq!(xdi.column_by_index(5).unwrap(), &[0.69, 0.61]);
        assert_eq!(
            xdi.column_by_index(0),
            Err(LookupError::IndexOutOfRange {
                index: 0,
                narrays: 5
            })
        );
        assert!(matches!(
            xdi.column_by_index(6),
            Err(LookupError::IndexOutOfRange { index: 6, .. })
        ));
        assert_eq!(xdi.column_spec(1).unwrap().unit, "eV");
    }

    #[test]
    fn test_lookup_by_name() {
        let xdi = simple();
        assert_eq!(xdi.column_by_name("itrans").unwrap(), &[0.5, 0.6]);
        assert_eq!(
            xdi.column_by_name("ITRANS"),
            Err(LookupError::LabelNotFound("ITRANS".into()))
        );
        assert_eq!(
            xdi.standard_column(StandardColumn::ITrans).unwrap(),
            &[0.5, 0.6]
        );
        assert_eq!(
            xdi.standard_column(StandardColumn::IFluor).unwrap(),
            &[0.1, 0.2]
        );
        assert!(xdi.standard_column(StandardColumn::MuRefer).is_err());

        for (n, label) in xdi.array_labels().into_iter().enumerate() {
            assert_eq!(
                xdi.column_by_index(n + 1).unwrap(),
                xdi.column_by_name(label).unwrap()
            );
        }
    }

    #[test]
    fn test_unlabeled_column_needs_index() {
        let xdi: XDIFile = "# XDI/1.0\n# Column.1: energy\n# Column.3: mu\n#----\n1 2 3\n4 5 6\n"
            .parse()
            .unwrap();
        assert_eq!(xdi.array_labels(), ["energy", "", "mu"]);
        assert_eq!(
            xdi.column_by_name(""),
            Err(LookupError::LabelNotFound(String::new()))
        );
        assert_eq!(xdi.column_by_index(2).unwrap(), &[2.0, 5.0]);
        assert_eq!(xdi.narray_labels(), 2);
    }

    #[test]
    fn test_metadata_lookup() {
        let xdi = simple();
        assert_eq!(xdi.nmetadata(), 2);
        assert_eq!(xdi.metadata_keys(), ["Scan.start_time", "Beamline.name"]);
        assert_eq!(xdi.metadata_value("Beamline.name").unwrap(), "13ID");
        assert_eq!(
            xdi.metadata_value("beamline.name"),
            Err(LookupError::KeyNotFound("beamline.name".into()))
        );
        let start = xdi.start_time().unwrap();
        assert_eq!(start.to_string(), "2001-06-18 12:32:38");
        assert!(xdi.end_time().is_none());
    }

    #[test]
    fn test_versions() {
        let xdi = simple();
        assert_eq!(xdi.xdi_version(), "1.0");
        assert_eq!(xdi.extra_version(), "GSE/1.0 Larch/0.9.24");
        assert_eq!(xdi.applications(), [("GSE", "1.0"), ("Larch", "0.9.24")]);
        assert!(xdi.filename().is_none());
    }

    #[test]
    fn test_lookup_errors_are_distinct() {
        let index = LookupError::IndexOutOfRange {
            index: 9,
            narrays: 2,
        };
        let label = LookupError::LabelNotFound("x".into());
        let key = LookupError::KeyNotFound("x".into());
        assert_ne!(label, key);
        assert_eq!(
            index.to_string(),
            "Column index 9 is out of range, expected 1 to 2"
        );
    }
}
