use lazy_static::lazy_static;
use log::{trace, warn};
use regex::Regex;

use crate::meta::{is_edge_name, is_element_symbol, DefinedField, Metadata};
use crate::utils::{header_text, normalize_key, strip_bom};
use crate::xdifile::{ColumnSpec, DataTable, XDIFile, MAX_COLUMNS};

use super::error::{FieldWarning, FormatError};

lazy_static! {
    static ref VERSION_LINE: Regex = Regex::new(r"^XDI/(\S+)\s*(.*)$").unwrap();
    static ref FIELD_NAME: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*(\.[A-Za-z0-9_-]+)*$").unwrap();
}

/// Accumulates everything the header declares before the data section.
#[derive(Debug, Default)]
pub(crate) struct HeaderBuilder {
    pub xdi_version: String,
    pub extra_version: String,
    pub element: String,
    pub edge: String,
    pub dspacing: Option<f64>,
    pub comments: Vec<String>,
    pub columns: Vec<ColumnSpec>,
    pub metadata: Metadata,
    pub warnings: Vec<FieldWarning>,
    label_line: Option<(usize, Vec<String>)>,
}

impl HeaderBuilder {
    fn warn(&mut self, warning: FieldWarning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Read the `XDI/<version> [extra]` declaration from the first line
    pub fn parse_version(&mut self, line: &str) -> Result<(), FormatError> {
        let text = header_text(strip_bom(line));
        match VERSION_LINE.captures(text) {
            Some(caps) => {
                self.xdi_version = caps[1].to_string();
                self.extra_version = caps[2].trim().to_string();
                Ok(())
            }
            None => Err(FormatError::NotXDI(line.to_string())),
        }
    }

    /// The number of columns declared so far, the highest `Column.N` seen
    pub fn declared_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn push_comment(&mut self, text: &str) {
        self.comments.push(text.to_string());
    }

    /// Keep the first non-empty comment line after the data delimiter as the
    /// column label line
    pub fn set_label_line(&mut self, line_number: usize, text: &str) {
        if self.label_line.is_some() || text.is_empty() {
            return;
        }
        let labels = text.split_ascii_whitespace().map(String::from).collect();
        self.label_line = Some((line_number, labels));
    }

    /// Dispatch one `key: value` field to the reserved slot it names or to
    /// the generic metadata
    pub fn apply_directive(
        &mut self,
        line_number: usize,
        key: &str,
        value: &str,
    ) -> Result<(), FormatError> {
        if !FIELD_NAME.is_match(key) {
            self.warn(FieldWarning::InvalidFieldName {
                line: line_number,
                key: key.to_string(),
            });
            return Ok(());
        }

        let normalized = normalize_key(key);
        trace!("Line {line_number}: {normalized} = {value:?}");
        if let Some(index) = normalized.strip_prefix("column.") {
            return self.declare_column(line_number, index, value);
        }

        match normalized.as_str() {
            "element.symbol" | "element" => {
                if !is_element_symbol(value) {
                    self.warn(FieldWarning::UnknownElement {
                        line: line_number,
                        value: value.to_string(),
                    });
                }
                self.element = value.to_string();
            }
            "element.edge" | "edge" => {
                if !is_edge_name(value) {
                    self.warn(FieldWarning::UnknownEdge {
                        line: line_number,
                        value: value.to_string(),
                    });
                }
                self.edge = value.to_string();
            }
            "mono.d_spacing" | "d_spacing" => {
                self.dspacing = match value.parse::<f64>() {
                    Ok(d) => Some(d),
                    Err(_) => {
                        self.warn(FieldWarning::InvalidDSpacing {
                            line: line_number,
                            value: value.to_string(),
                        });
                        None
                    }
                };
            }
            _ => {
                if let Some(field) = DefinedField::from_normalized_key(&normalized) {
                    if !field.validate(value) {
                        self.warn(FieldWarning::InvalidFieldValue {
                            line: line_number,
                            key: key.to_string(),
                            value: value.to_string(),
                            expected: field.expected().to_string(),
                        });
                    }
                }
                if self.metadata.insert(key, value).is_some() {
                    self.warn(FieldWarning::DuplicateKey {
                        line: line_number,
                        key: key.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn declare_column(
        &mut self,
        line_number: usize,
        index: &str,
        value: &str,
    ) -> Result<(), FormatError> {
        let index = match index.parse::<usize>() {
            Ok(i) if i > 0 => i,
            // All digits but too wide for usize, so certainly past the limit
            Err(_) if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) => {
                return Err(FormatError::TooManyColumns {
                    line: line_number,
                    index: usize::MAX,
                    max: MAX_COLUMNS,
                })
            }
            _ => {
                return Err(FormatError::InvalidColumnIndex {
                    line: line_number,
                    index: index.to_string(),
                })
            }
        };
        if index > MAX_COLUMNS {
            return Err(FormatError::TooManyColumns {
                line: line_number,
                index,
                max: MAX_COLUMNS,
            });
        }
        if self.columns.len() < index {
            self.columns.resize_with(index, ColumnSpec::default);
        }
        self.columns[index - 1] = ColumnSpec::from_declaration(value);
        Ok(())
    }

    /// Widen the column list to `narrays` and fill unlabeled columns from
    /// the label line, if there was one
    pub fn resolve_columns(&mut self, narrays: usize) {
        if self.columns.len() < narrays {
            self.columns.resize_with(narrays, ColumnSpec::default);
        }
        if let Some((line, labels)) = self.label_line.take() {
            let unused = labels.len().saturating_sub(narrays);
            for (column, label) in self.columns.iter_mut().zip(labels) {
                if !column.is_labeled() {
                    column.label = label;
                }
            }
            if unused > 0 {
                self.warn(FieldWarning::UnusedLabels {
                    line,
                    count: unused,
                });
            }
        }
    }

    pub fn into_file(self, table: DataTable, filename: Option<String>) -> XDIFile {
        XDIFile {
            xdi_version: self.xdi_version,
            extra_version: self.extra_version,
            filename,
            element: self.element,
            edge: self.edge,
            dspacing: self.dspacing,
            comments: self.comments.join("\n"),
            columns: self.columns,
            metadata: self.metadata,
            table,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_version_line() {
        let mut header = HeaderBuilder::default();
        header.parse_version("# XDI/1.0 GSE/1.0 Larch/0.9").unwrap();
        assert_eq!(header.xdi_version, "1.0");
        assert_eq!(header.extra_version, "GSE/1.0 Larch/0.9");

        let mut header = HeaderBuilder::default();
        header.parse_version("\u{feff}XDI/1.1").unwrap();
        assert_eq!(header.xdi_version, "1.1");
        assert_eq!(header.extra_version, "");

        let err = HeaderBuilder::default()
            .parse_version("# XAS/1.0")
            .unwrap_err();
        assert!(matches!(err, FormatError::NotXDI(_)));
    }

    #[test]
    fn test_columns() {
        let mut header = HeaderBuilder::default();
        header.apply_directive(2, "Column.3", "mu").unwrap();
        header.apply_directive(3, "column.1", "energy eV").unwrap();
        assert_eq!(header.declared_columns(), 3);
        assert_eq!(header.columns[0], ColumnSpec::new("energy", "eV"));
        assert_eq!(header.columns[1], ColumnSpec::default());

        header.apply_directive(4, "Column.64", "last").unwrap();
        assert_eq!(header.declared_columns(), 64);

        let err = header.apply_directive(5, "Column.65", "x").unwrap_err();
        assert!(matches!(
            err,
            FormatError::TooManyColumns {
                line: 5,
                index: 65,
                max: 64
            }
        ));
        let err = header.apply_directive(6, "Column.0", "x").unwrap_err();
        assert!(matches!(err, FormatError::InvalidColumnIndex { line: 6, .. }));
        let err = header.apply_directive(7, "Column.energy", "1").unwrap_err();
        assert!(matches!(err, FormatError::InvalidColumnIndex { line: 7, .. }));
        let err = header
            .apply_directive(8, "Column.100000000000000000000000", "x")
            .unwrap_err();
        assert!(matches!(
            err,
            FormatError::TooManyColumns {
                line: 8,
                index: usize::MAX,
                max: 64
            }
        ));
        let err = header.apply_directive(9, "Column.-1", "x").unwrap_err();
        assert!(matches!(err, FormatError::InvalidColumnIndex { line: 9, .. }));
        assert!(header.metadata.is_empty());
    }

    #[test]
    fn test_reserved_fields() {
        let mut header = HeaderBuilder::default();
        header.apply_directive(2, "Element.symbol", "Cu").unwrap();
        header.apply_directive(3, "Element.edge", "K").unwrap();
        header.apply_directive(4, "Mono.d_spacing", "3.13553").unwrap();
        assert_eq!(header.element, "Cu");
        assert_eq!(header.edge, "K");
        assert_eq!(header.dspacing, Some(3.13553));
        assert!(header.metadata.is_empty());
        assert!(header.warnings.is_empty());

        header.apply_directive(5, "Mono.d_spacing", "abc").unwrap();
        assert_eq!(header.dspacing, None);
        header.apply_directive(6, "Element.symbol", "Qq").unwrap();
        header.apply_directive(7, "edge", "L9").unwrap();
        assert_eq!(header.element, "Qq");
        assert_eq!(header.edge, "L9");
        assert_eq!(header.warnings.len(), 3);
        assert!(matches!(
            header.warnings[0],
            FieldWarning::InvalidDSpacing { line: 5, .. }
        ));
    }

    #[test]
    fn test_generic_fields() {
        let mut header = HeaderBuilder::default();
        header.apply_directive(2, "Beamline.name", "13ID").unwrap();
        header.apply_directive(3, "Scan.start_time", "noon").unwrap();
        header.apply_directive(4, "Beamline.name", "10BM").unwrap();
        header.apply_directive(5, "bad key", "x").unwrap();
        assert_eq!(header.metadata.len(), 2);
        assert_eq!(header.metadata.get("Beamline.name"), Some("10BM"));
        assert_eq!(header.metadata.index_of("Beamline.name"), Some(0));
        assert_eq!(header.metadata.get("Scan.start_time"), Some("noon"));
        assert!(matches!(
            &header.warnings[..],
            [
                FieldWarning::InvalidFieldValue { line: 3, .. },
                FieldWarning::DuplicateKey { line: 4, .. },
                FieldWarning::InvalidFieldName { line: 5, .. },
            ]
        ));
    }

    #[test]
    fn test_label_line() {
        let mut header = HeaderBuilder::default();
        header.apply_directive(2, "Column.2", "i0").unwrap();
        header.set_label_line(4, "energy monitor itrans extra");
        header.set_label_line(5, "ignored");
        header.resolve_columns(3);
        let labels: Vec<_> = header.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["energy", "i0", "itrans"]);
        assert!(matches!(
            header.warnings[..],
            [FieldWarning::UnusedLabels { line: 4, count: 1 }]
        ));
    }
}
