//! Read [XDI](https://github.com/XraySpectroscopy/XAS-Data-Interchange) files.
//!
//! An XDI file is a header of `# Namespace.tag: value` fields, an optional
//! free-text comment section, a `#----` delimiter, and a whitespace-delimited
//! table of numbers.
mod error;
mod header;
mod reader;
mod table;

use std::io;

pub use error::{FieldWarning, FormatError};
pub use reader::{XDIParserState, XDIReader};

use crate::utils::{header_text, strip_bom};
use crate::xdifile::XDIFile;

/// Parse a complete XDI document from `stream`
pub fn parse<R: io::Read>(stream: R) -> Result<XDIFile, FormatError> {
    XDIReader::new(stream).read()
}

/// Parse a complete XDI document held in memory
pub fn parse_str(text: &str) -> Result<XDIFile, FormatError> {
    parse(text.as_bytes())
}

/// Check whether `buf`, the start of a file, opens with an XDI version line
pub fn is_xdi(buf: &[u8]) -> bool {
    let head = match buf.iter().position(|b| *b == b'\n') {
        Some(i) => &buf[..i],
        None => buf,
    };
    match std::str::from_utf8(head) {
        Ok(line) => header_text(strip_bom(line)).starts_with("XDI/"),
        Err(_) => false,
    }
}

/// Read many XDI files in parallel, one file per task. Results are in the
/// same order as `paths`.
#[cfg(feature = "parallelism")]
pub fn read_paths<P: AsRef<std::path::Path> + Sync>(
    paths: &[P],
) -> Vec<Result<XDIFile, FormatError>> {
    use rayon::prelude::*;

    paths
        .par_iter()
        .map(|path| crate::io::open_file(path))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prelude::*;
    use crate::xdifile::StandardColumn;
    use std::{fs, path};

    #[test]
    fn test_is_xdi() {
        assert!(is_xdi(b"# XDI/1.0 GSE/1.0\n# Column.1: energy"));
        assert!(is_xdi(b"XDI/1.0"));
        assert!(!is_xdi(b"BEGIN IONS\nTITLE=x"));
        assert!(!is_xdi(b"\xff\xfe\n"));
        assert!(!is_xdi(b""));
    }

    #[test_log::test]
    fn test_reader() {
        let path = path::Path::new("./test/data/cu_metal_rt.xdi");
        let file = fs::File::open(path).expect("Test file doesn't exist");
        let xdi = parse(file).unwrap();

        assert_eq!(xdi.xdi_version(), "1.0");
        assert_eq!(xdi.extra_version(), "GSE/1.0");
        assert_eq!(xdi.element(), "Cu");
        assert_eq!(xdi.edge(), "K");
        assert_eq!(xdi.dspacing(), Some(3.13553));
        assert_eq!(xdi.narrays(), 4);
        assert_eq!(xdi.npts(), 20);
        assert_eq!(xdi.array_labels(), ["energy", "i0", "itrans", "mutrans"]);
        assert_eq!(xdi.array_units(), ["eV", "", "", ""]);
        assert_eq!(xdi.narray_labels(), 4);
        assert_eq!(xdi.nmetadata(), 15);
        assert_eq!(
            xdi.comments(),
            "Cu foil Room Temperature\nmeasured at beamline 13-ID"
        );
        assert!(xdi.warnings().is_empty(), "{:?}", xdi.warnings());

        for n in 1..=xdi.narrays() {
            assert_eq!(xdi.column_by_index(n).unwrap().len(), xdi.npts());
        }
        let energy = xdi.standard_column(StandardColumn::Energy).unwrap();
        assert_eq!(energy[0], 8779.0);
        assert_eq!(energy[19], 8969.0);
        assert_eq!(xdi.column_by_name("mutrans").unwrap()[2], -1.3033816);

        assert_eq!(
            xdi.metadata().namespaces(),
            ["Scan", "Mono", "Beamline", "Facility", "Detector", "Sample", "GSE"]
        );
        let facility: Vec<_> = xdi.metadata().namespace("facility").collect();
        assert_eq!(
            facility,
            [
                ("name", "APS"),
                ("energy", "7.00 GeV"),
                ("xray_source", "APS Undulator A")
            ]
        );
        let energy = xdi.metadata().get_param("Facility.energy").unwrap();
        assert_eq!(energy.tag(), "energy");
        assert_eq!(xdi.start_time().unwrap().to_string(), "2001-06-26 22:27:31");
    }

    #[test_log::test]
    fn test_reader_label_line() {
        let text = fs::read_to_string("./test/data/fe_label_line.xdi")
            .expect("Test file doesn't exist");
        let xdi: XDIFile = text.parse().unwrap();
        assert_eq!(xdi.narrays(), 5);
        assert_eq!(xdi.npts(), 3);
        assert_eq!(
            xdi.array_labels(),
            ["energy", "i0", "itrans", "ifluor", "irefer"]
        );
        assert_eq!(xdi.array_units(), ["", "", "", "", ""]);
        assert_eq!(xdi.comments(), "");
        assert_eq!(xdi.metadata_value("Beamline.name").unwrap(), "10-BM-B");
        assert!(xdi.start_time().is_none());
        assert!(matches!(
            xdi.warnings(),
            [
                FieldWarning::InvalidFieldValue { line: 5, .. },
                FieldWarning::DuplicateKey { line: 7, .. },
            ]
        ));
        assert_eq!(
            xdi.standard_column(StandardColumn::IRefer).unwrap(),
            &[3.1e4, 3.2e4, 3.0e4]
        );
        let rows: Vec<_> = xdi.rows().collect();
        assert_eq!(rows[1], vec![7010.0, 1.1e5, 5.3e4, 1.3e2, 3.2e4]);
    }

    #[test]
    fn test_reader_bad_row() {
        let file = fs::File::open("./test/data/bad_row.xdi").expect("Test file doesn't exist");
        let err = parse(file).unwrap_err();
        assert!(matches!(
            err,
            FormatError::ColumnCountMismatch {
                line: 8,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_npts_counts_data_lines() {
        let text = fs::read_to_string("./test/data/cu_metal_rt.xdi").unwrap();
        let data_lines = text
            .lines()
            .skip_while(|l| !l.starts_with("#----"))
            .skip(1)
            .filter(|l| !l.trim().is_empty() && !l.starts_with('#'))
            .count();
        let xdi = parse_str(&text).unwrap();
        assert_eq!(xdi.npts(), data_lines);
        assert!(xdi.table().columns().all(|c| c.len() == data_lines));
    }

    #[cfg(feature = "parallelism")]
    #[test]
    fn test_read_paths() {
        let paths = [
            "./test/data/cu_metal_rt.xdi",
            "./test/data/bad_row.xdi",
            "./test/data/fe_label_line.xdi",
        ];
        let results = read_paths(&paths);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().element(), "Cu");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().element(), "Fe");
    }
}
