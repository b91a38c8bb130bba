//! Reading XDI files from disk and from arbitrary streams.
//!
//! [`open_file`] is the usual entry point. It transparently decompresses
//! gzipped files. [`xdi`] holds the parser itself.

pub(crate) mod compression;
pub mod xdi;

use std::{
    fs,
    io::{self, prelude::*},
    path,
};

use flate2::bufread::MultiGzDecoder;
use log::{debug, warn};

pub use crate::io::compression::{is_gzipped, is_gzipped_extension};
pub use crate::io::xdi::{
    is_xdi, parse, parse_str, FieldWarning, FormatError, XDIParserState, XDIReader,
};

#[cfg(feature = "parallelism")]
pub use crate::io::xdi::read_paths;

use crate::xdifile::XDIFile;

/// Open and parse the XDI file at `path`.
///
/// Gzip compression is detected from the file's leading bytes, not its
/// name, so `cu.xdi.gz` and a gzipped `cu.xdi` both read correctly.
pub fn open_file<P: AsRef<path::Path>>(path: P) -> Result<XDIFile, FormatError> {
    let path = path.as_ref();
    let mut handle = io::BufReader::new(fs::File::open(path)?);
    let compressed = is_gzipped(handle.fill_buf()?);
    let (gz_extension, _) = is_gzipped_extension(path);
    if gz_extension && !compressed {
        warn!(
            "{} has a .gz extension but is not gzip-compressed, reading as plain text",
            path.display()
        );
    }
    let filename = path.display().to_string();
    if compressed {
        debug!("Reading gzip-compressed {filename}");
        XDIReader::new(MultiGzDecoder::new(handle))
            .with_filename(filename)
            .read()
    } else {
        XDIReader::new(handle).with_filename(filename).read()
    }
}
