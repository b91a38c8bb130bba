//! `xdifile` reads files in the XAS Data Interchange (XDI) format, a plain-text
//! format for a single X-ray absorption spectroscopy scan.
//!
//! An XDI file pairs a table of numeric columns with namespaced metadata
//! fields. The parser validates the structure, keeps the header in file
//! order, and reports recoverable problems as [`FieldWarning`]s rather than
//! failing.
//!
//! ```no_run
//! use xdifile::prelude::*;
//!
//! let xdi = xdifile::open_file("./test/data/cu_metal_rt.xdi").unwrap();
//! println!("{} {} edge, {} points", xdi.element(), xdi.edge(), xdi.npts());
//! let energy = xdi.column_by_name("energy").unwrap();
//! for param in xdi.metadata().iter() {
//!     println!("{}.{} = {}", param.namespace().unwrap_or(""), param.tag(), param.value());
//! }
//! # let _ = energy;
//! ```
pub mod io;
pub mod meta;
pub mod params;
pub mod prelude;
pub mod utils;
pub mod xdifile;

pub use crate::io::open_file;
pub use crate::io::xdi::{parse, parse_str, FieldWarning, FormatError, XDIReader};

pub use crate::meta::Metadata;
pub use crate::params::{Param, ParamLike, Unit};
pub use crate::xdifile::{
    ColumnSpec, DataTable, LookupError, StandardColumn, XDIFile, MAX_COLUMNS,
};
