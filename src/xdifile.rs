//! The in-memory model of an XDI file: the document, its columns and its data table.
pub mod columns;
pub mod document;
pub mod table;

pub use crate::xdifile::columns::{ColumnSpec, StandardColumn, UnknownColumnName, MAX_COLUMNS};
pub use crate::xdifile::document::{LookupError, XDIFile};
pub use crate::xdifile::table::{DataTable, RaggedColumnsError};
