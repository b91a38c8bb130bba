//! Header metadata of an XDI file and the tables used to check it.
pub mod elements;
pub mod fields;
pub mod metadata;

pub use crate::meta::elements::{atomic_number, is_edge_name, is_element_symbol};
pub use crate::meta::fields::{parse_datetime, DefinedField};
pub use crate::meta::metadata::Metadata;
