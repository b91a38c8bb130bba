pub use crate::params::ParamLike;
pub use crate::xdifile::{LookupError, StandardColumn, XDIFile};
pub use std::io::prelude::*;
