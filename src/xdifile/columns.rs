use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use crate::params::Unit;

/// The most data columns an XDI file may declare
pub const MAX_COLUMNS: usize = 64;

/// The label and unit of one data column. Either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnSpec {
    pub label: String,
    pub unit: String,
}

impl ColumnSpec {
    pub fn new<L: Into<String>, U: Into<String>>(label: L, unit: U) -> Self {
        Self {
            label: label.into(),
            unit: unit.into(),
        }
    }

    /// Build a column from the value of a `Column.N` field, `<label> [<unit>]`.
    /// Tokens after the unit are ignored.
    pub fn from_declaration(value: &str) -> Self {
        let mut tokens = value.split_ascii_whitespace();
        let label = tokens.next().unwrap_or_default();
        let unit = tokens.next().unwrap_or_default();
        Self::new(label, unit)
    }

    #[inline]
    pub fn is_labeled(&self) -> bool {
        !self.label.is_empty()
    }

    #[inline]
    pub fn has_unit(&self) -> bool {
        !self.unit.is_empty()
    }

    pub fn unit_kind(&self) -> Unit {
        Unit::from_name(&self.unit)
    }
}

impl Display for ColumnSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.has_unit() {
            write!(f, "{} ({})", self.label, self.unit)
        } else {
            f.write_str(&self.label)
        }
    }
}

/// The conventional names for the columns of an XAS measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StandardColumn {
    Energy,
    I0,
    ITrans,
    IFluor,
    IRefer,
    MuTrans,
    MuFluor,
    MuRefer,
}

impl StandardColumn {
    pub const ALL: [StandardColumn; 8] = [
        Self::Energy,
        Self::I0,
        Self::ITrans,
        Self::IFluor,
        Self::IRefer,
        Self::MuTrans,
        Self::MuFluor,
        Self::MuRefer,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Energy => "energy",
            Self::I0 => "i0",
            Self::ITrans => "itrans",
            Self::IFluor => "ifluor",
            Self::IRefer => "irefer",
            Self::MuTrans => "mutrans",
            Self::MuFluor => "mufluor",
            Self::MuRefer => "murefer",
        }
    }

    /// Whether `label` names this column, ignoring case
    pub fn matches(&self, label: &str) -> bool {
        self.name().eq_ignore_ascii_case(label)
    }
}

impl Display for StandardColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0} is not a standard column name")]
pub struct UnknownColumnName(pub String);

impl FromStr for StandardColumn {
    type Err = UnknownColumnName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.matches(s))
            .ok_or_else(|| UnknownColumnName(s.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_declaration() {
        let col = ColumnSpec::from_declaration("energy eV");
        assert_eq!(col, ColumnSpec::new("energy", "eV"));
        assert_eq!(col.unit_kind(), Unit::Electronvolt);
        assert_eq!(col.to_string(), "energy (eV)");

        let col = ColumnSpec::from_declaration("  mutrans ");
        assert!(col.is_labeled());
        assert!(!col.has_unit());

        let col = ColumnSpec::from_declaration("");
        assert!(!col.is_labeled());
        assert_eq!(col, ColumnSpec::default());
    }

    #[test]
    fn test_standard_names() {
        assert_eq!("I0".parse::<StandardColumn>().unwrap(), StandardColumn::I0);
        assert_eq!(
            "muRefer".parse::<StandardColumn>().unwrap(),
            StandardColumn::MuRefer
        );
        assert!("time".parse::<StandardColumn>().is_err());
        assert!(StandardColumn::Energy.matches("ENERGY"));
    }
}
