use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::leading_float;

lazy_static! {
    static ref COLUMN_EXPRESSION: Regex =
        Regex::new(r"^(-+)?(ln|exp|sin|asin)?\(?(\$\d+)([/*])*(\$\d+)*\)?$").unwrap();
    static ref WORD: Regex = Regex::new(r"^[A-Za-z0-9_]+$").unwrap();
}

/// Monochromator crystal materials recognized in a crystal description
pub const CRYSTAL_MATERIALS: [&str; 7] =
    ["Si", "Ge", "Diamond", "YB66", "InSb", "Beryl", "Multilayer"];

/// Header fields whose values have a known shape. Their values are still
/// stored as text, but a value that does not fit is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinedField {
    StartTime,
    EndTime,
    EdgeEnergy,
    RingEnergy,
    RingCurrent,
    UndulatorHarmonic,
    /// The column expression for the x axis, e.g. `$1`
    Abscissa,
    MuTransmission,
    MuFluorescence,
    MuReference,
    /// A crystal and its reflection, e.g. `Si 111`
    Crystal,
    Beamline,
    Collimation,
    Focusing,
    XraySource,
    HarmonicRejection,
}

impl DefinedField {
    pub const ALL: [DefinedField; 16] = [
        Self::StartTime,
        Self::EndTime,
        Self::EdgeEnergy,
        Self::RingEnergy,
        Self::RingCurrent,
        Self::UndulatorHarmonic,
        Self::Abscissa,
        Self::MuTransmission,
        Self::MuFluorescence,
        Self::MuReference,
        Self::Crystal,
        Self::Beamline,
        Self::Collimation,
        Self::Focusing,
        Self::XraySource,
        Self::HarmonicRejection,
    ];

    /// Resolve a field from a key already passed through
    /// [`normalize_key`](crate::utils::normalize_key)
    pub fn from_normalized_key(key: &str) -> Option<Self> {
        let field = match key {
            "scan.start_time" | "start_time" => Self::StartTime,
            "scan.end_time" | "end_time" => Self::EndTime,
            "scan.edge_energy" | "edge_energy" => Self::EdgeEnergy,
            "facility.energy" | "ring_energy" => Self::RingEnergy,
            "facility.current" | "ring_current" => Self::RingCurrent,
            "undulator_harmonic" => Self::UndulatorHarmonic,
            "abscissa" => Self::Abscissa,
            "mu_transmission" => Self::MuTransmission,
            "mu_fluorescence" => Self::MuFluorescence,
            "mu_reference" => Self::MuReference,
            "mono.crystal" | "crystal" => Self::Crystal,
            "beamline" => Self::Beamline,
            "beamline.collimation" | "collimation" => Self::Collimation,
            "beamline.focusing" | "focusing" => Self::Focusing,
            "facility.xray_source" | "source" => Self::XraySource,
            "beamline.harmonic_rejection" | "harmonic_rejection" => Self::HarmonicRejection,
            _ => return None,
        };
        Some(field)
    }

    /// The namespaced spelling of the field
    pub fn key(&self) -> &'static str {
        match self {
            Self::StartTime => "Scan.start_time",
            Self::EndTime => "Scan.end_time",
            Self::EdgeEnergy => "Scan.edge_energy",
            Self::RingEnergy => "Facility.energy",
            Self::RingCurrent => "Facility.current",
            Self::UndulatorHarmonic => "undulator_harmonic",
            Self::Abscissa => "abscissa",
            Self::MuTransmission => "mu_transmission",
            Self::MuFluorescence => "mu_fluorescence",
            Self::MuReference => "mu_reference",
            Self::Crystal => "Mono.crystal",
            Self::Beamline => "beamline",
            Self::Collimation => "Beamline.collimation",
            Self::Focusing => "Beamline.focusing",
            Self::XraySource => "Facility.xray_source",
            Self::HarmonicRejection => "Beamline.harmonic_rejection",
        }
    }

    /// A description of the values this field accepts
    pub fn expected(&self) -> &'static str {
        match self {
            Self::StartTime | Self::EndTime => "an ISO 8601 date and time",
            Self::EdgeEnergy | Self::RingEnergy | Self::RingCurrent => "a number",
            Self::UndulatorHarmonic => "an integer",
            Self::Abscissa | Self::MuTransmission | Self::MuFluorescence | Self::MuReference => {
                "a column expression such as `ln($2/$3)`"
            }
            Self::Crystal => "a crystal material and a reflection, such as `Si 111`",
            Self::Beamline | Self::Collimation | Self::Focusing | Self::XraySource => {
                "words of letters, digits and underscores"
            }
            Self::HarmonicRejection => "printable text",
        }
    }

    pub fn validate(&self, value: &str) -> bool {
        match self {
            Self::StartTime | Self::EndTime => parse_datetime(value).is_some(),
            Self::EdgeEnergy | Self::RingEnergy | Self::RingCurrent => {
                leading_float(value).is_some()
            }
            Self::UndulatorHarmonic => value.parse::<i64>().is_ok(),
            Self::Abscissa | Self::MuTransmission | Self::MuFluorescence | Self::MuReference => {
                COLUMN_EXPRESSION.is_match(value)
            }
            Self::Crystal => is_crystal(value),
            Self::Beamline | Self::Collimation | Self::Focusing | Self::XraySource => {
                !value.is_empty() && value.split_ascii_whitespace().all(|w| WORD.is_match(w))
            }
            Self::HarmonicRejection => value
                .chars()
                .all(|c| c.is_ascii_graphic() || c.is_ascii_whitespace()),
        }
    }
}

/// A known crystal material followed by a reflection of at least three
/// digits, which may be space separated: `Si 111`, `ge 2 2 0`
fn is_crystal(value: &str) -> bool {
    let Some((material, reflection)) = value.trim().split_once(' ') else {
        return false;
    };
    if !CRYSTAL_MATERIALS
        .iter()
        .any(|m| m.eq_ignore_ascii_case(material))
    {
        return false;
    }
    let digits: Vec<char> = reflection.chars().filter(|c| *c != ' ').collect();
    digits.len() > 2 && digits.iter().all(char::is_ascii_digit)
}

impl Display for DefinedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Parse an XDI timestamp. The date and time may be separated by `T` or a
/// space, fractional seconds are optional, and a UTC offset is accepted and
/// dropped.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_local())
}
