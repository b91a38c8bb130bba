use std::fmt::Display;
use std::str;

/// Split a header field name into its namespace and tag at the first `.`,
/// e.g. `"Mono.d_spacing"` becomes `(Some("Mono"), "d_spacing")`.
pub fn split_namespace(name: &str) -> (Option<&str>, &str) {
    match name.split_once('.') {
        Some((namespace, tag)) => (Some(namespace), tag),
        None => (None, name),
    }
}

pub trait ParamLike {
    fn name(&self) -> &str;
    fn value(&self) -> &str;

    fn coerce<T: str::FromStr>(&self) -> Result<T, T::Err> {
        self.value().parse::<T>()
    }

    /// The namespace prefix of the field name, if it has one
    fn namespace(&self) -> Option<&str> {
        split_namespace(self.name()).0
    }

    /// The field name without its namespace prefix
    fn tag(&self) -> &str {
        split_namespace(self.name()).1
    }

    fn is_namespaced(&self) -> bool {
        self.namespace().is_some()
    }
}

/// A borrowed view of a single metadata entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamRef<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> ParamRef<'a> {
    pub fn new(name: &'a str, value: &'a str) -> Self {
        Self { name, value }
    }
}

impl<'a> ParamLike for ParamRef<'a> {
    fn name(&self) -> &str {
        self.name
    }

    fn value(&self) -> &str {
        self.value
    }
}

impl<'a> From<ParamRef<'a>> for Param {
    fn from(value: ParamRef<'a>) -> Self {
        Param::new_key_value(value.name, value.value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    pub name: String,
    pub value: String,
}

impl Param {
    pub fn new() -> Param {
        Param {
            ..Default::default()
        }
    }

    pub fn new_key_value<K: Into<String>, V: Into<String>>(name: K, value: V) -> Param {
        let mut inst = Self::new();
        inst.name = name.into();
        inst.value = value.into();
        inst
    }

    pub fn borrowed(&self) -> ParamRef<'_> {
        ParamRef::new(&self.name, &self.value)
    }
}

impl ParamLike for Param {
    fn name(&self) -> &str {
        &self.name
    }

    fn value(&self) -> &str {
        &self.value
    }
}

impl Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

pub type ParamList = Vec<Param>;

/// Units a data column's values might have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    // Energy
    Electronvolt,
    Kiloelectronvolt,

    // Photoelectron wavenumber
    InverseAngstrom,

    // Monochromator angle
    Degree,
    Radian,
    Millidegree,

    // Time
    Second,
    Millisecond,

    // Intensity
    Counts,
    CountsPerSecond,

    #[default]
    Unknown,
}

impl Unit {
    pub fn from_name(name: &str) -> Unit {
        match name {
            "eV" | "ev" | "electronvolt" => Self::Electronvolt,
            "keV" | "kev" | "kiloelectronvolt" => Self::Kiloelectronvolt,

            "inverse Angstrom" | "1/Angstrom" | "1/A" | "A^-1" => Self::InverseAngstrom,

            "degrees" | "degree" | "deg" => Self::Degree,
            "radians" | "radian" | "rad" => Self::Radian,
            "mdeg" | "millidegree" => Self::Millidegree,

            "seconds" | "second" | "s" | "sec" => Self::Second,
            "ms" | "millisecond" => Self::Millisecond,

            "counts" | "cts" => Self::Counts,
            "cps" | "counts per second" => Self::CountsPerSecond,
            _ => Unit::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Electronvolt => "eV",
            Self::Kiloelectronvolt => "keV",
            Self::InverseAngstrom => "inverse Angstrom",
            Self::Degree => "degrees",
            Self::Radian => "radians",
            Self::Millidegree => "mdeg",
            Self::Second => "seconds",
            Self::Millisecond => "ms",
            Self::Counts => "counts",
            Self::CountsPerSecond => "cps",
            Self::Unknown => "",
        }
    }

    pub fn is_energy(&self) -> bool {
        matches!(self, Self::Electronvolt | Self::Kiloelectronvolt)
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
