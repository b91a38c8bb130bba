use indexmap::{IndexMap, IndexSet};

use crate::params::{split_namespace, Param, ParamList, ParamRef};

/**
The generic header metadata of an XDI file, an ordered mapping from field name
to value.

Keys are unique. Inserting a key that is already present replaces its value
but keeps the position where the key was first seen.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    #[cfg_attr(feature = "serde", serde(with = "indexmap::map::serde_seq"))]
    entries: IndexMap<String, String>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` under `key`, returning the value it replaced if there was one
    pub(crate) fn insert<K: Into<String>, V: Into<String>>(
        &mut self,
        key: K,
        value: V,
    ) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn get_param(&self, key: &str) -> Option<ParamRef<'_>> {
        self.entries
            .get_key_value(key)
            .map(|(k, v)| ParamRef::new(k, v))
    }

    /// The position of `key` in file order
    #[inline]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.entries.get_index_of(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = ParamRef<'_>> {
        self.entries.iter().map(|(k, v)| ParamRef::new(k, v))
    }

    /// The distinct namespace prefixes in the order they first appear.
    /// Un-namespaced keys do not contribute.
    pub fn namespaces(&self) -> Vec<&str> {
        let found: IndexSet<&str> = self
            .entries
            .keys()
            .filter_map(|k| split_namespace(k).0)
            .collect();
        found.into_iter().collect()
    }

    /// The `(tag, value)` pairs whose key lives in `namespace`, compared
    /// case-insensitively as XDI namespaces are.
    pub fn namespace<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.entries.iter().filter_map(move |(k, v)| match split_namespace(k) {
            (Some(ns), tag) if ns.eq_ignore_ascii_case(namespace) => Some((tag, v.as_str())),
            _ => None,
        })
    }

    /// The entries without a namespace prefix
    pub fn unqualified(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(k, _)| !k.contains('.'))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_params(&self) -> ParamList {
        self.iter().map(Param::from).collect()
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = (&'a String, &'a String);

    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::params::ParamLike;

    fn sample() -> Metadata {
        let mut meta = Metadata::new();
        meta.insert("Beamline.name", "13ID");
        meta.insert("Operator", "mn");
        meta.insert("Facility.name", "APS");
        meta.insert("beamline.focusing", "KB mirrors");
        meta
    }

    #[test]
    fn test_last_value_wins_in_place() {
        let mut meta = sample();
        let prev = meta.insert("Operator", "bravel");
        assert_eq!(prev.as_deref(), Some("mn"));
        assert_eq!(meta.len(), 4);
        assert_eq!(meta.index_of("Operator"), Some(1));
        assert_eq!(meta.get("Operator"), Some("bravel"));
        assert_eq!(
            meta.keys().collect::<Vec<_>>(),
            ["Beamline.name", "Operator", "Facility.name", "beamline.focusing"]
        );
    }

    #[test]
    fn test_namespaces() {
        let meta = sample();
        assert_eq!(meta.namespaces(), ["Beamline", "Facility", "beamline"]);
        let beamline: Vec<_> = meta.namespace("BEAMLINE").collect();
        assert_eq!(beamline, [("name", "13ID"), ("focusing", "KB mirrors")]);
        assert_eq!(meta.unqualified().collect::<Vec<_>>(), [("Operator", "mn")]);

        let param = meta.get_param("Facility.name").unwrap();
        assert_eq!(param.namespace(), Some("Facility"));
        assert_eq!(param.value(), "APS");
        assert!(meta.get_param("Facility.energy").is_none());
        assert_eq!(meta.to_params().len(), 4);
    }
}
