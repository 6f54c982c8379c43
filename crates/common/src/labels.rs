use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ordered name/value pairs used for rule labels and annotations.
///
/// Insertion order is kept on the wire. Duplicate names are representable so
/// that validation can report them instead of silently overwriting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    entries: Vec<(String, String)>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Replaces the value of an existing entry or appends a new one.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        match self.entries.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => entry.1 = value.into(),
            None => self.entries.push((name.to_string(), value.into())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Serialize for LabelSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LabelSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LabelSetVisitor;

        impl<'de> Visitor<'de> for LabelSetVisitor {
            type Value = LabelSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of string names to string values")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<LabelSet, E> {
                Ok(LabelSet::new())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<LabelSet, A::Error> {
                let mut set = LabelSet::new();
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    set.push(k, v);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_any(LabelSetVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let mut labels: LabelSet = [("a", "1"), ("b", "2")].into_iter().collect();
        labels.set("a", "3");
        assert_eq!(labels.iter().collect::<Vec<_>>(), vec![("a", "3"), ("b", "2")]);
        labels.set("c", "4");
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn remove_returns_value() {
        let mut labels: LabelSet = [("team", "sre")].into_iter().collect();
        assert_eq!(labels.remove("team").as_deref(), Some("sre"));
        assert!(labels.remove("team").is_none());
        assert!(labels.is_empty());
    }

    #[test]
    fn serializes_in_insertion_order() {
        let labels: LabelSet = [("zeta", "1"), ("alpha", "2")].into_iter().collect();
        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);
    }

    #[test]
    fn deserializes_yaml_map_in_order() {
        let labels: LabelSet = serde_yaml::from_str("zeta: one\nalpha: two\n").unwrap();
        assert_eq!(labels.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(labels.get("alpha"), Some("two"));
    }
}
