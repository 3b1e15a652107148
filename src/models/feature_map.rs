//! Feature map model

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Named real-valued feature contributions.
///
/// Names are unique. Insertion order is kept so that ranking ties resolve
/// deterministically, but equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct FeatureMap {
    entries: Vec<(String, f64)>,
}

/// Normalized attribution weights, one per feature, each in [-1, 1].
pub type AttributionSummary = FeatureMap;

impl FeatureMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a feature; an existing name keeps its position and takes the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of absolute values
    pub fn total_magnitude(&self) -> f64 {
        self.values().map(f64::abs).sum()
    }
}

impl PartialEq for FeatureMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for FeatureMap {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut map = FeatureMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for FeatureMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut map = FeatureMap::new();
        map.insert("a", 1.0);
        map.insert("b", 2.0);
        map.insert("a", 3.0);

        let names: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(3.0));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_equality_ignores_order() {
        let left: FeatureMap = vec![("x", 1.0), ("y", -2.0)].into_iter().collect();
        let right: FeatureMap = vec![("y", -2.0), ("x", 1.0)].into_iter().collect();
        assert_eq!(left, right);
        assert_eq!(left.total_magnitude(), 3.0);
    }

    #[test]
    fn test_serializes_as_object_in_insertion_order() {
        let map = FeatureMap::new().with("zeta", 0.5).with("alpha", -1.0);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"zeta":0.5,"alpha":-1.0}"#);
    }
}
