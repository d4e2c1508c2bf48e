use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Parameters of a submitted request, as an ordered multimap.
///
/// Name order follows first appearance; values keep submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParams {
    params: IndexMap<String, Vec<String>>,
}

impl RequestParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the values already present under `name`.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.entry(name.into()).or_default().push(value.into());
    }

    /// Replaces all values under `name`.
    pub fn set(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.params.insert(name.into(), values);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.params.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.params.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    /// Number of values submitted under `name`.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.params.get(name).map_or(0, Vec::len)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Removes `name`, keeping the relative order of the remaining names.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.params.shift_remove(name)
    }

    /// Removes every name starting with `prefix`.
    pub fn remove_prefixed(&mut self, prefix: &str) {
        self.params.retain(|name, _| !name.starts_with(prefix));
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RequestParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.append(name, value);
        }
        params
    }
}
