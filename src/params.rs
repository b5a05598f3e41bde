/// An ordered collection of request parameters with last-write-wins
/// semantics per key.
///
/// Endpoint setters are sugar over [`ParameterBag::set`]; the authorization
/// engine consumes the bag read-only. Insertion order is preserved but has no
/// effect on signing, which re-sorts the encoded pairs.
#[derive(Debug, Clone, Default)]
pub struct ParameterBag {
    entries: Vec<(String, String)>,
}

impl ParameterBag {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Default::default()
    }

    /// Inserts a parameter, replacing any existing entry with the same key.
    ///
    /// An empty value is permitted and is signed as an empty string.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let key = key.into();
        self.entries.retain(|(k, _)| *k != key);
        self.entries.push((key, value.into()));
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns whether an entry exists for `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterates over the current entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> std::iter::FromIterator<(K, V)> for ParameterBag
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = ParameterBag::new();
        for (k, v) in iter {
            bag.set(k, v);
        }
        bag
    }
}
