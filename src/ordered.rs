use std::collections::HashMap;

/// A string keyed map which enumerates its entries in insertion order.
///
/// Every map whose iteration order ends up in a report is one of these, so
/// that the output of a run is reproducible. Overwriting an existing key
/// keeps the entry in its original position.
#[derive(Clone, Debug)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.index.get(key) {
            Some(&idx) => Some(&mut self.entries[idx].1),
            None => None,
        }
    }

    /// Insert a value, returning the previous one if the key was present.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        match self.index.get(key) {
            Some(&idx) => Some(std::mem::replace(&mut self.entries[idx].1, value)),
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), value));
                None
            }
        }
    }

    /// Fetch the value stored under `key`, creating it with `default` first
    /// if the key hasn't been seen yet.
    pub fn get_or_insert_with<F>(&mut self, key: &str, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.entries.push((key.to_string(), default()));
                self.index.insert(key.to_string(), idx);
                idx
            }
        };

        &mut self.entries[idx].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}
