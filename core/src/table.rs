//! Longest-match lookup table shared by dictionary tiers, the punctuation map
//! and the tone codec.
//!
//! Keys are literal strings. Lookup at a byte offset returns the entry whose
//! key is the longest one starting there (forward maximum matching), so a
//! multi-glyph key such as `……` always wins over a shorter overlapping key.

use ahash::AHashMap;

/// Insertion-ordered key → value table with longest-match lookup.
#[derive(Debug, Clone)]
pub struct MatchTable<V> {
    entries: Vec<(String, V)>,
    index: AHashMap<String, usize>,
    max_key_chars: usize,
}

impl<V> Default for MatchTable<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: AHashMap::new(),
            max_key_chars: 0,
        }
    }
}

impl<V> MatchTable<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key. Returns `false` (and keeps the existing value) when the
    /// key is already present or empty.
    pub fn insert<K: Into<String>>(&mut self, key: K, value: V) -> bool {
        let key = key.into();
        if key.is_empty() || self.index.contains_key(&key) {
            return false;
        }
        self.max_key_chars = self.max_key_chars.max(key.chars().count());
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        true
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Longest key starting at byte offset `start` of `text`.
    ///
    /// Returns the matched byte length and the value. `start` must lie on a
    /// char boundary.
    pub fn longest_at(&self, text: &str, start: usize) -> Option<(usize, &V)> {
        if self.max_key_chars == 0 {
            return None;
        }
        let rest = &text[start..];
        let window = rest
            .char_indices()
            .take(self.max_key_chars)
            .last()
            .map(|(i, ch)| i + ch.len_utf8())?;
        rest[..window].char_indices().rev().find_map(|(i, ch)| {
            let end = i + ch.len_utf8();
            self.get(&rest[..end]).map(|v| (end, v))
        })
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length in chars of the longest key.
    pub fn max_key_chars(&self) -> usize {
        self.max_key_chars
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for MatchTable<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}
