//! Fuzzy string‑keyed dictionary.
//!
//! Maps text keys to integer values and answers exact as well as
//! similarity‑based lookups. Similarity is normalised edit distance over
//! grapheme clusters (see [`FuzzyDict::similarity`]).
//!
//! ```rust
//! use fuzzy_dict::FuzzyDict;
//!
//! let mut dict = FuzzyDict::new();
//! dict.insert("submit", 1);
//! dict.insert("submti", 2);
//! dict.insert("cancel", 3);
//!
//! assert_eq!(dict.lookup_similar_n("submit", 0.5, 2), vec![1, 2]);
//! assert_eq!(dict.lookup_similar("cancle", 0.5), Some(3));
//! ```
mod builder;
mod distance;
pub mod error;
mod matches;
pub mod registry;
mod shared;
mod structs;

pub use builder::{DEFAULT_SIMILARITY_MAP, FuzzyDictBuilder};
pub use error::{DictError, Result};
pub use registry::{DictRegistry, Handle, NOT_FOUND};
pub use shared::SharedFuzzyDict;
pub use structs::*;

use distance::{Metric, segment};
use std::borrow::Cow;

impl Default for FuzzyDict {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: AsRef<str>> FromIterator<(K, Value)> for FuzzyDict {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        FuzzyDictBuilder::new().build(iter)
    }
}

impl<K: AsRef<str>> Extend<(K, Value)> for FuzzyDict {
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key.as_ref(), value);
        }
    }
}

/// Fuzzy dictionary engine
impl FuzzyDict {
    /// Empty, case‑sensitive dictionary with unit edit costs.
    #[must_use]
    pub fn new() -> Self {
        FuzzyDictBuilder::new().build(std::iter::empty::<(&str, Value)>())
    }

    #[inline]
    fn metric(&self) -> Metric<'_> {
        Metric {
            penalties: &self.penalties,
            similarity: self.similarity,
        }
    }

    #[inline]
    fn normalize<'k>(&self, key: &'k str) -> Cow<'k, str> {
        if self.case_insensitive {
            Cow::Owned(key.to_lowercase())
        } else {
            Cow::Borrowed(key)
        }
    }

    /// Inserts `key` or overwrites its value. Returns the previous value.
    pub fn insert(&mut self, key: &str, value: Value) -> Option<Value> {
        let key = self.normalize(key);
        if let Some(entry) = self.entries.get_mut(&*key) {
            return Some(std::mem::replace(&mut entry.value, value));
        }
        let (key, graphemes) = segment(&key, false);
        self.by_length
            .entry(graphemes.len())
            .or_default()
            .insert(key.clone());
        self.entries.insert(
            key,
            Entry {
                value,
                graphemes: graphemes.into_boxed_slice(),
            },
        );
        None
    }

    /// Exact lookup.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<Value> {
        self.entries
            .get(&*self.normalize(key))
            .map(|entry| entry.value)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&*self.normalize(key))
    }

    /// Removes `key`, returning its value. Absent keys are a no‑op.
    pub fn erase(&mut self, key: &str) -> Option<Value> {
        let key = self.normalize(key);
        let entry = self.entries.remove(&*key)?;
        let len = entry.graphemes.len();
        if let Some(bucket) = self.by_length.get_mut(&len) {
            bucket.remove(&*key);
            if bucket.is_empty() {
                self.by_length.remove(&len);
            }
        }
        Some(entry.value)
    }

    /// Removes every entry, keeping the configuration.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_length.clear();
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// `true` iff [`size`](Self::size) is zero.
    #[must_use]
    pub fn empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.size()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Value)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e.value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Similarity of two strings ∈ `[0,1]` under this dictionary's settings.
    ///
    /// `1 - distance / max(len)`, where lengths count grapheme clusters and
    /// `distance` is the weighted edit distance configured by
    /// [`FuzzyPenalties`].
    ///
    /// ```
    /// use fuzzy_dict::FuzzyDict;
    /// let dict = FuzzyDict::new();
    /// assert_eq!(dict.similarity("kitten", "kitten"), 1.0);
    /// assert_eq!(dict.similarity("abcd", "abce"), 0.75);
    /// assert_eq!(dict.similarity("ab", "cd"), 0.0);
    /// ```
    #[must_use]
    pub fn similarity(&self, a: &str, b: &str) -> f32 {
        let (_, a) = segment(a, self.case_insensitive);
        let (_, b) = segment(b, self.case_insensitive);
        self.metric().similarity(&a, &b, 0.0).unwrap_or(0.0)
    }

    /// Every stored key with similarity `>= threshold` to `key`, ranked by
    /// similarity, then exact match, then key order.
    ///
    /// Thresholds are clamped to `[0, 1]`; `NaN` only admits exact matches.
    #[must_use]
    pub fn search(&self, key: &str, threshold: f32) -> SimilarMatches<'_> {
        self.collect_matches(key, threshold, None)
    }

    /// Value of the best match with similarity `>= threshold`.
    ///
    /// An exact match always wins. Equal similarities resolve to the
    /// lexicographically smallest key.
    #[must_use]
    pub fn lookup_similar(&self, key: &str, threshold: f32) -> Option<Value> {
        if let Some(value) = self.lookup(key) {
            return Some(value);
        }
        self.collect_matches(key, threshold, Some(1))
            .best()
            .map(|m| m.value)
    }

    /// Values of at most `n` best matches with similarity `>= threshold`,
    /// ordered as in [`search`](Self::search).
    #[must_use]
    pub fn lookup_similar_n(&self, key: &str, threshold: f32, n: usize) -> Vec<Value> {
        if n == 0 {
            return Vec::new();
        }
        self.collect_matches(key, threshold, Some(n)).values()
    }

    fn collect_matches(&self, key: &str, threshold: f32, limit: Option<usize>) -> SimilarMatches<'_> {
        let threshold = if threshold.is_nan() {
            log::warn!("NaN similarity threshold, only exact matches will be returned");
            1.0
        } else {
            threshold.clamp(0.0, 1.0)
        };
        let (query, graphemes) = segment(key, self.case_insensitive);
        let metric = self.metric();

        log::trace!(
            "=== search {query:?} (threshold {threshold:.2}, limit {limit:?}, {} keys) ===",
            self.entries.len()
        );

        let mut candidates = Vec::new();
        for (&len, keys) in &self.by_length {
            let longest = len.max(graphemes.len());
            if metric.length_floor(graphemes.len(), len) > Metric::budget(threshold, longest) {
                log::trace!("  skip length bucket {len} ({} keys)", keys.len());
                continue;
            }
            for stored in keys {
                let Some(entry) = self.entries.get(stored) else {
                    continue;
                };
                if let Some(similarity) = metric.similarity(&graphemes, &entry.graphemes, threshold) {
                    log::trace!("  match {stored:?} sim={similarity:.3}");
                    candidates.push(SimilarMatch {
                        key: stored.as_str(),
                        value: entry.value,
                        similarity,
                        exact: *stored == query,
                    });
                }
            }
        }

        SimilarMatches::ranked(candidates, limit)
    }
}
