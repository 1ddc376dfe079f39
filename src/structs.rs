use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Value type associated with every key.
pub type Value = i32;

/// A stored key together with its value and pre‑segmented graphemes.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub(crate) value: Value,
    /// Grapheme clusters of the (normalised) key, cached for similarity search.
    pub(crate) graphemes: Box<[String]>,
}

/// Edit costs used by the similarity metric.
///
/// Every cost lies in `[0, 1]`; the builder clamps anything outside that
/// range. With the defaults the metric is plain normalised Levenshtein
/// similarity.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyPenalties {
    pub insertion: f32,
    pub deletion: f32,
    pub substitution: f32,
    /// Cost of transposing two neighbouring graphemes, `None` disables swaps.
    pub swap: Option<f32>,
}

impl Default for FuzzyPenalties {
    fn default() -> Self {
        Self {
            insertion: 1.0,
            deletion: 1.0,
            substitution: 1.0,
            swap: None,
        }
    }
}

impl FuzzyPenalties {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn insertion(mut self, penalty: f32) -> Self {
        self.insertion = penalty;
        self
    }
    pub fn deletion(mut self, penalty: f32) -> Self {
        self.deletion = penalty;
        self
    }
    pub fn substitution(mut self, penalty: f32) -> Self {
        self.substitution = penalty;
        self
    }
    pub fn swap(mut self, penalty: f32) -> Self {
        self.swap = Some(penalty);
        self
    }

    /// Clamp every cost into `[0, 1]`, logging a warning for each change.
    pub(crate) fn finalize(self) -> Self {
        fn clamp(name: &str, cost: f32) -> f32 {
            let clamped = if cost.is_nan() { 1.0 } else { cost.clamp(0.0, 1.0) };
            if clamped != cost {
                log::warn!("{name} penalty {cost} is outside [0, 1], using {clamped}");
            }
            clamped
        }
        Self {
            insertion: clamp("insertion", self.insertion),
            deletion: clamp("deletion", self.deletion),
            substitution: clamp("substitution", self.substitution),
            swap: self.swap.map(|cost| clamp("swap", cost)),
        }
    }
}

/// Fuzzy string‑keyed dictionary.
///
/// Build one with [`FuzzyDict::new`] or [`FuzzyDictBuilder`](crate::FuzzyDictBuilder).
pub struct FuzzyDict {
    /// Normalised key → entry.
    pub(crate) entries: BTreeMap<String, Entry>,
    /// Grapheme length → keys of that length.
    pub(crate) by_length: BTreeMap<usize, BTreeSet<String>>,
    pub(crate) similarity: Option<&'static BTreeMap<(char, char), f32>>,
    pub(crate) penalties: FuzzyPenalties,
    pub(crate) case_insensitive: bool,
}

impl fmt::Debug for FuzzyDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = &mut f.debug_struct("FuzzyDict");
        s = s.field("penalties", &self.penalties);
        if self.similarity.is_some() {
            s = s.field("similarity_map", &true);
        }
        if self.case_insensitive {
            s = s.field("case_insensitive", &self.case_insensitive);
        }
        s.field("len", &self.entries.len()).finish()
    }
}

/// A single result of [`FuzzyDict::search`](crate::FuzzyDict::search).
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarMatch<'a> {
    /// Stored key that matched.
    pub key: &'a str,
    pub value: Value,
    /// Similarity to the query ∈ `[0,1]`.
    pub similarity: f32,
    /// `true` when the stored key equals the (normalised) query.
    pub exact: bool,
}

/// Ranked list of [`SimilarMatch`] items.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimilarMatches<'a> {
    pub(crate) inner: Vec<SimilarMatch<'a>>,
}
