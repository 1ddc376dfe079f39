use crate::{SimilarMatch, SimilarMatches, Value};
use itertools::Itertools;
use std::cmp::Ordering;

/// Ranking shared by every multi‑result lookup: higher similarity first,
/// then an exact match, then the lexicographically smallest key.
#[inline]
pub(crate) fn rank(left: &SimilarMatch<'_>, right: &SimilarMatch<'_>) -> Ordering {
    right
        .similarity
        .total_cmp(&left.similarity)
        .then_with(|| right.exact.cmp(&left.exact))
        .then_with(|| left.key.cmp(right.key))
}

impl<'a> SimilarMatches<'a> {
    /// Rank the collected candidates and keep the best `limit` of them.
    pub(crate) fn ranked(candidates: Vec<SimilarMatch<'a>>, limit: Option<usize>) -> Self {
        let inner = match limit {
            Some(n) if n < candidates.len() => candidates.into_iter().k_smallest_by(n, rank).collect(),
            _ => candidates.into_iter().sorted_by(rank).collect(),
        };
        Self { inner }
    }

    /// Keep only the first `n` matches.
    pub fn truncate(&mut self, n: usize) {
        self.inner.truncate(n);
    }

    /// Values of the matches, in rank order.
    #[must_use]
    pub fn values(&self) -> Vec<Value> {
        self.inner.iter().map(|m| m.value).collect()
    }

    /// Best match, if any.
    #[must_use]
    pub fn best(&self) -> Option<&SimilarMatch<'a>> {
        self.inner.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimilarMatch<'a>> {
        self.inner.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<SimilarMatch<'a>> {
        self.inner
    }
}

impl<'a> IntoIterator for SimilarMatches<'a> {
    type Item = SimilarMatch<'a>;
    type IntoIter = std::vec::IntoIter<SimilarMatch<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'s, 'a> IntoIterator for &'s SimilarMatches<'a> {
    type Item = &'s SimilarMatch<'a>;
    type IntoIter = std::slice::Iter<'s, SimilarMatch<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
