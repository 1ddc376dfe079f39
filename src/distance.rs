//! Similarity metric.
//!
//! Keys and queries are compared grapheme by grapheme with a weighted
//! optimal‑string‑alignment distance (Levenshtein plus optional adjacent
//! swaps). The distance is normalised by the longer sequence:
//!
//! `similarity(a, b) = 1 - distance(a, b) / max(|a|, |b|)`
//!
//! so identical strings score `1.0` and, with unit costs, strings sharing no
//! grapheme at equal positions score `0.0`.

use crate::FuzzyPenalties;
use std::borrow::Cow;
use std::collections::BTreeMap;
use unicode_segmentation::UnicodeSegmentation;

/// Rounding tolerance for the distance budget and the final threshold check.
///
/// `1 - d / len` in `f32` can land one ulp below the same ratio written by
/// the caller (or a `f64` threshold narrowed to `f32`), which would reject a
/// candidate sitting exactly on the threshold.
const BUDGET_SLACK: f32 = 1e-4;

/// Normalise `text` and split it into extended grapheme clusters.
pub(crate) fn segment(text: &str, case_insensitive: bool) -> (String, Vec<String>) {
    let normalized: Cow<str> = if case_insensitive {
        Cow::Owned(text.to_lowercase())
    } else {
        Cow::Borrowed(text)
    };
    let graphemes = normalized.graphemes(true).map(str::to_owned).collect();
    (normalized.into_owned(), graphemes)
}

/// Edit costs of a single dictionary instance.
pub(crate) struct Metric<'a> {
    pub(crate) penalties: &'a FuzzyPenalties,
    pub(crate) similarity: Option<&'a BTreeMap<(char, char), f32>>,
}

impl Metric<'_> {
    #[inline]
    fn substitution_cost(&self, a: &str, b: &str) -> f32 {
        if a == b {
            return 0.0;
        }
        let sim = self
            .similarity
            .and_then(|map| {
                let a = a.chars().next()?;
                let b = b.chars().next()?;
                map.get(&(a, b)).copied()
            })
            .unwrap_or(0.0)
            .clamp(0.0, 1.0);
        self.penalties.substitution * (1.0 - sim)
    }

    /// Lower bound on the distance imposed by the length difference alone.
    ///
    /// Swaps and substitutions keep the length, so turning `source_len`
    /// graphemes into `target_len` takes at least that many insertions or
    /// deletions.
    #[inline]
    pub(crate) fn length_floor(&self, source_len: usize, target_len: usize) -> f32 {
        if source_len > target_len {
            (source_len - target_len) as f32 * self.penalties.deletion
        } else {
            (target_len - source_len) as f32 * self.penalties.insertion
        }
    }

    /// Largest distance that still yields `threshold` for a pair whose longer
    /// side has `longest` graphemes.
    #[inline]
    pub(crate) fn budget(threshold: f32, longest: usize) -> f32 {
        (1.0 - threshold) * longest as f32 + BUDGET_SLACK
    }

    /// Weighted edit distance from `source` to `target`, or `None` once it is
    /// certain to exceed `max_distance`.
    pub(crate) fn distance<A, B>(&self, source: &[A], target: &[B], max_distance: f32) -> Option<f32>
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        // Common prefix and suffix never change the optimal alignment.
        let prefix = source
            .iter()
            .zip(target)
            .take_while(|(a, b)| a.as_ref() == b.as_ref())
            .count();
        let (source, target) = (&source[prefix..], &target[prefix..]);
        let suffix = source
            .iter()
            .rev()
            .zip(target.iter().rev())
            .take_while(|(a, b)| a.as_ref() == b.as_ref())
            .count();
        let source = &source[..source.len() - suffix];
        let target = &target[..target.len() - suffix];

        let FuzzyPenalties {
            insertion,
            deletion,
            swap,
            ..
        } = *self.penalties;

        if source.is_empty() || target.is_empty() {
            let d = self.length_floor(source.len(), target.len());
            return (d <= max_distance).then_some(d);
        }

        let width = target.len() + 1;
        let mut before_prev = vec![0.0f32; width];
        let mut prev: Vec<f32> = (0..width).map(|j| j as f32 * insertion).collect();
        let mut curr = vec![0.0f32; width];
        let mut prev_min = 0.0f32;

        for i in 1..=source.len() {
            let s = source[i - 1].as_ref();
            curr[0] = i as f32 * deletion;
            let mut row_min = curr[0];
            for j in 1..width {
                let t = target[j - 1].as_ref();
                let mut cost = (prev[j - 1] + self.substitution_cost(s, t))
                    .min(prev[j] + deletion)
                    .min(curr[j - 1] + insertion);
                if let Some(swap) = swap {
                    if i > 1
                        && j > 1
                        && s == target[j - 2].as_ref()
                        && source[i - 2].as_ref() == t
                    {
                        cost = cost.min(before_prev[j - 2] + swap);
                    }
                }
                curr[j] = cost;
                row_min = row_min.min(cost);
            }

            // A swap jumps over one row, so both rows must be out of budget.
            let floor = if swap.is_some() {
                row_min.min(prev_min)
            } else {
                row_min
            };
            if floor > max_distance {
                log::trace!("distance aborted at row {i}: {floor:.3} > {max_distance:.3}");
                return None;
            }
            prev_min = row_min;
            std::mem::swap(&mut before_prev, &mut prev);
            std::mem::swap(&mut prev, &mut curr);
        }

        let d = prev[target.len()];
        (d <= max_distance).then_some(d)
    }

    /// Normalised similarity of two grapheme sequences, or `None` when it is
    /// below `threshold`.
    pub(crate) fn similarity<A, B>(&self, source: &[A], target: &[B], threshold: f32) -> Option<f32>
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let longest = source.len().max(target.len());
        if longest == 0 {
            return Some(1.0);
        }
        let budget = Self::budget(threshold, longest);
        if self.length_floor(source.len(), target.len()) > budget {
            return None;
        }
        let d = self.distance(source, target, budget)?;
        let similarity = (1.0 - d / longest as f32).clamp(0.0, 1.0);
        (similarity + BUDGET_SLACK >= threshold).then_some(similarity)
    }
}
