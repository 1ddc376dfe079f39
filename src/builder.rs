use crate::{FuzzyDict, FuzzyPenalties, Value};
use itertools::Itertools;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Builder for [`FuzzyDict`].
///
/// ```rust
/// use fuzzy_dict::FuzzyDictBuilder;
///
/// let dict = FuzzyDictBuilder::new()
///     .case_insensitive(true)
///     .build([("Submit", 1), ("Cancel", 2)]);
///
/// assert_eq!(dict.lookup("SUBMIT"), Some(1));
/// assert_eq!(dict.lookup_similar("cancle", 0.5), Some(2));
/// ```
#[derive(Debug, Default, Clone)]
pub struct FuzzyDictBuilder {
    similarity: Option<&'static BTreeMap<(char, char), f32>>,
    penalties: FuzzyPenalties,
    case_insensitive: bool,
}

impl FuzzyDictBuilder {
    /// Start with plain normalised Levenshtein similarity, case‑sensitive.
    #[must_use]
    pub fn new() -> Self {
        Self {
            similarity: None,
            penalties: FuzzyPenalties::default(),
            case_insensitive: false,
        }
    }

    /// Provide a custom substitution similarity map.
    ///
    /// Pairs are looked up by the first `char` of each grapheme; a value of
    /// `s` lowers the substitution cost to `substitution * (1 - s)`.
    #[must_use]
    pub fn similarity(mut self, map: &'static BTreeMap<(char, char), f32>) -> Self {
        self.similarity = Some(map);
        self
    }

    /// Use the built‑in vowel/consonant similarity map.
    #[must_use]
    pub fn default_similarity(self) -> Self {
        self.similarity(&DEFAULT_SIMILARITY_MAP)
    }

    /// Set custom edit costs (see [`FuzzyPenalties`]).
    #[must_use]
    pub fn penalties(mut self, penalties: FuzzyPenalties) -> Self {
        self.penalties = penalties;
        self
    }

    /// Enable Unicode‑aware *case‑insensitive* keys.
    #[must_use]
    pub fn case_insensitive(mut self, value: bool) -> Self {
        self.case_insensitive = value;
        self
    }

    /// Builds a [`FuzzyDict`] holding the given entries. Later duplicates
    /// overwrite earlier ones.
    pub fn build<K>(self, entries: impl IntoIterator<Item = (K, Value)>) -> FuzzyDict
    where
        K: AsRef<str>,
    {
        let mut dict = FuzzyDict {
            entries: BTreeMap::new(),
            by_length: BTreeMap::new(),
            similarity: self.similarity,
            penalties: self.penalties.finalize(),
            case_insensitive: self.case_insensitive,
        };
        dict.extend(entries);
        dict
    }
}

/* -------------------------------------------------------------------------
 *  Default similarity map
 * ---------------------------------------------------------------------- */

/// Lazily‑initialised map of typical label typos.
///
/// Look‑alike glyphs (`l`/`1`, `o`/`0`, `s`/`5`, ...) are almost free to
/// substitute; swapping one vowel for another costs half a substitution.
pub static DEFAULT_SIMILARITY_MAP: LazyLock<BTreeMap<(char, char), f32>> = LazyLock::new(|| {
    const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];
    const LOOKALIKES: [(char, char); 12] = [
        ('l', '1'),
        ('l', 'i'),
        ('i', '1'),
        ('l', '|'),
        ('o', '0'),
        ('s', '5'),
        ('b', '8'),
        ('z', '2'),
        ('g', '9'),
        ('e', '3'),
        ('t', '7'),
        ('c', '('),
    ];

    let mut map = BTreeMap::new();
    for (a, b) in VOWELS.iter().copied().cartesian_product(VOWELS) {
        if a != b {
            map.insert((a, b), 0.5);
        }
    }
    for (a, b) in LOOKALIKES {
        map.insert((a, b), 0.9);
        map.insert((b, a), 0.9);
    }
    map
});
