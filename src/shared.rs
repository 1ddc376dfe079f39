use crate::{FuzzyDict, FuzzyDictBuilder, Value};
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread‑safe handle to a [`FuzzyDict`].
///
/// Lookups take a read lock and run concurrently; `insert`, `erase` and
/// `clear` take the write lock. Clones share the same dictionary.
///
/// ```rust
/// use fuzzy_dict::SharedFuzzyDict;
///
/// let dict = SharedFuzzyDict::new();
/// let writer = dict.clone();
/// std::thread::spawn(move || writer.insert("ok", 7)).join().unwrap();
/// assert_eq!(dict.lookup_similar("okk", 0.5), Some(7));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedFuzzyDict {
    inner: Arc<RwLock<FuzzyDict>>,
}

impl From<FuzzyDict> for SharedFuzzyDict {
    fn from(dict: FuzzyDict) -> Self {
        Self {
            inner: Arc::new(RwLock::new(dict)),
        }
    }
}

impl SharedFuzzyDict {
    #[must_use]
    pub fn new() -> Self {
        FuzzyDict::new().into()
    }

    #[must_use]
    pub fn with_builder(builder: FuzzyDictBuilder) -> Self {
        builder.build(std::iter::empty::<(&str, Value)>()).into()
    }

    pub fn insert(&self, key: &str, value: Value) -> Option<Value> {
        self.inner.write().insert(key, value)
    }

    pub fn erase(&self, key: &str) -> Option<Value> {
        self.inner.write().erase(key)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<Value> {
        self.inner.read().lookup(key)
    }

    #[must_use]
    pub fn lookup_similar(&self, key: &str, threshold: f32) -> Option<Value> {
        self.inner.read().lookup_similar(key, threshold)
    }

    #[must_use]
    pub fn lookup_similar_n(&self, key: &str, threshold: f32, n: usize) -> Vec<Value> {
        self.inner.read().lookup_similar_n(key, threshold, n)
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.read().size()
    }

    #[must_use]
    pub fn empty(&self) -> bool {
        self.inner.read().empty()
    }

    /// Run `f` against the dictionary under a single read lock, e.g. to
    /// inspect [`FuzzyDict::search`] results that borrow from it.
    pub fn read<R>(&self, f: impl FnOnce(&FuzzyDict) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` under a single write lock so several mutations appear atomic.
    pub fn write<R>(&self, f: impl FnOnce(&mut FuzzyDict) -> R) -> R {
        f(&mut self.inner.write())
    }
}
