//! Integer‑handle boundary for foreign callers.
//!
//! A binding layer (JNI, C ABI, ...) cannot hold Rust values, so every
//! dictionary lives inside a [`DictRegistry`] and callers only pass around a
//! [`Handle`]. Results use plain 32‑bit integers: a missing key is reported
//! as [`NOT_FOUND`].
//!
//! ```rust
//! use fuzzy_dict::{DictRegistry, NOT_FOUND};
//!
//! let registry = DictRegistry::new();
//! let handle = registry.create();
//! registry.insert(handle, "submit", 1)?;
//! assert_eq!(registry.lookup(handle, "submit")?, 1);
//! assert_eq!(registry.lookup(handle, "cancel")?, NOT_FOUND);
//! registry.destroy(handle)?;
//! assert!(registry.size(handle).is_err());
//! # Ok::<(), fuzzy_dict::DictError>(())
//! ```

use crate::{DictError, FuzzyDictBuilder, Result, SharedFuzzyDict};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Sentinel returned by the `lookup*` calls when nothing matches.
///
/// Values stored as `-1` are indistinguishable from a miss at this
/// boundary; use [`FuzzyDict`](crate::FuzzyDict) directly to tell them apart.
pub const NOT_FOUND: i32 = -1;

/// Opaque identifier of a dictionary owned by a [`DictRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for Handle {
    fn from(raw: u64) -> Self {
        Handle(raw)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owner of every dictionary reachable through a [`Handle`].
///
/// Handles start at `1` and are never reused, so a destroyed handle keeps
/// failing with [`DictError::UnknownHandle`].
#[derive(Debug)]
pub struct DictRegistry {
    next_handle: AtomicU64,
    instances: RwLock<HashMap<Handle, SharedFuzzyDict>>,
}

impl Default for DictRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DictRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_handle: AtomicU64::new(1),
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// Creates an empty dictionary with default settings.
    pub fn create(&self) -> Handle {
        self.create_with(FuzzyDictBuilder::new())
    }

    /// Creates an empty dictionary configured by `builder`.
    pub fn create_with(&self, builder: FuzzyDictBuilder) -> Handle {
        let handle = Handle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        self.instances
            .write()
            .insert(handle, SharedFuzzyDict::with_builder(builder));
        log::debug!("created dictionary {handle}");
        handle
    }

    /// Drops the dictionary behind `handle`.
    pub fn destroy(&self, handle: Handle) -> Result<()> {
        match self.instances.write().remove(&handle) {
            Some(_) => {
                log::debug!("destroyed dictionary {handle}");
                Ok(())
            }
            None => Err(DictError::UnknownHandle(handle)),
        }
    }

    /// Number of live dictionaries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.read().is_empty()
    }

    /// Shared handle to the dictionary; the registry lock is released before
    /// the dictionary is touched.
    pub fn get(&self, handle: Handle) -> Result<SharedFuzzyDict> {
        self.instances
            .read()
            .get(&handle)
            .cloned()
            .ok_or(DictError::UnknownHandle(handle))
    }

    pub fn insert(&self, handle: Handle, key: &str, value: i32) -> Result<()> {
        self.get(handle)?.insert(key, value);
        Ok(())
    }

    pub fn lookup(&self, handle: Handle, key: &str) -> Result<i32> {
        Ok(self.get(handle)?.lookup(key).unwrap_or(NOT_FOUND))
    }

    pub fn lookup_similar(&self, handle: Handle, key: &str, threshold: f64) -> Result<i32> {
        Ok(self
            .get(handle)?
            .lookup_similar(key, threshold as f32)
            .unwrap_or(NOT_FOUND))
    }

    /// Rejects a negative `n` with [`DictError::InvalidArgument`].
    pub fn lookup_similar_n(&self, handle: Handle, key: &str, threshold: f64, n: i32) -> Result<Vec<i32>> {
        let dict = self.get(handle)?;
        let n = usize::try_from(n)
            .map_err(|_| DictError::invalid_argument(format!("result count must be >= 0, got {n}")))?;
        Ok(dict.lookup_similar_n(key, threshold as f32, n))
    }

    pub fn erase(&self, handle: Handle, key: &str) -> Result<()> {
        self.get(handle)?.erase(key);
        Ok(())
    }

    /// Number of keys, saturating at `i32::MAX`.
    pub fn size(&self, handle: Handle) -> Result<i32> {
        let size = self.get(handle)?.size();
        Ok(i32::try_from(size).unwrap_or(i32::MAX))
    }

    pub fn empty(&self, handle: Handle) -> Result<bool> {
        Ok(self.get(handle)?.empty())
    }
}
