//! Keyed mutual exclusion for long-running interactive flows.
//!
//! A [`KeyedLocks`] hands out at most one [`KeyedGuard`] per key. The key is released
//! when the guard is dropped, so every exit path of the holder (early return, `?`,
//! panic) frees it without explicit cleanup.

use dashmap::DashSet;
use std::{fmt::Debug, hash::Hash, sync::Arc};

/// Set of currently held keys.
#[derive(Debug)]
pub struct KeyedLocks<K: Eq + Hash> {
    held: Arc<DashSet<K>>,
}

impl<K: Eq + Hash> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self {
            held: Arc::new(DashSet::new()),
        }
    }
}

impl<K> KeyedLocks<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Creates an empty lock set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the lock for `key`, or returns `None` if someone already holds it.
    #[must_use]
    pub fn try_acquire(&self, key: K) -> Option<KeyedGuard<K>> {
        if self.held.insert(key.clone()) {
            tracing::debug!("acquired lock for {key:?}");
            Some(KeyedGuard {
                held: Arc::clone(&self.held),
                key,
            })
        } else {
            None
        }
    }

    /// Whether `key` is currently held.
    #[must_use]
    pub fn is_held(&self, key: &K) -> bool {
        self.held.contains(key)
    }
}

/// Proof of holding one key; releases it on drop.
#[derive(Debug)]
pub struct KeyedGuard<K>
where
    K: Eq + Hash + Debug,
{
    held: Arc<DashSet<K>>,
    key: K,
}

impl<K> KeyedGuard<K>
where
    K: Eq + Hash + Debug,
{
    /// The key this guard holds.
    pub const fn key(&self) -> &K {
        &self.key
    }
}

impl<K> Drop for KeyedGuard<K>
where
    K: Eq + Hash + Debug,
{
    fn drop(&mut self) {
        self.held.remove(&self.key);
        tracing::debug!("released lock for {:?}", self.key);
    }
}
