//! Bounded LRU cache of completed parse results.
//!
//! Keyed by a SHA-256 digest of the lower-cased input and the caller context,
//! so the cache never holds patient text as a key. One mutex guards the map;
//! a poisoned lock is recovered because entries are immutable `Arc`s.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use base64::Engine;
use sha2::{Digest, Sha256};

use crate::models::{ParseContext, ParseResult};

pub const DEFAULT_CAPACITY: usize = 100;

struct Entry {
    result: Arc<ParseResult>,
    last_used: u64,
}

struct Inner {
    entries: HashMap<String, Entry>,
    clock: u64,
}

pub struct ResultCache {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl ResultCache {
    /// A zero capacity disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: Mutex::new(Inner {
                entries: HashMap::with_capacity(capacity),
                clock: 0,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, key: &str) -> Option<Arc<ParseResult>> {
        let mut inner = self.lock();
        inner.clock += 1;
        let now = inner.clock;
        let hit = inner.entries.get_mut(key).map(|entry| {
            entry.last_used = now;
            Arc::clone(&entry.result)
        });
        hit
    }

    /// Insert, evicting the least recently used entry when full.
    pub fn insert(&self, key: String, result: Arc<ParseResult>) {
        if self.capacity == 0 {
            return;
        }
        let mut inner = self.lock();
        inner.clock += 1;
        let now = inner.clock;

        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.capacity {
            let oldest = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                inner.entries.remove(&oldest);
                tracing::debug!(capacity = self.capacity, "Result cache evicted LRU entry");
            }
        }

        inner.entries.insert(
            key,
            Entry {
                result,
                last_used: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Result cache lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// base64(SHA-256(lower-cased trimmed text, then canonical context JSON when
/// the context carries anything)).
pub fn cache_key(text: &str, context: &ParseContext) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.trim().to_lowercase().as_bytes());
    if !context.is_empty() {
        // Field order is fixed and `extra` is a BTreeMap, so this is canonical.
        let canonical = serde_json::to_string(context).unwrap_or_default();
        hasher.update([0u8]);
        hasher.update(canonical.as_bytes());
    }
    base64::engine::general_purpose::STANDARD.encode(hasher.finalize())
}
