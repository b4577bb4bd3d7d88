//! Bidirectional string ↔ hash lookup table.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Interned strings keyed by their 64-bit hash.
///
/// Hashing is pure, so [`StringStore::hash`] works for strings that were
/// never added. Going back from a hash only works for added strings.
#[derive(Debug, Default)]
pub struct StringStore {
    strings: RwLock<HashMap<u64, String>>,
}

impl StringStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// First eight bytes (little endian) of the BLAKE3 digest of `s`.
    pub fn hash(s: &str) -> u64 {
        let digest = blake3::hash(s.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Intern `s` and return its hash.
    pub fn add(&self, s: &str) -> u64 {
        let key = Self::hash(s);
        let mut strings = self.strings.write().unwrap_or_else(PoisonError::into_inner);
        strings.entry(key).or_insert_with(|| s.to_string());
        key
    }

    /// The string interned under `key`, if any.
    pub fn get(&self, key: u64) -> Option<String> {
        self.strings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    pub fn contains(&self, s: &str) -> bool {
        self.contains_key(Self::hash(s))
    }

    pub fn contains_key(&self, key: u64) -> bool {
        self.strings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.strings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
