//! # Key-Value Store Access
//!
//! This module defines the `KvStore` trait, the contract between the
//! resolution engine and whatever actually holds the repository data. The
//! engine never talks to a concrete store directly; every operation receives
//! a `&dyn KvStore`, which keeps the core testable against an in-memory
//! fake and lets deployments swap the backing store without touching the
//! resolution logic.
//!
//! ## Implementations
//!
//! - **`MemoryStore`**: A `HashMap`-backed store. Used by unit and
//!   integration tests, and by embedders that already hold the repository
//!   data in memory. Supports injecting read failures for individual keys
//!   so probe-degradation paths can be exercised.
//!
//! - **`DirStore`**: Serves keys from a local directory tree laid out
//!   exactly like the store (`<root-dir>/<key>` is a file). This is what
//!   the CLI uses: a repository checkout on disk behaves like the real
//!   store without any network dependency.

use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::PathBuf;

/// Read-only contract for the key-value store holding repository data.
///
/// `list_child_keys` returns the immediate child segments under a prefix,
/// not full keys: listing `a/b` over keys `a/b/0/name` and `a/b/1/name`
/// yields `["0", "1"]`.
pub trait KvStore: Send + Sync {
    /// Fetch the value stored at `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// List the immediate child segments under `prefix`, sorted.
    ///
    /// An absent prefix is an empty listing, not an error.
    fn list_child_keys(&self, prefix: &str) -> Result<Vec<String>>;
}

/// In-memory store for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
    /// Keys whose reads fail with a store error, for exercising probe
    /// degradation.
    fail_keys: HashSet<String>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or update an entry
    pub fn put<K: Into<String>, V: Into<Vec<u8>>>(&mut self, key: K, value: V) {
        self.entries.insert(key.into(), value.into());
    }

    /// Add or update an entry with string content
    pub fn put_string<K: Into<String>>(&mut self, key: K, value: &str) {
        self.put(key, value.as_bytes().to_vec());
    }

    /// Make every subsequent read of `key` fail with a store error
    pub fn fail_on<K: Into<String>>(&mut self, key: K) {
        self.fail_keys.insert(key.into());
    }

    /// Check if a key exists
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if self.fail_keys.contains(key) {
            return Err(Error::Store {
                key: key.to_string(),
                message: "injected read failure".to_string(),
            });
        }
        Ok(self.entries.get(key).cloned())
    }

    fn list_child_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let prefix = format!("{}/", prefix.trim_end_matches('/'));
        let mut children = BTreeSet::new();
        for key in self.entries.keys() {
            if let Some(rest) = key.strip_prefix(&prefix) {
                let segment = rest.split('/').next().unwrap_or(rest);
                if !segment.is_empty() {
                    children.insert(segment.to_string());
                }
            }
        }
        Ok(children.into_iter().collect())
    }
}

/// Store backed by a local directory tree with the store's key layout.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Create a store serving keys from files beneath `root`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in key.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path
    }
}

impl KvStore for DirStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.key_path(key);
        if !path.is_file() {
            return Ok(None);
        }
        std::fs::read(&path).map(Some).map_err(|err| Error::Store {
            key: key.to_string(),
            message: err.to_string(),
        })
    }

    fn list_child_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let path = self.key_path(prefix);
        if !path.is_dir() {
            return Ok(Vec::new());
        }
        let mut children = Vec::new();
        let entries = std::fs::read_dir(&path).map_err(|err| Error::Store {
            key: prefix.to_string(),
            message: err.to_string(),
        })?;
        for entry in entries {
            let entry = entry.map_err(|err| Error::Store {
                key: prefix.to_string(),
                message: err.to_string(),
            })?;
            if let Some(name) = entry.file_name().to_str() {
                children.push(name.to_string());
            }
        }
        children.sort();
        Ok(children)
    }
}
