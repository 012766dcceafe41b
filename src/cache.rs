//! Memoized tokenizer and tagger handles.
//!
//! Loading a tokenizer means file IO and possibly a Hub download; building a
//! tagger can be just as expensive. [`TokenizerCache`] constructs each named
//! resource at most once and hands out shared `Arc` handles afterwards.
//!
//! ```text
//! subword_tokenizer("bert-base-uncased")  ──► load ──► Arc ─┐
//! subword_tokenizer("bert-base-uncased")  ──────────────────┴─► same Arc
//! ```
//!
//! The cache is an explicit value; pass it to whatever needs resources.
//! [`TokenizerCache::global`] exists for callers that want one per process.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::{Lazy, OnceCell};

use crate::subword::{HfSubwordTokenizer, SubwordTokenizer};
use crate::sync::{lock, Mutex};
use crate::tagger::{load_tagger, Tagger};
use crate::Result;

/// Keyed cache of shared resources with at-most-once construction per key.
///
/// The map lock is held only to find or create a key's cell; construction
/// runs under that cell alone, so loading one key never blocks another.
/// A failed load leaves the cell empty and the next call retries.
pub struct ResourceCache<T: ?Sized> {
    cells: Mutex<HashMap<String, Arc<OnceCell<Arc<T>>>>>,
}

impl<T: ?Sized> Default for ResourceCache<T> {
    fn default() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: ?Sized> ResourceCache<T> {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, name: &str) -> Arc<OnceCell<Arc<T>>> {
        let mut cells = lock(&self.cells);
        Arc::clone(cells.entry(name.to_string()).or_default())
    }

    /// Return the cached handle for `name`, loading it on first use.
    pub fn get_or_try_init<F>(&self, name: &str, load: F) -> Result<Arc<T>>
    where
        F: FnOnce(&str) -> Result<Arc<T>>,
    {
        let cell = self.cell(name);
        if let Some(handle) = cell.get() {
            log::debug!("[cache] hit: {}", name);
            return Ok(Arc::clone(handle));
        }
        let handle = cell.get_or_try_init(|| load(name))?;
        Ok(Arc::clone(handle))
    }

    /// Cached handle for `name`, if already loaded.
    pub fn get(&self, name: &str) -> Option<Arc<T>> {
        lock(&self.cells)
            .get(name)
            .and_then(|cell| cell.get().cloned())
    }

    /// Insert a prebuilt handle. Returns `false` if `name` was already loaded.
    pub fn insert(&self, name: &str, handle: Arc<T>) -> bool {
        self.cell(name).set(handle).is_ok()
    }

    /// True if `name` has a loaded handle.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of loaded handles.
    pub fn len(&self) -> usize {
        lock(&self.cells)
            .values()
            .filter(|cell| cell.get().is_some())
            .count()
    }

    /// Check if nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cache of subword tokenizers and linguistic taggers, keyed by name.
#[derive(Default)]
pub struct TokenizerCache {
    subword: ResourceCache<dyn SubwordTokenizer>,
    taggers: ResourceCache<dyn Tagger>,
}

static GLOBAL: Lazy<TokenizerCache> = Lazy::new(TokenizerCache::new);

impl TokenizerCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache.
    pub fn global() -> &'static TokenizerCache {
        &GLOBAL
    }

    /// Shared subword tokenizer for a Hub model ID or local path.
    pub fn subword_tokenizer(&self, name_or_path: &str) -> Result<Arc<dyn SubwordTokenizer>> {
        self.subword.get_or_try_init(name_or_path, |name| {
            let start = Instant::now();
            let tokenizer = HfSubwordTokenizer::from_pretrained(name)?;
            log::info!("[cache] subword tokenizer {} ready in {:?}", name, start.elapsed());
            Ok(Arc::new(tokenizer) as Arc<dyn SubwordTokenizer>)
        })
    }

    /// Shared linguistic tagger by name.
    pub fn tagger(&self, name: &str) -> Result<Arc<dyn Tagger>> {
        self.taggers.get_or_try_init(name, |name| {
            let start = Instant::now();
            let tagger = load_tagger(name)?;
            log::info!("[cache] tagger {} ready in {:?}", name, start.elapsed());
            Ok(tagger)
        })
    }

    /// Register an externally built subword tokenizer under `name`.
    ///
    /// Returns `false` (keeping the existing handle) if `name` is already loaded.
    pub fn register_subword_tokenizer(
        &self,
        name: &str,
        tokenizer: Arc<dyn SubwordTokenizer>,
    ) -> bool {
        self.subword.insert(name, tokenizer)
    }

    /// Register an externally built tagger under `name`.
    ///
    /// Returns `false` (keeping the existing handle) if `name` is already loaded.
    pub fn register_tagger(&self, name: &str, tagger: Arc<dyn Tagger>) -> bool {
        self.taggers.insert(name, tagger)
    }

    /// Number of loaded subword tokenizers.
    pub fn subword_count(&self) -> usize {
        self.subword.len()
    }

    /// Number of loaded taggers.
    pub fn tagger_count(&self) -> usize {
        self.taggers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_loads_once_per_key() {
        let cache: ResourceCache<String> = ResourceCache::new();
        let loads = AtomicUsize::new(0);
        let load = |name: &str| {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(name.to_uppercase()))
        };

        let a = cache.get_or_try_init("bert", load).unwrap();
        let b = cache.get_or_try_init("bert", load).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        cache.get_or_try_init("roberta", load).unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let cache: ResourceCache<String> = ResourceCache::new();
        let err = cache
            .get_or_try_init("missing", |n| Err(Error::resource_load(n.to_string())))
            .unwrap_err();
        assert!(matches!(err, Error::ResourceLoad(_)));
        assert!(!cache.contains("missing"));

        let ok = cache
            .get_or_try_init("missing", |n| Ok(Arc::new(n.to_string())))
            .unwrap();
        assert_eq!(ok.as_str(), "missing");
    }

    #[test]
    fn test_insert_does_not_overwrite() {
        let cache: ResourceCache<str> = ResourceCache::new();
        assert!(cache.insert("k", Arc::from("first")));
        assert!(!cache.insert("k", Arc::from("second")));
        assert_eq!(&*cache.get("k").unwrap(), "first");
    }

    #[test]
    fn test_tagger_cache_shares_handle() {
        let cache = TokenizerCache::new();
        let a = cache.tagger("rule-en").unwrap();
        let b = cache.tagger("rule-en").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.tagger_count(), 1);
    }

    #[test]
    fn test_unknown_tagger_propagates() {
        let cache = TokenizerCache::new();
        assert!(matches!(
            cache.tagger("nope").err(),
            Some(Error::ResourceLoad(_))
        ));
        assert_eq!(cache.tagger_count(), 0);
    }
}
