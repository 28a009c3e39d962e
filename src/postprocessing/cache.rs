//! Bounded LRU of parse results keyed on the raw response text.
//! Message views re-render often; the raw text of a message does not change.

use crate::postprocessing::blocks::ResponseBlock;
use crate::postprocessing::interpreter::ResponseParser;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
}

struct CacheInner {
    entries: LruCache<String, Arc<[ResponseBlock]>>,
    hits: u64,
    misses: u64,
}

/// Public handle to the cache. Clones share the same entries.
#[derive(Clone)]
pub struct ParseCache {
    parser: ResponseParser,
    inner: Arc<Mutex<CacheInner>>,
}

impl ParseCache {
    pub fn new(parser: ResponseParser, capacity: NonZeroUsize) -> Self {
        Self {
            parser,
            inner: Arc::new(Mutex::new(CacheInner {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            })),
        }
    }

    pub fn parser(&self) -> &ResponseParser {
        &self.parser
    }

    pub fn get_or_parse(&self, raw: &str) -> Arc<[ResponseBlock]> {
        let key = raw.to_owned();
        {
            let mut inner = self.lock();
            if let Some(blocks) = inner.entries.get(&key).cloned() {
                inner.hits += 1;
                return blocks;
            }
            inner.misses += 1;
        }

        // Parse outside the lock; a concurrent miss on the same key only
        // costs a duplicate parse.
        let blocks: Arc<[ResponseBlock]> = self.parser.parse(raw).into();
        debug!(blocks = blocks.len(), input_len = raw.len(), "Parsed agent response");

        self.lock().entries.put(key, Arc::clone(&blocks));
        blocks
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            len: inner.entries.len(),
        }
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        debug!("Parse cache cleared");
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
