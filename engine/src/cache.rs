//! Parse cache.
//!
//! Memoizes source text → shared immutable AST so repeated evaluation of the
//! same expression string skips re-parsing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use syntax::{Expr, ParseError, parse};
use tracing::trace;

/// Eviction policy for the parse cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Keep every parsed expression for the life of the cache. Simplest;
    /// unbounded growth when expression texts are open-ended.
    Unbounded,
    /// Keep at most `capacity` entries, evicting the least recently used
    /// past that. Safe for long-running services.
    Bounded(usize),
}

struct Slot {
    expr: Arc<Expr>,
    last_used: u64,
}

pub struct ParseCache {
    policy: CachePolicy,
    clock: AtomicU64,
    entries: Mutex<HashMap<String, Slot>>,
}

impl ParseCache {
    pub fn new(policy: CachePolicy) -> Self {
        ParseCache {
            policy,
            clock: AtomicU64::new(0),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the shared AST for `text`, parsing it on first sight.
    ///
    /// Misses parse outside the lock: two racing callers may both pay the
    /// parse, but the first insertion wins and every caller receives the
    /// same canonical `Arc`. Parse errors are not cached; retrying invalid
    /// text cannot succeed and reports the same error each time.
    pub fn get_or_parse(&self, text: &str) -> Result<Arc<Expr>, ParseError> {
        if let Some(hit) = self.get(text) {
            trace!(text, "parse cache hit");
            return Ok(hit);
        }

        trace!(text, "parse cache miss");
        let parsed = Arc::new(parse(text)?);
        Ok(self.insert(text, parsed))
    }

    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, text: &str) -> Option<Arc<Expr>> {
        let stamp = self.tick();
        let mut entries = self.lock_entries();
        let slot = entries.get_mut(text)?;
        slot.last_used = stamp;
        Some(slot.expr.clone())
    }

    fn insert(&self, text: &str, parsed: Arc<Expr>) -> Arc<Expr> {
        let stamp = self.tick();
        let mut entries = self.lock_entries();

        // A racer may have inserted while we parsed; its entry is canonical.
        let slot = entries.entry(text.to_string()).or_insert_with(|| Slot {
            expr: parsed,
            last_used: stamp,
        });
        slot.last_used = stamp;
        let canonical = slot.expr.clone();

        if let CachePolicy::Bounded(capacity) = self.policy {
            evict_over(&mut entries, capacity.max(1));
        }

        canonical
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Slot>> {
        // A panic while holding the lock leaves the map structurally intact;
        // keep serving rather than poisoning every later parse.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn evict_over(entries: &mut HashMap<String, Slot>, capacity: usize) {
    // Linear scan per eviction; bounded capacities are small.
    while entries.len() > capacity {
        let oldest = entries
            .iter()
            .min_by_key(|(_, slot)| slot.last_used)
            .map(|(text, _)| text.clone());
        match oldest {
            Some(text) => {
                entries.remove(&text);
            }
            None => break,
        }
    }
}
