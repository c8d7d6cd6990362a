//! Handler registry: dispatch key → handler.
//!
//! Populated through [`crate::BotBuilder`] before the bot is built; read-only afterwards, so
//! concurrent dispatches only ever take shared references.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

/// Mapping from dispatch key to handler. Registering an existing key replaces the handler.
pub struct Registry<K, H: ?Sized> {
    handlers: HashMap<K, Arc<H>>,
}

impl<K, H: ?Sized> Default for Registry<K, H> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, H: ?Sized> Registry<K, H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `key`; returns the handler it replaced, if any.
    pub fn register(&mut self, key: K, handler: Arc<H>) -> Option<Arc<H>> {
        self.handlers.insert(key, handler)
    }

    pub fn lookup<Q>(&self, key: &Q) -> Option<&Arc<H>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.handlers.get(key)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<H: ?Sized> Registry<String, H> {
    /// Handler whose key is the longest prefix of `data`.
    ///
    /// Longest key wins so the choice never depends on map iteration order. An empty key is a
    /// prefix of everything and acts as a catch-all.
    pub fn longest_prefix(&self, data: &str) -> Option<(&str, &Arc<H>)> {
        self.handlers
            .iter()
            .filter(|(key, _)| data.starts_with(key.as_str()))
            .max_by_key(|(key, _)| key.len())
            .map(|(key, handler)| (key.as_str(), handler))
    }
}
