use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::Error;

#[async_trait(?Send)]
pub trait Fetcher {
    type Value;

    async fn fetch(&self, key: &str) -> Result<Self::Value, Error>;
}

/// What a reader sees of a cache entry
///
/// `data` is the last value fetched or optimistically written, `error` the
/// failure of the latest fetch if it failed. Both can be set at once: a
/// failed revalidation keeps the previous value around.
#[derive(Debug)]
pub struct Snapshot<V> {
    pub data: Option<Arc<V>>,
    pub error: Option<Arc<Error>>,

    /// if true, `data` has not been confirmed by the server yet
    pub optimistic: bool,
}

impl<V> Snapshot<V> {
    pub fn empty() -> Snapshot<V> {
        Snapshot {
            data: None,
            error: None,
            optimistic: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.data.is_none() && self.error.is_none()
    }
}

impl<V> Clone for Snapshot<V> {
    fn clone(&self) -> Snapshot<V> {
        Snapshot {
            data: self.data.clone(),
            error: self.error.clone(),
            optimistic: self.optimistic,
        }
    }
}

type Listener = Box<dyn Fn(&str)>;

/// Revalidating cache holding one value per key
///
/// Entries are always replaced whole under the lock, and the lock is never
/// held across a fetch.
pub struct Cache<F: Fetcher> {
    fetcher: F,
    entries: Mutex<HashMap<String, Snapshot<F::Value>>>,
    listeners: Mutex<Vec<Listener>>,
}

impl<F: Fetcher> Cache<F> {
    pub fn new(fetcher: F) -> Cache<F> {
        Cache {
            fetcher,
            entries: Mutex::new(HashMap::new()),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Calls `f` with the key every time an entry changes
    pub fn on_change(&self, f: impl Fn(&str) + 'static) {
        self.listeners.lock().push(Box::new(f));
    }

    fn notify(&self, key: &str) {
        for l in self.listeners.lock().iter() {
            l(key);
        }
    }

    /// Current state of `key`, without ever fetching
    pub fn peek(&self, key: &str) -> Snapshot<F::Value> {
        self.entries
            .lock()
            .get(key)
            .cloned()
            .unwrap_or_else(Snapshot::empty)
    }

    /// Current state of `key`, fetching it first if it was never loaded
    pub async fn read(&self, key: &str) -> Snapshot<F::Value> {
        if let Some(snap) = self.entries.lock().get(key) {
            return snap.clone();
        }
        self.revalidate(key).await
    }

    /// Replaces the value of `key` ahead of the server
    ///
    /// With `revalidate` set, the key is fetched again right away, so the
    /// optimistic value only lives until the server answers.
    pub async fn optimistic_update(
        &self,
        key: &str,
        value: F::Value,
        revalidate: bool,
    ) -> Snapshot<F::Value> {
        let snap = {
            let mut entries = self.entries.lock();
            let entry = entries
                .entry(String::from(key))
                .or_insert_with(Snapshot::empty);
            entry.data = Some(Arc::new(value));
            entry.optimistic = true;
            entry.clone()
        };
        tracing::trace!(key, "applied optimistic value");
        self.notify(key);
        match revalidate {
            true => self.revalidate(key).await,
            false => snap,
        }
    }

    /// Fetches `key` and replaces whatever was cached with the result
    pub async fn revalidate(&self, key: &str) -> Snapshot<F::Value> {
        let res = self.fetcher.fetch(key).await;
        let snap = {
            let mut entries = self.entries.lock();
            let entry = entries
                .entry(String::from(key))
                .or_insert_with(Snapshot::empty);
            match res {
                Ok(value) => {
                    entry.data = Some(Arc::new(value));
                    entry.error = None;
                    entry.optimistic = false;
                }
                Err(err) => {
                    tracing::warn!(key, %err, "revalidation failed, keeping stale value");
                    entry.error = Some(Arc::new(err));
                }
            }
            entry.clone()
        };
        self.notify(key);
        snap
    }
}
