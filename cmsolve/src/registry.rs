use std::{borrow::Borrow, hash::Hash, sync::Arc};

use crate::HashMap;

/// Named collection of shared items with a default entry.
pub struct Registry<T: ?Sized, K = String> {
    items: HashMap<K, Arc<T>>,
    default: Arc<T>,
}

impl<T: ?Sized, K> Registry<T, K> {
    pub fn with_default(default: Arc<T>) -> Self {
        Self {
            items: HashMap::new(),
            default,
        }
    }

    pub fn get_default(&self) -> Arc<T> {
        self.default.clone()
    }
}

impl<T: ?Sized, K> Registry<T, K>
where
    K: Hash + Eq,
{
    pub fn register(&mut self, key: K, item: Arc<T>) {
        self.items.insert(key, item);
    }

    pub fn get<Q>(&self, k: &Q) -> Option<Arc<T>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.get(k).cloned()
    }

    pub fn is_registered<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.items.contains_key(k)
    }

    /// Looks the key up, falling back to the default entry.
    pub fn get_or_default<Q>(&self, k: &Q) -> Arc<T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(k).unwrap_or_else(|| self.get_default())
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.items.keys()
    }
}
