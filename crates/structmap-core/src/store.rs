//! Thread-safe store of finalized type maps.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use structmap_model::{ConfigError, Result, TypeName};

use crate::typemap::TypeMap;

/// Store key: a type pair plus an optional distinguishing name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypePair {
    pub source: TypeName,
    pub destination: TypeName,
    pub name: Option<String>,
}

impl TypePair {
    pub fn new(source: TypeName, destination: TypeName) -> Self {
        Self {
            source,
            destination,
            name: None,
        }
    }

    pub fn named(source: TypeName, destination: TypeName, name: impl Into<String>) -> Self {
        Self {
            source,
            destination,
            name: Some(name.into()),
        }
    }

    fn of(map: &TypeMap) -> Self {
        Self {
            source: map.source().clone(),
            destination: map.destination().clone(),
            name: map.name().map(str::to_string),
        }
    }
}

/// Concurrent registry of finalized [`TypeMap`]s. Maps are immutable once
/// stored, so readers share them without further locking.
#[derive(Debug, Default)]
pub struct TypeMapStore {
    inner: RwLock<HashMap<TypePair, Arc<TypeMap>>>,
}

impl TypeMapStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pair: &TypePair) -> Option<Arc<TypeMap>> {
        let maps = self.inner.read().unwrap_or_else(|e| e.into_inner());
        maps.get(pair).map(Arc::clone)
    }

    /// Registers a finalized map. A map already stored under the same key is
    /// a configuration error, not a replacement.
    pub fn put(&self, map: TypeMap) -> Result<Arc<TypeMap>> {
        let pair = TypePair::of(&map);
        let mut maps = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if maps.contains_key(&pair) {
            return Err(ConfigError::DuplicateTypeMap {
                source: pair.source.to_string(),
                destination: pair.destination.to_string(),
                name: pair.name,
            });
        }
        let map = Arc::new(map);
        maps.insert(pair, Arc::clone(&map));
        tracing::trace!(source = %map.source(), destination = %map.destination(), "type map stored");
        Ok(map)
    }

    /// Returns the stored map for `pair`, building and storing it with
    /// `build` when absent. The build runs under the write lock, so at most
    /// one map is ever created per key.
    pub fn get_or_create<F>(&self, pair: TypePair, build: F) -> Result<Arc<TypeMap>>
    where
        F: FnOnce() -> Result<TypeMap>,
    {
        let mut maps = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if let Some(existing) = maps.get(&pair) {
            return Ok(Arc::clone(existing));
        }
        let map = Arc::new(build()?);
        maps.insert(pair, Arc::clone(&map));
        Ok(map)
    }

    pub fn evict(&self, pair: &TypePair) -> Option<Arc<TypeMap>> {
        let mut maps = self.inner.write().unwrap_or_else(|e| e.into_inner());
        maps.remove(pair)
    }

    /// All stored maps, ordered by key for deterministic iteration.
    pub fn snapshot(&self) -> Vec<Arc<TypeMap>> {
        let maps = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let mut entries: Vec<(TypePair, Arc<TypeMap>)> = maps
            .iter()
            .map(|(pair, map)| (pair.clone(), Arc::clone(map)))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.into_iter().map(|(_, map)| map).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|maps| maps.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut maps = self.inner.write().unwrap_or_else(|e| e.into_inner());
        maps.clear();
    }
}
