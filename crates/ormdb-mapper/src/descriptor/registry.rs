//! Process-wide metadata cache.
//!
//! Descriptors are resolved lazily on first request and kept for the life of
//! the registry; nothing is evicted. Each descriptor is published as one
//! `Arc`, so a reader sees either no entry or a complete one. Two threads
//! resolving the same new type may both compute it; the results are
//! identical and the later insert simply replaces the earlier one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use tracing::{debug, trace};

use super::TypeDescriptor;
use crate::config::RegistryConfig;
use crate::error::Error;
use crate::shape::{Record, Shape};

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Cache statistics.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheStats {
    /// Get hit count.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Get miss count.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Calculate hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total > 0.0 {
            hits / total
        } else {
            0.0
        }
    }
}

/// Metadata cache keyed by qualified type name.
pub struct Registry {
    descriptors: DashMap<&'static str, Arc<TypeDescriptor>>,
    config: RegistryConfig,
    stats: CacheStats,
}

impl Registry {
    /// Create an empty registry with default settings.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with the given settings.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            descriptors: DashMap::with_capacity(config.initial_capacity),
            config,
            stats: CacheStats::default(),
        }
    }

    /// The process-wide registry, created on first use.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    /// Registry settings.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Resolve the descriptor for a shape.
    ///
    /// Returns the cached descriptor when present. Fails with
    /// [`Error::EmptyType`] for an absent shape or one without an identity,
    /// and [`Error::NoFields`] for a shape that declares nothing.
    pub fn resolve(&self, shape: Option<&'static Shape>) -> Result<Arc<TypeDescriptor>, Error> {
        let shape = match shape {
            Some(shape) if !shape.name.is_empty() => shape,
            _ => return Err(Error::EmptyType),
        };

        // Field-less shapes are never cached, so they count as neither.
        if shape.fields.is_empty() {
            return Err(Error::NoFields(shape.name.to_string()));
        }

        if let Some(found) = self.descriptors.get(shape.name) {
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(found.value()));
        }
        self.stats.misses.fetch_add(1, Ordering::Relaxed);

        trace!(entity = shape.name, "resolving type descriptor");
        let descriptor = Arc::new(TypeDescriptor::build(shape, self.config.column_order));
        self.descriptors.insert(shape.name, Arc::clone(&descriptor));

        debug!(
            entity = shape.name,
            exported = descriptor.exported_fields().len(),
            private = descriptor.private_fields().len(),
            columns = descriptor.column_map().len(),
            "cached type descriptor"
        );

        Ok(descriptor)
    }

    /// Resolve the descriptor for a record's type.
    pub fn describe(&self, record: &dyn Record) -> Result<Arc<TypeDescriptor>, Error> {
        self.resolve(Some(record.shape()))
    }

    /// Get an already resolved descriptor without resolving.
    pub fn get(&self, type_name: &str) -> Option<Arc<TypeDescriptor>> {
        self.descriptors
            .get(type_name)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Check if a type has been resolved.
    pub fn contains(&self, type_name: &str) -> bool {
        self.descriptors.contains_key(type_name)
    }

    /// Number of resolved types.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Check if nothing has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Get cache statistics.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnOrder;
    use crate::shape::{FieldDecl, TypeRef};

    static USER: Shape = Shape {
        name: "tests::User",
        fields: &[
            FieldDecl::column("ID", TypeRef::INT64, "id"),
            FieldDecl::column("Name", TypeRef::STRING, "name"),
            FieldDecl::new("secret", TypeRef::STRING),
        ],
    };

    static EMPTY: Shape = Shape {
        name: "tests::Empty",
        fields: &[],
    };

    static NAMELESS: Shape = Shape {
        name: "",
        fields: &[FieldDecl::new("ID", TypeRef::INT64)],
    };

    #[test]
    fn test_resolve_and_cache() {
        let registry = Registry::new();
        assert!(registry.is_empty());

        let first = registry.resolve(Some(&USER)).unwrap();
        let second = registry.resolve(Some(&USER)).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("tests::User"));
        assert_eq!(registry.stats().misses(), 1);
        assert_eq!(registry.stats().hits(), 1);
        assert_eq!(registry.stats().hit_rate(), 0.5);
    }

    #[test]
    fn test_empty_type() {
        let registry = Registry::new();
        assert!(matches!(registry.resolve(None), Err(Error::EmptyType)));
        assert!(matches!(
            registry.resolve(Some(&NAMELESS)),
            Err(Error::EmptyType)
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_no_fields() {
        let registry = Registry::new();
        let err = registry.resolve(Some(&EMPTY)).unwrap_err();
        assert!(matches!(err, Error::NoFields(ref name) if name == "tests::Empty"));
        assert!(!registry.contains("tests::Empty"));

        registry.resolve(Some(&USER)).unwrap();
        for _ in 0..3 {
            assert!(registry.resolve(Some(&EMPTY)).is_err());
        }
        assert_eq!(registry.stats().misses(), 1);
        assert_eq!(registry.stats().hits(), 0);
    }

    #[test]
    fn test_get_without_resolving() {
        let registry = Registry::new();
        assert!(registry.get("tests::User").is_none());

        registry.resolve(Some(&USER)).unwrap();
        let cached = registry.get("tests::User").unwrap();
        assert_eq!(cached.type_name(), "tests::User");
    }

    #[test]
    fn test_configured_order() {
        let registry =
            Registry::with_config(RegistryConfig::new().column_order(ColumnOrder::Declaration));
        let desc = registry.resolve(Some(&USER)).unwrap();
        assert_eq!(desc.columns(), ["id", "name"]);
    }

    #[test]
    fn test_concurrent_first_resolution() {
        let registry = Registry::new();

        let results: Vec<Arc<TypeDescriptor>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|_| scope.spawn(|| registry.resolve(Some(&USER)).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(registry.len(), 1);
        let cached = registry.get("tests::User").unwrap();
        for desc in &results {
            assert_eq!(**desc, *cached);
        }
        assert_eq!(registry.stats().hits() + registry.stats().misses(), 16);
    }

    #[test]
    fn test_global_is_shared() {
        let a = Registry::global() as *const Registry;
        let b = Registry::global() as *const Registry;
        assert_eq!(a, b);
    }
}
