//! Thread-safe registry wrappers.
//!
//! Registration is expected to finish before lookups start. Two ways to share
//! a registry once that holds:
//! - `FrozenRegistry`: `Arc`, immutable, lock-free reads
//! - `LockedRegistry`: `Arc<RwLock>`, for registries that keep receiving
//!   handlers while shared

use std::fmt;
use std::sync::Arc;

use crate::Registry;

/// Immutable shared registry, produced by `Registry::freeze`.
pub struct FrozenRegistry<H>(Arc<Registry<H>>);

impl<H> FrozenRegistry<H> {
    pub fn new(registry: Registry<H>) -> Self {
        FrozenRegistry(Arc::new(registry))
    }
}

impl<H> Clone for FrozenRegistry<H> {
    fn clone(&self) -> Self {
        FrozenRegistry(Arc::clone(&self.0))
    }
}

impl<H> std::ops::Deref for FrozenRegistry<H> {
    type Target = Registry<H>;

    fn deref(&self) -> &Registry<H> {
        &self.0
    }
}

impl<H> fmt::Debug for FrozenRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrozenRegistry({:?})", &*self.0)
    }
}

/// Shared registry behind a read/write lock.
///
/// Walks hold the read lock for their whole duration, so a registration
/// waits for in-flight walks and never changes resolution mid-walk.
pub struct LockedRegistry<H>(Arc<parking_lot::RwLock<Registry<H>>>);

impl<H> LockedRegistry<H> {
    pub fn new(registry: Registry<H>) -> Self {
        LockedRegistry(Arc::new(parking_lot::RwLock::new(registry)))
    }

    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, Registry<H>> {
        self.0.read()
    }

    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, Registry<H>> {
        self.0.write()
    }
}

impl<H> Clone for LockedRegistry<H> {
    fn clone(&self) -> Self {
        LockedRegistry(Arc::clone(&self.0))
    }
}

impl<H> fmt::Debug for LockedRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LockedRegistry({:?})", &*self.0.read())
    }
}
