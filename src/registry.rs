//! Handle-addressed instance registry
//!
//! For callers that cannot hold a generator by reference, [`Registry`] maps opaque
//! integer handles to exclusively owned instances. It has no internal locking; the
//! caller owns it and serializes access.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{MeshError, Result};

/// Opaque instance handle
pub type Handle = usize;

/// Issue a process-wide unique handle; never returns 0
pub fn generate_handle() -> Handle {
    static COUNTER: AtomicUsize = AtomicUsize::new(1);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Map from handle to owned generator instance
///
/// # Example
///
/// ```
/// use plc_mesh::*;
///
/// let mut registry = Registry::new();
/// let handle = registry.create(Trigen::new(HullEngine::new(), 3, 0, 0, 0)?);
///
/// registry.update(handle, |trigen| {
///     trigen
///         .set_point(0, 0, 0.0, 0.0)?
///         .set_point(1, 0, 1.0, 0.0)?
///         .set_point(2, 0, 0.0, 1.0)?;
///     trigen.generate_delaunay(false)
/// })?;
///
/// assert_eq!(registry.read(handle, |trigen| trigen.out_cell_count()), 1);
/// registry.destroy(handle);
/// assert_eq!(registry.read(handle, |trigen| trigen.out_cell_count()), 0);
/// # Ok::<(), MeshError>(())
/// ```
#[derive(Debug)]
pub struct Registry<T> {
    instances: HashMap<Handle, T>,
}

impl<T> Registry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }

    /// Store an instance under a caller-chosen handle, returning any instance it replaces
    pub fn insert(&mut self, handle: Handle, instance: T) -> Option<T> {
        self.instances.insert(handle, instance)
    }

    /// Store an instance under a fresh handle
    pub fn create(&mut self, instance: T) -> Handle {
        let handle = generate_handle();
        self.instances.insert(handle, instance);
        tracing::debug!(handle, "registered instance");
        handle
    }

    /// Take an instance out of the registry
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        self.instances.remove(&handle)
    }

    /// Drop the instance behind `handle`; unknown handles are ignored
    pub fn destroy(&mut self, handle: Handle) {
        if self.instances.remove(&handle).is_some() {
            tracing::debug!(handle, "dropped instance");
        }
    }

    /// Borrow the instance behind `handle`
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.instances.get(&handle)
    }

    /// Mutably borrow the instance behind `handle`
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.instances.get_mut(&handle)
    }

    /// Check whether `handle` is registered
    pub fn contains(&self, handle: Handle) -> bool {
        self.instances.contains_key(&handle)
    }

    /// Number of registered instances
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Check whether no instance is registered
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Run a setter or generator call on an instance
    ///
    /// # Errors
    ///
    /// `NullData` if no instance lives behind `handle`, otherwise whatever `f` returns.
    pub fn update<R, F>(&mut self, handle: Handle, f: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> Result<R>,
    {
        let instance = self.instances.get_mut(&handle).ok_or(MeshError::NullData)?;
        f(instance)
    }

    /// Read from an instance; a missing instance reads as `R::default()`
    pub fn read<R, F>(&self, handle: Handle, f: F) -> R
    where
        R: Default,
        F: FnOnce(&T) -> R,
    {
        self.instances.get(&handle).map(f).unwrap_or_default()
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
