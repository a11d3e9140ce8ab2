//! Element locator backed by a mutable table of bounds.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tactus::{ElementBounds, ElementHandle, ElementLocator};

/// Locator over a fixed set of elements that tests can rearrange.
///
/// Clones share the same table, so elements can move or vanish while a touch
/// screen holds the locator.
#[derive(Debug, Clone, Default)]
pub struct StaticLocator {
    elements: Arc<RwLock<HashMap<String, ElementBounds>>>,
}

impl StaticLocator {
    /// Create an empty locator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element (builder form).
    #[must_use]
    pub fn with(self, id: &str, bounds: ElementBounds) -> Self {
        self.insert(id, bounds);
        self
    }

    /// Add or replace an element.
    pub fn insert(&self, id: &str, bounds: ElementBounds) {
        self.elements.write().insert(id.to_string(), bounds);
    }

    /// Remove an element. Returns its last bounds.
    pub fn remove(&self, id: &str) -> Option<ElementBounds> {
        self.elements.write().remove(id)
    }

    /// Move an element's top-left corner, keeping its size.
    pub fn move_to(&self, id: &str, x: i32, y: i32) -> bool {
        match self.elements.write().get_mut(id) {
            Some(bounds) => {
                bounds.x = x;
                bounds.y = y;
                true
            }
            None => false,
        }
    }

    /// Number of known elements.
    pub fn len(&self) -> usize {
        self.elements.read().len()
    }

    /// Check if no elements are known.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ElementLocator for StaticLocator {
    fn locate(&self, handle: &ElementHandle) -> Option<ElementBounds> {
        self.elements.read().get(handle.as_str()).copied()
    }
}
