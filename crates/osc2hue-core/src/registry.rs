//! Light registry
//!
//! Built once from the bridge's light listing and never modified, so it can
//! be shared freely between concurrent readers.

use serde::{Deserialize, Serialize};

/// A light known to the bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Light {
    /// Native bridge identifier
    pub id: String,
    /// Human readable name
    pub name: String,
}

impl Light {
    /// Create a light entry
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Ordered, read-only collection of lights
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceRegistry {
    lights: Vec<Light>,
}

impl DeviceRegistry {
    /// Build the registry, keeping the discovery order
    pub fn new(lights: Vec<Light>) -> Self {
        Self { lights }
    }

    /// Number of lights
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Whether no light is known
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Lights in registry order
    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter()
    }

    /// Lights paired with their 1-based index
    pub fn indexed(&self) -> impl Iterator<Item = (usize, &Light)> {
        self.lights.iter().enumerate().map(|(i, light)| (i + 1, light))
    }

    /// Look up by native id, falling back to the 1-based index.
    ///
    /// A key that is both some light's id and another light's index
    /// resolves to the light with that id.
    pub fn resolve(&self, key: &str) -> Option<&Light> {
        self.lights.iter().find(|light| light.id == key).or_else(|| {
            let index: usize = key.parse().ok()?;
            self.lights.get(index.checked_sub(1)?)
        })
    }
}
