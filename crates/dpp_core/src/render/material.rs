//! Material store for the loaded scene
//!
//! Every material instantiated from an asset lives in a [`MaterialStore`] and is
//! referenced everywhere else through a copyable [`MaterialHandle`]. Catalog
//! records and the highlighter hold handles, never the materials themselves.

use crate::foundation::collections::{HandleMap, TypedHandle};
use crate::foundation::math::Vec3;

/// Neutral base color applied to bound materials
pub const NEUTRAL_WHITE: Vec3 = Vec3::new(1.0, 1.0, 1.0);

/// Handle to a live material in a [`MaterialStore`]
pub type MaterialHandle = TypedHandle<RenderMaterial>;

/// Mutable visual properties of one scene material
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMaterial {
    /// Material name as authored in the asset
    pub name: String,
    /// Base color texture reference, if the material has one
    pub color_map: Option<String>,
    /// Base color (albedo) - RGB values
    pub base_color: Vec3,
    /// Emission color used for emphasis
    pub emission: Vec3,
    /// Emission strength (0.0 = not emphasized)
    pub emission_strength: f32,
}

impl RenderMaterial {
    /// Create a material with the given name and default appearance
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color_map: None,
            base_color: Vec3::new(0.8, 0.8, 0.8),
            emission: Vec3::zeros(),
            emission_strength: 0.0,
        }
    }

    /// Builder pattern: Set the base color texture
    pub fn with_color_map(mut self, color_map: impl Into<String>) -> Self {
        self.color_map = Some(color_map.into());
        self
    }

    /// Builder pattern: Set base color from RGB values
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.base_color = Vec3::new(r, g, b);
        self
    }

    /// Whether the material carries a base color texture
    pub fn has_color_map(&self) -> bool {
        self.color_map.is_some()
    }

    /// Whether the material is currently emphasized
    pub fn is_emphasized(&self) -> bool {
        self.emission_strength != 0.0
    }
}

/// Arena of live materials for the currently loaded scene
#[derive(Debug, Default)]
pub struct MaterialStore {
    materials: HandleMap<RenderMaterial>,
}

impl MaterialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material and return its handle
    pub fn insert(&mut self, material: RenderMaterial) -> MaterialHandle {
        log::trace!("Registering material '{}'", material.name);
        MaterialHandle::new(self.materials.insert(material))
    }

    /// Get a material by handle
    pub fn get(&self, handle: MaterialHandle) -> Option<&RenderMaterial> {
        self.materials.get(handle.key())
    }

    /// Get a mutable material by handle
    pub fn get_mut(&mut self, handle: MaterialHandle) -> Option<&mut RenderMaterial> {
        self.materials.get_mut(handle.key())
    }

    /// Set the emission strength of a material
    ///
    /// Returns `false` if the handle is stale.
    pub fn set_emission_strength(&mut self, handle: MaterialHandle, strength: f32) -> bool {
        match self.get_mut(handle) {
            Some(material) => {
                material.emission_strength = strength;
                true
            }
            None => false,
        }
    }

    /// Iterate over all materials with their handles
    pub fn iter(&self) -> impl Iterator<Item = (MaterialHandle, &RenderMaterial)> {
        self.materials
            .iter()
            .map(|(key, material)| (MaterialHandle::new(key), material))
    }

    /// Handles of all materials with non-zero emission strength
    pub fn emphasized(&self) -> Vec<MaterialHandle> {
        self.iter()
            .filter(|(_, material)| material.is_emphasized())
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Get number of registered materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the store holds no materials
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Drop every material, invalidating all outstanding handles
    pub fn clear(&mut self) {
        log::debug!("Clearing {} material(s)", self.materials.len());
        self.materials.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_mutate() {
        let mut store = MaterialStore::new();
        let handle = store.insert(RenderMaterial::new("Brick").with_color_map("brick.png"));

        assert!(store.get(handle).unwrap().has_color_map());
        assert!(store.set_emission_strength(handle, 0.5));
        assert_eq!(store.emphasized(), vec![handle]);
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let mut store = MaterialStore::new();
        let handle = store.insert(RenderMaterial::new("Glass"));
        store.clear();

        assert!(store.is_empty());
        assert!(store.get(handle).is_none());
        assert!(!store.set_emission_strength(handle, 0.5));
    }
}
