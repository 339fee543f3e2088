//! Digital product passport records

use std::fmt;

use serde::{Deserialize, Serialize};

use super::hash::material_id;
use crate::render::MaterialHandle;

/// Identifier of a record: the hashed name of the material it describes
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an already computed id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Compute the id a material with this name binds to
    pub fn from_material_name(material_name: &str) -> Self {
        Self(material_id(material_name))
    }

    /// The id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One passport entry describing a material in the model
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    /// Material type shown as the panel title
    pub material: String,
    /// Free-form label shown under the title
    pub label: String,
    /// Condition score in `[0, 100]`
    pub condition: f32,
    /// Reusability score in `[0, 100]`
    pub reusability: f32,
    /// Dimensions in meters, free text
    pub dimensions: String,
    bound: Option<MaterialHandle>,
}

impl Record {
    /// Create an unbound record
    pub fn new(
        id: impl Into<RecordId>,
        material: impl Into<String>,
        label: impl Into<String>,
        condition: f32,
        reusability: f32,
        dimensions: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            material: material.into(),
            label: label.into(),
            condition,
            reusability,
            dimensions: dimensions.into(),
            bound: None,
        }
    }

    /// Create a record for the material with the given name in the asset
    pub fn for_material_name(
        material_name: &str,
        material: impl Into<String>,
        label: impl Into<String>,
        condition: f32,
        reusability: f32,
        dimensions: impl Into<String>,
    ) -> Self {
        Self::new(
            RecordId::from_material_name(material_name),
            material,
            label,
            condition,
            reusability,
            dimensions,
        )
    }

    /// The record id
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Live material this record is bound to, if any
    pub fn bound_visual(&self) -> Option<MaterialHandle> {
        self.bound
    }

    /// Whether a material has been bound in the current load cycle
    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    pub(super) fn bind(&mut self, handle: MaterialHandle) {
        self.bound = Some(handle);
    }

    pub(super) fn unbind(&mut self) {
        self.bound = None;
    }
}
