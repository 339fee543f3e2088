//! On-disk catalog description

use serde::{Deserialize, Serialize};

use super::{Catalog, CatalogError, Record, RecordId};
use crate::config::Config;

/// Catalog as written in a `.toml` or `.ron` file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogFile {
    /// Display name of the model
    pub model_name: String,
    /// Path or URL of the asset
    pub model_path: String,
    /// Passport entries
    pub records: Vec<RecordEntry>,
}

impl Config for CatalogFile {}

/// One passport entry in a catalog file
///
/// Either `id` (the precomputed hash) or `material_name` must be given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordEntry {
    /// Precomputed record id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Material name in the asset, hashed into the id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_name: Option<String>,
    /// Material type
    pub material: String,
    /// Free-form label
    pub label: String,
    /// Condition score in `[0, 100]`
    pub condition: f32,
    /// Reusability score in `[0, 100]`
    pub reusability: f32,
    /// Dimensions in meters
    pub dimensions: String,
}

impl CatalogFile {
    /// Build a validated catalog from this description
    pub fn into_catalog(self) -> Result<Catalog, CatalogError> {
        let records = self
            .records
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let id = match (entry.id, entry.material_name) {
                    (Some(id), _) => RecordId::new(id),
                    (None, Some(name)) => RecordId::from_material_name(&name),
                    (None, None) => return Err(CatalogError::MissingId { index }),
                };
                Ok(Record::new(
                    id,
                    entry.material,
                    entry.label,
                    entry.condition,
                    entry.reusability,
                    entry.dimensions,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Catalog::new(self.model_name, self.model_path, records)
    }
}
