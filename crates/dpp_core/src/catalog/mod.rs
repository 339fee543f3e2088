//! Passport catalog
//!
//! The catalog owns the passport records for one model and answers the two
//! questions the rest of the viewer asks of it: which record has this id, and
//! which record (if any) does a material with this name belong to.
//!
//! Binding is a join between two independently authored datasets, the
//! material names in the asset and the record ids in the catalog, keyed by
//! [`material_id`]. [`Catalog::bind_by_material_name`] reports an outcome for
//! every case rather than silently skipping some of them.

mod file;
mod hash;
mod record;

pub use file::{CatalogFile, RecordEntry};
pub use hash::material_id;
pub use record::{Record, RecordId};

use thiserror::Error;

use crate::foundation::math::Vec3;
use crate::render::{MaterialHandle, MaterialStore, NEUTRAL_WHITE};

/// Inclusive upper bound of the score domain
pub const MAX_SCORE: f32 = 100.0;

/// Catalog construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Two records share an id
    #[error("Duplicate record id: {0}")]
    DuplicateId(RecordId),

    /// A score is outside `[0, 100]`
    #[error("Record {id}: {field} score {value} is outside [0, 100]")]
    ScoreOutOfRange {
        /// Offending record
        id: RecordId,
        /// Name of the score field
        field: &'static str,
        /// Rejected value
        value: f32,
    },

    /// A catalog file entry names neither an id nor a material
    #[error("Record entry {index} has neither `id` nor `material_name`")]
    MissingId {
        /// Position of the entry in the file
        index: usize,
    },
}

/// Result of offering a material to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// The record at this index now holds the handle
    Bound(usize),
    /// The record already held this exact handle
    AlreadyBound(usize),
    /// No record has the hashed id
    Unmatched,
    /// The record already holds a different handle; first match wins
    Conflict {
        /// Record that kept its binding
        record: usize,
        /// Handle it kept
        existing: MaterialHandle,
    },
    /// The handle is already held by another record
    HandleTaken {
        /// Record that holds the handle
        record: usize,
    },
}

impl BindOutcome {
    /// Whether this call created a new binding
    pub fn is_new_binding(&self) -> bool {
        matches!(self, Self::Bound(_))
    }
}

/// Passport records for one model
#[derive(Debug, Clone)]
pub struct Catalog {
    model_name: String,
    model_path: String,
    records: Vec<Record>,
}

impl Catalog {
    /// Create a catalog, validating id uniqueness and score ranges
    pub fn new(
        model_name: impl Into<String>,
        model_path: impl Into<String>,
        records: Vec<Record>,
    ) -> Result<Self, CatalogError> {
        for (i, record) in records.iter().enumerate() {
            if records[..i].iter().any(|other| other.id() == record.id()) {
                return Err(CatalogError::DuplicateId(record.id().clone()));
            }
            check_score(record, "condition", record.condition)?;
            check_score(record, "reusability", record.reusability)?;
        }

        Ok(Self {
            model_name: model_name.into(),
            model_path: model_path.into(),
            records,
        })
    }

    /// Display name of the model
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Path or URL of the asset this catalog describes
    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    /// All records in catalog order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by id
    pub fn find(&self, id: &RecordId) -> Option<&Record> {
        self.position(id).map(|index| &self.records[index])
    }

    /// Index of the record with this id
    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    /// Record currently holding a material handle
    pub fn find_by_handle(&self, handle: MaterialHandle) -> Option<&Record> {
        self.records
            .iter()
            .find(|record| record.bound_visual() == Some(handle))
    }

    /// Bind the material called `name` to its record, if there is one
    ///
    /// On a new binding the material is reset to a neutral white base color,
    /// given `emphasis_color` as emission and an emission strength of zero.
    pub fn bind_by_material_name(
        &mut self,
        name: &str,
        handle: MaterialHandle,
        materials: &mut MaterialStore,
        emphasis_color: Vec3,
    ) -> BindOutcome {
        let id = RecordId::from_material_name(name);
        let Some(index) = self.position(&id) else {
            log::trace!("Material '{}' ({}) has no passport", name, id);
            return BindOutcome::Unmatched;
        };

        match self.records[index].bound_visual() {
            Some(existing) if existing == handle => return BindOutcome::AlreadyBound(index),
            Some(existing) => {
                log::debug!(
                    "Record {} already bound, ignoring another material named '{}'",
                    id,
                    name
                );
                return BindOutcome::Conflict {
                    record: index,
                    existing,
                };
            }
            None => {}
        }

        if let Some(holder) = self
            .records
            .iter()
            .position(|record| record.bound_visual() == Some(handle))
        {
            log::debug!(
                "Material '{}' is already bound to record {}",
                name,
                self.records[holder].id()
            );
            return BindOutcome::HandleTaken { record: holder };
        }

        let Some(material) = materials.get_mut(handle) else {
            log::warn!("Stale material handle offered for '{}'", name);
            return BindOutcome::Unmatched;
        };
        material.base_color = NEUTRAL_WHITE;
        material.emission = emphasis_color;
        material.emission_strength = 0.0;

        self.records[index].bind(handle);
        log::debug!("Bound material '{}' to record {}", name, id);
        BindOutcome::Bound(index)
    }

    /// Forget every binding, ahead of a new load cycle
    pub fn reset_bindings(&mut self) {
        for record in &mut self.records {
            record.unbind();
        }
    }

    /// Number of records bound in the current load cycle
    pub fn bound_count(&self) -> usize {
        self.records.iter().filter(|record| record.is_bound()).count()
    }
}

fn check_score(record: &Record, field: &'static str, value: f32) -> Result<(), CatalogError> {
    if (0.0..=MAX_SCORE).contains(&value) {
        Ok(())
    } else {
        Err(CatalogError::ScoreOutOfRange {
            id: record.id().clone(),
            field,
            value,
        })
    }
}
