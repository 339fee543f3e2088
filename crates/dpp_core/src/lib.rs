//! # DPP Core
//!
//! Core of a 3D building-model viewer that links each material in the model to
//! its Digital Product Passport (material type, condition and reusability
//! scores, dimensions) and emphasizes the material whose passport is hovered.
//!
//! ## Overview
//!
//! - **Catalog**: passport records keyed by the MD5 of a material name
//! - **Assets**: glTF/GLB and OBJ loading, run off the frame thread
//! - **Binder**: one pass over a loaded scene attaching records to materials
//! - **Highlighter**: single-emphasis hover state machine
//! - **Camera**: model normalization and load-triggered framing
//! - **Session**: ties the above together for a front-end
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use dpp_core::prelude::*;
//!
//! struct Title;
//!
//! impl TitleSink for Title {
//!     fn set_title(&mut self, title: &str) {
//!         println!("{title}");
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = CatalogFile::load_from_file("pavilion.toml")?.into_catalog()?;
//!     let path = catalog.model_path().to_string();
//!
//!     let mut session = ViewerSession::new(catalog, ViewerConfig::default(), &mut Title);
//!     session.begin_load(Arc::new(FileAssetLoader), path)?;
//!     session.wait_for_load();
//!
//!     let first = session.catalog().records()[0].id().clone();
//!     session.hover_enter(first);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod foundation;
pub mod config;
pub mod catalog;
pub mod render;
pub mod scene;
pub mod assets;
pub mod binder;
pub mod highlight;
pub mod camera;
pub mod ui;
pub mod session;

#[cfg(test)]
mod tests;

/// Common imports for viewer front-ends
pub mod prelude {
    pub use crate::{
        assets::{AssetLoader, AssetScene, FileAssetLoader, LoadError, PendingLoad},
        binder::BindReport,
        camera::Camera,
        catalog::{Catalog, CatalogFile, Record, RecordId},
        config::{Config, ViewerConfig},
        foundation::math::{Mat4, Transform, Vec3},
        highlight::{HighlightState, HoverEvent},
        session::{LoadState, SessionError, ViewerSession},
        ui::{PanelSink, PanelView, ScoreBar, TitleSink},
    };
}
