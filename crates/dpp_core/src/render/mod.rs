//! Live render-side state owned by the viewer
//!
//! Only the material properties the binding and highlighting layers touch are
//! modelled here; drawing is left to whatever front-end presents the scene.

pub mod material;

pub use material::{MaterialHandle, MaterialStore, RenderMaterial, NEUTRAL_WHITE};
