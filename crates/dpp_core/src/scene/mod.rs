//! Scene management
//!
//! A [`SceneGraph`] is the live form of a loaded asset: the node hierarchy with
//! its transforms and vertex positions, and a [`MaterialHandle`] for every
//! material the asset declared.
//!
//! [`MaterialHandle`]: crate::render::MaterialHandle

mod aabb;
mod scene_graph;

pub use aabb::AABB;
pub use scene_graph::{MeshPrimitive, Renderable, SceneGraph, SceneNode};
