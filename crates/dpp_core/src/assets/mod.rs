//! Asset loading
//!
//! Loaders turn a file on disk into an [`AssetScene`], a plain description of
//! the node hierarchy and materials that owns no live state. The viewer turns it
//! into a [`SceneGraph`](crate::scene::SceneGraph) once the load completes.
//!
//! Loading runs off the frame thread; see [`load_async`].

mod gltf_loader;
mod mtl_parser;
mod obj_loader;
mod pending;

pub use gltf_loader::GltfLoader;
pub use mtl_parser::{MtlData, MtlParser};
pub use obj_loader::ObjLoader;
pub use pending::{load_async, LoadSender, PendingLoad};

use std::path::Path;

use thiserror::Error;

use crate::foundation::math::Transform;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum LoadError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// glTF document or buffer error
    #[error("glTF error: {0}")]
    Gltf(#[from] gltf::Error),

    /// Malformed text asset
    #[error("Parse error: {0}")]
    Parse(String),

    /// File extension not handled by any loader
    #[error("Unsupported asset format: {0}")]
    UnsupportedFormat(String),

    /// Asset file does not exist
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The loader went away without delivering a result
    #[error("Asset load was interrupted")]
    Interrupted,
}

/// Material as declared by an asset
#[derive(Debug, Clone, PartialEq)]
pub struct AssetMaterial {
    /// Material name; hashed to find its passport
    pub name: String,
    /// Base color texture reference
    pub color_map: Option<String>,
    /// Base color factor
    pub base_color: [f32; 3],
}

impl AssetMaterial {
    /// Create an untextured white material
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color_map: None,
            base_color: [1.0, 1.0, 1.0],
        }
    }

    /// Builder pattern: Set the base color texture
    pub fn with_color_map(mut self, color_map: impl Into<String>) -> Self {
        self.color_map = Some(color_map.into());
        self
    }
}

/// Drawable primitive as declared by an asset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetPrimitive {
    /// Vertex positions in node space
    pub positions: Vec<[f32; 3]>,
    /// Index into [`AssetScene::materials`]
    pub material: Option<usize>,
}

/// Node as declared by an asset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetNode {
    /// Node name
    pub name: String,
    /// Transform relative to the parent
    pub transform: Transform,
    /// Primitives drawn at this node
    pub primitives: Vec<AssetPrimitive>,
    /// Child nodes
    pub children: Vec<AssetNode>,
}

/// Everything a loader extracts from an asset file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetScene {
    /// Materials in declaration order
    pub materials: Vec<AssetMaterial>,
    /// Top-level nodes
    pub roots: Vec<AssetNode>,
}

impl AssetScene {
    /// Names of all declared materials, in order
    pub fn material_names(&self) -> impl Iterator<Item = &str> {
        self.materials.iter().map(|material| material.name.as_str())
    }
}

/// Something that can turn a path into an [`AssetScene`]
pub trait AssetLoader: Send + Sync {
    /// Load the asset at `path`
    fn load(&self, path: &Path) -> Result<AssetScene, LoadError>;
}

/// Loader choosing the format from the file extension
#[derive(Debug, Clone, Copy, Default)]
pub struct FileAssetLoader;

impl AssetLoader for FileAssetLoader {
    fn load(&self, path: &Path) -> Result<AssetScene, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound(path.display().to_string()));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("gltf" | "glb") => GltfLoader::load_gltf(path),
            Some("obj") => ObjLoader::load_obj(path),
            _ => Err(LoadError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
