//! glTF / GLB loader
//!
//! Reads the document and its buffers only. Images are never decoded; a
//! material's base color texture is recorded by reference so the binder can
//! tell textured materials apart.

use std::path::Path;

use super::{AssetMaterial, AssetNode, AssetPrimitive, AssetScene, LoadError};
use crate::foundation::math::Transform;

/// Loader for `.gltf` and `.glb` files
pub struct GltfLoader;

impl GltfLoader {
    /// Load a glTF or GLB file
    pub fn load_gltf(path: &Path) -> Result<AssetScene, LoadError> {
        let gltf::Gltf { document, blob } = gltf::Gltf::open(path)?;
        let buffers = gltf::import_buffers(&document, path.parent(), blob)?;
        Ok(Self::convert(&document, &buffers))
    }

    /// Load a glTF or GLB document held in memory
    ///
    /// External buffer URIs are resolved against `base`.
    pub fn load_slice(bytes: &[u8], base: Option<&Path>) -> Result<AssetScene, LoadError> {
        let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(bytes)?;
        let buffers = gltf::import_buffers(&document, base, blob)?;
        Ok(Self::convert(&document, &buffers))
    }

    fn convert(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> AssetScene {
        let materials = document.materials().map(convert_material).collect();

        let roots = match document.default_scene().or_else(|| document.scenes().next()) {
            Some(scene) => scene
                .nodes()
                .map(|node| convert_node(&node, buffers))
                .collect(),
            None => {
                log::warn!("glTF document has no scene");
                Vec::new()
            }
        };

        AssetScene { materials, roots }
    }
}

fn convert_material(material: gltf::Material<'_>) -> AssetMaterial {
    let pbr = material.pbr_metallic_roughness();
    let [r, g, b, _] = pbr.base_color_factor();

    AssetMaterial {
        name: material.name().unwrap_or_default().to_string(),
        color_map: pbr
            .base_color_texture()
            .map(|info| texture_label(&info.texture())),
        base_color: [r, g, b],
    }
}

fn texture_label(texture: &gltf::Texture<'_>) -> String {
    match texture.source().source() {
        gltf::image::Source::Uri { uri, .. } => uri.to_string(),
        gltf::image::Source::View { .. } => texture
            .name()
            .map_or_else(|| format!("texture_{}", texture.index()), str::to_string),
    }
}

fn convert_node(node: &gltf::Node<'_>, buffers: &[gltf::buffer::Data]) -> AssetNode {
    let (translation, rotation, scale) = node.transform().decomposed();

    let primitives = node
        .mesh()
        .map(|mesh| {
            mesh.primitives()
                .map(|primitive| {
                    let reader = primitive.reader(|buffer| {
                        buffers.get(buffer.index()).map(|data| &data.0[..])
                    });
                    AssetPrimitive {
                        positions: reader
                            .read_positions()
                            .map(Iterator::collect)
                            .unwrap_or_default(),
                        material: primitive.material().index(),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    AssetNode {
        name: node.name().unwrap_or_default().to_string(),
        transform: Transform::from_decomposed(translation, rotation, scale),
        primitives,
        children: node
            .children()
            .map(|child| convert_node(&child, buffers))
            .collect(),
    }
}
