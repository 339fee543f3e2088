//! Live scene hierarchy

use crate::assets::{AssetNode, AssetScene};
use crate::foundation::math::{Mat4, Point3, Transform};
use crate::render::{MaterialHandle, MaterialStore, RenderMaterial};

use super::AABB;

/// Vertex data of one drawable primitive
#[derive(Debug, Clone, Default)]
pub struct MeshPrimitive {
    /// Vertex positions in node space
    pub positions: Vec<Point3>,
    /// Material used to draw the primitive
    pub material: Option<MaterialHandle>,
}

/// A node in the scene hierarchy
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    /// Node name from the asset
    pub name: String,
    /// Transform relative to the parent
    pub transform: Transform,
    /// Primitives drawn at this node
    pub meshes: Vec<MeshPrimitive>,
    /// Child nodes
    pub children: Vec<SceneNode>,
}

/// One drawable primitive visited during traversal
#[derive(Debug, Clone, Copy)]
pub struct Renderable<'a> {
    /// Node owning the primitive
    pub node: &'a SceneNode,
    /// The primitive itself
    pub mesh: &'a MeshPrimitive,
    /// Node-to-world matrix, including the model transform
    pub world: Mat4,
}

/// Loaded scene with a model transform applied above every root node
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    /// Transform applied to the whole model (used for normalization)
    pub model_transform: Transform,
    /// Top-level nodes
    pub roots: Vec<SceneNode>,
}

impl SceneGraph {
    /// Create a scene from root nodes
    pub fn new(roots: Vec<SceneNode>) -> Self {
        Self {
            model_transform: Transform::identity(),
            roots,
        }
    }

    /// Turn a loaded asset into a live scene, registering its materials
    ///
    /// Each asset material becomes exactly one live material, so primitives
    /// that share a material in the asset share a handle in the scene.
    pub fn instantiate(asset: AssetScene, materials: &mut MaterialStore) -> Self {
        let handles: Vec<MaterialHandle> = asset
            .materials
            .into_iter()
            .map(|material| {
                let mut live = RenderMaterial::new(material.name);
                let [r, g, b] = material.base_color;
                live = live.with_color(r, g, b);
                if let Some(map) = material.color_map {
                    live = live.with_color_map(map);
                }
                materials.insert(live)
            })
            .collect();

        let roots = asset
            .roots
            .into_iter()
            .map(|node| instantiate_node(node, &handles))
            .collect();

        Self::new(roots)
    }

    /// Visit every drawable primitive depth-first
    pub fn for_each_renderable<'a>(&'a self, mut visit: impl FnMut(Renderable<'a>)) {
        let mut stack: Vec<(&SceneNode, Mat4)> = self
            .roots
            .iter()
            .rev()
            .map(|node| (node, self.model_transform.to_matrix()))
            .collect();

        while let Some((node, parent)) = stack.pop() {
            let world = parent * node.transform.to_matrix();
            for mesh in &node.meshes {
                visit(Renderable { node, mesh, world });
            }
            stack.extend(node.children.iter().rev().map(|child| (child, world)));
        }
    }

    /// Collect every drawable primitive
    pub fn renderables(&self) -> Vec<Renderable<'_>> {
        let mut out = Vec::new();
        self.for_each_renderable(|renderable| out.push(renderable));
        out
    }

    /// World-space bounds of all vertices, `None` if the scene has no geometry
    pub fn bounds(&self) -> Option<AABB> {
        let mut bounds: Option<AABB> = None;
        self.for_each_renderable(|renderable| {
            let points = renderable
                .mesh
                .positions
                .iter()
                .map(|p| renderable.world.transform_point(p));
            if let Some(mesh_bounds) = AABB::from_points(points) {
                bounds = Some(match bounds {
                    Some(acc) => acc.union(&mesh_bounds),
                    None => mesh_bounds,
                });
            }
        });
        bounds
    }

    /// Apply an extra transform on top of the current model transform
    pub fn apply_model_transform(&mut self, transform: &Transform) {
        self.model_transform = transform.combine(&self.model_transform);
    }

    /// Number of nodes in the hierarchy
    pub fn node_count(&self) -> usize {
        fn count(node: &SceneNode) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        self.roots.iter().map(count).sum()
    }
}

fn instantiate_node(node: AssetNode, handles: &[MaterialHandle]) -> SceneNode {
    let meshes = node
        .primitives
        .into_iter()
        .map(|primitive| {
            let material = primitive.material.and_then(|index| {
                let handle = handles.get(index).copied();
                if handle.is_none() {
                    log::warn!("Node '{}' references missing material {}", node.name, index);
                }
                handle
            });
            MeshPrimitive {
                positions: primitive.positions.into_iter().map(Point3::from).collect(),
                material,
            }
        })
        .collect();

    SceneNode {
        name: node.name,
        transform: node.transform,
        meshes,
        children: node
            .children
            .into_iter()
            .map(|child| instantiate_node(child, handles))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetMaterial, AssetPrimitive};
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    fn two_level_asset() -> AssetScene {
        AssetScene {
            materials: vec![
                AssetMaterial::new("Brick").with_color_map("brick.png"),
                AssetMaterial::new("Plain"),
            ],
            roots: vec![AssetNode {
                name: "Building".into(),
                transform: Transform::from_position(Vec3::new(10.0, 0.0, 0.0)),
                primitives: vec![AssetPrimitive {
                    positions: vec![[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
                    material: Some(0),
                }],
                children: vec![AssetNode {
                    name: "Wall".into(),
                    transform: Transform::from_translation_scale(Vec3::new(0.0, 5.0, 0.0), 2.0),
                    primitives: vec![
                        AssetPrimitive {
                            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
                            material: Some(0),
                        },
                        AssetPrimitive {
                            positions: vec![[0.0, 1.0, 0.0]],
                            material: Some(7),
                        },
                    ],
                    children: Vec::new(),
                }],
            }],
        }
    }

    #[test]
    fn test_instantiate_shares_material_handles() {
        let mut store = MaterialStore::new();
        let scene = SceneGraph::instantiate(two_level_asset(), &mut store);

        assert_eq!(store.len(), 2);
        assert_eq!(scene.node_count(), 2);

        let renderables = scene.renderables();
        assert_eq!(renderables.len(), 3);
        assert_eq!(renderables[0].node.name, "Building");
        assert_eq!(renderables[0].mesh.material, renderables[1].mesh.material);
        assert!(renderables[2].mesh.material.is_none());
    }

    #[test]
    fn test_bounds_follow_hierarchy() {
        let mut store = MaterialStore::new();
        let scene = SceneGraph::instantiate(two_level_asset(), &mut store);
        let bounds = scene.bounds().unwrap();

        assert_relative_eq!(bounds.min, Vec3::new(10.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(bounds.max, Vec3::new(12.0, 7.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_model_transform_moves_bounds() {
        let mut store = MaterialStore::new();
        let mut scene = SceneGraph::instantiate(two_level_asset(), &mut store);
        scene.apply_model_transform(&Transform::from_position(Vec3::new(-10.0, 0.0, 0.0)));

        let bounds = scene.bounds().unwrap();
        assert_relative_eq!(bounds.min.x, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_scene_has_no_bounds() {
        assert!(SceneGraph::default().bounds().is_none());
    }
}
