//! Scene-walk binding of catalog records to live materials
//!
//! Runs once per successful load, after the scene has been instantiated and
//! before any hover event can emphasize anything.

use std::collections::BTreeSet;

use crate::catalog::{BindOutcome, Catalog};
use crate::foundation::math::Vec3;
use crate::render::{MaterialHandle, MaterialStore};
use crate::scene::SceneGraph;

/// Summary of one binding pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindReport {
    /// Drawable primitives visited
    pub visited: usize,
    /// Records newly bound by this pass
    pub bound: usize,
    /// Textured material names with no matching record
    pub unmatched: BTreeSet<String>,
    /// Materials refused because their record or handle was already taken
    pub conflicts: usize,
}

/// Offer every textured material in the scene to the catalog
///
/// Materials without a color map are never bound. Each distinct handle is
/// offered once no matter how many primitives share it, so running the pass
/// twice leaves the catalog unchanged.
pub fn bind_scene(
    scene: &SceneGraph,
    catalog: &mut Catalog,
    materials: &mut MaterialStore,
    emphasis_color: Vec3,
) -> BindReport {
    let mut report = BindReport::default();
    let mut offered: Vec<MaterialHandle> = Vec::new();

    scene.for_each_renderable(|renderable| {
        report.visited += 1;

        let Some(handle) = renderable.mesh.material else {
            return;
        };
        if offered.contains(&handle) {
            return;
        }
        offered.push(handle);

        let Some(name) = materials
            .get(handle)
            .filter(|material| material.has_color_map())
            .map(|material| material.name.clone())
        else {
            return;
        };

        match catalog.bind_by_material_name(&name, handle, materials, emphasis_color) {
            BindOutcome::Bound(_) => report.bound += 1,
            BindOutcome::AlreadyBound(_) => {}
            BindOutcome::Unmatched => {
                report.unmatched.insert(name);
            }
            BindOutcome::Conflict { .. } | BindOutcome::HandleTaken { .. } => report.conflicts += 1,
        }
    });

    log::info!(
        "Bound {} of {} passport(s) across {} renderable(s)",
        catalog.bound_count(),
        catalog.len(),
        report.visited
    );
    if !report.unmatched.is_empty() {
        log::debug!("Materials without a passport: {:?}", report.unmatched);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Record, RecordId};
    use crate::foundation::math::Point3;
    use crate::render::{RenderMaterial, NEUTRAL_WHITE};
    use crate::scene::{MeshPrimitive, SceneNode};

    const HIGHLIGHT: Vec3 = Vec3::new(0.0, 0.75, 1.0);

    fn mesh(material: MaterialHandle) -> MeshPrimitive {
        MeshPrimitive {
            positions: vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
            material: Some(material),
        }
    }

    fn fixture() -> (SceneGraph, Catalog, MaterialStore) {
        let mut store = MaterialStore::new();
        let brick = store.insert(RenderMaterial::new("Brick").with_color_map("brick.png"));
        let glass = store.insert(RenderMaterial::new("Glass"));
        let slate = store.insert(RenderMaterial::new("Slate").with_color_map("slate.png"));

        let scene = SceneGraph::new(vec![SceneNode {
            name: "House".into(),
            meshes: vec![mesh(brick), mesh(glass)],
            children: vec![SceneNode {
                name: "Annex".into(),
                meshes: vec![mesh(brick), mesh(slate)],
                ..SceneNode::default()
            }],
            ..SceneNode::default()
        }]);

        let catalog = Catalog::new(
            "House",
            "house.glb",
            vec![
                Record::for_material_name("Brick", "Masonry", "Wall", 70.0, 50.0, "1 x 1"),
                Record::for_material_name("Glass", "Glass", "Window", 90.0, 20.0, "1 x 2"),
            ],
        )
        .unwrap();

        (scene, catalog, store)
    }

    #[test]
    fn test_binds_textured_materials_only() {
        let (scene, mut catalog, mut store) = fixture();
        let report = bind_scene(&scene, &mut catalog, &mut store, HIGHLIGHT);

        assert_eq!(report.visited, 4);
        assert_eq!(report.bound, 1);
        assert_eq!(report.unmatched, BTreeSet::from(["Slate".to_string()]));

        let brick = catalog.find(&RecordId::from_material_name("Brick")).unwrap();
        let handle = brick.bound_visual().unwrap();
        assert_eq!(store.get(handle).unwrap().base_color, NEUTRAL_WHITE);
        assert_eq!(store.get(handle).unwrap().emission_strength, 0.0);

        // Untextured glass has a record but is never bound
        assert!(!catalog.find(&RecordId::from_material_name("Glass")).unwrap().is_bound());
    }

    #[test]
    fn test_second_pass_changes_nothing() {
        let (scene, mut catalog, mut store) = fixture();
        bind_scene(&scene, &mut catalog, &mut store, HIGHLIGHT);
        let records = catalog.records().to_vec();

        let report = bind_scene(&scene, &mut catalog, &mut store, HIGHLIGHT);

        assert_eq!(report.bound, 0);
        assert_eq!(report.conflicts, 0);
        assert_eq!(catalog.records(), &records[..]);
    }

    #[test]
    fn test_duplicate_material_names_keep_first_binding() {
        let mut store = MaterialStore::new();
        let first = store.insert(RenderMaterial::new("Brick").with_color_map("a.png"));
        let second = store.insert(RenderMaterial::new("Brick").with_color_map("b.png"));
        let scene = SceneGraph::new(vec![SceneNode {
            meshes: vec![mesh(first), mesh(second)],
            ..SceneNode::default()
        }]);
        let mut catalog = Catalog::new(
            "Dup",
            "dup.glb",
            vec![Record::for_material_name("Brick", "Masonry", "", 1.0, 1.0, "")],
        )
        .unwrap();

        let report = bind_scene(&scene, &mut catalog, &mut store, HIGHLIGHT);

        assert_eq!(report.bound, 1);
        assert_eq!(report.conflicts, 1);
        assert_eq!(catalog.records()[0].bound_visual(), Some(first));
    }
}
