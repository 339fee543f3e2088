//! Cross-module scenarios driven through a [`ViewerSession`]


use std::path::Path;

use crate::assets::{AssetLoader, AssetMaterial, AssetNode, AssetPrimitive, AssetScene, LoadError};
use crate::catalog::{Catalog, Record};
use crate::config::ViewerConfig;
use crate::foundation::math::{Transform, Vec3};
use crate::session::ViewerSession;
use crate::ui::TitleSink;

/// Loader returning a fixed scene
struct FixedLoader(AssetScene);

impl AssetLoader for FixedLoader {
    fn load(&self, _path: &Path) -> Result<AssetScene, LoadError> {
        Ok(self.0.clone())
    }
}

/// Loader that always fails
struct FailingLoader;

impl AssetLoader for FailingLoader {
    fn load(&self, path: &Path) -> Result<AssetScene, LoadError> {
        Err(LoadError::NotFound(path.display().to_string()))
    }
}

#[derive(Default)]
struct RecordingTitle {
    titles: Vec<String>,
}

impl TitleSink for RecordingTitle {
    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }
}

/// Corners of an axis-aligned box
fn box_corners(center: Vec3, size: Vec3) -> Vec<[f32; 3]> {
    let half = size * 0.5;
    let mut corners = Vec::new();
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            for sz in [-1.0, 1.0] {
                let corner = center + Vec3::new(sx * half.x, sy * half.y, sz * half.z);
                corners.push([corner.x, corner.y, corner.z]);
            }
        }
    }
    corners
}

/// House with a textured brick wall, an untextured glass pane and a textured
/// slate roof that has no passport
fn house_asset(size: Vec3) -> AssetScene {
    AssetScene {
        materials: vec![
            AssetMaterial::new("Brick").with_color_map("brick.png"),
            AssetMaterial::new("Glass"),
            AssetMaterial::new("Slate").with_color_map("slate.png"),
        ],
        roots: vec![AssetNode {
            name: "House".into(),
            transform: Transform::identity(),
            primitives: vec![
                AssetPrimitive {
                    positions: box_corners(Vec3::new(10.0, 10.0, 10.0), size),
                    material: Some(0),
                },
                AssetPrimitive {
                    positions: box_corners(Vec3::new(10.0, 10.0, 10.0), size * 0.5),
                    material: Some(1),
                },
            ],
            children: vec![AssetNode {
                name: "Roof".into(),
                primitives: vec![AssetPrimitive {
                    positions: box_corners(Vec3::new(10.0, 13.0, 10.0), size * 0.25),
                    material: Some(2),
                }],
                ..AssetNode::default()
            }],
        }],
    }
}

fn house_catalog() -> Catalog {
    Catalog::new(
        "House",
        "house.glb",
        vec![
            Record::for_material_name("Brick", "Masonry", "Facade brick", 80.0, 65.0, "0.2 x 0.1 x 0.05"),
            Record::for_material_name("Glass", "Glass", "Window pane", 95.0, 30.0, "1.2 x 1.5"),
        ],
    )
    .unwrap()
}

fn house_session() -> (ViewerSession, RecordingTitle) {
    let mut title = RecordingTitle::default();
    let session = ViewerSession::new(house_catalog(), ViewerConfig::default(), &mut title);
    (session, title)
}
