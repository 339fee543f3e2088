use std::path::PathBuf;

use clap::Args;
use dpp_core::assets::{AssetLoader, FileAssetLoader};
use dpp_core::catalog::material_id;

#[derive(Args)]
pub struct MaterialsArgs {
    /// Model file (.gltf, .glb or .obj)
    pub asset: PathBuf,
}

pub fn run(args: &MaterialsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let scene = FileAssetLoader.load(&args.asset)?;

    println!("Materials in {}:", args.asset.display());
    for material in &scene.materials {
        let map = material.color_map.as_deref().unwrap_or("-");
        println!("  {}  {:<24} map: {}", material_id(&material.name), material.name, map);
    }

    Ok(())
}
