//! OBJ file loader
//!
//! Objects and groups (`o`, `g`) become nodes, `usemtl` switches the material
//! of the primitive being filled, and `mtllib` pulls material names and
//! diffuse maps from MTL files next to the OBJ.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{AssetMaterial, AssetNode, AssetPrimitive, AssetScene, LoadError, MtlParser};

/// Loader for Wavefront `.obj` files
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file and any material libraries it references
    pub fn load_obj(path: &Path) -> Result<AssetScene, LoadError> {
        let file = File::open(path)?;
        let mut builder = ObjBuilder::default();

        for (line_num, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            builder.parse_line(line.trim(), line_num + 1, path.parent())?;
        }

        builder.finish()
    }
}

#[derive(Default)]
struct ObjBuilder {
    positions: Vec<[f32; 3]>,
    materials: Vec<AssetMaterial>,
    material_lookup: HashMap<String, usize>,
    nodes: Vec<AssetNode>,
    current: Option<AssetNode>,
    active_material: Option<usize>,
}

impl ObjBuilder {
    fn parse_line(&mut self, line: &str, line_num: usize, base: Option<&Path>) -> Result<(), LoadError> {
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(command, rest)| (command, rest.trim()));

        match command {
            "v" => {
                let mut xyz = [0.0; 3];
                let mut tokens = rest.split_whitespace();
                for component in &mut xyz {
                    let token = tokens.next().ok_or_else(|| {
                        LoadError::Parse(format!("Line {line_num}: vertex needs three coordinates"))
                    })?;
                    *component = token.parse().map_err(|_| {
                        LoadError::Parse(format!("Line {line_num}: invalid vertex coordinate '{token}'"))
                    })?;
                }
                self.positions.push(xyz);
            }
            "o" | "g" => {
                self.close_node();
                self.current = Some(AssetNode {
                    name: rest.to_string(),
                    ..AssetNode::default()
                });
            }
            "usemtl" => {
                self.active_material = Some(self.material_index(rest));
            }
            "mtllib" => self.load_library(rest, base)?,
            "f" => self.parse_face(rest, line_num)?,
            // Normals, texture coordinates and smoothing groups carry nothing the viewer uses
            _ => {}
        }

        Ok(())
    }

    fn parse_face(&mut self, rest: &str, line_num: usize) -> Result<(), LoadError> {
        let mut corners = Vec::new();
        for vertex_data in rest.split_whitespace() {
            let index_token = vertex_data.split('/').next().unwrap_or_default();
            let index: i64 = index_token.parse().map_err(|_| {
                LoadError::Parse(format!("Line {line_num}: invalid face index '{vertex_data}'"))
            })?;
            corners.push(self.resolve(index, line_num)?);
        }

        if corners.len() < 3 {
            return Err(LoadError::Parse(format!(
                "Line {line_num}: face needs at least three vertices"
            )));
        }

        let material = self.active_material;
        let node = self.current.get_or_insert_with(AssetNode::default);
        if node.primitives.last().map_or(true, |p| p.material != material) {
            node.primitives.push(AssetPrimitive {
                positions: Vec::new(),
                material,
            });
        }

        if let Some(primitive) = node.primitives.last_mut() {
            // Fan triangulation
            for i in 1..corners.len() - 1 {
                primitive
                    .positions
                    .extend([corners[0], corners[i], corners[i + 1]]);
            }
        }

        Ok(())
    }

    /// OBJ indices are 1-based; negative indices count back from the newest vertex
    fn resolve(&self, index: i64, line_num: usize) -> Result<[f32; 3], LoadError> {
        let count = self.positions.len() as i64;
        let resolved = if index < 0 { count + index } else { index - 1 };

        usize::try_from(resolved)
            .ok()
            .and_then(|i| self.positions.get(i).copied())
            .ok_or_else(|| {
                LoadError::Parse(format!("Line {line_num}: vertex index {index} out of range"))
            })
    }

    fn material_index(&mut self, name: &str) -> usize {
        if let Some(&index) = self.material_lookup.get(name) {
            return index;
        }
        let index = self.materials.len();
        self.materials.push(AssetMaterial::new(name));
        self.material_lookup.insert(name.to_string(), index);
        index
    }

    fn load_library(&mut self, file_name: &str, base: Option<&Path>) -> Result<(), LoadError> {
        let path = base.map_or_else(|| Path::new(file_name).to_path_buf(), |dir| dir.join(file_name));

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!("Material library {} not loaded: {}", path.display(), e);
                return Ok(());
            }
        };

        for data in MtlParser::parse(&contents).map_err(LoadError::Parse)? {
            let index = self.material_index(&data.name);
            let material = &mut self.materials[index];
            material.base_color = data.diffuse;
            material.color_map = data.diffuse_map;
        }

        Ok(())
    }

    fn close_node(&mut self) {
        if let Some(node) = self.current.take() {
            if !node.primitives.is_empty() || !node.name.is_empty() {
                self.nodes.push(node);
            }
        }
    }

    fn finish(mut self) -> Result<AssetScene, LoadError> {
        self.close_node();

        if self.positions.is_empty() {
            return Err(LoadError::Parse("No vertices found in OBJ file".to_string()));
        }

        log::debug!(
            "OBJ parsed: {} vertices, {} nodes, {} materials",
            self.positions.len(),
            self.nodes.len(),
            self.materials.len()
        );

        Ok(AssetScene {
            materials: self.materials,
            roots: self.nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_OBJ: &str = "\
mtllib walls.mtl
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
o Wall
usemtl Brick
f 1/1/1 2/2/1 3/3/1 4/4/1
o Roof
usemtl Slate
f -4 -3 -2
";

    const WALLS_MTL: &str = "\
newmtl Brick
Kd 0.7 0.3 0.2
map_Kd brick.png
newmtl Slate
Kd 0.2 0.2 0.25
";

    fn write_fixture(obj: &str, mtl: Option<&str>) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("house.obj");
        std::fs::write(&path, obj).unwrap();
        if let Some(mtl) = mtl {
            std::fs::write(dir.path().join("walls.mtl"), mtl).unwrap();
        }
        (dir, path)
    }

    #[test]
    fn test_load_objects_and_materials() {
        let (_dir, path) = write_fixture(QUAD_OBJ, Some(WALLS_MTL));
        let scene = ObjLoader::load_obj(&path).unwrap();

        assert_eq!(scene.material_names().collect::<Vec<_>>(), vec!["Brick", "Slate"]);
        assert_eq!(scene.materials[0].color_map.as_deref(), Some("brick.png"));
        assert!(scene.materials[1].color_map.is_none());

        assert_eq!(scene.roots.len(), 2);
        let wall = &scene.roots[0];
        assert_eq!(wall.name, "Wall");
        assert_eq!(wall.primitives[0].material, Some(0));
        // Quad fans into two triangles
        assert_eq!(wall.primitives[0].positions.len(), 6);

        let roof = &scene.roots[1];
        assert_eq!(roof.primitives[0].material, Some(1));
        assert_eq!(
            roof.primitives[0].positions,
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]
        );
    }

    #[test]
    fn test_missing_material_library_is_tolerated() {
        let (_dir, path) = write_fixture(QUAD_OBJ, None);
        let scene = ObjLoader::load_obj(&path).unwrap();

        assert_eq!(scene.materials.len(), 2);
        assert!(scene.materials.iter().all(|m| m.color_map.is_none()));
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let (_dir, path) = write_fixture("v 0 0 0\nf 1 2 3\n", None);
        assert!(matches!(ObjLoader::load_obj(&path), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        let (_dir, path) = write_fixture("# nothing here\n", None);
        assert!(matches!(ObjLoader::load_obj(&path), Err(LoadError::Parse(_))));
    }
}
