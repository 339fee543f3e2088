//! MTL (Material Template Library) file parser
//!
//! Only the fields the viewer needs are kept: the material name, its diffuse
//! color and its diffuse texture map.

/// Parsed MTL material data
#[derive(Debug, Clone, PartialEq)]
pub struct MtlData {
    /// Material name
    pub name: String,
    /// Diffuse color (Kd)
    pub diffuse: [f32; 3],
    /// Diffuse texture map (map_Kd)
    pub diffuse_map: Option<String>,
}

impl MtlData {
    fn named(name: String) -> Self {
        Self {
            name,
            diffuse: [0.8, 0.8, 0.8],
            diffuse_map: None,
        }
    }
}

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Parse MTL file contents into materials, in declaration order
    ///
    /// Material names and texture paths run to the end of the line, so names
    /// containing spaces survive intact.
    pub fn parse(contents: &str) -> Result<Vec<MtlData>, String> {
        let mut materials = Vec::new();
        let mut current: Option<MtlData> = None;

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (command, rest) = line
                .split_once(char::is_whitespace)
                .map_or((line, ""), |(command, rest)| (command, rest.trim()));

            match command {
                "newmtl" => {
                    if rest.is_empty() {
                        return Err(format!("Line {}: newmtl missing material name", line_num + 1));
                    }
                    if let Some(mat) = current.take() {
                        materials.push(mat);
                    }
                    current = Some(MtlData::named(rest.to_string()));
                }

                "Kd" => {
                    if let Some(ref mut mat) = current {
                        mat.diffuse = Self::parse_rgb(rest, line_num, "Kd")?;
                    }
                }

                "map_Kd" => {
                    if let Some(ref mut mat) = current {
                        if rest.is_empty() {
                            return Err(format!("Line {}: map_Kd missing texture path", line_num + 1));
                        }
                        mat.diffuse_map = Some(rest.to_string());
                    }
                }

                // Ignore unknown commands silently
                _ => {}
            }
        }

        if let Some(mat) = current {
            materials.push(mat);
        }

        Ok(materials)
    }

    fn parse_rgb(rest: &str, line_num: usize, command: &str) -> Result<[f32; 3], String> {
        let mut rgb = [0.0; 3];
        let mut tokens = rest.split_whitespace();
        for channel in &mut rgb {
            let token = tokens
                .next()
                .ok_or_else(|| format!("Line {}: {} missing value", line_num + 1, command))?;
            *channel = token.parse::<f32>().map_err(|_| {
                format!("Line {}: {} invalid float value '{}'", line_num + 1, command, token)
            })?;
        }
        Ok(rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_material_with_texture() {
        let mtl_content = r#"
# Exported
newmtl Brick Wall
Ka 1.0 1.0 1.0
Kd 0.8 0.2 0.2
map_Kd textures/brick wall.png

newmtl Glass
Kd 0.9 0.9 1.0
"#;

        let materials = MtlParser::parse(mtl_content).unwrap();
        assert_eq!(materials.len(), 2);

        assert_eq!(materials[0].name, "Brick Wall");
        assert_eq!(materials[0].diffuse, [0.8, 0.2, 0.2]);
        assert_eq!(materials[0].diffuse_map.as_deref(), Some("textures/brick wall.png"));

        assert_eq!(materials[1].name, "Glass");
        assert!(materials[1].diffuse_map.is_none());
    }

    #[test]
    fn test_invalid_color_reports_line() {
        let err = MtlParser::parse("newmtl A\nKd 1.0 nope 0.0\n").unwrap_err();
        assert!(err.starts_with("Line 2"));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        assert!(MtlParser::parse("newmtl\n").is_err());
    }
}
