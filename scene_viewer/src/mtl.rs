use std::path::{Path, PathBuf};

use firstperson::math_prelude::*;

use crate::error::LoadError;
use crate::obj::parse_vec3;

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub diffuse: Vec3,
    pub emissive: Vec3,
    pub diffuse_map: Option<PathBuf>,
}

impl Material {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            diffuse: Vec3::ONE,
            emissive: Vec3::ZERO,
            diffuse_map: None,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::named("default")
    }
}

/// Parses a Wavefront material library. Texture paths are resolved against
/// the directory of `path`.
pub fn parse_materials(contents: &str, path: &Path) -> Result<Vec<Material>, LoadError> {
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let mut materials: Vec<Material> = Vec::new();

    for (number, line) in contents.lines().enumerate() {
        let fail = |reason: String| LoadError::Parse {
            path: path.to_owned(),
            line: number + 1,
            reason,
        };

        let line = line.split('#').next().unwrap_or("");
        let mut fields = line.split_whitespace();
        let keyword = match fields.next() {
            Some(keyword) => keyword,
            None => continue,
        };

        if keyword == "newmtl" {
            let name = fields
                .next()
                .ok_or_else(|| fail("newmtl without a name".to_owned()))?;
            materials.push(Material::named(name));
            continue;
        }

        let current = match keyword {
            "Kd" | "Ke" | "map_Kd" => materials
                .last_mut()
                .ok_or_else(|| fail(format!("{} before newmtl", keyword)))?,
            _ => continue,
        };

        match keyword {
            "Kd" => current.diffuse = parse_vec3(&mut fields).map_err(fail)?,
            "Ke" => current.emissive = parse_vec3(&mut fields).map_err(fail)?,
            "map_Kd" => {
                // options like -bm come first, the file name is last
                let file = fields
                    .last()
                    .ok_or_else(|| fail("map_Kd without a file".to_owned()))?;
                current.diffuse_map = Some(base.join(file));
            }
            _ => unreachable!(),
        }
    }

    Ok(materials)
}

pub fn read_materials<P: AsRef<Path>>(path: P) -> Result<Vec<Material>, LoadError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_materials(&contents, path)
}
