use std::path::Path;

use firstperson::math_prelude::*;
use itertools::Itertools;

use crate::error::LoadError;
use crate::model::{Model, ModelVertex};

struct ObjModel {
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    texture: Vec<Vec2>,
    faces: Vec<ObjFace>,
    material_libs: Vec<String>,
    material: Option<String>,
}

struct ObjFace {
    vertices: [usize; 3],
    normals: Option<[usize; 3]>,
    textures: Option<[usize; 3]>,
}

#[derive(Clone, Copy)]
struct Corner {
    vertex: usize,
    texture: Option<usize>,
    normal: Option<usize>,
}

impl ObjFace {
    fn new(a: Corner, b: Corner, c: Corner) -> Self {
        let textures = match (a.texture, b.texture, c.texture) {
            (Some(t0), Some(t1), Some(t2)) => Some([t0, t1, t2]),
            _ => None,
        };
        let normals = match (a.normal, b.normal, c.normal) {
            (Some(n0), Some(n1), Some(n2)) => Some([n0, n1, n2]),
            _ => None,
        };
        Self {
            vertices: [a.vertex, b.vertex, c.vertex],
            normals,
            textures,
        }
    }
}

pub(crate) fn parse_float(field: &str) -> Result<f32, String> {
    field
        .parse::<f32>()
        .map_err(|_| format!("invalid number {:?}", field))
}

pub(crate) fn parse_vec3<'a, I>(fields: &mut I) -> Result<Vec3, String>
where
    I: Iterator<Item = &'a str>,
{
    let (x, y, z) = fields.next_tuple().ok_or("expected 3 components")?;
    Ok(Vec3::new(parse_float(x)?, parse_float(y)?, parse_float(z)?))
}

// 1-based, negative counts back from the last element defined so far
fn resolve_index(field: &str, count: usize, kind: &str) -> Result<usize, String> {
    let index = field
        .parse::<i64>()
        .map_err(|_| format!("invalid {} index {:?}", kind, field))?;
    let resolved = match index {
        i if i > 0 => i - 1,
        i if i < 0 => count as i64 + i,
        _ => -1,
    };
    if resolved < 0 || resolved >= count as i64 {
        return Err(format!(
            "{} index {} out of range ({} defined)",
            kind, index, count
        ));
    }
    Ok(resolved as usize)
}

fn parse_corner(token: &str, obj: &ObjModel) -> Result<Corner, String> {
    let mut parts = token.split('/');
    let vertex = resolve_index(parts.next().unwrap_or(""), obj.vertices.len(), "vertex")?;
    let texture = match parts.next() {
        Some(t) if !t.is_empty() => Some(resolve_index(t, obj.texture.len(), "texture")?),
        _ => None,
    };
    let normal = match parts.next() {
        Some(n) if !n.is_empty() => Some(resolve_index(n, obj.normals.len(), "normal")?),
        _ => None,
    };
    Ok(Corner {
        vertex,
        texture,
        normal,
    })
}

fn parse_obj_model(contents: &str, path: &Path) -> Result<ObjModel, LoadError> {
    let mut obj = ObjModel {
        vertices: Vec::new(),
        normals: Vec::new(),
        texture: Vec::new(),
        faces: Vec::new(),
        material_libs: Vec::new(),
        material: None,
    };

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

        match keyword {
            "v" => obj.vertices.push(parse_vec3(&mut fields).map_err(fail)?),
            "vn" => obj.normals.push(parse_vec3(&mut fields).map_err(fail)?),
            "vt" => {
                let u = fields.next().ok_or_else(|| fail("expected u".to_owned()))?;
                let v = fields.next().unwrap_or("0");
                let uv = Vec2::new(
                    parse_float(u).map_err(fail)?,
                    parse_float(v).map_err(fail)?,
                );
                obj.texture.push(uv);
            }
            "f" => {
                let corners = fields
                    .map(|token| parse_corner(token, &obj))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(fail)?;
                if corners.len() < 3 {
                    return Err(fail(format!(
                        "face needs at least 3 vertices, got {}",
                        corners.len()
                    )));
                }
                // polygons are split into a fan around the first corner
                for (b, c) in corners[1..].iter().tuple_windows() {
                    obj.faces.push(ObjFace::new(corners[0], *b, *c));
                }
            }
            "mtllib" => obj.material_libs.extend(fields.map(str::to_owned)),
            "usemtl" => {
                if obj.material.is_none() {
                    obj.material = fields.next().map(str::to_owned);
                }
            }
            _ => continue,
        }
    }

    Ok(obj)
}

pub fn parse_model(contents: &str, path: &Path) -> Result<Model, LoadError> {
    let obj = parse_obj_model(contents, path)?;
    if obj.faces.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_owned(),
        });
    }

    let mut vertices = Vec::with_capacity(obj.faces.len() * 3);
    let mut indices = Vec::with_capacity(obj.faces.len() * 3);

    for face in obj.faces.iter() {
        for corner in 0..3 {
            let normal = face
                .normals
                .map(|indices| obj.normals[indices[corner]])
                .unwrap_or_default();
            let texture = face
                .textures
                .map(|indices| obj.texture[indices[corner]])
                .unwrap_or_default();

            indices.push(vertices.len() as u32);
            vertices.push(ModelVertex {
                position: obj.vertices[face.vertices[corner]],
                normal,
                texture,
            });
        }
    }

    Ok(Model {
        vertices,
        indices,
        material_libs: obj.material_libs,
        material: obj.material,
    })
}

pub fn read_model<P: AsRef<Path>>(path: P) -> Result<Model, LoadError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_model(&contents, path)
}
