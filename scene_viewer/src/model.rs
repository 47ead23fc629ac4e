use std::path::Path;

use firstperson::math_prelude::*;
use firstperson::Aabb;
use tracing::{debug, warn};

use crate::error::LoadError;
use crate::mtl::{self, Material};
use crate::obj;
use crate::texture::Texture;

#[derive(Debug, Clone, Copy)]
pub struct ModelVertex {
    pub position: Vec3,
    pub texture: Vec2,
    pub normal: Vec3,
}

#[derive(Debug, Clone)]
pub struct Model {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
    pub material_libs: Vec<String>,
    /// First material the model asks for
    pub material: Option<String>,
}

impl Model {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().map(|v| v.position))
    }

    /// Average diffuse term over all vertices for a light shining from
    /// `towards_light`. Models without normals count as fully lit.
    pub fn mean_lambert(&self, towards_light: Vec3) -> f32 {
        let lit = self
            .vertices
            .iter()
            .filter(|v| v.normal != Vec3::ZERO)
            .map(|v| v.normal.normalize().dot(towards_light).max(0.0));
        let (sum, count) = lit.fold((0.0, 0usize), |(sum, count), l| (sum + l, count + 1));
        if count == 0 {
            1.0
        } else {
            sum / count as f32
        }
    }

    pub fn mean_texture_color(&self, texture: &Texture) -> Vec4 {
        if self.vertices.is_empty() {
            return texture.average();
        }
        let total = self
            .vertices
            .iter()
            .fold(Vec4::ZERO, |acc, v| acc + texture.sample(v.texture));
        total / self.vertices.len() as f32
    }
}

/// A loaded model placed in the scene together with its material.
#[derive(Debug, Clone)]
pub struct Prop {
    pub name: String,
    pub model: Model,
    pub material: Material,
    /// Diffuse colour with the diffuse map folded in
    pub albedo: Vec3,
    pub lambert: f32,
    local_bounds: Aabb,
    offset: Vec3,
}

impl Prop {
    pub fn new(name: &str, model: Model, material: Material, towards_light: Vec3) -> Option<Self> {
        let local_bounds = model.bounds()?;
        let lambert = model.mean_lambert(towards_light);
        Some(Self {
            name: name.to_owned(),
            albedo: material.diffuse,
            model,
            material,
            lambert,
            local_bounds,
            offset: Vec3::ZERO,
        })
    }

    /// Reads an OBJ file plus the material libraries it references.
    pub fn load(path: &Path, towards_light: Vec3) -> Result<Self, LoadError> {
        let model = obj::read_model(path)?;
        let dir = path.parent().unwrap_or_else(|| Path::new(""));

        let mut materials = Vec::new();
        for lib in model.material_libs.iter() {
            materials.extend(mtl::read_materials(dir.join(lib))?);
        }

        let material = match &model.material {
            Some(name) => materials.iter().find(|m| &m.name == name).cloned(),
            None => materials.first().cloned(),
        };
        let material = material.unwrap_or_else(|| {
            if let Some(name) = &model.material {
                warn!("material {:?} not found for {:?}", name, path);
            }
            Material::default()
        });

        let albedo = match &material.diffuse_map {
            Some(map) => match Texture::load(map) {
                Ok(texture) => material.diffuse * model.mean_texture_color(&texture).truncate(),
                Err(err) => {
                    warn!("{}", err);
                    material.diffuse
                }
            },
            None => material.diffuse,
        };

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(
            "{}: {} triangles, material {:?}",
            name,
            model.triangle_count(),
            material.name
        );

        let mut prop = Self::new(&name, model, material, towards_light).ok_or_else(|| {
            LoadError::Empty {
                path: path.to_owned(),
            }
        })?;
        prop.albedo = albedo;
        Ok(prop)
    }

    /// Moves the prop so it stands on `anchor`, centered on x/z.
    pub fn place_at(&mut self, anchor: Vec3) {
        self.offset = self.local_bounds.placement_offset(anchor);
    }

    pub fn bounds(&self) -> Aabb {
        self.local_bounds.translated(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> Model {
        obj::parse_model(
            "v -1 -1 -1\nv 1 -1 -1\nv 1 1 -1\nv -1 1 -1\n\
             v -1 -1 1\nv 1 -1 1\nv 1 1 1\nv -1 1 1\n\
             vn 0 1 0\nvn 0 -1 0\n\
             f 4//1 3//1 7//1 8//1\n\
             f 1//2 2//2 6//2 5//2\n",
            Path::new("cube.obj"),
        )
        .unwrap()
    }

    #[test]
    fn half_of_a_cube_faces_the_sun() {
        let lambert = cube().mean_lambert(Vec3::Y);
        assert!((lambert - 0.5).abs() < 1e-6);
    }

    #[test]
    fn placed_on_anchor() {
        let mut prop = Prop::new("cube", cube(), Material::default(), Vec3::Y).unwrap();
        prop.place_at(Vec3::new(3.0, 0.0, -2.0));
        let bounds = prop.bounds();
        assert_eq!(bounds.min().y, 0.0);
        assert_eq!(bounds.center(), Vec3::new(3.0, 1.0, -2.0));
    }

    #[test]
    fn textured_albedo() {
        let mut model = cube();
        model.vertices.iter_mut().for_each(|v| v.texture = Vec2::new(0.25, 0.75));
        let red = Texture::from_rgba8(1, 1, &[255, 0, 0, 255]).unwrap();
        assert_eq!(model.mean_texture_color(&red), Vec4::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn load_reports_missing_file() {
        assert!(Prop::load(Path::new("no/such/prop.obj"), Vec3::Y).is_err());
    }
}
