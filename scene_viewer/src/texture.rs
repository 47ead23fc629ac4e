use std::path::Path;

use firstperson::math_prelude::*;

use crate::error::LoadError;

pub struct Texture {
    colors: Vec<Vec4>,
    width: usize,
    height: usize,
}

impl Texture {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Texture, LoadError> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|source| LoadError::Image {
                path: path.to_owned(),
                source,
            })?
            .to_rgba8();
        let (width, height) = img.dimensions();
        Self::from_rgba8(width as usize, height as usize, img.as_raw()).ok_or_else(|| {
            LoadError::Empty {
                path: path.to_owned(),
            }
        })
    }

    /// `None` for an empty image or a pixel buffer of the wrong size.
    pub fn from_rgba8(width: usize, height: usize, pixels: &[u8]) -> Option<Texture> {
        if width == 0 || height == 0 || pixels.len() != width * height * 4 {
            return None;
        }
        let colors = pixels
            .chunks_exact(4)
            .map(|p| Vec4::new(p[0] as f32, p[1] as f32, p[2] as f32, p[3] as f32) / 255.0)
            .collect();

        Some(Self {
            colors,
            width,
            height,
        })
    }

    /// Nearest texel, repeating outside [0, 1].
    pub fn sample(&self, uv: Vec2) -> Vec4 {
        let x = (uv.x * self.width as f32).floor() as i64;
        let y = ((1.0 - uv.y) * self.height as f32).floor() as i64;

        let x = x.rem_euclid(self.width as i64) as usize;
        let y = y.rem_euclid(self.height as i64) as usize;
        self.color_at(x, y)
    }

    pub fn average(&self) -> Vec4 {
        self.colors.iter().fold(Vec4::ZERO, |acc, c| acc + *c) / self.colors.len() as f32
    }

    fn color_at(&self, x: usize, y: usize) -> Vec4 {
        self.colors[x + y * self.width]
    }
}
