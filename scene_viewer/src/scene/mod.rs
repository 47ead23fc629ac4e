mod orbit;
mod room;

use clap::ValueEnum;
use firstperson::math_prelude::*;
use firstperson::Aabb;
use itertools::Itertools;

use crate::camera::{Camera, Viewport};
use crate::config::ViewerConfig;
use crate::input::InputEvent;

pub use orbit::{OrbitControls, OrbitScene};
pub use room::RoomScene;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Model viewer with an orbiting camera
    Orbit,
    /// First person walk up to an interactable object
    Room,
}

pub fn build(kind: SceneKind, config: &ViewerConfig) -> Box<dyn Scene> {
    let viewport = Viewport::new(config.window.width, config.window.height);
    match kind {
        SceneKind::Orbit => Box::new(OrbitScene::new(config, viewport)),
        SceneKind::Room => Box::new(RoomScene::new(config, viewport)),
    }
}

pub trait Scene {
    fn handle_event(&mut self, event: &InputEvent);
    fn update(&mut self, dt: f32);
    fn camera(&self) -> &Camera;
    fn draw_list(&self) -> Vec<DrawItem>;

    fn background(&self) -> Vec3 {
        Vec3::new(0.05, 0.05, 0.08)
    }

    /// Text for the window title, e.g. an interaction prompt.
    fn status(&self) -> Option<String> {
        None
    }

    /// Whether a click should capture the pointer.
    fn wants_pointer_lock(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub bounds: Aabb,
    pub color: Vec3,
}

/// One directional light plus ambient.
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    pub ambient: Vec3,
    pub sun: Vec3,
    /// Unit vector pointing at the sun
    pub towards_sun: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        // 0x404040 ambient and a white sun at (5, 5, 5), both at intensity 3
        Self {
            ambient: Vec3::splat(64.0 / 255.0) * 3.0,
            sun: Vec3::ONE * 3.0,
            towards_sun: Vec3::new(5.0, 5.0, 5.0).normalize(),
        }
    }
}

impl Lighting {
    // brings full ambient + sun back into displayable range
    const EXPOSURE: f32 = 0.25;

    pub fn shade(&self, albedo: Vec3, lambert: f32, emissive: Vec3) -> Vec3 {
        let light = (self.ambient + self.sun * lambert) * Self::EXPOSURE;
        (albedo * light + emissive).min(Vec3::ONE)
    }
}

/// Screen space line segments of the box outline. Edges with a corner
/// behind the camera are skipped.
pub fn wireframe(camera: &Camera, bounds: &Aabb) -> Vec<(Vec2, Vec2)> {
    let matrix = camera.generate_matrix();
    let corners = bounds.corners();
    let projected: Vec<Option<Vec2>> = corners
        .iter()
        .map(|c| camera.project_with(&matrix, *c))
        .collect();

    (0..corners.len())
        .tuple_combinations()
        .filter(|(a, b)| (a ^ b).count_ones() == 1)
        .filter_map(|(a, b)| Some((projected[a]?, projected[b]?)))
        .collect()
}
