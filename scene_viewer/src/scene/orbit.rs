use std::f32::consts::{PI, TAU};

use firstperson::math_prelude::*;
use firstperson::CameraPose;

use crate::camera::{Camera, Viewport};
use crate::config::{OrbitConfig, ViewerConfig};
use crate::input::InputEvent;
use crate::loader::Loading;
use crate::model::Prop;
use crate::texture::Texture;

use super::{DrawItem, Lighting, Scene};

/// Orbits the camera around a target point. Rotation eases out over
/// several frames, zoom is applied on the next update.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    radius: f32,
    // around +Y, 0 on +Z
    theta: f32,
    // from +Y
    phi: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl OrbitControls {
    const MIN_PHI: f32 = 1e-6;
    const ZOOM_STEP: f32 = 0.95;

    pub fn new(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let radius = offset.length();
        let (theta, phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };

        Self {
            target,
            damping_factor: 0.05,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            rotate_speed: 1.0,
            radius,
            theta,
            phi,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }

    /// Mouse drag in pixels. A drag across the full viewport height is one
    /// full turn.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: u32) {
        let height = viewport_height.max(1) as f32;
        self.delta_theta -= TAU * dx / height * self.rotate_speed;
        self.delta_phi -= TAU * dy / height * self.rotate_speed;
    }

    /// Positive steps zoom in.
    pub fn zoom(&mut self, steps: f32) {
        self.scale *= Self::ZOOM_STEP.powf(steps);
    }

    pub fn update(&mut self, pose: &mut CameraPose) {
        self.theta += self.delta_theta * self.damping_factor;
        self.phi = (self.phi + self.delta_phi * self.damping_factor)
            .clamp(Self::MIN_PHI, PI - Self::MIN_PHI);
        // min_distance wins if the limits are inverted
        self.radius = (self.radius * self.scale)
            .min(self.max_distance)
            .max(self.min_distance);

        self.delta_theta *= 1.0 - self.damping_factor;
        self.delta_phi *= 1.0 - self.damping_factor;
        self.scale = 1.0;

        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let offset = Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta) * self.radius;
        pose.position = self.target + offset;
        pose.look_at(self.target);
    }
}

/// Model viewer: one model under an environment, camera on orbit controls.
pub struct OrbitScene {
    camera: Camera,
    controls: OrbitControls,
    lighting: Lighting,
    model: Loading<Prop>,
    environment: Loading<Texture>,
    dragging: bool,
}

impl OrbitScene {
    pub fn new(config: &ViewerConfig, viewport: Viewport) -> Self {
        let orbit = &config.orbit;
        let lighting = Lighting::default();

        let model_path = config.resolve(&orbit.model);
        let towards_sun = lighting.towards_sun;
        let model = Loading::spawn(model_path.display().to_string(), move || {
            Prop::load(&model_path, towards_sun)
        });

        let environment_path = config.resolve(&orbit.environment);
        let environment = Loading::spawn(environment_path.display().to_string(), move || {
            Texture::load(&environment_path)
        });

        Self::with_assets(orbit, viewport, model, environment)
    }

    pub fn with_assets(
        orbit: &OrbitConfig,
        viewport: Viewport,
        model: Loading<Prop>,
        environment: Loading<Texture>,
    ) -> Self {
        let start = Vec3::new(0.0, 0.0, orbit.start_distance);
        let mut controls = OrbitControls::new(start, Vec3::ZERO);
        controls.damping_factor = orbit.damping_factor;
        controls.min_distance = orbit.min_distance;
        controls.max_distance = orbit.max_distance;

        let mut pose = CameraPose::new(start);
        pose.look_at(controls.target);

        Self {
            camera: Camera::new(pose, viewport),
            controls,
            lighting: Lighting::default(),
            model,
            environment,
            dragging: false,
        }
    }
}

impl Scene for OrbitScene {
    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::MouseButton { pressed } => self.dragging = *pressed,
            InputEvent::MouseMove { dx, dy } if self.dragging => {
                self.controls
                    .rotate(*dx, *dy, self.camera.viewport().height)
            }
            InputEvent::Wheel { delta } => self.controls.zoom(*delta),
            InputEvent::Resize { width, height } => self.camera.resize(*width, *height),
            _ => {}
        }
    }

    fn update(&mut self, _dt: f32) {
        self.model.poll();
        self.environment.poll();
        self.controls.update(&mut self.camera.pose);
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn draw_list(&self) -> Vec<DrawItem> {
        self.model
            .get()
            .map(|prop| DrawItem {
                bounds: prop.bounds(),
                color: self
                    .lighting
                    .shade(prop.albedo, prop.lambert, prop.material.emissive),
            })
            .into_iter()
            .collect()
    }

    fn background(&self) -> Vec3 {
        match self.environment.get() {
            Some(texture) => texture.average().truncate(),
            None => Vec3::new(0.05, 0.05, 0.08),
        }
    }

    fn status(&self) -> Option<String> {
        if self.model.is_pending() {
            Some("loading model".to_owned())
        } else if self.model.is_failed() {
            Some("model failed to load".to_owned())
        } else {
            None
        }
    }
}
