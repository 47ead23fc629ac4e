use firstperson::math_prelude::*;
use firstperson::{Aabb, CameraPose, ProximityToggle};

use crate::camera::{Camera, Viewport};
use crate::config::ViewerConfig;
use crate::input::{key_label, InputEvent};
use crate::loader::Loading;
use crate::model::Prop;
use crate::session::{Interactable, Session};

use super::{DrawItem, Lighting, Scene};

const FLOOR_COLOR: [f32; 3] = [0.35, 0.35, 0.38];

/// First person scene: a floor and one object to walk up to.
pub struct RoomScene {
    session: Session,
    lighting: Lighting,
    floor: Aabb,
}

impl RoomScene {
    pub fn new(config: &ViewerConfig, viewport: Viewport) -> Self {
        let room = &config.room;
        let lighting = Lighting::default();

        let model_path = config.resolve(&room.model);
        let anchor = room.target_position;
        let towards_sun = lighting.towards_sun;
        let target = Loading::spawn(model_path.display().to_string(), move || {
            Prop::load(&model_path, towards_sun).map(|prop| Interactable::new(prop, anchor))
        });

        let mut pose = CameraPose::new(room.start_position);
        pose.look_at(Vec3::new(anchor.x, room.start_position.y, anchor.z));

        let session = Session::new(
            Camera::new(pose, viewport),
            config.bindings.clone(),
            ProximityToggle::new(room.interact_distance),
            room.mouse_sensitivity,
            target,
        );
        Self::with_session(session, room.floor_size)
    }

    pub fn with_session(session: Session, floor_size: f32) -> Self {
        let half = floor_size / 2.0;
        Self {
            session,
            lighting: Lighting::default(),
            floor: Aabb::new(Vec3::new(-half, -0.01, -half), Vec3::new(half, 0.0, half)),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

impl Scene for RoomScene {
    fn handle_event(&mut self, event: &InputEvent) {
        self.session.handle_event(event);
    }

    fn update(&mut self, dt: f32) {
        self.session.frame(dt);
    }

    fn camera(&self) -> &Camera {
        self.session.camera()
    }

    fn draw_list(&self) -> Vec<DrawItem> {
        let mut items = vec![DrawItem {
            bounds: self.floor,
            color: Vec3::from(FLOOR_COLOR),
        }];
        if let Some(target) = self.session.target() {
            let prop = &target.prop;
            items.push(DrawItem {
                bounds: prop.bounds(),
                color: self
                    .lighting
                    .shade(prop.albedo, prop.lambert, prop.material.emissive),
            });
        }
        items
    }

    fn status(&self) -> Option<String> {
        if let Some(prompt) = self.session.prompt() {
            return Some(match self.session.interactions() {
                0 => prompt.to_owned(),
                n => format!("{} (used {} times)", prompt, n),
            });
        }
        if self.session.target_loading().is_pending() {
            return Some("loading".to_owned());
        }
        if !self.session.pointer_locked() {
            let b = self.session.bindings();
            return Some(format!(
                "click to look around, move with {}{}{}{}",
                key_label(&b.forward),
                key_label(&b.left),
                key_label(&b.backward),
                key_label(&b.right)
            ));
        }
        None
    }

    fn wants_pointer_lock(&self) -> bool {
        true
    }
}
