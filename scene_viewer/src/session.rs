use firstperson::math_prelude::*;
use firstperson::{
    InteractableTarget, KeyState, MoveBindings, Movement, ProximityToggle, Transition,
};
use tracing::{debug, info};

use crate::camera::Camera;
use crate::input::{key_label, InputEvent};
use crate::loader::Loading;
use crate::model::Prop;

/// Emissive colour of a highlighted target (#555555)
pub const HIGHLIGHT_EMISSIVE: [f32; 3] = [0.333, 0.333, 0.333];

/// The interactable object, once its model has loaded.
#[derive(Debug, Clone)]
pub struct Interactable {
    pub prop: Prop,
    pub target: InteractableTarget,
    base_emissive: Vec3,
}

impl Interactable {
    /// Stands `prop` on `anchor` and makes it interactable there.
    pub fn new(mut prop: Prop, anchor: Vec3) -> Self {
        prop.place_at(anchor);
        let base_emissive = prop.material.emissive;
        Self {
            prop,
            target: InteractableTarget::new(anchor),
            base_emissive,
        }
    }
}

/// Everything one first person session owns: camera, input, movement and
/// the object the player can walk up to.
pub struct Session {
    camera: Camera,
    keys: KeyState,
    bindings: MoveBindings,
    movement: Movement,
    proximity: ProximityToggle,
    mouse_sensitivity: f32,
    pointer_locked: bool,
    target: Loading<Interactable>,
    prompt: Option<String>,
    interactions: usize,
}

impl Session {
    pub fn new(
        camera: Camera,
        bindings: MoveBindings,
        proximity: ProximityToggle,
        mouse_sensitivity: f32,
        target: Loading<Interactable>,
    ) -> Self {
        Self {
            camera,
            keys: KeyState::new(),
            bindings,
            movement: Movement::new(),
            proximity,
            mouse_sensitivity,
            pointer_locked: false,
            target,
            prompt: None,
            interactions: 0,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn bindings(&self) -> &MoveBindings {
        &self.bindings
    }

    pub fn target(&self) -> Option<&Interactable> {
        self.target.get()
    }

    pub fn target_loading(&self) -> &Loading<Interactable> {
        &self.target
    }

    /// Interaction prompt, while one is showing.
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn interactions(&self) -> usize {
        self.interactions
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(code) => {
                self.keys.press(code);
                if *code == self.bindings.interact {
                    self.interact();
                }
            }
            InputEvent::KeyUp(code) => self.keys.release(code),
            InputEvent::MouseMove { dx, dy } if self.pointer_locked => {
                self.camera.pose.look(*dx, *dy, self.mouse_sensitivity)
            }
            InputEvent::PointerLock(locked) => {
                debug!("pointer lock {}", locked);
                self.pointer_locked = *locked;
            }
            InputEvent::Resize { width, height } => self.camera.resize(*width, *height),
            _ => {}
        }
    }

    /// Runs one frame: pick up loads, walk, then check proximity.
    pub fn frame(&mut self, dt: f32) -> Option<Transition> {
        if self.target.poll() {
            if let Some(target) = self.target.get() {
                info!(
                    "{} ready at {:?} ({} triangles)",
                    target.prop.name,
                    target.target.position,
                    target.prop.model.triangle_count()
                );
            }
        }

        self.movement
            .integrate(&self.keys, &self.bindings, &mut self.camera.pose, dt);

        let camera = self.camera.pose.position;
        let transition = self
            .proximity
            .update(camera, self.target.get_mut().map(|t| &mut t.target));
        if let Some(transition) = transition {
            self.apply(transition);
        }
        transition
    }

    fn apply(&mut self, transition: Transition) {
        let target = match self.target.get_mut() {
            Some(target) => target,
            None => return,
        };
        match transition {
            Transition::Highlighted => {
                target.prop.material.emissive = Vec3::from(HIGHLIGHT_EMISSIVE);
                self.prompt = Some(format!(
                    "Press {} to interact",
                    key_label(&self.bindings.interact)
                ));
            }
            Transition::Cleared => {
                target.prop.material.emissive = target.base_emissive;
                self.prompt = None;
            }
        }
        debug!("{:?} {}", transition, target.prop.name);
    }

    /// Fires the interact action if the target is highlighted.
    pub fn interact(&mut self) -> bool {
        let fired = self
            .proximity
            .interact(self.target.get().map(|t| &t.target));
        if fired {
            self.interactions += 1;
            info!("interacted with the object ({} so far)", self.interactions);
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Viewport;
    use crate::error::LoadError;
    use crate::loader::tests::settle;
    use crate::mtl::Material;
    use crate::obj;
    use firstperson::CameraPose;
    use std::path::{Path, PathBuf};

    fn crate_prop() -> Prop {
        let model = obj::parse_model(
            "v -0.5 0 -0.5\nv 0.5 0 -0.5\nv 0.5 1 0.5\nf 1 2 3\n",
            Path::new("crate.obj"),
        )
        .unwrap();
        Prop::new("crate", model, Material::default(), Vec3::Y).unwrap()
    }

    fn session_at(z: f32, target: Loading<Interactable>) -> Session {
        let camera = Camera::new(
            CameraPose::new(Vec3::new(0.0, 0.0, z)),
            Viewport::new(800, 600),
        );
        Session::new(
            camera,
            MoveBindings::default(),
            ProximityToggle::default(),
            0.002,
            target,
        )
    }

    fn teleport(session: &mut Session, z: f32) -> Option<Transition> {
        session.camera.pose.position = Vec3::new(0.0, 0.0, z);
        session.frame(0.016)
    }

    #[test]
    fn highlight_and_prompt_follow_distance() {
        let target = Loading::Ready(Interactable::new(crate_prop(), Vec3::ZERO));
        let mut session = session_at(10.0, target);

        assert_eq!(teleport(&mut session, 10.0), None);
        assert_eq!(session.prompt(), None);

        assert_eq!(teleport(&mut session, 3.0), Some(Transition::Highlighted));
        assert_eq!(session.prompt(), Some("Press E to interact"));
        assert_eq!(
            session.target().unwrap().prop.material.emissive,
            Vec3::from(HIGHLIGHT_EMISSIVE)
        );
        assert_eq!(teleport(&mut session, 2.0), None);

        assert_eq!(teleport(&mut session, 10.0), Some(Transition::Cleared));
        assert_eq!(session.prompt(), None);
        assert_eq!(session.target().unwrap().prop.material.emissive, Vec3::ZERO);
    }

    #[test]
    fn clearing_restores_the_material_glow() {
        let glow = Vec3::new(0.1, 0.2, 0.0);
        let mut prop = crate_prop();
        prop.material = Material {
            emissive: glow,
            ..Material::default()
        };
        let target = Loading::Ready(Interactable::new(prop, Vec3::ZERO));
        let mut session = session_at(10.0, target);

        assert_eq!(teleport(&mut session, 3.0), Some(Transition::Highlighted));
        assert_eq!(
            session.target().unwrap().prop.material.emissive,
            Vec3::from(HIGHLIGHT_EMISSIVE)
        );

        assert_eq!(teleport(&mut session, 10.0), Some(Transition::Cleared));
        assert_eq!(session.target().unwrap().prop.material.emissive, glow);
    }

    #[test]
    fn interact_key_needs_highlight() {
        let target = Loading::Ready(Interactable::new(crate_prop(), Vec3::ZERO));
        let mut session = session_at(20.0, target);
        session.frame(0.016);

        session.handle_event(&InputEvent::KeyDown("KeyE".to_owned()));
        assert_eq!(session.interactions(), 0);

        teleport(&mut session, 1.0);
        session.handle_event(&InputEvent::KeyUp("KeyE".to_owned()));
        session.handle_event(&InputEvent::KeyDown("KeyE".to_owned()));
        assert_eq!(session.interactions(), 1);
    }

    #[test]
    fn failed_target_is_never_in_range() {
        let mut session = session_at(0.0, Loading::Failed);
        for _ in 0..5 {
            assert_eq!(session.frame(0.016), None);
        }
        assert!(session.target().is_none());
        assert!(!session.interact());
    }

    #[test]
    fn target_picked_up_when_loaded() {
        let prop = crate_prop();
        let mut loading = Loading::spawn("crate", move || Ok(Interactable::new(prop, Vec3::ZERO)));
        settle(&mut loading);
        let mut session = session_at(1.0, loading);
        assert_eq!(session.frame(0.016), Some(Transition::Highlighted));
    }

    #[test]
    fn load_failure_keeps_running() {
        let mut loading: Loading<Interactable> = Loading::spawn("missing", || {
            Err(LoadError::Empty {
                path: PathBuf::from("missing.obj"),
            })
        });
        settle(&mut loading);
        let mut session = session_at(1.0, loading);
        session.handle_event(&InputEvent::KeyDown("KeyW".to_owned()));
        assert_eq!(session.frame(0.016), None);
        assert!(session.camera().pose.position.z < 1.0);
    }

    #[test]
    fn mouse_look_needs_pointer_lock() {
        let mut session = session_at(0.0, Loading::Failed);
        let yaw = session.camera().pose.yaw();

        session.handle_event(&InputEvent::MouseMove { dx: 100.0, dy: 0.0 });
        assert_eq!(session.camera().pose.yaw(), yaw);

        session.handle_event(&InputEvent::PointerLock(true));
        session.handle_event(&InputEvent::MouseMove { dx: 100.0, dy: 0.0 });
        assert!(session.camera().pose.yaw() < yaw);

        session.handle_event(&InputEvent::PointerLock(false));
        let yaw = session.camera().pose.yaw();
        session.handle_event(&InputEvent::MouseMove { dx: 100.0, dy: 0.0 });
        assert_eq!(session.camera().pose.yaw(), yaw);
    }

    #[test]
    fn resize_reaches_camera() {
        let mut session = session_at(0.0, Loading::Failed);
        session.handle_event(&InputEvent::Resize {
            width: 300,
            height: 100,
        });
        assert!((session.camera().aspect() - 3.0).abs() < 1e-6);
    }
}
