use crate::math_prelude::*;

use super::{CameraPose, KeyState, MoveBindings};

/// Walking integrator. Held keys push the velocity, the velocity moves the
/// camera, then drag bleeds it off.
#[derive(Debug, Default, Clone, Copy)]
pub struct Movement {
    velocity: Vec3,
}

impl Movement {
    pub const SPEED_SCALE: f32 = 2.0;
    pub const DAMPING: f32 = 0.9;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Advances one frame and returns the offset applied to the camera.
    ///
    /// Negative `dt` is treated as zero.
    pub fn integrate(
        &mut self,
        keys: &KeyState,
        bindings: &MoveBindings,
        pose: &mut CameraPose,
        dt: f32,
    ) -> Vec3 {
        let dt = dt.max(0.0);
        let forward = pose.horizontal_forward();
        let side = forward.cross(Vec3::Y);

        let held = [
            (&bindings.forward, forward),
            (&bindings.backward, -forward),
            (&bindings.left, -side),
            (&bindings.right, side),
        ];
        for (code, direction) in held.iter() {
            if keys.is_pressed(code) {
                self.velocity += *direction * Self::SPEED_SCALE * dt;
            }
        }

        let step = self.velocity;
        pose.position += step;
        self.velocity *= Self::DAMPING;
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn setup() -> (Movement, KeyState, MoveBindings, CameraPose) {
        (
            Movement::new(),
            KeyState::new(),
            MoveBindings::default(),
            CameraPose::default(),
        )
    }

    #[test]
    fn forward_moves_along_facing() {
        let (mut movement, mut keys, bindings, mut pose) = setup();
        keys.press(&bindings.forward);
        let step = movement.integrate(&keys, &bindings, &mut pose, 0.5);
        assert!(step.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
        assert!(pose.position.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
        assert!(movement
            .velocity()
            .abs_diff_eq(Vec3::new(0.0, 0.0, -0.9), 1e-6));
    }

    #[test]
    fn right_is_forward_cross_up() {
        let (mut movement, mut keys, bindings, mut pose) = setup();
        keys.press(&bindings.right);
        movement.integrate(&keys, &bindings, &mut pose, 0.1);
        assert!(pose.position.x > 0.0);
        assert!(pose.position.z.abs() < 1e-6);
    }

    #[test]
    fn looking_down_does_not_change_ground_speed() {
        let (mut movement, mut keys, bindings, mut pose) = setup();
        pose = CameraPose::with_orientation(pose.position, 0.0, -1.2);
        keys.press(&bindings.forward);
        let step = movement.integrate(&keys, &bindings, &mut pose, 0.5);
        assert_eq!(step.y, 0.0);
        assert!((step.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn opposite_keys_cancel() {
        let (mut movement, mut keys, bindings, mut pose) = setup();
        keys.press(&bindings.forward);
        keys.press(&bindings.backward);
        keys.press(&bindings.left);
        keys.press(&bindings.right);
        for _ in 0..10 {
            movement.integrate(&keys, &bindings, &mut pose, 0.016);
        }
        assert!(movement.velocity().abs_diff_eq(Vec3::ZERO, 1e-6));
        assert!(pose.position.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn idle_velocity_decays_and_never_diverges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let (mut movement, mut keys, bindings, mut pose) = setup();
            keys.press(&bindings.forward);
            keys.press(&bindings.left);
            movement.integrate(&keys, &bindings, &mut pose, rng.gen_range(0.001..0.5));
            keys.release_all();

            let mut previous = movement.velocity().length();
            for _ in 0..200 {
                movement.integrate(&keys, &bindings, &mut pose, rng.gen_range(0.0..1.0));
                let speed = movement.velocity().length();
                assert!(speed.is_finite());
                assert!(speed < previous || speed == 0.0);
                previous = speed;
            }
        }
    }

    #[test]
    fn decay_is_not_instant() {
        let (mut movement, mut keys, bindings, mut pose) = setup();
        keys.press(&bindings.forward);
        movement.integrate(&keys, &bindings, &mut pose, 0.1);
        keys.release(&bindings.forward);
        movement.integrate(&keys, &bindings, &mut pose, 0.1);
        assert!(movement.velocity().length() > 0.0);
    }

    #[test]
    fn negative_dt_adds_nothing() {
        let (mut movement, mut keys, bindings, mut pose) = setup();
        keys.press(&bindings.forward);
        let step = movement.integrate(&keys, &bindings, &mut pose, -1.0);
        assert_eq!(step, Vec3::ZERO);
        assert_eq!(pose.position, Vec3::ZERO);
    }
}
