use crate::math_prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProximityState {
    Idle,
    Highlighted,
}

/// Edge reported by [`ProximityToggle::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Idle -> Highlighted
    Highlighted,
    /// Highlighted -> Idle
    Cleared,
}

/// An object the player can walk up to and use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractableTarget {
    pub position: Vec3,
    state: ProximityState,
}

impl InteractableTarget {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            state: ProximityState::Idle,
        }
    }

    pub fn state(&self) -> ProximityState {
        self.state
    }

    pub fn is_highlighted(&self) -> bool {
        self.state == ProximityState::Highlighted
    }
}

/// Highlights a target while the camera is within `threshold` of it.
///
/// Only state changes are reported, so callers apply their side effects once
/// per crossing instead of once per frame.
#[derive(Debug, Clone, Copy)]
pub struct ProximityToggle {
    threshold: f32,
    last_distance: Option<f32>,
}

impl Default for ProximityToggle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl ProximityToggle {
    pub const DEFAULT_THRESHOLD: f32 = 5.0;

    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            last_distance: None,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn last_distance(&self) -> Option<f32> {
        self.last_distance
    }

    /// Re-evaluates the target against the camera. A target that has not
    /// loaded yet is never in range.
    pub fn update(
        &mut self,
        camera: Vec3,
        target: Option<&mut InteractableTarget>,
    ) -> Option<Transition> {
        let target = target?;
        let distance = camera.distance(target.position);
        self.last_distance = Some(distance);

        match (target.state, distance < self.threshold) {
            (ProximityState::Idle, true) => {
                target.state = ProximityState::Highlighted;
                Some(Transition::Highlighted)
            }
            (ProximityState::Highlighted, false) => {
                target.state = ProximityState::Idle;
                Some(Transition::Cleared)
            }
            _ => None,
        }
    }

    /// Returns true when the interact action should fire.
    pub fn interact(&self, target: Option<&InteractableTarget>) -> bool {
        target.map_or(false, InteractableTarget::is_highlighted)
    }
}
