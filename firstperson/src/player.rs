mod bounding_box;
mod frametime;
mod keys;
mod movement;
mod pose;
mod proximity;

pub use bounding_box::Aabb;
pub use frametime::FrameClock;
pub use keys::{KeyState, MoveBindings};
pub use movement::Movement;
pub use pose::CameraPose;
pub use proximity::{InteractableTarget, ProximityState, ProximityToggle, Transition};
