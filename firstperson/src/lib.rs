pub mod player;
pub use player::*;

pub mod math_prelude {
    pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4, Vec4Swizzles};
}
