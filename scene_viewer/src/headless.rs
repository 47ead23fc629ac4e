//! Windowless frontend. Plays a fixed input script against a scene at 60
//! frames per second and logs whatever the scene reports.

use std::time::{Duration, Instant};

use firstperson::MoveBindings;
use tracing::info;

use crate::input::InputEvent;
use crate::scene::Scene;

const FRAME: Duration = Duration::from_micros(16_667);

/// Input for `frame` of a run lasting `frames` frames: grab the pointer,
/// walk forward for the first half while slowly turning, and tap the
/// interact key every half second.
pub fn script(frame: u32, frames: u32, bindings: &MoveBindings) -> Vec<InputEvent> {
    let mut events = Vec::new();
    if frame == 0 {
        events.push(InputEvent::PointerLock(true));
        events.push(InputEvent::MouseButton { pressed: true });
        events.push(InputEvent::KeyDown(bindings.forward.clone()));
    }
    if frame == frames / 2 {
        events.push(InputEvent::KeyUp(bindings.forward.clone()));
        events.push(InputEvent::MouseButton { pressed: false });
    }
    if frame % 30 == 29 {
        events.push(InputEvent::KeyDown(bindings.interact.clone()));
        events.push(InputEvent::KeyUp(bindings.interact.clone()));
    }
    if frame < frames / 2 {
        events.push(InputEvent::MouseMove { dx: 0.5, dy: 0.0 });
    }
    events
}

pub fn run(mut scene: Box<dyn Scene>, bindings: &MoveBindings, frames: u32) {
    let mut status = None;
    for frame in 0..frames {
        let started = Instant::now();
        for event in script(frame, frames, bindings) {
            scene.handle_event(&event);
        }
        scene.update(FRAME.as_secs_f32());

        let current = scene.status();
        if current != status {
            info!(
                "frame {}: {} (camera at {:.2?})",
                frame,
                current.as_deref().unwrap_or("-"),
                scene.camera().pose.position
            );
            status = current;
        }

        if let Some(rest) = FRAME.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }
    info!(
        "finished after {} frames at {:.2?}",
        frames,
        scene.camera().pose.position
    );
}
