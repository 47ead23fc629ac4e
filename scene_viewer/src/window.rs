//! SDL2 frontend. Relative mouse mode stands in for pointer lock, the scene
//! is drawn as outlines of its draw items.

use anyhow::{anyhow, Context};
use firstperson::math_prelude::*;
use firstperson::FrameClock;
use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Scancode;
use sdl2::pixels::Color;
use sdl2::rect::Point;
use sdl2::render::WindowCanvas;
use tracing::debug;

use crate::config::WindowConfig;
use crate::input::{browser_code, InputEvent};
use crate::scene::{wireframe, Scene};

fn to_color(c: Vec3) -> Color {
    let c = c.max(Vec3::ZERO).min(Vec3::ONE) * 255.0;
    Color::RGB(c.x as u8, c.y as u8, c.z as u8)
}

fn draw(canvas: &mut WindowCanvas, scene: &dyn Scene) -> anyhow::Result<()> {
    canvas.set_draw_color(to_color(scene.background()));
    canvas.clear();

    let camera = scene.camera();
    for item in scene.draw_list() {
        canvas.set_draw_color(to_color(item.color));
        for (a, b) in wireframe(camera, &item.bounds) {
            canvas
                .draw_line(
                    Point::new(a.x as i32, a.y as i32),
                    Point::new(b.x as i32, b.y as i32),
                )
                .map_err(|e| anyhow!(e))?;
        }
    }

    canvas.present();
    Ok(())
}

pub fn run(config: &WindowConfig, mut scene: Box<dyn Scene>) -> anyhow::Result<()> {
    let sdl_context = sdl2::init().map_err(|e| anyhow!(e))?;
    let video_subsystem = sdl_context.video().map_err(|e| anyhow!(e))?;
    let mouse = sdl_context.mouse();

    let window = video_subsystem
        .window(&config.title, config.width, config.height)
        .position_centered()
        .resizable()
        .build()
        .context("failed to create window")?;
    let mut canvas = window
        .into_canvas()
        .present_vsync()
        .build()
        .context("failed to create canvas")?;

    let mut event_pump = sdl_context.event_pump().map_err(|e| anyhow!(e))?;
    let mut clock = FrameClock::new();
    let mut locked = false;

    scene.handle_event(&InputEvent::Resize {
        width: config.width,
        height: config.height,
    });

    'running: loop {
        let delta = clock.tick();

        for event in event_pump.poll_iter() {
            let input = match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => {
                    if !locked {
                        break 'running;
                    }
                    locked = false;
                    mouse.set_relative_mouse_mode(false);
                    InputEvent::PointerLock(false)
                }
                Event::KeyDown {
                    scancode: Some(sc),
                    repeat: false,
                    ..
                } => InputEvent::KeyDown(browser_code(sc.name())),
                Event::KeyUp {
                    scancode: Some(sc),
                    repeat: false,
                    ..
                } => InputEvent::KeyUp(browser_code(sc.name())),
                Event::MouseMotion { xrel, yrel, .. } => InputEvent::MouseMove {
                    dx: xrel as f32,
                    dy: yrel as f32,
                },
                Event::MouseButtonDown { .. } => {
                    if scene.wants_pointer_lock() && !locked {
                        locked = true;
                        mouse.set_relative_mouse_mode(true);
                        scene.handle_event(&InputEvent::PointerLock(true));
                    }
                    InputEvent::MouseButton { pressed: true }
                }
                Event::MouseButtonUp { .. } => InputEvent::MouseButton { pressed: false },
                Event::MouseWheel { y, .. } => InputEvent::Wheel { delta: y as f32 },
                Event::Window {
                    win_event: WindowEvent::Resized(w, h),
                    ..
                } => {
                    debug!("resized to {}x{}", w, h);
                    InputEvent::Resize {
                        width: w.max(1) as u32,
                        height: h.max(1) as u32,
                    }
                }
                _ => continue,
            };
            scene.handle_event(&input);
        }

        scene.update(delta);
        draw(&mut canvas, scene.as_ref())?;

        let title = match scene.status() {
            Some(status) => format!("{} | {} | FPS : {:.02}", config.title, status, clock.fps()),
            None => format!("{} | FPS : {:.02}", config.title, clock.fps()),
        };
        canvas.window_mut().set_title(&title)?;
    }

    Ok(())
}
