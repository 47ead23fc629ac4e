pub mod camera;
pub mod config;
pub mod error;
pub mod headless;
pub mod input;
pub mod loader;
pub mod model;
pub mod mtl;
pub mod obj;
pub mod scene;
pub mod session;
pub mod texture;
#[cfg(feature = "window")]
pub mod window;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::ViewerConfig;
use scene::{Scene, SceneKind};

#[derive(Debug, Parser)]
#[command(version, about = "Walk around a small 3D scene")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = SceneKind::Room)]
    scene: SceneKind,

    /// Overrides the resources directory from the config
    #[arg(short, long)]
    resources: Option<PathBuf>,

    /// Run a scripted walk without opening a window
    #[arg(long)]
    headless: bool,

    /// Frames to run headless
    #[arg(long, default_value_t = 600)]
    frames: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = ViewerConfig::load(args.config.as_deref())?;
    if let Some(resources) = args.resources {
        config.resources = resources;
    }

    info!("starting {:?} scene", args.scene);
    let scene = scene::build(args.scene, &config);
    if args.headless || !cfg!(feature = "window") {
        headless::run(scene, &config.bindings, args.frames);
        return Ok(());
    }
    open_window(&config, scene)
}

#[cfg(feature = "window")]
fn open_window(config: &ViewerConfig, scene: Box<dyn Scene>) -> anyhow::Result<()> {
    window::run(&config.window, scene)
}

#[cfg(not(feature = "window"))]
fn open_window(_config: &ViewerConfig, _scene: Box<dyn Scene>) -> anyhow::Result<()> {
    anyhow::bail!("built without the window feature")
}
