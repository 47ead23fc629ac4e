//! Viewer configuration, read from a TOML file.
//!
//! Every field has a default so a config file only needs the values it
//! changes.

use std::path::{Path, PathBuf};

use firstperson::math_prelude::*;
use firstperson::{MoveBindings, ProximityToggle};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Directory asset paths are resolved against
    pub resources: PathBuf,
    pub window: WindowConfig,
    pub orbit: OrbitConfig,
    pub room: RoomConfig,
    pub bindings: MoveBindings,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            resources: PathBuf::from("resources"),
            window: WindowConfig::default(),
            orbit: OrbitConfig::default(),
            room: RoomConfig::default(),
            bindings: MoveBindings::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Scene viewer".to_owned(),
            width: 1280,
            height: 720,
        }
    }
}

/// Model viewer scene with an orbiting camera.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub model: PathBuf,
    pub environment: PathBuf,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub start_distance: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("models/donut.obj"),
            environment: PathBuf::from("textures/skybox.png"),
            damping_factor: 0.05,
            min_distance: 2.0,
            max_distance: 10.0,
            start_distance: 5.0,
        }
    }
}

impl OrbitConfig {
    /// Distance limits must be ordered and the start distance inside them.
    fn validate(&self) -> Result<(), ConfigError> {
        let (min, max, start) = (self.min_distance, self.max_distance, self.start_distance);
        if min.is_nan() || max.is_nan() || start.is_nan() {
            return Err(ConfigError::Invalid("orbit distances must be numbers".to_owned()));
        }
        if min < 0.0 || min > max {
            return Err(ConfigError::Invalid(format!(
                "orbit min_distance {} must be in [0, max_distance {}]",
                min, max
            )));
        }
        if start < min || start > max {
            return Err(ConfigError::Invalid(format!(
                "orbit start_distance {} must be in [{}, {}]",
                start, min, max
            )));
        }
        Ok(())
    }
}

/// First person scene with an interactable object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub model: PathBuf,
    pub target_position: Vec3,
    pub start_position: Vec3,
    pub mouse_sensitivity: f32,
    pub interact_distance: f32,
    pub floor_size: f32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("models/chest.obj"),
            target_position: Vec3::ZERO,
            start_position: Vec3::new(0.0, 1.6, 10.0),
            mouse_sensitivity: 0.002,
            interact_distance: ProximityToggle::DEFAULT_THRESHOLD,
            floor_size: 40.0,
        }
    }
}

impl ViewerConfig {
    /// Loads the config at `path`. No path, or a path that does not exist,
    /// gives the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            warn!("config {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        info!("loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.orbit.validate()?;
        Ok(config)
    }

    pub fn resolve(&self, asset: &Path) -> PathBuf {
        self.resources.join(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = ViewerConfig::from_toml("").unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.room.interact_distance, 5.0);
        assert_eq!(config.orbit.damping_factor, 0.05);
        assert_eq!(config.bindings, MoveBindings::default());
        assert_eq!(config.resources, PathBuf::from("resources"));
    }

    #[test]
    fn partial_override() {
        let config = ViewerConfig::from_toml(
            r#"
            resources = "assets"

            [room]
            target_position = [1.0, 0.0, -4.0]
            interact_distance = 3.0

            [bindings]
            interact = "KeyF"
            "#,
        )
        .unwrap();

        assert_eq!(config.room.target_position, Vec3::new(1.0, 0.0, -4.0));
        assert_eq!(config.room.interact_distance, 3.0);
        assert_eq!(config.room.mouse_sensitivity, 0.002);
        assert_eq!(config.bindings.interact, "KeyF");
        assert_eq!(config.bindings.forward, "KeyW");
        assert_eq!(
            config.resolve(Path::new("models/chest.obj")),
            PathBuf::from("assets/models/chest.obj")
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(ViewerConfig::from_toml("[window]\nwidth = \"wide\"").is_err());
    }

    #[test]
    fn inverted_orbit_limits_are_rejected() {
        let inverted = ViewerConfig::from_toml("[orbit]\nmin_distance = 10.0\nmax_distance = 2.0\n");
        assert!(matches!(inverted, Err(ConfigError::Invalid(_))));

        let nan = ViewerConfig::from_toml("[orbit]\nmax_distance = nan\n");
        assert!(matches!(nan, Err(ConfigError::Invalid(_))));

        let outside = ViewerConfig::from_toml("[orbit]\nstart_distance = 20.0\n");
        assert!(matches!(outside, Err(ConfigError::Invalid(_))));

        let open = ViewerConfig::from_toml("[orbit]\nmax_distance = inf\n").unwrap();
        assert_eq!(open.orbit.max_distance, f32::INFINITY);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = ViewerConfig::load(Some(Path::new("does/not/exist.toml"))).unwrap();
        assert_eq!(config.window.height, 720);
    }
}
