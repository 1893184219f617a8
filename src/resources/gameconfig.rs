//! Game configuration resource.
//!
//! Holds the gameplay tuning loaded from an INI configuration file. Provides
//! the sample level's values as defaults and methods to load/save
//! configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [locomotion]
//! acceleration = 300
//! drag = 710
//! jump_velocity = -550
//! particle_velocity = 50
//!
//! [progression]
//! hint_delay_ms = 2000
//! restart_delay_ms = 4000
//!
//! [physics]
//! gravity_y = 1500
//!
//! [camera]
//! zoom = 2.0
//! lerp = 0.25
//! deadzone = 50
//! round_pixels = true
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

/// Default values, tuned for the sample level
const DEFAULT_ACCELERATION: f32 = 300.0;
const DEFAULT_DRAG: f32 = 710.0;
const DEFAULT_JUMP_VELOCITY: f32 = -550.0;
const DEFAULT_PARTICLE_VELOCITY: f32 = 50.0;
const DEFAULT_HINT_DELAY_MS: u64 = 2000;
const DEFAULT_RESTART_DELAY_MS: u64 = 4000;
const DEFAULT_GRAVITY_Y: f32 = 1500.0;
const DEFAULT_CAMERA_ZOOM: f32 = 2.0;
const DEFAULT_CAMERA_LERP: f32 = 0.25;
const DEFAULT_CAMERA_DEADZONE: f32 = 50.0;
const DEFAULT_CAMERA_ROUND_PIXELS: bool = true;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Horizontal acceleration while a direction is held, px/s².
    pub acceleration: f32,
    /// Horizontal drag with no direction held, px/s².
    pub drag: f32,
    /// Vertical velocity set on jump; negative is up.
    pub jump_velocity: f32,
    /// Horizontal speed of walking dust particles.
    pub particle_velocity: f32,
    /// How long the "collect more" hint stays up.
    pub hint_delay_ms: u64,
    /// Delay between winning and the automatic restart.
    pub restart_delay_ms: u64,
    /// World gravity handed to the engine at init.
    pub gravity_y: f32,
    pub camera_zoom: f32,
    pub camera_lerp: f32,
    pub camera_deadzone: f32,
    pub camera_round_pixels: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with the default values.
    pub fn new() -> Self {
        Self {
            acceleration: DEFAULT_ACCELERATION,
            drag: DEFAULT_DRAG,
            jump_velocity: DEFAULT_JUMP_VELOCITY,
            particle_velocity: DEFAULT_PARTICLE_VELOCITY,
            hint_delay_ms: DEFAULT_HINT_DELAY_MS,
            restart_delay_ms: DEFAULT_RESTART_DELAY_MS,
            gravity_y: DEFAULT_GRAVITY_Y,
            camera_zoom: DEFAULT_CAMERA_ZOOM,
            camera_lerp: DEFAULT_CAMERA_LERP,
            camera_deadzone: DEFAULT_CAMERA_DEADZONE,
            camera_round_pixels: DEFAULT_CAMERA_ROUND_PIXELS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Hint display time in seconds.
    pub fn hint_delay_secs(&self) -> f32 {
        self.hint_delay_ms as f32 / 1000.0
    }

    /// Win-to-restart delay in seconds.
    pub fn restart_delay_secs(&self) -> f32 {
        self.restart_delay_ms as f32 / 1000.0
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        let float = |section: &str, key: &str| config.getfloat(section, key).ok().flatten();

        // [locomotion] section
        if let Some(v) = float("locomotion", "acceleration") {
            self.acceleration = v as f32;
        }
        if let Some(v) = float("locomotion", "drag") {
            self.drag = v as f32;
        }
        if let Some(v) = float("locomotion", "jump_velocity") {
            self.jump_velocity = v as f32;
        }
        if let Some(v) = float("locomotion", "particle_velocity") {
            self.particle_velocity = v as f32;
        }

        // [progression] section
        if let Some(ms) = config.getuint("progression", "hint_delay_ms").ok().flatten() {
            self.hint_delay_ms = ms;
        }
        if let Some(ms) = config
            .getuint("progression", "restart_delay_ms")
            .ok()
            .flatten()
        {
            self.restart_delay_ms = ms;
        }

        // [physics] section
        if let Some(v) = float("physics", "gravity_y") {
            self.gravity_y = v as f32;
        }

        // [camera] section
        if let Some(v) = float("camera", "zoom") {
            self.camera_zoom = v as f32;
        }
        if let Some(v) = float("camera", "lerp") {
            self.camera_lerp = v as f32;
        }
        if let Some(v) = float("camera", "deadzone") {
            self.camera_deadzone = v as f32;
        }
        if let Some(v) = config.getbool("camera", "round_pixels").ok().flatten() {
            self.camera_round_pixels = v;
        }

        if self.jump_velocity >= 0.0 {
            warn!(
                "jump_velocity = {} points down; jumps will not leave the ground",
                self.jump_velocity
            );
        }
        if self.drag <= 0.0 {
            warn!("drag = {}; the player will never slow down", self.drag);
        }

        info!(
            "Loaded config: accel={}, drag={}, jump={}, hint={}ms, restart={}ms, gravity={}",
            self.acceleration,
            self.drag,
            self.jump_velocity,
            self.hint_delay_ms,
            self.restart_delay_ms,
            self.gravity_y
        );
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [locomotion] section
        config.set("locomotion", "acceleration", Some(self.acceleration.to_string()));
        config.set("locomotion", "drag", Some(self.drag.to_string()));
        config.set("locomotion", "jump_velocity", Some(self.jump_velocity.to_string()));
        config.set(
            "locomotion",
            "particle_velocity",
            Some(self.particle_velocity.to_string()),
        );

        // [progression] section
        config.set("progression", "hint_delay_ms", Some(self.hint_delay_ms.to_string()));
        config.set(
            "progression",
            "restart_delay_ms",
            Some(self.restart_delay_ms.to_string()),
        );

        // [physics] section
        config.set("physics", "gravity_y", Some(self.gravity_y.to_string()));

        // [camera] section
        config.set("camera", "zoom", Some(self.camera_zoom.to_string()));
        config.set("camera", "lerp", Some(self.camera_lerp.to_string()));
        config.set("camera", "deadzone", Some(self.camera_deadzone.to_string()));
        config.set(
            "camera",
            "round_pixels",
            Some(self.camera_round_pixels.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
