//! Configuration loading and defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub tilt: TiltConfig,

    #[serde(default)]
    pub heart: HeartConfig,

    #[serde(default)]
    pub activation: ActivationConfig,

    #[serde(default)]
    pub confetti: ConfettiConfig,

    #[serde(default)]
    pub stars: StarsConfig,

    #[serde(default)]
    pub text: TextConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_width")]
    pub width: i32,

    #[serde(default = "default_height")]
    pub height: i32,

    #[serde(default)]
    pub fullscreen: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TiltConfig {
    /// Max rotation in degrees
    #[serde(default = "default_tilt_strength")]
    pub strength: f32,

    /// Padding around the heart in pixels (0 = whole window)
    #[serde(default)]
    pub padding: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartConfig {
    #[serde(default = "default_initial_love")]
    pub initial_love: f32,

    /// Love gained per press/release
    #[serde(default = "default_press_step")]
    pub press_step: f32,

    #[serde(default = "default_splash_lifetime_ms")]
    pub splash_lifetime_ms: u64,

    /// Idle heartbeat on/off
    #[serde(default = "default_true")]
    pub heartbeat: bool,

    #[serde(default = "default_heartbeat_interval_ms")]
    pub heartbeat_interval_ms: u64,

    /// Level the heartbeat falls back to once full
    #[serde(default = "default_heartbeat_settle")]
    pub heartbeat_settle: f32,

    #[serde(default = "default_heartbeat_step")]
    pub heartbeat_step: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationConfig {
    #[serde(default = "default_clicks_to_activate")]
    pub clicks_to_activate: u32,

    #[serde(default = "default_confetti_count")]
    pub confetti_count: usize,

    /// Burst again on every click past the threshold
    #[serde(default)]
    pub repeat_burst: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfettiConfig {
    /// HSL hue in degrees
    #[serde(default = "default_confetti_hue")]
    pub hue: f32,

    /// Max travel from the click point on each axis, in pixels
    #[serde(default = "default_confetti_spread")]
    pub spread: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarsConfig {
    #[serde(default = "default_star_count")]
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    #[serde(default = "default_headline")]
    pub headline: String,

    #[serde(default = "default_hint")]
    pub hint: String,

    #[serde(default = "default_message")]
    pub message: Vec<String>,

    /// Shown under the message; passed to the loader untouched
    #[serde(default = "default_image")]
    pub image: Option<PathBuf>,
}

// Default value functions
fn default_title() -> String {
    "Heart Greeting".to_string()
}
fn default_width() -> i32 {
    1280
}
fn default_height() -> i32 {
    720
}
fn default_tilt_strength() -> f32 {
    25.0
}
fn default_initial_love() -> f32 {
    1.0
}
fn default_press_step() -> f32 {
    0.3
}
fn default_splash_lifetime_ms() -> u64 {
    1000
}
fn default_true() -> bool {
    true
}
fn default_heartbeat_interval_ms() -> u64 {
    800
}
fn default_heartbeat_settle() -> f32 {
    0.5
}
fn default_heartbeat_step() -> f32 {
    0.1
}
fn default_clicks_to_activate() -> u32 {
    5
}
fn default_confetti_count() -> usize {
    50
}
fn default_confetti_hue() -> f32 {
    334.0
}
fn default_confetti_spread() -> f32 {
    400.0
}
fn default_star_count() -> usize {
    12
}
fn default_headline() -> String {
    "Para mi hermosa Iren".to_string()
}
fn default_hint() -> String {
    "Descubre el mensaje secreto".to_string()
}
fn default_message() -> Vec<String> {
    vec![
        "Te Amo mi bella princesa".to_string(),
        "eres mi vida,".to_string(),
        "eres mi todo,".to_string(),
        "eres lo que mas amo.".to_string(),
    ]
}
fn default_image() -> Option<PathBuf> {
    Some(PathBuf::from("love.jpg"))
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            fullscreen: false,
        }
    }
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            strength: default_tilt_strength(),
            padding: 0.0,
        }
    }
}

impl Default for HeartConfig {
    fn default() -> Self {
        Self {
            initial_love: default_initial_love(),
            press_step: default_press_step(),
            splash_lifetime_ms: default_splash_lifetime_ms(),
            heartbeat: true,
            heartbeat_interval_ms: default_heartbeat_interval_ms(),
            heartbeat_settle: default_heartbeat_settle(),
            heartbeat_step: default_heartbeat_step(),
        }
    }
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            clicks_to_activate: default_clicks_to_activate(),
            confetti_count: default_confetti_count(),
            repeat_burst: false,
        }
    }
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            hue: default_confetti_hue(),
            spread: default_confetti_spread(),
        }
    }
}

impl Default for StarsConfig {
    fn default() -> Self {
        Self {
            count: default_star_count(),
        }
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            headline: default_headline(),
            hint: default_hint(),
            message: default_message(),
            image: default_image(),
        }
    }
}

impl HeartConfig {
    pub fn splash_lifetime(&self) -> Duration {
        Duration::from_millis(self.splash_lifetime_ms)
    }

    pub fn heartbeat_interval(&self) -> Option<Duration> {
        self.heartbeat
            .then(|| Duration::from_millis(self.heartbeat_interval_ms))
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(PathBuf::from).or_else(Self::default_config_path);

        let config = match config_path {
            Some(ref path) if path.exists() => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Self::from_toml(&contents).with_context(|| format!("parsing {}", path.display()))?
            }
            _ => Config::default(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Get the default config file path
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "heart-greeting")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.window.width > 0 && self.window.height > 0,
            "window size must be positive"
        );
        ensure!(self.tilt.strength > 0.0, "tilt.strength must be positive");
        ensure!(self.tilt.padding >= 0.0, "tilt.padding must not be negative");
        ensure!(
            self.heart.splash_lifetime_ms > 0,
            "heart.splash_lifetime_ms must be positive"
        );
        ensure!(
            !self.heart.heartbeat || self.heart.heartbeat_interval_ms > 0,
            "heart.heartbeat_interval_ms must be positive"
        );
        ensure!(
            self.activation.clicks_to_activate > 0,
            "activation.clicks_to_activate must be positive"
        );
        Ok(())
    }
}
