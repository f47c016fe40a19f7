//! Effect configuration (parsed from TOML)

use clickfx_core::{Color, FxError, Result};
use std::path::Path;

/// Palette of the press/long-press particle effect
pub const CLICK_COLORS: [&str; 5] = ["#F73859", "#14FFEC", "#00E0FF", "#FF99FE", "#FAF15D"];

/// Palette of the colour-ball burst
pub const COLOR_BALL_COLORS: [&str; 4] = ["#eb125f", "#6eff8a", "#6386ff", "#f9f383"];

/// Default configuration file, as written by `clickfx init`
pub const DEFAULT_CONFIG_TOML: &str = r##"# clickfx effect configuration. Every key is optional.

# seed = 42

[click]
enabled = true
colors = ["#F73859", "#14FFEC", "#00E0FF", "#FF99FE", "#FAF15D"]
spawn_min = 15
spawn_max = 25
release_min = 20
release_max = 40
long_press_ms = 500
radius_min = 2.0
radius_max = 4.0
speed_min = 1.0
speed_max = 2.0
radius_decay = 0.025
damping = 0.99
drift = 2.0
multiplier_ramp = 0.2
multiplier_decay = 0.4
release_speed_scale = 0.02
max_particles = 2000

[color_balls]
enabled = false
colors = ["#eb125f", "#6eff8a", "#6386ff", "#f9f383"]
size = 10.0
max_count = 30
spread = 160.0
duration_ms = 1000
loop_delay_ms = 300
play_count = 1
"##;

/// Press / long-press particle effect settings
#[derive(Debug, Clone)]
pub struct ClickConfig {
    pub enabled: bool,
    pub colors: Vec<Color>,
    /// Particles per pointer-down, inclusive range
    pub spawn_min: u32,
    pub spawn_max: u32,
    /// Particles per long-press release before adding ⌈multiplier⌉
    pub release_min: u32,
    pub release_max: u32,
    pub long_press_ms: f64,
    pub radius_min: f32,
    pub radius_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub radius_decay: f32,
    pub damping: f32,
    pub drift: f32,
    pub multiplier_ramp: f32,
    pub multiplier_decay: f32,
    /// Release-burst speed gain per unit of multiplier
    pub release_speed_scale: f32,
    pub max_particles: usize,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colors: default_palette(&CLICK_COLORS),
            spawn_min: 15,
            spawn_max: 25,
            release_min: 20,
            release_max: 40,
            long_press_ms: 500.0,
            radius_min: 2.0,
            radius_max: 4.0,
            speed_min: 1.0,
            speed_max: 2.0,
            radius_decay: 0.025,
            damping: 0.99,
            drift: 2.0,
            multiplier_ramp: 0.2,
            multiplier_decay: 0.4,
            release_speed_scale: 0.02,
            max_particles: 2000,
        }
    }
}

impl ClickConfig {
    /// Parse from a `[click]` table; missing keys keep their defaults
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = table.get("enabled") {
            config.enabled = v.as_bool().unwrap_or(true);
        }
        if let Some(v) = table.get("colors") {
            config.colors = toml_palette(v, "click.colors")?;
        }
        if let Some(v) = table.get("spawn_min") {
            config.spawn_min = toml_u32(v, config.spawn_min);
        }
        if let Some(v) = table.get("spawn_max") {
            config.spawn_max = toml_u32(v, config.spawn_max);
        }
        if let Some(v) = table.get("release_min") {
            config.release_min = toml_u32(v, config.release_min);
        }
        if let Some(v) = table.get("release_max") {
            config.release_max = toml_u32(v, config.release_max);
        }
        if let Some(v) = table.get("long_press_ms") {
            config.long_press_ms = toml_f32(v, config.long_press_ms as f32) as f64;
        }
        if let Some(v) = table.get("radius_min") {
            config.radius_min = toml_f32(v, config.radius_min);
        }
        if let Some(v) = table.get("radius_max") {
            config.radius_max = toml_f32(v, config.radius_max);
        }
        if let Some(v) = table.get("speed_min") {
            config.speed_min = toml_f32(v, config.speed_min);
        }
        if let Some(v) = table.get("speed_max") {
            config.speed_max = toml_f32(v, config.speed_max);
        }
        if let Some(v) = table.get("radius_decay") {
            config.radius_decay = toml_f32(v, config.radius_decay);
        }
        if let Some(v) = table.get("damping") {
            config.damping = toml_f32(v, config.damping);
        }
        if let Some(v) = table.get("drift") {
            config.drift = toml_f32(v, config.drift);
        }
        if let Some(v) = table.get("multiplier_ramp") {
            config.multiplier_ramp = toml_f32(v, config.multiplier_ramp);
        }
        if let Some(v) = table.get("multiplier_decay") {
            config.multiplier_decay = toml_f32(v, config.multiplier_decay);
        }
        if let Some(v) = table.get("release_speed_scale") {
            config.release_speed_scale = toml_f32(v, config.release_speed_scale);
        }
        if let Some(v) = table.get("max_particles") {
            let n = toml_u32(v, config.max_particles as u32) as usize;
            config.max_particles = n.min(100_000);
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.colors.is_empty() {
            return Err(FxError::ConfigError("click.colors must not be empty".into()));
        }
        check_order("click.spawn", self.spawn_min as f64, self.spawn_max as f64)?;
        check_order("click.release", self.release_min as f64, self.release_max as f64)?;
        check_order("click.radius", self.radius_min as f64, self.radius_max as f64)?;
        check_order("click.speed", self.speed_min as f64, self.speed_max as f64)?;
        check_range("click.long_press_ms", self.long_press_ms, 0.0, 60_000.0)?;
        check_range("click.radius_min", self.radius_min as f64, 0.01, 1000.0)?;
        check_range("click.radius_decay", self.radius_decay as f64, 0.0001, 1000.0)?;
        // Damping must shrink velocity every frame
        check_below("click.damping", self.damping as f64, 0.0, 1.0)?;
        check_range("click.multiplier_ramp", self.multiplier_ramp as f64, 0.0, 1000.0)?;
        check_range("click.multiplier_decay", self.multiplier_decay as f64, 0.0, 1000.0)?;
        check_range("click.release_speed_scale", self.release_speed_scale as f64, 0.0, 10.0)?;
        if self.max_particles == 0 {
            return Err(FxError::ConfigError("click.max_particles must be at least 1".into()));
        }
        Ok(())
    }
}

/// Colour-ball burst settings
#[derive(Debug, Clone)]
pub struct ColorBallConfig {
    pub enabled: bool,
    pub colors: Vec<Color>,
    /// Ball diameter in pixels
    pub size: f32,
    /// Balls per loop
    pub max_count: u32,
    /// Maximum travel on each axis in pixels
    pub spread: f32,
    pub duration_ms: f64,
    /// Start offset between consecutive loops
    pub loop_delay_ms: f64,
    /// Loops per click
    pub play_count: u32,
}

impl Default for ColorBallConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            colors: default_palette(&COLOR_BALL_COLORS),
            size: 10.0,
            max_count: 30,
            spread: 160.0,
            duration_ms: 1000.0,
            loop_delay_ms: 300.0,
            play_count: 1,
        }
    }
}

impl ColorBallConfig {
    /// Parse from a `[color_balls]` table; missing keys keep their defaults
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = table.get("enabled") {
            config.enabled = v.as_bool().unwrap_or(false);
        }
        if let Some(v) = table.get("colors") {
            config.colors = toml_palette(v, "color_balls.colors")?;
        }
        if let Some(v) = table.get("size") {
            config.size = toml_f32(v, config.size);
        }
        if let Some(v) = table.get("max_count") {
            config.max_count = toml_u32(v, config.max_count);
        }
        if let Some(v) = table.get("spread") {
            config.spread = toml_f32(v, config.spread);
        }
        if let Some(v) = table.get("duration_ms") {
            config.duration_ms = toml_f32(v, config.duration_ms as f32) as f64;
        }
        if let Some(v) = table.get("loop_delay_ms") {
            config.loop_delay_ms = toml_f32(v, config.loop_delay_ms as f32) as f64;
        }
        if let Some(v) = table.get("play_count") {
            config.play_count = toml_u32(v, config.play_count).max(1);
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.colors.is_empty() {
            return Err(FxError::ConfigError(
                "color_balls.colors must not be empty".into(),
            ));
        }
        check_range("color_balls.size", self.size as f64, 0.1, 1000.0)?;
        check_range("color_balls.max_count", self.max_count as f64, 1.0, 10_000.0)?;
        check_range("color_balls.spread", self.spread as f64, 0.0, 10_000.0)?;
        check_range("color_balls.duration_ms", self.duration_ms, 1.0, 60_000.0)?;
        check_range("color_balls.loop_delay_ms", self.loop_delay_ms, 0.0, 60_000.0)?;
        check_range("color_balls.play_count", self.play_count as f64, 1.0, 100.0)?;
        Ok(())
    }
}

/// Complete configuration for every effect a host installs
#[derive(Debug, Clone, Default)]
pub struct EffectsConfig {
    /// Fixed RNG seed; hosts pick one when absent
    pub seed: Option<u32>,
    pub click: ClickConfig,
    pub color_balls: ColorBallConfig,
}

impl EffectsConfig {
    /// Parse and validate a configuration document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let table: toml::value::Table = toml::from_str(source)?;
        Self::from_table(&table)
    }

    pub fn from_table(table: &toml::value::Table) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = table.get("seed") {
            let seed = v
                .as_integer()
                .ok_or_else(|| FxError::ConfigError("seed must be an integer".into()))?;
            let seed = u32::try_from(seed).map_err(|_| FxError::ValueOutOfRange {
                field: "seed".to_string(),
                min: 0.0,
                max: u32::MAX as f64,
                value: seed as f64,
            })?;
            config.seed = Some(seed);
        }
        if let Some(click) = table.get("click").and_then(|v| v.as_table()) {
            config.click = ClickConfig::from_toml(click)?;
        }
        if let Some(balls) = table.get("color_balls").and_then(|v| v.as_table()) {
            config.color_balls = ColorBallConfig::from_toml(balls)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        self.click.validate()?;
        self.color_balls.validate()?;
        if !self.click.enabled && !self.color_balls.enabled {
            log::warn!("[config] every effect is disabled");
        }
        Ok(())
    }
}

fn default_palette(hex: &[&str]) -> Vec<Color> {
    hex.iter().filter_map(|h| Color::parse_hex(h).ok()).collect()
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(FxError::ValueOutOfRange {
            field: field.to_string(),
            min,
            max,
            value,
        });
    }
    Ok(())
}

/// Like `check_range`, but `max` itself is rejected
fn check_below(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    check_range(field, value, min, max)?;
    if value >= max {
        return Err(FxError::ValueOutOfRange {
            field: field.to_string(),
            min,
            max,
            value,
        });
    }
    Ok(())
}

fn check_order(field: &str, min: f64, max: f64) -> Result<()> {
    if min > max {
        return Err(FxError::ConfigError(format!(
            "{field}_min ({min}) exceeds {field}_max ({max})"
        )));
    }
    Ok(())
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

fn toml_u32(v: &toml::Value, default: u32) -> u32 {
    v.as_integer()
        .or_else(|| v.as_float().map(|f| f as i64))
        .map(|i| i.clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(default)
}

fn toml_palette(v: &toml::Value, field: &str) -> Result<Vec<Color>> {
    let arr = v
        .as_array()
        .ok_or_else(|| FxError::ConfigError(format!("{field} must be an array of hex strings")))?;
    arr.iter()
        .map(|item| {
            let s = item.as_str().ok_or_else(|| {
                FxError::ConfigError(format!("{field} entries must be strings"))
            })?;
            Color::parse_hex(s)
        })
        .collect()
}
