use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::carousel::CardContent;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("failed to parse deck json: {0}")]
    DeckJson(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for the pixel trail. Defaults match the shipped look.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrailConfig {
    /// Base edge length of a trail square, also the spawn distance gate.
    #[serde(default = "TrailConfig::default_pixel_size")]
    pub pixel_size: f32,
    #[serde(default = "TrailConfig::default_spawn_distance")]
    pub spawn_distance: f32,
    #[serde(default = "TrailConfig::default_trail_capacity")]
    pub trail_capacity: usize,
    #[serde(default = "TrailConfig::default_fade_per_frame")]
    pub fade_per_frame: f32,
    #[serde(default = "TrailConfig::default_burst_count")]
    pub burst_count: usize,
    #[serde(default = "TrailConfig::default_burst_radius")]
    pub burst_radius: f32,
    /// Burst pixels start pre-aged so they shrink and fade faster.
    #[serde(default = "TrailConfig::default_burst_start_age")]
    pub burst_start_age: u32,
    #[serde(default = "TrailConfig::default_ripple_capacity")]
    pub ripple_capacity: usize,
    #[serde(default = "TrailConfig::default_ripple_fade_per_frame")]
    pub ripple_fade_per_frame: f32,
    #[serde(default = "TrailConfig::default_ripple_growth_per_frame")]
    pub ripple_growth_per_frame: f32,
    #[serde(default = "TrailConfig::default_ripple_base_diameter")]
    pub ripple_base_diameter: f32,
    /// Delay between suppression and clearing the pools, so the host's
    /// opacity fade finishes before artifacts disappear.
    #[serde(default = "TrailConfig::default_fade_out_ms")]
    pub fade_out_ms: f32,
}

impl TrailConfig {
    fn default_pixel_size() -> f32 {
        12.0
    }
    fn default_spawn_distance() -> f32 {
        12.0
    }
    fn default_trail_capacity() -> usize {
        40
    }
    fn default_fade_per_frame() -> f32 {
        0.04
    }
    fn default_burst_count() -> usize {
        14
    }
    fn default_burst_radius() -> f32 {
        34.0
    }
    fn default_burst_start_age() -> u32 {
        18
    }
    fn default_ripple_capacity() -> usize {
        5
    }
    fn default_ripple_fade_per_frame() -> f32 {
        0.055
    }
    fn default_ripple_growth_per_frame() -> f32 {
        0.055
    }
    fn default_ripple_base_diameter() -> f32 {
        64.0
    }
    fn default_fade_out_ms() -> f32 {
        240.0
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fade_per_frame <= 0.0 || self.ripple_fade_per_frame <= 0.0 {
            return Err(ConfigError::Invalid(
                "trail fade rates must be positive".into(),
            ));
        }
        if self.trail_capacity == 0 || self.ripple_capacity == 0 {
            return Err(ConfigError::Invalid(
                "trail capacities must be non-zero".into(),
            ));
        }
        if self.spawn_distance <= 0.0 {
            return Err(ConfigError::Invalid(
                "trail spawn distance must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            pixel_size: Self::default_pixel_size(),
            spawn_distance: Self::default_spawn_distance(),
            trail_capacity: Self::default_trail_capacity(),
            fade_per_frame: Self::default_fade_per_frame(),
            burst_count: Self::default_burst_count(),
            burst_radius: Self::default_burst_radius(),
            burst_start_age: Self::default_burst_start_age(),
            ripple_capacity: Self::default_ripple_capacity(),
            ripple_fade_per_frame: Self::default_ripple_fade_per_frame(),
            ripple_growth_per_frame: Self::default_ripple_growth_per_frame(),
            ripple_base_diameter: Self::default_ripple_base_diameter(),
            fade_out_ms: Self::default_fade_out_ms(),
        }
    }
}

/// Tunables for the testimonial carousel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarouselConfig {
    #[serde(default = "CarouselConfig::default_autoplay_interval_ms")]
    pub autoplay_interval_ms: f32,
    #[serde(default = "CarouselConfig::default_pointer_threshold")]
    pub pointer_threshold: f32,
    #[serde(default = "CarouselConfig::default_touch_threshold")]
    pub touch_threshold: f32,
    /// Viewport width at which the card edge switches sizes.
    #[serde(default = "CarouselConfig::default_breakpoint_width")]
    pub breakpoint_width: f32,
    #[serde(default = "CarouselConfig::default_card_size_large")]
    pub card_size_large: f32,
    #[serde(default = "CarouselConfig::default_card_size_small")]
    pub card_size_small: f32,
    /// Vertical lift applied to the focused card.
    #[serde(default = "CarouselConfig::default_focus_raise")]
    pub focus_raise: f32,
    #[serde(default = "CarouselConfig::default_jitter_y")]
    pub jitter_y: f32,
    #[serde(default = "CarouselConfig::default_jitter_deg")]
    pub jitter_deg: f32,
}

impl CarouselConfig {
    fn default_autoplay_interval_ms() -> f32 {
        4200.0
    }
    fn default_pointer_threshold() -> f32 {
        60.0
    }
    fn default_touch_threshold() -> f32 {
        50.0
    }
    fn default_breakpoint_width() -> f32 {
        640.0
    }
    fn default_card_size_large() -> f32 {
        365.0
    }
    fn default_card_size_small() -> f32 {
        290.0
    }
    fn default_focus_raise() -> f32 {
        65.0
    }
    fn default_jitter_y() -> f32 {
        15.0
    }
    fn default_jitter_deg() -> f32 {
        2.5
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.autoplay_interval_ms <= 0.0 {
            return Err(ConfigError::Invalid(
                "carousel autoplay interval must be positive".into(),
            ));
        }
        if self.pointer_threshold <= 0.0 || self.touch_threshold <= 0.0 {
            return Err(ConfigError::Invalid(
                "carousel drag thresholds must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: Self::default_autoplay_interval_ms(),
            pointer_threshold: Self::default_pointer_threshold(),
            touch_threshold: Self::default_touch_threshold(),
            breakpoint_width: Self::default_breakpoint_width(),
            card_size_large: Self::default_card_size_large(),
            card_size_small: Self::default_card_size_small(),
            focus_raise: Self::default_focus_raise(),
            jitter_y: Self::default_jitter_y(),
            jitter_deg: Self::default_jitter_deg(),
        }
    }
}

/// Tunables for the soft cursor dot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CursorConfig {
    #[serde(default = "CursorConfig::default_stiffness")]
    pub stiffness: f32,
    #[serde(default = "CursorConfig::default_damping")]
    pub damping: f32,
    #[serde(default = "CursorConfig::default_mass")]
    pub mass: f32,
    /// Opacity/scale ease duration when hiding or showing.
    #[serde(default = "CursorConfig::default_ease_ms")]
    pub ease_ms: f32,
    #[serde(default = "CursorConfig::default_hidden_scale")]
    pub hidden_scale: f32,
    #[serde(default = "CursorConfig::default_dot_diameter")]
    pub dot_diameter: f32,
    #[serde(default = "CursorConfig::default_base_alpha")]
    pub base_alpha: f32,
}

impl CursorConfig {
    fn default_stiffness() -> f32 {
        900.0
    }
    fn default_damping() -> f32 {
        55.0
    }
    fn default_mass() -> f32 {
        0.2
    }
    fn default_ease_ms() -> f32 {
        220.0
    }
    fn default_hidden_scale() -> f32 {
        0.8
    }
    fn default_dot_diameter() -> f32 {
        8.0
    }
    fn default_base_alpha() -> f32 {
        0.9
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.stiffness <= 0.0 || self.damping <= 0.0 || self.mass <= 0.0 {
            return Err(ConfigError::Invalid(
                "cursor spring parameters must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            stiffness: Self::default_stiffness(),
            damping: Self::default_damping(),
            mass: Self::default_mass(),
            ease_ms: Self::default_ease_ms(),
            hidden_scale: Self::default_hidden_scale(),
            dot_diameter: Self::default_dot_diameter(),
            base_alpha: Self::default_base_alpha(),
        }
    }
}

/// Which end of the text a sequential scramble reveals from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RevealDirection {
    #[default]
    Start,
    End,
    Center,
}

/// Tunables for the hover-to-reveal text scramble.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrambleConfig {
    #[serde(default = "ScrambleConfig::default_step_ms")]
    pub step_ms: f32,
    /// Hovered re-scrambles before the full reveal, non-sequential mode.
    #[serde(default = "ScrambleConfig::default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default)]
    pub sequential: bool,
    #[serde(default)]
    pub reveal_direction: RevealDirection,
    /// Scramble with the text's own characters instead of `charset`.
    #[serde(default)]
    pub use_original_chars: bool,
    #[serde(default = "ScrambleConfig::default_charset")]
    pub charset: String,
}

impl ScrambleConfig {
    fn default_step_ms() -> f32 {
        50.0
    }
    fn default_max_iterations() -> u32 {
        10
    }
    fn default_charset() -> String {
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!@#$%^&*()_+".into()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.step_ms <= 0.0 {
            return Err(ConfigError::Invalid(
                "scramble step interval must be positive".into(),
            ));
        }
        if !self.use_original_chars && self.charset.is_empty() {
            return Err(ConfigError::Invalid("scramble charset is empty".into()));
        }
        Ok(())
    }
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            step_ms: Self::default_step_ms(),
            max_iterations: Self::default_max_iterations(),
            sequential: false,
            reveal_direction: RevealDirection::Start,
            use_original_chars: false,
            charset: Self::default_charset(),
        }
    }
}

/// Top-level engine configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub trail: TrailConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub cursor: CursorConfig,
    #[serde(default)]
    pub scramble: ScrambleConfig,
}

impl EngineConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        info!(path = %path.display(), "engine config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.trail.validate()?;
        self.carousel.validate()?;
        self.cursor.validate()?;
        self.scramble.validate()?;
        Ok(())
    }
}

/// The testimonial deck: fixed content, cyclic order owned by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardDeck {
    pub cards: Vec<CardContent>,
}

impl CardDeck {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let deck: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(deck)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for CardDeck {
    /// The seven project cards shipped with the demo.
    fn default() -> Self {
        let entries: [(&str, &str, &str); 7] = [
            (
                "Built a small tool to scan open ports and identify basic network exposure in lab environments.",
                "Nmap · Linux · Network Scanning",
                "cards/network.jpeg",
            ),
            (
                "Tested web applications for common security issues like SQL injection and XSS.",
                "Burp Suite · OWASP Top 10",
                "cards/websec.jpeg",
            ),
            (
                "Automated basic reconnaissance tasks to speed up repeated security checks.",
                "Python · Bash · Automation",
                "cards/automation.jpeg",
            ),
            (
                "Analyzed network traffic to understand request flows and identify unusual behavior.",
                "Wireshark · TCP/IP · Traffic Analysis",
                "cards/traffic.jpeg",
            ),
            (
                "Collected publicly available information to map digital footprints for learning purposes.",
                "OSINT · Reconnaissance · Research",
                "cards/osint.jpeg",
            ),
            (
                "Performed vulnerability scans and documented findings in a clear, structured format.",
                "Vulnerability Assessment · Reporting",
                "cards/assessment.jpeg",
            ),
            (
                "Worked on securing Linux systems by applying basic hardening and configuration checks.",
                "Linux Security · System Hardening",
                "cards/hardening.jpeg",
            ),
        ];
        Self {
            cards: entries
                .iter()
                .map(|&(text, attribution, image_ref)| CardContent {
                    text: text.into(),
                    attribution: attribution.into(),
                    image_ref: image_ref.into(),
                    link_url: "https://github.com/yourusername/your-project".into(),
                })
                .collect(),
        }
    }
}
