use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

/// Application configuration module
/// This module handles the engine configuration including loading,
/// validating and saving configuration settings.
/// Represents the engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Page zone classification settings
    #[serde(default)]
    pub zones: ZoneConfig,

    /// Content filtering settings
    #[serde(default)]
    pub filtering: FilteringConfig,

    /// Playback and RSVP settings
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Speech synthesis settings
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Page zone classification settings for positional documents
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ZoneConfig {
    /// Fraction of page height treated as the header zone
    #[serde(default = "default_header_zone_fraction")]
    pub header_zone_fraction: f64,

    /// Fraction of page height treated as the footer zone
    #[serde(default = "default_footer_zone_fraction")]
    pub footer_zone_fraction: f64,

    /// Minimum distinct pages a normalized string must appear on
    /// to be flagged as repeated boilerplate
    #[serde(default = "default_min_repeat_occurrences")]
    pub min_repeat_occurrences: usize,

    /// Body blocks with a smaller average font size are treated as
    /// footnote/caption print and dropped. 0.0 disables the check.
    #[serde(default = "default_min_body_font_size")]
    pub min_body_font_size: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            header_zone_fraction: default_header_zone_fraction(),
            footer_zone_fraction: default_footer_zone_fraction(),
            min_repeat_occurrences: default_min_repeat_occurrences(),
            min_body_font_size: default_min_body_font_size(),
        }
    }
}

/// Content filtering settings for plain-text documents
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FilteringConfig {
    /// Whether to skip probable frontmatter before the first chapter marker
    #[serde(default = "default_true")]
    pub skip_frontmatter: bool,

    /// Whether to strip page-number lines
    #[serde(default = "default_true")]
    pub skip_page_numbers: bool,

    /// Whether to strip footnote markers and footnote lines
    #[serde(default = "default_true")]
    pub skip_footnotes: bool,

    /// Whether to strip lines repeated across the document
    #[serde(default = "default_true")]
    pub skip_repeated_lines: bool,

    /// Fraction of leading characters skipped as frontmatter when no
    /// chapter marker is found
    #[serde(default = "default_frontmatter_skip_fraction")]
    pub frontmatter_skip_fraction: f64,

    /// A normalized line appearing more than this many times is removed
    #[serde(default = "default_repeat_threshold")]
    pub repeat_threshold: usize,
}

impl Default for FilteringConfig {
    fn default() -> Self {
        Self {
            skip_frontmatter: true,
            skip_page_numbers: true,
            skip_footnotes: true,
            skip_repeated_lines: true,
            frontmatter_skip_fraction: default_frontmatter_skip_fraction(),
            repeat_threshold: default_repeat_threshold(),
        }
    }
}

/// Playback synchronization and RSVP pacing settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaybackConfig {
    /// Speed multiplier a new session starts at
    #[serde(default = "default_start_speed")]
    pub start_speed: f64,

    /// Speed added per adaptive increment interval
    #[serde(default = "default_speed_increment")]
    pub speed_increment: f64,

    /// Minutes of session time between adaptive speed increments
    #[serde(default = "default_increment_interval_minutes")]
    pub increment_interval_minutes: f64,

    /// Ceiling for adaptive speed ramping
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,

    /// Target speaking rate used for sentence duration estimation
    #[serde(default = "default_target_wpm")]
    pub target_wpm: f64,

    /// Words per minute for the RSVP word display loop
    #[serde(default = "default_rsvp_wpm")]
    pub rsvp_wpm: f64,

    /// Hard ceiling on any words-per-minute setting
    #[serde(default = "default_wpm_max")]
    pub wpm_max: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            start_speed: default_start_speed(),
            speed_increment: default_speed_increment(),
            increment_interval_minutes: default_increment_interval_minutes(),
            max_speed: default_max_speed(),
            target_wpm: default_target_wpm(),
            rsvp_wpm: default_rsvp_wpm(),
            wpm_max: default_wpm_max(),
        }
    }
}

/// Speech synthesis provider settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SynthesisConfig {
    /// Voice name (e.g., "en-US-Neural2-D")
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Language code (e.g., "en-US"). Derived from the voice name when empty.
    #[serde(default = "String::new")]
    pub language: String,

    /// Speaking rate multiplier passed to the synthesis API
    #[serde(default = "default_speaking_rate")]
    pub speaking_rate: f64,

    /// API key
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service URL
    #[serde(default = "default_synthesis_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            voice: default_voice(),
            language: String::new(),
            speaking_rate: default_speaking_rate(),
            api_key: String::new(),
            endpoint: default_synthesis_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_header_zone_fraction() -> f64 {
    0.10
}

fn default_footer_zone_fraction() -> f64 {
    0.10
}

fn default_min_repeat_occurrences() -> usize {
    3
}

fn default_min_body_font_size() -> f64 {
    9.0
}

fn default_frontmatter_skip_fraction() -> f64 {
    0.05
}

fn default_repeat_threshold() -> usize {
    3
}

fn default_start_speed() -> f64 {
    1.0
}

fn default_speed_increment() -> f64 {
    0.1
}

fn default_increment_interval_minutes() -> f64 {
    5.0
}

fn default_max_speed() -> f64 {
    2.0
}

fn default_target_wpm() -> f64 {
    150.0
}

fn default_rsvp_wpm() -> f64 {
    300.0
}

fn default_wpm_max() -> f64 {
    1000.0
}

fn default_voice() -> String {
    "en-US-Neural2-D".to_string()
}

fn default_speaking_rate() -> f64 {
    1.0
}

fn default_synthesis_endpoint() -> String {
    "https://texttospeech.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a JSON file, or fall back to defaults when
    /// the file does not exist
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration to a JSON file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=0.5).contains(&self.zones.header_zone_fraction) {
            return Err(anyhow!(
                "header_zone_fraction must be within [0.0, 0.5], got {}",
                self.zones.header_zone_fraction
            ));
        }
        if !(0.0..=0.5).contains(&self.zones.footer_zone_fraction) {
            return Err(anyhow!(
                "footer_zone_fraction must be within [0.0, 0.5], got {}",
                self.zones.footer_zone_fraction
            ));
        }
        if !(0.0..1.0).contains(&self.filtering.frontmatter_skip_fraction) {
            return Err(anyhow!(
                "frontmatter_skip_fraction must be within [0.0, 1.0), got {}",
                self.filtering.frontmatter_skip_fraction
            ));
        }
        if self.playback.target_wpm <= 0.0 || self.playback.target_wpm > self.playback.wpm_max {
            return Err(anyhow!(
                "target_wpm must be within (0, {}], got {}",
                self.playback.wpm_max,
                self.playback.target_wpm
            ));
        }
        if self.playback.rsvp_wpm <= 0.0 || self.playback.rsvp_wpm > self.playback.wpm_max {
            return Err(anyhow!(
                "rsvp_wpm must be within (0, {}], got {}",
                self.playback.wpm_max,
                self.playback.rsvp_wpm
            ));
        }
        if !(crate::playback::MIN_SPEED..=crate::playback::MAX_SPEED)
            .contains(&self.playback.start_speed)
        {
            return Err(anyhow!(
                "start_speed must be within [{}, {}], got {}",
                crate::playback::MIN_SPEED,
                crate::playback::MAX_SPEED,
                self.playback.start_speed
            ));
        }
        if self.playback.increment_interval_minutes <= 0.0 {
            return Err(anyhow!("increment_interval_minutes must be positive"));
        }
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            zones: ZoneConfig::default(),
            filtering: FilteringConfig::default(),
            playback: PlaybackConfig::default(),
            synthesis: SynthesisConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
