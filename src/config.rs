use crate::error::Result;
use crate::service::{MazeParams, Pony};
use log::{info, warn};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub maze: MazeConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct MazeConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_player_name")]
    pub player_name: String,
    #[serde(default)]
    pub difficulty: u8,
    /// Saved state response the local service is seeded from
    #[serde(default = "default_state_file")]
    pub state_file: String,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
}

#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cheat_flag_path")]
    pub cheat_flag_path: String,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_enable_action_log")]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_width() -> usize { 15 }
fn default_height() -> usize { 15 }
fn default_player_name() -> String { Pony::TwilightSparkle.as_str().to_string() }
fn default_state_file() -> String { "maze_state.json".to_string() }
fn default_window_title() -> String { "Pony Maze".to_string() }
fn default_cell_size() -> f32 { 40.0 }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_cheat_flag_path() -> String { ".enable-cheating".to_string() }
fn default_level() -> String { "info".to_string() }
fn default_enable_action_log() -> bool { true }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            player_name: default_player_name(),
            difficulty: 0,
            state_file: default_state_file(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            cell_size: default_cell_size(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cheat_flag_path: default_cheat_flag_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            enable_action_log: default_enable_action_log(),
            action_log_path: default_action_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            maze: MazeConfig::default(),
            visual: VisualConfig::default(),
            session: SessionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MazeConfig {
    /// Creation request for the configured maze, validated
    pub fn params(&self) -> Result<MazeParams> {
        let params = MazeParams {
            width: self.width,
            height: self.height,
            player_name: self.player_name.clone(),
            difficulty: self.difficulty,
        };
        params.validate()?;
        Ok(params)
    }
}

const CONFIG_PATH: &str = "config.toml";

/// Where the configuration came from; reported once logging is running
#[derive(Debug)]
pub enum ConfigSource {
    File,
    Defaults,
    Invalid(toml::de::Error),
}

impl ConfigSource {
    pub fn report(&self) {
        match self {
            ConfigSource::File => info!("Loaded configuration from {}", CONFIG_PATH),
            ConfigSource::Defaults => {
                info!("No {} found, using default configuration", CONFIG_PATH)
            }
            ConfigSource::Invalid(e) => {
                warn!("Failed to parse {}: {}", CONFIG_PATH, e);
                warn!("Using default configuration");
            }
        }
    }
}

impl Config {
    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Read config.toml, falling back to defaults if it is missing or broken.
    /// Nothing is logged here; call `ConfigSource::report` for that.
    pub fn read() -> (Self, ConfigSource) {
        Self::from_file_contents(fs::read_to_string(CONFIG_PATH).ok().as_deref())
    }

    fn from_file_contents(contents: Option<&str>) -> (Self, ConfigSource) {
        match contents.map(Self::parse) {
            Some(Ok(config)) => (config, ConfigSource::File),
            Some(Err(e)) => (Config::default(), ConfigSource::Invalid(e)),
            None => (Config::default(), ConfigSource::Defaults),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MazeError;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!((config.maze.width, config.maze.height), (15, 15));
        assert_eq!(config.maze.player_name, "Twilight Sparkle");
        assert_eq!(config.visual.cell_size, 40.0);
        assert!(config.logging.enable_action_log);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::parse(
            r#"
            [maze]
            width = 20
            player_name = "Rarity"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.maze.width, 20);
        assert_eq!(config.maze.height, 15);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.action_log_path, "action_log.json");

        let params = config.maze.params().unwrap();
        assert_eq!(params.player_name, "Rarity");
    }

    #[test]
    fn out_of_range_dimensions_fail_validation() {
        let config = Config::parse("[maze]\nwidth = 30\n").unwrap();
        assert!(matches!(
            config.maze.params(),
            Err(MazeError::InvalidDimensions { width: 30, .. })
        ));
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let (config, source) = Config::from_file_contents(None);
        assert!(matches!(source, ConfigSource::Defaults));
        assert_eq!(config.maze.state_file, "maze_state.json");

        let (config, source) = Config::from_file_contents(Some("[maze\nwidth = "));
        assert!(matches!(source, ConfigSource::Invalid(_)));
        assert_eq!(config.maze.width, 15);

        let (config, source) = Config::from_file_contents(Some("[maze]\nheight = 20\n"));
        assert!(matches!(source, ConfigSource::File));
        assert_eq!(config.maze.height, 20);
    }
}
