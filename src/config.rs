//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! card-config.toml file. It provides a centralized way to configure the NWS
//! product endpoints, output location, and renderer parameters. All defaults
//! are compiled in; the config file is optional and a single `OUTPUT_DIR`
//! environment variable overrides the output directory for container use.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration loaded from card-config.toml
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// NWS product endpoints
    pub endpoints: EndpointConfig,
    /// Output file location
    pub output: OutputConfig,
    /// External renderer parameters
    pub render: RenderConfig,
    /// Card branding and local time settings
    pub card: CardConfig,
}

/// URLs of the NWS San Juan marine products consumed per run.
///
/// The zone products are the plain-text coastal waters forecasts; the
/// combined product carries the SYNOPSIS block; the gridpoint URL is the
/// api.weather.gov JSON forecast used for the rain probability.
#[derive(Debug, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Atlantic offshore waters bulletin
    pub atlantic: String,
    /// Northern PR coastal waters bulletin
    pub north_pr: String,
    /// Eastern PR / Vieques / Culebra bulletin
    pub east_pr: String,
    /// Caribbean waters bulletin
    pub caribbean: String,
    /// Combined PR/USVI forecast containing the SYNOPSIS block
    pub combined: String,
    /// Gridpoint forecast JSON for precipitation probability
    pub gridpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Output directory and file name
#[derive(Debug, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory the card is written to (overridden by OUTPUT_DIR)
    pub dir: PathBuf,
    /// Fixed output file name, overwritten each run
    pub file: String,
}

/// Renderer and post-processing parameters
#[derive(Debug, Deserialize, Serialize)]
pub struct RenderConfig {
    /// Rendered page width in pixels
    pub width: u32,
    /// Rendered page height in pixels
    pub height: u32,
    /// Content height kept before resizing back to a square
    pub crop_height: u32,
    /// JPEG quality (0-100)
    pub quality: u8,
    /// Minimum byte size for a render to count as valid
    pub min_bytes: u64,
}

/// Branding text and the fixed local-time offset
#[derive(Debug, Deserialize, Serialize)]
pub struct CardConfig {
    /// Brand line shown in the card header
    pub brand: String,
    /// Tagline under the brand
    pub tagline: String,
    /// Site URL shown in the footer
    pub site: String,
    /// Local UTC offset in hours. Puerto Rico is always AST = UTC-4,
    /// no daylight saving.
    pub utc_offset_hours: i32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoints: EndpointConfig {
                atlantic: "https://tgftp.nws.noaa.gov/data/forecasts/marine/coastal/am/amz711.txt"
                    .to_string(),
                north_pr: "https://tgftp.nws.noaa.gov/data/forecasts/marine/coastal/am/amz712.txt"
                    .to_string(),
                east_pr: "https://tgftp.nws.noaa.gov/data/forecasts/marine/coastal/am/amz726.txt"
                    .to_string(),
                caribbean:
                    "https://tgftp.nws.noaa.gov/data/forecasts/marine/coastal/am/amz733.txt"
                        .to_string(),
                combined: "https://tgftp.nws.noaa.gov/data/raw/fz/fzca52.tjsj.cwf.sju.txt"
                    .to_string(),
                gridpoint: "https://api.weather.gov/gridpoints/SJU/102,53/forecast".to_string(),
                timeout_secs: 20,
            },
            output: OutputConfig {
                dir: PathBuf::from("output"),
                file: "marine_forecast.jpg".to_string(),
            },
            render: RenderConfig {
                width: 1080,
                height: 1080,
                crop_height: 730,
                quality: 95,
                min_bytes: 5000,
            },
            card: CardConfig {
                brand: "Rabirubia Weather".to_string(),
                tagline: "Marine Forecast — PR & USVI".to_string(),
                site: "www.rabirubiaweather.com".to_string(),
                utc_offset_hours: -4,
            },
        }
    }
}

impl Config {
    /// Load configuration from card-config.toml, then apply the OUTPUT_DIR
    /// environment override. Falls back to default configuration if the file
    /// doesn't exist or is invalid.
    pub fn load() -> Self {
        let mut config = Self::load_from_path("card-config.toml");
        if let Ok(dir) = env::var("OUTPUT_DIR") {
            config.output.dir = PathBuf::from(dir);
        }
        config
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Invalid config file format: {}", e);
                    eprintln!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Full path of the output JPEG for this configuration.
    pub fn output_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.endpoints.atlantic.contains("amz711"));
        assert!(config.endpoints.caribbean.contains("amz733"));
        assert_eq!(config.render.width, 1080);
        assert_eq!(config.render.height, 1080);
        assert_eq!(config.card.utc_offset_hours, -4);
        assert_eq!(config.output_path(), PathBuf::from("output/marine_forecast.jpg"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.endpoints.atlantic, parsed.endpoints.atlantic);
        assert_eq!(config.output.file, parsed.output.file);
        assert_eq!(config.render.min_bytes, parsed.render.min_bytes);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config.output.file, "marine_forecast.jpg");
    }
}
