// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Command line and settings file handling.
//!
//! Settings are read from an optional YAML or JSON file, then individual
//! values are overridden by command line flags.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::player::DEFAULT_SKIP_SECONDS;

/// Clipped playback video viewer.
#[derive(Debug, Parser)]
#[command(name = "clipview", version, about)]
pub struct Cli {
    /// Initial location, e.g. "?video_url=clip.mp4&startTime=30&endTime=45"
    pub location: Option<String>,

    /// Settings file (.yaml, .yml or .json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Media duration in seconds reported by the clock-driven surface
    #[arg(long, value_name = "SECS")]
    pub duration: Option<f64>,

    /// Skip step for the backward/forward controls, in seconds
    #[arg(long, value_name = "SECS")]
    pub skip: Option<f64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse YAML in {path}: {source}")]
    ParseYaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("failed to parse JSON in {path}: {source}")]
    ParseJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unsupported settings file extension: {0}")]
    UnsupportedExtension(String),
    #[error("settings file has no extension: {0}")]
    MissingExtension(PathBuf),
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window_width: f32,
    pub window_height: f32,
    pub skip_seconds: f64,
    /// Duration announced by the clock-driven surface; unbounded when unset.
    pub media_duration: Option<f64>,
    /// Default `env_logger` filter, overridden by `RUST_LOG`.
    pub log_level: String,
    pub initial_location: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: 960.0,
            window_height: 640.0,
            skip_seconds: DEFAULT_SKIP_SECONDS,
            media_duration: None,
            log_level: "info".to_string(),
            initial_location: String::new(),
        }
    }
}

impl Settings {
    /// Resolve settings from the optional file and the command line.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut settings = match cli.config {
            Some(ref path) => load(path)?,
            None => Settings::default(),
        };

        if let Some(ref location) = cli.location {
            settings.initial_location = location.clone();
        }
        if let Some(duration) = cli.duration {
            settings.media_duration = Some(duration);
        }
        if let Some(skip) = cli.skip {
            settings.skip_seconds = skip;
        }
        Ok(settings)
    }
}

/// Load settings from a YAML or JSON file, chosen by extension.
pub fn load(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|source| ConfigError::ParseYaml {
                path: path.to_path_buf(),
                source,
            })
        }
        Some("json") => serde_json::from_str(&content).map_err(|source| ConfigError::ParseJson {
            path: path.to_path_buf(),
            source,
        }),
        Some(ext) => Err(ConfigError::UnsupportedExtension(ext.to_string())),
        None => Err(ConfigError::MissingExtension(path.to_path_buf())),
    }
}
