// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Clipview - clipped playback video viewer
//!
//! A desktop viewer that plays only the `[startTime, endTime]` range of a
//! media URL given through a location query string.

mod app;
mod config;
mod media;
mod models;
mod player;
mod shell;
mod ui;
mod util;

use anyhow::Result;
use app::ClipViewerApp;
use clap::Parser;
use config::{Cli, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_cli(&cli)?;

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
    )
    .init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_min_inner_size([480.0, 360.0])
            .with_title("Video Player"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "clipview",
        options,
        Box::new(|_cc| Ok(Box::new(ClipViewerApp::new(settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
