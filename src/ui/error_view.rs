// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error view shown instead of the player.

use crate::models::params::{END_TIME_KEY, START_TIME_KEY, VIDEO_URL_KEY};
use crate::shell::PageError;

/// Display the error title, message and retry button.
/// Returns `true` when "Try Again" was clicked.
pub fn show(ui: &mut egui::Ui, error: &PageError) -> bool {
    let mut retry = false;

    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading(egui::RichText::new(error.title()).size(24.0).strong());
        ui.add_space(12.0);
        ui.label(egui::RichText::new(error.message()).color(egui::Color32::from_gray(150)));
        ui.add_space(18.0);
        retry = ui.button("Try Again").clicked();
    });

    if *error == PageError::MissingVideoUrl {
        ui.add_space(32.0);
        usage_help(ui);
    }

    retry
}

fn usage_help(ui: &mut egui::Ui) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("How to use this video player:").strong());
        ui.add_space(6.0);
        ui.label(format!(
            "Required: {} - The URL of the video to play",
            VIDEO_URL_KEY
        ));
        ui.label(format!(
            "Optional: {} - Start time in seconds (default: 0)",
            START_TIME_KEY
        ));
        ui.label(format!(
            "Optional: {} - End time in seconds (default: 60)",
            END_TIME_KEY
        ));
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new(
                "Example: ?video_url=https://example.com/video.mp4&startTime=30&endTime=45",
            )
            .monospace()
            .small(),
        );
    });
}
