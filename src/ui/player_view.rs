// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Clipped player view.
//!
//! Draws the video area, the clip progress bar with time labels, and the
//! transport controls. Control activations are returned to the caller.

use crate::player::ClipPlayer;
use crate::util::geometry::fit_centered;

/// Result of player view interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    None,
    SkipBackward,
    TogglePlayPause,
    SkipForward,
}

/// Display the player and its controls.
pub fn show(
    ui: &mut egui::Ui,
    player: &ClipPlayer,
    frame_texture: &Option<egui::TextureHandle>,
) -> PlayerAction {
    let mut action = PlayerAction::None;

    let controls_height = 110.0;
    let available = ui.available_size();
    let video_size = egui::vec2(available.x, (available.y - controls_height).max(120.0));
    let (video_rect, _) = ui.allocate_exact_size(video_size, egui::Sense::hover());

    let painter = ui.painter();
    painter.rect_filled(video_rect, 0.0, egui::Color32::BLACK);

    match frame_texture {
        Some(texture) => {
            let [width, height] = texture.size();
            let ((w, h), (x, y)) =
                fit_centered(width as u32, height as u32, video_rect.width(), video_rect.height());
            let image_rect = egui::Rect::from_min_size(
                video_rect.min + egui::vec2(x, y),
                egui::vec2(w, h),
            );
            painter.image(
                texture.id(),
                image_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        None => {
            painter.text(
                video_rect.center(),
                egui::Align2::CENTER_CENTER,
                player.source().unwrap_or_default(),
                egui::FontId::proportional(16.0),
                egui::Color32::from_gray(170),
            );
        }
    }

    ui.add_space(8.0);

    // Progress bar
    let progress = (player.progress_percent() / 100.0) as f32;
    ui.add(egui::ProgressBar::new(progress).desired_height(4.0));
    ui.horizontal(|ui| {
        ui.label(player.current_time_label());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(player.clip_duration_label());
        });
    });

    // Control buttons
    ui.horizontal(|ui| {
        let button_width = 48.0;
        let total = button_width * 3.0 + ui.spacing().item_spacing.x * 2.0;
        ui.add_space(((ui.available_width() - total) / 2.0).max(0.0));

        if ui
            .add_sized([button_width, 32.0], egui::Button::new("⏮"))
            .on_hover_text("Skip backward (Left)")
            .clicked()
        {
            action = PlayerAction::SkipBackward;
        }

        let play_label = if player.state().is_playing { "⏸" } else { "▶" };
        if ui
            .add_sized([button_width, 32.0], egui::Button::new(play_label))
            .on_hover_text("Play/Pause (Space)")
            .clicked()
        {
            action = PlayerAction::TogglePlayPause;
        }

        if ui
            .add_sized([button_width, 32.0], egui::Button::new("⏭"))
            .on_hover_text("Skip forward (Right)")
            .clicked()
        {
            action = PlayerAction::SkipForward;
        }
    });

    // Video info
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(player.range_label()).weak());
        if let Some(length) = player.media_duration_label() {
            ui.separator();
            ui.label(egui::RichText::new(length).weak());
        }
    });

    if let Some(error) = player.last_error() {
        ui.colored_label(egui::Color32::from_rgb(220, 80, 80), error);
    }

    action
}
