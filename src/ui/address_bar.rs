// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Address bar with history navigation.

use crate::models::location::LocationHistory;

/// Result of address bar interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressAction {
    None,
    Back,
    Forward,
    Go(String),
}

/// Display back/forward buttons and the editable location.
pub fn show(ui: &mut egui::Ui, history: &LocationHistory, address: &mut String) -> AddressAction {
    let mut action = AddressAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 6.0;

        if ui
            .add_enabled(history.can_go_back(), egui::Button::new("◀"))
            .on_hover_text("Back")
            .clicked()
        {
            action = AddressAction::Back;
        }
        if ui
            .add_enabled(history.can_go_forward(), egui::Button::new("▶"))
            .on_hover_text("Forward")
            .clicked()
        {
            action = AddressAction::Forward;
        }

        let text_width = ui.available_width() - 40.0;
        let response = ui.add(
            egui::TextEdit::singleline(address)
                .hint_text("?video_url=clip.mp4&startTime=30&endTime=45")
                .desired_width(text_width),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        if ui.button("Go").clicked() || submitted {
            action = AddressAction::Go(address.trim().to_string());
        }
    });

    action
}
