// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module wires the location history, the page shell and the clipped
//! player together: navigation re-derives the parameters, and the shell's
//! verdict decides whether the error view or the player is shown.

use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::media;
use crate::models::location::LocationHistory;
use crate::player::ClipPlayer;
use crate::shell::{PageShell, ParamsChange};
use crate::ui::{address_bar, error_view, player_view};

/// Repaint interval while a mounted player is paused.
const IDLE_REPAINT: Duration = Duration::from_millis(250);

/// Main application state.
pub struct ClipViewerApp {
    settings: Settings,

    /// Visited locations
    location: LocationHistory,

    /// Address bar edit buffer
    address: String,

    /// Parameters derived from the current location
    shell: PageShell,

    /// Player for the current clip, when the shell allows one
    player: Option<ClipPlayer>,

    /// Texture holding the latest decoded frame
    frame_texture: Option<egui::TextureHandle>,

    /// Wall time of the previous surface tick
    last_tick: Instant,
}

impl ClipViewerApp {
    /// Create the application at the configured initial location.
    pub fn new(settings: Settings) -> Self {
        let location = LocationHistory::new(settings.initial_location.clone());
        let shell = PageShell::new(location.query());
        let mut app = Self {
            address: location.current().to_string(),
            settings,
            location,
            shell,
            player: None,
            frame_texture: None,
            last_tick: Instant::now(),
        };
        app.rebuild_player();
        app
    }

    /// Replace the player with one for the shell's current clip, if any.
    fn rebuild_player(&mut self) {
        self.player = None;
        self.frame_texture = None;

        match self.shell.view() {
            Ok(clip) => {
                let mut player =
                    ClipPlayer::new(clip.window).with_skip_seconds(self.settings.skip_seconds);
                player.mount(media::open(&clip.video_url, self.settings.media_duration));
                self.player = Some(player);
            }
            Err(e) => log::warn!("Not playing: {}", e),
        }
    }

    fn apply_change(&mut self, change: ParamsChange) {
        match change {
            ParamsChange::Unchanged => {}
            ParamsChange::Window => {
                let window = self.shell.view().ok().map(|clip| clip.window);
                match (self.player.as_mut(), window) {
                    (Some(player), Some(window)) => {
                        if player.window() != window {
                            player.set_window(window);
                        }
                    }
                    _ => self.rebuild_player(),
                }
            }
            ParamsChange::Source => self.rebuild_player(),
        }
    }

    /// Re-run parameter extraction against the current location.
    fn retry(&mut self) {
        log::info!("Retrying with {}", self.location.current());
        let change = self.shell.retry(self.location.query());
        self.apply_change(change);
    }

    /// Handle pending location changes.
    fn sync_location(&mut self) {
        let change = self.shell.sync(&mut self.location);
        self.apply_change(change);
    }

    /// Navigate to a local file, keeping the current clip window.
    fn open_video_file(&mut self, path: &Path) {
        let mut params = self.shell.params().clone();
        params.video_url = Some(path.to_string_lossy().to_string());
        self.navigate(params.to_query());
    }

    fn navigate(&mut self, href: String) {
        self.location.navigate(href);
        self.address = self.location.current().to_string();
    }

    /// Advance the mounted surface and upload any new frame.
    fn tick_player(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;

        let Some(ref mut player) = self.player else {
            return;
        };
        player.tick(elapsed);

        let frame = player.surface_mut().and_then(|surface| surface.frame());
        if let Some(frame) = frame {
            let size = [frame.width as usize, frame.height as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &frame.pixels);
            match self.frame_texture {
                Some(ref mut texture) => texture.set(color_image, egui::TextureOptions::LINEAR),
                None => {
                    self.frame_texture = Some(ctx.load_texture(
                        "video_frame",
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ))
                }
            }
        }

        if player.is_playing() || !player.is_loaded() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(IDLE_REPAINT);
        }
    }

    fn apply_player_action(&mut self, action: player_view::PlayerAction) {
        let Some(ref mut player) = self.player else {
            return;
        };
        match action {
            player_view::PlayerAction::SkipBackward => player.skip_backward(),
            player_view::PlayerAction::TogglePlayPause => player.toggle_play_pause(),
            player_view::PlayerAction::SkipForward => player.skip_forward(),
            player_view::PlayerAction::None => return,
        }
        player.pump();
    }
}

/// Transport action for this frame's key presses.
/// A focused widget handles its own keys (Space activates a focused button).
fn keyboard_action(ctx: &egui::Context) -> player_view::PlayerAction {
    if ctx.wants_keyboard_input() || ctx.memory(|m| m.focused().is_some()) {
        return player_view::PlayerAction::None;
    }
    ctx.input(|i| {
        if i.key_pressed(egui::Key::Space) {
            player_view::PlayerAction::TogglePlayPause
        } else if i.key_pressed(egui::Key::ArrowLeft) {
            player_view::PlayerAction::SkipBackward
        } else if i.key_pressed(egui::Key::ArrowRight) {
            player_view::PlayerAction::SkipForward
        } else {
            player_view::PlayerAction::None
        }
    })
}

impl eframe::App for ClipViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_location();
        self.tick_player(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Video...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Videos", &["mp4", "m4v", "mov", "mkv", "webm", "avi"])
                            .pick_file()
                        {
                            self.open_video_file(&path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Header
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(egui::Color32::BLACK).inner_margin(12.0))
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new("Video Player")
                        .size(22.0)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
            });

        // Address bar
        let address_action = egui::TopBottomPanel::top("address_bar")
            .show(ctx, |ui| address_bar::show(ui, &self.location, &mut self.address))
            .inner;

        match address_action {
            address_bar::AddressAction::Back => {
                self.location.back();
                self.address = self.location.current().to_string();
            }
            address_bar::AddressAction::Forward => {
                self.location.forward();
                self.address = self.location.current().to_string();
            }
            address_bar::AddressAction::Go(href) => self.navigate(href),
            address_bar::AddressAction::None => {}
        }

        self.apply_player_action(keyboard_action(ctx));

        // Main view (center)
        let view = self.shell.view();
        let (player_action, retry) = egui::CentralPanel::default()
            .show(ctx, |ui| match (&view, &self.player) {
                (Err(error), _) => (player_view::PlayerAction::None, error_view::show(ui, error)),
                (Ok(_), Some(player)) if player.is_mounted() => (
                    player_view::show(ui, player, &self.frame_texture),
                    false,
                ),
                (Ok(_), _) => {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                    (player_view::PlayerAction::None, false)
                }
            })
            .inner;

        self.apply_player_action(player_action);
        if retry {
            self.retry();
        }
    }
}
