// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Clipped player.
//!
//! Wraps a media surface and restricts playback to a clip window: seeks to
//! the window start once metadata is ready, pauses at the window end, and
//! keeps the transport controls inside the window. The player state is
//! derived only from surface events, which arrive through a subscription
//! held for as long as the surface is mounted with the current window.

use std::time::Duration;

use crate::media::{MediaEvent, MediaSurface, Subscription};
use crate::models::playback::{format_time, ClipWindow, PlaybackState};

/// Default skip step for the transport controls, in seconds.
pub const DEFAULT_SKIP_SECONDS: f64 = 10.0;

pub struct ClipPlayer {
    window: ClipWindow,
    skip_seconds: f64,
    state: PlaybackState,
    /// Declared before the surface so it detaches before the surface drops.
    subscription: Option<Subscription>,
    surface: Option<Box<dyn MediaSurface>>,
    last_error: Option<String>,
}

impl ClipPlayer {
    /// Create an unmounted player for `window`.
    pub fn new(window: ClipWindow) -> Self {
        Self {
            window,
            skip_seconds: DEFAULT_SKIP_SECONDS,
            state: PlaybackState::new(window.start()),
            subscription: None,
            surface: None,
            last_error: None,
        }
    }

    pub fn with_skip_seconds(mut self, seconds: f64) -> Self {
        if seconds.is_finite() && seconds > 0.0 {
            self.skip_seconds = seconds;
        }
        self
    }

    /// Attach a surface, replacing any mounted one.
    pub fn mount(&mut self, surface: Box<dyn MediaSurface>) {
        self.unmount();
        log::info!(
            "Mounted player for {} ({} - {})",
            surface.source(),
            format_time(self.window.start()),
            format_time(self.window.end())
        );
        self.subscription = Some(surface.events().subscribe());
        self.surface = Some(surface);
    }

    /// Detach and return the mounted surface, if any.
    pub fn unmount(&mut self) -> Option<Box<dyn MediaSurface>> {
        self.subscription = None;
        let surface = self.surface.take();
        if let Some(ref surface) = surface {
            log::info!("Unmounted player for {}", surface.source());
        }
        surface
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Change the clip window. Events queued against the old window are discarded.
    pub fn set_window(&mut self, window: ClipWindow) {
        if window == self.window {
            return;
        }
        self.window = window;
        self.subscription = None;
        if let Some(ref surface) = self.surface {
            self.subscription = Some(surface.events().subscribe());
            log::info!(
                "Clip window changed to {} - {}",
                format_time(window.start()),
                format_time(window.end())
            );
            log::debug!("{} listener(s) attached", surface.events().listener_count());
        }
    }

    pub fn window(&self) -> ClipWindow {
        self.window
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// Whether the mounted surface has reported its metadata.
    pub fn is_loaded(&self) -> bool {
        self.surface
            .as_ref()
            .is_some_and(|surface| surface.duration().is_some())
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.surface.as_ref().map(|surface| surface.source())
    }

    pub fn surface_mut(&mut self) -> Option<&mut (dyn MediaSurface + 'static)> {
        self.surface.as_deref_mut()
    }

    /// Advance the surface clock and handle the resulting events.
    pub fn tick(&mut self, elapsed: Duration) {
        if let Some(ref mut surface) = self.surface {
            surface.tick(elapsed);
        }
        self.pump();
    }

    /// Handle every pending surface event, including ones raised while handling.
    pub fn pump(&mut self) {
        loop {
            let events = match self.subscription {
                Some(ref subscription) => subscription.drain(),
                None => return,
            };
            if events.is_empty() {
                return;
            }
            for event in events {
                self.handle_event(event);
            }
        }
    }

    fn handle_event(&mut self, event: MediaEvent) {
        let Some(ref mut surface) = self.surface else {
            return;
        };

        match event {
            MediaEvent::LoadedMetadata { duration } => {
                surface.seek(self.window.start());
                self.state.duration = duration;
                log::info!(
                    "Video loaded. Setting start time to: {}s",
                    self.window.start()
                );
            }
            MediaEvent::TimeUpdate { position } => {
                self.state.current_time = position;
                if position >= self.window.end() {
                    if !surface.is_paused() {
                        surface.pause();
                    }
                    if self.state.is_playing {
                        log::info!("Reached end time: {}s. Pausing video.", self.window.end());
                    }
                    self.state.is_playing = false;
                }
            }
            MediaEvent::Play => self.state.is_playing = true,
            MediaEvent::Pause => self.state.is_playing = false,
            MediaEvent::Failed(message) => self.last_error = Some(message),
        }
    }

    /// Pause when playing; otherwise play, restarting from the window start
    /// if the position is at or past the window end.
    pub fn toggle_play_pause(&mut self) {
        let Some(ref mut surface) = self.surface else {
            return;
        };

        if self.state.is_playing {
            surface.pause();
        } else {
            if surface.current_time() >= self.window.end() {
                surface.seek(self.window.start());
            }
            surface.play();
        }
    }

    pub fn skip_backward(&mut self) {
        let Some(ref mut surface) = self.surface else {
            return;
        };
        let target = (surface.current_time() - self.skip_seconds).max(self.window.start());
        surface.seek(target);
    }

    pub fn skip_forward(&mut self) {
        let Some(ref mut surface) = self.surface else {
            return;
        };
        let target = (surface.current_time() + self.skip_seconds).min(self.window.end());
        surface.seek(target);
    }

    /// Position within the clip window as a percentage in `[0, 100]`.
    pub fn progress_percent(&self) -> f64 {
        self.window.progress_percent(self.state.current_time)
    }

    pub fn current_time_label(&self) -> String {
        format_time(self.state.current_time)
    }

    pub fn clip_duration_label(&self) -> String {
        format!("{} (clip duration)", format_time(self.window.span()))
    }

    /// Length of the whole source, once known and finite.
    pub fn media_duration_label(&self) -> Option<String> {
        let duration = self.state.duration;
        (self.is_loaded() && duration.is_finite() && duration > 0.0)
            .then(|| format!("Source length {}", format_time(duration)))
    }

    pub fn range_label(&self) -> String {
        format!(
            "Playing from {} to {}",
            format_time(self.window.start()),
            format_time(self.window.end())
        )
    }
}

impl Drop for ClipPlayer {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ClockSurface;

    fn window(start: f64, end: f64) -> ClipWindow {
        ClipWindow::new(start, end).unwrap()
    }

    fn mounted(start: f64, end: f64) -> ClipPlayer {
        let mut player = ClipPlayer::new(window(start, end));
        player.mount(Box::new(ClockSurface::new("a.mp4", Some(120.0))));
        player.tick(Duration::ZERO);
        player
    }

    fn position(player: &mut ClipPlayer) -> f64 {
        player.surface_mut().unwrap().current_time()
    }

    #[test]
    fn test_seeks_to_start_on_metadata() {
        let player = mounted(30.0, 45.0);
        assert_eq!(player.state().duration, 120.0);
        assert_eq!(player.state().current_time, 30.0);
        assert!(!player.is_playing());
        assert_eq!(player.progress_percent(), 0.0);
    }

    #[test]
    fn test_pauses_at_end_time() {
        let mut player = mounted(30.0, 45.0);
        player.toggle_play_pause();
        player.pump();
        assert!(player.is_playing());

        player.tick(Duration::from_secs(10));
        assert!(player.is_playing());
        assert_eq!(player.state().current_time, 40.0);

        player.tick(Duration::from_secs(5));
        assert!(!player.is_playing());
        assert_eq!(player.state().current_time, 45.0);
        assert!(player.surface_mut().unwrap().is_paused());
        assert_eq!(player.progress_percent(), 100.0);
    }

    #[test]
    fn test_toggle_at_end_restarts_from_start() {
        let mut player = mounted(30.0, 45.0);
        player.surface_mut().unwrap().seek(45.0);
        player.pump();
        assert_eq!(player.state().current_time, 45.0);

        player.toggle_play_pause();
        player.pump();
        assert!(player.is_playing());
        assert_eq!(position(&mut player), 30.0);
        assert_eq!(player.state().current_time, 30.0);
    }

    #[test]
    fn test_toggle_pauses_when_playing() {
        let mut player = mounted(0.0, 60.0);
        player.toggle_play_pause();
        player.tick(Duration::from_secs(2));
        assert!(player.is_playing());

        player.toggle_play_pause();
        player.pump();
        assert!(!player.is_playing());
        assert_eq!(position(&mut player), 2.0);
    }

    #[test]
    fn test_skip_forward_clamps_to_end() {
        let mut player = mounted(30.0, 45.0);
        player.surface_mut().unwrap().seek(44.0);
        player.skip_forward();
        player.pump();
        assert_eq!(position(&mut player), 45.0);
        assert_eq!(player.state().current_time, 45.0);
    }

    #[test]
    fn test_skip_backward_clamps_to_start() {
        let mut player = mounted(30.0, 45.0);
        player.surface_mut().unwrap().seek(36.0);
        player.skip_backward();
        assert_eq!(position(&mut player), 30.0);

        player.surface_mut().unwrap().seek(44.0);
        player.skip_backward();
        assert_eq!(position(&mut player), 34.0);
    }

    #[test]
    fn test_custom_skip_step() {
        let mut player = ClipPlayer::new(window(0.0, 60.0)).with_skip_seconds(5.0);
        player.mount(Box::new(ClockSurface::new("a.mp4", None)));
        player.tick(Duration::ZERO);
        player.skip_forward();
        assert_eq!(position(&mut player), 5.0);
    }

    #[test]
    fn test_controls_are_noops_when_unmounted() {
        let mut player = ClipPlayer::new(window(30.0, 45.0));
        player.toggle_play_pause();
        player.skip_forward();
        player.skip_backward();
        player.tick(Duration::from_secs(1));
        assert!(!player.is_playing());
        assert_eq!(player.state().current_time, 30.0);
        assert!(player.source().is_none());
    }

    #[test]
    fn test_unmount_detaches_listener() {
        let mut player = mounted(0.0, 10.0);
        let surface = player.unmount().unwrap();
        assert_eq!(surface.events().listener_count(), 0);
        assert!(!player.is_mounted());
    }

    #[test]
    fn test_window_change_discards_stale_events() {
        let mut player = mounted(0.0, 60.0);
        player.toggle_play_pause();
        player.pump();
        player.surface_mut().unwrap().seek(50.0);

        // The queued update at 50s must not be judged against the new 40s end
        player.set_window(window(0.0, 40.0));
        player.pump();
        assert!(player.is_playing());
        assert_eq!(player.surface_mut().unwrap().events().listener_count(), 1);

        player.tick(Duration::from_secs(5));
        assert!(!player.is_playing());
        assert_eq!(player.state().current_time, 55.0);
    }

    #[test]
    fn test_progress_is_monotonic_while_playing() {
        let mut player = mounted(10.0, 20.0);
        player.toggle_play_pause();
        let mut last = player.progress_percent();
        for _ in 0..30 {
            player.tick(Duration::from_millis(500));
            let progress = player.progress_percent();
            assert!(progress >= last);
            assert!((0.0..=100.0).contains(&progress));
            last = progress;
        }
        assert_eq!(last, 100.0);
    }

    #[test]
    fn test_labels() {
        let player = mounted(30.0, 95.0);
        assert_eq!(player.current_time_label(), "0:30");
        assert_eq!(player.clip_duration_label(), "1:05 (clip duration)");
        assert_eq!(player.range_label(), "Playing from 0:30 to 1:35");
    }

    #[test]
    fn test_media_duration_label() {
        let mut player = ClipPlayer::new(window(0.0, 10.0));
        player.mount(Box::new(ClockSurface::new("a.mp4", Some(125.0))));
        assert!(!player.is_loaded());
        assert_eq!(player.media_duration_label(), None);

        player.tick(Duration::ZERO);
        assert!(player.is_loaded());
        assert_eq!(
            player.media_duration_label().as_deref(),
            Some("Source length 2:05")
        );
    }

    #[test]
    fn test_failed_event_is_recorded() {
        let mut player = mounted(0.0, 10.0);
        player
            .surface_mut()
            .unwrap()
            .events()
            .emit(MediaEvent::Failed("decoder error".to_string()));
        player.pump();
        assert_eq!(player.last_error(), Some("decoder error"));
    }
}
