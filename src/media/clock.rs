// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Clock-driven media surface.
//!
//! Tracks a playback position against elapsed time without decoding
//! anything. Used when no decoder is compiled in, and in tests.

use std::time::Duration;

use super::{EventHub, MediaEvent, MediaSurface};

pub struct ClockSurface {
    source: String,
    events: EventHub,
    /// Duration announced with the metadata; infinite when unbounded.
    media_duration: f64,
    metadata_ready: bool,
    position: f64,
    paused: bool,
}

impl ClockSurface {
    /// Load `source`. Metadata becomes ready on the first tick.
    pub fn new(source: impl Into<String>, media_duration: Option<f64>) -> Self {
        let media_duration = media_duration
            .filter(|d| d.is_finite() && *d >= 0.0)
            .unwrap_or(f64::INFINITY);
        Self {
            source: source.into(),
            events: EventHub::new(),
            media_duration,
            metadata_ready: false,
            position: 0.0,
            paused: true,
        }
    }
}

impl MediaSurface for ClockSurface {
    fn source(&self) -> &str {
        &self.source
    }

    fn events(&self) -> &EventHub {
        &self.events
    }

    fn duration(&self) -> Option<f64> {
        self.metadata_ready.then_some(self.media_duration)
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn seek(&mut self, position: f64) {
        if position.is_nan() {
            return;
        }
        self.position = position.clamp(0.0, self.media_duration);
        self.events.emit(MediaEvent::TimeUpdate {
            position: self.position,
        });
    }

    fn play(&mut self) {
        if self.paused {
            // Playing from the very end restarts the media
            if self.position >= self.media_duration {
                self.position = 0.0;
                self.events.emit(MediaEvent::TimeUpdate { position: 0.0 });
            }
            self.paused = false;
            self.events.emit(MediaEvent::Play);
        }
    }

    fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            self.events.emit(MediaEvent::Pause);
        }
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn tick(&mut self, elapsed: Duration) {
        if !self.metadata_ready {
            self.metadata_ready = true;
            self.events.emit(MediaEvent::LoadedMetadata {
                duration: self.media_duration,
            });
            return;
        }

        if self.paused {
            return;
        }

        self.position = (self.position + elapsed.as_secs_f64()).min(self.media_duration);
        self.events.emit(MediaEvent::TimeUpdate {
            position: self.position,
        });

        if self.position >= self.media_duration {
            self.pause();
        }
    }
}
