// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media surfaces: the playback primitive the clipped player drives.
//!
//! A surface loads a source, reports duration and position, accepts seek,
//! play and pause commands, and emits lifecycle events through its
//! `EventHub`. The default build ships a clock-driven surface; the
//! `video-opencv` feature adds a decoding one.

pub mod clock;
pub mod events;
#[cfg(feature = "video-opencv")]
pub mod capture;

use std::time::Duration;

pub use clock::ClockSurface;
pub use events::{EventHub, MediaEvent, Subscription};

/// A decoded RGBA frame ready for upload as a texture.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Playback primitive with native media element semantics.
pub trait MediaSurface {
    /// Source URL or path this surface was loaded from.
    fn source(&self) -> &str;

    fn events(&self) -> &EventHub;

    /// Total duration, `None` until metadata is ready.
    fn duration(&self) -> Option<f64>;

    fn current_time(&self) -> f64;

    /// Move the position (clamped to the media) and emit `TimeUpdate`.
    fn seek(&mut self, position: f64);

    /// Start playback, emitting `Play` if the surface was paused.
    fn play(&mut self);

    /// Stop playback, emitting `Pause` if the surface was playing.
    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    /// Advance by `elapsed` wall time. Playing surfaces emit `TimeUpdate`.
    fn tick(&mut self, elapsed: Duration);

    /// Latest decoded frame, if the surface decodes video and a new one is ready.
    fn frame(&mut self) -> Option<VideoFrame> {
        None
    }
}

/// Open the best available surface for `source`.
pub fn open(source: &str, media_duration: Option<f64>) -> Box<dyn MediaSurface> {
    #[cfg(feature = "video-opencv")]
    {
        match capture::OpenCvSurface::open(source) {
            Ok(surface) => return Box::new(surface),
            Err(e) => log::error!("Failed to open {} for decoding: {}", source, e),
        }
    }

    Box::new(ClockSurface::new(source, media_duration))
}
