// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! OpenCV-backed media surface.
//!
//! Decodes frames with `VideoCapture`, which accepts local paths as well
//! as network URLs through its FFmpeg backend. The playback clock is
//! advanced by the UI tick and frames are read until they catch up.

use std::time::Duration;

use anyhow::{bail, Result};
use opencv::{core, imgproc, prelude::*, videoio};

use super::{EventHub, MediaEvent, MediaSurface, VideoFrame};

pub struct OpenCvSurface {
    source: String,
    events: EventHub,
    capture: videoio::VideoCapture,
    fps: f64,
    media_duration: f64,
    metadata_ready: bool,
    position: f64,
    /// Timestamp of the next frame the capture will return.
    decoded_until: f64,
    paused: bool,
    pending_frame: Option<VideoFrame>,
}

impl OpenCvSurface {
    pub fn open(source: &str) -> Result<Self> {
        let capture = videoio::VideoCapture::from_file(source, videoio::CAP_ANY)?;
        if !capture.is_opened()? {
            bail!("VideoCapture could not open {}", source);
        }

        let fps = capture.get(videoio::CAP_PROP_FPS)?;
        let frame_count = capture.get(videoio::CAP_PROP_FRAME_COUNT)?;
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { 25.0 };
        let media_duration = if frame_count > 0.0 {
            frame_count / fps
        } else {
            f64::INFINITY
        };

        log::info!(
            "Opened {} ({:.2} fps, duration {:.2}s)",
            source,
            fps,
            media_duration
        );

        Ok(Self {
            source: source.to_string(),
            events: EventHub::new(),
            capture,
            fps,
            media_duration,
            metadata_ready: false,
            position: 0.0,
            decoded_until: 0.0,
            paused: true,
            pending_frame: None,
        })
    }

    /// Read frames until the decoder has passed the playback position.
    fn decode_to_position(&mut self) -> Result<()> {
        let mut last = None;
        while self.decoded_until <= self.position {
            let mut mat = core::Mat::default();
            if !self.capture.read(&mut mat)? || mat.empty() {
                break;
            }
            self.decoded_until += 1.0 / self.fps;
            last = Some(mat);
        }

        if let Some(mat) = last {
            let mut rgba = core::Mat::default();
            imgproc::cvt_color(&mat, &mut rgba, imgproc::COLOR_BGR2RGBA, 0)?;
            self.pending_frame = Some(VideoFrame {
                width: rgba.cols() as u32,
                height: rgba.rows() as u32,
                pixels: rgba.data_bytes()?.to_vec(),
            });
        }
        Ok(())
    }

    fn report(&self, result: Result<()>) {
        if let Err(e) = result {
            log::error!("Decoding {} failed: {}", self.source, e);
            self.events.emit(MediaEvent::Failed(e.to_string()));
        }
    }
}

impl MediaSurface for OpenCvSurface {
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
        let result = self
            .capture
            .set(videoio::CAP_PROP_POS_MSEC, self.position * 1000.0)
            .map_err(anyhow::Error::from)
            .and_then(|_| {
                self.decoded_until = self.position;
                self.decode_to_position()
            });
        self.report(result);
        self.events.emit(MediaEvent::TimeUpdate {
            position: self.position,
        });
    }

    fn play(&mut self) {
        if self.paused {
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
        let result = self.decode_to_position();
        self.report(result);
        self.events.emit(MediaEvent::TimeUpdate {
            position: self.position,
        });

        if self.position >= self.media_duration {
            self.pause();
        }
    }

    fn frame(&mut self) -> Option<VideoFrame> {
        self.pending_frame.take()
    }
}
