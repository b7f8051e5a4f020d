// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Page shell: decides between the error views and the player view.
//!
//! Parameters are re-derived from the location on every navigation and on
//! retry. The shell reports what changed so the app can rebuild or
//! re-window the player.

use thiserror::Error;

use crate::models::location::LocationHistory;
use crate::models::params::{self, VideoParams};
use crate::models::playback::ClipWindow;

/// User-visible reasons the player cannot be shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("no video URL provided")]
    MissingVideoUrl,
    /// Unreachable through `params::parse`, which orders the range and caps
    /// times where `f64` is still exact.
    #[error("invalid time range {start_time}..{end_time}")]
    InvalidTimeRange { start_time: u64, end_time: u64 },
}

impl PageError {
    pub fn title(&self) -> &'static str {
        match self {
            PageError::MissingVideoUrl => "No Video URL Provided",
            PageError::InvalidTimeRange { .. } => "Invalid Time Parameters",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PageError::MissingVideoUrl => {
                "Please provide a video URL in the query parameters. \
                 Example: ?video_url=your-video-url.mp4&startTime=30&endTime=45"
            }
            PageError::InvalidTimeRange { .. } => {
                "Start time must be less than end time. Please check your URL parameters."
            }
        }
    }
}

/// A clip ready for the player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayableClip {
    pub video_url: String,
    pub window: ClipWindow,
}

/// How the derived parameters changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamsChange {
    Unchanged,
    /// Same video, different time range.
    Window,
    /// Different video, or a switch to or from an error view.
    Source,
}

#[derive(Debug, Clone)]
pub struct PageShell {
    params: VideoParams,
}

impl PageShell {
    pub fn new(query: &str) -> Self {
        Self {
            params: params::parse(query),
        }
    }

    pub fn params(&self) -> &VideoParams {
        &self.params
    }

    /// Current view: the clip to play or the error to show.
    pub fn view(&self) -> Result<PlayableClip, PageError> {
        let video_url = self
            .params
            .video_url
            .clone()
            .ok_or(PageError::MissingVideoUrl)?;
        let window = ClipWindow::from_params(&self.params).ok_or(PageError::InvalidTimeRange {
            start_time: self.params.start_time,
            end_time: self.params.end_time,
        })?;
        Ok(PlayableClip { video_url, window })
    }

    /// Re-derive parameters from `query`.
    pub fn retry(&mut self, query: &str) -> ParamsChange {
        self.replace(params::parse(query))
    }

    /// Drain every pending location change, re-deriving parameters for each.
    pub fn sync(&mut self, location: &mut LocationHistory) -> ParamsChange {
        let mut change = ParamsChange::Unchanged;
        while let Some(kind) = location.poll_change() {
            log::debug!("Location changed ({:?})", kind);
            change = change.merge(self.retry(location.query()));
        }
        change
    }

    fn replace(&mut self, params: VideoParams) -> ParamsChange {
        let change = if params == self.params {
            ParamsChange::Unchanged
        } else if params.video_url == self.params.video_url
            && params.video_url.is_some()
            && params.has_valid_range()
            && self.params.has_valid_range()
        {
            ParamsChange::Window
        } else {
            ParamsChange::Source
        };
        self.params = params;
        change
    }

    #[cfg(test)]
    fn with_params(params: VideoParams) -> Self {
        Self { params }
    }
}

impl ParamsChange {
    fn merge(self, other: ParamsChange) -> ParamsChange {
        match (self, other) {
            (ParamsChange::Source, _) | (_, ParamsChange::Source) => ParamsChange::Source,
            (ParamsChange::Window, _) | (_, ParamsChange::Window) => ParamsChange::Window,
            _ => ParamsChange::Unchanged,
        }
    }
}
