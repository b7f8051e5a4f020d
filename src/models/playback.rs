// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Clip window and playback state.
//!
//! This module defines the time range playback is restricted to, the
//! state the player derives from media events, and time formatting.

use super::params::VideoParams;

/// The `[start, end]` sub-range of the source media, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipWindow {
    start: f64,
    end: f64,
}

impl ClipWindow {
    /// Create a window. Returns `None` unless `start >= 0` and `end > start`.
    pub fn new(start: f64, end: f64) -> Option<Self> {
        if start.is_finite() && end.is_finite() && start >= 0.0 && end > start {
            Some(Self { start, end })
        } else {
            None
        }
    }

    /// Window described by extracted parameters, if their range is valid.
    pub fn from_params(params: &VideoParams) -> Option<Self> {
        Self::new(params.start_time as f64, params.end_time as f64)
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// Length of the clip in seconds. Always positive.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Position within the window as a percentage in `[0, 100]`.
    pub fn progress_percent(&self, position: f64) -> f64 {
        let percent = (position - self.start) / self.span() * 100.0;
        if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        }
    }
}

/// Player state, mutated only by media events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_time: f64,
    /// Total media duration; infinite for unbounded sources, zero until metadata arrives.
    pub duration: f64,
}

impl PlaybackState {
    pub fn new(start_time: f64) -> Self {
        Self {
            is_playing: false,
            current_time: start_time,
            duration: 0.0,
        }
    }
}

/// Format seconds as `M:SS`, flooring both parts.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_requires_forward_range() {
        assert!(ClipWindow::new(0.0, 60.0).is_some());
        assert!(ClipWindow::new(10.0, 10.0).is_none());
        assert!(ClipWindow::new(20.0, 10.0).is_none());
        assert!(ClipWindow::new(-1.0, 10.0).is_none());
        assert!(ClipWindow::new(0.0, f64::NAN).is_none());
    }

    #[test]
    fn test_window_from_params() {
        let params = VideoParams {
            video_url: Some("a.mp4".to_string()),
            start_time: 30,
            end_time: 45,
        };
        let window = ClipWindow::from_params(&params).unwrap();
        assert_eq!(window.start(), 30.0);
        assert_eq!(window.end(), 45.0);
        assert_eq!(window.span(), 15.0);
    }

    #[test]
    fn test_progress_percent_bounds() {
        let window = ClipWindow::new(30.0, 45.0).unwrap();
        assert_eq!(window.progress_percent(30.0), 0.0);
        assert_eq!(window.progress_percent(37.5), 50.0);
        assert_eq!(window.progress_percent(45.0), 100.0);
        assert_eq!(window.progress_percent(10.0), 0.0);
        assert_eq!(window.progress_percent(90.0), 100.0);
        assert_eq!(window.progress_percent(f64::NAN), 0.0);
    }

    #[test]
    fn test_progress_percent_is_monotonic() {
        let window = ClipWindow::new(5.0, 17.0).unwrap();
        let mut last = 0.0;
        let mut position = 0.0;
        while position < 20.0 {
            let percent = window.progress_percent(position);
            assert!(percent >= last);
            assert!((0.0..=100.0).contains(&percent));
            last = percent;
            position += 0.25;
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(9.99), "0:09");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(600.4), "10:00");
        assert_eq!(format_time(3725.0), "62:05");
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }
}
