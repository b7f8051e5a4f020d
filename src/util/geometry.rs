// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the letterboxing used to fit video frames into
//! the space available in the player view.

/// Largest `(width, height)` with the frame's aspect ratio that fits in
/// `available`, plus the `(x, y)` offset that centers it.
pub fn fit_centered(
    frame_width: u32,
    frame_height: u32,
    available_width: f32,
    available_height: f32,
) -> ((f32, f32), (f32, f32)) {
    if frame_width == 0 || frame_height == 0 || available_width <= 0.0 || available_height <= 0.0 {
        return ((0.0, 0.0), (0.0, 0.0));
    }

    let frame_aspect = frame_width as f32 / frame_height as f32;
    let available_aspect = available_width / available_height;

    let (width, height) = if frame_aspect > available_aspect {
        // Frame is wider - fit to width
        (available_width, available_width / frame_aspect)
    } else {
        // Frame is taller - fit to height
        (available_height * frame_aspect, available_height)
    };

    let offset = ((available_width - width) / 2.0, (available_height - height) / 2.0);
    ((width, height), offset)
}
