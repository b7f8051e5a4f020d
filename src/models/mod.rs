// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model: parameters, clip window, playback state and location history.

pub mod location;
pub mod params;
pub mod playback;
