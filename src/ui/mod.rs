// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the clip viewer.

pub mod address_bar;
pub mod error_view;
pub mod player_view;
