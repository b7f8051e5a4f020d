// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Location history for the address bar.
//!
//! Holds the visited locations with back/forward navigation and queues a
//! change notification for every successful navigation.

use std::collections::VecDeque;

/// Kind of navigation that changed the current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationChange {
    Navigate,
    Back,
    Forward,
}

/// Visited locations with a cursor at the current entry.
#[derive(Debug, Clone)]
pub struct LocationHistory {
    entries: Vec<String>,
    index: usize,
    pending: VecDeque<LocationChange>,
}

impl LocationHistory {
    /// Start a history at `initial`. No change is queued for it.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: vec![initial.into()],
            index: 0,
            pending: VecDeque::new(),
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    /// Query part of the current location.
    pub fn query(&self) -> &str {
        query_of(self.current())
    }

    /// Push a new entry, dropping any forward entries.
    pub fn navigate(&mut self, href: impl Into<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(href.into());
        self.index = self.entries.len() - 1;
        self.pending.push_back(LocationChange::Navigate);
        log::info!("Navigated to {}", self.current());
    }

    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        self.pending.push_back(LocationChange::Back);
        log::info!("Back to {}", self.current());
        true
    }

    pub fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.index += 1;
        self.pending.push_back(LocationChange::Forward);
        log::info!("Forward to {}", self.current());
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Take the oldest pending change notification.
    pub fn poll_change(&mut self) -> Option<LocationChange> {
        self.pending.pop_front()
    }
}

/// Query string of a location, without any `#fragment`.
///
/// A location whose first key (the text before the first `=`) holds no
/// `://` and no `?` is a bare query and is returned whole, so values may
/// carry their own URLs. Otherwise the query is the text after the first `?`.
pub fn query_of(href: &str) -> &str {
    let without_fragment = href.split('#').next().unwrap_or_default();
    let first_key = without_fragment
        .split_once('=')
        .map_or(without_fragment, |(key, _)| key);
    if !first_key.contains("://") && !first_key.contains('?') {
        return without_fragment;
    }
    without_fragment
        .split_once('?')
        .map_or("", |(_, query)| query)
}
