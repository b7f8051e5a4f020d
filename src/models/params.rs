// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Video parameters extracted from a location query string.
//!
//! Parsing never fails: malformed or missing values fall back to defaults
//! and the time range is clamped so that `end_time > start_time` always holds.

use url::form_urlencoded;

/// Query key carrying the media URL.
pub const VIDEO_URL_KEY: &str = "video_url";
/// Query key carrying the clip start, in whole seconds.
pub const START_TIME_KEY: &str = "startTime";
/// Query key carrying the clip end, in whole seconds.
pub const END_TIME_KEY: &str = "endTime";

/// Clip end used when `endTime` is absent or unparseable.
pub const DEFAULT_END_TIME: u64 = 60;

/// Largest time kept, in seconds. Every integer up to it is exact as `f64`.
pub const MAX_TIME_SECONDS: u64 = 1 << 53;

/// Parameters for one clipped playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoParams {
    pub video_url: Option<String>,
    pub start_time: u64,
    pub end_time: u64,
}

impl VideoParams {
    /// Re-apply the range clamp. Idempotent on an already valid pair.
    pub fn clamped(self) -> Self {
        let start_time = self.start_time.min(MAX_TIME_SECONDS - 1);
        let end_time = self.end_time.min(MAX_TIME_SECONDS).max(start_time + 1);
        Self {
            start_time,
            end_time,
            ..self
        }
    }

    /// Whether the range is ordered forward.
    pub fn has_valid_range(&self) -> bool {
        self.start_time < self.end_time
    }

    /// Encode as a query string (with leading `?`) that parses back to `self`.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::for_suffix(String::from("?"), 1);
        if let Some(ref video_url) = self.video_url {
            serializer.append_pair(VIDEO_URL_KEY, video_url);
        }
        serializer
            .append_pair(START_TIME_KEY, &self.start_time.to_string())
            .append_pair(END_TIME_KEY, &self.end_time.to_string());
        serializer.finish()
    }
}

/// Parse a query string (without the leading `?`) into `VideoParams`.
pub fn parse(query: &str) -> VideoParams {
    let mut video_url = None;
    let mut start_raw = None;
    let mut end_raw = None;

    for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
        match key.as_ref() {
            VIDEO_URL_KEY if video_url.is_none() => video_url = Some(value.into_owned()),
            START_TIME_KEY if start_raw.is_none() => start_raw = Some(value.into_owned()),
            END_TIME_KEY if end_raw.is_none() => end_raw = Some(value.into_owned()),
            _ => {}
        }
    }

    let video_url = video_url.filter(|url| !url.is_empty());
    let start_time = start_raw
        .as_deref()
        .and_then(parse_leading_int)
        .map(|n| n.max(0) as u64)
        .unwrap_or(0);
    let end_time = end_raw
        .as_deref()
        .and_then(parse_leading_int)
        .map(|n| n.max(0) as u64)
        .unwrap_or(DEFAULT_END_TIME);

    let params = VideoParams {
        video_url,
        start_time,
        end_time,
    }
    .clamped();

    log::debug!(
        "Parsed URL parameters: video_url={:?} start_time={} end_time={}",
        params.video_url,
        params.start_time,
        params.end_time
    );

    params
}

/// Lenient integer parse: leading whitespace, optional sign, then as many
/// decimal digits as present. Anything after the digits is ignored.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Saturate instead of failing on absurdly long digit runs
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_query() {
        let params = parse("video_url=a.mp4&startTime=30&endTime=45");
        assert_eq!(params.video_url.as_deref(), Some("a.mp4"));
        assert_eq!(params.start_time, 30);
        assert_eq!(params.end_time, 45);
    }

    #[test]
    fn test_leading_question_mark_is_ignored() {
        let params = parse("?video_url=a.mp4&startTime=30&endTime=45");
        assert_eq!(params.video_url.as_deref(), Some("a.mp4"));
        assert_eq!(params.start_time, 30);
    }

    #[test]
    fn test_defaults_without_times() {
        let params = parse("video_url=a.mp4");
        assert_eq!(params.start_time, 0);
        assert_eq!(params.end_time, 60);
    }

    #[test]
    fn test_missing_video_url() {
        assert_eq!(parse("startTime=5&endTime=10").video_url, None);
        assert_eq!(parse("").video_url, None);
        assert_eq!(parse("video_url=").video_url, None);
    }

    #[test]
    fn test_video_url_is_percent_decoded() {
        let params = parse("video_url=https%3A%2F%2Fexample.com%2Fclip%20one.mp4");
        assert_eq!(
            params.video_url.as_deref(),
            Some("https://example.com/clip one.mp4")
        );
    }

    #[test]
    fn test_start_time_parsing() {
        assert_eq!(parse("startTime=12").start_time, 12);
        assert_eq!(parse("startTime=12s").start_time, 12);
        assert_eq!(parse("startTime=%2012").start_time, 12);
        assert_eq!(parse("startTime=abc").start_time, 0);
        assert_eq!(parse("startTime=").start_time, 0);
        assert_eq!(parse("startTime=-5").start_time, 0);
    }

    #[test]
    fn test_unparseable_end_time_uses_default() {
        assert_eq!(parse("endTime=soon").end_time, 60);
    }

    #[test]
    fn test_end_time_clamped_after_start() {
        let params = parse("startTime=90");
        assert_eq!(params.start_time, 90);
        assert_eq!(params.end_time, 91);

        let params = parse("startTime=20&endTime=10");
        assert_eq!(params.end_time, 21);

        let params = parse("startTime=-10&endTime=-3");
        assert_eq!(params.start_time, 0);
        assert_eq!(params.end_time, 1);
    }

    #[test]
    fn test_range_is_always_forward() {
        let queries = [
            "",
            "startTime=0&endTime=0",
            "startTime=59&endTime=59",
            "startTime=100&endTime=1",
            "startTime=x&endTime=y",
            "startTime=18446744073709551615",
            "startTime=99999999999999999999999",
        ];
        for query in queries {
            let params = parse(query);
            assert!(params.has_valid_range(), "range not forward for {query:?}");
            assert_eq!(params.clone().clamped(), params);
        }
    }

    #[test]
    fn test_huge_times_are_capped() {
        let params = parse("startTime=9007199254740992");
        assert_eq!(params.start_time, MAX_TIME_SECONDS - 1);
        assert_eq!(params.end_time, MAX_TIME_SECONDS);
        assert!((params.start_time as f64) < (params.end_time as f64));

        let params = parse("endTime=99999999999999999999");
        assert_eq!(params.start_time, 0);
        assert_eq!(params.end_time, MAX_TIME_SECONDS);
    }

    #[test]
    fn test_to_query_keeps_local_paths_intact() {
        let params = VideoParams {
            video_url: Some("/home/me/My Clips/a&b.mp4".to_string()),
            start_time: 12,
            end_time: 40,
        };
        let query = params.to_query();
        assert!(query.starts_with("?video_url="));
        assert_eq!(parse(&query), params);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let params = parse("video_url=a.mp4&video_url=b.mp4&startTime=1&startTime=2");
        assert_eq!(params.video_url.as_deref(), Some("a.mp4"));
        assert_eq!(params.start_time, 1);
    }
}
