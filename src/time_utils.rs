// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for activity date handling.

use chrono::{DateTime, NaiveDate};

/// Strip any time-of-day suffix, keeping only the date portion.
///
/// `"2024-05-01T10:00:00"` becomes `"2024-05-01"`; strings without a `T`
/// separator are returned unchanged.
pub fn date_only(raw: &str) -> &str {
    match raw.split_once('T') {
        Some((date, _)) => date,
        None => raw,
    }
}

/// Ordering key for a stored activity date.
///
/// Parsed dates sort chronologically and always before unparseable ones,
/// which fall back to plain string order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DateKey {
    Parsed(NaiveDate),
    Unparsed(String),
}

impl DateKey {
    pub fn parse(raw: &str) -> Self {
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return DateKey::Parsed(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return DateKey::Parsed(dt.date_naive());
        }
        DateKey::Unparsed(raw.to_string())
    }
}
