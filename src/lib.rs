// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activities client: an observable cache of activity records
//!
//! This crate keeps an in-memory registry of activities in sync with the
//! activities REST API and exposes sorted and date-grouped views of it for
//! presentation layers.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod time_utils;

pub use models::{Activity, ActivityDraft, ActivityGroup};
pub use store::{ActivityStore, StoreState};
