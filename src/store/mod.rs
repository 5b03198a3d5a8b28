// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side activity store and its snapshot type.

pub mod activity_store;
pub mod state;

pub use activity_store::ActivityStore;
pub use state::StoreState;
