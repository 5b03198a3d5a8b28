// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - remote gateway and id generation.

pub mod agent;
pub mod ids;

pub use agent::{ActivitiesGateway, HttpAgent};
pub use ids::{IdGenerator, UuidGenerator};
