// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity model shared by the API gateway and the store.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// An activity record as exchanged with the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client-app/src/app/models/generated/")
)]
pub struct Activity {
    /// Client-generated identifier (UUID string)
    pub id: String,
    pub title: String,
    /// Calendar date; date-only (`YYYY-MM-DD`) once stored in the registry
    pub date: String,
    pub description: String,
    /// Activity category (drinks, culture, film, ...)
    pub category: String,
    pub city: String,
    pub venue: String,
}

/// Form input for a new activity, before an id has been assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client-app/src/app/models/generated/")
)]
pub struct ActivityDraft {
    pub title: String,
    pub date: String,
    pub description: String,
    pub category: String,
    pub city: String,
    pub venue: String,
}

impl ActivityDraft {
    /// Attach an identifier, producing a full activity record.
    pub fn into_activity(self, id: String) -> Activity {
        Activity {
            id,
            title: self.title,
            date: self.date,
            description: self.description,
            category: self.category,
            city: self.city,
            venue: self.venue,
        }
    }
}

/// Activities sharing one calendar date, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "client-app/src/app/models/generated/")
)]
pub struct ActivityGroup {
    pub date: String,
    pub activities: Vec<Activity>,
}
