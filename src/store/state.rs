// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Immutable store snapshot and its derived views.

use crate::models::{Activity, ActivityGroup};
use crate::time_utils::{date_only, DateKey};
use indexmap::IndexMap;

/// Snapshot of the client-side activity cache.
///
/// Observers receive whole snapshots, never a partially applied transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    /// Activities keyed by id, in the order they were first stored
    pub registry: IndexMap<String, Activity>,
    /// Id of the selected activity; resolved against `registry` on read
    pub selected_id: Option<String>,
    /// A create/edit form is open
    pub edit_mode: bool,
    /// A create, update or delete call is in flight
    pub loading: bool,
    /// A list or details fetch is in flight
    pub loading_initial: bool,
}

impl StoreState {
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Activity> {
        self.registry.get(id)
    }

    /// The selected activity, if it is still present in the registry.
    pub fn selected_activity(&self) -> Option<&Activity> {
        self.selected_id.as_deref().and_then(|id| self.registry.get(id))
    }

    /// All activities ordered by date, ascending.
    ///
    /// Activities with the same date string keep their registry order. Differently
    /// spelled strings for one day (`2024-5-1`, `2024-05-01`) are kept apart so
    /// each date string forms a single contiguous run.
    pub fn activities_by_date(&self) -> Vec<Activity> {
        let mut activities: Vec<Activity> = self.registry.values().cloned().collect();
        activities.sort_by_cached_key(|a| (DateKey::parse(&a.date), a.date.clone()));
        activities
    }

    /// Date-ordered activities partitioned by date.
    ///
    /// Concatenating the groups yields exactly [`Self::activities_by_date`].
    pub fn grouped_activities(&self) -> Vec<ActivityGroup> {
        let mut groups: Vec<ActivityGroup> = Vec::new();

        for activity in self.activities_by_date() {
            match groups.last_mut() {
                Some(group) if group.date == activity.date => group.activities.push(activity),
                _ => groups.push(ActivityGroup {
                    date: activity.date.clone(),
                    activities: vec![activity],
                }),
            }
        }

        groups
    }

    /// Insert or overwrite an activity, stripping any time from its date.
    ///
    /// Overwriting keeps the entry's existing registry position.
    pub(crate) fn insert(&mut self, mut activity: Activity) {
        let date = date_only(&activity.date).to_string();
        activity.date = date;
        self.registry.insert(activity.id.clone(), activity);
    }

    /// Remove an activity, dropping the selection if it pointed there.
    pub(crate) fn remove(&mut self, id: &str) {
        self.registry.shift_remove(id);
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = None;
        }
    }

    /// Select by id; an unknown id clears the selection.
    pub(crate) fn select(&mut self, id: &str) {
        self.selected_id = self.registry.contains_key(id).then(|| id.to_string());
    }
}
