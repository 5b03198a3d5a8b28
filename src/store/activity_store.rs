// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity store: the client-side cache kept in sync with the API.
//!
//! Every mutation follows the same shape:
//! 1. Raise the loading flag it owns
//! 2. Await exactly one gateway call
//! 3. In a single state transition, clear the flag and (on success only)
//!    reconcile the result into the registry
//!
//! Gateway failures are logged and swallowed; callers only observe state.

use crate::error::GatewayError;
use crate::models::{Activity, ActivityDraft, ActivityGroup};
use crate::services::{ActivitiesGateway, IdGenerator, UuidGenerator};
use crate::store::StoreState;
use crate::time_utils::date_only;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Which loading indicator an in-flight call drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadingFlag {
    /// List and details fetches
    Initial,
    /// Create, update and delete
    Mutation,
}

impl LoadingFlag {
    fn set(self, state: &mut StoreState, value: bool) {
        match self {
            LoadingFlag::Initial => state.loading_initial = value,
            LoadingFlag::Mutation => state.loading = value,
        }
    }
}

/// Observable activity cache backed by an [`ActivitiesGateway`].
///
/// The store is the only write path to its state. Readers take a
/// [`snapshot`](Self::snapshot) or [`subscribe`](Self::subscribe) to
/// receive each new snapshot as it is published.
pub struct ActivityStore {
    gateway: Arc<dyn ActivitiesGateway>,
    ids: Arc<dyn IdGenerator>,
    state: watch::Sender<StoreState>,
}

impl ActivityStore {
    /// Create an empty store that assigns random UUIDs to new activities.
    pub fn new(gateway: Arc<dyn ActivitiesGateway>) -> Self {
        Self::with_id_generator(gateway, Arc::new(UuidGenerator))
    }

    /// Create an empty store with a custom id source.
    pub fn with_id_generator(
        gateway: Arc<dyn ActivitiesGateway>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self {
            gateway,
            ids,
            state,
        }
    }

    // ─── Read Access ─────────────────────────────────────────────────────────

    /// Clone of the current state.
    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Receive every state transition published after this call.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    pub fn activities_by_date(&self) -> Vec<Activity> {
        self.state.borrow().activities_by_date()
    }

    pub fn grouped_activities(&self) -> Vec<ActivityGroup> {
        self.state.borrow().grouped_activities()
    }

    pub fn selected_activity(&self) -> Option<Activity> {
        self.state.borrow().selected_activity().cloned()
    }

    pub fn edit_mode(&self) -> bool {
        self.state.borrow().edit_mode
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn loading_initial(&self) -> bool {
        self.state.borrow().loading_initial
    }

    // ─── Fetching ────────────────────────────────────────────────────────────

    /// Fetch every activity and merge it into the registry.
    ///
    /// Existing entries with the same id are overwritten, so repeating the
    /// call with the same response leaves the registry unchanged.
    pub async fn load_activities(&self) {
        tracing::debug!("Loading activities");

        let loaded = self
            .guarded(
                LoadingFlag::Initial,
                "load_activities",
                self.gateway.list(),
                |state, activities: &Vec<Activity>| {
                    for activity in activities {
                        state.insert(activity.clone());
                    }
                },
            )
            .await;

        if let Some(activities) = loaded {
            tracing::info!(count = activities.len(), "Activities loaded");
        }
    }

    /// Select an activity, fetching it first if it is not cached.
    ///
    /// A cached entry is returned without any gateway call.
    pub async fn load_activity(&self, id: &str) -> Option<Activity> {
        let cached = self.state.borrow().get(id).cloned();
        if let Some(activity) = cached {
            self.state.send_modify(|state| state.select(id));
            return Some(activity);
        }

        tracing::debug!(id, "Activity not cached, fetching details");

        let fetch = async {
            let mut activity = self.gateway.details(id).await?;
            activity.date = date_only(&activity.date).to_string();
            Ok::<_, GatewayError>(activity)
        };

        self.guarded(
            LoadingFlag::Initial,
            "load_activity",
            fetch,
            |state, activity: &Activity| {
                state.insert(activity.clone());
                state.select(&activity.id);
            },
        )
        .await
    }

    // ─── Selection & Form ────────────────────────────────────────────────────

    /// Select the activity with `id`; an unknown id clears the selection.
    pub fn select_activity(&self, id: &str) {
        self.state.send_modify(|state| state.select(id));
    }

    pub fn cancel_selected_activity(&self) {
        self.state.send_modify(|state| state.selected_id = None);
    }

    /// Open the create/edit form.
    ///
    /// With an id the form edits that activity; without one the selection is
    /// cleared so the form starts blank.
    pub fn open_form(&self, id: Option<&str>) {
        self.state.send_modify(|state| {
            match id {
                Some(id) => state.select(id),
                None => state.selected_id = None,
            }
            state.edit_mode = true;
        });
    }

    pub fn close_form(&self) {
        self.state.send_modify(|state| state.edit_mode = false);
    }

    // ─── Mutations ───────────────────────────────────────────────────────────

    /// Create an activity under a freshly generated id.
    ///
    /// On success the new activity is selected and the form closed.
    pub async fn create_activity(&self, draft: ActivityDraft) {
        let activity = draft.into_activity(self.ids.next_id());
        tracing::debug!(id = %activity.id, "Creating activity");

        self.commit_edit("create_activity", self.gateway.create(&activity), &activity)
            .await;
    }

    /// Save changes to an existing activity.
    ///
    /// On failure the previously cached copy stays in the registry.
    pub async fn update_activity(&self, activity: Activity) {
        tracing::debug!(id = %activity.id, "Updating activity");

        self.commit_edit("update_activity", self.gateway.update(&activity), &activity)
            .await;
    }

    /// Delete an activity; the cached entry is only dropped once the API confirms.
    pub async fn delete_activity(&self, id: &str) {
        tracing::debug!(id, "Deleting activity");

        let deleted = self
            .guarded(
                LoadingFlag::Mutation,
                "delete_activity",
                self.gateway.delete(id),
                |state, _: &()| state.remove(id),
            )
            .await;

        if deleted.is_some() {
            tracing::info!(id, "Activity deleted");
        }
    }

    /// Shared success path of create and update.
    async fn commit_edit<F>(&self, operation: &'static str, call: F, activity: &Activity)
    where
        F: Future<Output = Result<(), GatewayError>>,
    {
        let saved = self
            .guarded(LoadingFlag::Mutation, operation, call, |state, _: &()| {
                state.insert(activity.clone());
                state.select(&activity.id);
                state.edit_mode = false;
            })
            .await;

        if saved.is_some() {
            tracing::info!(id = %activity.id, operation, "Activity saved");
        }
    }

    /// Run one gateway call behind a loading flag.
    ///
    /// The flag is raised before the call. When the call settles, the flag is
    /// cleared and `reconcile` applied (success only) in one transition.
    /// Returns the call's value on success, `None` after logging a failure.
    async fn guarded<T, F, R>(
        &self,
        flag: LoadingFlag,
        operation: &'static str,
        call: F,
        reconcile: R,
    ) -> Option<T>
    where
        F: Future<Output = Result<T, GatewayError>>,
        R: FnOnce(&mut StoreState, &T),
    {
        self.state.send_modify(|state| flag.set(state, true));

        match call.await {
            Ok(value) => {
                self.state.send_modify(|state| {
                    reconcile(state, &value);
                    flag.set(state, false);
                });
                Some(value)
            }
            Err(e) => {
                tracing::error!(error = %e, operation, "Activity API call failed");
                self.state.send_modify(|state| flag.set(state, false));
                None
            }
        }
    }
}
