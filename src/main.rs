// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activities client
//!
//! Loads all activities from the configured API into the store and logs
//! the date-grouped view, the same data an activity dashboard renders.

use activities_client::{config::Config, services::HttpAgent, ActivityStore};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(api = %config.api_base_url, "Starting activities client");

    let agent = HttpAgent::new(&config)?;
    let store = ActivityStore::new(Arc::new(agent));

    // Log each published snapshot's loading state while the fetch runs
    let mut updates = store.subscribe();
    let watcher = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let state = updates.borrow_and_update();
            tracing::debug!(
                loading_initial = state.loading_initial,
                activities = state.len(),
                "Store updated"
            );
        }
    });

    store.load_activities().await;

    for group in store.grouped_activities() {
        tracing::info!(date = %group.date, count = group.activities.len(), "Activity group");
        for activity in &group.activities {
            tracing::info!(
                id = %activity.id,
                title = %activity.title,
                category = %activity.category,
                venue = %activity.venue,
                city = %activity.city,
                "Activity"
            );
        }
    }

    drop(store);
    watcher.await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("activities_client=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
