// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use activities_client::error::GatewayError;
use activities_client::models::Activity;
use activities_client::services::{ActivitiesGateway, IdGenerator};
use activities_client::ActivityStore;
use async_trait::async_trait;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory gateway with failure injection and call counting.
#[derive(Default)]
pub struct FakeGateway {
    pub activities: Mutex<Vec<Activity>>,
    /// When set, every call fails with a network error
    pub fail: Mutex<bool>,
    pub calls: AtomicUsize,
    /// Calls wait for this lock, letting a test observe in-flight state
    pub hold: tokio::sync::Mutex<()>,
}

#[allow(dead_code)]
impl FakeGateway {
    pub fn with_activities(activities: Vec<Activity>) -> Self {
        Self {
            activities: Mutex::new(activities),
            ..Default::default()
        }
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn enter(&self) -> Result<(), GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _guard = self.hold.lock().await;
        if *self.fail.lock().unwrap() {
            return Err(GatewayError::Network("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ActivitiesGateway for FakeGateway {
    async fn list(&self) -> Result<Vec<Activity>, GatewayError> {
        self.enter().await?;
        Ok(self.activities.lock().unwrap().clone())
    }

    async fn details(&self, id: &str) -> Result<Activity, GatewayError> {
        self.enter().await?;
        self.activities
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))
    }

    async fn create(&self, activity: &Activity) -> Result<(), GatewayError> {
        self.enter().await?;
        self.activities.lock().unwrap().push(activity.clone());
        Ok(())
    }

    async fn update(&self, activity: &Activity) -> Result<(), GatewayError> {
        self.enter().await?;
        let mut activities = self.activities.lock().unwrap();
        match activities.iter_mut().find(|a| a.id == activity.id) {
            Some(existing) => {
                *existing = activity.clone();
                Ok(())
            }
            None => Err(GatewayError::NotFound(activity.id.clone())),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        self.enter().await?;
        let mut activities = self.activities.lock().unwrap();
        let before = activities.len();
        activities.retain(|a| a.id != id);
        if activities.len() == before {
            return Err(GatewayError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Deterministic ids: `id-1`, `id-2`, ...
#[derive(Default)]
pub struct SequentialIds {
    next: AtomicUsize,
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("id-{}", self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Build an activity fixture.
#[allow(dead_code)]
pub fn activity(id: &str, title: &str, date: &str) -> Activity {
    Activity {
        id: id.to_string(),
        title: title.to_string(),
        date: date.to_string(),
        description: format!("{} description", title),
        category: "travel".to_string(),
        city: "London".to_string(),
        venue: "Somewhere".to_string(),
    }
}

/// Create a store over the given gateway with deterministic ids.
#[allow(dead_code)]
pub fn test_store(gateway: Arc<FakeGateway>) -> ActivityStore {
    ActivityStore::with_id_generator(gateway, Arc::new(SequentialIds::default()))
}

/// JSON log lines written by the store during a test.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[allow(dead_code)]
impl CapturedLogs {
    /// Every recorded event at ERROR level.
    pub fn errors(&self) -> Vec<serde_json::Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter_map(|line| serde_json::from_str::<serde_json::Value>(line).ok())
            .filter(|event| event["level"] == "ERROR")
            .collect()
    }

    /// Whether a failed gateway call was logged for `operation`.
    pub fn has_error_for(&self, operation: &str) -> bool {
        self.errors()
            .iter()
            .any(|event| event["operation"] == operation && event.get("error").is_some())
    }
}

/// Route this thread's tracing events into a buffer until the guard drops.
#[allow(dead_code)]
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(move || writer.clone())
        .finish();

    (logs, tracing::subscriber::set_default(subscriber))
}
