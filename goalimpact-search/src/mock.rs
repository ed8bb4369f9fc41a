//! In-memory collaborators for driving widgets without a network
//!
//! `MockBackend` answers per-query scripted responses and can hold a query
//! until released, which is how response races are reproduced.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::client::SearchBackend;
use crate::error::{Result, SearchError};
use crate::model::{EntityType, Route, SearchResult};
use crate::widget::Navigator;

#[derive(Debug, Clone)]
enum Scripted {
    Results(Vec<SearchResult>),
    Status(u16),
}

/// Mock search backend for testing
#[derive(Debug, Default)]
pub struct MockBackend {
    responses: Mutex<HashMap<String, Scripted>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<(String, Option<EntityType>)>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with these results (unscripted queries get an empty list)
    pub fn respond(&self, query: &str, results: Vec<SearchResult>) {
        lock(&self.responses).insert(query.to_string(), Scripted::Results(results));
    }

    /// Answer `query` with a non-success HTTP status
    pub fn fail(&self, query: &str, status: u16) {
        lock(&self.responses).insert(query.to_string(), Scripted::Status(status));
    }

    /// Keep requests for `query` in flight until [`MockBackend::release`]
    pub fn hold(&self, query: &str) {
        lock(&self.gates).insert(query.to_string(), Arc::new(Notify::new()));
    }

    pub fn release(&self, query: &str) {
        if let Some(gate) = lock(&self.gates).remove(query) {
            gate.notify_one();
        }
    }

    /// Every request received so far, in order
    pub fn calls(&self) -> Vec<(String, Option<EntityType>)> {
        lock(&self.calls).clone()
    }

    pub fn queries(&self) -> Vec<String> {
        lock(&self.calls).iter().map(|(q, _)| q.clone()).collect()
    }
}

#[async_trait]
impl SearchBackend for MockBackend {
    async fn search(&self, query: &str, scope: Option<EntityType>) -> Result<Vec<SearchResult>> {
        lock(&self.calls).push((query.to_string(), scope));

        let gate = lock(&self.gates).get(query).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let scripted = lock(&self.responses).get(query).cloned();
        match scripted {
            Some(Scripted::Results(results)) => Ok(results),
            Some(Scripted::Status(status)) => Err(SearchError::status(
                format!("mock://search/?q={query}"),
                status,
            )),
            None => Ok(Vec::new()),
        }
    }
}

/// Navigator that records every route it is asked to push
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<Route> {
        lock(&self.routes).clone()
    }

    pub fn paths(&self) -> Vec<String> {
        lock(&self.routes).iter().map(Route::path).collect()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        lock(&self.routes).push(route);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
