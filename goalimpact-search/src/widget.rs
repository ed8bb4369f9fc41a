//! Debounced incremental search widget
//!
//! Headless state machine behind a search box: keystrokes arm a debounce
//! timer, the timer issues one search for the query current at fire time, and
//! the response is applied only if no newer query has superseded it.
//!
//! ```text
//!  Idle ──non-blank input──▶ Debouncing ──timer──▶ Loading ──ok──▶ Results
//!   ▲                            │                    │
//!   └───blank input / select ────┴────── error ───────┘
//! ```
//!
//! Every query change bumps a generation counter. A fetch carries the
//! generation it was issued under and is discarded on arrival if the widget
//! has moved on. The dropdown may only be open while the trimmed query is
//! non-blank and a search for the current generation is loading or has
//! succeeded; focus reopens it under that same rule.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::SearchBackend;
use crate::config::{SearchConfig, DEFAULT_DEBOUNCE_MS};
use crate::debounce::Debouncer;
use crate::error::Result;
use crate::model::{EntityType, ResultSet, Route, SearchResult};
use crate::region::{Bounds, Point, Region};

/// Receives the route of a selected result
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

impl<F> Navigator for F
where
    F: Fn(Route) + Send + Sync,
{
    fn navigate(&self, route: Route) {
        self(route)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Query blank, or last search failed / was selected from
    #[default]
    Idle,
    /// Timer armed, no request yet
    Debouncing,
    /// Request for the current query in flight
    Loading,
    /// Current query answered (possibly with zero results)
    Results,
}

/// Snapshot of one widget's state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetState {
    pub query: String,
    pub results: ResultSet,
    pub is_open: bool,
    pub is_loading: bool,
    pub phase: Phase,
    pub highlighted: Option<usize>,
}

/// What the dropdown should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownView<'a> {
    Hidden,
    Loading,
    NoResults,
    Results(&'a ResultSet),
}

impl WidgetState {
    pub fn dropdown(&self) -> DropdownView<'_> {
        if !self.is_open {
            DropdownView::Hidden
        } else if self.is_loading {
            DropdownView::Loading
        } else if self.results.is_empty() {
            DropdownView::NoResults
        } else {
            DropdownView::Results(&self.results)
        }
    }

    pub fn highlighted_result(&self) -> Option<&SearchResult> {
        self.highlighted.and_then(|i| self.results.get(i))
    }
}

/// Per-instance settings
#[derive(Debug, Clone)]
pub struct WidgetOptions {
    /// Name used in logs to tell instances apart
    pub label: String,
    pub debounce: Duration,
    /// Adds `type=` to every request
    pub scope: Option<EntityType>,
}

impl WidgetOptions {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            scope: None,
        }
    }

    pub fn from_config(label: impl Into<String>, config: &SearchConfig) -> Self {
        Self::new(label)
            .debounce(config.debounce())
            .scope(config.scope)
    }

    pub fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn scope(mut self, scope: Option<EntityType>) -> Self {
        self.scope = scope;
        self
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: WidgetState,
    generation: u64,
    /// A search for the current generation succeeded
    has_response: bool,
    region: Region,
}

impl Inner {
    fn can_open(&self) -> bool {
        !self.state.query.trim().is_empty() && (self.state.is_loading || self.has_response)
    }

    fn close(&mut self) {
        self.state.is_open = false;
        self.state.highlighted = None;
    }

    /// Move to a new query generation; anything in flight becomes stale
    fn supersede(&mut self, query: String) -> u64 {
        self.state.query = query;
        self.state.is_loading = false;
        self.has_response = false;
        self.generation += 1;
        self.generation
    }
}

struct Shared {
    label: String,
    scope: Option<EntityType>,
    backend: Arc<dyn SearchBackend>,
    navigator: Arc<dyn Navigator>,
    inner: Mutex<Inner>,
    updates: watch::Sender<WidgetState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mutate state, enforce the open rule, publish the snapshot
    fn update<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut inner = self.lock();
        let out = f(&mut inner);
        if inner.state.is_open && !inner.can_open() {
            inner.close();
        }
        self.updates.send_replace(inner.state.clone());
        out
    }

    /// Debounce timer fired for `generation`
    fn fire(self: &Arc<Self>, generation: u64) {
        let query = self.update(|inner| {
            if inner.generation != generation {
                return None;
            }
            inner.state.is_loading = true;
            inner.state.is_open = true;
            inner.state.phase = Phase::Loading;
            Some(inner.state.query.trim().to_string())
        });
        let Some(query) = query else {
            return;
        };

        debug!(widget = %self.label, generation, query = %query, "debounce elapsed, searching");
        let shared = Arc::clone(self);
        tokio::spawn(async move {
            let outcome = shared.backend.search(&query, shared.scope).await;
            shared.resolve(generation, outcome);
        });
    }

    fn resolve(&self, generation: u64, outcome: Result<Vec<SearchResult>>) {
        let summary = match &outcome {
            Ok(results) => Ok(results.len()),
            Err(err) => Err((err.kind(), err.to_string())),
        };

        let applied = self.update(|inner| {
            if inner.generation != generation {
                return false;
            }
            inner.state.is_loading = false;
            inner.state.highlighted = None;
            match outcome {
                Ok(results) => {
                    inner.state.results = ResultSet::new(results);
                    inner.has_response = true;
                    inner.state.is_open = true;
                    inner.state.phase = Phase::Results;
                }
                Err(_) => {
                    inner.state.results = ResultSet::default();
                    inner.has_response = false;
                    inner.state.is_open = false;
                    inner.state.phase = Phase::Idle;
                }
            }
            true
        });

        match (applied, summary) {
            (false, _) => debug!(widget = %self.label, generation, "discarding stale search response"),
            (true, Ok(count)) => debug!(widget = %self.label, generation, count, "search results applied"),
            (true, Err((kind, message))) => {
                warn!(widget = %self.label, generation, kind, error = %message, "search failed")
            }
        }
    }
}

/// One search box. Instances share nothing but the backend they are given.
pub struct SearchWidget {
    shared: Arc<Shared>,
    debouncer: Debouncer,
}

impl SearchWidget {
    pub fn new(
        options: WidgetOptions,
        backend: Arc<dyn SearchBackend>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (updates, _) = watch::channel(WidgetState::default());
        Self {
            shared: Arc::new(Shared {
                label: options.label,
                scope: options.scope,
                backend,
                navigator,
                inner: Mutex::new(Inner::default()),
                updates,
            }),
            debouncer: Debouncer::new(options.debounce),
        }
    }

    pub fn label(&self) -> &str {
        &self.shared.label
    }

    pub fn scope(&self) -> Option<EntityType> {
        self.shared.scope
    }

    pub fn state(&self) -> WidgetState {
        self.shared.lock().state.clone()
    }

    /// Snapshots published after every state change
    pub fn subscribe(&self) -> watch::Receiver<WidgetState> {
        self.shared.updates.subscribe()
    }

    /// The input text changed. Must be called from within a tokio runtime.
    pub fn input(&self, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            self.debouncer.cancel();
            self.shared.update(|inner| {
                inner.supersede(text);
                inner.state.results = ResultSet::default();
                inner.state.phase = Phase::Idle;
                inner.close();
            });
            return;
        }

        let generation = self.shared.update(|inner| {
            let generation = inner.supersede(text);
            inner.state.phase = Phase::Debouncing;
            generation
        });
        let shared = Arc::clone(&self.shared);
        self.debouncer.arm(move || shared.fire(generation));
    }

    /// Explicit clear, same as blanking the input
    pub fn clear(&self) {
        self.input(String::new());
    }

    /// Input gained focus: reopen cached results if the open rule allows
    pub fn focus(&self) {
        self.shared.update(|inner| {
            if inner.can_open() {
                inner.state.is_open = true;
            }
        });
    }

    /// Close the dropdown, keeping query and cached results
    pub fn dismiss(&self) {
        self.shared.update(Inner::close);
    }

    /// Record where the input and dropdown were last drawn
    pub fn set_layout(&self, input: Option<Bounds>, dropdown: Option<Bounds>) {
        self.shared.lock().region = Region { input, dropdown };
    }

    pub fn region(&self) -> Region {
        self.shared.lock().region
    }

    /// A pointer went down somewhere on screen. Closes the dropdown when the
    /// point is outside this widget; returns whether it was inside.
    pub fn pointer_down(&self, point: Point) -> bool {
        self.shared.update(|inner| {
            let inside = inner.region.contains(point, inner.state.is_open);
            if !inside && inner.state.is_open {
                debug!(widget = %self.shared.label, "pointer down outside, closing dropdown");
                inner.close();
            }
            inside
        })
    }

    /// Move the keyboard highlight by `delta` rows, wrapping at either end
    pub fn move_highlight(&self, delta: isize) {
        self.shared.update(|inner| {
            let len = inner.state.results.len();
            if !inner.state.is_open || inner.state.is_loading || len == 0 {
                return;
            }
            // reduce first so the step stays below len and the add cannot overflow
            let step = delta.rem_euclid(len as isize) as usize;
            let next = match inner.state.highlighted {
                Some(current) => (current % len + step) % len,
                None if delta < 0 => len - 1,
                None => 0,
            };
            inner.state.highlighted = Some(next);
        });
    }

    /// Select the highlighted row of the open dropdown
    pub fn select_highlighted(&self) -> Option<Route> {
        let index = {
            let inner = self.shared.lock();
            if !inner.state.is_open {
                return None;
            }
            inner.state.highlighted?
        };
        self.select(index)
    }

    /// Select the result at `index`: navigate to its route, blank the query
    /// and close the dropdown. Cached results are kept but hidden.
    pub fn select(&self, index: usize) -> Option<Route> {
        let route = self.shared.update(|inner| {
            let route = inner.state.results.get(index)?.route();
            inner.supersede(String::new());
            inner.state.phase = Phase::Idle;
            inner.close();
            Some(route)
        })?;
        self.debouncer.cancel();

        info!(widget = %self.shared.label, route = %route, "navigating to search result");
        self.shared.navigator.navigate(route);
        Some(route)
    }
}

impl std::fmt::Debug for SearchWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchWidget")
            .field("label", &self.shared.label)
            .field("scope", &self.shared.scope)
            .field("state", &self.state())
            .finish()
    }
}
