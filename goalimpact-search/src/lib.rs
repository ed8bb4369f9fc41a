//! goalimpact-search - incremental search for the Goal Impact frontend
//!
//! This crate provides:
//! - A headless, debounced search widget with stale-response protection
//! - The search endpoint client (`GET {base}/search/?q=...`)
//! - Entity routes (`/players/{id}`, `/clubs/{id}`, `/leagues/{id}`, `/nations/{id}`)
//! - Configuration loading for the client and widgets
//!
//! ## Architecture
//!
//! ```text
//! keystrokes → SearchWidget ─(debounce)→ SearchBackend::search → ResultSet
//!                   │                                              │
//!            focus / pointer-down                         select(index)
//!                   ▼                                              ▼
//!            dropdown open/closed                       Navigator::navigate(Route)
//! ```

pub mod client;
pub mod config;
pub mod debounce;
pub mod error;
pub mod mock;
pub mod model;
pub mod region;
pub mod widget;

pub use client::{HttpSearchClient, SearchBackend};
pub use config::GoalImpactConfig;
pub use debounce::Debouncer;
pub use error::{Result, SearchError};
pub use model::{EntityType, ResultSet, Route, SearchResponse, SearchResult};
pub use region::{Bounds, Point, Region};
pub use widget::{DropdownView, Navigator, Phase, SearchWidget, WidgetOptions, WidgetState};
