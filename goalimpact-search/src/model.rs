//! Search result types and entity routes

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SearchError};

/// The four searchable domain types
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum EntityType {
    #[serde(alias = "player")]
    Player,
    #[serde(alias = "club")]
    Club,
    #[serde(alias = "competition", alias = "league")]
    #[value(alias = "league")]
    Competition,
    #[serde(alias = "nation")]
    Nation,
}

impl EntityType {
    pub const ALL: [EntityType; 4] = [
        EntityType::Player,
        EntityType::Club,
        EntityType::Competition,
        EntityType::Nation,
    ];

    /// Value sent as the `type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Player => "Player",
            EntityType::Club => "Club",
            EntityType::Competition => "Competition",
            EntityType::Nation => "Nation",
        }
    }

    /// Detail route prefix (competitions live under /leagues)
    pub fn route_prefix(&self) -> &'static str {
        match self {
            EntityType::Player => "/players",
            EntityType::Club => "/clubs",
            EntityType::Competition => "/leagues",
            EntityType::Nation => "/nations",
        }
    }

    /// Heading used when results are grouped by kind
    pub fn group_label(&self) -> &'static str {
        match self {
            EntityType::Player => "Players",
            EntityType::Club => "Clubs",
            EntityType::Competition => "Competitions",
            EntityType::Nation => "Nations",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hit from the search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntityType,
}

impl SearchResult {
    pub fn new(id: i64, name: impl Into<String>, kind: EntityType) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }

    pub fn route(&self) -> Route {
        Route::new(self.kind, self.id)
    }
}

/// Body of `GET /search/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Client-side detail route for an entity, e.g. `/leagues/12`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    pub kind: EntityType,
    pub id: i64,
}

impl Route {
    pub fn new(kind: EntityType, id: i64) -> Self {
        Self { kind, id }
    }

    pub fn path(&self) -> String {
        self.to_string()
    }

    /// Absolute URL of this route under the given site base.
    ///
    /// Joined relative to the base so a site mounted under a path keeps it.
    pub fn url(&self, site: &Url) -> Result<Url> {
        let path = self.path();
        site.join(path.trim_start_matches('/'))
            .map_err(|source| SearchError::invalid_url(path, source))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.route_prefix(), self.id)
    }
}

/// Results of one completed search, stably grouped by entity kind.
///
/// Endpoint order is preserved within a kind; kinds follow
/// Player, Club, Competition, Nation. Indices are shared between
/// the flat and grouped views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<SearchResult>);

impl ResultSet {
    pub fn new(mut results: Vec<SearchResult>) -> Self {
        results.sort_by_key(|r| r.kind);
        Self(results)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SearchResult> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SearchResult> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[SearchResult] {
        &self.0
    }

    /// Contiguous runs of results sharing a kind
    pub fn groups(&self) -> impl Iterator<Item = (EntityType, &[SearchResult])> + '_ {
        self.0
            .chunk_by(|a, b| a.kind == b.kind)
            .map(|chunk| (chunk[0].kind, chunk))
    }
}

impl From<Vec<SearchResult>> for ResultSet {
    fn from(results: Vec<SearchResult>) -> Self {
        Self::new(results)
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a SearchResult;
    type IntoIter = std::slice::Iter<'a, SearchResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
