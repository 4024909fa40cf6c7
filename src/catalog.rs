#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Problem catalog access with request-scoped memoization.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use futures::future::join_all;
use postgrest::Postgrest;
use tokio::sync::OnceCell;

use crate::{config, types::Problem};

/// Errors surfaced by problem catalog backends.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// No problem with the requested id exists.
    #[error("problem `{0}` was not found in the catalog")]
    NotFound(String),
    /// The backend store could not be reached or rejected the request.
    #[error("catalog backend error for `{id}`: {message}")]
    Backend {
        /// The problem id whose lookup failed.
        id:      String,
        /// Backend-provided description of the failure.
        message: String,
    },
    /// The backend returned a record this engine could not decode.
    #[error("malformed catalog record for `{id}`: {message}")]
    Malformed {
        /// The problem id whose record failed to decode.
        id:      String,
        /// Decoder-provided description of the failure.
        message: String,
    },
}

/// Backend lookup contract for quiz problems.
#[async_trait]
pub trait ProblemCatalog: Send + Sync {
    /// Fetches the problem with the given id.
    async fn fetch(&self, problem_id: &str) -> Result<Problem, CatalogError>;
}

/// Cached slot for a single problem id. `None` records a failed lookup so it
/// is not retried within the request.
type CacheCell = Arc<OnceCell<Option<Problem>>>;

/// Request-scoped accessor that memoizes catalog lookups per problem id.
///
/// Construct one per grading request and drop it afterwards. The cache is
/// additive-only and never invalidated mid-request; a failed lookup is
/// cached as an absence and not retried.
pub struct CatalogAccessor<'a> {
    /// The backing catalog store.
    catalog: &'a dyn ProblemCatalog,
    /// Per-id memoization cells. The map lock is only held while looking up
    /// or inserting a cell, never across a backend fetch, so lookups for
    /// distinct ids proceed concurrently.
    cells:   Mutex<HashMap<String, CacheCell>>,
}

impl<'a> CatalogAccessor<'a> {
    /// Creates an accessor over the given catalog with an empty cache.
    pub fn new(catalog: &'a dyn ProblemCatalog) -> Self {
        Self {
            catalog,
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Resolves a problem id to its definition.
    ///
    /// Absence and backend failures both surface as `None`; the failure is
    /// logged here so callers can treat `None` uniformly as "cannot grade".
    pub async fn resolve(&self, problem_id: &str) -> Option<Problem> {
        let cell = {
            let mut cells = self.cells.lock().expect("catalog cache poisoned");
            Arc::clone(cells.entry(problem_id.to_owned()).or_default())
        };

        cell.get_or_init(|| async {
            match self.catalog.fetch(problem_id).await {
                Ok(problem) => Some(problem),
                Err(e) => {
                    tracing::warn!(problem_id, "problem lookup failed: {e}");
                    None
                }
            }
        })
        .await
        .clone()
    }

    /// Resolves many problem ids concurrently.
    ///
    /// Failed lookups are consumed independently; the returned map simply
    /// omits them. Duplicate ids collapse onto the same cached lookup.
    pub async fn resolve_many<I, S>(&self, problem_ids: I) -> HashMap<String, Problem>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lookups = problem_ids.into_iter().map(|id| async move {
            let id = id.as_ref();
            self.resolve(id).await.map(|problem| (id.to_owned(), problem))
        });

        join_all(lookups).await.into_iter().flatten().collect()
    }
}

/// In-memory catalog backed by a fixed set of problems.
///
/// Useful for tests and for embedding a small problem bank directly.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    /// Problems keyed by id.
    problems: HashMap<String, Problem>,
}

impl StaticCatalog {
    /// Builds a catalog from an iterator of problems.
    pub fn new<I>(problems: I) -> Self
    where
        I: IntoIterator<Item = Problem>,
    {
        Self {
            problems: problems
                .into_iter()
                .map(|problem| (problem.id.clone(), problem))
                .collect(),
        }
    }
}

#[async_trait]
impl ProblemCatalog for StaticCatalog {
    async fn fetch(&self, problem_id: &str) -> Result<Problem, CatalogError> {
        self.problems
            .get(problem_id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(problem_id.to_owned()))
    }
}

/// Supabase/PostgREST-backed catalog reading from a problems table.
#[derive(Clone)]
pub struct PostgrestCatalog {
    /// PostgREST client pointed at the Supabase project.
    client: Postgrest,
    /// Name of the table holding problem records.
    table:  String,
}

impl PostgrestCatalog {
    /// Creates a catalog over the given PostgREST client and table.
    pub fn new(client: Postgrest, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Creates a catalog over the environment-configured Supabase project
    /// and the default `problems` table; `None` when `SUPABASE_URL` or
    /// `SUPABASE_ANON_KEY` is unset.
    pub fn from_env() -> Option<Self> {
        config::postgrest_client().map(|client| Self::new(client, "problems"))
    }
}

#[async_trait]
impl ProblemCatalog for PostgrestCatalog {
    async fn fetch(&self, problem_id: &str) -> Result<Problem, CatalogError> {
        let response = self
            .client
            .from(&self.table)
            .eq("id", problem_id)
            .select("*")
            .single()
            .execute()
            .await
            .map_err(|e| CatalogError::Backend {
                id:      problem_id.to_owned(),
                message: e.to_string(),
            })?;

        let body = response.text().await.map_err(|e| CatalogError::Backend {
            id:      problem_id.to_owned(),
            message: e.to_string(),
        })?;

        let record: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| CatalogError::Malformed {
                id:      problem_id.to_owned(),
                message: e.to_string(),
            })?;

        // PostgREST reports "zero or many rows" for .single() as an error
        // object with a message field instead of a row.
        if record.get("message").is_some() {
            return Err(CatalogError::NotFound(problem_id.to_owned()));
        }

        serde_json::from_value(record).map_err(|e| CatalogError::Malformed {
            id:      problem_id.to_owned(),
            message: e.to_string(),
        })
    }
}
