//! Tests for catalog resolution and request-scoped memoization.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use quizmark::{
    CatalogAccessor, CatalogError, Difficulty, Problem, ProblemCatalog, ProblemType, StaticCatalog,
};

/// Catalog wrapper that counts backend fetches.
struct CountingCatalog {
    inner:   StaticCatalog,
    fetches: AtomicUsize,
}

impl CountingCatalog {
    fn new(problems: Vec<Problem>) -> Self {
        Self {
            inner:   StaticCatalog::new(problems),
            fetches: AtomicUsize::new(0),
        }
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProblemCatalog for CountingCatalog {
    async fn fetch(&self, problem_id: &str) -> Result<Problem, CatalogError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(problem_id).await
    }
}

fn problem(id: &str) -> Problem {
    Problem::builder()
        .id(id)
        .kind(ProblemType::ShortAnswer)
        .difficulty(Difficulty::Medium)
        .question("Question text.")
        .answer("zero")
        .build()
}

#[tokio::test]
async fn repeated_resolution_hits_the_backend_once() {
    let catalog = CountingCatalog::new(vec![problem("p1")]);
    let accessor = CatalogAccessor::new(&catalog);

    let first = accessor.resolve("p1").await.expect("resolve");
    let second = accessor.resolve("p1").await.expect("resolve");

    assert_eq!(first.id, second.id);
    assert_eq!(catalog.fetches(), 1);
}

#[tokio::test]
async fn missing_problems_resolve_to_none_and_are_cached() {
    let catalog = CountingCatalog::new(vec![]);
    let accessor = CatalogAccessor::new(&catalog);

    assert!(accessor.resolve("ghost").await.is_none());
    assert!(accessor.resolve("ghost").await.is_none());
    assert_eq!(catalog.fetches(), 1);
}

#[tokio::test]
async fn resolve_many_omits_failures_without_blocking_the_rest() {
    let catalog = CountingCatalog::new(vec![problem("p1"), problem("p2")]);
    let accessor = CatalogAccessor::new(&catalog);

    let resolved = accessor.resolve_many(["p1", "ghost", "p2"]).await;

    assert_eq!(resolved.len(), 2);
    assert!(resolved.contains_key("p1"));
    assert!(resolved.contains_key("p2"));
    assert!(!resolved.contains_key("ghost"));
    assert_eq!(catalog.fetches(), 3);
}

#[tokio::test]
async fn duplicate_ids_collapse_onto_one_lookup() {
    let catalog = CountingCatalog::new(vec![problem("p1")]);
    let accessor = CatalogAccessor::new(&catalog);

    let resolved = accessor.resolve_many(["p1", "p1", "p1"]).await;

    assert_eq!(resolved.len(), 1);
    assert_eq!(catalog.fetches(), 1);
}

#[tokio::test]
async fn a_fresh_accessor_starts_with_a_cold_cache() {
    let catalog = CountingCatalog::new(vec![problem("p1")]);

    {
        let accessor = CatalogAccessor::new(&catalog);
        accessor.resolve("p1").await;
    }
    {
        let accessor = CatalogAccessor::new(&catalog);
        accessor.resolve("p1").await;
    }

    assert_eq!(catalog.fetches(), 2);
}

#[tokio::test]
async fn concurrent_resolution_of_one_id_fetches_once() {
    let catalog = CountingCatalog::new(vec![problem("p1")]);
    let accessor = CatalogAccessor::new(&catalog);

    let (a, b) = tokio::join!(accessor.resolve("p1"), accessor.resolve("p1"));

    assert!(a.is_some());
    assert!(b.is_some());
    assert_eq!(catalog.fetches(), 1);
}
