//! Record source port and the in-memory reference implementation.

mod memory;

pub use memory::{InMemorySource, SoftDelete};

use crate::error::RecordSourceError;
use async_trait::async_trait;
use std::sync::Arc;

/// Which records a source hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Soft-deleted records are excluded.
    #[default]
    Live,
    /// Everything, including soft-deleted records. Administrative use only;
    /// search evaluation never asks for this.
    IncludeDeleted,
}

/// Snapshot port implemented by the storage collaborator.
///
/// A single `fetch` is the only suspension point in a search. Retry policy
/// belongs to the implementation; errors are surfaced to callers unchanged.
#[async_trait]
pub trait RecordSource<T>: Send + Sync {
    async fn fetch(&self, visibility: Visibility) -> Result<Vec<T>, RecordSourceError>;
}

#[async_trait]
impl<T, S> RecordSource<T> for Arc<S>
where
    T: Send + 'static,
    S: RecordSource<T> + ?Sized,
{
    async fn fetch(&self, visibility: Visibility) -> Result<Vec<T>, RecordSourceError> {
        self.as_ref().fetch(visibility).await
    }
}
