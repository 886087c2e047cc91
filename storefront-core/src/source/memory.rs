use super::{RecordSource, Visibility};
use crate::error::RecordSourceError;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use storefront_contracts::Searchable;
use storefront_model::prelude::*;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Entities that can carry a soft-delete marker.
pub trait SoftDelete {
    fn mark_deleted(&mut self, now: Timestamp);
}

macro_rules! impl_soft_delete {
    ($($entity:ty),* $(,)?) => {
        $(
            impl SoftDelete for $entity {
                fn mark_deleted(&mut self, now: Timestamp) {
                    self.meta.mark_deleted(now);
                }
            }
        )*
    };
}

impl_soft_delete!(PublicUser, Customer, Product, Sale);

/// `BTreeMap`-backed record source keyed by identity.
///
/// Snapshots are cloned out under a read lock, so evaluation never holds the
/// lock while filtering.
#[derive(Debug)]
pub struct InMemorySource<T> {
    records: RwLock<BTreeMap<u64, T>>,
}

impl<T> Default for InMemorySource<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T: Searchable + Clone> InMemorySource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source from a record set. A repeated identity is rejected
    /// rather than letting the later record shadow the earlier one.
    pub fn from_records(
        records: impl IntoIterator<Item = T>,
    ) -> Result<Self, RecordSourceError> {
        let mut map = BTreeMap::new();
        for record in records {
            let id = record.identity();
            if map.insert(id, record).is_some() {
                warn!("Duplicate {} id {} in record set", T::schema().entity, id);
                return Err(RecordSourceError::DuplicateIdentity {
                    entity: T::schema().entity,
                    id,
                });
            }
        }
        Ok(Self {
            records: RwLock::new(map),
        })
    }

    /// Store a record, returning the previous one with the same identity.
    pub async fn insert(&self, record: T) -> Option<T> {
        self.records.write().await.insert(record.identity(), record)
    }

    pub async fn get(&self, id: u64) -> Option<T> {
        self.records.read().await.get(&id).cloned()
    }

    /// Replace an existing record. Unknown identities are rejected.
    pub async fn replace(&self, record: T) -> Result<T, RecordSourceError> {
        let mut records = self.records.write().await;
        let id = record.identity();
        match records.get_mut(&id) {
            Some(slot) => Ok(std::mem::replace(slot, record)),
            None => Err(RecordSourceError::Unavailable(format!(
                "no {} with id {id}",
                T::schema().entity
            ))),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<T: Searchable + SoftDelete + Clone> InMemorySource<T> {
    /// Mark a record deleted. Returns `false` when the identity is unknown.
    pub async fn soft_delete(&self, id: u64) -> bool {
        let mut records = self.records.write().await;
        match records.get_mut(&id) {
            Some(record) => {
                record.mark_deleted(Utc::now());
                debug!("Soft-deleted {} {}", T::schema().entity, id);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl<T> RecordSource<T> for InMemorySource<T>
where
    T: Searchable + Clone + 'static,
{
    async fn fetch(&self, visibility: Visibility) -> Result<Vec<T>, RecordSourceError> {
        let records = self.records.read().await;
        let snapshot = records
            .values()
            .filter(|record| visibility == Visibility::IncludeDeleted || !record.is_deleted())
            .cloned()
            .collect();
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(id: u64, name: &str) -> Product {
        let now = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap();
        Product::new(ProductID(id), name, "acme", 10.0, 0.1, now)
    }

    #[tokio::test]
    async fn live_fetch_hides_soft_deleted_records() {
        let source =
            InMemorySource::from_records([product(1, "Kettle"), product(2, "Toaster")])
                .unwrap();
        assert!(source.soft_delete(2).await);
        assert!(!source.soft_delete(99).await);

        let live = source.fetch(Visibility::Live).await.unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id(), ProductID(1));

        let all = source.fetch(Visibility::IncludeDeleted).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn repeated_identities_are_rejected() {
        let err = InMemorySource::from_records([
            product(1, "Kettle"),
            product(2, "Toaster"),
            product(1, "Kettle v2"),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            RecordSourceError::DuplicateIdentity {
                entity: "product",
                id: 1
            }
        );
        assert_eq!(err.to_string(), "product id 1 appears more than once");
    }

    #[tokio::test]
    async fn replace_requires_an_existing_record() {
        let source = InMemorySource::new();
        assert!(source.replace(product(5, "Mixer")).await.is_err());

        source.insert(product(5, "Mixer")).await;
        let previous = source.replace(product(5, "Stand Mixer")).await.unwrap();
        assert_eq!(previous.name, "Mixer");
        assert_eq!(source.get(5).await.unwrap().name, "Stand Mixer");
        assert_eq!(source.len().await, 1);
    }
}
