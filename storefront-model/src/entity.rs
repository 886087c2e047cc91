//! Structural baseline shared by every stored record.

use chrono::{DateTime, Utc};

pub type Timestamp = DateTime<Utc>;

/// Identity-only baseline for records that are not independently
/// timestamped (sale line items).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Indexable<Id> {
    pub id: Id,
}

impl<Id> Indexable<Id> {
    pub fn new(id: Id) -> Self {
        Self { id }
    }
}

/// Identity, timestamps and soft-delete marker.
///
/// `created` is written once. `timestamp` moves forward on every mutation and
/// `deleted` is only ever set, never cleared: a soft-deleted record stays
/// deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityMeta<Id> {
    pub id: Id,
    pub created: Timestamp,
    pub timestamp: Timestamp,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub deleted: Option<Timestamp>,
}

impl<Id> EntityMeta<Id> {
    pub fn new(id: Id, now: Timestamp) -> Self {
        Self {
            id,
            created: now,
            timestamp: now,
            deleted: None,
        }
    }

    /// Record a mutation.
    pub fn touch(&mut self, now: Timestamp) {
        if now > self.timestamp {
            self.timestamp = now;
        }
    }

    /// Mark the record soft-deleted. Repeated calls keep the first deletion
    /// time.
    pub fn mark_deleted(&mut self, now: Timestamp) {
        if self.deleted.is_none() {
            self.deleted = Some(now);
            self.touch(now);
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted.is_some()
    }
}
