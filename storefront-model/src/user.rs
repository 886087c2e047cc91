use crate::entity::{EntityMeta, Timestamp};
use crate::ids::UserID;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Account able to authenticate against the back end.
///
/// `password` holds the stored hash. It never leaves the service: outward
/// views go through [`User::public`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct User {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub meta: EntityMeta<UserID>,
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(
        id: UserID,
        email: impl Into<String>,
        password: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            meta: EntityMeta::new(id, now),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn id(&self) -> UserID {
        self.meta.id
    }

    pub fn public(&self) -> PublicUser {
        PublicUser {
            meta: self.meta,
            email: self.email.clone(),
        }
    }
}

/// A [`User`] with the password hash stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PublicUser {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub meta: EntityMeta<UserID>,
    pub email: String,
}
