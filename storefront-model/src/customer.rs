use crate::entity::{EntityMeta, Timestamp};
use crate::ids::{CustomerID, UserID};
use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A buyer, optionally linked to a login account.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Customer {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub meta: EntityMeta<CustomerID>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub user_id: Option<UserID>,
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub address: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub phone: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "birthDate",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub birth_date: Option<NaiveDate>,
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "photoURL",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub photo_url: Option<String>,
}

impl Customer {
    pub fn new(id: CustomerID, name: impl Into<String>, now: Timestamp) -> Self {
        Self {
            meta: EntityMeta::new(id, now),
            user_id: None,
            name: name.into(),
            address: None,
            phone: None,
            birth_date: None,
            photo_url: None,
        }
    }

    pub fn id(&self) -> CustomerID {
        self.meta.id
    }

    pub fn with_user(mut self, user_id: UserID) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }
}
