//! Strongly typed numeric identifiers.
//!
//! Identifiers are assigned by the storage collaborator when a record is
//! created and never change afterwards, so none of these types expose a
//! mutable accessor.

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                $name(id)
            }

            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                $name(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Identifier of a [`crate::User`]
    UserID
);
numeric_id!(
    /// Identifier of a [`crate::Customer`]
    CustomerID
);
numeric_id!(
    /// Identifier of a [`crate::Product`]
    ProductID
);
numeric_id!(
    /// Identifier of a [`crate::Sale`]
    SaleID
);
numeric_id!(
    /// Identifier of a [`crate::SaleProduct`] line item
    SaleProductID
);
