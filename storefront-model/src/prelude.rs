//! Snapshot of the types surface used by search and storage crates.
//! Prefer importing from this module instead of individual tree nodes.

pub use super::customer::Customer;
pub use super::details::{CustomerDetails, SaleDetails};
pub use super::entity::{EntityMeta, Indexable, Timestamp};
pub use super::ids::{CustomerID, ProductID, SaleID, SaleProductID, UserID};
pub use super::product::{Product, ProductAttribute};
pub use super::sale::{Sale, SaleProduct, SaleStatus};
pub use super::user::{PublicUser, User};
