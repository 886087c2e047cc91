//! Core data model definitions shared across Storefront crates.
#![allow(missing_docs)]

pub use ::chrono;

pub mod auth;
pub mod customer;
pub mod details;
pub mod entity;
pub mod error;
pub mod ids;
pub mod prelude;
pub mod product;
pub mod sale;
pub mod user;

// Intentionally curated re-exports for downstream consumers.
pub use auth::{AuthorizedHeader, BearerKind, BearerToken, ExpirableToken};
pub use customer::Customer;
pub use details::{CustomerDetails, SaleDetails};
pub use entity::{EntityMeta, Indexable, Timestamp};
pub use error::{ModelError, Result as ModelResult};
pub use ids::{CustomerID, ProductID, SaleID, SaleProductID, UserID};
pub use product::{Product, ProductAttribute};
pub use sale::{Sale, SaleProduct, SaleStatus};
pub use user::{PublicUser, User};
