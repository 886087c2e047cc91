//! Aggregated read views returned by "get full" lookups.

use crate::customer::Customer;
use crate::sale::{Sale, SaleProduct};
use crate::user::{PublicUser, User};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A customer together with its linked account, password stripped.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CustomerDetails {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub customer: Customer,
    pub user: PublicUser,
}

impl CustomerDetails {
    pub fn new(customer: Customer, user: &User) -> Self {
        Self {
            customer,
            user: user.public(),
        }
    }
}

/// A sale with its line items.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SaleDetails {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub sale: Sale,
    pub products: Vec<SaleProduct>,
}

impl SaleDetails {
    /// Line items whose `sale_id` does not match the sale are dropped.
    pub fn new(sale: Sale, products: Vec<SaleProduct>) -> Self {
        let sale_id = sale.id();
        let products = products
            .into_iter()
            .filter(|line| line.sale_id == sale_id)
            .collect();
        Self { sale, products }
    }

    /// Gross amount of the sale, before tax.
    pub fn total(&self) -> f64 {
        self.products.iter().map(SaleProduct::subtotal).sum()
    }
}
