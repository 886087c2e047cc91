use crate::entity::{EntityMeta, Indexable, Timestamp};
use crate::error::ModelError;
use crate::ids::{CustomerID, SaleID, SaleProductID};
use crate::product::Product;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SaleStatus {
    Opened,
    Closed,
    Canceled,
}

impl SaleStatus {
    pub fn all() -> &'static [SaleStatus] {
        use SaleStatus::*;
        &[Opened, Closed, Canceled]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SaleStatus::Opened => "opened",
            SaleStatus::Closed => "closed",
            SaleStatus::Canceled => "canceled",
        }
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SaleStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SaleStatus::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                ModelError::InvalidEntity(format!("unknown sale status '{s}'"))
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sale {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub meta: EntityMeta<SaleID>,
    pub customer_id: CustomerID,
    pub status: SaleStatus,
}

impl Sale {
    pub fn open(id: SaleID, customer_id: CustomerID, now: Timestamp) -> Self {
        Self {
            meta: EntityMeta::new(id, now),
            customer_id,
            status: SaleStatus::Opened,
        }
    }

    pub fn id(&self) -> SaleID {
        self.meta.id
    }
}

/// Line item of a sale.
///
/// Product attributes are copied at the time of sale so later catalogue
/// edits never rewrite history. There is deliberately no way to rebuild a
/// line item from a product once it exists.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SaleProduct {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub index: Indexable<SaleProductID>,
    pub sale_id: SaleID,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub brand: String,
    pub tax: f64,
}

impl SaleProduct {
    pub fn from_product(
        id: SaleProductID,
        sale_id: SaleID,
        product: &Product,
        quantity: u32,
    ) -> Self {
        Self {
            index: Indexable::new(id),
            sale_id,
            name: product.name.clone(),
            price: product.price,
            quantity,
            brand: product.brand.clone(),
            tax: product.tax,
        }
    }

    pub fn id(&self) -> SaleProductID {
        self.index.id
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}
