use crate::entity::{EntityMeta, Timestamp};
use crate::ids::ProductID;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Free-form key/value attribute attached to a product (size, colour, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProductAttribute {
    pub key: String,
    pub name: String,
    pub value: String,
}

/// Catalogue item.
///
/// `miscellaneous` is carried with the product but is not part of its search
/// surface.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Product {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub meta: EntityMeta<ProductID>,
    pub name: String,
    pub price: f64,
    pub brand: String,
    pub tax: f64,
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "photoURL",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub photo_url: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub miscellaneous: Vec<ProductAttribute>,
}

impl Product {
    pub fn new(
        id: ProductID,
        name: impl Into<String>,
        brand: impl Into<String>,
        price: f64,
        tax: f64,
        now: Timestamp,
    ) -> Self {
        Self {
            meta: EntityMeta::new(id, now),
            name: name.into(),
            price,
            brand: brand.into(),
            tax,
            photo_url: None,
            miscellaneous: Vec::new(),
        }
    }

    pub fn id(&self) -> ProductID {
        self.meta.id
    }
}
