//! Searchable implementations for the Storefront entities.
//!
//! Full-text participation per entity:
//! - user: `email`
//! - customer: `name`, `address`, `phone`
//! - product: `name`, `brand`
//! - sale: `status`
//! - sale product: `name`, `brand`
//!
//! Users are searched through [`PublicUser`] so the password hash can never be
//! filtered on, sorted by or returned.

use crate::schema::{EntitySchema, FieldDef};
use crate::searchable::Searchable;
use crate::value::{FieldKind, FieldValue};
use storefront_model::prelude::*;

macro_rules! entity_fields {
    ($($field:expr),* $(,)?) => {
        &[
            FieldDef::required("id", FieldKind::Unsigned),
            FieldDef::required("created", FieldKind::Timestamp),
            FieldDef::required("timestamp", FieldKind::Timestamp),
            $($field),*
        ]
    };
}

const SALE_STATUS_OPTIONS: &[&str] = &["opened", "closed", "canceled"];

static USER_SCHEMA: EntitySchema = EntitySchema {
    entity: "user",
    identity: "id",
    fields: entity_fields![FieldDef::required("email", FieldKind::Text)],
    text_fields: &["email"],
};

static CUSTOMER_SCHEMA: EntitySchema = EntitySchema {
    entity: "customer",
    identity: "id",
    fields: entity_fields![
        FieldDef::optional("user_id", FieldKind::Unsigned),
        FieldDef::required("name", FieldKind::Text),
        FieldDef::optional("address", FieldKind::Text),
        FieldDef::optional("phone", FieldKind::Text),
        FieldDef::optional("birthDate", FieldKind::Date),
        FieldDef::optional("photoURL", FieldKind::Text),
    ],
    text_fields: &["name", "address", "phone"],
};

static PRODUCT_SCHEMA: EntitySchema = EntitySchema {
    entity: "product",
    identity: "id",
    fields: entity_fields![
        FieldDef::required("name", FieldKind::Text),
        FieldDef::required("price", FieldKind::Float),
        FieldDef::required("brand", FieldKind::Text),
        FieldDef::required("tax", FieldKind::Float),
        FieldDef::optional("photoURL", FieldKind::Text),
    ],
    text_fields: &["name", "brand"],
};

static SALE_SCHEMA: EntitySchema = EntitySchema {
    entity: "sale",
    identity: "id",
    fields: entity_fields![
        FieldDef::required("customer_id", FieldKind::Unsigned),
        FieldDef::required("status", FieldKind::Enum(SALE_STATUS_OPTIONS)),
    ],
    text_fields: &["status"],
};

static SALE_PRODUCT_SCHEMA: EntitySchema = EntitySchema {
    entity: "sale_product",
    identity: "id",
    fields: &[
        FieldDef::required("id", FieldKind::Unsigned),
        FieldDef::required("sale_id", FieldKind::Unsigned),
        FieldDef::required("name", FieldKind::Text),
        FieldDef::required("price", FieldKind::Float),
        FieldDef::required("quantity", FieldKind::Integer),
        FieldDef::required("brand", FieldKind::Text),
        FieldDef::required("tax", FieldKind::Float),
    ],
    text_fields: &["name", "brand"],
};

fn baseline<Id: Into<u64> + Copy>(
    meta: &EntityMeta<Id>,
    name: &str,
) -> Option<FieldValue> {
    match name {
        "id" => Some(FieldValue::from(meta.id.into())),
        "created" => Some(FieldValue::Timestamp(meta.created)),
        "timestamp" => Some(FieldValue::Timestamp(meta.timestamp)),
        _ => None,
    }
}

impl Searchable for PublicUser {
    fn schema() -> &'static EntitySchema {
        &USER_SCHEMA
    }

    fn identity(&self) -> u64 {
        self.meta.id.get()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "email" => Some(FieldValue::text(&self.email)),
            _ => baseline(&self.meta, name),
        }
    }

    fn is_deleted(&self) -> bool {
        self.meta.is_deleted()
    }
}

impl Searchable for Customer {
    fn schema() -> &'static EntitySchema {
        &CUSTOMER_SCHEMA
    }

    fn identity(&self) -> u64 {
        self.meta.id.get()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "user_id" => self.user_id.map(|id| FieldValue::from(id.get())),
            "name" => Some(FieldValue::text(&self.name)),
            "address" => self.address.as_deref().map(FieldValue::from),
            "phone" => self.phone.as_deref().map(FieldValue::from),
            "birthDate" => self.birth_date.map(FieldValue::Date),
            "photoURL" => self.photo_url.as_deref().map(FieldValue::from),
            _ => baseline(&self.meta, name),
        }
    }

    fn is_deleted(&self) -> bool {
        self.meta.is_deleted()
    }
}

impl Searchable for Product {
    fn schema() -> &'static EntitySchema {
        &PRODUCT_SCHEMA
    }

    fn identity(&self) -> u64 {
        self.meta.id.get()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::text(&self.name)),
            "price" => Some(FieldValue::float(self.price)),
            "brand" => Some(FieldValue::text(&self.brand)),
            "tax" => Some(FieldValue::float(self.tax)),
            "photoURL" => self.photo_url.as_deref().map(FieldValue::from),
            _ => baseline(&self.meta, name),
        }
    }

    // `miscellaneous` stays out of results.
    fn returns_whole_record() -> bool {
        false
    }

    fn is_deleted(&self) -> bool {
        self.meta.is_deleted()
    }
}

impl Searchable for Sale {
    fn schema() -> &'static EntitySchema {
        &SALE_SCHEMA
    }

    fn identity(&self) -> u64 {
        self.meta.id.get()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "customer_id" => Some(FieldValue::from(self.customer_id.get())),
            "status" => Some(FieldValue::text(self.status.as_str())),
            _ => baseline(&self.meta, name),
        }
    }

    fn is_deleted(&self) -> bool {
        self.meta.is_deleted()
    }
}

// Line items have no timestamps and are never soft-deleted on their own.
impl Searchable for SaleProduct {
    fn schema() -> &'static EntitySchema {
        &SALE_PRODUCT_SCHEMA
    }

    fn identity(&self) -> u64 {
        self.index.id.get()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::from(self.index.id.get())),
            "sale_id" => Some(FieldValue::from(self.sale_id.get())),
            "name" => Some(FieldValue::text(&self.name)),
            "price" => Some(FieldValue::float(self.price)),
            "quantity" => Some(FieldValue::from(self.quantity)),
            "brand" => Some(FieldValue::text(&self.brand)),
            "tax" => Some(FieldValue::float(self.tax)),
            _ => None,
        }
    }
}
