use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::error::{ProductError, ProductResult};

/// Product record as held by the store.
///
/// This is the raw shape returned by the debug listing: the store id under
/// `_id` plus the `createdAt`/`updatedAt` timestamps the store maintains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductRecord {
    /// Store-assigned identifier (24 hex characters)
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    /// Image URL, not checked for reachability
    pub image: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Product as returned to clients by list and create.
///
/// The store id is exposed as `id`; timestamps are not part of this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductWire {
    #[schema(example = "665f1c2e8b3e4a0012345678")]
    pub id: String,
    #[schema(example = "Creatine Monohydrate")]
    pub name: String,
    #[schema(example = 24.99)]
    pub price: f64,
    pub description: String,
    pub image: String,
}

impl From<ProductRecord> for ProductWire {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            price: record.price,
            description: record.description,
            image: record.image,
        }
    }
}

/// Payload for creating a product.
///
/// Every field is optional at the serde level so a missing field reaches
/// validation and is reported as such instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name must not be empty")
    )]
    #[schema(example = "Omega-3")]
    pub name: Option<String>,

    #[validate(required(message = "price is required"))]
    #[schema(example = 19.99)]
    pub price: Option<f64>,

    #[validate(
        required(message = "description is required"),
        length(min = 1, message = "description must not be empty")
    )]
    #[schema(example = "Fish oil")]
    pub description: Option<String>,

    #[validate(
        required(message = "image is required"),
        length(min = 1, message = "image must not be empty")
    )]
    #[schema(example = "http://x/y.jpg")]
    pub image: Option<String>,
}

impl CreateProduct {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            price: Some(price),
            description: Some(description.into()),
            image: Some(image.into()),
        }
    }
}

/// A product that passed validation and is ready to be written.
///
/// Only obtainable through `TryFrom<CreateProduct>`, so every write path goes
/// through the same required-field check.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image: String,
}

impl TryFrom<CreateProduct> for NewProduct {
    type Error = ProductError;

    fn try_from(input: CreateProduct) -> ProductResult<Self> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(describe(&e)))?;

        match (input.name, input.price, input.description, input.image) {
            (Some(name), Some(price), Some(description), Some(image)) => Ok(Self {
                name,
                price,
                description,
                image,
            }),
            _ => Err(ProductError::Validation(
                "name, price, description and image are required".to_string(),
            )),
        }
    }
}

const FIELD_ORDER: [&str; 4] = ["name", "price", "description", "image"];

/// Flatten validation errors into one message, in field declaration order
fn describe(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();

    FIELD_ORDER
        .iter()
        .filter_map(|field| field_errors.get(*field).map(|errs| (*field, errs)))
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Diagnostic view of the store
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DebugListing {
    /// Raw records, store field names included
    pub products: Vec<ProductRecord>,
    /// Every collection in the database
    pub collections: Vec<String>,
    /// Always `products.len()`
    pub count: usize,
}

impl DebugListing {
    pub fn new(products: Vec<ProductRecord>, collections: Vec<String>) -> Self {
        let count = products.len();
        Self {
            products,
            collections,
            count,
        }
    }
}

/// Outcome of resetting the collection to the fixture set
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub deleted: u64,
    pub inserted: Vec<ProductRecord>,
    pub total: u64,
}
