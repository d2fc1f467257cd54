//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime as BsonDateTime},
    Collection, Database,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, ProductRecord};
use crate::repository::ProductRepository;

pub const PRODUCTS_COLLECTION: &str = "products";

/// Stored document shape
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    price: f64,
    description: String,
    image: String,
    #[serde(rename = "createdAt")]
    created_at: BsonDateTime,
    #[serde(rename = "updatedAt")]
    updated_at: BsonDateTime,
}

impl ProductDocument {
    fn new(product: NewProduct) -> Self {
        let now = BsonDateTime::now();
        Self {
            id: ObjectId::new(),
            name: product.name,
            price: product.price,
            description: product.description,
            image: product.image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Map to the domain record; the id becomes its hex string
    fn into_record(self) -> ProductResult<ProductRecord> {
        Ok(ProductRecord {
            created_at: to_chrono(self.created_at)?,
            updated_at: to_chrono(self.updated_at)?,
            id: self.id.to_hex(),
            name: self.name,
            price: self.price,
            description: self.description,
            image: self.image,
        })
    }
}

/// BSON dates span a wider range than chrono; out-of-range values are an error
fn to_chrono(dt: BsonDateTime) -> ProductResult<DateTime<Utc>> {
    let millis = dt.timestamp_millis();
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| ProductError::Database(format!("timestamp out of range: {} ms", millis)))
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    db: Database,
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, PRODUCTS_COLLECTION)
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            db: db.clone(),
            collection: db.collection::<ProductDocument>(collection_name),
        }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<Vec<ProductRecord>> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        documents.into_iter().map(ProductDocument::into_record).collect()
    }

    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn insert_one(&self, product: NewProduct) -> ProductResult<ProductRecord> {
        let document = ProductDocument::new(product);

        self.collection.insert_one(&document).await?;

        tracing::info!(product_id = %document.id, "Product created successfully");
        document.into_record()
    }

    #[instrument(skip(self, products), fields(batch_size = products.len()))]
    async fn insert_many(&self, products: Vec<NewProduct>) -> ProductResult<Vec<ProductRecord>> {
        // The server rejects an empty batch
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let documents: Vec<ProductDocument> =
            products.into_iter().map(ProductDocument::new).collect();

        self.collection.insert_many(&documents).await?;

        documents.into_iter().map(ProductDocument::into_record).collect()
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> ProductResult<u64> {
        let result = self.collection.delete_many(doc! {}).await?;
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> ProductResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn collection_names(&self) -> ProductResult<Vec<String>> {
        let names = self.db.list_collection_names().await?;
        Ok(names)
    }
}
