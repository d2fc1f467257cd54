//! In-memory repository shared by the handler tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use chrono::Utc;
use domain_products::{NewProduct, ProductError, ProductRecord, ProductRepository, ProductResult};
use http_body_util::BodyExt;
use mongodb::bson::oid::ObjectId;
use std::sync::{Arc, Mutex};

/// Repository backed by a Vec; clones share the same records
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    records: Arc<Mutex<Vec<ProductRecord>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn store(&self, product: NewProduct) -> ProductRecord {
        let now = Utc::now();
        ProductRecord {
            id: ObjectId::new().to_hex(),
            name: product.name,
            price: product.price,
            description: product.description,
            image: product.image,
            created_at: now,
            updated_at: now,
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<ProductRecord>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn insert_one(&self, product: NewProduct) -> ProductResult<ProductRecord> {
        let record = self.store(product);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn insert_many(&self, products: Vec<NewProduct>) -> ProductResult<Vec<ProductRecord>> {
        let inserted: Vec<_> = products.into_iter().map(|p| self.store(p)).collect();
        self.records.lock().unwrap().extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        let mut records = self.records.lock().unwrap();
        let deleted = records.len() as u64;
        records.clear();
        Ok(deleted)
    }

    async fn count(&self) -> ProductResult<u64> {
        Ok(self.len() as u64)
    }

    async fn collection_names(&self) -> ProductResult<Vec<String>> {
        Ok(vec!["products".to_string()])
    }
}

/// Repository whose every call fails like an unreachable store
pub struct UnavailableProductRepository;

fn unavailable<T>() -> ProductResult<T> {
    Err(ProductError::Connection(
        "Server selection timeout: No available servers".to_string(),
    ))
}

#[async_trait]
impl ProductRepository for UnavailableProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<ProductRecord>> {
        unavailable()
    }

    async fn insert_one(&self, _product: NewProduct) -> ProductResult<ProductRecord> {
        unavailable()
    }

    async fn insert_many(&self, _products: Vec<NewProduct>) -> ProductResult<Vec<ProductRecord>> {
        unavailable()
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        unavailable()
    }

    async fn count(&self) -> ProductResult<u64> {
        unavailable()
    }

    async fn collection_names(&self) -> ProductResult<Vec<String>> {
        unavailable()
    }
}

// Helper to parse JSON response body
pub async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
