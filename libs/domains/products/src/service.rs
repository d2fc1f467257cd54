//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{CreateProduct, DebugListing, NewProduct, ProductWire, SeedReport};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Holds no state of its own; every call reads or writes the repository.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// All products in wire form, in store order
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<ProductWire>> {
        let records = self.repository.find_all().await?;
        tracing::debug!(count = records.len(), "Found products");

        Ok(records.into_iter().map(ProductWire::from).collect())
    }

    /// Validate and persist one product
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<ProductWire> {
        tracing::debug!(?input, "Creating product");
        let product = NewProduct::try_from(input)?;

        let record = self.repository.insert_one(product).await?;
        tracing::debug!(?record, "Product saved");

        Ok(record.into())
    }

    /// Raw records plus the database's collection names
    #[instrument(skip(self))]
    pub async fn debug_listing(&self) -> ProductResult<DebugListing> {
        let products = self.repository.find_all().await?;
        let collections = self.repository.collection_names().await?;

        Ok(DebugListing::new(products, collections))
    }

    /// Replace the whole collection with `fixtures`.
    ///
    /// Runs strictly in sequence: validate, delete all, insert the batch,
    /// count. A failure stops the sequence; nothing already deleted comes back.
    #[instrument(skip(self, fixtures), fields(fixture_count = fixtures.len()))]
    pub async fn reseed(&self, fixtures: Vec<CreateProduct>) -> ProductResult<SeedReport> {
        let products = fixtures
            .into_iter()
            .map(NewProduct::try_from)
            .collect::<ProductResult<Vec<_>>>()?;

        tracing::info!("Clearing existing products...");
        let deleted = self.repository.delete_all().await?;
        tracing::info!(deleted, "Cleared existing products");

        tracing::info!("Inserting sample products...");
        let inserted = self.repository.insert_many(products).await?;
        tracing::info!("Inserted {} products:", inserted.len());
        for record in &inserted {
            tracing::info!("- {} (ID: {})", record.name, record.id);
        }

        let total = self.repository.count().await?;
        tracing::info!("Total products in database: {}", total);

        Ok(SeedReport {
            deleted,
            inserted,
            total,
        })
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use crate::models::ProductRecord;
    use crate::repository::MockProductRepository;
    use chrono::Utc;
    use mockall::Sequence;

    fn stored(product: NewProduct, id: &str) -> ProductRecord {
        let now = Utc::now();
        ProductRecord {
            id: id.to_string(),
            name: product.name,
            price: product.price,
            description: product.description,
            image: product.image,
            created_at: now,
            updated_at: now,
        }
    }

    fn omega() -> CreateProduct {
        CreateProduct::new("Omega-3", 19.99, "Fish oil", "http://x/y.jpg")
    }

    #[tokio::test]
    async fn test_list_products_maps_to_wire() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_all().times(1).returning(|| {
            Ok(vec![stored(
                NewProduct::try_from(omega()).unwrap(),
                "665f1c2e8b3e4a0012345678",
            )])
        });

        let service = ProductService::new(mock_repo);
        let products = service.list_products().await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "665f1c2e8b3e4a0012345678");
        assert_eq!(products[0].name, "Omega-3");
    }

    #[tokio::test]
    async fn test_list_products_passes_store_error_through() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_all()
            .returning(|| Err(ProductError::Database("cursor killed".into())));

        let service = ProductService::new(mock_repo);
        let err = service.list_products().await.unwrap_err();

        assert_eq!(err.to_string(), "cursor killed");
    }

    #[tokio::test]
    async fn test_create_product_persists_valid_input() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_insert_one()
            .withf(|p| p.name == "Omega-3" && p.price == 19.99)
            .times(1)
            .returning(|p| Ok(stored(p, "665f1c2e8b3e4a0012345679")));

        let service = ProductService::new(mock_repo);
        let product = service.create_product(omega()).await.unwrap();

        assert_eq!(product.id, "665f1c2e8b3e4a0012345679");
        assert_eq!(product.description, "Fish oil");
    }

    #[tokio::test]
    async fn test_create_product_rejects_empty_name_without_writing() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_insert_one().never();

        let service = ProductService::new(mock_repo);
        let input = CreateProduct::new("", 5.0, "x", "y");
        let result = service.create_product(input).await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_debug_listing_counts_products() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_all().returning(|| {
            Ok(vec![
                stored(NewProduct::try_from(omega()).unwrap(), "a"),
                stored(NewProduct::try_from(omega()).unwrap(), "b"),
            ])
        });
        mock_repo
            .expect_collection_names()
            .returning(|| Ok(vec!["products".to_string()]));

        let service = ProductService::new(mock_repo);
        let listing = service.debug_listing().await.unwrap();

        assert_eq!(listing.count, 2);
        assert_eq!(listing.products.len(), listing.count);
        assert_eq!(listing.collections, vec!["products".to_string()]);
    }

    #[tokio::test]
    async fn test_reseed_runs_steps_in_order() {
        let mut seq = Sequence::new();
        let mut mock_repo = MockProductRepository::new();

        mock_repo
            .expect_delete_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(7));
        mock_repo
            .expect_insert_many()
            .withf(|batch| batch.len() == 2)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|batch| {
                Ok(batch
                    .into_iter()
                    .enumerate()
                    .map(|(i, p)| stored(p, &format!("id-{}", i)))
                    .collect())
            });
        mock_repo
            .expect_count()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(2));

        let service = ProductService::new(mock_repo);
        let report = service.reseed(vec![omega(), omega()]).await.unwrap();

        assert_eq!(report.deleted, 7);
        assert_eq!(report.inserted.len(), 2);
        assert_eq!(report.total, 2);
    }

    #[tokio::test]
    async fn test_reseed_with_invalid_fixture_touches_nothing() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_delete_all().never();
        mock_repo.expect_insert_many().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .reseed(vec![omega(), CreateProduct::default()])
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_reseed_stops_after_failed_insert() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_delete_all().returning(|| Ok(4));
        mock_repo
            .expect_insert_many()
            .returning(|_| Err(ProductError::Database("duplicate key".into())));
        mock_repo.expect_count().never();

        let service = ProductService::new(mock_repo);
        let result = service.reseed(vec![omega()]).await;

        assert!(matches!(result, Err(ProductError::Database(_))));
    }
}
