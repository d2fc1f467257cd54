use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{NewProduct, ProductRecord};

/// Repository trait for Product persistence
///
/// Implementations assign the id and both timestamps on insert. No ordering
/// is promised for `find_all`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every record in the collection
    async fn find_all(&self) -> ProductResult<Vec<ProductRecord>>;

    async fn insert_one(&self, product: NewProduct) -> ProductResult<ProductRecord>;

    /// Insert a batch, returning the stored records in input order
    async fn insert_many(&self, products: Vec<NewProduct>) -> ProductResult<Vec<ProductRecord>>;

    /// Unconditionally delete every record, returning how many went
    async fn delete_all(&self) -> ProductResult<u64>;

    async fn count(&self) -> ProductResult<u64>;

    /// Names of all collections in the backing database
    async fn collection_names(&self) -> ProductResult<Vec<String>>;
}
