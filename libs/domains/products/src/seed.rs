//! Sample catalog used to reset the collection for development and demos.

use crate::error::ProductResult;
use crate::models::{CreateProduct, SeedReport};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// (name, price, description, image)
pub const FIXTURES: [(&str, f64, &str, &str); 4] = [
    (
        "Whey Protein Premium",
        49.99,
        "High-quality whey protein powder for muscle building and recovery",
        "https://cdn.pixabay.com/photo/2017/05/12/08/29/fitness-2306845_1280.jpg",
    ),
    (
        "Creatine Monohydrate",
        24.99,
        "Pure creatine monohydrate for enhanced strength and power",
        "https://cdn.pixabay.com/photo/2017/08/25/15/10/fitness-2680747_1280.jpg",
    ),
    (
        "BCAA Energy Blend",
        34.99,
        "Branched-chain amino acids with natural caffeine for workout energy",
        "https://cdn.pixabay.com/photo/2016/11/19/12/49/dumbbell-1839997_1280.jpg",
    ),
    (
        "Pre-Workout Formula",
        39.99,
        "Advanced pre-workout supplement for maximum performance",
        "https://cdn.pixabay.com/photo/2017/08/07/14/02/people-2604149_1280.jpg",
    ),
];

pub fn sample_products() -> Vec<CreateProduct> {
    FIXTURES
        .iter()
        .map(|(name, price, description, image)| {
            CreateProduct::new(*name, *price, *description, *image)
        })
        .collect()
}

/// Reset the collection to [`FIXTURES`]
pub async fn seed<R: ProductRepository>(service: &ProductService<R>) -> ProductResult<SeedReport> {
    service.reseed(sample_products()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewProduct;

    #[test]
    fn test_every_fixture_passes_validation() {
        for input in sample_products() {
            assert!(NewProduct::try_from(input).is_ok());
        }
    }

    #[test]
    fn test_fixture_names_are_distinct() {
        let mut names: Vec<_> = FIXTURES.iter().map(|f| f.0).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FIXTURES.len());
    }
}
