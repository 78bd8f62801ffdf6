use std::time::Duration;

use contracts::domain::product::CreateProductDto;
use contracts::domain::rating::CreateRatingDto;
use contracts::usecases::catalog_ingestion::{IngestReport, IngestSummary};

use super::source_client::{CatalogSourceClient, SourceRecord};
use crate::domain::{product, rating};
use crate::shared::config;
use crate::shared::error::AppError;

/// Pull a snapshot from the external catalog source and reconcile it into
/// both stores via conflict-skip bulk inserts.
///
/// The two writes are sequential and uncoordinated: if the rating insert
/// fails the product rows stay committed and the run as a whole fails.
/// Re-running against an unchanged snapshot inserts nothing (first-write-wins
/// on product_id in both streams).
pub async fn run() -> Result<IngestReport, AppError> {
    let ingestion = &config::get().ingestion;
    let source_url = ingestion
        .source_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            AppError::InvalidConfiguration("Ingestion source_url is not configured".into())
        })?;

    tracing::info!("Fetching products from {}", source_url);
    let client = CatalogSourceClient::new(Duration::from_secs(ingestion.fetch_timeout_secs));
    let fetched = client.fetch_snapshot(source_url).await?;

    if fetched.is_empty() {
        return Err(AppError::InvalidUpstreamData(
            "No products found from catalog source".into(),
        ));
    }

    let product_candidates: Vec<CreateProductDto> = fetched.iter().map(map_product).collect();
    let rating_candidates: Vec<CreateRatingDto> =
        fetched.iter().filter_map(map_rating).collect();

    let products = product::repository::bulk_insert(product_candidates).await?;
    let ratings = rating::service::bulk_create(rating_candidates).await?;

    let summary = IngestSummary {
        total_fetched: fetched.len(),
        products_inserted: products.len(),
        ratings_inserted: ratings.len(),
    };
    tracing::info!(
        "Ingestion completed: fetched={}, products inserted={}, ratings inserted={}",
        summary.total_fetched,
        summary.products_inserted,
        summary.ratings_inserted
    );

    Ok(IngestReport {
        products,
        ratings,
        summary,
    })
}

fn map_product(record: &SourceRecord) -> CreateProductDto {
    CreateProductDto {
        product_id: record.id,
        name: record.title.clone(),
        price: record.price,
    }
}

/// Records without a rating sub-object are skipped for the rating stream.
fn map_rating(record: &SourceRecord) -> Option<CreateRatingDto> {
    record.rating.as_ref().map(|r| CreateRatingDto {
        product_id: record.id,
        rate: r.rate,
        count: r.count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::catalog_ingestion::source_client::SourceRating;

    #[test]
    fn record_maps_to_product_and_rating_candidates() {
        let record = SourceRecord {
            id: 1,
            title: "Shirt".into(),
            price: 9.99,
            rating: Some(SourceRating {
                rate: 4.2,
                count: 10,
            }),
        };

        let product = map_product(&record);
        assert_eq!(product.product_id, 1);
        assert_eq!(product.name, "Shirt");
        assert_eq!(product.price, 9.99);

        let rating = map_rating(&record).unwrap();
        assert_eq!(rating.product_id, 1);
        assert_eq!(rating.rate, 4.2);
        assert_eq!(rating.count, 10);
    }

    #[test]
    fn record_without_rating_is_skipped_for_rating_stream() {
        let record = SourceRecord {
            id: 2,
            title: "Pants".into(),
            price: 19.5,
            rating: None,
        };
        assert!(map_rating(&record).is_none());
    }
}
