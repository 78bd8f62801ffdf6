use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::domain::rating::Rating;

/// Aggregate counters for one ingestion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    pub total_fetched: usize,
    pub products_inserted: usize,
    pub ratings_inserted: usize,
}

/// Full result of an ingestion run: the rows actually inserted into each
/// store plus the summary. Rows skipped as duplicates are not listed, they
/// are only visible as a smaller result size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub products: Vec<Product>,
    pub ratings: Vec<Rating>,
    pub summary: IngestSummary,
}
