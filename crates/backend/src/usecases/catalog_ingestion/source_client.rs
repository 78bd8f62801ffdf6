use std::time::Duration;

use serde::Deserialize;

use crate::shared::error::AppError;

/// One record of the external catalog snapshot. The rating sub-object is
/// optional; records without one still produce a product.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceRecord {
    pub id: i32,
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub rating: Option<SourceRating>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceRating {
    pub rate: f64,
    pub count: i32,
}

/// HTTP client for the external catalog source.
pub struct CatalogSourceClient {
    client: reqwest::Client,
}

impl CatalogSourceClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Fetch the full snapshot. The client timeout is the only bound on the
    /// call; there is no retry.
    pub async fn fetch_snapshot(&self, url: &str) -> Result<Vec<SourceRecord>, AppError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::InvalidUpstreamData(format!("Failed to fetch catalog source: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Catalog source request failed with status {}: {}", status, body);
            return Err(AppError::InvalidUpstreamData(format!(
                "Catalog source request failed with status {}",
                status
            )));
        }

        let records: Vec<SourceRecord> = response.json().await.map_err(|e| {
            AppError::InvalidUpstreamData(format!("Catalog source returned malformed data: {}", e))
        })?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_without_rating_deserializes() {
        let record: SourceRecord =
            serde_json::from_str(r#"{"id":2,"title":"Pants","price":19.5}"#).unwrap();
        assert_eq!(record.id, 2);
        assert!(record.rating.is_none());
    }

    #[test]
    fn record_with_rating_deserializes() {
        let record: SourceRecord = serde_json::from_str(
            r#"{"id":1,"title":"Shirt","price":9.99,"rating":{"rate":4.2,"count":10}}"#,
        )
        .unwrap();
        let rating = record.rating.unwrap();
        assert_eq!(rating.rate, 4.2);
        assert_eq!(rating.count, 10);
    }
}
