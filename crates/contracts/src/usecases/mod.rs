pub mod catalog_ingestion;
