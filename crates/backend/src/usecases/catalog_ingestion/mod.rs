pub mod executor;
pub mod source_client;
