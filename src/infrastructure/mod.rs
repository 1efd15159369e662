// Infrastructure layer - External dependencies and adapters
pub mod chunked_json;
pub mod config;
pub mod dataset_source;
pub mod http_response;
