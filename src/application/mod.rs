// Application layer - Use cases over the loaded datasets
pub mod dataset_repository;
pub mod dataset_service;
pub mod page_service;
pub mod router;
pub mod view_update;
