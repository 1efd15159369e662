// Repository trait for sample dataset access
use crate::domain::dataset::DatasetKind;
use async_trait::async_trait;

#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// Raw CSV bytes for a dataset, already decompressed
    async fn fetch(&self, kind: DatasetKind) -> anyhow::Result<Vec<u8>>;
}
