// Dataset service - One-time load of the sample tables at start-up
use crate::application::dataset_repository::DatasetRepository;
use crate::domain::dataset::{parse_csv, DatasetKind, Datasets};
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct DatasetService {
    repository: Arc<dyn DatasetRepository>,
}

impl DatasetService {
    pub fn new(repository: Arc<dyn DatasetRepository>) -> Self {
        Self { repository }
    }

    /// Fetch and parse all three tables. Any failure aborts the whole load;
    /// there is no partial-dataset mode.
    pub async fn load_all(&self) -> anyhow::Result<Datasets> {
        let gapminder = self.fetch(DatasetKind::Gapminder).await?;
        let iris = self.fetch(DatasetKind::Iris).await?;
        let tips = self.fetch(DatasetKind::Tips).await?;

        let gapminder = parse_csv(DatasetKind::Gapminder, &gapminder)?;
        let iris = parse_csv(DatasetKind::Iris, &iris)?;
        let tips = parse_csv(DatasetKind::Tips, &tips)?;

        tracing::info!(
            gapminder = gapminder.len(),
            iris = iris.len(),
            tips = tips.len(),
            "Loaded sample datasets"
        );

        Ok(Datasets::new(gapminder, iris, tips)?)
    }

    async fn fetch(&self, kind: DatasetKind) -> anyhow::Result<Vec<u8>> {
        self.repository
            .fetch(kind)
            .await
            .with_context(|| format!("Failed to load {} dataset", kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::fixtures::{GAPMINDER_CSV, IRIS_CSV, TIPS_CSV};
    use async_trait::async_trait;

    /// Serves the fixture tables, optionally leaving one out.
    pub struct InMemoryRepository {
        pub missing: Option<DatasetKind>,
    }

    #[async_trait]
    impl DatasetRepository for InMemoryRepository {
        async fn fetch(&self, kind: DatasetKind) -> anyhow::Result<Vec<u8>> {
            if self.missing == Some(kind) {
                anyhow::bail!("no such table");
            }
            let csv = match kind {
                DatasetKind::Gapminder => GAPMINDER_CSV,
                DatasetKind::Iris => IRIS_CSV,
                DatasetKind::Tips => TIPS_CSV,
            };
            Ok(csv.as_bytes().to_vec())
        }
    }

    #[tokio::test]
    async fn test_load_all() {
        let service = DatasetService::new(Arc::new(InMemoryRepository { missing: None }));
        let datasets = service.load_all().await.unwrap();

        assert_eq!(datasets.gapminder().len(), 6);
        assert_eq!(datasets.iris().len(), 9);
        assert_eq!(datasets.tips().len(), 4);
    }

    #[tokio::test]
    async fn test_missing_table_fails_whole_load() {
        let service = DatasetService::new(Arc::new(InMemoryRepository {
            missing: Some(DatasetKind::Tips),
        }));
        let err = service.load_all().await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to load tips dataset");
    }
}
