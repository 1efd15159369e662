// Dataset repository backed by file paths or http(s) URLs
use crate::application::dataset_repository::DatasetRepository;
use crate::domain::dataset::DatasetKind;
use crate::infrastructure::config::DatasetLocations;
use anyhow::{Context, Result};
use async_trait::async_trait;
use flate2::read::GzDecoder;
use std::io::Read;

#[derive(Debug, Clone)]
pub struct LocationRepository {
    locations: DatasetLocations,
    client: reqwest::Client,
}

impl LocationRepository {
    pub fn new(locations: DatasetLocations) -> Self {
        Self {
            locations,
            client: reqwest::Client::new(),
        }
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to request {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!("Download of {} failed with status {}", url, response.status());
        }

        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?;
        Ok(body.to_vec())
    }
}

pub(crate) fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn gunzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoded = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut decoded)
        .context("Failed to decompress gzip data")?;
    Ok(decoded)
}

#[async_trait]
impl DatasetRepository for LocationRepository {
    async fn fetch(&self, kind: DatasetKind) -> Result<Vec<u8>> {
        let location = self.locations.location(kind);
        tracing::info!(dataset = %kind, location, "Fetching dataset");

        let raw = if is_remote(location) {
            self.download(location).await?
        } else {
            tokio::fs::read(location)
                .await
                .with_context(|| format!("Failed to read {}", location))?
        };

        if location.ends_with(".gz") {
            gunzip(&raw)
        } else {
            Ok(raw)
        }
    }
}
