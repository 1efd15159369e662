use crate::domain::dataset::DatasetKind;
use crate::domain::page::PageId;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
    #[serde(default)]
    pub pages: PageSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PageSettings {
    pub enabled: Vec<String>,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            enabled: PageId::ALL.iter().map(|p| p.name().to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetsConfig {
    pub datasets: DatasetLocations,
}

/// Where each table lives: a filesystem path or an http(s) URL, gzipped
/// when it ends in `.gz`.
#[derive(Debug, Deserialize, Clone)]
pub struct DatasetLocations {
    pub gapminder: String,
    pub iris: String,
    pub tips: String,
}

impl DatasetLocations {
    pub fn location(&self, kind: DatasetKind) -> &str {
        match kind {
            DatasetKind::Gapminder => &self.gapminder,
            DatasetKind::Iris => &self.iris,
            DatasetKind::Tips => &self.tips,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn enabled_pages(&self) -> anyhow::Result<Vec<PageId>> {
        self.pages
            .enabled
            .iter()
            .map(|name| {
                PageId::parse(name)
                    .ok_or_else(|| anyhow::anyhow!("Unknown page in [pages] enabled: {}", name))
            })
            .collect()
    }
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_datasets_config() -> anyhow::Result<DatasetsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/datasets"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
