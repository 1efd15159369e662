// Chart specification domain models
use super::dataset::{CountryYear, IrisSample, Tip};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Scatter,
    Scatter3d,
    Choropleth,
    Histogram,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Theme {
    #[serde(rename = "plotly_dark")]
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistFunc {
    Avg,
}

/// Data rows handed to the renderer. Serialized as a plain array of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartRows {
    Gapminder(Vec<CountryYear>),
    Iris(Vec<IrisSample>),
    Tips(Vec<Tip>),
}

impl ChartRows {
    pub fn len(&self) -> usize {
        match self {
            ChartRows::Gapminder(rows) => rows.len(),
            ChartRows::Iris(rows) => rows.len(),
            ChartRows::Tips(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Field bindings for each visual channel. Unused channels are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Encoding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_col: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_frame: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hover_data: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub data: ChartRows,
    pub encoding: Encoding,
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_color: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histfunc: Option<HistFunc>,
    pub template: Theme,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ChartSpec {
    pub fn new(
        kind: ChartKind,
        title: impl Into<String>,
        data: ChartRows,
        encoding: Encoding,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            data,
            encoding,
            labels: BTreeMap::new(),
            range_color: None,
            histfunc: None,
            template: Theme::Dark,
            height: None,
        }
    }

    pub fn with_labels(mut self, labels: BTreeMap<String, String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_range_color(mut self, range: Option<(f64, f64)>) -> Self {
        self.range_color = range;
        self
    }

    pub fn with_histfunc(mut self, histfunc: HistFunc) -> Self {
        self.histfunc = Some(histfunc);
        self
    }
}

/// Result of evaluating a chart slot's rule. `NotYetComputed` tells the
/// renderer to keep whatever it is currently showing.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotUpdate {
    Computed(ChartSpec),
    NotYetComputed,
}

impl SlotUpdate {
    pub fn is_computed(&self) -> bool {
        matches!(self, SlotUpdate::Computed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spec_serializes_rows_and_omits_unused_channels() {
        let rows = vec![IrisSample {
            sepal_length: 5.1,
            sepal_width: 3.5,
            petal_length: 1.4,
            petal_width: 0.2,
            species: "setosa".to_string(),
            species_id: 1,
        }];
        let encoding = Encoding {
            x: Some("sepal_width".to_string()),
            y: Some("petal_width".to_string()),
            color: Some("species".to_string()),
            ..Encoding::default()
        };
        let spec =
            ChartSpec::new(ChartKind::Scatter, "Iris Dataset", ChartRows::Iris(rows), encoding)
                .with_height(1000);

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["kind"], "scatter");
        assert_eq!(value["template"], "plotly_dark");
        assert_eq!(value["height"], 1000);
        assert_eq!(value["data"][0]["species"], "setosa");
        assert_eq!(
            value["encoding"],
            json!({"x": "sepal_width", "y": "petal_width", "color": "species"})
        );
        assert!(value.get("range_color").is_none());
    }
}
