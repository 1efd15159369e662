// Dataset domain models - immutable sample tables shared by every request
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Gapminder,
    Iris,
    Tips,
}

impl DatasetKind {
    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::Gapminder => "gapminder",
            DatasetKind::Iris => "iris",
            DatasetKind::Tips => "tips",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("{kind} dataset is not valid CSV: {source}")]
    Csv {
        kind: DatasetKind,
        #[source]
        source: csv::Error,
    },

    #[error("{0} dataset has no rows")]
    Empty(DatasetKind),
}

/// One country in one sampled year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryYear {
    pub country: String,
    pub continent: String,
    pub year: i32,
    #[serde(rename = "lifeExp")]
    pub life_exp: f64,
    pub pop: f64,
    #[serde(rename = "gdpPercap")]
    pub gdp_percap: f64,
    pub iso_alpha: String,
    pub iso_num: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrisSample {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
    pub species: String,
    pub species_id: u8,
}

/// A restaurant bill. `percentage` is not part of the source file and is
/// filled in by [`Datasets::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tip {
    pub total_bill: f64,
    pub tip: f64,
    pub sex: String,
    pub smoker: String,
    pub day: String,
    pub time: String,
    pub size: u32,
    #[serde(skip_deserializing)]
    pub percentage: f64,
}

/// The three loaded tables. Fields are private so nothing can mutate a table
/// once it has been built.
#[derive(Debug)]
pub struct Datasets {
    gapminder: Vec<CountryYear>,
    iris: Vec<IrisSample>,
    tips: Vec<Tip>,
}

impl Datasets {
    pub fn new(
        gapminder: Vec<CountryYear>,
        iris: Vec<IrisSample>,
        mut tips: Vec<Tip>,
    ) -> Result<Self, DatasetError> {
        if gapminder.is_empty() {
            return Err(DatasetError::Empty(DatasetKind::Gapminder));
        }
        if iris.is_empty() {
            return Err(DatasetError::Empty(DatasetKind::Iris));
        }
        if tips.is_empty() {
            return Err(DatasetError::Empty(DatasetKind::Tips));
        }

        for tip in &mut tips {
            tip.percentage = tip.tip / tip.total_bill * 100.0;
        }

        Ok(Self {
            gapminder,
            iris,
            tips,
        })
    }

    pub fn gapminder(&self) -> &[CountryYear] {
        &self.gapminder
    }

    pub fn iris(&self) -> &[IrisSample] {
        &self.iris
    }

    pub fn tips(&self) -> &[Tip] {
        &self.tips
    }
}

/// Parse a headed CSV table into typed rows.
pub fn parse_csv<T: DeserializeOwned>(
    kind: DatasetKind,
    bytes: &[u8],
) -> Result<Vec<T>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|source| DatasetError::Csv { kind, source })
}
