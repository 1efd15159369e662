// Field vocabularies - raw column identifiers and their display labels
use super::dataset::CountryYear;
use std::collections::BTreeMap;

/// Gapminder indicator offered by the `mapchoice` dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    GdpPercap,
    LifeExp,
    Pop,
}

impl Indicator {
    /// Dropdown order.
    pub const ALL: [Indicator; 3] = [Indicator::GdpPercap, Indicator::LifeExp, Indicator::Pop];

    pub fn field(&self) -> &'static str {
        match self {
            Indicator::GdpPercap => "gdpPercap",
            Indicator::LifeExp => "lifeExp",
            Indicator::Pop => "pop",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Indicator::GdpPercap => "GDP Per Capita",
            Indicator::LifeExp => "Life Expectancy",
            Indicator::Pop => "Population",
        }
    }

    pub fn parse(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.field() == field)
    }

    pub fn value(&self, row: &CountryYear) -> f64 {
        match self {
            Indicator::GdpPercap => row.gdp_percap,
            Indicator::LifeExp => row.life_exp,
            Indicator::Pop => row.pop,
        }
    }

    /// Global (min, max) of this indicator over `rows`, `None` when empty.
    pub fn range(&self, rows: &[CountryYear]) -> Option<(f64, f64)> {
        rows.iter().map(|r| self.value(r)).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    pub fn labels() -> BTreeMap<String, String> {
        Self::ALL
            .iter()
            .map(|i| (i.field().to_string(), i.label().to_string()))
            .collect()
    }
}

/// Iris measurement offered by the `xchoice`/`ychoice` dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrisField {
    SepalWidth,
    SepalLength,
    PetalWidth,
    PetalLength,
}

impl IrisField {
    /// Dropdown order.
    pub const ALL: [IrisField; 4] = [
        IrisField::SepalWidth,
        IrisField::SepalLength,
        IrisField::PetalWidth,
        IrisField::PetalLength,
    ];

    pub fn field(&self) -> &'static str {
        match self {
            IrisField::SepalWidth => "sepal_width",
            IrisField::SepalLength => "sepal_length",
            IrisField::PetalWidth => "petal_width",
            IrisField::PetalLength => "petal_length",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IrisField::SepalWidth => "Sepal Width",
            IrisField::SepalLength => "Sepal Length",
            IrisField::PetalWidth => "Petal Width",
            IrisField::PetalLength => "Petal Length",
        }
    }

    pub fn parse(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.field() == field)
    }

    /// Measurement labels plus the species legend title.
    pub fn labels() -> BTreeMap<String, String> {
        let mut labels: BTreeMap<String, String> = Self::ALL
            .iter()
            .map(|f| (f.field().to_string(), f.label().to_string()))
            .collect();
        labels.insert("species".to_string(), "Species".to_string());
        labels
    }
}

pub fn tips_labels() -> BTreeMap<String, String> {
    [
        ("total_bill", "Total Bill"),
        ("tip", "Tip"),
        ("percentage", "Tip Percentage"),
        ("size", "Party Size"),
        ("sex", "Sex"),
        ("day", "Day"),
        ("time", "Time of Day"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
