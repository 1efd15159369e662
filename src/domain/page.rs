// Page domain models - pages, their controls and chart slots
use super::fields::{Indicator, IrisField};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const APP_TITLE: &str = "My First Dash App";
pub const NAV_BRAND: &str = "Learning Dash";

pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 2.5;
pub const SLIDER_STEP: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    Home,
    Gapminder,
    Iris,
    Tips,
}

impl PageId {
    /// Navbar order.
    pub const ALL: [PageId; 4] = [PageId::Home, PageId::Gapminder, PageId::Iris, PageId::Tips];

    pub fn path(&self) -> &'static str {
        match self {
            PageId::Home => "/",
            PageId::Gapminder => "/gapminder",
            PageId::Iris => "/iris",
            PageId::Tips => "/tips",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::Gapminder => "gapminder",
            PageId::Iris => "iris",
            PageId::Tips => "tips",
        }
    }

    pub fn nav_label(&self) -> &'static str {
        match self {
            PageId::Home => "Home",
            PageId::Gapminder => "Gap Minder Data",
            PageId::Iris => "Iris Data",
            PageId::Tips => "Tips Data",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn controls(&self) -> Vec<Control> {
        match self {
            PageId::Home | PageId::Tips => Vec::new(),
            PageId::Gapminder => vec![Control::dropdown(
                ControlId::MapChoice,
                Indicator::ALL.iter().map(|i| DropdownOption::new(i.label(), i.field())).collect(),
            )],
            PageId::Iris => {
                let options: Vec<DropdownOption> = IrisField::ALL
                    .iter()
                    .map(|f| DropdownOption::new(f.label(), f.field()))
                    .collect();
                vec![
                    Control::dropdown(ControlId::XChoice, options.clone()),
                    Control::dropdown(ControlId::YChoice, options),
                    Control::range_slider(ControlId::Slider, SLIDER_MIN, SLIDER_MAX, SLIDER_STEP),
                ]
            }
        }
    }

    pub fn slots(&self) -> &'static [SlotId] {
        match self {
            PageId::Home => &[],
            PageId::Gapminder => &[SlotId::GapminderChart],
            PageId::Iris => &[SlotId::IrisChart, SlotId::Iris3dChart],
            PageId::Tips => &[SlotId::TipsHistogram, SlotId::TipsScatter, SlotId::TipsFacets],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlId {
    MapChoice,
    XChoice,
    YChoice,
    Slider,
}

impl ControlId {
    pub fn name(&self) -> &'static str {
        match self {
            ControlId::MapChoice => "mapchoice",
            ControlId::XChoice => "xchoice",
            ControlId::YChoice => "ychoice",
            ControlId::Slider => "slider",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotId {
    GapminderChart,
    IrisChart,
    #[serde(rename = "iris_3d_chart")]
    Iris3dChart,
    TipsHistogram,
    TipsScatter,
    TipsFacets,
}

/// Current value of a control as sent by the browser: `null`, a dropdown
/// value, or a `[low, high]` slider range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Unset,
    Choice(String),
    Range(f64, f64),
}

static UNSET: ControlValue = ControlValue::Unset;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ControlValues(HashMap<ControlId, ControlValue>);

impl ControlValues {
    pub fn with(mut self, id: ControlId, value: ControlValue) -> Self {
        self.0.insert(id, value);
        self
    }

    /// Missing controls read as unset.
    pub fn get(&self, id: ControlId) -> &ControlValue {
        self.0.get(&id).unwrap_or(&UNSET)
    }

    /// Initial values for every control a page declares.
    pub fn initial(controls: &[Control]) -> Self {
        controls
            .iter()
            .fold(Self::default(), |values, c| values.with(c.id, c.initial_value()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

impl DropdownOption {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlKind {
    Dropdown { options: Vec<DropdownOption> },
    RangeSlider { min: f64, max: f64, step: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Control {
    pub id: ControlId,
    #[serde(flatten)]
    pub kind: ControlKind,
    pub value: ControlValue,
}

impl Control {
    pub fn dropdown(id: ControlId, options: Vec<DropdownOption>) -> Self {
        Self {
            id,
            kind: ControlKind::Dropdown { options },
            value: ControlValue::Unset,
        }
    }

    pub fn range_slider(id: ControlId, min: f64, max: f64, step: f64) -> Self {
        Self {
            id,
            kind: ControlKind::RangeSlider { min, max, step },
            value: ControlValue::Range(min, max),
        }
    }

    pub fn initial_value(&self) -> ControlValue {
        self.value.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Navbar {
    pub brand: String,
    pub brand_href: String,
    pub links: Vec<NavLink>,
}

impl Navbar {
    /// Links for `enabled` pages in navbar order, with `current` marked active.
    pub fn new(enabled: &[PageId], current: PageId) -> Self {
        let links = PageId::ALL
            .iter()
            .filter(|p| enabled.contains(p))
            .map(|p| NavLink {
                label: p.nav_label().to_string(),
                href: p.path().to_string(),
                active: *p == current,
            })
            .collect();

        Self {
            brand: NAV_BRAND.to_string(),
            brand_href: PageId::Home.path().to_string(),
            links,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageContent {
    Landing { heading: String, body: String },
    Dashboard { controls: Vec<Control> },
}

impl PageContent {
    pub fn for_page(page: PageId) -> Self {
        match page {
            PageId::Home => PageContent::Landing {
                heading: "Hello Dash!".to_string(),
                body: "This is our First Dash App!".to_string(),
            },
            _ => PageContent::Dashboard {
                controls: page.controls(),
            },
        }
    }
}
