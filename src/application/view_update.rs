// View-update engine - Recomputes chart slots from control values
use crate::domain::chart::{ChartKind, ChartRows, ChartSpec, Encoding, HistFunc, SlotUpdate};
use crate::domain::dataset::Datasets;
use crate::domain::fields::{tips_labels, Indicator, IrisField};
use crate::domain::page::{ControlId, ControlValue, ControlValues, SlotId, SLIDER_MAX, SLIDER_MIN};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

const CHART_HEIGHT: u32 = 1000;
const GAPMINDER_YEARS: &str = "1952-2007";

#[derive(Debug, Error, PartialEq)]
pub enum UpdateError {
    #[error("invalid value for {}: {reason}", .control.name())]
    InvalidValue { control: ControlId, reason: String },

    #[error("no update rule is bound to {0:?}")]
    UnboundSlot(SlotId),
}

type Rule = fn(&Datasets, &ControlValues) -> Result<SlotUpdate, UpdateError>;

pub enum Binding {
    /// Recomputed whenever one of `inputs` changes.
    Reactive { inputs: &'static [ControlId], rule: Rule },
    /// Built once when the engine is constructed.
    Static { build: fn(&Datasets) -> ChartSpec },
}

pub struct SlotBinding {
    pub slot: SlotId,
    pub binding: Binding,
}

impl SlotBinding {
    pub fn inputs(&self) -> &'static [ControlId] {
        match self.binding {
            Binding::Reactive { inputs, .. } => inputs,
            Binding::Static { .. } => &[],
        }
    }
}

pub const BINDINGS: &[SlotBinding] = &[
    SlotBinding {
        slot: SlotId::GapminderChart,
        binding: Binding::Reactive {
            inputs: &[ControlId::MapChoice],
            rule: gapminder_rule,
        },
    },
    SlotBinding {
        slot: SlotId::IrisChart,
        binding: Binding::Reactive {
            inputs: &[ControlId::XChoice, ControlId::YChoice],
            rule: iris_scatter_rule,
        },
    },
    SlotBinding {
        slot: SlotId::Iris3dChart,
        binding: Binding::Reactive {
            inputs: &[ControlId::Slider],
            rule: iris_3d_rule,
        },
    },
    SlotBinding {
        slot: SlotId::TipsHistogram,
        binding: Binding::Static { build: tips_histogram },
    },
    SlotBinding {
        slot: SlotId::TipsScatter,
        binding: Binding::Static { build: tips_scatter },
    },
    SlotBinding {
        slot: SlotId::TipsFacets,
        binding: Binding::Static { build: tips_facets },
    },
];

pub fn binding_for(slot: SlotId) -> Option<&'static SlotBinding> {
    BINDINGS.iter().find(|b| b.slot == slot)
}

/// Stateless after construction: the datasets are shared read-only and the
/// static tips charts are built once up front.
#[derive(Clone)]
pub struct ViewUpdateEngine {
    datasets: Arc<Datasets>,
    precomputed: Arc<HashMap<SlotId, ChartSpec>>,
}

impl ViewUpdateEngine {
    pub fn new(datasets: Arc<Datasets>) -> Self {
        let precomputed = BINDINGS
            .iter()
            .filter_map(|b| match b.binding {
                Binding::Static { build } => Some((b.slot, build(&datasets))),
                Binding::Reactive { .. } => None,
            })
            .collect();

        Self {
            datasets,
            precomputed: Arc::new(precomputed),
        }
    }

    pub fn compute(&self, slot: SlotId, values: &ControlValues) -> Result<SlotUpdate, UpdateError> {
        let binding = binding_for(slot).ok_or(UpdateError::UnboundSlot(slot))?;

        let update = match binding.binding {
            Binding::Reactive { rule, .. } => rule(&self.datasets, values)?,
            Binding::Static { .. } => self
                .precomputed
                .get(&slot)
                .cloned()
                .map(SlotUpdate::Computed)
                .ok_or(UpdateError::UnboundSlot(slot))?,
        };

        tracing::debug!(?slot, computed = update.is_computed(), "Evaluated chart slot");
        Ok(update)
    }

    /// Re-evaluate every slot bound to `changed`, in binding-table order.
    pub fn on_control_change(
        &self,
        changed: ControlId,
        values: &ControlValues,
    ) -> Result<Vec<(SlotId, SlotUpdate)>, UpdateError> {
        BINDINGS
            .iter()
            .filter(|b| b.inputs().contains(&changed))
            .map(|b| self.compute(b.slot, values).map(|update| (b.slot, update)))
            .collect()
    }
}

fn choice<T>(
    values: &ControlValues,
    control: ControlId,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, UpdateError> {
    match values.get(control) {
        ControlValue::Unset => Ok(None),
        ControlValue::Choice(value) => {
            parse(value)
                .map(Some)
                .ok_or_else(|| UpdateError::InvalidValue {
                    control,
                    reason: format!("unknown option {:?}", value),
                })
        }
        ControlValue::Range(..) => Err(UpdateError::InvalidValue {
            control,
            reason: "expected a single option, got a range".to_string(),
        }),
    }
}

fn slider_range(values: &ControlValues) -> Result<(f64, f64), UpdateError> {
    let control = ControlId::Slider;
    match values.get(control) {
        ControlValue::Unset => Ok((SLIDER_MIN, SLIDER_MAX)),
        ControlValue::Range(low, high) if low.is_finite() && high.is_finite() => Ok((*low, *high)),
        ControlValue::Range(..) => Err(UpdateError::InvalidValue {
            control,
            reason: "range bounds must be finite".to_string(),
        }),
        ControlValue::Choice(_) => Err(UpdateError::InvalidValue {
            control,
            reason: "expected a [low, high] range".to_string(),
        }),
    }
}

fn gapminder_rule(datasets: &Datasets, values: &ControlValues) -> Result<SlotUpdate, UpdateError> {
    // Unlike the iris dropdowns, a missing indicator falls back to a default.
    let indicator =
        choice(values, ControlId::MapChoice, Indicator::parse)?.unwrap_or(Indicator::GdpPercap);
    Ok(SlotUpdate::Computed(gapminder_choropleth(datasets, indicator)))
}

fn iris_scatter_rule(
    datasets: &Datasets,
    values: &ControlValues,
) -> Result<SlotUpdate, UpdateError> {
    let x = choice(values, ControlId::XChoice, IrisField::parse)?;
    let y = choice(values, ControlId::YChoice, IrisField::parse)?;

    Ok(match (x, y) {
        (Some(x), Some(y)) => SlotUpdate::Computed(iris_scatter(datasets, x, y)),
        _ => SlotUpdate::NotYetComputed,
    })
}

fn iris_3d_rule(datasets: &Datasets, values: &ControlValues) -> Result<SlotUpdate, UpdateError> {
    let range = slider_range(values)?;
    let spec = iris_3d(datasets, range);
    if spec.data.is_empty() {
        tracing::debug!(?range, "No iris samples inside the slider range");
    }
    Ok(SlotUpdate::Computed(spec))
}

pub fn gapminder_choropleth(datasets: &Datasets, indicator: Indicator) -> ChartSpec {
    let rows = datasets.gapminder();
    let encoding = Encoding {
        locations: Some("iso_alpha".to_string()),
        color: Some(indicator.field().to_string()),
        animation_frame: Some("year".to_string()),
        hover_name: Some("country".to_string()),
        ..Encoding::default()
    };
    let title = format!("{} {} by Country", indicator.label(), GAPMINDER_YEARS);

    ChartSpec::new(ChartKind::Choropleth, title, ChartRows::Gapminder(rows.to_vec()), encoding)
        .with_labels(Indicator::labels())
        .with_range_color(indicator.range(rows))
        .with_height(CHART_HEIGHT)
}

pub fn iris_scatter(datasets: &Datasets, x: IrisField, y: IrisField) -> ChartSpec {
    let encoding = Encoding {
        x: Some(x.field().to_string()),
        y: Some(y.field().to_string()),
        color: Some("species".to_string()),
        ..Encoding::default()
    };

    let rows = ChartRows::Iris(datasets.iris().to_vec());

    ChartSpec::new(ChartKind::Scatter, "Iris Dataset", rows, encoding)
        .with_labels(IrisField::labels())
        .with_height(CHART_HEIGHT)
}

/// Samples with `low < petal_width < high`; both bounds are excluded.
pub fn iris_3d(datasets: &Datasets, (low, high): (f64, f64)) -> ChartSpec {
    let rows = datasets
        .iris()
        .iter()
        .filter(|s| low < s.petal_width && s.petal_width < high)
        .cloned()
        .collect();
    let encoding = Encoding {
        x: Some(IrisField::SepalLength.field().to_string()),
        y: Some(IrisField::SepalWidth.field().to_string()),
        z: Some(IrisField::PetalLength.field().to_string()),
        color: Some("species".to_string()),
        hover_data: vec![IrisField::PetalWidth.field().to_string()],
        ..Encoding::default()
    };

    ChartSpec::new(ChartKind::Scatter3d, "Iris Dataset", ChartRows::Iris(rows), encoding)
        .with_labels(IrisField::labels())
}

fn tips_histogram(datasets: &Datasets) -> ChartSpec {
    let encoding = Encoding {
        x: Some("total_bill".to_string()),
        y: Some("percentage".to_string()),
        color: Some("sex".to_string()),
        ..Encoding::default()
    };

    ChartSpec::new(
        ChartKind::Histogram,
        "Average Tip Percentage by Total Bill",
        ChartRows::Tips(datasets.tips().to_vec()),
        encoding,
    )
    .with_labels(tips_labels())
    .with_histfunc(HistFunc::Avg)
}

fn tips_scatter(datasets: &Datasets) -> ChartSpec {
    let encoding = Encoding {
        x: Some("total_bill".to_string()),
        y: Some("percentage".to_string()),
        size: Some("size".to_string()),
        color: Some("day".to_string()),
        animation_frame: Some("sex".to_string()),
        ..Encoding::default()
    };

    ChartSpec::new(
        ChartKind::Scatter,
        "Tip Percentage vs Total Bill",
        ChartRows::Tips(datasets.tips().to_vec()),
        encoding,
    )
    .with_labels(tips_labels())
}

fn tips_facets(datasets: &Datasets) -> ChartSpec {
    let encoding = Encoding {
        x: Some("total_bill".to_string()),
        y: Some("tip".to_string()),
        size: Some("percentage".to_string()),
        color: Some("sex".to_string()),
        facet_col: Some("time".to_string()),
        ..Encoding::default()
    };

    ChartSpec::new(
        ChartKind::Scatter,
        "Tips by Time of Day",
        ChartRows::Tips(datasets.tips().to_vec()),
        encoding,
    )
    .with_labels(tips_labels())
}
