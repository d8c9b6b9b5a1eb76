// src/gui/plot_model.rs
//! PlotModel: traces for one chart, built from canonical data.
//!
//! Purpose:
//! - Filter the source table by the current selection, apply the page's
//!   growth transform and split it into one trace per (subset, region).
//! - Pair every raw-data trace with its fit trace (same color), and on the
//!   totals chart with the predicted trend and its sup/inf band.
//!
//! The chart component only consumes `Figure` and paints it; nothing here
//! touches egui, so it is tested like the rest of the library.

use chrono::NaiveDate;

use crate::analysis::TrendRow;
use crate::config::state::PlotSettings;
use crate::data::{Dataset, RegionKey, Selection, Subset};
use crate::growth::Transform;

/// Plotly's default qualitative palette, so raw data and fit share a color.
pub const PALETTE: [(u8, u8, u8); 10] = [
    (31, 119, 180),
    (255, 127, 14),
    (44, 160, 44),
    (214, 39, 40),
    (148, 103, 189),
    (140, 86, 75),
    (227, 119, 194),
    (127, 127, 127),
    (188, 189, 34),
    (23, 190, 207),
];

pub fn color_cycler(plot_index: usize) -> (u8, u8, u8) {
    PALETTE[plot_index % PALETTE.len()]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceStyle {
    /// Raw data
    Markers,
    /// Fit
    Line,
    /// Predicted trend (dashed) with an optional band
    Trend,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    pub name: String,
    pub style: TraceStyle,
    pub color: (u8, u8, u8),
    pub points: Vec<(NaiveDate, f64)>,
    /// (date, sup, inf); only on trend traces with a band
    pub band: Vec<(NaiveDate, f64, f64)>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Figure {
    pub title: String,
    pub y_title: String,
    pub log_y: bool,
    pub traces: Vec<Trace>,
}

impl Figure {
    pub fn is_empty(&self) -> bool {
        self.traces.iter().all(|t| t.points.is_empty())
    }

    /// Date range over all traces (bands included).
    pub fn x_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let dates = self
            .traces
            .iter()
            .flat_map(|t| t.points.iter().map(|p| p.0).chain(t.band.iter().map(|b| b.0)));
        dates.fold(None, |acc, d| match acc {
            None => Some((d, d)),
            Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
        })
    }

    /// Value range over all traces; on a log axis only positive values count.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let log_y = self.log_y;
        let values = self.traces.iter().flat_map(|t| {
            t.points
                .iter()
                .map(|p| p.1)
                .chain(t.band.iter().flat_map(|b| [b.1, b.2]))
        });
        values
            .filter(|v| v.is_finite() && (!log_y || *v > 0.0))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Inputs of one chart besides the data.
pub struct FigureSpec<'a> {
    pub title: &'a str,
    pub y_title: &'a str,
    pub transform: Transform,
    pub subsets: &'a [Subset],
    pub settings: &'a PlotSettings,
}

fn series(data: &Dataset, key: &RegionKey, subset: Subset) -> Vec<(NaiveDate, Option<f64>)> {
    data.region_rows(key).into_iter().map(|r| (r.date, r.get(subset))).collect()
}

/// Build the traces of one chart. `fit` is the fitted plot table of the
/// selected model (untransformed); `trend` is only drawn on the totals chart.
pub fn generate_figure(
    data: &Dataset,
    fit: Option<&Dataset>,
    trend: Option<&[TrendRow]>,
    sel: &Selection<'_>,
    spec: &FigureSpec<'_>,
) -> Figure {
    let mut fig = Figure {
        title: s!(spec.title),
        y_title: s!(spec.y_title),
        log_y: spec.settings.log_plot,
        traces: Vec::new(),
    };
    if sel.is_none() {
        return fig;
    }

    let selected = spec.transform.apply(&data.select(sel));
    let fitted = fit.map(|f| spec.transform.apply(&f.select(sel)));
    let keys = selected.region_keys();

    let mut plot_index = 0;
    for subset in spec.subsets {
        for region in sel.regions {
            for key in keys.iter().filter(|k| k.region == *region) {
                let color = color_cycler(plot_index);
                plot_index += 1;
                let name = format!("{} {}", key.region, subset);

                if !spec.settings.hide_raw_data {
                    let points = series(&selected, key, *subset)
                        .into_iter()
                        .filter_map(|(d, v)| v.map(|v| (d, v)))
                        .collect();
                    fig.traces.push(Trace {
                        name: name.clone(),
                        style: TraceStyle::Markers,
                        color,
                        points,
                        band: Vec::new(),
                    });
                }

                if let Some(fitted) = &fitted {
                    let s = series(fitted, key, *subset);
                    // A fit with holes is a failed fit for this subset.
                    if !s.is_empty() && s.iter().all(|(_, v)| v.is_some()) {
                        fig.traces.push(Trace {
                            name: join!("fit ", &name),
                            style: TraceStyle::Line,
                            color,
                            points: s.into_iter().filter_map(|(d, v)| v.map(|v| (d, v))).collect(),
                            band: Vec::new(),
                        });
                    }
                }

                if let (Transform::Totals, Some(trend)) = (spec.transform, trend) {
                    let rows: Vec<&TrendRow> = trend
                        .iter()
                        .filter(|t| t.subset == *subset && t.region == key.region && t.parent_region == key.parent_region)
                        .collect();
                    if !rows.is_empty() {
                        fig.traces.push(Trace {
                            name: join!("trend ", &name),
                            style: TraceStyle::Trend,
                            color,
                            points: rows.iter().map(|t| (t.date, t.trend)).collect(),
                            band: rows
                                .iter()
                                .filter_map(|t| Some((t.date, t.trend_sup?, t.trend_inf?)))
                                .collect(),
                        });
                    }
                }
            }
        }
    }
    fig
}
