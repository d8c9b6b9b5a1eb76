// src/gui/components/chart.rs
//
// Paints a `Figure` with the egui painter: axes with date and value ticks,
// markers for raw data, solid lines for fits, dashed lines plus a shaded
// sup/inf band for trends, and a legend in the top-left corner.

use chrono::{Duration, NaiveDate};
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, StrokeKind, Vec2};

use crate::gui::plot_model::{Figure, Trace, TraceStyle};

const MARGIN_LEFT: f32 = 72.0;
const MARGIN_RIGHT: f32 = 16.0;
const MARGIN_TOP: f32 = 28.0;
const MARGIN_BOTTOM: f32 = 44.0;
const Y_TICKS: usize = 5;
const X_TICKS: i64 = 6;
const LEGEND_MAX: usize = 12;

/// Data space → screen space.
struct Axes {
    plot: Rect,
    x0: NaiveDate,
    x_span: f64,
    y_lo: f64,
    y_hi: f64,
    log_y: bool,
}

impl Axes {
    fn new(plot: Rect, fig: &Figure) -> Option<Self> {
        let (x0, x1) = fig.x_range()?;
        let (lo, hi) = fig.y_range()?;
        let (mut y_lo, mut y_hi) = if fig.log_y { (lo.log10(), hi.log10()) } else { (lo, hi) };
        if (y_hi - y_lo).abs() < f64::EPSILON {
            y_lo -= 1.0;
            y_hi += 1.0;
        }
        let pad = (y_hi - y_lo) * 0.05;
        let x_span = ((x1 - x0).num_days() as f64).max(1.0);
        Some(Self { plot, x0, x_span, y_lo: y_lo - pad, y_hi: y_hi + pad, log_y: fig.log_y })
    }

    fn x(&self, d: NaiveDate) -> f32 {
        let t = (d - self.x0).num_days() as f64 / self.x_span;
        self.plot.left() + (t as f32) * self.plot.width()
    }

    /// `None` for values a log axis cannot show.
    fn y(&self, v: f64) -> Option<f32> {
        let v = if self.log_y {
            if v <= 0.0 {
                return None;
            }
            v.log10()
        } else {
            v
        };
        if !v.is_finite() {
            return None;
        }
        let t = (v - self.y_lo) / (self.y_hi - self.y_lo);
        Some(self.plot.bottom() - (t as f32) * self.plot.height())
    }

    fn pos(&self, d: NaiveDate, v: f64) -> Option<Pos2> {
        Some(Pos2::new(self.x(d), self.y(v)?))
    }
}

fn color(t: &Trace) -> Color32 {
    let (r, g, b) = t.color;
    Color32::from_rgb(r, g, b)
}

/// Compact tick label: 1234567 → 1.23M
fn format_tick(v: f64) -> String {
    let a = v.abs();
    if a >= 1e9 {
        format!("{:.2}G", v / 1e9)
    } else if a >= 1e6 {
        format!("{:.2}M", v / 1e6)
    } else if a >= 1e4 {
        format!("{:.1}k", v / 1e3)
    } else if a >= 10.0 || a == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

pub fn draw(ui: &mut egui::Ui, fig: &Figure, height: f32) {
    let size = Vec2::new(ui.available_width(), height.max(160.0));
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    let visuals = ui.visuals().clone();
    let text = visuals.text_color();
    let weak = visuals.weak_text_color();
    let small = FontId::proportional(11.0);

    painter.text(
        Pos2::new(rect.center().x, rect.top() + 4.0),
        Align2::CENTER_TOP,
        &fig.title,
        FontId::proportional(15.0),
        text,
    );

    let plot = Rect::from_min_max(
        Pos2::new(rect.left() + MARGIN_LEFT, rect.top() + MARGIN_TOP),
        Pos2::new(rect.right() - MARGIN_RIGHT, rect.bottom() - MARGIN_BOTTOM),
    );
    painter.rect_stroke(plot, 0.0, Stroke::new(1.0, weak), StrokeKind::Inside);

    let Some(axes) = (!fig.is_empty()).then(|| Axes::new(plot, fig)).flatten() else {
        painter.text(plot.center(), Align2::CENTER_CENTER, "No data in selection", FontId::proportional(14.0), weak);
        return;
    };

    // --- grid + ticks ---
    let grid = Stroke::new(0.5, weak.gamma_multiply(0.4));
    for i in 0..=Y_TICKS {
        let t = i as f64 / Y_TICKS as f64;
        let v = axes.y_lo + t * (axes.y_hi - axes.y_lo);
        let y = plot.bottom() - (t as f32) * plot.height();
        painter.line_segment([Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)], grid);
        let label = if axes.log_y { format_tick(10f64.powf(v)) } else { format_tick(v) };
        painter.text(Pos2::new(plot.left() - 6.0, y), Align2::RIGHT_CENTER, label, small.clone(), weak);
    }
    let span_days = axes.x_span as i64;
    for i in 0..=X_TICKS {
        let d = axes.x0 + Duration::days(span_days * i / X_TICKS);
        let x = axes.x(d);
        painter.line_segment([Pos2::new(x, plot.top()), Pos2::new(x, plot.bottom())], grid);
        painter.text(
            Pos2::new(x, plot.bottom() + 4.0),
            Align2::CENTER_TOP,
            d.format("%Y-%m-%d").to_string(),
            small.clone(),
            weak,
        );
    }
    painter.text(
        Pos2::new(plot.center().x, rect.bottom() - 4.0),
        Align2::CENTER_BOTTOM,
        "date",
        small.clone(),
        text,
    );
    painter.text(
        Pos2::new(rect.left() + 4.0, plot.top() - 4.0),
        Align2::LEFT_BOTTOM,
        &fig.y_title,
        small.clone(),
        text,
    );

    // --- bands first, so lines stay on top ---
    for trace in fig.traces.iter().filter(|t| !t.band.is_empty()) {
        let fill = color(trace).gamma_multiply(0.2);
        for w in trace.band.windows(2) {
            let (d0, sup0, inf0) = w[0];
            let (d1, sup1, inf1) = w[1];
            let quad = [axes.pos(d0, sup0), axes.pos(d1, sup1), axes.pos(d1, inf1), axes.pos(d0, inf0)];
            if let [Some(a), Some(b), Some(c), Some(d)] = quad {
                painter.add(Shape::convex_polygon(vec![a, b, c, d], fill, Stroke::NONE));
            }
        }
    }

    // --- traces ---
    for trace in &fig.traces {
        let c = color(trace);
        let pts: Vec<Pos2> = trace.points.iter().filter_map(|(d, v)| axes.pos(*d, *v)).collect();
        match trace.style {
            TraceStyle::Markers => {
                for p in pts {
                    painter.circle_filled(p, 2.5, c);
                }
            }
            TraceStyle::Line => {
                if pts.len() > 1 {
                    painter.add(Shape::line(pts, Stroke::new(1.8, c)));
                }
            }
            TraceStyle::Trend => {
                if pts.len() > 1 {
                    painter.extend(Shape::dashed_line(&pts, Stroke::new(1.8, c), 6.0, 4.0));
                }
            }
        }
    }

    // --- legend ---
    let mut y = plot.top() + 6.0;
    for trace in fig.traces.iter().take(LEGEND_MAX) {
        let c = color(trace);
        let swatch = Rect::from_min_size(Pos2::new(plot.left() + 8.0, y + 2.0), Vec2::new(10.0, 8.0));
        painter.rect_filled(swatch, 1.0, c);
        painter.text(Pos2::new(swatch.right() + 5.0, y), Align2::LEFT_TOP, &trace.name, small.clone(), text);
        y += 14.0;
    }
    if fig.traces.len() > LEGEND_MAX {
        let more = format!("… {} more", fig.traces.len() - LEGEND_MAX);
        painter.text(Pos2::new(plot.left() + 8.0, y), Align2::LEFT_TOP, more, small.clone(), weak);
    }

    // --- hover readout: nearest point within a few pixels ---
    if let Some(hover) = response.hover_pos().filter(|p| plot.contains(*p)) {
        let nearest = fig
            .traces
            .iter()
            .flat_map(|t| t.points.iter().map(move |(d, v)| (t, *d, *v)))
            .filter_map(|(t, d, v)| Some((t, d, v, axes.pos(d, v)?.distance(hover))))
            .filter(|(.., dist)| *dist < 8.0)
            .min_by(|a, b| a.3.total_cmp(&b.3));
        if let Some((t, d, v, _)) = nearest {
            let label = format!("{}\n{d}: {v:.2}", t.name);
            painter.text(hover + Vec2::new(10.0, -10.0), Align2::LEFT_BOTTOM, label, small, text);
        }
    }
}
