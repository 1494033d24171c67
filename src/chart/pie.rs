//! Donut chart of each month's share

use super::spec::{ChartSpec, Font, Legend, Marker, PieTrace, Trace, UniformText};
use super::theme::{cycle_palette, Theme, INFERNO};
use crate::aggregate::MonthlyAggregate;

/// Fraction of the radius removed from the center
pub const HOLE_RATIO: f64 = 0.4;

/// Build a donut chart with one wedge per month in `aggregate`
pub fn render_pie(aggregate: &MonthlyAggregate, title: &str, theme: &Theme) -> ChartSpec {
    let labels: Vec<String> = aggregate.months().map(|m| m.name().to_string()).collect();
    let values: Vec<f64> = aggregate.values().collect();
    let colors = cycle_palette(&INFERNO, values.len());

    let trace = PieTrace {
        labels,
        values,
        hole: HOLE_RATIO,
        sort: false,
        marker: Marker {
            colors: Some(colors),
            color: None,
        },
        textposition: "inside".to_string(),
        textinfo: "percent+label".to_string(),
        hoverinfo: "label+percent+value".to_string(),
        textfont: Font::default().size(12),
        insidetextorientation: "radial".to_string(),
    };

    let mut layout = theme.base_layout(title);
    layout.legend = Some(Legend {
        font: Font::color(theme.text).size(12),
        orientation: "h".to_string(),
        yanchor: "bottom".to_string(),
        y: -0.15,
        xanchor: "center".to_string(),
        x: 0.5,
    });
    layout.uniformtext = Some(UniformText {
        minsize: 10,
        mode: "hide".to_string(),
    });

    ChartSpec {
        data: vec![Trace::Pie(trace)],
        layout,
        config: theme.display_config(),
    }
}

/// Percentage of the total held by each value
///
/// Shares sum to 100 whenever the total is positive; a zero total gives all
/// zeros.
pub fn shares(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / total * 100.0).collect()
}
