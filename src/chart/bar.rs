//! Bar chart of monthly values

use super::spec::{Axis, BarTrace, ChartSpec, Font, Marker, Title, Trace};
use super::theme::Theme;
use crate::aggregate::MonthlyAggregate;

/// Rotation applied to month labels on the x-axis
pub const TICK_ANGLE: i32 = 45;

/// Build a bar chart with one bar per month in `aggregate`, in calendar order
pub fn render_bar(aggregate: &MonthlyAggregate, title: &str, theme: &Theme) -> ChartSpec {
    let value_column = aggregate.metric.column();

    let trace = BarTrace {
        x: aggregate.months().map(|m| m.name().to_string()).collect(),
        y: aggregate.values().collect(),
        name: value_column.to_string(),
        marker: Marker {
            colors: None,
            color: Some(theme.accent.to_string()),
        },
    };

    let mut layout = theme.base_layout(title);
    layout.xaxis = Some(axis(theme, "Month", Some(TICK_ANGLE)));
    layout.yaxis = Some(axis(theme, value_column, None));

    ChartSpec {
        data: vec![Trace::Bar(trace)],
        layout,
        config: theme.display_config(),
    }
}

fn axis(theme: &Theme, title: &str, tickangle: Option<i32>) -> Axis {
    Axis {
        title: Title {
            text: title.to_string(),
            font: Font::color(theme.text),
        },
        tickfont: Font::color(theme.text),
        gridcolor: theme.border.to_string(),
        tickangle,
    }
}
