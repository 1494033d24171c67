//! Chart Renderer
//!
//! Maps monthly aggregates to declarative figure descriptions. Rendering to
//! pixels happens in the browser; this module only builds the JSON.
//!
//! - **spec**: Figure types (`ChartSpec`, traces, layout)
//! - **theme**: Dark color scheme and palettes
//! - **pie**: Donut chart of monthly shares
//! - **bar**: Bar chart of monthly values

pub mod bar;
pub mod pie;
pub mod spec;
pub mod theme;

pub use bar::render_bar;
pub use pie::{render_pie, shares};
pub use spec::{ChartSpec, Trace};
pub use theme::{Theme, DARK};

use crate::aggregate::Selection;

/// Chart title in the form `"{region} : {description} in year {year}"`
pub fn chart_title(selection: Selection, description: &str) -> String {
    format!(
        "{} : {} in year {}",
        selection.region, description, selection.year
    )
}
