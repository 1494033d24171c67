//! Declarative chart description
//!
//! These types serialize to the figure JSON understood by Plotly.js
//! (`{data, layout, config}`). Field names follow Plotly's attribute names,
//! which is why some of them are not snake_case words.

use serde::Serialize;

/// A complete figure: traces, layout and display options
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub data: Vec<Trace>,
    pub layout: Layout,
    pub config: DisplayConfig,
}

impl ChartSpec {
    /// Title text
    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    /// Number of data points across all traces
    pub fn point_count(&self) -> usize {
        self.data.iter().map(Trace::len).sum()
    }

    /// Check if the figure has nothing to draw
    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}

/// One data series
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie(PieTrace),
    Bar(BarTrace),
}

impl Trace {
    /// Number of wedges or bars
    pub fn len(&self) -> usize {
        match self {
            Trace::Pie(pie) => pie.values.len(),
            Trace::Bar(bar) => bar.y.len(),
        }
    }

    /// Check if the trace has no points
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pie or donut series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// Fraction of the radius cut out of the middle
    pub hole: f64,
    /// Whether Plotly reorders wedges by value
    pub sort: bool,
    pub marker: Marker,
    pub textposition: String,
    pub textinfo: String,
    pub hoverinfo: String,
    pub textfont: Font,
    pub insidetextorientation: String,
}

/// Bar series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub name: String,
    pub marker: Marker,
}

/// Fill colors for a trace
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Marker {
    /// One color per point
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    /// One color for the whole trace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl Font {
    pub fn color(color: &str) -> Self {
        Self {
            color: Some(color.to_string()),
            size: None,
        }
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }
}

/// Figure-wide layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub title: Title,
    pub paper_bgcolor: String,
    pub plot_bgcolor: String,
    pub font: Font,
    pub margin: Margin,
    pub height: u32,
    pub autosize: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uniformtext: Option<UniformText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    pub font: Font,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub t: u32,
    pub b: u32,
    pub l: u32,
    pub r: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub font: Font,
    /// "h" or "v"
    pub orientation: String,
    pub yanchor: String,
    pub y: f64,
    pub xanchor: String,
    pub x: f64,
}

/// Shared text sizing for pie labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniformText {
    pub minsize: u32,
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: Title,
    pub tickfont: Font,
    pub gridcolor: String,
    /// Label rotation in degrees
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<i32>,
}

/// Options passed to the renderer alongside the figure
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayConfig {
    #[serde(rename = "displayModeBar")]
    pub display_mode_bar: bool,
    pub responsive: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            display_mode_bar: false,
            responsive: true,
        }
    }
}
