//! Dark dashboard theme
//!
//! Colors shared by the chart layouts and the page template.

use super::spec::{DisplayConfig, Font, Layout, Margin, Title};

/// Inferno sequential palette, dark to light
pub const INFERNO: [&str; 10] = [
    "#000004", "#1b0c41", "#4a0c6b", "#781c6d", "#a52c60", "#cf4446", "#ed6925", "#fb9b06",
    "#f7d13d", "#fcffa4",
];

/// Height of every chart in pixels
pub const CHART_HEIGHT: u32 = 400;

/// Title font size
pub const TITLE_SIZE: u32 = 16;

/// Color scheme for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Page background
    pub background: &'static str,
    /// Control panel background
    pub secondary_background: &'static str,
    /// Chart card and plot background
    pub card_background: &'static str,
    pub text: &'static str,
    pub secondary_text: &'static str,
    /// Highlight color, also used for bars
    pub accent: &'static str,
    /// Borders and grid lines
    pub border: &'static str,
}

/// The dashboard's only theme
pub const DARK: Theme = Theme {
    background: "#121212",
    secondary_background: "#1e1e1e",
    card_background: "#252525",
    text: "#FFFFFF",
    secondary_text: "#AAAAAA",
    accent: "#ff7b00",
    border: "#333333",
};

impl Default for Theme {
    fn default() -> Self {
        DARK
    }
}

impl Theme {
    /// Layout fields common to every chart
    pub fn base_layout(&self, title: &str) -> Layout {
        Layout {
            title: Title {
                text: title.to_string(),
                font: Font::color(self.text).size(TITLE_SIZE),
            },
            paper_bgcolor: self.card_background.to_string(),
            plot_bgcolor: self.card_background.to_string(),
            font: Font::color(self.text),
            margin: Margin {
                t: 50,
                b: 20,
                l: 20,
                r: 20,
            },
            height: CHART_HEIGHT,
            autosize: true,
            legend: None,
            uniformtext: None,
            xaxis: None,
            yaxis: None,
        }
    }

    /// Display options for every chart
    pub fn display_config(&self) -> DisplayConfig {
        DisplayConfig::default()
    }
}

/// Pick `n` colors from `palette`, wrapping around when it runs out
pub fn cycle_palette(palette: &[&str], n: usize) -> Vec<String> {
    palette
        .iter()
        .cycle()
        .take(if palette.is_empty() { 0 } else { n })
        .map(|c| c.to_string())
        .collect()
}
