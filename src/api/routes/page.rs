//! Dashboard Page
//!
//! - GET / - The single-page dashboard
//!
//! The page carries the selectors and two empty chart regions. Charts are
//! requested over `/ws` on every selector change (falling back to
//! `/api/v1/charts` while the socket is down) and drawn by Plotly.js.

use axum::{extract::State, response::Html};
use std::fmt::Write;
use std::sync::Arc;

use crate::api::state::AppState;
use crate::chart::Theme;
use crate::dashboard::DashboardOptions;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(&state.dashboard.options(), state.dashboard.theme()))
}

/// Render the dashboard HTML with selectors pre-populated
pub fn render_page(options: &DashboardOptions, theme: &Theme) -> String {
    let mut regions = String::new();
    for option in &options.regions {
        let checked = if option.value == options.default.region {
            " checked"
        } else {
            ""
        };
        let _ = write!(
            regions,
            r#"<label class="radio-item"><input type="radio" name="region" value="{code}"{checked}> {label}</label>"#,
            code = option.value.code(),
            label = option.label,
        );
    }

    let mut years = String::new();
    for year in &options.years {
        let selected = if *year == options.default.year {
            " selected"
        } else {
            ""
        };
        let _ = write!(years, r#"<option value="{year}"{selected}>{year}</option>"#);
    }

    PAGE_TEMPLATE
        .replace("{{plotly}}", PLOTLY_CDN)
        .replace("{{background}}", theme.background)
        .replace("{{secondary_background}}", theme.secondary_background)
        .replace("{{card_background}}", theme.card_background)
        .replace("{{text}}", theme.text)
        .replace("{{secondary_text}}", theme.secondary_text)
        .replace("{{accent}}", theme.accent)
        .replace("{{border}}", theme.border)
        .replace("{{regions}}", &regions)
        .replace("{{years}}", &years)
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Australia Wildfire Dashboard</title>
<script src="{{plotly}}"></script>
<style>
body { margin: 0; padding: 20px; min-height: 100vh; background: {{background}}; color: {{text}}; font-family: Helvetica, Arial, sans-serif; }
header { text-align: center; padding: 20px 0; margin-bottom: 20px; border-bottom: 1px solid {{border}}; }
header h1 { color: {{accent}}; font-size: 32px; margin: 0; }
header p, footer { color: {{secondary_text}}; }
.controls { display: flex; flex-wrap: wrap; justify-content: space-between; padding: 20px; margin-bottom: 20px; background: {{secondary_background}}; border-radius: 10px; }
.controls h3 { font-size: 18px; font-weight: normal; margin-bottom: 10px; }
.region { flex: 1; min-width: 300px; margin-right: 20px; }
.year { flex: 1; min-width: 220px; }
.radio-item { display: inline-block; margin: 0 12px 8px 0; padding: 8px 15px; background: {{card_background}}; border-radius: 20px; cursor: pointer; }
.radio-item input { accent-color: {{accent}}; margin-right: 5px; }
select { width: 100%; padding: 8px; background: {{card_background}}; color: {{text}}; border: 1px solid {{border}}; border-radius: 4px; }
.charts { display: flex; flex-wrap: wrap; gap: 20px; }
.chart { flex: 1; min-width: 400px; height: 450px; padding: 15px; background: {{card_background}}; border-radius: 10px; }
footer { text-align: center; padding: 20px 0; margin-top: 30px; border-top: 1px solid {{border}}; font-size: 14px; }
</style>
</head>
<body>
<header>
<h1>Australia Wildfire Dashboard</h1>
<p>Visualizing historical wildfire data across Australia</p>
</header>
<section class="controls">
<div class="region"><h3>Select Region:</h3>{{regions}}</div>
<div class="year"><h3>Select Year:</h3><select id="year">{{years}}</select></div>
</section>
<section class="charts">
<div class="chart" id="plot1"></div>
<div class="chart" id="plot2"></div>
</section>
<footer><p>Australia Wildfire Data Analysis Dashboard</p></footer>
<script>
(function () {
  var socket = null;

  // null while the year list is empty
  function selection() {
    var region = document.querySelector('input[name="region"]:checked');
    var year = document.getElementById('year');
    if (!region || year.options.length === 0) { return null; }
    return { region: region.value, year: parseInt(year.value, 10) };
  }

  function draw(charts) {
    Plotly.react('plot1', charts.fire_area.data, charts.fire_area.layout, charts.fire_area.config);
    Plotly.react('plot2', charts.pixel_count.data, charts.pixel_count.layout, charts.pixel_count.config);
  }

  function refresh() {
    var sel = selection();
    if (!sel) { return; }
    if (socket && socket.readyState === WebSocket.OPEN) {
      socket.send(JSON.stringify({ type: 'select', region: sel.region, year: sel.year }));
      return;
    }
    fetch('/api/v1/charts?region=' + encodeURIComponent(sel.region) + '&year=' + sel.year)
      .then(function (r) { return r.json(); })
      .then(draw);
  }

  function connect() {
    var proto = location.protocol === 'https:' ? 'wss://' : 'ws://';
    socket = new WebSocket(proto + location.host + '/ws');
    socket.onmessage = function (event) {
      var msg = JSON.parse(event.data);
      if (msg.type === 'charts') { draw(msg); }
      else if (msg.type === 'error') { console.warn(msg.message); }
    };
    socket.onopen = refresh;
    socket.onclose = function () { setTimeout(connect, 2000); };
  }

  document.querySelectorAll('input[name="region"]').forEach(function (el) {
    el.addEventListener('change', refresh);
  });
  document.getElementById('year').addEventListener('change', refresh);

  refresh();
  connect();
})();
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Selection;
    use crate::chart::DARK;
    use crate::dashboard::RegionOption;
    use crate::dataset::Region;

    #[test]
    fn test_render_page_marks_defaults() {
        let options = DashboardOptions {
            regions: Region::all()
                .iter()
                .map(|r| RegionOption {
                    value: *r,
                    label: r.label(),
                })
                .collect(),
            years: vec![2004, 2005, 2006],
            default: Selection::new(Region::Queensland, 2005),
        };

        let html = render_page(&options, &DARK);

        assert!(html.contains(r#"value="QL" checked"#));
        assert!(html.contains(r#"<option value="2005" selected>2005</option>"#));
        assert!(html.contains(r#"<option value="2004">2004</option>"#));
        assert!(html.contains("Western Australia"));
        assert!(html.contains(DARK.accent));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_render_page_without_years() {
        let options = DashboardOptions {
            regions: Vec::new(),
            years: Vec::new(),
            default: Selection::new(Region::NewSouthWales, 2005),
        };

        let html = render_page(&options, &DARK);

        assert!(!html.contains("<option"));
        assert!(html.contains("year.options.length === 0"));
        assert!(html.contains("if (!sel) { return; }"));
    }
}
