//! Plain-text rendering of transcript messages and the BMI chart.

use nutrigenio_core::chart::{BmiChart, BMI_BANDS, SCALE_MAX};
use nutrigenio_core::metrics::format_measure;
use nutrigenio_core::Message;

/// Characters used for the chart axis.
const CHART_WIDTH: usize = 50;

pub fn bot_line(bot_name: &str, message: &Message, chart: Option<&BmiChart>) -> String {
    if message.is_chart {
        return match chart {
            Some(chart) => render_chart(chart),
            None => String::new(),
        };
    }
    format!("{}: {}", bot_name, message.content)
}

fn column(x: f64) -> usize {
    let col = (x / SCALE_MAX * CHART_WIDTH as f64).round() as usize;
    col.min(CHART_WIDTH - 1)
}

/// One row per band plus a marker row pointing at "Você".
pub fn render_chart(chart: &BmiChart) -> String {
    let mut out = String::new();
    out.push_str(&format!("┌ Seu IMC: {} ({})\n", format_measure(chart.bmi), chart.category.label()));

    let mut start = 0.0;
    for (i, band) in BMI_BANDS.iter().enumerate() {
        let from = column(start);
        let to = column(start + band.width).max(from + 1);
        let mut row = " ".repeat(from);
        row.push_str(&"█".repeat(to - from));
        let here = if i == chart.band_index() { " ◀" } else { "" };
        out.push_str(&format!("│ {:<14} {:<10} {}{}\n", band.label, band.range, row, here));
        start += band.width;
    }

    let marker = column(chart.marker);
    out.push_str(&format!("│ {:<25} {}▲ Você\n", "", " ".repeat(marker)));
    out.push_str(&format!(
        "└ Peso atual: {} kg · Peso ideal: {}-{} kg",
        format_measure(chart.current_weight),
        format_measure(chart.ideal.min),
        format_measure(chart.ideal.max)
    ));
    out
}
