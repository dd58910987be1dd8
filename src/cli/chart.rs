use std::io::Write;

use anyhow::Result;

const LABEL_WIDTH: usize = 24;
const BAR: char = '█';

/// One labelled value of a chart.
pub struct ChartRow {
    pub label: String,
    pub value: f64,
    /// Text printed after the bar
    pub caption: String,
}

impl ChartRow {
    pub fn new(label: impl Into<String>, value: f64, caption: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            caption: caption.into(),
        }
    }
}

/// Horizontal bar chart. The largest value fills `width` columns.
pub fn bar_chart<W: Write>(out: &mut W, rows: &[ChartRow], width: usize) -> Result<()> {
    let max = rows.iter().map(|r| r.value).fold(0.0_f64, f64::max);
    let label_width = rows
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0)
        .min(LABEL_WIDTH);

    for row in rows {
        let len = bar_length(row.value, max, width);
        writeln!(
            out,
            "  {:<label_width$} │{}{} {}",
            truncate(&row.label, label_width),
            BAR.to_string().repeat(len),
            " ".repeat(width - len),
            row.caption,
        )?;
    }
    Ok(())
}

/// Bar chart where each caption carries the row's share of the total, the
/// terminal stand-in for a pie chart.
pub fn share_chart<W: Write>(
    out: &mut W,
    rows: &[(String, usize)],
    width: usize,
) -> Result<()> {
    let total: usize = rows.iter().map(|(_, count)| count).sum();
    let chart_rows: Vec<ChartRow> = rows
        .iter()
        .map(|(label, count)| {
            let share = if total == 0 {
                0.0
            } else {
                *count as f64 / total as f64 * 100.0
            };
            ChartRow::new(label.clone(), *count as f64, format!("{} ({:.1}%)", count, share))
        })
        .collect();
    bar_chart(out, &chart_rows, width)
}

fn bar_length(value: f64, max: f64, width: usize) -> usize {
    if width == 0 || max <= 0.0 || value <= 0.0 {
        return 0;
    }
    // Non-zero values always get at least one block
    ((value / max * width as f64).round() as usize).clamp(1, width)
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
