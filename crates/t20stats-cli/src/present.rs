// Presenters: turn a built View into text or JSON on a writer.

use std::io::Write;

use anyhow::Context;
use t20stats_core::views::{Encoding, MetricTile, PanelBody, View};
use t20stats_core::{StatTable, Value};

/// Marker printed wherever a value is undefined.
pub const UNDEFINED_MARK: &str = "—";

const COLUMN_GAP: &str = "  ";

/// Renders views somewhere. Implementations must show undefined values
/// distinctly and must not draw anything for an unavailable panel beyond
/// saying so.
pub trait Presenter {
    fn present(&mut self, view: &View) -> anyhow::Result<()>;
}

/// Format a single cell for text output.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Int(v) => v.to_string(),
        Value::Float(v) => format!("{v:.2}"),
        Value::Text(s) => s.clone(),
        Value::Undefined => UNDEFINED_MARK.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

pub struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_table(&mut self, table: &StatTable) -> std::io::Result<()> {
        let headers = table.column_names();
        let cells: Vec<Vec<String>> = table
            .rows()
            .map(|row| row.values().iter().map(format_value).collect())
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }
        let numeric: Vec<bool> = table.columns().iter().map(|c| c.kind.is_numeric()).collect();

        let header_line: Vec<String> = headers
            .iter()
            .zip(&widths)
            .zip(&numeric)
            .map(|((h, &w), &right)| pad(h, w, right))
            .collect();
        writeln!(self.out, "{}", header_line.join(COLUMN_GAP).trim_end())?;

        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        writeln!(self.out, "{}", rule.join(COLUMN_GAP))?;

        for row in &cells {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .zip(&numeric)
                .map(|((cell, &w), &right)| pad(cell, w, right))
                .collect();
            writeln!(self.out, "{}", line.join(COLUMN_GAP).trim_end())?;
        }
        if cells.is_empty() {
            writeln!(self.out, "(no rows)")?;
        }
        Ok(())
    }

    fn write_tiles(&mut self, tiles: &[MetricTile]) -> std::io::Result<()> {
        let width = tiles
            .iter()
            .map(|t| t.label.chars().count())
            .max()
            .unwrap_or(0);
        for tile in tiles {
            writeln!(
                self.out,
                "{}  {}",
                pad(&tile.label, width, false),
                format_value(&tile.value)
            )?;
        }
        Ok(())
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, view: &View) -> anyhow::Result<()> {
        writeln!(self.out, "== {} ==", view.title)?;
        for panel in &view.panels {
            writeln!(self.out)?;
            writeln!(self.out, "-- {} --", panel.title)?;
            match &panel.body {
                PanelBody::Table { table, encoding } => {
                    if let Some(encoding) = encoding {
                        writeln!(self.out, "{}", encoding_hint(encoding))?;
                    }
                    self.write_table(table)
                        .with_context(|| format!("writing panel '{}'", panel.title))?;
                }
                PanelBody::Metrics { tiles } => self.write_tiles(tiles)?,
                PanelBody::Notes { lines } => {
                    for line in lines {
                        writeln!(self.out, "* {line}")?;
                    }
                }
                PanelBody::Unavailable { reason } => {
                    writeln!(self.out, "[data unavailable: {reason}]")?;
                }
            }
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

fn pad(s: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(s.chars().count()));
    if right {
        format!("{fill}{s}")
    } else {
        format!("{s}{fill}")
    }
}

/// One-line summary of how a panel is meant to be charted.
fn encoding_hint(encoding: &Encoding) -> String {
    let chart = serde_json::to_value(encoding.chart)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    let mut parts = vec![format!("chart: {chart}")];
    if let Some(x) = &encoding.x {
        parts.push(format!("x: {x}"));
    }
    if !encoding.y.is_empty() {
        parts.push(format!("y: {}", encoding.y.join(", ")));
    }
    if !encoding.secondary_y.is_empty() {
        parts.push(format!("y2: {}", encoding.secondary_y.join(", ")));
    }
    if let Some(size) = &encoding.size {
        parts.push(format!("size: {size}"));
    }
    if let Some(color) = &encoding.color {
        parts.push(format!("color: {color}"));
    }
    format!("({})", parts.join("; "))
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

/// Writes each view as a pretty-printed JSON document followed by a newline.
pub struct JsonPresenter<W: Write> {
    out: W,
}

impl<W: Write> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn present(&mut self, view: &View) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.out, view)
            .with_context(|| format!("serializing view '{}'", view.title))?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use t20stats_core::views::{ChartKind, Panel, Tab};
    use t20stats_core::{ColumnSpec, SchemaError};

    fn view_with(panels: Vec<Panel>) -> View {
        View {
            tab: Tab::Comparison,
            title: Tab::Comparison.title().to_string(),
            panels,
        }
    }

    fn render(view: &View) -> String {
        let mut p = TextPresenter::new(Vec::new());
        p.present(view).unwrap();
        String::from_utf8(p.into_inner()).unwrap()
    }

    #[test]
    fn format_value_per_variant() {
        assert_eq!(format_value(&Value::Int(42)), "42");
        assert_eq!(format_value(&Value::Float(139.666)), "139.67");
        assert_eq!(format_value(&Value::from("121*")), "121*");
        assert_eq!(format_value(&Value::Undefined), "—");
    }

    #[test]
    fn pad_counts_chars_not_bytes() {
        assert_eq!(pad("—", 3, true), "  —");
        assert_eq!(pad("ab", 4, false), "ab  ");
        assert_eq!(pad("toolong", 3, false), "toolong");
    }

    #[test]
    fn table_renders_undefined_as_dash() {
        let table = StatTable::from_columns(
            "t",
            vec![
                (ColumnSpec::text("Player"), vec!["X".into(), "Y".into()]),
                (
                    ColumnSpec::float("Average"),
                    vec![Value::Float(30.0), Value::Undefined],
                ),
            ],
        )
        .unwrap();
        let text = render(&view_with(vec![Panel::from_table("Rates", Ok(table), None)]));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "== Comparison ==");
        assert!(lines.contains(&"-- Rates --"));
        assert!(lines.contains(&"Player  Average"));
        assert!(lines.contains(&"X         30.00"));
        assert!(lines.contains(&"Y             —"));
    }

    #[test]
    fn unavailable_panel_renders_only_the_notice() {
        let err = SchemaError::MissingColumn {
            table: "contemporaries".into(),
            column: "Fifties".into(),
        };
        let panel = Panel::from_table(
            "Radar",
            Err(err.clone()),
            Some(Encoding::new(ChartKind::Radar)),
        );
        let text = render(&view_with(vec![panel]));
        assert!(text.contains(&format!("[data unavailable: {err}]")));
        assert!(!text.contains("chart:"));
    }

    #[test]
    fn encoding_hint_lists_channels() {
        let enc = Encoding::new(ChartKind::GroupedBar)
            .x("Role")
            .y("value")
            .color("variable");
        assert_eq!(
            encoding_hint(&enc),
            "(chart: grouped_bar; x: Role; y: value; color: variable)"
        );
    }

    #[test]
    fn json_presenter_writes_null_for_undefined() {
        let table = StatTable::from_columns(
            "t",
            vec![(ColumnSpec::float("rate"), vec![Value::Undefined])],
        )
        .unwrap();
        let view = view_with(vec![Panel::from_table("Rates", Ok(table), None)]);

        let mut p = JsonPresenter::new(Vec::new());
        p.present(&view).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&p.into_inner()).unwrap();

        assert_eq!(json["tab"], "comparison");
        let body = &json["panels"][0]["body"];
        assert_eq!(body["kind"], "table");
        assert!(body["table"]["rows"][0][0].is_null());
    }
}
