// End-to-end tests: config on disk -> views -> presenters.

use std::fs;
use std::path::PathBuf;

use t20stats_cli::config::{ensure_config_files, load_config_from, OutputFormat};
use t20stats_cli::present::{JsonPresenter, Presenter, TextPresenter, UNDEFINED_MARK};
use t20stats_core::datasets::{col, Datasets};
use t20stats_core::views::{self, ComparisonSelection, PanelBody, Tab};
use t20stats_core::{ColumnSpec, StatTable, Value};

// ===========================================================================
// Test helpers
// ===========================================================================

fn fresh_dir(name: &str) -> PathBuf {
    let tmp = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&tmp);
    fs::create_dir_all(&tmp).unwrap();
    tmp
}

fn render_text(tab: Tab, data: &Datasets, selection: &ComparisonSelection) -> String {
    let view = views::build(tab, data, selection);
    let mut p = TextPresenter::new(Vec::new());
    p.present(&view).unwrap();
    String::from_utf8(p.into_inner()).unwrap()
}

// ===========================================================================
// Config from defaults
// ===========================================================================

#[test]
fn first_run_creates_config_and_renders_every_tab() {
    let tmp = fresh_dir("t20stats_e2e_first_run");
    let data = Datasets::load().unwrap();

    let created = ensure_config_files(&tmp).unwrap();
    assert_eq!(created.len(), 1);
    let config = load_config_from(&tmp, &data.comparison_players()).unwrap();
    assert_eq!(config.dashboard.format, OutputFormat::Text);

    let selection = config.comparison.selection();
    for tab in &config.dashboard.tabs {
        let text = render_text(*tab, &data, &selection);
        assert!(text.starts_with(&format!("== {} ==", tab.title())));
        assert!(!text.contains("[data unavailable"), "{tab} had an unavailable panel");
    }

    let _ = fs::remove_dir_all(&tmp);
}

#[test]
fn configured_players_drive_the_radar() {
    let tmp = fresh_dir("t20stats_e2e_players");
    fs::create_dir_all(tmp.join("config")).unwrap();
    fs::write(
        tmp.join("config").join("dashboard.toml"),
        r#"
[dashboard]
tabs = ["comparison"]
format = "json"

[comparison]
focus = "Rohit Sharma"
players = ["David Warner"]
"#,
    )
    .unwrap();

    let data = Datasets::load().unwrap();
    let config = load_config_from(&tmp, &data.comparison_players()).unwrap();
    let view = views::build(Tab::Comparison, &data, &config.comparison.selection());

    let mut p = JsonPresenter::new(Vec::new());
    p.present(&view).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&p.into_inner()).unwrap();

    let radar = json["panels"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["title"] == "Player Comparison - Radar Chart")
        .unwrap();
    let rows = radar["body"]["table"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "Rohit Sharma");
    assert_eq!(rows[1][0], "David Warner");

    let _ = fs::remove_dir_all(&tmp);
}

// ===========================================================================
// Presentation contract
// ===========================================================================

#[test]
fn text_output_marks_undefined_comparison_values() {
    let mut data = Datasets::load().unwrap();
    data.contemporaries = StatTable::from_columns(
        "contemporaries",
        vec![
            (
                ColumnSpec::text(col::PLAYER),
                vec!["Rohit Sharma".into(), "Debutant".into()],
            ),
            (ColumnSpec::integer(col::MATCHES), vec![Value::Int(151), Value::Int(1)]),
            (ColumnSpec::integer(col::INNINGS), vec![Value::Int(140), Value::Int(0)]),
            (ColumnSpec::integer(col::RUNS), vec![Value::Int(4231), Value::Int(0)]),
            (
                ColumnSpec::float(col::AVERAGE),
                vec![Value::Float(32.95), Value::Undefined],
            ),
            (
                ColumnSpec::float(col::STRIKE_RATE),
                vec![Value::Float(139.67), Value::Undefined],
            ),
            (ColumnSpec::integer(col::FIFTIES), vec![Value::Int(29), Value::Int(0)]),
            (ColumnSpec::integer(col::HUNDREDS), vec![Value::Int(5), Value::Int(0)]),
        ],
    )
    .unwrap();

    let selection = ComparisonSelection::new("Rohit Sharma", vec!["Debutant".into()]);
    let view = views::build(Tab::Comparison, &data, &selection);
    assert!(view.panels.iter().all(|p| p.is_available()));

    let text = render_text(Tab::Comparison, &data, &selection);
    let debutant_lines: Vec<&str> = text.lines().filter(|l| l.starts_with("Debutant")).collect();
    assert!(!debutant_lines.is_empty());
    assert!(debutant_lines.iter().any(|l| l.ends_with(UNDEFINED_MARK)));
    assert!(!text.contains("NaN"));
    assert!(!text.contains("inf"));
}

#[test]
fn text_output_reports_unavailable_panels() {
    let mut data = Datasets::load().unwrap();
    data.captaincy = data.captaincy.project(&[col::ROLE, col::INNINGS]).unwrap();

    let view = views::build(Tab::Performance, &data, &ComparisonSelection::default());
    let unavailable: Vec<&str> = view
        .panels
        .iter()
        .filter_map(|p| match &p.body {
            PanelBody::Unavailable { .. } => Some(p.title.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        unavailable,
        vec!["Average & Strike Rate Comparison", "Milestones per Innings (%)"]
    );

    let text = render_text(Tab::Performance, &data, &ComparisonSelection::default());
    assert_eq!(text.matches("[data unavailable:").count(), 2);
    // Unaffected panels still render
    assert!(text.contains("-- Runs by Venue Type --"));
}
