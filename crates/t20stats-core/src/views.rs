// Tab view builders.
//
// Each builder is a pure function of the base datasets (and, for the
// comparison tab, an explicit player selection). A panel whose table fails a
// schema check is reported as unavailable instead of being partially drawn.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::datasets::{col, Datasets, DEFAULT_COMPARISON, FOCUS_PLAYER};
use crate::metrics::{self, normalized_column, Expr, Polarity};
use crate::table::{SchemaError, StatTable, Value};

/// Metrics plotted on the comparison radar, with the direction each improves.
pub const RADAR_METRICS: &[(&str, Polarity)] = &[
    (col::AVERAGE, Polarity::HigherBetter),
    (col::STRIKE_RATE, Polarity::HigherBetter),
    (col::RUNS, Polarity::HigherBetter),
    (col::FIFTIES, Polarity::HigherBetter),
    (col::HUNDREDS, Polarity::HigherBetter),
    (col::INNINGS_PER_50, Polarity::LowerBetter),
];

/// Metrics shown side by side in the comparison bar panel.
pub const KEY_METRICS: &[&str] = &[
    col::AVERAGE,
    col::STRIKE_RATE,
    col::BOUNDARY_INDEX,
    col::INNINGS_PER_50,
];

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Overview,
    Performance,
    Shots,
    Comparison,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Performance, Tab::Shots, Tab::Comparison];

    /// Parse a tab key such as `"overview"` or `"shots"`.
    pub fn from_str_tab(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "overview" => Some(Tab::Overview),
            "performance" => Some(Tab::Performance),
            "shots" => Some(Tab::Shots),
            "comparison" => Some(Tab::Comparison),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Performance => "performance",
            Tab::Shots => "shots",
            Tab::Comparison => "comparison",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Career Overview",
            Tab::Performance => "Performance Analysis",
            Tab::Shots => "Shot Analytics",
            Tab::Comparison => "Comparison",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// Kind of chart a panel is meant for. Rendering is up to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    GroupedBar,
    Line,
    Pie,
    Scatter,
    Radar,
    Combo,
}

/// Which columns a presenter should map to which visual channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Encoding {
    pub chart: ChartKind,
    pub x: Option<String>,
    pub y: Vec<String>,
    pub secondary_y: Vec<String>,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl Encoding {
    pub fn new(chart: ChartKind) -> Self {
        Self {
            chart,
            x: None,
            y: Vec::new(),
            secondary_y: Vec::new(),
            size: None,
            color: None,
        }
    }

    pub fn x(mut self, column: &str) -> Self {
        self.x = Some(column.to_string());
        self
    }

    pub fn y(mut self, column: &str) -> Self {
        self.y.push(column.to_string());
        self
    }

    pub fn secondary_y(mut self, column: &str) -> Self {
        self.secondary_y.push(column.to_string());
        self
    }

    pub fn size(mut self, column: &str) -> Self {
        self.size = Some(column.to_string());
        self
    }

    pub fn color(mut self, column: &str) -> Self {
        self.color = Some(column.to_string());
        self
    }
}

/// A labelled headline number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTile {
    pub label: String,
    pub value: Value,
}

impl MetricTile {
    fn new(label: &str, value: Value) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelBody {
    Table {
        table: StatTable,
        encoding: Option<Encoding>,
    },
    Metrics {
        tiles: Vec<MetricTile>,
    },
    Notes {
        lines: Vec<String>,
    },
    Unavailable {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub title: String,
    pub body: PanelBody,
}

impl Panel {
    /// Wrap a table computation. A schema failure marks the panel unavailable.
    pub fn from_table(
        title: &str,
        table: Result<StatTable, SchemaError>,
        encoding: Option<Encoding>,
    ) -> Self {
        let body = match table {
            Ok(table) => PanelBody::Table { table, encoding },
            Err(e) => {
                warn!("Panel '{}' unavailable: {}", title, e);
                PanelBody::Unavailable {
                    reason: e.to_string(),
                }
            }
        };
        Self {
            title: title.to_string(),
            body,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.body, PanelBody::Unavailable { .. })
    }
}

/// One rendered tab: a title and its panels in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub tab: Tab,
    pub title: String,
    pub panels: Vec<Panel>,
}

impl View {
    fn new(tab: Tab, panels: Vec<Panel>) -> Self {
        Self {
            tab,
            title: tab.title().to_string(),
            panels,
        }
    }

    pub fn panel(&self, title: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.title == title)
    }
}

// ---------------------------------------------------------------------------
// Comparison selection
// ---------------------------------------------------------------------------

/// Which players the comparison tab covers. The focus player is always
/// included, ahead of the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSelection {
    pub focus: String,
    pub others: Vec<String>,
}

impl Default for ComparisonSelection {
    fn default() -> Self {
        Self {
            focus: FOCUS_PLAYER.to_string(),
            others: DEFAULT_COMPARISON.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ComparisonSelection {
    pub fn new(focus: impl Into<String>, others: Vec<String>) -> Self {
        Self {
            focus: focus.into(),
            others,
        }
    }

    /// Focus plus selected players that exist in `available`, deduplicated.
    /// Unknown names are skipped with a warning.
    pub fn resolve<'a>(&'a self, available: &[&str]) -> Vec<&'a str> {
        let mut players: Vec<&str> = Vec::with_capacity(self.others.len() + 1);
        for name in std::iter::once(&self.focus).chain(self.others.iter()) {
            if !available.contains(&name.as_str()) {
                warn!("Comparison player '{}' not in dataset, skipping", name);
                continue;
            }
            if !players.contains(&name.as_str()) {
                players.push(name);
            }
        }
        players
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Build the view for `tab`.
pub fn build(tab: Tab, data: &Datasets, selection: &ComparisonSelection) -> View {
    match tab {
        Tab::Overview => overview(data),
        Tab::Performance => performance(data),
        Tab::Shots => shots(data),
        Tab::Comparison => comparison(data, selection),
    }
}

/// Career summary tiles, progression by phase, and the milestone timeline.
pub fn overview(data: &Datasets) -> View {
    let s = &data.summary;
    let tiles = vec![
        MetricTile::new("Matches", Value::Int(s.matches.into())),
        MetricTile::new("Runs", Value::Int(s.runs.into())),
        MetricTile::new("Centuries", Value::Int(s.centuries.into())),
        MetricTile::new("Fours", Value::Int(s.fours.into())),
        MetricTile::new("Innings", Value::Int(s.innings.into())),
        MetricTile::new("Average", Value::Float(s.average)),
        MetricTile::new("Half-centuries", Value::Int(s.half_centuries.into())),
        MetricTile::new("Sixes", Value::Int(s.sixes.into())),
        MetricTile::new("Highest Score", Value::from(s.highest_score)),
        MetricTile::new("Strike Rate", Value::Float(s.strike_rate)),
        MetricTile::new("Captain Win %", Value::from(s.captain_win_percentage())),
    ];

    let progression = data.career_phases.project(&[
        col::PHASE,
        col::RUNS,
        col::AVERAGE,
        col::STRIKE_RATE,
    ]);

    let milestones = data
        .milestones
        .iter()
        .map(|m| format!("{}: {}", m.year, m.event))
        .collect();

    View::new(
        Tab::Overview,
        vec![
            Panel {
                title: "Career Summary".into(),
                body: PanelBody::Metrics { tiles },
            },
            Panel::from_table(
                "Runs, Average, and Strike Rate by Career Phase",
                progression,
                Some(
                    Encoding::new(ChartKind::Combo)
                        .x(col::PHASE)
                        .y(col::RUNS)
                        .secondary_y(col::AVERAGE)
                        .secondary_y(col::STRIKE_RATE),
                ),
            ),
            Panel {
                title: "Key Milestones".into(),
                body: PanelBody::Notes { lines: milestones },
            },
        ],
    )
}

/// Opposition, venue, World Cup and captaincy breakdowns.
pub fn performance(data: &Datasets) -> View {
    let opposition = data.opposition.project(&[
        col::OPPOSITION,
        col::AVERAGE,
        col::STRIKE_RATE,
        col::RUNS,
        col::MATCHES,
        col::HUNDREDS,
        col::FIFTIES,
    ]);

    let venue_runs = data.venue_types.project(&[col::VENUE_TYPE, col::RUNS]);
    let venue_rates = data
        .venue_types
        .project(&[col::VENUE_TYPE, col::AVERAGE, col::STRIKE_RATE]);

    let world_cups = data.world_cups.project(&[
        col::TOURNAMENT,
        col::RUNS,
        col::AVERAGE,
        col::STRIKE_RATE,
    ]);

    let role_rates = data
        .captaincy
        .melt(col::ROLE, &[col::AVERAGE, col::STRIKE_RATE]);

    View::new(
        Tab::Performance,
        vec![
            Panel::from_table(
                "Average and Strike Rate against Top Teams",
                opposition,
                Some(
                    Encoding::new(ChartKind::Bar)
                        .x(col::OPPOSITION)
                        .y(col::AVERAGE)
                        .color(col::STRIKE_RATE),
                ),
            ),
            Panel::from_table(
                "Runs by Venue Type",
                venue_runs,
                Some(
                    Encoding::new(ChartKind::Bar)
                        .x(col::VENUE_TYPE)
                        .y(col::RUNS)
                        .color(col::VENUE_TYPE),
                ),
            ),
            Panel::from_table(
                "Average & Strike Rate by Venue Type",
                venue_rates,
                Some(
                    Encoding::new(ChartKind::GroupedBar)
                        .x(col::VENUE_TYPE)
                        .y(col::AVERAGE)
                        .y(col::STRIKE_RATE),
                ),
            ),
            Panel::from_table(
                "Performance across T20 World Cups",
                world_cups,
                Some(
                    Encoding::new(ChartKind::Line)
                        .x(col::TOURNAMENT)
                        .y(col::RUNS)
                        .y(col::AVERAGE)
                        .y(col::STRIKE_RATE),
                ),
            ),
            Panel::from_table(
                "Average & Strike Rate Comparison",
                role_rates,
                Some(
                    Encoding::new(ChartKind::GroupedBar)
                        .x(col::ROLE)
                        .y("value")
                        .color("variable"),
                ),
            ),
            Panel::from_table(
                "Milestones per Innings (%)",
                milestones_per_innings(&data.captaincy),
                Some(
                    Encoding::new(ChartKind::GroupedBar)
                        .x(col::ROLE)
                        .y(col::PERCENTAGE)
                        .color(col::MILESTONE),
                ),
            ),
        ],
    )
}

/// Hundreds and fifties per hundred innings for each role, in long form as
/// `(Role, Milestone, Percentage)`.
pub fn milestones_per_innings(captaincy: &StatTable) -> Result<StatTable, SchemaError> {
    let t = metrics::add_percentage(captaincy, col::HUNDREDS, col::INNINGS, col::HUNDREDS_PER_INNINGS)?;
    let t = metrics::add_percentage(&t, col::FIFTIES, col::INNINGS, col::FIFTIES_PER_INNINGS)?;
    t.melt_as(
        col::ROLE,
        &[col::HUNDREDS_PER_INNINGS, col::FIFTIES_PER_INNINGS],
        col::MILESTONE,
        col::PERCENTAGE,
    )
}

/// Shot distribution and effectiveness, scoring zones, six directions.
pub fn shots(data: &Datasets) -> View {
    View::new(
        Tab::Shots,
        vec![
            Panel::from_table(
                "Shot Type Distribution (%)",
                data.shot_types.project(&[
                    col::SHOT_TYPE,
                    col::FREQUENCY,
                    col::RUNS_SCORED,
                    col::AVERAGE,
                    col::DISMISSAL_RATE,
                ]),
                Some(
                    Encoding::new(ChartKind::Pie)
                        .x(col::SHOT_TYPE)
                        .y(col::FREQUENCY),
                ),
            ),
            Panel::from_table(
                "Shot Effectiveness (Average vs Dismissal Rate)",
                data.shot_types.project(&[
                    col::SHOT_TYPE,
                    col::AVERAGE,
                    col::DISMISSAL_RATE,
                    col::RUNS_SCORED,
                ]),
                Some(
                    Encoding::new(ChartKind::Scatter)
                        .x(col::AVERAGE)
                        .y(col::DISMISSAL_RATE)
                        .size(col::RUNS_SCORED)
                        .color(col::SHOT_TYPE),
                ),
            ),
            Panel::from_table(
                "Scoring Zones",
                Ok(data.scoring_zones.clone()),
                Some(
                    Encoding::new(ChartKind::Scatter)
                        .x(col::ZONE)
                        .size(col::PERCENTAGE)
                        .color(col::STRIKE_RATE),
                ),
            ),
            Panel::from_table(
                "Six Distribution by Direction",
                Ok(data.six_directions.clone()),
                Some(
                    Encoding::new(ChartKind::Bar)
                        .x(col::DIRECTION)
                        .y(col::NUMBER_OF_SIXES)
                        .color(col::AVERAGE_DISTANCE),
                ),
            ),
        ],
    )
}

/// Contemporaries with `Innings_per_50` and `Boundary_Index` appended.
///
/// Derived over the full table; normalization happens later on the selected
/// rows only.
pub fn with_comparison_metrics(contemporaries: &StatTable) -> Result<StatTable, SchemaError> {
    let innings_per_50 =
        Expr::col(col::INNINGS) / (Expr::col(col::FIFTIES) + Expr::col(col::HUNDREDS));
    let boundary_index =
        Expr::col(col::AVERAGE) * Expr::col(col::STRIKE_RATE) / Expr::constant(100.0);

    let t = metrics::add_composite(contemporaries, &innings_per_50, col::INNINGS_PER_50)?;
    metrics::add_composite(&t, &boundary_index, col::BOUNDARY_INDEX)
}

/// Radar-ready table: player label plus one normalized column per radar
/// metric, scaled over the rows of `selected` only.
pub fn radar_table(selected: &StatTable) -> Result<StatTable, SchemaError> {
    let normalized = metrics::normalize(selected, RADAR_METRICS)?;
    let norm_columns: Vec<String> = RADAR_METRICS
        .iter()
        .map(|(metric, _)| normalized_column(metric))
        .collect();

    let mut columns = vec![col::PLAYER];
    columns.extend(norm_columns.iter().map(String::as_str));
    normalized.project(&columns)
}

/// Key metrics and radar comparison for the selected players.
pub fn comparison(data: &Datasets, selection: &ComparisonSelection) -> View {
    let available = data.comparison_players();
    let players = selection.resolve(&available);

    let selected = with_comparison_metrics(&data.contemporaries)
        .and_then(|t| t.select_labels(col::PLAYER, &players));

    let key_metrics = selected
        .clone()
        .and_then(|t| t.melt(col::PLAYER, KEY_METRICS));
    let radar = selected.and_then(|t| radar_table(&t));

    let mut radar_encoding = Encoding::new(ChartKind::Radar).x(col::PLAYER);
    for (metric, _) in RADAR_METRICS {
        radar_encoding = radar_encoding.y(&normalized_column(metric));
    }

    View::new(
        Tab::Comparison,
        vec![
            Panel::from_table(
                "Key Metrics Comparison",
                key_metrics,
                Some(
                    Encoding::new(ChartKind::GroupedBar)
                        .x(col::PLAYER)
                        .y("value")
                        .color("variable"),
                ),
            ),
            Panel::from_table("Player Comparison - Radar Chart", radar, Some(radar_encoding)),
        ],
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
