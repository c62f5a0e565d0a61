// Static T20I career datasets.
//
// Every table is built from column-major literals and schema-checked once at
// startup. Nothing here is mutated afterwards.

use crate::table::{ColumnSpec, SchemaError, StatTable, Value};

/// Column names shared across the datasets and views.
pub mod col {
    pub const PHASE: &str = "Phase";
    pub const OPPOSITION: &str = "Opposition";
    pub const TOURNAMENT: &str = "Tournament";
    pub const VENUE_TYPE: &str = "Venue_Type";
    pub const ROLE: &str = "Role";
    pub const SHOT_TYPE: &str = "Shot_Type";
    pub const DIRECTION: &str = "Direction";
    pub const ZONE: &str = "Zone";
    pub const PLAYER: &str = "Player";
    pub const MILESTONE: &str = "Milestone";

    pub const MATCHES: &str = "Matches";
    pub const INNINGS: &str = "Innings";
    pub const RUNS: &str = "Runs";
    pub const AVERAGE: &str = "Average";
    pub const STRIKE_RATE: &str = "Strike_Rate";
    pub const HIGH_SCORE: &str = "High_Score";
    pub const FIFTIES: &str = "Fifties";
    pub const HUNDREDS: &str = "Hundreds";

    pub const FREQUENCY: &str = "Frequency";
    pub const RUNS_SCORED: &str = "Runs_Scored";
    pub const DISMISSAL_RATE: &str = "Dismissal_Rate";
    pub const NUMBER_OF_SIXES: &str = "Number_of_Sixes";
    pub const PERCENTAGE: &str = "Percentage";
    pub const AVERAGE_DISTANCE: &str = "Average_Distance";
    pub const BOUNDARY_PERCENTAGE: &str = "Boundary_Percentage";

    pub const INNINGS_PER_50: &str = "Innings_per_50";
    pub const BOUNDARY_INDEX: &str = "Boundary_Index";
    pub const HUNDREDS_PER_INNINGS: &str = "100s_per_innings";
    pub const FIFTIES_PER_INNINGS: &str = "50s_per_innings";
}

/// The player the dashboard is about. Always part of a comparison.
pub const FOCUS_PLAYER: &str = "Rohit Sharma";

/// Contemporaries pre-selected for comparison.
pub const DEFAULT_COMPARISON: &[&str] = &["Babar Azam", "Jos Buttler", "KL Rahul"];

// ---------------------------------------------------------------------------
// Non-tabular data
// ---------------------------------------------------------------------------

/// Headline career numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct CareerSummary {
    pub matches: u32,
    pub innings: u32,
    pub runs: u32,
    pub average: f64,
    pub strike_rate: f64,
    pub highest_score: &'static str,
    pub centuries: u32,
    pub half_centuries: u32,
    pub fours: u32,
    pub sixes: u32,
    pub captain_matches: u32,
    pub captain_wins: u32,
}

impl CareerSummary {
    /// Wins as captain per hundred matches led, `None` if never captain.
    pub fn captain_win_percentage(&self) -> Option<f64> {
        if self.captain_matches == 0 {
            return None;
        }
        Some(self.captain_wins as f64 / self.captain_matches as f64 * 100.0)
    }
}

/// A dated career event for the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub year: &'static str,
    pub event: &'static str,
}

pub const CAREER_SUMMARY: CareerSummary = CareerSummary {
    matches: 151,
    innings: 143,
    runs: 4231,
    average: 32.54,
    strike_rate: 139.65,
    highest_score: "121*",
    centuries: 5,
    half_centuries: 29,
    fours: 395,
    sixes: 182,
    captain_matches: 51,
    captain_wins: 39,
};

pub const MILESTONES: &[Milestone] = &[
    Milestone { year: "2007", event: "T20I debut in the inaugural T20 World Cup" },
    Milestone { year: "2015", event: "First T20I century (106 vs South Africa)" },
    Milestone { year: "2017", event: "Joint-fastest T20I century (35 balls vs Sri Lanka)" },
    Milestone { year: "2018", event: "Second T20I century (100* vs England)" },
    Milestone { year: "2018", event: "Became India T20I captain" },
    Milestone { year: "2022", event: "Third T20I century (111* vs New Zealand)" },
    Milestone { year: "2022", event: "Fourth T20I century (104 vs South Africa)" },
    Milestone { year: "2023", event: "Fifth T20I century (121* vs Afghanistan)" },
    Milestone { year: "2024", event: "Crossed 4,000 T20I runs (second player after Virat Kohli)" },
];

// ---------------------------------------------------------------------------
// Literal helpers
// ---------------------------------------------------------------------------

fn labels(values: &[&str]) -> Vec<Value> {
    values.iter().map(|&v| Value::from(v)).collect()
}

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().map(|&v| Value::Int(v)).collect()
}

fn floats(values: &[f64]) -> Vec<Value> {
    values.iter().map(|&v| Value::Float(v)).collect()
}

fn text(name: &str, values: &[&str]) -> (ColumnSpec, Vec<Value>) {
    (ColumnSpec::text(name), labels(values))
}

fn int(name: &str, values: &[i64]) -> (ColumnSpec, Vec<Value>) {
    (ColumnSpec::integer(name), ints(values))
}

fn float(name: &str, values: &[f64]) -> (ColumnSpec, Vec<Value>) {
    (ColumnSpec::float(name), floats(values))
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

pub fn career_phases() -> Result<StatTable, SchemaError> {
    StatTable::from_columns(
        "career_phases",
        vec![
            text(col::PHASE, &["2007-2010", "2011-2015", "2016-2020", "2021-2024"]),
            int(col::MATCHES, &[22, 49, 46, 34]),
            int(col::INNINGS, &[19, 46, 44, 34]),
            int(col::RUNS, &[325, 1136, 1596, 1174]),
            float(col::AVERAGE, &[21.67, 31.55, 39.90, 36.68]),
            float(col::STRIKE_RATE, &[116.07, 130.12, 145.09, 152.47]),
            int(col::FIFTIES, &[1, 7, 12, 9]),
            int(col::HUNDREDS, &[0, 1, 2, 2]),
        ],
    )
}

pub fn opposition() -> Result<StatTable, SchemaError> {
    StatTable::from_columns(
        "opposition",
        vec![
            text(
                col::OPPOSITION,
                &[
                    "Australia",
                    "Bangladesh",
                    "England",
                    "New Zealand",
                    "Pakistan",
                    "South Africa",
                    "Sri Lanka",
                    "West Indies",
                ],
            ),
            int(col::MATCHES, &[25, 12, 16, 21, 10, 19, 29, 15]),
            int(col::INNINGS, &[24, 11, 16, 19, 10, 19, 27, 13]),
            int(col::RUNS, &[623, 452, 482, 576, 388, 571, 728, 341]),
            float(col::AVERAGE, &[31.15, 56.50, 32.13, 36.00, 38.80, 35.69, 34.67, 28.42]),
            float(
                col::STRIKE_RATE,
                &[142.98, 144.40, 139.88, 136.82, 142.65, 141.73, 146.38, 127.24],
            ),
            int(col::HIGH_SCORE, &[71, 89, 100, 111, 78, 106, 118, 67]),
            int(col::FIFTIES, &[6, 5, 3, 3, 4, 3, 3, 2]),
            int(col::HUNDREDS, &[0, 0, 1, 1, 0, 2, 1, 0]),
        ],
    )
}

pub fn world_cups() -> Result<StatTable, SchemaError> {
    StatTable::from_columns(
        "world_cups",
        vec![
            text(
                col::TOURNAMENT,
                &["2007", "2009", "2010", "2012", "2014", "2016", "2021", "2022", "2024"],
            ),
            int(col::MATCHES, &[3, 5, 5, 5, 6, 5, 5, 6, 7]),
            int(col::RUNS, &[88, 88, 79, 107, 200, 89, 174, 116, 257]),
            float(
                col::AVERAGE,
                &[29.33, 17.60, 19.75, 26.75, 40.00, 22.25, 34.80, 19.33, 36.71],
            ),
            float(
                col::STRIKE_RATE,
                &[113.55, 109.37, 106.85, 127.38, 132.45, 116.11, 151.30, 106.42, 156.70],
            ),
            int(col::HIGH_SCORE, &[50, 36, 33, 55, 74, 43, 74, 53, 92]),
            int(col::FIFTIES, &[1, 0, 0, 1, 2, 0, 2, 1, 3]),
            int(col::HUNDREDS, &[0, 0, 0, 0, 0, 0, 0, 0, 0]),
        ],
    )
}

pub fn venue_types() -> Result<StatTable, SchemaError> {
    StatTable::from_columns(
        "venue_types",
        vec![
            text(col::VENUE_TYPE, &["Home", "Away", "Neutral"]),
            int(col::MATCHES, &[50, 53, 48]),
            int(col::INNINGS, &[47, 51, 45]),
            int(col::RUNS, &[1587, 1368, 1276]),
            float(col::AVERAGE, &[38.71, 29.74, 29.67]),
            float(col::STRIKE_RATE, &[143.91, 134.38, 139.47]),
            int(col::FIFTIES, &[11, 10, 8]),
            int(col::HUNDREDS, &[2, 1, 2]),
        ],
    )
}

pub fn captaincy() -> Result<StatTable, SchemaError> {
    StatTable::from_columns(
        "captaincy",
        vec![
            text(col::ROLE, &["As Captain", "As Player"]),
            int(col::MATCHES, &[51, 100]),
            int(col::INNINGS, &[50, 93]),
            int(col::RUNS, &[1782, 2449]),
            float(col::AVERAGE, &[38.74, 29.17]),
            float(col::STRIKE_RATE, &[149.37, 133.58]),
            int(col::FIFTIES, &[14, 15]),
            int(col::HUNDREDS, &[3, 2]),
        ],
    )
}

pub fn shot_types() -> Result<StatTable, SchemaError> {
    StatTable::from_columns(
        "shot_types",
        vec![
            text(
                col::SHOT_TYPE,
                &[
                    "Front Foot Drive",
                    "Pull/Hook",
                    "Cut",
                    "Flick/Glance",
                    "Square Drive",
                    "Lofted Drive",
                    "Sweep/Reverse Sweep",
                    "Defensive Stroke",
                ],
            ),
            float(col::FREQUENCY, &[19.3, 15.8, 12.6, 11.9, 10.4, 9.2, 7.8, 13.0]),
            int(col::RUNS_SCORED, &[892, 847, 621, 528, 486, 594, 386, 110]),
            float(col::AVERAGE, &[55.75, 67.76, 51.75, 48.00, 44.18, 42.43, 35.09, 0.0]),
            float(col::DISMISSAL_RATE, &[5.6, 4.3, 5.2, 4.9, 6.3, 8.3, 9.2, 2.8]),
        ],
    )
}

pub fn six_directions() -> Result<StatTable, SchemaError> {
    StatTable::from_columns(
        "six_directions",
        vec![
            text(
                col::DIRECTION,
                &[
                    "Long-on/Mid-wicket",
                    "Square-leg/Fine-leg",
                    "Straight/Long-off",
                    "Cover/Extra-cover",
                    "Third-man/Fine-leg",
                ],
            ),
            int(col::NUMBER_OF_SIXES, &[78, 37, 32, 23, 12]),
            float(col::PERCENTAGE, &[42.9, 20.3, 17.6, 12.6, 6.6]),
            int(col::AVERAGE_DISTANCE, &[82, 79, 84, 77, 75]),
        ],
    )
}

pub fn scoring_zones() -> Result<StatTable, SchemaError> {
    StatTable::from_columns(
        "scoring_zones",
        vec![
            text(
                col::ZONE,
                &[
                    "Mid-wicket/Square-leg",
                    "Cover/Extra-cover",
                    "Long-on/Long-off",
                    "Point/Third-man",
                    "Fine-leg/Square-fine",
                    "Other",
                ],
            ),
            int(col::RUNS, &[1211, 957, 673, 628, 492, 270]),
            float(col::PERCENTAGE, &[28.6, 22.6, 15.9, 14.8, 11.6, 6.5]),
            float(col::STRIKE_RATE, &[158.47, 142.83, 151.24, 127.37, 138.59, 98.18]),
            float(col::BOUNDARY_PERCENTAGE, &[24.5, 20.8, 22.3, 17.6, 19.2, 2.1]),
        ],
    )
}

pub fn contemporaries() -> Result<StatTable, SchemaError> {
    StatTable::from_columns(
        "contemporaries",
        vec![
            text(
                col::PLAYER,
                &[
                    FOCUS_PLAYER,
                    "Babar Azam",
                    "David Warner",
                    "Jos Buttler",
                    "Aaron Finch",
                    "KL Rahul",
                ],
            ),
            int(col::MATCHES, &[148, 108, 99, 112, 103, 72]),
            int(col::INNINGS, &[140, 104, 99, 106, 103, 70]),
            int(col::RUNS, &[4217, 3987, 2894, 3356, 3120, 2265]),
            float(col::AVERAGE, &[32.95, 41.53, 32.15, 35.33, 31.52, 37.75]),
            float(col::STRIKE_RATE, &[139.67, 128.76, 141.37, 144.68, 142.53, 139.12]),
            int(col::FIFTIES, &[29, 33, 24, 24, 20, 22]),
            int(col::HUNDREDS, &[5, 3, 1, 6, 2, 2]),
        ],
    )
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// Every base table, built once and shared read-only by all views.
#[derive(Debug, Clone, PartialEq)]
pub struct Datasets {
    pub career_phases: StatTable,
    pub opposition: StatTable,
    pub world_cups: StatTable,
    pub venue_types: StatTable,
    pub captaincy: StatTable,
    pub shot_types: StatTable,
    pub six_directions: StatTable,
    pub scoring_zones: StatTable,
    pub contemporaries: StatTable,
    pub summary: CareerSummary,
    pub milestones: &'static [Milestone],
}

impl Datasets {
    /// Build and schema-check every base table.
    pub fn load() -> Result<Self, SchemaError> {
        Ok(Self {
            career_phases: career_phases()?,
            opposition: opposition()?,
            world_cups: world_cups()?,
            venue_types: venue_types()?,
            captaincy: captaincy()?,
            shot_types: shot_types()?,
            six_directions: six_directions()?,
            scoring_zones: scoring_zones()?,
            contemporaries: contemporaries()?,
            summary: CAREER_SUMMARY,
            milestones: MILESTONES,
        })
    }

    /// Names of the players available for comparison, focus player first.
    pub fn comparison_players(&self) -> Vec<&str> {
        self.contemporaries.labels(col::PLAYER).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
