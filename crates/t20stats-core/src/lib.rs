// Core of the T20I career dashboard: schema-checked stat tables, derived
// metrics, the static datasets, and the per-tab view builders.

pub mod datasets;
pub mod metrics;
pub mod table;
pub mod views;

pub use metrics::{add_composite, add_percentage, add_ratio, normalize, Expr, Polarity};
pub use table::{ColumnSpec, ColumnType, Record, SchemaError, StatTable, Value};
