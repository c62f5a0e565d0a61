// Derived metrics: per-row rates, composite indices, and comparison-scoped
// min-max normalization.

use serde::{Deserialize, Serialize};
use std::ops;
use tracing::debug;

use crate::table::{ColumnSpec, Row, SchemaError, StatTable, Value};

/// Score given to every row when the selected rows span no range.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Suffix appended to a metric name to form its normalized column.
pub const NORMALIZED_SUFFIX: &str = "_norm";

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// Arithmetic over the numeric columns of a single row.
///
/// Build with the `+ - * /` operators:
/// `Expr::col("Average") * Expr::col("Strike_Rate") / Expr::constant(100.0)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Column(String),
    Const(f64),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn col(name: impl Into<String>) -> Self {
        Expr::Column(name.into())
    }

    pub fn constant(value: f64) -> Self {
        Expr::Const(value)
    }

    /// Column names referenced by the expression, in first-use order.
    pub fn columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Expr::Column(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            Expr::Const(_) => {}
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) => {
                a.collect_columns(out);
                b.collect_columns(out);
            }
        }
    }

    /// Evaluate against one row. `None` when an operand is undefined, a
    /// divisor is zero, or the result is not finite.
    pub fn eval(&self, row: &Row<'_>) -> Option<f64> {
        let result = match self {
            Expr::Column(name) => row.number(name)?,
            Expr::Const(v) => *v,
            Expr::Add(a, b) => a.eval(row)? + b.eval(row)?,
            Expr::Sub(a, b) => a.eval(row)? - b.eval(row)?,
            Expr::Mul(a, b) => a.eval(row)? * b.eval(row)?,
            Expr::Div(a, b) => {
                let numerator = a.eval(row)?;
                let denominator = b.eval(row)?;
                if denominator == 0.0 {
                    return None;
                }
                numerator / denominator
            }
        };
        result.is_finite().then_some(result)
    }

    /// Whether the expression can produce a negative number from the
    /// columns of `table`.
    fn may_be_negative(&self, table: &StatTable) -> bool {
        match self {
            Expr::Column(name) => table.column_spec(name).map_or(true, |spec| spec.signed),
            Expr::Const(v) => *v < 0.0,
            Expr::Sub(_, _) => true,
            Expr::Add(a, b) | Expr::Mul(a, b) | Expr::Div(a, b) => {
                a.may_be_negative(table) || b.may_be_negative(table)
            }
        }
    }
}

impl ops::Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        Expr::Add(Box::new(self), Box::new(rhs))
    }
}

impl ops::Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        Expr::Sub(Box::new(self), Box::new(rhs))
    }
}

impl ops::Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        Expr::Mul(Box::new(self), Box::new(rhs))
    }
}

impl ops::Div for Expr {
    type Output = Expr;
    fn div(self, rhs: Expr) -> Expr {
        Expr::Div(Box::new(self), Box::new(rhs))
    }
}

// ---------------------------------------------------------------------------
// Row-local derived columns
// ---------------------------------------------------------------------------

/// Append `new_column = numerator / denominator`.
///
/// Rows with a zero denominator, or an undefined input, get
/// `Value::Undefined`.
pub fn add_ratio(
    table: &StatTable,
    numerator: &str,
    denominator: &str,
    new_column: &str,
) -> Result<StatTable, SchemaError> {
    add_composite(table, &(Expr::col(numerator) / Expr::col(denominator)), new_column)
}

/// Append `new_column = part / whole * 100`, undefined where `whole` is zero.
pub fn add_percentage(
    table: &StatTable,
    part: &str,
    whole: &str,
    new_column: &str,
) -> Result<StatTable, SchemaError> {
    let expr = Expr::col(part) / Expr::col(whole) * Expr::constant(100.0);
    add_composite(table, &expr, new_column)
}

/// Append a float column computed from `expr` for every row.
///
/// Every referenced column must exist and be numeric. Undefined operands
/// propagate to an undefined result.
pub fn add_composite(table: &StatTable, expr: &Expr, new_column: &str) -> Result<StatTable, SchemaError> {
    for name in expr.columns() {
        table.numeric_spec(name)?;
    }

    let values: Vec<Value> = table.rows().map(|row| Value::from(expr.eval(&row))).collect();

    let undefined = values.iter().filter(|v| v.is_undefined()).count();
    if undefined > 0 {
        debug!(
            "{}: {} of {} rows undefined in derived column {}",
            table.name(),
            undefined,
            table.len(),
            new_column
        );
    }

    let mut spec = ColumnSpec::float(new_column);
    spec.signed = expr.may_be_negative(table);
    table.with_column(spec, values)
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Direction in which a metric improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    HigherBetter,
    LowerBetter,
}

/// Min and max of a metric over the rows currently selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationBasis {
    pub min: f64,
    pub max: f64,
}

impl NormalizationBasis {
    /// Basis over the defined values, `None` if every value is undefined.
    pub fn from_values(values: &[Option<f64>]) -> Option<Self> {
        values.iter().flatten().fold(None, |basis, &v| match basis {
            None => Some(Self { min: v, max: v }),
            Some(b) => Some(Self {
                min: b.min.min(v),
                max: b.max.max(v),
            }),
        })
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// True when every defined value is identical.
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Min-max fraction of `value`, or [`NEUTRAL_SCORE`] on a tied basis.
    pub fn fraction(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return NEUTRAL_SCORE;
        }
        (value - self.min) / self.range()
    }

    /// Fraction oriented so that 1.0 is always the best row.
    pub fn score(&self, value: f64, polarity: Polarity) -> f64 {
        let f = self.fraction(value);
        match polarity {
            Polarity::HigherBetter => f,
            Polarity::LowerBetter => 1.0 - f,
        }
    }
}

/// Name of the normalized column produced for `metric`.
pub fn normalized_column(metric: &str) -> String {
    format!("{metric}{NORMALIZED_SUFFIX}")
}

/// Append one `<metric>_norm` column per metric, scaled to [0, 1] over the
/// rows of `table` only.
///
/// The basis is recomputed from whatever rows are passed in, so adding or
/// removing a row can move every other row's score. Undefined inputs stay
/// undefined and do not take part in the basis.
pub fn normalize(table: &StatTable, metrics: &[(&str, Polarity)]) -> Result<StatTable, SchemaError> {
    let mut out = table.clone();
    for &(metric, polarity) in metrics {
        let values = table.numeric_column(metric)?;
        let basis = NormalizationBasis::from_values(&values);

        match basis {
            Some(b) if b.is_degenerate() => debug!(
                "{}: {} tied at {} across {} rows, using neutral score",
                table.name(),
                metric,
                b.min,
                table.len()
            ),
            None => debug!("{}: {} has no defined values to normalize", table.name(), metric),
            Some(_) => {}
        }

        let scored: Vec<Value> = values
            .iter()
            .map(|v| match (v, basis) {
                (Some(v), Some(b)) => Value::Float(b.score(*v, polarity)),
                _ => Value::Undefined,
            })
            .collect();
        out = out.with_column(ColumnSpec::float(normalized_column(metric)), scored)?;
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
