// Immutable, schema-checked statistics tables.
//
// A StatTable is an ordered list of rows over a declared list of typed
// columns. Every operation returns a new table; nothing mutates in place.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("table `{table}`: no column named `{column}`")]
    MissingColumn { table: String, column: String },

    #[error("table `{table}`: row {row} is missing column `{column}`")]
    MissingField {
        table: String,
        row: usize,
        column: String,
    },

    #[error("table `{table}`: row {row} has undeclared column `{column}`")]
    UnknownColumn {
        table: String,
        row: usize,
        column: String,
    },

    #[error("table `{table}`: column `{column}` declared more than once")]
    DuplicateColumn { table: String, column: String },

    #[error("table `{table}`: column `{column}` expected {expected}, found {found}")]
    TypeMismatch {
        table: String,
        column: String,
        expected: String,
        found: String,
    },

    #[error("table `{table}`: row {row} column `{column}` is negative ({value}) in an unsigned column")]
    NegativeValue {
        table: String,
        row: usize,
        column: String,
        value: f64,
    },

    #[error("table `{table}`: row {row} column `{column}` is not a finite number")]
    NonFinite {
        table: String,
        row: usize,
        column: String,
    },

    #[error("table `{table}`: column `{column}` has {found} values, expected {expected}")]
    LengthMismatch {
        table: String,
        column: String,
        expected: usize,
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

impl ColumnType {
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Text => "text",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

/// A declared column: name, type, and whether negative values are allowed.
///
/// Counts and rates are unsigned. Differential or indexed columns opt in to
/// negative values with [`ColumnSpec::signed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnType,
    pub signed: bool,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ColumnType) -> Self {
        Self {
            name: name.into(),
            kind,
            signed: false,
        }
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Integer)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Float)
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Text)
    }

    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// A single cell.
///
/// `Undefined` marks a derived value whose inputs were insufficient (zero
/// denominator, undefined operand, no comparison basis). It is distinct from
/// zero and is only legal in numeric columns. Serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Undefined,
}

impl Value {
    /// Numeric view of the cell. `None` for text and undefined cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(_) | Value::Undefined => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    fn kind_str(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Undefined => "undefined",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Option<f64>> for Value {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Value::Undefined, Value::Float)
    }
}

/// Row-major input record: column name to value.
pub type Record = BTreeMap<String, Value>;

// ---------------------------------------------------------------------------
// Row view
// ---------------------------------------------------------------------------

/// Borrowed view of one row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [ColumnSpec],
    values: &'a [Value],
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.columns
            .iter()
            .position(|c| c.name == column)
            .map(|i| &self.values[i])
    }

    /// Numeric value of `column`, `None` if missing, text, or undefined.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Value::as_f64)
    }

    pub fn text(&self, column: &str) -> Option<&'a str> {
        self.get(column).and_then(Value::as_text)
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }
}

// ---------------------------------------------------------------------------
// StatTable
// ---------------------------------------------------------------------------

/// Immutable ordered collection of uniformly-typed records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatTable {
    name: String,
    columns: Vec<ColumnSpec>,
    rows: Vec<Vec<Value>>,
}

impl StatTable {
    /// Build a table from row-major records.
    ///
    /// Fails if a record lacks a declared column, carries an undeclared one,
    /// or holds a value that does not fit its column.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<ColumnSpec>,
        records: Vec<Record>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        check_unique(&name, &columns)?;

        let mut rows = Vec::with_capacity(records.len());
        for (row_idx, mut record) in records.into_iter().enumerate() {
            let mut row = Vec::with_capacity(columns.len());
            for spec in &columns {
                let value = record
                    .remove(&spec.name)
                    .ok_or_else(|| SchemaError::MissingField {
                        table: name.clone(),
                        row: row_idx,
                        column: spec.name.clone(),
                    })?;
                row.push(check_value(&name, spec, row_idx, value)?);
            }
            if let Some(extra) = record.keys().next() {
                return Err(SchemaError::UnknownColumn {
                    table: name,
                    row: row_idx,
                    column: extra.clone(),
                });
            }
            rows.push(row);
        }

        Ok(Self {
            name,
            columns,
            rows,
        })
    }

    /// Build a table from column-major literals, the shape static source
    /// data is usually written in. All columns must have the same length.
    pub fn from_columns(
        name: impl Into<String>,
        columns: Vec<(ColumnSpec, Vec<Value>)>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        let specs: Vec<ColumnSpec> = columns.iter().map(|(spec, _)| spec.clone()).collect();
        check_unique(&name, &specs)?;

        let expected = columns.first().map_or(0, |(_, values)| values.len());
        for (spec, values) in &columns {
            if values.len() != expected {
                return Err(SchemaError::LengthMismatch {
                    table: name,
                    column: spec.name.clone(),
                    expected,
                    found: values.len(),
                });
            }
        }

        let mut rows: Vec<Vec<Value>> = (0..expected)
            .map(|_| Vec::with_capacity(specs.len()))
            .collect();
        for (spec, values) in columns {
            for (row_idx, value) in values.into_iter().enumerate() {
                rows[row_idx].push(check_value(&name, &spec, row_idx, value)?);
            }
        }

        Ok(Self {
            name,
            columns: specs,
            rows,
        })
    }

    // ---- Accessors ----

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    pub fn column_spec(&self, column: &str) -> Result<&ColumnSpec, SchemaError> {
        self.column_index(column)
            .map(|i| &self.columns[i])
            .ok_or_else(|| self.missing(column))
    }

    /// Spec of `column`, failing unless it is an integer or float column.
    pub fn numeric_spec(&self, column: &str) -> Result<&ColumnSpec, SchemaError> {
        let spec = self.column_spec(column)?;
        if !spec.kind.is_numeric() {
            return Err(SchemaError::TypeMismatch {
                table: self.name.clone(),
                column: column.to_string(),
                expected: "numeric".into(),
                found: spec.kind.to_string(),
            });
        }
        Ok(spec)
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.rows.iter().map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[col])
    }

    pub fn column(&self, column: &str) -> Result<Vec<&Value>, SchemaError> {
        let col = self
            .column_index(column)
            .ok_or_else(|| self.missing(column))?;
        Ok(self.rows.iter().map(|r| &r[col]).collect())
    }

    /// Values of a numeric column; undefined cells come back as `None`.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<Option<f64>>, SchemaError> {
        self.numeric_spec(column)?;
        Ok(self
            .column(column)?
            .into_iter()
            .map(Value::as_f64)
            .collect())
    }

    /// Values of a text column.
    pub fn labels(&self, column: &str) -> Result<Vec<&str>, SchemaError> {
        self.text_spec(column)?;
        Ok(self
            .column(column)?
            .into_iter()
            .filter_map(Value::as_text)
            .collect())
    }

    // ---- Derivations (all return new tables) ----

    /// Keep the rows for which `predicate` holds, in their original order.
    pub fn select<F>(&self, mut predicate: F) -> StatTable
    where
        F: FnMut(&Row<'_>) -> bool,
    {
        let rows = self
            .rows()
            .filter(|row| predicate(row))
            .map(|row| row.values.to_vec())
            .collect();
        StatTable {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Keep the rows whose text `column` is one of `labels`.
    pub fn select_labels(&self, column: &str, labels: &[&str]) -> Result<StatTable, SchemaError> {
        self.text_spec(column)?;
        Ok(self.select(|row| row.text(column).is_some_and(|l| labels.contains(&l))))
    }

    /// Keep only the named columns, in the requested order.
    pub fn project(&self, columns: &[&str]) -> Result<StatTable, SchemaError> {
        let mut indices = Vec::with_capacity(columns.len());
        for name in columns {
            let idx = self.column_index(name).ok_or_else(|| self.missing(name))?;
            if indices.contains(&idx) {
                return Err(SchemaError::DuplicateColumn {
                    table: self.name.clone(),
                    column: name.to_string(),
                });
            }
            indices.push(idx);
        }

        Ok(StatTable {
            name: self.name.clone(),
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| indices.iter().map(|&i| r[i].clone()).collect())
                .collect(),
        })
    }

    /// Append a column, producing a new table.
    pub fn with_column(&self, spec: ColumnSpec, values: Vec<Value>) -> Result<StatTable, SchemaError> {
        if self.has_column(&spec.name) {
            return Err(SchemaError::DuplicateColumn {
                table: self.name.clone(),
                column: spec.name,
            });
        }
        if values.len() != self.rows.len() {
            return Err(SchemaError::LengthMismatch {
                table: self.name.clone(),
                column: spec.name,
                expected: self.rows.len(),
                found: values.len(),
            });
        }

        let mut rows = self.rows.clone();
        for (row_idx, (row, value)) in rows.iter_mut().zip(values).enumerate() {
            row.push(check_value(&self.name, &spec, row_idx, value)?);
        }

        let mut columns = self.columns.clone();
        columns.push(spec);
        Ok(StatTable {
            name: self.name.clone(),
            columns,
            rows,
        })
    }

    /// Reshape wide to long: one `(id, variable, value)` row per id row and
    /// value column, grouped by value column.
    pub fn melt(&self, id_column: &str, value_columns: &[&str]) -> Result<StatTable, SchemaError> {
        self.melt_as(id_column, value_columns, "variable", "value")
    }

    /// [`melt`](Self::melt) with caller-chosen names for the variable and
    /// value columns.
    pub fn melt_as(
        &self,
        id_column: &str,
        value_columns: &[&str],
        variable_name: &str,
        value_name: &str,
    ) -> Result<StatTable, SchemaError> {
        let id_spec = self.column_spec(id_column)?.clone();
        let mut signed = false;
        for name in value_columns {
            signed |= self.numeric_spec(name)?.signed;
        }

        let ids = self.column(id_column)?;
        let mut id_values = Vec::new();
        let mut variables = Vec::new();
        let mut values = Vec::new();
        for name in value_columns {
            for (id, cell) in ids.iter().zip(self.column(name)?) {
                id_values.push((*id).clone());
                variables.push(Value::from(*name));
                values.push(match cell {
                    Value::Int(v) => Value::Float(*v as f64),
                    other => other.clone(),
                });
            }
        }

        let mut value_spec = ColumnSpec::float(value_name);
        value_spec.signed = signed;
        StatTable::from_columns(
            self.name.clone(),
            vec![
                (id_spec, id_values),
                (ColumnSpec::text(variable_name), variables),
                (value_spec, values),
            ],
        )
    }

    // ---- Helpers ----

    fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == column)
    }

    fn text_spec(&self, column: &str) -> Result<&ColumnSpec, SchemaError> {
        let spec = self.column_spec(column)?;
        if spec.kind != ColumnType::Text {
            return Err(SchemaError::TypeMismatch {
                table: self.name.clone(),
                column: column.to_string(),
                expected: ColumnType::Text.to_string(),
                found: spec.kind.to_string(),
            });
        }
        Ok(spec)
    }

    fn missing(&self, column: &str) -> SchemaError {
        SchemaError::MissingColumn {
            table: self.name.clone(),
            column: column.to_string(),
        }
    }
}

fn check_unique(table: &str, columns: &[ColumnSpec]) -> Result<(), SchemaError> {
    for (i, spec) in columns.iter().enumerate() {
        if columns[..i].iter().any(|c| c.name == spec.name) {
            return Err(SchemaError::DuplicateColumn {
                table: table.to_string(),
                column: spec.name.clone(),
            });
        }
    }
    Ok(())
}

/// Check one cell against its column, widening integers in float columns.
fn check_value(table: &str, spec: &ColumnSpec, row: usize, value: Value) -> Result<Value, SchemaError> {
    let value = match (spec.kind, value) {
        (ColumnType::Text, v @ Value::Text(_)) => v,
        (ColumnType::Integer, v @ (Value::Int(_) | Value::Undefined)) => v,
        (ColumnType::Float, v @ (Value::Float(_) | Value::Undefined)) => v,
        (ColumnType::Float, Value::Int(v)) => Value::Float(v as f64),
        (kind, other) => {
            return Err(SchemaError::TypeMismatch {
                table: table.to_string(),
                column: spec.name.clone(),
                expected: kind.to_string(),
                found: other.kind_str().to_string(),
            });
        }
    };

    if let Some(v) = value.as_f64() {
        if !v.is_finite() {
            return Err(SchemaError::NonFinite {
                table: table.to_string(),
                row,
                column: spec.name.clone(),
            });
        }
        if v < 0.0 && !spec.signed {
            return Err(SchemaError::NegativeValue {
                table: table.to_string(),
                row,
                column: spec.name.clone(),
                value: v,
            });
        }
    }

    Ok(value)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, Value)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn schema() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::text("Role"),
            ColumnSpec::integer("Innings"),
            ColumnSpec::float("Average"),
        ]
    }

    fn captain_table() -> StatTable {
        StatTable::new(
            "captaincy",
            schema(),
            vec![
                record(&[
                    ("Role", "As Captain".into()),
                    ("Innings", Value::Int(50)),
                    ("Average", Value::Float(38.74)),
                ]),
                record(&[
                    ("Role", "As Player".into()),
                    ("Innings", Value::Int(93)),
                    ("Average", Value::Float(29.17)),
                ]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn new_keeps_declared_column_order() {
        let t = captain_table();
        assert_eq!(t.column_names(), vec!["Role", "Innings", "Average"]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.value(1, "Role"), Some(&Value::from("As Player")));
    }

    #[test]
    fn new_rejects_missing_field() {
        let err = StatTable::new(
            "t",
            schema(),
            vec![record(&[("Role", "A".into()), ("Innings", Value::Int(1))])],
        )
        .unwrap_err();
        match err {
            SchemaError::MissingField { row, column, .. } => {
                assert_eq!(row, 0);
                assert_eq!(column, "Average");
            }
            other => panic!("expected MissingField, got: {other}"),
        }
    }

    #[test]
    fn new_rejects_undeclared_column() {
        let err = StatTable::new(
            "t",
            schema(),
            vec![record(&[
                ("Role", "A".into()),
                ("Innings", Value::Int(1)),
                ("Average", Value::Float(1.0)),
                ("Sixes", Value::Int(3)),
            ])],
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownColumn { ref column, .. } if column == "Sixes"));
    }

    #[test]
    fn new_rejects_type_mismatch() {
        let err = StatTable::new(
            "t",
            schema(),
            vec![record(&[
                ("Role", Value::Int(7)),
                ("Innings", Value::Int(1)),
                ("Average", Value::Float(1.0)),
            ])],
        )
        .unwrap_err();
        match err {
            SchemaError::TypeMismatch {
                column,
                expected,
                found,
                ..
            } => {
                assert_eq!(column, "Role");
                assert_eq!(expected, "text");
                assert_eq!(found, "integer");
            }
            other => panic!("expected TypeMismatch, got: {other}"),
        }
    }

    #[test]
    fn float_rejected_in_integer_column() {
        let err = StatTable::from_columns(
            "t",
            vec![(ColumnSpec::integer("Runs"), vec![Value::Float(1.5)])],
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::TypeMismatch { .. }));
    }

    #[test]
    fn integer_widens_in_float_column() {
        let t = StatTable::from_columns(
            "t",
            vec![(ColumnSpec::float("Average"), vec![Value::Int(0)])],
        )
        .unwrap();
        assert_eq!(t.value(0, "Average"), Some(&Value::Float(0.0)));
    }

    #[test]
    fn undefined_rejected_in_text_column() {
        let err = StatTable::from_columns(
            "t",
            vec![(ColumnSpec::text("Player"), vec![Value::Undefined])],
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::TypeMismatch { .. }));
    }

    #[test]
    fn negative_rejected_unless_signed() {
        let err = StatTable::from_columns(
            "t",
            vec![(ColumnSpec::integer("Runs"), vec![Value::Int(-4)])],
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::NegativeValue { row: 0, .. }));

        let ok = StatTable::from_columns(
            "t",
            vec![(ColumnSpec::float("Net_Run_Rate").signed(), vec![Value::Float(-0.42)])],
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn non_finite_rejected() {
        let err = StatTable::from_columns(
            "t",
            vec![(ColumnSpec::float("Average"), vec![Value::Float(f64::NAN)])],
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::NonFinite { .. }));
    }

    #[test]
    fn from_columns_rejects_ragged_literal() {
        let err = StatTable::from_columns(
            "phases",
            vec![
                (ColumnSpec::text("Phase"), vec!["a".into(), "b".into()]),
                (ColumnSpec::integer("Runs"), vec![Value::Int(1)]),
            ],
        )
        .unwrap_err();
        match err {
            SchemaError::LengthMismatch {
                column,
                expected,
                found,
                ..
            } => {
                assert_eq!(column, "Runs");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected LengthMismatch, got: {other}"),
        }
    }

    #[test]
    fn duplicate_declared_column_rejected() {
        let err = StatTable::new(
            "t",
            vec![ColumnSpec::integer("Runs"), ColumnSpec::float("Runs")],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateColumn { .. }));
    }

    #[test]
    fn select_returns_new_table_and_leaves_input_alone() {
        let t = captain_table();
        let before = t.clone();
        let captain = t.select(|row| row.number("Innings").is_some_and(|n| n < 60.0));
        assert_eq!(captain.len(), 1);
        assert_eq!(captain.value(0, "Role"), Some(&Value::from("As Captain")));
        assert_eq!(t, before);
    }

    #[test]
    fn select_labels_requires_text_column() {
        let t = captain_table();
        let picked = t.select_labels("Role", &["As Player", "Nobody"]).unwrap();
        assert_eq!(picked.labels("Role").unwrap(), vec!["As Player"]);

        let err = t.select_labels("Innings", &["x"]).unwrap_err();
        assert!(matches!(err, SchemaError::TypeMismatch { .. }));
    }

    #[test]
    fn project_reorders_and_checks_names() {
        let t = captain_table();
        let p = t.project(&["Average", "Role"]).unwrap();
        assert_eq!(p.column_names(), vec!["Average", "Role"]);
        assert_eq!(p.value(0, "Average"), Some(&Value::Float(38.74)));

        let err = t.project(&["Role", "Sixes"]).unwrap_err();
        assert!(matches!(err, SchemaError::MissingColumn { ref column, .. } if column == "Sixes"));

        let err = t.project(&["Role", "Role"]).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateColumn { .. }));
    }

    #[test]
    fn with_column_appends_without_touching_input() {
        let t = captain_table();
        let before = t.clone();
        let extended = t
            .with_column(ColumnSpec::integer("Hundreds"), vec![Value::Int(3), Value::Int(2)])
            .unwrap();
        assert_eq!(extended.columns().len(), 4);
        assert_eq!(extended.value(1, "Hundreds"), Some(&Value::Int(2)));
        assert_eq!(t, before);
        assert!(!t.has_column("Hundreds"));
    }

    #[test]
    fn with_column_rejects_existing_name_and_wrong_length() {
        let t = captain_table();
        let err = t
            .with_column(ColumnSpec::float("Average"), vec![Value::Float(1.0), Value::Float(2.0)])
            .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateColumn { .. }));

        let err = t
            .with_column(ColumnSpec::float("Rate"), vec![Value::Float(1.0)])
            .unwrap_err();
        assert!(matches!(err, SchemaError::LengthMismatch { expected: 2, found: 1, .. }));
    }

    #[test]
    fn melt_groups_by_variable() {
        let t = captain_table();
        let long = t.melt("Role", &["Innings", "Average"]).unwrap();
        assert_eq!(long.column_names(), vec!["Role", "variable", "value"]);
        assert_eq!(long.len(), 4);
        assert_eq!(long.value(0, "variable"), Some(&Value::from("Innings")));
        assert_eq!(long.value(0, "value"), Some(&Value::Float(50.0)));
        assert_eq!(long.value(3, "Role"), Some(&Value::from("As Player")));
        assert_eq!(long.value(3, "value"), Some(&Value::Float(29.17)));
    }

    #[test]
    fn melt_as_names_the_long_columns() {
        let t = captain_table();
        let long = t.melt_as("Role", &["Average"], "Metric", "Score").unwrap();
        assert_eq!(long.column_names(), vec!["Role", "Metric", "Score"]);
        assert_eq!(long.value(1, "Metric"), Some(&Value::from("Average")));
        assert_eq!(long.value(1, "Score"), Some(&Value::Float(29.17)));

        let err = t.melt_as("Role", &["Average"], "Role", "Score").unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateColumn { .. }));
    }

    #[test]
    fn melt_rejects_text_value_column() {
        let t = captain_table();
        let err = t.melt("Innings", &["Role"]).unwrap_err();
        assert!(matches!(err, SchemaError::TypeMismatch { .. }));
    }

    #[test]
    fn numeric_column_maps_undefined_to_none() {
        let t = StatTable::from_columns(
            "t",
            vec![(
                ColumnSpec::float("Rate"),
                vec![Value::Float(0.5), Value::Undefined],
            )],
        )
        .unwrap();
        assert_eq!(t.numeric_column("Rate").unwrap(), vec![Some(0.5), None]);
    }

    #[test]
    fn undefined_serializes_as_null() {
        let json = serde_json::to_string(&vec![Value::Int(3), Value::Undefined]).unwrap();
        assert_eq!(json, "[3,null]");
    }
}
