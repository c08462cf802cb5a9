//! In-memory table of named, typed columns.
//!
//! Every public operation in [`crate::domain`] takes a `&Table` and returns a
//! new one; the input is never mutated.

use std::borrow::Cow;

use chrono::NaiveDateTime;

use crate::domain::error::SchemaError;

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float(Vec<f64>),
    Int(Vec<i64>),
    Time(Vec<NaiveDateTime>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Int(v) => v.len(),
            Column::Time(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Column::Float(_) => "float",
            Column::Int(_) => "integer",
            Column::Time(_) => "timestamp",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows. A table without columns has zero rows.
    pub fn len(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }

    /// Append a column, or replace an existing column of the same name in place.
    pub fn push_column(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<(), SchemaError> {
        let name = name.into();
        if !self.columns.is_empty() && column.len() != self.len() {
            return Err(SchemaError::ColumnLength {
                column: name,
                expected: self.len(),
                found: column.len(),
            });
        }
        match self.names.iter().position(|n| *n == name) {
            Some(i) => self.columns[i] = column,
            None => {
                self.names.push(name);
                self.columns.push(column);
            }
        }
        Ok(())
    }

    pub fn with_column(
        mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<Self, SchemaError> {
        self.push_column(name, column)?;
        Ok(self)
    }

    /// Fails with the first name in `names` that is not a column of this table.
    pub fn require(&self, names: &[&str]) -> Result<(), SchemaError> {
        match names.iter().find(|n| !self.contains(n)) {
            Some(missing) => Err(SchemaError::missing(missing)),
            None => Ok(()),
        }
    }

    /// New table holding only `names`, in that order.
    pub fn select(&self, names: &[&str]) -> Result<Table, SchemaError> {
        self.require(names)?;
        let mut out = Table::new();
        for name in names {
            if let Some(column) = self.column(name) {
                out.push_column(*name, column.clone())?;
            }
        }
        Ok(out)
    }

    /// Column as floats. Integer columns are widened.
    pub fn floats(&self, name: &str) -> Result<Cow<'_, [f64]>, SchemaError> {
        match self.column(name) {
            Some(Column::Float(v)) => Ok(Cow::Borrowed(v)),
            Some(Column::Int(v)) => Ok(Cow::Owned(v.iter().map(|&x| x as f64).collect())),
            Some(other) => Err(SchemaError::ColumnType {
                column: name.to_string(),
                expected: "float",
                found: other.kind(),
            }),
            None => Err(SchemaError::missing(name)),
        }
    }

    /// Column as integers. Float columns are accepted when every value is integral.
    pub fn ints(&self, name: &str) -> Result<Cow<'_, [i64]>, SchemaError> {
        match self.column(name) {
            Some(Column::Int(v)) => Ok(Cow::Borrowed(v)),
            Some(Column::Float(v)) => v
                .iter()
                .enumerate()
                .map(|(row, &x)| {
                    if x.is_finite() && x.fract() == 0.0 {
                        Ok(x as i64)
                    } else {
                        Err(SchemaError::NonIntegral {
                            column: name.to_string(),
                            row,
                            value: x,
                        })
                    }
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Cow::Owned),
            Some(other) => Err(SchemaError::ColumnType {
                column: name.to_string(),
                expected: "integer",
                found: other.kind(),
            }),
            None => Err(SchemaError::missing(name)),
        }
    }

    pub fn times(&self, name: &str) -> Result<&[NaiveDateTime], SchemaError> {
        match self.column(name) {
            Some(Column::Time(v)) => Ok(v),
            Some(other) => Err(SchemaError::ColumnType {
                column: name.to_string(),
                expected: "timestamp",
                found: other.kind(),
            }),
            None => Err(SchemaError::missing(name)),
        }
    }
}
