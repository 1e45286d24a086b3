//! Explicit field mapping for rendered records
//!
//! Every record the CLI can print implements [`Fields`], which lists the
//! columns it can show (in display order) and which of them are shown when the
//! user does not ask for specific ones.

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

/// A single rendered value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Monetary amount in the account's currency
    Money(f64),
    Timestamp(DateTime<Utc>),
    Empty,
}

impl FieldValue {
    /// The amount, if this value is monetary
    pub fn money(&self) -> Option<f64> {
        match self {
            FieldValue::Money(amount) => Some(*amount),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Money(v) => write!(f, "{:.2}", v),
            FieldValue::Timestamp(t) => {
                f.write_str(&t.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
            FieldValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::Text(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(t: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(t)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FieldValue::Empty)
    }
}

/// One named column of a rendered row
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
    /// Shown when no explicit column selection is made
    pub default: bool,
}

/// Ordered name → value mapping for one rendered row
///
/// Insertion order is display order. Re-adding an existing name replaces its
/// value and flag without moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    fields: Vec<Field>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field with an explicit default-visibility flag.
    pub fn push(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
        default: bool,
    ) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => {
                existing.value = value;
                existing.default = default;
            }
            None => self.fields.push(Field {
                name,
                value,
                default,
            }),
        }
        self
    }

    /// Add a field hidden unless requested.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> &mut Self {
        self.push(name, value, false)
    }

    /// Add a default-visible field.
    pub fn add_default(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> &mut Self {
        self.push(name, value, true)
    }

    /// Add a monetary field.
    pub fn add_money(&mut self, name: impl Into<String>, amount: f64) -> &mut Self {
        self.push(name, FieldValue::Money(amount), false)
    }

    /// Set the default flag of every field from `columns`.
    pub fn mark_defaults(&mut self, columns: &[&str]) {
        for field in &mut self.fields {
            field.default = columns.iter().any(|c| *c == field.name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Explicit per-record column mapping.
pub trait Fields {
    /// Columns shown when the caller makes no selection, in no particular order;
    /// display order always follows [`Fields::fields`].
    const DEFAULT_COLUMNS: &'static [&'static str];

    /// Every column this record can render, in display order.
    fn fields(&self) -> FieldSet;
}
