//! List query parameters
//!
//! Filters and sorting are given on the command line as
//! `property[:operator]=value[,value...]` and `property[:asc|desc]`, and sent
//! to the API as query pairs of the same shape.

use crate::error::{AnsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a list filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Eq,
    Neq,
    Lk,
    Nlk,
    Gt,
    Lt,
    In,
    Nin,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Neq => "neq",
            FilterOperator::Lk => "lk",
            FilterOperator::Nlk => "nlk",
            FilterOperator::Gt => "gt",
            FilterOperator::Lt => "lt",
            FilterOperator::In => "in",
            FilterOperator::Nin => "nin",
        }
    }

    /// `in` and `nin` take a list; everything else takes one value.
    pub fn is_multi_value(&self) -> bool {
        matches!(self, FilterOperator::In | FilterOperator::Nin)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOperator {
    type Err = AnsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "eq" => Ok(FilterOperator::Eq),
            "neq" => Ok(FilterOperator::Neq),
            "lk" => Ok(FilterOperator::Lk),
            "nlk" => Ok(FilterOperator::Nlk),
            "gt" => Ok(FilterOperator::Gt),
            "lt" => Ok(FilterOperator::Lt),
            "in" => Ok(FilterOperator::In),
            "nin" => Ok(FilterOperator::Nin),
            other => Err(AnsError::invalid_flag(
                "filter",
                format!("unknown operator '{}'", other),
            )),
        }
    }
}

/// One list filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub property: String,
    pub operator: FilterOperator,
    pub values: Vec<String>,
}

impl Filter {
    pub fn new(property: impl Into<String>, operator: FilterOperator, values: Vec<String>) -> Self {
        Self {
            property: property.into(),
            operator,
            values,
        }
    }

    /// Query pair sent to the API, e.g. `("name:lk", "*example*")`.
    pub fn query_pair(&self) -> (String, String) {
        (
            format!("{}:{}", self.property, self.operator),
            self.values.join(","),
        )
    }
}

impl FromStr for Filter {
    type Err = AnsError;

    fn from_str(s: &str) -> Result<Self> {
        let (lhs, rhs) = s.split_once('=').ok_or_else(|| {
            AnsError::invalid_flag("filter", format!("missing '=' in '{}'", s))
        })?;

        let (property, operator) = match lhs.split_once(':') {
            Some((property, op)) => (property.trim(), op.trim().parse()?),
            None => (lhs.trim(), FilterOperator::Eq),
        };
        if property.is_empty() {
            return Err(AnsError::invalid_flag(
                "filter",
                format!("missing property in '{}'", s),
            ));
        }

        let values: Vec<String> = rhs
            .split(',')
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();
        if values.is_empty() {
            return Err(AnsError::invalid_flag(
                "filter",
                format!("missing value in '{}'", s),
            ));
        }
        if values.len() > 1 && !operator.is_multi_value() {
            return Err(AnsError::invalid_flag(
                "filter",
                format!("operator '{}' accepts a single value", operator),
            ));
        }

        Ok(Filter::new(property, operator, values))
    }
}

/// List ordering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sorting {
    pub property: String,
    pub descending: bool,
}

impl Sorting {
    pub fn query_value(&self) -> String {
        let direction = if self.descending { "desc" } else { "asc" };
        format!("{}:{}", self.property, direction)
    }
}

impl FromStr for Sorting {
    type Err = AnsError;

    fn from_str(s: &str) -> Result<Self> {
        let (property, descending) = match s.split_once(':') {
            Some((property, dir)) => match dir.trim().to_ascii_lowercase().as_str() {
                "asc" => (property.trim(), false),
                "desc" => (property.trim(), true),
                other => {
                    return Err(AnsError::invalid_flag(
                        "sort",
                        format!("unknown direction '{}'", other),
                    ))
                }
            },
            None => (s.trim(), false),
        };
        if property.is_empty() {
            return Err(AnsError::invalid_flag("sort", "missing property"));
        }
        Ok(Sorting {
            property: property.to_string(),
            descending,
        })
    }
}

/// Filters and sorting for a list call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterList {
    pub filters: Vec<Filter>,
    pub sorting: Option<Sorting>,
}

impl ParameterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse raw `--filter` and `--sort` flag values.
    pub fn from_flags(filters: &[String], sort: Option<&str>) -> Result<Self> {
        let filters = filters
            .iter()
            .map(|f| f.parse())
            .collect::<Result<Vec<Filter>>>()?;
        let sorting = sort.map(str::parse).transpose()?;
        Ok(Self { filters, sorting })
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_sorting(mut self, sorting: Sorting) -> Self {
        self.sorting = Some(sorting);
        self
    }

    /// Query pairs in a stable order: filters as given, then sorting.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> =
            self.filters.iter().map(Filter::query_pair).collect();
        if let Some(sorting) = &self.sorting {
            pairs.push(("sort".to_string(), sorting.query_value()));
        }
        pairs
    }
}
