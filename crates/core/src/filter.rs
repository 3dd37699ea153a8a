use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Allowed values for a single dimension in a `dimensionFilters` map.
///
/// On the wire a filter is either a bare string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionFilterValue {
    One(String),
    Many(Vec<String>),
}

impl DimensionFilterValue {
    /// Every value this filter allows, in declaration order.
    pub fn values(&self) -> &[String] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }

    /// Returns `true` if `candidate` is one of the allowed values.
    pub fn allows(&self, candidate: &str) -> bool {
        self.values().iter().any(|v| v == candidate)
    }
}

impl From<&str> for DimensionFilterValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

impl From<Vec<String>> for DimensionFilterValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

/// Dimension name to allowed value(s).
pub type DimensionFilters = BTreeMap<String, DimensionFilterValue>;

/// Errors raised while parsing a serialized filter expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterParseError {
    /// The expression is not valid JSON.
    #[error("{field}: invalid JSON: {message}")]
    Syntax {
        field: &'static str,
        message: String,
    },

    /// The expression is valid JSON but not an object.
    #[error("{field}: expected a JSON object")]
    NotAnObject { field: &'static str },

    /// A filter entry holds something other than a string or a string list.
    #[error("{field}: filter '{key}' must be a string or an array of strings")]
    InvalidValue { field: &'static str, key: String },
}

/// A parsed filter expression: filter name to the list of accepted values.
///
/// Used both for EC2 instance filters (`{"tag:Env": ["prod"]}`) and for
/// resource tag filters (`{"Env": ["prod", "staging"]}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeMap<String, Vec<String>>);

/// EC2 `DescribeInstances` style filters.
pub type Ec2Filters = FilterSet;

/// Resource Groups Tagging API style tag filters.
pub type TagFilters = FilterSet;

impl FilterSet {
    /// Create an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the serialized expression stored in `field`.
    ///
    /// A missing or blank expression is an empty filter set. A string value
    /// is accepted as a one-element list.
    pub fn parse(field: &'static str, raw: Option<&str>) -> Result<Self, FilterParseError> {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Ok(Self::default());
        };

        let parsed: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| FilterParseError::Syntax {
                field,
                message: e.to_string(),
            })?;

        let serde_json::Value::Object(entries) = parsed else {
            return Err(FilterParseError::NotAnObject { field });
        };

        let mut filters = BTreeMap::new();
        for (key, value) in entries {
            let values = match value {
                serde_json::Value::String(s) => vec![s],
                serde_json::Value::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => Ok(s),
                        _ => Err(FilterParseError::InvalidValue {
                            field,
                            key: key.clone(),
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                _ => return Err(FilterParseError::InvalidValue { field, key }),
            };
            filters.insert(key, values);
        }

        Ok(Self(filters))
    }

    /// Add (or replace) a filter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, values: &[&str]) -> Self {
        self.0
            .insert(key.into(), values.iter().map(|v| (*v).to_owned()).collect());
        self
    }

    /// Accepted values for `key`, if the filter is present.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
