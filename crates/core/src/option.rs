use serde::{Deserialize, Serialize};

/// A `{label, value}` pair as returned by the metrics provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectableValue {
    pub label: String,
    pub value: String,
}

impl SelectableValue {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// A pair whose label and value are the same string.
    pub fn same(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// One selectable option of a templating variable.
///
/// `expandable` tells the dashboard that the option may itself be used as a
/// nested template reference. Options produced by the resolver always set it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricFindValue {
    pub text: String,
    pub value: String,
    pub expandable: bool,
}

impl MetricFindValue {
    /// An expandable option with the given text and value.
    pub fn expandable(text: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            value: value.into(),
            expandable: true,
        }
    }

    /// An expandable option whose text and value are both `name`.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::expandable(name.clone(), name)
    }
}

impl From<SelectableValue> for MetricFindValue {
    fn from(item: SelectableValue) -> Self {
        Self::expandable(item.label, item.value)
    }
}
