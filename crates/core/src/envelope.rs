use serde::{Deserialize, Serialize};

use crate::option::MetricFindValue;
use crate::query::VariableQueryDescriptor;

/// Batch-style request handed to the resolver by the host.
///
/// Only the first target is resolved; any further targets are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQueryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default)]
    pub targets: Vec<VariableQueryDescriptor>,
}

impl DataQueryRequest {
    /// A request carrying exactly one target.
    pub fn single(target: VariableQueryDescriptor) -> Self {
        Self {
            request_id: None,
            targets: vec![target],
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// The target that will be resolved, if any.
    pub fn first_target(&self) -> Option<&VariableQueryDescriptor> {
        self.targets.first()
    }
}

/// The `{data: [...]}` envelope returned for a [`DataQueryRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQueryResponse {
    pub data: Vec<MetricFindValue>,
}

impl DataQueryResponse {
    pub fn new(data: Vec<MetricFindValue>) -> Self {
        Self { data }
    }
}
