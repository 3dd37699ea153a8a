use std::fmt;

use serde::{Deserialize, Serialize};

use crate::filter::{
    DimensionFilterValue, DimensionFilters, Ec2Filters, FilterParseError, FilterSet, TagFilters,
};

/// Discriminant selecting which lookup a variable query performs.
///
/// Serialized with the data source's wire spellings; the PascalCase names
/// are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableQueryType {
    #[serde(rename = "regions", alias = "Regions")]
    Regions,
    #[serde(rename = "namespaces", alias = "Namespaces")]
    Namespaces,
    #[serde(rename = "metrics", alias = "Metrics")]
    Metrics,
    #[serde(rename = "dimensionKeys", alias = "DimensionKeys")]
    DimensionKeys,
    #[serde(rename = "dimensionValues", alias = "DimensionValues")]
    DimensionValues,
    #[serde(rename = "ebsVolumeIds", alias = "EBSVolumeIDs")]
    EbsVolumeIds,
    #[serde(rename = "ec2InstanceAttributes", alias = "EC2InstanceAttributes")]
    Ec2InstanceAttributes,
    #[serde(rename = "resourceARNs", alias = "ResourceArns")]
    ResourceArns,
    #[serde(rename = "statistics", alias = "Statistics")]
    Statistics,
}

impl VariableQueryType {
    pub const ALL: [Self; 9] = [
        Self::Regions,
        Self::Namespaces,
        Self::Metrics,
        Self::DimensionKeys,
        Self::DimensionValues,
        Self::EbsVolumeIds,
        Self::Ec2InstanceAttributes,
        Self::ResourceArns,
        Self::Statistics,
    ];

    /// The wire spelling of this query type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Regions => "regions",
            Self::Namespaces => "namespaces",
            Self::Metrics => "metrics",
            Self::DimensionKeys => "dimensionKeys",
            Self::DimensionValues => "dimensionValues",
            Self::EbsVolumeIds => "ebsVolumeIds",
            Self::Ec2InstanceAttributes => "ec2InstanceAttributes",
            Self::ResourceArns => "resourceARNs",
            Self::Statistics => "statistics",
        }
    }
}

impl fmt::Display for VariableQueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire form of a variable query, as saved in a dashboard.
///
/// Only the fields relevant to `query_type` are read; the rest are ignored.
/// `ec2_filters` and `tags` hold serialized JSON expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableQueryDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,
    pub query_type: VariableQueryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension_filters: Option<DimensionFilters>,
    #[serde(rename = "instanceID", default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ec2_filters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl VariableQueryDescriptor {
    /// A descriptor of the given type with every optional field unset.
    pub fn new(query_type: VariableQueryType) -> Self {
        Self {
            ref_id: None,
            query_type,
            region: None,
            namespace: None,
            metric_name: None,
            dimension_key: None,
            dimension_filters: None,
            instance_id: None,
            attribute_name: None,
            ec2_filters: None,
            resource_type: None,
            tags: None,
        }
    }

    #[must_use]
    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = Some(ref_id.into());
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_metric_name(mut self, metric_name: impl Into<String>) -> Self {
        self.metric_name = Some(metric_name.into());
        self
    }

    #[must_use]
    pub fn with_dimension_key(mut self, dimension_key: impl Into<String>) -> Self {
        self.dimension_key = Some(dimension_key.into());
        self
    }

    /// Add one dimension filter, creating the filter map if needed.
    #[must_use]
    pub fn with_dimension_filter(
        mut self,
        dimension: impl Into<String>,
        value: impl Into<DimensionFilterValue>,
    ) -> Self {
        self.dimension_filters
            .get_or_insert_with(DimensionFilters::new)
            .insert(dimension.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_instance_id(mut self, instance_id: impl Into<String>) -> Self {
        self.instance_id = Some(instance_id.into());
        self
    }

    #[must_use]
    pub fn with_attribute_name(mut self, attribute_name: impl Into<String>) -> Self {
        self.attribute_name = Some(attribute_name.into());
        self
    }

    /// Set the serialized EC2 filter expression.
    #[must_use]
    pub fn with_ec2_filters(mut self, ec2_filters: impl Into<String>) -> Self {
        self.ec2_filters = Some(ec2_filters.into());
        self
    }

    #[must_use]
    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    /// Set the serialized tag filter expression.
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }
}

/// A validated variable query: one variant per lookup kind, each carrying
/// only the inputs its lookup needs.
///
/// Fields that gate a lookup (`metric_name`, `dimension_key`, `instance_id`,
/// `attribute_name`, `resource_type`) stay optional here; an empty string on
/// the wire is normalized to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableQuery {
    Regions,
    Namespaces,
    Metrics {
        namespace: String,
        region: String,
    },
    DimensionKeys {
        namespace: String,
        region: String,
    },
    DimensionValues {
        region: String,
        namespace: String,
        metric_name: Option<String>,
        dimension_key: Option<String>,
        dimension_filters: DimensionFilters,
    },
    EbsVolumeIds {
        region: String,
        instance_id: Option<String>,
    },
    Ec2InstanceAttributes {
        region: String,
        attribute_name: Option<String>,
        filters: Ec2Filters,
    },
    ResourceArns {
        region: String,
        resource_type: Option<String>,
        tags: TagFilters,
    },
    Statistics,
}

impl VariableQuery {
    pub fn query_type(&self) -> VariableQueryType {
        match self {
            Self::Regions => VariableQueryType::Regions,
            Self::Namespaces => VariableQueryType::Namespaces,
            Self::Metrics { .. } => VariableQueryType::Metrics,
            Self::DimensionKeys { .. } => VariableQueryType::DimensionKeys,
            Self::DimensionValues { .. } => VariableQueryType::DimensionValues,
            Self::EbsVolumeIds { .. } => VariableQueryType::EbsVolumeIds,
            Self::Ec2InstanceAttributes { .. } => VariableQueryType::Ec2InstanceAttributes,
            Self::ResourceArns { .. } => VariableQueryType::ResourceArns,
            Self::Statistics => VariableQueryType::Statistics,
        }
    }
}

fn or_empty(field: Option<&String>) -> String {
    field.cloned().unwrap_or_default()
}

fn present(field: Option<&String>) -> Option<String> {
    field.filter(|v| !v.is_empty()).cloned()
}

impl TryFrom<&VariableQueryDescriptor> for VariableQuery {
    type Error = FilterParseError;

    fn try_from(d: &VariableQueryDescriptor) -> Result<Self, Self::Error> {
        let region = || or_empty(d.region.as_ref());
        let namespace = || or_empty(d.namespace.as_ref());

        Ok(match d.query_type {
            VariableQueryType::Regions => Self::Regions,
            VariableQueryType::Namespaces => Self::Namespaces,
            VariableQueryType::Metrics => Self::Metrics {
                namespace: namespace(),
                region: region(),
            },
            VariableQueryType::DimensionKeys => Self::DimensionKeys {
                namespace: namespace(),
                region: region(),
            },
            VariableQueryType::DimensionValues => Self::DimensionValues {
                region: region(),
                namespace: namespace(),
                metric_name: present(d.metric_name.as_ref()),
                dimension_key: present(d.dimension_key.as_ref()),
                dimension_filters: d.dimension_filters.clone().unwrap_or_default(),
            },
            VariableQueryType::EbsVolumeIds => Self::EbsVolumeIds {
                region: region(),
                instance_id: present(d.instance_id.as_ref()),
            },
            VariableQueryType::Ec2InstanceAttributes => Self::Ec2InstanceAttributes {
                region: region(),
                attribute_name: present(d.attribute_name.as_ref()),
                filters: FilterSet::parse("ec2Filters", d.ec2_filters.as_deref())?,
            },
            VariableQueryType::ResourceArns => Self::ResourceArns {
                region: region(),
                resource_type: present(d.resource_type.as_ref()),
                tags: FilterSet::parse("tags", d.tags.as_deref())?,
            },
            VariableQueryType::Statistics => Self::Statistics,
        })
    }
}

impl TryFrom<VariableQueryDescriptor> for VariableQuery {
    type Error = FilterParseError;

    fn try_from(d: VariableQueryDescriptor) -> Result<Self, Self::Error> {
        Self::try_from(&d)
    }
}
