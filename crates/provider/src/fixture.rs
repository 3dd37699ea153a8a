//! An in-memory metrics provider backed by a fixed catalog.
//!
//! [`StaticMetricsProvider`] performs no I/O. It answers every lookup from a
//! [`StaticCatalog`], which derives `Deserialize` so it can be loaded from a
//! TOML or JSON file. Useful for local development, demos, and tests where a
//! real metrics API is not available.

use std::collections::{BTreeMap, HashSet};

use metricvar_core::{DimensionFilters, Ec2Filters, SelectableValue, TagFilters};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::provider::{LookupResult, MetricsProvider};

/// Metrics published in one namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricEntry {
    pub namespace: String,
    /// Restricts the entry to one region. `None` matches every region.
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub dimension_keys: Vec<String>,
}

/// Values of one dimension key for one metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionValueEntry {
    pub namespace: String,
    pub metric: String,
    pub key: String,
    #[serde(default)]
    pub region: Option<String>,
    pub values: Vec<String>,
    /// Other dimensions the series carries, checked against dimension filters.
    #[serde(default)]
    pub dimensions: BTreeMap<String, String>,
}

/// EBS volumes attached to one instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EbsVolumeEntry {
    pub instance_id: String,
    #[serde(default)]
    pub region: Option<String>,
    pub volume_ids: Vec<String>,
}

/// One EC2 instance with its attributes and tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceEntry {
    pub instance_id: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl InstanceEntry {
    /// Value of an attribute. `InstanceId` is always available and
    /// `Tags.<key>` reads a tag.
    fn attribute(&self, name: &str) -> Option<&str> {
        if let Some(tag) = name.strip_prefix("Tags.") {
            return self.tags.get(tag).map(String::as_str);
        }
        match self.attributes.get(name) {
            Some(value) => Some(value.as_str()),
            None if name == "InstanceId" => Some(self.instance_id.as_str()),
            None => None,
        }
    }

    fn matches(&self, filters: &Ec2Filters) -> bool {
        filters.iter().all(|(name, allowed)| {
            let actual = match name.strip_prefix("tag:") {
                Some(tag) => self.tags.get(tag).map(String::as_str),
                None => self.attribute(name),
            };
            actual.is_some_and(|v| allowed.iter().any(|a| a == v))
        })
    }
}

/// A taggable resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceEntry {
    pub arn: String,
    /// Resource type in `service:type` form, e.g. `ec2:instance`.
    pub resource_type: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl ResourceEntry {
    /// Every tag filter must match. An empty value list only requires the
    /// tag to exist.
    fn matches(&self, tags: &TagFilters) -> bool {
        tags.iter().all(|(key, allowed)| {
            self.tags
                .get(key)
                .is_some_and(|v| allowed.is_empty() || allowed.iter().any(|a| a == v))
        })
    }
}

/// Everything a [`StaticMetricsProvider`] knows about.
///
/// # Example
///
/// ```toml
/// regions = ["us-east-1", "eu-west-1"]
/// namespaces = ["AWS/EC2"]
///
/// [[metrics]]
/// namespace = "AWS/EC2"
/// names = ["CPUUtilization", "NetworkIn"]
/// dimension_keys = ["InstanceId"]
///
/// [[instances]]
/// instance_id = "i-0abc"
/// region = "us-east-1"
/// attributes = { InstanceType = "t3.micro" }
/// tags = { Name = "web-1" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticCatalog {
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub namespaces: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<MetricEntry>,
    #[serde(default)]
    pub dimension_values: Vec<DimensionValueEntry>,
    #[serde(default)]
    pub ebs_volumes: Vec<EbsVolumeEntry>,
    #[serde(default)]
    pub instances: Vec<InstanceEntry>,
    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
    /// Overrides the standard statistics list when set.
    #[serde(default)]
    pub statistics: Option<Vec<String>>,
}

fn in_region(entry_region: Option<&String>, region: &str) -> bool {
    entry_region.is_none_or(|r| r == region)
}

/// Collect values into label/value pairs, dropping repeats (first wins).
fn unique<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<SelectableValue> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(*v))
        .map(SelectableValue::same)
        .collect()
}

/// A [`MetricsProvider`] that answers from a [`StaticCatalog`].
pub struct StaticMetricsProvider {
    name: String,
    catalog: StaticCatalog,
}

impl std::fmt::Debug for StaticMetricsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticMetricsProvider")
            .field("name", &self.name)
            .field("regions", &self.catalog.regions.len())
            .field("namespaces", &self.catalog.namespaces.len())
            .finish_non_exhaustive()
    }
}

impl StaticMetricsProvider {
    pub fn new(name: impl Into<String>, catalog: StaticCatalog) -> Self {
        Self {
            name: name.into(),
            catalog,
        }
    }

    pub fn catalog(&self) -> &StaticCatalog {
        &self.catalog
    }
}

impl MetricsProvider for StaticMetricsProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn list_regions(&self) -> LookupResult {
        Ok(unique(self.catalog.regions.iter().map(String::as_str)))
    }

    async fn list_namespaces(&self) -> LookupResult {
        Ok(unique(self.catalog.namespaces.iter().map(String::as_str)))
    }

    async fn list_metrics(&self, namespace: &str, region: &str) -> LookupResult {
        debug!(provider = %self.name, namespace, region, "static lookup: metrics");
        Ok(unique(
            self.catalog
                .metrics
                .iter()
                .filter(|m| m.namespace == namespace && in_region(m.region.as_ref(), region))
                .flat_map(|m| m.names.iter().map(String::as_str)),
        ))
    }

    async fn list_dimension_keys(&self, namespace: &str, region: &str) -> LookupResult {
        debug!(provider = %self.name, namespace, region, "static lookup: dimension keys");
        Ok(unique(
            self.catalog
                .metrics
                .iter()
                .filter(|m| m.namespace == namespace && in_region(m.region.as_ref(), region))
                .flat_map(|m| m.dimension_keys.iter().map(String::as_str)),
        ))
    }

    async fn list_dimension_values(
        &self,
        region: &str,
        namespace: &str,
        metric_name: &str,
        dimension_key: &str,
        filters: &DimensionFilters,
    ) -> LookupResult {
        debug!(
            provider = %self.name,
            region,
            namespace,
            metric_name,
            dimension_key,
            filters = filters.len(),
            "static lookup: dimension values"
        );
        let own_filter = filters.get(dimension_key);
        Ok(unique(
            self.catalog
                .dimension_values
                .iter()
                .filter(|e| {
                    e.namespace == namespace
                        && e.metric == metric_name
                        && e.key == dimension_key
                        && in_region(e.region.as_ref(), region)
                })
                .filter(|e| {
                    filters.iter().all(|(dimension, allowed)| {
                        e.dimensions
                            .get(dimension)
                            .is_none_or(|actual| allowed.allows(actual))
                    })
                })
                .flat_map(|e| e.values.iter().map(String::as_str))
                .filter(|v| own_filter.is_none_or(|allowed| allowed.allows(v))),
        ))
    }

    async fn list_ebs_volume_ids(&self, region: &str, instance_id: &str) -> LookupResult {
        debug!(provider = %self.name, region, instance_id, "static lookup: ebs volume ids");
        Ok(unique(
            self.catalog
                .ebs_volumes
                .iter()
                .filter(|e| e.instance_id == instance_id && in_region(e.region.as_ref(), region))
                .flat_map(|e| e.volume_ids.iter().map(String::as_str)),
        ))
    }

    async fn list_ec2_instance_attribute(
        &self,
        region: &str,
        attribute_name: &str,
        filters: &Ec2Filters,
    ) -> LookupResult {
        debug!(
            provider = %self.name,
            region,
            attribute_name,
            filters = filters.len(),
            "static lookup: ec2 instance attribute"
        );
        Ok(unique(
            self.catalog
                .instances
                .iter()
                .filter(|i| in_region(i.region.as_ref(), region) && i.matches(filters))
                .filter_map(|i| i.attribute(attribute_name)),
        ))
    }

    async fn list_resource_arns(
        &self,
        region: &str,
        resource_type: &str,
        tags: &TagFilters,
    ) -> LookupResult {
        debug!(
            provider = %self.name,
            region,
            resource_type,
            tags = tags.len(),
            "static lookup: resource arns"
        );
        Ok(unique(
            self.catalog
                .resources
                .iter()
                .filter(|r| {
                    r.resource_type == resource_type
                        && in_region(r.region.as_ref(), region)
                        && r.matches(tags)
                })
                .map(|r| r.arn.as_str()),
        ))
    }

    fn standard_statistics(&self) -> Vec<String> {
        self.catalog
            .statistics
            .clone()
            .unwrap_or_else(metricvar_core::standard_statistics)
    }
}
