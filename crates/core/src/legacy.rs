//! Migration of older variable queries into [`VariableQueryDescriptor`].
//!
//! Dashboards saved before the structured editor existed store the variable
//! query as function-call text, for example
//! `dimension_values(us-east-1, AWS/EC2, CPUUtilization, InstanceId)`.
//! [`migrate_legacy_query`] upgrades that text (or passes a JSON descriptor
//! through unchanged) so the resolver only ever sees the current shape.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

use crate::filter::DimensionFilters;
use crate::query::{VariableQueryDescriptor, VariableQueryType};

/// Errors produced while migrating a legacy query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LegacyQueryError {
    /// The text matches none of the legacy query forms.
    #[error("unrecognized legacy variable query: {0}")]
    Unrecognized(String),

    /// The trailing filter argument of `dimension_values(...)` is not a
    /// JSON object of strings or string lists.
    #[error("invalid dimension filters: {0}")]
    InvalidFilters(String),

    /// The input looked like a JSON descriptor but could not be decoded.
    #[error("invalid query descriptor: {0}")]
    InvalidDescriptor(String),
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("legacy query pattern is valid")
}

static REGIONS_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"^regions\(\)$"));
static NAMESPACES_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"^namespaces\(\)$"));
static STATISTICS_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"^statistics\(\)$"));
static METRICS_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^metrics\(([^,)]+?)(?:,\s*([^,)]+?))?\)$"));
static DIMENSION_KEYS_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^dimension_keys\(([^,)]+?)(?:,\s*([^,)]+?))?\)$"));
static DIMENSION_VALUES_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^dimension_values\(([^,]+?),\s*([^,]+?),\s*([^,]+?),\s*([^,]+?)(?:,\s*(.+))?\)$")
});
static EBS_VOLUME_IDS_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^ebs_volume_ids\(([^,]+?),\s*([^,]+?)\)$"));
static EC2_INSTANCE_ATTRIBUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^ec2_instance_attribute\(([^,]+?),\s*([^,]+?),\s*(.+)\)$"));
static RESOURCE_ARNS_RE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^resource_arns\(([^,]+?),\s*([^,]+?),\s*(.+)\)$"));

/// Trimmed text of capture group `i`, if it participated in the match.
fn arg(caps: &Captures<'_>, i: usize) -> Option<String> {
    caps.get(i).map(|m| m.as_str().trim().to_owned())
}

/// Capture group `i` of a pattern where the group is mandatory.
fn required(caps: &Captures<'_>, i: usize) -> String {
    arg(caps, i).unwrap_or_default()
}

/// Upgrade a stored variable query into the current descriptor shape.
///
/// Accepts either a JSON-encoded [`VariableQueryDescriptor`] (returned
/// unchanged) or one of the legacy function-call forms:
///
/// ```
/// use metricvar_core::{migrate_legacy_query, VariableQueryType};
///
/// let d = migrate_legacy_query("metrics(AWS/EC2, eu-west-1)").unwrap();
/// assert_eq!(d.query_type, VariableQueryType::Metrics);
/// assert_eq!(d.namespace.as_deref(), Some("AWS/EC2"));
/// assert_eq!(d.region.as_deref(), Some("eu-west-1"));
/// ```
pub fn migrate_legacy_query(raw: &str) -> Result<VariableQueryDescriptor, LegacyQueryError> {
    let text = raw.trim();

    if text.starts_with('{') {
        return serde_json::from_str(text)
            .map_err(|e| LegacyQueryError::InvalidDescriptor(e.to_string()));
    }

    if REGIONS_RE.is_match(text) {
        return Ok(VariableQueryDescriptor::new(VariableQueryType::Regions));
    }
    if NAMESPACES_RE.is_match(text) {
        return Ok(VariableQueryDescriptor::new(VariableQueryType::Namespaces));
    }
    if STATISTICS_RE.is_match(text) {
        return Ok(VariableQueryDescriptor::new(VariableQueryType::Statistics));
    }

    if let Some(caps) = METRICS_RE.captures(text) {
        let mut d = VariableQueryDescriptor::new(VariableQueryType::Metrics)
            .with_namespace(required(&caps, 1));
        d.region = arg(&caps, 2);
        return Ok(d);
    }

    if let Some(caps) = DIMENSION_KEYS_RE.captures(text) {
        let mut d = VariableQueryDescriptor::new(VariableQueryType::DimensionKeys)
            .with_namespace(required(&caps, 1));
        d.region = arg(&caps, 2);
        return Ok(d);
    }

    if let Some(caps) = DIMENSION_VALUES_RE.captures(text) {
        let mut d = VariableQueryDescriptor::new(VariableQueryType::DimensionValues)
            .with_region(required(&caps, 1))
            .with_namespace(required(&caps, 2))
            .with_metric_name(required(&caps, 3))
            .with_dimension_key(required(&caps, 4));
        if let Some(raw_filters) = arg(&caps, 5) {
            let filters: DimensionFilters = serde_json::from_str(&raw_filters)
                .map_err(|e| LegacyQueryError::InvalidFilters(e.to_string()))?;
            d.dimension_filters = Some(filters);
        }
        return Ok(d);
    }

    if let Some(caps) = EBS_VOLUME_IDS_RE.captures(text) {
        return Ok(VariableQueryDescriptor::new(VariableQueryType::EbsVolumeIds)
            .with_region(required(&caps, 1))
            .with_instance_id(required(&caps, 2)));
    }

    if let Some(caps) = EC2_INSTANCE_ATTRIBUTE_RE.captures(text) {
        return Ok(
            VariableQueryDescriptor::new(VariableQueryType::Ec2InstanceAttributes)
                .with_region(required(&caps, 1))
                .with_attribute_name(required(&caps, 2))
                .with_ec2_filters(required(&caps, 3)),
        );
    }

    if let Some(caps) = RESOURCE_ARNS_RE.captures(text) {
        return Ok(VariableQueryDescriptor::new(VariableQueryType::ResourceArns)
            .with_region(required(&caps, 1))
            .with_resource_type(required(&caps, 2))
            .with_tags(required(&caps, 3)));
    }

    Err(LegacyQueryError::Unrecognized(text.to_owned()))
}
