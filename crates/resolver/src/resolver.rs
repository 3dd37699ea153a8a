use std::fmt;
use std::sync::Arc;

use metricvar_core::{
    DataQueryRequest, DataQueryResponse, MetricFindValue, VariableQuery, VariableQueryDescriptor,
};
use metricvar_provider::{DynMetricsProvider, MetricsProvider};
use tracing::{debug, error, instrument, warn};

use crate::error::ResolveError;

/// Resolves variable queries into option lists.
///
/// Each query kind maps to exactly one provider call (or none, for
/// statistics). The resolver holds no state besides the provider handle, so
/// it is cheap to clone and safe to share between tasks.
#[derive(Clone)]
pub struct VariableQueryResolver {
    provider: Arc<dyn DynMetricsProvider>,
}

impl fmt::Debug for VariableQueryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariableQueryResolver")
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl VariableQueryResolver {
    pub fn new(provider: Arc<dyn DynMetricsProvider>) -> Self {
        Self { provider }
    }

    /// Wrap a concrete provider.
    pub fn from_provider<P: MetricsProvider + 'static>(provider: P) -> Self {
        Self::new(Arc::new(provider))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Resolve `query` into options. Never fails: every error is logged and
    /// an empty list is returned.
    pub async fn resolve(&self, query: &VariableQuery) -> Vec<MetricFindValue> {
        match self.try_resolve(query).await {
            Ok(options) => options,
            Err(e) => {
                self.report(&e, query);
                Vec::new()
            }
        }
    }

    /// Convert a wire descriptor and resolve it. Malformed filter
    /// expressions yield an empty list, like any other failure.
    pub async fn resolve_descriptor(
        &self,
        descriptor: &VariableQueryDescriptor,
    ) -> Vec<MetricFindValue> {
        match VariableQuery::try_from(descriptor) {
            Ok(query) => self.resolve(&query).await,
            Err(e) => {
                let payload = serde_json::to_string(descriptor).unwrap_or_default();
                self.report(&ResolveError::from(e), &payload);
                Vec::new()
            }
        }
    }

    /// Batch entry point. Only the first target of `request` is resolved.
    pub async fn query(&self, request: &DataQueryRequest) -> DataQueryResponse {
        let Some(target) = request.first_target() else {
            debug!(request_id = ?request.request_id, "variable query request has no targets");
            return DataQueryResponse::default();
        };
        if request.targets.len() > 1 {
            debug!(
                request_id = ?request.request_id,
                ignored = request.targets.len() - 1,
                "only the first variable query target is resolved"
            );
        }
        DataQueryResponse::new(self.resolve_descriptor(target).await)
    }

    /// Resolve `query`, keeping the failure reason.
    ///
    /// Required fields are checked before the provider is called, so a
    /// [`ResolveError::MissingField`] guarantees no lookup happened.
    #[instrument(
        name = "resolver.try_resolve",
        skip_all,
        fields(query_type = %query.query_type(), provider = %self.provider.name())
    )]
    pub async fn try_resolve(
        &self,
        query: &VariableQuery,
    ) -> Result<Vec<MetricFindValue>, ResolveError> {
        let items = match query {
            VariableQuery::Regions => self.provider.list_regions().await?,
            VariableQuery::Namespaces => self.provider.list_namespaces().await?,
            VariableQuery::Metrics { namespace, region } => {
                self.provider.list_metrics(namespace, region).await?
            }
            VariableQuery::DimensionKeys { namespace, region } => {
                self.provider.list_dimension_keys(namespace, region).await?
            }
            VariableQuery::DimensionValues {
                region,
                namespace,
                metric_name,
                dimension_key,
                dimension_filters,
            } => {
                let dimension_key = required(dimension_key.as_deref(), "dimensionKey")?;
                let metric_name = required(metric_name.as_deref(), "metricName")?;
                self.provider
                    .list_dimension_values(
                        region,
                        namespace,
                        metric_name,
                        dimension_key,
                        dimension_filters,
                    )
                    .await?
            }
            VariableQuery::EbsVolumeIds {
                region,
                instance_id,
            } => {
                let instance_id = required(instance_id.as_deref(), "instanceID")?;
                self.provider.list_ebs_volume_ids(region, instance_id).await?
            }
            VariableQuery::Ec2InstanceAttributes {
                region,
                attribute_name,
                filters,
            } => {
                let attribute_name = required(attribute_name.as_deref(), "attributeName")?;
                self.provider
                    .list_ec2_instance_attribute(region, attribute_name, filters)
                    .await?
            }
            VariableQuery::ResourceArns {
                region,
                resource_type,
                tags,
            } => {
                let resource_type = required(resource_type.as_deref(), "resourceType")?;
                self.provider
                    .list_resource_arns(region, resource_type, tags)
                    .await?
            }
            VariableQuery::Statistics => {
                return Ok(self
                    .provider
                    .standard_statistics()
                    .into_iter()
                    .map(MetricFindValue::from_name)
                    .collect());
            }
        };

        debug!(count = items.len(), "variable query resolved");
        Ok(items.into_iter().map(MetricFindValue::from).collect())
    }

    fn report(&self, err: &ResolveError, query: &dyn fmt::Debug) {
        let provider = self.provider.name();
        match err {
            ResolveError::MissingField(field) => {
                debug!(provider, field, ?query, "variable query skipped: missing field");
            }
            ResolveError::InvalidFilter(e) => {
                warn!(provider, error = %e, ?query, "variable query has malformed filters");
            }
            ResolveError::Provider(e) => {
                error!(
                    provider,
                    error = %e,
                    retryable = e.is_retryable(),
                    ?query,
                    "variable query lookup failed"
                );
            }
        }
    }
}

fn required<'a>(field: Option<&'a str>, name: &'static str) -> Result<&'a str, ResolveError> {
    field.ok_or(ResolveError::MissingField(name))
}
