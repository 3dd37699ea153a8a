use std::future::Future;

use async_trait::async_trait;
use metricvar_core::{DimensionFilters, Ec2Filters, SelectableValue, TagFilters};

use crate::error::ProviderError;

/// Result of a single provider lookup.
pub type LookupResult = Result<Vec<SelectableValue>, ProviderError>;

/// Strongly-typed metrics provider trait with native `async fn`.
///
/// A provider is the client of the metrics API the variable resolver
/// enumerates. It owns its own connection and credential state and must be
/// safe to share between tasks.
///
/// This trait is **not** object-safe because it uses native `async fn`
/// methods. If you need dynamic dispatch, use [`DynMetricsProvider`] instead;
/// every `MetricsProvider` implements it via a blanket implementation.
pub trait MetricsProvider: Send + Sync {
    /// Returns the name of this provider, used in log fields.
    fn name(&self) -> &str;

    /// List the regions the metrics API is available in.
    fn list_regions(&self) -> impl Future<Output = LookupResult> + Send;

    /// List the metric namespaces.
    fn list_namespaces(&self) -> impl Future<Output = LookupResult> + Send;

    /// List the metric names published in `namespace`.
    fn list_metrics(
        &self,
        namespace: &str,
        region: &str,
    ) -> impl Future<Output = LookupResult> + Send;

    /// List the dimension keys used by metrics in `namespace`.
    fn list_dimension_keys(
        &self,
        namespace: &str,
        region: &str,
    ) -> impl Future<Output = LookupResult> + Send;

    /// List the values of `dimension_key` for `metric_name`, narrowed by
    /// `filters`.
    fn list_dimension_values(
        &self,
        region: &str,
        namespace: &str,
        metric_name: &str,
        dimension_key: &str,
        filters: &DimensionFilters,
    ) -> impl Future<Output = LookupResult> + Send;

    /// List the EBS volume ids attached to `instance_id`.
    fn list_ebs_volume_ids(
        &self,
        region: &str,
        instance_id: &str,
    ) -> impl Future<Output = LookupResult> + Send;

    /// List the values of `attribute_name` across the EC2 instances matching
    /// `filters`.
    fn list_ec2_instance_attribute(
        &self,
        region: &str,
        attribute_name: &str,
        filters: &Ec2Filters,
    ) -> impl Future<Output = LookupResult> + Send;

    /// List the ARNs of resources of `resource_type` matching `tags`.
    fn list_resource_arns(
        &self,
        region: &str,
        resource_type: &str,
        tags: &TagFilters,
    ) -> impl Future<Output = LookupResult> + Send;

    /// The standard statistic names. Defaults to
    /// [`metricvar_core::STANDARD_STATISTICS`].
    fn standard_statistics(&self) -> Vec<String> {
        metricvar_core::standard_statistics()
    }
}

/// Object-safe metrics provider trait for use behind
/// `Arc<dyn DynMetricsProvider>`.
///
/// Uses [`macro@async_trait`] to enable dynamic dispatch of async methods.
/// You generally should not implement this trait directly; implement
/// [`MetricsProvider`] and rely on the blanket implementation.
#[async_trait]
pub trait DynMetricsProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn list_regions(&self) -> LookupResult;

    async fn list_namespaces(&self) -> LookupResult;

    async fn list_metrics(&self, namespace: &str, region: &str) -> LookupResult;

    async fn list_dimension_keys(&self, namespace: &str, region: &str) -> LookupResult;

    async fn list_dimension_values(
        &self,
        region: &str,
        namespace: &str,
        metric_name: &str,
        dimension_key: &str,
        filters: &DimensionFilters,
    ) -> LookupResult;

    async fn list_ebs_volume_ids(&self, region: &str, instance_id: &str) -> LookupResult;

    async fn list_ec2_instance_attribute(
        &self,
        region: &str,
        attribute_name: &str,
        filters: &Ec2Filters,
    ) -> LookupResult;

    async fn list_resource_arns(
        &self,
        region: &str,
        resource_type: &str,
        tags: &TagFilters,
    ) -> LookupResult;

    fn standard_statistics(&self) -> Vec<String>;
}

/// Blanket implementation: any type that implements [`MetricsProvider`] also
/// implements [`DynMetricsProvider`], bridging the static and dynamic
/// dispatch worlds.
#[async_trait]
impl<T: MetricsProvider + Sync> DynMetricsProvider for T {
    fn name(&self) -> &str {
        MetricsProvider::name(self)
    }

    async fn list_regions(&self) -> LookupResult {
        MetricsProvider::list_regions(self).await
    }

    async fn list_namespaces(&self) -> LookupResult {
        MetricsProvider::list_namespaces(self).await
    }

    async fn list_metrics(&self, namespace: &str, region: &str) -> LookupResult {
        MetricsProvider::list_metrics(self, namespace, region).await
    }

    async fn list_dimension_keys(&self, namespace: &str, region: &str) -> LookupResult {
        MetricsProvider::list_dimension_keys(self, namespace, region).await
    }

    async fn list_dimension_values(
        &self,
        region: &str,
        namespace: &str,
        metric_name: &str,
        dimension_key: &str,
        filters: &DimensionFilters,
    ) -> LookupResult {
        MetricsProvider::list_dimension_values(
            self,
            region,
            namespace,
            metric_name,
            dimension_key,
            filters,
        )
        .await
    }

    async fn list_ebs_volume_ids(&self, region: &str, instance_id: &str) -> LookupResult {
        MetricsProvider::list_ebs_volume_ids(self, region, instance_id).await
    }

    async fn list_ec2_instance_attribute(
        &self,
        region: &str,
        attribute_name: &str,
        filters: &Ec2Filters,
    ) -> LookupResult {
        MetricsProvider::list_ec2_instance_attribute(self, region, attribute_name, filters).await
    }

    async fn list_resource_arns(
        &self,
        region: &str,
        resource_type: &str,
        tags: &TagFilters,
    ) -> LookupResult {
        MetricsProvider::list_resource_arns(self, region, resource_type, tags).await
    }

    fn standard_statistics(&self) -> Vec<String> {
        MetricsProvider::standard_statistics(self)
    }
}
