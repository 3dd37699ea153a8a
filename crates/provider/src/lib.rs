//! Metrics provider interface for the variable resolver.
//!
//! [`MetricsProvider`] is the strongly-typed trait implementors write;
//! [`DynMetricsProvider`] is its object-safe twin used behind
//! `Arc<dyn DynMetricsProvider>`. [`StaticMetricsProvider`] answers from an
//! in-memory [`StaticCatalog`].

pub mod error;
pub mod fixture;
pub mod provider;

pub use error::ProviderError;
pub use fixture::{
    DimensionValueEntry, EbsVolumeEntry, InstanceEntry, MetricEntry, ResourceEntry,
    StaticCatalog, StaticMetricsProvider,
};
pub use provider::{DynMetricsProvider, LookupResult, MetricsProvider};
