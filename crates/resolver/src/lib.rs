//! Variable query resolution.
//!
//! [`VariableQueryResolver`] maps each [`VariableQuery`](metricvar_core::VariableQuery)
//! kind to one lookup on a [`DynMetricsProvider`](metricvar_provider::DynMetricsProvider)
//! and turns the answer into dashboard options.

pub mod error;
pub mod resolver;

pub use error::ResolveError;
pub use resolver::VariableQueryResolver;
