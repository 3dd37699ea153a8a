pub mod envelope;
pub mod filter;
pub mod legacy;
pub mod option;
pub mod query;
pub mod statistics;

pub use envelope::{DataQueryRequest, DataQueryResponse};
pub use filter::{
    DimensionFilterValue, DimensionFilters, Ec2Filters, FilterParseError, FilterSet, TagFilters,
};
pub use legacy::{LegacyQueryError, migrate_legacy_query};
pub use option::{MetricFindValue, SelectableValue};
pub use query::{VariableQuery, VariableQueryDescriptor, VariableQueryType};
pub use statistics::{STANDARD_STATISTICS, standard_statistics};
