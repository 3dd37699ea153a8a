use metricvar_core::VariableQuery;
use metricvar_resolver::VariableQueryResolver;

use crate::OutputFormat;

pub async fn run(resolver: &VariableQueryResolver, format: &OutputFormat) -> anyhow::Result<()> {
    let options = resolver.resolve(&VariableQuery::Statistics).await;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&options)?),
        OutputFormat::Text => super::print_options(&options),
    }
    Ok(())
}
