use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Args};
use metricvar_core::{DataQueryRequest, VariableQueryDescriptor, migrate_legacy_query};
use metricvar_resolver::VariableQueryResolver;

use crate::OutputFormat;

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["query", "query_file", "legacy"])
))]
pub struct ResolveArgs {
    /// Query descriptor or `{"targets": [...]}` request as JSON.
    #[arg(long)]
    pub query: Option<String>,
    /// Read the JSON query from a file.
    #[arg(long)]
    pub query_file: Option<PathBuf>,
    /// Legacy query text, e.g. `metrics(AWS/EC2, us-east-1)`.
    #[arg(long)]
    pub legacy: Option<String>,
}

/// Accept either a full request envelope or a single descriptor.
fn parse_request(json: &str) -> anyhow::Result<DataQueryRequest> {
    let value: serde_json::Value = serde_json::from_str(json).context("query is not valid JSON")?;
    if value.get("targets").is_some() {
        serde_json::from_value(value).context("invalid query request")
    } else {
        let descriptor: VariableQueryDescriptor =
            serde_json::from_value(value).context("invalid query descriptor")?;
        Ok(DataQueryRequest::single(descriptor))
    }
}

fn build_request(args: &ResolveArgs) -> anyhow::Result<DataQueryRequest> {
    if let Some(text) = &args.legacy {
        return Ok(DataQueryRequest::single(migrate_legacy_query(text)?));
    }
    if let Some(path) = &args.query_file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return parse_request(&content);
    }
    match &args.query {
        Some(json) => parse_request(json),
        None => anyhow::bail!("one of --query, --query-file or --legacy is required"),
    }
}

pub async fn run(
    resolver: &VariableQueryResolver,
    args: &ResolveArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let request = build_request(args)?;
    let response = resolver.query(&request).await;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Text => super::print_options(&response.data),
    }
    Ok(())
}
