use clap::Args;
use metricvar_core::migrate_legacy_query;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Legacy query text, e.g. `dimension_keys(AWS/EC2, us-east-1)`.
    pub text: String,
}

pub fn run(args: &MigrateArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let descriptor = migrate_legacy_query(&args.text)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&descriptor)?),
        OutputFormat::Text => println!("{}", serde_json::to_string(&descriptor)?),
    }
    Ok(())
}
