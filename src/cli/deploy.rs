//! Deploy command implementation

use std::path::Path;

use colored::Colorize;

use crate::cli::{CommandContext, ConnectionArgs, GlobalOptions};
use crate::error::{Error, Result};
use crate::models::DeployDisplay;
use crate::output;
use crate::sync::{CollectionExport, EnvironmentExport, deploy};

/// Upsert the given exports into the workspace.
///
/// Every export is read before the first API call. Item failures do not stop
/// the run but make the command fail once all items were attempted.
pub async fn run(
    opts: &GlobalOptions,
    collection: Option<&str>,
    environments: &[String],
    args: &ConnectionArgs,
) -> Result<()> {
    let collection = collection
        .map(|p| CollectionExport::load(Path::new(p)))
        .transpose()?;
    let environments = environments
        .iter()
        .map(|p| EnvironmentExport::load(Path::new(p)))
        .collect::<Result<Vec<_>>>()?;

    let ctx = CommandContext::new(opts, args)?;

    eprintln!(
        "{}",
        format!("Deploying to workspace {}...", ctx.workspace_id()).cyan()
    );

    let report = deploy(
        &ctx.client,
        ctx.workspace_id(),
        collection.as_ref(),
        &environments,
    )
    .await?;

    let rows: Vec<DeployDisplay> = report.items.iter().map(DeployDisplay::from).collect();
    output::print(&rows, ctx.format)?;

    if report.has_failures() {
        for (item, err) in report.failures() {
            eprintln!("{} {} \"{}\": {}", "✗".red(), item.kind, item.name, err);
        }
        let failed = report.items.len() - report.succeeded();
        return Err(Error::Other(format!(
            "{} of {} items failed to deploy",
            failed,
            report.items.len()
        )));
    }

    eprintln!("{} Deployed {} items", "✓".green(), report.succeeded());
    Ok(())
}
