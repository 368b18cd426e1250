//! Delete command implementation

use colored::Colorize;
use dialoguer::Confirm;

use crate::cli::{CommandContext, ConnectionArgs, GlobalOptions};
use crate::error::{Error, Result};
use crate::models::DeleteDisplay;
use crate::output;
use crate::postman::naming::display_name_from_api_id;
use crate::sync::{
    AssetKind, DeleteReport, DeleteStatus, delete_assets, delete_by_api_id,
    find_deletion_candidates, get_workspace_assets,
};

/// Delete every workspace asset belonging to `api_id`
pub async fn run(
    opts: &GlobalOptions,
    api_id: &str,
    dry_run: bool,
    yes: bool,
    args: &ConnectionArgs,
) -> Result<()> {
    let ctx = CommandContext::new(opts, args)?;
    let workspace_id = ctx.workspace_id();

    if dry_run {
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
        eprintln!();
    }

    let report = if dry_run || yes {
        delete_by_api_id(&ctx.client, workspace_id, api_id, dry_run).await?
    } else {
        let assets = get_workspace_assets(&ctx.client, workspace_id).await?;
        let candidates = find_deletion_candidates(&assets, api_id);

        if !candidates.is_empty() {
            eprintln!(
                "{} Delete {} assets of \"{}\"? This cannot be undone.",
                "⚠".yellow(),
                candidates.len(),
                display_name_from_api_id(api_id)
            );
            for asset in &candidates {
                eprintln!("  {} {} ({})", asset.kind, asset.name, asset.uid);
            }
            eprintln!();

            let confirm = Confirm::new()
                .with_prompt("Confirm deletion?")
                .default(false)
                .interact()?;

            if !confirm {
                eprintln!("Cancelled.");
                return Ok(());
            }
        }

        delete_assets(&ctx.client, api_id, candidates, false).await
    };

    if report.items.is_empty() {
        eprintln!(
            "No collections or environments match \"{}\" in workspace {}",
            report.display_name, workspace_id
        );
    }

    let rows: Vec<DeleteDisplay> = report.items.iter().map(DeleteDisplay::from).collect();
    output::print(&rows, ctx.format)?;
    print_summary(&report);

    if report.failed() > 0 {
        return Err(Error::Other(format!(
            "{} of {} deletions failed",
            report.failed(),
            report.items.len()
        )));
    }

    Ok(())
}

fn print_summary(report: &DeleteReport) {
    if report.items.is_empty() {
        return;
    }

    let status = if report.dry_run {
        DeleteStatus::WouldDelete
    } else {
        DeleteStatus::Deleted
    };
    let verb = if report.dry_run { "Would delete" } else { "Deleted" };

    eprintln!(
        "{} {} {} collections and {} environments",
        "✓".green(),
        verb,
        report.count(AssetKind::Collection, &status),
        report.count(AssetKind::Environment, &status)
    );
}
