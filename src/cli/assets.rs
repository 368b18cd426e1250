//! Assets command implementation

use crate::cli::{CommandContext, ConnectionArgs, GlobalOptions};
use crate::error::Result;
use crate::models::AssetDisplay;
use crate::output;
use crate::sync::get_workspace_assets;

/// List the collections and environments of the workspace with their x-api-id
pub async fn run(opts: &GlobalOptions, args: &ConnectionArgs) -> Result<()> {
    let ctx = CommandContext::new(opts, args)?;

    let assets = get_workspace_assets(&ctx.client, ctx.workspace_id()).await?;
    let rows: Vec<AssetDisplay> = assets.all().map(AssetDisplay::from).collect();

    output::print(&rows, ctx.format)
}
