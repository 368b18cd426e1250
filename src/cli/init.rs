//! Init command implementation

use colored::Colorize;
use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};

use crate::cli::GlobalOptions;
use crate::client::{PostmanApi, PostmanClient};
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for the API key and default workspace, checks them against the
/// Postman API when a workspace is given, and saves the config file. Values
/// already in the file are offered as defaults.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let config_path = Config::resolve_path(opts.config_ref())?;
    let existing = Config::load_or_default(&config_path)?;
    let theme = ColorfulTheme::default();

    println!("{}", "Welcome to postgen!".bold().green());
    println!("Let's set up your Postman configuration.\n");

    let api_key: String = Password::with_theme(&theme)
        .with_prompt("Enter your Postman API key (leave empty to keep the current one)")
        .allow_empty_password(true)
        .interact()?;
    let api_key = match api_key.trim() {
        "" => existing.api_key.clone(),
        key => Some(key.to_string()),
    };

    let workspace_id: String = Input::with_theme(&theme)
        .with_prompt("Default workspace ID (optional)")
        .default(existing.workspace_id.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    let workspace_id = Some(workspace_id.trim().to_string()).filter(|w| !w.is_empty());

    if let (Some(key), Some(workspace)) = (&api_key, &workspace_id) {
        println!("\n{}", "Checking workspace access...".cyan());
        let client = PostmanClient::new(key.clone())?;
        match client.get_workspace(workspace).await {
            Ok(ws) => println!(
                "{} Found workspace {} ({} collections, {} environments)",
                "✓".green(),
                ws.name.bold(),
                ws.collections.len(),
                ws.environments.len()
            ),
            Err(e) => {
                println!("{} Could not read workspace: {}", "⚠".yellow(), e);
                let keep = Confirm::with_theme(&theme)
                    .with_prompt("Save this configuration anyway?")
                    .default(false)
                    .interact()?;
                if !keep {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
        }
    }

    let config = Config {
        api_key,
        workspace_id,
        ..existing
    };
    config.save_to(&config_path)?;

    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "postgen status".cyan());
    println!("  {} - List workspace assets", "postgen assets".cyan());

    Ok(())
}
