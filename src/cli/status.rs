//! Status command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::client::postman::{API_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Run the status command to display configuration status.
///
/// Reports what is configured without printing the API key.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "postgen Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    let env_key = std::env::var("POSTMAN_API_KEY").is_ok_and(|k| !k.trim().is_empty());

    let config = match Config::load_from(&config_path) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            config
        }
        Err(Error::Config(ConfigError::NotFound)) => {
            println!("{} Configuration not found", "✗".red());
            println!("  → Run {} to create {}", "postgen init".cyan(), config_path.display());
            Config::default()
        }
        Err(e) => return Err(e),
    };

    println!();

    if config.api_key.is_some() {
        println!("{} API key configured", "✓".green());
    } else if env_key {
        println!("{} API key provided by POSTMAN_API_KEY", "✓".green());
    } else {
        println!("{} API key not configured", "✗".red());
        println!("  → Run 'postgen init' or set POSTMAN_API_KEY");
    }

    if let Some(ref workspace_id) = config.workspace_id {
        println!("{} Default workspace: {}", "✓".green(), workspace_id);
    } else {
        println!("{} No default workspace set", "○".dimmed());
        println!("  → Pass --workspace-id or set POSTMAN_WORKSPACE_ID");
    }

    match config.api_base_url {
        Some(ref url) if url != API_BASE_URL => {
            println!("{} Custom API base URL: {}", "○".dimmed(), url.cyan())
        }
        _ => {}
    }

    println!(
        "{} Request timeout: {}s",
        "○".dimmed(),
        config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    );

    println!();
    Ok(())
}
