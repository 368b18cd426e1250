//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod assets;
pub mod completions;
pub mod context;
pub mod convert;
pub mod delete;
pub mod deploy;
pub mod init;
pub mod status;

pub use args::{ConnectionArgs, GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// postgen - Generate Postman collections from OpenAPI specs and sync them to a workspace
#[derive(Parser, Debug)]
#[command(name = "postgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "POSTGEN_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "POSTGEN_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "POSTGEN_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a Postman collection and environments from an OpenAPI spec
    #[command(after_help = "EXAMPLES:\n  \
            postgen convert openapi.yaml                          # Environments from x-postman-environments\n  \
            postgen convert openapi.yaml -o build/postman         # Custom output directory\n  \
            postgen convert https://example.com/openapi.json -e dev -e prod")]
    Convert {
        /// OpenAPI file path or http(s) URL (JSON or YAML)
        source: String,

        /// Directory for the generated files
        #[arg(long, short = 'o', default_value = ".")]
        output: String,

        /// Environment names to generate, skipping x-postman-environments validation
        #[arg(long = "environment", short = 'e', value_delimiter = ',')]
        environments: Vec<String>,
    },

    /// Create or update a collection and environments in a Postman workspace
    #[command(after_help = "EXAMPLES:\n  \
            postgen deploy -c Orders_API_v1.json -w <workspace-id>\n  \
            postgen deploy -c c.json -E dev_environment.json -E prod_environment.json\n  \
            postgen deploy -E staging_environment.json --format json")]
    Deploy {
        /// Collection export (Postman v2.1 JSON)
        #[arg(long, short = 'c', required_unless_present = "environments")]
        collection: Option<String>,

        /// Environment export, repeatable
        #[arg(long = "environment", short = 'E')]
        environments: Vec<String>,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Delete every collection and environment belonging to an API
    #[command(after_help = "EXAMPLES:\n  \
            postgen delete orders-api --dry-run   # List what would be deleted\n  \
            postgen delete orders-api             # With confirmation\n  \
            postgen delete orders-api --yes       # Skip confirmation")]
    Delete {
        /// Kebab-case API identifier (x-api-id)
        x_api_id: String,

        /// Preview without deleting
        #[arg(long, short = 'n')]
        dry_run: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// List the collections and environments of a workspace
    Assets {
        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Initialize postgen configuration
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Generate shell completions
    #[command(after_help = "\
  bash:   postgen completion bash > /etc/bash_completion.d/postgen
  zsh:    postgen completion zsh > \"${fpath[1]}/_postgen\"
  fish:   postgen completion fish > ~/.config/fish/completions/postgen.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
