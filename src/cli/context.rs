//! Command execution context
//!
//! Loads the config file, merges CLI/env overrides into it and builds the
//! Postman client for workspace commands.

use log::debug;

use crate::cli::{ConnectionArgs, GlobalOptions, OutputFormat};
use crate::client::PostmanClient;
use crate::config::{Config, Connection};
use crate::error::Result;

/// Context for commands that talk to a Postman workspace.
pub struct CommandContext {
    /// Resolved credentials, workspace and endpoint
    pub connection: Connection,
    /// Postman API client
    pub client: PostmanClient,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// A missing config file is not an error here: flags and environment
    /// variables may carry everything. Missing credentials are.
    pub fn new(opts: &GlobalOptions, args: &ConnectionArgs) -> Result<Self> {
        let path = Config::resolve_path(opts.config_ref())?;
        let config = Config::load_or_default(&path)?;
        let connection = config.connection(&args.overrides())?;

        debug!(
            "Using workspace {} at {}",
            connection.workspace_id, connection.api_base_url
        );

        let client = PostmanClient::with_options(
            connection.api_key.clone(),
            &connection.api_base_url,
            connection.timeout,
        )?;

        Ok(Self {
            connection,
            client,
            format: opts.format,
        })
    }

    pub fn workspace_id(&self) -> &str {
        &self.connection.workspace_id
    }
}
