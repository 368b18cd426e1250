//! Postman connection flags shared by workspace commands

use clap::Args;

use crate::config::ConnectionOverrides;

/// Credentials and endpoint for commands that talk to a Postman workspace.
///
/// Each flag falls back to its environment variable, then to the config file.
#[derive(Debug, Clone, Args, Default)]
pub struct ConnectionArgs {
    /// Postman workspace ID
    #[arg(long, short = 'w', env = "POSTMAN_WORKSPACE_ID")]
    pub workspace_id: Option<String>,

    /// Postman API key
    #[arg(long, env = "POSTMAN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Postman API base URL
    #[arg(long, env = "POSTGEN_API_BASE_URL", hide_env = true)]
    pub api_base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, env = "POSTGEN_TIMEOUT", hide_env = true)]
    pub timeout: Option<u64>,
}

impl ConnectionArgs {
    pub fn overrides(&self) -> ConnectionOverrides {
        ConnectionOverrides {
            api_key: self.api_key.clone(),
            workspace_id: self.workspace_id.clone(),
            api_base_url: self.api_base_url.clone(),
            timeout_secs: self.timeout,
        }
    }
}
