use std::path::PathBuf;

use clap::Parser;
use nodewatch::{Config, ConfigError};

/// Check whether the node runs the latest published release
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// RPC server address
    #[arg(short, long)]
    pub server: Option<String>,

    /// RPC server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Connect to the RPC server over https
    #[arg(long)]
    pub use_tls: bool,

    /// Seconds since the latest release before a WARNING
    #[arg(long, value_name = "SECONDS")]
    pub since_release_warn: Option<u64>,

    /// Seconds since the latest release before a CRITICAL
    #[arg(long, value_name = "SECONDS")]
    pub since_release_crit: Option<u64>,

    /// Latest-release API endpoint
    #[arg(long, value_name = "URL")]
    pub release_url: Option<String>,

    /// Per-request HTTP timeout
    #[arg(long, value_name = "SECONDS")]
    pub request_timeout: Option<u64>,

    /// Config file, defaults to $XDG_CONFIG_HOME/nodewatch/config.toml when present
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Load the config file and apply command line overrides
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::from_config(self.config.as_ref())?;

        if let Some(server) = &self.server {
            config.node.server = server.clone();
        }
        if let Some(port) = self.port {
            config.node.port = port;
        }
        if self.use_tls {
            config.node.use_tls = true;
        }
        if let Some(timeout) = self.request_timeout {
            config.node.request_timeout_secs = timeout;
        }
        if let Some(warn) = self.since_release_warn {
            config.release.warn_secs = warn;
        }
        if let Some(crit) = self.since_release_crit {
            config.release.crit_secs = crit;
        }
        if let Some(url) = &self.release_url {
            config.release.url = url.clone();
        }

        Ok(config)
    }
}
