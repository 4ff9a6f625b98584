use std::path::PathBuf;

use clap::Parser;
use nodewatch::{Config, ConfigError};

/// Check whether a validator node is synced, connected and producing blocks
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

    /// Report a syncing node as WARNING instead of CRITICAL
    #[arg(long)]
    pub warn_is_syncing: bool,

    /// Fewer peers than this is CRITICAL
    #[arg(long)]
    pub min_peers: Option<u64>,

    /// Block distance that raises a WARNING
    #[arg(long, value_name = "BLOCKS")]
    pub max_distance_warn: Option<u64>,

    /// Block distance that raises a CRITICAL
    #[arg(long, value_name = "BLOCKS")]
    pub max_distance_crit: Option<u64>,

    /// Seconds to wait for the best block to increase
    #[arg(long, value_name = "SECONDS")]
    pub best_timeout: Option<u64>,

    /// Seconds to wait for the finalized block to increase
    #[arg(long, value_name = "SECONDS")]
    pub finalized_timeout: Option<u64>,

    /// Compare heights against this node instead of waiting for them to increase
    #[arg(long, value_name = "URI")]
    pub compare_to_uri: Option<String>,

    /// Report twice the timeout instead of `infinite` when a block did not increase
    #[arg(long)]
    pub fake_increasing_perfdata: bool,

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
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
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

        let validator = &mut config.validator;
        if self.warn_is_syncing {
            validator.warn_is_syncing = true;
        }
        if let Some(min_peers) = self.min_peers {
            validator.min_peers = min_peers;
        }
        if let Some(warn) = self.max_distance_warn {
            validator.max_distance_warn = warn;
        }
        if let Some(crit) = self.max_distance_crit {
            validator.max_distance_crit = crit;
        }
        if let Some(timeout) = self.best_timeout {
            validator.best_timeout_secs = timeout;
        }
        if let Some(timeout) = self.finalized_timeout {
            validator.finalized_timeout_secs = timeout;
        }
        if let Some(uri) = &self.compare_to_uri {
            validator.compare_to_uri = Some(uri.clone());
        }
        if self.fake_increasing_perfdata {
            validator.fake_increasing_perfdata = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "check_validator_active",
            "--server",
            "validator-1",
            "--use-tls",
            "--min-peers",
            "3",
            "--max-distance-warn",
            "8",
            "--best-timeout",
            "30",
            "--compare-to-uri",
            "https://rpc.example.com:443",
            "--fake-increasing-perfdata",
        ]);

        let mut config = Config::default();
        config.validator.finalized_timeout_secs = 300;
        cli.apply(&mut config);

        assert_eq!(config.node.server, "validator-1");
        assert_eq!(config.node.port, 9933);
        assert!(config.node.use_tls);
        assert_eq!(config.validator.min_peers, 3);
        assert_eq!(config.validator.max_distance_warn, 8);
        assert_eq!(config.validator.max_distance_crit, 10);
        assert_eq!(config.validator.best_timeout_secs, 30);
        assert_eq!(config.validator.finalized_timeout_secs, 300);
        assert_eq!(config.validator.compare_to_uri.as_deref(), Some("https://rpc.example.com:443"));
        assert!(config.validator.fake_increasing_perfdata);
        assert!(!config.validator.warn_is_syncing);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
