//! Plugin configuration file.
//!
//! Every value can also be given on the command line; flags win over the
//! file, the file wins over the built-in defaults.

use std::time::Duration;
use std::{env, fmt, fs, path};

use serde::{Deserialize, Serialize};

use crate::backoff::{DEFAULT_BASE, DEFAULT_CAP, DecorrelatedJitter};
use crate::error::ConfigError;
use crate::release::DEFAULT_RELEASE_URL;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub node: Node,
    pub release: ReleaseThresholds,
    pub validator: Validator,
    pub backoff: Backoff,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    pub server: String,
    pub port: u16,
    pub use_tls: bool,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseThresholds {
    pub url: String,
    pub warn_secs: u64,
    pub crit_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Validator {
    pub warn_is_syncing: bool,
    pub min_peers: u64,
    pub max_distance_warn: u64,
    pub max_distance_crit: u64,
    pub best_timeout_secs: u64,
    pub finalized_timeout_secs: u64,
    pub compare_to_uri: Option<String>,
    pub fake_increasing_perfdata: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Backoff {
    pub base_ms: u64,
    pub cap_ms: u64,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            server: "localhost".into(),
            port: 9933,
            use_tls: false,
            request_timeout_secs: crate::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Default for ReleaseThresholds {
    fn default() -> Self {
        Self { url: DEFAULT_RELEASE_URL.into(), warn_secs: 86_400, crit_secs: 604_800 }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            warn_is_syncing: false,
            min_peers: 5,
            max_distance_warn: 5,
            max_distance_crit: 10,
            best_timeout_secs: 60,
            finalized_timeout_secs: 120,
            compare_to_uri: None,
            fake_increasing_perfdata: false,
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self { base_ms: DEFAULT_BASE.as_millis() as u64, cap_ms: DEFAULT_CAP.as_millis() as u64 }
    }
}

impl Node {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// A zero timeout would fail every request
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Zero("request-timeout"));
        }
        Ok(())
    }
}

impl Backoff {
    pub fn jitter(&self) -> Result<DecorrelatedJitter, ConfigError> {
        DecorrelatedJitter::new(Duration::from_millis(self.base_ms), Duration::from_millis(self.cap_ms))
    }
}

/// Used to ensure we are actually reading a toml file
fn normalize_toml_path(path: &path::Path) -> path::PathBuf {
    let mut path = path.to_path_buf();
    if path.extension().map(|ext| ext != "toml").unwrap_or(true) {
        path.set_extension("toml");
    }
    path
}

/// Default config path ($XDG_CONFIG_HOME/nodewatch/config.toml or
/// $HOME/.config/...), if one can be determined
fn default_config_path() -> Option<path::PathBuf> {
    let path = if let Ok(config_home) = env::var("XDG_CONFIG_HOME") {
        path::PathBuf::from(config_home)
    } else {
        env::home_dir()?.join(".config")
    };

    Some(path.join("nodewatch/config.toml"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str, value: &dyn fmt::Display| {
                writeln!(f, "  {:indent$}{}: {}", "", label, value, indent = level * 2)
            }
        };
        let write_title_indented = |level: usize| {
            move |f: &mut fmt::Formatter<'_>, label: &str| {
                writeln!(f, "{:indent$}{}", "", label, indent = level * 2)
            }
        };

        let write_title_1 = write_title_indented(1);
        let write_1 = write_indented(1);

        writeln!(f, "Effective configuration:")?;
        write_title_1(f, "Node")?;
        write_1(f, "Server", &self.node.server)?;
        write_1(f, "Port", &self.node.port)?;
        write_1(f, "TLS", &self.node.use_tls)?;
        write_1(f, "Request Timeout (s)", &self.node.request_timeout_secs)?;
        write_title_1(f, "Release")?;
        write_1(f, "URL", &self.release.url)?;
        write_1(f, "Warn (s)", &self.release.warn_secs)?;
        write_1(f, "Crit (s)", &self.release.crit_secs)?;
        write_title_1(f, "Validator")?;
        write_1(f, "Warn Is Syncing", &self.validator.warn_is_syncing)?;
        write_1(f, "Min Peers", &self.validator.min_peers)?;
        write_1(f, "Max Distance Warn", &self.validator.max_distance_warn)?;
        write_1(f, "Max Distance Crit", &self.validator.max_distance_crit)?;
        write_1(f, "Best Timeout (s)", &self.validator.best_timeout_secs)?;
        write_1(f, "Finalized Timeout (s)", &self.validator.finalized_timeout_secs)?;
        write_1(f, "Compare To", &self.validator.compare_to_uri.as_deref().unwrap_or("-"))?;
        write_1(f, "Fake Increasing Perfdata", &self.validator.fake_increasing_perfdata)?;
        write_title_1(f, "Backoff")?;
        write_1(f, "Base (ms)", &self.backoff.base_ms)?;
        write_1(f, "Cap (ms)", &self.backoff.cap_ms)?;

        Ok(())
    }
}

impl Config {
    /// Load the config file.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// read when present and built-in defaults are used otherwise; nothing
    /// is ever written.
    ///
    /// ```rust,no_run
    /// let cfg = nodewatch::Config::from_config(None::<&std::path::Path>)?;
    /// println!("{}", cfg);
    /// # Ok::<(), nodewatch::ConfigError>(())
    /// ```
    pub fn from_config(optional_path: Option<impl AsRef<path::Path>>) -> Result<Self, ConfigError> {
        let config_path = match optional_path {
            Some(path) => normalize_toml_path(path.as_ref()),
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let display = config_path.display().to_string();
        let raw_string = fs::read_to_string(&config_path)
            .map_err(|source| ConfigError::Read { path: display.clone(), source })?;
        toml::from_str(raw_string.as_str()).map_err(|source| ConfigError::Parse { path: display, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.node.port, 9933);
        assert_eq!(config.validator.min_peers, 5);
        assert_eq!(config.backoff.base_ms, 200);
        assert_eq!(config.backoff.cap_ms, 1500);
        assert!(config.backoff.jitter().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nodewatch.toml");
        fs::write(&path, "[node]\nserver = \"10.0.0.5\"\n\n[validator]\nmin_peers = 12\n").unwrap();

        let config = Config::from_config(Some(&path)).unwrap();
        assert_eq!(config.node.server, "10.0.0.5");
        assert_eq!(config.node.port, 9933);
        assert_eq!(config.validator.min_peers, 12);
        assert_eq!(config.validator.best_timeout_secs, 60);
    }

    #[test]
    fn test_extension_is_normalized() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("plugin.toml"), "[backoff]\nbase_ms = 100\n").unwrap();

        let config = Config::from_config(Some(dir.path().join("plugin"))).unwrap();
        assert_eq!(config.backoff.base_ms, 100);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = Config::from_config(Some(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[node]\nport = \"not a number\"\n").unwrap();

        assert!(matches!(Config::from_config(Some(&path)), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_display_lists_sections() {
        let rendered = Config::default().to_string();
        assert!(rendered.contains("Node"));
        assert!(rendered.contains("Port: 9933"));
        assert!(rendered.contains("Compare To: -"));
    }
}
