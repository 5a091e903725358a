//! Configuration management.
//!
//! Everything lives under `~/.rss2email/`:
//!
//! - `feeds`: one feed URL per line, `#` comments allowed
//! - `seen/`: one marker file per delivered entry
//! - `config.toml`: optional overrides, see [`Config`]

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::fetcher::http_fetcher::DEFAULT_USER_AGENT;
use crate::mailer::message::{DEFAULT_FROM, DEFAULT_SUBJECT_PREFIX};
use crate::mailer::sendmail::DEFAULT_SENDMAIL;

/// Optional settings read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Recipient address; falls back to `$LOGNAME`, then `$USER`.
    pub recipient: Option<String>,
    pub from: String,
    pub subject_prefix: String,
    pub sendmail: PathBuf,
    /// Arguments inserted before `-f <recipient> <recipient>`.
    pub sendmail_args: Vec<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recipient: None,
            from: DEFAULT_FROM.to_string(),
            subject_prefix: DEFAULT_SUBJECT_PREFIX.to_string(),
            sendmail: PathBuf::from(DEFAULT_SENDMAIL),
            sendmail_args: Vec::new(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults. An unreadable or invalid file is
    /// an error. Missing fields use default values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// The configured recipient, else the login name from the environment.
    pub fn resolve_recipient(&self) -> Option<String> {
        self.resolve_recipient_with(|key| std::env::var(key).ok())
    }

    fn resolve_recipient_with<F>(&self, env: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        [self.recipient.clone(), env("LOGNAME"), env("USER")]
            .into_iter()
            .flatten()
            .map(|r| r.trim().to_string())
            .find(|r| !r.is_empty())
    }
}

/// On-disk layout for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub feeds: PathBuf,
    pub seen_dir: PathBuf,
    pub config: PathBuf,
}

impl Paths {
    pub fn under(root: &Path) -> Self {
        Self {
            feeds: root.join("feeds"),
            seen_dir: root.join("seen"),
            config: root.join("config.toml"),
        }
    }

    /// `~/.rss2email`.
    pub fn default_root() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".rss2email"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine home directory")]
    NoHomeDir,

    #[error("No recipient address, is $LOGNAME set?")]
    MissingRecipient,

    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
