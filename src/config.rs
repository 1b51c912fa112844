use crate::analysis::policy::{parse_policy, Backup, SearchConfig};
use crate::error::ConfigError;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings read from the environment (and `.env`). CLI flags override them.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub matrix_path: PathBuf,
    pub format: String,
    pub policy: String,
    pub backup: Backup,
    pub node_limit: Option<usize>,
    pub deadline_ms: Option<u64>,
    pub seed: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let matrix_path = lookup("DRAFT_MATRIX_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_matrix_path);
        let format = lookup("DRAFT_FORMAT").unwrap_or_else(|| "single-ban".to_string());
        let policy = lookup("DRAFT_POLICY").unwrap_or_else(|| "decaying".to_string());
        let backup = match lookup("DRAFT_BACKUP") {
            Some(value) => value.parse().map_err(|reason| ConfigError::Invalid {
                key: "DRAFT_BACKUP".to_string(),
                value,
                reason,
            })?,
            None => Backup::default(),
        };
        let node_limit = parse_number(&lookup, "DRAFT_NODE_LIMIT")?;
        let deadline_ms = parse_number(&lookup, "DRAFT_DEADLINE_MS")?;
        let seed = parse_number(&lookup, "DRAFT_SEED")?.unwrap_or(0);

        Ok(Config {
            matrix_path,
            format,
            policy,
            backup,
            node_limit,
            deadline_ms,
            seed,
        })
    }

    pub fn search_config(&self, parallel: bool) -> Result<SearchConfig, ConfigError> {
        let policy = parse_policy(&self.policy).map_err(|reason| ConfigError::Invalid {
            key: "DRAFT_POLICY".to_string(),
            value: self.policy.clone(),
            reason,
        })?;
        Ok(SearchConfig {
            backup: self.backup,
            policy,
            node_limit: self.node_limit,
            deadline: self.deadline_ms.map(Duration::from_millis),
            parallel,
        })
    }
}

fn parse_number<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|value| {
            value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                key: key.to_string(),
                value: value.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

pub fn default_matrix_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".draft_oracle")
        .join("matrix.json")
}
