use clap::ValueEnum;
use scrim_core::balance::BalanceConfig;
use scrim_core::model::{Division, Lane, Tier};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root configuration for one balancing run, loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScrimConfig {
    pub run_id: String,
    #[serde(default)]
    pub mode: BalanceMode,
    pub players: Vec<PlayerEntry>,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub balance: BalanceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ScrimConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: ScrimConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O. The roster size is
    /// left to the balancer so its own error reaches the caller unchanged.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        validate_players(&mut self.players)?;
        self.outputs.validate(&self.run_id)?;
        self.logging.validate()?;
        Ok(())
    }

    /// Resolve `{run_id}` placeholders into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            json: resolve_template(&self.run_id, &self.outputs.json),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BalanceMode {
    /// Split by rank score only.
    #[default]
    Teams,
    /// Split and assign lanes from stated preferences.
    Lanes,
}

impl BalanceMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            BalanceMode::Teams => "teams",
            BalanceMode::Lanes => "lanes",
        }
    }
}

/// One roster line. Either `rank_score` or a `tier` (with optional
/// `division` and `lp`) may be given; with neither the player is unranked.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlayerEntry {
    pub id: String,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
    #[serde(default)]
    pub lp: Option<u32>,
    #[serde(default)]
    pub rank_score: Option<u32>,
    #[serde(default)]
    pub lanes: Vec<String>,
}

impl PlayerEntry {
    pub fn parsed_lanes(&self) -> Vec<Lane> {
        self.lanes.iter().filter_map(|l| Lane::from_str(l)).collect()
    }
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub json: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.json", &self.json),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn validate(&mut self) -> Result<(), ValidationError> {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!(
                    "unknown level '{}' (expected trace, debug, info, warn or error)",
                    self.tracing_level
                ),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn validate_players(players: &mut [PlayerEntry]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (idx, player) in players.iter_mut().enumerate() {
        player.id = player.id.trim().to_string();
        if player.id.is_empty() {
            return Err(ValidationError::InvalidField {
                field: format!("players[{idx}].id"),
                message: "player id must not be empty".to_string(),
            });
        }

        if !seen.insert(player.id.clone()) {
            return Err(ValidationError::InvalidField {
                field: "players".to_string(),
                message: format!("player '{}' listed more than once", player.id),
            });
        }

        if player.rank_score.is_some() && player.tier.is_some() {
            return Err(ValidationError::InvalidField {
                field: format!("players[{}]", player.id),
                message: "set either rank_score or tier, not both".to_string(),
            });
        }

        if let Some(tier) = player.tier.as_deref() {
            if tier.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: format!("players[{}].tier", player.id),
                    message: "tier must not be empty".to_string(),
                });
            }
            let apex = Tier::from_str(tier).is_some_and(Tier::is_apex);
            let division = player.division.as_deref().map(str::trim).unwrap_or("");
            if !apex && !division.is_empty() && Division::from_str(division).is_none() {
                return Err(ValidationError::InvalidField {
                    field: format!("players[{}].division", player.id),
                    message: format!("unknown division '{division}'"),
                });
            }
        } else if player.division.is_some() || player.lp.is_some() {
            return Err(ValidationError::InvalidField {
                field: format!("players[{}]", player.id),
                message: "division and lp require a tier".to_string(),
            });
        }

        let mut lanes = HashSet::new();
        for lane in &player.lanes {
            let Some(parsed) = Lane::from_str(lane) else {
                return Err(ValidationError::InvalidField {
                    field: format!("players[{}].lanes", player.id),
                    message: format!("unknown lane '{lane}'"),
                });
            };
            if !lanes.insert(parsed) {
                return Err(ValidationError::InvalidField {
                    field: format!("players[{}].lanes", player.id),
                    message: format!("lane '{parsed}' listed more than once"),
                });
            }
        }
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub json: PathBuf,
    pub summary_md: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
