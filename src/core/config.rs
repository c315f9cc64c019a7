//! Configuration system: compiled defaults + optional explicit TOML file +
//! env var overrides.
//!
//! No file is ever discovered implicitly. A TOML file is read only when a path
//! is handed to [`Config::load`] (the `--config` flag).

#![allow(missing_docs)]

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::{OncallError, Result};

/// Full dashboard configuration model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Config {
    pub refresh: RefreshConfig,
    pub kube: KubeConfig,
    pub issues: IssuesConfig,
    pub health: HealthConfig,
}

/// Poll cadence knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RefreshConfig {
    /// Period of the perpetual poll tick.
    pub tick_secs: u64,
    /// Minimum age of the last issue-list refresh before it is polled again.
    pub issue_list_secs: u64,
    /// One-shot delay before the splash screen may be dismissed.
    pub splash_ms: u64,
}

/// Cluster orchestrator CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KubeConfig {
    pub binary: String,
    /// Forwarded as `-n <namespace>` when set.
    pub namespace: Option<String>,
    pub log_tail_lines: u32,
    /// Hard-kill deadline for a log fetch.
    pub log_timeout_secs: u64,
}

/// Error-tracker CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IssuesConfig {
    pub binary: String,
    pub org: String,
    /// Look-back window for the unresolved issue list.
    pub window_hours: u32,
    pub projects: Vec<ProjectConfig>,
}

/// One error-tracker project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Display label ("Ticketing").
    pub label: String,
    /// Tracker slug passed to `--project`.
    pub slug: String,
}

/// HTTP health-check settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HealthConfig {
    pub binary: String,
    /// Per-request timeout forwarded to the HTTP client (`--max-time`).
    pub timeout_secs: u64,
    pub services: Vec<ServiceConfig>,
}

/// One polled health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    pub name: String,
    pub url: String,
    /// Poll `<url>/<group>` for every name listed in the `groups` field.
    #[serde(default)]
    pub expand_groups: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            tick_secs: 15,
            issue_list_secs: 60,
            splash_ms: 1200,
        }
    }
}

impl Default for KubeConfig {
    fn default() -> Self {
        Self {
            binary: "kubectl".to_string(),
            namespace: None,
            log_tail_lines: 500,
            log_timeout_secs: 10,
        }
    }
}

impl Default for IssuesConfig {
    fn default() -> Self {
        Self {
            binary: "sentry-cli".to_string(),
            org: "siip".to_string(),
            window_hours: 24,
            projects: vec![
                ProjectConfig {
                    label: "Ticketing".to_string(),
                    slug: "siip-ticketing".to_string(),
                },
                ProjectConfig {
                    label: "IAM".to_string(),
                    slug: "siip-iam-service".to_string(),
                },
            ],
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            binary: "curl".to_string(),
            timeout_secs: 10,
            services: vec![
                ServiceConfig {
                    name: "Ticketing API".to_string(),
                    url: "https://ticketing.siip.io/health".to_string(),
                    expand_groups: false,
                },
                ServiceConfig {
                    name: "IAM API".to_string(),
                    url: "https://iam.siip.io/health".to_string(),
                    expand_groups: true,
                },
            ],
        }
    }
}

impl RefreshConfig {
    #[must_use]
    pub const fn tick(&self) -> Duration {
        Duration::from_secs(self.tick_secs)
    }

    #[must_use]
    pub const fn issue_list_interval(&self) -> Duration {
        Duration::from_secs(self.issue_list_secs)
    }

    #[must_use]
    pub const fn splash_delay(&self) -> Duration {
        Duration::from_millis(self.splash_ms)
    }
}

impl KubeConfig {
    #[must_use]
    pub const fn log_timeout(&self) -> Duration {
        Duration::from_secs(self.log_timeout_secs)
    }
}

impl Config {
    /// Build the effective configuration.
    ///
    /// `path` is only ever an explicit user choice; a missing explicit file is
    /// an error rather than a silent fallback to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(OncallError::MissingConfig {
                        path: path.to_path_buf(),
                    });
                }
                let raw = fs::read_to_string(path).map_err(|source| OncallError::io(path, source))?;
                toml::from_str(&raw)?
            }
            None => Self::default(),
        };

        cfg.apply_env_overrides_from(env_var)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn apply_env_overrides_from<F>(&mut self, mut lookup: F) -> Result<()>
    where
        F: FnMut(&str) -> Option<String>,
    {
        // refresh
        if let Some(raw) = lookup("ONCALL_REFRESH_TICK_SECS") {
            self.refresh.tick_secs = parse_env_u64("ONCALL_REFRESH_TICK_SECS", &raw)?;
        }
        if let Some(raw) = lookup("ONCALL_REFRESH_ISSUE_LIST_SECS") {
            self.refresh.issue_list_secs = parse_env_u64("ONCALL_REFRESH_ISSUE_LIST_SECS", &raw)?;
        }
        if let Some(raw) = lookup("ONCALL_REFRESH_SPLASH_MS") {
            self.refresh.splash_ms = parse_env_u64("ONCALL_REFRESH_SPLASH_MS", &raw)?;
        }

        // kube
        if let Some(raw) = lookup("ONCALL_KUBE_BINARY") {
            self.kube.binary = raw;
        }
        if let Some(raw) = lookup("ONCALL_KUBE_NAMESPACE") {
            self.kube.namespace = if raw.trim().is_empty() {
                None
            } else {
                Some(raw)
            };
        }
        if let Some(raw) = lookup("ONCALL_KUBE_LOG_TIMEOUT_SECS") {
            self.kube.log_timeout_secs = parse_env_u64("ONCALL_KUBE_LOG_TIMEOUT_SECS", &raw)?;
        }

        // issues
        if let Some(raw) = lookup("ONCALL_ISSUES_BINARY") {
            self.issues.binary = raw;
        }
        if let Some(raw) = lookup("ONCALL_ISSUES_ORG") {
            self.issues.org = raw;
        }

        // health
        if let Some(raw) = lookup("ONCALL_HEALTH_BINARY") {
            self.health.binary = raw;
        }
        if let Some(raw) = lookup("ONCALL_HEALTH_TIMEOUT_SECS") {
            self.health.timeout_secs = parse_env_u64("ONCALL_HEALTH_TIMEOUT_SECS", &raw)?;
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for (name, val) in [
            ("refresh.tick_secs", self.refresh.tick_secs),
            ("refresh.issue_list_secs", self.refresh.issue_list_secs),
            ("kube.log_timeout_secs", self.kube.log_timeout_secs),
            ("health.timeout_secs", self.health.timeout_secs),
        ] {
            if val == 0 {
                return Err(OncallError::InvalidConfig {
                    details: format!("{name} must be > 0"),
                });
            }
        }

        if self.kube.log_tail_lines == 0 {
            return Err(OncallError::InvalidConfig {
                details: "kube.log_tail_lines must be > 0".to_string(),
            });
        }

        for (name, binary) in [
            ("kube.binary", &self.kube.binary),
            ("issues.binary", &self.issues.binary),
            ("health.binary", &self.health.binary),
        ] {
            if binary.trim().is_empty() {
                return Err(OncallError::InvalidConfig {
                    details: format!("{name} must not be blank"),
                });
            }
        }

        if self.issues.projects.is_empty() {
            return Err(OncallError::InvalidConfig {
                details: "issues.projects must list at least one project".to_string(),
            });
        }
        if self.health.services.is_empty() {
            return Err(OncallError::InvalidConfig {
                details: "health.services must list at least one service".to_string(),
            });
        }
        if let Some(service) = self.health.services.iter().find(|s| s.url.trim().is_empty()) {
            return Err(OncallError::InvalidConfig {
                details: format!("health service {:?} has an empty url", service.name),
            });
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn parse_env_u64(name: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|error| OncallError::ConfigParse {
            context: "env",
            details: format!("{name}={raw:?}: {error}"),
        })
}
