//! Run configuration: defaults, settings file, environment and flags.
//!
//! Precedence, lowest first: built-in defaults, `.commitsmith.toml`,
//! environment, command-line flags. The merged [`Config`] is built once at
//! startup and passed by reference to every component.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use serde::Deserialize;
use tracing::debug;

use crate::commit::driver::{PromptFlow, PushTarget};
use crate::commit::select::DiffPolicyKind;
use crate::error::ConfigError;
use crate::llm::{DEFAULT_BASE_URL, DEFAULT_MODEL, PromptTemplate};

/// Settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = ".commitsmith.toml";

/// Environment variable overriding the endpoint base URL.
pub const BASE_URL_ENV: &str = "COMMITSMITH_BASE_URL";

/// What gets staged before the diff is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageMode {
    /// Only the first changed path from `git status`.
    #[default]
    FirstChanged,
    /// Every change in the tree.
    All,
}

/// Partial settings from one source. `None` means "not set here".
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Settings {
    pub stage: Option<StageMode>,
    pub policy: Option<DiffPolicyKind>,
    pub flow: Option<PromptFlow>,
    pub template: Option<PromptTemplate>,
    pub model: Option<String>,
    pub with_example: Option<bool>,
    pub remote: Option<String>,
    pub branch: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Read a settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a settings file if it exists.
    pub fn load_optional(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            debug!("No settings file at {}", path.display());
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Layer `over` on top of `self`; fields set in `over` win.
    pub fn merge(self, over: Settings) -> Settings {
        Settings {
            stage: over.stage.or(self.stage),
            policy: over.policy.or(self.policy),
            flow: over.flow.or(self.flow),
            template: over.template.or(self.template),
            model: over.model.or(self.model),
            with_example: over.with_example.or(self.with_example),
            remote: over.remote.or(self.remote),
            branch: over.branch.or(self.branch),
            base_url: over.base_url.or(self.base_url),
            timeout_secs: over.timeout_secs.or(self.timeout_secs),
        }
    }

    /// Settings taken from the environment.
    fn from_env() -> Settings {
        Settings {
            base_url: env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty()),
            ..Settings::default()
        }
    }
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub workdir: PathBuf,
    pub stage: StageMode,
    pub policy: DiffPolicyKind,
    pub flow: PromptFlow,
    pub template: PromptTemplate,
    pub model: String,
    pub with_example: bool,
    pub push: PushTarget,
    pub base_url: String,
    /// `None` leaves the completion request unbounded.
    pub request_timeout: Option<Duration>,
    pub dry_run: bool,
}

impl Config {
    /// Fill unset fields with defaults.
    pub fn from_settings(workdir: impl Into<PathBuf>, settings: Settings, dry_run: bool) -> Self {
        let push_default = PushTarget::default();

        Config {
            workdir: workdir.into(),
            stage: settings.stage.unwrap_or_default(),
            policy: settings.policy.unwrap_or_default(),
            flow: settings.flow.unwrap_or_default(),
            template: settings.template.unwrap_or_default(),
            model: settings.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            with_example: settings.with_example.unwrap_or(false),
            push: PushTarget {
                remote: settings.remote.unwrap_or(push_default.remote),
                branch: settings.branch.unwrap_or(push_default.branch),
            },
            base_url: settings
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout: settings
                .timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            dry_run,
        }
    }

    /// Resolve the configuration for `workdir`.
    ///
    /// `settings_path` overrides the default settings file location and must
    /// exist when given. `flags` are the command-line settings.
    pub fn resolve(
        workdir: &Path,
        settings_path: Option<&Path>,
        flags: Settings,
        dry_run: bool,
    ) -> Result<Self, ConfigError> {
        let file = match settings_path {
            Some(path) => Settings::load(path)?,
            None => Settings::load_optional(&workdir.join(SETTINGS_FILE))?.unwrap_or_default(),
        };

        let merged = file.merge(Settings::from_env()).merge(flags);
        Ok(Config::from_settings(workdir, merged, dry_run))
    }
}
