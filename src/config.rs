use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::SecretScope;
use crate::utils::split_list;

pub const CONFIG_FILE_NAME: &str = ".exprmigrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    /// Comma-separated, without the leading dot (e.g. "yaml,yml").
    #[serde(default = "default_file_extensions")]
    pub file_extensions: String,
    #[serde(default)]
    pub custom_expressions_file: Option<String>,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub secret_scope: SecretScope,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub fail_on_unresolved: bool,
}

fn default_source_root() -> String {
    "./".to_string()
}

fn default_file_extensions() -> String {
    "yaml,yml".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            file_extensions: default_file_extensions(),
            custom_expressions_file: None,
            dry_run: false,
            secret_scope: SecretScope::default(),
            ignores: Vec::new(),
            fail_on_unresolved: false,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid or no file
    /// extension is configured.
    pub fn validate(&self) -> Result<()> {
        self.ignore_patterns()?;

        if self.extensions().is_empty() {
            bail!("'fileExtensions' must list at least one extension, e.g. \"yaml,yml\"");
        }

        Ok(())
    }

    /// Extensions with any leading dot removed.
    pub fn extensions(&self) -> Vec<String> {
        split_list(&self.file_extensions, ',')
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect()
    }

    pub fn ignore_patterns(&self) -> Result<Vec<Pattern>> {
        self.ignores
            .iter()
            .map(|pattern| {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))
            })
            .collect()
    }

    /// The custom expressions file, if one is set and not blank.
    pub fn custom_expressions_path(&self) -> Option<PathBuf> {
        self.custom_expressions_file
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
