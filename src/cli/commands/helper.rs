use std::{env, path::PathBuf};

use anyhow::{Context, Result};

use super::super::args::CommonArgs;
use crate::{
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::ExpressionResolver,
};

/// Load the config file found from the working directory and apply the
/// command-line overrides shared by all commands.
pub fn load_config_with_overrides(common: &CommonArgs) -> Result<(Config, PathBuf)> {
    let cwd = env::current_dir().context("Failed to determine current directory")?;
    let loaded = load_config(&cwd)?;

    match &loaded.path {
        Some(path) => tracing::debug!("Using configuration from {}", path.display()),
        None => tracing::debug!("No {} found, using default configuration", CONFIG_FILE_NAME),
    }

    let mut config = loaded.config;
    if let Some(path) = &common.custom_expressions {
        config.custom_expressions_file = Some(path.to_string_lossy().into_owned());
    }
    if let Some(scope) = common.secret_scope {
        config.secret_scope = scope;
    }

    Ok((config, cwd))
}

/// Build the resolver for `config`, loading custom expressions if configured.
pub fn build_resolver(config: &Config) -> Result<ExpressionResolver> {
    let mut resolver = ExpressionResolver::new(config.secret_scope);
    if let Some(path) = config.custom_expressions_path() {
        resolver.load_custom_expressions(&path)?;
    }
    Ok(resolver)
}
