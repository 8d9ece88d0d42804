//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `translate`: Replace first-gen expressions with next-gen ones across a directory tree
//! - `resolve`: Show how individual expressions translate
//! - `init`: Initialize exprmig configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::SecretScope;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Translate(cmd)) => cmd.args.common.verbose,
            Some(Command::Resolve(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by commands that resolve expressions.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// YAML file of extra `key: value` expression mappings (overrides config file)
    #[arg(long)]
    pub custom_expressions: Option<PathBuf>,

    /// Scope prefix for translated secret references (overrides config file)
    #[arg(long, value_enum, env = "EXPRMIG_SECRET_SCOPE")]
    pub secret_scope: Option<SecretScope>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct TranslateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Directory to scan (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Comma-separated file extensions without the leading dot (overrides config file)
    #[arg(long)]
    pub file_extensions: Option<String>,

    /// Report expressions without modifying any file
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with status 1 when some expressions could not be translated
    #[arg(long)]
    pub fail_on_unresolved: bool,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    #[command(flatten)]
    pub args: TranslateArgs,
}

#[derive(Debug, Parser)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Expressions to resolve, either `${key}` tokens or bare keys
    #[arg(required = true)]
    pub expressions: Vec<String>,
    #[command(flatten)]
    pub args: ResolveArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace first-gen `${...}` expressions with next-gen `<+...>` expressions in place
    Translate(TranslateCommand),
    /// Show the next-gen equivalent of individual expressions
    Resolve(ResolveCommand),
    /// Initialize a new .exprmigrc.json configuration file
    Init,
}
