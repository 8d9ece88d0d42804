use std::path::PathBuf;

use crate::core::{ExpressionReport, TranslationOutcome};

#[derive(Debug)]
pub enum CommandSummary {
    Translate(TranslateSummary),
    Resolve(ResolveSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct TranslateSummary {
    /// Scanned directory, used to shorten displayed paths.
    pub root: PathBuf,
    pub outcome: TranslationOutcome,
}

#[derive(Debug)]
pub struct ResolveSummary {
    pub expressions: Vec<ExpressionReport>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

/// Result of running exprmig commands
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Expressions that could not be translated. For a dry run this counts
    /// unique unsupported expressions, otherwise expressions left in files.
    pub unresolved_count: usize,
    /// If true, exit code 1 should be returned when unresolved_count > 0.
    pub exit_on_unresolved: bool,
}
