use anyhow::Result;

use super::super::args::ResolveCommand;
use super::helper::{build_resolver, load_config_with_overrides};
use super::{CommandResult, CommandSummary, ResolveSummary};
use crate::core::ExpressionReport;

pub fn resolve(cmd: ResolveCommand) -> Result<CommandResult> {
    let (config, _) = load_config_with_overrides(&cmd.args.common)?;
    let resolver = build_resolver(&config)?;

    let expressions: Vec<ExpressionReport> = cmd
        .expressions
        .iter()
        .map(|expression| ExpressionReport {
            token: expression.clone(),
            resolution: resolver.resolve_token(expression.trim()),
        })
        .collect();

    let unresolved_count = expressions
        .iter()
        .filter(|e| !e.resolution.is_resolved())
        .count();

    Ok(CommandResult {
        summary: CommandSummary::Resolve(ResolveSummary { expressions }),
        unresolved_count,
        exit_on_unresolved: false,
    })
}
