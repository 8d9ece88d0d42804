use anyhow::{Context, Result};

use super::super::args::TranslateCommand;
use super::helper::{build_resolver, load_config_with_overrides};
use super::{CommandResult, CommandSummary, TranslateSummary};
use crate::core::{TranslateOptions, TranslationOutcome, translate as translate_corpus};

pub fn translate(cmd: TranslateCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let (mut config, cwd) = load_config_with_overrides(&args.common)?;

    if let Some(root) = &args.source_root {
        config.source_root = root.to_string_lossy().into_owned();
    }
    if let Some(extensions) = &args.file_extensions {
        config.file_extensions = extensions.clone();
    }
    config.dry_run |= args.dry_run;
    config.fail_on_unresolved |= args.fail_on_unresolved;
    config.validate()?;

    // Custom expressions are loaded before any file is read
    let resolver = build_resolver(&config)?;

    let root = cwd.join(&config.source_root);
    let options = TranslateOptions {
        root: root.clone(),
        extensions: config.extensions(),
        ignores: config.ignore_patterns()?,
        dry_run: config.dry_run,
    };

    let outcome = translate_corpus(&options, &resolver)
        .with_context(|| format!("Failed to translate expressions under {}", root.display()))?;

    let unresolved_count = match &outcome {
        TranslationOutcome::NoExpressions { .. } => 0,
        TranslationOutcome::DryRun { report, .. } => report
            .iter()
            .filter(|e| !e.resolution.is_resolved())
            .count(),
        TranslationOutcome::Applied { replacements, .. } => replacements.unresolved_count(),
    };

    Ok(CommandResult {
        summary: CommandSummary::Translate(TranslateSummary { root, outcome }),
        unresolved_count,
        exit_on_unresolved: config.fail_on_unresolved,
    })
}
