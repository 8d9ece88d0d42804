//! Corpus translation: scan, report, replace.
//!
//! ## Phases
//!
//! 1. **Scan**: files are read and searched for expressions in parallel, then
//!    merged into a single [`CorpusScan`].
//! 2. **Report**: every unique expression is resolved for display only.
//! 3. **Replace** (skipped on dry run): each file is re-read, substituted and
//!    overwritten, one file at a time.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use glob::Pattern;
use indexmap::IndexSet;
use rayon::prelude::*;

use super::{
    error::{Result, TranslateError},
    extract::extract_expressions,
    resolve::{ExpressionResolver, Resolution},
    scanner::scan_files,
};

/// Inputs for a translation run.
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    pub root: PathBuf,
    /// Extensions without the leading dot.
    pub extensions: Vec<String>,
    pub ignores: Vec<Pattern>,
    pub dry_run: bool,
}

/// Expressions found across the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusScan {
    /// Expressions per file, in first-occurrence order. Files without any
    /// expression are not listed.
    pub files: BTreeMap<PathBuf, IndexSet<String>>,
    /// Every unique expression in the corpus.
    pub expressions: BTreeSet<String>,
}

impl CorpusScan {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Display row: an expression and how it resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionReport {
    pub token: String,
    pub resolution: Resolution,
}

/// Result of the replacement phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementSummary {
    /// Files whose content actually changed.
    pub files_changed: Vec<PathBuf>,
    /// Expressions left in place, per file.
    pub unresolved: BTreeMap<PathBuf, Vec<String>>,
}

impl ReplacementSummary {
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// No scanned file contained an expression.
    NoExpressions { files_scanned: usize },
    /// Expressions were found and reported, nothing was written.
    DryRun {
        files_scanned: usize,
        scan: CorpusScan,
        report: Vec<ExpressionReport>,
    },
    /// Expressions were found, reported and replaced.
    Applied {
        files_scanned: usize,
        scan: CorpusScan,
        report: Vec<ExpressionReport>,
        replacements: ReplacementSummary,
    },
}

/// Run a full translation over `options.root`.
pub fn translate(
    options: &TranslateOptions,
    resolver: &ExpressionResolver,
) -> Result<TranslationOutcome> {
    let files = scan_files(&options.root, &options.extensions, &options.ignores)?;
    let files_scanned = files.len();
    let scan = scan_corpus(&files)?;

    if scan.is_empty() {
        tracing::info!("No files found containing expressions");
        return Ok(TranslationOutcome::NoExpressions { files_scanned });
    }

    let report = describe_expressions(&scan, resolver);

    if options.dry_run {
        tracing::info!("Dry run is enabled, skipping expression replacement for all files");
        return Ok(TranslationOutcome::DryRun {
            files_scanned,
            scan,
            report,
        });
    }

    let replacements = apply_replacements(&scan, resolver)?;
    Ok(TranslationOutcome::Applied {
        files_scanned,
        scan,
        report,
        replacements,
    })
}

/// Read `files` and collect their expressions.
pub fn scan_corpus(files: &[PathBuf]) -> Result<CorpusScan> {
    // Parallel read + extract
    let found: Vec<(PathBuf, IndexSet<String>)> = files
        .par_iter()
        .map(|path| -> Result<(PathBuf, IndexSet<String>)> {
            let content = read_file(path)?;
            Ok((path.clone(), extract_expressions(&content)))
        })
        .collect::<Result<_>>()?;

    // Sequential merge
    let mut scan = CorpusScan::default();
    for (path, expressions) in found {
        if expressions.is_empty() {
            continue;
        }
        scan.expressions.extend(expressions.iter().cloned());
        scan.files.insert(path, expressions);
    }

    Ok(scan)
}

/// Resolve every unique expression of the corpus, sorted by token.
pub fn describe_expressions(
    scan: &CorpusScan,
    resolver: &ExpressionResolver,
) -> Vec<ExpressionReport> {
    scan.expressions
        .iter()
        .map(|token| ExpressionReport {
            token: token.clone(),
            resolution: resolver.resolve_token(token),
        })
        .collect()
}

/// Rewrite every file of the scan in place.
pub fn apply_replacements(
    scan: &CorpusScan,
    resolver: &ExpressionResolver,
) -> Result<ReplacementSummary> {
    let mut summary = ReplacementSummary::default();

    for (path, expressions) in &scan.files {
        let content = read_file(path)?;
        let (replaced, unresolved) = resolver.replace_expressions(&content, expressions);

        fs::write(path, &replaced).map_err(|source| TranslateError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Replaced expressions in {}", path.display());

        if replaced != content {
            summary.files_changed.push(path.clone());
        }
        if !unresolved.is_empty() {
            summary.unresolved.insert(path.clone(), unresolved);
        }
    }

    Ok(summary)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| TranslateError::Read {
        path: path.to_path_buf(),
        source,
    })
}
