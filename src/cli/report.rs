//! Report formatting and printing utilities.
//!
//! Renders command results as box tables plus a one-line summary.
//! Separate from core logic to allow exprmig to be used as a library.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use colored::Colorize;
use indexmap::IndexSet;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, InitSummary, ResolveSummary, TranslateSummary,
};
use crate::core::{ExpressionReport, TranslationOutcome};
use crate::utils::display_path;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

const EQUIVALENT_TITLE: &str = "Equivalent Expressions";
const EQUIVALENT_HEADERS: &[&str] = &["First Gen", "Supported?", "Next Gen"];
const FILES_TITLE: &str = "Files containing expressions";
const NOT_REPLACED_TITLE: &str = "Expressions not replaced";
const FILE_HEADERS: &[&str] = &["File", "Expressions"];

/// Print a command result to stdout.
pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock());
}

/// Print a command result to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Translate(summary) => print_translate(summary, writer),
        CommandSummary::Resolve(summary) => print_resolve(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

/// Render a light box table with a title row spanning all columns.
pub fn render_table(title: &str, headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut inner = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
    let title_width = title.width();
    if title_width > inner {
        if let Some(last) = widths.last_mut() {
            *last += title_width - inner;
        }
        inner = title_width;
    }

    let mut out = String::new();
    out.push_str(&format!("┌{}┐\n", "─".repeat(inner + 2)));
    out.push_str(&format!("│ {} │\n", pad(title, inner)));
    out.push_str(&border(('├', '┬', '┤'), &widths));
    out.push_str(&row_line(headers, &widths));
    out.push_str(&border(('├', '┼', '┤'), &widths));
    for row in rows {
        out.push_str(&row_line(row.as_slice(), &widths));
    }
    out.push_str(&border(('└', '┴', '┘'), &widths));
    out
}

// ============================================================
// Internal Functions
// ============================================================

fn print_translate<W: Write>(summary: &TranslateSummary, writer: &mut W) {
    match &summary.outcome {
        TranslationOutcome::NoExpressions { files_scanned } => {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Scanned {} {} - no files found containing expressions",
                    files_scanned,
                    plural(*files_scanned, "file", "files")
                )
                .green()
            );
        }
        TranslationOutcome::DryRun { scan, report, .. } => {
            print_equivalents(report, writer);
            print_file_table(FILES_TITLE, &scan.files, &summary.root, writer);
            let _ = writeln!(
                writer,
                "{} Dry run: skipped replacement in {} {}",
                "note:".bold().cyan(),
                scan.files.len(),
                plural(scan.files.len(), "file", "files")
            );
        }
        TranslationOutcome::Applied {
            scan,
            report,
            replacements,
            ..
        } => {
            print_equivalents(report, writer);
            print_file_table(FILES_TITLE, &scan.files, &summary.root, writer);
            if !replacements.unresolved.is_empty() {
                print_file_table(
                    NOT_REPLACED_TITLE,
                    &replacements.unresolved,
                    &summary.root,
                    writer,
                );
            }

            let changed = replacements.files_changed.len();
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Replaced expressions in {} {}",
                    changed,
                    plural(changed, "file", "files")
                )
                .green()
            );

            let unresolved = replacements.unresolved_count();
            if unresolved > 0 {
                let _ = writeln!(
                    writer,
                    "{} {}",
                    FAILURE_MARK.yellow(),
                    format!(
                        "{} {} could not be replaced",
                        unresolved,
                        plural(unresolved, "expression", "expressions")
                    )
                    .yellow()
                );
            }
        }
    }
}

fn print_resolve<W: Write>(summary: &ResolveSummary, writer: &mut W) {
    print_equivalents(&summary.expressions, writer);
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path.display()).green()
    );
}

fn print_equivalents<W: Write>(report: &[ExpressionReport], writer: &mut W) {
    if report.is_empty() {
        return;
    }
    let rows: Vec<Vec<String>> = report.iter().map(equivalent_row).collect();
    let _ = write!(
        writer,
        "{}",
        render_table(EQUIVALENT_TITLE, EQUIVALENT_HEADERS, &rows)
    );
}

fn equivalent_row(entry: &ExpressionReport) -> Vec<String> {
    let supported = if entry.resolution.is_resolved() {
        "Yes"
    } else {
        "No"
    };
    vec![
        entry.token.clone(),
        supported.to_string(),
        entry.resolution.value().unwrap_or_default().to_string(),
    ]
}

fn print_file_table<'a, W, I, E>(title: &str, files: I, root: &Path, writer: &mut W)
where
    W: Write,
    I: IntoIterator<Item = (&'a PathBuf, &'a E)>,
    E: FileExpressions + 'a,
{
    let rows: Vec<Vec<String>> = files
        .into_iter()
        .map(|(path, expressions)| vec![display_path(path, root), expressions.joined()])
        .collect();
    let _ = write!(writer, "{}", render_table(title, FILE_HEADERS, &rows));
}

/// Expression lists shown per file.
trait FileExpressions {
    fn joined(&self) -> String;
}

impl FileExpressions for IndexSet<String> {
    fn joined(&self) -> String {
        self.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

impl FileExpressions for Vec<String> {
    fn joined(&self) -> String {
        self.join(", ")
    }
}

fn border((left, mid, right): (char, char, char), widths: &[usize]) -> String {
    let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
    format!("{}{}{}\n", left, segments.join(mid.to_string().as_str()), right)
}

fn row_line<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let segments: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map_or("", |c| c.as_ref());
            format!(" {} ", pad(cell, *width))
        })
        .collect();
    format!("│{}│\n", segments.join("│"))
}

fn pad(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
