//! Resolution of expression keys to next-gen values.
//!
//! Lookup order, first hit wins:
//! 1. exact match in the static table (built-ins plus custom expressions)
//! 2. dynamic expression families, longest prefix first
//! 3. unresolved

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use super::{
    error::{Result, TranslateError},
    expressions::{DynamicRegistry, ExpandSuffix, SecretScope, builtin_expressions},
    extract::expression_key,
};

/// Outcome of resolving a single key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Found in the static table.
    Static(String),
    /// Computed by the dynamic family registered under `prefix`.
    Dynamic { prefix: &'static str, value: String },
    Unresolved,
}

impl Resolution {
    pub fn value(&self) -> Option<&str> {
        match self {
            Resolution::Static(value) | Resolution::Dynamic { value, .. } => Some(value.as_str()),
            Resolution::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::Unresolved)
    }
}

/// The resolution engine.
///
/// Built once before any file is processed and only read afterwards.
#[derive(Debug, Clone)]
pub struct ExpressionResolver {
    table: HashMap<String, String>,
    dynamic: DynamicRegistry,
}

impl ExpressionResolver {
    pub fn new(scope: SecretScope) -> Self {
        Self {
            table: builtin_expressions(),
            dynamic: DynamicRegistry::new(scope),
        }
    }

    /// Merge custom entries into the static table, replacing built-ins on
    /// key collision.
    pub fn merge_custom_expressions(
        &mut self,
        custom: impl IntoIterator<Item = (String, String)>,
    ) {
        self.table.extend(custom);
    }

    /// Load a YAML key/value file and merge it into the static table.
    ///
    /// A blank path is a no-op. Returns the number of entries loaded.
    pub fn load_custom_expressions(&mut self, path: &Path) -> Result<usize> {
        if path.as_os_str().to_string_lossy().trim().is_empty() {
            return Ok(0);
        }

        let custom = read_custom_expressions(path)?;
        let count = custom.len();
        self.merge_custom_expressions(custom);

        tracing::info!(
            "Loaded {} custom expressions from {}",
            count,
            path.display()
        );
        Ok(count)
    }

    /// Resolve a key (delimiters already stripped).
    pub fn resolve(&self, key: &str) -> Resolution {
        if let Some(value) = self.table.get(key) {
            return Resolution::Static(value.clone());
        }

        match self.dynamic.find(key) {
            Some((entry, suffix)) => Resolution::Dynamic {
                prefix: entry.prefix,
                value: entry.expression.expand(&suffix),
            },
            None => Resolution::Unresolved,
        }
    }

    /// Resolve a `${...}` token.
    pub fn resolve_token(&self, token: &str) -> Resolution {
        self.resolve(expression_key(token))
    }

    /// Replace every resolvable token in `content`.
    ///
    /// Each resolved token is replaced literally at every occurrence.
    /// Returns the new content and the unresolved tokens in input order.
    pub fn replace_expressions<'t, I>(&self, content: &str, tokens: I) -> (String, Vec<String>)
    where
        I: IntoIterator<Item = &'t String>,
    {
        let mut output = content.to_string();
        let mut unresolved = Vec::new();

        for token in tokens {
            match self.resolve_token(token).value() {
                Some(value) => output = output.replace(token.as_str(), value),
                None => unresolved.push(token.clone()),
            }
        }

        (output, unresolved)
    }
}

fn read_custom_expressions(path: &Path) -> Result<HashMap<String, String>> {
    let content = fs::read_to_string(path).map_err(|source| {
        TranslateError::CustomExpressionsRead {
            path: PathBuf::from(path),
            source,
        }
    })?;

    if content.trim().is_empty() {
        return Ok(HashMap::new());
    }

    serde_yaml::from_str(&content).map_err(|source| TranslateError::CustomExpressionsParse {
        path: PathBuf::from(path),
        source,
    })
}
