//! Built-in expression knowledge: the static mapping table and the
//! parameterized (dynamic) expression families.

use std::{borrow::Cow, collections::HashMap};

use clap::ValueEnum;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use super::normalize::to_camel_case;

/// Exact first-gen key to next-gen expression pairs.
const BUILTIN_EXPRESSIONS: &[(&str, &str)] = &[
    // Infra
    ("infra.kubernetes.namespace", "<+infra.namespace>"),
    ("infra.kubernetes.infraId", "<+INFRA_KEY>"),
    ("infra.helm.releaseName", "<+infra.releaseName>"),
    ("infra.name", "<+infra.name>"),
    // Environment
    ("env.name", "<+env.name>"),
    ("env.description", "<+env.description>"),
    ("env.environmentType", "<+env.type>"),
    ("env.uuid", "<+env.identifier>"),
    // Service
    ("service.name", "<+service.name>"),
    ("service.Name", "<+service.name>"),
    ("Service.name", "<+service.name>"),
    ("service.tag", "<+service.tags>"),
    ("service.uuid", "<+service.identifier>"),
    ("service.description", "<+service.description>"),
    // Artifact
    ("artifact.metadata.image", "<+artifact.image>"),
    ("artifact.metadata.tag", "<+artifact.tag>"),
    ("artifact.source.dockerconfig", "<+artifact.imagePullSecret>"),
    ("artifact.metadata.fileName", "<+artifact.fileName>"),
    ("artifact.metadata.format", "<+artifact.repositoryFormat>"),
    ("artifact.metadata.getSHA()", "<+artifact.metadata.SHA>"),
    ("artifact.metadata.groupId", "<+artifact.groupId>"),
    ("artifact.metadata.package", "<+artifact.metadata.package>"),
    ("artifact.metadata.region", "<+artifact.metadata.region>"),
    ("artifact.metadata.repository", "<+artifact.repository>"),
    ("artifact.metadata.repositoryName", "<+artifact.repositoryName>"),
    ("artifact.metadata.url", "<+artifact.url>"),
    ("artifact.buildNo", "<+artifact.tag>"),
    // Rollback artifact
    ("rollbackArtifact.metadata.image", "<+rollbackArtifact.image>"),
    ("rollbackArtifact.metadata.tag", "<+rollbackArtifact.tag>"),
    (
        "rollbackArtifact.source.dockerconfig",
        "<+rollbackArtifact.imagePullSecret>",
    ),
    ("rollbackArtifact.metadata.fileName", "<+rollbackArtifact.fileName>"),
    (
        "rollbackArtifact.metadata.format",
        "<+rollbackArtifact.repositoryFormat>",
    ),
    (
        "rollbackArtifact.metadata.getSHA()",
        "<+rollbackArtifact.metadata.SHA>",
    ),
    ("rollbackArtifact.metadata.groupId", "<+rollbackArtifact.groupId>"),
    (
        "rollbackArtifact.metadata.package",
        "<+rollbackArtifact.metadata.package>",
    ),
    (
        "rollbackArtifact.metadata.region",
        "<+rollbackArtifact.metadata.region>",
    ),
    (
        "rollbackArtifact.metadata.repository",
        "<+rollbackArtifact.repository>",
    ),
    (
        "rollbackArtifact.metadata.repositoryName",
        "<+rollbackArtifact.repositoryName>",
    ),
    ("rollbackArtifact.metadata.url", "<+rollbackArtifact.url>"),
    ("rollbackArtifact.buildNo", "<+rollbackArtifact.tag>"),
    // Application
    ("app.name", "<+project.name>"),
    ("app.description", "<+project.description>"),
    // HTTP step
    ("httpResponseCode", "<+httpResponseCode>"),
    ("httpResponseBody", "<+httpResponseBody>"),
    ("httpMethod", "<+httpMethod>"),
    ("httpUrl", "<+httpUrl>"),
];

/// Field-access families: `<prefix>.<suffix>` becomes `<+<target>.<suffix>>`.
const FIELD_ACCESS_EXPRESSIONS: &[(&str, &str)] = &[
    ("workflow.variables", "stage.variables"),
    ("pipeline.variables", "pipeline.variables"),
    ("serviceVariable", "serviceVariables"),
    ("serviceVariables", "serviceVariables"),
    ("service.variables", "serviceVariables"),
    ("environmentVariable", "env.variables"),
    ("environmentVariables", "env.variables"),
    ("app.defaults", "variable"),
];

pub const SECRET_VALUE_PREFIX: &str = "secrets.getValue(";

/// The built-in static mapping table.
pub fn builtin_expressions() -> HashMap<String, String> {
    BUILTIN_EXPRESSIONS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Scope qualifier applied to synthesized secret references.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SecretScope {
    #[default]
    None,
    Account,
    Org,
}

impl SecretScope {
    /// Prefix `key` with `Account.` / `Org.` according to the scope.
    pub fn qualify(self, key: &str) -> String {
        match self {
            SecretScope::None => key.to_string(),
            SecretScope::Account => format!("Account.{}", key),
            SecretScope::Org => format!("Org.{}", key),
        }
    }
}

/// Computes a replacement value from the variable part of a key.
#[enum_dispatch]
pub trait ExpandSuffix {
    fn expand(&self, suffix: &str) -> String;
}

/// `<+target.suffix>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldAccess {
    pub target: &'static str,
}

impl ExpandSuffix for FieldAccess {
    fn expand(&self, suffix: &str) -> String {
        format!("<+{}.{}>", self.target, suffix)
    }
}

/// `<+secrets.getValue("<scoped camelCase key>")>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretValue {
    pub scope: SecretScope,
}

impl ExpandSuffix for SecretValue {
    fn expand(&self, suffix: &str) -> String {
        let key = self.scope.qualify(&to_camel_case(suffix));
        format!("<+secrets.getValue(\"{}\")>", key)
    }
}

#[enum_dispatch(ExpandSuffix)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DynamicExpression {
    FieldAccess(FieldAccess),
    SecretValue(SecretValue),
}

/// A prefix-matched family of keys.
#[derive(Debug, Clone)]
pub struct DynamicEntry {
    pub prefix: &'static str,
    pub expression: DynamicExpression,
}

impl DynamicEntry {
    /// Call-style prefixes end with `(`, e.g. `secrets.getValue(`.
    pub fn is_call(&self) -> bool {
        self.prefix.ends_with('(')
    }

    /// Extract the suffix argument from `key`, or `None` if `key` does not
    /// start with this prefix.
    ///
    /// Call-style entries take everything after the prefix with one trailing
    /// `)` removed. Field-style entries take everything after `prefix.`; when
    /// the key has no `.` right after the prefix, the first `prefix.` found
    /// anywhere in the key is removed instead, leaving the key as is if none.
    pub fn suffix<'k>(&self, key: &'k str) -> Option<Cow<'k, str>> {
        let rest = key.strip_prefix(self.prefix)?;
        if self.is_call() {
            return Some(Cow::Borrowed(rest.strip_suffix(')').unwrap_or(rest)));
        }
        if let Some(field) = rest.strip_prefix('.') {
            return Some(Cow::Borrowed(field));
        }
        let dotted = format!("{}.", self.prefix);
        Some(match key.find(&dotted) {
            Some(at) => Cow::Owned(format!("{}{}", &key[..at], &key[at + dotted.len()..])),
            None => Cow::Borrowed(key),
        })
    }
}

/// Registry of dynamic expressions, iterated longest prefix first.
#[derive(Debug, Clone)]
pub struct DynamicRegistry {
    entries: Vec<DynamicEntry>,
}

impl DynamicRegistry {
    pub fn new(scope: SecretScope) -> Self {
        let mut entries: Vec<DynamicEntry> = FIELD_ACCESS_EXPRESSIONS
            .iter()
            .map(|&(prefix, target)| DynamicEntry {
                prefix,
                expression: FieldAccess { target }.into(),
            })
            .collect();
        entries.push(DynamicEntry {
            prefix: SECRET_VALUE_PREFIX,
            expression: SecretValue { scope }.into(),
        });

        entries.sort_by(|a, b| {
            b.prefix
                .len()
                .cmp(&a.prefix.len())
                .then_with(|| a.prefix.cmp(b.prefix))
        });

        Self { entries }
    }

    /// First matching entry in iteration order, with its suffix argument.
    pub fn find<'k>(&self, key: &'k str) -> Option<(&DynamicEntry, Cow<'k, str>)> {
        self.entries
            .iter()
            .find_map(|entry| entry.suffix(key).map(|suffix| (entry, suffix)))
    }
}
