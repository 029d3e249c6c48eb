//! Procedure discovery: locating the `Procedures` declaration and walking
//! its three categories into metadata records.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::{SourceFile, TypeAlias};
use crate::error::{Error, Result};
use crate::typesystem::{is_custom_type, TypeSystem};

/// Name of the aggregate type rspc emits into the bindings file.
pub const PROCEDURES_TYPE: &str = "Procedures";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ProcedureKind {
    Query,
    Mutation,
    Subscription,
}

impl ProcedureKind {
    pub const ALL: [ProcedureKind; 3] = [
        ProcedureKind::Query,
        ProcedureKind::Mutation,
        ProcedureKind::Subscription,
    ];

    /// Property holding this category on the `Procedures` type.
    pub fn property(&self) -> &'static str {
        match self {
            Self::Query => "queries",
            Self::Mutation => "mutations",
            Self::Subscription => "subscriptions",
        }
    }

    /// Client method the generated wrapper forwards to.
    pub fn method(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }

    pub fn default_prefix(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutate",
            Self::Subscription => "subscribeTo",
        }
    }
}

impl fmt::Display for ProcedureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

/// Everything the emitter needs to know about one procedure.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureMetadata {
    /// The procedure's dotted key, e.g. `user.list`.
    pub key: String,
    /// Rendered input type, or `None` when the procedure takes no input
    /// (its `input` property is absent or `never`).
    pub input: Option<String>,
    /// Whether the input type has to be referenced through the bindings
    /// import alias.
    pub input_is_custom: bool,
    /// Rendered result type. Always present.
    pub result: String,
}

/// Finds the `Procedures` type alias. The first declaration in file order
/// wins; a file without one is an empty procedure set, not an error.
pub fn find_procedures_alias(file: &SourceFile) -> Option<&TypeAlias> {
    file.aliases
        .iter()
        .find(|alias| alias.name == PROCEDURES_TYPE)
}

/// Walks one category of the procedure set into metadata records, in union
/// declaration order.
///
/// A category that is absent or not a union contributes nothing. A union
/// member without a literal-string `key` cannot be addressed as a procedure
/// and is skipped with a warning. A member without a resolvable `result` is
/// a hard error: every procedure must declare one.
pub fn extract_procedures<'a>(
    ts: &TypeSystem<'a>,
    alias: &'a TypeAlias,
    kind: ProcedureKind,
) -> Result<Vec<ProcedureMetadata>> {
    let Some(category) = ts.property(&alias.ty, kind.property()) else {
        return Ok(Vec::new());
    };
    let Some(members) = ts.union_members(category) else {
        return Ok(Vec::new());
    };

    let mut procedures = Vec::new();
    for member in members {
        let Some(key) = ts.property(member, "key").and_then(|ty| ts.literal_string(ty)) else {
            tracing::warn!(kind = %kind, "skipping procedure member without a literal `key`");
            continue;
        };

        let input = ts
            .property(member, "input")
            .filter(|ty| !ts.is_never(ty))
            .map(|ty| ts.render(ty));
        let input_is_custom = input.as_deref().map(is_custom_type).unwrap_or(false);

        let result = ts
            .property(member, "result")
            .map(|ty| ts.render(ty))
            .ok_or_else(|| Error::MissingResult { key: key.into() })?;

        procedures.push(ProcedureMetadata {
            key: key.into(),
            input,
            input_is_custom,
            result,
        });
    }

    tracing::debug!(kind = %kind, count = procedures.len(), "extracted procedures");
    Ok(procedures)
}

/// Keys appearing more than once across the flattened category lists.
/// Two occurrences in the same category count just like one occurrence in
/// two different categories.
pub fn find_duplicate_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> BTreeSet<String> {
    let all: Vec<&str> = keys.into_iter().collect();
    all.iter()
        .filter(|key| all.iter().filter(|k| k == key).count() > 1)
        .map(|key| (*key).to_string())
        .collect()
}
