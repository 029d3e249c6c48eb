//! Function name synthesis and TypeScript emission.
//!
//! Emission goes through a small intermediate representation with one value
//! per generated declaration. Each value has its own `render` so formatting
//! stays in one place and output can be asserted by structure.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::config::ResolvedConfig;
use crate::procedure::{ProcedureKind, ProcedureMetadata};
use crate::util::{camel_case, capitalize};

/// Namespace alias the bindings file is imported under.
const BINDINGS_ALIAS: &str = "rpc";

/// rspc renders a unit result as `null[]`; the docs show `void` for it
/// instead of the raw rendering.
const UNIT_RESULT: &str = "null[]";

/// Synthesizes the wrapper function name for a procedure key.
///
/// The category prefix is applied when the key collides with another
/// category, or unconditionally when `prefix_duplicates_only` is off. Dotted
/// key segments are Pascal-cased and the whole candidate normalized to
/// camelCase, so `user.list` becomes `userList` and, when prefixed,
/// `queryUserList`.
pub fn function_name(
    key: &str,
    kind: ProcedureKind,
    config: &ResolvedConfig,
    duplicates: &BTreeSet<String>,
) -> String {
    let prefix = if duplicates.contains(key) || !config.prefix_duplicates_only {
        config.prefix_for(kind)
    } else {
        ""
    };
    let segments: String = key.split('.').map(capitalize).collect();
    camel_case(&format!("{prefix}{segments}"))
}

/// The shared import block.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportBlock {
    /// Import specifier of the bindings file (the normalized input path).
    pub bindings_path: String,
}

impl ImportBlock {
    pub fn render(&self) -> String {
        format!(
            "import type * as {BINDINGS_ALIAS} from '{}';\nimport {{ createClient, FetchTransport, type Client }} from \"@rspc/client\";",
            self.bindings_path
        )
    }
}

/// The shared transport and client declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientBlock {
    /// Rendered `FetchTransport` argument expression.
    pub transport: String,
    /// JSON object literal of the remaining client options.
    pub config_json: String,
}

impl ClientBlock {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            transport: config.transport.clone(),
            config_json: serde_json::Value::Object(config.client_extra.clone()).to_string(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "// Generated client and config\nconst transport = new FetchTransport({});\nconst clientConfig = {{ ...{}, transport }};\nexport const client = createClient<{BINDINGS_ALIAS}.Procedures>(clientConfig);",
            self.transport, self.config_json
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionParam {
    /// Rendered input type text.
    pub ty: String,
    /// Qualify the type with the bindings alias.
    pub imported: bool,
}

impl FunctionParam {
    fn type_text(&self) -> String {
        if self.imported {
            format!("{BINDINGS_ALIAS}.{}", self.ty)
        } else {
            self.ty.clone()
        }
    }
}

/// One documented wrapper function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub kind: ProcedureKind,
    pub key: String,
    pub input: Option<FunctionParam>,
    pub result: String,
}

impl FunctionDecl {
    pub fn new(name: String, kind: ProcedureKind, metadata: &ProcedureMetadata) -> Self {
        Self {
            name,
            kind,
            key: metadata.key.clone(),
            input: metadata.input.clone().map(|ty| FunctionParam {
                ty,
                imported: metadata.input_is_custom,
            }),
            result: metadata.result.clone(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("/**\n");
        let _ = writeln!(out, " * {} RPC call to `{}`", self.kind, self.key);
        match &self.input {
            Some(param) => {
                let _ = writeln!(out, " * @param input {{{}}}", param.type_text());
            }
            None => out.push_str(" * Takes no input\n"),
        }
        if self.result == UNIT_RESULT {
            out.push_str(" * @returns {void}\n");
        } else {
            let _ = writeln!(out, " * @returns {{{}}}", self.result);
        }
        out.push_str(" */\n");

        match &self.input {
            Some(param) => {
                let _ = writeln!(
                    out,
                    "export function {}(input: {}) {{",
                    self.name,
                    param.type_text()
                );
                let _ = writeln!(
                    out,
                    "  return client.{}([\"{}\", input]);",
                    self.kind.method(),
                    self.key
                );
            }
            None => {
                let _ = writeln!(out, "export function {}() {{", self.name);
                let _ = writeln!(
                    out,
                    "  return client.{}([\"{}\"]);",
                    self.kind.method(),
                    self.key
                );
            }
        }
        out.push('}');

        out
    }
}

/// The whole generated file: header, imports, client declaration and one
/// function per procedure, in category order.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub imports: ImportBlock,
    pub client: ClientBlock,
    pub functions: Vec<FunctionDecl>,
}

impl GeneratedFile {
    pub fn render(&self) -> String {
        let mut blocks = vec![
            "/* Auto-generated file - do not edit */\n/* eslint-disable */".to_string(),
            self.imports.render(),
            self.client.render(),
        ];
        blocks.extend(self.functions.iter().map(FunctionDecl::render));

        let mut out = blocks.join("\n\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::procedure::ProcedureKind;

    fn config() -> ResolvedConfig {
        Config {
            input: Some("/bindings.d.ts".into()),
            output: Some("/out/rpc.ts".into()),
            ..Default::default()
        }
        .resolve(true)
        .unwrap()
    }

    fn config_prefix_all() -> ResolvedConfig {
        let mut config = Config {
            input: Some("/bindings.d.ts".into()),
            output: Some("/out/rpc.ts".into()),
            ..Default::default()
        };
        config.functions = Some(crate::config::FunctionConfig {
            prefix: None,
            prefix_duplicates_only: Some(false),
        });
        config.resolve(true).unwrap()
    }

    #[test]
    fn name_without_prefix_by_default() {
        let name = function_name("test.key", ProcedureKind::Query, &config(), &BTreeSet::new());
        assert_eq!(name, "testKey");
    }

    #[test]
    fn unrelated_duplicates_do_not_prefix() {
        let duplicates = BTreeSet::from(["test.k3y".to_string()]);
        let name = function_name("test.key", ProcedureKind::Query, &config(), &duplicates);
        assert_eq!(name, "testKey");
    }

    #[test]
    fn duplicate_keys_get_category_prefixes() {
        let duplicates = BTreeSet::from(["test.key".to_string()]);
        let query = function_name("test.key", ProcedureKind::Query, &config(), &duplicates);
        let mutation = function_name("test.key", ProcedureKind::Mutation, &config(), &duplicates);
        let subscription =
            function_name("test.key", ProcedureKind::Subscription, &config(), &duplicates);

        assert_eq!(query, "queryTestKey");
        assert_eq!(mutation, "mutateTestKey");
        assert_eq!(subscription, "subscribeToTestKey");

        // The whole point of prefixing: occurrences never collide.
        assert_ne!(query, mutation);
        assert_ne!(mutation, subscription);
    }

    #[test]
    fn prefix_everything_when_configured() {
        let name = function_name(
            "test.key",
            ProcedureKind::Query,
            &config_prefix_all(),
            &BTreeSet::new(),
        );
        assert_eq!(name, "queryTestKey");
    }

    #[test]
    fn prefixed_and_unprefixed_names_stay_distinct() {
        // A duplicate key must never synthesize the same identifier as a
        // non-duplicate key that happens to share segments.
        let duplicates = BTreeSet::from(["user.list".to_string()]);
        let prefixed = function_name("user.list", ProcedureKind::Query, &config(), &duplicates);
        let plain = function_name("user.list", ProcedureKind::Query, &config(), &BTreeSet::new());
        assert_ne!(prefixed, plain);
    }

    #[test]
    fn renders_function_without_input() {
        let decl = FunctionDecl {
            name: "userList".into(),
            kind: ProcedureKind::Query,
            key: "user.list".into(),
            input: None,
            result: "User[]".into(),
        };
        let rendered = decl.render();
        assert!(rendered.contains("* query RPC call to `user.list`"));
        assert!(rendered.contains("* Takes no input"));
        assert!(rendered.contains("* @returns {User[]}"));
        assert!(rendered.contains("export function userList() {"));
        assert!(rendered.contains("return client.query([\"user.list\"]);"));
    }

    #[test]
    fn renders_function_with_imported_input() {
        let decl = FunctionDecl {
            name: "userCreate".into(),
            kind: ProcedureKind::Mutation,
            key: "user.create".into(),
            input: Some(FunctionParam {
                ty: "UserArgs".into(),
                imported: true,
            }),
            result: "User".into(),
        };
        let rendered = decl.render();
        assert!(rendered.contains("* @param input {rpc.UserArgs}"));
        assert!(rendered.contains("export function userCreate(input: rpc.UserArgs) {"));
        assert!(rendered.contains("return client.mutation([\"user.create\", input]);"));
    }

    #[test]
    fn unit_result_documents_void() {
        let decl = FunctionDecl {
            name: "userDelete".into(),
            kind: ProcedureKind::Mutation,
            key: "user.delete".into(),
            input: Some(FunctionParam {
                ty: "string".into(),
                imported: false,
            }),
            result: "null[]".into(),
        };
        assert!(decl.render().contains("* @returns {void}"));
    }

    #[test]
    fn renders_client_block() {
        let block = ClientBlock::new(&config());
        let rendered = block.render();
        assert!(rendered.contains("const transport = new FetchTransport(\"http://localhost:4000/rspc\");"));
        assert!(rendered.contains("const clientConfig = { ...{}, transport };"));
        assert!(rendered.contains("export const client = createClient<rpc.Procedures>(clientConfig);"));
    }

    #[test]
    fn renders_import_block() {
        let block = ImportBlock {
            bindings_path: "/bindings.d.ts".into(),
        };
        let rendered = block.render();
        assert!(rendered.contains("import type * as rpc from '/bindings.d.ts';"));
        assert!(rendered.contains("import { createClient, FetchTransport, type Client } from \"@rspc/client\";"));
    }
}
