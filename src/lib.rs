//! Generate typed TypeScript client wrappers from rspc `Procedures` bindings.
//!
//! rspc exports a bindings file describing every procedure a router exposes.
//! This crate reads that file, walks the `Procedures` type's three
//! categories (queries, mutations, subscriptions) and writes one TypeScript
//! module containing a configured `@rspc/client` instance plus a documented
//! wrapper function per procedure:
//!
//! ```ts
//! /**
//!  * query RPC call to `user.list`
//!  * Takes no input
//!  * @returns {User[]}
//!  */
//! export function userList() {
//!   return client.query(["user.list"]);
//! }
//! ```
//!
//! Generation is one-shot and deterministic: the same bindings file always
//! produces byte-identical output, so the tool can be re-invoked on every
//! change notification by whatever build orchestrator drives it.

pub mod ast;
mod config;
mod error;
mod generate;
mod lexer;
pub mod parser;
pub mod procedure;
pub mod typesystem;
mod util;

use std::fs;
use std::path::Path;

pub use config::{ClientConfig, Config, FunctionConfig, ResolvedConfig};
pub use error::{Error, Result};
pub use generate::{
    function_name, ClientBlock, FunctionDecl, FunctionParam, GeneratedFile, ImportBlock,
};
pub use procedure::{ProcedureKind, ProcedureMetadata};

use procedure::{extract_procedures, find_duplicate_keys, find_procedures_alias};
use typesystem::TypeSystem;

/// Runs the whole pipeline and returns the generated source text.
pub fn generate_to_string(config: &ResolvedConfig) -> Result<String> {
    let source = fs::read_to_string(&config.input).map_err(|source| Error::ReadInput {
        path: config.input.clone().into(),
        source,
    })?;

    let file = parser::parse(&source)?;
    let ts = TypeSystem::new(&file);

    // A file without a `Procedures` declaration is an empty procedure set;
    // the client scaffolding is still emitted.
    let mut per_kind: Vec<(ProcedureKind, Vec<ProcedureMetadata>)> = Vec::new();
    if let Some(alias) = find_procedures_alias(&file) {
        for kind in ProcedureKind::ALL {
            per_kind.push((kind, extract_procedures(&ts, alias, kind)?));
        }
    }

    let duplicates = find_duplicate_keys(
        per_kind
            .iter()
            .flat_map(|(_, procedures)| procedures.iter().map(|p| p.key.as_str())),
    );

    let functions = per_kind
        .iter()
        .flat_map(|(kind, procedures)| {
            procedures.iter().map(|metadata| {
                let name = function_name(&metadata.key, *kind, config, &duplicates);
                FunctionDecl::new(name, *kind, metadata)
            })
        })
        .collect();

    let generated = GeneratedFile {
        imports: ImportBlock {
            bindings_path: config.input.clone(),
        },
        client: ClientBlock::new(config),
        functions,
    };

    Ok(generated.render())
}

/// Generates the client and writes it to the configured output path,
/// creating parent directories as needed.
pub fn generate(config: &ResolvedConfig) -> Result<()> {
    let content = generate_to_string(config)?;

    let output = Path::new(&config.output);
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent).map_err(|source| Error::WriteOutput {
            path: output.to_path_buf(),
            source,
        })?;
    }
    fs::write(output, &content).map_err(|source| Error::WriteOutput {
        path: output.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %config.output, "wrote generated rspc client");
    Ok(())
}
