//! Generator configuration and defaulting.
//!
//! [`Config`] mirrors the user-facing options (deserializable from a JSON
//! file, all optional so CLI flags can be merged on top); [`ResolvedConfig`]
//! is the fully-defaulted, validated form the generator runs with.

use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::procedure::ProcedureKind;

pub const DEV_TRANSPORT: &str = "http://localhost:4000/rspc";
pub const PROD_TRANSPORT: &str = "/rspc";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// The bindings file generated by rspc.
    #[serde(default)]
    pub input: Option<String>,
    /// Where the generated client code will be written to.
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub client: Option<ClientConfig>,
    #[serde(default, rename = "func")]
    pub functions: Option<FunctionConfig>,
}

/// Client options. Only `transport` has a default; every other key is
/// carried verbatim into the generated `clientConfig` object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub transport: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionConfig {
    /// Per-category function name prefixes. Supplying this replaces the
    /// default map wholesale; categories left out prefix as "".
    #[serde(default)]
    pub prefix: Option<BTreeMap<ProcedureKind, String>>,
    /// Apply prefixes only to keys that collide across categories.
    #[serde(default)]
    pub prefix_duplicates_only: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Normalized input path. Doubles as the import specifier in the
    /// generated file.
    pub input: String,
    /// Normalized output path.
    pub output: String,
    /// Transport constructor argument, already rendered as a TypeScript
    /// expression (quoted URL or an origin-relative template literal).
    pub transport: String,
    /// Client options other than `transport`, emitted into `clientConfig`.
    pub client_extra: serde_json::Map<String, serde_json::Value>,
    pub prefix: BTreeMap<ProcedureKind, String>,
    pub prefix_duplicates_only: bool,
}

impl Config {
    /// Validates and defaults the configuration. `dev` selects the default
    /// transport URL when none is configured, standing in for the bundler's
    /// mode detection.
    pub fn resolve(self, dev: bool) -> Result<ResolvedConfig> {
        let input = self.input.filter(|path| !path.is_empty()).ok_or(Error::MissingInput)?;
        let output = self
            .output
            .filter(|path| !path.is_empty())
            .ok_or(Error::MissingOutput)?;

        let client = self.client.unwrap_or_default();
        let transport_url = client
            .transport
            .unwrap_or_else(|| default_transport(dev).to_string());
        let transport = transport_expression(&transport_url);

        let functions = self.functions.unwrap_or_default();
        let prefix = functions.prefix.unwrap_or_else(default_prefixes);
        let prefix_duplicates_only = functions.prefix_duplicates_only.unwrap_or(true);

        Ok(ResolvedConfig {
            input: normalize_path(&input),
            output: normalize_path(&output),
            transport,
            client_extra: client.extra,
            prefix,
            prefix_duplicates_only,
        })
    }
}

impl ResolvedConfig {
    pub fn prefix_for(&self, kind: ProcedureKind) -> &str {
        self.prefix.get(&kind).map(String::as_str).unwrap_or("")
    }
}

pub fn default_prefixes() -> BTreeMap<ProcedureKind, String> {
    ProcedureKind::ALL
        .into_iter()
        .map(|kind| (kind, kind.default_prefix().to_string()))
        .collect()
}

fn default_transport(dev: bool) -> &'static str {
    if dev {
        DEV_TRANSPORT
    } else {
        PROD_TRANSPORT
    }
}

/// Renders the `FetchTransport` argument. An origin-relative URL becomes a
/// template literal against `window.location.origin`; anything else is
/// emitted as a plain string literal.
fn transport_expression(url: &str) -> String {
    if url.starts_with('/') {
        format!("`${{window.location.origin}}{url}`")
    } else {
        format!("\"{url}\"")
    }
}

/// `./`-relative paths are expanded against the current directory with
/// forward slashes, so the emitted import specifier is stable regardless of
/// where the build tool was started from.
fn normalize_path(path: &str) -> String {
    match path.strip_prefix("./") {
        Some(rest) => {
            let cwd = env::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf());
            format!("{}/{rest}", cwd.display()).replace('\\', "/")
        }
        None => path.replace('\\', "/"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            input: Some("/bindings.d.ts".into()),
            output: Some("/out/rpc.ts".into()),
            ..Default::default()
        }
    }

    #[test]
    fn missing_paths_are_hard_errors() {
        let err = Config::default().resolve(true).unwrap_err();
        assert!(matches!(err, Error::MissingInput));

        let err = Config {
            input: Some("/bindings.d.ts".into()),
            ..Default::default()
        }
        .resolve(true)
        .unwrap_err();
        assert!(matches!(err, Error::MissingOutput));

        let err = Config {
            input: Some(String::new()),
            output: Some("/out.ts".into()),
            ..Default::default()
        }
        .resolve(true)
        .unwrap_err();
        assert!(matches!(err, Error::MissingInput));
    }

    #[test]
    fn default_transport_follows_mode() {
        let dev = base().resolve(true).unwrap();
        assert_eq!(dev.transport, "\"http://localhost:4000/rspc\"");

        let prod = base().resolve(false).unwrap();
        assert_eq!(prod.transport, "`${window.location.origin}/rspc`");
    }

    #[test]
    fn relative_transport_targets_the_origin() {
        let mut config = base();
        config.client = Some(ClientConfig {
            transport: Some("/api/rspc".into()),
            ..Default::default()
        });
        let resolved = config.resolve(true).unwrap();
        assert_eq!(resolved.transport, "`${window.location.origin}/api/rspc`");
    }

    #[test]
    fn absolute_transport_renders_quoted() {
        let mut config = base();
        config.client = Some(ClientConfig {
            transport: Some("https://api.example.com/rspc".into()),
            ..Default::default()
        });
        let resolved = config.resolve(false).unwrap();
        assert_eq!(resolved.transport, "\"https://api.example.com/rspc\"");
    }

    #[test]
    fn default_prefixes_apply() {
        let resolved = base().resolve(true).unwrap();
        assert_eq!(resolved.prefix_for(ProcedureKind::Query), "query");
        assert_eq!(resolved.prefix_for(ProcedureKind::Mutation), "mutate");
        assert_eq!(resolved.prefix_for(ProcedureKind::Subscription), "subscribeTo");
        assert!(resolved.prefix_duplicates_only);
    }

    #[test]
    fn user_prefix_map_replaces_defaults_wholesale() {
        let mut config = base();
        config.functions = Some(FunctionConfig {
            prefix: Some(BTreeMap::from([(ProcedureKind::Query, "get".to_string())])),
            prefix_duplicates_only: None,
        });
        let resolved = config.resolve(true).unwrap();
        assert_eq!(resolved.prefix_for(ProcedureKind::Query), "get");
        // Categories missing from a user-supplied map do not fall back.
        assert_eq!(resolved.prefix_for(ProcedureKind::Mutation), "");
    }

    #[test]
    fn deserializes_from_json() {
        let config: Config = serde_json::from_str(
            r#"{
                "input": "./bindings.d.ts",
                "output": "./src/rpc.ts",
                "client": { "transport": "/rspc", "onError": null },
                "func": { "prefixDuplicatesOnly": false }
            }"#,
        )
        .unwrap();
        let resolved = config.resolve(true).unwrap();
        assert!(!resolved.prefix_duplicates_only);
        assert!(resolved.client_extra.contains_key("onError"));
    }
}
