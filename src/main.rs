use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rspc_client_gen::{generate, ClientConfig, Config, Error};

/// Generate typed TypeScript client wrappers from rspc `Procedures` bindings.
#[derive(Parser)]
#[command(name = "rspc-client-gen", version)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bindings file generated by rspc
    #[arg(short, long)]
    input: Option<String>,

    /// Where the generated client is written to
    #[arg(short, long)]
    output: Option<String>,

    /// Transport URL for the generated client (absolute, or origin-relative
    /// like `/rspc`)
    #[arg(long)]
    transport: Option<String>,

    /// Generate for a production build (changes the default transport URL)
    #[arg(long)]
    release: bool,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(err) = run(cli) {
        tracing::error!("{err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> rspc_client_gen::Result<()> {
    let mut config = match &cli.config {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str::<Config>(&content).map_err(|source| Error::Config {
                path: path.clone(),
                source,
            })?
        }
        None => Config::default(),
    };

    // Flags override config-file values.
    if cli.input.is_some() {
        config.input = cli.input;
    }
    if cli.output.is_some() {
        config.output = cli.output;
    }
    if let Some(transport) = cli.transport {
        config.client.get_or_insert_with(ClientConfig::default).transport = Some(transport);
    }

    let resolved = config.resolve(!cli.release)?;
    generate(&resolved)
}
