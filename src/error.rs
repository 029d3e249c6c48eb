use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("missing input path, this needs to be the bindings file generated by rspc")]
    MissingInput,
    #[error("missing output path, this is where the generated client will be written to")]
    MissingOutput,
    #[error("failed to read bindings file {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write generated client to {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("procedure `{key}` is missing a result type")]
    MissingResult { key: String },
    #[error("failed to read configuration file {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse configuration file {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
}
