use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::catalog::SchemaError;

pub type AppResult<T, E = AppError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("Unsupported diagram format: {0:?}")]
    UnsupportedFormat(String),

    #[error("Graphviz executable {binary:?} could not be started: {source}")]
    GraphvizMissing {
        binary: PathBuf,
        source: std::io::Error,
    },

    #[error("Graphviz exited with {status}: {stderr}")]
    Graphviz { status: ExitStatus, stderr: String },

    #[error("Diagram {0:?} was rendered empty")]
    EmptyOutput(PathBuf),

    #[error("JSON error: {0:?}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0:?}")]
    Io(#[from] std::io::Error),
}
