use thiserror::Error;

use crate::backend::ShaderStage;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{stage} shader compilation failed: {log}")]
    Compilation { stage: ShaderStage, log: String },

    #[error("program linking failed: {0}")]
    Link(String),

    #[error("uniform not found: {0}")]
    MissingUniform(String),

    #[error("shader program used after destroy")]
    Destroyed,

    #[error("backend object allocation failed: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShaderError>;
