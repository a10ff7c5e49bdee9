use thiserror::Error;

pub type CommonResult<T> = Result<T, CommonError>;

/// Errors shared by the storage-facing parts of the workspace
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    NotFound(String),
}
