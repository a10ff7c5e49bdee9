use thiserror::Error;

pub type BlockResult<T> = Result<T, BlockError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlockError {
    #[error("Unknown block type: {0}")]
    UnknownType(String),

    #[error("Unknown layout preset: {0}")]
    UnknownPreset(String),

    #[error("Invalid data for {block_type} block: {message}")]
    InvalidData { block_type: String, message: String },
}

impl BlockError {
    pub fn invalid_data(block_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidData {
            block_type: block_type.into(),
            message: message.into(),
        }
    }
}
