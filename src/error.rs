use thiserror::Error;

use crate::app::AppError;
use crate::storage::StorageError;

pub type ServiceResult<T> = core::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    App(#[from] AppError),
    #[error("{0}")]
    Storage(#[from] StorageError),
    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("{0}")]
    Lookup(String),
}
