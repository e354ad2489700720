use thiserror::Error;

use creepfield_core::error::SimError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad input script: {0}")]
    Script(#[from] serde_json::Error),
}
