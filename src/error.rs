use thiserror::Error;

use crate::layout::ParseLayoutError;
use crate::location::LocationError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Layout(#[from] ParseLayoutError),

    #[error(transparent)]
    Location(#[from] LocationError),
}
