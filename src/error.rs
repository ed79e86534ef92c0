use thiserror::Error;

/// Errors that end a game session or a catalog/guess-log operation
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Catalog exhausted: deck needs {needed} tiles but the catalog ran out with {placed} placed")]
    CatalogExhausted { needed: usize, placed: usize },

    #[error("Catalog has no songs with a usable release year")]
    EmptyCatalog,

    #[error("Input closed before the round was finished")]
    InputClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
