use std::path::PathBuf;

/// Reasons a tile arrangement is rejected before it reaches the solver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// Board sizes below 2 have no moves at all.
    #[error("Board size must be at least 2, got {0}")]
    SizeTooSmall(usize),

    /// Labels are stored as `u8`, which caps the width.
    #[error("Board size {size} exceeds the maximum of {max}")]
    SizeTooLarge { size: usize, max: usize },

    /// Tile count does not match `size * size`.
    #[error("Expected {expected} tiles for this board size, found {found}")]
    WrongLength { expected: usize, found: usize },

    /// Parsed tile count is not a perfect square.
    #[error("{0} tiles cannot form a square board")]
    NotSquare(usize),

    /// Exactly one blank is required.
    #[error("Expected exactly one blank, found {0}")]
    BlankCount(usize),

    #[error("Tile {0} appears more than once")]
    DuplicateTile(u8),

    #[error("Tile {tile} is outside the range 1..={max}")]
    TileOutOfRange { tile: u8, max: usize },

    #[error("Unrecognized tile '{0}'")]
    InvalidToken(String),
}

/// Errors raised while loading a solver configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
