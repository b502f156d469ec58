use thiserror::Error;

/// Rejected maze dimensions. Raised before any generation work starts, so a failed call never
/// yields a partially carved grid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("maze size {width}x{height} is below the minimum of {min}x{min}")]
    TooSmall { width: u16, height: u16, min: u16 },
    #[error(
        "maze size {width}x{height} cannot hold a room: rooms need at least 6x6 and an area of 80 cells"
    )]
    TooSmallForRooms { width: u16, height: u16 },
}

/// A grid lookup outside of the grid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("position ({x}, {y}) is outside the {width}x{height} grid")]
pub struct BoundsError {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Reasons a player name is refused by the leaderboard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("name cannot be empty")]
    Empty,
    #[error("name must be at least {min} characters long")]
    TooShort { min: usize },
    #[error("name must be at most {max} characters long")]
    TooLong { max: usize },
    #[error("name must contain at least one letter or digit")]
    NoAlphanumeric,
}

/// Unknown name for one of the enumerated settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseKindError {
    #[error("unknown generator '{0}' (expected one of: uniform, backtrack, rooms, prim)")]
    Generator(String),
    #[error(
        "unknown theme '{0}' (expected one of: adventure, mysterious, retro-arcade, epic-quest, chill, speed-run, boss-battle)"
    )]
    Theme(String),
}
