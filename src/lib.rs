pub mod app;
pub mod error;
pub mod game;
pub mod generators;
pub mod leaderboard;
pub mod maze;
