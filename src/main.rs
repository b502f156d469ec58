use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Parser;
use mazerun::{
    app::App,
    game::{GameSettings, ThemeKind, format_elapsed},
    generators::GeneratorKind,
    leaderboard::{Leaderboard, validate_player_name},
};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::EnvFilter;

/// Find your way from S to F.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Maze width in cells (at least 5)
    #[arg(long, default_value_t = 20)]
    width: u16,
    /// Maze height in cells (at least 5)
    #[arg(long, default_value_t = 15)]
    height: u16,
    /// One of: uniform, backtrack, rooms, prim
    #[arg(short, long, default_value = "prim")]
    generator: GeneratorKind,
    /// One of: adventure, mysterious, retro-arcade, epic-quest, chill, speed-run, boss-battle
    #[arg(short, long, default_value = "epic-quest")]
    theme: ThemeKind,
    /// Seed for reproducible mazes
    #[arg(long)]
    seed: Option<u64>,
    /// Name recorded on the leaderboard
    #[arg(short, long, default_value = "player")]
    name: String,
    /// Directory for the log file. Defaults to a `mazerun` directory under the system temp dir
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn settings(&self) -> GameSettings {
        GameSettings {
            width: self.width,
            height: self.height,
            generator: self.generator,
            theme: self.theme,
            seed: self.seed,
        }
    }
}

/// Log to a file: the terminal belongs to the game while it runs.
fn init_logging(log_dir: &Path) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = rolling::RollingFileAppender::builder()
        .rotation(rolling::Rotation::NEVER)
        .filename_prefix("mazerun")
        .filename_suffix("log")
        .build(log_dir)
        .map_err(std::io::Error::other)?;
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    Ok(guard)
}

fn print_leaderboard(leaderboard: &Leaderboard) {
    if leaderboard.is_empty() {
        return;
    }
    println!("Best runs this session:");
    for (rank, entry) in leaderboard.top(5).iter().enumerate() {
        println!(
            "{:>2}. {:<20} {:>6} {:>5} moves",
            rank + 1,
            entry.player_name,
            format_elapsed(Duration::from_millis(entry.time_ms)),
            entry.moves
        );
    }
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    let player_name = validate_player_name(&cli.name).map_err(std::io::Error::other)?;
    let log_dir = cli
        .log_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("mazerun"));
    // Flushes the log file when dropped
    let _guard = init_logging(&log_dir)?;

    let mut app = App::new(cli.settings(), player_name);
    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let run_result = app.run();
    App::restore_terminal(&mut stdout)?;
    if let Err(e) = &run_result {
        tracing::error!("[app] {}", e);
    }
    run_result?;

    print_leaderboard(app.leaderboard());
    Ok(())
}
