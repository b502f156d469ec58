use std::time::{Duration, Instant};

use mazerun::generators::{GeneratorKind, generate, get_rng};
use tracing_subscriber::EnvFilter;

/// Usage: profile [generator] [iterations] [size]
///
/// Generates `iterations` square mazes back to back and logs how long they took.
fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let generators = match args.next() {
        Some(name) => vec![name.parse::<GeneratorKind>().map_err(std::io::Error::other)?],
        None => GeneratorKind::ALL.to_vec(),
    };
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(100);
    let size = args
        .next()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(255);

    let mut rng = get_rng(Some(0));
    for generator in generators {
        let mut total = Duration::ZERO;
        let mut slowest = Duration::ZERO;
        for _ in 0..num_iters {
            let started = Instant::now();
            generate(generator, size, size, &mut rng).map_err(std::io::Error::other)?;
            let took = started.elapsed();
            total += took;
            slowest = slowest.max(took);
        }
        tracing::info!(
            "[profile] {}: {} mazes of {}x{} in {:?} (mean {:?}, slowest {:?})",
            generator,
            num_iters,
            size,
            size,
            total,
            total / u32::try_from(num_iters.max(1)).unwrap_or(u32::MAX),
            slowest
        );
    }
    Ok(())
}
