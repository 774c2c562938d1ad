//! Simulate a random walk, track it with the Kalman filter and dump both to CSV.
//!
//! ```text
//! cargo run -p rust_tracking_sim --example random_walk -- [seed] [steps]
//! ```
//!
//! Writes `out-walk.csv` (ground truth) and `filtered-out-walk.csv`
//! (truth, measurement and estimate per step) to the working directory.

use std::fs::File;
use std::io::BufWriter;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_tracking_sim::logging::init_logging;
use rust_tracking_sim::prelude::*;
use rust_tracking_sim::simulator::common::write_walk_csv;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging("info");

    let mut args = std::env::args().skip(1);
    let seed = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(0);
    let steps = args.next().map(|s| s.parse::<usize>()).transpose()?.unwrap_or(3000);

    let config = TrackingConfig {
        trajectory: TrajectoryConfig {
            steps,
            ..Default::default()
        },
        seed,
        ..Default::default()
    };

    // Same walk the run will track, written separately for plotting
    let walk = Trajectory::new(config.trajectory, StdRng::seed_from_u64(seed))?;
    write_walk_csv(BufWriter::new(File::create("out-walk.csv")?), walk.positions())?;

    let run = TrackingRun::new(config)?;
    let mut noise_rng = StdRng::seed_from_u64(seed.wrapping_add(1));
    let outcome = run.run_with(walk.rng().clone(), &mut noise_rng)?;
    outcome
        .recorder
        .write_csv(BufWriter::new(File::create("filtered-out-walk.csv")?))?;

    // Steps that set a new running maximum distance
    let fastest = step_intensities(walk.positions())
        .filter(|v| *v >= 1.0)
        .count();

    println!(
        "{} steps, estimate RMSE {:.3}, measurement RMSE {:.3}, {} new fastest steps",
        outcome.recorder.len(),
        outcome.errors.est_rmse().unwrap_or(f64::NAN),
        outcome.errors.measurement_rmse().unwrap_or(f64::NAN),
        fastest,
    );
    Ok(())
}
