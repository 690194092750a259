//! Demonstration driver: builds a factorial block, simulates responses in
//! place of a presentation loop, and logs every completed trial.

use anyhow::Result;
use rand::Rng;
use trialkit_design::{build_sequence, Design};
use trialkit_log::{LogConfig, TrialLogger};
use trialkit_timing::Benchmark;

const SAVE_FOLDER: &str = "data";
const SUBJECT: &str = "demo";
const REPETITIONS: usize = 2;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let design = Design::new()
        .factor("opacity", [0.2, 1.0])
        .factor("image", ["cat.jpg", "lion.jpg", "fish.gif"])
        .constant("subject", SUBJECT)
        .response_field("answer")
        .response_field("rt")
        .response_field("score");

    let mut rng = rand::rng();
    let mut sequence = build_sequence(&design, REPETITIONS, &mut rng)?;
    let mut logger = TrialLogger::create(SAVE_FOLDER, SUBJECT, LogConfig::default())?;

    for trial in sequence.iter_mut() {
        // A real driver would present stimuli and collect the keypress
        // here; we simulate the outcome instead.
        let answer = if rng.random_bool(0.5) { "left" } else { "right" };
        trial.set("answer", answer)?;
        trial.set("rt", rng.random_range(0.2..0.9))?;
        trial.set("score", rng.random_range(0..=1i64))?;
        logger.write(trial)?;
    }

    println!(
        "wrote {} trials to {}",
        sequence.len(),
        logger.path().display()
    );

    // How long does a single durable write take on this machine?
    let mut bench_logger = TrialLogger::create(SAVE_FOLDER, "bench", LogConfig::default())?;
    let sample = sequence
        .get(0)
        .cloned()
        .expect("sequence is non-empty for a non-trivial design");
    let report = Benchmark::new().runs(100).run(|| {
        bench_logger
            .write(&sample)
            .expect("benchmark log write failed");
    });
    println!("one trial write: {report}");

    Ok(())
}
