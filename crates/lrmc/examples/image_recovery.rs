//! Recover randomly corrupted image data with the SVT solver.
//!
//! Without arguments this runs a synthetic rank-2 problem. Given a
//! directory of same-sized binary PGM images, it stacks them into a
//! data matrix, drops 40% of the entries, completes the matrix and
//! writes a side-by-side comparison strip next to the current
//! directory:
//!
//! ```text
//! cargo run --example image_recovery -- path/to/pgm-dir
//! ```
//!
//! Solver progress is logged through `env_logger`; set
//! `RUST_LOG=debug` to watch the per-iteration change.

use std::error::Error;

use lrmc::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    match std::env::args().nth(1) {
        Some(dir) => recover_dataset(&dir),
        None => recover_synthetic(),
    }
}

fn recover_synthetic() -> Result<(), Box<dyn Error>> {
    println!("=== Synthetic rank-2 recovery ===");

    let mut rng = StdRng::seed_from_u64(2024);
    let (rows, cols) = (40, 60);
    let mut x = DMatrix::zeros(rows, cols);
    for _ in 0..2 {
        let u = DVector::from_fn(rows, |_, _| rng.gen_range(0.5..1.5));
        let v = DVector::from_fn(cols, |_, _| rng.gen_range(0.5..1.5));
        x += &u * v.transpose();
    }

    let (corrupted, mask) = corrupt(&x, 0.4, &mut rng)?;
    println!(
        "observing {} of {} entries ({:.0}%)",
        mask.observed_count(),
        rows * cols,
        100.0 * mask.density()
    );

    let solver = Svt::new(
        SvtConfig::new()
            .with_tau(1.0)
            .with_step_size(mask.recommended_step_size()),
    )?;
    let criterion = StoppingCriterion::new()
        .with_entry_tolerance(1e-4)
        .with_max_iterations(20_000);

    let completion = solver.complete(&corrupted, &mask, &criterion)?;

    let mean_error: f64 = completion
        .matrix
        .iter()
        .zip(x.iter())
        .map(|(a, b): (&f64, &f64)| (a - b).abs())
        .sum::<f64>()
        / (rows * cols) as f64;

    println!(
        "{} iterations in {:.1?}, mean absolute error {:.4}",
        completion.iterations, completion.duration, mean_error
    );
    Ok(())
}

fn recover_dataset(dir: &str) -> Result<(), Box<dyn Error>> {
    println!("=== PGM dataset recovery: {} ===", dir);

    let dataset = ImageDataset::<f64>::load_dir(dir)?;
    let x = dataset.matrix().clone();
    let entries = x.nrows() * x.ncols();
    println!(
        "{} images of {}x{} pixels ({} entries)",
        dataset.image_count(),
        dataset.width(),
        dataset.height(),
        entries
    );

    let mut rng = StdRng::seed_from_u64(9);
    let (corrupted, mask) = corrupt(&x, 0.4, &mut rng)?;

    // The threshold grows with the matrix; this keeps the shrinkage
    // meaningful across dataset sizes.
    let tau = 5.0 * (entries as f64).sqrt();
    let solver = Svt::new(
        SvtConfig::new()
            .with_tau(tau)
            .with_step_size(mask.recommended_step_size()),
    )?;
    let criterion = StoppingCriterion::new().with_max_iterations(10_000);

    let completion = solver.complete(&corrupted, &mask, &criterion)?;
    println!(
        "completed in {} iterations ({:.1?})",
        completion.iterations, completion.duration
    );

    let corrupted_set = dataset.with_matrix(corrupted)?;
    let completed_set = dataset.with_matrix(completion.matrix)?;
    let strip = comparison_strip(
        &dataset.row_image(0)?,
        &corrupted_set.row_image(0)?,
        &completed_set.row_image(0)?,
        false,
    )?;

    let out = "reconstruction.pgm";
    write_pgm(out, &strip)?;
    println!("wrote {}", out);
    Ok(())
}
