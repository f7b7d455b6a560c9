//! End-to-end pipeline tests: dataset -> corruption -> completion -> render

use lrmc::prelude::*;
use pretty_assertions::assert_eq;
use rand::{rngs::StdRng, SeedableRng};

/// Synthetic rank-2 "face" stack: each image is a fixed blend of two
/// pixel patterns, so the row-stacked data matrix has rank 2 and
/// intensities stay in the 0-255 range.
fn synthetic_dataset(images: usize, width: usize, height: usize) -> ImageDataset<f64> {
    let pixels = width * height;
    let pattern_a: Vec<f64> = (0..pixels).map(|p| (p % width) as f64 / width as f64).collect();
    let pattern_b: Vec<f64> = (0..pixels).map(|p| (p / width) as f64 / height as f64).collect();

    let stack: Vec<GrayImage> = (0..images)
        .map(|i| {
            let a = 80.0 + 10.0 * i as f64;
            let b = 120.0 - 8.0 * i as f64;
            let samples = pattern_a
                .iter()
                .zip(pattern_b.iter())
                .map(|(pa, pb)| a * pa + b * pb)
                .collect();
            GrayImage::new(width, height, samples).unwrap()
        })
        .collect();

    ImageDataset::from_images(&stack).unwrap()
}

#[test]
fn test_image_stack_recovery_pipeline() -> Result<(), Box<dyn std::error::Error>> {
    let dataset = synthetic_dataset(6, 8, 5);
    let x = dataset.matrix().clone();

    let mut rng = StdRng::seed_from_u64(23);
    let (corrupted, mask) = corrupt(&x, 0.3, &mut rng)?;

    let solver = Svt::new(
        SvtConfig::new()
            .with_tau(5.0)
            .with_step_size(mask.recommended_step_size()),
    )?;
    let criterion = StoppingCriterion::new().with_max_iterations(10_000);
    let completion = solver.complete(&corrupted, &mask, &criterion)?;
    assert!(completion.converged);

    let total_error: f64 = completion
        .matrix
        .iter()
        .zip(x.iter())
        .map(|(a, b)| (a - b).abs())
        .sum();
    let mean_error = total_error / (x.nrows() * x.ncols()) as f64;
    assert!(
        mean_error < 20.0,
        "mean intensity error {} too large for a rank-2 stack",
        mean_error
    );

    // Round-trip the estimate through the imaging layer.
    let completed = dataset.with_matrix(completion.matrix)?;
    let strip = comparison_strip(
        &dataset.row_image(2)?,
        &dataset.with_matrix(corrupted)?.row_image(2)?,
        &completed.row_image(2)?,
        false,
    )?;
    assert_eq!(strip.width(), 3 * dataset.width());
    assert_eq!(strip.height(), dataset.height());

    Ok(())
}

#[test]
fn test_fractional_mask_is_rejected_before_any_computation() {
    let mut weights = DMatrix::from_element(2, 2, 1.0);
    weights[(0, 0)] = 0.25;
    assert!(matches!(
        ObservationMask::new(weights),
        Err(CompletionError::InvalidMask { .. })
    ));
}
