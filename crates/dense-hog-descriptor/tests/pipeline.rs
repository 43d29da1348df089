use approx::assert_relative_eq;
use dense_hog_core::{BinnedPixels, Histogram, HistogramSource, IntegralHistogram, Region};
use dense_hog_descriptor::{BlockNorm, HogExtractor, HogParams, L2_CLIP_MAX};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Returns the same histogram for every window.
struct ConstantSource(Vec<f64>);

impl HistogramSource for ConstantSource {
    fn bin_count(&self) -> usize {
        self.0.len()
    }

    fn compute_histogram(&self, _: Region) -> Histogram {
        Histogram::new(self.0.clone())
    }
}

/// Random pixel map where roughly a third of the pixels carry no weight.
fn random_pixels(rng: &mut StdRng, width: u32, height: u32, bins: usize) -> BinnedPixels {
    BinnedPixels::from_fn(width, height, bins, |_, _| {
        let bin = rng.random_range(0..bins as u32);
        let weight = if rng.random_bool(0.33) {
            0.0
        } else {
            rng.random_range(0.0f32..50.0)
        };
        (bin, weight)
    })
}

#[test]
fn constant_source_single_block() {
    let source = ConstantSource(vec![1.0; 4]);
    let extractor = HogExtractor::square(6, 3).unwrap();

    // 4x4 cells -> exactly one 3x3 block.
    let region = Region::new(0, 0, 24, 24);
    let cells = extractor.compute_cells(&source, region);
    assert_eq!((cells.rows(), cells.cols()), (4, 4));
    for cell in cells.iter() {
        assert_eq!(cell, &[0.5, 0.5, 0.5, 0.5]);
    }

    let d = extractor.extract(&source, region);
    assert_eq!((d.block_rows, d.block_cols), (1, 1));
    assert_eq!(d.block_len, 36);
    assert_eq!(d.len(), 4 * 36);

    let l2 = d.variant(0, 0, BlockNorm::L2).unwrap();
    assert!(l2.iter().all(|&v| v == 0.5 / 9.0));

    // Nothing exceeds the clip ceiling, so L2-clip is L2 / sqrt(Σ L2) = L2 / sqrt(2).
    let l2_clip = d.variant(0, 0, BlockNorm::L2Clip).unwrap();
    let clipped_sum: f64 = l2.iter().sum();
    assert_relative_eq!(clipped_sum, 2.0, epsilon = 1e-12);
    for &v in l2_clip {
        assert_relative_eq!(v, (0.5 / 9.0) / 2f64.sqrt(), epsilon = 1e-15);
    }

    let l1 = d.variant(0, 0, BlockNorm::L1).unwrap();
    for &v in l1 {
        assert_relative_eq!(v, 1.0 / 36.0, epsilon = 1e-15);
    }

    let l1_sqrt = d.variant(0, 0, BlockNorm::L1Sqrt).unwrap();
    for &v in l1_sqrt {
        assert_relative_eq!(v, 1.0 / 6.0, epsilon = 1e-15);
    }
}

#[test]
fn three_by_three_cells_are_too_few_for_a_three_by_three_block() {
    let source = ConstantSource(vec![1.0; 4]);
    let extractor = HogExtractor::square(6, 3).unwrap();
    let region = Region::new(0, 0, 18, 18);

    let cells = extractor.compute_cells(&source, region);
    assert_eq!((cells.rows(), cells.cols()), (3, 3));

    let d = extractor.extract(&source, region);
    assert!(d.is_empty());
    assert_eq!(d.num_blocks(), 0);
    assert_eq!((d.cell_rows, d.cell_cols), (3, 3));
    assert_eq!(extractor.descriptor_len(region, 4), 0);
}

#[test]
fn degenerate_regions_never_fail() {
    let source = ConstantSource(vec![2.0, 1.0]);
    let extractor = HogExtractor::new(HogParams::default()).unwrap();
    for region in [
        Region::new(0, 0, 0, 0),
        Region::new(5, 5, 2, 2),
        Region::new(-100, 40, 3, 300),
        Region::new(0, 0, 1000, 20),
    ] {
        let d = extractor.extract(&source, region);
        assert!(d.is_empty(), "{region:?}");
    }
}

#[test]
fn descriptor_length_formula() {
    let source = ConstantSource(vec![0.3, 0.0, 1.7]);
    let params = HogParams {
        cell_width: 5,
        cell_height: 4,
        cells_per_block_x: 2,
        cells_per_block_y: 3,
    };
    let extractor = HogExtractor::new(params).unwrap();
    let region = Region::new(7, 3, 53, 41);

    // (53 + 2) / 5 = 11 cells wide, (41 + 2) / 4 = 10 cells high.
    let d = extractor.extract(&source, region);
    assert_eq!((d.cell_rows, d.cell_cols), (10, 11));
    assert_eq!((d.block_rows, d.block_cols), (7, 9));
    assert_eq!(d.len(), 4 * 9 * 7 * (2 * 3 * 3));
}

#[test]
fn all_zero_source_gives_all_zero_descriptor() {
    let source = ConstantSource(vec![0.0; 9]);
    let extractor = HogExtractor::new(HogParams::default()).unwrap();
    let d = extractor.extract(&source, Region::full(48, 36));
    assert!(!d.is_empty());
    assert!(d.values().iter().all(|&v| v == 0.0));
}

#[test]
fn random_inputs_never_produce_non_finite_values() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for round in 0..12 {
        let bins = rng.random_range(1..=12usize);
        let width = rng.random_range(8..88u32);
        let height = rng.random_range(8..88u32);
        let pixels = random_pixels(&mut rng, width, height, bins);
        let source = IntegralHistogram::new(&pixels).unwrap();

        let params = HogParams {
            cell_width: rng.random_range(1..=8),
            cell_height: rng.random_range(1..=8),
            cells_per_block_x: rng.random_range(1..=3),
            cells_per_block_y: rng.random_range(1..=3),
        };
        let extractor = HogExtractor::new(params).unwrap();
        let region = Region::new(
            rng.random_range(-4..4),
            rng.random_range(-4..4),
            width,
            height,
        );
        let d = extractor.extract(&source, region);
        assert_eq!(d.len(), extractor.descriptor_len(region, bins));
        assert!(d.is_finite(), "round {round}: {params:?} {region:?}");
        assert!(d.values().iter().all(|&v| v >= 0.0));
    }
}

#[test]
fn l2_clip_reconstructs_capped_components() {
    let mut rng = StdRng::seed_from_u64(42);
    let pixels = random_pixels(&mut rng, 40, 40, 6);
    let source = IntegralHistogram::new(&pixels).unwrap();
    let extractor = HogExtractor::square(5, 2).unwrap();
    let d = extractor.extract(&source, Region::full(40, 40));

    for row in 0..d.block_rows {
        for col in 0..d.block_cols {
            let l2 = d.variant(row, col, BlockNorm::L2).unwrap();
            let l2_clip = d.variant(row, col, BlockNorm::L2Clip).unwrap();
            let clipped: Vec<f64> = l2.iter().map(|&v| v.min(L2_CLIP_MAX)).collect();
            let sum: f64 = clipped.iter().sum();
            assert!(clipped.iter().all(|&v| v <= L2_CLIP_MAX));
            if sum == 0.0 {
                assert!(l2_clip.iter().all(|&v| v == 0.0));
                continue;
            }
            for (&out, &c) in l2_clip.iter().zip(&clipped) {
                assert_relative_eq!(out * sum.sqrt(), c, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn l1_variants_are_idempotent_and_sum_to_one() {
    let mut rng = StdRng::seed_from_u64(7);
    let pixels = random_pixels(&mut rng, 30, 30, 4);
    let source = IntegralHistogram::new(&pixels).unwrap();
    let extractor = HogExtractor::square(5, 2).unwrap();
    let d = extractor.extract(&source, Region::full(30, 30));

    for row in 0..d.block_rows {
        for col in 0..d.block_cols {
            let l1 = Histogram::new(d.variant(row, col, BlockNorm::L1).unwrap().to_vec());
            let again = l1.normalized_l1();
            for (a, b) in l1.values().iter().zip(again.values()) {
                assert_relative_eq!(*a, *b, epsilon = 1e-12);
            }
            let total = l1.l1_norm();
            assert!(total == 0.0 || (total - 1.0).abs() < 1e-12);
        }
    }
}

#[test]
fn integral_source_matches_manual_cell_sums() {
    let pixels = BinnedPixels::from_fn(12, 12, 2, |x, y| (((x / 6) + (y / 6)) % 2, 1.0));
    let source = IntegralHistogram::new(&pixels).unwrap();
    let extractor = HogExtractor::square(6, 1).unwrap();
    let cells = extractor.compute_cells(&source, Region::full(12, 12));

    // Checkerboard of single-bin cells: each cell is a unit vector on its bin.
    assert_eq!(cells.at(0, 0), &[1.0, 0.0]);
    assert_eq!(cells.at(0, 1), &[0.0, 1.0]);
    assert_eq!(cells.at(1, 0), &[0.0, 1.0]);
    assert_eq!(cells.at(1, 1), &[1.0, 0.0]);

    let d = extractor.extract(&source, Region::full(12, 12));
    assert_eq!((d.block_rows, d.block_cols), (1, 1));
    assert_eq!(d.variant(0, 0, BlockNorm::L1).unwrap(), &[1.0, 0.0]);
}
