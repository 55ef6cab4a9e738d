//! Behavioural properties of the ISR computation.

use isrmap::{compute_isr, Grid, IsrError, Modality, Orientation, OrientationGrid, Symmetry};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn rot_z(deg: f64, symmetry: Symmetry) -> Option<Orientation> {
    Some(Orientation::from_bunge_euler(deg.to_radians(), 0.0, 0.0, symmetry).unwrap())
}

fn random_grid(rng: &mut StdRng, rows: usize, cols: usize, missing: f64) -> OrientationGrid {
    Grid::from_fn(rows, cols, |_, _| {
        if rng.random_bool(missing) {
            return None;
        }
        let phi1 = rng.random_range(0.0..std::f64::consts::TAU);
        let big_phi = rng.random_range(0.0..std::f64::consts::PI);
        let phi2 = rng.random_range(0.0..std::f64::consts::TAU);
        Some(Orientation::from_bunge_euler(phi1, big_phi, phi2, Symmetry::Cubic).unwrap())
    })
    .unwrap()
}

/// Perturbs each orientation by a small random rotation about z.
fn jitter(rng: &mut StdRng, grid: &OrientationGrid, max_deg: f64) -> OrientationGrid {
    grid.map(|cell| {
        cell.map(|o| {
            let delta = rng.random_range(-max_deg..max_deg).to_radians();
            let extra =
                Orientation::from_bunge_euler(delta, 0.0, 0.0, Symmetry::Triclinic).unwrap();
            Orientation::new(o.rotation() * extra.rotation(), o.symmetry())
        })
    })
}

fn random_quality(rng: &mut StdRng, rows: usize, cols: usize, missing: f64) -> Grid<f32> {
    Grid::from_fn(rows, cols, |_, _| {
        if rng.random_bool(missing) {
            f32::NAN
        } else {
            rng.random_range(0.0f32..1.0)
        }
    })
    .unwrap()
}

#[test]
fn self_match_is_one_for_any_positive_threshold() {
    let mut rng = StdRng::seed_from_u64(11);
    let grid = random_grid(&mut rng, 7, 5, 0.0);
    let quality = Grid::filled(0.5f32, 7, 5).unwrap();
    for deviation in [1e-3, 0.5, 5.0, 90.0] {
        let report = compute_isr(&grid, &quality, &grid, deviation, &Modality::Ang).unwrap();
        assert_eq!(report.isr, 1.0, "deviation {deviation}");
        assert_eq!(report.matches.count_true(), 35);
    }
}

#[test]
fn all_missing_quality_gives_zero() {
    let mut rng = StdRng::seed_from_u64(12);
    let grid = random_grid(&mut rng, 4, 6, 0.0);
    let quality = Grid::filled(f32::NAN, 4, 6).unwrap();
    let report = compute_isr(&grid, &quality, &grid, 5.0, &Modality::Emsoft).unwrap();
    assert_eq!(report.isr, 0.0);
    assert_eq!(report.skipped, 24);
    assert!(report.matches.as_slice().iter().all(|&m| !m));
}

#[test]
fn deterministic_bounded_and_shape_preserving() {
    let mut rng = StdRng::seed_from_u64(13);
    let reference = random_grid(&mut rng, 9, 8, 0.1);
    let comparison = jitter(&mut rng, &reference, 6.0);
    let quality = random_quality(&mut rng, 9, 8, 0.2);

    let first = compute_isr(&comparison, &quality, &reference, 3.0, &Modality::Ang).unwrap();
    let second = compute_isr(&comparison, &quality, &reference, 3.0, &Modality::Ang).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.matches.shape(), comparison.shape());
    assert!((0.0..=1.0).contains(&first.isr));
    assert_eq!(first.matched, first.matches.count_true());
}

#[test]
fn isr_is_monotone_in_threshold() {
    let mut rng = StdRng::seed_from_u64(14);
    let reference = random_grid(&mut rng, 12, 10, 0.05);
    let comparison = jitter(&mut rng, &reference, 8.0);
    let quality = random_quality(&mut rng, 12, 10, 0.1);

    let mut previous = 0.0;
    let mut previous_map: Option<Grid<bool>> = None;
    for deviation in [0.5, 1.0, 2.0, 4.0, 6.0, 8.0, 20.0, 65.0] {
        let report =
            compute_isr(&comparison, &quality, &reference, deviation, &Modality::Ang).unwrap();
        assert!(report.isr >= previous, "isr dropped at {deviation}");
        if let Some(prev) = &previous_map {
            for (was, now) in prev.as_slice().iter().zip(report.matches.as_slice()) {
                assert!(!was || *now);
            }
        }
        previous = report.isr;
        previous_map = Some(report.matches);
    }
}

#[test]
fn single_pixel_grid_matches_only_itself() {
    let grid = Grid::new(vec![rot_z(0.0, Symmetry::Cubic)], 1, 1).unwrap();
    let quality = Grid::new(vec![1.0f32], 1, 1).unwrap();
    let report = compute_isr(&grid, &quality, &grid, 5.0, &Modality::Ang).unwrap();
    assert_eq!(report.isr, 1.0);

    let far = Grid::new(vec![rot_z(20.0, Symmetry::Cubic)], 1, 1).unwrap();
    let report = compute_isr(&grid, &quality, &far, 5.0, &Modality::Ang).unwrap();
    assert_eq!(report.isr, 0.0);
}

#[test]
fn two_by_two_with_one_outlier() {
    let reference = Grid::filled(rot_z(0.0, Symmetry::Cubic), 2, 2).unwrap();
    let mut comparison = reference.clone();
    *comparison.get_mut(0, 0).unwrap() = rot_z(10.0, Symmetry::Cubic);
    let quality = Grid::filled(0.9f32, 2, 2).unwrap();

    let report = compute_isr(&comparison, &quality, &reference, 5.0, &Modality::Ang).unwrap();
    assert_eq!(report.matches.get(0, 0).copied(), Some(false));
    assert_eq!(report.isr, 0.75);
}

#[test]
fn neighbor_offset_by_one_pixel_still_matches() {
    // Reference is the comparison shifted one column to the right.
    let comparison = Grid::from_fn(3, 4, |_, c| rot_z(15.0 * c as f64, Symmetry::Triclinic))
        .unwrap();
    let reference = Grid::from_fn(3, 4, |_, c| {
        rot_z(15.0 * c.saturating_sub(1) as f64, Symmetry::Triclinic)
    })
    .unwrap();
    let quality = Grid::filled(1.0f32, 3, 4).unwrap();
    let report = compute_isr(&comparison, &quality, &reference, 1.0, &Modality::Ang).unwrap();
    // The last column's value (45 deg) only exists in the reference outside its block.
    assert_eq!(report.matched, 9);
    assert!(report
        .matches
        .iter_rows()
        .all(|row| row == [true, true, true, false]));
}

#[test]
fn missing_reference_neighbors_are_skipped_not_fatal() {
    let comparison = Grid::filled(rot_z(0.0, Symmetry::Cubic), 3, 3).unwrap();
    let mut reference = Grid::filled(None, 3, 3).unwrap();
    *reference.get_mut(2, 2).unwrap() = rot_z(1.0, Symmetry::Cubic);
    let quality = Grid::filled(1.0f32, 3, 3).unwrap();
    let report = compute_isr(&comparison, &quality, &reference, 5.0, &Modality::Ang).unwrap();
    // Only pixels whose block contains (2, 2) can match.
    assert_eq!(report.matched, 4);
    assert_eq!(report.matches.get(1, 1).copied(), Some(true));
    assert_eq!(report.matches.get(0, 0).copied(), Some(false));
}

#[test]
fn custom_predicate_replaces_modality() {
    let grid = Grid::filled(rot_z(0.0, Symmetry::Cubic), 2, 2).unwrap();
    let quality = Grid::new(vec![0.05f32, 0.5, 0.5, 0.01], 2, 2).unwrap();
    let low_ci = |q: f32| q.is_nan() || q < 0.1;
    let report = compute_isr(&grid, &quality, &grid, 5.0, &low_ci).unwrap();
    assert_eq!(report.isr, 0.5);
    assert_eq!(report.skipped, 2);
}

#[test]
fn invalid_inputs_fail_fast() {
    let a = Grid::filled(rot_z(0.0, Symmetry::Cubic), 2, 3).unwrap();
    let b = Grid::filled(rot_z(0.0, Symmetry::Cubic), 3, 2).unwrap();
    let q = Grid::filled(1.0f32, 2, 3).unwrap();
    assert!(matches!(
        compute_isr(&a, &q, &b, 5.0, &Modality::Ang),
        Err(IsrError::InvalidInputShape { .. })
    ));
    assert!(matches!(
        compute_isr(&a, &q, &a, 0.0, &Modality::Ang),
        Err(IsrError::InvalidConfiguration { .. })
    ));
    assert!(matches!(
        compute_isr(&a, &q, &a, -5.0, &Modality::Ang),
        Err(IsrError::InvalidConfiguration { .. })
    ));
}
