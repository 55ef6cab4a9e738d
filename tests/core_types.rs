use isrmap::kernel::match_pixel;
use isrmap::{Grid, IsrError, Neighborhood, Orientation, Shape, Symmetry};

#[test]
fn grid_rejects_invalid_dimensions() {
    let err = Grid::new(vec![0u8; 4], 0, 4).unwrap_err();
    assert_eq!(err, IsrError::InvalidDimensions { rows: 0, cols: 4 });

    let err = Grid::<u8>::filled(0, 3, 0).unwrap_err();
    assert_eq!(err, IsrError::InvalidDimensions { rows: 3, cols: 0 });

    let err = Grid::new(vec![0u8; 7], 2, 4).unwrap_err();
    assert_eq!(err, IsrError::BufferSizeMismatch { needed: 8, got: 7 });
}

#[test]
fn neighborhood_never_leaves_the_grid() {
    let shape = Shape { rows: 3, cols: 5 };
    for row in 0..shape.rows {
        for col in 0..shape.cols {
            let n = Neighborhood::clamped(shape, row, col);
            assert!(!n.is_empty());
            assert!(n.cells().any(|cell| cell == (row, col)));
            for (r, c) in n.cells() {
                assert!(r < shape.rows && c < shape.cols);
                assert!(r.abs_diff(row) <= 1 && c.abs_diff(col) <= 1);
            }
        }
    }
    assert_eq!(Neighborhood::clamped(shape, 1, 2).len(), 9);
    assert_eq!(Neighborhood::clamped(shape, 0, 4).len(), 4);
}

#[test]
fn hexagonal_symmetry_folds_sixty_degree_turns() {
    let a = Orientation::from_bunge_euler(0.2, 0.0, 0.0, Symmetry::Hexagonal).unwrap();
    let b = Orientation::from_bunge_euler(0.2 + 60f64.to_radians(), 0.0, 0.0, Symmetry::Hexagonal)
        .unwrap();
    assert!(a.angle_to(&b) < 1e-7);

    let plain = Orientation::new(*a.rotation(), Symmetry::Triclinic);
    assert!((plain.angle_to(&b) - 60f64.to_radians()).abs() < 1e-9);
}

#[test]
fn disorientation_is_symmetric() {
    let a = Orientation::from_bunge_euler(0.4, 1.1, 2.3, Symmetry::Cubic).unwrap();
    let b = Orientation::from_bunge_euler(2.9, 0.3, 0.7, Symmetry::Cubic).unwrap();
    assert!((a.angle_to(&b) - b.angle_to(&a)).abs() < 1e-9);
    assert!(a.within(&a, 1e-3));
    assert!(!a.within(&b, 1e-3));
}

#[test]
fn match_pixel_on_mismatched_grids_does_not_panic() {
    let o = Some(Orientation::from_bunge_euler(0.0, 0.0, 0.0, Symmetry::Cubic).unwrap());
    let small = Grid::filled(o, 1, 1).unwrap();
    let large = Grid::filled(o, 3, 3).unwrap();

    // Reference larger than the comparison.
    assert!(match_pixel(&small, &large, 0, 0, 0.1));
    assert!(!match_pixel(&small, &large, 2, 2, 0.1));

    // Comparison larger than the reference.
    assert!(match_pixel(&large, &small, 0, 0, 0.1));
    assert!(!match_pixel(&large, &small, 1, 0, 0.1));
    assert!(!match_pixel(&large, &small, 2, 2, 0.1));
    assert!(!match_pixel(&large, &small, 9, 9, 0.1));
}
