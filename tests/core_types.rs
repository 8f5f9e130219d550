use voxfilt::lowlevel::Neighborhood;
use voxfilt::{Extents, KernelShape, Volume, VoxFiltError};

#[test]
fn volume_rejects_zero_extents_and_bad_buffers() {
    assert!(matches!(
        Volume::zeros(0, 4, 1),
        Err(VoxFiltError::InvalidExtents { nx: 0, ny: 4, nz: 1 })
    ));
    assert!(matches!(
        Volume::from_vec(vec![0.0; 5], 2, 3, 1),
        Err(VoxFiltError::BufferSize { needed: 6, got: 5 })
    ));
}

#[test]
fn volume_indexing_is_x_fastest() {
    let vol = Volume::from_fn(4, 3, 2, |x, y, z| (x + 10 * y + 100 * z) as f32).unwrap();
    assert_eq!(vol.as_slice()[1], 1.0);
    assert_eq!(vol.as_slice()[4], 10.0);
    assert_eq!(vol.as_slice()[12], 100.0);
    assert_eq!(vol.get(3, 2, 1), Some(123.0));
    assert_eq!(vol.get(4, 0, 0), None);
    assert_eq!(vol.get_wrapped(-1, -1, -1), 123.0);
    assert_eq!(vol.row(1, 1), Some(&[110.0, 111.0, 112.0, 113.0][..]));
}

#[test]
fn extents_dimensionality() {
    assert_eq!(Extents::new(5, 1, 1).unwrap().dimensionality(), 1);
    assert_eq!(Extents::new(5, 4, 1).unwrap().dimensionality(), 2);
    assert_eq!(Extents::new(5, 4, 3).unwrap().dimensionality(), 3);
    assert_eq!(Extents::new(5, 4, 3).unwrap().to_string(), "5x4x3");
}

#[test]
fn neighborhood_sizes_follow_shape_formulas() {
    let image = Extents::new(9, 9, 9).unwrap();
    let k5 = Extents::new(5, 5, 5).unwrap();
    let block = Neighborhood::new(image, k5, KernelShape::Block).unwrap();
    assert_eq!(block.len(), 125);
    let cross = Neighborhood::new(image, k5, KernelShape::Cross).unwrap();
    assert_eq!(cross.len(), 5 + 5 + 5 - 2);
    let disc = Neighborhood::new(image, k5, KernelShape::Disc).unwrap();
    // Lattice points with x^2 + y^2 + z^2 <= 4.
    assert_eq!(disc.len(), 33);

    let plane = Extents::new(9, 9, 1).unwrap();
    let k3 = Extents::new(3, 3, 1).unwrap();
    assert_eq!(Neighborhood::new(plane, k3, KernelShape::Cross).unwrap().len(), 5);
    assert_eq!(Neighborhood::new(plane, k3, KernelShape::Disc).unwrap().len(), 5);
    assert_eq!(Neighborhood::new(plane, k3, KernelShape::Block).unwrap().len(), 9);

    let line = Extents::new(9, 1, 1).unwrap();
    let k7 = Extents::new(7, 1, 1).unwrap();
    assert_eq!(Neighborhood::new(line, k7, KernelShape::Cross).unwrap().len(), 7);
}

#[test]
fn neighborhood_rejects_bad_kernels() {
    let image = Extents::new(9, 9, 1).unwrap();
    for (kernel, shape) in [
        (Extents::new(11, 3, 1).unwrap(), KernelShape::Block),
        (Extents::new(4, 3, 1).unwrap(), KernelShape::Block),
        (Extents::new(5, 3, 1).unwrap(), KernelShape::Disc),
    ] {
        assert!(matches!(
            Neighborhood::new(image, kernel, shape),
            Err(VoxFiltError::DimensionMismatch { .. })
        ));
    }
}

#[test]
fn neighborhood_coordinates_wrap() {
    let image = Extents::new(5, 5, 1).unwrap();
    let kernel = Extents::new(3, 3, 1).unwrap();
    let hood = Neighborhood::new(image, kernel, KernelShape::Block).unwrap();
    let coords: Vec<_> = hood.coords([0, 0, 0]).collect();
    assert_eq!(coords.len(), 9);
    assert!(coords.contains(&[4, 4, 0]));
    assert!(coords.contains(&[1, 1, 0]));
    assert!(coords.iter().all(|c| c[0] < 5 && c[1] < 5 && c[2] == 0));
}
