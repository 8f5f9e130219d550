use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voxfilt::lowlevel::{median_in_place, Neighborhood};
use voxfilt::{median_filter, Extents, KernelShape, Volume, VoxFiltError};

#[test]
fn constant_image_is_a_fixed_point() {
    let img = Volume::filled(7, 7, 5, 2.5).unwrap();
    for shape in KernelShape::ALL {
        let out = median_filter(&img, Extents::new(3, 3, 3).unwrap(), shape).unwrap();
        assert_eq!(out, img, "shape {shape}");
    }
}

#[test]
fn spike_is_removed_in_1d() {
    let img = Volume::from_vec(vec![1.0, 2.0, 3.0, 100.0, 5.0, 6.0, 7.0], 7, 1, 1).unwrap();
    let out = median_filter(&img, Extents::new(3, 1, 1).unwrap(), KernelShape::Block).unwrap();
    assert_eq!(out.get(3, 0, 0), Some(5.0));
}

#[test]
fn matches_brute_force_neighborhood_median() {
    let mut rng = StdRng::seed_from_u64(99);
    let img = Volume::from_fn(9, 8, 5, |_, _, _| rng.random_range(0.0..10.0)).unwrap();
    for (kernel, shape) in [
        (Extents::new(3, 5, 3).unwrap(), KernelShape::Block),
        (Extents::new(5, 5, 5).unwrap(), KernelShape::Disc),
        (Extents::new(5, 3, 3).unwrap(), KernelShape::Cross),
    ] {
        let out = median_filter(&img, kernel, shape).unwrap();
        let hood = Neighborhood::new(img.extents(), kernel, shape).unwrap();
        for [x, y, z] in [[0, 0, 0], [4, 3, 2], [8, 7, 4], [1, 7, 0]] {
            let mut values: Vec<f32> = hood
                .coords([x, y, z])
                .map(|[cx, cy, cz]| img.get(cx, cy, cz).unwrap())
                .collect();
            let expected = median_in_place(&mut values);
            assert_eq!(out.get(x, y, z), Some(expected), "{shape} at {x},{y},{z}");
        }
    }
}

#[test]
fn rejects_invalid_kernels() {
    let img = Volume::zeros(8, 8, 1).unwrap();
    for (kernel, shape) in [
        (Extents::new(9, 3, 1).unwrap(), KernelShape::Block),
        (Extents::new(3, 4, 1).unwrap(), KernelShape::Cross),
        (Extents::new(5, 3, 1).unwrap(), KernelShape::Disc),
    ] {
        assert!(matches!(
            median_filter(&img, kernel, shape),
            Err(VoxFiltError::DimensionMismatch { .. })
        ));
    }
}
