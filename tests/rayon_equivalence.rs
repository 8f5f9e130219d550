#![cfg(feature = "rayon")]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voxfilt::{
    convolve_with, median_filter_with, Extents, FilterOptions, KernelShape, Volume,
};

fn make_volume(seed: u64, nx: usize, ny: usize, nz: usize) -> Volume {
    let mut rng = StdRng::seed_from_u64(seed);
    Volume::from_fn(nx, ny, nz, |_, _, _| rng.random_range(-5.0..5.0)).unwrap()
}

#[test]
fn parallel_convolution_matches_sequential() {
    let img = make_volume(1, 23, 17, 6);
    let kernel = make_volume(2, 5, 3, 3);
    let seq = convolve_with(&img, &kernel, &FilterOptions { parallel: false }).unwrap();
    let par = convolve_with(&img, &kernel, &FilterOptions { parallel: true }).unwrap();
    assert_eq!(seq, par);
}

#[test]
fn parallel_median_matches_sequential() {
    let img = make_volume(3, 19, 13, 5);
    for shape in KernelShape::ALL {
        let kernel = Extents::new(3, 3, 3).unwrap();
        let seq = median_filter_with(&img, kernel, shape, &FilterOptions { parallel: false })
            .unwrap();
        let par =
            median_filter_with(&img, kernel, shape, &FilterOptions { parallel: true }).unwrap();
        assert_eq!(seq, par, "shape {shape}");
    }
}
