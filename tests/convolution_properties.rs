use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voxfilt::lowlevel::convolve_circulant;
use voxfilt::{convolve, Volume, VoxFiltError};

fn random_volume(rng: &mut StdRng, nx: usize, ny: usize, nz: usize) -> Volume {
    Volume::from_fn(nx, ny, nz, |_, _, _| rng.random_range(-1.0..1.0)).unwrap()
}

fn delta(nx: usize, ny: usize, nz: usize) -> Volume {
    let mut k = Volume::zeros(nx, ny, nz).unwrap();
    k.set(nx / 2, ny / 2, nz / 2, 1.0).unwrap();
    k
}

#[test]
fn centered_delta_is_identity() {
    let mut rng = StdRng::seed_from_u64(11);
    for (image, kernel) in [
        ((16, 1, 1), (5, 1, 1)),
        ((12, 9, 1), (3, 5, 1)),
        ((7, 6, 5), (3, 3, 3)),
    ] {
        let img = random_volume(&mut rng, image.0, image.1, image.2);
        let out = convolve(&img, &delta(kernel.0, kernel.1, kernel.2)).unwrap();
        assert_eq!(out, img);
    }
}

#[test]
fn shifted_delta_translates_with_wrap() {
    let img = Volume::from_fn(6, 5, 1, |x, y, _| (x + 10 * y) as f32).unwrap();
    let mut k = Volume::zeros(3, 3, 1).unwrap();
    // Offset (+1, 0): out(x, y) = img(x - 1, y).
    k.set(2, 1, 0, 1.0).unwrap();
    let out = convolve(&img, &k).unwrap();
    for y in 0..5 {
        for x in 0..6 {
            let src = (x + 5) % 6;
            assert_eq!(out.get(x, y, 0), img.get(src, y, 0));
        }
    }
}

#[test]
fn matches_reference_on_random_inputs() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..25 {
        let kx = 2 * rng.random_range(0..3usize) + 1;
        let ky = 2 * rng.random_range(0..3usize) + 1;
        let kz = 2 * rng.random_range(0..2usize) + 1;
        let nx = kx + rng.random_range(0..6usize);
        let ny = ky + rng.random_range(0..6usize);
        let nz = kz + rng.random_range(0..4usize);
        let img = random_volume(&mut rng, nx, ny, nz);
        let kernel = random_volume(&mut rng, kx, ky, kz);
        let fast = convolve(&img, &kernel).unwrap();
        let reference = convolve_circulant(&img, &kernel).unwrap();
        assert_eq!(fast, reference, "image {nx}x{ny}x{nz} kernel {kx}x{ky}x{kz}");
    }
}

#[test]
fn kernel_filling_the_image_wraps_every_tap() {
    let img = Volume::from_fn(5, 5, 1, |x, y, _| (x * y) as f32).unwrap();
    let kernel = Volume::filled(5, 5, 1, 1.0).unwrap();
    let out = convolve(&img, &kernel).unwrap();
    let total: f32 = img.as_slice().iter().sum();
    assert!(out.as_slice().iter().all(|&v| (v - total).abs() < 1e-4));
}

#[test]
fn larger_second_operand_swaps_roles() {
    let mut rng = StdRng::seed_from_u64(5);
    let small = random_volume(&mut rng, 3, 3, 3);
    let large = random_volume(&mut rng, 5, 4, 5);
    let swapped = convolve(&small, &large).unwrap();
    let direct = convolve(&large, &small).unwrap();
    assert_eq!(swapped, direct);
    assert_eq!(swapped.extents(), large.extents());
}

#[test]
fn incommensurate_and_even_kernels_fail() {
    let img = Volume::zeros(5, 4, 3).unwrap();
    let kernel = Volume::zeros(3, 3, 3).unwrap();
    // 3x3x3 is not smaller than 5x4x3 on z and does not contain it.
    assert!(matches!(
        convolve(&kernel, &img),
        Err(VoxFiltError::DimensionMismatch { .. })
    ));

    let mixed = Volume::zeros(7, 3, 3).unwrap();
    assert!(matches!(
        convolve(&img, &mixed),
        Err(VoxFiltError::DimensionMismatch { .. })
    ));

    let even = Volume::zeros(3, 2, 1).unwrap();
    let plane = Volume::zeros(8, 8, 1).unwrap();
    assert!(matches!(
        convolve(&plane, &even),
        Err(VoxFiltError::DimensionMismatch { .. })
    ));
}
