//! Convenience helpers for loading and saving 2D volumes via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{min_max, Volume};
use crate::util::{VoxFiltError, VoxFiltResult};
use std::path::Path;

/// Creates a 2D volume from a grayscale image buffer.
pub fn volume_from_gray_image(img: &image::GrayImage) -> VoxFiltResult<Volume> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.as_raw().iter().map(|&v| f32::from(v)).collect();
    Volume::from_vec(data, width, height, 1)
}

/// Creates a 2D volume from a dynamic image, converting to luma first.
pub fn volume_from_dynamic_image(img: &image::DynamicImage) -> VoxFiltResult<Volume> {
    let gray = img.to_luma8();
    volume_from_gray_image(&gray)
}

/// Loads an image from disk as a 2D grayscale volume.
pub fn load_gray_volume<P: AsRef<Path>>(path: P) -> VoxFiltResult<Volume> {
    let img = image::open(path).map_err(|err| VoxFiltError::ImageIo {
        reason: err.to_string(),
    })?;
    volume_from_dynamic_image(&img)
}

/// Converts slice `z` of a volume to 8-bit grayscale using min/max scaling.
///
/// A constant slice maps to mid-gray.
pub fn gray_image_from_volume(vol: &Volume, z: usize) -> VoxFiltResult<image::GrayImage> {
    if z >= vol.nz() {
        return Err(VoxFiltError::invalid_argument(format!(
            "slice {z} outside volume with nz = {}",
            vol.nz()
        )));
    }
    let (nx, ny) = (vol.nx(), vol.ny());
    let start = z * nx * ny;
    let slice = &vol.as_slice()[start..start + nx * ny];
    let (lo, hi) = min_max(slice);
    let range = hi - lo;
    let pixels: Vec<u8> = slice
        .iter()
        .map(|&v| {
            if range <= f32::EPSILON {
                128
            } else {
                (((v - lo) / range) * 255.0).round().clamp(0.0, 255.0) as u8
            }
        })
        .collect();
    image::GrayImage::from_raw(nx as u32, ny as u32, pixels).ok_or(VoxFiltError::BufferSize {
        needed: nx * ny,
        got: slice.len(),
    })
}

/// Saves slice `z` of a volume as an 8-bit grayscale image.
pub fn save_gray_volume<P: AsRef<Path>>(vol: &Volume, z: usize, path: P) -> VoxFiltResult<()> {
    let img = gray_image_from_volume(vol, z)?;
    img.save(path).map_err(|err| VoxFiltError::ImageIo {
        reason: err.to_string(),
    })
}
