//! Neighborhood enumeration with toroidal wrap-around.
//!
//! A `Neighborhood` stores the relative offsets of one kernel footprint,
//! computed once from the image extents, kernel extents and shape. Per-voxel
//! work is then a walk over those offsets with true-modulo wrapping, writing
//! into a caller-owned buffer that is reused across voxels.

use crate::image::{Extents, Volume};
use crate::kernel::KernelShape;
use crate::util::math::wrap_index;
use crate::util::{VoxFiltError, VoxFiltResult};

/// Relative offsets of a kernel footprint around a center voxel.
#[derive(Clone, Debug)]
pub struct Neighborhood {
    shape: KernelShape,
    image: Extents,
    kernel: Extents,
    offsets: Vec<[isize; 3]>,
}

impl Neighborhood {
    /// Builds the footprint of `shape` for a kernel of `kernel` extents applied
    /// to an image of `image` extents.
    ///
    /// The kernel must fit inside the image and have odd extents; a disc
    /// kernel must be equally sized on every active axis.
    pub fn new(image: Extents, kernel: Extents, shape: KernelShape) -> VoxFiltResult<Self> {
        if !kernel.fits_within(&image) {
            return Err(VoxFiltError::DimensionMismatch {
                reason: "kernel must not be larger than the image",
                left: image,
                right: kernel,
            });
        }
        if !kernel.all_odd() {
            return Err(VoxFiltError::DimensionMismatch {
                reason: "kernel extents must be odd",
                left: image,
                right: kernel,
            });
        }
        let dimensionality = image.dimensionality();
        if shape == KernelShape::Disc {
            let unequal = match dimensionality {
                3 => kernel.nx != kernel.ny || kernel.nx != kernel.nz,
                2 => kernel.nx != kernel.ny,
                _ => false,
            };
            if unequal {
                return Err(VoxFiltError::DimensionMismatch {
                    reason: "disc kernel must be equally sized on every axis",
                    left: image,
                    right: kernel,
                });
            }
        }

        let [hx, hy, hz] = kernel.half_widths().map(|h| h as isize);
        let mut offsets = Vec::with_capacity(capacity_hint(kernel, shape));
        match shape {
            KernelShape::Block => {
                for dz in -hz..=hz {
                    for dy in -hy..=hy {
                        for dx in -hx..=hx {
                            offsets.push([dx, dy, dz]);
                        }
                    }
                }
            }
            KernelShape::Disc => {
                let r2 = hx * hx;
                for dz in -hz..=hz {
                    for dy in -hy..=hy {
                        for dx in -hx..=hx {
                            if dx * dx + dy * dy + dz * dz <= r2 {
                                offsets.push([dx, dy, dz]);
                            }
                        }
                    }
                }
            }
            KernelShape::Cross => {
                if dimensionality == 3 {
                    offsets.extend((-hz..=hz).filter(|&dz| dz != 0).map(|dz| [0, 0, dz]));
                }
                if dimensionality >= 2 {
                    offsets.extend((-hy..=hy).filter(|&dy| dy != 0).map(|dy| [0, dy, 0]));
                }
                offsets.extend((-hx..=hx).map(|dx| [dx, 0, 0]));
            }
        }

        Ok(Self {
            shape,
            image,
            kernel,
            offsets,
        })
    }

    /// Number of samples in the footprint.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// True if the footprint is empty; never the case for a valid kernel.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn shape(&self) -> KernelShape {
        self.shape
    }

    pub fn kernel_extents(&self) -> Extents {
        self.kernel
    }

    pub fn image_extents(&self) -> Extents {
        self.image
    }

    /// Relative offsets in enumeration order.
    pub fn offsets(&self) -> &[[isize; 3]] {
        &self.offsets
    }

    /// Allocates a buffer with exactly the capacity `gather` needs.
    pub fn buffer(&self) -> Vec<f32> {
        Vec::with_capacity(self.offsets.len())
    }

    /// Wrapped coordinates of the footprint centered at `center`.
    pub fn coords(&self, center: [usize; 3]) -> impl Iterator<Item = [usize; 3]> + '_ {
        let image = self.image;
        let [cx, cy, cz] = center.map(|c| c as isize);
        self.offsets.iter().map(move |&[dx, dy, dz]| {
            [
                wrap_index(cx + dx, image.nx),
                wrap_index(cy + dy, image.ny),
                wrap_index(cz + dz, image.nz),
            ]
        })
    }

    /// Clears `buf` and fills it with the image samples of the footprint at
    /// `center`, in enumeration order.
    pub fn gather(&self, image: &Volume, center: [usize; 3], buf: &mut Vec<f32>) {
        debug_assert_eq!(image.extents(), self.image);
        buf.clear();
        let data = image.as_slice();
        buf.extend(
            self.coords(center)
                .map(|[x, y, z]| data[image.offset(x, y, z)]),
        );
    }
}

/// Exact footprint size for block and cross shapes; an upper bound for discs.
///
/// Inactive kernel axes have extent 1, so the cross count reduces to the sum
/// of active extents minus `dimensionality - 1`.
fn capacity_hint(kernel: Extents, shape: KernelShape) -> usize {
    match shape {
        KernelShape::Block | KernelShape::Disc => kernel.len(),
        KernelShape::Cross => kernel.nx + kernel.ny + kernel.nz - 2,
    }
}

#[cfg(test)]
mod tests {
    use super::Neighborhood;
    use crate::image::{Extents, Volume};
    use crate::kernel::KernelShape;
    use crate::util::VoxFiltError;

    fn ext(nx: usize, ny: usize, nz: usize) -> Extents {
        Extents::new(nx, ny, nz).unwrap()
    }

    #[test]
    fn footprint_sizes_follow_shape_formulas() {
        let block = Neighborhood::new(ext(9, 9, 9), ext(3, 5, 7), KernelShape::Block).unwrap();
        assert_eq!(block.len(), 3 * 5 * 7);

        let cross3 = Neighborhood::new(ext(9, 9, 9), ext(3, 5, 7), KernelShape::Cross).unwrap();
        assert_eq!(cross3.len(), 3 + 5 + 7 - 2);
        let cross2 = Neighborhood::new(ext(9, 9, 1), ext(3, 5, 1), KernelShape::Cross).unwrap();
        assert_eq!(cross2.len(), 3 + 5 - 1);
        let cross1 = Neighborhood::new(ext(9, 1, 1), ext(5, 1, 1), KernelShape::Cross).unwrap();
        assert_eq!(cross1.len(), 5);

        let disc2 = Neighborhood::new(ext(9, 9, 1), ext(5, 5, 1), KernelShape::Disc).unwrap();
        assert_eq!(disc2.len(), 13);
        let sphere = Neighborhood::new(ext(9, 9, 9), ext(3, 3, 3), KernelShape::Disc).unwrap();
        assert_eq!(sphere.len(), 7);
    }

    #[test]
    fn cross_lists_z_then_y_then_x() {
        let cross = Neighborhood::new(ext(5, 5, 5), ext(3, 3, 3), KernelShape::Cross).unwrap();
        assert_eq!(
            cross.offsets(),
            &[
                [0, 0, -1],
                [0, 0, 1],
                [0, -1, 0],
                [0, 1, 0],
                [-1, 0, 0],
                [0, 0, 0],
                [1, 0, 0],
            ]
        );
    }

    #[test]
    fn coords_wrap_toroidally() {
        let block = Neighborhood::new(ext(4, 3, 1), ext(3, 3, 1), KernelShape::Block).unwrap();
        let coords: Vec<_> = block.coords([0, 0, 0]).collect();
        assert_eq!(coords[0], [3, 2, 0]);
        assert_eq!(coords[4], [0, 0, 0]);
        assert_eq!(coords[8], [1, 1, 0]);
    }

    #[test]
    fn gather_reuses_buffer() {
        let image = Volume::from_fn(5, 1, 1, |x, _, _| x as f32).unwrap();
        let hood = Neighborhood::new(image.extents(), ext(3, 1, 1), KernelShape::Block).unwrap();
        let mut buf = hood.buffer();
        hood.gather(&image, [0, 0, 0], &mut buf);
        assert_eq!(buf, vec![4.0, 0.0, 1.0]);
        hood.gather(&image, [4, 0, 0], &mut buf);
        assert_eq!(buf, vec![3.0, 4.0, 0.0]);
        assert_eq!(buf.len(), hood.len());
    }

    #[test]
    fn rejects_invalid_kernels() {
        let err = Neighborhood::new(ext(5, 5, 1), ext(7, 3, 1), KernelShape::Block).unwrap_err();
        assert!(matches!(err, VoxFiltError::DimensionMismatch { .. }));
        let err = Neighborhood::new(ext(5, 5, 1), ext(2, 3, 1), KernelShape::Block).unwrap_err();
        assert!(matches!(err, VoxFiltError::DimensionMismatch { .. }));
        let err = Neighborhood::new(ext(9, 9, 9), ext(3, 3, 5), KernelShape::Disc).unwrap_err();
        assert!(matches!(err, VoxFiltError::DimensionMismatch { .. }));
        let err = Neighborhood::new(ext(9, 9, 1), ext(3, 5, 1), KernelShape::Disc).unwrap_err();
        assert!(matches!(err, VoxFiltError::DimensionMismatch { .. }));
    }
}
