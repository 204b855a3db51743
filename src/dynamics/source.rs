use ndarray::{Array, Array1, Dimension, IntoDimension, Zip};

// Cells within `radius` of the origin, measured in the frame's local
// coordinates. Every axis shares the coordinate array `x`.
pub fn source_mask<D: Dimension>(x: &Array1<f64>, dim: D, radius: f64) -> Array<bool, D> {
    Array::from_shape_fn(dim, |pattern| {
        let index = pattern.into_dimension();
        let r2: f64 = index.slice().iter().map(|&i| x[i] * x[i]).sum();
        r2.sqrt() <= radius
    })
}

// Clamp the masked cells to the source amplitude. A zero amplitude means no
// source at all, not a cell pinned to zero.
pub fn apply_source<D: Dimension>(field: &mut Array<f64, D>, mask: &Array<bool, D>, amplitude: f64) {
    if amplitude == 0.0 {
        return;
    }
    Zip::from(field).and(mask).for_each(|h, &inside| {
        if inside {
            *h = amplitude;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::linspace;
    use ndarray::{array, Ix1, Ix2};

    #[test]
    fn test_mask_1d() {
        let x = Array1::from(linspace(-2.0, 2.0, 9));
        let mask = source_mask(&x, Ix1(9), 0.5);
        assert_eq!(
            mask,
            array![false, false, false, true, true, true, false, false, false]
        );
    }

    #[test]
    fn test_mask_2d_is_a_disc() {
        let x = Array1::from(linspace(-2.0, 2.0, 9));
        let mask = source_mask(&x, Ix2(9, 9), 0.5);
        assert_eq!(mask.iter().filter(|&&m| m).count(), 5);
        assert!(mask[[4, 4]]);
        assert!(mask[[3, 4]] && mask[[5, 4]] && mask[[4, 3]] && mask[[4, 5]]);
        assert!(!mask[[3, 3]]);
    }

    #[test]
    fn test_apply_source() {
        let mask = array![false, true, true, false];
        let mut h = array![0.5, -0.2, 0.1, 0.3];
        apply_source(&mut h, &mask, 2.0);
        assert_eq!(h, array![0.5, 2.0, 2.0, 0.3]);

        let mut h = array![0.5, -0.2, 0.1, 0.3];
        apply_source(&mut h, &mask, 0.0);
        assert_eq!(h, array![0.5, -0.2, 0.1, 0.3]);
    }
}
