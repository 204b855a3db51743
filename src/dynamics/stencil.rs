use ndarray::{Array, Axis, Dimension, Slice, Zip};

// Discrete Laplacian (without the 1/dx² factor) over interior points: the
// 3-point stencil in 1D, the 5-point stencil in 2D. Points on the first or
// last index of any axis are left at zero.
pub fn laplacian<D: Dimension>(field: &Array<f64, D>) -> Array<f64, D> {
    let mut lap = Array::zeros(field.raw_dim());
    if field.shape().iter().any(|&n| n < 3) {
        return lap;
    }

    let interior = |len: usize| Slice::from(1..len as isize - 1);
    let centre = field.slice_each_axis(|ax| interior(ax.len));
    let mut lap_interior = lap.slice_each_axis_mut(|ax| interior(ax.len));

    for axis in 0..field.ndim() {
        let forward = field.slice_each_axis(|ax| {
            if ax.axis.index() == axis {
                Slice::from(2..ax.len as isize)
            } else {
                interior(ax.len)
            }
        });
        let backward = field.slice_each_axis(|ax| {
            if ax.axis.index() == axis {
                Slice::from(0..ax.len as isize - 2)
            } else {
                interior(ax.len)
            }
        });
        Zip::from(&mut lap_interior)
            .and(&forward)
            .and(&backward)
            .and(&centre)
            .for_each(|l, &f, &b, &c| *l += f + b - 2.0 * c);
    }
    lap
}

// Translate along one axis by s cells, so that new[i] = old[i - s].
// Cells with no source are zero: the field vanishes outside the window.
pub fn shift_axis<D: Dimension>(field: &Array<f64, D>, axis: Axis, s: i64) -> Array<f64, D> {
    if s == 0 {
        return field.clone();
    }
    let mut shifted = Array::zeros(field.raw_dim());
    let n = field.len_of(axis) as i64;
    if s.abs() >= n {
        return shifted;
    }
    let (dst, src) = if s > 0 {
        (s..n, 0..n - s)
    } else {
        (0..n + s, -s..n)
    };
    shifted
        .slice_axis_mut(axis, Slice::from(dst.start as isize..dst.end as isize))
        .assign(&field.slice_axis(axis, Slice::from(src.start as isize..src.end as isize)));
    shifted
}

// Translate along every axis, one shift amount per axis.
pub fn shift<D: Dimension>(field: &Array<f64, D>, shifts: &[i64]) -> Array<f64, D> {
    debug_assert_eq!(shifts.len(), field.ndim());
    if shifts.iter().all(|&s| s == 0) {
        return field.clone();
    }
    shifts
        .iter()
        .enumerate()
        .fold(field.clone(), |acc, (axis, &s)| shift_axis(&acc, Axis(axis), s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    #[test]
    fn test_laplacian_1d() {
        let h = array![1.0, 4.0, 9.0, 16.0, 25.0];
        let lap = laplacian(&h);
        // Second difference of i² is 2 everywhere in the interior.
        assert_eq!(lap, array![0.0, 2.0, 2.0, 2.0, 0.0]);
    }

    #[test]
    fn test_laplacian_2d_matches_five_point() {
        let h = Array2::from_shape_fn((6, 5), |(i, j)| ((i * 7 + j * 3) % 5) as f64 - 0.3 * j as f64);
        let lap = laplacian(&h);
        for i in 0..6 {
            for j in 0..5 {
                if i == 0 || j == 0 || i == 5 || j == 4 {
                    assert_eq!(lap[[i, j]], 0.0);
                } else {
                    let expected = h[[i + 1, j]] + h[[i - 1, j]] + h[[i, j + 1]] + h[[i, j - 1]]
                        - 4.0 * h[[i, j]];
                    assert_relative_eq!(lap[[i, j]], expected, epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_laplacian_too_small() {
        let h = array![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(laplacian(&h), Array2::<f64>::zeros((2, 2)));
    }

    #[test]
    fn test_shift_axis() {
        let h = array![1.0, 2.0, 3.0, 4.0];
        assert_eq!(shift_axis(&h, Axis(0), 1), array![0.0, 1.0, 2.0, 3.0]);
        assert_eq!(shift_axis(&h, Axis(0), -2), array![3.0, 4.0, 0.0, 0.0]);
        assert_eq!(shift_axis(&h, Axis(0), 0), h);
        assert_eq!(shift_axis(&h, Axis(0), 4), array![0.0, 0.0, 0.0, 0.0]);
        assert_eq!(shift_axis(&h, Axis(0), -7), array![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_shift_2d() {
        let h = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
        let shifted = shift(&h, &[1, -1]);
        assert_eq!(
            shifted,
            array![[0.0, 0.0, 0.0], [2.0, 3.0, 0.0], [5.0, 6.0, 0.0]]
        );
        for i in 1..3 {
            for j in 0..2 {
                assert_eq!(shifted[[i, j]], h[[i - 1, j + 1]]);
            }
        }
    }
}
