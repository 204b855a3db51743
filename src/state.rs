use nalgebra::SVector;
use ndarray::{Array, Dimension, Ix1};

// One time level of the field, stored in the lattice frame it was computed in.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<D: Dimension, const K: usize> {
    pub field: Array<f64, D>,
    pub offset: SVector<i64, K>,
}

impl<D: Dimension, const K: usize> Frame<D, K> {
    pub fn zeros(dim: D) -> Self {
        debug_assert_eq!(dim.ndim(), K);
        Frame {
            field: Array::zeros(dim),
            offset: SVector::zeros(),
        }
    }

    // Shift amounts that carry this frame into the frame at `offset`.
    pub fn shift_to(&self, offset: &SVector<i64, K>) -> SVector<i64, K> {
        offset - self.offset
    }
}

// The two leapfrog time levels. Roles are explicit: `rotate` is the only way
// a newly computed level enters the state.
#[derive(Debug, Clone, PartialEq)]
pub struct GridState<D: Dimension, const K: usize> {
    pub current: Frame<D, K>,
    pub previous: Frame<D, K>,
    pub step: u64,
}

pub type LineState = GridState<Ix1, 1>;

impl<D: Dimension, const K: usize> GridState<D, K> {
    pub fn new(dim: D) -> Self {
        GridState {
            current: Frame::zeros(dim.clone()),
            previous: Frame::zeros(dim),
            step: 0,
        }
    }

    // The new level becomes current; the old current, untouched and still in
    // its own frame, becomes previous.
    pub fn rotate(&mut self, next: Frame<D, K>) {
        let old = std::mem::replace(&mut self.current, next);
        self.previous = old;
        self.step += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector1;
    use ndarray::array;

    #[test]
    fn test_rotate_roles() {
        let mut state = LineState::new(Ix1(3));
        state.rotate(Frame {
            field: array![1.0, 2.0, 3.0],
            offset: Vector1::new(2),
        });
        assert_eq!(state.previous, Frame::zeros(Ix1(3)));
        assert_eq!(state.current.offset, Vector1::new(2));
        state.rotate(Frame {
            field: array![4.0, 5.0, 6.0],
            offset: Vector1::new(3),
        });
        assert_eq!(state.previous.field, array![1.0, 2.0, 3.0]);
        assert_eq!(state.previous.offset, Vector1::new(2));
        assert_eq!(state.current.shift_to(&Vector1::new(5)), Vector1::new(2));
        assert_eq!(state.step, 2);
    }
}
