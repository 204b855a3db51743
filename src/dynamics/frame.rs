use nalgebra::SVector;

// Tracks the translating reference frame. The continuous position advances by
// velocity * dt each step and the lattice offset is floor(position / dx)
// along every axis, so the grid only ever moves by whole cells.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameTracker<const K: usize> {
    position: SVector<f64, K>,
    displacement: SVector<f64, K>,
    dx: f64,
}

impl<const K: usize> FrameTracker<K> {
    pub fn new(velocity: SVector<f64, K>, dt: f64, dx: f64) -> Self {
        FrameTracker {
            position: SVector::zeros(),
            displacement: velocity * dt,
            dx,
        }
    }

    pub fn advance(&mut self) -> SVector<i64, K> {
        self.position += self.displacement;
        self.offset()
    }

    pub fn position(&self) -> SVector<f64, K> {
        self.position
    }

    pub fn offset(&self) -> SVector<i64, K> {
        lattice_offset(&self.position, self.dx)
    }
}

pub fn lattice_offset<const K: usize>(position: &SVector<f64, K>, dx: f64) -> SVector<i64, K> {
    position.map(|p| (p / dx).floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Vector1, Vector2};

    #[test]
    fn test_offset_is_floor_of_position() {
        let dx = 0.05;
        let mut tracker = FrameTracker::new(Vector2::new(0.7, -0.3), 0.01, dx);
        let mut position = Vector2::zeros();
        for _ in 0..500 {
            let offset = tracker.advance();
            position += Vector2::new(0.7, -0.3) * 0.01;
            assert_eq!(tracker.position(), position);
            assert_eq!(offset.x, (position.x / dx).floor() as i64);
            assert_eq!(offset.y, (position.y / dx).floor() as i64);
        }
        // Negative velocity rounds towards negative infinity.
        assert!(tracker.offset().y < 0);
    }

    #[test]
    fn test_offsets_deterministic() {
        let run = || {
            let mut tracker = FrameTracker::new(Vector1::new(1.3), 0.02, 0.05);
            (0..300).map(|_| tracker.advance().x).collect::<Vec<_>>()
        };
        let offsets = run();
        assert_eq!(offsets, run());
        assert!(offsets.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_stationary_frame() {
        let mut tracker = FrameTracker::new(Vector1::new(0.0), 0.01, 0.05);
        for _ in 0..10 {
            assert_eq!(tracker.advance().x, 0);
        }
    }
}
