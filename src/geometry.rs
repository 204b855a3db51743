pub mod point;

// n evenly spaced values from start to stop inclusive. Needs n >= 2.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|i| start + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace() {
        let xs = linspace(-1.0, 1.0, 5);
        assert_eq!(xs.len(), 5);
        for (x, expected) in xs.iter().zip([-1.0, -0.5, 0.0, 0.5, 1.0]) {
            assert_relative_eq!(*x, expected);
        }
    }
}
