use nalgebra::{Point2, Vector2};
use rand::distributions::Distribution;

pub fn random_vector<R: rand::Rng, T: Distribution<f64>>(rng: &mut R, distr: T) -> Vector2<f64> {
    Vector2::new(distr.sample(rng), distr.sample(rng))
}

// Uniform point in the axis-aligned box [-l/2, l/2] per component.
pub fn random_point_in_box<R: rand::Rng, T: Distribution<f64>>(
    rng: &mut R,
    unit_distr: T,
    l: Vector2<f64>,
) -> Point2<f64> {
    Point2::from(random_vector(rng, unit_distr).component_mul(&l))
}
