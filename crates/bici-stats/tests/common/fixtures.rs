//! Deterministic sample data for integration tests

use ndarray::{Array2, Array3};

/// Seeded generator so fixtures are reproducible across runs
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(0x9E3779B97F4A7C15),
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }

    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() as f64) / (u64::MAX as f64)
    }

    /// Standard normal pair via Box-Muller
    pub fn next_gaussian_pair(&mut self) -> (f64, f64) {
        let u1 = self.next_f64().max(1e-10);
        let u2 = self.next_f64();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * std::f64::consts::PI * u2;
        (r * theta.cos(), r * theta.sin())
    }
}

/// `[observations, 2]` points with spread `(major, minor)` along a frame
/// rotated by `angle` radians
#[allow(dead_code)]
pub fn rotated_cloud(seed: u64, observations: usize, angle: f64, major: f64, minor: f64) -> Array2<f64> {
    let mut rng = SimpleRng::new(seed);
    let (sin, cos) = angle.sin_cos();
    let mut data = Array2::zeros((observations, 2));
    for mut row in data.rows_mut() {
        let (a, b) = rng.next_gaussian_pair();
        let (a, b) = (a * major, b * minor);
        row[0] = cos * a - sin * b;
        row[1] = sin * a + cos * b;
    }
    data
}

/// `[observations, nodes, 2]` continua whose principal axis sweeps a full
/// turn along the continuum
#[allow(dead_code)]
pub fn rotating_continuum(seed: u64, observations: usize, nodes: usize) -> Array3<f64> {
    let mut rng = SimpleRng::new(seed);
    let mut data = Array3::zeros((observations, nodes, 2));
    for j in 0..observations {
        for q in 0..nodes {
            let t = q as f64 / nodes as f64;
            let angle = 2.0 * std::f64::consts::PI * t;
            let (sin, cos) = angle.sin_cos();
            let (a, b) = rng.next_gaussian_pair();
            let (a, b) = (3.0 * a, 0.5 * b);
            data[[j, q, 0]] = t + cos * a - sin * b;
            data[[j, q, 1]] = -t + sin * a + cos * b;
        }
    }
    data
}
