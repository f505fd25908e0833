//! Proximity lines between particle pairs.
//!
//! Every unordered pair is checked once per frame, which is quadratic in the
//! particle count. That is fine for the few hundred particles the tiers
//! produce; a spatial grid would be the next step past that.

use super::particle::Particle;

/// A line between particles `a < b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
	/// Lower particle index.
	pub a: usize,
	/// Higher particle index.
	pub b: usize,
	/// Distance between the two particles.
	pub distance: f64,
	/// Peak alpha at distance 0, fading linearly to 0 at the threshold.
	pub alpha: f64,
}

/// Visit each pair closer than `max_distance`, each pair exactly once.
pub fn for_each_connection(
	particles: &[Particle],
	max_distance: f64,
	peak_alpha: f64,
	mut visit: impl FnMut(Connection),
) {
	let max_sq = max_distance * max_distance;
	for (a, pa) in particles.iter().enumerate() {
		for (offset, pb) in particles[a + 1..].iter().enumerate() {
			let dist_sq = (pa.position - pb.position).magnitude_squared();
			if dist_sq >= max_sq {
				continue;
			}
			let distance = dist_sq.sqrt();
			visit(Connection {
				a,
				b: a + 1 + offset,
				distance,
				alpha: peak_alpha * (1.0 - distance / max_distance),
			});
		}
	}
}

/// Collected form of [`for_each_connection`].
pub fn connections(particles: &[Particle], max_distance: f64, peak_alpha: f64) -> Vec<Connection> {
	let mut out = Vec::new();
	for_each_connection(particles, max_distance, peak_alpha, |c| out.push(c));
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::vector::Vec2;

	fn at(x: f64, y: f64) -> Particle {
		Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.0)
	}

	#[test]
	fn only_close_pairs_connect() {
		let particles = [at(0.0, 0.0), at(10.0, 0.0), at(200.0, 200.0), at(205.0, 205.0)];
		let lines = connections(&particles, 50.0, 1.0);

		let pairs: Vec<_> = lines.iter().map(|c| (c.a, c.b)).collect();
		assert_eq!(pairs, vec![(0, 1), (2, 3)]);
		assert!((lines[1].distance - 50f64.sqrt()).abs() < 1e-9);
	}

	#[test]
	fn threshold_is_exclusive() {
		let particles = [at(0.0, 0.0), at(50.0, 0.0)];
		assert!(connections(&particles, 50.0, 1.0).is_empty());
	}

	#[test]
	fn alpha_fades_linearly() {
		let particles = [at(0.0, 0.0), at(25.0, 0.0), at(0.0, 0.0)];
		let lines = connections(&particles, 50.0, 0.6);

		assert!((lines[0].alpha - 0.3).abs() < 1e-9);
		// coincident particles get full alpha
		assert!((lines[1].alpha - 0.6).abs() < 1e-9);
	}

	#[test]
	fn no_duplicate_or_reversed_pairs() {
		let particles: Vec<_> = (0..12).map(|i| at(i as f64 * 3.0, 0.0)).collect();
		let lines = connections(&particles, 1000.0, 1.0);

		assert_eq!(lines.len(), 12 * 11 / 2);
		assert!(lines.iter().all(|c| c.a < c.b));
	}
}
