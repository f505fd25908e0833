//! Individual field particles: force accumulation, integration and edges.

use std::f64::consts::TAU;

use rand::Rng;
use serde::Deserialize;

use super::config::{FieldConfig, PulseConfig};
use super::vector::Vec2;

/// Number of entries in the particle colour palette.
pub const PARTICLE_COLOR_COUNT: usize = 4;

/// What happens when a particle leaves the field bounds.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
	/// Re-enter from the opposite edge.
	#[default]
	Wrap,
	/// Clamp to the edge and reflect the velocity component.
	Bounce,
}

/// Sample `[min, max)`, collapsing to `min` for an empty span.
pub(crate) fn sample_span<R: Rng + ?Sized>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
	if max > min && (max - min).is_finite() { rng.gen_range(min..max) } else { min }
}

/// A single field particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Position in pixels.
	pub position: Vec2,
	/// Velocity, pixels per frame.
	pub velocity: Vec2,
	/// Force accumulated since the last integration.
	pub acceleration: Vec2,
	/// Speed limit applied on integration.
	pub max_speed: f64,
	/// Dot diameter in pixels.
	pub size: f64,
	/// Index into the palette's particle colours.
	pub color_index: usize,
	/// Offset into the pulse cycle.
	pub pulse_phase: f64,
}

impl Particle {
	/// Particle with default size, colour and pulse phase.
	pub fn new(position: Vec2, velocity: Vec2, max_speed: f64) -> Self {
		Self {
			position,
			velocity: velocity.limit(max_speed),
			acceleration: Vec2::ZERO,
			max_speed,
			size: 2.0,
			color_index: 0,
			pulse_phase: 0.0,
		}
	}

	/// Random particle somewhere inside `width` x `height`.
	pub fn random<R: Rng + ?Sized>(
		rng: &mut R,
		config: &FieldConfig,
		width: f64,
		height: f64,
	) -> Self {
		let position = Vec2::new(
			sample_span(rng, (0.0, width)),
			sample_span(rng, (0.0, height)),
		);
		let velocity = Vec2::random_unit(rng) * sample_span(rng, config.initial_speed_range);

		Self {
			size: sample_span(rng, config.size_range),
			color_index: rng.gen_range(0..PARTICLE_COLOR_COUNT),
			pulse_phase: rng.gen_range(0.0..TAU),
			..Self::new(position, velocity, config.max_speed)
		}
	}

	/// Add `force` to this frame's acceleration.
	pub fn apply_force(&mut self, force: Vec2) {
		self.acceleration += force;
	}

	/// Advance one frame. Velocity never exceeds `max_speed` afterwards.
	pub fn integrate(&mut self) {
		self.velocity += self.acceleration;
		self.velocity = self.velocity.limit(self.max_speed);
		self.position += self.velocity;
		self.acceleration = Vec2::ZERO;
	}

	/// Keep the particle inside `width` x `height`.
	pub fn apply_boundary(&mut self, policy: BoundaryPolicy, width: f64, height: f64) {
		match policy {
			BoundaryPolicy::Wrap => {
				self.position.x = wrap(self.position.x, width);
				self.position.y = wrap(self.position.y, height);
			}
			BoundaryPolicy::Bounce => {
				bounce(&mut self.position.x, &mut self.velocity.x, width);
				bounce(&mut self.position.y, &mut self.velocity.y, height);
			}
		}
	}

	/// Pulse factor in `[0, 1]` for the given frame.
	pub fn pulse(&self, frame: u64, pulse: &PulseConfig) -> f64 {
		0.5 + 0.5 * (self.pulse_phase + frame as f64 * pulse.rate).sin()
	}
}

fn wrap(value: f64, extent: f64) -> f64 {
	if value > extent {
		0.0
	} else if value < 0.0 {
		extent
	} else {
		value
	}
}

// Clamp first, then reflect, so a fast particle never ends a frame outside.
fn bounce(value: &mut f64, velocity: &mut f64, extent: f64) {
	if *value < 0.0 {
		*value = 0.0;
		*velocity = velocity.abs();
	} else if *value > extent {
		*value = extent;
		*velocity = -velocity.abs();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	#[test]
	fn integrate_clamps_speed_for_any_force_sequence() {
		let mut rng = SmallRng::seed_from_u64(42);
		let mut p = Particle::new(Vec2::new(50.0, 50.0), Vec2::new(0.5, 0.0), 1.0);

		for _ in 0..500 {
			let force = Vec2::random_unit(&mut rng) * rng.gen_range(0.0..200.0);
			p.apply_force(force);
			p.integrate();
			assert!(p.velocity.magnitude() <= p.max_speed + 1e-9);
			assert_eq!(p.acceleration, Vec2::ZERO);
		}
	}

	#[test]
	fn forces_accumulate_until_integration() {
		let mut p = Particle::new(Vec2::ZERO, Vec2::ZERO, 10.0);
		p.apply_force(Vec2::new(1.0, 0.0));
		p.apply_force(Vec2::new(0.0, 2.0));
		assert_eq!(p.acceleration, Vec2::new(1.0, 2.0));

		p.integrate();
		assert_eq!(p.position, Vec2::new(1.0, 2.0));
		assert_eq!(p.velocity, Vec2::new(1.0, 2.0));
	}

	#[test]
	fn wrap_reenters_from_opposite_edge() {
		let mut p = Particle::new(Vec2::new(101.0, -1.0), Vec2::ZERO, 1.0);
		p.apply_boundary(BoundaryPolicy::Wrap, 100.0, 50.0);
		assert_eq!(p.position, Vec2::new(0.0, 50.0));

		let mut p = Particle::new(Vec2::new(-0.5, 51.0), Vec2::ZERO, 1.0);
		p.apply_boundary(BoundaryPolicy::Wrap, 100.0, 50.0);
		assert_eq!(p.position, Vec2::new(100.0, 0.0));
	}

	#[test]
	fn bounce_clamps_then_reflects() {
		let mut p = Particle::new(Vec2::new(95.0, 10.0), Vec2::ZERO, 100.0);
		p.velocity = Vec2::new(30.0, -20.0);
		p.integrate();
		p.apply_boundary(BoundaryPolicy::Bounce, 100.0, 50.0);

		assert_eq!(p.position, Vec2::new(100.0, 0.0));
		assert_eq!(p.velocity, Vec2::new(-30.0, 20.0));
	}

	#[test]
	fn random_particles_respect_config() {
		let mut rng = SmallRng::seed_from_u64(3);
		let config = FieldConfig::default();
		for _ in 0..200 {
			let p = Particle::random(&mut rng, &config, 640.0, 480.0);
			assert!((0.0..640.0).contains(&p.position.x));
			assert!((0.0..480.0).contains(&p.position.y));
			assert!((1.5..3.0).contains(&p.size));
			assert!(p.velocity.magnitude() < 0.8 + 1e-9);
			assert!(p.color_index < PARTICLE_COLOR_COUNT);
		}
	}

	#[test]
	fn pulse_stays_in_unit_range() {
		let p = Particle {
			pulse_phase: 1.3,
			..Particle::new(Vec2::ZERO, Vec2::ZERO, 1.0)
		};
		let cfg = PulseConfig::default();
		for frame in 0..300 {
			let v = p.pulse(frame, &cfg);
			assert!((0.0..=1.0).contains(&v));
		}
	}
}
