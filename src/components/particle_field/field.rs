//! The particle field: particles, shooting stars and their configuration.
//!
//! A [`ParticleField`] is created once per canvas and mutated each frame by
//! the animation loop. Per frame it resolves the pointer into an
//! [`InteractionMode`], pushes every particle through force, integration and
//! boundary handling, then advances the shooting stars. Drawing is a
//! separate read-only pass (see [`render`](super::render)).

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::{FieldConfig, StarConfig, TierPolicy};
use super::connector::{self, Connection};
use super::interaction::{InteractionMode, PointerState};
use super::particle::Particle;
use super::render::{self, Surface};
use super::shooting_star::{ShootingStar, ShootingStars};
use super::theme::ThemeMode;

/// What a resize did to the particle set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeOutcome {
	/// Bounds changed, particles kept their state.
	Kept,
	/// Particle count changed; the set was rebuilt.
	Reinitialized,
}

/// Particles and shooting stars on a `width` x `height` canvas, plus the
/// seeded RNG every random choice draws from.
pub struct ParticleField {
	config: FieldConfig,
	particles: Vec<Particle>,
	stars: ShootingStars,
	width: f64,
	height: f64,
	frame: u64,
	rng: SmallRng,
}

impl ParticleField {
	/// Field of `config.particle_count` random particles.
	pub fn new(config: FieldConfig, stars: StarConfig, width: f64, height: f64, seed: u64) -> Self {
		let mut field = Self::build(config, stars, width, height, Vec::new(), seed);
		field.spawn_particles();
		field
	}

	/// Field with an explicit particle set. `config.particle_count` is
	/// ignored in favour of `particles.len()`.
	pub fn from_particles(
		config: FieldConfig,
		stars: StarConfig,
		width: f64,
		height: f64,
		particles: Vec<Particle>,
		seed: u64,
	) -> Self {
		let config = config.with_count(particles.len());
		Self::build(config, stars, width, height, particles, seed)
	}

	fn build(
		config: FieldConfig,
		stars: StarConfig,
		width: f64,
		height: f64,
		particles: Vec<Particle>,
		seed: u64,
	) -> Self {
		let mut rng = SmallRng::seed_from_u64(seed);
		let stars = ShootingStars::new(&mut rng, stars);
		Self {
			config,
			particles,
			stars,
			width,
			height,
			frame: 0,
			rng,
		}
	}

	/// Replace the configuration and rebuild the particle set.
	pub fn init(&mut self, config: FieldConfig) {
		self.config = config;
		self.spawn_particles();
		info!(
			"particle-field: initialized {} particles ({}x{})",
			self.particles.len(),
			self.width,
			self.height
		);
	}

	fn spawn_particles(&mut self) {
		let (w, h) = (self.width, self.height);
		let config = &self.config;
		let rng = &mut self.rng;
		self.particles = (0..config.particle_count)
			.map(|_| Particle::random(rng, config, w, h))
			.collect();
	}

	/// Advance the simulation by one frame. `dt` (seconds) only drives the
	/// shooting star spawn timer; particle motion is per frame.
	pub fn step(&mut self, pointer: &PointerState, dt: f64) {
		let mode = InteractionMode::resolve(pointer, &self.config);
		let (w, h, boundary) = (self.width, self.height, self.config.boundary);

		for p in &mut self.particles {
			if let Some(force) = mode.force_at(p.position) {
				p.apply_force(force);
			}
			p.integrate();
			p.apply_boundary(boundary, w, h);
		}

		self.stars.step(&mut self.rng, dt, w, h);
		self.frame = self.frame.wrapping_add(1);
	}

	/// Draw the current state onto `surface`.
	pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, theme: ThemeMode) {
		render::render(self, surface, theme);
	}

	/// Step, then draw the result.
	pub fn advance<S: Surface + ?Sized>(
		&mut self,
		pointer: &PointerState,
		dt: f64,
		surface: &mut S,
		theme: ThemeMode,
	) {
		self.step(pointer, dt);
		self.render(surface, theme);
	}

	/// Adopt new bounds and the configuration `policy` picks for them. The
	/// particle set is only rebuilt when the policy says the change needs it.
	pub fn resize(&mut self, policy: &dyn TierPolicy, width: f64, height: f64) -> ResizeOutcome {
		self.width = width;
		self.height = height;
		let next = policy.select(width, height);

		if policy.requires_reinit(&self.config, &next) {
			debug!(
				"particle-field: resize to {width}x{height}, {} -> {} particles",
				self.config.particle_count, next.particle_count
			);
			self.init(next);
			return ResizeOutcome::Reinitialized;
		}

		debug!("particle-field: resize to {width}x{height}, keeping particles");
		let count = self.config.particle_count;
		self.config = next.with_count(count);
		for p in &mut self.particles {
			p.max_speed = self.config.max_speed;
		}
		ResizeOutcome::Kept
	}

	/// Lines the connector pass would draw this frame.
	pub fn connections(&self) -> Vec<Connection> {
		connector::connections(
			&self.particles,
			self.config.connection_distance,
			self.config.line_alpha,
		)
	}

	/// Current particles.
	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Live shooting stars.
	pub fn stars(&self) -> &[ShootingStar] {
		self.stars.stars()
	}

	/// Active shooting star settings.
	pub fn star_config(&self) -> &StarConfig {
		self.stars.config()
	}

	/// Active field configuration.
	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Field width in pixels.
	pub fn width(&self) -> f64 {
		self.width
	}

	/// Field height in pixels.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Frames stepped so far; drives the pulse animation.
	pub fn frame(&self) -> u64 {
		self.frame
	}
}
