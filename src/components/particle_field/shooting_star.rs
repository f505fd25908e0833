//! Shooting stars: short-lived streaks with a fading trail.
//!
//! Stars spawn in the upper part of the viewport, fly along a fixed diagonal
//! and expire once they pass the right or bottom edge plus a margin. Spawn
//! attempts come from a frame-driven [`SpawnTimer`] and are admitted only
//! while fewer than `cap` stars are alive.

use std::collections::VecDeque;

use rand::Rng;

use super::config::StarConfig;
use super::particle::sample_span;
use super::vector::Vec2;

/// Direction every star travels in: right and down.
const HEADING: Vec2 = Vec2 { x: 0.8, y: 0.6 };

/// A single shooting star.
#[derive(Clone, Debug)]
pub struct ShootingStar {
	/// Head position.
	pub position: Vec2,
	/// Pixels per frame along the heading.
	pub speed: f64,
	heading: Vec2,
	history: VecDeque<Vec2>,
	capacity: usize,
}

impl ShootingStar {
	/// Star at `position` with an empty trail of up to `trail_length` points.
	pub fn new(position: Vec2, speed: f64, trail_length: usize) -> Self {
		let capacity = trail_length.max(1);
		Self {
			position,
			speed,
			heading: HEADING.normalized(),
			history: VecDeque::with_capacity(capacity + 1),
			capacity,
		}
	}

	/// Random star in the upper band of the viewport.
	pub fn spawn<R: Rng + ?Sized>(
		rng: &mut R,
		config: &StarConfig,
		width: f64,
		height: f64,
	) -> Self {
		// Squaring biases spawns toward the top of the band.
		let band = rng.gen_range(0.0..1.0f64);
		let position = Vec2::new(
			sample_span(rng, (0.0, width)),
			band * band * height * config.upper_fraction,
		);
		Self::new(position, sample_span(rng, config.speed_range), config.trail_length)
	}

	/// Per-frame displacement.
	pub fn velocity(&self) -> Vec2 {
		self.heading * self.speed
	}

	/// Advance one frame and record the new position, evicting the oldest
	/// trail entry once the trail is full.
	pub fn update(&mut self) {
		self.position += self.velocity();
		self.history.push_back(self.position);
		while self.history.len() > self.capacity {
			self.history.pop_front();
		}
	}

	/// Past the right or bottom edge by more than `margin`.
	pub fn is_expired(&self, width: f64, height: f64, margin: f64) -> bool {
		self.position.x > width + margin || self.position.y > height + margin
	}

	/// Trail positions, oldest first.
	pub fn history(&self) -> &VecDeque<Vec2> {
		&self.history
	}

	/// Newest trail point.
	pub fn head(&self) -> Option<Vec2> {
		self.history.back().copied()
	}

	/// Maximum trail length.
	pub fn trail_capacity(&self) -> usize {
		self.capacity
	}
}

/// Countdown to the next spawn attempt, re-armed with a random interval.
#[derive(Clone, Debug)]
pub struct SpawnTimer {
	remaining: f64,
	interval: (f64, f64),
}

impl SpawnTimer {
	/// Timer armed with a random first interval.
	pub fn new<R: Rng + ?Sized>(rng: &mut R, interval: (f64, f64)) -> Self {
		Self {
			remaining: sample_span(rng, interval),
			interval,
		}
	}

	/// Advance by `dt` seconds. Returns `true` when the timer fires.
	pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, dt: f64) -> bool {
		self.remaining -= dt;
		if self.remaining > 0.0 {
			return false;
		}
		self.remaining = sample_span(rng, self.interval);
		true
	}
}

/// The set of live shooting stars plus their spawn policy.
#[derive(Clone, Debug)]
pub struct ShootingStars {
	config: StarConfig,
	timer: SpawnTimer,
	stars: Vec<ShootingStar>,
}

impl ShootingStars {
	/// No stars yet; the first spawn waits for the timer.
	pub fn new<R: Rng + ?Sized>(rng: &mut R, config: StarConfig) -> Self {
		Self {
			timer: SpawnTimer::new(rng, config.spawn_interval),
			stars: Vec::with_capacity(config.cap),
			config,
		}
	}

	/// Advance every star, drop the expired ones, then maybe spawn.
	pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R, dt: f64, width: f64, height: f64) {
		let margin = self.config.offscreen_margin;
		for star in &mut self.stars {
			star.update();
		}
		self.stars.retain(|s| !s.is_expired(width, height, margin));

		if !self.config.enabled {
			return;
		}
		if self.timer.tick(rng, dt) && self.stars.len() < self.config.cap {
			self.stars.push(ShootingStar::spawn(rng, &self.config, width, height));
		}
	}

	/// Live stars, oldest first.
	pub fn stars(&self) -> &[ShootingStar] {
		&self.stars
	}

	/// Spawn settings.
	pub fn config(&self) -> &StarConfig {
		&self.config
	}

	/// Number of live stars.
	pub fn len(&self) -> usize {
		self.stars.len()
	}

	/// Whether no star is alive.
	pub fn is_empty(&self) -> bool {
		self.stars.is_empty()
	}

	/// Drop every live star.
	pub fn clear(&mut self) {
		self.stars.clear();
	}
}
