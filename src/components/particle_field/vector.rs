//! Small 2D vector value type used by the simulation.
//!
//! `Vec2` is `Copy`, so every arithmetic result is a fresh value and no two
//! particles can ever share (and accidentally co-mutate) a vector.

use std::f64::consts::TAU;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::Rng;

/// A 2D vector in screen space (pixels, y pointing down).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
	/// Horizontal component.
	pub x: f64,
	/// Vertical component.
	pub y: f64,
}

impl Vec2 {
	/// The zero vector.
	pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

	/// Vector from components.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Unit vector pointing at `angle` radians.
	pub fn from_angle(angle: f64) -> Self {
		Self::new(angle.cos(), angle.sin())
	}

	/// Unit vector with a uniformly random direction.
	pub fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> Self {
		Self::from_angle(rng.gen_range(0.0..TAU))
	}

	/// Euclidean length.
	pub fn magnitude(self) -> f64 {
		self.magnitude_squared().sqrt()
	}

	/// Squared length.
	pub fn magnitude_squared(self) -> f64 {
		self.x * self.x + self.y * self.y
	}

	/// Distance to `other`.
	pub fn distance(self, other: Vec2) -> f64 {
		(self - other).magnitude()
	}

	/// Same direction, magnitude 1. The zero vector stays zero.
	pub fn normalized(self) -> Self {
		self.with_magnitude(1.0)
	}

	/// Rescale to exactly `m`, keeping the direction.
	///
	/// A zero-length vector has no direction, so the result is `ZERO`
	/// instead of a NaN pair.
	pub fn with_magnitude(self, m: f64) -> Self {
		let mag = self.magnitude();
		if mag == 0.0 || !mag.is_finite() {
			return Self::ZERO;
		}
		self * (m / mag)
	}

	/// Clamp the magnitude to at most `max`, keeping the direction.
	pub fn limit(self, max: f64) -> Self {
		let mag_sq = self.magnitude_squared();
		if mag_sq > max * max {
			self.with_magnitude(max)
		} else {
			self
		}
	}

	/// Both components finite.
	pub fn is_finite(self) -> bool {
		self.x.is_finite() && self.y.is_finite()
	}
}

impl Add for Vec2 {
	type Output = Vec2;

	fn add(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl AddAssign for Vec2 {
	fn add_assign(&mut self, rhs: Vec2) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl Sub for Vec2 {
	type Output = Vec2;

	fn sub(self, rhs: Vec2) -> Vec2 {
		Vec2::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl SubAssign for Vec2 {
	fn sub_assign(&mut self, rhs: Vec2) {
		self.x -= rhs.x;
		self.y -= rhs.y;
	}
}

impl Mul<f64> for Vec2 {
	type Output = Vec2;

	fn mul(self, rhs: f64) -> Vec2 {
		Vec2::new(self.x * rhs, self.y * rhs)
	}
}

impl MulAssign<f64> for Vec2 {
	fn mul_assign(&mut self, rhs: f64) {
		self.x *= rhs;
		self.y *= rhs;
	}
}

impl Neg for Vec2 {
	type Output = Vec2;

	fn neg(self) -> Vec2 {
		Vec2::new(-self.x, -self.y)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	const EPS: f64 = 1e-9;

	#[test]
	fn arithmetic_returns_fresh_values() {
		let a = Vec2::new(1.0, 2.0);
		let b = Vec2::new(3.0, -1.0);
		let mut c = a + b;
		c *= 2.0;

		assert_eq!(a, Vec2::new(1.0, 2.0));
		assert_eq!(c, Vec2::new(8.0, 2.0));
		assert_eq!(b - a, Vec2::new(2.0, -3.0));
		assert_eq!(-a, Vec2::new(-1.0, -2.0));
	}

	#[test]
	fn with_magnitude_keeps_direction() {
		let v = Vec2::new(3.0, 4.0).with_magnitude(10.0);
		assert!((v.x - 6.0).abs() < EPS);
		assert!((v.y - 8.0).abs() < EPS);
	}

	#[test]
	fn with_magnitude_of_zero_vector_is_zero() {
		let v = Vec2::ZERO.with_magnitude(5.0);
		assert_eq!(v, Vec2::ZERO);
		assert!(v.is_finite());
	}

	#[test]
	fn limit_only_shrinks() {
		let long = Vec2::new(30.0, 40.0).limit(5.0);
		assert!((long.magnitude() - 5.0).abs() < EPS);
		assert!((long.x - 3.0).abs() < EPS);

		let short = Vec2::new(0.3, 0.4);
		assert_eq!(short.limit(5.0), short);
	}

	#[test]
	fn random_unit_has_length_one() {
		let mut rng = SmallRng::seed_from_u64(7);
		for _ in 0..100 {
			let v = Vec2::random_unit(&mut rng);
			assert!((v.magnitude() - 1.0).abs() < EPS);
		}
	}
}
