//! Pointer interaction: repulsion by default, attraction while captured.
//!
//! The mode is resolved once per frame into an [`InteractionMode`] and then
//! applied uniformly to every particle, so a particle feels at most one
//! pointer force per frame.

use super::config::FieldConfig;
use super::vector::Vec2;

/// Pointer input as last reported by the host. Last value wins.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
	/// `None` while the pointer is outside the page.
	pub position: Option<Vec2>,
	/// Pointer held down.
	pub captured: bool,
}

impl PointerState {
	/// Pointer at `(x, y)`, not held.
	pub fn at(x: f64, y: f64) -> Self {
		Self {
			position: Some(Vec2::new(x, y)),
			captured: false,
		}
	}

	/// Same position with the given held state.
	pub fn captured(self, captured: bool) -> Self {
		Self { captured, ..self }
	}
}

/// Per-frame pointer force, resolved from [`PointerState`] and config.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InteractionMode {
	/// No pointer on the page.
	None,
	/// Push particles away from `origin`.
	Repel {
		/// Pointer position.
		origin: Vec2,
		/// Reach of the force.
		radius: f64,
		/// Force at the pointer.
		strength: f64,
	},
	/// Pull particles toward `origin`.
	Attract {
		/// Pointer position.
		origin: Vec2,
		/// Lower distance clamp.
		min_distance: f64,
		/// Upper distance clamp.
		max_distance: f64,
		/// Force numerator.
		gain: f64,
	},
}

impl InteractionMode {
	/// Pick the mode for this frame.
	pub fn resolve(pointer: &PointerState, config: &FieldConfig) -> Self {
		let Some(origin) = pointer.position else {
			return Self::None;
		};
		match (&config.attraction, pointer.captured) {
			(Some(a), true) => Self::Attract {
				origin,
				min_distance: a.min_distance,
				max_distance: a.max_distance,
				gain: a.gain,
			},
			_ => Self::Repel {
				origin,
				radius: config.repulsion_radius,
				strength: config.repulsion_strength,
			},
		}
	}

	/// Force on a particle at `position`, or `None` when nothing applies.
	pub fn force_at(&self, position: Vec2) -> Option<Vec2> {
		match *self {
			Self::None => None,
			Self::Repel {
				origin,
				radius,
				strength,
			} => repel(position, origin, radius, strength),
			Self::Attract {
				origin,
				min_distance,
				max_distance,
				gain,
			} => attract(position, origin, min_distance, max_distance, gain),
		}
	}
}

/// Push away from `pointer`, falling off linearly to zero at `radius`.
///
/// A particle exactly on the pointer has no defined direction and gets no
/// force.
pub fn repel(position: Vec2, pointer: Vec2, radius: f64, strength: f64) -> Option<Vec2> {
	let offset = position - pointer;
	let d = offset.magnitude();
	if d >= radius || d == 0.0 {
		return None;
	}
	Some(offset.with_magnitude(strength * (radius - d) / radius))
}

/// Pull toward `pointer` with `gain / d²`, `d` clamped to the given range.
/// Bounds given in the wrong order are swapped.
pub fn attract(
	position: Vec2,
	pointer: Vec2,
	min_distance: f64,
	max_distance: f64,
	gain: f64,
) -> Option<Vec2> {
	let offset = pointer - position;
	let d = offset.magnitude();
	if d == 0.0 {
		return None;
	}
	let (lo, hi) = if min_distance <= max_distance {
		(min_distance, max_distance)
	} else {
		(max_distance, min_distance)
	};
	let d = d.max(lo).min(hi);
	Some(offset.with_magnitude(gain / (d * d)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::config::AttractionConfig;

	const EPS: f64 = 1e-9;

	#[test]
	fn repel_is_zero_at_and_beyond_radius() {
		let pointer = Vec2::new(100.0, 100.0);
		assert!(repel(Vec2::new(180.0, 100.0), pointer, 80.0, 50.0).is_none());
		assert!(repel(Vec2::new(300.0, 100.0), pointer, 80.0, 50.0).is_none());
	}

	#[test]
	fn repel_points_away_with_linear_falloff() {
		let pointer = Vec2::new(0.0, 0.0);
		let f = repel(Vec2::new(20.0, 0.0), pointer, 80.0, 50.0).unwrap();
		assert!((f.x - 50.0 * 60.0 / 80.0).abs() < EPS);
		assert!(f.y.abs() < EPS);
	}

	#[test]
	fn repel_is_monotonic_in_distance() {
		let pointer = Vec2::new(10.0, 10.0);
		let mut previous = f64::INFINITY;
		for step in 1..80 {
			let d = step as f64;
			let f = repel(Vec2::new(10.0 + d, 10.0), pointer, 80.0, 50.0)
				.map(Vec2::magnitude)
				.unwrap_or(0.0);
			assert!(f <= previous);
			previous = f;
		}
	}

	#[test]
	fn pointer_on_particle_gives_no_force() {
		let p = Vec2::new(5.0, 5.0);
		assert!(repel(p, p, 80.0, 50.0).is_none());
		assert!(attract(p, p, 5.0, 25.0, 50.0).is_none());
	}

	#[test]
	fn attract_clamps_distance() {
		let pointer = Vec2::ZERO;
		let near = attract(Vec2::new(1.0, 0.0), pointer, 5.0, 25.0, 50.0).unwrap();
		assert!((near.magnitude() - 50.0 / 25.0).abs() < EPS);
		assert!(near.x < 0.0);

		let far = attract(Vec2::new(0.0, 500.0), pointer, 5.0, 25.0, 50.0).unwrap();
		assert!((far.magnitude() - 50.0 / 625.0).abs() < EPS);
		assert!(far.y < 0.0);
	}

	#[test]
	fn attract_tolerates_swapped_bounds() {
		let pointer = Vec2::ZERO;
		let swapped = attract(Vec2::new(1.0, 0.0), pointer, 25.0, 5.0, 50.0).unwrap();
		let ordered = attract(Vec2::new(1.0, 0.0), pointer, 5.0, 25.0, 50.0).unwrap();
		assert_eq!(swapped, ordered);
	}

	#[test]
	fn mode_resolution() {
		let mut config = FieldConfig::default();
		let absent = PointerState::default();
		assert_eq!(InteractionMode::resolve(&absent, &config), InteractionMode::None);

		let held = PointerState::at(1.0, 2.0).captured(true);
		assert!(matches!(
			InteractionMode::resolve(&held, &config),
			InteractionMode::Repel { .. }
		));

		config.attraction = Some(AttractionConfig::default());
		assert!(matches!(
			InteractionMode::resolve(&held, &config),
			InteractionMode::Attract { .. }
		));
		assert!(matches!(
			InteractionMode::resolve(&held.captured(false), &config),
			InteractionMode::Repel { .. }
		));
	}
}
