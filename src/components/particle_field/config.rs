//! Field configuration and viewport tier policies.
//!
//! A [`FieldConfig`] bundles every tunable of the simulation. Which bundle is
//! active is decided by a [`TierPolicy`] from the viewport size: the default
//! [`TierTable`] maps width/orientation breakpoints onto mobile, tablet and
//! desktop presets, while [`AreaScaled`] derives the particle count from the
//! viewport area.
//!
//! All configuration types deserialize from JSON with per-field defaults, so
//! a page only needs to spell out the values it wants to change.

use serde::Deserialize;
use thiserror::Error;

use super::particle::BoundaryPolicy;

/// Errors produced while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Config text is not valid JSON for the expected shape.
	#[error("failed to parse particle config: {0}")]
	Parse(#[from] serde_json::Error),
	/// Config parsed but holds an unusable value.
	#[error("invalid particle config: {0}")]
	Invalid(String),
}

fn invalid(msg: impl Into<String>) -> ConfigError {
	ConfigError::Invalid(msg.into())
}

fn check_span(name: &str, (min, max): (f64, f64)) -> Result<(), ConfigError> {
	if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
		return Err(invalid(format!("{name} must satisfy 0 <= min <= max, got ({min}, {max})")));
	}
	Ok(())
}

/// Pointer attraction, engaged while the pointer is held down.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AttractionConfig {
	/// Distances below this are treated as this value (caps the force).
	pub min_distance: f64,
	/// Distances above this are treated as this value (floors the force).
	pub max_distance: f64,
	/// Numerator of the inverse-square force.
	pub gain: f64,
}

impl Default for AttractionConfig {
	fn default() -> Self {
		Self {
			min_distance: 5.0,
			max_distance: 25.0,
			gain: 50.0,
		}
	}
}

/// Per-particle pulsing of opacity and dot size.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PulseConfig {
	/// Phase advance per frame, in radians.
	pub rate: f64,
}

impl Default for PulseConfig {
	fn default() -> Self {
		Self { rate: 0.05 }
	}
}

/// Complete parameter bundle for one particle field.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Number of particles to spawn.
	pub particle_count: usize,
	/// Pairs closer than this get a connecting line.
	pub connection_distance: f64,
	/// Pointer repulsion reaches this far, in pixels.
	pub repulsion_radius: f64,
	/// Repulsion force right at the pointer; falls off linearly to the radius.
	pub repulsion_strength: f64,
	/// Per-particle speed limit, pixels per frame.
	pub max_speed: f64,
	/// What happens at the field edges.
	pub boundary: BoundaryPolicy,
	/// `None` keeps the field repel-only even while the pointer is held.
	pub attraction: Option<AttractionConfig>,
	/// Particle dot size range `[min, max)`.
	pub size_range: (f64, f64),
	/// Initial speed range `[min, max)`; direction is uniform.
	pub initial_speed_range: (f64, f64),
	/// `None` draws every particle at full size and opacity.
	pub pulse: Option<PulseConfig>,
	/// Connector alpha at distance zero, fading linearly to 0.
	pub line_alpha: f64,
	/// Connector stroke width.
	pub line_width: f64,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			particle_count: 150,
			connection_distance: 120.0,
			repulsion_radius: 80.0,
			repulsion_strength: 50.0,
			max_speed: 1.0,
			boundary: BoundaryPolicy::Wrap,
			attraction: None,
			size_range: (1.5, 3.0),
			initial_speed_range: (0.2, 0.8),
			pulse: Some(PulseConfig::default()),
			line_alpha: 150.0 / 255.0,
			line_width: 0.5,
		}
	}
}

impl FieldConfig {
	/// Same config with a different particle count.
	pub fn with_count(self, particle_count: usize) -> Self {
		Self {
			particle_count,
			..self
		}
	}

	/// Reject values the simulation cannot use.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !(self.connection_distance > 0.0) {
			return Err(invalid("connection_distance must be positive"));
		}
		if !(self.max_speed > 0.0) {
			return Err(invalid("max_speed must be positive"));
		}
		if !(self.repulsion_radius > 0.0) {
			return Err(invalid("repulsion_radius must be positive"));
		}
		if !(self.repulsion_strength >= 0.0) {
			return Err(invalid("repulsion_strength must not be negative"));
		}
		if !(0.0..=1.0).contains(&self.line_alpha) {
			return Err(invalid("line_alpha must be within [0, 1]"));
		}
		check_span("size_range", self.size_range)?;
		check_span("initial_speed_range", self.initial_speed_range)?;
		if let Some(ref a) = self.attraction {
			if !(a.min_distance > 0.0) || a.min_distance > a.max_distance {
				return Err(invalid("attraction needs 0 < min_distance <= max_distance"));
			}
			if !(a.gain >= 0.0) {
				return Err(invalid("attraction gain must not be negative"));
			}
		}
		Ok(())
	}
}

/// Shooting star spawning and motion.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarConfig {
	/// Whether new stars spawn at all.
	pub enabled: bool,
	/// Maximum number of stars alive at once.
	pub cap: usize,
	/// Number of trailing positions kept per star.
	pub trail_length: usize,
	/// Pixels per frame, `[min, max)`.
	pub speed_range: (f64, f64),
	/// Seconds between spawn attempts, `[min, max)`.
	pub spawn_interval: (f64, f64),
	/// Stars spawn in the top `upper_fraction` of the viewport.
	pub upper_fraction: f64,
	/// How far past the right/bottom edge a star travels before it expires.
	pub offscreen_margin: f64,
	/// Radius of the star head.
	pub head_size: f64,
	/// Stroke width of the trail.
	pub trail_width: f64,
}

impl Default for StarConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			cap: 3,
			trail_length: 20,
			speed_range: (6.0, 12.0),
			spawn_interval: (1.5, 4.0),
			upper_fraction: 1.0 / 3.0,
			offscreen_margin: 50.0,
			head_size: 2.0,
			trail_width: 1.5,
		}
	}
}

impl StarConfig {
	/// Default star settings with spawning switched off.
	pub fn disabled() -> Self {
		Self {
			enabled: false,
			..Self::default()
		}
	}

	/// Reject values the spawner cannot use.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.enabled && self.cap == 0 {
			return Err(invalid("star cap must be at least 1 when stars are enabled"));
		}
		if self.trail_length == 0 {
			return Err(invalid("star trail_length must be at least 1"));
		}
		check_span("star speed_range", self.speed_range)?;
		check_span("star spawn_interval", self.spawn_interval)?;
		if !(0.0..=1.0).contains(&self.upper_fraction) {
			return Err(invalid("star upper_fraction must be within [0, 1]"));
		}
		Ok(())
	}
}

/// Maps a viewport size to a field configuration.
pub trait TierPolicy {
	/// Configuration for a `width` x `height` viewport.
	fn select(&self, width: f64, height: f64) -> FieldConfig;

	/// Whether moving from `current` to `next` needs a fresh particle set.
	fn requires_reinit(&self, current: &FieldConfig, next: &FieldConfig) -> bool {
		current.particle_count != next.particle_count
	}
}

/// Device class derived from viewport breakpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceTier {
	/// Narrow viewports.
	Mobile,
	/// Mid-width or portrait viewports.
	Tablet,
	/// Everything wider.
	Desktop,
}

/// Breakpoint table with one preset per [`DeviceTier`].
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TierTable {
	/// Widest viewport still treated as mobile.
	pub mobile_max_width: f64,
	/// Widest landscape viewport still treated as a tablet.
	pub tablet_max_width: f64,
	/// Portrait viewports up to this width still count as tablets.
	pub portrait_tablet_max_width: f64,
	/// Preset for [`DeviceTier::Mobile`].
	pub mobile: FieldConfig,
	/// Preset for [`DeviceTier::Tablet`].
	pub tablet: FieldConfig,
	/// Preset for [`DeviceTier::Desktop`].
	pub desktop: FieldConfig,
	/// Shooting star settings, shared by every tier.
	pub stars: StarConfig,
}

impl Default for TierTable {
	fn default() -> Self {
		let desktop = FieldConfig::default().with_count(400);
		Self {
			mobile_max_width: 768.0,
			tablet_max_width: 1024.0,
			portrait_tablet_max_width: 1200.0,
			mobile: FieldConfig {
				particle_count: 80,
				connection_distance: 90.0,
				repulsion_radius: 60.0,
				..desktop.clone()
			},
			tablet: FieldConfig {
				particle_count: 150,
				connection_distance: 110.0,
				repulsion_radius: 70.0,
				..desktop.clone()
			},
			desktop,
			stars: StarConfig::default(),
		}
	}
}

impl TierTable {
	/// Parse and validate a table; omitted fields keep their defaults.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		let table: TierTable = serde_json::from_str(json)?;
		table.validate()?;
		Ok(table)
	}

	/// Check breakpoint ordering and every preset.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !(self.mobile_max_width > 0.0)
			|| self.mobile_max_width > self.tablet_max_width
			|| self.tablet_max_width > self.portrait_tablet_max_width
		{
			return Err(invalid(
				"breakpoints must ascend: mobile <= tablet <= portrait tablet",
			));
		}
		self.mobile.validate()?;
		self.tablet.validate()?;
		self.desktop.validate()?;
		self.stars.validate()
	}

	/// Device class for a viewport.
	pub fn classify(&self, width: f64, height: f64) -> DeviceTier {
		if width <= self.mobile_max_width {
			DeviceTier::Mobile
		} else if width <= self.tablet_max_width
			|| (height > width && width <= self.portrait_tablet_max_width)
		{
			DeviceTier::Tablet
		} else {
			DeviceTier::Desktop
		}
	}

	/// Preset for `tier`.
	pub fn config(&self, tier: DeviceTier) -> &FieldConfig {
		match tier {
			DeviceTier::Mobile => &self.mobile,
			DeviceTier::Tablet => &self.tablet,
			DeviceTier::Desktop => &self.desktop,
		}
	}
}

impl TierPolicy for TierTable {
	fn select(&self, width: f64, height: f64) -> FieldConfig {
		self.config(self.classify(width, height)).clone()
	}
}

/// Scales the particle count with viewport area relative to a reference
/// screen, keeping particle density roughly constant.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AreaScaled {
	/// Settings shared by every viewport size.
	pub base: FieldConfig,
	/// Particle count on the reference screen.
	pub base_count: usize,
	/// Reference screen width.
	pub base_width: f64,
	/// Reference screen height.
	pub base_height: f64,
	/// Relative count drift tolerated before the field is rebuilt.
	pub tolerance: f64,
}

impl Default for AreaScaled {
	fn default() -> Self {
		Self {
			base: FieldConfig::default(),
			base_count: 150,
			base_width: 1920.0,
			base_height: 1080.0,
			tolerance: 0.2,
		}
	}
}

impl AreaScaled {
	/// Particle count for a viewport, never below one.
	pub fn count_for(&self, width: f64, height: f64) -> usize {
		let ratio = (width * height) / (self.base_width * self.base_height);
		let count = (self.base_count as f64 * ratio).floor();
		if count.is_finite() { (count as usize).max(1) } else { 1 }
	}
}

impl TierPolicy for AreaScaled {
	fn select(&self, width: f64, height: f64) -> FieldConfig {
		self.base.clone().with_count(self.count_for(width, height))
	}

	fn requires_reinit(&self, current: &FieldConfig, next: &FieldConfig) -> bool {
		let (cur, new) = (current.particle_count as f64, next.particle_count as f64);
		(new - cur).abs() > cur * self.tolerance
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_tiers_match_breakpoints() {
		let tiers = TierTable::default();
		assert_eq!(tiers.classify(375.0, 812.0), DeviceTier::Mobile);
		assert_eq!(tiers.classify(768.0, 1024.0), DeviceTier::Mobile);
		assert_eq!(tiers.classify(1000.0, 700.0), DeviceTier::Tablet);
		assert_eq!(tiers.classify(1300.0, 800.0), DeviceTier::Desktop);

		assert_eq!(tiers.select(375.0, 812.0).particle_count, 80);
		assert_eq!(tiers.select(1000.0, 700.0).particle_count, 150);
		assert_eq!(tiers.select(1920.0, 1080.0).particle_count, 400);
	}

	#[test]
	fn portrait_widens_tablet_tier() {
		let tiers = TierTable::default();
		assert_eq!(tiers.classify(1100.0, 1400.0), DeviceTier::Tablet);
		assert_eq!(tiers.classify(1100.0, 800.0), DeviceTier::Desktop);
	}

	#[test]
	fn table_requires_reinit_only_on_count_change() {
		let tiers = TierTable::default();
		let a = tiers.select(1300.0, 800.0);
		let b = tiers.select(1400.0, 800.0);
		let c = tiers.select(375.0, 800.0);
		assert!(!tiers.requires_reinit(&a, &b));
		assert!(tiers.requires_reinit(&a, &c));
	}

	#[test]
	fn area_scaled_count_and_tolerance() {
		let policy = AreaScaled::default();
		assert_eq!(policy.count_for(1920.0, 1080.0), 150);
		assert_eq!(policy.count_for(960.0, 1080.0), 75);
		assert_eq!(policy.count_for(1.0, 1.0), 1);

		let current = policy.select(1920.0, 1080.0);
		let slightly_smaller = policy.select(1800.0, 1080.0);
		let half = policy.select(960.0, 1080.0);
		assert!(!policy.requires_reinit(&current, &slightly_smaller));
		assert!(policy.requires_reinit(&current, &half));
	}

	#[test]
	fn json_fills_missing_fields_with_defaults() {
		let json = r#"{
			"mobile": { "particle_count": 40, "boundary": "bounce" },
			"stars": { "cap": 5 }
		}"#;
		let tiers = TierTable::from_json(json).unwrap();
		assert_eq!(tiers.mobile.particle_count, 40);
		assert_eq!(tiers.mobile.boundary, BoundaryPolicy::Bounce);
		assert_eq!(tiers.mobile.connection_distance, 120.0);
		assert_eq!(tiers.stars.cap, 5);
		assert_eq!(tiers.stars.trail_length, 20);
		assert_eq!(tiers.desktop.particle_count, 400);
	}

	#[test]
	fn json_with_attraction() {
		let json = r#"{ "desktop": { "attraction": { "gain": 80.0 } } }"#;
		let tiers = TierTable::from_json(json).unwrap();
		let attraction = tiers.desktop.attraction.unwrap();
		assert_eq!(attraction.gain, 80.0);
		assert_eq!(attraction.min_distance, 5.0);
	}

	#[test]
	fn rejects_malformed_json() {
		let err = TierTable::from_json("{ not json").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[test]
	fn rejects_invalid_values() {
		let err = TierTable::from_json(r#"{ "tablet": { "connection_distance": 0 } }"#)
			.unwrap_err();
		assert!(matches!(err, ConfigError::Invalid(_)));

		let err = TierTable::from_json(r#"{ "mobile_max_width": 2000 }"#).unwrap_err();
		assert!(matches!(err, ConfigError::Invalid(_)));

		let err = TierTable::from_json(r#"{ "stars": { "cap": 0 } }"#).unwrap_err();
		assert!(matches!(err, ConfigError::Invalid(_)));

		let err = TierTable::from_json(
			r#"{ "desktop": { "attraction": { "min_distance": 30, "max_distance": 10 } } }"#,
		)
		.unwrap_err();
		assert!(matches!(err, ConfigError::Invalid(_)));
	}
}
