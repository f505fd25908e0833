//! Animated particle background.
//!
//! Renders a field of drifting particles on an HTML canvas with:
//! - Pointer repulsion, or attraction while the pointer is held
//! - Faded lines between particles that drift close to each other
//! - Wrap-around or bouncing field edges
//! - Occasional shooting stars with fading trails
//! - Dark/light palettes following the page theme
//! - Viewport-tiered presets that rebuild the field only when the tier changes
//!
//! The simulation ([`ParticleField`]) is plain Rust and draws through the
//! [`Surface`] trait; [`ParticleFieldCanvas`] hosts it in the browser.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use particle_field::{AreaScaled, ParticleFieldCanvas, TierPolicy};
//!
//! let policy: Rc<dyn TierPolicy> = Rc::new(AreaScaled::default());
//! view! { <ParticleFieldCanvas policy=policy shooting_stars=true /> }
//! ```

mod component;
pub mod config;
pub mod connector;
pub mod field;
pub mod interaction;
pub mod particle;
pub mod render;
pub mod shooting_star;
pub mod theme;
pub mod vector;

pub use component::ParticleFieldCanvas;
pub use config::{
	AreaScaled, AttractionConfig, ConfigError, DeviceTier, FieldConfig, PulseConfig, StarConfig,
	TierPolicy, TierTable,
};
pub use connector::Connection;
pub use field::{ParticleField, ResizeOutcome};
pub use interaction::{InteractionMode, PointerState};
pub use particle::{BoundaryPolicy, Particle};
pub use render::{CanvasSurface, Surface};
pub use shooting_star::{ShootingStar, ShootingStars, SpawnTimer};
pub use theme::{Color, Palette, ThemeMode};
pub use vector::Vec2;
