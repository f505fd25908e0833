//! Drawing the particle field.
//!
//! Rendering goes through the [`Surface`] trait so the field does not care
//! whether it ends up on a canvas or somewhere else. Passes, back to front:
//! 1. Background fill
//! 2. Particles (with pulse)
//! 3. Connector lines between nearby particles
//! 4. Shooting star trails and heads

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::connector::for_each_connection;
use super::field::ParticleField;
use super::shooting_star::ShootingStar;
use super::theme::{Color, Palette, ThemeMode};
use super::vector::Vec2;

/// Drawing primitives the field needs.
pub trait Surface {
	/// Fill the whole surface.
	fn clear(&mut self, color: Color, width: f64, height: f64);
	/// Fill a circle.
	fn fill_circle(&mut self, center: Vec2, radius: f64, color: Color);
	/// Stroke a straight line.
	fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f64);
}

/// [`Surface`] backed by a 2D canvas context.
pub struct CanvasSurface<'a> {
	ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasSurface<'a> {
	/// Wrap a 2D context.
	pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
		Self { ctx }
	}
}

impl Surface for CanvasSurface<'_> {
	fn clear(&mut self, color: Color, width: f64, height: f64) {
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.fill_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, center: Vec2, radius: f64, color: Color) {
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.begin_path();
		let _ = self.ctx.arc(center.x, center.y, radius, 0.0, PI * 2.0);
		self.ctx.fill();
	}

	fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f64) {
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.x, from.y);
		self.ctx.line_to(to.x, to.y);
		self.ctx.stroke();
	}
}

/// Renders one complete frame of `field`.
pub fn render<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S, theme: ThemeMode) {
	let palette = theme.palette();

	surface.clear(palette.background, field.width(), field.height());
	draw_particles(field, surface, &palette);
	draw_connections(field, surface, &palette);
	for star in field.stars() {
		draw_star(field, star, surface, &palette);
	}
}

fn draw_particles<S: Surface + ?Sized>(field: &ParticleField, surface: &mut S, palette: &Palette) {
	let config = field.config();
	for p in field.particles() {
		let color = palette.particle(p.color_index);
		let (alpha, diameter) = match config.pulse {
			Some(ref pulse) => {
				let t = p.pulse(field.frame(), pulse);
				((100.0 + 155.0 * t) / 255.0, p.size * (0.8 + 0.4 * t))
			}
			None => (1.0, p.size),
		};
		surface.fill_circle(p.position, diameter / 2.0, color.with_alpha(alpha));
	}
}

fn draw_connections<S: Surface + ?Sized>(
	field: &ParticleField,
	surface: &mut S,
	palette: &Palette,
) {
	let config = field.config();
	let particles = field.particles();
	for_each_connection(
		particles,
		config.connection_distance,
		config.line_alpha,
		|c| {
			surface.line(
				particles[c.a].position,
				particles[c.b].position,
				palette.line.with_alpha(c.alpha),
				config.line_width,
			);
		},
	);
}

fn draw_star<S: Surface + ?Sized>(
	field: &ParticleField,
	star: &ShootingStar,
	surface: &mut S,
	palette: &Palette,
) {
	let stars = field.star_config();
	let trail = star.history();
	let len = trail.len();
	// Alpha ramps up from the oldest segment to the newest.
	for (i, (from, to)) in trail.iter().zip(trail.iter().skip(1)).enumerate() {
		let alpha = (i + 1) as f64 / len as f64;
		surface.line(*from, *to, palette.star.with_alpha(alpha), stars.trail_width);
	}
	if let Some(head) = star.head() {
		surface.fill_circle(head, stars.head_size, palette.star);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::particle_field::config::{FieldConfig, PulseConfig, StarConfig};
	use crate::components::particle_field::particle::Particle;

	/// Records primitives instead of drawing them.
	#[derive(Default)]
	pub struct RecordingSurface {
		pub clears: Vec<Color>,
		pub circles: Vec<(Vec2, f64, Color)>,
		pub lines: Vec<(Vec2, Vec2, Color, f64)>,
	}

	impl Surface for RecordingSurface {
		fn clear(&mut self, color: Color, _width: f64, _height: f64) {
			self.clears.push(color);
		}

		fn fill_circle(&mut self, center: Vec2, radius: f64, color: Color) {
			self.circles.push((center, radius, color));
		}

		fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f64) {
			self.lines.push((from, to, color, width));
		}
	}

	fn field_with(positions: &[(f64, f64)], pulse: Option<PulseConfig>) -> ParticleField {
		let particles = positions
			.iter()
			.map(|&(x, y)| Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.0))
			.collect();
		let config = FieldConfig {
			connection_distance: 50.0,
			pulse,
			..FieldConfig::default()
		};
		ParticleField::from_particles(config, StarConfig::disabled(), 400.0, 400.0, particles, 1)
	}

	#[test]
	fn draws_background_particles_and_lines() {
		let field = field_with(&[(0.0, 0.0), (10.0, 0.0), (200.0, 200.0)], None);
		let mut surface = RecordingSurface::default();
		field.render(&mut surface, ThemeMode::Dark);

		assert_eq!(surface.clears, vec![Color::rgb(10, 10, 26)]);
		assert_eq!(surface.circles.len(), 3);
		assert_eq!(surface.lines.len(), 1);
		let (_, _, color, width) = surface.lines[0];
		assert_eq!((color.r, color.g, color.b), (255, 255, 255));
		assert!((color.a - 150.0 / 255.0 * 0.8).abs() < 1e-9);
		assert_eq!(width, 0.5);
	}

	#[test]
	fn light_theme_uses_dark_lines() {
		let field = field_with(&[(0.0, 0.0), (10.0, 0.0)], None);
		let mut surface = RecordingSurface::default();
		field.render(&mut surface, ThemeMode::Light);

		assert_eq!(surface.clears, vec![Color::rgb(245, 247, 250)]);
		let (_, _, color, _) = surface.lines[0];
		assert_eq!((color.r, color.g, color.b), (0, 0, 0));
	}

	#[test]
	fn pulse_scales_alpha_and_size() {
		let field = field_with(&[(5.0, 5.0)], Some(PulseConfig::default()));
		let mut surface = RecordingSurface::default();
		field.render(&mut surface, ThemeMode::Dark);

		let (_, radius, color) = surface.circles[0];
		// phase 0, frame 0: pulse = 0.5
		assert!((color.a - 177.5 / 255.0).abs() < 1e-9);
		assert!((radius - 2.0 * 1.0 / 2.0).abs() < 1e-9);
	}
}
