//! Dark/light theming for the particle field.
//!
//! The page owns the theme: it lives on `<body data-theme="...">` and is
//! persisted under the `theme` key in `localStorage`. The field only reads
//! it, once per frame, to pick a [`Palette`].

use log::warn;

use super::particle::PARTICLE_COLOR_COUNT;

const STORAGE_KEY: &str = "theme";
const THEME_ATTR: &str = "data-theme";

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque colour.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Colour with opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same colour with opacity `a`, clamped to `[0, 1]`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	/// CSS colour: hex when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Colours used to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	/// Canvas fill.
	pub background: Color,
	/// Connector stroke; alpha is set per line.
	pub line: Color,
	/// Particle colours, picked by index.
	pub particles: [Color; PARTICLE_COLOR_COUNT],
	/// Shooting star colour.
	pub star: Color,
}

impl Palette {
	/// Particle colour for `index`, wrapping around.
	pub fn particle(&self, index: usize) -> Color {
		self.particles[index % PARTICLE_COLOR_COUNT]
	}
}

// Cyan, magenta, yellow, white.
const PARTICLE_COLORS: [Color; PARTICLE_COLOR_COUNT] = [
	Color::rgb(0, 255, 255),
	Color::rgb(255, 0, 255),
	Color::rgb(255, 255, 0),
	Color::rgb(255, 255, 255),
];

/// Page theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
	/// Dark background, white connector lines.
	#[default]
	Dark,
	/// Light background, black connector lines.
	Light,
}

impl ThemeMode {
	/// Parse a `data-theme`/storage value. Anything unknown is `None`.
	pub fn parse(value: &str) -> Option<Self> {
		match value.trim() {
			"dark" => Some(Self::Dark),
			"light" => Some(Self::Light),
			_ => None,
		}
	}

	/// Value stored in `data-theme` and local storage.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Dark => "dark",
			Self::Light => "light",
		}
	}

	/// The other mode.
	pub fn toggled(self) -> Self {
		match self {
			Self::Dark => Self::Light,
			Self::Light => Self::Dark,
		}
	}

	/// Colours for this mode.
	pub fn palette(self) -> Palette {
		match self {
			Self::Dark => Palette {
				background: Color::rgb(10, 10, 26),
				line: Color::rgb(255, 255, 255),
				particles: PARTICLE_COLORS,
				star: Color::rgb(255, 255, 255),
			},
			Self::Light => Palette {
				background: Color::rgb(245, 247, 250),
				line: Color::rgb(0, 0, 0),
				particles: PARTICLE_COLORS,
				star: Color::rgb(40, 50, 70),
			},
		}
	}
}

fn body() -> Option<web_sys::HtmlElement> {
	web_sys::window()?.document()?.body()
}

fn storage() -> Option<web_sys::Storage> {
	let storage = web_sys::window()?.local_storage().ok().flatten();
	if storage.is_none() {
		warn!("particle-field: localStorage unavailable, theme will not persist");
	}
	storage
}

/// Theme currently set on `<body>`. A missing attribute means dark.
pub fn current_theme() -> ThemeMode {
	body()
		.and_then(|b| b.get_attribute(THEME_ATTR))
		.and_then(|v| ThemeMode::parse(&v))
		.unwrap_or_default()
}

/// Copy the persisted theme (if any) onto `<body>`.
pub fn apply_saved_theme() -> Option<ThemeMode> {
	let saved = storage()?.get_item(STORAGE_KEY).ok().flatten()?;
	let Some(mode) = ThemeMode::parse(&saved) else {
		warn!("particle-field: ignoring unknown saved theme {saved:?}");
		return None;
	};
	let _ = body()?.set_attribute(THEME_ATTR, mode.as_str());
	Some(mode)
}

/// Flip the page theme and persist the new value.
pub fn toggle_theme() -> ThemeMode {
	let next = current_theme().toggled();
	if let Some(b) = body() {
		let _ = b.set_attribute(THEME_ATTR, next.as_str());
	}
	if let Some(s) = storage() {
		let _ = s.set_item(STORAGE_KEY, next.as_str());
	}
	next
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_and_toggle() {
		assert_eq!(ThemeMode::parse("light"), Some(ThemeMode::Light));
		assert_eq!(ThemeMode::parse(" dark "), Some(ThemeMode::Dark));
		assert_eq!(ThemeMode::parse("solarized"), None);
		assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
		assert_eq!(ThemeMode::Light.toggled().as_str(), "dark");
	}

	#[test]
	fn palettes_differ_only_in_theme_colors() {
		let dark = ThemeMode::Dark.palette();
		let light = ThemeMode::Light.palette();
		assert_eq!(dark.background, Color::rgb(10, 10, 26));
		assert_eq!(light.background, Color::rgb(245, 247, 250));
		assert_eq!(dark.line, Color::rgb(255, 255, 255));
		assert_eq!(light.line, Color::rgb(0, 0, 0));
		assert_eq!(dark.particles, light.particles);
		assert_eq!(dark.particle(5), dark.particles[1]);
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(0, 255, 255).to_css(), "#00ffff");
		assert_eq!(
			Color::rgb(255, 0, 0).with_alpha(0.5).to_css(),
			"rgba(255, 0, 0, 0.5)"
		);
		assert_eq!(Color::rgb(1, 2, 3).with_alpha(3.0).a, 1.0);
	}
}
