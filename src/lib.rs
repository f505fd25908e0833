//! particle-field: Animated particle background for a portfolio page.
//!
//! This crate provides a WASM-based canvas component that renders a drifting
//! particle field with pointer interaction, proximity lines and shooting
//! stars, following the page's dark/light theme.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{
	AreaScaled, FieldConfig, ParticleField, ParticleFieldCanvas, PointerState, StarConfig, Surface,
	ThemeMode, TierPolicy, TierTable, Vec2,
};

use components::particle_field::theme;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-field: logging initialized");
}

/// Load tier presets from a script element with id="particle-config".
/// Expected format: JSON matching [`TierTable`]; omitted fields keep defaults.
fn load_tier_table() -> TierTable {
	let Some(json_text) = config_script_text() else {
		return TierTable::default();
	};

	match TierTable::from_json(&json_text) {
		Ok(table) => {
			info!(
				"particle-field: loaded tiers ({} / {} / {} particles)",
				table.mobile.particle_count,
				table.tablet.particle_count,
				table.desktop.particle_count
			);
			table
		}
		Err(e) => {
			warn!("particle-field: {}, using default tiers", e);
			TierTable::default()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Flip the page between dark and light and persist the choice.
/// Returns the new theme name for the caller to update its toggle icon.
#[wasm_bindgen(js_name = toggleTheme)]
pub fn toggle_theme() -> String {
	theme::toggle_theme().as_str().to_string()
}

/// Main application component.
/// Restores the saved theme and renders the particle background.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	if let Some(mode) = theme::apply_saved_theme() {
		info!("particle-field: restored {} theme", mode.as_str());
	}
	let tiers = load_tier_table();
	let stars = tiers.stars.clone();
	let policy: Rc<dyn TierPolicy> = Rc::new(tiers);

	view! {
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div id="canvas-bg" class="canvas-bg">
			<ParticleFieldCanvas policy=policy stars=stars fullscreen=true shooting_stars=true />
		</div>
	}
}
