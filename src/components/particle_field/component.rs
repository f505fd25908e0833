//! Leptos component wrapping the particle field canvas.
//!
//! The component creates an HTML canvas element, builds a [`ParticleField`]
//! for the current viewport and drives it from `requestAnimationFrame`.
//! Pointer and resize input arrive through window/document listeners and are
//! stored as plain state that the next frame reads.
//!
//! Everything acquired from the browser (the frame callback and every
//! listener) is owned by one [`AnimationLoop`]. Dropping it cancels the
//! pending frame and detaches the listeners; the component drops it when its
//! scope is cleaned up.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent, Window,
};

use super::config::{StarConfig, TierPolicy, TierTable};
use super::field::{ParticleField, ResizeOutcome};
use super::interaction::PointerState;
use super::render::CanvasSurface;
use super::theme::current_theme;
use super::vector::Vec2;

/// Frame time assumed for the first frame, in seconds.
const DEFAULT_DT: f64 = 1.0 / 60.0;
/// Upper bound on frame time so a backgrounded tab does not burst-spawn.
const MAX_DT: f64 = 0.1;
const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

/// Field plus the input state the frame loop reads.
struct FieldContext {
	field: ParticleField,
	policy: Rc<dyn TierPolicy>,
	pointer: PointerState,
	last_timestamp: Option<f64>,
}

/// An event listener that detaches itself when dropped.
struct Listener {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
	fn attach(
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Self {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		let _ = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
		Self {
			target: target.clone(),
			event,
			callback,
		}
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		let _ = self.target.remove_event_listener_with_callback(
			self.event,
			self.callback.as_ref().unchecked_ref(),
		);
	}
}

/// Running frame loop and the listeners feeding it.
struct AnimationLoop {
	running: Rc<Cell<bool>>,
	frame_id: Rc<Cell<Option<i32>>>,
	callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
	_listeners: Vec<Listener>,
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) -> Option<i32> {
	web_sys::window()?
		.request_animation_frame(cb.as_ref().unchecked_ref())
		.ok()
}

impl AnimationLoop {
	fn start(
		context: Rc<RefCell<FieldContext>>,
		ctx: CanvasRenderingContext2d,
		listeners: Vec<Listener>,
	) -> Self {
		let running = Rc::new(Cell::new(true));
		let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
		let (running_cb, frame_id_cb, callback_inner) =
			(running.clone(), frame_id.clone(), callback.clone());

		*callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			frame_id_cb.set(None);
			if !running_cb.get() {
				return;
			}
			{
				let mut guard = context.borrow_mut();
				let c = &mut *guard;
				let dt = c
					.last_timestamp
					.map_or(DEFAULT_DT, |last| ((timestamp - last) / 1000.0).clamp(0.0, MAX_DT));
				c.last_timestamp = Some(timestamp);
				let mut surface = CanvasSurface::new(&ctx);
				c.field.advance(&c.pointer, dt, &mut surface, current_theme());
			}
			if let Some(ref cb) = *callback_inner.borrow() {
				frame_id_cb.set(request_frame(cb));
			}
		}));
		if let Some(ref cb) = *callback.borrow() {
			frame_id.set(request_frame(cb));
		}

		Self {
			running,
			frame_id,
			callback,
			_listeners: listeners,
		}
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		self.running.set(false);
		if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
			let _ = window.cancel_animation_frame(id);
		}
		// The frame closure holds a handle to itself; break the cycle.
		self.callback.borrow_mut().take();
		debug!("particle-field: animation loop released");
	}
}

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn canvas_size(window: &Window, canvas: &HtmlCanvasElement, fullscreen: bool) -> (f64, f64) {
	if fullscreen {
		return viewport_size(window).unwrap_or(FALLBACK_SIZE);
	}
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or(FALLBACK_SIZE)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn random_seed() -> u64 {
	((js_sys::Math::random() * u32::MAX as f64) as u64) ^ ((js_sys::Date::now() as u64) << 16)
}

fn attach_listeners(
	window: &Window,
	canvas: &HtmlCanvasElement,
	context: &Rc<RefCell<FieldContext>>,
	fullscreen: bool,
) -> Vec<Listener> {
	let window_target: EventTarget = window.clone().into();
	let mut listeners = Vec::with_capacity(5);

	let (context_mm, canvas_mm) = (context.clone(), canvas.clone());
	listeners.push(Listener::attach(&window_target, "mousemove", move |ev| {
		let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
			return;
		};
		let rect = canvas_mm.get_bounding_client_rect();
		let position = Vec2::new(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		context_mm.borrow_mut().pointer.position = Some(position);
	}));

	let context_md = context.clone();
	listeners.push(Listener::attach(&window_target, "mousedown", move |_| {
		context_md.borrow_mut().pointer.captured = true;
	}));

	let context_mu = context.clone();
	listeners.push(Listener::attach(&window_target, "mouseup", move |_| {
		context_mu.borrow_mut().pointer.captured = false;
	}));

	// Leaving the page shows up as a mouseout with no related target.
	if let Some(document) = window.document() {
		let document_target: EventTarget = document.into();
		let context_ml = context.clone();
		listeners.push(Listener::attach(&document_target, "mouseout", move |ev| {
			let left_page = ev
				.dyn_ref::<MouseEvent>()
				.is_some_and(|m| m.related_target().is_none());
			if left_page {
				context_ml.borrow_mut().pointer = PointerState::default();
			}
		}));
	}

	if fullscreen {
		let (context_rs, canvas_rs) = (context.clone(), canvas.clone());
		listeners.push(Listener::attach(&window_target, "resize", move |_| {
			let Some((w, h)) = web_sys::window().as_ref().and_then(viewport_size) else {
				return;
			};
			canvas_rs.set_width(w as u32);
			canvas_rs.set_height(h as u32);
			let mut guard = context_rs.borrow_mut();
			let c = &mut *guard;
			if c.field.resize(c.policy.as_ref(), w, h) == ResizeOutcome::Reinitialized {
				info!(
					"particle-field: viewport {w}x{h} switched tier, {} particles",
					c.field.particles().len()
				);
			}
		}));
	}

	listeners
}

/// Renders the animated particle background on a canvas element.
///
/// `policy` picks the field configuration for the canvas size, e.g. a
/// [`TierTable`] or an [`AreaScaled`](super::config::AreaScaled). With
/// `fullscreen = true` (the default) the canvas fills the viewport, sits
/// behind the page and asks `policy` again on every window resize.
/// Otherwise it takes the size of its parent element once at mount.
#[component]
pub fn ParticleFieldCanvas(
	#[prop(default = Rc::new(TierTable::default()) as Rc<dyn TierPolicy>)]
	policy: Rc<dyn TierPolicy>,
	#[prop(default = StarConfig::default())] stars: StarConfig,
	#[prop(default = true)] fullscreen: bool,
	#[prop(default = true)] shooting_stars: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animation = StoredValue::new_local(None::<AnimationLoop>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			warn!("particle-field: 2d canvas context unavailable");
			return;
		};

		let (w, h) = canvas_size(&window, &canvas, fullscreen);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let stars = if shooting_stars {
			stars.clone()
		} else {
			StarConfig::disabled()
		};
		let field = ParticleField::new(policy.select(w, h), stars, w, h, random_seed());
		info!(
			"particle-field: initialized {} particles for {w}x{h}",
			field.particles().len()
		);

		let context = Rc::new(RefCell::new(FieldContext {
			field,
			policy: policy.clone(),
			pointer: PointerState::default(),
			last_timestamp: None,
		}));
		let listeners = attach_listeners(&window, &canvas, &context, fullscreen);
		animation.set_value(Some(AnimationLoop::start(context, ctx, listeners)));
	});

	on_cleanup(move || {
		animation.try_update_value(|slot| {
			slot.take();
		});
	});

	let style = if fullscreen {
		"position: fixed; inset: 0; z-index: -1; display: block; pointer-events: none;"
	} else {
		"display: block;"
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			style=style
		/>
	}
}
