//! Leptos component wrapping the topology canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, panning, and zooming. An animation loop runs via
//! `requestAnimationFrame`, advancing the simulation and redrawing each frame.
//! Whenever the topology or node color signal changes the simulation is
//! rebuilt in place.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::layout::LayoutConfig;
use super::render;
use super::scale::ScaleConfig;
use super::state::ForceGraphState;
use super::theme::{Color, Theme};
use crate::topology::Topology;

/// Bundles simulation state with visual configuration.
struct GraphContext {
	state: ForceGraphState,
	scale: ScaleConfig,
	theme: Theme,
	node_color: Color,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Size of the canvas' parent container, or a fallback when detached.
fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0))
}

/// Pointer position relative to the canvas' top-left corner.
fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn request_frame(window: &Window, callback: &FrameCallback) {
	if let Some(ref cb) = *callback.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Renders `topology` as a force-directed graph on a canvas element.
///
/// The canvas fills its parent container and follows window resizes. Every
/// node is drawn the same size in `node_color`; link endpoints with no node
/// entry are drawn in the theme's implicit color.
#[component]
pub fn ForceGraphCanvas(
	/// Store to draw. Each change rebuilds the simulation in place.
	#[prop(into)]
	topology: Signal<Topology>,
	/// Fill of every node entry.
	#[prop(into)]
	node_color: Signal<Color>,
	/// Simulation settings, fixed for the component's lifetime.
	#[prop(optional)]
	layout: LayoutConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<GraphContext>>> = Rc::new(RefCell::new(None));
	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let resize_cb: FrameCallback = Rc::new(RefCell::new(None));
	let (context_init, animate_init, resize_cb_init) =
		(context.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let current = topology.get();
		let color = node_color.get();

		if let Some(ref mut c) = *context_init.borrow_mut() {
			c.state.rebuild(&current);
			c.node_color = color;
			debug!(
				"topology-editor: canvas rebuilt with {} nodes, {} links",
				current.node_count(),
				current.link_count()
			);
			return;
		}

		let Some(window) = web_sys::window() else {
			return;
		};
		let (w, h) = container_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
		let Some(ctx) = ctx else {
			warn!("topology-editor: canvas 2d context unavailable");
			return;
		};

		*context_init.borrow_mut() = Some(GraphContext {
			state: ForceGraphState::new(&current, &layout, w, h),
			scale: ScaleConfig::default(),
			theme: Theme::default(),
			node_color: color,
		});

		let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = container_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut c) = *context_resize.borrow_mut() {
				c.state.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (context_anim, animate_inner) = (context_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				c.state.tick();
				if let Err(e) = render::render(&c.state, &ctx, &c.scale, &c.theme, c.node_color) {
					warn!("topology-editor: render failed: {:?}", e);
				}
			}
			if let Some(win) = web_sys::window() {
				request_frame(&win, &animate_inner);
			}
		}));
		request_frame(&window, &animate_init);
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas.into(), &ev);
		if let Some(ref mut c) = *context_md.borrow_mut() {
			c.state.press(x, y, &c.scale);
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas.into(), &ev);
		if let Some(ref mut c) = *context_mm.borrow_mut() {
			c.state.move_pointer(x, y);
		}
	};

	// Dragged nodes stay pinned where they were dropped.
	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			c.state.release();
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.release();
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas.into(), &ev);
		if let Some(ref mut c) = *context_wh.borrow_mut() {
			c.state.zoom_at(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
