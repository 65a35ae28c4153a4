//! Canvas rendering for the topology graph.
//!
//! Draws in three passes: background (screen space), then link lines and
//! finally node circles with their id labels (world space), so nodes always
//! sit on top of the links that join them.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::layout::NodeInfo;
use super::scale::{ScaleConfig, ScaledValues};
use super::state::ForceGraphState;
use super::theme::{Color, Theme};

/// Renders the complete graph to the canvas.
pub fn render(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
	node_color: Color,
) -> Result<(), JsValue> {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx, theme)?;

	ctx.save();
	ctx.translate(state.transform.x, state.transform.y)?;
	ctx.scale(state.transform.k, state.transform.k)?;

	draw_edges(state, ctx, &scale, theme);
	let drawn = draw_nodes(state, ctx, &scale, theme, node_color);

	ctx.restore();
	drawn
}

fn draw_background(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
) -> Result<(), JsValue> {
	if theme.background.use_gradient {
		let gradient = ctx.create_radial_gradient(
			state.width / 2.0,
			state.height / 2.0,
			0.0,
			state.width / 2.0,
			state.height / 2.0,
			(state.width.max(state.height)) * 0.8,
		)?;

		gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css())?;
		gradient.add_color_stop(1.0, &theme.background.color.to_css())?;

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	Ok(())
}

fn draw_edges(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	ctx.set_stroke_style_str(&theme.edge.color.to_css());
	ctx.set_line_width(scale.edge_line_width);

	state.graph.visit_edges(|n1, n2, _| {
		ctx.begin_path();
		ctx.move_to(n1.x() as f64, n1.y() as f64);
		ctx.line_to(n2.x() as f64, n2.y() as f64);
		ctx.stroke();
	});
}

fn draw_nodes(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	node_color: Color,
) -> Result<(), JsValue> {
	let mut result = Ok(());
	state.graph.visit_nodes(|node| {
		if result.is_err() {
			return;
		}
		result = draw_node(ctx, node, scale, theme, node_color);
	});
	result
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &force_graph::Node<NodeInfo>,
	scale: &ScaledValues,
	theme: &Theme,
	node_color: Color,
) -> Result<(), JsValue> {
	let (x, y) = (node.x() as f64, node.y() as f64);
	let radius = scale.node_radius;
	let info = &node.data.user_data;
	let base_color = if info.implicit {
		theme.node.implicit_color
	} else {
		node_color
	};

	if theme.node.use_gradient {
		let gradient =
			ctx.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)?;

		gradient.add_color_stop(0.0, &base_color.lighten(0.4).to_css())?;
		gradient.add_color_stop(0.7, &base_color.to_css())?;
		gradient.add_color_stop(1.0, &base_color.darken(0.1).to_css())?;

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&base_color.to_css());
	}

	ctx.begin_path();
	ctx.arc(x, y, radius, 0.0, 2.0 * PI)?;
	ctx.fill();

	if theme.node.border_width > 0.0 {
		ctx.set_stroke_style_str(&theme.node.border_color.to_css());
		ctx.set_line_width(theme.node.border_width / scale.k);
		ctx.stroke();
	}

	ctx.set_fill_style_str(&theme.node.label_color.to_css());
	ctx.set_font(&scale.label_font);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.fill_text(&info.id, x, y)?;

	Ok(())
}
