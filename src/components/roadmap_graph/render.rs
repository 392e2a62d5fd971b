//! Canvas rendering for the roadmap graph.
//!
//! Draws in passes for correct z-ordering: background (screen space), then
//! edges, then node cards (world space). Edge dash flow is driven by the
//! state's `flow_time` clock; completed/current edges animate, locked edges
//! stay static and dashed.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::graph::{RoadmapEdge, RoadmapNode};
use super::layout::{EdgeSide, NODE_HEIGHT, NODE_WIDTH};
use super::state::RoadmapGraphState;
use super::theme::Theme;

/// Dash travel speed for animated edges, world units per second.
const FLOW_SPEED: f64 = 24.0;
const DASH_PATTERN: (f64, f64) = (8.0, 6.0);
const CARD_RADIUS: f64 = 14.0;
const ARROW_SIZE: f64 = 9.0;

/// Render the complete roadmap view.
pub fn render(state: &RoadmapGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	draw_background(state, ctx, theme);

	ctx.save();
	let t = &state.viewport.transform;
	let _ = ctx.translate(t.x, t.y);
	let _ = ctx.scale(t.k, t.k);

	for edge in &state.edges {
		draw_edge(state, ctx, theme, edge);
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	for node in &state.nodes {
		draw_node(state, ctx, theme, node);
	}

	ctx.restore();
}

fn draw_background(state: &RoadmapGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	if theme.background.use_gradient {
		let gradient = ctx
			.create_radial_gradient(
				state.width / 2.0,
				state.height / 2.0,
				0.0,
				state.width / 2.0,
				state.height / 2.0,
				state.width.max(state.height) * 0.8,
			)
			.unwrap();
		gradient
			.add_color_stop(0.0, &theme.background.color_secondary.to_css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &theme.background.color.to_css())
			.unwrap();
		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

/// Midpoint of the card side an edge attaches to.
fn side_anchor(node: &RoadmapNode, side: EdgeSide) -> (f64, f64) {
	let (x, y) = node.position;
	match side {
		EdgeSide::Left => (x, y + NODE_HEIGHT / 2.0),
		EdgeSide::Right => (x + NODE_WIDTH, y + NODE_HEIGHT / 2.0),
	}
}

fn draw_edge(
	state: &RoadmapGraphState,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	edge: &RoadmapEdge,
) {
	let style = theme.edge_style(edge.kind);
	let source = &state.nodes[edge.from];
	let target = &state.nodes[edge.to];

	let (x1, y1) = side_anchor(source, edge.direction.source_side);
	let (x2, y2) = side_anchor(target, edge.direction.target_side);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);

	ctx.set_stroke_style_str(&style.color.with_alpha(style.opacity).to_css());
	ctx.set_line_width(style.width);

	if style.dashed || style.animated {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(DASH_PATTERN.0),
			&JsValue::from_f64(DASH_PATTERN.1),
		));
		if style.animated {
			ctx.set_line_dash_offset(-state.flow_time * FLOW_SPEED);
		} else {
			ctx.set_line_dash_offset(0.0);
		}
	} else {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}

	// Gentle horizontal curve between the side anchors.
	let bend = (dx.abs() * 0.4).min(120.0);
	let cx1 = x1 + ux.signum() * bend;
	let cx2 = x2 - ux.signum() * bend;
	ctx.begin_path();
	ctx.move_to(x1, y1);
	let _ = ctx.bezier_curve_to(cx1, y1, cx2, y2, x2 - ux * ARROW_SIZE, y2 - uy * ARROW_SIZE);
	ctx.stroke();

	// Arrow head at the target side.
	let _ = ctx.set_line_dash(&js_sys::Array::new());
	ctx.set_fill_style_str(&style.color.with_alpha(style.opacity).to_css());
	let (tip_x, tip_y) = (x2, y2);
	let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
	let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn truncate(text: &str, max_chars: usize) -> String {
	if text.chars().count() <= max_chars {
		text.to_string()
	} else {
		let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
		format!("{head}...")
	}
}

fn draw_node(
	state: &RoadmapGraphState,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	node: &RoadmapNode,
) {
	let (x, y) = node.position;
	let colors = theme.node_colors(node.is_locked, node.is_completed, node.is_current_step);

	// Pulsing outer ring marks the current step.
	if node.is_current_step && !node.is_locked {
		let pulse = 0.5 + 0.3 * (state.flow_time * 3.0).sin();
		rounded_rect(
			ctx,
			x - 6.0,
			y - 6.0,
			NODE_WIDTH + 12.0,
			NODE_HEIGHT + 12.0,
			CARD_RADIUS + 6.0,
		);
		ctx.set_stroke_style_str(&theme.accent.with_alpha(pulse).to_css());
		ctx.set_line_width(2.5);
		ctx.stroke();
	}

	rounded_rect(ctx, x, y, NODE_WIDTH, NODE_HEIGHT, CARD_RADIUS);
	ctx.set_fill_style_str(&colors.fill.to_css());
	ctx.fill();
	ctx.set_stroke_style_str(&colors.border.to_css());
	ctx.set_line_width(if node.is_current_step { 2.5 } else { 1.5 });
	ctx.stroke();

	ctx.set_fill_style_str(&colors.text.to_css());
	ctx.set_font("bold 15px sans-serif");
	let _ = ctx.fill_text(
		&format!("Week {}", node.week.week_number),
		x + 16.0,
		y + 28.0,
	);
	ctx.set_font("12px sans-serif");
	let _ = ctx.fill_text(&truncate(&node.week.theme, 28), x + 16.0, y + 50.0);
	ctx.set_fill_style_str(&colors.text.with_alpha(colors.text.a * 0.7).to_css());
	ctx.set_font("11px sans-serif");
	let _ = ctx.fill_text(
		&format!("{} h - {} tasks", node.week.estimated_hours, node.week.tasks.len()),
		x + 16.0,
		y + 70.0,
	);

	if node.is_locked {
		draw_lock(ctx, x + NODE_WIDTH - 30.0, y + 18.0, &colors.text.to_css());
	} else {
		draw_progress_bar(ctx, theme, node, x, y);
	}
}

/// Small padlock glyph for locked cards.
fn draw_lock(ctx: &CanvasRenderingContext2d, x: f64, y: f64, color: &str) {
	ctx.set_stroke_style_str(color);
	ctx.set_fill_style_str(color);
	ctx.set_line_width(1.5);
	ctx.begin_path();
	let _ = ctx.arc(x + 6.0, y + 4.0, 4.5, PI, 2.0 * PI);
	ctx.stroke();
	ctx.fill_rect(x, y + 4.0, 12.0, 9.0);
}

fn draw_progress_bar(
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	node: &RoadmapNode,
	x: f64,
	y: f64,
) {
	let bar_x = x + 16.0;
	let bar_y = y + NODE_HEIGHT - 26.0;
	let bar_w = NODE_WIDTH - 32.0;

	ctx.set_fill_style_str(&theme.node_locked.fill.lighten(0.1).to_css());
	ctx.fill_rect(bar_x, bar_y, bar_w, 6.0);

	let fraction = (node.completion / 100.0).clamp(0.0, 1.0);
	if fraction > 0.0 {
		let color = if node.is_completed {
			theme.node_completed.border
		} else {
			theme.accent
		};
		ctx.set_fill_style_str(&color.to_css());
		ctx.fill_rect(bar_x, bar_y, bar_w * fraction, 6.0);
	}

	ctx.set_fill_style_str(
		&theme
			.node_default
			.text
			.with_alpha(0.7)
			.to_css(),
	);
	ctx.set_font("10px sans-serif");
	let _ = ctx.fill_text(
		&format!("{:.0}%", node.completion),
		bar_x + bar_w - 24.0,
		bar_y - 4.0,
	);
}
