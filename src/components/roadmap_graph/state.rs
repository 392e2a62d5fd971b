//! Mutable roadmap view state: the derived graph, the camera, and
//! in-progress pointer interactions.
//!
//! Created once when the component mounts, then mutated by event handlers
//! and the animation loop. All derived data (nodes, edges, current step) is
//! recomputed from the immutable week list plus the latest progress.

use super::graph::{self, RoadmapEdge, RoadmapNode};
use super::layout::{self, ContentBounds, DRAG_MARGIN, NODE_HEIGHT, NODE_WIDTH};
use super::types::{WeekDefinition, WeekProgress};
use super::viewport::{ViewportController, ViewportEvent};

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: (f64, f64),
	/// Set once the pointer travels far enough to count as a drag rather
	/// than a click.
	pub moved: bool,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	pub moved: bool,
}

/// Pointer travel below this many pixels is treated as a click.
pub const CLICK_SLOP: f64 = 4.0;

/// Core view state combining the derived graph with camera and interaction
/// tracking.
pub struct RoadmapGraphState {
	weeks: Vec<WeekDefinition>,
	pub nodes: Vec<RoadmapNode>,
	pub edges: Vec<RoadmapEdge>,
	/// Padded content bounds used as the pan clamp.
	pub bounds: ContentBounds,
	pub current_step: usize,
	pub viewport: ViewportController,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	/// Accumulated time driving the edge dash-flow animation.
	pub flow_time: f64,
}

impl RoadmapGraphState {
	pub fn new(
		weeks: Vec<WeekDefinition>,
		progress: &[WeekProgress],
		width: f64,
		height: f64,
	) -> Self {
		let bounds = layout::layout(weeks.len()).bounds;
		let mut state = Self {
			weeks,
			nodes: Vec::new(),
			edges: Vec::new(),
			bounds,
			current_step: 0,
			viewport: ViewportController::new(width, height),
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			flow_time: 0.0,
		};
		state.rebuild(progress);
		state
	}

	/// Recompute nodes, edges, and the current step from fresh progress and
	/// feed the step to the viewport's auto-focus trigger. Idempotent for
	/// unchanged input.
	pub fn rebuild(&mut self, progress: &[WeekProgress]) {
		let step = graph::current_step_index(&self.weeks, progress);
		let (nodes, edges) = graph::build_graph(&self.weeks, progress, step);
		self.nodes = nodes;
		self.edges = edges;
		self.current_step = step;
		self.viewport.sync_current_step(if self.weeks.is_empty() {
			None
		} else {
			Some(step)
		});
	}

	pub fn is_empty(&self) -> bool {
		self.weeks.is_empty()
	}

	/// Convert screen coordinates into world coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		let t = &self.viewport.transform;
		((sx - t.x) / t.k, (sy - t.y) / t.k)
	}

	/// Step index of the node card under a screen point, if any. Later
	/// nodes are drawn on top, so the scan runs back to front.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.nodes
			.iter()
			.rposition(|node| node.contains(gx, gy))
	}

	/// Move a dragged node, keeping the card inside the drag clamp
	/// rectangle (bounds inset by [`DRAG_MARGIN`]). Positions only move by
	/// user drag; there is no physics relaxation.
	pub fn drag_node_to(&mut self, index: usize, x: f64, y: f64) {
		let Some(node) = self.nodes.get_mut(index) else {
			return;
		};
		let inner = self.bounds.inset(DRAG_MARGIN);
		node.position = (
			x.clamp(inner.min_x, (inner.max_x - NODE_WIDTH).max(inner.min_x)),
			y.clamp(inner.min_y, (inner.max_y - NODE_HEIGHT).max(inner.min_y)),
		);
	}

	/// Pan the camera by a screen-space delta, clamped to the bounds.
	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		let dx = sx - self.pan.start_x;
		let dy = sy - self.pan.start_y;
		self.viewport.transform.x = self.pan.transform_start_x;
		self.viewport.transform.y = self.pan.transform_start_y;
		self.viewport.pan_by(dx, dy, &self.bounds);
	}

	/// Wheel zoom about a screen point.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.viewport.zoom_at(sx, sy, factor, &self.bounds);
	}

	/// Advance the dash-flow clock and the viewport animations.
	pub fn tick(&mut self, dt: f64) -> Vec<ViewportEvent> {
		self.flow_time += dt;
		self.viewport.tick(dt, &self.nodes)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.viewport.resize(width, height);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn weeks(n: u32) -> Vec<WeekDefinition> {
		(1..=n)
			.map(|week_number| WeekDefinition {
				week_number,
				theme: format!("Week {week_number}"),
				..WeekDefinition::default()
			})
			.collect()
	}

	fn progress(entries: &[(u32, f64)]) -> Vec<WeekProgress> {
		entries
			.iter()
			.map(|&(week_number, completion_percentage)| WeekProgress {
				week_number,
				completion_percentage,
				completed_tasks: Vec::new(),
			})
			.collect()
	}

	#[test]
	fn rebuild_tracks_progress_changes() {
		let mut state = RoadmapGraphState::new(weeks(3), &[], 1200.0, 800.0);
		assert_eq!(state.current_step, 0);
		assert!(state.nodes[1].is_locked);

		state.rebuild(&progress(&[(1, 100.0)]));
		assert_eq!(state.current_step, 1);
		assert!(!state.nodes[1].is_locked);
		assert!(state.nodes[2].is_locked);
	}

	#[test]
	fn rebuild_is_idempotent_by_value() {
		let p = progress(&[(1, 100.0), (2, 30.0)]);
		let mut state = RoadmapGraphState::new(weeks(4), &p, 1200.0, 800.0);
		let nodes = state.nodes.clone();
		let edges = state.edges.clone();
		state.rebuild(&p);
		assert_eq!(state.nodes, nodes);
		assert_eq!(state.edges, edges);
	}

	#[test]
	fn empty_roadmap_renders_empty_state() {
		let state = RoadmapGraphState::new(Vec::new(), &[], 800.0, 600.0);
		assert!(state.is_empty());
		assert!(state.nodes.is_empty());
		assert!(state.edges.is_empty());
	}

	#[test]
	fn hit_test_respects_transform() {
		let mut state = RoadmapGraphState::new(weeks(2), &[], 1200.0, 800.0);
		state.viewport.transform.x = 0.0;
		state.viewport.transform.y = 0.0;
		state.viewport.transform.k = 1.0;

		let (cx, cy) = state.nodes[0].center();
		assert_eq!(state.node_at_position(cx, cy), Some(0));
		assert_eq!(
			state.node_at_position(state.bounds.min_x - 1.0, state.bounds.min_y - 1.0),
			None
		);
	}

	#[test]
	fn drag_is_clamped_to_inset_bounds() {
		let mut state = RoadmapGraphState::new(weeks(3), &[], 1200.0, 800.0);
		let inner = state.bounds.inset(DRAG_MARGIN);

		state.drag_node_to(0, -100_000.0, -100_000.0);
		assert_eq!(state.nodes[0].position, (inner.min_x, inner.min_y));

		state.drag_node_to(0, 100_000.0, 100_000.0);
		assert_eq!(
			state.nodes[0].position,
			(inner.max_x - NODE_WIDTH, inner.max_y - NODE_HEIGHT)
		);
	}

	#[test]
	fn tick_accumulates_flow_time() {
		let mut state = RoadmapGraphState::new(weeks(1), &[], 800.0, 600.0);
		state.tick(0.5);
		state.tick(0.25);
		assert!((state.flow_time - 0.75).abs() < 1e-9);
	}
}
