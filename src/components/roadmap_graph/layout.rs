//! Serpentine layout generation.
//!
//! Week nodes are placed along a fixed, hand-tuned waypoint table that
//! snakes left-to-right and back while reading downward. Layout is a pure
//! function of the week count: no randomness, no dependency on progress,
//! identical input always yields identical positions.

/// Node card footprint in world units.
pub const NODE_WIDTH: f64 = 220.0;
/// Node card footprint in world units.
pub const NODE_HEIGHT: f64 = 120.0;

/// Padding added around the node extents to form the pan clamp rectangle.
pub const BOUNDS_PADDING: f64 = 160.0;
/// Inset from the padded bounds within which nodes may be dragged.
pub const DRAG_MARGIN: f64 = 60.0;

/// Hand-tuned serpentine path: three left/right sweeps with rounded turns.
const WAYPOINTS: [(f64, f64); 12] = [
	(80.0, 0.0),
	(340.0, 70.0),
	(600.0, 20.0),
	(820.0, 170.0),
	(640.0, 330.0),
	(360.0, 390.0),
	(100.0, 340.0),
	(20.0, 510.0),
	(260.0, 630.0),
	(540.0, 590.0),
	(800.0, 660.0),
	(880.0, 830.0),
];

// Overflow past the waypoint table drops into a plain vertical column.
// Degrades aesthetics, never correctness.
const OVERFLOW_X: f64 = 360.0;
const OVERFLOW_Y_BASE: f64 = 1010.0;
const OVERFLOW_STEP: f64 = 180.0;

/// Side of a node card an edge attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeSide {
	Left,
	Right,
}

/// Exit/enter sides for one edge, chosen so edges never cross the
/// serpentine path: travelling rightward exits Right and enters Left,
/// travelling leftward the mirror.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeDirection {
	pub source_side: EdgeSide,
	pub target_side: EdgeSide,
}

/// Axis-aligned rectangle enclosing all node extents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentBounds {
	pub min_x: f64,
	pub max_x: f64,
	pub min_y: f64,
	pub max_y: f64,
}

impl ContentBounds {
	/// Empty bounds collapsed onto the origin.
	pub const ZERO: Self = Self {
		min_x: 0.0,
		max_x: 0.0,
		min_y: 0.0,
		max_y: 0.0,
	};

	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	/// Grow the rectangle by `margin` on all four sides.
	pub fn expand(&self, margin: f64) -> Self {
		Self {
			min_x: self.min_x - margin,
			max_x: self.max_x + margin,
			min_y: self.min_y - margin,
			max_y: self.max_y + margin,
		}
	}

	/// Shrink the rectangle by `margin` on all four sides.
	pub fn inset(&self, margin: f64) -> Self {
		self.expand(-margin)
	}

	/// Clamp a point into the rectangle.
	pub fn clamp_point(&self, x: f64, y: f64) -> (f64, f64) {
		(x.clamp(self.min_x, self.max_x), y.clamp(self.min_y, self.max_y))
	}
}

/// Output of the layout pass: one position per week, one direction per
/// consecutive pair, and the padded content bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
	/// Top-left corner of each node card, in week order.
	pub positions: Vec<(f64, f64)>,
	/// Edge sides for the edge entering node i+1, length `max(0, n - 1)`.
	pub directions: Vec<EdgeDirection>,
	/// Node extents expanded by [`BOUNDS_PADDING`].
	pub bounds: ContentBounds,
}

/// Position for step `index` along the serpentine path.
fn position_for(index: usize) -> (f64, f64) {
	match WAYPOINTS.get(index) {
		Some(&p) => p,
		None => (
			OVERFLOW_X,
			OVERFLOW_Y_BASE + (index - WAYPOINTS.len()) as f64 * OVERFLOW_STEP,
		),
	}
}

/// Generate positions, edge directions, and content bounds for `week_count`
/// nodes.
pub fn layout(week_count: usize) -> Layout {
	let positions: Vec<(f64, f64)> = (0..week_count).map(position_for).collect();

	let directions = positions
		.windows(2)
		.map(|pair| {
			if pair[1].0 >= pair[0].0 {
				EdgeDirection {
					source_side: EdgeSide::Right,
					target_side: EdgeSide::Left,
				}
			} else {
				EdgeDirection {
					source_side: EdgeSide::Left,
					target_side: EdgeSide::Right,
				}
			}
		})
		.collect();

	let bounds = if positions.is_empty() {
		ContentBounds::ZERO
	} else {
		let mut b = ContentBounds {
			min_x: f64::INFINITY,
			max_x: f64::NEG_INFINITY,
			min_y: f64::INFINITY,
			max_y: f64::NEG_INFINITY,
		};
		for &(x, y) in &positions {
			b.min_x = b.min_x.min(x);
			b.max_x = b.max_x.max(x + NODE_WIDTH);
			b.min_y = b.min_y.min(y);
			b.max_y = b.max_y.max(y + NODE_HEIGHT);
		}
		b.expand(BOUNDS_PADDING)
	};

	Layout {
		positions,
		directions,
		bounds,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn deterministic_for_same_count() {
		assert_eq!(layout(12), layout(12));
		assert_eq!(layout(30), layout(30));
	}

	#[test]
	fn counts_match_input_size() {
		for n in [0usize, 1, 2, 12, 13, 40] {
			let l = layout(n);
			assert_eq!(l.positions.len(), n);
			assert_eq!(l.directions.len(), n.saturating_sub(1));
		}
	}

	#[test]
	fn empty_layout_has_zero_bounds() {
		assert_eq!(layout(0).bounds, ContentBounds::ZERO);
	}

	#[test]
	fn overflow_falls_into_vertical_column() {
		let l = layout(15);
		let overflow: Vec<_> = l.positions[12..].to_vec();
		assert!(overflow.iter().all(|&(x, _)| x == OVERFLOW_X));
		for pair in overflow.windows(2) {
			assert_eq!(pair[1].1 - pair[0].1, OVERFLOW_STEP);
		}
	}

	#[test]
	fn edge_sides_follow_x_ordering() {
		let l = layout(12);
		for (i, dir) in l.directions.iter().enumerate() {
			let (sx, _) = l.positions[i];
			let (tx, _) = l.positions[i + 1];
			if tx >= sx {
				assert_eq!(dir.source_side, EdgeSide::Right);
				assert_eq!(dir.target_side, EdgeSide::Left);
			} else {
				assert_eq!(dir.source_side, EdgeSide::Left);
				assert_eq!(dir.target_side, EdgeSide::Right);
			}
		}
	}

	#[test]
	fn bounds_enclose_all_node_extents_with_padding() {
		let l = layout(20);
		for &(x, y) in &l.positions {
			assert!(x - l.bounds.min_x >= BOUNDS_PADDING);
			assert!(l.bounds.max_x - (x + NODE_WIDTH) >= BOUNDS_PADDING);
			assert!(y - l.bounds.min_y >= BOUNDS_PADDING);
			assert!(l.bounds.max_y - (y + NODE_HEIGHT) >= BOUNDS_PADDING);
		}
	}

	#[test]
	fn inset_shrinks_symmetrically() {
		let b = layout(5).bounds;
		let inner = b.inset(DRAG_MARGIN);
		assert_eq!(inner.width(), b.width() - 2.0 * DRAG_MARGIN);
		assert_eq!(inner.height(), b.height() - 2.0 * DRAG_MARGIN);
	}

	#[test]
	fn clamp_point_stays_inside() {
		let b = layout(3).bounds;
		let (x, y) = b.clamp_point(b.min_x - 500.0, b.max_y + 500.0);
		assert_eq!(x, b.min_x);
		assert_eq!(y, b.max_y);
	}
}
