//! Visual theming for the roadmap graph.
//!
//! Maps the semantic node/edge states produced by the graph builder onto
//! concrete colors, stroke widths, and dash settings.

use super::graph::EdgeKind;

/// RGBA color representation.
#[derive(Clone, Copy, Debug)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// Darken the color by a factor (0.0 = unchanged, 1.0 = black)
	pub fn darken(self, factor: f64) -> Self {
		let f = 1.0 - factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 * f) as u8,
			g: (self.g as f64 * f) as u8,
			b: (self.b as f64 * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Concrete visual state of one edge, derived from its [`EdgeKind`].
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	pub color: Color,
	pub width: f64,
	pub dashed: bool,
	pub animated: bool,
	pub opacity: f64,
}

/// Fill/border/text colors for one node state.
#[derive(Clone, Copy, Debug)]
pub struct NodeColors {
	pub fill: Color,
	pub border: Color,
	pub text: Color,
}

/// Background style configuration.
#[derive(Clone, Copy, Debug)]
pub struct BackgroundStyle {
	pub color: Color,
	pub color_secondary: Color,
	pub use_gradient: bool,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub background: BackgroundStyle,
	pub node_default: NodeColors,
	pub node_completed: NodeColors,
	pub node_current: NodeColors,
	pub node_locked: NodeColors,
	/// Accent used for the current-step ring and progress bars.
	pub accent: Color,
	pub edge_locked: Color,
	pub edge_completed: Color,
	pub edge_current: Color,
	pub edge_default: Color,
}

impl Theme {
	/// Dark slate theme (default).
	pub fn default_theme() -> Self {
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::rgb(22, 27, 34),
				color_secondary: Color::rgb(30, 35, 42),
				use_gradient: true,
			},
			node_default: NodeColors {
				fill: Color::rgb(45, 55, 72),
				border: Color::rgba(140, 160, 180, 0.6),
				text: Color::rgba(235, 240, 245, 0.95),
			},
			node_completed: NodeColors {
				fill: Color::rgb(34, 66, 51),
				border: Color::rgba(74, 222, 128, 0.7),
				text: Color::rgba(235, 245, 238, 0.95),
			},
			node_current: NodeColors {
				fill: Color::rgb(41, 57, 92),
				border: Color::rgba(96, 165, 250, 0.9),
				text: Color::rgba(240, 244, 250, 1.0),
			},
			node_locked: NodeColors {
				fill: Color::rgb(34, 38, 45),
				border: Color::rgba(100, 108, 120, 0.4),
				text: Color::rgba(150, 158, 170, 0.6),
			},
			accent: Color::rgb(96, 165, 250),
			edge_locked: Color::rgba(100, 108, 120, 1.0),
			edge_completed: Color::rgba(74, 222, 128, 1.0),
			edge_current: Color::rgba(96, 165, 250, 1.0),
			edge_default: Color::rgba(140, 160, 180, 1.0),
		}
	}

	/// Deep blue night variant.
	pub fn midnight() -> Self {
		Self {
			name: "midnight",
			background: BackgroundStyle {
				color: Color::rgb(15, 18, 28),
				color_secondary: Color::rgb(22, 26, 38),
				use_gradient: true,
			},
			node_default: NodeColors {
				fill: Color::rgb(38, 44, 62),
				border: Color::rgba(120, 140, 170, 0.55),
				text: Color::rgba(228, 234, 244, 0.95),
			},
			node_completed: NodeColors {
				fill: Color::rgb(30, 58, 52),
				border: Color::rgba(94, 200, 150, 0.7),
				text: Color::rgba(230, 242, 236, 0.95),
			},
			node_current: NodeColors {
				fill: Color::rgb(36, 48, 84),
				border: Color::rgba(130, 160, 255, 0.9),
				text: Color::rgba(238, 242, 252, 1.0),
			},
			node_locked: NodeColors {
				fill: Color::rgb(26, 30, 40),
				border: Color::rgba(90, 98, 112, 0.35),
				text: Color::rgba(140, 148, 162, 0.55),
			},
			accent: Color::rgb(130, 160, 255),
			edge_locked: Color::rgba(90, 98, 112, 1.0),
			edge_completed: Color::rgba(94, 200, 150, 1.0),
			edge_current: Color::rgba(130, 160, 255, 1.0),
			edge_default: Color::rgba(120, 140, 170, 1.0),
		}
	}

	/// Colors for a node given its derived flags. Lock wins over every
	/// other state, matching the edge precedence.
	pub fn node_colors(
		&self,
		is_locked: bool,
		is_completed: bool,
		is_current_step: bool,
	) -> NodeColors {
		if is_locked {
			self.node_locked
		} else if is_completed {
			self.node_completed
		} else if is_current_step {
			self.node_current
		} else {
			self.node_default
		}
	}

	/// Visual state for an edge of the given kind.
	pub fn edge_style(&self, kind: EdgeKind) -> EdgeStyle {
		match kind {
			EdgeKind::Locked => EdgeStyle {
				color: self.edge_locked,
				width: 1.5,
				dashed: true,
				animated: false,
				opacity: 0.35,
			},
			EdgeKind::Completed => EdgeStyle {
				color: self.edge_completed,
				width: 2.0,
				dashed: false,
				animated: true,
				opacity: 1.0,
			},
			EdgeKind::CurrentStep => EdgeStyle {
				color: self.edge_current,
				width: 3.0,
				dashed: false,
				animated: true,
				opacity: 0.9,
			},
			EdgeKind::Default => EdgeStyle {
				color: self.edge_default,
				width: 2.0,
				dashed: false,
				animated: true,
				opacity: 0.6,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn locked_edges_are_dashed_and_static() {
		let style = Theme::default().edge_style(EdgeKind::Locked);
		assert!(style.dashed);
		assert!(!style.animated);
		assert!(style.opacity < 0.5);
	}

	#[test]
	fn current_step_edge_is_thickest() {
		let theme = Theme::default();
		let current = theme.edge_style(EdgeKind::CurrentStep);
		for kind in [EdgeKind::Locked, EdgeKind::Completed, EdgeKind::Default] {
			assert!(current.width > theme.edge_style(kind).width);
		}
	}

	#[test]
	fn lock_wins_node_coloring() {
		let theme = Theme::default();
		let colors = theme.node_colors(true, true, true);
		assert_eq!(colors.fill.to_css(), theme.node_locked.fill.to_css());
	}

	#[test]
	fn css_formatting() {
		assert_eq!(Color::rgb(255, 0, 128).to_css(), "#ff0080");
		assert_eq!(
			Color::rgba(10, 20, 30, 0.5).to_css(),
			"rgba(10, 20, 30, 0.5)"
		);
	}
}
