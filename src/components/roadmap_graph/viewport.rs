//! Viewport (camera) control: initial framing, focus-on-step animation, and
//! bounded pan/zoom.
//!
//! The controller is tick-driven: delayed triggers are countdowns advanced
//! by the animation loop rather than DOM timers, so scheduling, preemption,
//! and cancellation are all plain state transitions. Overlapping focus
//! requests resolve as last-request-wins: a new request replaces both the
//! pending countdown and any in-flight animation.

use log::debug;

use super::graph::RoadmapNode;
use super::layout::{ContentBounds, NODE_HEIGHT, NODE_WIDTH};

/// Zoom applied by the one-shot initial framing.
pub const DEFAULT_ZOOM: f64 = 0.75;
/// Zoom applied when focusing the current step.
pub const FOCUS_ZOOM: f64 = 1.1;
/// Lower zoom clamp for wheel input.
pub const MIN_ZOOM: f64 = 0.4;
/// Upper zoom clamp for wheel input.
pub const MAX_ZOOM: f64 = 2.5;

/// Fixed translation set by the initial framing.
const INITIAL_OFFSET: (f64, f64) = (80.0, 60.0);
/// Settle delay before the initial framing, seconds.
const INITIAL_DELAY: f64 = 0.1;
/// Settle delay before a focus animation starts, seconds.
const FOCUS_DELAY: f64 = 0.3;
/// Focus animation duration, seconds.
const FOCUS_DURATION: f64 = 0.8;
/// Fractional bias of the focus point toward the card's top-left, leaving
/// room for side panels.
const FOCUS_BIAS: f64 = 0.2;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

impl ViewTransform {
	fn lerp(self, other: Self, t: f64) -> Self {
		Self {
			x: self.x + (other.x - self.x) * t,
			y: self.y + (other.y - self.y) * t,
			k: self.k + (other.k - self.k) * t,
		}
	}
}

/// Camera activity, observable by the host component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusPhase {
	Idle,
	/// A center-on-node animation is in flight.
	Focusing,
}

/// Emitted by [`ViewportController::tick`] as focus animations start and end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewportEvent {
	FocusStarted,
	FocusEnded,
}

#[derive(Clone, Copy, Debug)]
struct PendingFocus {
	step: usize,
	delay: f64,
}

#[derive(Clone, Copy, Debug)]
struct FocusAnimation {
	from: ViewTransform,
	to: ViewTransform,
	elapsed: f64,
	duration: f64,
}

/// Ease-out curve shared by focus animations.
fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Clamp a translation component so the content rectangle covers the
/// viewport; content smaller than the viewport gets centered instead.
fn clamp_axis(value: f64, lo: f64, hi: f64) -> f64 {
	if lo > hi {
		(lo + hi) / 2.0
	} else {
		value.clamp(lo, hi)
	}
}

/// Owns the camera transform and its three triggers: one-shot initial
/// framing, auto-focus on current-step change, and a manual replay counter.
///
/// Created on component mount and dropped on unmount; all trigger memory
/// (`initial framing happened`, `last auto-focused step`, `last manual
/// trigger seen`) lives on the instance, never in process-wide state.
pub struct ViewportController {
	pub transform: ViewTransform,
	width: f64,
	height: f64,
	initial_delay: Option<f64>,
	initial_framed: bool,
	last_focused_step: Option<usize>,
	last_trigger: u64,
	pending: Option<PendingFocus>,
	animation: Option<FocusAnimation>,
}

impl ViewportController {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			transform: ViewTransform {
				x: 0.0,
				y: 0.0,
				k: DEFAULT_ZOOM,
			},
			width,
			height,
			initial_delay: Some(INITIAL_DELAY),
			initial_framed: false,
			last_focused_step: None,
			last_trigger: 0,
			pending: None,
			animation: None,
		}
	}

	pub fn phase(&self) -> FocusPhase {
		if self.animation.is_some() {
			FocusPhase::Focusing
		} else {
			FocusPhase::Idle
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Auto-focus trigger: schedules a delayed focus when the current-step
	/// index changes to a value not yet auto-focused.
	pub fn sync_current_step(&mut self, step: Option<usize>) {
		let Some(step) = step else {
			return;
		};
		if self.last_focused_step == Some(step) {
			return;
		}
		self.last_focused_step = Some(step);
		self.pending = Some(PendingFocus {
			step,
			delay: FOCUS_DELAY,
		});
	}

	/// Manual-focus trigger: replays the focus animation whenever the
	/// counter advances past the last seen value, regardless of whether the
	/// step changed.
	pub fn sync_focus_trigger(&mut self, trigger: u64, step: usize) {
		if trigger <= self.last_trigger {
			return;
		}
		self.last_trigger = trigger;
		self.pending = Some(PendingFocus {
			step,
			delay: FOCUS_DELAY,
		});
	}

	/// Drop scheduled-but-unfired triggers. Called on component teardown so
	/// nothing fires against a stale node set.
	pub fn cancel_pending(&mut self) {
		self.pending = None;
		self.initial_delay = None;
	}

	/// Translate the view, clamped to the padded content bounds.
	pub fn pan_by(&mut self, dx: f64, dy: f64, bounds: &ContentBounds) {
		self.transform.x += dx;
		self.transform.y += dy;
		self.clamp_translation(bounds);
	}

	/// Zoom about a screen point, clamping both zoom and translation.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64, bounds: &ContentBounds) {
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
		self.clamp_translation(bounds);
	}

	/// Clamp the translation so the content rectangle stays in view.
	pub fn clamp_translation(&mut self, bounds: &ContentBounds) {
		if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
			return;
		}
		let k = self.transform.k;
		self.transform.x = clamp_axis(
			self.transform.x,
			self.width - bounds.max_x * k,
			-bounds.min_x * k,
		);
		self.transform.y = clamp_axis(
			self.transform.y,
			self.height - bounds.max_y * k,
			-bounds.min_y * k,
		);
	}

	/// Target transform centering `node` at [`FOCUS_ZOOM`], biased toward
	/// the top-left so side panels don't cover the card.
	fn focus_target(&self, node: &RoadmapNode) -> ViewTransform {
		let wx = node.position.0 + NODE_WIDTH / 2.0 - NODE_WIDTH * FOCUS_BIAS;
		let wy = node.position.1 + NODE_HEIGHT / 2.0 - NODE_HEIGHT * FOCUS_BIAS;
		ViewTransform {
			x: self.width / 2.0 - wx * FOCUS_ZOOM,
			y: self.height / 2.0 - wy * FOCUS_ZOOM,
			k: FOCUS_ZOOM,
		}
	}

	/// Advance countdowns and the focus animation by `dt` seconds.
	pub fn tick(&mut self, dt: f64, nodes: &[RoadmapNode]) -> Vec<ViewportEvent> {
		let mut events = Vec::new();

		if let Some(delay) = &mut self.initial_delay {
			*delay -= dt;
			if *delay <= 0.0 {
				self.initial_delay = None;
				if !self.initial_framed {
					self.initial_framed = true;
					self.transform = ViewTransform {
						x: INITIAL_OFFSET.0,
						y: INITIAL_OFFSET.1,
						k: DEFAULT_ZOOM,
					};
				}
			}
		}

		if let Some(pending) = &mut self.pending {
			pending.delay -= dt;
			if pending.delay <= 0.0 {
				let step = pending.step;
				self.pending = None;
				match nodes.get(step) {
					Some(node) => {
						self.animation = Some(FocusAnimation {
							from: self.transform,
							to: self.focus_target(node),
							elapsed: 0.0,
							duration: FOCUS_DURATION,
						});
						events.push(ViewportEvent::FocusStarted);
					}
					// Nothing to focus; treated as a silent no-op.
					None => debug!("focus target step {step} not in current node set"),
				}
			}
		}

		if let Some(animation) = &mut self.animation {
			animation.elapsed += dt;
			let t = (animation.elapsed / animation.duration).min(1.0);
			self.transform = animation.from.lerp(animation.to, smooth_step(t));
			if animation.elapsed >= animation.duration {
				self.animation = None;
				events.push(ViewportEvent::FocusEnded);
			}
		}

		events
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::roadmap_graph::graph::build_graph;
	use crate::components::roadmap_graph::types::WeekDefinition;

	fn nodes(n: u32) -> Vec<RoadmapNode> {
		let weeks: Vec<WeekDefinition> = (1..=n)
			.map(|week_number| WeekDefinition {
				week_number,
				theme: format!("Week {week_number}"),
				..WeekDefinition::default()
			})
			.collect();
		build_graph(&weeks, &[], 0).0
	}

	/// Tick in small steps, collecting events.
	fn run(vc: &mut ViewportController, nodes: &[RoadmapNode], total: f64) -> Vec<ViewportEvent> {
		let mut events = Vec::new();
		let mut elapsed = 0.0;
		while elapsed < total {
			events.extend(vc.tick(0.016, nodes));
			elapsed += 0.016;
		}
		events
	}

	#[test]
	fn initial_framing_fires_exactly_once() {
		let mut vc = ViewportController::new(1200.0, 800.0);
		let ns = nodes(3);

		run(&mut vc, &ns, 0.2);
		assert_eq!(vc.transform.x, INITIAL_OFFSET.0);
		assert_eq!(vc.transform.y, INITIAL_OFFSET.1);
		assert_eq!(vc.transform.k, DEFAULT_ZOOM);

		// A later manual pan must not be undone by a second framing.
		vc.transform.x = 500.0;
		run(&mut vc, &ns, 0.5);
		assert_eq!(vc.transform.x, 500.0);
	}

	#[test]
	fn auto_focus_emits_start_then_end_and_reaches_target() {
		let mut vc = ViewportController::new(1200.0, 800.0);
		let ns = nodes(3);
		vc.sync_current_step(Some(1));

		let events = run(&mut vc, &ns, 2.0);
		assert_eq!(
			events,
			vec![ViewportEvent::FocusStarted, ViewportEvent::FocusEnded]
		);
		assert_eq!(vc.phase(), FocusPhase::Idle);

		let target = vc.focus_target(&ns[1]);
		assert!((vc.transform.x - target.x).abs() < 1e-6);
		assert!((vc.transform.y - target.y).abs() < 1e-6);
		assert!((vc.transform.k - target.k).abs() < 1e-6);
	}

	#[test]
	fn auto_focus_does_not_repeat_for_same_step() {
		let mut vc = ViewportController::new(1200.0, 800.0);
		let ns = nodes(3);
		vc.sync_current_step(Some(1));
		run(&mut vc, &ns, 2.0);

		vc.sync_current_step(Some(1));
		assert!(run(&mut vc, &ns, 2.0).is_empty());
	}

	#[test]
	fn manual_trigger_replays_same_step() {
		let mut vc = ViewportController::new(1200.0, 800.0);
		let ns = nodes(3);
		vc.sync_current_step(Some(1));
		run(&mut vc, &ns, 2.0);

		vc.sync_focus_trigger(1, 1);
		let events = run(&mut vc, &ns, 2.0);
		assert_eq!(
			events,
			vec![ViewportEvent::FocusStarted, ViewportEvent::FocusEnded]
		);

		// Re-seeing the same counter value is a no-op.
		vc.sync_focus_trigger(1, 1);
		assert!(run(&mut vc, &ns, 2.0).is_empty());
	}

	#[test]
	fn overlapping_requests_resolve_last_wins() {
		let mut vc = ViewportController::new(1200.0, 800.0);
		let ns = nodes(3);
		vc.sync_current_step(Some(0));
		// Let the first animation start, then preempt it mid-flight.
		let first = run(&mut vc, &ns, 0.5);
		assert_eq!(first, vec![ViewportEvent::FocusStarted]);
		assert_eq!(vc.phase(), FocusPhase::Focusing);

		vc.sync_focus_trigger(1, 2);
		run(&mut vc, &ns, 3.0);

		let target = vc.focus_target(&ns[2]);
		assert!((vc.transform.x - target.x).abs() < 1e-6);
		assert!((vc.transform.y - target.y).abs() < 1e-6);
	}

	#[test]
	fn cancel_drops_pending_triggers() {
		let mut vc = ViewportController::new(1200.0, 800.0);
		let ns = nodes(3);
		vc.sync_current_step(Some(1));
		vc.cancel_pending();
		assert!(run(&mut vc, &ns, 2.0).is_empty());
	}

	#[test]
	fn missing_focus_target_is_a_noop() {
		let mut vc = ViewportController::new(1200.0, 800.0);
		let ns = nodes(2);
		vc.sync_current_step(Some(99));
		assert!(run(&mut vc, &ns, 2.0).is_empty());
		assert_eq!(vc.phase(), FocusPhase::Idle);
	}

	#[test]
	fn pan_is_clamped_to_bounds() {
		let mut vc = ViewportController::new(400.0, 300.0);
		let bounds = ContentBounds {
			min_x: 0.0,
			max_x: 2000.0,
			min_y: 0.0,
			max_y: 2000.0,
		};
		vc.transform.k = 1.0;
		vc.pan_by(10_000.0, 10_000.0, &bounds);
		assert!(vc.transform.x <= 0.0);
		assert!(vc.transform.y <= 0.0);
		vc.pan_by(-100_000.0, -100_000.0, &bounds);
		assert_eq!(vc.transform.x, 400.0 - 2000.0);
		assert_eq!(vc.transform.y, 300.0 - 2000.0);
	}

	#[test]
	fn small_content_gets_centered() {
		let mut vc = ViewportController::new(1000.0, 1000.0);
		let bounds = ContentBounds {
			min_x: 0.0,
			max_x: 200.0,
			min_y: 0.0,
			max_y: 200.0,
		};
		vc.transform.k = 1.0;
		vc.pan_by(12_345.0, -9_876.0, &bounds);
		assert_eq!(vc.transform.x, 400.0);
		assert_eq!(vc.transform.y, 400.0);
	}

	#[test]
	fn zoom_is_clamped() {
		let mut vc = ViewportController::new(800.0, 600.0);
		let bounds = ContentBounds {
			min_x: -1000.0,
			max_x: 2000.0,
			min_y: -1000.0,
			max_y: 2000.0,
		};
		for _ in 0..100 {
			vc.zoom_at(400.0, 300.0, 1.1, &bounds);
		}
		assert_eq!(vc.transform.k, MAX_ZOOM);
		for _ in 0..200 {
			vc.zoom_at(400.0, 300.0, 0.9, &bounds);
		}
		assert_eq!(vc.transform.k, MIN_ZOOM);
	}
}
