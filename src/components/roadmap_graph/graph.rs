//! Graph construction: weeks + progress + layout in, renderable nodes and
//! edges out.
//!
//! The node set is always a total, order-preserving image of the week list.
//! Lock, completion, and current-step flags are derived here; locked nodes
//! swallow every interaction before it can reach a collaborator.

use log::debug;

use super::layout::{self, EdgeDirection};
use super::types::{TopicQuery, WeekDefinition, WeekProgress};
use super::unlock::is_unlocked;

/// A positioned, flagged week node ready for rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadmapNode {
	/// Stable identity, `week-<n>`.
	pub id: String,
	/// Denormalized week content.
	pub week: WeekDefinition,
	/// Top-left corner in world coordinates, fixed by the layout pass.
	pub position: (f64, f64),
	/// Zero-based index along the roadmap sequence.
	pub step_index: usize,
	/// Completion percentage for the week, 0 when no record exists.
	pub completion: f64,
	/// Identifiers of completed tasks, empty when no record exists.
	pub completed_tasks: Vec<String>,
	pub is_completed: bool,
	pub is_locked: bool,
	pub is_current_step: bool,
	pub is_last_step: bool,
}

impl RoadmapNode {
	/// Geometric center of the node card.
	pub fn center(&self) -> (f64, f64) {
		(
			self.position.0 + layout::NODE_WIDTH / 2.0,
			self.position.1 + layout::NODE_HEIGHT / 2.0,
		)
	}

	/// Whether a world-space point falls inside the node card.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.position.0
			&& x <= self.position.0 + layout::NODE_WIDTH
			&& y >= self.position.1
			&& y <= self.position.1 + layout::NODE_HEIGHT
	}

	/// Forward a task toggle to the progress collaborator.
	///
	/// Locked nodes drop the toggle entirely; gated content must stay
	/// non-interactive no matter what the caller intends. The subtopic
	/// identifier is synthesized as `<week>-<task_index>`.
	pub fn toggle_task(&self, task_index: usize, completed: bool, sink: impl FnOnce(u32, String, bool)) {
		if self.is_locked {
			debug!("ignoring task toggle on locked {}", self.id);
			return;
		}
		if task_index >= self.week.tasks.len() {
			debug!("ignoring toggle for unknown task {task_index} on {}", self.id);
			return;
		}
		let subtopic_id = format!("{}-{}", self.week.week_number, task_index);
		sink(self.week.week_number, subtopic_id, completed);
	}

	/// Detail lookup request for this week, or `None` when locked.
	pub fn detail_query(&self, user_level: &str) -> Option<TopicQuery> {
		if self.is_locked {
			debug!("ignoring detail request on locked {}", self.id);
			return None;
		}
		let context = if self.week.deliverables.is_empty() {
			self.week.focus_area.clone()
		} else {
			format!(
				"{}; deliverables: {}",
				self.week.focus_area,
				self.week.deliverables.join(", ")
			)
		};
		Some(TopicQuery {
			topic: self.week.theme.clone(),
			context,
			user_level: user_level.to_string(),
		})
	}

	/// Week number to navigate to on activation, or `None` when locked.
	pub fn activate(&self) -> Option<u32> {
		if self.is_locked {
			debug!("ignoring activation on locked {}", self.id);
			return None;
		}
		Some(self.week.week_number)
	}
}

/// Semantic edge state, evaluated against the target node top to bottom;
/// first match wins. Lock outranks everything, including current-step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
	Locked,
	Completed,
	CurrentStep,
	Default,
}

impl EdgeKind {
	/// Classify the edge entering `target`.
	pub fn classify(target: &RoadmapNode) -> Self {
		if target.is_locked {
			EdgeKind::Locked
		} else if target.is_completed {
			EdgeKind::Completed
		} else if target.is_current_step {
			EdgeKind::CurrentStep
		} else {
			EdgeKind::Default
		}
	}
}

/// Directed edge from node `from` to node `to` (always `to == from + 1`).
#[derive(Clone, Debug, PartialEq)]
pub struct RoadmapEdge {
	pub id: String,
	/// Step index of the source node.
	pub from: usize,
	/// Step index of the target node.
	pub to: usize,
	/// Exit/enter sides chosen by the layout pass.
	pub direction: EdgeDirection,
	pub kind: EdgeKind,
}

/// Index of the week the learner should be working on: the first week whose
/// completion is below 100%, or the last index when everything is done.
/// Returns 0 for an empty roadmap.
pub fn current_step_index(weeks: &[WeekDefinition], progress: &[WeekProgress]) -> usize {
	for (i, week) in weeks.iter().enumerate() {
		let pct = progress
			.iter()
			.find(|p| p.week_number == week.week_number)
			.map_or(0.0, |p| p.completion_percentage);
		if pct < 100.0 {
			return i;
		}
	}
	weeks.len().saturating_sub(1)
}

/// Build the renderable node/edge set.
///
/// Recomputed whenever weeks, progress, or the current-step index change;
/// pure, so unchanged inputs rebuild to a value-equal graph.
pub fn build_graph(
	weeks: &[WeekDefinition],
	progress: &[WeekProgress],
	current_step: usize,
) -> (Vec<RoadmapNode>, Vec<RoadmapEdge>) {
	let plan = layout::layout(weeks.len());

	let nodes: Vec<RoadmapNode> = weeks
		.iter()
		.enumerate()
		.map(|(i, week)| {
			let record = progress.iter().find(|p| p.week_number == week.week_number);
			let completion = record.map_or(0.0, |p| p.completion_percentage);
			RoadmapNode {
				id: format!("week-{}", week.week_number),
				week: week.clone(),
				position: plan.positions[i],
				step_index: i,
				completion,
				completed_tasks: record.map_or_else(Vec::new, |p| p.completed_tasks.clone()),
				is_completed: completion >= 100.0,
				is_locked: !is_unlocked(week.week_number, progress),
				is_current_step: i == current_step,
				is_last_step: i + 1 == weeks.len(),
			}
		})
		.collect();

	let edges = nodes
		.windows(2)
		.enumerate()
		.map(|(i, pair)| RoadmapEdge {
			id: format!("edge-{}-{}", pair[0].id, pair[1].id),
			from: i,
			to: i + 1,
			direction: plan.directions[i],
			kind: EdgeKind::classify(&pair[1]),
		})
		.collect();

	(nodes, edges)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::Cell;

	fn weeks(n: u32) -> Vec<WeekDefinition> {
		(1..=n)
			.map(|week_number| WeekDefinition {
				week_number,
				theme: format!("Week {week_number}"),
				focus_area: "general_preparation".to_string(),
				tasks: vec!["read".to_string(), "build".to_string()],
				estimated_hours: 12,
				deliverables: vec!["summary".to_string()],
				resources: Vec::new(),
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
	fn node_and_edge_counts_track_input() {
		for n in [0u32, 1, 3, 12, 20] {
			let w = weeks(n);
			let (nodes, edges) = build_graph(&w, &[], 0);
			assert_eq!(nodes.len(), n as usize);
			assert_eq!(edges.len(), (n as usize).saturating_sub(1));
		}
	}

	#[test]
	fn current_step_is_first_incomplete() {
		let w = weeks(3);
		assert_eq!(
			current_step_index(&w, &progress(&[(1, 100.0), (2, 60.0), (3, 0.0)])),
			1
		);
	}

	#[test]
	fn current_step_is_last_when_all_complete() {
		let w = weeks(3);
		assert_eq!(
			current_step_index(&w, &progress(&[(1, 100.0), (2, 100.0), (3, 100.0)])),
			2
		);
	}

	#[test]
	fn current_step_defaults_to_start() {
		assert_eq!(current_step_index(&weeks(3), &[]), 0);
		assert_eq!(current_step_index(&[], &[]), 0);
	}

	#[test]
	fn first_complete_week_unlocks_the_next() {
		let w = weeks(3);
		let p = progress(&[(1, 100.0)]);
		let step = current_step_index(&w, &p);
		assert_eq!(step, 1);

		let (nodes, _) = build_graph(&w, &p, step);
		assert!(!nodes[0].is_locked);
		assert!(!nodes[1].is_locked);
		assert!(nodes[2].is_locked);
		assert!(nodes[1].is_current_step);
	}

	#[test]
	fn exactly_one_current_step_flag() {
		let w = weeks(5);
		let (nodes, _) = build_graph(&w, &[], current_step_index(&w, &[]));
		assert_eq!(nodes.iter().filter(|n| n.is_current_step).count(), 1);
	}

	#[test]
	fn last_step_flag_on_final_node_only() {
		let (nodes, _) = build_graph(&weeks(4), &[], 0);
		assert!(nodes[3].is_last_step);
		assert_eq!(nodes.iter().filter(|n| n.is_last_step).count(), 1);
	}

	#[test]
	fn lock_outranks_current_step_on_edges() {
		// Week 3 is locked (week 2 incomplete) but flagged current: the
		// incoming edge must render locked, not current-step.
		let w = weeks(3);
		let p = progress(&[(1, 100.0), (2, 40.0)]);
		let (_, edges) = build_graph(&w, &p, 2);
		assert_eq!(edges[1].kind, EdgeKind::Locked);
	}

	#[test]
	fn edge_kinds_follow_precedence() {
		let w = weeks(4);
		let p = progress(&[(1, 100.0), (2, 100.0), (3, 30.0)]);
		let step = current_step_index(&w, &p);
		assert_eq!(step, 2);
		let (_, edges) = build_graph(&w, &p, step);
		assert_eq!(edges[0].kind, EdgeKind::Completed);
		assert_eq!(edges[1].kind, EdgeKind::CurrentStep);
		assert_eq!(edges[2].kind, EdgeKind::Locked);
	}

	#[test]
	fn rebuild_is_idempotent() {
		let w = weeks(6);
		let p = progress(&[(1, 100.0), (2, 50.0)]);
		let step = current_step_index(&w, &p);
		assert_eq!(build_graph(&w, &p, step), build_graph(&w, &p, step));
	}

	#[test]
	fn locked_node_suppresses_task_toggle() {
		let w = weeks(3);
		let (nodes, _) = build_graph(&w, &[], 0);
		let calls = Cell::new(0u32);
		nodes[2].toggle_task(0, true, |_, _, _| calls.set(calls.get() + 1));
		assert_eq!(calls.get(), 0);
	}

	#[test]
	fn unlocked_node_forwards_task_toggle() {
		let w = weeks(3);
		let (nodes, _) = build_graph(&w, &[], 0);
		let mut seen = None;
		nodes[0].toggle_task(1, true, |week, subtopic, completed| {
			seen = Some((week, subtopic, completed));
		});
		assert_eq!(seen, Some((1, "1-1".to_string(), true)));
	}

	#[test]
	fn out_of_range_task_index_is_dropped() {
		let (nodes, _) = build_graph(&weeks(1), &[], 0);
		let calls = Cell::new(0u32);
		nodes[0].toggle_task(99, true, |_, _, _| calls.set(calls.get() + 1));
		assert_eq!(calls.get(), 0);
	}

	#[test]
	fn locked_node_suppresses_detail_and_activation() {
		let (nodes, _) = build_graph(&weeks(2), &[], 0);
		assert!(nodes[1].detail_query("beginner").is_none());
		assert!(nodes[1].activate().is_none());
	}

	#[test]
	fn detail_query_carries_topic_context_and_level() {
		let (nodes, _) = build_graph(&weeks(1), &[], 0);
		let q = nodes[0].detail_query("advanced").unwrap();
		assert_eq!(q.topic, "Week 1");
		assert!(q.context.contains("general_preparation"));
		assert!(q.context.contains("summary"));
		assert_eq!(q.user_level, "advanced");
	}
}
