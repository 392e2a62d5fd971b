//! Roadmap data structures supplied by the surrounding application.
//!
//! Field names follow the roadmap JSON produced by the backend: a roadmap is
//! an ordered list of weeks, progress is one record per started week, and
//! topic details are the `/topic-details` response shape.

use serde::Deserialize;

/// One week of the roadmap curriculum. Externally supplied, immutable.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct WeekDefinition {
	/// 1-based, unique, contiguous week number.
	pub week_number: u32,
	/// Week theme/title, e.g. "Tech Stack Foundation".
	pub theme: String,
	/// Focus area tag, e.g. "algorithms_data_structures".
	#[serde(default)]
	pub focus_area: String,
	/// Ordered task list for the week.
	#[serde(default)]
	pub tasks: Vec<String>,
	/// Estimated effort in hours.
	#[serde(default)]
	pub estimated_hours: u32,
	/// Concrete deliverables for the week.
	#[serde(default)]
	pub deliverables: Vec<String>,
	/// Suggested learning resources.
	#[serde(default)]
	pub resources: Vec<String>,
}

/// Completion state for one week. Produced by the external progress tracker;
/// the graph engine treats it as read-only input.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WeekProgress {
	/// Week this record belongs to.
	pub week_number: u32,
	/// Completion percentage, 0-100 inclusive.
	#[serde(default)]
	pub completion_percentage: f64,
	/// Identifiers of completed tasks within the week.
	#[serde(default)]
	pub completed_tasks: Vec<String>,
}

/// Personalization metadata attached to a generated roadmap.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct PersonalizationFactors {
	/// Self-reported experience level ("Beginner", "Intermediate", "Advanced").
	#[serde(default)]
	pub experience_level: Option<String>,
}

/// Complete roadmap: the week list plus optional personalization.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RoadmapData {
	pub weeks: Vec<WeekDefinition>,
	#[serde(default)]
	pub personalization_factors: Option<PersonalizationFactors>,
}

impl RoadmapData {
	/// Experience level for detail requests, lowercased. Defaults to
	/// "intermediate" when personalization is absent.
	pub fn user_level(&self) -> String {
		self.personalization_factors
			.as_ref()
			.and_then(|p| p.experience_level.as_deref())
			.map(|level| level.to_lowercase())
			.unwrap_or_else(|| "intermediate".to_string())
	}
}

/// Request payload for a topic-detail lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct TopicQuery {
	/// The topic to explain (the week theme).
	pub topic: String,
	/// Context for the explanation (focus area and deliverables).
	pub context: String,
	/// Learner experience level ("beginner", "intermediate", "advanced").
	pub user_level: String,
}

/// Response payload of a topic-detail lookup.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TopicDetails {
	/// False when the payload is a locally synthesized fallback.
	pub success: bool,
	/// Explanation text (markdown).
	pub explanation: String,
	#[serde(default)]
	pub resources: Vec<String>,
	#[serde(default)]
	pub subtasks: Vec<String>,
	/// Whether the backend served this from cache.
	#[serde(default)]
	pub cached: bool,
}
