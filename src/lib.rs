//! roadmap-graph: Interactive visualization of weekly learning roadmaps.
//!
//! This crate provides a WASM-based roadmap component that renders a
//! serpentine week-by-week study plan with sequential unlock gating,
//! completion tracking, and camera control (initial framing, auto-focus on
//! the current step, bounded pan/zoom).

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::roadmap_graph::{
	Roadmap, RoadmapCanvas, RoadmapData, TopicDetails, WeekDefinition, WeekProgress,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("roadmap-graph: logging initialized");
}

/// Load JSON from a script element by id.
fn load_json<T: DeserializeOwned>(id: &str) -> Option<T> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<T>(&json_text) {
		Ok(data) => Some(data),
		Err(e) => {
			warn!("roadmap-graph: failed to parse #{id}: {e}");
			None
		}
	}
}

/// Main application component.
///
/// Loads the roadmap from `#roadmap-data` and initial progress from
/// `#progress-data`, then renders the interactive roadmap. A missing or
/// malformed roadmap renders the empty placeholder state rather than
/// failing.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let roadmap: RoadmapData = load_json("roadmap-data").unwrap_or_default();
	let initial_progress: Vec<WeekProgress> = load_json("progress-data").unwrap_or_default();
	info!(
		"roadmap-graph: loaded {} weeks, {} progress records",
		roadmap.weeks.len(),
		initial_progress.len()
	);

	let (progress, set_progress) = signal(initial_progress);

	// Local progress tracker: marks the toggled subtopic complete and
	// recomputes the week percentage. A real deployment replaces this with
	// the backend collaborator.
	let on_progress_update = Callback::new({
		let weeks = roadmap.weeks.clone();
		move |(week_number, subtopic_id, completed): (u32, String, bool)| {
			let total_tasks = weeks
				.iter()
				.find(|w| w.week_number == week_number)
				.map_or(0, |w| w.tasks.len());
			set_progress.update(|records| {
				let record = match records.iter_mut().find(|p| p.week_number == week_number) {
					Some(record) => record,
					None => {
						records.push(WeekProgress {
							week_number,
							completion_percentage: 0.0,
							completed_tasks: Vec::new(),
						});
						records.last_mut().unwrap()
					}
				};
				if completed {
					if !record.completed_tasks.contains(&subtopic_id) {
						record.completed_tasks.push(subtopic_id);
					}
				} else {
					record.completed_tasks.retain(|t| t != &subtopic_id);
				}
				record.completion_percentage = if total_tasks == 0 {
					0.0
				} else {
					record.completed_tasks.len() as f64 / total_tasks as f64 * 100.0
				};
			});
		}
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Learning Roadmap" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-roadmap">
			<Roadmap roadmap=roadmap progress=progress on_progress_update=on_progress_update />
		</div>
	}
}
