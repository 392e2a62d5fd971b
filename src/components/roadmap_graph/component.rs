//! Leptos components for the roadmap view.
//!
//! [`RoadmapCanvas`] owns the graph state and an animation loop driven by
//! `requestAnimationFrame`, wiring mouse/wheel handlers for node dragging,
//! panning, and zooming. [`Roadmap`] orchestrates the canvas with the week
//! panel and topic-detail modal, and forwards user intents to the external
//! collaborators.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::detail::{StaticDetailSource, TopicDetailSource};
use super::graph::RoadmapNode;
use super::render;
use super::state::{CLICK_SLOP, RoadmapGraphState};
use super::theme::Theme;
use super::types::{RoadmapData, TopicDetails, WeekDefinition, WeekProgress};
use super::viewport::ViewportEvent;

/// Bundles graph state with the active theme.
struct CanvasContext {
	state: RoadmapGraphState,
	theme: Theme,
}

/// Renders the interactive roadmap graph on a canvas element.
///
/// The component sizes itself to its parent container by default; set
/// `fullscreen = true` to fill the viewport. Node positions come from the
/// serpentine layout; progress changes rebuild the derived graph in place.
#[component]
pub fn RoadmapCanvas(
	#[prop(into)] weeks: Signal<Vec<WeekDefinition>>,
	#[prop(into)] progress: Signal<Vec<WeekProgress>>,
	/// Monotonic counter; each advance replays the focus-current-step
	/// animation.
	#[prop(into)] focus_trigger: Signal<u64>,
	#[prop(into, optional)] on_node_click: Option<Callback<RoadmapNode>>,
	/// Invoked with `true` when a focus animation starts and `false` when
	/// it completes.
	#[prop(into, optional)] on_focus_change: Option<Callback<bool>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<CanvasContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let stopped = Arc::new(AtomicBool::new(false));
	let (context_init, animate_init, resize_cb_init, stopped_init) = (
		context.clone(),
		animate.clone(),
		resize_cb.clone(),
		stopped.clone(),
	);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = if fullscreen {
			(
				window.inner_width().unwrap().as_f64().unwrap(),
				window.inner_height().unwrap().as_f64().unwrap(),
			)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: web_sys::CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		*context_init.borrow_mut() = Some(CanvasContext {
			state: RoadmapGraphState::new(
				weeks.get_untracked(),
				&progress.get_untracked(),
				w,
				h,
			),
			theme: Theme::default(),
		});

		if fullscreen {
			let (context_resize, canvas_resize) = (context_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let win: Window = web_sys::window().unwrap();
				let (nw, nh) = (
					win.inner_width().unwrap().as_f64().unwrap(),
					win.inner_height().unwrap().as_f64().unwrap(),
				);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut c) = *context_resize.borrow_mut() {
					c.state.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (context_anim, animate_inner, stopped_anim) = (
			context_init.clone(),
			animate_init.clone(),
			stopped_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if stopped_anim.load(Ordering::Relaxed) {
				// Last frame after teardown: drop scheduled focus triggers
				// so nothing fires against a torn-down view.
				if let Some(ref mut c) = *context_anim.borrow_mut() {
					c.state.viewport.cancel_pending();
				}
				return;
			}
			if let Some(ref mut c) = *context_anim.borrow_mut() {
				let dt = 0.016;
				for event in c.state.tick(dt) {
					if let Some(cb) = &on_focus_change {
						cb.run(event == ViewportEvent::FocusStarted);
					}
				}
				render::render(&c.state, &ctx, &c.theme);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Rebuild the derived graph whenever progress changes.
	let context_progress = context.clone();
	Effect::new(move |_| {
		let p = progress.get();
		if let Some(ref mut c) = *context_progress.borrow_mut() {
			c.state.rebuild(&p);
		}
	});

	// Manual focus replays.
	let context_trigger = context.clone();
	Effect::new(move |_| {
		let trigger = focus_trigger.get();
		if let Some(ref mut c) = *context_trigger.borrow_mut() {
			let step = c.state.current_step;
			c.state.viewport.sync_focus_trigger(trigger, step);
		}
	});

	// Unmount: the loop observes the flag on its next frame, cancels any
	// pending focus trigger, and stops rescheduling itself.
	let stopped_cleanup = stopped.clone();
	on_cleanup(move || {
		stopped_cleanup.store(true, Ordering::Relaxed);
	});

	let context_md = context.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_md.borrow_mut() {
			if let Some(index) = c.state.node_at_position(x, y) {
				c.state.drag.active = true;
				c.state.drag.node = Some(index);
				c.state.drag.start_x = x;
				c.state.drag.start_y = y;
				c.state.drag.node_start = c.state.nodes[index].position;
				c.state.drag.moved = false;
			} else {
				c.state.pan.active = true;
				c.state.pan.start_x = x;
				c.state.pan.start_y = y;
				c.state.pan.transform_start_x = c.state.viewport.transform.x;
				c.state.pan.transform_start_y = c.state.viewport.transform.y;
				c.state.pan.moved = false;
			}
		}
	};

	let context_mm = context.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_mm.borrow_mut() {
			if c.state.drag.active {
				let slop = (x - c.state.drag.start_x).abs().max((y - c.state.drag.start_y).abs());
				if slop > CLICK_SLOP {
					c.state.drag.moved = true;
				}
				if c.state.drag.moved {
					if let Some(index) = c.state.drag.node {
						let k = c.state.viewport.transform.k;
						let (dx, dy) = (
							(x - c.state.drag.start_x) / k,
							(y - c.state.drag.start_y) / k,
						);
						let (nx, ny) = (
							c.state.drag.node_start.0 + dx,
							c.state.drag.node_start.1 + dy,
						);
						c.state.drag_node_to(index, nx, ny);
					}
				}
			} else if c.state.pan.active {
				c.state.pan.moved = true;
				c.state.pan_to(x, y);
			}
		}
	};

	let context_mu = context.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_mu.borrow_mut() {
			if c.state.drag.active && !c.state.drag.moved {
				// A press without movement is a click on the node.
				if let (Some(index), Some(cb)) = (c.state.drag.node, &on_node_click) {
					if let Some(node) = c.state.nodes.get(index) {
						cb.run(node.clone());
					}
				}
			}
			c.state.drag.active = false;
			c.state.drag.node = None;
			c.state.pan.active = false;
		}
	};

	let context_ml = context.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *context_ml.borrow_mut() {
			c.state.drag.active = false;
			c.state.drag.node = None;
			c.state.pan.active = false;
		}
	};

	let context_wh = context.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *context_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.state.zoom_at(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="roadmap-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

/// Change the location hash to the week-detail destination.
fn navigate_to_week(week_number: u32) {
	if let Some(window) = web_sys::window() {
		if window
			.location()
			.set_hash(&format!("#/week/{week_number}"))
			.is_err()
		{
			warn!("failed to navigate to week {week_number}");
		}
	}
}

/// Full roadmap view: canvas, selected-week panel, and topic-detail modal.
///
/// Owns the interaction state (selection, modal visibility, focus trigger)
/// and forwards task toggles, detail requests, and node activations to the
/// external collaborators. Locked nodes never reach a collaborator.
#[component]
pub fn Roadmap(
	roadmap: RoadmapData,
	#[prop(into)] progress: Signal<Vec<WeekProgress>>,
	/// Progress-update collaborator: `(week_number, subtopic_id, completed)`.
	#[prop(into, optional)] on_progress_update: Option<Callback<(u32, String, bool)>>,
	/// Notified with the week number when an unlocked node is activated.
	#[prop(into, optional)] on_node_click: Option<Callback<u32>>,
	/// Topic-detail collaborator; defaults to the offline source.
	#[prop(optional)] details: Option<Arc<dyn TopicDetailSource>>,
) -> impl IntoView {
	let details = details.unwrap_or_else(|| Arc::new(StaticDetailSource));
	let user_level = roadmap.user_level();
	let weeks = roadmap.weeks.clone();
	let is_empty = weeks.is_empty();

	let (selected, set_selected) = signal(None::<RoadmapNode>);
	let (modal_open, set_modal_open) = signal(false);
	let (detail, set_detail) = signal(None::<TopicDetails>);
	let (loading, set_loading) = signal(false);
	let (focus_trigger, set_focus_trigger) = signal(0u64);
	let (is_focusing, set_is_focusing) = signal(false);

	let handle_node_click = Callback::new(move |node: RoadmapNode| {
		if node.is_locked {
			debug!("selection blocked on locked {}", node.id);
			return;
		}
		set_selected.set(Some(node));
	});

	let handle_focus_change = Callback::new(move |focusing: bool| {
		set_is_focusing.set(focusing);
	});

	let request_details = move |node: &RoadmapNode| {
		let Some(query) = node.detail_query(&user_level) else {
			return;
		};
		set_modal_open.set(true);
		set_loading.set(true);
		set_detail.set(None);
		let source = details.clone();
		// Closing the modal does not abort the request; the last settled
		// response wins the detail slot.
		spawn_local(async move {
			let topic = query.topic.clone();
			match source.fetch(query).await {
				Ok(payload) => set_detail.set(Some(payload)),
				Err(e) => {
					warn!("topic detail fetch failed: {e}");
					set_detail.set(Some(TopicDetails::unavailable(&topic)));
				}
			}
			set_loading.set(false);
		});
	};

	let open_week = move |node: &RoadmapNode| {
		let Some(week_number) = node.activate() else {
			return;
		};
		navigate_to_week(week_number);
		if let Some(cb) = &on_node_click {
			cb.run(week_number);
		}
	};

	let panel = move || {
		let node = selected.get()?;
		let toggle_node = node.clone();
		let detail_node = node.clone();
		let open_node = node.clone();
		let request_details = request_details.clone();
		let open_week = open_week.clone();

		let tasks = node
			.week
			.tasks
			.iter()
			.enumerate()
			.map(|(index, task)| {
				let toggle_node = toggle_node.clone();
				let subtopic_id = format!("{}-{}", node.week.week_number, index);
				let checked = Signal::derive({
					let subtopic_id = subtopic_id.clone();
					let week_number = node.week.week_number;
					move || {
						progress
							.get()
							.iter()
							.find(|p| p.week_number == week_number)
							.is_some_and(|p| p.completed_tasks.contains(&subtopic_id))
					}
				});
				view! {
					<li class="week-task">
						<label>
							<input
								type="checkbox"
								prop:checked=move || checked.get()
								on:change=move |ev| {
									let completed = event_target_checked(&ev);
									toggle_node.toggle_task(index, completed, |week, subtopic, done| {
										if let Some(cb) = &on_progress_update {
											cb.run((week, subtopic, done));
										}
									});
								}
							/>
							{task.clone()}
						</label>
					</li>
				}
			})
			.collect_view();

		Some(view! {
			<aside class="week-panel">
				<h2>{format!("Week {}: {}", node.week.week_number, node.week.theme)}</h2>
				<p class="focus-area">{node.week.focus_area.clone()}</p>
				<ul class="week-tasks">{tasks}</ul>
				<div class="week-actions">
					<button on:click=move |_| request_details(&detail_node)>
						"Explain this week"
					</button>
					<button on:click=move |_| open_week(&open_node)>"Open week"</button>
					<button on:click=move |_| set_selected.set(None)>"Close"</button>
				</div>
			</aside>
		})
	};

	let modal = move || {
		if !modal_open.get() {
			return None;
		}
		let body = if loading.get() {
			view! { <p class="detail-loading">"Generating explanation..."</p> }.into_any()
		} else if let Some(payload) = detail.get() {
			let resources = payload
				.resources
				.iter()
				.map(|r| view! { <li>{r.clone()}</li> })
				.collect_view();
			let subtasks = payload
				.subtasks
				.iter()
				.map(|s| view! { <li>{s.clone()}</li> })
				.collect_view();
			view! {
				<div class="detail-body">
					<p>{payload.explanation.clone()}</p>
					<h3>"Resources"</h3>
					<ul>{resources}</ul>
					<h3>"Subtasks"</h3>
					<ul>{subtasks}</ul>
				</div>
			}
			.into_any()
		} else {
			view! { <p class="detail-loading">"..."</p> }.into_any()
		};
		Some(view! {
			<div class="detail-modal">
				{body}
				<button on:click=move |_| set_modal_open.set(false)>"Close"</button>
			</div>
		})
	};

	view! {
		<div class="roadmap-view" class:focusing=move || is_focusing.get()>
			{if is_empty {
				view! {
					<div class="roadmap-empty">
						<p>"No roadmap yet. Complete onboarding to generate one."</p>
					</div>
				}
				.into_any()
			} else {
				view! {
					<RoadmapCanvas
						weeks=Signal::derive(move || weeks.clone())
						progress=progress
						focus_trigger=focus_trigger
						on_node_click=handle_node_click
						on_focus_change=handle_focus_change
						fullscreen=true
					/>
				}
				.into_any()
			}}
			<div class="roadmap-toolbar">
				<button on:click=move |_| set_focus_trigger.update(|t| *t += 1)>
					"Focus current week"
				</button>
			</div>
			{panel}
			{modal}
		</div>
	}
}
