//! Interactive roadmap graph component.
//!
//! Converts a linear sequence of weekly study plans plus per-week progress
//! into a 2-D node/edge graph on an HTML canvas:
//! - Serpentine layout with fixed, deterministic node positions
//! - Sequential unlock gating (a week opens when its predecessor is done)
//! - Derived completion/lock/current-step flags and per-edge visual state
//! - Camera control: initial framing, focus-on-current-step, bounded
//!   pan/zoom
//!
//! # Example
//!
//! ```ignore
//! use roadmap_graph::{Roadmap, RoadmapData};
//!
//! let roadmap: RoadmapData = serde_json::from_str(json)?;
//! view! {
//!     <Roadmap
//!         roadmap=roadmap
//!         progress=progress_signal
//!         on_progress_update=on_progress_update
//!     />
//! }
//! ```

mod component;
pub mod detail;
pub mod graph;
pub mod layout;
mod render;
mod state;
pub mod theme;
mod types;
pub mod unlock;
pub mod viewport;

pub use component::{Roadmap, RoadmapCanvas};
pub use detail::{DetailError, StaticDetailSource, TopicDetailSource};
pub use graph::{EdgeKind, RoadmapEdge, RoadmapNode, build_graph, current_step_index};
pub use theme::Theme;
pub use types::{
	PersonalizationFactors, RoadmapData, TopicDetails, TopicQuery, WeekDefinition, WeekProgress,
};
