//! Topic-detail lookup collaborator.
//!
//! The fetch is the only true I/O boundary in the roadmap view. Failures
//! never propagate past it: the orchestrator substitutes a synthetic
//! payload so the modal always has something renderable once the request
//! settles.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use super::types::{TopicDetails, TopicQuery};

/// Boxed future returned by [`TopicDetailSource::fetch`].
pub type DetailFuture = Pin<Box<dyn Future<Output = Result<TopicDetails, DetailError>>>>;

/// Failure modes of a topic-detail lookup.
#[derive(Debug, Error)]
pub enum DetailError {
	/// The request itself failed (network, backend 5xx).
	#[error("detail request failed: {0}")]
	Request(String),
	/// The response arrived but could not be decoded.
	#[error("malformed detail response: {0}")]
	Decode(#[from] serde_json::Error),
}

/// Asynchronous provider of week/topic explanations.
///
/// The returned future is polled on the UI thread, but the source handle
/// itself is shared across view closures and must be thread-safe.
pub trait TopicDetailSource: Send + Sync {
	fn fetch(&self, query: TopicQuery) -> DetailFuture;
}

impl TopicDetails {
	/// Synthetic fallback payload substituted when a fetch fails.
	pub fn unavailable(topic: &str) -> Self {
		Self {
			success: false,
			explanation: format!(
				"Unable to generate a detailed explanation for \"{topic}\" right now. \
				 Please try again later."
			),
			resources: Vec::new(),
			subtasks: Vec::new(),
			cached: false,
		}
	}
}

/// Offline source producing canned explanations, useful when no backend is
/// wired up.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticDetailSource;

fn canned(query: &TopicQuery) -> TopicDetails {
	TopicDetails {
		success: true,
		explanation: format!(
			"**{}**\n\nA study guide for this week at the {} level.\n\n**Context:** {}",
			query.topic, query.user_level, query.context
		),
		resources: vec![
			"Official documentation".to_string(),
			"Online tutorials and courses".to_string(),
			"Practice problems and exercises".to_string(),
		],
		subtasks: vec![
			"Review fundamental concepts".to_string(),
			"Practice with simple examples".to_string(),
			"Build a small project to apply knowledge".to_string(),
		],
		cached: false,
	}
}

impl TopicDetailSource for StaticDetailSource {
	fn fetch(&self, query: TopicQuery) -> DetailFuture {
		Box::pin(async move { Ok(canned(&query)) })
	}
}
