//! History strategy, base-path handling, and navigation entries.
//!
//! The browser's history engine is a black-box dependency of the hosting
//! shell. This module models what the route table itself needs from it: a
//! strategy selector, the base-path prefix applied to every path, and an
//! in-process entry stack that mirrors push/replace/back semantics so the
//! routing contract stays observable outside a browser. On a browser host
//! the shell bridges recorded entries to `pushState`/`replaceState` using
//! [`HistoryEntry::state_json`].

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::params::RouteParams;

/// History strategy for recording navigations.
///
/// The selector is advisory: entry recording is identical under both modes,
/// and the hosting shell reads it to decide whether to mirror entries to the
/// browser via [`HistoryEntry::state_json`]. The browser engine itself is
/// outside this crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryMode {
	/// Path-based web history; the shell mirrors entries to the browser.
	#[default]
	Web,
	/// Purely in-process history, for tests and non-browser hosts.
	Memory,
}

/// How a navigation affects the entry stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// Append a new entry.
	Push,
	/// Overwrite the current entry.
	Replace,
}

/// One recorded navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
	/// The local path: query string and fragment removed, base prefix
	/// stripped. Paths outside the base keep their navigated form minus
	/// query and fragment.
	pub path: String,
	/// The matched route name, if any.
	pub route_name: Option<String>,
	/// Parameters captured by the matched route.
	pub params: RouteParams,
}

impl HistoryEntry {
	/// Creates an entry for an unmatched path.
	pub fn unmatched(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			route_name: None,
			params: RouteParams::new(),
		}
	}

	/// Serializes the entry for a browser `pushState` state object.
	///
	/// # Errors
	///
	/// Returns the underlying serializer error; entry fields are plain
	/// strings and maps, so this only fails on allocation problems.
	pub fn state_json(&self) -> Result<String, serde_json::Error> {
		serde_json::to_string(self)
	}
}

/// In-process navigation history.
#[derive(Debug, Default)]
pub struct History {
	/// Entry stack; the last element is the current location.
	entries: Mutex<Vec<HistoryEntry>>,
}

impl History {
	/// Creates an empty history.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the current entry.
	pub fn current(&self) -> Option<HistoryEntry> {
		self.entries.lock().last().cloned()
	}

	/// Records a navigation.
	pub fn record(&self, entry: HistoryEntry, nav_type: NavigationType) {
		let mut entries = self.entries.lock();
		match nav_type {
			NavigationType::Push => entries.push(entry),
			NavigationType::Replace => {
				entries.pop();
				entries.push(entry);
			}
		}
	}

	/// Steps back one entry, returning the new current entry.
	///
	/// Returns `None` without popping when fewer than two entries exist,
	/// mirroring a browser with no further session history.
	pub fn back(&self) -> Option<HistoryEntry> {
		let mut entries = self.entries.lock();
		if entries.len() < 2 {
			return None;
		}
		entries.pop();
		entries.last().cloned()
	}

	/// Returns the number of recorded entries.
	pub fn len(&self) -> usize {
		self.entries.lock().len()
	}

	/// Returns whether nothing has been recorded yet.
	pub fn is_empty(&self) -> bool {
		self.entries.lock().is_empty()
	}
}

/// Base path prefix applied to every resolved and generated path.
///
/// The default comes from the `WAYPOINT_BASE_URL` build-time environment
/// variable, the build system's equivalent of a deployment sub-path. Empty
/// and `/` both mean "no prefix".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasePath {
	prefix: String,
}

impl BasePath {
	/// Creates a base path, normalizing the prefix.
	///
	/// A trailing slash is dropped and a missing leading slash is added, so
	/// `app/`, `/app`, and `/app/` all normalize to `/app`.
	pub fn new(prefix: impl Into<String>) -> Self {
		let raw: String = prefix.into();
		let trimmed = raw.trim_end_matches('/');
		let prefix = if trimmed.is_empty() {
			String::new()
		} else if trimmed.starts_with('/') {
			trimmed.to_string()
		} else {
			format!("/{}", trimmed)
		};
		Self { prefix }
	}

	/// Creates the base path configured by the build environment.
	pub fn from_build_env() -> Self {
		Self::new(option_env!("WAYPOINT_BASE_URL").unwrap_or(""))
	}

	/// Returns the normalized prefix (empty for no prefix).
	pub fn as_str(&self) -> &str {
		&self.prefix
	}

	/// Strips the prefix from an incoming path.
	///
	/// Returns `None` when the path lies outside the base. Stripping the
	/// whole path yields `/`, so the base path itself resolves as the root.
	pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
		if self.prefix.is_empty() {
			return Some(path);
		}
		let rest = path.strip_prefix(self.prefix.as_str())?;
		if rest.is_empty() {
			Some("/")
		} else if rest.starts_with('/') {
			Some(rest)
		} else {
			// Prefix matched mid-segment, e.g. base "/app" against "/apps"
			None
		}
	}

	/// Prepends the prefix to a generated path.
	pub fn join(&self, path: &str) -> String {
		if self.prefix.is_empty() {
			return path.to_string();
		}
		if path == "/" {
			self.prefix.clone()
		} else {
			format!("{}{}", self.prefix, path)
		}
	}
}

impl Default for BasePath {
	fn default() -> Self {
		Self::from_build_env()
	}
}
