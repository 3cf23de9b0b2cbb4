//! The route table and navigation entry points.
//!
//! A [`Router`] is an ordered list of [`Route`]s plus a history strategy and
//! an optional fallback view. It is built once at application start, is
//! immutable afterwards, and is shared behind `Arc` by the hosting shell.
//! Resolution is a stateless first-match scan; navigation awaits lazy view
//! loads before recording the new location.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::RouterError;
use crate::history::{BasePath, History, HistoryEntry, HistoryMode, NavigationType};
use crate::params::RouteParams;
use crate::route::Route;
use crate::view::{View, ViewFactory};

/// Cuts the query string and fragment from a path.
fn trim_query(path: &str) -> &str {
	match path.find(['?', '#']) {
		Some(cut) => &path[..cut],
		None => path,
	}
}

/// A matched route with its captured parameters.
#[derive(Debug, Clone)]
pub struct RouteMatch {
	/// The matched route.
	route: Route,
	/// Parameters captured from the path.
	params: RouteParams,
}

impl RouteMatch {
	/// Returns the matched route.
	pub fn route(&self) -> &Route {
		&self.route
	}

	/// Returns the matched route's name.
	pub fn name(&self) -> &str {
		self.route.name()
	}

	/// Returns the captured parameters.
	pub fn params(&self) -> &RouteParams {
		&self.params
	}

	/// Produces the matched route's view, loading it first if lazily bound.
	///
	/// # Errors
	///
	/// Returns [`RouterError::LoadFailed`] if a lazy load fails.
	pub async fn view(&self) -> Result<View, RouterError> {
		self.route.binding().resolve().await
	}
}

/// The client-side route table.
///
/// # Example
///
/// ```
/// use waypoint::{Route, Router, View};
///
/// let router = Router::new()
/// 	.route(Route::view("home", "/", || View::text("Home")))
/// 	.route(Route::view("device-detail", "/device/:id", || View::Empty))
/// 	.route(Route::lazy("about", "/about", || {
/// 		Box::pin(async { Ok(View::text("About")) })
/// 	}));
///
/// let matched = router.resolve("/device/42").unwrap();
/// assert_eq!(matched.name(), "device-detail");
/// assert_eq!(matched.params().get("id"), Some("42"));
/// ```
pub struct Router {
	/// Registered routes in declaration order.
	routes: Vec<Route>,
	/// Route name → index into `routes`.
	named: HashMap<String, usize>,
	/// Base path prefix.
	base: BasePath,
	/// Selected history strategy.
	mode: HistoryMode,
	/// Fallback view for unmatched paths.
	fallback: Option<ViewFactory>,
	/// Recorded navigation entries.
	history: History,
}

impl Default for Router {
	fn default() -> Self {
		Self::new()
	}
}

impl Router {
	/// Creates an empty router with the build-environment base path and web
	/// history.
	pub fn new() -> Self {
		Self {
			routes: Vec::new(),
			named: HashMap::new(),
			base: BasePath::from_build_env(),
			mode: HistoryMode::default(),
			fallback: None,
			history: History::new(),
		}
	}

	/// Overrides the base path prefix.
	pub fn with_base(mut self, prefix: impl Into<String>) -> Self {
		self.base = BasePath::new(prefix);
		self
	}

	/// Selects the history strategy.
	pub fn with_history(mut self, mode: HistoryMode) -> Self {
		self.mode = mode;
		self
	}

	/// Registers a route.
	///
	/// # Panics
	///
	/// Panics if a route with the same name is already registered. The
	/// table is declared at startup, so a name collision is a programming
	/// error; use [`Router::try_route`] for fallible registration.
	pub fn route(self, route: Route) -> Self {
		let name = route.name().to_string();
		self.try_route(route)
			.unwrap_or_else(|e| panic!("failed to register route '{}': {}", name, e))
	}

	/// Fallible variant of [`Router::route`].
	///
	/// # Errors
	///
	/// Returns [`RouterError::DuplicateName`] if the name is taken.
	pub fn try_route(mut self, route: Route) -> Result<Self, RouterError> {
		if self.named.contains_key(route.name()) {
			return Err(RouterError::DuplicateName(route.name().to_string()));
		}
		self.named.insert(route.name().to_string(), self.routes.len());
		self.routes.push(route);
		Ok(self)
	}

	/// Sets the fallback view rendered when no route matches.
	pub fn fallback<F>(mut self, factory: F) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		self.fallback = Some(Arc::new(factory));
		self
	}

	/// Returns the selected history strategy.
	pub fn history_mode(&self) -> HistoryMode {
		self.mode
	}

	/// Returns the base path prefix.
	pub fn base(&self) -> &str {
		self.base.as_str()
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.routes.len()
	}

	/// Checks whether a route name is registered.
	pub fn has_route(&self, name: &str) -> bool {
		self.named.contains_key(name)
	}

	/// Returns the registered routes in declaration order.
	pub fn routes(&self) -> impl Iterator<Item = &Route> {
		self.routes.iter()
	}

	/// Reduces a navigated path to the local form the table matches on:
	/// query string and fragment cut, base prefix stripped.
	///
	/// Returns `None` for paths outside the base prefix.
	fn local_path<'a>(&self, path: &'a str) -> Option<&'a str> {
		let path = trim_query(path);
		let Some(path) = self.base.strip(path) else {
			debug!(path, base = self.base.as_str(), "path outside base prefix");
			return None;
		};
		Some(if path.is_empty() { "/" } else { path })
	}

	/// Resolves a concrete path to a route.
	///
	/// The base prefix is stripped and any query string or fragment is
	/// ignored; the remaining path is scanned against the table in order
	/// and the first match wins. Returns `None` for paths outside the base
	/// or matching no route.
	pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
		let path = self.local_path(path)?;

		for route in &self.routes {
			if let Some(params) = route.matches(path) {
				debug!(path, route = route.name(), "resolved route");
				return Some(RouteMatch {
					route: route.clone(),
					params,
				});
			}
		}
		debug!(path, "no route matched");
		None
	}

	/// Resolves a path or reports [`RouterError::NoMatch`].
	pub fn resolve_required(&self, path: &str) -> Result<RouteMatch, RouterError> {
		self.resolve(path)
			.ok_or_else(|| RouterError::NoMatch(path.to_string()))
	}

	/// Navigates to a path, appending a history entry.
	///
	/// Resolves the path, awaits the view (loading lazy views on first
	/// visit), then records the entry. Unmatched paths render the fallback
	/// view when one is set and error otherwise.
	///
	/// # Errors
	///
	/// Returns [`RouterError::NoMatch`] without a fallback, or
	/// [`RouterError::LoadFailed`] when a lazy load fails; nothing is
	/// recorded in either case.
	pub async fn push(&self, path: &str) -> Result<View, RouterError> {
		self.navigate(path, NavigationType::Push).await
	}

	/// Navigates to a path, replacing the current history entry.
	///
	/// # Errors
	///
	/// Same conditions as [`Router::push`].
	pub async fn replace(&self, path: &str) -> Result<View, RouterError> {
		self.navigate(path, NavigationType::Replace).await
	}

	async fn navigate(&self, path: &str, nav_type: NavigationType) -> Result<View, RouterError> {
		// History entries carry the local path, matching what resolution
		// saw; paths outside the base keep their trimmed navigated form.
		let recorded = self.local_path(path).unwrap_or_else(|| trim_query(path));

		match self.resolve(path) {
			Some(matched) => {
				let view = matched.view().await?;
				self.history.record(
					HistoryEntry {
						path: recorded.to_string(),
						route_name: Some(matched.name().to_string()),
						params: matched.params().clone(),
					},
					nav_type,
				);
				Ok(view)
			}
			None => match &self.fallback {
				Some(factory) => {
					warn!(path, "no route matched, rendering fallback");
					self.history
						.record(HistoryEntry::unmatched(recorded), nav_type);
					Ok(factory())
				}
				None => Err(RouterError::NoMatch(path.to_string())),
			},
		}
	}

	/// Steps back one history entry, returning the new current entry.
	pub fn back(&self) -> Option<HistoryEntry> {
		self.history.back()
	}

	/// Returns the current history entry.
	pub fn current(&self) -> Option<HistoryEntry> {
		self.history.current()
	}

	/// Returns the number of recorded history entries.
	pub fn history_len(&self) -> usize {
		self.history.len()
	}

	/// Generates a concrete path for a named route.
	///
	/// The result carries the base prefix, so it can be handed straight to
	/// the navigation methods or to an anchor tag.
	///
	/// # Errors
	///
	/// Returns [`RouterError::UnknownName`] for an unregistered name and
	/// [`RouterError::MissingParameter`] when a dynamic segment has no
	/// value.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		let index = self
			.named
			.get(name)
			.ok_or_else(|| RouterError::UnknownName(name.to_string()))?;

		let params: HashMap<String, String> = params
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();

		let path = self.routes[*index].pattern().reverse(&params)?;
		Ok(self.base.join(&path))
	}
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.routes)
			.field("base", &self.base.as_str())
			.field("mode", &self.mode)
			.field("has_fallback", &self.fallback.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn home_view() -> View {
		View::text("Home")
	}

	fn device_view() -> View {
		View::text("Device")
	}

	fn table() -> Router {
		Router::new()
			.with_base("")
			.route(Route::view("home", "/", home_view))
			.route(Route::view("device-detail", "/device/:id", device_view))
			.route(Route::lazy("about", "/about", || {
				Box::pin(async { Ok(View::text("About")) })
			}))
	}

	#[test]
	fn test_register_routes() {
		let router = table();
		assert_eq!(router.route_count(), 3);
		assert!(router.has_route("home"));
		assert!(router.has_route("device-detail"));
		assert!(router.has_route("about"));
		assert!(!router.has_route("nonexistent"));
	}

	#[test]
	fn test_duplicate_name_rejected() {
		let router = Router::new().route(Route::view("home", "/", home_view));
		let err = router
			.try_route(Route::view("home", "/home", home_view))
			.unwrap_err();
		assert_eq!(err, RouterError::DuplicateName("home".to_string()));
	}

	#[test]
	#[should_panic(expected = "duplicate route name")]
	fn test_duplicate_name_panics_in_builder() {
		let _ = Router::new()
			.route(Route::view("home", "/", home_view))
			.route(Route::view("home", "/home", home_view));
	}

	#[test]
	fn test_history_mode_selection() {
		let router = table();
		assert_eq!(router.history_mode(), HistoryMode::Web);

		let router = Router::new().with_history(HistoryMode::Memory);
		assert_eq!(router.history_mode(), HistoryMode::Memory);
	}

	#[test]
	fn test_resolve_home() {
		let matched = table().resolve("/").unwrap();
		assert_eq!(matched.name(), "home");
		assert!(matched.params().is_empty());
	}

	#[test]
	fn test_resolve_first_match_wins() {
		let router = Router::new()
			.with_base("")
			.route(Route::view("device-detail", "/device/:id", device_view))
			.route(Route::view("device-new", "/device/new", home_view));

		// Declared order decides overlapping patterns
		let matched = router.resolve("/device/new").unwrap();
		assert_eq!(matched.name(), "device-detail");
	}

	#[test]
	fn test_resolve_ignores_query_and_fragment() {
		let matched = table().resolve("/device/42?tab=logs#top").unwrap();
		assert_eq!(matched.name(), "device-detail");
		assert_eq!(matched.params().get("id"), Some("42"));
	}

	#[test]
	fn test_resolve_required_reports_no_match() {
		let err = table().resolve_required("/nonexistent").unwrap_err();
		assert_eq!(err, RouterError::NoMatch("/nonexistent".to_string()));
	}

	#[test]
	fn test_resolve_with_base_prefix() {
		let router = Router::new()
			.with_base("/app")
			.route(Route::view("device-detail", "/device/:id", device_view));

		let matched = router.resolve("/app/device/7").unwrap();
		assert_eq!(matched.params().get("id"), Some("7"));
		assert!(router.resolve("/device/7").is_none());
	}

	#[test]
	fn test_reverse() {
		let router = table();
		assert_eq!(
			router.reverse("device-detail", &[("id", "42")]).unwrap(),
			"/device/42"
		);
		assert_eq!(router.reverse("home", &[]).unwrap(), "/");
	}

	#[test]
	fn test_reverse_with_base_prefix() {
		let router = Router::new()
			.with_base("/app")
			.route(Route::view("device-detail", "/device/:id", device_view));

		assert_eq!(
			router.reverse("device-detail", &[("id", "42")]).unwrap(),
			"/app/device/42"
		);
	}

	#[test]
	fn test_reverse_unknown_name() {
		let err = table().reverse("nonexistent", &[]).unwrap_err();
		assert_eq!(err, RouterError::UnknownName("nonexistent".to_string()));
	}

	#[test]
	fn test_reverse_missing_param() {
		let err = table().reverse("device-detail", &[]).unwrap_err();
		assert!(matches!(err, RouterError::MissingParameter { .. }));
	}

	#[tokio::test]
	async fn test_push_records_history() {
		let router = table();
		let view = router.push("/").await.unwrap();
		assert_eq!(view, View::text("Home"));

		router.push("/device/42").await.unwrap();
		assert_eq!(router.history_len(), 2);

		let current = router.current().unwrap();
		assert_eq!(current.route_name.as_deref(), Some("device-detail"));
		assert_eq!(current.params.get("id"), Some("42"));
	}

	#[tokio::test]
	async fn test_replace_keeps_single_entry() {
		let router = table();
		router.push("/").await.unwrap();
		router.replace("/about").await.unwrap();

		assert_eq!(router.history_len(), 1);
		assert_eq!(router.current().unwrap().route_name.as_deref(), Some("about"));
	}

	#[tokio::test]
	async fn test_back_steps_to_previous_entry() {
		let router = table();
		router.push("/").await.unwrap();
		router.push("/about").await.unwrap();

		let entry = router.back().unwrap();
		assert_eq!(entry.route_name.as_deref(), Some("home"));
	}

	#[tokio::test]
	async fn test_push_unmatched_without_fallback_errors() {
		let router = table();
		let err = router.push("/nonexistent").await.unwrap_err();
		assert_eq!(err, RouterError::NoMatch("/nonexistent".to_string()));
		assert_eq!(router.history_len(), 0);
	}

	#[tokio::test]
	async fn test_push_unmatched_with_fallback_renders_it() {
		let router = table().fallback(|| View::text("404"));
		let view = router.push("/nonexistent").await.unwrap();
		assert_eq!(view, View::text("404"));

		let current = router.current().unwrap();
		assert_eq!(current.route_name, None);
		assert_eq!(current.path, "/nonexistent");
	}

	#[tokio::test]
	async fn test_recorded_path_is_local() {
		let router = Router::new()
			.with_base("/app")
			.route(Route::view("home", "/", home_view))
			.fallback(|| View::text("404"));

		router.push("/app?welcome=1").await.unwrap();
		assert_eq!(router.current().unwrap().path, "/");

		// In-base unmatched paths are recorded stripped too
		router.push("/app/missing?q=1").await.unwrap();
		assert_eq!(router.current().unwrap().path, "/missing");

		// Outside the base only the query and fragment are cut
		router.push("/elsewhere#frag").await.unwrap();
		assert_eq!(router.current().unwrap().path, "/elsewhere");
	}
}
