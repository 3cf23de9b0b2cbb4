//! Route definitions.

use crate::error::PatternError;
use crate::params::RouteParams;
use crate::pattern::PathPattern;
use crate::view::{LoadFuture, View, ViewBinding};

/// A single path→view binding.
///
/// A route couples a compiled [`PathPattern`] with a unique symbolic name and
/// a view binding, either eager or lazy. Routes are built once at application
/// start and registered on a [`Router`](crate::router::Router) in order.
#[derive(Clone)]
pub struct Route {
	/// The compiled path pattern.
	pattern: PathPattern,
	/// Unique symbolic identifier, used for reverse URL generation.
	name: String,
	/// The bound view.
	view: ViewBinding,
}

impl Route {
	/// Creates an eagerly bound route.
	///
	/// # Panics
	///
	/// Panics if the pattern is invalid. Routes are declared at startup, so
	/// a bad pattern is a programming error; use [`Route::try_view`] for
	/// fallible construction.
	pub fn view<F>(name: impl Into<String>, pattern: &str, factory: F) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		Self::try_view(name, pattern, factory)
			.unwrap_or_else(|e| panic!("invalid route pattern '{}': {}", pattern, e))
	}

	/// Creates a lazily bound route.
	///
	/// The loader runs on the first navigation to this route; the loaded
	/// unit is cached forever and concurrent first navigations share one
	/// in-flight load.
	///
	/// # Panics
	///
	/// Panics if the pattern is invalid; use [`Route::try_lazy`] for
	/// fallible construction.
	pub fn lazy<F>(name: impl Into<String>, pattern: &str, loader: F) -> Self
	where
		F: Fn() -> LoadFuture + Send + Sync + 'static,
	{
		Self::try_lazy(name, pattern, loader)
			.unwrap_or_else(|e| panic!("invalid route pattern '{}': {}", pattern, e))
	}

	/// Fallible variant of [`Route::view`].
	pub fn try_view<F>(
		name: impl Into<String>,
		pattern: &str,
		factory: F,
	) -> Result<Self, PatternError>
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		Ok(Self {
			pattern: PathPattern::new(pattern)?,
			name: name.into(),
			view: ViewBinding::eager(factory),
		})
	}

	/// Fallible variant of [`Route::lazy`].
	pub fn try_lazy<F>(
		name: impl Into<String>,
		pattern: &str,
		loader: F,
	) -> Result<Self, PatternError>
	where
		F: Fn() -> LoadFuture + Send + Sync + 'static,
	{
		Ok(Self {
			pattern: PathPattern::new(pattern)?,
			name: name.into(),
			view: ViewBinding::lazy(loader),
		})
	}

	/// Returns the route name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the compiled pattern.
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Returns the view binding.
	pub fn binding(&self) -> &ViewBinding {
		&self.view
	}

	/// Returns whether the view is lazily bound.
	pub fn is_lazy(&self) -> bool {
		matches!(self.view, ViewBinding::Lazy(_))
	}

	/// Matches a concrete path against this route's pattern.
	pub fn matches(&self, path: &str) -> Option<RouteParams> {
		self.pattern.matches(path)
	}
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("name", &self.name)
			.field("pattern", &self.pattern)
			.field("lazy", &self.is_lazy())
			.finish()
	}
}
