//! Renderable-unit handles and lazy view loading.
//!
//! The route table does not render anything itself. A [`View`] is the cheap
//! handle the hosting shell receives after a navigation completes; eager
//! routes produce one synchronously from a factory, lazy routes load their
//! unit asynchronously on first visit and cache it forever.

use std::borrow::Cow;
use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::RouterError;

/// A handle to a renderable unit.
///
/// Rendering belongs to the hosting shell; the table only carries enough to
/// identify the unit and hand over its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
	/// A view with no content of its own.
	Empty,
	/// A view carrying a text body.
	Text(Cow<'static, str>),
}

impl View {
	/// Creates a text view.
	pub fn text(body: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(body.into())
	}

	/// Returns the text body, if any.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(body) => Some(body),
			Self::Empty => None,
		}
	}
}

/// Factory producing an eagerly bound view.
pub type ViewFactory = Arc<dyn Fn() -> View + Send + Sync>;

/// Future returned by a lazy view loader.
pub type LoadFuture = BoxFuture<'static, Result<View, RouterError>>;

/// Asynchronous loader for a lazily bound view.
pub type ViewLoader = Arc<dyn Fn() -> LoadFuture + Send + Sync>;

/// A lazily loaded view with load-once, cache-forever semantics.
///
/// The first caller runs the loader; concurrent first-time callers await the
/// same in-flight load instead of issuing duplicates; later callers get the
/// cached unit. A failed load is not cached, so the error surfaces to the
/// triggering navigation and the next one retries.
#[derive(Clone)]
pub struct LazyView {
	/// The cached unit, populated by the first successful load.
	cell: Arc<OnceCell<View>>,
	/// The loader function.
	loader: ViewLoader,
}

impl LazyView {
	/// Creates a lazy view from a loader.
	pub fn new<F>(loader: F) -> Self
	where
		F: Fn() -> LoadFuture + Send + Sync + 'static,
	{
		Self {
			cell: Arc::new(OnceCell::new()),
			loader: Arc::new(loader),
		}
	}

	/// Returns whether the unit has been loaded.
	pub fn is_loaded(&self) -> bool {
		self.cell.initialized()
	}

	/// Returns the loaded unit without loading.
	pub fn get_if_loaded(&self) -> Option<View> {
		self.cell.get().cloned()
	}

	/// Returns the unit, loading it if necessary.
	///
	/// # Errors
	///
	/// Returns [`RouterError::LoadFailed`] when the loader fails; the cell
	/// stays empty and a later call retries.
	pub async fn get(&self) -> Result<View, RouterError> {
		if let Some(view) = self.cell.get() {
			return Ok(view.clone());
		}
		debug!("loading lazy view");
		self.cell
			.get_or_try_init(|| (self.loader)())
			.await
			.cloned()
	}
}

impl std::fmt::Debug for LazyView {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("LazyView")
			.field("loaded", &self.is_loaded())
			.finish()
	}
}

/// The view side of a route: eagerly bound or lazily resolved.
#[derive(Clone)]
pub enum ViewBinding {
	/// A view produced synchronously on every navigation.
	Eager(ViewFactory),
	/// A view whose code is fetched on first navigation.
	Lazy(LazyView),
}

impl ViewBinding {
	/// Creates an eager binding from a factory.
	pub fn eager<F>(factory: F) -> Self
	where
		F: Fn() -> View + Send + Sync + 'static,
	{
		Self::Eager(Arc::new(factory))
	}

	/// Creates a lazy binding from a loader.
	pub fn lazy<F>(loader: F) -> Self
	where
		F: Fn() -> LoadFuture + Send + Sync + 'static,
	{
		Self::Lazy(LazyView::new(loader))
	}

	/// Produces the view, awaiting the load for lazy bindings.
	pub async fn resolve(&self) -> Result<View, RouterError> {
		match self {
			Self::Eager(factory) => Ok(factory()),
			Self::Lazy(lazy) => lazy.get().await,
		}
	}

	/// Returns whether the view is available without loading.
	pub fn is_loaded(&self) -> bool {
		match self {
			Self::Eager(_) => true,
			Self::Lazy(lazy) => lazy.is_loaded(),
		}
	}
}

impl std::fmt::Debug for ViewBinding {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Eager(_) => f.write_str("ViewBinding::Eager"),
			Self::Lazy(lazy) => f.debug_tuple("ViewBinding::Lazy").field(lazy).finish(),
		}
	}
}
