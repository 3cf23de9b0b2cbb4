//! # Waypoint
//!
//! A client-side route table for single-page applications:
//!
//! - **Ordered path→view bindings**: first listed match wins, route names
//!   are unique and usable for programmatic navigation
//! - **Dynamic segments**: `/device/:id` captures one path segment as a
//!   named parameter, passed through without validation
//! - **Lazy views**: a route's code can be fetched on first navigation,
//!   cached forever, with concurrent first visits sharing one load
//! - **Reverse URL generation**: build concrete paths from route names
//! - **Base path prefix**: a deployment sub-path from the build environment
//!   applied to resolution and generation
//! - **History**: push/replace/back entry recording with serializable state
//!   for a browser bridge
//!
//! Rendering, data fetching, and the browser history engine itself belong to
//! the hosting application shell; the table resolves paths and hands over
//! view handles.
//!
//! # Examples
//!
//! ## The canonical three-route table
//!
//! ```
//! use waypoint::{Route, Router, View};
//!
//! let router = Router::new()
//! 	.route(Route::view("home", "/", || View::text("Home")))
//! 	.route(Route::view("device-detail", "/device/:id", || {
//! 		View::text("Device")
//! 	}))
//! 	.route(Route::lazy("about", "/about", || {
//! 		// Stands in for fetching the view's code chunk
//! 		Box::pin(async { Ok(View::text("About")) })
//! 	}));
//!
//! let matched = router.resolve("/device/42").unwrap();
//! assert_eq!(matched.name(), "device-detail");
//! assert_eq!(matched.params().get("id"), Some("42"));
//!
//! assert!(router.resolve("/nonexistent").is_none());
//! ```
//!
//! ## Navigation
//!
//! ```
//! use waypoint::{Route, Router, View};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), waypoint::RouterError> {
//! let router = Router::new()
//! 	.route(Route::view("home", "/", || View::text("Home")))
//! 	.fallback(|| View::text("Not Found"));
//!
//! let view = router.push("/").await?;
//! assert_eq!(view, View::text("Home"));
//!
//! // Unmatched paths render the fallback
//! let view = router.push("/nonexistent").await?;
//! assert_eq!(view, View::text("Not Found"));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod history;
pub mod params;
pub mod pattern;
pub mod route;
pub mod router;
pub mod view;

pub use error::{PatternError, RouterError};
pub use history::{BasePath, History, HistoryEntry, HistoryMode, NavigationType};
pub use params::RouteParams;
pub use pattern::PathPattern;
pub use route::Route;
pub use router::{RouteMatch, Router};
pub use view::{LazyView, LoadFuture, View, ViewBinding, ViewFactory, ViewLoader};
