//! The renderable unit handed back by the router, and the lazy factory that
//! produces it.
//!
//! The router never renders anything itself. Each concrete route stores a
//! [`ViewFactory`], a thunk that is invoked only when the route is actually
//! activated, so view construction cost is deferred until a navigation
//! proceeds to that route. Mounting and unmounting the result is owned by
//! the host shell.

use std::borrow::Cow;
use std::sync::Arc;

/// An opaque renderable unit.
///
/// Host shells that need richer content embed it behind [`View::text`]
/// markers or wrap the router with their own factory type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
	/// Nothing to render.
	Empty,
	/// Plain text content.
	Text(Cow<'static, str>),
}

impl View {
	/// Creates a text view.
	pub fn text(content: impl Into<Cow<'static, str>>) -> Self {
		Self::Text(content.into())
	}

	/// Renders the view to a plain string.
	pub fn render_to_string(&self) -> String {
		match self {
			Self::Empty => String::new(),
			Self::Text(content) => content.to_string(),
		}
	}
}

impl Default for View {
	fn default() -> Self {
		Self::Empty
	}
}

/// A stored view thunk, invoked only on activation.
pub type ViewFactory = Arc<dyn Fn() -> View + Send + Sync>;

/// Wraps a closure into a [`ViewFactory`].
pub fn view_factory<F>(factory: F) -> ViewFactory
where
	F: Fn() -> View + Send + Sync + 'static,
{
	Arc::new(factory)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_view_text_render() {
		let view = View::text("Patient Management");
		assert_eq!(view.render_to_string(), "Patient Management");
	}

	#[test]
	fn test_view_empty_render() {
		assert_eq!(View::Empty.render_to_string(), "");
		assert_eq!(View::default(), View::Empty);
	}

	#[test]
	fn test_factory_is_lazy() {
		use std::sync::atomic::{AtomicUsize, Ordering};

		let calls = Arc::new(AtomicUsize::new(0));
		let counted = Arc::clone(&calls);
		let factory = view_factory(move || {
			counted.fetch_add(1, Ordering::SeqCst);
			View::text("Login")
		});

		assert_eq!(calls.load(Ordering::SeqCst), 0);
		assert_eq!(factory().render_to_string(), "Login");
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}
}
