//! Route table entries.
//!
//! A [`Route`] is one navigable location: either a concrete entry that owns
//! a view factory and [`RouteMeta`], or a table-level redirect that is
//! matched but never renders. Entries may carry ordered children; a child
//! with a relative path is resolved under its parent, a child with an
//! absolute path keeps its own path (the portal shell uses the latter).
//!
//! Concrete entries always carry a symbolic name and an explicit
//! `requires_auth` flag. The constructors make both unrepresentable to omit,
//! which is what keeps the navigation guard total.

use std::borrow::Cow;

use crate::view::ViewFactory;

/// Per-route configuration carried by every concrete entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMeta {
	title: Cow<'static, str>,
	requires_auth: bool,
}

impl RouteMeta {
	/// Creates metadata for a route that never requires authentication.
	pub fn public(title: impl Into<Cow<'static, str>>) -> Self {
		Self {
			title: title.into(),
			requires_auth: false,
		}
	}

	/// Creates metadata for a route gated on token presence.
	pub fn protected(title: impl Into<Cow<'static, str>>) -> Self {
		Self {
			title: title.into(),
			requires_auth: true,
		}
	}

	/// Returns the display title.
	pub fn title(&self) -> &str {
		&self.title
	}

	/// Returns whether navigation to this route is gated by the guard.
	pub fn requires_auth(&self) -> bool {
		self.requires_auth
	}
}

/// What a matched entry resolves to.
#[derive(Clone)]
pub(crate) enum RouteTarget {
	/// A concrete entry: unique name, metadata and a lazy view factory.
	View {
		name: String,
		meta: RouteMeta,
		factory: ViewFactory,
	},
	/// A table-level redirect, substituted during resolution.
	Redirect { to: String },
}

/// One navigable location in the route table.
#[derive(Clone)]
pub struct Route {
	pub(crate) path: String,
	pub(crate) target: RouteTarget,
	pub(crate) children: Vec<Route>,
}

impl Route {
	/// Creates a concrete entry.
	pub fn view(
		path: impl Into<String>,
		name: impl Into<String>,
		meta: RouteMeta,
		factory: ViewFactory,
	) -> Self {
		Self {
			path: path.into(),
			target: RouteTarget::View {
				name: name.into(),
				meta,
				factory,
			},
			children: Vec::new(),
		}
	}

	/// Creates a redirect entry.
	pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			target: RouteTarget::Redirect { to: to.into() },
			children: Vec::new(),
		}
	}

	/// Attaches ordered children to this entry.
	pub fn with_children(mut self, children: Vec<Route>) -> Self {
		self.children = children;
		self
	}

	/// Returns the entry's path as declared in the table.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the symbolic name for concrete entries.
	pub fn name(&self) -> Option<&str> {
		match &self.target {
			RouteTarget::View { name, .. } => Some(name),
			RouteTarget::Redirect { .. } => None,
		}
	}

	/// Returns the metadata for concrete entries.
	pub fn meta(&self) -> Option<&RouteMeta> {
		match &self.target {
			RouteTarget::View { meta, .. } => Some(meta),
			RouteTarget::Redirect { .. } => None,
		}
	}
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut s = f.debug_struct("Route");
		s.field("path", &self.path);
		match &self.target {
			RouteTarget::View { name, meta, .. } => {
				s.field("name", name).field("meta", meta);
			}
			RouteTarget::Redirect { to } => {
				s.field("redirect", to);
			}
		}
		s.field("children", &self.children.len()).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::view::{View, view_factory};

	#[test]
	fn test_meta_constructors() {
		let public = RouteMeta::public("Sign In");
		assert_eq!(public.title(), "Sign In");
		assert!(!public.requires_auth());

		let protected = RouteMeta::protected("Patient Management");
		assert!(protected.requires_auth());
	}

	#[test]
	fn test_view_entry_accessors() {
		let route = Route::view(
			"/login",
			"login",
			RouteMeta::public("Sign In"),
			view_factory(|| View::text("Login")),
		);

		assert_eq!(route.path(), "/login");
		assert_eq!(route.name(), Some("login"));
		assert!(!route.meta().unwrap().requires_auth());
	}

	#[test]
	fn test_redirect_entry_has_no_name_or_meta() {
		let route = Route::redirect("/", "/patient-management");
		assert_eq!(route.name(), None);
		assert!(route.meta().is_none());
	}

	#[test]
	fn test_debug_output_is_opaque_about_factories() {
		let route = Route::view(
			"/login",
			"login",
			RouteMeta::public("Sign In"),
			view_factory(|| View::Empty),
		);
		let debug = format!("{:?}", route);
		assert!(debug.contains("\"/login\""));
		assert!(debug.contains("login"));
	}
}
