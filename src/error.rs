//! Error types for route table construction and router operations.

use thiserror::Error;

/// Errors raised while compiling a route table or operating on a built router.
///
/// The navigation guard itself never returns an error: an unresolvable path
/// and a missing token are both recovered locally as a redirect to the
/// fallback route. Everything that can actually fail is caught here, most of
/// it once, at build time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// A route pattern failed to compile.
	#[error("invalid route pattern '{pattern}': {reason}")]
	InvalidPattern {
		/// The offending pattern string.
		pattern: String,
		/// Why compilation was rejected.
		reason: String,
	},

	/// Two entries in the table share a symbolic name.
	#[error("duplicate route name: {0}")]
	DuplicateRouteName(String),

	/// A chain of table-level redirects never reaches a concrete entry.
	#[error("redirect cycle starting at '{0}'")]
	RedirectCycle(String),

	/// The guard fallback path does not resolve to a concrete route.
	#[error("fallback path '{0}' does not resolve to a concrete route")]
	UnresolvableFallback(String),

	/// The guard fallback path requires authentication, which would make
	/// redirect chains unbounded.
	#[error("fallback path '{0}' must not require authentication")]
	FallbackRequiresAuth(String),

	/// No route with the given name exists in the table.
	#[error("unknown route name: {0}")]
	UnknownRouteName(String),

	/// Reverse URL generation was missing a required parameter.
	#[error("missing parameter '{param}' for route '{name}'")]
	MissingParameter {
		/// Name of the route being reversed.
		name: String,
		/// The parameter that was not supplied.
		param: String,
	},

	/// The browser history API rejected an operation.
	#[error("navigation failed: {0}")]
	NavigationFailed(String),
}
