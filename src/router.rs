//! Route resolution and the guarded navigation procedure.
//!
//! The route table is compiled once, at startup, from a static description
//! and is immutable afterwards. Compilation flattens nested children onto
//! their effective full paths, rejects duplicate names and cyclic redirects,
//! and checks that the guard's fallback route resolves to a concrete entry
//! that never requires authentication. Those build-time checks are what let
//! `navigate` be total: every navigation attempt ends in a proceed, after at
//! most one guard redirect.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::credentials::CredentialStore;
use crate::error::RouterError;
use crate::history::{self, HistoryState, NavigationType};
use crate::pattern::RoutePattern;
use crate::route::{Route, RouteMeta, RouteTarget};
use crate::view::{View, ViewFactory};

/// Upper bound on table-level redirect hops followed during one resolution.
const MAX_REDIRECT_HOPS: usize = 8;

/// Guard fallback used when the builder is not given one.
const DEFAULT_FALLBACK: &str = "/login";

/// A table entry compiled onto its effective full path.
struct TableEntry {
	pattern: RoutePattern,
	target: EntryTarget,
}

enum EntryTarget {
	View {
		name: String,
		meta: RouteMeta,
		factory: ViewFactory,
	},
	Redirect {
		to: String,
	},
}

/// A successfully resolved concrete route.
#[derive(Clone)]
pub struct ResolvedRoute {
	/// The concrete path, after any table-level redirects.
	pub path: String,
	/// The matched entry's symbolic name.
	pub name: String,
	/// The matched entry's metadata.
	pub meta: RouteMeta,
	/// Parameters captured from the path.
	pub params: HashMap<String, String>,
	factory: ViewFactory,
}

impl ResolvedRoute {
	/// Invokes the stored view factory.
	pub fn activate(&self) -> View {
		(self.factory)()
	}
}

impl std::fmt::Debug for ResolvedRoute {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ResolvedRoute")
			.field("path", &self.path)
			.field("name", &self.name)
			.field("meta", &self.meta)
			.field("params", &self.params)
			.finish()
	}
}

/// The completed outcome of one guarded navigation.
///
/// `redirects` lists the guard's redirect targets in the order they were
/// taken; it is empty when the requested path proceeded directly. Table-level
/// redirects (the `/` landing rule) happen inside resolution and do not
/// appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
	/// The path originally requested.
	pub requested: String,
	/// The concrete path that was activated.
	pub path: String,
	/// Name of the activated route.
	pub route_name: String,
	/// Title of the activated route.
	pub title: String,
	/// The activated view.
	pub view: View,
	/// Guard redirect targets taken before the navigation proceeded.
	pub redirects: Vec<String>,
}

impl Navigation {
	/// Returns whether the guard redirected away from the requested path.
	pub fn was_redirected(&self) -> bool {
		!self.redirects.is_empty()
	}
}

#[derive(Debug, Default)]
struct CurrentRoute {
	path: String,
	name: Option<String>,
}

/// Builder for [`Router`].
///
/// Collects the route table, the guard fallback and the injected credential
/// store, then validates everything once in [`RouterBuilder::build`].
pub struct RouterBuilder {
	routes: Vec<Route>,
	fallback: String,
	credentials: Arc<dyn CredentialStore>,
}

impl RouterBuilder {
	/// Adds a route to the table.
	pub fn route(mut self, route: Route) -> Self {
		self.routes.push(route);
		self
	}

	/// Overrides the guard fallback path (default `/login`).
	pub fn fallback(mut self, path: impl Into<String>) -> Self {
		self.fallback = path.into();
		self
	}

	/// Compiles and validates the route table.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] for an uncompilable path,
	/// [`RouterError::DuplicateRouteName`] when two concrete entries share a
	/// name, [`RouterError::RedirectCycle`] when a chain of table redirects
	/// never reaches a concrete entry, and
	/// [`RouterError::UnresolvableFallback`] or
	/// [`RouterError::FallbackRequiresAuth`] when the fallback cannot absorb
	/// guard redirects.
	pub fn build(self) -> Result<Router, RouterError> {
		let mut entries = Vec::new();
		let mut named = HashMap::new();
		flatten(self.routes, None, &mut entries, &mut named)?;

		validate_redirects(&entries)?;

		match resolve_in(&entries, &self.fallback) {
			Some(resolved) if resolved.meta.requires_auth() => {
				return Err(RouterError::FallbackRequiresAuth(self.fallback));
			}
			Some(_) => {}
			None => return Err(RouterError::UnresolvableFallback(self.fallback)),
		}

		let initial_path = history::current_path().unwrap_or_else(|_| "/".to_string());
		debug!(routes = entries.len(), fallback = %self.fallback, "route table compiled");

		Ok(Router {
			entries,
			named,
			fallback: self.fallback,
			credentials: self.credentials,
			current: Arc::new(RwLock::new(CurrentRoute {
				path: initial_path,
				name: None,
			})),
		})
	}
}

/// The client-side router: a compiled route table plus the navigation guard.
pub struct Router {
	entries: Vec<TableEntry>,
	named: HashMap<String, usize>,
	fallback: String,
	credentials: Arc<dyn CredentialStore>,
	current: Arc<RwLock<CurrentRoute>>,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes_count", &self.entries.len())
			.field("named_routes", &self.named.keys().collect::<Vec<_>>())
			.field("fallback", &self.fallback)
			.finish()
	}
}

impl Router {
	/// Starts a builder with the injected credential store.
	pub fn builder(credentials: Arc<dyn CredentialStore>) -> RouterBuilder {
		RouterBuilder {
			routes: Vec::new(),
			fallback: DEFAULT_FALLBACK.to_string(),
			credentials,
		}
	}

	/// Resolves a path against the table.
	///
	/// Follows table-level redirects to the concrete entry they designate.
	/// `None` is the NoMatch signal; the guard converts it to a fallback
	/// redirect, callers outside the guard can use it directly.
	pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
		resolve_in(&self.entries, path)
	}

	/// Runs the guarded transition for a path, recording a new history entry.
	///
	/// Precedence, evaluated in order: an unresolvable path redirects to the
	/// fallback; a resolved route that requires authentication redirects to
	/// the fallback when no token is present; everything else proceeds. The
	/// fallback is validated at build time, so the redirect chain is at most
	/// one hop and the procedure always returns a completed [`Navigation`].
	pub fn navigate(&self, path: &str) -> Navigation {
		self.guarded(path, NavigationType::Push)
	}

	/// Runs the guarded transition, replacing the current history entry.
	pub fn replace(&self, path: &str) -> Navigation {
		self.guarded(path, NavigationType::Replace)
	}

	/// Runs the guarded transition for the current location.
	///
	/// Call once on initial load; uses replace semantics so the landing
	/// redirect does not leave a dangling history entry.
	pub fn start(&self) -> Navigation {
		let initial = self.current_path();
		self.guarded(&initial, NavigationType::Replace)
	}

	fn guarded(&self, requested: &str, nav_type: NavigationType) -> Navigation {
		let mut redirects = Vec::new();
		let mut target = requested.to_string();

		loop {
			let resolved = match self.resolve(&target) {
				Some(resolved) => resolved,
				None => {
					debug!(path = %target, "no matching route, redirecting to fallback");
					redirects.push(self.fallback.clone());
					target = self.fallback.clone();
					continue;
				}
			};

			if resolved.meta.requires_auth() && !self.credentials.has_token() {
				debug!(path = %resolved.path, "no token for protected route, redirecting to fallback");
				redirects.push(self.fallback.clone());
				target = self.fallback.clone();
				continue;
			}

			return self.complete(requested, resolved, redirects, nav_type);
		}
	}

	fn complete(
		&self,
		requested: &str,
		resolved: ResolvedRoute,
		redirects: Vec<String>,
		nav_type: NavigationType,
	) -> Navigation {
		let state = HistoryState::new(resolved.path.as_str())
			.with_route_name(resolved.name.as_str())
			.with_title(resolved.meta.title());

		let recorded = match nav_type {
			NavigationType::Push => history::push_state(&state),
			NavigationType::Replace => history::replace_state(&state),
		};
		if let Err(error) = recorded {
			warn!(%error, path = %resolved.path, "failed to record history entry");
		}
		history::apply_title(resolved.meta.title());

		{
			let mut current = self.current.write();
			current.path = resolved.path.clone();
			current.name = Some(resolved.name.clone());
		}

		debug!(
			path = %resolved.path,
			name = %resolved.name,
			redirected = !redirects.is_empty(),
			"navigation proceeded"
		);

		Navigation {
			requested: requested.to_string(),
			path: resolved.path.clone(),
			route_name: resolved.name.clone(),
			title: resolved.meta.title().to_string(),
			view: resolved.activate(),
			redirects,
		}
	}

	/// Generates a URL from a route name and parameters.
	///
	/// # Errors
	///
	/// Returns [`RouterError::UnknownRouteName`] for an unregistered name and
	/// [`RouterError::MissingParameter`] when the pattern needs a parameter
	/// that was not supplied.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		let index = self
			.named
			.get(name)
			.ok_or_else(|| RouterError::UnknownRouteName(name.to_string()))?;
		let entry = &self.entries[*index];

		let map: HashMap<String, String> = params
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();

		entry.pattern.fill(&map).ok_or_else(|| {
			let param = entry
				.pattern
				.param_names()
				.iter()
				.find(|p| !map.contains_key(*p))
				.cloned()
				.unwrap_or_default();
			RouterError::MissingParameter {
				name: name.to_string(),
				param,
			}
		})
	}

	/// Returns the current location path.
	pub fn current_path(&self) -> String {
		self.current.read().path.clone()
	}

	/// Returns the name of the currently activated route, when one is.
	pub fn current_route_name(&self) -> Option<String> {
		self.current.read().name.clone()
	}

	/// Returns the number of compiled table entries.
	pub fn route_count(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether a concrete route with the given name exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.named.contains_key(name)
	}

	/// Registers a popstate listener that keeps the current-route state in
	/// sync with browser back/forward navigation.
	#[cfg(target_arch = "wasm32")]
	pub fn setup_history_listener(&self) -> Result<(), RouterError> {
		let current = Arc::clone(&self.current);
		history::setup_popstate_listener(move |path, state| {
			let mut current = current.write();
			current.path = path;
			current.name = state.and_then(|s| s.route_name);
		})
	}

	/// No-op off-browser.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn setup_history_listener(&self) -> Result<(), RouterError> {
		Ok(())
	}
}

/// Joins a child path onto its parent's effective path.
///
/// Absolute child paths keep their own path, matching the original table
/// where the shell's children are declared absolute.
fn effective_path(parent: Option<&str>, path: &str) -> String {
	if path.starts_with('/') {
		return path.to_string();
	}
	match parent {
		Some(parent) if parent != "/" => format!("{}/{}", parent.trim_end_matches('/'), path),
		_ => format!("/{}", path),
	}
}

fn flatten(
	routes: Vec<Route>,
	parent: Option<&str>,
	entries: &mut Vec<TableEntry>,
	named: &mut HashMap<String, usize>,
) -> Result<(), RouterError> {
	for route in routes {
		let Route {
			path,
			target,
			children,
		} = route;

		let full = effective_path(parent, &path);
		let pattern = RoutePattern::parse(&full)?;
		let index = entries.len();

		match target {
			RouteTarget::View {
				name,
				meta,
				factory,
			} => {
				if named.insert(name.clone(), index).is_some() {
					return Err(RouterError::DuplicateRouteName(name));
				}
				entries.push(TableEntry {
					pattern,
					target: EntryTarget::View {
						name,
						meta,
						factory,
					},
				});
			}
			RouteTarget::Redirect { to } => {
				entries.push(TableEntry {
					pattern,
					target: EntryTarget::Redirect { to },
				});
			}
		}

		flatten(children, Some(&full), entries, named)?;
	}
	Ok(())
}

/// Rejects redirect chains that never reach a concrete entry.
///
/// A redirect whose target matches nothing is allowed; the guard recovers it
/// at runtime the same way it recovers any unresolvable path.
fn validate_redirects(entries: &[TableEntry]) -> Result<(), RouterError> {
	for entry in entries {
		let EntryTarget::Redirect { to } = &entry.target else {
			continue;
		};

		let mut current = to.clone();
		let mut hops = 0;
		while let Some((next, _)) = find_in(entries, &current) {
			match &next.target {
				EntryTarget::View { .. } => break,
				EntryTarget::Redirect { to } => {
					hops += 1;
					if hops > MAX_REDIRECT_HOPS {
						return Err(RouterError::RedirectCycle(entry.pattern.raw().to_string()));
					}
					current = to.clone();
				}
			}
		}
	}
	Ok(())
}

fn find_in<'a>(
	entries: &'a [TableEntry],
	path: &str,
) -> Option<(&'a TableEntry, HashMap<String, String>)> {
	entries
		.iter()
		.find_map(|entry| entry.pattern.matches(path).map(|params| (entry, params)))
}

fn resolve_in(entries: &[TableEntry], requested: &str) -> Option<ResolvedRoute> {
	let mut path = requested.to_string();

	for _ in 0..=MAX_REDIRECT_HOPS {
		let (entry, params) = find_in(entries, &path)?;
		match &entry.target {
			EntryTarget::Redirect { to } => {
				debug!(from = %path, to = %to, "following table redirect");
				path = to.clone();
			}
			EntryTarget::View {
				name,
				meta,
				factory,
			} => {
				return Some(ResolvedRoute {
					path,
					name: name.clone(),
					meta: meta.clone(),
					params,
					factory: Arc::clone(factory),
				});
			}
		}
	}

	warn!(path = %requested, "redirect hop limit exceeded during resolution");
	None
}
