//! Session history integration.
//!
//! On wasm32 this talks to the browser History API: a successful navigation
//! pushes or replaces an entry whose state payload is a serialized
//! [`HistoryState`], and the matched route's title is applied to the
//! document. On native targets every operation is a no-op that succeeds, so
//! the router stays fully testable off-browser.

use serde::{Deserialize, Serialize};

use crate::error::RouterError;

/// State payload recorded with each history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryState {
	/// The concrete path the entry was recorded for.
	pub path: String,
	/// Name of the matched route, when one matched.
	#[serde(default)]
	pub route_name: Option<String>,
	/// Display title of the matched route.
	#[serde(default)]
	pub title: Option<String>,
}

impl HistoryState {
	/// Creates a state payload for a path.
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			route_name: None,
			title: None,
		}
	}

	/// Records the matched route's name.
	pub fn with_route_name(mut self, name: impl Into<String>) -> Self {
		self.route_name = Some(name.into());
		self
	}

	/// Records the matched route's title.
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}
}

/// How a navigation is recorded in session history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// Append a new history entry.
	Push,
	/// Replace the current history entry.
	Replace,
}

/// Returns the browser's current location path.
///
/// # Errors
///
/// Returns [`RouterError::NavigationFailed`] when no browser location is
/// available, which is always the case on native targets.
#[cfg(target_arch = "wasm32")]
pub fn current_path() -> Result<String, RouterError> {
	let window = web_sys::window()
		.ok_or_else(|| RouterError::NavigationFailed("window unavailable".to_string()))?;
	window
		.location()
		.pathname()
		.map_err(|_| RouterError::NavigationFailed("location unavailable".to_string()))
}

/// Returns the browser's current location path.
///
/// # Errors
///
/// Always fails on native targets; callers fall back to `/`.
#[cfg(not(target_arch = "wasm32"))]
pub fn current_path() -> Result<String, RouterError> {
	Err(RouterError::NavigationFailed(
		"no browser location on this target".to_string(),
	))
}

/// Appends a history entry for the given state.
pub fn push_state(state: &HistoryState) -> Result<(), RouterError> {
	record_state(state, NavigationType::Push)
}

/// Replaces the current history entry with the given state.
pub fn replace_state(state: &HistoryState) -> Result<(), RouterError> {
	record_state(state, NavigationType::Replace)
}

#[cfg(target_arch = "wasm32")]
fn record_state(state: &HistoryState, nav_type: NavigationType) -> Result<(), RouterError> {
	use wasm_bindgen::JsValue;

	let window = web_sys::window()
		.ok_or_else(|| RouterError::NavigationFailed("window unavailable".to_string()))?;
	let history = window
		.history()
		.map_err(|_| RouterError::NavigationFailed("history API unavailable".to_string()))?;

	let payload = serde_json::to_string(state)
		.map_err(|e| RouterError::NavigationFailed(e.to_string()))?;
	let data = JsValue::from_str(&payload);

	let result = match nav_type {
		NavigationType::Push => history.push_state_with_url(&data, "", Some(&state.path)),
		NavigationType::Replace => history.replace_state_with_url(&data, "", Some(&state.path)),
	};

	result.map_err(|_| RouterError::NavigationFailed(format!("history rejected '{}'", state.path)))
}

#[cfg(not(target_arch = "wasm32"))]
fn record_state(_state: &HistoryState, _nav_type: NavigationType) -> Result<(), RouterError> {
	Ok(())
}

/// Applies a matched route's title to the document.
#[cfg(target_arch = "wasm32")]
pub fn apply_title(title: &str) {
	if let Some(document) = web_sys::window().and_then(|w| w.document()) {
		document.set_title(title);
	}
}

/// Applies a matched route's title to the document. No-op off-browser.
#[cfg(not(target_arch = "wasm32"))]
pub fn apply_title(_title: &str) {}

/// Registers a popstate listener for back/forward navigation.
///
/// The callback receives the new location path and the deserialized state
/// payload when one was recorded. The closure is leaked with `forget`; it
/// lives for the lifetime of the page.
#[cfg(target_arch = "wasm32")]
pub(crate) fn setup_popstate_listener<F>(on_pop: F) -> Result<(), RouterError>
where
	F: Fn(String, Option<HistoryState>) + 'static,
{
	use wasm_bindgen::JsCast;
	use wasm_bindgen::closure::Closure;

	let window = web_sys::window()
		.ok_or_else(|| RouterError::NavigationFailed("window unavailable".to_string()))?;

	let closure = Closure::<dyn Fn(web_sys::PopStateEvent)>::new(
		move |event: web_sys::PopStateEvent| {
			let path = web_sys::window()
				.and_then(|w| w.location().pathname().ok())
				.unwrap_or_else(|| "/".to_string());
			let state = event
				.state()
				.as_string()
				.and_then(|payload| serde_json::from_str(&payload).ok());
			on_pop(path, state);
		},
	);

	window
		.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
		.map_err(|_| {
			RouterError::NavigationFailed("failed to register popstate listener".to_string())
		})?;

	closure.forget();
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_history_state_builders() {
		let state = HistoryState::new("/doctor-profile")
			.with_route_name("doctor_profile")
			.with_title("Doctor Profile");

		assert_eq!(state.path, "/doctor-profile");
		assert_eq!(state.route_name.as_deref(), Some("doctor_profile"));
		assert_eq!(state.title.as_deref(), Some("Doctor Profile"));
	}

	#[cfg(not(target_arch = "wasm32"))]
	#[test]
	fn test_native_current_path_is_unavailable() {
		assert!(current_path().is_err());
	}

	#[cfg(not(target_arch = "wasm32"))]
	#[test]
	fn test_native_record_is_a_successful_noop() {
		let state = HistoryState::new("/login");
		assert!(push_state(&state).is_ok());
		assert!(replace_state(&state).is_ok());
		apply_title("Sign In");
	}
}
