//! The injected credential capability the navigation guard reads.
//!
//! The guard cares about exactly one thing: whether an access token is
//! currently present. Token issuance, refresh and validation live elsewhere;
//! the router never writes the store.

use parking_lot::RwLock;

/// Key under which the host application persists the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Read-only view of the credential state.
///
/// An empty token counts as absent.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
	/// Returns whether a non-empty access token is present.
	fn has_token(&self) -> bool;
}

/// Credential store backed by process memory.
///
/// The native implementation, and the one tests inject. The host application
/// owns the writes; the router only ever calls [`CredentialStore::has_token`].
#[derive(Debug, Default)]
pub struct InMemoryCredentials {
	token: RwLock<Option<String>>,
}

impl InMemoryCredentials {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a store already holding a token.
	pub fn with_token(token: impl Into<String>) -> Self {
		Self {
			token: RwLock::new(Some(token.into())),
		}
	}

	/// Stores a token.
	pub fn store(&self, token: impl Into<String>) {
		*self.token.write() = Some(token.into());
	}

	/// Discards the stored token.
	pub fn clear(&self) {
		*self.token.write() = None;
	}
}

impl CredentialStore for InMemoryCredentials {
	fn has_token(&self) -> bool {
		self.token
			.read()
			.as_deref()
			.is_some_and(|token| !token.is_empty())
	}
}

/// Credential store backed by the browser origin's localStorage.
///
/// Reads [`ACCESS_TOKEN_KEY`] on every check, so a token stored by the login
/// flow in another part of the application is visible without any wiring.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserCredentials;

#[cfg(target_arch = "wasm32")]
impl BrowserCredentials {
	/// Creates a localStorage-backed store.
	pub fn new() -> Self {
		Self
	}
}

#[cfg(target_arch = "wasm32")]
impl CredentialStore for BrowserCredentials {
	fn has_token(&self) -> bool {
		let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten())
		else {
			return false;
		};

		storage
			.get_item(ACCESS_TOKEN_KEY)
			.ok()
			.flatten()
			.is_some_and(|token| !token.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_store_has_no_token() {
		assert!(!InMemoryCredentials::new().has_token());
	}

	#[test]
	fn test_store_and_clear() {
		let credentials = InMemoryCredentials::new();
		credentials.store("token-123");
		assert!(credentials.has_token());

		credentials.clear();
		assert!(!credentials.has_token());
	}

	#[test]
	fn test_empty_token_counts_as_absent() {
		let credentials = InMemoryCredentials::with_token("");
		assert!(!credentials.has_token());
	}
}
