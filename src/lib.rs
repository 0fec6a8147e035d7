//! # mediview-router
//!
//! Client-side route table and navigation guard for the Mediview doctor
//! portal.
//!
//! The router maps location paths to lazily constructed views, carries
//! per-route metadata (display title, authentication requirement), and gates
//! every transition through an access guard: an unresolvable path or a
//! protected route without a stored access token redirects to the sign-in
//! route. The table is compiled and validated once at startup and is
//! immutable afterwards.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use mediview_router::{BrowserCredentials, PortalViews, portal_router, view_factory};
//!
//! let router = portal_router(
//! 	PortalViews {
//! 		login: view_factory(login_page),
//! 		patient_management: view_factory(patient_management_page),
//! 		effect_prediction: view_factory(effect_prediction_page),
//! 		prediction_records: view_factory(prediction_records_page),
//! 		doctor_profile: view_factory(doctor_profile_page),
//! 	},
//! 	Arc::new(BrowserCredentials::new()),
//! )?;
//!
//! router.setup_history_listener()?;
//! let landing = router.start();
//! mount(landing.view);
//! ```
//!
//! Token issuance and refresh, view rendering and application state are
//! owned by the host application; the router only reads token presence and
//! hands back activated views.

pub mod credentials;
pub mod error;
pub mod history;
pub mod pattern;
pub mod portal;
pub mod route;
pub mod router;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub use credentials::BrowserCredentials;
pub use credentials::{ACCESS_TOKEN_KEY, CredentialStore, InMemoryCredentials};
pub use error::RouterError;
pub use history::{HistoryState, NavigationType};
pub use pattern::RoutePattern;
pub use portal::{PortalViews, portal_router};
pub use route::{Route, RouteMeta};
pub use router::{Navigation, ResolvedRoute, Router, RouterBuilder};
pub use view::{View, ViewFactory, view_factory};
