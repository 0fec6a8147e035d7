//! The doctor portal's route table.
//!
//! One landing rule, a public sign-in page, and a shell whose children are
//! all gated on token presence. View factories and the credential store are
//! injected so the table can be wired to any rendering layer and tested
//! without a browser.

use std::sync::Arc;

use crate::credentials::CredentialStore;
use crate::error::RouterError;
use crate::route::{Route, RouteMeta};
use crate::router::Router;
use crate::view::ViewFactory;

/// View factories for every route that can activate.
///
/// The shell itself never renders through the router (its redirect always
/// fires first), so it carries no factory here.
pub struct PortalViews {
	/// Sign-in page.
	pub login: ViewFactory,
	/// Patient management, the default landing view.
	pub patient_management: ViewFactory,
	/// Treatment effect prediction.
	pub effect_prediction: ViewFactory,
	/// Past prediction records.
	pub prediction_records: ViewFactory,
	/// The signed-in doctor's profile.
	pub doctor_profile: ViewFactory,
}

/// Builds the portal router over the injected views and credential store.
///
/// # Errors
///
/// Returns [`RouterError`] when table validation fails; with this static
/// table that only happens if the table itself is edited inconsistently.
pub fn portal_router(
	views: PortalViews,
	credentials: Arc<dyn CredentialStore>,
) -> Result<Router, RouterError> {
	Router::builder(credentials)
		.route(Route::redirect("/", "/patient-management"))
		.route(Route::view(
			"/login",
			"login",
			RouteMeta::public("Sign In"),
			views.login,
		))
		.route(
			Route::redirect("/doctorHome", "/patient-management").with_children(vec![
				Route::view(
					"/patient-management",
					"patient_management",
					RouteMeta::protected("Patient Management"),
					views.patient_management,
				),
				Route::view(
					"/effect-prediction",
					"effect_prediction",
					RouteMeta::protected("Effect Prediction"),
					views.effect_prediction,
				),
				Route::view(
					"/prediction-records",
					"prediction_records",
					RouteMeta::protected("Prediction Records"),
					views.prediction_records,
				),
				Route::view(
					"/doctor-profile",
					"doctor_profile",
					RouteMeta::protected("Doctor Profile"),
					views.doctor_profile,
				),
			]),
		)
		.build()
}
