//! Integration tests for the portal route table and navigation guard.
//!
//! These tests exercise the router the way the host shell does:
//! 1. Resolution against the full portal table, including the landing rule
//! 2. Guard outcomes with and without a stored token
//! 3. Redirect-chain bounds
//! 4. Current-route observation after navigation

use std::sync::Arc;

use mediview_router::{
	InMemoryCredentials, Navigation, PortalViews, Router, View, portal_router, view_factory,
};
use rstest::rstest;

fn portal_views() -> PortalViews {
	PortalViews {
		login: view_factory(|| View::text("Login")),
		patient_management: view_factory(|| View::text("PatientManagement")),
		effect_prediction: view_factory(|| View::text("EffectPrediction")),
		prediction_records: view_factory(|| View::text("PredictionRecords")),
		doctor_profile: view_factory(|| View::text("DoctorProfile")),
	}
}

fn router_without_token() -> Router {
	portal_router(portal_views(), Arc::new(InMemoryCredentials::new())).unwrap()
}

fn router_with_token() -> Router {
	portal_router(
		portal_views(),
		Arc::new(InMemoryCredentials::with_token("jwt-abc123")),
	)
	.unwrap()
}

#[rstest]
#[case("/nonexistent")]
#[case("/patients")]
#[case("/doctorHome/extra")]
#[case("/LOGIN")]
fn test_unknown_paths_land_on_login(#[case] requested: &str) {
	let nav = router_without_token().navigate(requested);

	assert_eq!(nav.route_name, "login");
	assert_eq!(nav.path, "/login");
	assert!(nav.was_redirected());
	assert_eq!(nav.view.render_to_string(), "Login");
}

#[rstest]
#[case("/patient-management")]
#[case("/effect-prediction")]
#[case("/prediction-records")]
#[case("/doctor-profile")]
fn test_protected_routes_require_a_token(#[case] requested: &str) {
	let nav = router_without_token().navigate(requested);
	assert_eq!(nav.route_name, "login");
	assert!(nav.was_redirected());
}

#[rstest]
#[case("/patient-management", "patient_management", "PatientManagement")]
#[case("/effect-prediction", "effect_prediction", "EffectPrediction")]
#[case("/prediction-records", "prediction_records", "PredictionRecords")]
#[case("/doctor-profile", "doctor_profile", "DoctorProfile")]
fn test_protected_routes_proceed_with_a_token(
	#[case] requested: &str,
	#[case] name: &str,
	#[case] rendered: &str,
) {
	let nav = router_with_token().navigate(requested);

	assert_eq!(nav.path, requested);
	assert_eq!(nav.route_name, name);
	assert!(!nav.was_redirected());
	assert_eq!(nav.view.render_to_string(), rendered);
}

#[test]
fn test_login_is_reachable_regardless_of_token() {
	for router in [router_without_token(), router_with_token()] {
		let nav = router.navigate("/login");
		assert_eq!(nav.route_name, "login");
		assert!(!nav.was_redirected());
	}
}

#[test]
fn test_landing_rule_behaves_like_its_target() {
	let with_token = router_with_token();
	let via_root = with_token.navigate("/");
	let direct = with_token.navigate("/patient-management");

	assert_eq!(via_root.path, direct.path);
	assert_eq!(via_root.route_name, direct.route_name);
	assert_eq!(via_root.view, direct.view);

	// Without a token both land on login.
	let without_token = router_without_token();
	assert_eq!(without_token.navigate("/").route_name, "login");
	assert_eq!(
		without_token.navigate("/patient-management").route_name,
		"login"
	);
}

#[test]
fn test_shell_path_redirects_to_default_child() {
	let nav = router_with_token().navigate("/doctorHome");
	assert_eq!(nav.path, "/patient-management");
	assert_eq!(nav.route_name, "patient_management");
	// Table-level redirects are not guard redirects.
	assert!(!nav.was_redirected());
}

#[rstest]
#[case("/")]
#[case("/login")]
#[case("/doctorHome")]
#[case("/patient-management")]
#[case("/effect-prediction")]
#[case("/prediction-records")]
#[case("/doctor-profile")]
#[case("/nonexistent")]
fn test_guard_redirect_chains_are_bounded(#[case] requested: &str) {
	for router in [router_without_token(), router_with_token()] {
		let nav: Navigation = router.navigate(requested);
		assert!(
			nav.redirects.len() <= 1,
			"requested {} took {} guard hops",
			requested,
			nav.redirects.len()
		);
	}
}

#[test]
fn test_effect_prediction_without_token_renders_login() {
	let nav = router_without_token().navigate("/effect-prediction");

	assert_eq!(nav.requested, "/effect-prediction");
	assert_eq!(nav.redirects, vec!["/login".to_string()]);
	assert_eq!(nav.view.render_to_string(), "Login");
}

#[test]
fn test_doctor_profile_with_token_renders_profile() {
	let nav = router_with_token().navigate("/doctor-profile");

	assert_eq!(nav.route_name, "doctor_profile");
	assert!(nav.redirects.is_empty());
	assert_eq!(nav.view.render_to_string(), "DoctorProfile");
	assert_eq!(nav.title, "Doctor Profile");
}

#[test]
fn test_token_stored_mid_session_unlocks_protected_routes() {
	let credentials = Arc::new(InMemoryCredentials::new());
	let router = portal_router(portal_views(), credentials.clone()).unwrap();

	assert_eq!(router.navigate("/doctor-profile").route_name, "login");

	credentials.store("jwt-abc123");
	assert_eq!(
		router.navigate("/doctor-profile").route_name,
		"doctor_profile"
	);

	credentials.clear();
	assert_eq!(router.navigate("/doctor-profile").route_name, "login");
}

#[test]
fn test_current_route_follows_completed_navigations() {
	let router = router_with_token();

	router.navigate("/effect-prediction");
	assert_eq!(router.current_path(), "/effect-prediction");
	assert_eq!(
		router.current_route_name(),
		Some("effect_prediction".to_string())
	);

	router.navigate("/nonexistent");
	assert_eq!(router.current_path(), "/login");
	assert_eq!(router.current_route_name(), Some("login".to_string()));
}

#[test]
fn test_start_runs_the_guard_on_the_initial_location() {
	// Off-browser the initial location falls back to "/", so starting the
	// router follows the landing rule and then the guard.
	let nav = router_without_token().start();
	assert_eq!(nav.route_name, "login");

	let nav = router_with_token().start();
	assert_eq!(nav.route_name, "patient_management");
}

#[test]
fn test_reverse_generates_portal_urls() {
	let router = router_with_token();
	assert_eq!(router.reverse("login", &[]).unwrap(), "/login");
	assert_eq!(
		router.reverse("doctor_profile", &[]).unwrap(),
		"/doctor-profile"
	);
}
