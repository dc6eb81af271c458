use super::*;
use crate::net::types::UserProfile;
use std::cell::Cell;

fn policy() -> RoutePolicy {
    RoutePolicy::from_config(&SessionConfig::default())
}

fn signed_in() -> AuthState {
    AuthState {
        user: Some(UserProfile {
            id: "u1".to_owned(),
            full_name: "Jane Roe".to_owned(),
            email: "jane@example.com".to_owned(),
        }),
        loading: false,
    }
}

// =============================================================
// normalize_path
// =============================================================

#[test]
fn normalize_strips_query_fragment_and_trailing_slash() {
    assert_eq!(normalize_path("/contacts/?page=2"), "/contacts");
    assert_eq!(normalize_path("/dashboard#top"), "/dashboard");
    assert_eq!(normalize_path("/settings///"), "/settings");
}

#[test]
fn normalize_roots_and_relative_paths() {
    assert_eq!(normalize_path(""), "/");
    assert_eq!(normalize_path("/"), "/");
    assert_eq!(normalize_path("?next=/x"), "/");
    assert_eq!(normalize_path("login"), "/login");
}

// =============================================================
// access_for
// =============================================================

#[test]
fn access_for_matches_static_and_param_routes() {
    let policy = policy();
    assert_eq!(policy.access_for("/dashboard"), RouteAccess::Protected);
    assert_eq!(policy.access_for("/contacts"), RouteAccess::Protected);
    assert_eq!(policy.access_for("/contacts/42"), RouteAccess::Protected);
    assert_eq!(policy.access_for("/contacts/42?tab=history"), RouteAccess::Protected);
    assert_eq!(policy.access_for("/"), RouteAccess::Index);
    assert_eq!(policy.access_for("/login/"), RouteAccess::LoginEntry);
}

#[test]
fn access_for_unknown_paths_is_public() {
    let policy = policy();
    assert_eq!(policy.access_for("/nope"), RouteAccess::Public);
    assert_eq!(policy.access_for("/contacts/42/extra"), RouteAccess::Public);
    assert_eq!(policy.access_for("/dashboardx"), RouteAccess::Public);
}

#[test]
fn configured_login_route_is_always_login_entry() {
    let config = SessionConfig {
        login_route: "/signin".to_owned(),
        routes: vec![RouteSpec::new("/signin", RouteAccess::Public)],
        ..SessionConfig::default()
    };
    let policy = RoutePolicy::from_config(&config);
    assert_eq!(policy.access_for("/signin"), RouteAccess::LoginEntry);
    assert!(policy.is_login_route("/signin?next=/x"));
}

// =============================================================
// decide
// =============================================================

#[test]
fn public_route_proceeds_without_reading_state() {
    let policy = RoutePolicy::from_config(&SessionConfig {
        routes: vec![RouteSpec::new("/help", RouteAccess::Public)],
        ..SessionConfig::default()
    });
    let reads = Cell::new(0);
    let decision = policy.decide("/help", || {
        reads.set(reads.get() + 1);
        AuthState::default()
    });
    assert_eq!(decision, GuardDecision::Proceed);
    assert_eq!(reads.get(), 0);
}

#[test]
fn protected_route_redirects_when_signed_out() {
    assert_eq!(
        policy().decide("/contacts/7", AuthState::default),
        GuardDecision::Redirect("/login".to_owned())
    );
}

#[test]
fn protected_route_proceeds_when_signed_in() {
    assert_eq!(policy().decide("/analytics", signed_in), GuardDecision::Proceed);
}

#[test]
fn login_route_bounces_authenticated_user_to_landing() {
    let policy = policy();
    assert_eq!(policy.decide("/login", signed_in), GuardDecision::Redirect("/dashboard".to_owned()));
    assert_eq!(policy.decide("/login", AuthState::default), GuardDecision::Proceed);
}

#[test]
fn index_route_forwards_by_session() {
    let policy = policy();
    assert_eq!(policy.decide("/", signed_in), GuardDecision::Redirect("/dashboard".to_owned()));
    assert_eq!(policy.decide("/", AuthState::default), GuardDecision::Redirect("/login".to_owned()));
}

#[test]
fn loading_flag_alone_does_not_authenticate() {
    let loading = || AuthState { user: None, loading: true };
    assert_eq!(policy().decide("/settings", loading), GuardDecision::Redirect("/login".to_owned()));
}
