use super::*;
use crate::config::SessionConfig;
use crate::test_helpers::{Harness, Reply, jane};
use crate::util::storage::ClientStore;

fn bearer() -> SessionConfig {
    SessionConfig {
        credentials: CredentialMode::Bearer,
        ..SessionConfig::default()
    }
}

// =============================================================
// 401 side effects
// =============================================================

#[tokio::test]
async fn unauthorized_clears_state_redirects_and_reraises() {
    let h = Harness::cookie("/contacts", [Reply::status(401)]);
    h.session.state().apply(jane());

    let err = h.session.api().send(ApiRequest::get("/api/wallet/balance")).await.unwrap_err();

    assert_eq!(err, ApiError::Unauthorized);
    assert!(!h.session.state().read().is_authenticated());
    assert_eq!(h.navigator.redirects(), vec!["/login".to_owned()]);
}

#[tokio::test]
async fn unauthorized_on_login_route_does_not_redirect() {
    let h = Harness::cookie("/login", [Reply::status(401), Reply::status(401)]);
    for _ in 0..2 {
        let err = h.session.api().send(ApiRequest::get("/x")).await.unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);
    }
    assert!(h.navigator.redirects().is_empty());
    assert!(!h.session.api().interceptor().redirect_pending());
}

#[tokio::test]
async fn login_route_match_ignores_query_string() {
    let h = Harness::cookie("/login?next=/contacts", [Reply::status(401)]);
    let _ = h.session.api().send(ApiRequest::get("/x")).await;
    assert!(h.navigator.redirects().is_empty());
}

#[tokio::test]
async fn burst_of_unauthorized_redirects_once() {
    let h = Harness::cookie("/analytics", [Reply::status(401), Reply::status(401), Reply::status(401)]);
    let api = h.session.api();

    let (a, b, c) = futures::join!(
        api.send(ApiRequest::get("/a")),
        api.send(ApiRequest::get("/b")),
        api.send(ApiRequest::get("/c")),
    );

    assert_eq!(a.unwrap_err(), ApiError::Unauthorized);
    assert_eq!(b.unwrap_err(), ApiError::Unauthorized);
    assert_eq!(c.unwrap_err(), ApiError::Unauthorized);
    assert_eq!(h.navigator.redirects(), vec!["/login".to_owned()]);
    assert!(api.interceptor().redirect_pending());
}

#[tokio::test]
async fn latch_rearms_after_reaching_login_route() {
    let h = Harness::cookie("/settings", [Reply::status(401), Reply::status(401), Reply::status(401)]);
    let api = h.session.api();

    let _ = api.send(ApiRequest::get("/a")).await;
    h.navigator.visit("/login");
    let _ = api.send(ApiRequest::get("/b")).await;
    h.navigator.visit("/settings");
    let _ = api.send(ApiRequest::get("/c")).await;

    assert_eq!(h.navigator.redirects(), vec!["/login".to_owned(), "/login".to_owned()]);
}

#[tokio::test]
async fn followed_redirect_lands_on_login_and_stops() {
    let transport = crate::test_helpers::ScriptedTransport::new([Reply::status(401), Reply::status(401)]);
    let navigator = crate::test_helpers::RecordingNavigator::following("/contacts");
    let store = std::rc::Rc::new(crate::util::storage::MemoryStore::new());
    let session = crate::auth::Session::new(SessionConfig::default(), transport, store, navigator.clone());

    let _ = session.api().send(ApiRequest::get("/a")).await;
    let _ = session.api().send(ApiRequest::get("/b")).await;

    assert_eq!(navigator.redirects(), vec!["/login".to_owned()]);
    assert!(!session.api().interceptor().redirect_pending());
}

#[tokio::test]
async fn latch_rearms_after_session_restored() {
    let h = Harness::cookie(
        "/dashboard",
        [Reply::status(401), Reply::ok_json(crate::test_helpers::JANE_JSON), Reply::status(401)],
    );
    let _ = h.session.api().send(ApiRequest::get("/a")).await;
    assert!(h.session.loader().load().await);
    let _ = h.session.api().send(ApiRequest::get("/b")).await;
    assert_eq!(h.navigator.redirects().len(), 2);
}

#[tokio::test]
async fn other_errors_leave_session_alone() {
    let h = Harness::cookie("/dashboard", [Reply::status(403), Reply::status(500)]);
    h.session.state().apply(jane());

    assert_eq!(h.session.api().send(ApiRequest::get("/a")).await.unwrap_err(), ApiError::Status(403));
    assert_eq!(h.session.api().send(ApiRequest::get("/b")).await.unwrap_err(), ApiError::Status(500));

    assert!(h.session.state().read().is_authenticated());
    assert!(h.navigator.redirects().is_empty());
}

#[tokio::test]
async fn accept_any_status_bypasses_invalidation() {
    let h = Harness::cookie("/dashboard", [Reply::status(401)]);
    h.session.state().apply(jane());
    let resp = h.session.api().send(ApiRequest::get("/a").accept_any_status()).await.expect("raw");
    assert_eq!(resp.status, 401);
    assert!(h.session.state().read().is_authenticated());
    assert!(h.navigator.redirects().is_empty());
}

// =============================================================
// Credential modes
// =============================================================

#[tokio::test]
async fn cookie_mode_attaches_no_authorization_header() {
    let h = Harness::cookie("/dashboard", [Reply::ok_json("{}")]);
    h.session.record().set_token("t1");
    h.session.api().send(ApiRequest::get("/a")).await.expect("ok");
    assert_eq!(h.transport.requests()[0].header_value("Authorization"), None);
}

#[tokio::test]
async fn bearer_mode_attaches_token() {
    let h = Harness::new(bearer(), "/dashboard", [Reply::ok_json("{}")]);
    h.session.record().set_token("t1");
    h.session.api().send(ApiRequest::get("/a")).await.expect("ok");
    assert_eq!(h.transport.requests()[0].header_value("authorization"), Some("Bearer t1"));
}

#[tokio::test]
async fn bearer_mode_without_token_sends_no_header() {
    let h = Harness::new(bearer(), "/dashboard", [Reply::ok_json("{}")]);
    h.session.api().send(ApiRequest::get("/a")).await.expect("ok");
    assert_eq!(h.transport.requests()[0].header_value("Authorization"), None);
}

#[tokio::test]
async fn bearer_mode_unauthorized_removes_whole_record() {
    let h = Harness::new(bearer(), "/contacts/9", [Reply::status(401)]);
    h.session.record().set_token("t1");
    h.session.record().mirror_identity(&jane());

    let _ = h.session.api().send(ApiRequest::get("/a")).await;

    assert_eq!(h.session.record().token(), None);
    assert_eq!(h.session.record().user_id(), None);
    assert_eq!(h.session.record().current_user(), None);
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn cookie_mode_unauthorized_leaves_store_untouched() {
    let h = Harness::cookie("/contacts", [Reply::status(401)]);
    h.store.set_item("theme", "dark");
    let _ = h.session.api().send(ApiRequest::get("/a")).await;
    assert_eq!(h.store.get_item("theme"), Some("dark".to_owned()));
}
