//! 401 handling around every API exchange.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ApiClient` calls `on_request` before handing a request to the transport
//! and `on_response` with whatever came back. A 401 on an ordinary request
//! means the backend no longer recognizes the session: local authorization
//! material and the session record are cleared, the tab is sent to the login
//! route, and the caller still receives the error.
//!
//! Several requests usually fail together once a session expires. The
//! `redirect_pending` latch turns that burst into one redirect; it re-arms
//! once the login route is reached or a session is re-established.

#[cfg(test)]
#[path = "invalidation_test.rs"]
mod invalidation_test;

use std::cell::Cell;
use std::rc::Rc;

use super::routes::RoutePolicy;
use crate::config::CredentialMode;
use crate::error::ApiError;
use crate::net::http::{ApiRequest, ApiResponse};
use crate::state::session::SessionState;
use crate::util::navigation::Navigator;
use crate::util::storage::DurableRecord;

const UNAUTHORIZED: u16 = 401;

pub struct InvalidationInterceptor {
    state: Rc<SessionState>,
    record: Rc<DurableRecord>,
    navigator: Rc<dyn Navigator>,
    policy: RoutePolicy,
    credentials: CredentialMode,
    redirect_pending: Cell<bool>,
}

impl InvalidationInterceptor {
    pub fn new(
        state: Rc<SessionState>,
        record: Rc<DurableRecord>,
        navigator: Rc<dyn Navigator>,
        policy: RoutePolicy,
        credentials: CredentialMode,
    ) -> Self {
        Self {
            state,
            record,
            navigator,
            policy,
            credentials,
            redirect_pending: Cell::new(false),
        }
    }

    /// Attach the bearer token in bearer mode. Cookie mode leaves headers
    /// alone; the browser sends the session cookie itself.
    pub fn on_request(&self, request: &mut ApiRequest) {
        if self.credentials != CredentialMode::Bearer {
            return;
        }
        if let Some(token) = self.record.token() {
            request.set_header("Authorization", format!("Bearer {token}"));
        }
    }

    /// Map a raw response to the caller's result, running the invalidation
    /// side effect on 401.
    ///
    /// # Errors
    ///
    /// `ApiError::Unauthorized` for 401 and `ApiError::Status` for any other
    /// non-2xx status, unless the request accepts every status.
    pub fn on_response(&self, response: ApiResponse, accept_any_status: bool) -> Result<ApiResponse, ApiError> {
        if accept_any_status || response.is_success() {
            return Ok(response);
        }
        if response.status == UNAUTHORIZED {
            self.invalidate();
            return Err(ApiError::Unauthorized);
        }
        Err(ApiError::Status(response.status))
    }

    /// Drop local authorization material and leave for the login route.
    pub fn invalidate(&self) {
        log::warn!("session invalidated by backend (401)");
        if self.credentials == CredentialMode::Bearer {
            self.record.clear();
        }
        self.state.clear();
        self.redirect_to_login();
    }

    #[must_use]
    pub fn redirect_pending(&self) -> bool {
        self.redirect_pending.get()
    }

    /// Re-arm the redirect latch after a successful identity load.
    pub(crate) fn session_restored(&self) {
        self.redirect_pending.set(false);
    }

    fn redirect_to_login(&self) {
        if self.policy.is_login_route(&self.navigator.current_path()) {
            log::debug!("already on login route; skipping redirect");
            self.redirect_pending.set(false);
            return;
        }
        if self.redirect_pending.replace(true) {
            log::debug!("login redirect already pending");
            return;
        }
        log::info!("redirecting to {}", self.policy.login_route());
        self.navigator.redirect(self.policy.login_route());
    }
}
