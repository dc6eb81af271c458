//! Single-flight "who am I" loader.
//!
//! SYSTEM CONTEXT
//! ==============
//! `load` is called once by the bootstrap sequencer and again by anything
//! that wants to re-check the session. Concurrent callers share one query:
//! the first call stores a `Shared` future in `in_flight` and later calls
//! await a clone of it. Each call counts as a waiter while it awaits; when
//! the last waiter leaves (resolved or dropped) the slot is emptied. An
//! abandoned query is therefore dropped with its last waiter, and its
//! loading guard releases the flag.
//!
//! ERROR HANDLING
//! ==============
//! Every failure mode (non-200, malformed body, transport error, timeout)
//! becomes "not authenticated". `load` returns a plain `bool` and cannot
//! fail.

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use super::invalidation::InvalidationInterceptor;
use super::provider::SessionProvider;
use crate::config::{CredentialMode, SessionConfig};
use crate::error::ApiError;
use crate::net::api::ApiClient;
use crate::net::http::{ApiRequest, ApiResponse};
use crate::net::types::{IdentityResponse, UserProfile};
use crate::state::auth::AuthState;
use crate::state::session::SessionState;
use crate::util::storage::DurableRecord;

type Flight = Shared<LocalBoxFuture<'static, bool>>;

struct InFlight {
    flight: Flight,
    waiters: Rc<Cell<usize>>,
}

/// One `load` call awaiting a flight.
struct Waiter<'a> {
    slot: &'a RefCell<Option<InFlight>>,
    flight: Flight,
    waiters: Rc<Cell<usize>>,
}

impl Drop for Waiter<'_> {
    fn drop(&mut self) {
        let left = self.waiters.get().saturating_sub(1);
        self.waiters.set(left);
        if left > 0 {
            return;
        }
        let mut slot = self.slot.borrow_mut();
        if slot.as_ref().is_some_and(|current| current.flight.ptr_eq(&self.flight)) {
            if self.flight.peek().is_none() {
                log::debug!("identity query abandoned by its last waiter");
            }
            *slot = None;
        }
    }
}

const OK: u16 = 200;

/// Extract a profile from an identity response: status 200 and a non-empty
/// subject id, nothing else counts.
fn interpret(response: &ApiResponse) -> Option<UserProfile> {
    if response.status != OK {
        log::debug!("identity query returned {}", response.status);
        return None;
    }
    match response.json::<IdentityResponse>() {
        Ok(identity) => identity.into_profile(),
        Err(err) => {
            log::warn!("identity query: {err}");
            None
        }
    }
}

/// Outcome of a best-effort call, deliberately discarded.
fn best_effort(label: &str, result: Result<ApiResponse, ApiError>) {
    match result {
        Ok(resp) => log::debug!("{label}: backend answered {}", resp.status),
        Err(err) => log::debug!("{label}: ignored failure: {err}"),
    }
}

pub struct SessionLoader {
    api: Rc<ApiClient>,
    state: Rc<SessionState>,
    record: Rc<DurableRecord>,
    interceptor: Rc<InvalidationInterceptor>,
    identity_endpoint: String,
    logout_endpoint: String,
    request_timeout: Duration,
    logout_timeout: Duration,
    credentials: CredentialMode,
    in_flight: RefCell<Option<InFlight>>,
    /// Bumped by `logout`; a query started under an older epoch must not
    /// resurrect the session it raced with.
    epoch: Rc<Cell<u64>>,
}

impl SessionLoader {
    pub fn new(
        config: &SessionConfig,
        api: Rc<ApiClient>,
        state: Rc<SessionState>,
        record: Rc<DurableRecord>,
    ) -> Self {
        let interceptor = Rc::clone(api.interceptor());
        Self {
            api,
            state,
            record,
            interceptor,
            identity_endpoint: config.identity_endpoint.clone(),
            logout_endpoint: config.logout_endpoint.clone(),
            request_timeout: config.request_timeout(),
            logout_timeout: config.logout_timeout(),
            credentials: config.credentials,
            in_flight: RefCell::new(None),
            epoch: Rc::new(Cell::new(0)),
        }
    }

    /// Resolve the current identity, joining an in-flight query if any.
    pub async fn load(&self) -> bool {
        let waiter = self.join_or_start();
        waiter.flight.clone().await
    }

    /// End the session: tell the backend (best effort), then clear locally
    /// no matter what it answered.
    pub async fn logout(&self) {
        self.epoch.set(self.epoch.get() + 1);
        let request = ApiRequest::post(self.logout_endpoint.as_str())
            .json(serde_json::json!({}))
            .timeout(self.logout_timeout)
            .accept_any_status();
        best_effort("logout", self.api.send(request).await);

        if self.credentials == CredentialMode::Bearer {
            self.record.clear();
        }
        self.state.clear();
        log::info!("logged out");
    }

    fn join_or_start(&self) -> Waiter<'_> {
        let existing = self
            .in_flight
            .borrow()
            .as_ref()
            .filter(|current| current.flight.peek().is_none())
            .map(|current| (current.flight.clone(), Rc::clone(&current.waiters)));

        let (flight, waiters) = match existing {
            Some(joined) => {
                log::debug!("joining in-flight identity query");
                joined
            }
            None => {
                let flight = self.identity_query().shared();
                let waiters = Rc::new(Cell::new(0));
                *self.in_flight.borrow_mut() = Some(InFlight {
                    flight: flight.clone(),
                    waiters: Rc::clone(&waiters),
                });
                (flight, waiters)
            }
        };
        waiters.set(waiters.get() + 1);
        Waiter {
            slot: &self.in_flight,
            flight,
            waiters,
        }
    }

    fn identity_query(&self) -> LocalBoxFuture<'static, bool> {
        let api = Rc::clone(&self.api);
        let state = Rc::clone(&self.state);
        let record = Rc::clone(&self.record);
        let interceptor = Rc::clone(&self.interceptor);
        let epoch = Rc::clone(&self.epoch);
        let started_at = epoch.get();
        let request = ApiRequest::get(self.identity_endpoint.as_str())
            .timeout(self.request_timeout)
            .accept_any_status();
        let mirror = self.credentials == CredentialMode::Bearer;

        async move {
            let _loading = state.begin_loading();
            log::debug!("identity query started");

            let profile = match api.send(request).await {
                Ok(response) => interpret(&response),
                Err(err) => {
                    log::warn!("identity query failed: {err}");
                    None
                }
            };
            let profile = profile.filter(|_| {
                let current = epoch.get() == started_at;
                if !current {
                    log::debug!("discarding identity resolved across a logout");
                }
                current
            });

            match profile {
                Some(profile) => {
                    if mirror {
                        record.mirror_identity(&profile);
                    }
                    state.apply(profile);
                    interceptor.session_restored();
                    true
                }
                None => {
                    state.clear();
                    false
                }
            }
        }
        .boxed_local()
    }
}

impl SessionProvider for SessionLoader {
    fn read(&self) -> AuthState {
        self.state.read()
    }
}
