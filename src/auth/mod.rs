//! Session coordinator services and their composition root.
//!
//! ARCHITECTURE
//! ============
//! `Session::new` builds every service exactly once and wires them by `Rc`:
//!
//! - `SessionState` (the record) is shared by the loader, the interceptor,
//!   and UI subscribers.
//! - `InvalidationInterceptor` sits inside `ApiClient`, so every request the
//!   loader or the app makes passes through it.
//! - `SessionLoader` is the `SessionProvider` the guard reads.
//! - `BootstrapSequencer` gates the guard and the mount.
//!
//! Only the loader and the interceptor write the record.


pub mod bootstrap;
pub mod guard;
pub mod invalidation;
pub mod loader;
pub mod provider;
pub mod routes;

use std::rc::Rc;

use self::bootstrap::BootstrapSequencer;
use self::guard::NavigationGuard;
use self::invalidation::InvalidationInterceptor;
use self::loader::SessionLoader;
use self::routes::RoutePolicy;
use crate::config::SessionConfig;
use crate::net::api::ApiClient;
use crate::net::http::HttpTransport;
use crate::state::session::SessionState;
use crate::util::navigation::Navigator;
use crate::util::storage::{ClientStore, DurableRecord};

pub struct Session {
    config: SessionConfig,
    state: Rc<SessionState>,
    record: Rc<DurableRecord>,
    api: Rc<ApiClient>,
    loader: Rc<SessionLoader>,
    bootstrap: Rc<BootstrapSequencer>,
    guard: Rc<NavigationGuard>,
}

impl Session {
    pub fn new(
        config: SessionConfig,
        transport: Rc<dyn HttpTransport>,
        store: Rc<dyn ClientStore>,
        navigator: Rc<dyn Navigator>,
    ) -> Rc<Self> {
        let policy = RoutePolicy::from_config(&config);
        let state = SessionState::new();
        let record = Rc::new(DurableRecord::new(store));
        let interceptor = Rc::new(InvalidationInterceptor::new(
            Rc::clone(&state),
            Rc::clone(&record),
            navigator,
            policy.clone(),
            config.credentials,
        ));
        let api = Rc::new(ApiClient::new(
            transport,
            interceptor,
            config.api_base_url.clone(),
            config.request_timeout(),
        ));
        let loader = Rc::new(SessionLoader::new(
            &config,
            Rc::clone(&api),
            Rc::clone(&state),
            Rc::clone(&record),
        ));
        let bootstrap = Rc::new(BootstrapSequencer::new(Rc::clone(&loader)));
        let guard = Rc::new(NavigationGuard::new(loader.clone(), Rc::clone(&bootstrap), policy));

        Rc::new(Self {
            config,
            state,
            record,
            api,
            loader,
            bootstrap,
            guard,
        })
    }

    /// Browser wiring: `fetch`, `localStorage`, and `window.location`.
    #[cfg(feature = "csr")]
    pub fn browser(config: SessionConfig) -> Rc<Self> {
        Self::new(
            config,
            Rc::new(crate::net::browser::GlooTransport),
            Rc::new(crate::util::storage::LocalStorageStore),
            Rc::new(crate::util::navigation::BrowserNavigator),
        )
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &Rc<SessionState> {
        &self.state
    }

    /// Durable record, for the login flow to store an issued bearer token.
    #[must_use]
    pub fn record(&self) -> &Rc<DurableRecord> {
        &self.record
    }

    #[must_use]
    pub fn api(&self) -> &Rc<ApiClient> {
        &self.api
    }

    #[must_use]
    pub fn loader(&self) -> &Rc<SessionLoader> {
        &self.loader
    }

    #[must_use]
    pub fn guard(&self) -> &Rc<NavigationGuard> {
        &self.guard
    }

    /// Run the startup identity load; resolves once, whatever the outcome.
    pub async fn bootstrap(&self) -> bool {
        self.bootstrap.run().await
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.bootstrap.is_ready()
    }
}
