//! Scripted collaborators for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;

use crate::auth::Session;
use crate::config::SessionConfig;
use crate::error::TransportError;
use crate::net::http::{ApiRequest, ApiResponse, HttpTransport};
use crate::net::types::UserProfile;
use crate::util::navigation::Navigator;
use crate::util::storage::MemoryStore;

pub(crate) const JANE_JSON: &str = r#"{"subject":"u1","name":"Jane Roe","email":"jane@example.com"}"#;

pub(crate) fn jane() -> UserProfile {
    UserProfile {
        id: "u1".to_owned(),
        full_name: "Jane Roe".to_owned(),
        email: "jane@example.com".to_owned(),
    }
}

/// What the next request receives.
pub(crate) enum Reply {
    Respond(u16, String),
    Fail(TransportError),
    /// Never resolves; only a timeout ends the request.
    Hang,
    /// Resolves when the paired sender fires.
    Gate(oneshot::Receiver<ApiResponse>),
}

impl Reply {
    pub(crate) fn ok_json(body: &str) -> Self {
        Self::Respond(200, body.to_owned())
    }

    pub(crate) fn status(status: u16) -> Self {
        Self::Respond(status, String::new())
    }

    pub(crate) fn gate() -> (oneshot::Sender<ApiResponse>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self::Gate(rx))
    }
}

/// Replays queued replies in order and records every request. Unscripted
/// requests get a 404.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new(replies: impl IntoIterator<Item = Reply>) -> Rc<Self> {
        Rc::new(Self {
            replies: RefCell::new(replies.into_iter().collect()),
            requests: RefCell::default(),
        })
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn count_to(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|r| r.url == url).count()
    }
}

impl HttpTransport for ScriptedTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, TransportError>> {
        self.requests.borrow_mut().push(request);
        let reply = self.replies.borrow_mut().pop_front();
        async move {
            match reply {
                None => Ok(ApiResponse::new(404, "")),
                Some(Reply::Respond(status, body)) => Ok(ApiResponse::new(status, body)),
                Some(Reply::Fail(err)) => Err(err),
                Some(Reply::Hang) => futures::future::pending().await,
                Some(Reply::Gate(rx)) => rx.await.map_err(|_| TransportError::Network("gate dropped".to_owned())),
            }
        }
        .boxed_local()
    }
}

/// Navigator whose location only changes when `follow` is set, mimicking a
/// full-page `location.href` assignment that has not unloaded the page yet.
pub(crate) struct RecordingNavigator {
    path: RefCell<String>,
    redirects: RefCell<Vec<String>>,
    follow: Cell<bool>,
}

impl RecordingNavigator {
    pub(crate) fn at(path: &str) -> Rc<Self> {
        Rc::new(Self {
            path: RefCell::new(path.to_owned()),
            redirects: RefCell::default(),
            follow: Cell::new(false),
        })
    }

    pub(crate) fn following(path: &str) -> Rc<Self> {
        let nav = Self::at(path);
        nav.follow.set(true);
        nav
    }

    pub(crate) fn redirects(&self) -> Vec<String> {
        self.redirects.borrow().clone()
    }

    pub(crate) fn visit(&self, path: &str) {
        *self.path.borrow_mut() = path.to_owned();
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn redirect(&self, path: &str) {
        self.redirects.borrow_mut().push(path.to_owned());
        if self.follow.get() {
            self.visit(path);
        }
    }
}

/// Fully wired session over scripted collaborators.
pub(crate) struct Harness {
    pub(crate) session: Rc<Session>,
    pub(crate) transport: Rc<ScriptedTransport>,
    pub(crate) navigator: Rc<RecordingNavigator>,
    pub(crate) store: Rc<MemoryStore>,
}

impl Harness {
    pub(crate) fn new(config: SessionConfig, path: &str, replies: impl IntoIterator<Item = Reply>) -> Self {
        let transport = ScriptedTransport::new(replies);
        let navigator = RecordingNavigator::at(path);
        let store = Rc::new(MemoryStore::new());
        let session = Session::new(config, transport.clone(), store.clone(), navigator.clone());
        Self {
            session,
            transport,
            navigator,
            store,
        }
    }

    pub(crate) fn cookie(path: &str, replies: impl IntoIterator<Item = Reply>) -> Self {
        Self::new(SessionConfig::default(), path, replies)
    }
}
