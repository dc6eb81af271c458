//! Startup ordering: the first identity load resolves before anything
//! navigates.
//!
//! The app shell mounts only after `run` resolves, and the guard reports
//! `Defer` (or waits in `resolve`) until then, so a reload of a protected
//! deep link is never judged against the empty initial record.

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod bootstrap_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use super::loader::SessionLoader;

pub struct BootstrapSequencer {
    loader: Rc<SessionLoader>,
    flight: RefCell<Option<Shared<LocalBoxFuture<'static, bool>>>>,
    ready: Rc<Cell<bool>>,
}

impl BootstrapSequencer {
    pub fn new(loader: Rc<SessionLoader>) -> Self {
        Self {
            loader,
            flight: RefCell::new(None),
            ready: Rc::new(Cell::new(false)),
        }
    }

    /// Run the startup load, or wait for the one already started. The
    /// loader is invoked at most once over the sequencer's lifetime.
    pub async fn run(&self) -> bool {
        let flight = self.start();
        flight.await
    }

    /// Whether the startup load has resolved (with any outcome).
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }

    fn start(&self) -> Shared<LocalBoxFuture<'static, bool>> {
        if let Some(flight) = self.flight.borrow().as_ref() {
            return flight.clone();
        }
        let loader = Rc::clone(&self.loader);
        let ready = Rc::clone(&self.ready);
        let flight = async move {
            log::info!("bootstrap: resolving session");
            let authenticated = loader.load().await;
            ready.set(true);
            log::info!("bootstrap: ready (authenticated: {authenticated})");
            authenticated
        }
        .boxed_local()
        .shared();
        *self.flight.borrow_mut() = Some(flight.clone());
        flight
    }
}
