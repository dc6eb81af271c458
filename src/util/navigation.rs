//! Location access for forced navigations.
//!
//! The 401 interceptor must leave the current view even when it fires deep
//! inside an API call, outside any router context, so it goes through this
//! seam instead of `leptos_router`.

use std::cell::RefCell;

pub trait Navigator {
    /// Current path, without origin.
    fn current_path(&self) -> String;
    /// Leave the current view for `path`.
    fn redirect(&self, path: &str);
}

/// Full-page navigation through `window.location`, the same way the login
/// page hands off to the backend.
#[cfg(feature = "csr")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

#[cfg(feature = "csr")]
impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().pathname().ok())
            .unwrap_or_default()
    }

    fn redirect(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
}

/// In-process navigator: redirects take effect immediately and are kept in
/// a history list.
#[derive(Debug)]
pub struct MemoryNavigator {
    path: RefCell<String>,
    history: RefCell<Vec<String>>,
}

impl MemoryNavigator {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            path: RefCell::new(initial.into()),
            history: RefCell::new(Vec::new()),
        }
    }

    /// Paths passed to `redirect`, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.borrow().clone()
    }

    /// Simulate a user-initiated navigation.
    pub fn visit(&self, path: &str) {
        *self.path.borrow_mut() = path.to_owned();
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.path.borrow().clone()
    }

    fn redirect(&self, path: &str) {
        self.history.borrow_mut().push(path.to_owned());
        self.visit(path);
    }
}
