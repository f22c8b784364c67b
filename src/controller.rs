/// Popup controller: turns UI intents into store and tab operations

use crate::config::default_session_name;
use crate::error::SessionError;
use crate::storage::{KeyValueStore, SessionStore};
use crate::tab_data::Session;
use crate::tabs::{capture_current_window_tabs, restore_session, TabHost};
use crate::view::{render, tab_label, SessionListView};
use std::cell::Cell;

/// Wall clock, abstracted so saves can be tested without a browser
pub trait Clock {
    fn now_millis(&self) -> i64;

    /// Locale-formatted date and time for `millis`
    fn format_local(&self, millis: i64) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopupState {
    Idle,
    Loading,
    Saving,
    Renaming(i64),
    Deleting(i64),
    Restoring(i64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedbackKind {
    Success,
    Info,
    Error,
}

/// Message shown to the user after an operation
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Feedback { kind: FeedbackKind::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Feedback { kind: FeedbackKind::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Feedback { kind: FeedbackKind::Error, message: message.into() }
    }
}

/// Resets the controller to idle when an operation finishes, on every path
struct InFlight<'a> {
    state: &'a Cell<PopupState>,
    in_flight: &'a Cell<bool>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.in_flight.set(false);
        self.state.set(PopupState::Idle);
    }
}

pub struct PopupController<S, T, C> {
    store: SessionStore<S>,
    tabs: T,
    clock: C,
    state: Cell<PopupState>,
    in_flight: Cell<bool>,
    loaded: Cell<bool>,
    dark_mode: Cell<bool>,
}

impl<S, T, C> PopupController<S, T, C>
where
    S: KeyValueStore,
    T: TabHost,
    C: Clock,
{
    pub fn new(backend: S, tabs: T, clock: C) -> Self {
        PopupController {
            store: SessionStore::new(backend),
            tabs,
            clock,
            state: Cell::new(PopupState::Idle),
            in_flight: Cell::new(false),
            loaded: Cell::new(false),
            dark_mode: Cell::new(false),
        }
    }

    pub fn state(&self) -> PopupState {
        self.state.get()
    }

    /// True while an operation is running or the rename dialog is open
    pub fn is_busy(&self) -> bool {
        self.in_flight.get() || self.state.get() != PopupState::Idle
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode.get()
    }

    pub fn view(&self) -> SessionListView {
        render(&self.store.sessions(), |ts| self.clock.format_local(ts))
    }

    /// Load persisted sessions and preferences. Returns feedback only on failure.
    ///
    /// Until a load succeeds every session operation is refused, so a save
    /// can never overwrite a list that was not read.
    pub async fn init(&self) -> Option<Feedback> {
        let _guard = match self.begin(PopupState::Loading) {
            Ok(guard) => guard,
            Err(e) => return Some(rejected(&e)),
        };

        let dark_mode = match self.store.load_dark_mode().await {
            Ok(enabled) => enabled,
            Err(e) => {
                log::warn!("Failed to load dark mode preference: {}", e);
                false
            }
        };
        self.dark_mode.set(dark_mode);

        match self.store.load_all().await {
            Ok(sessions) => {
                log::info!("Popup ready with {} sessions", sessions.len());
                self.loaded.set(true);
                None
            }
            Err(e) => Some(failure("Could not load saved sessions", &e)),
        }
    }

    pub async fn save_session(&self, name_input: &str) -> Feedback {
        let _guard = match self.begin(PopupState::Saving) {
            Ok(guard) => guard,
            Err(e) => return rejected(&e),
        };

        let now = self.clock.now_millis();
        let name = match name_input.trim() {
            "" => default_session_name(&self.clock.format_local(now)),
            name => name.to_string(),
        };

        let tabs = match capture_current_window_tabs(&self.tabs).await {
            Ok(tabs) => tabs,
            Err(e) => return failure("Could not read the open tabs", &e),
        };

        let session = Session::new(name, now, tabs);
        let message = format!("Saved \"{}\" with {}", session.name, tab_label(session.tab_count));

        match self.store.append(session).await {
            Ok(()) => {
                log::info!("{}", message);
                Feedback::success(message)
            }
            Err(e) => failure("Could not save the session", &e),
        }
    }

    /// Delete after `confirm` approves. Returns `None` if the user declined.
    pub async fn delete_session<F>(&self, timestamp: i64, confirm: F) -> Option<Feedback>
    where
        F: FnOnce(&Session) -> bool,
    {
        let _guard = match self.begin(PopupState::Deleting(timestamp)) {
            Ok(guard) => guard,
            Err(e) => return Some(rejected(&e)),
        };

        let Some(session) = self.store.get(timestamp) else {
            return Some(not_found(timestamp));
        };

        if !confirm(&session) {
            return None;
        }

        let feedback = match self.store.remove_by_timestamp(timestamp).await {
            Ok(true) => {
                log::info!("Deleted session {}", timestamp);
                Feedback::success(format!("Deleted \"{}\"", session.name))
            }
            Ok(false) => not_found(timestamp),
            Err(e) => failure("Could not delete the session", &e),
        };
        Some(feedback)
    }

    /// Open the rename dialog for `timestamp`, returning the name to prefill
    pub fn begin_rename(&self, timestamp: i64) -> Option<String> {
        if self.is_busy() || !self.loaded.get() {
            return None;
        }

        let session = self.store.get(timestamp)?;
        self.state.set(PopupState::Renaming(timestamp));
        Some(session.name)
    }

    /// Apply the dialog input. A blank input keeps the dialog open.
    pub async fn confirm_rename(&self, input: &str) -> Feedback {
        let PopupState::Renaming(timestamp) = self.state.get() else {
            return Feedback::error("No session is being renamed");
        };
        if self.in_flight.get() {
            return rejected(&SessionError::Busy);
        }
        if input.trim().is_empty() {
            return Feedback::error(SessionError::EmptyName.to_string());
        }

        self.in_flight.set(true);
        let _guard = InFlight { state: &self.state, in_flight: &self.in_flight };

        match self.store.rename_by_timestamp(timestamp, input).await {
            Ok(true) => {
                log::info!("Renamed session {}", timestamp);
                Feedback::success(format!("Renamed to \"{}\"", input.trim()))
            }
            Ok(false) => not_found(timestamp),
            Err(SessionError::EmptyName) => Feedback::error(SessionError::EmptyName.to_string()),
            Err(e) => failure("Could not rename the session", &e),
        }
    }

    pub fn cancel_rename(&self) {
        if !self.in_flight.get() && matches!(self.state.get(), PopupState::Renaming(_)) {
            self.state.set(PopupState::Idle);
        }
    }

    /// Reopen a session's tabs; the session itself is kept
    pub async fn open_session(&self, timestamp: i64) -> Feedback {
        let _guard = match self.begin(PopupState::Restoring(timestamp)) {
            Ok(guard) => guard,
            Err(e) => return rejected(&e),
        };

        let Some(session) = self.store.get(timestamp) else {
            return not_found(timestamp);
        };

        match restore_session(&self.tabs, &session).await {
            Ok(opened) => {
                log::info!("Restored {} tabs from session {}", opened, timestamp);
                Feedback::success(format!("Opened {} from \"{}\"", tab_label(opened), session.name))
            }
            Err(e) => failure("Could not open all tabs", &e),
        }
    }

    /// Flip and persist the dark-mode preference. Returns feedback only on failure.
    pub async fn toggle_dark_mode(&self) -> Option<Feedback> {
        let enabled = !self.dark_mode.get();
        match self.store.save_dark_mode(enabled).await {
            Ok(()) => {
                self.dark_mode.set(enabled);
                None
            }
            Err(e) => Some(failure("Could not save the theme preference", &e)),
        }
    }

    fn begin(&self, next: PopupState) -> Result<InFlight<'_>, SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy);
        }
        if next != PopupState::Loading && !self.loaded.get() {
            return Err(SessionError::NotLoaded);
        }

        self.state.set(next);
        self.in_flight.set(true);
        Ok(InFlight { state: &self.state, in_flight: &self.in_flight })
    }
}

fn failure(context: &str, err: &SessionError) -> Feedback {
    log::error!("{}: {}", context, err);
    Feedback::error(context)
}

fn rejected(err: &SessionError) -> Feedback {
    log::debug!("Rejected operation: {}", err);
    match err {
        SessionError::NotLoaded => {
            Feedback::error("Saved sessions are not loaded; reopen the popup to retry")
        }
        _ => Feedback::info("Please wait for the current operation to finish"),
    }
}

fn not_found(timestamp: i64) -> Feedback {
    log::warn!("{}", SessionError::NotFound(timestamp));
    Feedback::error("Session not found")
}
