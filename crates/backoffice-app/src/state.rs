// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::forms::FieldErrors;
use crate::model::{PageKind, Theme};
use crate::session::{Route, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub route: Route,
    pub session: Session,
    pub theme: Theme,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            route: Route::Login,
            session: Session::default(),
            theme: Theme::Light,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    NextPage,
    PrevPage,
    Navigate(PageKind),
    ToggleTheme,
    Logout,
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    RouteChanged(Route),
    ThemeChanged(Theme),
    LoggedIn(String),
    LoggedOut,
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    /// Starts at the login screen with `start_page` remembered for after login.
    pub fn new(theme: Theme, start_page: PageKind) -> Self {
        let mut state = Self {
            theme,
            ..Self::default()
        };
        state.route = state.session.guard(Route::Page(start_page));
        state
    }

    pub fn active_page(&self) -> Option<PageKind> {
        match self.route {
            Route::Page(page) => Some(page),
            Route::Login => None,
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::NextPage => self.rotate_page(1),
            AppCommand::PrevPage => self.rotate_page(-1),
            AppCommand::Navigate(page) => self.navigate(page),
            AppCommand::ToggleTheme => {
                self.theme = self.theme.toggled();
                let label = format!("{} theme", self.theme.as_str());
                vec![AppEvent::ThemeChanged(self.theme), self.set_status(&label)]
            }
            AppCommand::Logout => {
                self.session.logout();
                self.route = Route::Login;
                vec![
                    AppEvent::LoggedOut,
                    AppEvent::RouteChanged(self.route),
                    self.set_status("logged out"),
                ]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<Vec<AppEvent>, FieldErrors> {
        let landing = self.session.login(email, password)?;
        self.route = Route::Page(landing);
        let email = self
            .session
            .user()
            .map(|user| user.email.clone())
            .unwrap_or_default();
        Ok(vec![
            AppEvent::LoggedIn(email),
            AppEvent::RouteChanged(self.route),
        ])
    }

    pub fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }

    fn navigate(&mut self, page: PageKind) -> Vec<AppEvent> {
        let route = self.session.guard(Route::Page(page));
        if route == self.route {
            return Vec::new();
        }
        self.route = route;
        vec![AppEvent::RouteChanged(self.route)]
    }

    fn rotate_page(&mut self, delta: isize) -> Vec<AppEvent> {
        let Some(current) = self.active_page() else {
            return Vec::new();
        };
        let pages = PageKind::ALL;
        let index = pages
            .iter()
            .position(|page| *page == current)
            .unwrap_or(0) as isize;
        let len = pages.len() as isize;
        let next = (index + delta).rem_euclid(len) as usize;
        self.navigate(pages[next])
    }
}
