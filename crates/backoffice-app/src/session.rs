// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::forms::FieldErrors;
use crate::model::PageKind;
use regex::Regex;
use std::sync::LazyLock;

static LOGIN_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("login email pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Page(PageKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub email: String,
}

/// Client-side gate in front of every page. There is no credential check:
/// any well-formed email with a non-empty password is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<SessionUser>,
    pending: Option<PageKind>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// On success returns where to land: the page that was requested before
    /// the redirect, or the dashboard.
    pub fn login(&mut self, email: &str, password: &str) -> Result<PageKind, FieldErrors> {
        let email = email.trim();
        let mut errors = FieldErrors::new();
        if email.is_empty() {
            errors.insert("email", "Email is required");
        } else if !LOGIN_EMAIL.is_match(email) {
            errors.insert("email", "Email must be a valid email address");
        }
        if password.trim().is_empty() {
            errors.insert("password", "Password is required");
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        self.user = Some(SessionUser {
            email: email.to_owned(),
        });
        Ok(self.pending.take().unwrap_or(PageKind::Dashboard))
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.pending = None;
    }

    /// Redirects unauthenticated page requests to the login screen and
    /// remembers the page for after login.
    pub fn guard(&mut self, requested: Route) -> Route {
        match requested {
            Route::Page(page) if !self.is_authenticated() => {
                self.pending = Some(page);
                Route::Login
            }
            route => route,
        }
    }

    pub fn pending(&self) -> Option<PageKind> {
        self.pending
    }
}
