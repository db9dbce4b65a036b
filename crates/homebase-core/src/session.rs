//! Authenticated session with homebase.no
//!
//! The service keeps login state in a cookie. A [`Session`] owns the
//! cookie-bearing client and remembers whether the login has been done, so
//! every privileged operation goes through [`Session::ensure_authenticated`]
//! instead of logging in on its own. There is no logout and no
//! re-authentication when the cookie expires mid-run.

use std::fmt;

use crate::client::{HomebaseClient, Page};
use crate::error::{HomebaseError, Result};

/// Path of the login form handler
const LOGIN_PATH: &str = "/login.php";

/// Substring of the post-login URL that signals success.
///
/// Success lands on `index.php?userLoggedIn=1`; failure lands on
/// `index.php?page=loginform&e=p&username=...`.
const LOGIN_SUCCESS_MARKER: &str = "userLoggedIn=1";

/// Logon credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authentication state of a [`Session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

/// Whether a post-login URL indicates a successful logon
pub fn login_succeeded(url: &str) -> bool {
    url.contains(LOGIN_SUCCESS_MARKER)
}

/// Cookie-bearing session, authenticated lazily on first privileged call
pub struct Session {
    client: HomebaseClient,
    credentials: Credentials,
    state: SessionState,
}

impl Session {
    pub fn new(client: HomebaseClient, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
            state: SessionState::Anonymous,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    /// Client for requests that do not need a logon (the public guide)
    pub fn client(&self) -> &HomebaseClient {
        &self.client
    }

    /// Log on unless already done in this session.
    ///
    /// # Errors
    /// - `HomebaseError::Authentication` - the login landed on a page without
    ///   the success marker (bad credentials or account lockout)
    /// - `HomebaseError::HttpError` - transport failure
    pub async fn ensure_authenticated(&mut self) -> Result<()> {
        if self.is_authenticated() {
            return Ok(());
        }

        tracing::debug!("Logging on as: {}", self.credentials.username);
        let page = self
            .client
            .post_form(
                LOGIN_PATH,
                &[
                    ("action", "login"),
                    ("username", self.credentials.username.as_str()),
                    ("password", self.credentials.password.as_str()),
                    ("savelogin", "save"),
                ],
            )
            .await?;

        if !login_succeeded(&page.url) {
            tracing::debug!("Login landed on {}", page.url);
            return Err(HomebaseError::Authentication {
                username: self.credentials.username.clone(),
            });
        }

        tracing::info!("Logged on as {}", self.credentials.username);
        self.state = SessionState::Authenticated;
        Ok(())
    }

    /// GET a page that requires a logon, logging on first if needed
    pub async fn get(&mut self, path: &str) -> Result<Page> {
        self.ensure_authenticated().await?;
        self.client.get(path).await
    }

    /// POST a form that requires a logon, logging on first if needed
    pub async fn post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> Result<Page> {
        self.ensure_authenticated().await?;
        self.client.post_form(path, fields).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_succeeded_marker() {
        assert!(login_succeeded(
            "https://min.homebase.no/index.php?userLoggedIn=1"
        ));
        assert!(!login_succeeded(
            "https://min.homebase.no/index.php?page=loginform&e=p&username=jokim&gotopage="
        ));
        assert!(!login_succeeded(""));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("jokim", "hunter2");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("jokim"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_new_session_is_anonymous() {
        let session = Session::new(
            HomebaseClient::new().unwrap(),
            Credentials::new("jokim", "secret"),
        );
        assert_eq!(session.state(), SessionState::Anonymous);
        assert!(!session.is_authenticated());
    }
}
