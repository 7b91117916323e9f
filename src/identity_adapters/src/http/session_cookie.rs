use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use identity_core::SessionId;

use crate::config::SessionSettings;

/// How the session id travels to and from the browser.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    name: String,
    secure: bool,
}

impl SessionCookie {
    pub fn new(name: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            secure,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn issue(&self, session_id: &SessionId) -> Cookie<'static> {
        Cookie::build((self.name.clone(), session_id.as_str().to_string()))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build()
    }

    pub fn removal(&self) -> Cookie<'static> {
        Cookie::build(self.name.clone()).path("/").build()
    }

    /// `None` when the cookie is absent or cannot be a session id.
    pub fn session_id(&self, jar: &CookieJar) -> Option<SessionId> {
        jar.get(&self.name)
            .and_then(|cookie| SessionId::parse(cookie.value()).ok())
    }
}

impl From<&SessionSettings> for SessionCookie {
    fn from(settings: &SessionSettings) -> Self {
        Self::new(settings.cookie_name.clone(), settings.secure_cookie)
    }
}
