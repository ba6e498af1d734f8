/// Cookies the server uses to recognise an authenticated browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub session_id: String,
    pub csrf_token: Option<String>,
}

/// Who the client is acting as.
///
/// Built once at startup and shared (behind an `Arc`) with the router, the
/// feed renderer and the action executor, which never read identity from
/// anywhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSession {
    username: Option<String>,
    credentials: Option<Credentials>,
}

impl ClientSession {
    /// A session that is not logged in; no edit or follow affordances are offered
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, session_id: impl Into<String>, csrf_token: Option<String>) -> Self {
        self.credentials = Some(Credentials {
            session_id: session_id.into(),
            csrf_token,
        });
        self
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    /// Whether `user` is the authenticated user
    pub fn is_current_user(&self, user: &str) -> bool {
        self.username.as_deref() == Some(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_session_owns_nothing() {
        let session = ClientSession::anonymous();
        assert!(!session.is_authenticated());
        assert!(!session.is_current_user("alice"));
        assert!(session.credentials().is_none());
    }

    #[test]
    fn test_authenticated_session_matches_exact_username() {
        let session = ClientSession::authenticated("alice").with_credentials("abc123", Some("tok".into()));
        assert!(session.is_current_user("alice"));
        assert!(!session.is_current_user("Alice"));
        assert_eq!(session.credentials().unwrap().csrf_token.as_deref(), Some("tok"));
    }
}
