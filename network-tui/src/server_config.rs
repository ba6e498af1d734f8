use crate::config::ClientConfig;
use crate::session::ClientSession;
use network_types::ColorScheme;

/// Server used when nothing else is configured (Django's `runserver` default)
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Values given on the command line or through the environment.
///
/// clap fills these from both sources, so they share the top priority.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub server_url: Option<String>,
    pub username: Option<String>,
    pub session_id: Option<String>,
    pub csrf_token: Option<String>,
}

/// Fully resolved connection settings
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionSettings {
    pub server_url: String,
    pub username: Option<String>,
    pub session_id: Option<String>,
    pub csrf_token: Option<String>,
    pub color_scheme: ColorScheme,
}

impl ConnectionSettings {
    /// Resolve settings by priority:
    /// 1. CLI argument or environment variable (highest priority)
    /// 2. Saved configuration file
    /// 3. Defaults (lowest priority)
    pub fn resolve(overrides: &ConnectionOverrides, saved: Option<&ClientConfig>) -> Self {
        let pick = |over: &Option<String>, file: Option<&Option<String>>| {
            over.clone()
                .or_else(|| file.and_then(|value| value.clone()))
                .filter(|value| !value.trim().is_empty())
        };

        let server_url = pick(&overrides.server_url, saved.map(|c| &c.server_url))
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        Self {
            server_url,
            username: pick(&overrides.username, saved.map(|c| &c.username)),
            session_id: pick(&overrides.session_id, saved.map(|c| &c.session_id)),
            csrf_token: pick(&overrides.csrf_token, saved.map(|c| &c.csrf_token)),
            color_scheme: saved.map(|c| c.color_scheme).unwrap_or_default(),
        }
    }

    /// Build the session context the client acts under
    pub fn session(&self) -> ClientSession {
        let session = match &self.username {
            Some(username) => ClientSession::authenticated(username.clone()),
            None => ClientSession::anonymous(),
        };

        match &self.session_id {
            Some(session_id) => session.with_credentials(session_id.clone(), self.csrf_token.clone()),
            None => session,
        }
    }

    /// Config file contents that reproduce these settings
    pub fn to_config(&self) -> ClientConfig {
        ClientConfig {
            server_url: Some(self.server_url.clone()),
            username: self.username.clone(),
            session_id: self.session_id.clone(),
            csrf_token: self.csrf_token.clone(),
            color_scheme: self.color_scheme,
            last_updated: None,
        }
    }

    /// Get a display-friendly description of the configured server
    pub fn server_description(&self) -> String {
        let url = &self.server_url;
        if url == DEFAULT_SERVER_URL {
            "Local Development Server (default)".to_string()
        } else if url.contains("localhost") || url.contains("127.0.0.1") {
            "Local Development Server (custom)".to_string()
        } else {
            "Custom Server".to_string()
        }
    }
}
