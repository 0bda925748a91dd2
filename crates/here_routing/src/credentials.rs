use std::fmt::Debug;

/// The authentication scheme behind a [`Credentials`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// `apiKey` query parameter
    ApiKey,
    /// `Authorization: Bearer` header
    Bearer,
    /// Legacy `app_id` and `app_code` query parameters
    AppIdCode,
}

/// How requests are authenticated against the HERE platform.
///
/// API keys and the legacy app id / app code pair travel in the query string,
/// bearer tokens travel in the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    ApiKey(String),
    Bearer(String),
    AppIdCode { app_id: String, app_code: String },
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}

impl Credentials {
    pub fn from_api_key(key: impl Into<String>) -> Self {
        Credentials::ApiKey(key.into())
    }

    pub fn from_bearer(token: impl Into<String>) -> Self {
        Credentials::Bearer(token.into())
    }

    pub fn from_app_id_code(app_id: impl Into<String>, app_code: impl Into<String>) -> Self {
        Credentials::AppIdCode {
            app_id: app_id.into(),
            app_code: app_code.into(),
        }
    }

    /// Which scheme these credentials use.
    pub fn kind(&self) -> CredentialKind {
        match self {
            Credentials::ApiKey(_) => CredentialKind::ApiKey,
            Credentials::Bearer(_) => CredentialKind::Bearer,
            Credentials::AppIdCode { .. } => CredentialKind::AppIdCode,
        }
    }

    /// Bearer tokens never appear in the query string.
    pub fn is_bearer(&self) -> bool {
        self.kind() == CredentialKind::Bearer
    }

    /// The API key, `None` for other kinds or an empty key.
    pub fn api_key(&self) -> Option<&str> {
        match self {
            Credentials::ApiKey(key) => non_empty(key),
            _ => None,
        }
    }

    /// The bearer token, `None` for other kinds or an empty token.
    pub fn bearer_token(&self) -> Option<&str> {
        match self {
            Credentials::Bearer(token) => non_empty(token),
            _ => None,
        }
    }

    /// The legacy app id, `None` for other kinds or an empty id.
    pub fn app_id(&self) -> Option<&str> {
        match self {
            Credentials::AppIdCode { app_id, .. } => non_empty(app_id),
            _ => None,
        }
    }

    /// The legacy app code, `None` for other kinds or an empty code.
    pub fn app_code(&self) -> Option<&str> {
        match self {
            Credentials::AppIdCode { app_code, .. } => non_empty(app_code),
            _ => None,
        }
    }
}

// Secrets end up in tracing output otherwise
impl Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(***)"),
            Credentials::Bearer(_) => f.write_str("Bearer(***)"),
            Credentials::AppIdCode { app_id, .. } => f
                .debug_struct("AppIdCode")
                .field("app_id", app_id)
                .field("app_code", &"***")
                .finish(),
        }
    }
}
