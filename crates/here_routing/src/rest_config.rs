use thiserror::Error;
use tracing::debug;

use crate::credentials::Credentials;

pub const ROUTING_V8_BASE_URL: &str = "https://router.hereapi.com";
pub const ROUTING_V8_CONFIG_SLOT: &str = "HERE_ROUTING_V8";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("No credentials configured, set {slot} or {slot}_APP_ID and {slot}_APP_CODE")]
    MissingCredentials { slot: String },
}

/// Where requests go and how they are authenticated.
#[derive(Debug, Clone, PartialEq)]
pub struct RestConfig {
    base_url: String,
    credentials: Credentials,
}

impl RestConfig {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

pub fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Resolves the credentials stored under `slot`.
///
/// An explicit `override_credentials` always wins. Otherwise `slot` holds an
/// API key, or `<slot>_APP_ID` and `<slot>_APP_CODE` hold a legacy pair.
pub fn resolve_credentials<F>(
    slot: &str,
    override_credentials: Option<Credentials>,
    lookup: F,
) -> Result<Credentials, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(credentials) = override_credentials {
        return Ok(credentials);
    }

    let lookup_non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

    if let Some(api_key) = lookup_non_empty(slot) {
        debug!("Resolved API key from {}", slot);
        return Ok(Credentials::ApiKey(api_key));
    }

    let app_id = lookup_non_empty(&format!("{slot}_APP_ID"));
    let app_code = lookup_non_empty(&format!("{slot}_APP_CODE"));

    match (app_id, app_code) {
        (Some(app_id), Some(app_code)) => {
            debug!("Resolved app id and app code from {}", slot);
            Ok(Credentials::AppIdCode { app_id, app_code })
        }
        _ => Err(ConfigError::MissingCredentials {
            slot: slot.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(values: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let values: HashMap<String, String> = values
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| values.get(key).cloned()
    }

    #[test]
    fn test_override_wins() {
        let lookup = lookup_from(&[("SLOT", "from-env")]);
        let credentials =
            resolve_credentials("SLOT", Some(Credentials::from_bearer("token")), lookup).unwrap();
        assert_eq!(credentials, Credentials::from_bearer("token"));
    }

    #[test]
    fn test_api_key_from_slot() {
        let lookup = lookup_from(&[("SLOT", "abc123")]);
        let credentials = resolve_credentials("SLOT", None, lookup).unwrap();
        assert_eq!(credentials, Credentials::from_api_key("abc123"));
    }

    #[test]
    fn test_app_id_code_fallback() {
        let lookup = lookup_from(&[("SLOT", ""), ("SLOT_APP_ID", "id"), ("SLOT_APP_CODE", "code")]);
        let credentials = resolve_credentials("SLOT", None, lookup).unwrap();
        assert_eq!(credentials, Credentials::from_app_id_code("id", "code"));
    }

    #[test]
    fn test_missing_credentials() {
        let lookup = lookup_from(&[("SLOT_APP_ID", "id")]);
        assert_eq!(
            resolve_credentials("SLOT", None, lookup),
            Err(ConfigError::MissingCredentials {
                slot: String::from("SLOT")
            })
        );
    }
}
