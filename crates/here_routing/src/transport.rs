use reqwest::{Method, StatusCode};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::credentials::Credentials;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Everything a transport needs to issue one call.
#[derive(Debug, Clone)]
pub struct TransportRequest<'a> {
    pub method: Method,
    pub base_url: &'a str,
    pub path: &'a str,
    /// Already serialized, without the leading `?`.
    pub query: &'a str,
    pub credentials: &'a Credentials,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn json(&self) -> Result<serde_json::Value, TransportError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

pub trait Transport {
    fn send(
        &self,
        request: TransportRequest<'_>,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

/// Appends `path` to the path of `base_url` and sets the pre-serialized query
/// as is, so raw parameters keep their bytes.
pub fn request_url(base_url: &str, path: &str, query: &str) -> Result<Url, TransportError> {
    let mut url = Url::parse(base_url)?;

    let full_path = format!(
        "{}/{}",
        url.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&full_path);

    if !query.is_empty() {
        url.set_query(Some(query));
    }
    Ok(url)
}

/// Maps a non-2xx status to [`TransportError::Api`], keeping the body as message.
pub fn into_response(
    status: StatusCode,
    body: String,
) -> Result<TransportResponse, TransportError> {
    if !status.is_success() {
        return Err(TransportError::Api {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(TransportResponse {
        status: status.as_u16(),
        body,
    })
}

pub struct HttpTransport {
    client: reqwest::Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn build_request(
        &self,
        request: TransportRequest<'_>,
    ) -> Result<reqwest::Request, TransportError> {
        let url = request_url(request.base_url, request.path, request.query)?;

        let mut builder = self.client.request(request.method, url);
        if let Some(token) = request.credentials.bearer_token() {
            builder = builder.bearer_auth(token);
        }

        Ok(builder.build()?)
    }
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        request: TransportRequest<'_>,
    ) -> Result<TransportResponse, TransportError> {
        let path = request.path;
        debug!("HttpTransport: {} {}", request.method, path);

        let http_request = self.build_request(request)?;

        let response = self.client.execute(http_request).await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("HttpTransport: {} responded {}", path, status);

        into_response(status, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(query: &'a str, credentials: &'a Credentials) -> TransportRequest<'a> {
        TransportRequest {
            method: Method::GET,
            base_url: "https://router.hereapi.com",
            path: "/v8/routes",
            query,
            credentials,
        }
    }

    #[test]
    fn test_request_url_keeps_raw_query() {
        let url = request_url(
            "https://router.hereapi.com",
            "/v8/routes",
            "routingMode=fast&origin=45,9",
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://router.hereapi.com/v8/routes?routingMode=fast&origin=45,9"
        );
    }

    #[test]
    fn test_request_url_without_query() {
        let url = request_url("https://router.hereapi.com", "/v8/routes", "").unwrap();
        assert_eq!(url.as_str(), "https://router.hereapi.com/v8/routes");
    }

    #[test]
    fn test_request_url_keeps_base_path() {
        let url = request_url("http://localhost:8080/here", "/v8/routes", "origin=45,9").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/here/v8/routes?origin=45,9");

        let url = request_url("http://localhost:8080/here/", "/v8/routes", "").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/here/v8/routes");
    }

    #[test]
    fn test_into_response_success() {
        let response = into_response(StatusCode::OK, String::from("{}")).unwrap();
        assert_eq!(
            response,
            TransportResponse {
                status: 200,
                body: String::from("{}"),
            }
        );
    }

    #[test]
    fn test_into_response_maps_errors() {
        for (status, code) in [
            (StatusCode::BAD_REQUEST, 400),
            (StatusCode::INTERNAL_SERVER_ERROR, 500),
        ] {
            match into_response(status, String::from("Route not found")) {
                Err(TransportError::Api { status, message }) => {
                    assert_eq!(status, code);
                    assert_eq!(message, "Route not found");
                }
                other => panic!("Expected an API error, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_invalid_base_url() {
        let result = request_url("not a url", "/v8/routes", "");
        assert!(matches!(result, Err(TransportError::Url(_))));
    }

    #[test]
    fn test_bearer_goes_to_authorization_header() {
        let transport = HttpTransport::default();
        let credentials = Credentials::from_bearer("token");

        let http_request = transport
            .build_request(request("routingMode=fast", &credentials))
            .unwrap();

        assert_eq!(
            http_request.headers()[reqwest::header::AUTHORIZATION],
            "Bearer token"
        );
        assert_eq!(http_request.url().query(), Some("routingMode=fast"));
    }

    #[test]
    fn test_api_key_has_no_authorization_header() {
        let transport = HttpTransport::default();
        let credentials = Credentials::from_api_key("abc123");

        let http_request = transport
            .build_request(request("apiKey=abc123", &credentials))
            .unwrap();

        assert!(
            !http_request
                .headers()
                .contains_key(reqwest::header::AUTHORIZATION)
        );
    }

    #[test]
    fn test_response_json() {
        let response = TransportResponse {
            status: 200,
            body: String::from(r#"{"routes":[]}"#),
        };
        assert_eq!(response.json().unwrap()["routes"], serde_json::json!([]));

        let response = TransportResponse {
            status: 200,
            body: String::from("not json"),
        };
        assert!(matches!(response.json(), Err(TransportError::Deserialize(_))));
    }
}
