use std::{fmt::Display, str::FromStr};

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    credentials::Credentials,
    lat_long::LatLong,
    query_string::add_query_param,
    rest_config::{
        ConfigError, ROUTING_V8_BASE_URL, ROUTING_V8_CONFIG_SLOT, RestConfig, env_lookup,
        resolve_credentials,
    },
    transport::{Transport, TransportError, TransportRequest, TransportResponse, request_url},
};

pub const ROUTING_V8_PATH: &str = "/v8/routes";

/// Optimization applied during route calculation.
#[derive(Debug, Default, Deserialize, Serialize, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RoutingMode {
    /// Minimize travel time
    #[default]
    Fast,
    /// Minimize distance, speed information is disregarded
    Short,
}

impl Display for RoutingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RoutingMode::Fast => "fast",
                RoutingMode::Short => "short",
            }
        )
    }
}

impl FromStr for RoutingMode {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "fast" => Ok(RoutingMode::Fast),
            "short" => Ok(RoutingMode::Short),
            other => Err(format!("Unknown routing mode {other}")),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Car,
    Pedestrian,
    Truck,
}

impl Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TransportMode::Car => "car",
                TransportMode::Pedestrian => "pedestrian",
                TransportMode::Truck => "truck",
            }
        )
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "car" => Ok(TransportMode::Car),
            "pedestrian" => Ok(TransportMode::Pedestrian),
            "truck" => Ok(TransportMode::Truck),
            other => Err(format!("Unknown transport mode {other}")),
        }
    }
}

/// Accumulates the parameters of a HERE Routing v8 `GET /v8/routes` call.
///
/// Every setter returns the builder so calls can be chained. Nothing is
/// validated: a request without origin or destination serializes fine and is
/// rejected by the routing service.
#[derive(Debug, Clone)]
pub struct RouteRequestBuilder {
    config: RestConfig,
    routing_mode: RoutingMode,
    transport_mode: TransportMode,
    return_fields: Vec<String>,
    language: String,
    origin: Option<LatLong>,
    destination: Option<LatLong>,
}

impl RouteRequestBuilder {
    pub fn new(config: RestConfig) -> Self {
        Self {
            config,
            routing_mode: RoutingMode::default(),
            transport_mode: TransportMode::default(),
            return_fields: Vec::new(),
            language: String::new(),
            origin: None,
            destination: None,
        }
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self::new(RestConfig::new(ROUTING_V8_BASE_URL, credentials))
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self::with_credentials(Credentials::from_api_key(api_key))
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self::with_credentials(Credentials::from_bearer(token))
    }

    pub fn with_app_id_code(app_id: impl Into<String>, app_code: impl Into<String>) -> Self {
        Self::with_credentials(Credentials::from_app_id_code(app_id, app_code))
    }

    /// Uses `override_credentials` when given, otherwise reads the
    /// `HERE_ROUTING_V8` slot from the environment.
    pub fn from_env(override_credentials: Option<Credentials>) -> Result<Self, ConfigError> {
        let credentials =
            resolve_credentials(ROUTING_V8_CONFIG_SLOT, override_credentials, env_lookup)?;
        Ok(Self::with_credentials(credentials))
    }

    pub fn set_routing_mode(&mut self, routing_mode: RoutingMode) -> &mut Self {
        self.routing_mode = routing_mode;
        self
    }

    pub fn routing_mode_fast(&mut self) -> &mut Self {
        self.set_routing_mode(RoutingMode::Fast)
    }

    pub fn routing_mode_short(&mut self) -> &mut Self {
        self.set_routing_mode(RoutingMode::Short)
    }

    pub fn set_transport_mode(&mut self, transport_mode: TransportMode) -> &mut Self {
        self.transport_mode = transport_mode;
        self
    }

    pub fn by_car(&mut self) -> &mut Self {
        self.set_transport_mode(TransportMode::Car)
    }

    pub fn by_foot(&mut self) -> &mut Self {
        self.set_transport_mode(TransportMode::Pedestrian)
    }

    pub fn by_truck(&mut self) -> &mut Self {
        self.set_transport_mode(TransportMode::Truck)
    }

    /// Adds `polyline`, `actions` and `instructions` to the returned fields.
    /// Fields are appended on every call, duplicates included.
    pub fn request_turn_by_turn_instructions(&mut self) -> &mut Self {
        self.return_fields.extend(
            ["polyline", "actions", "instructions"]
                .into_iter()
                .map(String::from),
        );
        self
    }

    pub fn set_language(&mut self, language: impl Into<String>) -> &mut Self {
        self.language = language.into();
        self
    }

    pub fn lang_ita(&mut self) -> &mut Self {
        self.set_language("it-IT")
    }

    pub fn set_origin(&mut self, latitude: f64, longitude: f64) -> &mut Self {
        self.origin_lat_long(LatLong::new(latitude, longitude))
    }

    pub fn origin_lat_long(&mut self, origin: impl Into<LatLong>) -> &mut Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn set_destination(&mut self, latitude: f64, longitude: f64) -> &mut Self {
        self.destination_lat_long(LatLong::new(latitude, longitude))
    }

    pub fn destination_lat_long(&mut self, destination: impl Into<LatLong>) -> &mut Self {
        self.destination = Some(destination.into());
        self
    }

    /// Restores every routing parameter to its default. Credentials are kept.
    pub fn reset(&mut self) -> &mut Self {
        self.routing_mode = RoutingMode::default();
        self.transport_mode = TransportMode::default();
        self.return_fields.clear();
        self.language.clear();
        self.origin = None;
        self.destination = None;
        self
    }

    pub fn routing_mode(&self) -> RoutingMode {
        self.routing_mode
    }

    pub fn transport_mode(&self) -> TransportMode {
        self.transport_mode
    }

    pub fn return_fields(&self) -> &[String] {
        &self.return_fields
    }

    pub fn language(&self) -> Option<&str> {
        if self.language.is_empty() {
            None
        } else {
            Some(&self.language)
        }
    }

    pub fn origin(&self) -> Option<LatLong> {
        self.origin
    }

    pub fn destination(&self) -> Option<LatLong> {
        self.destination
    }

    pub fn credentials(&self) -> &Credentials {
        self.config.credentials()
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    pub fn build_path(&self) -> &'static str {
        ROUTING_V8_PATH
    }

    /// Serializes the parameters in a fixed order, credentials last.
    ///
    /// Coordinates are written raw, every other value is percent-encoded.
    /// Bearer tokens are not part of the query, they go in the
    /// `Authorization` header.
    pub fn build_query_string(&self) -> String {
        let mut query = String::new();

        add_query_param(&mut query, "routingMode", &self.routing_mode.to_string(), true);
        add_query_param(
            &mut query,
            "transportMode",
            &self.transport_mode.to_string(),
            true,
        );

        if !self.return_fields.is_empty() {
            add_query_param(&mut query, "return", &self.return_fields.join(","), true);
        }

        if !self.language.is_empty() {
            add_query_param(&mut query, "lang", &self.language, true);
        }

        if let Some(origin) = &self.origin {
            add_query_param(&mut query, "origin", &origin.to_query_value(), false);
        }
        if let Some(destination) = &self.destination {
            add_query_param(
                &mut query,
                "destination",
                &destination.to_query_value(),
                false,
            );
        }

        let credentials = self.config.credentials();
        if !credentials.is_bearer() {
            if let Some(api_key) = credentials.api_key() {
                add_query_param(&mut query, "apiKey", api_key, true);
            } else if let (Some(app_id), Some(app_code)) =
                (credentials.app_id(), credentials.app_code())
            {
                add_query_param(&mut query, "app_id", app_id, true);
                add_query_param(&mut query, "app_code", app_code, true);
            }
        }

        query
    }

    /// Full request URL, credentials in the query included. This is the URL
    /// [`HttpTransport`](crate::transport::HttpTransport) calls.
    pub fn build_url(&self) -> Result<String, TransportError> {
        let url = request_url(
            self.config.base_url(),
            self.build_path(),
            &self.build_query_string(),
        )?;
        Ok(url.into())
    }

    /// Issues the request through `transport` and hands back the raw response.
    pub async fn send<T>(&self, transport: &T) -> Result<TransportResponse, TransportError>
    where
        T: Transport,
    {
        let query = self.build_query_string();

        debug!(
            "RoutingV8: {} {} to {}",
            self.routing_mode,
            self.transport_mode,
            self.build_path()
        );

        transport
            .send(TransportRequest {
                method: Method::GET,
                base_url: self.config.base_url(),
                path: self.build_path(),
                query: &query,
                credentials: self.config.credentials(),
            })
            .await
    }
}
