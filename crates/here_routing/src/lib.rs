pub mod credentials;
pub mod lat_long;
pub mod query_string;
pub mod rest_config;
pub mod routing_v8;
pub mod transport;
