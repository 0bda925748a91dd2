use clap::Args;
use here_routing::{
    credentials::Credentials,
    lat_long::LatLong,
    routing_v8::{RouteRequestBuilder, RoutingMode, TransportMode},
    transport::HttpTransport,
};
use tracing::info;

#[derive(Args)]
pub struct RouteArgs {
    /// Starting point as "lat,lon"
    #[arg(short, long, allow_hyphen_values = true)]
    origin: LatLong,

    /// Destination as "lat,lon"
    #[arg(short = 'D', long, allow_hyphen_values = true)]
    destination: LatLong,

    /// car, pedestrian or truck
    #[arg(short, long, default_value_t = TransportMode::Car)]
    mode: TransportMode,

    /// fast or short
    #[arg(short, long, default_value_t = RoutingMode::Fast)]
    routing: RoutingMode,

    /// Language of the instructions, e.g. "it-IT"
    #[arg(short, long)]
    lang: Option<String>,

    /// Return polyline, actions and instructions
    #[arg(short, long)]
    instructions: bool,

    /// API key, overrides HERE_ROUTING_V8
    #[arg(long, conflicts_with = "token")]
    api_key: Option<String>,

    /// Bearer token sent in the Authorization header
    #[arg(long)]
    token: Option<String>,

    /// Print the request URL instead of calling the API
    #[arg(long)]
    print_url: bool,
}

fn override_credentials(api_key: Option<String>, token: Option<String>) -> Option<Credentials> {
    match (api_key, token) {
        (Some(api_key), _) => Some(Credentials::ApiKey(api_key)),
        (None, Some(token)) => Some(Credentials::Bearer(token)),
        (None, None) => None,
    }
}

pub async fn run(args: RouteArgs) -> anyhow::Result<()> {
    let mut builder =
        RouteRequestBuilder::from_env(override_credentials(args.api_key, args.token))?;

    builder
        .set_routing_mode(args.routing)
        .set_transport_mode(args.mode)
        .origin_lat_long(args.origin)
        .destination_lat_long(args.destination);

    if let Some(lang) = args.lang {
        builder.set_language(lang);
    }
    if args.instructions {
        builder.request_turn_by_turn_instructions();
    }

    if args.print_url {
        println!("{}", builder.build_url()?);
        return Ok(());
    }

    let response = builder.send(&HttpTransport::default()).await?;
    info!("Route response: {} ({} bytes)", response.status, response.body.len());

    match response.json() {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", response.body),
    }

    Ok(())
}
