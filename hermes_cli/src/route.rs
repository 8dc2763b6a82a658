use std::path::PathBuf;

use clap::Args;
use hermes_td_routing::{
    geopoint::GeoPoint, hermes::Hermes, routing::routing_request::RoutingRequest,
};
use jiff::Timestamp;
use tracing::info;

use crate::{
    file_utils::{read_config, read_graph},
    parsers,
};

#[derive(Args)]
pub struct RouteArgs {
    /// JSON graph export
    #[arg(short, long, env = "HERMES_TD_GRAPH")]
    graph: PathBuf,

    /// JSON router config, defaults are used when missing
    #[arg(short, long, env = "HERMES_TD_CONFIG")]
    config: Option<PathBuf>,

    /// Origin as lat,lng
    #[arg(long, value_parser = parsers::parse_coordinates)]
    from: GeoPoint,

    /// Destination as lat,lng
    #[arg(long, value_parser = parsers::parse_coordinates)]
    to: GeoPoint,

    #[arg(short, long, default_value = "car")]
    profile: String,

    /// Departure time (e.g., "2024-03-04T07:30:00Z", "2024-03-04T07:30")
    #[arg(short, long, value_parser = parsers::parse_timestamp)]
    departure: Option<Timestamp>,

    /// Path details to report (e.g., "time,edge_id")
    #[arg(long, value_delimiter = ',')]
    details: Vec<String>,

    /// Overrides the maximum snap distance of the config, in metres
    #[arg(long)]
    max_snap_distance: Option<f64>,
}

pub fn run(args: RouteArgs) -> Result<(), anyhow::Error> {
    let mut config = read_config(args.config.as_deref())?;
    if let Some(max_snap_distance) = args.max_snap_distance {
        config.max_snap_distance = max_snap_distance;
    }

    let hermes = Hermes::with_default_profiles(read_graph(&args.graph)?, config)?;

    let mut request = RoutingRequest::new(args.from, args.to)
        .with_profile(args.profile)
        .with_details(args.details);
    if let Some(departure) = args.departure {
        request = request.with_departure(departure);
    }

    let result = hermes.route(&request)?;
    match result.clone().found() {
        Some(response) => info!(
            time = response.time,
            distance = response.distance,
            edges = response.edges.len(),
            "Route found"
        ),
        None => info!("No route found"),
    }

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
