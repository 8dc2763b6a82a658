use std::path::PathBuf;

use anyhow::{Context, ensure};
use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use hermes_td_routing::{
    config::RouterConfig,
    geopoint::GeoPoint,
    hermes::Hermes,
    routing::{path_details::PathDetailRun, routing_request::RoutingRequest},
};
use tracing::info;

use crate::file_utils::read_graph;

const EXPECTED_LINKS_IN_PATH: usize = 29;
const EXPECTED_DISTANCE: f64 = 2584.0;
const EXPECTED_TOTAL_TRAVEL_TIME: u64 = 291_827;

#[derive(Args)]
pub struct VerifyArgs {
    /// JSON export of the Monaco network
    #[arg(short, long, env = "HERMES_TD_REFERENCE_GRAPH")]
    graph: PathBuf,
}

/// Runs the Monaco fastest route and checks it against the reference
/// results.
pub fn run(args: VerifyArgs) -> Result<(), anyhow::Error> {
    let hermes = Hermes::with_default_profiles(read_graph(&args.graph)?, RouterConfig::default())?;
    let request = RoutingRequest::new(
        GeoPoint::new(43.730729, 7.42135),
        GeoPoint::new(43.727697, 7.419199),
    )
    .with_details(["time", "edge_id"]);

    let response = hermes
        .route(&request)?
        .found()
        .context("No route found between the reference coordinates")?;

    let time = response.details.get("time").context("Missing time detail")?;
    let edge_ids = response
        .details
        .get("edge_id")
        .context("Missing edge_id detail")?;

    print_links(time, edge_ids);

    ensure!(
        (response.distance - EXPECTED_DISTANCE).abs() <= 0.1,
        "Expected a distance of {EXPECTED_DISTANCE} m, got {}",
        response.distance
    );
    ensure!(
        response.time == EXPECTED_TOTAL_TRAVEL_TIME,
        "Expected a travel time of {EXPECTED_TOTAL_TRAVEL_TIME} ms, got {}",
        response.time
    );
    ensure!(
        time.len() == EXPECTED_LINKS_IN_PATH && edge_ids.len() == EXPECTED_LINKS_IN_PATH,
        "Expected {EXPECTED_LINKS_IN_PATH} links, got {} time and {} edge_id runs",
        time.len(),
        edge_ids.len()
    );

    for (index, (time, edge_id)) in time.iter().zip(edge_ids).enumerate() {
        ensure!(
            time.first == edge_id.first && time.last == edge_id.last,
            "Run {index} differs: time covers {}..={}, edge_id covers {}..={}",
            time.first,
            time.last,
            edge_id.first,
            edge_id.last
        );
    }

    let time_sum: u64 = time
        .iter()
        .map(|run| run.value.as_u64().unwrap_or_default() * run.edge_count() as u64)
        .sum();
    ensure!(
        time_sum == EXPECTED_TOTAL_TRAVEL_TIME,
        "Time details sum up to {time_sum} ms instead of {EXPECTED_TOTAL_TRAVEL_TIME} ms"
    );

    info!("Reference route verified");

    Ok(())
}

fn print_links(time: &[PathDetailRun], edge_ids: &[PathDetailRun]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Links", "Edge", "Time (ms)"]);

    for (time, edge_id) in time.iter().zip(edge_ids) {
        table.add_row(vec![
            format!("{}..={}", time.first, time.last),
            edge_id
                .value
                .as_u64()
                .map_or_else(String::new, |value| value.to_string()),
            time.value
                .as_u64()
                .map_or_else(String::new, |value| value.to_string()),
        ]);
    }

    println!("{table}");
}
