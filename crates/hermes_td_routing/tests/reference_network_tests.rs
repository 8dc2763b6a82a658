use std::{env, fs::File, io::BufReader};

use hermes_td_routing::{
    config::RouterConfig,
    geopoint::GeoPoint,
    hermes::Hermes,
    json::JsonGraph,
    routing::routing_request::RoutingRequest,
};

const REFERENCE_GRAPH_ENV: &str = "HERMES_TD_REFERENCE_GRAPH";

fn load_reference_router() -> Hermes {
    let path = env::var(REFERENCE_GRAPH_ENV)
        .unwrap_or_else(|_| panic!("{REFERENCE_GRAPH_ENV} must point to the Monaco export"));
    let file = File::open(path).unwrap();
    let graph: JsonGraph = serde_json::from_reader(BufReader::new(file)).unwrap();

    Hermes::with_default_profiles(graph.build_graph().unwrap(), RouterConfig::default()).unwrap()
}

#[test]
#[ignore = "requires the Monaco network export"]
fn monaco_fastest() {
    const EXPECTED_LINKS_IN_PATH: usize = 29;
    const EXPECTED_TOTAL_TRAVEL_TIME: u64 = 291_827;

    let hermes = load_reference_router();
    let request = RoutingRequest::new(
        GeoPoint::new(43.730729, 7.42135),
        GeoPoint::new(43.727697, 7.419199),
    )
    .with_details(["time", "edge_id"]);

    let response = hermes.route(&request).unwrap().found().unwrap();

    assert!((response.distance - 2584.0).abs() <= 0.1);
    assert_eq!(response.time, EXPECTED_TOTAL_TRAVEL_TIME);

    let time = &response.details["time"];
    let edge_ids = &response.details["edge_id"];
    assert_eq!(time.len(), EXPECTED_LINKS_IN_PATH);
    assert_eq!(edge_ids.len(), EXPECTED_LINKS_IN_PATH);

    for (time, edge_id) in time.iter().zip(edge_ids) {
        assert_eq!(time.first, edge_id.first);
        assert_eq!(time.last, edge_id.last);
    }

    let time_sum: u64 = time
        .iter()
        .map(|run| run.value.as_u64().unwrap() * run.edge_count() as u64)
        .sum();
    assert_eq!(time_sum, EXPECTED_TOTAL_TRAVEL_TIME);
}
