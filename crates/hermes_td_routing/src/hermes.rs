use std::cell::RefCell;
use std::collections::HashMap;

use jiff::Timestamp;
use rayon::prelude::*;
use thread_local::ThreadLocal;
use tracing::{debug, info, instrument};

use crate::base_graph::BaseGraph;
use crate::config::RouterConfig;
use crate::error::{ConfigurationError, RequestError, RoutingError};
use crate::geopoint::GeoPoint;
use crate::location_index::LocationIndex;
use crate::routing::astar_heuristic::{AStarHeuristic, BeelineHeuristic, ZeroHeuristic};
use crate::routing::path_details::{PathDetailKind, build_path_details, parse_path_details};
use crate::routing::routing_path_builder::RoutingPathBuilder;
use crate::routing::routing_request::{RouteResponse, RouteResult, RoutingRequest};
use crate::routing::search_options::{CancellationToken, HeuristicKind, SearchStrategy};
use crate::routing::td_bidirectional_astar::{SearchOutcome, SearchState, TdBidirectionalAStar};
use crate::snap::Snap;
use crate::stopwatch::Stopwatch;
use crate::types::NodeId;
use crate::weighting::{
    CarWeighting, Milliseconds, SpeedProfile, TimeDependentCarWeighting, Weighting,
};

pub const CAR_PROFILE: &str = "car";
pub const TIME_DEPENDENT_CAR_PROFILE: &str = "car_td";

struct Profile {
    weighting: Box<dyn Weighting>,
    heuristic: BeelineHeuristic,
}

/// Router over one immutable graph, answering queries for named profiles.
/// Queries may run concurrently; each thread reuses its own search state.
pub struct Hermes {
    graph: BaseGraph,
    index: LocationIndex,
    profiles: HashMap<String, Profile>,
    config: RouterConfig,
    search_states: ThreadLocal<RefCell<SearchState>>,
}

impl Hermes {
    pub fn new(graph: BaseGraph, config: RouterConfig) -> Result<Hermes, ConfigurationError> {
        config.validate()?;

        let stopwatch = Stopwatch::new("hermes/build_location_index");
        let index = LocationIndex::build_from_graph(&graph);
        stopwatch.report();

        Ok(Hermes {
            graph,
            index,
            profiles: HashMap::new(),
            config,
            search_states: ThreadLocal::new(),
        })
    }

    /// Router with a static `car` profile and a `car_td` profile slowed down
    /// during rush hours.
    pub fn with_default_profiles(
        graph: BaseGraph,
        config: RouterConfig,
    ) -> Result<Hermes, ConfigurationError> {
        let mut hermes = Hermes::new(graph, config)?;
        hermes.add_profile(CAR_PROFILE, CarWeighting::new())?;
        hermes.add_profile(
            TIME_DEPENDENT_CAR_PROFILE,
            TimeDependentCarWeighting::new(SpeedProfile::urban_rush_hours())?,
        )?;
        Ok(hermes)
    }

    pub fn add_profile(
        &mut self,
        name: impl Into<String>,
        weighting: impl Weighting + 'static,
    ) -> Result<(), ConfigurationError> {
        let name = name.into();

        if self.profiles.contains_key(&name) {
            return Err(ConfigurationError::DuplicateProfile(name));
        }

        weighting.validate()?;

        if self.config.search.strategy == SearchStrategy::LabelSetting && !weighting.is_fifo() {
            return Err(ConfigurationError::NonFifoWeighting);
        }

        let heuristic = BeelineHeuristic::new(&self.graph, &weighting);
        info!(
            profile = name,
            time_invariant = weighting.is_time_invariant(),
            "Registered profile"
        );
        self.profiles.insert(
            name,
            Profile {
                weighting: Box::new(weighting),
                heuristic,
            },
        );

        Ok(())
    }

    pub fn graph(&self) -> &BaseGraph {
        &self.graph
    }

    pub fn index(&self) -> &LocationIndex {
        &self.index
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn route(&self, request: &RoutingRequest) -> Result<RouteResult, RoutingError> {
        self.route_with_cancellation(request, &CancellationToken::new())
    }

    #[instrument(skip_all, fields(profile = %request.profile))]
    pub fn route_with_cancellation(
        &self,
        request: &RoutingRequest,
        cancellation: &CancellationToken,
    ) -> Result<RouteResult, RoutingError> {
        let profile = self.profile(&request.profile)?;
        let details = parse_path_details(&request.details)?;
        let departure = self.departure_ms(request.departure)?;

        let start = self.snap(profile, &request.start)?;
        let end = self.snap(profile, &request.end)?;
        debug!(
            start = start.node_id,
            start_distance = start.distance().value(),
            end = end.node_id,
            end_distance = end.distance().value(),
            "Resolved coordinates"
        );

        self.calc_route(
            profile,
            start.node_id,
            end.node_id,
            departure,
            &details,
            cancellation,
        )
    }

    /// Routes between nodes that are already resolved.
    pub fn route_nodes(
        &self,
        profile: &str,
        start: NodeId,
        end: NodeId,
        departure: Timestamp,
        details: &[String],
    ) -> Result<RouteResult, RoutingError> {
        let profile = self.profile(profile)?;
        let details = parse_path_details(details)?;
        let departure = self.departure_ms(Some(departure))?;

        self.calc_route(
            profile,
            start,
            end,
            departure,
            &details,
            &CancellationToken::new(),
        )
    }

    /// Routes every request in parallel. Results keep the order of the
    /// requests.
    pub fn route_many(
        &self,
        requests: &[RoutingRequest],
    ) -> Vec<Result<RouteResult, RoutingError>> {
        requests
            .par_iter()
            .map(|request| self.route(request))
            .collect()
    }

    fn profile(&self, name: &str) -> Result<&Profile, RequestError> {
        self.profiles
            .get(name)
            .ok_or_else(|| RequestError::UnknownProfile(name.to_string()))
    }

    fn departure_ms(&self, departure: Option<Timestamp>) -> Result<Milliseconds, RequestError> {
        let departure = departure.unwrap_or(self.config.reference_departure);

        Milliseconds::try_from(departure.as_millisecond())
            .map_err(|_| RequestError::InvalidDepartureTime(departure))
    }

    fn snap(&self, profile: &Profile, coordinates: &GeoPoint) -> Result<Snap, RequestError> {
        self.index
            .snap(
                &self.graph,
                profile.weighting.as_ref(),
                coordinates,
                self.config.max_snap_distance,
            )
            .ok_or(RequestError::UnresolvableCoordinate {
                lat: coordinates.lat(),
                lng: coordinates.lng(),
                max_snap_distance: self.config.max_snap_distance,
            })
    }

    fn calc_route(
        &self,
        profile: &Profile,
        start: NodeId,
        end: NodeId,
        departure: Milliseconds,
        details: &[PathDetailKind],
        cancellation: &CancellationToken,
    ) -> Result<RouteResult, RoutingError> {
        let cell = self.search_states.get_or(|| {
            RefCell::new(SearchState::with_capacity(self.config.search.capacity_hint))
        });
        let state = cell.take();

        let (state, result) = match self.config.search.heuristic {
            HeuristicKind::Beeline => self.search(
                profile.heuristic,
                profile.weighting.as_ref(),
                state,
                (start, end, departure),
                details,
                cancellation,
            ),
            HeuristicKind::None => self.search(
                ZeroHeuristic,
                profile.weighting.as_ref(),
                state,
                (start, end, departure),
                details,
                cancellation,
            ),
        };

        cell.replace(state);
        result
    }

    fn search<H: AStarHeuristic>(
        &self,
        heuristic: H,
        weighting: &dyn Weighting,
        state: SearchState,
        (start, end, departure): (NodeId, NodeId, Milliseconds),
        details: &[PathDetailKind],
        cancellation: &CancellationToken,
    ) -> (SearchState, Result<RouteResult, RoutingError>) {
        let mut astar = match TdBidirectionalAStar::with_state(
            &self.graph,
            weighting,
            heuristic,
            self.config.search,
            state,
        ) {
            Ok(astar) => astar,
            Err(error) => return (SearchState::default(), Err(error.into())),
        };

        let result = astar
            .calc_path(start, end, departure, cancellation)
            .and_then(|outcome| match outcome {
                SearchOutcome::NotFound => {
                    debug!(start, end, "No route found");
                    Ok(RouteResult::NotFound)
                }
                SearchOutcome::Found(meeting) => {
                    let path = RoutingPathBuilder::new(&self.graph, weighting).build(
                        start,
                        end,
                        astar.forward_labels(),
                        astar.backward_labels(),
                        &meeting,
                    )?;
                    let details = build_path_details(&path, details);

                    debug!(
                        time = path.time(),
                        distance = path.distance().value(),
                        edges = path.segments().len(),
                        "Route found"
                    );

                    Ok(RouteResult::Found(RouteResponse::new(&path, details)))
                }
            });

        (astar.into_state(), result)
    }
}
