pub mod astar_heuristic;
mod directional_search;
pub mod label;
pub mod path_details;
pub mod routing_path;
pub mod routing_path_builder;
pub mod routing_request;
pub mod search_direction;
pub mod search_options;
pub mod td_bidirectional_astar;
