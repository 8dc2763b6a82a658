use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use hermes_td_routing::{base_graph::BaseGraph, config::RouterConfig, json::JsonGraph};
use tracing::info;

pub fn read_graph(path: &Path) -> Result<BaseGraph, anyhow::Error> {
    info!("Reading graph {:?}", path);
    let file = File::open(path).with_context(|| format!("Cannot open graph {path:?}"))?;
    let json: JsonGraph = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid graph export {path:?}"))?;

    Ok(json.build_graph()?)
}

pub fn read_config(path: Option<&Path>) -> Result<RouterConfig, anyhow::Error> {
    let Some(path) = path else {
        return Ok(RouterConfig::default());
    };

    let file = File::open(path).with_context(|| format!("Cannot open config {path:?}"))?;
    let config: RouterConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid router config {path:?}"))?;

    Ok(config)
}
