//! Externally-parsed map input.

use serde::{Deserialize, Serialize};

/// A geographic point of the map source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawNode {
    /// Unique id in the map source.
    pub id: i64,
    pub lon: f64,
    pub lat: f64,
}

/// A drivable way: an ordered run of node references with an optional name
/// and a directionality flag. Non-road ways are expected to be filtered out
/// by the parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawWay {
    pub id: i64,
    /// Road name, if the way is named.
    #[serde(default)]
    pub name: Option<String>,
    /// One-way roads produce primitive edges in travel direction only.
    #[serde(default)]
    pub oneway: bool,
    /// Node references, in way order.
    pub nodes: Vec<i64>,
}
