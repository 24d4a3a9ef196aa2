//! A computed route and its human-readable description.

use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::Arc;

use itertools::Itertools;

use crate::NodeId;

/// Placeholder used in descriptions for legs on unnamed roads.
const UNNAMED_ROAD: &str = "Unnamed Road";

/// One primitive edge of a route, copied out of the network so the route
/// stays valid after temporary segments are unspliced.
#[derive(Debug, Clone)]
pub struct RouteEdge {
    pub from: NodeId,
    pub to: NodeId,
    /// Length in meters.
    pub length: f64,
}

/// One segment of the route as planned: a road name and the distance
/// traveled on it before the next significant node.
#[derive(Debug, Clone)]
pub struct RouteLeg {
    pub name: Option<Arc<str>>,
    /// Length in meters.
    pub length: f64,
}

/// An ordered, finite sequence of primitive edges from a start node to an
/// end node.
///
/// The edge list is consumed from the front as the traveler advances. The
/// leg list describes the route as planned and is kept as computed; it backs
/// [`description`](Self::description).
#[derive(Debug, Clone)]
pub struct Route {
    edges: VecDeque<RouteEdge>,
    legs: Vec<RouteLeg>,
    total_length: f64,
}

impl Route {
    pub(crate) fn new(edges: VecDeque<RouteEdge>, legs: Vec<RouteLeg>) -> Self {
        let total_length = edges.iter().map(|e| e.length).sum();
        Self {
            edges,
            legs,
            total_length,
        }
    }

    /// Remaining edges, in travel order.
    pub fn edges(&self) -> impl Iterator<Item = &RouteEdge> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Total length in meters of the route as planned.
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Final node of the route, `None` once every edge has been consumed.
    pub fn destination(&self) -> Option<NodeId> {
        self.edges.back().map(|e| e.to)
    }

    /// The per-segment legs of the route as planned.
    pub fn legs(&self) -> &[RouteLeg] {
        &self.legs
    }

    /// Discards every edge up to and including the first one ending at
    /// `node`: the traveler has passed it.
    pub(crate) fn advance_past(&mut self, node: NodeId) {
        while let Some(edge) = self.edges.pop_front() {
            if edge.to == node {
                break;
            }
        }
    }

    /// Line-per-road human-readable directions.
    ///
    /// Consecutive legs on the same road collapse into one line; the
    /// trailing run is always flushed. Pure function of the planned legs, so
    /// repeated calls yield identical output.
    pub fn description(&self) -> String {
        let mut out = String::new();
        for (name, run) in &self.legs.iter().chunk_by(|leg| leg.name.clone()) {
            let km: f64 = run.map(|leg| leg.length).sum::<f64>() / 1000.0;
            let name = name.as_deref().unwrap_or(UNNAMED_ROAD);
            let _ = writeln!(out, "Travel on {name} for {km:.2} km.");
        }
        out
    }
}
