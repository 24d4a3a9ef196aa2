//! Live navigation: tracking a moving position against the computed route.
//!
//! The on-course test is deliberately cheap so it can run on every position
//! sample; the expensive Dijkstra recomputation only happens once the
//! traveler has genuinely left the planned path.

use std::sync::{Arc, Mutex};

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::NodeId;
use crate::geodesy;
use crate::model::RoadNetwork;
use crate::routing::{Route, RoutePlanner, lock};

/// Tolerances for the on-course decision. All distances in meters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Maximum triangle-inequality slack for a position to count as lying on
    /// an edge: `dist(pos, from) + dist(pos, to) - length`.
    pub course_slack: f64,
    /// Radius around an edge's end node within which the node counts as
    /// reached.
    pub arrival_radius: f64,
    /// Optional heading-based wedge test. Off by default: heading data from
    /// real receivers proved too unreliable, and the edge-proximity test
    /// tracks better on its own.
    pub heading_wedge: Option<HeadingWedge>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            course_slack: 200.0,
            arrival_radius: 25.0,
            heading_wedge: None,
        }
    }
}

/// Parameters of the heading wedge: a node is on course when it falls inside
/// the sector of `angle_deg` centered on the current heading, within
/// `edge length * reach_factor` meters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeadingWedge {
    pub angle_deg: f64,
    pub reach_factor: f64,
}

impl Default for HeadingWedge {
    fn default() -> Self {
        Self {
            angle_deg: 120.0,
            reach_factor: 1.2,
        }
    }
}

/// Tracks position samples against the planner's current route, advancing
/// the route as edges are passed and requesting a recomputation from the
/// nearest node once the traveler is off course.
pub struct NavigationMonitor {
    planner: Arc<RoutePlanner>,
    network: Arc<Mutex<RoadNetwork>>,
    config: NavigationConfig,
}

impl NavigationMonitor {
    pub fn new(planner: Arc<RoutePlanner>) -> Self {
        Self::with_config(planner, NavigationConfig::default())
    }

    pub fn with_config(planner: Arc<RoutePlanner>, config: NavigationConfig) -> Self {
        let network = planner.network();
        Self {
            planner,
            network,
            config,
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    /// Whether the position is consistent with continuing along the current
    /// route. False when no route is active.
    pub fn on_course(&self, lon: f64, lat: f64, heading_deg: f64) -> bool {
        self.planner
            .route()
            .is_some_and(|route| self.reference_node(&route, lon, lat, heading_deg).is_some())
    }

    /// Feeds one position sample.
    ///
    /// On course: discards every route edge up to and including the one the
    /// traveler has passed and returns the shortened route. Off course:
    /// re-seeds the planner's start with the nearest routable node and
    /// recomputes. `None` when no route can be produced.
    ///
    /// Argument order (latitude first) follows the position-feed convention.
    pub fn update_route(&self, lat: f64, lon: f64, heading_deg: f64) -> Option<Route> {
        let reference = self
            .planner
            .route()
            .and_then(|route| self.reference_node(&route, lon, lat, heading_deg));

        match reference {
            Some(node) => {
                trace!("on course toward node {node}");
                self.planner.advance_past(node)
            }
            None => {
                let nearest = lock(&self.network).nearest_node(lon, lat);
                let Some((start, dist)) = nearest else {
                    debug!("off course and no routable node near ({lon:.5}, {lat:.5})");
                    return None;
                };
                debug!("off course at ({lon:.5}, {lat:.5}); replanning from node {start} ({dist:.0} m away)");
                self.planner.set_start(start);
                self.planner.compute_route()
            }
        }
    }

    /// End node of the first remaining edge the position is consistent
    /// with: either the position lies on the edge (triangle-inequality
    /// slack), or it is inside the arrival circle of the edge's end node,
    /// or, when enabled, the end node falls inside the heading wedge.
    fn reference_node(
        &self,
        route: &Route,
        lon: f64,
        lat: f64,
        heading_deg: f64,
    ) -> Option<NodeId> {
        let network = lock(&self.network);
        for edge in route.edges() {
            let (Some(from), Some(to)) = (network.node(edge.from), network.node(edge.to)) else {
                continue;
            };
            let slack = geodesy::distance(lon, lat, from.lon(), from.lat())
                + geodesy::distance(lon, lat, to.lon(), to.lat())
                - edge.length;
            if slack < self.config.course_slack
                || network.in_circle(lon, lat, self.config.arrival_radius, edge.to)
            {
                return Some(edge.to);
            }
            if let Some(wedge) = self.config.heading_wedge {
                if network.in_circular_wedge(
                    lon,
                    lat,
                    wedge.angle_deg,
                    heading_deg,
                    edge.length * wedge.reach_factor,
                    edge.to,
                ) {
                    return Some(edge.to);
                }
            }
        }
        None
    }
}
