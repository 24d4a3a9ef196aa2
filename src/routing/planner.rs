//! The route planner: endpoint state, segment-unit shortest-path search,
//! and temporary splicing of partial segments for endpoints that are not
//! significant nodes.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use log::{debug, warn};

use crate::model::RoadNetwork;
use crate::routing::dijkstra::segment_shortest_path;
use crate::routing::{Route, RouteEdge, RouteLeg, lock};
use crate::{NodeId, SegmentId};

#[derive(Debug, Default, Clone, Copy)]
struct Endpoints {
    start: Option<NodeId>,
    end: Option<NodeId>,
}

/// Computes minimum-length routes between two nodes of a shared
/// [`RoadNetwork`].
///
/// All methods take `&self`; the accessors hold only a short-lived endpoint
/// or route lock and are safe to call while a computation is running. The
/// network mutex serializes computations and is the critical section for the
/// splice/search/unsplice sequence, so the network is returned to its
/// pre-call state on every exit path. Published routes are always complete:
/// a reader sees the previous route or the new one, never a partial result.
pub struct RoutePlanner {
    network: Arc<Mutex<RoadNetwork>>,
    endpoints: Mutex<Endpoints>,
    route: Mutex<Option<Route>>,
}

impl RoutePlanner {
    pub fn new(network: RoadNetwork) -> Self {
        Self::with_shared(Arc::new(Mutex::new(network)))
    }

    /// Builds a planner over an already-shared network, for callers that
    /// also hand the network to a display layer.
    pub fn with_shared(network: Arc<Mutex<RoadNetwork>>) -> Self {
        Self {
            network,
            endpoints: Mutex::new(Endpoints::default()),
            route: Mutex::new(None),
        }
    }

    /// Handle to the underlying network, e.g. for the geometric queries a
    /// selection layer needs.
    pub fn network(&self) -> Arc<Mutex<RoadNetwork>> {
        Arc::clone(&self.network)
    }

    pub fn set_start(&self, node: NodeId) {
        lock(&self.endpoints).start = Some(node);
    }

    pub fn set_end(&self, node: NodeId) {
        lock(&self.endpoints).end = Some(node);
    }

    pub fn get_start(&self) -> Option<NodeId> {
        lock(&self.endpoints).start
    }

    pub fn get_end(&self) -> Option<NodeId> {
        lock(&self.endpoints).end
    }

    /// Resets start, end, and the published route.
    pub fn clear(&self) {
        *lock(&self.endpoints) = Endpoints::default();
        *lock(&self.route) = None;
    }

    /// Snapshot of the last published route.
    pub fn route(&self) -> Option<Route> {
        lock(&self.route).clone()
    }

    /// Human-readable directions for the last published route.
    pub fn route_description(&self) -> Option<String> {
        lock(&self.route).as_ref().map(Route::description)
    }

    /// Computes the minimum-length route between the configured endpoints.
    ///
    /// `None` when either endpoint is unset or unknown, or when no path
    /// exists; both are normal outcomes, not errors. On success the route is
    /// published atomically and also returned.
    pub fn compute_route(&self) -> Option<Route> {
        let Endpoints { start, end } = *lock(&self.endpoints);
        let (Some(start), Some(end)) = (start, end) else {
            return None;
        };

        let route = {
            let mut network = lock(&self.network);
            if network.node(start).is_none() || network.node(end).is_none() {
                warn!("route endpoints {start}/{end} are not nodes of this network");
                None
            } else {
                plan(&mut network, start, end)
            }
        };

        match &route {
            Some(r) => debug!("route found: {} edges, {:.0} m", r.len(), r.total_length()),
            None => debug!("no route from node {start} to node {end}"),
        }
        *lock(&self.route) = route.clone();
        route
    }

    /// Truncates the published route through `node` and returns the
    /// shortened snapshot. Used by the navigation monitor.
    pub(crate) fn advance_past(&self, node: NodeId) -> Option<Route> {
        let mut guard = lock(&self.route);
        let route = guard.as_mut()?;
        route.advance_past(node);
        Some(route.clone())
    }
}

/// Splice, search, unsplice. The guard's `Drop` removes every temporary
/// segment, so early returns and unwinds leave the network as found.
fn plan(network: &mut RoadNetwork, start: NodeId, end: NodeId) -> Option<Route> {
    let mut spliced = SpliceGuard::new(network);
    if spliced.network().node_ref(start).out_segments().next().is_none() {
        spliced.splice_post_subsegments(start);
    }
    if spliced.network().node_ref(end).out_segments().next().is_none() {
        spliced.splice_pre_subsegments(end);
    }
    let chain = segment_shortest_path(spliced.network(), start, end)?;
    Some(build_route(spliced.network(), &chain))
}

/// Flattens a segment chain into the primitive-edge route, recording one leg
/// per segment for the description.
fn build_route(network: &RoadNetwork, chain: &[SegmentId]) -> Route {
    let mut edges = VecDeque::new();
    let mut legs = Vec::with_capacity(chain.len());
    for &seg_id in chain {
        let Some(segment) = network.segment(seg_id) else {
            continue;
        };
        legs.push(RouteLeg {
            name: segment.name.clone(),
            length: segment.length(),
        });
        for &edge_id in segment.edges() {
            let edge = network.edge_ref(edge_id);
            edges.push_back(RouteEdge {
                from: edge.from,
                to: edge.to,
                length: edge.length,
            });
        }
    }
    Route::new(edges, legs)
}

/// Scope for temporarily spliced segments.
struct SpliceGuard<'a> {
    network: &'a mut RoadNetwork,
    inserted: Vec<SegmentId>,
}

impl<'a> SpliceGuard<'a> {
    fn new(network: &'a mut RoadNetwork) -> Self {
        Self {
            network,
            inserted: Vec::new(),
        }
    }

    fn network(&self) -> &RoadNetwork {
        self.network
    }

    /// For every live segment holding `node` as an interior point, splices
    /// in the post-subsegment running from `node` to that segment's end.
    /// Makes a non-significant start node expandable by the search.
    fn splice_post_subsegments(&mut self, node: NodeId) {
        for (seg_id, position) in interior_positions(self.network, node) {
            let Some(segment) = self.network.segment(seg_id) else {
                continue;
            };
            let end = segment.end();
            let name = segment.name.clone();
            let edges = segment.edges()[position + 1..].to_vec();
            let id = self.network.add_segment(node, end, edges, name);
            self.inserted.push(id);
        }
    }

    /// Symmetric to [`splice_post_subsegments`](Self::splice_post_subsegments):
    /// pre-subsegments from each containing segment's start up to `node`,
    /// making a non-significant end node reachable.
    fn splice_pre_subsegments(&mut self, node: NodeId) {
        for (seg_id, position) in interior_positions(self.network, node) {
            let Some(segment) = self.network.segment(seg_id) else {
                continue;
            };
            let start = segment.start();
            let name = segment.name.clone();
            let edges = segment.edges()[..=position].to_vec();
            let id = self.network.add_segment(start, node, edges, name);
            self.inserted.push(id);
        }
    }
}

impl Drop for SpliceGuard<'_> {
    fn drop(&mut self) {
        for id in self.inserted.drain(..) {
            self.network.remove_segment(id);
        }
    }
}

/// `(segment, edge index)` pairs where `node` is the end of the indexed edge
/// but not the segment's own endpoint. Collected before any mutation since
/// splicing grows the live segment set.
fn interior_positions(network: &RoadNetwork, node: NodeId) -> Vec<(SegmentId, usize)> {
    let mut hits = Vec::new();
    for segment in network.segments() {
        if segment.start() == node || segment.end() == node {
            continue;
        }
        let interior = segment
            .edges()
            .iter()
            .take(segment.edges().len().saturating_sub(1))
            .position(|&e| network.edge_ref(e).to == node);
        if let Some(position) = interior {
            hits.push((segment.id(), position));
        }
    }
    hits
}
