//! The road network: node and edge arenas, the live segment set, and the
//! geometric queries used for selection and course tracking.

use std::sync::Arc;

use geo::{Point, Rect};
use hashbrown::HashMap;
use rayon::prelude::*;

use crate::geodesy;
use crate::model::{RoadEdge, RoadNode, RoadSegment};
use crate::{EdgeId, NodeId, SegmentId};

/// A road network built once per loaded map.
///
/// Nodes and primitive edges are append-only; the segment set additionally
/// admits temporary insertion and removal, which the route planner uses to
/// splice partial segments in while handling non-intersection endpoints.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    nodes: Vec<RoadNode>,
    edges: Vec<RoadEdge>,
    segments: HashMap<SegmentId, RoadSegment>,
    next_segment: SegmentId,
    /// External source id -> arena id.
    node_index: HashMap<i64, NodeId>,
    bounds: Rect<f64>,
}

impl RoadNetwork {
    pub(crate) fn new(bounds: Rect<f64>) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            segments: HashMap::new(),
            next_segment: 0,
            node_index: HashMap::new(),
            bounds,
        }
    }

    /// Bounding coordinates of the loaded map.
    pub fn bounds(&self) -> Rect<f64> {
        self.bounds
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&RoadNode> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&RoadEdge> {
        self.edges.get(id)
    }

    pub fn segment(&self, id: SegmentId) -> Option<&RoadSegment> {
        self.segments.get(&id)
    }

    /// Arena id of the node carrying the given external source id.
    pub fn node_by_source(&self, source_id: i64) -> Option<NodeId> {
        self.node_index.get(&source_id).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &RoadNode)> {
        self.nodes.iter().enumerate()
    }

    pub fn segments(&self) -> impl Iterator<Item = &RoadSegment> {
        self.segments.values()
    }

    // Construction primitives, used by the loading module.

    pub(crate) fn insert_node(&mut self, source_id: i64, geometry: Point<f64>) -> Option<NodeId> {
        if self.node_index.contains_key(&source_id) {
            return None;
        }
        let id = self.nodes.len();
        self.nodes.push(RoadNode::new(source_id, geometry));
        self.node_index.insert(source_id, id);
        Some(id)
    }

    pub(crate) fn insert_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        name: Option<Arc<str>>,
    ) -> EdgeId {
        let length = {
            let (a, b) = (&self.nodes[from], &self.nodes[to]);
            geodesy::distance(a.lon(), a.lat(), b.lon(), b.lat())
        };
        let id = self.edges.len();
        self.edges.push(RoadEdge {
            from,
            to,
            length,
            name,
        });
        self.nodes[from].out_edges.push(id);
        self.nodes[from].edge_to.insert(to, id);
        self.nodes[to].in_edges.push(id);
        id
    }

    pub(crate) fn mark_routable(&mut self, node: NodeId) {
        self.nodes[node].routable = true;
    }

    pub(crate) fn node_ref(&self, id: NodeId) -> &RoadNode {
        &self.nodes[id]
    }

    pub(crate) fn edge_ref(&self, id: EdgeId) -> &RoadEdge {
        &self.edges[id]
    }

    /// Adds a segment over an existing chain of primitive edges and registers
    /// it with the outgoing set of `start` and the incoming set of `end`.
    /// The segment length is the sum of the chain's edge lengths.
    pub fn add_segment(
        &mut self,
        start: NodeId,
        end: NodeId,
        edges: Vec<EdgeId>,
        name: Option<Arc<str>>,
    ) -> SegmentId {
        let length = edges.iter().map(|&e| self.edges[e].length).sum();
        let id = self.next_segment;
        self.next_segment += 1;
        self.segments.insert(
            id,
            RoadSegment {
                id,
                start,
                end,
                length,
                edges,
                name,
            },
        );
        self.nodes[start].out_segments.insert(id);
        self.nodes[end].in_segments.insert(id);
        id
    }

    /// Removes a segment and its node-set registrations. Removing a segment
    /// that is not present is a no-op.
    pub fn remove_segment(&mut self, id: SegmentId) {
        if let Some(seg) = self.segments.remove(&id) {
            self.nodes[seg.start].out_segments.remove(&id);
            self.nodes[seg.end].in_segments.remove(&id);
        }
    }

    /// Nearest routable node to a point, with its distance in meters.
    /// `None` when the network has no routable nodes.
    pub fn nearest_node(&self, lon: f64, lat: f64) -> Option<(NodeId, f64)> {
        self.nodes
            .par_iter()
            .enumerate()
            .filter(|(_, n)| n.routable)
            .map(|(id, n)| (id, geodesy::distance(lon, lat, n.lon(), n.lat())))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// As [`nearest_node`](Self::nearest_node), but `None` when even the
    /// closest node lies beyond `radius` meters. Intended for interactive
    /// point selection rather than routing.
    pub fn nearest_node_within(&self, lon: f64, lat: f64, radius: f64) -> Option<(NodeId, f64)> {
        self.nearest_node(lon, lat)
            .filter(|&(_, dist)| dist <= radius)
    }

    /// Whether the node lies within `radius` meters of the given point.
    /// An unknown node is simply not contained.
    pub fn in_circle(&self, lon: f64, lat: f64, radius: f64, node: NodeId) -> bool {
        self.node(node)
            .is_some_and(|n| geodesy::distance(lon, lat, n.lon(), n.lat()) <= radius)
    }

    /// Whether the node lies within `radius` meters of the given point and
    /// inside the angular sector of half-width `theta/2` centered on bearing
    /// `phi` (degrees, see [`geodesy::planar_bearing`] for the convention).
    ///
    /// The wedge bounds are reduced into [-180, 180]; when the wedge
    /// straddles the wraparound the containment test inverts. A point
    /// coincident with the node has no defined bearing and counts as
    /// contained.
    pub fn in_circular_wedge(
        &self,
        lon: f64,
        lat: f64,
        theta_deg: f64,
        phi_deg: f64,
        radius: f64,
        node: NodeId,
    ) -> bool {
        let Some(n) = self.node(node) else {
            return false;
        };
        let dist = geodesy::distance(lon, lat, n.lon(), n.lat());
        if dist > radius {
            return false;
        }
        if dist == 0.0 {
            return true;
        }
        let angle_min = normalize_deg(phi_deg - theta_deg / 2.0);
        let angle_max = normalize_deg(phi_deg + theta_deg / 2.0);
        let angle_node = geodesy::planar_bearing(lon, lat, n.lon(), n.lat());
        if angle_min > angle_max {
            // Wedge straddles the +-180 wraparound.
            !(angle_node > angle_max && angle_node < angle_min)
        } else {
            angle_node > angle_min && angle_node < angle_max
        }
    }
}

/// Reduces an angle in degrees into [-180, 180].
fn normalize_deg(angle: f64) -> f64 {
    let mut a = (angle + 180.0) % 360.0;
    if a < 0.0 {
        a += 360.0;
    }
    a - 180.0
}
