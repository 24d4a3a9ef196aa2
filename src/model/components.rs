//! Road network components - nodes, primitive edges, and segments.

use std::sync::Arc;

use geo::Point;
use hashbrown::{HashMap, HashSet};

use crate::{EdgeId, NodeId, SegmentId};

/// Road graph node.
///
/// Owns the membership sets for its directed primitive edges and segments.
/// Two nodes are the same node iff their [`NodeId`] is the same; the arena
/// never deletes nodes, so ids stay valid for the life of the network.
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Identifier of the node in the external map source.
    pub source_id: i64,
    /// Node coordinates (x = longitude, y = latitude).
    pub geometry: Point<f64>,
    pub(crate) routable: bool,
    pub(crate) out_edges: Vec<EdgeId>,
    pub(crate) in_edges: Vec<EdgeId>,
    pub(crate) out_segments: HashSet<SegmentId>,
    pub(crate) in_segments: HashSet<SegmentId>,
    /// Successor node -> outgoing edge, used when stitching segments.
    pub(crate) edge_to: HashMap<NodeId, EdgeId>,
}

impl RoadNode {
    pub(crate) fn new(source_id: i64, geometry: Point<f64>) -> Self {
        Self {
            source_id,
            geometry,
            routable: false,
            out_edges: Vec::new(),
            in_edges: Vec::new(),
            out_segments: HashSet::new(),
            in_segments: HashSet::new(),
            edge_to: HashMap::new(),
        }
    }

    pub fn lon(&self) -> f64 {
        self.geometry.x()
    }

    pub fn lat(&self) -> f64 {
        self.geometry.y()
    }

    /// Whether the node lies on at least one way.
    pub fn routable(&self) -> bool {
        self.routable
    }

    /// Out-degree: the number of outgoing primitive edges.
    pub fn degree(&self) -> usize {
        self.out_edges.len()
    }

    pub fn out_edges(&self) -> &[EdgeId] {
        &self.out_edges
    }

    pub fn in_edges(&self) -> &[EdgeId] {
        &self.in_edges
    }

    pub fn out_segments(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.out_segments.iter().copied()
    }

    pub fn in_segments(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.in_segments.iter().copied()
    }

    /// The outgoing edge leading directly to `to`, if one exists.
    pub fn edge_to(&self, to: NodeId) -> Option<EdgeId> {
        self.edge_to.get(&to).copied()
    }
}

/// Directed primitive edge between two adjacent nodes of a way.
///
/// Both directions of a two-way road are materialized as separate edges.
/// Immutable after construction.
#[derive(Debug, Clone)]
pub struct RoadEdge {
    pub from: NodeId,
    pub to: NodeId,
    /// Precomputed great-circle length in meters.
    pub length: f64,
    /// Road name inherited from the way, if the way is named.
    pub name: Option<Arc<str>>,
}

/// Directed chain of consecutive primitive edges between two significant
/// nodes (intersection, dead end, or way terminus).
///
/// Segments are the unit the shortest-path search expands: between
/// significant nodes there is only one viable successor, so relaxing
/// primitive edges one at a time would revisit every intermediate node for
/// nothing.
#[derive(Debug, Clone)]
pub struct RoadSegment {
    pub(crate) id: SegmentId,
    pub(crate) start: NodeId,
    pub(crate) end: NodeId,
    pub(crate) length: f64,
    pub(crate) edges: Vec<EdgeId>,
    pub(crate) name: Option<Arc<str>>,
}

impl RoadSegment {
    pub fn id(&self) -> SegmentId {
        self.id
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    /// Total length in meters, the sum of the constituent edge lengths.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The constituent primitive edges, in travel order.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
