//! Data model for the road network.
//!
//! Nodes and primitive edges live in append-only arenas addressed by
//! [`NodeId`](crate::NodeId) / [`EdgeId`](crate::EdgeId); segments are keyed
//! by [`SegmentId`](crate::SegmentId) because the planner inserts and removes
//! them dynamically.

pub mod components;
pub mod network;

pub use components::{RoadEdge, RoadNode, RoadSegment};
pub use network::RoadNetwork;
