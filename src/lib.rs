//! Point-to-point route planning over a road network derived from map data,
//! plus live navigation monitoring of a moving position against a computed
//! route.
//!
//! The crate is organized in three layers:
//!
//! - [`model`] — the road network itself: nodes and primitive edges stored in
//!   arenas, directed multi-edge segments between significant nodes, and the
//!   geometric queries (nearest node, circle and circular-wedge containment)
//!   used for selection and course tracking.
//! - [`loading`] — construction of a [`model::RoadNetwork`] from
//!   externally-parsed ways and nodes.
//! - [`routing`] — the route planner (segment-unit Dijkstra with dynamic
//!   splicing of partial segments for non-intersection endpoints) and the
//!   navigation monitor that advances or recomputes a route as position
//!   samples arrive.
//!
//! Map parsing, rendering, and the position feed are external collaborators;
//! this crate exchanges plain values with them and owns no I/O.

pub mod error;
pub mod geodesy;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;

/// Stable index of a node in the network arena.
pub type NodeId = usize;
/// Stable index of a primitive edge in the network arena.
pub type EdgeId = usize;
/// Identifier of a segment. Assigned monotonically by the network and never
/// reused, so removing a temporary segment cannot alias an earlier one.
pub type SegmentId = u64;
