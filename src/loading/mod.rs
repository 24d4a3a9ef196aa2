//! Construction of a [`RoadNetwork`](crate::model::RoadNetwork) from
//! externally-parsed map data.
//!
//! Parsing the raw map format is a collaborator's job; this module consumes
//! already-resolved [`RawNode`] and [`RawWay`] values.

mod builder;
mod raw_types;

pub use builder::create_road_network;
pub use raw_types::{RawNode, RawWay};
