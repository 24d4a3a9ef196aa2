// Re-export key components
pub use crate::loading::{RawNode, RawWay, create_road_network};
pub use crate::model::{RoadEdge, RoadNetwork, RoadNode, RoadSegment};
pub use crate::routing::{
    NavigationConfig, NavigationMonitor, Route, RouteEdge, RouteLeg, RoutePlanner,
};

// Core identifier types
pub use crate::Error;
pub use crate::{EdgeId, NodeId, SegmentId};
