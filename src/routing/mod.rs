//! Route planning and live navigation.
//!
//! The planner runs Dijkstra over segments rather than primitive edges, and
//! temporarily splices partial segments into the network when an endpoint is
//! not a significant node. The monitor checks incoming position samples
//! against the current route and triggers a full recomputation only when the
//! traveler has genuinely left the planned path.

pub(crate) mod dijkstra;
mod monitor;
mod planner;
mod route;

pub use monitor::{HeadingWedge, NavigationConfig, NavigationMonitor};
pub use planner::RoutePlanner;
pub use route::{Route, RouteEdge, RouteLeg};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks a mutex, recovering the data from a poisoned lock. All guarded
/// state here stays consistent across unwinds (worst case: a stale route).
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
