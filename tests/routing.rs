//! End-to-end scenarios: build a network from raw map input, plan routes,
//! and drive the navigation monitor with position samples.

use std::sync::Arc;

use viator::prelude::*;

fn raw_node(id: i64, lon: f64, lat: f64) -> RawNode {
    RawNode { id, lon, lat }
}

fn way(id: i64, name: Option<&str>, nodes: &[i64], oneway: bool) -> RawWay {
    RawWay {
        id,
        name: name.map(str::to_owned),
        oneway,
        nodes: nodes.to_vec(),
    }
}

/// T-shaped network: Main Street runs west-east through a crossing where
/// Station Road branches south. Spacing ~333 m.
fn t_network() -> RoadNetwork {
    let nodes = vec![
        raw_node(1, 0.0, 0.0),
        raw_node(2, 0.003, 0.0),
        raw_node(3, 0.006, 0.0),
        raw_node(4, 0.003, -0.003),
    ];
    let ways = vec![
        way(10, Some("Main Street"), &[1, 2, 3], false),
        way(11, Some("Station Road"), &[2, 4], false),
    ];
    create_road_network(nodes, ways, None).unwrap()
}

fn sorted_segment_ids(planner: &RoutePlanner) -> Vec<SegmentId> {
    let network = planner.network();
    let network = network.lock().unwrap();
    let mut ids: Vec<SegmentId> = network.segments().map(|s| s.id()).collect();
    ids.sort_unstable();
    ids
}

fn hops(route: &Route) -> Vec<(NodeId, NodeId)> {
    route.edges().map(|e| (e.from, e.to)).collect()
}

#[test]
fn routes_across_named_roads_with_description() {
    let net = t_network();
    let (a, b, d) = (
        net.node_by_source(1).unwrap(),
        net.node_by_source(2).unwrap(),
        net.node_by_source(4).unwrap(),
    );
    // The crossing is significant: both roads are cut there.
    assert_eq!(net.segment_count(), 6);

    let planner = RoutePlanner::new(net);
    planner.set_start(a);
    planner.set_end(d);
    let route = planner.compute_route().unwrap();

    assert_eq!(hops(&route), vec![(a, b), (b, d)]);
    assert!((route.total_length() - 667.2).abs() < 1.0);
    assert_eq!(
        planner.route_description().unwrap(),
        "Travel on Main Street for 0.33 km.\nTravel on Station Road for 0.33 km.\n"
    );
}

#[test]
fn direct_path_over_a_two_way_line() {
    let nodes = vec![
        raw_node(1, 0.0, 0.0),
        raw_node(2, 0.0, 0.001),
        raw_node(3, 0.0, 0.002),
    ];
    let net = create_road_network(nodes, vec![way(10, None, &[1, 2, 3], false)], None).unwrap();
    let (a, b, c) = (
        net.node_by_source(1).unwrap(),
        net.node_by_source(2).unwrap(),
        net.node_by_source(3).unwrap(),
    );
    let leg = viator::geodesy::distance(0.0, 0.0, 0.0, 0.001);

    let planner = RoutePlanner::new(net);
    planner.set_start(a);
    planner.set_end(c);
    let route = planner.compute_route().unwrap();
    assert_eq!(hops(&route), vec![(a, b), (b, c)]);
    assert!((route.total_length() - 2.0 * leg).abs() < 1e-6);
}

#[test]
fn unreachable_end_returns_no_route_and_leaves_graph_unchanged() {
    let nodes = vec![
        raw_node(1, 0.0, 0.0),
        raw_node(2, 0.0, 0.001),
        raw_node(3, 0.0, 0.002),
        raw_node(4, 0.05, 0.05), // isolated
    ];
    let net = create_road_network(nodes, vec![way(10, None, &[1, 2, 3], false)], None).unwrap();
    let (a, d) = (net.node_by_source(1).unwrap(), net.node_by_source(4).unwrap());

    let planner = RoutePlanner::new(net);
    let before = sorted_segment_ids(&planner);
    planner.set_start(a);
    planner.set_end(d);
    assert!(planner.compute_route().is_none());
    assert_eq!(sorted_segment_ids(&planner), before);
}

#[test]
fn midway_start_splices_temporarily() {
    let nodes = vec![
        raw_node(1, 0.0, 0.0),
        raw_node(2, 0.001, 0.0),
        raw_node(3, 0.002, 0.0),
    ];
    let net = create_road_network(nodes, vec![way(10, None, &[1, 2, 3], false)], None).unwrap();
    let (m, c) = (net.node_by_source(2).unwrap(), net.node_by_source(3).unwrap());

    let planner = RoutePlanner::new(net);
    let before = sorted_segment_ids(&planner);
    planner.set_start(m);
    planner.set_end(c);
    let route = planner.compute_route().unwrap();
    assert_eq!(hops(&route), vec![(m, c)]);
    // The spliced subsegments are gone; the original segment survives intact.
    assert_eq!(sorted_segment_ids(&planner), before);
}

#[test]
fn one_way_roads_are_never_traversed_backward() {
    let nodes = vec![raw_node(1, 0.0, 0.0), raw_node(2, 0.001, 0.0)];
    let net = create_road_network(nodes, vec![way(10, None, &[1, 2], true)], None).unwrap();
    let (a, b) = (net.node_by_source(1).unwrap(), net.node_by_source(2).unwrap());

    let planner = RoutePlanner::new(net);
    planner.set_start(b);
    planner.set_end(a);
    assert!(planner.compute_route().is_none());

    planner.set_start(a);
    planner.set_end(b);
    assert_eq!(hops(&planner.compute_route().unwrap()), vec![(a, b)]);
}

#[test]
fn journey_with_advance_and_reroute() {
    let net = t_network();
    let (a, b, c, d) = (
        net.node_by_source(1).unwrap(),
        net.node_by_source(2).unwrap(),
        net.node_by_source(3).unwrap(),
        net.node_by_source(4).unwrap(),
    );

    let planner = Arc::new(RoutePlanner::new(net));
    planner.set_start(a);
    planner.set_end(c);
    planner.compute_route().unwrap();
    let monitor = NavigationMonitor::new(Arc::clone(&planner));

    // Driving east along Main Street, midway between the start and the
    // crossing: the first edge is consumed.
    let route = monitor.update_route(0.0, 0.0015, 90.0).unwrap();
    assert_eq!(hops(&route), vec![(b, c)]);

    // The traveler turns south onto Station Road instead. Near node 4 the
    // route no longer matches: replan from the nearest node.
    let route = monitor.update_route(-0.0028, 0.003, 180.0).unwrap();
    assert_eq!(planner.get_start(), Some(d));
    assert_eq!(route.edges().next().map(|e| e.from), Some(d));
    assert_eq!(route.destination(), Some(c));
}

#[test]
fn wedge_containment_matches_bearing_convention() {
    // Node ~10 m due east of the origin.
    let nodes = vec![raw_node(1, 0.0, 0.0), raw_node(2, 0.00009, 0.0)];
    let net = create_road_network(nodes, vec![way(10, None, &[1, 2], false)], None).unwrap();
    let n = net.node_by_source(2).unwrap();

    assert!(net.in_circular_wedge(0.0, 0.0, 60.0, 90.0, 20.0, n));
    assert!(!net.in_circular_wedge(0.0, 0.0, 60.0, 270.0, 20.0, n));
}

#[test]
fn nearest_node_queries_on_the_public_surface() {
    let net = t_network();
    let d = net.node_by_source(4).unwrap();
    assert_eq!(net.nearest_node(0.0031, -0.0028).unwrap().0, d);
    assert_eq!(net.nearest_node_within(0.0031, -0.0028, 100.0).unwrap().0, d);
    assert!(net.nearest_node_within(0.05, 0.05, 100.0).is_none());
}
