//! Two-pass road network construction.
//!
//! The first pass materializes directed primitive edges for every consecutive
//! node pair of every way (both directions unless the way is one-way). The
//! second pass walks each way again and cuts it into segments at significant
//! nodes; it has to run after the first pass completes because significance
//! depends on the final out-degrees.

use std::sync::Arc;

use geo::{Point, Rect, coord};
use log::{info, warn};

use crate::loading::{RawNode, RawWay};
use crate::model::RoadNetwork;
use crate::{EdgeId, Error, NodeId};

/// Edges prepared for one way: resolved node ids and, per adjacency, the
/// forward edge plus the reverse edge for two-way roads.
struct PreparedWay {
    nodes: Vec<NodeId>,
    edges: Vec<(EdgeId, Option<EdgeId>)>,
    name: Option<Arc<str>>,
}

/// Builds a road network from externally-parsed nodes and ways.
///
/// `bounds` normally comes from the map source header; when absent it is
/// computed from the node coordinates.
///
/// # Errors
///
/// Returns an error when the node set is empty, contains a duplicate id, or
/// a way references a node that was never provided.
pub fn create_road_network(
    nodes: Vec<RawNode>,
    ways: Vec<RawWay>,
    bounds: Option<Rect<f64>>,
) -> Result<RoadNetwork, Error> {
    if nodes.is_empty() {
        return Err(Error::EmptyNetwork);
    }
    let bounds = bounds.unwrap_or_else(|| bounds_of(&nodes));
    let mut network = RoadNetwork::new(bounds);

    for node in &nodes {
        if network
            .insert_node(node.id, Point::new(node.lon, node.lat))
            .is_none()
        {
            return Err(Error::InvalidData(format!("duplicate node id {}", node.id)));
        }
    }

    let prepared = build_edges(&mut network, &ways)?;
    build_segments(&mut network, &ways, &prepared);

    info!(
        "Built road network: {} nodes, {} edges, {} segments",
        network.node_count(),
        network.edge_count(),
        network.segment_count()
    );
    Ok(network)
}

fn build_edges(
    network: &mut RoadNetwork,
    ways: &[RawWay],
) -> Result<Vec<Option<PreparedWay>>, Error> {
    let mut prepared = Vec::with_capacity(ways.len());
    for way in ways {
        if way.nodes.len() < 2 {
            warn!("way {} has fewer than two nodes, skipping", way.id);
            prepared.push(None);
            continue;
        }
        let node_ids = way
            .nodes
            .iter()
            .map(|&source| {
                network.node_by_source(source).ok_or(Error::UnknownNode {
                    way: way.id,
                    node: source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let name: Option<Arc<str>> = way
            .name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(Arc::from);

        let mut edges = Vec::with_capacity(node_ids.len() - 1);
        for pair in node_ids.windows(2) {
            let forward = network.insert_edge(pair[0], pair[1], name.clone());
            let reverse = (!way.oneway).then(|| network.insert_edge(pair[1], pair[0], name.clone()));
            edges.push((forward, reverse));
        }
        for &id in &node_ids {
            network.mark_routable(id);
        }
        prepared.push(Some(PreparedWay {
            nodes: node_ids,
            edges,
            name,
        }));
    }
    Ok(prepared)
}

fn build_segments(network: &mut RoadNetwork, ways: &[RawWay], prepared: &[Option<PreparedWay>]) {
    for (way, p) in ways.iter().zip(prepared) {
        let Some(p) = p else { continue };
        let mut chain: Vec<(EdgeId, Option<EdgeId>)> = Vec::new();
        let mut seg_start = p.nodes[0];
        for i in 1..p.nodes.len() {
            let curr = p.nodes[i];
            chain.push(p.edges[i - 1]);
            if is_significant(network, curr, way.oneway) || i == p.nodes.len() - 1 {
                let forward = chain.iter().map(|&(f, _)| f).collect();
                network.add_segment(seg_start, curr, forward, p.name.clone());
                if !way.oneway {
                    let reverse = chain.iter().rev().filter_map(|&(_, r)| r).collect();
                    network.add_segment(curr, seg_start, reverse, p.name.clone());
                }
                seg_start = curr;
                chain.clear();
            }
        }
    }
}

/// A node is significant (a segment boundary) when its out-degree differs
/// from what a pass-through point of this way would have: 1 for one-way
/// roads, 2 for two-way roads. Dead ends and intersections both qualify.
fn is_significant(network: &RoadNetwork, node: NodeId, oneway: bool) -> bool {
    let degree = network.node_ref(node).degree();
    if oneway { degree != 1 } else { degree != 2 }
}

fn bounds_of(nodes: &[RawNode]) -> Rect<f64> {
    let mut lon = (f64::INFINITY, f64::NEG_INFINITY);
    let mut lat = (f64::INFINITY, f64::NEG_INFINITY);
    for n in nodes {
        lon = (lon.0.min(n.lon), lon.1.max(n.lon));
        lat = (lat.0.min(n.lat), lat.1.max(n.lat));
    }
    Rect::new(
        coord! { x: lon.0, y: lat.0 },
        coord! { x: lon.1, y: lat.1 },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_node(id: i64, lon: f64, lat: f64) -> RawNode {
        RawNode { id, lon, lat }
    }

    fn way(id: i64, nodes: &[i64], oneway: bool) -> RawWay {
        RawWay {
            id,
            name: None,
            oneway,
            nodes: nodes.to_vec(),
        }
    }

    fn line_nodes() -> Vec<RawNode> {
        vec![
            raw_node(1, 0.0, 0.0),
            raw_node(2, 0.001, 0.0),
            raw_node(3, 0.002, 0.0),
        ]
    }

    #[test]
    fn two_way_road_materializes_both_directions() {
        let net = create_road_network(line_nodes(), vec![way(10, &[1, 2, 3], false)], None).unwrap();
        let a = net.node_by_source(1).unwrap();
        let b = net.node_by_source(2).unwrap();
        let c = net.node_by_source(3).unwrap();
        // Interior node has an edge back and an edge forward.
        assert_eq!(net.node_ref(a).degree(), 1);
        assert_eq!(net.node_ref(b).degree(), 2);
        assert_eq!(net.node_ref(c).degree(), 1);
        assert!(net.node_ref(b).edge_to(a).is_some());
        assert!(net.node_ref(b).edge_to(c).is_some());
        // One segment per direction, spanning the whole way.
        assert_eq!(net.segment_count(), 2);
        let forward = net.segments().find(|s| s.start() == a).unwrap();
        assert_eq!(forward.end(), c);
        assert_eq!(forward.edges().len(), 2);
    }

    #[test]
    fn one_way_road_has_single_direction() {
        let net = create_road_network(line_nodes(), vec![way(10, &[1, 2, 3], true)], None).unwrap();
        let a = net.node_by_source(1).unwrap();
        let b = net.node_by_source(2).unwrap();
        let c = net.node_by_source(3).unwrap();
        assert_eq!(net.node_ref(b).degree(), 1);
        assert_eq!(net.node_ref(c).degree(), 0);
        assert!(net.node_ref(b).edge_to(a).is_none());
        assert_eq!(net.segment_count(), 1);
        let seg = net.segments().next().unwrap();
        assert_eq!((seg.start(), seg.end()), (a, c));
    }

    #[test]
    fn intersection_cuts_ways_into_segments() {
        let nodes = vec![
            raw_node(1, -0.001, 0.0),
            raw_node(2, 0.0, 0.0),
            raw_node(3, 0.001, 0.0),
            raw_node(4, 0.0, -0.001),
            raw_node(5, 0.0, 0.001),
        ];
        let ways = vec![way(10, &[1, 2, 3], false), way(11, &[4, 2, 5], false)];
        let net = create_road_network(nodes, ways, None).unwrap();
        let crossing = net.node_by_source(2).unwrap();
        assert_eq!(net.node_ref(crossing).degree(), 4);
        // Each way splits in two at the crossing, each half in both directions.
        assert_eq!(net.segment_count(), 8);
        assert_eq!(net.node_ref(crossing).out_segments().count(), 4);
        assert_eq!(net.node_ref(crossing).in_segments().count(), 4);
    }

    #[test]
    fn interior_nodes_have_no_segments() {
        let net = create_road_network(line_nodes(), vec![way(10, &[1, 2, 3], false)], None).unwrap();
        let b = net.node_by_source(2).unwrap();
        assert_eq!(net.node_ref(b).out_segments().count(), 0);
        assert_eq!(net.node_ref(b).in_segments().count(), 0);
    }

    #[test]
    fn segment_name_inherited_from_way() {
        let mut named = way(10, &[1, 2, 3], false);
        named.name = Some("High Street".to_owned());
        let net = create_road_network(line_nodes(), vec![named], None).unwrap();
        assert!(net.segments().all(|s| s.name() == Some("High Street")));
    }

    #[test]
    fn empty_node_set_is_rejected() {
        assert!(matches!(
            create_road_network(Vec::new(), Vec::new(), None),
            Err(Error::EmptyNetwork)
        ));
    }

    #[test]
    fn unknown_node_reference_is_rejected() {
        let err = create_road_network(line_nodes(), vec![way(10, &[1, 99], false)], None);
        assert!(matches!(
            err,
            Err(Error::UnknownNode { way: 10, node: 99 })
        ));
    }

    #[test]
    fn duplicate_node_id_is_rejected() {
        let mut nodes = line_nodes();
        nodes.push(raw_node(1, 0.5, 0.5));
        assert!(matches!(
            create_road_network(nodes, Vec::new(), None),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn degenerate_way_is_skipped() {
        let net = create_road_network(line_nodes(), vec![way(10, &[1], false)], None).unwrap();
        assert_eq!(net.edge_count(), 0);
        assert_eq!(net.segment_count(), 0);
    }

    #[test]
    fn bounds_computed_from_nodes_when_absent() {
        let net = create_road_network(line_nodes(), Vec::new(), None).unwrap();
        let b = net.bounds();
        assert_eq!(b.min().x, 0.0);
        assert_eq!(b.max().x, 0.002);
        assert_eq!(b.min().y, 0.0);
        assert_eq!(b.max().y, 0.0);
    }
}
