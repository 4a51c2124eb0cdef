//! Unit tests for bm-spatial.
//!
//! All tests use hand-crafted networks so they run without any OSM file.

#[cfg(test)]
mod helpers {
    use bm_core::{GeoPoint, NodeId};
    use crate::{StreetNetwork, StreetNetworkBuilder};

    /// Small street network for testing.
    ///
    /// Nodes (lon, lat):
    ///   0:(0,0) "Oak St"   1:(1,0)   2:(2,0) "Elm St"
    ///   3:(0,1)            4:(2,1)   5:(5,5) "Lone Pine" (isolated)
    ///
    /// Undirected ways: 0-1, 1-2, 0-3, 2-4, 3-4
    pub fn grid_network() -> (StreetNetwork, [NodeId; 6]) {
        let mut b = StreetNetworkBuilder::new();

        let n0 = b.add_named_node(GeoPoint::new(0.0, 0.0), "Oak St");
        let n1 = b.add_node(GeoPoint::new(1.0, 0.0));
        let n2 = b.add_named_node(GeoPoint::new(2.0, 0.0), "Elm St");
        let n3 = b.add_node(GeoPoint::new(0.0, 1.0));
        let n4 = b.add_node(GeoPoint::new(2.0, 1.0));
        let n5 = b.add_named_node(GeoPoint::new(5.0, 5.0), "Lone Pine");

        b.add_way(n0, n1);
        b.add_way(n1, n2);
        b.add_way(n0, n3);
        b.add_way(n2, n4);
        b.add_way(n3, n4);

        (b.build(), [n0, n1, n2, n3, n4, n5])
    }
}

// ── Builder & network structure ────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use bm_core::{GeoPoint, NodeId};
    use crate::{StreetGraph, StreetNetworkBuilder};

    #[test]
    fn empty_build() {
        let net = StreetNetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.segment_count(), 0);
        assert!(net.is_empty());
        assert_eq!(net.nodes().count(), 0);
    }

    #[test]
    fn debug_output_shows_csr_layout() {
        let (net, _) = super::helpers::grid_network();
        let dump = format!("{net:?}");
        assert!(dump.starts_with("StreetNetwork"));
        assert!(dump.contains("adj_start: [0, 2, 4, 6, 8, 10, 10]"));
    }

    #[test]
    fn csr_neighbors() {
        let (net, [n0, n1, n2, n3, n4, n5]) = super::helpers::grid_network();

        assert_eq!(net.neighbors(n0), &[n1, n3]);
        assert_eq!(net.neighbors(n1), &[n0, n2]);
        assert_eq!(net.degree(n2), 2);
        assert_eq!(net.degree(n3), 2);
        assert_eq!(net.degree(n4), 2);
        assert_eq!(net.degree(n5), 0);
        assert_eq!(net.segment_count(), 5);
    }

    #[test]
    fn repeated_segments_and_self_loops_collapse() {
        let mut b = StreetNetworkBuilder::new();
        let a = b.add_node(GeoPoint::new(0.0, 0.0));
        let c = b.add_node(GeoPoint::new(0.0, 1.0));
        b.add_way(a, c);
        b.add_way(c, a);
        b.add_way(a, a);
        let net = b.build();
        assert_eq!(net.degree(a), 1);
        assert_eq!(net.degree(c), 1);
        assert_eq!(net.segment_count(), 1);
    }

    #[test]
    fn unknown_node_has_no_neighbors() {
        let (net, _) = super::helpers::grid_network();
        assert!(net.neighbors(NodeId(99)).is_empty());
        assert!(net.position(NodeId(99)).is_none());
        assert!(net.name(NodeId(99)).is_none());
    }

    #[test]
    fn graph_view_exposes_names_and_positions() {
        let (net, [n0, n1, .., n5]) = super::helpers::grid_network();
        let nodes: Vec<_> = net.nodes().collect();
        assert_eq!(nodes.len(), 6);
        assert_eq!(nodes[n0.index()].name, Some("Oak St"));
        assert_eq!(nodes[n1.index()].name, None);
        assert_eq!(nodes[n5.index()].pos, GeoPoint::new(5.0, 5.0));
        assert!(nodes.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn set_name_overrides() {
        let mut b = StreetNetworkBuilder::new();
        let a = b.add_named_node(GeoPoint::new(0.0, 0.0), "Old");
        b.set_name(a, "New");
        assert_eq!(b.build().name(a), Some("New"));
    }
}

// ── Point indexes ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod index {
    use bm_core::GeoPoint;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::{LinearScanIndex, PointIndex, RTreeIndex};

    fn square() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
        ]
    }

    #[test]
    fn exact_hit() {
        let idx = RTreeIndex::build(square());
        assert_eq!(idx.nearest(GeoPoint::new(1.0, 1.0)), Some(GeoPoint::new(1.0, 1.0)));
        assert_eq!(idx.len(), 4);
    }

    #[test]
    fn nearest_by_planar_distance() {
        let idx = RTreeIndex::build(square());
        assert_eq!(idx.nearest(GeoPoint::new(0.4, 0.1)), Some(GeoPoint::new(0.0, 0.0)));
        assert_eq!(idx.nearest(GeoPoint::new(0.6, 0.1)), Some(GeoPoint::new(1.0, 0.0)));
    }

    #[test]
    fn ties_go_to_first_inserted() {
        // Centre of the square is equidistant from all four corners.
        let centre = GeoPoint::new(0.5, 0.5);
        let rtree = RTreeIndex::build(square());
        let linear = LinearScanIndex::build(square());
        assert_eq!(rtree.nearest(centre), Some(GeoPoint::new(0.0, 0.0)));
        assert_eq!(linear.nearest(centre), Some(GeoPoint::new(0.0, 0.0)));

        let mut reversed = square();
        reversed.reverse();
        assert_eq!(RTreeIndex::build(reversed).nearest(centre), Some(GeoPoint::new(1.0, 1.0)));
    }

    #[test]
    fn empty_index_returns_none() {
        let idx = RTreeIndex::build(Vec::new());
        assert!(idx.is_empty());
        assert!(idx.nearest(GeoPoint::new(0.0, 0.0)).is_none());
        assert!(LinearScanIndex::build(Vec::new()).nearest(GeoPoint::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn rtree_matches_linear_scan_on_random_cloud() {
        let mut rng = SmallRng::seed_from_u64(7);
        let points: Vec<GeoPoint> = (0..2_000)
            .map(|_| GeoPoint::new(rng.gen_range(-122.30..-122.20), rng.gen_range(37.82..37.89)))
            .collect();
        let rtree = RTreeIndex::build(points.clone());
        let linear = LinearScanIndex::build(points);

        for _ in 0..500 {
            let q = GeoPoint::new(rng.gen_range(-122.35..-122.15), rng.gen_range(37.80..37.91));
            assert_eq!(rtree.nearest(q), linear.nearest(q), "query {q}");
        }
    }

    proptest! {
        #[test]
        fn nearest_is_never_beaten(
            pts in prop::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 1..64),
            qx in -12.0f64..12.0,
            qy in -12.0f64..12.0,
        ) {
            let points: Vec<GeoPoint> = pts.iter().map(|&(x, y)| GeoPoint::new(x, y)).collect();
            let q = GeoPoint::new(qx, qy);
            let found = RTreeIndex::build(points.clone()).nearest(q).unwrap();
            let d = found.planar_distance_2(q);
            prop_assert!(points.iter().all(|p| p.planar_distance_2(q) >= d));
        }
    }
}

// ── CSV loading ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use bm_core::{GeoPoint, NodeId};
    use crate::{SpatialError, StreetGraph, load_network_reader};

    const NODES: &str = "\
id,lon,lat,name
100,-122.2594,37.8691,Telegraph Avenue
200,-122.2590,37.8688,
300,-122.2580,37.8680,\"Pappy's, Grill\"
";

    const EDGES: &str = "\
from,to
100,200
200,300
";

    #[test]
    fn loads_nodes_names_and_ways() {
        let net = load_network_reader(Cursor::new(NODES), Cursor::new(EDGES)).unwrap();
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.segment_count(), 2);
        assert_eq!(net.name(NodeId(0)), Some("Telegraph Avenue"));
        assert_eq!(net.name(NodeId(1)), None);
        assert_eq!(net.name(NodeId(2)), Some("Pappy's, Grill"));
        assert_eq!(net.position(NodeId(0)), Some(GeoPoint::new(-122.2594, 37.8691)));
        assert_eq!(net.degree(NodeId(1)), 2);
    }

    #[test]
    fn unknown_edge_endpoint() {
        let edges = "from,to\n100,999\n";
        let err = load_network_reader(Cursor::new(NODES), Cursor::new(edges)).unwrap_err();
        assert!(matches!(err, SpatialError::UnknownNode(999)));
    }

    #[test]
    fn duplicate_node_id() {
        let nodes = "id,lon,lat,name\n1,0,0,a\n1,1,1,b\n";
        let err = load_network_reader(Cursor::new(nodes), Cursor::new("from,to\n")).unwrap_err();
        assert!(matches!(err, SpatialError::DuplicateNode(1)));
    }

    #[test]
    fn malformed_row() {
        let nodes = "id,lon,lat,name\n1,west,0,a\n";
        let err = load_network_reader(Cursor::new(nodes), Cursor::new("from,to\n")).unwrap_err();
        assert!(matches!(err, SpatialError::Parse(_)));
    }
}
