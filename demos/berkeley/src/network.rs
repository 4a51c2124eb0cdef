//! Synthetic street network around the UC Berkeley campus.
//!
//! Used when no node/edge CSVs are given on the command line.

use bm_core::{GeoPoint, NodeId};
use bm_spatial::{StreetNetwork, StreetNetworkBuilder};

/// Build the 9-node campus network.
///
/// Returns `(network, [top_dog, berkeley_bowl])` as handy route endpoints.
pub fn build_network() -> (StreetNetwork, [NodeId; 2]) {
    let mut b = StreetNetworkBuilder::new();

    let top_dog      = b.add_named_node(GeoPoint::new(-122.2589, 37.8675), "Top Dog");
    let tolman       = b.add_named_node(GeoPoint::new(-122.2636, 37.8737), "Tolman Hall");
    let sather_gate  = b.add_named_node(GeoPoint::new(-122.2595, 37.8703), "Sather Gate");
    let cheese_board = b.add_named_node(GeoPoint::new(-122.2693, 37.8799), "Cheese Board Collective");
    let bowl         = b.add_named_node(GeoPoint::new(-122.2688, 37.8560), "Berkeley Bowl");
    let tele_dwight  = b.add_node(GeoPoint::new(-122.2588, 37.8650));
    let shattuck     = b.add_node(GeoPoint::new(-122.2681, 37.8700));
    let shattuck_s   = b.add_node(GeoPoint::new(-122.2680, 37.8600));
    // Up the hill with no street access; searchable but never snapped to.
    b.add_named_node(GeoPoint::new(-122.2467, 37.8796), "Lawrence Hall of Science");

    b.add_way(top_dog,     tele_dwight);
    b.add_way(top_dog,     sather_gate);
    b.add_way(sather_gate, tolman);
    b.add_way(tolman,      shattuck);
    b.add_way(shattuck,    cheese_board);
    b.add_way(shattuck,    shattuck_s);
    b.add_way(shattuck_s,  bowl);
    b.add_way(tele_dwight, shattuck_s);

    (b.build(), [top_dog, bowl])
}
