//! CSV street-network loader.
//!
//! # CSV format
//!
//! Two files (or readers).  Node ids are arbitrary `i64` values from the
//! source data; they are remapped to dense `NodeId`s in file order.
//!
//! ```csv
//! id,lon,lat,name
//! 53085981,-122.2594,37.8691,Telegraph Avenue
//! 53085982,-122.2590,37.8688,
//! ```
//!
//! ```csv
//! from,to
//! 53085981,53085982
//! ```
//!
//! An empty `name` field means the node is unnamed.  Every edge row is an
//! undirected segment.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use bm_core::{GeoPoint, NodeId};

use crate::network::{StreetNetwork, StreetNetworkBuilder};
use crate::SpatialError;

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    id:   i64,
    lon:  f64,
    lat:  f64,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Deserialize)]
struct EdgeRecord {
    from: i64,
    to:   i64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`StreetNetwork`] from a node CSV and an edge CSV.
pub fn load_network_csv(nodes: &Path, edges: &Path) -> Result<StreetNetwork, SpatialError> {
    let nodes = std::fs::File::open(nodes)?;
    let edges = std::fs::File::open(edges)?;
    load_network_reader(nodes, edges)
}

/// Like [`load_network_csv`] but accepts any `Read` sources.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from network
/// streams.
///
/// # Errors
///
/// - [`SpatialError::Parse`] on malformed rows.
/// - [`SpatialError::DuplicateNode`] if a node id repeats.
/// - [`SpatialError::UnknownNode`] if an edge names an id absent from the
///   node file.
pub fn load_network_reader<N: Read, E: Read>(
    nodes: N,
    edges: E,
) -> Result<StreetNetwork, SpatialError> {
    let mut builder = StreetNetworkBuilder::new();
    let mut source_to_bm: HashMap<i64, NodeId> = HashMap::new();

    // ── Nodes ─────────────────────────────────────────────────────────────
    let mut node_reader = csv::Reader::from_reader(nodes);
    for result in node_reader.deserialize::<NodeRecord>() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        if source_to_bm.contains_key(&row.id) {
            return Err(SpatialError::DuplicateNode(row.id));
        }
        let pos = GeoPoint::new(row.lon, row.lat);
        let id = match row.name.filter(|n| !n.is_empty()) {
            Some(name) => builder.add_named_node(pos, name),
            None => builder.add_node(pos),
        };
        source_to_bm.insert(row.id, id);
    }

    // ── Edges ─────────────────────────────────────────────────────────────
    let mut edge_reader = csv::Reader::from_reader(edges);
    for result in edge_reader.deserialize::<EdgeRecord>() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        let from = *source_to_bm.get(&row.from).ok_or(SpatialError::UnknownNode(row.from))?;
        let to = *source_to_bm.get(&row.to).ok_or(SpatialError::UnknownNode(row.to))?;
        builder.add_way(from, to);
    }

    debug!(
        nodes = builder.node_count(),
        segments = builder.segment_count(),
        "parsed street network CSV"
    );

    Ok(builder.build())
}
