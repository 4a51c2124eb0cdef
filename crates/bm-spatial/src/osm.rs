//! OSM PBF loader, enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use bm_spatial::osm::load_from_pbf;
//!
//! let network = load_from_pbf(Path::new("berkeley.osm.pbf"))?;
//! ```
//!
//! # What is loaded
//!
//! - Every node referenced by a street way (see `is_street`).
//! - Every node carrying a `name` tag, even if no street references it.
//!   Such nodes are searchable by name but have degree zero, so they are
//!   never snapped to.
//!
//! Consecutive way nodes become undirected segments.  Relations and all
//! other tags are ignored.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use osmpbf::{Element, ElementReader};
use tracing::info;

use bm_core::{GeoPoint, NodeId};

use crate::network::{StreetNetwork, StreetNetworkBuilder};
use crate::SpatialError;

// ── Public entry point ────────────────────────────────────────────────────────

/// Load a street network from an OSM PBF file.
///
/// # Errors
///
/// Returns [`SpatialError::Osm`] if the file cannot be opened or parsed.
pub fn load_from_pbf(path: &Path) -> Result<StreetNetwork, SpatialError> {
    // ── Phase 1: collect nodes, names, and street ways in one pass ────────
    let reader = ElementReader::from_path(path).map_err(|e| SpatialError::Osm(e.to_string()))?;

    let mut all_nodes: HashMap<i64, GeoPoint> = HashMap::new();
    let mut names: HashMap<i64, String> = HashMap::new();
    let mut street_ways: Vec<Vec<i64>> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lon(), n.lat()));
                if let Some((_, v)) = n.tags().find(|(k, _)| *k == "name") {
                    names.insert(n.id(), v.to_owned());
                }
            }
            Element::DenseNode(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lon(), n.lat()));
                if let Some((_, v)) = n.tags().find(|(k, _)| *k == "name") {
                    names.insert(n.id(), v.to_owned());
                }
            }
            Element::Way(w) => {
                let highway = w.tags().find(|(k, _)| *k == "highway").map(|(_, v)| v);
                if highway.is_some_and(is_street) {
                    street_ways.push(w.refs().collect());
                }
            }
            _ => {}
        })
        .map_err(|e| SpatialError::Osm(e.to_string()))?;

    // ── Phase 2: pick the nodes worth keeping ─────────────────────────────
    let mut kept: HashSet<i64> = street_ways.iter().flat_map(|w| w.iter().copied()).collect();
    kept.extend(names.keys().copied());

    // Sort so NodeIds are stable across runs (HashSet order is not).
    let mut kept: Vec<i64> = kept.into_iter().collect();
    kept.sort_unstable();

    // ── Phase 3: build network ────────────────────────────────────────────
    let mut builder = StreetNetworkBuilder::with_capacity(kept.len(), kept.len());
    let mut osm_to_bm: HashMap<i64, NodeId> = HashMap::with_capacity(kept.len());

    for osm_id in &kept {
        if let Some(&pos) = all_nodes.get(osm_id) {
            let id = match names.remove(osm_id) {
                Some(name) => builder.add_named_node(pos, name),
                None => builder.add_node(pos),
            };
            osm_to_bm.insert(*osm_id, id);
        }
    }

    drop(all_nodes);

    for way in &street_ways {
        for window in way.windows(2) {
            if let (Some(&a), Some(&b)) = (osm_to_bm.get(&window[0]), osm_to_bm.get(&window[1])) {
                builder.add_way(a, b);
            }
        }
    }

    info!(
        nodes = builder.node_count(),
        segments = builder.segment_count(),
        path = %path.display(),
        "loaded OSM street network"
    );

    Ok(builder.build())
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

/// `true` for `highway=*` values that form the navigable street graph.
fn is_street(highway: &str) -> bool {
    matches!(
        highway,
        "motorway" | "motorway_link"
            | "trunk" | "trunk_link"
            | "primary" | "primary_link"
            | "secondary" | "secondary_link"
            | "tertiary" | "tertiary_link"
            | "residential" | "living_street"
            | "service" | "unclassified" | "road"
    )
}
