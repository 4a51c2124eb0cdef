//! Location index: name search and nearest-node snapping.
//!
//! # Assembly
//!
//! [`LocationIndex::build`] makes one pass over the graph:
//!
//! - Named nodes: the name is [cleaned](clean_name) and, if anything is left,
//!   added to the trie.  The first original spelling seen for a cleaned name
//!   becomes its canonical display name; every node is also kept under its
//!   cleaned name for exact-name lookups.
//! - Nodes with at least one neighbor: the coordinate goes into the point
//!   index and a coordinate → `NodeId` map.  Isolated nodes cannot start or
//!   end a route, so they are never snapped to.  When two routable nodes
//!   share a coordinate the first one keeps it.
//!
//! After `build` returns nothing mutates the index.

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use bm_core::{GeoPoint, NodeId};
use bm_spatial::{PointIndex, RTreeIndex, StreetGraph};

use crate::{PrefixTrie, SearchError, SearchResult};

/// Normalize a name into a trie key: keep ASCII letters and spaces,
/// lowercase the letters, drop everything else.
///
/// ```
/// assert_eq!(bm_search::clean_name("Peet's Coffee & Tea"), "peets coffee  tea");
/// ```
pub fn clean_name(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// One named node, as returned by [`LocationIndex::locations`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub id:   NodeId,
    pub lon:  f64,
    pub lat:  f64,
    /// The node's own name, uncleaned.
    pub name: String,
}

/// Bit-exact coordinate key.  `+ 0.0` folds `-0.0` into `0.0`.
type CoordKey = (u64, u64);

#[inline]
fn coord_key(p: GeoPoint) -> CoordKey {
    ((p.lon + 0.0).to_bits(), (p.lat + 0.0).to_bits())
}

/// Read-only search structures built from a street graph.
///
/// Generic over the nearest-point backend; [`RTreeIndex`] by default.
pub struct LocationIndex<I: PointIndex = RTreeIndex> {
    trie:      PrefixTrie,
    /// cleaned name → first original spelling
    canonical: FxHashMap<Box<str>, Box<str>>,
    /// cleaned name → every node carrying it, in graph order
    by_name:   FxHashMap<Box<str>, Vec<Location>>,
    by_coord:  FxHashMap<CoordKey, NodeId>,
    positions: FxHashMap<NodeId, GeoPoint>,
    points:    I,
}

impl LocationIndex<RTreeIndex> {
    /// Build with the default R-tree backend.
    pub fn build<G: StreetGraph>(graph: &G) -> SearchResult<Self> {
        Self::build_with(graph)
    }
}

impl<I: PointIndex> LocationIndex<I> {
    /// Build with any [`PointIndex`] backend.
    ///
    /// # Errors
    ///
    /// - [`SearchError::NoRoutableNodes`] if no node has a neighbor.
    /// - [`SearchError::InvalidCoordinate`] if a routable node has a NaN or
    ///   infinite coordinate.
    pub fn build_with<G: StreetGraph>(graph: &G) -> SearchResult<Self> {
        let mut trie = PrefixTrie::new();
        let mut canonical: FxHashMap<Box<str>, Box<str>> = FxHashMap::default();
        let mut by_name: FxHashMap<Box<str>, Vec<Location>> = FxHashMap::default();
        let mut by_coord: FxHashMap<CoordKey, NodeId> = FxHashMap::default();
        let mut positions: FxHashMap<NodeId, GeoPoint> = FxHashMap::default();
        let mut points: Vec<GeoPoint> = Vec::new();
        let mut shared_coords = 0usize;
        let mut unsearchable = 0usize;

        for node in graph.nodes() {
            positions.insert(node.id, node.pos);

            // ── Names ─────────────────────────────────────────────────────
            if let Some(name) = node.name {
                let cleaned = clean_name(name);
                if cleaned.is_empty() {
                    unsearchable += 1;
                } else {
                    trie.add(&cleaned)?;
                    let cleaned: Box<str> = cleaned.into();
                    canonical.entry(cleaned.clone()).or_insert_with(|| name.into());
                    by_name.entry(cleaned).or_default().push(Location {
                        id:   node.id,
                        lon:  node.pos.lon,
                        lat:  node.pos.lat,
                        name: name.to_owned(),
                    });
                }
            }

            // ── Coordinates ───────────────────────────────────────────────
            if graph.degree(node.id) == 0 {
                continue;
            }
            if !node.pos.is_finite() {
                return Err(SearchError::InvalidCoordinate { id: node.id, pos: node.pos });
            }
            match by_coord.entry(coord_key(node.pos)) {
                Entry::Vacant(slot) => {
                    slot.insert(node.id);
                    points.push(node.pos);
                }
                Entry::Occupied(_) => shared_coords += 1,
            }
        }

        if points.is_empty() {
            return Err(SearchError::NoRoutableNodes);
        }
        if unsearchable > 0 {
            warn!(unsearchable, "named nodes skipped: name has no letters or spaces");
        }
        if shared_coords > 0 {
            debug!(shared_coords, "routable nodes sharing a coordinate with an earlier node");
        }

        let points = I::build(points);
        info!(
            names = trie.len(),
            routable = points.len(),
            nodes = positions.len(),
            "location index built"
        );

        Ok(Self { trie, canonical, by_name, by_coord, positions, points })
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Canonical names of every location whose cleaned name starts with the
    /// cleaned `prefix`, in trie order.
    ///
    /// A prefix that cleans to nothing matches nothing, rather than listing
    /// every name the way `trie().keys_with_prefix("")` does.
    pub fn locations_by_prefix(&self, prefix: &str) -> Vec<String> {
        let cleaned = clean_name(prefix);
        if cleaned.is_empty() {
            return Vec::new();
        }
        let mut names = Vec::new();
        self.trie.for_each_key_with_prefix(&cleaned, |key| {
            if let Some(original) = self.canonical.get(key) {
                names.push(original.to_string());
            }
        });
        names
    }

    /// Every node whose cleaned name equals the cleaned `name`.
    pub fn locations(&self, name: &str) -> Vec<Location> {
        self.by_name
            .get(clean_name(name).as_str())
            .cloned()
            .unwrap_or_default()
    }

    /// The routable node nearest to `(lon, lat)` by planar distance.
    ///
    /// `None` only for a NaN or infinite query; a built index always has at
    /// least one routable node.
    pub fn closest(&self, lon: f64, lat: f64) -> Option<NodeId> {
        let query = GeoPoint::new(lon, lat);
        if !query.is_finite() {
            return None;
        }
        let hit = self.points.nearest(query)?;
        self.by_coord.get(&coord_key(hit)).copied()
    }

    /// Position of any graph node, routable or not.
    pub fn position(&self, id: NodeId) -> Option<GeoPoint> {
        self.positions.get(&id).copied()
    }

    /// Number of distinct cleaned names.
    pub fn name_count(&self) -> usize {
        self.trie.len()
    }

    /// Number of distinct coordinates available for snapping.
    pub fn routable_count(&self) -> usize {
        self.points.len()
    }

    /// The underlying trie, for callers that need raw cleaned keys.
    pub fn trie(&self) -> &PrefixTrie {
        &self.trie
    }
}
