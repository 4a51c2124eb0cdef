//! Nearest-point spatial indexes.
//!
//! # Pluggability
//!
//! Consumers snap coordinates through the [`PointIndex`] trait, so the
//! backing structure can be swapped (R-tree, grid, k-d tree) without touching
//! the code that builds or queries the index.  [`RTreeIndex`] is the default;
//! [`LinearScanIndex`] is a brute-force reference used as a test oracle and
//! for very small point sets.
//!
//! # Metric
//!
//! Both indexes use planar Euclidean distance over `(lon, lat)` with no
//! geodesic correction.  Ties go to the point inserted first.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use bm_core::GeoPoint;

// ── PointIndex trait ──────────────────────────────────────────────────────────

/// A static 2-D point set answering nearest-point queries.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: an index is built once at startup
/// and then queried concurrently from request handlers.
pub trait PointIndex: Send + Sync + Sized {
    /// Build the index over `points`.  Insertion order is the tie-break order.
    fn build(points: Vec<GeoPoint>) -> Self;

    /// The indexed point closest to `query`, or `None` if the index is empty.
    fn nearest(&self, query: GeoPoint) -> Option<GeoPoint>;

    /// Number of indexed points.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a `[lon, lat]` point plus its insertion rank.
#[derive(Clone, Debug)]
struct PointEntry {
    point: [f64; 2], // [lon, lat]
    seq:   u32,
}

impl RTreeObject for PointEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for PointEntry {
    /// Squared Euclidean distance in lon/lat space.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlon = self.point[0] - point[0];
        let dlat = self.point[1] - point[1];
        dlon * dlon + dlat * dlat
    }
}

// ── RTreeIndex ────────────────────────────────────────────────────────────────

/// R-tree backed [`PointIndex`] (via `rstar`).
pub struct RTreeIndex {
    tree: RTree<PointEntry>,
}

impl PointIndex for RTreeIndex {
    /// Bulk-loads the tree: O(N log N), faster than N inserts.
    fn build(points: Vec<GeoPoint>) -> Self {
        let entries: Vec<PointEntry> = points
            .into_iter()
            .enumerate()
            .map(|(i, p)| PointEntry { point: [p.lon, p.lat], seq: i as u32 })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    fn nearest(&self, query: GeoPoint) -> Option<GeoPoint> {
        let mut candidates = self
            .tree
            .nearest_neighbor_iter_with_distance_2(&[query.lon, query.lat]);
        let (first, best_d2) = candidates.next()?;

        // Equidistant points come out of the iterator in tree order, not
        // insertion order; pick the lowest rank among them.
        let winner = candidates
            .take_while(|&(_, d2)| d2 == best_d2)
            .map(|(e, _)| e)
            .fold(first, |best, e| if e.seq < best.seq { e } else { best });

        Some(GeoPoint::new(winner.point[0], winner.point[1]))
    }

    fn len(&self) -> usize {
        self.tree.size()
    }
}

// ── LinearScanIndex ───────────────────────────────────────────────────────────

/// Brute-force [`PointIndex`]: O(N) per query.
pub struct LinearScanIndex {
    points: Vec<GeoPoint>,
}

impl PointIndex for LinearScanIndex {
    fn build(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    fn nearest(&self, query: GeoPoint) -> Option<GeoPoint> {
        let mut best: Option<(GeoPoint, f64)> = None;
        for &p in &self.points {
            let d2 = p.planar_distance_2(query);
            // Strict `<` keeps the earliest point on ties.
            if best.is_none_or(|(_, bd)| d2 < bd) {
                best = Some((p, d2));
            }
        }
        best.map(|(p, _)| p)
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}
