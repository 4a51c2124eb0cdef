//! Read-only view of a street graph.
//!
//! Consumers that index the graph (name search, nearest-node snapping) only
//! need node positions, names, and degree.  They take `&impl StreetGraph`
//! so any storage layout can back them; [`StreetNetwork`](crate::StreetNetwork)
//! is the one this crate ships.

use bm_core::{GeoPoint, NodeId};

/// One node as seen through [`StreetGraph::nodes`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphNode<'a> {
    pub id:   NodeId,
    pub pos:  GeoPoint,
    /// Display name from the source data, if the node has one.
    pub name: Option<&'a str>,
}

/// Node-level queries over a street graph.
///
/// Implementations must be `Sync` so one graph can feed several index builds
/// running on different threads.
pub trait StreetGraph: Sync {
    /// Every node, in ascending `NodeId` order.
    fn nodes(&self) -> impl Iterator<Item = GraphNode<'_>>;

    /// Number of neighbors of `id`.  Zero for isolated or unknown nodes.
    fn degree(&self, id: NodeId) -> usize;

    /// Position of `id`, or `None` if the graph has no such node.
    fn position(&self, id: NodeId) -> Option<GeoPoint>;
}
