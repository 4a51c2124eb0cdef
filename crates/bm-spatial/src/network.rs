//! Street network representation and builder.
//!
//! # Data layout
//!
//! Adjacency uses **Compressed Sparse Row (CSR)** format.  Given a
//! `NodeId n`, its neighbors occupy the slice:
//!
//! ```text
//! adj_to[ adj_start[n] .. adj_start[n+1] ]
//! ```
//!
//! Streets are undirected: [`StreetNetworkBuilder::add_way`] records each
//! segment in both directions, so `degree(n)` counts every node `n` shares a
//! segment with.  Neighbor lists are sorted and deduplicated at build time.

use bm_core::{GeoPoint, NodeId};

use crate::graph::{GraphNode, StreetGraph};

// ── StreetNetwork ─────────────────────────────────────────────────────────────

/// Undirected street graph in CSR format with optional per-node names.
///
/// Do not construct directly; use [`StreetNetworkBuilder`].
#[derive(Debug)]
pub struct StreetNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// Source name of each node, if any.  Indexed by `NodeId`.
    pub node_name: Vec<Option<Box<str>>>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// CSR row pointer.  Neighbors of node `n` are at
    /// `adj_to[adj_start[n] .. adj_start[n+1]]`.  Length = `node_count + 1`.
    pub adj_start: Vec<u32>,

    /// Neighbor of each adjacency entry.
    pub adj_to: Vec<NodeId>,
}

impl StreetNetwork {
    /// Construct an empty network with no nodes or ways.
    pub fn empty() -> Self {
        StreetNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    /// Number of undirected segments.
    pub fn segment_count(&self) -> usize {
        self.adj_to.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Neighbors of `node`, ascending by id.  Empty for unknown ids.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        if node.index() >= self.node_count() {
            return &[];
        }
        let start = self.adj_start[node.index()] as usize;
        let end   = self.adj_start[node.index() + 1] as usize;
        &self.adj_to[start..end]
    }

    /// Name of `node`, if it has one.
    #[inline]
    pub fn name(&self, node: NodeId) -> Option<&str> {
        self.node_name.get(node.index()).and_then(|n| n.as_deref())
    }
}

impl StreetGraph for StreetNetwork {
    fn nodes(&self) -> impl Iterator<Item = GraphNode<'_>> {
        self.node_pos
            .iter()
            .zip(&self.node_name)
            .enumerate()
            .map(|(i, (&pos, name))| GraphNode {
                id: NodeId(i as u32),
                pos,
                name: name.as_deref(),
            })
    }

    #[inline]
    fn degree(&self, id: NodeId) -> usize {
        self.neighbors(id).len()
    }

    #[inline]
    fn position(&self, id: NodeId) -> Option<GeoPoint> {
        self.node_pos.get(id.index()).copied()
    }
}

// ── StreetNetworkBuilder ──────────────────────────────────────────────────────

/// Construct a [`StreetNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use bm_core::GeoPoint;
/// use bm_spatial::{StreetGraph, StreetNetworkBuilder};
///
/// let mut b = StreetNetworkBuilder::new();
/// let a = b.add_named_node(GeoPoint::new(-122.26, 37.87), "Telegraph Ave");
/// let c = b.add_node(GeoPoint::new(-122.25, 37.87));
/// b.add_way(a, c);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.degree(a), 1);
/// ```
pub struct StreetNetworkBuilder {
    nodes:    Vec<GeoPoint>,
    names:    Vec<Option<Box<str>>>,
    segments: Vec<(NodeId, NodeId)>,
}

impl StreetNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), names: Vec::new(), segments: Vec::new() }
    }

    /// Pre-allocate for the expected number of nodes and segments.
    pub fn with_capacity(nodes: usize, segments: usize) -> Self {
        Self {
            nodes:    Vec::with_capacity(nodes),
            names:    Vec::with_capacity(nodes),
            segments: Vec::with_capacity(segments),
        }
    }

    /// Add an unnamed node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        self.names.push(None);
        id
    }

    /// Add a node carrying a display name.
    pub fn add_named_node(&mut self, pos: GeoPoint, name: impl Into<Box<str>>) -> NodeId {
        let id = self.add_node(pos);
        self.names[id.index()] = Some(name.into());
        id
    }

    /// Attach (or replace) the name of a node added earlier.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<Box<str>>) {
        self.names[id.index()] = Some(name.into());
    }

    /// Add an undirected street segment between `a` and `b`.
    ///
    /// Self-loops are ignored; repeated segments collapse at build time.
    pub fn add_way(&mut self, a: NodeId, b: NodeId) {
        if a != b {
            self.segments.push((a, b));
        }
    }

    /// Look up the position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn segment_count(&self) -> usize { self.segments.len() }

    /// Consume the builder and produce a [`StreetNetwork`].
    ///
    /// Time complexity: O(S log S) for the adjacency sort, S = segments.
    pub fn build(self) -> StreetNetwork {
        let node_count = self.nodes.len();

        // Both directions of every segment, sorted by source then target.
        let mut half_edges: Vec<(NodeId, NodeId)> = self
            .segments
            .iter()
            .flat_map(|&(a, b)| [(a, b), (b, a)])
            .collect();
        half_edges.sort_unstable();
        half_edges.dedup();

        let mut adj_start = vec![0u32; node_count + 1];
        for (from, _) in &half_edges {
            adj_start[from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            adj_start[i] += adj_start[i - 1];
        }
        debug_assert_eq!(adj_start[node_count] as usize, half_edges.len());

        let adj_to = half_edges.into_iter().map(|(_, to)| to).collect();

        StreetNetwork {
            node_pos: self.nodes,
            node_name: self.names,
            adj_start,
            adj_to,
        }
    }
}

impl Default for StreetNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
