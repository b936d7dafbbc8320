//! Social graph representation and builder.
//!
//! # Data layout
//!
//! The graph is undirected.  Every edge is stored once in `edges` (as the
//! endpoints it was added with) and twice in `adjacency` (once per endpoint),
//! so neighbour iteration is a contiguous slice scan.  Unlike a CSR layout
//! the adjacency lists stay growable: structure perturbation and the
//! synthetic generator both add edges after construction.
//!
//! Duplicate edges and self-loops are tolerated between [`SocialGraph::add_edge`]
//! and [`SocialGraph::simplify`]; everything the simulator hands out has been
//! simplified.  After `simplify` the neighbour lists are sorted ascending.

use bd_core::NodeId;

use crate::{EdgeSet, GraphError, GraphResult};

/// Undirected edge key: endpoints ordered `(min, max)`.
#[inline]
pub(crate) fn edge_key(a: NodeId, b: NodeId) -> (u32, u32) {
    if a.0 <= b.0 { (a.0, b.0) } else { (b.0, a.0) }
}

// ── SocialGraph ───────────────────────────────────────────────────────────────

/// Undirected graph of nodes (individuals) and edges (social ties), with an
/// optional categorical label per node.
#[derive(Clone, Debug, Default)]
pub struct SocialGraph {
    adjacency: Vec<Vec<NodeId>>,
    edges:     Vec<(NodeId, NodeId)>,
    attr:      Vec<Option<u32>>,
}

impl SocialGraph {
    /// Graph of `node_count` isolated, unlabelled nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
            edges:     Vec::new(),
            attr:      vec![None; node_count],
        }
    }

    /// Build a simplified graph from raw `(a, b)` index pairs.
    pub fn from_edges(node_count: usize, edges: &[(u32, u32)]) -> GraphResult<Self> {
        let mut g = Self::new(node_count);
        for &(a, b) in edges {
            g.add_edge(NodeId(a), NodeId(b))?;
        }
        g.simplify();
        Ok(g)
    }

    /// Cycle `0 - 1 - … - (n-1) - 0`.  Rings with fewer than three nodes
    /// collapse to a single edge or nothing after simplification.
    pub fn ring(node_count: usize) -> Self {
        let mut g = Self::new(node_count);
        for i in 0..node_count {
            let j = (i + 1) % node_count;
            g.push_edge(NodeId(i as u32), NodeId(j as u32));
        }
        g.simplify();
        g
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Iterator over all `NodeId`s in ascending index order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.adjacency.len() as u32).map(NodeId)
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Neighbours of `node`.
    ///
    /// # Panics
    /// Panics if `node` is out of range.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.adjacency[node.index()]
    }

    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node.index()].len()
    }

    /// `true` if an edge joins `a` and `b` in either direction.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        if a.index() >= self.node_count() || b.index() >= self.node_count() {
            return false;
        }
        let (scan, target) = if self.degree(a) <= self.degree(b) { (a, b) } else { (b, a) };
        self.adjacency[scan.index()].contains(&target)
    }

    /// All edges as stored.
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    /// Distinct non-loop edges keyed `(min, max)`.
    pub(crate) fn edge_set(&self) -> EdgeSet {
        self.edges
            .iter()
            .filter(|(a, b)| a != b)
            .map(|&(a, b)| edge_key(a, b))
            .collect()
    }

    // ── Labels ────────────────────────────────────────────────────────────

    /// Categorical label of `node`, if one was assigned.
    pub fn attr(&self, node: NodeId) -> Option<u32> {
        self.attr.get(node.index()).copied().flatten()
    }

    pub fn attrs(&self) -> &[Option<u32>] {
        &self.attr
    }

    pub fn set_attr(&mut self, node: NodeId, value: u32) -> GraphResult<()> {
        self.check(node)?;
        self.attr[node.index()] = Some(value);
        Ok(())
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Append an isolated, unlabelled node and return its id.
    pub fn add_vertex(&mut self) -> NodeId {
        let id = NodeId(self.adjacency.len() as u32);
        self.adjacency.push(Vec::new());
        self.attr.push(None);
        id
    }

    /// Append `count` isolated nodes.
    pub fn add_vertices(&mut self, count: usize) {
        let total = self.adjacency.len() + count;
        self.adjacency.resize_with(total, Vec::new);
        self.attr.resize(total, None);
    }

    /// Add an undirected edge.  Duplicates and self-loops are accepted here
    /// and removed by [`simplify`](Self::simplify).
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> GraphResult<()> {
        self.check(a)?;
        self.check(b)?;
        self.push_edge(a, b);
        Ok(())
    }

    /// Unchecked edge insert for callers that already hold valid ids.
    pub(crate) fn push_edge(&mut self, a: NodeId, b: NodeId) {
        self.edges.push((a, b));
        self.adjacency[a.index()].push(b);
        if a != b {
            self.adjacency[b.index()].push(a);
        }
    }

    /// Remove duplicate edges and self-loops.  Returns the number of stored
    /// edges removed.
    pub fn simplify(&mut self) -> usize {
        let before = self.edges.len();

        let mut keys: Vec<(u32, u32)> = self
            .edges
            .iter()
            .filter(|(a, b)| a != b)
            .map(|&(a, b)| edge_key(a, b))
            .collect();
        keys.sort_unstable();
        keys.dedup();

        for list in &mut self.adjacency {
            list.clear();
        }
        self.edges.clear();
        for (a, b) in keys {
            self.push_edge(NodeId(a), NodeId(b));
        }

        before - self.edges.len()
    }

    /// `true` if there are no self-loops and no duplicate edges.
    pub fn is_simple(&self) -> bool {
        let set = self.edge_set();
        set.len() == self.edges.len()
    }

    fn check(&self, node: NodeId) -> GraphResult<()> {
        if node.index() < self.node_count() {
            Ok(())
        } else {
            Err(GraphError::NodeNotFound(node))
        }
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`SocialGraph`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts labelled nodes and raw edges (duplicates and
/// self-loops included) in any order; `build()` checks the endpoints and
/// simplifies.
///
/// # Example
///
/// ```
/// use bd_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new();
/// let a = b.add_node(Some(0));
/// let c = b.add_node(Some(1));
/// b.add_edge(a, c);
/// b.add_edge(c, a); // duplicate, dropped by build()
/// let g = b.build().unwrap();
/// assert_eq!(g.node_count(), 2);
/// assert_eq!(g.edge_count(), 1);
/// ```
pub struct GraphBuilder {
    attr:      Vec<Option<u32>>,
    raw_edges: Vec<(NodeId, NodeId)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self { attr: Vec::new(), raw_edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of nodes and edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            attr:      Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, attr: Option<u32>) -> NodeId {
        let id = NodeId(self.attr.len() as u32);
        self.attr.push(attr);
        id
    }

    /// Add an undirected edge.  Endpoints are checked in `build()`.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) {
        self.raw_edges.push((a, b));
    }

    pub fn node_count(&self) -> usize { self.attr.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a simplified [`SocialGraph`].
    pub fn build(self) -> GraphResult<SocialGraph> {
        let mut g = SocialGraph::new(self.attr.len());
        g.attr = self.attr;
        for (a, b) in self.raw_edges {
            g.add_edge(a, b)?;
        }
        g.simplify();
        Ok(g)
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
