//! Discovery of the vertices reachable from a root through bound APs.
//!
//! Visitation is tracked per vertex. Tracking APs instead would let a ring
//! lead back into an already visited vertex through a different AP.

use petgraph::graph::{EdgeIndex, NodeIndex};
use tracing::trace;

use crate::assembly::Assembly;
use crate::vertex::HasAttachmentPoints;

/// The connected component of an [`Assembly`] seen from one root vertex.
///
/// A `Graph` is a snapshot of handles; it owns no vertices or edges and goes
/// stale as soon as the assembly gains new edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    root: NodeIndex,
    vertices: Vec<NodeIndex>,
    tree_edges: Vec<EdgeIndex>,
    member: Vec<bool>,
}

impl Graph {
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Discovered vertices in depth-first pre-order, root first.
    pub fn vertices(&self) -> &[NodeIndex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false: the root itself is part of every graph.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, vertex: NodeIndex) -> bool {
        self.member.get(vertex.index()).copied().unwrap_or(false)
    }

    /// Edges through which a vertex was first reached, in discovery order.
    pub fn tree_edges(&self) -> &[EdgeIndex] {
        &self.tree_edges
    }

    /// All edges whose endpoints lie in this graph, sorted by index.
    pub fn edges(&self, asm: &Assembly) -> Vec<EdgeIndex> {
        asm.edges()
            .filter(|&e| {
                let (a, _) = asm.edge(e).endpoints();
                self.contains(a.vertex)
            })
            .collect()
    }

    /// Edges that close a ring: members of [`edges`](Self::edges) that are not
    /// tree edges. Their count is the number of independent rings.
    pub fn ring_closing_edges(&self, asm: &Assembly) -> Vec<EdgeIndex> {
        let mut tree = vec![false; asm.edge_count()];
        for e in &self.tree_edges {
            tree[e.index()] = true;
        }
        self.edges(asm)
            .into_iter()
            .filter(|e| !tree[e.index()])
            .collect()
    }
}

/// Walks bound APs depth-first from `root` and collects every vertex reached.
///
/// APs are followed in their declared order, so the result is deterministic.
/// Runs in O(V + E) for the component.
///
/// # Panics
///
/// Panics if `root` is not a vertex of `asm`.
pub fn discover(asm: &Assembly, root: NodeIndex) -> Graph {
    assert!(
        asm.contains_vertex(root),
        "root vertex {} is not in the assembly",
        root.index()
    );

    let mut member = vec![false; asm.vertex_count()];
    let mut vertices = Vec::new();
    let mut tree_edges = Vec::new();
    let mut stack: Vec<(NodeIndex, Option<EdgeIndex>)> = vec![(root, None)];

    while let Some((v, via)) = stack.pop() {
        if member[v.index()] {
            continue;
        }
        member[v.index()] = true;
        vertices.push(v);
        if let Some(e) = via {
            tree_edges.push(e);
        }
        trace!(vertex = v.index(), "discovered");

        let aps = asm.vertex(v).attachment_points();
        for ap in aps.iter().rev() {
            let Some(edge) = ap.bound_edge() else {
                continue;
            };
            if let Some(other) = asm.opposite(ap.id()) {
                if !member[other.vertex.index()] {
                    stack.push((other.vertex, Some(edge)));
                }
            }
        }
    }

    Graph {
        root,
        vertices,
        tree_edges,
        member,
    }
}

/// Splits the whole assembly into connected graphs, rooted at the lowest
/// vertex index of each.
pub fn components(asm: &Assembly) -> Vec<Graph> {
    let mut seen = vec![false; asm.vertex_count()];
    let mut out = Vec::new();
    for v in asm.vertices() {
        if seen[v.index()] {
            continue;
        }
        let graph = discover(asm, v);
        for &u in graph.vertices() {
            seen[u.index()] = true;
        }
        out.push(graph);
    }
    out
}
