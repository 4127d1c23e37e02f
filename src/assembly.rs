//! The arena that owns every vertex and edge of an assembly.
//!
//! Vertices, APs and edges refer to each other only through [`NodeIndex`],
//! [`ApId`] and [`EdgeIndex`] handles, so the Vertex -> AP -> Edge -> AP ->
//! Vertex loop never becomes a reference cycle. Nothing is ever removed, which
//! keeps every handle valid for the lifetime of the assembly.

use std::fmt;

use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use tracing::debug;

use crate::attachment::{ApId, AttachmentPoint};
use crate::compat::{ApCompatibility, ExactLabel};
use crate::edge::Edge;
use crate::vertex::{EmptyVertex, Fragment, HasAttachmentPoints, Vertex};

/// Result of a join attempt that did not hit a structural error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinOutcome {
    /// The first compatible pair was bound: `(ap on self, ap on other)`.
    Joined(ApId, ApId),
    /// No free AP of one vertex is compatible with a free AP of the other.
    NoMatch,
}

impl JoinOutcome {
    pub fn is_joined(&self) -> bool {
        matches!(self, Self::Joined(..))
    }
}

/// Structural errors raised while building an assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyError {
    /// The vertex handle does not belong to this assembly.
    UnknownVertex(NodeIndex),
    /// The vertex exists but has no AP at that index.
    UnknownAttachmentPoint(ApId),
    /// Both sides of a join or bind are the same vertex.
    SelfLoop(NodeIndex),
    /// The AP is already part of an edge.
    AlreadyBound(ApId),
    /// A symmetric set names an AP index twice, in two sets, or out of range.
    InvalidSymmetricSet { vertex: NodeIndex, index: usize },
}

impl fmt::Display for AssemblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownVertex(v) => write!(f, "unknown vertex {}", v.index()),
            Self::UnknownAttachmentPoint(ap) => write!(f, "unknown attachment point {ap}"),
            Self::SelfLoop(v) => {
                write!(f, "cannot bind two attachment points of vertex {}", v.index())
            }
            Self::AlreadyBound(ap) => write!(f, "attachment point {ap} is already bound"),
            Self::InvalidSymmetricSet { vertex, index } => write!(
                f,
                "invalid symmetric set on vertex {}: attachment point index {}",
                vertex.index(),
                index
            ),
        }
    }
}

impl std::error::Error for AssemblyError {}

pub struct Assembly {
    graph: UnGraph<Vertex, Edge>,
}

impl Assembly {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::default(),
        }
    }

    /// The underlying `petgraph` graph. Edges connect the owners of their two
    /// endpoint APs.
    pub fn graph(&self) -> &UnGraph<Vertex, Edge> {
        &self.graph
    }

    /// Adds a fragment with one free AP per label, in the given order.
    pub fn add_fragment<S: AsRef<str>>(&mut self, label: &str, ap_labels: &[S]) -> NodeIndex {
        let idx = NodeIndex::new(self.graph.node_count());
        let aps = Self::make_aps(idx, ap_labels);
        self.graph.add_node(Vertex::Fragment(Fragment::new(label, aps)))
    }

    /// Adds a vertex with free APs but no fragment content.
    pub fn add_empty_vertex<S: AsRef<str>>(&mut self, ap_labels: &[S]) -> NodeIndex {
        let idx = NodeIndex::new(self.graph.node_count());
        let aps = Self::make_aps(idx, ap_labels);
        self.graph.add_node(Vertex::Empty(EmptyVertex::new(aps)))
    }

    fn make_aps<S: AsRef<str>>(owner: NodeIndex, labels: &[S]) -> Vec<AttachmentPoint> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| AttachmentPoint::new(label.as_ref(), owner, i))
            .collect()
    }

    /// Declares groups of symmetry-equivalent APs on `vertex`, replacing any
    /// previous grouping. Every index must be in range and appear at most once
    /// across all groups.
    pub fn set_symmetric_sets(
        &mut self,
        vertex: NodeIndex,
        sets: Vec<Vec<usize>>,
    ) -> Result<(), AssemblyError> {
        let v = self
            .graph
            .node_weight_mut(vertex)
            .ok_or(AssemblyError::UnknownVertex(vertex))?;
        let mut seen = vec![false; v.ap_count()];
        for &index in sets.iter().flatten() {
            match seen.get_mut(index) {
                Some(flag) if !*flag => *flag = true,
                _ => return Err(AssemblyError::InvalidSymmetricSet { vertex, index }),
            }
        }
        v.set_symmetric_sets(sets);
        Ok(())
    }

    pub fn vertex(&self, idx: NodeIndex) -> &Vertex {
        &self.graph[idx]
    }

    pub fn try_vertex(&self, idx: NodeIndex) -> Option<&Vertex> {
        self.graph.node_weight(idx)
    }

    pub fn contains_vertex(&self, idx: NodeIndex) -> bool {
        idx.index() < self.graph.node_count()
    }

    pub fn edge(&self, idx: EdgeIndex) -> &Edge {
        &self.graph[idx]
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn vertices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edge_indices()
    }

    pub fn attachment_point(&self, ap: ApId) -> Option<&AttachmentPoint> {
        self.graph.node_weight(ap.vertex)?.attachment_point(ap.index)
    }

    pub fn free_attachment_points(&self, vertex: NodeIndex) -> Vec<ApId> {
        self.vertex(vertex)
            .free_attachment_points()
            .into_iter()
            .map(AttachmentPoint::id)
            .collect()
    }

    pub fn bound_attachment_points(&self, vertex: NodeIndex) -> Vec<ApId> {
        self.vertex(vertex)
            .bound_attachment_points()
            .into_iter()
            .map(AttachmentPoint::id)
            .collect()
    }

    /// The AP on the far side of the edge `ap` is bound to, if any.
    ///
    /// # Panics
    ///
    /// Panics if the bound edge does not list `ap` as an endpoint. That can
    /// only happen if the assembly's internal references are corrupt.
    pub fn opposite(&self, ap: ApId) -> Option<ApId> {
        let edge = self.attachment_point(ap)?.bound_edge()?;
        match self.graph[edge].other_endpoint(ap) {
            Ok(other) => Some(other),
            Err(e) => panic!("corrupt assembly: {e}"),
        }
    }

    /// Joins `a` and `b` through their first pair of matching free APs.
    ///
    /// See [`join_with`](Self::join_with).
    pub fn join(&mut self, a: NodeIndex, b: NodeIndex) -> Result<JoinOutcome, AssemblyError> {
        self.join_with(a, b, &ExactLabel)
    }

    /// Joins `a` and `b` through the first compatible pair of free APs.
    ///
    /// Free APs of `a` are scanned in order and, for each, the free APs of `b`
    /// in order; the first compatible pair is bound and the search stops. A
    /// vertex without free APs yields [`JoinOutcome::NoMatch`]. Nothing is
    /// mutated unless the outcome is [`JoinOutcome::Joined`].
    pub fn join_with<C: ApCompatibility + ?Sized>(
        &mut self,
        a: NodeIndex,
        b: NodeIndex,
        compat: &C,
    ) -> Result<JoinOutcome, AssemblyError> {
        let va = self.try_vertex(a).ok_or(AssemblyError::UnknownVertex(a))?;
        let vb = self.try_vertex(b).ok_or(AssemblyError::UnknownVertex(b))?;
        if a == b {
            return Err(AssemblyError::SelfLoop(a));
        }

        let mut found = None;
        'search: for ap in va.free_attachment_points() {
            for bp in vb.free_attachment_points() {
                if compat.compatible(ap, bp) {
                    found = Some((ap.id(), bp.id()));
                    break 'search;
                }
            }
        }

        match found {
            Some((x, y)) => {
                let edge = self.bind(x, y)?;
                debug!(
                    vertex = a.index(),
                    other = b.index(),
                    edge = edge.index(),
                    "joined {x} to {y}"
                );
                Ok(JoinOutcome::Joined(x, y))
            }
            None => {
                debug!(
                    vertex = a.index(),
                    other = b.index(),
                    "no compatible free attachment points"
                );
                Ok(JoinOutcome::NoMatch)
            }
        }
    }

    /// Binds two specific free APs on different vertices with a new edge.
    ///
    /// No compatibility rule is applied; the caller picked the pair.
    pub fn bind(&mut self, x: ApId, y: ApId) -> Result<EdgeIndex, AssemblyError> {
        for ap in [x, y] {
            let point = self
                .attachment_point(ap)
                .ok_or(AssemblyError::UnknownAttachmentPoint(ap))?;
            if !point.is_free() {
                return Err(AssemblyError::AlreadyBound(ap));
            }
        }
        if x.vertex == y.vertex {
            return Err(AssemblyError::SelfLoop(x.vertex));
        }

        let edge = self.graph.add_edge(x.vertex, y.vertex, Edge::new(x, y));
        self.graph[x.vertex].attachment_points_mut()[x.index].bind(edge);
        self.graph[y.vertex].attachment_points_mut()[y.index].bind(edge);
        debug!(edge = edge.index(), "bound {x} to {y}");
        Ok(edge)
    }
}

impl Default for Assembly {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Assembly {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
        }
    }
}

impl fmt::Debug for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assembly")
            .field("vertex_count", &self.vertex_count())
            .field("edge_count", &self.edge_count())
            .finish()
    }
}
