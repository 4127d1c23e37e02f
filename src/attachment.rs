use std::fmt;

use petgraph::graph::{EdgeIndex, NodeIndex};

/// Stable address of one attachment point inside an [`Assembly`](crate::Assembly).
///
/// An AP never moves: its owning vertex and its position in that vertex's
/// AP list are both fixed when the vertex is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApId {
    pub vertex: NodeIndex,
    pub index: usize,
}

impl ApId {
    pub fn new(vertex: NodeIndex, index: usize) -> Self {
        Self { vertex, index }
    }
}

impl fmt::Display for ApId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}:{}", self.vertex.index(), self.index)
    }
}

/// A labelled connection slot on a vertex.
///
/// The AP is either free or bound to exactly one [`Edge`](crate::Edge). The
/// edge is held as an index into the assembly, never as a live reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPoint {
    label: String,
    owner: NodeIndex,
    index: usize,
    edge: Option<EdgeIndex>,
}

impl AttachmentPoint {
    pub(crate) fn new(label: impl Into<String>, owner: NodeIndex, index: usize) -> Self {
        Self {
            label: label.into(),
            owner,
            index,
            edge: None,
        }
    }

    /// The AP class label used for compatibility checks.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Vertex that owns this AP.
    pub fn owner(&self) -> NodeIndex {
        self.owner
    }

    /// Position of this AP in its owner's AP list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn id(&self) -> ApId {
        ApId::new(self.owner, self.index)
    }

    pub fn bound_edge(&self) -> Option<EdgeIndex> {
        self.edge
    }

    pub fn is_free(&self) -> bool {
        self.edge.is_none()
    }

    /// Two APs match when their labels are identical.
    pub fn matches(&self, other: &AttachmentPoint) -> bool {
        self.label == other.label
    }

    pub(crate) fn bind(&mut self, edge: EdgeIndex) {
        debug_assert!(self.edge.is_none(), "AP {} is already bound", self.id());
        self.edge = Some(edge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_ap_is_free() {
        let ap = AttachmentPoint::new("a", NodeIndex::new(3), 1);
        assert!(ap.is_free());
        assert_eq!(ap.bound_edge(), None);
        assert_eq!(ap.id(), ApId::new(NodeIndex::new(3), 1));
    }

    #[test]
    fn matching_is_exact_label_equality() {
        let a = AttachmentPoint::new("C:1", NodeIndex::new(0), 0);
        let b = AttachmentPoint::new("C:1", NodeIndex::new(1), 0);
        let c = AttachmentPoint::new("C:2", NodeIndex::new(1), 1);
        let d = AttachmentPoint::new("c:1", NodeIndex::new(1), 2);
        assert!(a.matches(&b));
        assert!(b.matches(&a));
        assert!(!a.matches(&c));
        assert!(!a.matches(&d));
    }

    #[test]
    fn bind_sets_edge() {
        let mut ap = AttachmentPoint::new("a", NodeIndex::new(0), 0);
        ap.bind(EdgeIndex::new(7));
        assert!(!ap.is_free());
        assert_eq!(ap.bound_edge(), Some(EdgeIndex::new(7)));
    }

    #[test]
    fn ap_id_display() {
        assert_eq!(ApId::new(NodeIndex::new(2), 5).to_string(), "v2:5");
    }
}
