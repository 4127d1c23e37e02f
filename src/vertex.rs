//! Vertex kinds of an assembly graph.
//!
//! A vertex owns a fixed, ordered list of [`AttachmentPoint`]s that is set when
//! the vertex is created and never resized. What the vertex stands for is
//! opaque here; only the AP labels take part in assembly.

use std::fmt;

use crate::attachment::AttachmentPoint;

/// Label rendered for vertices that carry no fragment.
pub const EMPTY_VERTEX_LABEL: &str = "*";

/// Access to the attachment points of anything shaped like a vertex.
///
/// Free and bound APs are views over [`attachment_points`](Self::attachment_points),
/// not separate storage, so together they always cover the full list exactly
/// once.
pub trait HasAttachmentPoints {
    fn attachment_points(&self) -> &[AttachmentPoint];

    fn free_attachment_points(&self) -> Vec<&AttachmentPoint> {
        self.attachment_points()
            .iter()
            .filter(|ap| ap.is_free())
            .collect()
    }

    fn bound_attachment_points(&self) -> Vec<&AttachmentPoint> {
        self.attachment_points()
            .iter()
            .filter(|ap| !ap.is_free())
            .collect()
    }

    fn free_count(&self) -> usize {
        self.attachment_points()
            .iter()
            .filter(|ap| ap.is_free())
            .count()
    }
}

/// A building block with a label, e.g. a molecular fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    label: String,
    aps: Vec<AttachmentPoint>,
    symmetric_sets: Vec<Vec<usize>>,
}

impl Fragment {
    pub(crate) fn new(label: impl Into<String>, aps: Vec<AttachmentPoint>) -> Self {
        Self {
            label: label.into(),
            aps,
            symmetric_sets: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl HasAttachmentPoints for Fragment {
    fn attachment_points(&self) -> &[AttachmentPoint] {
        &self.aps
    }
}

/// A placeholder vertex: attachment points but no fragment content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyVertex {
    aps: Vec<AttachmentPoint>,
    symmetric_sets: Vec<Vec<usize>>,
}

impl EmptyVertex {
    pub(crate) fn new(aps: Vec<AttachmentPoint>) -> Self {
        Self {
            aps,
            symmetric_sets: Vec::new(),
        }
    }
}

impl HasAttachmentPoints for EmptyVertex {
    fn attachment_points(&self) -> &[AttachmentPoint] {
        &self.aps
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexKind {
    Fragment,
    Empty,
}

impl fmt::Display for VertexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fragment => write!(f, "Fragment"),
            Self::Empty => write!(f, "Empty"),
        }
    }
}

/// A node of the assembly graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Vertex {
    Fragment(Fragment),
    Empty(EmptyVertex),
}

impl Vertex {
    pub fn kind(&self) -> VertexKind {
        match self {
            Self::Fragment(_) => VertexKind::Fragment,
            Self::Empty(_) => VertexKind::Empty,
        }
    }

    /// Fragment label, or [`EMPTY_VERTEX_LABEL`] for empty vertices.
    pub fn label(&self) -> &str {
        match self {
            Self::Fragment(frag) => frag.label(),
            Self::Empty(_) => EMPTY_VERTEX_LABEL,
        }
    }

    pub fn ap_count(&self) -> usize {
        self.attachment_points().len()
    }

    pub fn attachment_point(&self, index: usize) -> Option<&AttachmentPoint> {
        self.attachment_points().get(index)
    }

    /// Groups of AP indices that are symmetry-equivalent on this vertex.
    pub fn symmetric_sets(&self) -> &[Vec<usize>] {
        match self {
            Self::Fragment(frag) => &frag.symmetric_sets,
            Self::Empty(empty) => &empty.symmetric_sets,
        }
    }

    /// The other members of the symmetric set containing AP `index`.
    pub fn symmetric_partners(&self, index: usize) -> Vec<usize> {
        self.symmetric_sets()
            .iter()
            .find(|set| set.contains(&index))
            .map(|set| set.iter().copied().filter(|&i| i != index).collect())
            .unwrap_or_default()
    }

    pub(crate) fn attachment_points_mut(&mut self) -> &mut [AttachmentPoint] {
        match self {
            Self::Fragment(frag) => &mut frag.aps,
            Self::Empty(empty) => &mut empty.aps,
        }
    }

    pub(crate) fn set_symmetric_sets(&mut self, sets: Vec<Vec<usize>>) {
        match self {
            Self::Fragment(frag) => frag.symmetric_sets = sets,
            Self::Empty(empty) => empty.symmetric_sets = sets,
        }
    }
}

impl HasAttachmentPoints for Vertex {
    fn attachment_points(&self) -> &[AttachmentPoint] {
        match self {
            Self::Fragment(frag) => frag.attachment_points(),
            Self::Empty(empty) => empty.attachment_points(),
        }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (", self.kind(), self.label())?;
        for (i, ap) in self.attachment_points().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", ap.label())?;
            if !ap.is_free() {
                write!(f, "*")?;
            }
        }
        write!(f, ")")
    }
}
