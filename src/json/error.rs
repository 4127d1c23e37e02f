use std::fmt;

use crate::assembly::AssemblyError;

use super::VertexType;

/// Errors produced when reading or writing a graph document.
#[derive(Debug)]
pub enum JsonGraphError {
    /// The text is not valid JSON or does not have the document shape.
    Parse(serde_json::Error),
    /// Two vertex records share a `vertexId`.
    DuplicateVertexId(u32),
    /// Two AP records share an `id`.
    DuplicateApId(u32),
    /// An edge or symmetric set refers to an AP id no vertex declares.
    UnknownApId(u32),
    /// A legacy index-based symmetric set points past the vertex's AP list.
    SymmetricIndexOutOfRange { vertex_id: u32, index: usize },
    /// A vertex type this crate cannot rebuild.
    UnsupportedVertexType { vertex_id: u32, vertex_type: VertexType },
    /// The item at this position has no `u32` document id.
    IdOverflow(usize),
    /// The records are well formed but describe an impossible assembly.
    Assembly(AssemblyError),
}

impl fmt::Display for JsonGraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "malformed graph document: {e}"),
            Self::DuplicateVertexId(id) => write!(f, "duplicate vertex id {id}"),
            Self::DuplicateApId(id) => write!(f, "duplicate attachment point id {id}"),
            Self::UnknownApId(id) => write!(f, "unknown attachment point id {id}"),
            Self::SymmetricIndexOutOfRange { vertex_id, index } => write!(
                f,
                "symmetric set on vertex {vertex_id} refers to attachment point index {index}"
            ),
            Self::UnsupportedVertexType { vertex_id, vertex_type } => {
                write!(f, "vertex {vertex_id} has unsupported type {vertex_type:?}")
            }
            Self::IdOverflow(pos) => write!(f, "no document id fits item {pos}"),
            Self::Assembly(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for JsonGraphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Assembly(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for JsonGraphError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<AssemblyError> for JsonGraphError {
    fn from(e: AssemblyError) -> Self {
        Self::Assembly(e)
    }
}
