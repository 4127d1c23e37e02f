//! Graph documents in the DENOPTIM JSON layout.
//!
//! ```json
//! {
//!   "graphId": 1,
//!   "gVertices": [
//!     { "vertexId": 1, "vertexType": "MolecularFragment", "label": "C",
//!       "lstAPs": [ {"id": 1, "apClass": "a"}, {"id": 2, "apClass": "a"} ],
//!       "lstSymAPs": [ [1, 2] ] }
//!   ],
//!   "gEdges": [ {"srcAPID": 1, "trgAPID": 7} ]
//! }
//! ```
//!
//! Symmetric AP sets are read in both layouts that exist in the wild: lists of
//! AP ids (current) and `{"symIds": [...]}` records holding AP indices into
//! `lstAPs` (older files). Documents are always written with AP ids.
//!
//! An `apClass` is either a plain label or the structured
//! `{"rule": "C", "subClass": 0, ...}` record, which is read as `"C:0"`.
//! `Template` vertices are recognized but cannot be loaded.

pub mod error;

use std::collections::{HashMap, HashSet};

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assembly::Assembly;
use crate::attachment::ApId;
use crate::traversal::{discover, Graph};
use crate::vertex::{HasAttachmentPoints, Vertex};
pub use error::JsonGraphError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(rename = "graphId", default)]
    pub graph_id: i64,
    #[serde(rename = "gVertices")]
    pub vertices: Vec<VertexRecord>,
    #[serde(rename = "gEdges", default)]
    pub edges: Vec<EdgeRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VertexType {
    #[default]
    #[serde(rename = "MolecularFragment", alias = "Fragment")]
    Fragment,
    EmptyVertex,
    Template,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VertexRecord {
    #[serde(rename = "vertexId")]
    pub vertex_id: u32,
    #[serde(rename = "vertexType", default)]
    pub vertex_type: VertexType,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "lstAPs", default)]
    pub aps: Vec<ApRecord>,
    #[serde(rename = "lstSymAPs", default, skip_serializing_if = "Vec::is_empty")]
    pub symmetric_aps: Vec<SymmetricApRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApRecord {
    pub id: u32,
    #[serde(rename = "apClass")]
    pub ap_class: ApClassRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApClassRecord {
    Label(String),
    /// Structured class; extra keys such as `bndTyp` are ignored.
    Rule {
        rule: String,
        #[serde(rename = "subClass")]
        sub_class: i64,
    },
}

impl ApClassRecord {
    /// The AP label this class stands for.
    pub fn label(&self) -> String {
        match self {
            Self::Label(label) => label.clone(),
            Self::Rule { rule, sub_class } => format!("{rule}:{sub_class}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SymmetricApRecord {
    /// AP ids, as in `[3, 4]`.
    Ids(Vec<u32>),
    /// Positions in `lstAPs`, as in `{"symIds": [0, 1]}`.
    Indices {
        #[serde(rename = "symIds")]
        sym_ids: Vec<usize>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(rename = "srcAPID")]
    pub src_ap_id: u32,
    #[serde(rename = "trgAPID")]
    pub trg_ap_id: u32,
}

/// An assembly rebuilt from a document.
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    pub graph_id: i64,
    pub assembly: Assembly,
    /// Vertex handles in document order.
    pub vertices: Vec<NodeIndex>,
}

impl LoadedGraph {
    /// The first vertex of the document, if it has any.
    pub fn root(&self) -> Option<NodeIndex> {
        self.vertices.first().copied()
    }

    /// Writes the graph reachable from [`root`](Self::root) back out under the
    /// same `graphId`.
    pub fn to_json(&self) -> Result<String, JsonGraphError> {
        let doc = match self.root() {
            Some(root) => GraphDocument::from_graph(
                &self.assembly,
                &discover(&self.assembly, root),
                self.graph_id,
            )?,
            None => GraphDocument {
                graph_id: self.graph_id,
                vertices: Vec::new(),
                edges: Vec::new(),
            },
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }
}

/// The 1-based document id of the item at `pos`.
fn document_id(pos: usize) -> Result<u32, JsonGraphError> {
    pos.checked_add(1)
        .and_then(|id| u32::try_from(id).ok())
        .ok_or(JsonGraphError::IdOverflow(pos))
}

impl GraphDocument {
    /// Describes the vertices of `graph` and the edges among them.
    ///
    /// Vertex ids follow discovery order starting at 1; AP ids are numbered
    /// from 1 across the whole document.
    pub fn from_graph(
        asm: &Assembly,
        graph: &Graph,
        graph_id: i64,
    ) -> Result<Self, JsonGraphError> {
        let mut ap_ids: HashMap<ApId, u32> = HashMap::new();
        let mut ap_count = 0usize;
        let mut vertices = Vec::with_capacity(graph.len());

        for (pos, &v) in graph.vertices().iter().enumerate() {
            let vertex = asm.vertex(v);
            let mut aps = Vec::with_capacity(vertex.ap_count());
            for ap in vertex.attachment_points() {
                let id = document_id(ap_count)?;
                ap_ids.insert(ap.id(), id);
                aps.push(ApRecord {
                    id,
                    ap_class: ApClassRecord::Label(ap.label().to_string()),
                });
                ap_count += 1;
            }
            let symmetric_aps = vertex
                .symmetric_sets()
                .iter()
                .map(|set| SymmetricApRecord::Ids(set.iter().map(|&i| aps[i].id).collect()))
                .collect();
            let (vertex_type, label) = match vertex {
                Vertex::Fragment(frag) => (VertexType::Fragment, frag.label().to_string()),
                Vertex::Empty(_) => (VertexType::EmptyVertex, String::new()),
            };
            vertices.push(VertexRecord {
                vertex_id: document_id(pos)?,
                vertex_type,
                label,
                aps,
                symmetric_aps,
            });
        }

        let edges = graph
            .edges(asm)
            .into_iter()
            .filter_map(|e| {
                let (a, b) = asm.edge(e).endpoints();
                Some(EdgeRecord {
                    src_ap_id: *ap_ids.get(&a)?,
                    trg_ap_id: *ap_ids.get(&b)?,
                })
            })
            .collect();

        Ok(Self {
            graph_id,
            vertices,
            edges,
        })
    }

    /// Rebuilds the described vertices and edges in a fresh [`Assembly`].
    pub fn build(&self) -> Result<LoadedGraph, JsonGraphError> {
        let mut asm = Assembly::new();
        let mut nodes = Vec::with_capacity(self.vertices.len());
        let mut vertex_ids = HashSet::new();
        let mut ap_map: HashMap<u32, ApId> = HashMap::new();

        for record in &self.vertices {
            if !vertex_ids.insert(record.vertex_id) {
                return Err(JsonGraphError::DuplicateVertexId(record.vertex_id));
            }
            let labels: Vec<String> = record.aps.iter().map(|ap| ap.ap_class.label()).collect();
            let node = match record.vertex_type {
                VertexType::Fragment => asm.add_fragment(&record.label, &labels),
                VertexType::EmptyVertex => asm.add_empty_vertex(&labels),
                VertexType::Template => {
                    return Err(JsonGraphError::UnsupportedVertexType {
                        vertex_id: record.vertex_id,
                        vertex_type: record.vertex_type,
                    })
                }
            };
            for (i, ap) in record.aps.iter().enumerate() {
                if ap_map.insert(ap.id, ApId::new(node, i)).is_some() {
                    return Err(JsonGraphError::DuplicateApId(ap.id));
                }
            }
            if !record.symmetric_aps.is_empty() {
                let sets = record
                    .symmetric_aps
                    .iter()
                    .map(|set| resolve_symmetric_set(record, set))
                    .collect::<Result<Vec<_>, _>>()?;
                asm.set_symmetric_sets(node, sets)?;
            }
            nodes.push(node);
        }

        for edge in &self.edges {
            let src = *ap_map
                .get(&edge.src_ap_id)
                .ok_or(JsonGraphError::UnknownApId(edge.src_ap_id))?;
            let trg = *ap_map
                .get(&edge.trg_ap_id)
                .ok_or(JsonGraphError::UnknownApId(edge.trg_ap_id))?;
            asm.bind(src, trg)?;
        }

        debug!(
            graph_id = self.graph_id,
            vertices = asm.vertex_count(),
            edges = asm.edge_count(),
            "loaded graph document"
        );

        Ok(LoadedGraph {
            graph_id: self.graph_id,
            assembly: asm,
            vertices: nodes,
        })
    }
}

fn resolve_symmetric_set(
    record: &VertexRecord,
    set: &SymmetricApRecord,
) -> Result<Vec<usize>, JsonGraphError> {
    match set {
        SymmetricApRecord::Ids(ids) => ids
            .iter()
            .map(|&id| {
                record
                    .aps
                    .iter()
                    .position(|ap| ap.id == id)
                    .ok_or(JsonGraphError::UnknownApId(id))
            })
            .collect(),
        SymmetricApRecord::Indices { sym_ids } => sym_ids
            .iter()
            .map(|&index| {
                if index < record.aps.len() {
                    Ok(index)
                } else {
                    Err(JsonGraphError::SymmetricIndexOutOfRange {
                        vertex_id: record.vertex_id,
                        index,
                    })
                }
            })
            .collect(),
    }
}

/// Serializes the graph reachable from `root` as a pretty-printed document
/// with `graphId` 0. Use [`LoadedGraph::to_json`] to keep a loaded id.
pub fn to_json(asm: &Assembly, root: NodeIndex) -> Result<String, JsonGraphError> {
    let doc = GraphDocument::from_graph(asm, &discover(asm, root), 0)?;
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn from_json(s: &str) -> Result<LoadedGraph, JsonGraphError> {
    let doc: GraphDocument = serde_json::from_str(s)?;
    doc.build()
}
