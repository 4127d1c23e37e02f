//! Attachment-point graphs for combinatorial fragment assembly.
//!
//! Vertices carry a fixed list of labelled attachment points (APs). Joining two
//! vertices binds the first pair of compatible free APs with an edge. Graphs
//! are not stored; they are discovered from any root by following bound APs,
//! and walks stay finite when the connectivity contains rings.
//!
//! ```
//! use fragcrab::{discover, render, Assembly, JoinOutcome};
//!
//! let mut asm = Assembly::new();
//! let h1 = asm.add_fragment("H", &["a"]);
//! let h2 = asm.add_fragment("H", &["a"]);
//! let c = asm.add_fragment("C", &["a", "a", "a", "a"]);
//!
//! assert!(asm.join(h1, c).unwrap().is_joined());
//! assert!(asm.join(h2, c).unwrap().is_joined());
//! assert_eq!(asm.free_attachment_points(c).len(), 2);
//!
//! let graph = discover(&asm, h1);
//! assert_eq!(graph.len(), 3);
//! assert!(render(&asm, h1).starts_with("Fragment H [0]"));
//!
//! let lone = asm.add_fragment("O", &["b"]);
//! assert_eq!(asm.join(lone, c).unwrap(), JoinOutcome::NoMatch);
//! ```
//!
//! All mutation goes through `&mut Assembly`; share a finished assembly freely
//! between readers, and wrap one that is still being built in a lock if more
//! than one thread assembles it.

pub mod assembly;
pub mod attachment;
pub mod compat;
pub mod edge;
pub mod json;
pub mod render;
pub mod traversal;
pub mod vertex;

pub use assembly::{Assembly, AssemblyError, JoinOutcome};
pub use attachment::{ApId, AttachmentPoint};
pub use compat::{ApCompatibility, ExactLabel, SameRule};
pub use edge::{Edge, UnknownEndpoint};
pub use json::{from_json, to_json, GraphDocument, JsonGraphError, LoadedGraph};
pub use render::{render, render_lines, render_with, LineKind, Link, RenderOptions, RenderedLine};
pub use traversal::{components, discover, Graph};
pub use vertex::{EmptyVertex, Fragment, HasAttachmentPoints, Vertex, VertexKind};
