//! Indented text view of an assembly, walked from a root vertex.
//!
//! Each vertex is followed by its APs one level deeper. A bound AP whose far
//! vertex has not been printed yet opens that vertex one depth further down.
//! Every edge is expanded or reported as a ring closure exactly once per call;
//! its other side is shown as already seen.
//!
//! ```text
//! Fragment H [0]
//!     AP a [0:0] -> [2:0]
//!         Fragment C [2]
//!             AP a [2:0] -> [0:0] (seen)
//!             AP a [2:1] -> [1:0]
//!                 Fragment H [1]
//!                     AP a [1:0] -> [2:1] (seen)
//!             AP a [2:2] free
//!             AP a [2:3] free
//! ```

use std::fmt::Write as _;

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use crate::assembly::Assembly;
use crate::attachment::ApId;
use crate::vertex::HasAttachmentPoints;

/// Layout settings for [`render_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Characters per indentation level.
    pub indent_width: usize,
    pub indent_char: char,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            indent_char: ' ',
        }
    }
}

/// How a bound AP line relates to the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    Free,
    /// The far vertex is expanded directly below this line.
    Expanded(ApId),
    /// The edge was already expanded, typically the way back to the parent.
    Seen(ApId),
    /// The far vertex was already printed through another path.
    RingClosure(ApId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Vertex(NodeIndex),
    AttachmentPoint { ap: ApId, link: Link },
}

/// One line of a rendering before indentation is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// Vertex depth below the root.
    pub depth: usize,
    /// Indentation level: `2 * depth` for vertices, one more for their APs.
    pub level: usize,
    pub kind: LineKind,
    pub text: String,
}

pub fn render(asm: &Assembly, root: NodeIndex) -> String {
    render_with(asm, root, &RenderOptions::default())
}

pub fn render_with(asm: &Assembly, root: NodeIndex, options: &RenderOptions) -> String {
    let unit: String = std::iter::repeat(options.indent_char)
        .take(options.indent_width)
        .collect();
    let mut out = String::new();
    for line in render_lines(asm, root) {
        for _ in 0..line.level {
            out.push_str(&unit);
        }
        out.push_str(&line.text);
        out.push('\n');
    }
    out
}

/// Produces the rendering as structured lines.
///
/// # Panics
///
/// Panics if `root` is not a vertex of `asm`.
pub fn render_lines(asm: &Assembly, root: NodeIndex) -> Vec<RenderedLine> {
    assert!(
        asm.contains_vertex(root),
        "root vertex {} is not in the assembly",
        root.index()
    );

    let mut printed = vec![false; asm.vertex_count()];
    let mut handled = vec![false; asm.edge_count()];
    let mut lines = Vec::new();

    // (vertex, next AP index, depth)
    let mut stack: Vec<(NodeIndex, usize, usize)> = Vec::new();
    printed[root.index()] = true;
    lines.push(vertex_line(asm, root, 0));
    stack.push((root, 0, 0));

    while let Some(frame) = stack.last_mut() {
        let (v, next, depth) = *frame;
        let aps = asm.vertex(v).attachment_points();
        if next >= aps.len() {
            stack.pop();
            continue;
        }
        frame.1 += 1;

        let ap = &aps[next];
        let link = match (ap.bound_edge(), asm.opposite(ap.id())) {
            (Some(edge), Some(other)) if handled[edge.index()] => Link::Seen(other),
            (Some(edge), Some(other)) => {
                handled[edge.index()] = true;
                if printed[other.vertex.index()] {
                    Link::RingClosure(other)
                } else {
                    Link::Expanded(other)
                }
            }
            _ => Link::Free,
        };

        lines.push(ap_line(ap.label(), ap.id(), link, depth));

        if let Link::Expanded(other) = link {
            printed[other.vertex.index()] = true;
            lines.push(vertex_line(asm, other.vertex, depth + 1));
            stack.push((other.vertex, 0, depth + 1));
        }
    }

    lines
}

fn vertex_line(asm: &Assembly, v: NodeIndex, depth: usize) -> RenderedLine {
    let vertex = asm.vertex(v);
    RenderedLine {
        depth,
        level: 2 * depth,
        kind: LineKind::Vertex(v),
        text: format!("{} {} [{}]", vertex.kind(), vertex.label(), v.index()),
    }
}

fn ap_line(label: &str, ap: ApId, link: Link, depth: usize) -> RenderedLine {
    let mut text = format!("AP {} [{}:{}]", label, ap.vertex.index(), ap.index);
    // writing to a String cannot fail
    let _ = match link {
        Link::Free => write!(text, " free"),
        Link::Expanded(o) => write!(text, " -> [{}:{}]", o.vertex.index(), o.index),
        Link::Seen(o) => write!(text, " -> [{}:{}] (seen)", o.vertex.index(), o.index),
        Link::RingClosure(o) => {
            write!(text, " -> [{}:{}] (ring closure)", o.vertex.index(), o.index)
        }
    };
    RenderedLine {
        depth,
        level: 2 * depth + 1,
        kind: LineKind::AttachmentPoint { ap, link },
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_vertex() {
        let mut asm = Assembly::new();
        let v = asm.add_fragment("O", &["x", "y"]);
        assert_eq!(
            render(&asm, v),
            "Fragment O [0]\n    AP x [0:0] free\n    AP y [0:1] free\n"
        );
    }

    #[test]
    fn custom_indent() {
        let mut asm = Assembly::new();
        let a = asm.add_fragment("A", &["a"]);
        let b = asm.add_empty_vertex(&["a"]);
        asm.join(a, b).unwrap();
        let opts = RenderOptions {
            indent_width: 1,
            indent_char: '.',
        };
        assert_eq!(
            render_with(&asm, a, &opts),
            "Fragment A [0]\n.AP a [0:0] -> [1:0]\n..Empty * [1]\n...AP a [1:0] -> [0:0] (seen)\n"
        );
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let opts: RenderOptions = serde_json::from_str(r#"{"indent_width": 2}"#).unwrap();
        assert_eq!(opts.indent_width, 2);
        assert_eq!(opts.indent_char, ' ');
    }
}
