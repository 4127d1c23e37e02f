use serde::Deserialize;

use fragcrab::{discover, from_json, render, to_json, GraphDocument, HasAttachmentPoints};

#[derive(Deserialize)]
struct GraphEntry {
    name: String,
    vertices: usize,
    edges: usize,
    ring_closures: usize,
    free_aps: usize,
    render: Vec<String>,
    document: GraphDocument,
}

fn load_entries() -> Vec<GraphEntry> {
    serde_json::from_str(include_str!("approval_data/graphs.json")).unwrap()
}

#[test]
fn approval_graph_documents() {
    let mut failures = Vec::new();
    for entry in load_entries() {
        let loaded = match entry.document.build() {
            Ok(l) => l,
            Err(e) => {
                failures.push(format!("[build] {}: {e}", entry.name));
                continue;
            }
        };
        let asm = &loaded.assembly;
        let root = loaded.root().unwrap();
        let graph = discover(asm, root);

        let free: usize = graph
            .vertices()
            .iter()
            .map(|&v| asm.vertex(v).free_count())
            .sum();
        let got = (
            graph.len(),
            graph.edges(asm).len(),
            graph.ring_closing_edges(asm).len(),
            free,
        );
        let expected = (entry.vertices, entry.edges, entry.ring_closures, entry.free_aps);
        if got != expected {
            failures.push(format!(
                "[counts] {}: expected {:?}, got {:?}",
                entry.name, expected, got
            ));
        }

        let text = render(asm, root);
        let lines: Vec<&str> = text.lines().collect();
        if lines != entry.render {
            failures.push(format!(
                "[render] {}: expected\n{}\ngot\n{}",
                entry.name,
                entry.render.join("\n"),
                text
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "{} approval failures:\n{}",
            failures.len(),
            failures.join("\n")
        );
    }
}

#[test]
fn approval_documents_survive_rewrite() {
    for entry in load_entries() {
        let loaded = entry.document.build().unwrap();
        let root = loaded.root().unwrap();
        let text = loaded.to_json().unwrap();
        let reloaded = from_json(&text).unwrap();
        assert_eq!(loaded.graph_id, reloaded.graph_id, "{}", entry.name);

        let before = discover(&loaded.assembly, root);
        let after = discover(&reloaded.assembly, reloaded.root().unwrap());
        assert_eq!(before.len(), after.len(), "{}", entry.name);
        assert_eq!(
            before.edges(&loaded.assembly).len(),
            after.edges(&reloaded.assembly).len(),
            "{}",
            entry.name
        );
        assert_eq!(
            before.ring_closing_edges(&loaded.assembly).len(),
            after.ring_closing_edges(&reloaded.assembly).len(),
            "{}",
            entry.name
        );
        // vertex numbering follows discovery order after a rewrite
        assert_eq!(
            render(&loaded.assembly, root).lines().count(),
            render(&reloaded.assembly, reloaded.root().unwrap()).lines().count(),
            "{}",
            entry.name
        );
    }
}

#[test]
fn symmetric_sets_come_back_as_ids() {
    let entry = load_entries()
        .into_iter()
        .find(|e| e.name == "cyclopropane_legacy_symmetry")
        .unwrap();
    let loaded = entry.document.build().unwrap();
    let text = to_json(&loaded.assembly, loaded.root().unwrap()).unwrap();
    let doc: GraphDocument = serde_json::from_str(&text).unwrap();
    let first = serde_json::to_value(&doc.vertices[0].symmetric_aps).unwrap();
    assert_eq!(first, serde_json::json!([[1, 2]]));
}

#[test]
fn broken_documents_are_rejected() {
    let cases = [
        (
            "duplicate vertex",
            r#"{"gVertices": [{"vertexId": 1, "lstAPs": []}, {"vertexId": 1, "lstAPs": []}]}"#,
            "duplicate vertex id 1",
        ),
        (
            "duplicate ap",
            r#"{"gVertices": [
                {"vertexId": 1, "lstAPs": [{"id": 4, "apClass": "a"}]},
                {"vertexId": 2, "lstAPs": [{"id": 4, "apClass": "a"}]}]}"#,
            "duplicate attachment point id 4",
        ),
        (
            "dangling edge",
            r#"{"gVertices": [{"vertexId": 1, "lstAPs": [{"id": 1, "apClass": "a"}]}],
                "gEdges": [{"srcAPID": 1, "trgAPID": 9}]}"#,
            "unknown attachment point id 9",
        ),
        (
            "self loop",
            r#"{"gVertices": [{"vertexId": 1, "lstAPs": [
                    {"id": 1, "apClass": "a"}, {"id": 2, "apClass": "a"}]}],
                "gEdges": [{"srcAPID": 1, "trgAPID": 2}]}"#,
            "cannot bind two attachment points of vertex 0",
        ),
        (
            "ap used twice",
            r#"{"gVertices": [
                {"vertexId": 1, "lstAPs": [{"id": 1, "apClass": "a"}]},
                {"vertexId": 2, "lstAPs": [{"id": 2, "apClass": "a"}, {"id": 3, "apClass": "a"}]}],
                "gEdges": [{"srcAPID": 1, "trgAPID": 2}, {"srcAPID": 1, "trgAPID": 3}]}"#,
            "attachment point v0:0 is already bound",
        ),
    ];
    for (name, doc, message) in cases {
        match from_json(doc) {
            Ok(_) => panic!("{name}: document was accepted"),
            Err(e) => assert_eq!(e.to_string(), message, "{name}"),
        }
    }
}
