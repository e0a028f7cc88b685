use std::fs;

use serde::{Deserialize, Serialize};

use crate::graph::{ColorMap, Graph, VertexId};

/// one vertex of the JSON graph document
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonVertex {
    /// vertex id
    pub vid: VertexId,
    /// assigned color rendered as a string, absent when uncolored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// ids of adjacent vertices
    pub neighbors: Vec<VertexId>,
}

/// one edge of the JSON graph document
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonEdge {
    /// the two endpoint ids
    pub endpoints: [VertexId; 2],
    /// always false; kept for document compatibility
    #[serde(default)]
    pub directed: bool,
}

/// the JSON graph document
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonGraph {
    /// vertex records
    pub vertices: Vec<JsonVertex>,
    /// edge records
    pub edges: Vec<JsonEdge>,
}

impl JsonGraph {
    /** snapshots a graph (with any colors its vertices carry) into a
    document; neighbor lists hold live neighbors only. */
    pub fn from_graph(graph: &Graph) -> Self {
        let vertices = graph.vertex_ids().into_iter()
            .map(|id| JsonVertex {
                vid: id,
                label: graph.color_of(id).map(|c| c.to_string()),
                neighbors: graph.live_neighbors(id),
            })
            .collect();
        let edges = graph.edges().into_iter()
            .map(|(a, b)| JsonEdge { endpoints: [a, b], directed: false })
            .collect();
        JsonGraph { vertices, edges }
    }

    /** rebuilds the graph; labels that parse as numbers become vertex
    colors. Edges present in either the edge list or a neighbor list are
    added once. */
    pub fn to_graph(&self) -> Graph {
        let mut graph = Graph::new();
        for v in &self.vertices {
            graph.add_vertex(v.vid);
        }
        for v in &self.vertices {
            if let Some(c) = v.label.as_ref().and_then(|l| l.parse::<usize>().ok()) {
                graph.set_color(v.vid, c);
            }
            for &w in &v.neighbors {
                graph.add_edge(v.vid, w);
            }
        }
        for e in &self.edges {
            graph.add_edge(e.endpoints[0], e.endpoints[1]);
        }
        graph
    }

    /// the coloring carried by the document, as a color map
    pub fn colors(&self) -> ColorMap {
        self.vertices.iter()
            .filter_map(|v| {
                v.label.as_ref()
                    .and_then(|l| l.parse::<usize>().ok())
                    .map(|c| (v.vid, c))
            })
            .collect()
    }
}

/// reads a graph from a JSON document file
pub fn read_from_file(filename: &str) -> Graph {
    let raw = fs::read_to_string(filename)
        .unwrap_or_else(|_| panic!("json: unable to read file {}", filename));
    read_from_str(raw.as_str())
}

/// reads a graph from JSON text
pub fn read_from_str(s: &str) -> Graph {
    let doc: JsonGraph = serde_json::from_str(s).expect("json: malformed graph document");
    doc.to_graph()
}

/// writes a graph (with its colors) as JSON text
pub fn graph_to_string(graph: &Graph) -> String {
    serde_json::to_string_pretty(&JsonGraph::from_graph(graph))
        .expect("json: graph document serialization failed")
}

/// writes a graph into a JSON document file
pub fn write_to_file(graph: &Graph, filename: &str) {
    fs::write(filename, graph_to_string(graph))
        .unwrap_or_else(|_| panic!("json: unable to write the graph in {}", filename));
}


#[cfg(test)]
mod tests {
    use super::*;

    fn colored_path() -> Graph {
        let mut g = Graph::with_vertices(3);
        g.add_edge(1, 2);
        g.add_edge(2, 3);
        g.set_color(1, 1);
        g.set_color(2, 2);
        g.set_color(3, 1);
        g
    }

    #[test]
    fn test_round_trip_with_colors() {
        let g = colored_path();
        let back = read_from_str(graph_to_string(&g).as_str());
        assert_eq!(back.nb_vertices(), 3);
        assert_eq!(back.nb_edges(), 2);
        assert_eq!(back.edges(), g.edges());
        for id in 1..=3 {
            assert_eq!(back.color_of(id), g.color_of(id));
        }
    }

    #[test]
    fn test_uncolored_vertices_have_no_label() {
        let mut g = Graph::with_vertices(2);
        g.add_edge(1, 2);
        let doc = JsonGraph::from_graph(&g);
        assert!(doc.vertices.iter().all(|v| v.label.is_none()));
        assert_eq!(doc.edges.len(), 1);
        assert!(!doc.edges[0].directed);
    }

    #[test]
    fn test_colors_extraction() {
        let doc = JsonGraph::from_graph(&colored_path());
        let colors = doc.colors();
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[&2], 2);
    }

    #[test]
    fn test_document_without_edge_list() {
        // neighbor lists alone are enough to rebuild the edges
        let s = r#"{
            "vertices": [
                {"vid": 1, "neighbors": [2]},
                {"vid": 2, "neighbors": [1]}
            ],
            "edges": []
        }"#;
        let g = read_from_str(s);
        assert_eq!(g.nb_vertices(), 2);
        assert_eq!(g.nb_edges(), 1);
    }
}
