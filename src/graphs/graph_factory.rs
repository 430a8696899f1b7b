use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};

use super::{builder::GraphBuilder, edge::WeightedEdge, weighted_graph::WeightedGraph, Weight};
use crate::error::{GraphError, LoadError};

/// Serialized graph document, shared by the json and bincode formats.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphFile {
    /// If false, every edge is added in both directions.
    #[serde(default = "default_directed")]
    pub directed: bool,
    /// Optional explicit vertex list. If empty, vertices are taken from the
    /// edges in order of first appearance.
    #[serde(default)]
    pub vertices: Vec<String>,
    pub edges: Vec<WeightedEdge<String>>,
}

fn default_directed() -> bool {
    true
}

impl GraphFile {
    pub fn from_graph(graph: &WeightedGraph<String>) -> GraphFile {
        GraphFile {
            directed: true,
            vertices: graph.vertices().cloned().collect(),
            edges: graph.edges().collect(),
        }
    }

    pub fn into_graph(self) -> Result<WeightedGraph<String>, GraphError> {
        let mut builder = GraphBuilder::new();
        if self.vertices.is_empty() {
            self.edges.iter().for_each(|edge| {
                builder.add_vertex(edge.tail.clone());
                builder.add_vertex(edge.head.clone());
            });
        } else {
            builder.add_vertices(self.vertices);
        }

        for edge in self.edges {
            if self.directed {
                builder.add_edge(edge.tail, edge.head, edge.weight);
            } else {
                builder.add_edge_bidirectional(edge.tail, edge.head, edge.weight);
            }
        }

        builder.build()
    }
}

/// Loads graphs with string vertex ids from `.txt`/`.el` edge lists, `.json`
/// and `.bincode` files.
#[derive(Clone)]
pub struct GraphFactory {}

impl GraphFactory {
    pub fn from_file(path: &Path) -> Result<WeightedGraph<String>, LoadError> {
        match extension(path).as_str() {
            "txt" | "el" => Self::from_edge_list_file(path),
            "json" => Self::from_json_file(path),
            "bincode" => Self::from_bincode_file(path),
            other => Err(LoadError::UnknownExtension {
                extension: other.to_string(),
            }),
        }
    }

    pub fn to_file(graph: &WeightedGraph<String>, path: &Path) -> Result<(), LoadError> {
        let graph_file = GraphFile::from_graph(graph);
        match extension(path).as_str() {
            "json" => {
                let writer = BufWriter::new(File::create(path)?);
                serde_json::to_writer(writer, &graph_file)?;
            }
            "bincode" => {
                let writer = BufWriter::new(File::create(path)?);
                bincode::serialize_into(writer, &graph_file)?;
            }
            other => {
                return Err(LoadError::UnknownExtension {
                    extension: other.to_string(),
                })
            }
        }
        Ok(())
    }

    pub fn from_edge_list_file(path: &Path) -> Result<WeightedGraph<String>, LoadError> {
        let reader = BufReader::new(File::open(path)?);
        Self::from_edge_list(reader)
    }

    /// Parses an edge list.
    ///
    /// Lines starting with `#` and blank lines are skipped. `vertex <name>`
    /// declares a vertex, `undirected` switches every following edge to both
    /// directions, and any other line is `tail head weight`.
    pub fn from_edge_list<R: BufRead>(reader: R) -> Result<WeightedGraph<String>, LoadError> {
        let mut builder = GraphBuilder::new();
        let mut undirected = false;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let values: Vec<&str> = line.split_whitespace().collect();
            match values.as_slice() {
                ["undirected"] => undirected = true,
                ["vertex", name] => {
                    builder.add_vertex(name.to_string());
                }
                [tail, head, weight] => {
                    let weight: Weight = weight.parse().map_err(|_| LoadError::Parse {
                        line: line_number,
                        reason: format!("unable to parse weight {:?}", weight),
                    })?;
                    builder.add_vertex(tail.to_string());
                    builder.add_vertex(head.to_string());
                    if undirected {
                        builder.add_edge_bidirectional(tail.to_string(), head.to_string(), weight);
                    } else {
                        builder.add_edge(tail.to_string(), head.to_string(), weight);
                    }
                }
                _ => {
                    return Err(LoadError::Parse {
                        line: line_number,
                        reason: format!("expected `tail head weight`, found {:?}", line),
                    })
                }
            }
        }

        Ok(builder.build()?)
    }

    pub fn from_json_file(path: &Path) -> Result<WeightedGraph<String>, LoadError> {
        let reader = BufReader::new(File::open(path)?);
        let graph_file: GraphFile = serde_json::from_reader(reader)?;
        Ok(graph_file.into_graph()?)
    }

    pub fn from_bincode_file(path: &Path) -> Result<WeightedGraph<String>, LoadError> {
        let reader = BufReader::new(File::open(path)?);
        let graph_file: GraphFile = bincode::deserialize_from(reader)?;
        Ok(graph_file.into_graph()?)
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn edge_list_with_comments_and_undirected_section() {
        let input = "# a comment\n\nA B 4\nundirected\nB C 1.5\nvertex Z\n";
        let graph = GraphFactory::from_edge_list(input.as_bytes()).unwrap();
        assert_eq!(graph.number_of_vertices(), 4);
        assert_eq!(graph.get_edge_weight(&"A".to_string(), &"B".to_string()), Some(4.0));
        assert_eq!(graph.get_edge_weight(&"B".to_string(), &"A".to_string()), None);
        assert_eq!(graph.get_edge_weight(&"C".to_string(), &"B".to_string()), Some(1.5));
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let input = "A B 1\nA B\n";
        match GraphFactory::from_edge_list(input.as_bytes()) {
            Err(LoadError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn negative_weight_in_file_is_rejected() {
        let input = "A B -3\n";
        assert!(matches!(
            GraphFactory::from_edge_list(input.as_bytes()),
            Err(LoadError::Graph(GraphError::NegativeWeight { .. }))
        ));
    }

    #[test]
    fn json_document_with_undeclared_vertex_is_invalid() {
        let json = r#"{"vertices": ["A"], "edges": [{"tail": "A", "head": "B", "weight": 1.0}]}"#;
        let graph_file: GraphFile = serde_json::from_str(json).unwrap();
        assert!(matches!(
            graph_file.into_graph(),
            Err(GraphError::InvalidGraph { .. })
        ));
    }

    #[test]
    fn undirected_json_document() {
        let json = r#"{"directed": false, "edges": [{"tail": "A", "head": "B", "weight": 2.0}]}"#;
        let graph = serde_json::from_str::<GraphFile>(json)
            .unwrap()
            .into_graph()
            .unwrap();
        assert!(graph.is_bidirectional());
        assert_eq!(graph.number_of_edges(), 2);
    }

    fn sample_graph() -> WeightedGraph<String> {
        let input = "undirected\nA B 4\nA C 2\nvertex Z\n";
        GraphFactory::from_edge_list(input.as_bytes()).unwrap()
    }

    fn assert_same_graph(left: &WeightedGraph<String>, right: &WeightedGraph<String>) {
        assert_eq!(
            left.vertices().collect::<Vec<_>>(),
            right.vertices().collect::<Vec<_>>()
        );
        assert_eq!(left.edges().collect::<Vec<_>>(), right.edges().collect::<Vec<_>>());
    }

    #[test]
    fn json_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.json");
        let graph = sample_graph();

        GraphFactory::to_file(&graph, &path).unwrap();
        let read = GraphFactory::from_file(&path).unwrap();
        assert_same_graph(&graph, &read);
        assert_eq!(read.number_of_vertices(), 4);
    }

    #[test]
    fn bincode_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.bincode");
        let graph = sample_graph();

        GraphFactory::to_file(&graph, &path).unwrap();
        let read = GraphFactory::from_file(&path).unwrap();
        assert_same_graph(&graph, &read);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.gr");
        let graph = sample_graph();

        assert!(matches!(
            GraphFactory::to_file(&graph, &path),
            Err(LoadError::UnknownExtension { extension }) if extension == "gr"
        ));
        assert!(matches!(
            GraphFactory::from_file(&path),
            Err(LoadError::UnknownExtension { extension }) if extension == "gr"
        ));
        // edge lists are read only
        assert!(matches!(
            GraphFactory::to_file(&graph, &dir.path().join("graph.txt")),
            Err(LoadError::UnknownExtension { .. })
        ));
    }
}
