//! Reads road networks from GML (networkx style) or JSON files.

use crate::error::{Result, TrafficError};
use crate::graph::edge::Edge;
use crate::graph::graph::{Graph, GraphBuilder};
use log::{info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub fn load_graph(path: &Path) -> Result<Graph> {
    if !path.is_file() {
        return Err(TrafficError::input(format!(
            "graph file '{}' does not exist",
            path.display()
        )));
    }
    let source = fs::read_to_string(path).map_err(|e| {
        TrafficError::input(format!("cannot read graph file '{}': {}", path.display(), e))
    })?;
    let graph = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_json(&source),
        _ => parse_gml(&source),
    }
    .map_err(|e| TrafficError::input(format!("{}: {}", path.display(), e)))?;

    info!(
        "loaded '{}': {} nodes, {} edges",
        path.display(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

#[derive(Deserialize)]
struct JsonGraph {
    #[serde(default)]
    nodes: Vec<String>,
    edges: Vec<JsonEdge>,
}

#[derive(Deserialize)]
struct JsonEdge {
    from: String,
    to: String,
    #[serde(default = "default_a")]
    a: f64,
    #[serde(default = "default_b")]
    b: f64,
}

fn default_a() -> f64 {
    Edge::DEFAULT_A
}

fn default_b() -> f64 {
    Edge::DEFAULT_B
}

pub fn parse_json(source: &str) -> Result<Graph> {
    let raw: JsonGraph = serde_json::from_str(source)
        .map_err(|e| TrafficError::input(format!("invalid graph JSON: {}", e)))?;
    let mut builder = GraphBuilder::new();
    raw.nodes.iter().for_each(|n| {
        builder.add_node(n);
    });
    for edge in &raw.edges {
        builder.add_edge(&edge.from, &edge.to, edge.a, edge.b)?;
    }
    Ok(builder.build())
}

#[derive(Debug, Clone, PartialEq)]
enum GmlValue {
    /// parsed value and the token as written
    Number(f64, String),
    Text(String),
    List(Vec<(String, GmlValue)>),
}

impl GmlValue {
    /// Key form used to match edge endpoints against node ids.
    fn as_key(&self) -> Option<String> {
        match self {
            GmlValue::Number(_, raw) => Some(raw.clone()),
            GmlValue::Text(s) => Some(s.clone()),
            GmlValue::List(_) => None,
        }
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    Open,
    Close,
    Text(String),
    Word(String),
}

fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();
    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '#' => {
                while chars.next_if(|&c| c != '\n').is_some() {}
            }
            '[' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ']' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '"' => {
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(c) => text.push(c),
                        None => return Err(TrafficError::input("unterminated string in GML")),
                    }
                }
                tokens.push(Token::Text(text));
            }
            _ => {
                let mut word = String::new();
                while let Some(c) =
                    chars.next_if(|&c| !c.is_whitespace() && !matches!(c, '[' | ']' | '"'))
                {
                    word.push(c);
                }
                tokens.push(Token::Word(word));
            }
        }
    }
    Ok(tokens)
}

fn parse_list(
    tokens: &mut std::iter::Peekable<std::vec::IntoIter<Token>>,
    nested: bool,
) -> Result<Vec<(String, GmlValue)>> {
    let mut entries = Vec::new();
    loop {
        let key = match tokens.next() {
            Some(Token::Word(key)) => key,
            Some(Token::Close) if nested => return Ok(entries),
            None if !nested => return Ok(entries),
            None => return Err(TrafficError::input("unbalanced '[' in GML")),
            Some(other) => {
                return Err(TrafficError::input(format!(
                    "expected a GML key, found {:?}",
                    other
                )));
            }
        };
        let value = match tokens.next() {
            Some(Token::Open) => GmlValue::List(parse_list(tokens, true)?),
            Some(Token::Text(text)) => GmlValue::Text(text),
            Some(Token::Word(word)) => match word.parse::<f64>() {
                Ok(n) => GmlValue::Number(n, word),
                Err(_) => GmlValue::Text(word),
            },
            _ => {
                return Err(TrafficError::input(format!(
                    "GML key '{}' has no value",
                    key
                )));
            }
        };
        entries.push((key, value));
    }
}

fn field<'a>(entries: &'a [(String, GmlValue)], key: &str) -> Option<&'a GmlValue> {
    entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

fn coefficient(entries: &[(String, GmlValue)], key: &str, default: f64) -> Result<f64> {
    match field(entries, key) {
        None => Ok(default),
        Some(GmlValue::Number(n, _)) => Ok(*n),
        Some(other) => Err(TrafficError::input(format!(
            "edge attribute '{}' must be numeric, got {:?}",
            key, other
        ))),
    }
}

pub fn parse_gml(source: &str) -> Result<Graph> {
    let mut tokens = tokenize(source)?.into_iter().peekable();
    let top = parse_list(&mut tokens, false)?;
    let body = match field(&top, "graph") {
        Some(GmlValue::List(body)) => body,
        _ => return Err(TrafficError::input("GML file has no 'graph [ ... ]' block")),
    };

    if !matches!(field(body, "directed"), Some(GmlValue::Number(d, _)) if *d == 1.0) {
        warn!("GML graph is not marked 'directed 1'; edges are read as directed anyway");
    }

    let mut builder = GraphBuilder::new();
    let mut id_to_name: HashMap<String, String> = HashMap::new();
    for (_, node) in body.iter().filter(|(k, _)| k == "node") {
        let GmlValue::List(attrs) = node else {
            return Err(TrafficError::input("GML 'node' must be a list"));
        };
        let id = field(attrs, "id")
            .and_then(GmlValue::as_key)
            .ok_or_else(|| TrafficError::input("GML node without an 'id'"))?;
        let name = field(attrs, "label")
            .and_then(GmlValue::as_key)
            .unwrap_or_else(|| id.clone());
        if id_to_name.values().any(|n| *n == name) {
            return Err(TrafficError::input(format!("duplicate node '{}'", name)));
        }
        builder.add_node(&name);
        id_to_name.insert(id, name);
    }

    for (_, edge) in body.iter().filter(|(k, _)| k == "edge") {
        let GmlValue::List(attrs) = edge else {
            return Err(TrafficError::input("GML 'edge' must be a list"));
        };
        let endpoint = |key: &str| -> Result<String> {
            let id = field(attrs, key)
                .and_then(GmlValue::as_key)
                .ok_or_else(|| TrafficError::input(format!("GML edge without '{}'", key)))?;
            id_to_name.get(&id).cloned().ok_or_else(|| {
                TrafficError::input(format!("GML edge references unknown node id {}", id))
            })
        };
        let from = endpoint("source")?;
        let to = endpoint("target")?;
        let a = coefficient(attrs, "a", Edge::DEFAULT_A)?;
        let b = coefficient(attrs, "b", Edge::DEFAULT_B)?;
        builder.add_edge(&from, &to, a, b)?;
    }

    Ok(builder.build())
}
