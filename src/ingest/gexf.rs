//! GEXF reader producing a [`TemporalGraph`]
//!
//! Reads `<attributes class="node|edge">` declarations, resolves each
//! `<attvalue for=.. value=..>` through them with typed coercion, and
//! collects `<spell start=.. end=..>` intervals.

use crate::error::FormatError;
use crate::graph::{NodeId, Properties, PropertyValue, Spell, TemporalEdge, TemporalGraph, TemporalNode};
use roxmltree::{Document, Node as XmlNode};
use std::collections::HashMap;

/// Declared type of a GEXF attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Integer,
    Double,
    Boolean,
    String,
}

impl AttributeType {
    /// Map a declared type tag; anything unrecognized is a string.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "integer" | "long" => Self::Integer,
            "double" | "float" => Self::Double,
            "boolean" => Self::Boolean,
            _ => Self::String,
        }
    }

    /// Coerce a raw value. Values that fail numeric coercion pass through
    /// as strings.
    pub fn coerce(self, raw: &str) -> PropertyValue {
        let trimmed = raw.trim();
        match self {
            Self::Integer => parse_integer(trimmed)
                .map(PropertyValue::Int)
                .unwrap_or_else(|| PropertyValue::String(raw.to_string())),
            Self::Double => match trimmed.parse::<f64>() {
                Ok(f) => PropertyValue::Float(f),
                Err(_) => PropertyValue::String(raw.to_string()),
            },
            Self::Boolean => PropertyValue::Bool(trimmed.eq_ignore_ascii_case("true")),
            Self::String => PropertyValue::String(raw.to_string()),
        }
    }
}

/// An `<attribute>` declaration
#[derive(Debug, Clone)]
struct AttributeDef {
    title: String,
    kind: AttributeType,
}

type AttributeDefs = HashMap<String, AttributeDef>;

/// Integers may be written with a fractional part; it is truncated.
fn parse_integer(raw: &str) -> Option<i64> {
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
}

/// Spell bound; missing or unparsable bounds are `0`.
fn bound(element: XmlNode, name: &str) -> i64 {
    element.attribute(name).and_then(|v| parse_integer(v.trim())).unwrap_or(0)
}

fn is_element(node: &XmlNode, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn child_elements<'a, 'input>(
    parent: XmlNode<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = XmlNode<'a, 'input>> {
    parent.children().filter(move |n| is_element(n, name))
}

/// `name` elements found directly under `element` or inside a `wrapper`
/// child, in document order.
fn entries<'a, 'input>(
    element: XmlNode<'a, 'input>,
    wrapper: &'static str,
    name: &'static str,
) -> impl Iterator<Item = XmlNode<'a, 'input>> {
    element.children().flat_map(move |child| {
        if is_element(&child, name) {
            vec![child]
        } else if is_element(&child, wrapper) {
            child_elements(child, name).collect()
        } else {
            Vec::new()
        }
    })
}

/// Read every `<attributes class=..>` block under the graph.
fn attribute_defs(graph: XmlNode) -> (AttributeDefs, AttributeDefs) {
    let mut node_defs = AttributeDefs::new();
    let mut edge_defs = AttributeDefs::new();

    for block in child_elements(graph, "attributes") {
        let defs = match block.attribute("class") {
            Some("edge") => &mut edge_defs,
            _ => &mut node_defs,
        };
        for attribute in child_elements(block, "attribute") {
            let Some(id) = attribute.attribute("id") else {
                continue;
            };
            defs.insert(
                id.to_string(),
                AttributeDef {
                    title: attribute.attribute("title").unwrap_or(id).to_string(),
                    kind: AttributeType::from_tag(attribute.attribute("type").unwrap_or("string")),
                },
            );
        }
    }

    (node_defs, edge_defs)
}

/// Resolve an element's `<attvalue>`s through the declarations.
///
/// Values whose `for` is undeclared are kept under that id as strings.
fn attvalues(element: XmlNode, defs: &AttributeDefs) -> Properties {
    let mut properties = Properties::new();
    for attvalue in entries(element, "attvalues", "attvalue") {
        let (Some(key), Some(raw)) = (attvalue.attribute("for"), attvalue.attribute("value")) else {
            continue;
        };
        match defs.get(key) {
            Some(def) => {
                properties.insert(def.title.clone(), def.kind.coerce(raw));
            }
            None => {
                properties.insert(key.to_string(), PropertyValue::String(raw.to_string()));
            }
        }
    }
    properties
}

/// Collect `<spell>`s; an element with no spells but its own
/// `start`/`end` attributes gets that single interval.
fn spells(element: XmlNode) -> Vec<Spell> {
    let collected: Vec<Spell> = entries(element, "spells", "spell")
        .map(|spell| Spell::new(bound(spell, "start"), bound(spell, "end")))
        .collect();

    if collected.is_empty() && (element.has_attribute("start") || element.has_attribute("end")) {
        return vec![Spell::new(bound(element, "start"), bound(element, "end"))];
    }
    collected
}

fn read_node(element: XmlNode, defs: &AttributeDefs) -> Option<TemporalNode> {
    let id = element.attribute("id")?;
    Some(TemporalNode {
        id: NodeId::from_string(id),
        label: element.attribute("label").unwrap_or(id).to_string(),
        attributes: attvalues(element, defs),
        spells: spells(element),
    })
}

fn read_edge(element: XmlNode, defs: &AttributeDefs) -> Option<TemporalEdge> {
    let source = element.attribute("source")?;
    let target = element.attribute("target")?;
    let weight = element
        .attribute("weight")
        .and_then(|w| w.trim().parse::<f64>().ok())
        .filter(|w| w.is_finite())
        .unwrap_or(1.0);

    Some(TemporalEdge {
        id: element.attribute("id").map(str::to_string),
        source: NodeId::from_string(source),
        target: NodeId::from_string(target),
        weight,
        attributes: attvalues(element, defs),
        spells: spells(element),
    })
}

/// Parse GEXF text.
///
/// Fails when the XML is malformed or has no `<graph>` element. Nodes
/// without an `id` and edges without endpoints are skipped.
pub fn parse_gexf(text: &str) -> Result<TemporalGraph, FormatError> {
    let doc = Document::parse(text)?;
    let graph = doc
        .descendants()
        .find(|n| is_element(n, "graph"))
        .ok_or(FormatError::MissingGraphElement)?;

    let (node_defs, edge_defs) = attribute_defs(graph);

    let nodes: Vec<TemporalNode> = child_elements(graph, "nodes")
        .flat_map(|container| child_elements(container, "node"))
        .filter_map(|element| read_node(element, &node_defs))
        .collect();

    let edges: Vec<TemporalEdge> = child_elements(graph, "edges")
        .flat_map(|container| child_elements(container, "edge"))
        .filter_map(|element| read_edge(element, &edge_defs))
        .collect();

    let mut temporal = TemporalGraph::new(nodes, edges);
    temporal.default_edge_type = graph.attribute("defaultedgetype").map(str::to_string);

    tracing::debug!(
        nodes = temporal.nodes.len(),
        edges = temporal.edges.len(),
        start = temporal.time_range.start,
        end = temporal.time_range.end,
        "gexf parsed"
    );

    Ok(temporal)
}
