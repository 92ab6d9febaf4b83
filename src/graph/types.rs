use serde::Serialize;

/// Id of the synthetic entry node every session starts from.
pub const ROOT_ID: &str = "Major Topics";
/// Display label of the root node.
pub const ROOT_LABEL: &str = "Major-Topics";

/// Visual classification attached to an element when it becomes visible.
///
/// This is styling information kept beside an element's data, so it is not
/// part of a node's serialized form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementClass {
	/// The root node.
	Root,
	/// A node revealed by expanding one of its sources.
	FollowingNode,
	/// An edge revealed by expanding its source.
	FollowingEdge,
	/// A node revealed through the incoming direction.
	FollowerNode,
	/// An edge revealed through the incoming direction.
	FollowerEdge,
}

/// A vertex of the network, as stored in the index or shown on screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
	/// Unique id, also the name shown for non-root nodes.
	pub id: String,
	/// Display label; only the root has one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Flavor text from the row that targeted this node.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub text: Option<String>,
	/// Styling class, set when the node is put on screen.
	#[serde(skip)]
	pub class: Option<ElementClass>,
	/// Set once the node has been tapped, never cleared.
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	pub expanded: bool,
}

impl Node {
	/// A node known only by its id.
	pub fn bare(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: None,
			text: None,
			class: None,
			expanded: false,
		}
	}

	/// A node carrying the flavor text of the row that targeted it.
	pub fn with_text(id: impl Into<String>, text: Option<String>) -> Self {
		Self {
			text,
			..Self::bare(id)
		}
	}

	/// The synthetic entry node, labelled and classed as root.
	pub fn root() -> Self {
		Self {
			label: Some(ROOT_LABEL.into()),
			class: Some(ElementClass::Root),
			..Self::bare(ROOT_ID)
		}
	}

	/// Whether this is the synthetic entry node.
	pub fn is_root(&self) -> bool {
		self.id == ROOT_ID
	}
}

/// A directed edge. Its id is the source id immediately followed by the target id.
///
/// The id is kept for display only: `("AB", "C")` and `("A", "BC")` share it,
/// so identity is the `(source, target)` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
	/// `source ++ target`.
	pub id: String,
	/// Id of the node the edge leaves.
	pub source: String,
	/// Id of the node the edge points at.
	pub target: String,
	/// Styling class, set when the edge is put on screen.
	pub class: Option<ElementClass>,
}

impl Edge {
	/// Unclassified edge from `source` to `target`.
	pub fn new(source: &str, target: &str) -> Self {
		Self {
			id: format!("{source}{target}"),
			source: source.to_owned(),
			target: target.to_owned(),
			class: None,
		}
	}
}

/// One entry of the visible graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
	/// A node entry.
	Node(Node),
	/// An edge entry.
	Edge(Edge),
}

/// The part of the network currently on screen, in insertion order.
///
/// Elements are only ever appended. A node id may occur more than once when
/// two expanded parents share a target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleGraph {
	elements: Vec<Element>,
}

impl Default for VisibleGraph {
	fn default() -> Self {
		Self {
			elements: vec![Element::Node(Node::root())],
		}
	}
}

impl VisibleGraph {
	/// Every entry, nodes and edges interleaved in insertion order.
	pub fn elements(&self) -> &[Element] {
		&self.elements
	}

	/// Number of entries, nodes and edges alike.
	pub fn len(&self) -> usize {
		self.elements.len()
	}

	/// Never true for a graph built by the engine, which always holds the root.
	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// Node entries in order, repeats included.
	pub fn nodes(&self) -> impl Iterator<Item = &Node> {
		self.elements.iter().filter_map(|el| match el {
			Element::Node(node) => Some(node),
			Element::Edge(_) => None,
		})
	}

	/// Edge entries in order.
	pub fn edges(&self) -> impl Iterator<Item = &Edge> {
		self.elements.iter().filter_map(|el| match el {
			Element::Edge(edge) => Some(edge),
			Element::Node(_) => None,
		})
	}

	/// Number of node entries, repeats included.
	pub fn node_count(&self) -> usize {
		self.nodes().count()
	}

	/// Number of edge entries.
	pub fn edge_count(&self) -> usize {
		self.edges().count()
	}

	/// First visible node entry with the given id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes().find(|node| node.id == id)
	}

	pub(super) fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
		self.elements.iter_mut().find_map(|el| match el {
			Element::Node(node) if node.id == id => Some(node),
			_ => None,
		})
	}

	pub(super) fn push(&mut self, element: Element) {
		self.elements.push(element);
	}
}
