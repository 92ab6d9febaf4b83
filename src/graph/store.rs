use std::collections::HashMap;

use super::loader::EdgeRow;
use super::types::{Edge, Node};

/// Immutable adjacency index over the full edge list.
///
/// Every sequence keeps source row order. Node snapshots in the outgoing
/// index carry the text of the row that produced them, while the registry
/// keeps whatever a node looked like the first time it was seen.
#[derive(Debug, Default)]
pub struct EdgeStore {
	nodes: Vec<Node>,
	node_index: HashMap<String, usize>,
	outgoing_nodes: HashMap<String, Vec<Node>>,
	outgoing_edges: HashMap<String, Vec<Edge>>,
	incoming_nodes: HashMap<String, Vec<Node>>,
	incoming_edges: HashMap<String, Vec<Edge>>,
	edge_count: usize,
}

impl EdgeStore {
	/// Index `rows` in order. Cannot fail: rows are validated by the loader.
	pub fn from_rows(rows: impl IntoIterator<Item = EdgeRow>) -> Self {
		let mut store = Self::default();
		for row in rows {
			store.insert(row);
		}
		store
	}

	fn insert(&mut self, row: EdgeRow) {
		let edge = Edge::new(&row.source, &row.target);
		let source = Node::bare(&row.source);
		let target = Node::with_text(&row.target, row.text);

		self.register(&source);
		self.register(&target);

		self.outgoing_nodes
			.entry(row.source.clone())
			.or_default()
			.push(target);
		self.outgoing_edges
			.entry(row.source)
			.or_default()
			.push(edge.clone());
		self.incoming_nodes
			.entry(row.target.clone())
			.or_default()
			.push(source);
		self.incoming_edges.entry(row.target).or_default().push(edge);
		self.edge_count += 1;
	}

	// Attributes are fixed at first sight.
	fn register(&mut self, node: &Node) {
		if self.node_index.contains_key(&node.id) {
			return;
		}
		self.node_index.insert(node.id.clone(), self.nodes.len());
		self.nodes.push(node.clone());
	}

	/// Targets of `id`, one snapshot per row, carrying that row's text.
	pub fn outgoing_nodes_of(&self, id: &str) -> &[Node] {
		self.outgoing_nodes.get(id).map(Vec::as_slice).unwrap_or_default()
	}

	/// Edges leaving `id`.
	pub fn outgoing_edges_of(&self, id: &str) -> &[Edge] {
		self.outgoing_edges.get(id).map(Vec::as_slice).unwrap_or_default()
	}

	/// Bare sources of the rows that target `id`.
	pub fn incoming_nodes_of(&self, id: &str) -> &[Node] {
		self.incoming_nodes.get(id).map(Vec::as_slice).unwrap_or_default()
	}

	/// Edges pointing at `id`.
	pub fn incoming_edges_of(&self, id: &str) -> &[Edge] {
		self.incoming_edges.get(id).map(Vec::as_slice).unwrap_or_default()
	}

	/// Registered nodes in first-seen order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Registry entry for `id`, as first seen.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.node_index.get(id).map(|&i| &self.nodes[i])
	}

	/// Whether `id` occurs in any row.
	pub fn contains(&self, id: &str) -> bool {
		self.node_index.contains_key(id)
	}

	/// Number of distinct node ids.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of rows indexed, duplicates included.
	pub fn edge_count(&self) -> usize {
		self.edge_count
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn store(rows: &[(&str, &str, &str)]) -> EdgeStore {
		EdgeStore::from_rows(rows.iter().map(|(s, t, x)| EdgeRow::new(s, t, x)))
	}

	#[test]
	fn single_row_is_indexed_both_ways() {
		let store = store(&[("X", "Y", "desc1")]);

		assert_eq!(
			store.outgoing_nodes_of("X"),
			&[Node::with_text("Y", Some("desc1".into()))]
		);
		assert_eq!(store.incoming_nodes_of("Y"), &[Node::bare("X")]);
		assert_eq!(store.outgoing_edges_of("X"), &[Edge::new("X", "Y")]);
		assert_eq!(store.incoming_edges_of("Y"), &[Edge::new("X", "Y")]);
		assert_eq!(store.node_count(), 2);
		assert_eq!(store.edge_count(), 1);
	}

	#[test]
	fn unknown_ids_have_no_neighbors() {
		let store = store(&[("X", "Y", "desc1")]);
		assert!(store.outgoing_nodes_of("Y").is_empty());
		assert!(store.outgoing_edges_of("nope").is_empty());
		assert!(store.incoming_nodes_of("X").is_empty());
		assert!(store.incoming_edges_of("nope").is_empty());
		assert!(store.node("nope").is_none());
		assert!(!store.contains("nope"));
	}

	#[test]
	fn source_first_node_keeps_no_text() {
		let store = store(&[("A", "B", "b text"), ("C", "A", "a text")]);
		assert_eq!(store.node("A").unwrap().text, None);
		assert_eq!(store.node("B").unwrap().text.as_deref(), Some("b text"));
		// the outgoing snapshot still carries the row's text
		assert_eq!(
			store.outgoing_nodes_of("C")[0].text.as_deref(),
			Some("a text")
		);
	}

	#[test]
	fn first_target_text_wins() {
		let store = store(&[("A", "B", "first"), ("C", "B", "second")]);
		assert_eq!(store.node("B").unwrap().text.as_deref(), Some("first"));
		let ids: Vec<&str> = store.nodes().iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["A", "B", "C"]);
	}

	#[test]
	fn sequences_keep_row_order_and_reversed_pairs() {
		let store = store(&[("X", "Z", ""), ("X", "Y", ""), ("Y", "X", ""), ("X", "Z", "")]);

		let targets: Vec<&str> = store
			.outgoing_nodes_of("X")
			.iter()
			.map(|n| n.id.as_str())
			.collect();
		assert_eq!(targets, ["Z", "Y", "Z"]);

		let incoming: Vec<&str> = store
			.incoming_edges_of("X")
			.iter()
			.map(|e| e.id.as_str())
			.collect();
		assert_eq!(incoming, ["YX"]);
		assert_eq!(store.edge_count(), 4);
	}
}
