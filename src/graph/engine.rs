use std::sync::Arc;

use log::debug;

use super::store::EdgeStore;
use super::types::{Element, ElementClass, VisibleGraph};

/// One viewer session: owns the visible graph and grows it on every tap.
///
/// Only the outgoing ("following") direction is expanded. The store's
/// incoming index and the follower classes are left for a future transition.
#[derive(Debug)]
pub struct ExpansionEngine {
	store: Arc<EdgeStore>,
	graph: VisibleGraph,
}

impl ExpansionEngine {
	/// Start a session showing only the root node.
	pub fn new(store: Arc<EdgeStore>) -> Self {
		Self {
			store,
			graph: VisibleGraph::default(),
		}
	}

	/// Apply one tap and return the whole visible graph.
	///
	/// `None` resets the session to the root node. A tap on a node that is
	/// not visible, or that was already expanded, leaves the graph as is.
	pub fn tap(&mut self, node_id: Option<&str>) -> &VisibleGraph {
		let Some(id) = node_id else {
			debug!("Resetting visible graph to root");
			self.graph = VisibleGraph::default();
			return &self.graph;
		};

		let Some(node) = self.graph.node_mut(id) else {
			debug!("Tap on {id:?} ignored, node is not visible");
			return &self.graph;
		};
		if node.expanded {
			debug!("Tap on {id:?} ignored, already expanded");
			return &self.graph;
		}
		node.expanded = true;

		let (nodes, edges) = (
			self.store.outgoing_nodes_of(id),
			self.store.outgoing_edges_of(id),
		);
		debug!(
			"Expanding {id:?}: {} nodes, {} edges",
			nodes.len(),
			edges.len()
		);

		for node in nodes.iter().filter(|node| !node.is_root()) {
			let mut node = node.clone();
			node.class = Some(ElementClass::FollowingNode);
			self.graph.push(Element::Node(node));
		}
		for edge in edges {
			let mut edge = edge.clone();
			edge.class = Some(ElementClass::FollowingEdge);
			self.graph.push(Element::Edge(edge));
		}

		&self.graph
	}

	/// The visible graph as of the last tap.
	pub fn current_graph(&self) -> &VisibleGraph {
		&self.graph
	}

	/// The shared index this session expands over.
	pub fn store(&self) -> &EdgeStore {
		&self.store
	}
}
