use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::style::{HIT_RADIUS, node_radius};
use crate::graph::{Edge, Element, ElementClass, Node, VisibleGraph};

// distance from its parent at which a revealed node first appears
const SPAWN_DISTANCE: f64 = 60.0;
// pointer travel (screen px) after which a press becomes a drag
pub const DRAG_THRESHOLD: f64 = 4.0;

fn simulation() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

/// What a simulated vertex knows about the element it stands for.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub node: Node,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub moved: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
}

/// Force simulation mirroring the visible graph.
///
/// The visible graph only grows between resets, so syncing consumes the
/// elements past the last synced length. Repeated node ids map onto a single
/// vertex and repeated `(source, target)` pairs onto a single spring.
pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub selected: Option<DefaultNodeIdx>,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	ids: HashMap<String, DefaultNodeIdx>,
	edges: HashMap<(DefaultNodeIdx, DefaultNodeIdx), Option<ElementClass>>,
	synced: usize,
}

impl ForceGraphState {
	pub fn new(data: &VisibleGraph, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: simulation(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			selected: None,
			width,
			height,
			animation_running: true,
			ids: HashMap::new(),
			edges: HashMap::new(),
			synced: 0,
		};
		state.sync(data);
		state
	}

	/// Bring the simulation up to date with `data`.
	pub fn sync(&mut self, data: &VisibleGraph) {
		if data.len() < self.synced {
			debug!("Visible graph shrank to {} elements, rebuilding", data.len());
			self.clear();
		}

		let tail = &data.elements()[self.synced..];
		let parents: HashMap<&str, &str> = tail
			.iter()
			.filter_map(|el| match el {
				Element::Edge(edge) => Some((edge.target.as_str(), edge.source.as_str())),
				Element::Node(_) => None,
			})
			.collect();
		let positions = self.positions();

		let mut spawned = 0;
		for el in tail {
			let Element::Node(node) = el else {
				continue;
			};
			if self.ids.contains_key(&node.id) {
				continue;
			}
			let parent = parents
				.get(node.id.as_str())
				.and_then(|p| self.ids.get(*p))
				.and_then(|idx| positions.get(idx))
				.copied();
			self.add_node(node, parent, spawned);
			spawned += 1;
		}
		for el in tail {
			if let Element::Edge(edge) = el {
				self.add_edge(edge);
			}
		}
		self.synced = data.len();
		self.refresh_flags(data);
	}

	fn clear(&mut self) {
		self.graph = simulation();
		self.ids.clear();
		self.edges.clear();
		self.drag = DragState::default();
		self.hover = HoverState::default();
		self.selected = None;
		self.synced = 0;
	}

	fn positions(&self) -> HashMap<DefaultNodeIdx, (f32, f32)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x(), node.y()));
		});
		positions
	}

	fn add_node(&mut self, node: &Node, parent: Option<(f32, f32)>, nth: usize) {
		// spread siblings around the parent, first parentless node sits at the origin
		let angle = nth as f64 * 2.4;
		let ((cx, cy), distance) = match parent {
			Some(pos) => (pos, SPAWN_DISTANCE),
			None if self.ids.is_empty() => ((0.0, 0.0), 0.0),
			None => ((0.0, 0.0), 2.0 * SPAWN_DISTANCE),
		};
		let (x, y) = (
			cx + (distance * angle.cos()) as f32,
			cy + (distance * angle.sin()) as f32,
		);

		let idx = self.graph.add_node(NodeData {
			x,
			y,
			mass: 10.0,
			is_anchor: node.is_root(),
			user_data: NodeInfo { node: node.clone() },
		});
		self.ids.insert(node.id.clone(), idx);
	}

	// Edges are told apart by their endpoints, never by the concatenated id.
	fn add_edge(&mut self, edge: &Edge) {
		let (Some(&src), Some(&tgt)) = (self.ids.get(&edge.source), self.ids.get(&edge.target))
		else {
			return;
		};
		if self.edges.contains_key(&(src, tgt)) {
			return;
		}
		self.graph.add_edge(src, tgt, EdgeData::default());
		self.edges.insert((src, tgt), edge.class);
	}

	// The first entry for an id is the one that carries the expanded flag.
	fn refresh_flags(&mut self, data: &VisibleGraph) {
		let mut expanded = HashMap::new();
		for node in data.nodes() {
			expanded.entry(node.id.as_str()).or_insert(node.expanded);
		}
		self.graph.visit_nodes_mut(|vertex| {
			let info = &mut vertex.data.user_data.node;
			info.expanded = expanded.get(info.id.as_str()).copied().unwrap_or(false);
		});
	}

	pub fn edge_class(&self, src: DefaultNodeIdx, tgt: DefaultNodeIdx) -> Option<ElementClass> {
		self.edges.get(&(src, tgt)).copied().flatten()
	}

	pub fn node_info(&self, idx: DefaultNodeIdx) -> Option<Node> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.node.clone());
			}
		});
		found
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Closest node under the pointer, if any.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut best: Option<(f64, DefaultNodeIdx)> = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let dist = (dx * dx + dy * dy).sqrt();
			let reach = HIT_RADIUS.max(node_radius(node.data.user_data.node.class));
			if dist < reach && best.is_none_or(|(d, _)| dist < d) {
				best = Some((dist, node.index()));
			}
		});
		best.map(|(_, idx)| idx)
	}

	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.neighbors = match node {
			Some(idx) => self
				.edges
				.keys()
				.filter_map(|&(src, tgt)| match (src == idx, tgt == idx) {
					(true, _) => Some(tgt),
					(_, true) => Some(src),
					_ => None,
				})
				.collect(),
			None => HashSet::new(),
		};
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.neighbors.contains(&idx)
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);

		let target = if self.hover.node.is_some() { 1.0 } else { 0.0 };
		self.hover.highlight_t += (target - self.hover.highlight_t) * 4.0 * dt as f64;
		if self.hover.highlight_t < 0.01 {
			self.hover.highlight_t = 0.0;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::graph::{EdgeRow, EdgeStore, ExpansionEngine, ROOT_ID};

	fn session(rows: &[(&str, &str)]) -> ExpansionEngine {
		let rows = rows.iter().map(|(s, t)| EdgeRow::new(s, t, ""));
		ExpansionEngine::new(Arc::new(EdgeStore::from_rows(rows)))
	}

	fn vertices(state: &ForceGraphState) -> usize {
		let mut count = 0;
		state.graph.visit_nodes(|_| count += 1);
		count
	}

	fn springs(state: &ForceGraphState) -> usize {
		let mut count = 0;
		state.graph.visit_edges(|_, _, _| count += 1);
		count
	}

	fn vertex(state: &ForceGraphState, id: &str) -> Node {
		state.node_info(state.ids[id]).unwrap()
	}

	#[test]
	fn repeated_node_entries_share_a_vertex() {
		let mut engine = session(&[(ROOT_ID, "A"), (ROOT_ID, "B"), ("A", "C"), ("B", "C")]);
		engine.tap(Some(ROOT_ID));
		engine.tap(Some("A"));
		let graph = engine.tap(Some("B"));
		assert_eq!(graph.nodes().filter(|n| n.id == "C").count(), 2);

		let state = ForceGraphState::new(graph, 800.0, 600.0);
		assert_eq!(vertices(&state), 4);
		assert_eq!(springs(&state), 4);
	}

	#[test]
	fn repeated_rows_share_a_spring() {
		let mut engine = session(&[(ROOT_ID, "A"), (ROOT_ID, "A")]);
		let graph = engine.tap(Some(ROOT_ID));
		assert_eq!(graph.edge_count(), 2);

		let state = ForceGraphState::new(graph, 800.0, 600.0);
		assert_eq!(vertices(&state), 2);
		assert_eq!(springs(&state), 1);
	}

	#[test]
	fn edges_with_colliding_ids_each_get_a_spring() {
		let mut engine = session(&[(ROOT_ID, "AB"), (ROOT_ID, "A"), ("AB", "C"), ("A", "BC")]);
		engine.tap(Some(ROOT_ID));
		engine.tap(Some("AB"));
		let graph = engine.tap(Some("A"));
		assert_eq!(graph.edge_count(), 4);

		let state = ForceGraphState::new(graph, 800.0, 600.0);
		assert_eq!(springs(&state), 4);
		assert_eq!(
			state.edge_class(state.ids["A"], state.ids["BC"]),
			Some(ElementClass::FollowingEdge)
		);
	}

	#[test]
	fn sync_adds_only_the_new_tail() {
		let mut engine = session(&[(ROOT_ID, "A"), ("A", "B"), ("A", "C")]);
		let mut state = ForceGraphState::new(engine.tap(Some(ROOT_ID)), 800.0, 600.0);
		assert_eq!((vertices(&state), springs(&state)), (2, 1));
		let root = state.ids[ROOT_ID];

		state.sync(engine.tap(Some("A")));
		assert_eq!((vertices(&state), springs(&state)), (4, 3));
		assert_eq!(state.ids[ROOT_ID], root);

		// nothing new to add on an idempotent re-tap
		state.sync(engine.tap(Some("A")));
		assert_eq!((vertices(&state), springs(&state)), (4, 3));
	}

	#[test]
	fn shrinking_graph_rebuilds_the_simulation() {
		let mut engine = session(&[(ROOT_ID, "A"), ("A", "B")]);
		engine.tap(Some(ROOT_ID));
		let mut state = ForceGraphState::new(engine.tap(Some("A")), 800.0, 600.0);
		state.selected = state.ids.get("B").copied();
		assert_eq!(vertices(&state), 3);

		state.sync(engine.tap(None));
		assert_eq!((vertices(&state), springs(&state)), (1, 0));
		assert_eq!(state.selected, None);
		assert!(!vertex(&state, ROOT_ID).expanded);

		state.sync(engine.tap(Some(ROOT_ID)));
		assert_eq!((vertices(&state), springs(&state)), (2, 1));
	}

	#[test]
	fn expanded_flag_follows_first_entry() {
		let mut engine = session(&[(ROOT_ID, "A"), (ROOT_ID, "B"), ("A", "C"), ("B", "C")]);
		engine.tap(Some(ROOT_ID));
		engine.tap(Some("A"));
		let mut state = ForceGraphState::new(engine.tap(Some("B")), 800.0, 600.0);
		assert!(vertex(&state, "A").expanded);
		assert!(!vertex(&state, "C").expanded);

		// marks the first C entry only, without appending anything
		let graph = engine.tap(Some("C"));
		let before = vertices(&state);
		state.sync(graph);
		assert_eq!(vertices(&state), before);
		assert!(vertex(&state, "C").expanded);
	}

	#[test]
	fn revealed_nodes_spawn_next_to_their_parent() {
		let mut engine = session(&[(ROOT_ID, "A"), ("A", "B"), ("A", "C")]);
		let mut state = ForceGraphState::new(engine.tap(Some(ROOT_ID)), 800.0, 600.0);
		state.sync(engine.tap(Some("A")));

		let positions = state.positions();
		let (ax, ay) = positions[&state.ids["A"]];
		for child in ["B", "C"] {
			let (x, y) = positions[&state.ids[child]];
			let dist = ((x - ax).powi(2) + (y - ay).powi(2)).sqrt() as f64;
			assert!((dist - SPAWN_DISTANCE).abs() < 0.01, "{child} spawned {dist} away");
		}
		// the root sits anchored at the origin
		assert_eq!(positions[&state.ids[ROOT_ID]], (0.0, 0.0));
	}
}
