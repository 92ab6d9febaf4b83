use std::sync::Arc;

use practice_network::graph::{
	Element, ElementClass, ExpansionEngine, ParseError, ROOT_ID, VisibleGraph, load_edges,
};

const NETWORK: &str = include_str!("../data/test_network.txt");

fn session() -> ExpansionEngine {
	ExpansionEngine::new(Arc::new(load_edges(NETWORK).expect("bundled network loads")))
}

#[test]
fn walking_the_bundled_network() {
	let mut engine = session();
	assert_eq!(engine.current_graph(), &VisibleGraph::default());

	let graph = engine.tap(Some(ROOT_ID)).clone();
	let topics: Vec<&str> = graph
		.nodes()
		.filter(|n| !n.is_root())
		.map(|n| n.id.as_str())
		.collect();
	assert_eq!(
		topics,
		[
			"Early Intervention",
			"Peer Support",
			"Integrated Care",
			"Workforce Development"
		]
	);
	assert_eq!(graph.edge_count(), 4);

	let graph = engine.tap(Some("Workforce Development"));
	assert!(graph.node("Trauma-Informed Practice").is_some());
	assert!(graph.node("Clinical Supervision").is_some());

	// Trauma-Informed Practice points back at the root, which is not added again
	let before = engine.current_graph().len();
	let graph = engine.tap(Some("Trauma-Informed Practice"));
	assert_eq!(graph.len(), before + 1);
	assert!(matches!(
		graph.elements().last(),
		Some(Element::Edge(edge)) if edge.target == ROOT_ID && edge.class == Some(ElementClass::FollowingEdge)
	));
	assert_eq!(graph.nodes().filter(|n| n.is_root()).count(), 1);
}

#[test]
fn retaps_and_reset() {
	let mut engine = session();
	engine.tap(Some(ROOT_ID));
	let once = engine.tap(Some("Peer Support")).clone();
	let twice = engine.tap(Some("Peer Support")).clone();
	assert_eq!(once, twice);

	// not on screen yet, so nothing happens
	assert_eq!(engine.tap(Some("Collaborative Care Model")).len(), once.len());

	assert_eq!(engine.tap(None), &VisibleGraph::default());
	assert_eq!(engine.current_graph().len(), 1);
}

#[test]
fn incoming_index_is_available() {
	let engine = session();
	let store = engine.store();
	let sources: Vec<&str> = store
		.incoming_nodes_of("Supported Employment")
		.iter()
		.map(|n| n.id.as_str())
		.collect();
	assert_eq!(sources, ["First Episode Psychosis Teams", "Recovery Colleges"]);
	assert_eq!(store.incoming_edges_of(ROOT_ID).len(), 1);
	// the root shows up as a source before it is targeted, so it keeps no text
	assert_eq!(store.node(ROOT_ID).unwrap().text, None);
	assert!(store.incoming_nodes_of(ROOT_ID)[0].text.is_none());
}

#[test]
fn malformed_rows_abort_loading() {
	let err = load_edges("Source\tTarget\tText\nonlyonecolumn\n").unwrap_err();
	assert_eq!(err, ParseError::FieldCount { line: 2, found: 1 });
	assert_eq!(
		err.to_string(),
		"line 2: expected 3 tab-separated fields, found 1"
	);
}
