//! Visual vocabulary keyed by element class.

use crate::graph::{ElementClass, Node};

pub const BACKGROUND: &str = "#f4f4f6";
pub const NODE_RADIUS: f64 = 6.0;
pub const ROOT_RADIUS: f64 = 14.0;
// world-space, scales with zoom like nodes
pub const HIT_RADIUS: f64 = 12.0;

pub const NODE_ALPHA: f64 = 0.65;
pub const EDGE_ALPHA: f64 = 0.45;

pub fn node_color(class: Option<ElementClass>) -> &'static str {
	match class {
		Some(ElementClass::Root) => "#222831",
		Some(ElementClass::FollowingNode) => "#393e46",
		Some(ElementClass::FollowerNode) => "#0074D9",
		_ => "#7f7f7f",
	}
}

/// RGB triple, so the renderer can fade edges.
pub fn edge_rgb(class: Option<ElementClass>) -> (u8, u8, u8) {
	match class {
		Some(ElementClass::FollowingEdge) => (0x00, 0xad, 0xb5),
		Some(ElementClass::FollowerEdge) => (0x00, 0x74, 0xd9),
		_ => (0x99, 0x99, 0x99),
	}
}

pub fn node_radius(class: Option<ElementClass>) -> f64 {
	match class {
		Some(ElementClass::Root) => ROOT_RADIUS,
		_ => NODE_RADIUS,
	}
}

pub fn node_alpha(class: Option<ElementClass>) -> f64 {
	match class {
		Some(ElementClass::Root) => 1.0,
		_ => NODE_ALPHA,
	}
}

/// Text drawn next to a node: the root shows its label, following nodes their id.
pub fn caption(node: &Node) -> Option<&str> {
	match node.class {
		Some(ElementClass::Root) => node.label.as_deref(),
		Some(ElementClass::FollowingNode) => Some(&node.id),
		_ => None,
	}
}
