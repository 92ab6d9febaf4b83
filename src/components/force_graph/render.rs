use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;
use super::style::{self, BACKGROUND, EDGE_ALPHA};

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, arrow_size) = (1.5 / k, 7.0 / k);
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let alpha = if state.is_highlighted(n1.index()) && state.is_highlighted(n2.index()) {
			EDGE_ALPHA + (1.0 - EDGE_ALPHA) * t
		} else {
			EDGE_ALPHA * (1.0 - 0.7 * t)
		};
		let (r, g, b) = style::edge_rgb(state.edge_class(n1.index(), n2.index()));
		let color = format!("rgba({r}, {g}, {b}, {alpha})");

		let (ux, uy) = (dx / dist, dy / dist);
		let (from, to) = (
			style::node_radius(n1.data.user_data.node.class),
			style::node_radius(n2.data.user_data.node.class),
		);
		ctx.set_stroke_style_str(&color);
		ctx.set_line_width(line_width);
		ctx.begin_path();
		ctx.move_to(x1 + ux * from, y1 + uy * from);
		ctx.line_to(x2 - ux * to, y2 - uy * to);
		ctx.stroke();

		// vee arrow halfway along the edge, pointing at the target
		let (mid_x, mid_y) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
		let (back_x, back_y) = (mid_x - ux * arrow_size, mid_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		let notch = 0.4 * arrow_size;
		ctx.set_fill_style_str(&color);
		ctx.begin_path();
		ctx.move_to(mid_x, mid_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x + ux * notch, back_y + uy * notch);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	});
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (t, k) = (ease_out_cubic(state.hover.highlight_t), state.transform.k);
	let has_highlight = state.hover.node.is_some() || t > 0.0;

	state.graph.visit_nodes(|vertex| {
		let idx = vertex.index();
		let node = &vertex.data.user_data.node;
		let (x, y) = (vertex.x() as f64, vertex.y() as f64);
		let radius = style::node_radius(node.class);
		let is_selected = state.selected == Some(idx);

		let base = style::node_alpha(node.class);
		let alpha = if is_selected {
			1.0
		} else if has_highlight && state.is_highlighted(idx) {
			base + (1.0 - base) * t
		} else {
			base * (1.0 - 0.6 * t)
		};

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(style::node_color(node.class));
		ctx.fill();

		if node.expanded {
			ctx.set_stroke_style_str("#00adb5");
			ctx.set_line_width(1.5 / k.max(0.5));
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.5, 0.0, 2.0 * PI);
			ctx.stroke();
		}
		if is_selected {
			ctx.set_stroke_style_str("#000000");
			ctx.set_line_width(2.0 / k.max(0.5));
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 5.0, 0.0, 2.0 * PI);
			ctx.stroke();
		}

		if let Some(caption) = style::caption(node) {
			let size = if node.is_root() { 15.0 } else { 10.0 };
			ctx.set_fill_style_str("#000000");
			ctx.set_font(&format!("{}px sans-serif", size / k.max(0.5)));
			let _ = ctx.fill_text(caption, x + radius + 3.0, y + 3.0);
		}
		ctx.set_global_alpha(1.0);
	});
}
