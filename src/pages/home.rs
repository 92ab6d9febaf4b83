use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;

use crate::components::force_graph::ForceGraphCanvas;
use crate::components::tap_data::TapDataPanel;
use crate::graph::{EdgeStore, ExpansionEngine, Node, load_edges};

/// Network bundled with the app.
const NETWORK: &str = include_str!("../../data/test_network.txt");

/// One exploration session over a loaded network.
///
/// Every tap coming out of the canvas goes through the engine, and the
/// resulting visible graph is fed back into the canvas.
#[component]
fn Explorer(store: Arc<EdgeStore>) -> impl IntoView {
	let engine = Rc::new(RefCell::new(ExpansionEngine::new(store)));
	let tapped = RwSignal::new(None::<Node>);
	let elements = RwSignal::new(engine.borrow().current_graph().clone());

	// runs once up front with nothing tapped, which renders the root alone
	Effect::new(move |_| {
		let id = tapped.with(|node| node.as_ref().map(|n| n.id.clone()));
		let graph = engine.borrow_mut().tap(id.as_deref()).clone();
		elements.set(graph);
	});

	view! {
		<div class="explorer" style="display: flex; height: 95vh;">
			<div class="graph-pane" style="flex: 2; position: relative;">
				<ForceGraphCanvas data=elements tapped=tapped />
			</div>
			<div class="side-pane" style="flex: 1; overflow-y: auto; overflow-wrap: break-word;">
				<h2>"Tap Data"</h2>
				<TapDataPanel tapped=tapped />
			</div>
		</div>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let network = load_edges(NETWORK).map(Arc::new);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div class="graph-overlay">
				<h1>"Best Practice Network"</h1>
				<p class="subtitle">"Click a node to reveal what it leads to. Drag to pin, scroll to zoom."</p>
			</div>
			{network.map(|store| view! { <Explorer store=store /> })}
		</ErrorBoundary>
	}
}
