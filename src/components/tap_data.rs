use leptos::prelude::*;
use log::warn;

use crate::graph::Node;

/// JSON for the panel, `null` until a node has been tapped.
pub fn tap_json(node: Option<&Node>) -> String {
	serde_json::to_string_pretty(&node).unwrap_or_else(|err| {
		warn!("Could not serialize tapped node: {err}");
		"null".into()
	})
}

/// Side panel showing the data of the last tapped node.
#[component]
pub fn TapDataPanel(#[prop(into)] tapped: Signal<Option<Node>>) -> impl IntoView {
	view! {
		<div class="tap-data">
			<p>"Node Data"</p>
			<pre class="json-output">{move || tapped.with(|node| tap_json(node.as_ref()))}</pre>
		</div>
	}
}
