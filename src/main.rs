use leptos::mount::mount_to_body;
use practice_network::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
