//! topology-editor: form-driven editor for small network topologies.
//!
//! Nodes and links are built through sidebar forms, drawn as a force-directed
//! graph on a canvas, and exported to or imported from YAML documents. The
//! store, codec and handlers are plain Rust; the widgets are Leptos components
//! compiled to WASM.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod config;
pub mod editor;
pub mod export;
pub mod forms;
pub mod topology;

use components::editor::{
	ExportPanel, ImportPanel, LinkFormPanel, NodeFormPanel, NoticeLine, TopologySummary,
};
pub use components::force_graph::{Color, ForceGraphCanvas};
pub use config::EditorConfig;
pub use editor::{Editor, Notice};
pub use topology::Topology;
use topology::document::TopologyDocument;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("topology-editor: logging initialized");
}

/// Text of the page's `<script id="...">` element, if present.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load the starting topology from a script element with id="topology-data".
/// Expected format: JSON with { nodes: [...], links: [...] }
fn load_topology() -> Option<Topology> {
	let json_text = script_text("topology-data")?;

	match TopologyDocument::from_json(&json_text) {
		Ok(document) => {
			let topology = document.into_topology();
			info!(
				"topology-editor: loaded {} nodes, {} links",
				topology.node_count(),
				topology.link_count()
			);
			Some(topology)
		}
		Err(e) => {
			warn!("topology-editor: failed to parse topology data: {}", e);
			None
		}
	}
}

/// Load settings from a script element with id="editor-config".
fn load_config() -> EditorConfig {
	let Some(json_text) = script_text("editor-config") else {
		return EditorConfig::default();
	};

	EditorConfig::from_json(&json_text).unwrap_or_else(|e| {
		warn!("topology-editor: failed to parse editor config: {}", e);
		EditorConfig::default()
	})
}

/// Main application component.
/// Forms in the sidebar, the live graph and export controls in the main area.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let form_color = Color::parse(&config.node_color);
	let imported_color = Color::parse(&config.imported_node_color);
	let layout = config.layout.clone();

	let editor =
		RwSignal::new(Editor::new(config).with_topology(load_topology().unwrap_or_default()));
	let notice = RwSignal::new(None::<Notice>);
	let imported = RwSignal::new(false);

	let topology = Memo::new(move |_| editor.with(|e| e.topology().clone()));
	let node_color = Signal::derive(move || {
		if imported.get() {
			imported_color
		} else {
			form_color
		}
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />
		<Title text="Network Topology Editor" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="editor-layout">
			<aside class="sidebar">
				<NodeFormPanel editor=editor notice=notice imported=imported />
				<LinkFormPanel editor=editor notice=notice imported=imported />
				<ImportPanel editor=editor notice=notice imported=imported />
			</aside>
			<main class="main-area">
				<h1>"Network Topology Editor"</h1>
				<NoticeLine notice=notice />
				<TopologySummary editor=editor />
				<div class="graph-container">
					<ForceGraphCanvas topology=topology node_color=node_color layout=layout />
				</div>
				<p class="subtitle">"Drag nodes to reposition. Scroll to zoom. Drag background to pan."</p>
				<ExportPanel editor=editor notice=notice />
			</main>
		</div>
	}
}
