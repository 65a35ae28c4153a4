//! End-to-end editing sessions: forms in, YAML out, YAML back in.

#![allow(unused_crate_dependencies)]

use topology_editor::forms::{FormError, LinkForm, NodeForm};
use topology_editor::topology::{
	JitterRange, LinkAttrs, NodeAttrs, export_topology, import_topology,
};
use topology_editor::{Editor, EditorConfig, Topology};

fn node(id: &str) -> NodeForm {
	NodeForm {
		id: id.to_string(),
		..NodeForm::default()
	}
}

fn link(a: &str, b: &str) -> LinkForm {
	LinkForm {
		node1: Some(a.to_string()),
		node2: Some(b.to_string()),
		..LinkForm::default()
	}
}

#[test]
fn single_node_from_form() {
	let mut editor = Editor::new(EditorConfig::default());
	let notice = editor.on_add_node(&node("A")).unwrap();

	assert_eq!(notice.text, "Node A added.");
	let topology = editor.topology();
	assert_eq!(topology.node_count(), 1);
	assert_eq!(
		topology.node("A"),
		Some(&NodeAttrs {
			cpu_capacity: 100,
			memory_capacity: 8000,
			queue_size: 100,
			failure_rate: 0.01,
		})
	);
}

#[test]
fn export_then_import_into_fresh_store() {
	let mut editor = Editor::new(EditorConfig::default());
	editor.on_add_node(&node("A")).unwrap();
	editor.on_add_node(&node("B")).unwrap();
	editor.on_add_link(&link("A", "B")).unwrap();

	let yaml = export_topology(editor.topology()).unwrap();
	let mut fresh = Editor::new(EditorConfig::default());
	fresh.import(&yaml).unwrap();

	let topology = fresh.topology();
	assert_eq!(topology.node_ids(), vec!["A", "B"]);
	assert_eq!(topology.link_count(), 1);
	assert_eq!(
		topology.link("B", "A").map(|l| l.attrs),
		Some(LinkAttrs {
			delay: 10,
			bandwidth: 100,
			jitter_range: JitterRange::new(0.8, 1.2),
			failure_rate: 0.01,
		})
	);
	assert_eq!(topology, editor.topology());
}

#[test]
fn round_trip_keeps_overwritten_attributes() {
	let mut topology = Topology::new();
	topology.add_node("core", NodeAttrs::default());
	topology.add_node("edge", NodeAttrs::default());
	topology.add_node(
		"core",
		NodeAttrs {
			cpu_capacity: 40,
			memory_capacity: 16000,
			queue_size: 12,
			failure_rate: 0.25,
		},
	);
	topology.add_link("core", "edge", LinkAttrs::default());
	topology.add_link(
		"edge",
		"core",
		LinkAttrs {
			delay: 3,
			bandwidth: 1000,
			jitter_range: JitterRange::new(0.5, 2.0),
			failure_rate: 0.0,
		},
	);

	assert_eq!(topology.node_count(), 2);
	assert_eq!(topology.node("core").map(|n| n.cpu_capacity), Some(40));
	assert_eq!(topology.link_count(), 1);

	let reloaded = import_topology(&export_topology(&topology).unwrap()).unwrap();
	assert_eq!(reloaded, topology);
}

#[test]
fn links_only_join_selectable_nodes() {
	let mut editor = Editor::new(EditorConfig::default());
	editor.on_add_node(&node("A")).unwrap();
	editor.on_add_node(&node("B")).unwrap();

	assert_eq!(editor.selectable_endpoints(), vec!["A", "B"]);
	assert_eq!(
		editor.on_add_link(&link("A", "C")).unwrap_err(),
		FormError::UnknownEndpoint("C".to_string())
	);
	assert_eq!(editor.topology().link_count(), 0);
}

#[test]
fn documents_without_links_import_cleanly() {
	let mut editor = Editor::new(EditorConfig::default());
	let yaml = "\
nodes:
- id: A
  cpu_capacity: 50
  memory_capacity: 2000
  queue_size: 5
  failure_rate: 0.1
";
	editor.import(yaml).unwrap();

	assert_eq!(editor.topology().node_count(), 1);
	assert_eq!(editor.topology().link_count(), 0);

	editor.import("nodes: []\nlinks: []\n").unwrap();
	assert!(editor.topology().is_empty());
}

#[test]
fn dangling_link_endpoints_are_kept() {
	let yaml = "\
nodes: []
links:
- id: Link1
  node1: X
  node2: Y
  delay: 10
  bandwidth: 100
  jitter_range: [0.8, 1.2]
  failure_rate: 0.01
";
	let topology = import_topology(yaml).unwrap();

	assert_eq!(topology.node_count(), 0);
	assert_eq!(topology.link_count(), 1);
	assert!(topology.link("X", "Y").is_some());
	assert_eq!(topology.dangling_endpoints(), vec!["X", "Y"]);
}

#[test]
fn import_replaces_and_failed_import_keeps_store() {
	let mut editor = Editor::new(EditorConfig::default());
	editor.on_add_node(&node("old")).unwrap();

	assert!(editor.import("nodes:\n- id: broken\n").is_err());
	assert_eq!(editor.topology().node_ids(), vec!["old"]);

	editor.import("nodes: []\n").unwrap();
	assert!(editor.topology().is_empty());
}
