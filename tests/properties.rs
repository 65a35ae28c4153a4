//! Store and codec properties over generated add sequences.

#![allow(unused_crate_dependencies)]

use std::collections::HashMap;

use proptest::collection::vec;
use proptest::prelude::*;
use topology_editor::Topology;
use topology_editor::topology::{
	JitterRange, LinkAttrs, NodeAttrs, export_topology, import_topology,
};

/// Short ids, mixed with scalars YAML would read as null, bool or number.
fn node_id() -> impl Strategy<Value = String> {
	prop_oneof![
		4 => "[a-zA-Z0-9_]{1,8}",
		1 => prop::sample::select(vec!["null", "~", "123", "1.5", "yes", "no", "true", "0x1f", ""])
			.prop_map(str::to_string),
	]
}

fn node_attrs() -> impl Strategy<Value = NodeAttrs> {
	(any::<u32>(), any::<u64>(), any::<u32>(), 0.0f64..=1.0).prop_map(
		|(cpu_capacity, memory_capacity, queue_size, failure_rate)| NodeAttrs {
			cpu_capacity,
			memory_capacity,
			queue_size,
			failure_rate,
		},
	)
}

fn link_attrs() -> impl Strategy<Value = LinkAttrs> {
	(
		any::<u32>(),
		any::<u32>(),
		JitterRange::MIN..=JitterRange::MAX,
		JitterRange::MIN..=JitterRange::MAX,
		0.0f64..=1.0,
	)
		.prop_map(|(delay, bandwidth, a, b, failure_rate)| LinkAttrs {
			delay,
			bandwidth,
			jitter_range: JitterRange::new(a.min(b), a.max(b)),
			failure_rate,
		})
}

/// A store built from arbitrary add-node and add-link calls. Link endpoints
/// are drawn independently of the node ids, so many of them dangle.
fn topology() -> impl Strategy<Value = Topology> {
	(
		vec((node_id(), node_attrs()), 0..12),
		vec((node_id(), node_id(), link_attrs()), 0..12),
	)
		.prop_map(|(nodes, links)| {
			let mut topology = Topology::new();
			for (id, attrs) in nodes {
				topology.add_node(id, attrs);
			}
			for (a, b, attrs) in links {
				topology.add_link(&a, &b, attrs);
			}
			topology
		})
}

proptest! {
	#[test]
	fn export_then_import_reproduces_the_store(original in topology()) {
		let yaml = export_topology(&original).unwrap();
		let reloaded = import_topology(&yaml).unwrap();

		prop_assert_eq!(&reloaded, &original);
		prop_assert_eq!(reloaded.node_ids(), original.node_ids());
		prop_assert_eq!(reloaded.dangling_endpoints(), original.dangling_endpoints());
	}

	#[test]
	fn repeated_node_ids_keep_the_last_attributes(
		ops in vec((node_id(), node_attrs()), 1..20),
	) {
		let mut topology = Topology::new();
		let mut expected = HashMap::new();
		for (id, attrs) in &ops {
			topology.add_node(id.clone(), *attrs);
			expected.insert(id.clone(), *attrs);
		}

		prop_assert_eq!(topology.node_count(), expected.len());
		for (id, attrs) in &expected {
			prop_assert_eq!(topology.node(id), Some(attrs));
		}
	}

	#[test]
	fn links_are_keyed_by_unordered_endpoints(
		a in node_id(),
		b in node_id(),
		first in link_attrs(),
		second in link_attrs(),
	) {
		let mut topology = Topology::new();
		topology.add_link(&a, &b, first);
		topology.add_link(&b, &a, second);

		prop_assert_eq!(topology.link_count(), 1);
		let link = topology.link(&a, &b).unwrap();
		prop_assert_eq!((link.node1.as_str(), link.node2.as_str()), (a.as_str(), b.as_str()));
		prop_assert_eq!(link.attrs, second);
	}
}
