//! In-memory attributed graph of network nodes and links.
//!
//! Nodes are keyed by their identifier and links by the unordered pair of
//! their endpoints, so re-adding either one overwrites its attributes in
//! place. Iteration follows insertion order.
//!
//! The store is permissive: link endpoints are not checked
//! against the node set, and self-loops are accepted.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub mod document;

pub use document::{DocumentError, export_topology, import_topology};

/// Compute and queueing capacity of a node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeAttrs {
	/// CPU capability in percent (1-100).
	pub cpu_capacity: u32,
	/// Memory in megabytes (>= 1000).
	pub memory_capacity: u64,
	/// Queue length in packet slots (>= 1).
	pub queue_size: u32,
	/// Probability of failure, 0.0 to 1.0.
	pub failure_rate: f64,
}

impl Default for NodeAttrs {
	fn default() -> Self {
		Self {
			cpu_capacity: 100,
			memory_capacity: 8000,
			queue_size: 100,
			failure_rate: 0.01,
		}
	}
}

/// Multiplicative jitter factor range applied to a link's delay.
///
/// Serialized as a two-element sequence `[low, high]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct JitterRange {
	/// Lower factor, at least [`JitterRange::MIN`].
	pub low: f64,
	/// Upper factor, at most [`JitterRange::MAX`].
	pub high: f64,
}

impl JitterRange {
	/// Smallest factor the form accepts.
	pub const MIN: f64 = 0.5;
	/// Largest factor the form accepts.
	pub const MAX: f64 = 2.0;

	/// Range from `low` to `high`, taken as given.
	pub const fn new(low: f64, high: f64) -> Self {
		Self { low, high }
	}
}

impl Default for JitterRange {
	fn default() -> Self {
		Self::new(0.8, 1.2)
	}
}

impl From<(f64, f64)> for JitterRange {
	fn from((low, high): (f64, f64)) -> Self {
		Self { low, high }
	}
}

impl From<JitterRange> for (f64, f64) {
	fn from(range: JitterRange) -> Self {
		(range.low, range.high)
	}
}

/// Transport characteristics of a link.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinkAttrs {
	/// Propagation delay in milliseconds (>= 1).
	pub delay: u32,
	/// Bandwidth in Mbps (>= 1).
	pub bandwidth: u32,
	/// Multiplicative range applied to the delay.
	pub jitter_range: JitterRange,
	/// Probability of failure, 0.0 to 1.0.
	pub failure_rate: f64,
}

impl Default for LinkAttrs {
	fn default() -> Self {
		Self {
			delay: 10,
			bandwidth: 100,
			jitter_range: JitterRange::default(),
			failure_rate: 0.01,
		}
	}
}

/// An undirected link as stored, with the endpoint orientation it was first
/// added with.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
	/// Endpoint given first when the link was inserted.
	pub node1: String,
	/// The other endpoint.
	pub node2: String,
	/// Current attributes.
	pub attrs: LinkAttrs,
}

/// Unordered endpoint pair used to key links.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct LinkKey(String, String);

impl LinkKey {
	fn new(a: &str, b: &str) -> Self {
		if a <= b {
			Self(a.to_string(), b.to_string())
		} else {
			Self(b.to_string(), a.to_string())
		}
	}
}

/// The graph store owning every node and link of an editing session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Topology {
	nodes: IndexMap<String, NodeAttrs>,
	links: IndexMap<LinkKey, Link>,
}

impl Topology {
	/// Empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a node, or overwrites the attributes of an existing node with
	/// the same id.
	pub fn add_node(&mut self, id: impl Into<String>, attrs: NodeAttrs) {
		self.nodes.insert(id.into(), attrs);
	}

	/// Inserts the undirected link between `id1` and `id2`, or overwrites its
	/// attributes if it already exists in either orientation.
	pub fn add_link(&mut self, id1: &str, id2: &str, attrs: LinkAttrs) {
		self.links
			.entry(LinkKey::new(id1, id2))
			.and_modify(|link| link.attrs = attrs)
			.or_insert_with(|| Link {
				node1: id1.to_string(),
				node2: id2.to_string(),
				attrs,
			});
	}

	/// Attributes of node `id`.
	pub fn node(&self, id: &str) -> Option<&NodeAttrs> {
		self.nodes.get(id)
	}

	/// Looks up a link regardless of endpoint order.
	pub fn link(&self, id1: &str, id2: &str) -> Option<&Link> {
		self.links.get(&LinkKey::new(id1, id2))
	}

	/// Whether `id` has a node entry.
	pub fn contains_node(&self, id: &str) -> bool {
		self.nodes.contains_key(id)
	}

	/// Nodes in insertion order.
	pub fn nodes(&self) -> impl Iterator<Item = (&str, &NodeAttrs)> {
		self.nodes.iter().map(|(id, attrs)| (id.as_str(), attrs))
	}

	/// Links in insertion order.
	pub fn links(&self) -> impl Iterator<Item = &Link> {
		self.links.values()
	}

	/// Current node identifiers, which are the only valid link endpoints on
	/// the form path.
	pub fn node_ids(&self) -> Vec<String> {
		self.nodes.keys().cloned().collect()
	}

	/// Identifiers referenced by links that have no node entry.
	pub fn dangling_endpoints(&self) -> Vec<String> {
		let mut dangling: Vec<String> = Vec::new();
		for link in self.links.values() {
			for id in [&link.node1, &link.node2] {
				if !self.nodes.contains_key(id) && !dangling.contains(id) {
					dangling.push(id.clone());
				}
			}
		}
		dangling
	}

	/// Number of nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of links.
	pub fn link_count(&self) -> usize {
		self.links.len()
	}

	/// True when there are neither nodes nor links.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(cpu: u32) -> NodeAttrs {
		NodeAttrs {
			cpu_capacity: cpu,
			..NodeAttrs::default()
		}
	}

	#[test]
	fn add_node_stores_attributes() {
		let mut topology = Topology::new();
		let attrs = NodeAttrs {
			cpu_capacity: 100,
			memory_capacity: 8000,
			queue_size: 100,
			failure_rate: 0.01,
		};
		topology.add_node("A", attrs);

		assert_eq!(topology.node_count(), 1);
		assert_eq!(topology.node("A"), Some(&attrs));
	}

	#[test]
	fn re_adding_node_overwrites_in_place() {
		let mut topology = Topology::new();
		topology.add_node("A", node(10));
		topology.add_node("B", node(20));
		topology.add_node("A", node(30));

		assert_eq!(topology.node_count(), 2);
		assert_eq!(topology.node("A").map(|n| n.cpu_capacity), Some(30));
		assert_eq!(topology.node_ids(), vec!["A", "B"]);
	}

	#[test]
	fn links_are_undirected() {
		let mut topology = Topology::new();
		topology.add_node("A", NodeAttrs::default());
		topology.add_node("B", NodeAttrs::default());
		topology.add_link("A", "B", LinkAttrs::default());
		topology.add_link(
			"B",
			"A",
			LinkAttrs {
				delay: 42,
				..LinkAttrs::default()
			},
		);

		assert_eq!(topology.link_count(), 1);
		let link = topology.link("A", "B").unwrap();
		assert_eq!(link.attrs.delay, 42);
		assert_eq!((link.node1.as_str(), link.node2.as_str()), ("A", "B"));
		assert!(topology.link("B", "A").is_some());
	}

	#[test]
	fn self_loops_and_unknown_endpoints_are_accepted() {
		let mut topology = Topology::new();
		topology.add_node("A", NodeAttrs::default());
		topology.add_link("A", "A", LinkAttrs::default());
		topology.add_link("X", "Y", LinkAttrs::default());

		assert_eq!(topology.link_count(), 2);
		assert_eq!(topology.node_count(), 1);
		assert_eq!(topology.dangling_endpoints(), vec!["X", "Y"]);
	}
}
