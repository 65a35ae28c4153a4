//! YAML document codec for topologies.
//!
//! ```yaml
//! nodes:
//! - id: A
//!   cpu_capacity: 100
//!   memory_capacity: 8000
//!   queue_size: 100
//!   failure_rate: 0.01
//! links:
//! - id: Link1
//!   node1: A
//!   node2: B
//!   delay: 10
//!   bandwidth: 100
//!   jitter_range:
//!   - 0.8
//!   - 1.2
//!   failure_rate: 0.01
//! ```
//!
//! Link ids are regenerated on every export and ignored on import.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{JitterRange, LinkAttrs, NodeAttrs, Topology};

/// Errors raised while encoding or decoding a topology document.
#[derive(Error, Debug)]
pub enum DocumentError {
	/// The YAML text is malformed or an entry has a missing or mistyped field.
	/// The message leads with the path of the offending field, such as
	/// `links[0].delay`.
	#[error("invalid topology document: {0}")]
	Yaml(#[from] serde_yaml::Error),

	/// The JSON rendition failed to parse.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Serialized form of a whole topology.
///
/// Missing top-level keys read as empty sequences.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TopologyDocument {
	/// Node entries in store order.
	#[serde(default)]
	pub nodes: Vec<NodeEntry>,
	/// Link entries in store order.
	#[serde(default)]
	pub links: Vec<LinkEntry>,
}

/// One node entry of a document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeEntry {
	/// Node identifier.
	pub id: String,
	/// See [`NodeAttrs::cpu_capacity`].
	pub cpu_capacity: u32,
	/// See [`NodeAttrs::memory_capacity`].
	pub memory_capacity: u64,
	/// See [`NodeAttrs::queue_size`].
	pub queue_size: u32,
	/// See [`NodeAttrs::failure_rate`].
	pub failure_rate: f64,
}

/// One link entry of a document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LinkEntry {
	/// Synthetic `Link<n>` label, not required on import.
	#[serde(default)]
	pub id: String,
	/// First endpoint, as recorded in the store.
	pub node1: String,
	/// Second endpoint.
	pub node2: String,
	/// See [`LinkAttrs::delay`].
	pub delay: u32,
	/// See [`LinkAttrs::bandwidth`].
	pub bandwidth: u32,
	/// `[low, high]` jitter factors.
	pub jitter_range: JitterRange,
	/// See [`LinkAttrs::failure_rate`].
	pub failure_rate: f64,
}

impl NodeEntry {
	fn attrs(&self) -> NodeAttrs {
		NodeAttrs {
			cpu_capacity: self.cpu_capacity,
			memory_capacity: self.memory_capacity,
			queue_size: self.queue_size,
			failure_rate: self.failure_rate,
		}
	}
}

impl LinkEntry {
	fn attrs(&self) -> LinkAttrs {
		LinkAttrs {
			delay: self.delay,
			bandwidth: self.bandwidth,
			jitter_range: self.jitter_range,
			failure_rate: self.failure_rate,
		}
	}
}

impl From<&Topology> for TopologyDocument {
	fn from(topology: &Topology) -> Self {
		let nodes = topology
			.nodes()
			.map(|(id, attrs)| NodeEntry {
				id: id.to_string(),
				cpu_capacity: attrs.cpu_capacity,
				memory_capacity: attrs.memory_capacity,
				queue_size: attrs.queue_size,
				failure_rate: attrs.failure_rate,
			})
			.collect();

		let links = topology
			.links()
			.enumerate()
			.map(|(i, link)| LinkEntry {
				id: format!("Link{}", i + 1),
				node1: link.node1.clone(),
				node2: link.node2.clone(),
				delay: link.attrs.delay,
				bandwidth: link.attrs.bandwidth,
				jitter_range: link.attrs.jitter_range,
				failure_rate: link.attrs.failure_rate,
			})
			.collect();

		Self { nodes, links }
	}
}

impl TopologyDocument {
	/// Parses a YAML document. Blank or `null` documents are empty topologies.
	pub fn from_yaml(yaml: &str) -> DocumentResult<Self> {
		if yaml.trim().is_empty() {
			return Ok(Self::default());
		}
		let document: Option<Self> = serde_yaml::from_str(yaml)?;
		Ok(document.unwrap_or_default())
	}

	/// Parses the JSON rendition of the same document shape.
	pub fn from_json(json: &str) -> DocumentResult<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Serializes with fields in document order.
	pub fn to_yaml(&self) -> DocumentResult<String> {
		Ok(serde_yaml::to_string(self)?)
	}

	/// Builds a fresh store: nodes first, then links, without checking link
	/// endpoints against the node entries.
	pub fn into_topology(self) -> Topology {
		let mut topology = Topology::new();
		for node in &self.nodes {
			topology.add_node(node.id.clone(), node.attrs());
		}
		for link in &self.links {
			topology.add_link(&link.node1, &link.node2, link.attrs());
		}
		topology
	}
}

/// Serializes every node and link of `topology` as a YAML document.
pub fn export_topology(topology: &Topology) -> DocumentResult<String> {
	TopologyDocument::from(topology).to_yaml()
}

/// Parses a YAML document into a new store.
pub fn import_topology(yaml: &str) -> DocumentResult<Topology> {
	Ok(TopologyDocument::from_yaml(yaml)?.into_topology())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn two_node_topology() -> Topology {
		let mut topology = Topology::new();
		topology.add_node("A", NodeAttrs::default());
		topology.add_node(
			"B",
			NodeAttrs {
				cpu_capacity: 50,
				memory_capacity: 16000,
				queue_size: 10,
				failure_rate: 0.2,
			},
		);
		topology.add_link(
			"A",
			"B",
			LinkAttrs {
				delay: 10,
				bandwidth: 100,
				jitter_range: JitterRange::new(0.8, 1.2),
				failure_rate: 0.01,
			},
		);
		topology
	}

	#[test]
	fn export_keeps_key_order_and_numbers_links() {
		let yaml = export_topology(&two_node_topology()).unwrap();

		let expected_node = "- id: A\n  cpu_capacity: 100\n  memory_capacity: 8000\n  queue_size: 100\n  failure_rate: 0.01\n";
		assert!(yaml.starts_with("nodes:\n"), "{yaml}");
		assert!(yaml.contains(expected_node), "{yaml}");
		assert!(yaml.contains("- id: Link1\n  node1: A\n  node2: B\n  delay: 10\n"), "{yaml}");
		assert!(yaml.contains("jitter_range:\n  - 0.8\n  - 1.2\n"), "{yaml}");
		assert!(yaml.find("links:").unwrap() > yaml.find("nodes:").unwrap());
	}

	#[test]
	fn import_reverses_export() {
		let original = two_node_topology();
		let restored = import_topology(&export_topology(&original).unwrap()).unwrap();

		assert_eq!(restored, original);
	}

	#[test]
	fn missing_keys_read_as_empty() {
		let topology = import_topology("nodes: []\n").unwrap();
		assert!(topology.is_empty());

		let topology = import_topology("{}").unwrap();
		assert!(topology.is_empty());

		let topology = import_topology("").unwrap();
		assert!(topology.is_empty());
	}

	#[test]
	fn link_id_is_optional_on_import() {
		let yaml = r#"
links:
  - node1: A
    node2: B
    delay: 5
    bandwidth: 1
    jitter_range: [0.5, 2.0]
    failure_rate: 0.0
"#;
		let topology = import_topology(yaml).unwrap();

		let link = topology.link("A", "B").unwrap();
		assert_eq!(link.attrs.jitter_range, JitterRange::new(0.5, 2.0));
		assert_eq!(topology.node_count(), 0);
	}

	#[test]
	fn missing_attribute_fails_whole_import() {
		let yaml = r#"
nodes:
  - id: A
    cpu_capacity: 100
    memory_capacity: 8000
    failure_rate: 0.01
"#;
		let err = import_topology(yaml).unwrap_err();
		assert!(matches!(err, DocumentError::Yaml(_)));
		assert!(err.to_string().contains("queue_size"), "{err}");
	}

	#[test]
	fn mistyped_attribute_names_the_field() {
		let yaml = r#"
links:
  - node1: A
    node2: B
    delay: 2.5
    bandwidth: 100
    jitter_range: [0.8, 1.2]
    failure_rate: 0.01
"#;
		let err = import_topology(yaml).unwrap_err().to_string();
		assert!(err.starts_with("invalid topology document: "), "{err}");
		assert!(err.contains("delay"), "{err}");
		assert!(err.contains("2.5"), "{err}");
	}

	#[test]
	fn json_documents_share_the_shape() {
		let json = r#"{"nodes": [{"id": "A", "cpu_capacity": 1, "memory_capacity": 1000, "queue_size": 1, "failure_rate": 1.0}]}"#;
		let topology = TopologyDocument::from_json(json).unwrap().into_topology();

		assert_eq!(topology.node("A").map(|n| n.memory_capacity), Some(1000));
		assert_eq!(topology.link_count(), 0);
	}
}
